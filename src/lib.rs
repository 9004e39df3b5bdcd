//! TaskDeck 前端应用
//!
//! 任务/项目跟踪系统的客户端路由与状态管理层。
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `guard`: 导航守卫（认证、访客页、错误页门禁、项目预取）
//! - `auth` / `projects` / `tasks`: 会话与数据状态
//! - `error_page`: 错误页门禁与错误分类
//! - `components`: UI 组件层

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod error_page;
pub mod guard;
pub mod projects;
pub mod state;
pub mod tasks;

mod logging;

mod components {
    pub mod board;
    pub mod error_pages;
    pub mod home;
    pub mod login;
    pub mod register;
    pub mod start;
}

// 原生 Web API 封装模块
// 浏览器能力（HTTP / LocalStorage / History）统一经由此模块进入，
// HTTP 与存储提供可注入的抽象接口。
pub mod web;

use std::rc::Rc;

use leptos::prelude::*;

use components::board::BoardPage;
use components::error_pages::{AccessDeniedPage, NetworkErrorPage, NotFoundPage};
use components::home::HomePage;
use components::login::LoginPage;
use components::register::RegisterPage;
use components::start::StartPage;
use state::{browser_state, provide_app_state};
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Tasks => view! { <BoardPage /> }.into_any(),
        AppRoute::Start => view! { <StartPage /> }.into_any(),
        AppRoute::AccessDenied => view! { <AccessDeniedPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
        AppRoute::NetworkError => view! { <NetworkErrorPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构造应用状态（每个应用会话一次；显式注入，无全局单例）
    let state = Rc::new(browser_state());

    // 2. 从本地存储恢复会话（无远程调用）
    state.session.restore();

    // 3. 放入本线程 arena，视图层只捕获 Copy 句柄
    let state = provide_app_state(state);

    view! {
        // 4. 路由器组件：注入应用状态，所有切换经导航守卫裁决
        <Router state=state>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
