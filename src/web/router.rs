//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 每一次路由切换（首次加载、应用内导航、浏览器前进/后退）都经由
//! 导航守卫裁决后才落地。

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;
use crate::guard::{GuardDecision, resolve_navigation};
use crate::logging::log_info;
use crate::state::AppStateHandle;

/// 获取当前浏览器路径
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 获取当前浏览器查询串（含前导 `?`，可能为空）
pub fn current_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向与 popstate）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 应用状态由外部注入，守卫据此做认证与门禁检查。
/// 整个服务是 Copy 的句柄集合，可以无负担地捕获进闭包。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）；首次守卫裁决落地前为 `None`
    current_route: ReadSignal<Option<AppRoute>>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<Option<AppRoute>>,
    /// 注入的应用状态句柄
    state: AppStateHandle,
}

impl RouterService {
    fn new(state: AppStateHandle) -> Self {
        let (current_route, set_route) = signal(Option::<AppRoute>::None);
        Self {
            current_route,
            set_route,
            state,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<Option<AppRoute>> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, target: AppRoute) {
        self.dispatch(target, true);
    }

    /// 按路径导航（查询串会被路由解析忽略）
    pub fn navigate_path(&self, path: &str) {
        self.dispatch(AppRoute::from_path(path), true);
    }

    /// 裁决并落地一次路由切换
    ///
    /// # Arguments
    /// * `target` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn dispatch(&self, target: AppRoute, use_push: bool) {
        let state = self.state.get_value();
        let set_route = self.set_route;

        // 守卫含远程调用，必须异步执行；被并发导航取代的结果
        // 只是一次无害的迟到写入
        spawn_local(async move {
            let decision = resolve_navigation(&state, &target).await;

            let (route, path) = match decision {
                GuardDecision::Proceed => (target.clone(), target.to_path().to_string()),
                GuardDecision::Redirect { to, redirect_back } => {
                    log_info!("[Router] {} -> {}", target.to_path(), to.to_path());
                    let path = match redirect_back {
                        Some(original) => format!("{}?redirect={}", to.to_path(), original),
                        None => to.to_path().to_string(),
                    };
                    (to, path)
                }
            };

            if use_push {
                push_history_state(&path);
            } else {
                replace_history_state(&path);
            }
            set_route.set(Some(route));
        });
    }

    /// 启动 URL 也走同一条守卫路径（replace 模式，不污染历史）
    fn resolve_initial(&self) {
        self.dispatch(AppRoute::from_path(&current_path()), false);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let service = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            // popstate 时也执行完整守卫
            service.dispatch(AppRoute::from_path(&current_path()), false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(state: AppStateHandle) -> RouterService {
    let router = RouterService::new(state);

    router.init_popstate_listener();
    router.resolve_initial();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 注入的应用状态句柄
    state: AppStateHandle,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(state);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件；首次守卫裁决前显示加载指示。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || match router.current_route().get() {
        Some(current) => matcher(current),
        None => view! {
            <div class="flex items-center justify-center min-h-screen">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
    }
}
