//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、路径映射及守卫元数据。

use std::fmt::Display;

use crate::error_page::ErrorPage;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页概览 (默认路由，需要认证)
    #[default]
    Home,
    /// 登录页面 (仅访客)
    Login,
    /// 注册页面 (仅访客)
    Register,
    /// 任务看板 (需要认证和项目列表)
    Tasks,
    /// 引导页：尚无可访问项目时的着陆点 (需要认证)
    Start,
    /// 错误页：无权访问 (403)
    AccessDenied,
    /// 错误页：资源未找到 (404)，同时是未知路径的兜底路由
    NotFound,
    /// 错误页：网络故障
    NetworkError,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举。查询串会被忽略。
    pub fn from_path(path: &str) -> Self {
        let path = path.split('?').next().unwrap_or(path);
        match path {
            "/" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/tasks" => Self::Tasks,
            "/start" => Self::Start,
            "/access-denied" => Self::AccessDenied,
            "/not-found" => Self::NotFound,
            "/network-error" => Self::NetworkError,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Tasks => "/tasks",
            Self::Start => "/start",
            Self::AccessDenied => "/access-denied",
            Self::NotFound => "/not-found",
            Self::NetworkError => "/network-error",
        }
    }

    /// 路由名称（与后端/日志约定一致）
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Register => "register",
            Self::Tasks => "tasks",
            Self::Start => "start",
            Self::AccessDenied => "access-denied",
            Self::NotFound => "not-found",
            Self::NetworkError => "network-error",
        }
    }

    /// **守卫元数据：该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Home | Self::Tasks | Self::Start)
    }

    /// 守卫元数据：该路由是否仅限访客（已认证用户应被送回首页）
    pub fn guest_only(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 守卫元数据：该路由是否要求已加载的项目列表
    pub fn requires_projects(&self) -> bool {
        matches!(self, Self::Tasks)
    }

    /// 若是错误页则返回对应的门禁页名
    pub fn error_page(&self) -> Option<ErrorPage> {
        match self {
            Self::AccessDenied => Some(ErrorPage::AccessDenied),
            Self::NotFound => Some(ErrorPage::NotFound),
            Self::NetworkError => Some(ErrorPage::NetworkError),
            _ => None,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 从查询串（如 `?redirect=/tasks`）提取登录后的返回路径
pub fn redirect_param(search: &str) -> Option<String> {
    let search = search.strip_prefix('?').unwrap_or(search);
    search.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == "redirect" && !value.is_empty()).then(|| value.to_string())
    })
}
