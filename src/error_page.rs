//! 错误页门禁与错误分类
//!
//! 错误页只能经由真实失败触发的重定向进入，不能直接在地址栏输入。
//! `ErrorGate` 是一次性允许名单：分类器在重定向前武装它，
//! 导航守卫消费一次后立即清空。

use std::cell::RefCell;

use crate::error::ApiError;
use crate::web::route::AppRoute;

// =========================================================
// 错误页枚举
// =========================================================

/// 可经门禁进入的错误页
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPage {
    /// HTTP 403
    AccessDenied,
    /// HTTP 404
    NotFound,
    /// 其余一切失败，包括完全没有响应
    NetworkError,
}

impl ErrorPage {
    /// 门禁页名（与路由名一致）
    pub fn name(&self) -> &'static str {
        match self {
            ErrorPage::AccessDenied => "access-denied",
            ErrorPage::NotFound => "not-found",
            ErrorPage::NetworkError => "network-error",
        }
    }

    /// 对应的应用路由
    pub fn route(&self) -> AppRoute {
        match self {
            ErrorPage::AccessDenied => AppRoute::AccessDenied,
            ErrorPage::NotFound => AppRoute::NotFound,
            ErrorPage::NetworkError => AppRoute::NetworkError,
        }
    }

    /// **错误分类：将失败的远程调用映射到错误页**
    pub fn classify(err: &ApiError) -> Self {
        match err.http_status() {
            Some(403) => ErrorPage::AccessDenied,
            Some(404) => ErrorPage::NotFound,
            _ => ErrorPage::NetworkError,
        }
    }
}

// =========================================================
// 一次性门禁
// =========================================================

/// 错误页允许名单
///
/// 仅在"错误分类"与"随后的一次导航"之间短暂非空。
#[derive(Default)]
pub struct ErrorGate {
    allowed: RefCell<Vec<ErrorPage>>,
}

impl ErrorGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 幂等地加入允许名单
    pub fn allow(&self, page: ErrorPage) {
        let mut allowed = self.allowed.borrow_mut();
        if !allowed.contains(&page) {
            allowed.push(page);
        }
    }

    pub fn is_allowed(&self, page: ErrorPage) -> bool {
        self.allowed.borrow().contains(&page)
    }

    /// 清空名单。守卫在每次非错误页导航及错误页被消费后调用。
    pub fn reset(&self) {
        self.allowed.borrow_mut().clear();
    }
}

/// 分类失败的远程调用，武装门禁，并返回应当跳转的错误页路由
pub fn redirect_for_error(gate: &ErrorGate, err: &ApiError) -> AppRoute {
    let page = ErrorPage::classify(err);
    gate.allow(page);
    page.route()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status_codes() {
        assert_eq!(
            ErrorPage::classify(&ApiError::status(403, "forbidden")),
            ErrorPage::AccessDenied
        );
        assert_eq!(
            ErrorPage::classify(&ApiError::status(404, "missing")),
            ErrorPage::NotFound
        );
        assert_eq!(
            ErrorPage::classify(&ApiError::status(500, "boom")),
            ErrorPage::NetworkError
        );
    }

    #[test]
    fn test_classify_no_response_is_network_error() {
        assert_eq!(
            ErrorPage::classify(&ApiError::network("connection refused")),
            ErrorPage::NetworkError
        );
        assert_eq!(
            ErrorPage::classify(&ApiError::decode("bad body")),
            ErrorPage::NetworkError
        );
    }

    #[test]
    fn test_gate_allow_is_idempotent() {
        let gate = ErrorGate::new();
        gate.allow(ErrorPage::NotFound);
        gate.allow(ErrorPage::NotFound);

        assert!(gate.is_allowed(ErrorPage::NotFound));
        assert_eq!(gate.allowed.borrow().len(), 1);
    }

    #[test]
    fn test_gate_reset_clears_all() {
        let gate = ErrorGate::new();
        gate.allow(ErrorPage::NotFound);
        gate.allow(ErrorPage::AccessDenied);

        gate.reset();

        assert!(!gate.is_allowed(ErrorPage::NotFound));
        assert!(!gate.is_allowed(ErrorPage::AccessDenied));
    }

    #[test]
    fn test_redirect_for_error_arms_gate() {
        let gate = ErrorGate::new();
        let route = redirect_for_error(&gate, &ApiError::status(403, "forbidden"));

        assert_eq!(route, AppRoute::AccessDenied);
        assert!(gate.is_allowed(ErrorPage::AccessDenied));
        assert!(!gate.is_allowed(ErrorPage::NetworkError));
    }
}
