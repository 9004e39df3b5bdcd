//! 导航守卫
//!
//! 在每次路由切换前运行（包括首次加载与浏览器前进/后退），
//! 根据会话状态与错误页门禁裁决"放行"或"重定向"。
//! 顺序判定，先命中者生效；远程调用是唯一的挂起点，
//! 挂起之后一律重新读取共享状态。

use crate::logging::{log_info, log_warn};
use crate::state::AppState;
use crate::web::http::HttpClient;
use crate::web::route::AppRoute;
use crate::web::storage::StorageAdapter;

/// 守卫裁决
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 放行，按请求的路由加载
    Proceed,
    /// 重定向；`redirect_back` 携带原始目标路径，供登录后返回
    Redirect {
        to: AppRoute,
        redirect_back: Option<String>,
    },
}

impl GuardDecision {
    fn redirect(to: AppRoute) -> Self {
        GuardDecision::Redirect {
            to,
            redirect_back: None,
        }
    }
}

/// **核心方法：导航裁决**
///
/// 算法（顺序判定，先命中者生效）：
/// 1. 错误页：门禁未武装则送回首页；已武装则消费门禁并放行
/// 2. 其余路由无条件清空门禁（错误页是一次性的）
/// 3. 远程确认会话，失败降级为未认证
/// 4. 仅访客路由 + 已认证 → 首页
/// 5. 需认证路由 + 未认证 → 登录页（携带原始目标）
/// 6. 需项目列表的路由在列表为空时惰性拉取，仍为空则转入引导页
/// 7. 放行
pub async fn resolve_navigation<S, C>(state: &AppState<S, C>, target: &AppRoute) -> GuardDecision
where
    S: StorageAdapter,
    C: HttpClient,
{
    if let Some(page) = target.error_page() {
        if !state.gate.is_allowed(page) {
            log_info!("[Guard] 拒绝直接访问错误页 {}", page.name());
            return GuardDecision::redirect(AppRoute::Home);
        }
        state.gate.reset();
        return GuardDecision::Proceed;
    }

    state.gate.reset();

    // 失败已在 check_auth 内部记录，这里只拿结果
    let authenticated = state.session.check_auth().await;

    if target.guest_only() && authenticated {
        log_info!("[Guard] 已认证，离开访客页 {}", target.name());
        return GuardDecision::redirect(AppRoute::Home);
    }

    if target.requires_auth() && !authenticated {
        log_info!("[Guard] 未认证，重定向登录: {}", target.to_path());
        return GuardDecision::Redirect {
            to: AppRoute::Login,
            redirect_back: Some(target.to_path().to_string()),
        };
    }

    if target.requires_projects() && !state.selection.has_projects() {
        // 拉取失败与"确实没有项目"走同一条引导路径；错误单独记录
        if let Err(e) = state.selection.fetch_projects(authenticated).await {
            log_warn!("[Guard] 项目列表拉取失败: {}", e);
        }
        // 挂起之后重新读取状态
        if !state.selection.has_projects() {
            return GuardDecision::redirect(AppRoute::Start);
        }
    }

    GuardDecision::Proceed
}

// =========================================================
// 测试模块
// =========================================================
