use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod protocol;

// 供下游 crate 统一使用同一版本的 chrono
pub use chrono;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 状态变更请求所携带的 CSRF 头
pub const HEADER_CSRF_TOKEN: &str = "X-CSRFToken";
/// 后端会话框架下发的 CSRF cookie 名称
pub const COOKIE_CSRF: &str = "csrftoken";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 当前登录用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// 项目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// 所属用户组
    pub group: i64,
}

/// 冲刺（归属于某个项目）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub project: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityKind {
    High,
    Medium,
    Low,
    Default,
}

impl PriorityKind {
    /// 排序权重，数值越大优先级越高
    pub fn weight(&self) -> u8 {
        match self {
            PriorityKind::High => 4,
            PriorityKind::Medium => 3,
            PriorityKind::Low => 2,
            PriorityKind::Default => 1,
        }
    }
}

/// 任务优先级目录项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Priority {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: PriorityKind,
}
