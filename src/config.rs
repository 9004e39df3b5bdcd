//! 运行时配置
//!
//! 默认值在编译期给定；部署可通过本地存储键覆盖 API 基地址
//! （与登录页记住上次后端 URL 的机制共用同一个键）。

use crate::web::storage::StorageAdapter;

/// 默认后端基地址
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// 基地址覆盖所使用的存储键
pub const STORAGE_KEY_API_URL: &str = "taskdeck_api_url";

/// 解析当前生效的 API 基地址：存储覆盖优先，否则用默认值
pub fn api_base_url<S: StorageAdapter>(storage: &S) -> String {
    storage
        .get::<String>(STORAGE_KEY_API_URL)
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::storage::tests::MockStorage;

    #[test]
    fn test_default_when_no_override() {
        let storage = MockStorage::new();
        assert_eq!(api_base_url(&storage), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_storage_override_wins() {
        let storage = MockStorage::new();
        storage.put(STORAGE_KEY_API_URL, &"https://tracker.example.com".to_string());
        assert_eq!(api_base_url(&storage), "https://tracker.example.com");
    }
}
