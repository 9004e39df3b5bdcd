//! 会话状态模块
//!
//! 管理当前用户的认证状态，与路由系统解耦：导航守卫通过注入的
//! `SessionStore` 引用做认证检查。状态迁移是纯函数，持久化是
//! 显式的独立操作，二者由 store 方法组合。

use std::cell::RefCell;
use std::rc::Rc;

use taskdeck_shared::User;

use crate::api::ApiClient;
use crate::logging::{log_error, log_info};
use crate::web::http::HttpClient;
use crate::web::storage::StorageAdapter;

/// 会话用户记录的存储键
pub const STORAGE_KEY_USER: &str = "taskdeck_user";

// =========================================================
// 会话状态（纯数据）
// =========================================================

/// 会话状态
///
/// 不变量：`is_authenticated` 为真当且仅当 `user` 存在。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl SessionState {
    /// 纯状态迁移：设置或清除用户，同步维护认证标志
    pub fn apply_user(&mut self, user: Option<User>) {
        self.is_authenticated = user.is_some();
        self.user = user;
    }
}

// =========================================================
// 会话 Store
// =========================================================

pub struct SessionStore<S, C> {
    state: RefCell<SessionState>,
    storage: Rc<S>,
    api: ApiClient<C>,
}

impl<S, C> SessionStore<S, C>
where
    S: StorageAdapter,
    C: HttpClient,
{
    pub fn new(storage: Rc<S>, api: ApiClient<C>) -> Self {
        Self {
            state: RefCell::new(SessionState::default()),
            storage,
            api,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// 启动时从本地存储恢复会话。不发起远程调用。
    pub fn restore(&self) {
        if let Some(user) = self.storage.get::<User>(STORAGE_KEY_USER) {
            self.state.borrow_mut().apply_user(Some(user));
        }
    }

    /// 远程确认当前会话
    ///
    /// 成功时更新并持久化用户；任何失败（网络、非 2xx）都降级为
    /// 未认证并返回 `false`，绝不向调用方抛出。
    pub async fn check_auth(&self) -> bool {
        match self.api.current_user().await {
            Ok(user) => {
                self.set_user(Some(user));
                true
            }
            Err(e) => {
                log_info!("[Session] 认证检查未通过: {}", e);
                self.set_user(None);
                false
            }
        }
    }

    /// 设置用户：纯状态迁移 + 显式持久化
    ///
    /// 登录/注册成功后由调用方直接使用。
    pub fn set_user(&self, user: Option<User>) {
        self.state.borrow_mut().apply_user(user.clone());
        match &user {
            Some(u) => {
                self.persist_user(u);
            }
            None => {
                self.clear_persisted_user();
            }
        }
    }

    /// 持久化用户记录；独立于状态迁移，可单独测试
    pub fn persist_user(&self, user: &User) -> bool {
        self.storage.put(STORAGE_KEY_USER, user)
    }

    pub fn clear_persisted_user(&self) -> bool {
        self.storage.delete(STORAGE_KEY_USER)
    }

    /// 注销
    ///
    /// 远程通知尽力而为（失败只记录日志）；本地会话与所有依附的
    /// 持久化选择状态无条件清除（乐观注销）。导航由调用方执行。
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            log_error!("[Session] 注销请求失败: {}", e);
        }
        self.set_user(None);
        self.storage.delete(crate::projects::STORAGE_KEY_LAST_PROJECT);
        self.storage.delete(crate::projects::STORAGE_KEY_LAST_SPRINT);
    }
}

// =========================================================
// 测试模块
// =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::http::tests::MockHttpClient;
    use crate::web::storage::tests::MockStorage;
    use serde_json::json;

    fn store() -> (
        SessionStore<MockStorage, MockHttpClient>,
        Rc<MockStorage>,
        Rc<MockHttpClient>,
    ) {
        let storage = Rc::new(MockStorage::new());
        let client = Rc::new(MockHttpClient::new());
        let api = ApiClient::new(String::new(), Rc::clone(&client));
        (
            SessionStore::new(Rc::clone(&storage), api),
            storage,
            client,
        )
    }

    fn alice() -> User {
        User {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    fn alice_json() -> serde_json::Value {
        json!({"id": 1, "name": "Alice", "email": "alice@example.com"})
    }

    #[test]
    fn test_invariant_flag_tracks_user() {
        let mut state = SessionState::default();
        assert!(!state.is_authenticated);

        state.apply_user(Some(alice()));
        assert!(state.is_authenticated);

        state.apply_user(None);
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_restore_reads_persisted_user() {
        let (store, storage, _client) = store();
        storage.put(STORAGE_KEY_USER, &alice());

        store.restore();

        assert!(store.is_authenticated());
        assert_eq!(store.user().unwrap().name, "Alice");
    }

    #[test]
    fn test_restore_without_record_stays_guest() {
        let (store, _storage, _client) = store();
        store.restore();
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_check_auth_success_stores_and_persists() {
        let (store, storage, client) = store();
        client.mock_response("/account/user/", 200, alice_json());

        assert!(store.check_auth().await);
        assert!(store.is_authenticated());
        assert!(storage.contains(STORAGE_KEY_USER));
    }

    #[tokio::test]
    async fn test_check_auth_failure_degrades_to_guest() {
        let (store, storage, client) = store();
        storage.put(STORAGE_KEY_USER, &alice());
        store.restore();
        client.mock_response("/account/user/", 401, json!({"detail": "expired"}));

        assert!(!store.check_auth().await);
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
        assert!(!storage.contains(STORAGE_KEY_USER));
    }

    #[tokio::test]
    async fn test_check_auth_network_failure_never_raises() {
        let (store, _storage, client) = store();
        client.mock_network_failure("/account/user/");

        assert!(!store.check_auth().await);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_set_user_persists_and_clears() {
        let (store, storage, _client) = store();

        store.set_user(Some(alice()));
        assert!(storage.contains(STORAGE_KEY_USER));

        store.set_user(None);
        assert!(!storage.contains(STORAGE_KEY_USER));
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_selection_keys() {
        let (store, storage, client) = store();
        client.mock_response("/account/logout", 200, json!({}));
        store.set_user(Some(alice()));
        storage.put(crate::projects::STORAGE_KEY_LAST_PROJECT, &1_i64);
        storage.put(crate::projects::STORAGE_KEY_LAST_SPRINT, &2_i64);

        store.logout().await;

        assert!(!store.is_authenticated());
        assert!(!storage.contains(STORAGE_KEY_USER));
        assert!(!storage.contains(crate::projects::STORAGE_KEY_LAST_PROJECT));
        assert!(!storage.contains(crate::projects::STORAGE_KEY_LAST_SPRINT));
    }

    #[tokio::test]
    async fn test_logout_is_optimistic_on_remote_failure() {
        let (store, storage, client) = store();
        client.mock_network_failure("/account/logout");
        store.set_user(Some(alice()));
        storage.put(crate::projects::STORAGE_KEY_LAST_PROJECT, &1_i64);

        store.logout().await;

        // 远程失败也要清除本地状态
        assert!(!store.is_authenticated());
        assert!(!storage.contains(STORAGE_KEY_USER));
        assert!(!storage.contains(crate::projects::STORAGE_KEY_LAST_PROJECT));
    }
}
