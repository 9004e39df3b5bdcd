//! 项目/冲刺选择状态
//!
//! 持有可访问的项目与冲刺集合及"当前选中"项。选择只在会话已认证时
//! 持久化（写保护不变量）；拉取失败将集合重置为空并把错误显式
//! 返回给调用方，由调用方决定记录或降级。

use std::cell::RefCell;
use std::rc::Rc;

use taskdeck_shared::{Project, Sprint};

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::web::http::HttpClient;
use crate::web::storage::StorageAdapter;

/// 上次查看的项目/冲刺的存储键（值为 JSON 编码的数字 id）
pub const STORAGE_KEY_LAST_PROJECT: &str = "taskdeck_last_project";
pub const STORAGE_KEY_LAST_SPRINT: &str = "taskdeck_last_sprint";

// =========================================================
// 选择状态（纯数据）
// =========================================================

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub current_project: Option<Project>,
    pub current_sprint: Option<Sprint>,
    pub projects: Vec<Project>,
    pub sprints: Vec<Sprint>,
}

// =========================================================
// 选择 Store
// =========================================================

pub struct SelectionStore<S, C> {
    state: RefCell<SelectionState>,
    storage: Rc<S>,
    api: ApiClient<C>,
}

impl<S, C> SelectionStore<S, C>
where
    S: StorageAdapter,
    C: HttpClient,
{
    pub fn new(storage: Rc<S>, api: ApiClient<C>) -> Self {
        Self {
            state: RefCell::new(SelectionState::default()),
            storage,
            api,
        }
    }

    pub fn snapshot(&self) -> SelectionState {
        self.state.borrow().clone()
    }

    pub fn has_projects(&self) -> bool {
        !self.state.borrow().projects.is_empty()
    }

    pub fn current_project(&self) -> Option<Project> {
        self.state.borrow().current_project.clone()
    }

    pub fn current_sprint(&self) -> Option<Sprint> {
        self.state.borrow().current_sprint.clone()
    }

    /// 拉取可访问的项目列表
    ///
    /// 成功时替换集合，并恢复持久化的选择；若已认证且尚无选中项，
    /// 默认选中第一个项目。失败时集合重置为空并返回错误，
    /// 调用方须把"空"与"失败"分开对待。
    pub async fn fetch_projects(&self, authenticated: bool) -> ApiResult<Vec<Project>> {
        let list = match self.api.list_projects().await {
            Ok(list) => list,
            Err(e) => {
                let mut state = self.state.borrow_mut();
                state.projects.clear();
                return Err(e.in_op("projects.fetch"));
            }
        };

        self.state.borrow_mut().projects = list.clone();

        // 恢复持久化的选择
        let persisted: Option<i64> = self.storage.get(STORAGE_KEY_LAST_PROJECT);
        let restored = persisted.and_then(|id| list.iter().find(|p| p.id == id).cloned());
        if let Some(project) = restored {
            self.set_current_project(project, authenticated);
        } else if authenticated && self.current_project().is_none() {
            if let Some(first) = list.first().cloned() {
                self.set_current_project(first, authenticated);
            }
        }

        Ok(list)
    }

    /// 拉取当前选中项目的冲刺列表；失败时重置为空
    pub async fn fetch_sprints(&self, authenticated: bool) -> ApiResult<Vec<Sprint>> {
        let Some(project) = self.current_project() else {
            let mut state = self.state.borrow_mut();
            state.sprints.clear();
            state.current_sprint = None;
            return Ok(Vec::new());
        };

        let list = match self.api.list_sprints(project.id).await {
            Ok(list) => list,
            Err(e) => {
                let mut state = self.state.borrow_mut();
                state.sprints.clear();
                state.current_sprint = None;
                return Err(e.in_op("sprints.fetch"));
            }
        };

        self.state.borrow_mut().sprints = list.clone();

        let persisted: Option<i64> = self.storage.get(STORAGE_KEY_LAST_SPRINT);
        if let Some(sprint) = persisted.and_then(|id| list.iter().find(|s| s.id == id).cloned()) {
            self.set_current_sprint(sprint, authenticated);
        }

        Ok(list)
    }

    /// 更新项目选择并持久化 — 仅在会话已认证时写入存储
    ///
    /// 切换到另一个项目会同时清除冲刺选择。
    pub fn set_current_project(&self, project: Project, authenticated: bool) {
        {
            let mut state = self.state.borrow_mut();
            let switched = state.current_project.as_ref().map(|p| p.id) != Some(project.id);
            if switched {
                state.current_sprint = None;
                state.sprints.clear();
            }
            state.current_project = Some(project.clone());
        }
        if authenticated {
            self.persist_project_selection(&project);
        }
    }

    /// 更新冲刺选择并持久化 — 仅在会话已认证时写入存储
    pub fn set_current_sprint(&self, sprint: Sprint, authenticated: bool) {
        self.state.borrow_mut().current_sprint = Some(sprint.clone());
        if authenticated {
            self.persist_sprint_selection(&sprint);
        }
    }

    /// 持久化项目选择；独立于状态迁移，可单独测试
    pub fn persist_project_selection(&self, project: &Project) -> bool {
        self.storage.put(STORAGE_KEY_LAST_PROJECT, &project.id)
    }

    pub fn persist_sprint_selection(&self, sprint: &Sprint) -> bool {
        self.storage.put(STORAGE_KEY_LAST_SPRINT, &sprint.id)
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
        SelectionStore<MockStorage, MockHttpClient>,
        Rc<MockStorage>,
        Rc<MockHttpClient>,
    ) {
        let storage = Rc::new(MockStorage::new());
        let client = Rc::new(MockHttpClient::new());
        let api = ApiClient::new(String::new(), Rc::clone(&client));
        (
            SelectionStore::new(Rc::clone(&storage), api),
            storage,
            client,
        )
    }

    fn project(id: i64, name: &str) -> Project {
        Project {
            id,
            name: name.to_string(),
            description: String::new(),
            start_time: "2024-01-01T00:00:00Z".parse().unwrap(),
            end_time: "2024-06-01T00:00:00Z".parse().unwrap(),
            group: 1,
        }
    }

    fn sprint(id: i64, project: i64) -> Sprint {
        Sprint {
            id,
            name: format!("Sprint {id}"),
            description: String::new(),
            start_time: "2024-02-01T00:00:00Z".parse().unwrap(),
            end_time: None,
            project,
        }
    }

    fn projects_json(projects: &[Project]) -> serde_json::Value {
        serde_json::to_value(projects).unwrap()
    }

    #[test]
    fn test_set_current_project_unauthenticated_does_not_persist() {
        let (store, storage, _client) = store();

        store.set_current_project(project(1, "Alpha"), false);

        assert_eq!(store.current_project().unwrap().id, 1);
        assert!(!storage.contains(STORAGE_KEY_LAST_PROJECT));
    }

    #[test]
    fn test_set_current_project_authenticated_persists() {
        let (store, storage, _client) = store();

        store.set_current_project(project(1, "Alpha"), true);

        assert_eq!(storage.get::<i64>(STORAGE_KEY_LAST_PROJECT), Some(1));
    }

    #[test]
    fn test_switching_project_clears_sprint_selection() {
        let (store, _storage, _client) = store();
        store.set_current_project(project(1, "Alpha"), false);
        store.set_current_sprint(sprint(10, 1), false);

        store.set_current_project(project(2, "Beta"), false);

        assert!(store.current_sprint().is_none());
    }

    #[tokio::test]
    async fn test_fetch_projects_empty_list_leaves_no_selection() {
        let (store, _storage, client) = store();
        client.mock_response("/project/list/", 200, json!([]));

        let list = store.fetch_projects(true).await.unwrap();

        assert!(list.is_empty());
        assert!(store.current_project().is_none());
        assert!(!store.has_projects());
    }

    #[tokio::test]
    async fn test_fetch_projects_defaults_to_first_when_authenticated() {
        let (store, storage, client) = store();
        let list = [project(1, "Alpha"), project(2, "Beta")];
        client.mock_response("/project/list/", 200, projects_json(&list));

        store.fetch_projects(true).await.unwrap();

        assert_eq!(store.current_project().unwrap().id, 1);
        assert_eq!(storage.get::<i64>(STORAGE_KEY_LAST_PROJECT), Some(1));
    }

    #[tokio::test]
    async fn test_fetch_projects_no_default_when_unauthenticated() {
        let (store, storage, client) = store();
        let list = [project(1, "Alpha")];
        client.mock_response("/project/list/", 200, projects_json(&list));

        store.fetch_projects(false).await.unwrap();

        assert!(store.current_project().is_none());
        assert!(!storage.contains(STORAGE_KEY_LAST_PROJECT));
    }

    #[tokio::test]
    async fn test_fetch_projects_restores_persisted_selection() {
        let (store, storage, client) = store();
        let list = [project(1, "Alpha"), project(2, "Beta")];
        client.mock_response("/project/list/", 200, projects_json(&list));
        storage.put(STORAGE_KEY_LAST_PROJECT, &2_i64);

        store.fetch_projects(true).await.unwrap();

        assert_eq!(store.current_project().unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_fetch_projects_stale_persisted_id_falls_back_to_first() {
        let (store, storage, client) = store();
        let list = [project(1, "Alpha")];
        client.mock_response("/project/list/", 200, projects_json(&list));
        // 持久化的 id 已不在可访问列表中
        storage.put(STORAGE_KEY_LAST_PROJECT, &99_i64);

        store.fetch_projects(true).await.unwrap();

        assert_eq!(store.current_project().unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_fetch_projects_failure_returns_err_and_clears() {
        let (store, _storage, client) = store();
        client.mock_response("/project/list/", 500, json!({"error": "boom"}));

        let err = store.fetch_projects(true).await.unwrap_err();

        assert_eq!(err.http_status(), Some(500));
        assert!(!store.has_projects());
    }

    #[tokio::test]
    async fn test_fetch_sprints_without_project_is_empty() {
        let (store, _storage, client) = store();

        let list = store.fetch_sprints(true).await.unwrap();

        assert!(list.is_empty());
        // 没有选中项目时不应发出请求
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_sprints_filters_by_current_project() {
        let (store, _storage, client) = store();
        store.set_current_project(project(7, "Alpha"), false);
        client.mock_response(
            "/api/sprints/?project=7",
            200,
            serde_json::to_value([sprint(10, 7)]).unwrap(),
        );

        let list = store.fetch_sprints(false).await.unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(store.snapshot().sprints.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_sprints_failure_resets_to_empty() {
        let (store, _storage, client) = store();
        store.set_current_project(project(7, "Alpha"), false);
        store.set_current_sprint(sprint(10, 7), false);
        client.mock_network_failure("/api/sprints/?project=7");

        let err = store.fetch_sprints(false).await.unwrap_err();

        assert!(err.http_status().is_none());
        assert!(store.snapshot().sprints.is_empty());
        assert!(store.current_sprint().is_none());
    }

    #[tokio::test]
    async fn test_fetch_sprints_restores_persisted_selection() {
        let (store, storage, client) = store();
        store.set_current_project(project(7, "Alpha"), true);
        storage.put(STORAGE_KEY_LAST_SPRINT, &11_i64);
        client.mock_response(
            "/api/sprints/?project=7",
            200,
            serde_json::to_value([sprint(10, 7), sprint(11, 7)]).unwrap(),
        );

        store.fetch_sprints(true).await.unwrap();

        assert_eq!(store.current_sprint().unwrap().id, 11);
    }
}
