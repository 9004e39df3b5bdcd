//! 应用状态聚合
//!
//! 所有 store 在此构造一次（每个应用会话），通过引用显式传递给
//! 守卫与视图层，不存在环境级全局单例。对注入的存储与 HTTP
//! 适配器泛型，测试用 Mock 替换。
//!
//! 视图层经由 `AppStateHandle`（本线程 arena 里的 Copy 句柄）访问
//! 状态：闭包只捕获句柄，真正的 `Rc` 在事件回调内部取出，
//! 以满足视图闭包的 `Send` 约束。

use std::rc::Rc;

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::auth::SessionStore;
use crate::config;
use crate::error_page::ErrorGate;
use crate::projects::SelectionStore;
use crate::tasks::TaskStore;
use crate::web::http::{BrowserHttpClient, HttpClient};
use crate::web::storage::{BrowserStorage, StorageAdapter};

pub struct AppState<S, C> {
    pub api: ApiClient<C>,
    pub session: SessionStore<S, C>,
    pub selection: SelectionStore<S, C>,
    pub tasks: TaskStore<C>,
    pub gate: ErrorGate,
}

impl<S, C> AppState<S, C>
where
    S: StorageAdapter,
    C: HttpClient,
{
    pub fn new(base_url: String, storage: Rc<S>, client: Rc<C>) -> Self {
        let api = ApiClient::new(base_url, client);
        Self {
            session: SessionStore::new(Rc::clone(&storage), api.clone()),
            selection: SelectionStore::new(storage, api.clone()),
            tasks: TaskStore::new(api.clone()),
            gate: ErrorGate::new(),
            api,
        }
    }
}

// =========================================================
// 浏览器专用类型别名与构造
// =========================================================

/// 浏览器环境下的应用状态
pub type BrowserAppState = AppState<BrowserStorage, BrowserHttpClient>;

/// 视图层持有的应用状态句柄（Copy + Send，仅主线程可解引用）
pub type AppStateHandle = StoredValue<Rc<BrowserAppState>, LocalStorage>;

/// 构造浏览器应用状态：基地址来自配置（存储覆盖优先）
pub fn browser_state() -> BrowserAppState {
    let storage = Rc::new(BrowserStorage);
    let base_url = config::api_base_url(storage.as_ref());
    AppState::new(base_url, storage, Rc::new(BrowserHttpClient))
}

/// 提供应用状态到 Context，返回视图层使用的句柄
pub fn provide_app_state(state: Rc<BrowserAppState>) -> AppStateHandle {
    let handle = StoredValue::new_local(state);
    provide_context(handle);
    handle
}

/// 从 Context 获取应用状态句柄
pub fn use_app_state() -> AppStateHandle {
    expect_context::<AppStateHandle>()
}
