//! 任务辅助数据状态
//!
//! 目前只承载任务优先级目录：看板展示任务时需要把优先级 id
//! 映射为类型与权重。

use std::cell::RefCell;

use taskdeck_shared::Priority;

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::web::http::HttpClient;

pub struct TaskStore<C> {
    priorities: RefCell<Vec<Priority>>,
    api: ApiClient<C>,
}

impl<C: HttpClient> TaskStore<C> {
    pub fn new(api: ApiClient<C>) -> Self {
        Self {
            priorities: RefCell::new(Vec::new()),
            api,
        }
    }

    pub fn priorities(&self) -> Vec<Priority> {
        self.priorities.borrow().clone()
    }

    /// 拉取优先级目录；失败时目录重置为空并返回错误
    pub async fn fetch_priorities(&self) -> ApiResult<Vec<Priority>> {
        match self.api.list_priorities().await {
            Ok(list) => {
                *self.priorities.borrow_mut() = list.clone();
                Ok(list)
            }
            Err(e) => {
                self.priorities.borrow_mut().clear();
                Err(e.in_op("priorities.fetch"))
            }
        }
    }
}
