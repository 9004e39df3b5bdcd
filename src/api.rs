//! API 客户端
//!
//! 按 `taskdeck_shared::protocol` 中的类型化端点定义执行请求。
//! 客户端对注入的 `HttpClient` 泛型，便于在测试中替换为 Mock。

use std::rc::Rc;

use taskdeck_shared::protocol::{
    ApiRequest, CurrentUserRequest, HttpMethod as ProtocolMethod, ListPrioritiesRequest,
    ListProjectsRequest, ListSprintsRequest, LoginRequest, LogoutRequest, RegisterRequest,
};
use taskdeck_shared::{Priority, Project, Sprint, User};

use crate::error::{ApiError, ApiResult};
use crate::web::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};

pub struct ApiClient<C> {
    base_url: String,
    client: Rc<C>,
}

impl<C> Clone for ApiClient<C> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: Rc::clone(&self.client),
        }
    }
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(base_url: String, client: Rc<C>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn method(method: ProtocolMethod) -> HttpMethod {
        match method {
            ProtocolMethod::Get => HttpMethod::Get,
            ProtocolMethod::Post => HttpMethod::Post,
            ProtocolMethod::Delete => HttpMethod::Delete,
        }
    }

    /// 执行一个协议请求并做状态码检查；响应体留给调用方处理
    async fn send<R: ApiRequest>(
        &self,
        request: &R,
        query: Option<(&str, String)>,
    ) -> ApiResult<HttpResponse> {
        let mut url = self.url(R::PATH);
        if let Some((key, value)) = query {
            url = format!("{url}?{key}={value}");
        }

        let mut http = HttpRequest::new(&url, Self::method(R::METHOD));
        if http.method.is_mutating() {
            let body =
                serde_json::to_string(request).map_err(|e| ApiError::decode(e.to_string()))?;
            http = http.with_body(body);
        }

        let response = self
            .client
            .send(http)
            .await
            .map_err(|e| e.in_op_with("api.send", R::PATH))?;

        if !response.ok() {
            return Err(ApiError::status(
                response.status,
                format!("请求失败: {}", R::PATH),
            ));
        }
        Ok(response)
    }

    /// 执行请求并反序列化响应体
    async fn fetch<R: ApiRequest>(
        &self,
        request: &R,
        query: Option<(&str, String)>,
    ) -> ApiResult<R::Response> {
        self.send(request, query).await?.json()
    }

    // =========================================================
    // 类型化端点
    // =========================================================

    /// 查询当前会话的用户
    pub async fn current_user(&self) -> ApiResult<User> {
        self.fetch(&CurrentUserRequest, None).await
    }

    /// 通知后端注销当前会话
    pub async fn logout(&self) -> ApiResult<()> {
        self.send(&LogoutRequest, None).await.map(|_| ())
    }

    /// 凭据登录
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<User> {
        self.fetch(request, None).await
    }

    /// 注册新账号
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        self.fetch(request, None).await
    }

    /// 获取可访问的项目列表
    pub async fn list_projects(&self) -> ApiResult<Vec<Project>> {
        self.fetch(&ListProjectsRequest, None).await
    }

    /// 获取指定项目的冲刺列表
    pub async fn list_sprints(&self, project: i64) -> ApiResult<Vec<Sprint>> {
        self.fetch(
            &ListSprintsRequest { project },
            Some(("project", project.to_string())),
        )
        .await
    }

    /// 获取任务优先级目录
    pub async fn list_priorities(&self) -> ApiResult<Vec<Priority>> {
        self.fetch(&ListPrioritiesRequest, None).await
    }
}
