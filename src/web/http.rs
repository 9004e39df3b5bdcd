//! HTTP 请求封装模块
//!
//! 定义与浏览器解耦的 `HttpClient` 抽象：浏览器实现基于 `gloo-net`，
//! 单元测试使用可录制的 Mock 实现。
//! 约定：`send` 仅在网络层失败（没有任何响应）时返回 `Err`；
//! HTTP 错误状态码属于正常返回，由调用方判定。

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;

use crate::error::{ApiError, ApiResult};
use taskdeck_shared::COOKIE_CSRF;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// HTTP 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// 是否为状态变更请求（需要附带 CSRF 头）
    pub fn is_mutating(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::decode(e.to_string()))
    }
}

#[async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// CSRF cookie 解析
// =========================================================

/// 从 cookie 字符串中提取指定名称的值。简单的子串解析，不是安全边界。
pub fn cookie_value(cookie: &str, name: &str) -> Option<String> {
    cookie.split(';').map(str::trim).find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

// =========================================================
// 实现层: 浏览器客户端
// =========================================================

/// 基于 `gloo-net` 的浏览器 HTTP 客户端
///
/// 所有请求携带凭据 (cookies)；状态变更请求自动附带
/// 从 `csrftoken` cookie 提取的 CSRF 头。
#[derive(Clone)]
pub struct BrowserHttpClient;

impl BrowserHttpClient {
    fn document_cookie() -> Option<String> {
        web_sys::window()?
            .document()?
            .dyn_into::<web_sys::HtmlDocument>()
            .ok()?
            .cookie()
            .ok()
    }

    fn csrf_token() -> Option<String> {
        Self::document_cookie().and_then(|c| cookie_value(&c, COOKIE_CSRF))
    }
}

#[async_trait(?Send)]
impl HttpClient for BrowserHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = match req.method {
            HttpMethod::Get => gloo_net::http::Request::get(&req.url),
            HttpMethod::Post => gloo_net::http::Request::post(&req.url),
            HttpMethod::Delete => gloo_net::http::Request::delete(&req.url),
        }
        .credentials(web_sys::RequestCredentials::Include);

        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        // 状态变更调用需要 CSRF 头；注销在本 API 中是 GET，
        // 因此只要 cookie 存在就一律附带（后端对安全方法会忽略它）
        if let Some(token) = Self::csrf_token() {
            builder = builder.header(taskdeck_shared::HEADER_CSRF_TOKEN, &token);
        }

        let response = match req.body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(body)
                .map_err(|e| {
                    ApiError::network(e.to_string()).in_op_with("http.build", req.url.as_str())
                })?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| ApiError::network(e.to_string()).in_op_with("http.send", req.url.as_str()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::decode(e.to_string()).in_op_with("http.text", req.url.as_str()))?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;

    /// 可录制的 Mock HTTP 客户端
    ///
    /// 未注册的 URL 返回 404；注册为网络故障的 URL 返回 `Err`。
    pub struct MockHttpClient {
        // (URL, (Status, Response Body))
        responses: RefCell<HashMap<String, (u16, String)>>,
        // 模拟"完全没有响应"的 URL 集合
        network_failures: RefCell<Vec<String>>,
        // 记录发出的请求 (URL, Method, Headers, Body)
        pub requests: RefCell<Vec<(String, String, HashMap<String, String>, Option<String>)>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self {
                responses: RefCell::new(HashMap::new()),
                network_failures: RefCell::new(Vec::new()),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
            self.responses
                .borrow_mut()
                .insert(url.to_string(), (status, body.to_string()));
        }

        pub fn mock_network_failure(&self, url: &str) {
            self.network_failures.borrow_mut().push(url.to_string());
        }

        /// 已发出请求的数量（用于断言调用次数）
        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
            self.requests.borrow_mut().push((
                req.url.clone(),
                req.method.as_str().to_string(),
                req.headers.clone(),
                req.body.clone(),
            ));

            if self.network_failures.borrow().iter().any(|u| u == &req.url) {
                return Err(
                    ApiError::network("connection refused").in_op_with("http.send", req.url.as_str())
                );
            }

            let responses = self.responses.borrow();
            if let Some((status, body)) = responses.get(&req.url) {
                Ok(HttpResponse {
                    status: *status,
                    body: body.clone(),
                })
            } else {
                Ok(HttpResponse {
                    status: 404,
                    body: "Not Found".to_string(),
                })
            }
        }
    }

    // =========================================================
    // cookie 解析测试
    // =========================================================

    #[test]
    fn test_cookie_value_found() {
        let cookie = "sessionid=abc123; csrftoken=tok-42; theme=dark";
        assert_eq!(cookie_value(cookie, "csrftoken"), Some("tok-42".to_string()));
    }

    #[test]
    fn test_cookie_value_first_entry_and_missing() {
        let cookie = "csrftoken=first";
        assert_eq!(cookie_value(cookie, "csrftoken"), Some("first".to_string()));
        assert_eq!(cookie_value(cookie, "sessionid"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }

    #[test]
    fn test_cookie_value_preserves_embedded_equals() {
        // cookie 值本身可以包含 '='
        let cookie = "token=a=b=c";
        assert_eq!(cookie_value(cookie, "token"), Some("a=b=c".to_string()));
    }
}
