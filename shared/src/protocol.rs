use crate::{Priority, Project, Sprint, User};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize + DeserializeOwned {
    /// The response type returned by this request.
    type Response: Serialize + DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Request Definitions
// =========================================================

/// Who-am-I lookup for the current session.
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Response = User;
    const PATH: &'static str = "/account/user/";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Server-side logout notification. The session cookie is invalidated;
/// the body is irrelevant, success is the status code.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Response = ();
    const PATH: &'static str = "/account/logout";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Credential login; the backend sets the session cookie and returns the user.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = User;
    const PATH: &'static str = "/account/login/";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Account registration. Logs the new user in on success.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = User;
    const PATH: &'static str = "/account/register/";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// List the projects the current user can access.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListProjectsRequest;

impl ApiRequest for ListProjectsRequest {
    type Response = Vec<Project>;
    const PATH: &'static str = "/project/list/";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// List the sprints of one project (`?project=<id>` query).
#[derive(Debug, Serialize, Deserialize)]
pub struct ListSprintsRequest {
    pub project: i64,
}

impl ApiRequest for ListSprintsRequest {
    type Response = Vec<Sprint>;
    const PATH: &'static str = "/api/sprints/";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// The task priority catalogue.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListPrioritiesRequest;

impl ApiRequest for ListPrioritiesRequest {
    type Response = Vec<Priority>;
    const PATH: &'static str = "/task/priorities";
    const METHOD: HttpMethod = HttpMethod::Get;
}
