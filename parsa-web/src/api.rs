//! Browser `fetch` transport for the remote webhook API.
//!
//! Implements the `parsa-core` API traits; endpoint shapes and response
//! decoding live in the core crate.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use parsa_core::{
    AdminApi, ApiError, AuthToken, CatalogApi, ClubCodeRequest, ClubMember, ClubRegistration,
    ClubVerification, ConsultationRequest, Course, Endpoint, Language, LeadApi, LoginRequest,
    Method, RegisteredUser, Resource, admin_token, decode_discount, decode_login, decode_records,
    login_refusal,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::paths::api_base;
use crate::storage::BrowserStore;

/// HTTP client for the institute API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpApi {
    base: String,
    session: BrowserStore,
}

/// Status line and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Reply {
    ok: bool,
    status: u16,
    status_text: String,
    body: String,
}

impl Reply {
    fn into_result(self) -> Result<String, ApiError> {
        if self.ok {
            Ok(self.body)
        } else {
            Err(status_error(self.status, &self.status_text, &self.body))
        }
    }
}

impl Default for HttpApi {
    fn default() -> Self {
        Self::from_env()
    }
}

impl HttpApi {
    /// Client for the compile-time configured API base.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_base(api_base())
    }

    #[must_use]
    pub fn with_base(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            session: BrowserStore::session(),
        }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    fn bearer(&self, endpoint: Endpoint) -> Result<Option<String>, ApiError> {
        if !endpoint.requires_auth() {
            return Ok(None);
        }
        admin_token(&self.session)
            .map(|token| Some(bearer_header(&token)))
            .ok_or_else(|| ApiError::Rejected("admin session is not active".into()))
    }

    fn builder(&self, endpoint: Endpoint) -> Result<RequestBuilder, ApiError> {
        let url = endpoint.url(&self.base);
        log::debug!("{} {url}", endpoint.method().as_str());
        let builder = match endpoint.method() {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        };
        Ok(match self.bearer(endpoint)? {
            Some(bearer) => builder.header("Authorization", &bearer),
            None => builder,
        })
    }

    #[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
    async fn exchange(&self, endpoint: Endpoint, body: Option<String>) -> Result<Reply, ApiError> {
        let builder = self.builder(endpoint)?;
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(body),
            None => builder.build(),
        }
        .map_err(network)?;

        let response = request.send().await.map_err(network)?;
        let body = response.text().await.map_err(network)?;
        Ok(Reply {
            ok: response.ok(),
            status: response.status(),
            status_text: response.status_text(),
            body,
        })
    }

    #[allow(clippy::future_not_send)]
    async fn send(&self, endpoint: Endpoint, body: Option<String>) -> Result<String, ApiError> {
        self.exchange(endpoint, body).await?.into_result()
    }

    #[allow(clippy::future_not_send)]
    async fn send_json<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> Result<String, ApiError> {
        let json = serde_json::to_string(body)?;
        self.send(endpoint, Some(json)).await
    }

    #[allow(clippy::future_not_send)]
    async fn get_list<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<Vec<T>, ApiError> {
        let text = self.send(endpoint, None).await?;
        decode_records(&text)
    }
}

fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Prefer the response body as the message; fall back to the status text.
fn status_error(status: u16, status_text: &str, body: &str) -> ApiError {
    let body = body.trim();
    let message = if body.is_empty() { status_text } else { body };
    ApiError::Status {
        status,
        message: message.to_string(),
    }
}

/// A refused login reports the server's message instead of the raw body.
fn login_result(reply: Reply) -> Result<AuthToken, ApiError> {
    if reply.ok {
        decode_login(&reply.body)
    } else {
        Err(login_refusal(reply.status, &reply.status_text, &reply.body))
    }
}

#[async_trait(?Send)]
impl CatalogApi for HttpApi {
    async fn fetch_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.get_list(Endpoint::List(Resource::Courses)).await
    }

    async fn fetch_languages(&self) -> Result<Vec<Language>, ApiError> {
        self.get_list(Endpoint::List(Resource::Languages)).await
    }

    async fn create_course(&self, course: &Course) -> Result<(), ApiError> {
        self.send_json(Endpoint::Create(Resource::Courses), course)
            .await
            .map(drop)
    }

    async fn update_course(&self, id: u64, course: &Course) -> Result<(), ApiError> {
        self.send_json(Endpoint::Update(Resource::Courses, id), course)
            .await
            .map(drop)
    }

    async fn delete_course(&self, id: u64) -> Result<(), ApiError> {
        self.send(Endpoint::Delete(Resource::Courses, id), None)
            .await
            .map(drop)
    }

    async fn create_language(&self, language: &Language) -> Result<(), ApiError> {
        self.send_json(Endpoint::Create(Resource::Languages), language)
            .await
            .map(drop)
    }

    async fn update_language(&self, id: u64, language: &Language) -> Result<(), ApiError> {
        self.send_json(Endpoint::Update(Resource::Languages, id), language)
            .await
            .map(drop)
    }

    async fn delete_language(&self, id: u64) -> Result<(), ApiError> {
        self.send(Endpoint::Delete(Resource::Languages, id), None)
            .await
            .map(drop)
    }
}

#[async_trait(?Send)]
impl LeadApi for HttpApi {
    async fn submit_consultation(&self, request: &ConsultationRequest) -> Result<(), ApiError> {
        self.send_json(Endpoint::SubmitLead, request).await.map(drop)
    }

    async fn register_club_member(&self, registration: &ClubRegistration) -> Result<(), ApiError> {
        self.send_json(Endpoint::ClubRegister, registration)
            .await
            .map(drop)
    }

    async fn request_club_code(&self, request: &ClubCodeRequest) -> Result<(), ApiError> {
        self.send_json(Endpoint::ClubRequestCode, request)
            .await
            .map(drop)
    }

    async fn verify_club_code(&self, verification: &ClubVerification) -> Result<String, ApiError> {
        let text = self.send_json(Endpoint::ClubVerify, verification).await?;
        decode_discount(&text)
    }
}

#[async_trait(?Send)]
impl AdminApi for HttpApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthToken, ApiError> {
        let json = serde_json::to_string(request)?;
        let reply = self.exchange(Endpoint::Login, Some(json)).await?;
        login_result(reply)
    }

    async fn fetch_leads(&self) -> Result<Vec<RegisteredUser>, ApiError> {
        self.get_list(Endpoint::Leads).await
    }

    async fn fetch_club_members(&self) -> Result<Vec<ClubMember>, ApiError> {
        self.get_list(Endpoint::List(Resource::ClubMembers)).await
    }

    async fn create_club_member(&self, member: &ClubMember) -> Result<(), ApiError> {
        self.send_json(Endpoint::Create(Resource::ClubMembers), member)
            .await
            .map(drop)
    }

    async fn update_club_member(&self, id: u64, member: &ClubMember) -> Result<(), ApiError> {
        self.send_json(Endpoint::Update(Resource::ClubMembers, id), member)
            .await
            .map(drop)
    }

    async fn delete_club_member(&self, id: u64) -> Result<(), ApiError> {
        self.send(Endpoint::Delete(Resource::ClubMembers, id), None)
            .await
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_prefer_body_text() {
        let ApiError::Status { status, message } = status_error(500, "Internal Server Error", " boom ") else {
            panic!("expected status error");
        };
        assert_eq!(status, 500);
        assert_eq!(message, "boom");

        let ApiError::Status { message, .. } = status_error(404, "Not Found", "") else {
            panic!("expected status error");
        };
        assert_eq!(message, "Not Found");
    }

    fn reply(ok: bool, status: u16, status_text: &str, body: &str) -> Reply {
        Reply {
            ok,
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    #[test]
    fn refused_login_shows_server_message() {
        let err = login_result(reply(
            false,
            401,
            "Unauthorized",
            r#"{"message":"invalid credentials"}"#,
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid credentials");

        let err = login_result(reply(false, 502, "Bad Gateway", "<html></html>")).unwrap_err();
        assert_eq!(err.to_string(), "API error 502: Bad Gateway");

        let token = login_result(reply(true, 200, "OK", r#"[{"token":"t-1"}]"#)).unwrap();
        assert_eq!(token.as_str(), "t-1");
    }

    #[test]
    fn other_refusals_keep_the_body() {
        let err = reply(false, 500, "Internal Server Error", r#"{"message":"x"}"#)
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), r#"API error 500: {"message":"x"}"#);
        assert_eq!(reply(true, 200, "OK", "[]").into_result().unwrap(), "[]");
    }

    #[test]
    fn public_endpoints_need_no_token() {
        let api = HttpApi::with_base("http://localhost:5678");
        assert_eq!(api.bearer(Endpoint::List(Resource::Courses)).unwrap(), None);
        assert_eq!(api.bearer(Endpoint::SubmitLead).unwrap(), None);
        assert_eq!(bearer_header("abc"), "Bearer abc");
        assert_eq!(api.base(), "http://localhost:5678");
    }
}
