//! Contract with the remote webhook API.
//!
//! The transport lives in the platform crate; this module owns endpoint
//! shapes, request payloads and defensive decoding of the loosely-typed
//! responses so that nothing ambiguous leaks past the boundary.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{ClubMember, Course, Language, RegisteredUser, UserInfo};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Login response did not include a token")]
    MissingToken,
    /// The server refused the login and said why.
    #[error("{0}")]
    LoginRefused(String),
    #[error("Request rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Collections exposed by the API for CRUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Courses,
    Languages,
    ClubMembers,
}

impl Resource {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Courses => "/courses",
            Self::Languages => "/languages",
            Self::ClubMembers => "/club-members",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    List(Resource),
    Create(Resource),
    Update(Resource, u64),
    Delete(Resource, u64),
    SubmitLead,
    Leads,
    ClubRegister,
    ClubRequestCode,
    ClubVerify,
}

impl Endpoint {
    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::List(_) | Self::Leads => Method::Get,
            Self::Update(..) => Method::Put,
            Self::Delete(..) => Method::Delete,
            Self::Login
            | Self::Create(_)
            | Self::SubmitLead
            | Self::ClubRegister
            | Self::ClubRequestCode
            | Self::ClubVerify => Method::Post,
        }
    }

    /// Path and query relative to the API base.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::List(resource) | Self::Create(resource) => resource.path().to_string(),
            Self::Update(resource, id) | Self::Delete(resource, id) => {
                format!("{}?id={id}", resource.path())
            }
            Self::SubmitLead => "/register".to_string(),
            Self::Leads => "/users".to_string(),
            Self::ClubRegister => "/club/register".to_string(),
            Self::ClubRequestCode => "/club/request-code".to_string(),
            Self::ClubVerify => "/club/verify".to_string(),
        }
    }

    /// Whether the admin bearer token must accompany the request.
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        match self {
            Self::Create(_) | Self::Update(..) | Self::Delete(..) | Self::Leads => true,
            Self::List(resource) => matches!(resource, Resource::ClubMembers),
            Self::Login
            | Self::SubmitLead
            | Self::ClubRegister
            | Self::ClubRequestCode
            | Self::ClubVerify => false,
        }
    }

    #[must_use]
    pub fn url(self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

/// Opaque bearer token returned by a successful admin login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    /// Hex-encoded SHA-256 of the password; the clear text never leaves the browser.
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// The login webhook answers with either an object or a one-element array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LoginResponse {
    Object(LoginBody),
    List(Vec<LoginBody>),
}

impl LoginResponse {
    fn bodies(&self) -> &[LoginBody] {
        match self {
            Self::Object(body) => std::slice::from_ref(body),
            Self::List(bodies) => bodies,
        }
    }

    /// First server-provided message, used when the login is refused.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.bodies().iter().find_map(|body| body.message.as_deref())
    }

    /// Normalize to a token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingToken`] when no non-empty token is present.
    pub fn into_token(self) -> Result<AuthToken, ApiError> {
        self.bodies()
            .iter()
            .filter_map(|body| body.token.clone())
            .find_map(AuthToken::new)
            .ok_or(ApiError::MissingToken)
    }
}

/// Decode a raw login response body.
///
/// # Errors
///
/// Returns an error when the body is not JSON of a known shape or carries no token.
pub fn decode_login(body: &str) -> Result<AuthToken, ApiError> {
    let response = serde_json::from_str::<LoginResponse>(body)?;
    let refusal = response.message().map(str::to_string);
    response.into_token().map_err(|err| match refusal {
        Some(message) => ApiError::LoginRefused(message),
        None => err,
    })
}

/// Map a non-success login answer to the server's own message.
///
/// Falls back to a plain status error carrying `status_text` when the body
/// holds no message.
#[must_use]
pub fn login_refusal(status: u16, status_text: &str, body: &str) -> ApiError {
    serde_json::from_str::<LoginResponse>(body)
        .ok()
        .and_then(|response| response.message().map(str::to_string))
        .filter(|message| !message.trim().is_empty())
        .map_or_else(
            || ApiError::Status {
                status,
                message: status_text.to_string(),
            },
            ApiError::LoginRefused,
        )
}

/// Decode a collection record by record.
///
/// An empty body is an empty collection. Records that do not decode are
/// logged and skipped so one bad row cannot take the whole list down.
///
/// # Errors
///
/// Returns an error when the body is not a JSON array.
pub fn decode_records<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ApiError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let raw: Vec<Value> = serde_json::from_str(body)?;
    let total = raw.len();
    let records: Vec<T> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("skipping undecodable record {index}: {err}");
                None
            }
        })
        .collect();
    if records.len() < total {
        log::warn!("decoded {} of {total} records", records.len());
    }
    Ok(records)
}

/// Lead record posted when a visitor asks for a consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRequest {
    pub name: String,
    pub phone: String,
    pub city: String,
    pub course_of_interest: String,
    pub level: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub format: String,
    pub schedule: String,
    pub price: u64,
    pub description: String,
}

impl ConsultationRequest {
    #[must_use]
    pub fn new(user: &UserInfo, course: &Course) -> Self {
        Self {
            name: user.name.clone(),
            phone: user.phone.clone(),
            city: user.city.clone(),
            course_of_interest: course.language.clone(),
            level: course.level.clone(),
            kind: course.kind.label().to_string(),
            format: course.format.label().to_string(),
            schedule: course.schedule.clone(),
            price: course.price,
            description: format!(
                "درخواست مشاوره برای دوره: {} - {}",
                course.language, course.level
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClubRegistration {
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClubCodeRequest {
    pub mobile: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClubVerification {
    pub mobile: String,
    pub code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscountBody {
    #[serde(default)]
    pub discount_code: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// Verification answers come back as an object, an array of objects or a bare string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DiscountResponse {
    Text(String),
    Object(DiscountBody),
    List(Vec<DiscountBody>),
}

impl DiscountResponse {
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when no code can be found in the response.
    pub fn into_code(self) -> Result<String, ApiError> {
        let found = match self {
            Self::Text(text) => Some(text),
            Self::Object(body) => body.discount_code.or(body.code),
            Self::List(bodies) => bodies
                .into_iter()
                .find_map(|body| body.discount_code.or(body.code)),
        };
        found
            .filter(|code| !code.trim().is_empty())
            .ok_or_else(|| ApiError::Rejected("verification returned no discount code".into()))
    }
}

/// Decode a raw club verification response body.
///
/// # Errors
///
/// Returns an error when the body is not a known shape or holds no code.
pub fn decode_discount(body: &str) -> Result<String, ApiError> {
    // Some deployments answer with plain text rather than a JSON string.
    match serde_json::from_str::<DiscountResponse>(body) {
        Ok(response) => response.into_code(),
        Err(_) if !body.trim().is_empty() && !body.trim_start().starts_with(['{', '[']) => {
            Ok(body.trim().to_string())
        }
        Err(err) => Err(ApiError::Json(err)),
    }
}

/// Public catalog plus the admin mutations that change it.
#[async_trait(?Send)]
pub trait CatalogApi {
    async fn fetch_courses(&self) -> Result<Vec<Course>, ApiError>;
    async fn fetch_languages(&self) -> Result<Vec<Language>, ApiError>;
    async fn create_course(&self, course: &Course) -> Result<(), ApiError>;
    async fn update_course(&self, id: u64, course: &Course) -> Result<(), ApiError>;
    async fn delete_course(&self, id: u64) -> Result<(), ApiError>;
    async fn create_language(&self, language: &Language) -> Result<(), ApiError>;
    async fn update_language(&self, id: u64, language: &Language) -> Result<(), ApiError>;
    async fn delete_language(&self, id: u64) -> Result<(), ApiError>;
}

/// Visitor-facing submissions: consultation leads and the discount club.
#[async_trait(?Send)]
pub trait LeadApi {
    async fn submit_consultation(&self, request: &ConsultationRequest) -> Result<(), ApiError>;
    async fn register_club_member(&self, registration: &ClubRegistration) -> Result<(), ApiError>;
    async fn request_club_code(&self, request: &ClubCodeRequest) -> Result<(), ApiError>;
    async fn verify_club_code(&self, verification: &ClubVerification) -> Result<String, ApiError>;
}

/// Admin-only operations beyond the catalog.
#[async_trait(?Send)]
pub trait AdminApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthToken, ApiError>;
    async fn fetch_leads(&self) -> Result<Vec<RegisteredUser>, ApiError>;
    async fn fetch_club_members(&self) -> Result<Vec<ClubMember>, ApiError>;
    async fn create_club_member(&self, member: &ClubMember) -> Result<(), ApiError>;
    async fn update_club_member(&self, id: u64, member: &ClubMember) -> Result<(), ApiError>;
    async fn delete_club_member(&self, id: u64) -> Result<(), ApiError>;
}
