//! Club discount-code flow: register, request an SMS code, verify it.

use crate::api::{ClubCodeRequest, ClubRegistration, ClubVerification, LeadApi};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClubMode {
    Register,
    #[default]
    Login,
    Verify,
    /// Verification succeeded and the server handed out this code.
    Discount(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Banner shown above the club form. `key` is a translation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClubMessage {
    pub kind: MessageKind,
    pub key: &'static str,
}

impl ClubMessage {
    const fn success(key: &'static str) -> Self {
        Self {
            kind: MessageKind::Success,
            key,
        }
    }

    const fn error(key: &'static str) -> Self {
        Self {
            kind: MessageKind::Error,
            key,
        }
    }
}

/// One submission from the club form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClubRequest {
    Register(ClubRegistration),
    RequestCode(ClubCodeRequest),
    Verify(ClubVerification),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClubFlow {
    pub mode: ClubMode,
    /// Mobile number the verification code was sent to.
    pub mobile: String,
    pub message: Option<ClubMessage>,
}

impl ClubFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch form without submitting anything; clears the banner.
    #[must_use]
    pub fn switch_to(self, mode: ClubMode) -> Self {
        Self {
            mode,
            message: None,
            ..self
        }
    }

    /// Back to the login form, forgetting any shown code.
    #[must_use]
    pub fn reset(self) -> Self {
        self.switch_to(ClubMode::Login)
    }

    #[must_use]
    pub fn registered(self) -> Self {
        Self {
            mode: ClubMode::Login,
            message: Some(ClubMessage::success("club.registered")),
            ..self
        }
    }

    #[must_use]
    pub fn code_sent(self, mobile: &str) -> Self {
        Self {
            mode: ClubMode::Verify,
            mobile: mobile.to_string(),
            message: Some(ClubMessage::success("club.code_sent")),
        }
    }

    #[must_use]
    pub fn verified(self, code: String) -> Self {
        Self {
            mode: ClubMode::Discount(code),
            message: None,
            ..self
        }
    }

    /// A failed submission keeps the current form and shows an error.
    #[must_use]
    pub fn failed(self, key: &'static str) -> Self {
        Self {
            message: Some(ClubMessage::error(key)),
            ..self
        }
    }

    #[must_use]
    pub fn discount_code(&self) -> Option<&str> {
        match &self.mode {
            ClubMode::Discount(code) => Some(code),
            _ => None,
        }
    }
}

/// Send `request` and return the flow's next state.
pub async fn submit_club_request<A>(api: &A, flow: ClubFlow, request: &ClubRequest) -> ClubFlow
where
    A: LeadApi + ?Sized,
{
    match request {
        ClubRequest::Register(registration) => {
            match api.register_club_member(registration).await {
                Ok(()) => flow.registered(),
                Err(err) => {
                    log::warn!("club registration failed: {err}");
                    flow.failed("club.register_failed")
                }
            }
        }
        ClubRequest::RequestCode(code_request) => {
            match api.request_club_code(code_request).await {
                Ok(()) => flow.code_sent(&code_request.mobile),
                Err(err) => {
                    log::warn!("club code request failed: {err}");
                    flow.failed("club.code_failed")
                }
            }
        }
        ClubRequest::Verify(verification) => match api.verify_club_code(verification).await {
            Ok(code) => flow.verified(code),
            Err(err) => {
                log::warn!("club verification failed: {err}");
                flow.failed("club.verify_failed")
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use async_trait::async_trait;
    use futures::executor::block_on;

    use crate::api::ConsultationRequest;

    struct ClubStub {
        accept: bool,
    }

    #[async_trait(?Send)]
    impl LeadApi for ClubStub {
        async fn submit_consultation(&self, _: &ConsultationRequest) -> Result<(), ApiError> {
            Ok(())
        }
        async fn register_club_member(&self, _: &ClubRegistration) -> Result<(), ApiError> {
            if self.accept {
                Ok(())
            } else {
                Err(ApiError::Status {
                    status: 409,
                    message: "exists".into(),
                })
            }
        }
        async fn request_club_code(&self, _: &ClubCodeRequest) -> Result<(), ApiError> {
            if self.accept {
                Ok(())
            } else {
                Err(ApiError::Network("offline".into()))
            }
        }
        async fn verify_club_code(&self, v: &ClubVerification) -> Result<String, ApiError> {
            if self.accept {
                Ok(format!("PARSA-{}", v.code))
            } else {
                Err(ApiError::Rejected("bad code".into()))
            }
        }
    }

    fn code_request() -> ClubRequest {
        ClubRequest::RequestCode(ClubCodeRequest {
            mobile: "09121234567".into(),
        })
    }

    #[test]
    fn happy_path_reaches_discount() {
        let api = ClubStub { accept: true };
        let flow = ClubFlow::new().switch_to(ClubMode::Register);
        let flow = block_on(submit_club_request(
            &api,
            flow,
            &ClubRequest::Register(ClubRegistration {
                first_name: "Sara".into(),
                last_name: "Ahmadi".into(),
                mobile: "09121234567".into(),
            }),
        ));
        assert_eq!(flow.mode, ClubMode::Login);
        assert_eq!(flow.message.map(|m| m.kind), Some(MessageKind::Success));

        let flow = block_on(submit_club_request(&api, flow, &code_request()));
        assert_eq!(flow.mode, ClubMode::Verify);
        assert_eq!(flow.mobile, "09121234567");

        let flow = block_on(submit_club_request(
            &api,
            flow,
            &ClubRequest::Verify(ClubVerification {
                mobile: "09121234567".into(),
                code: "1234".into(),
            }),
        ));
        assert_eq!(flow.discount_code(), Some("PARSA-1234"));
        assert!(flow.message.is_none());

        let flow = flow.reset();
        assert_eq!(flow.mode, ClubMode::Login);
        assert!(flow.discount_code().is_none());
    }

    #[test]
    fn failures_keep_mode_and_show_error() {
        let api = ClubStub { accept: false };
        let flow = block_on(submit_club_request(&api, ClubFlow::new(), &code_request()));
        assert_eq!(flow.mode, ClubMode::Login);
        assert_eq!(
            flow.message,
            Some(ClubMessage {
                kind: MessageKind::Error,
                key: "club.code_failed"
            })
        );

        let verify = ClubFlow::new().switch_to(ClubMode::Verify);
        let verify = block_on(submit_club_request(
            &api,
            verify,
            &ClubRequest::Verify(ClubVerification {
                mobile: "09121234567".into(),
                code: "0000".into(),
            }),
        ));
        assert_eq!(verify.mode, ClubMode::Verify);
        assert_eq!(verify.message.map(|m| m.key), Some("club.verify_failed"));
    }

    #[test]
    fn switching_mode_clears_banner() {
        let flow = ClubFlow::new().failed("club.code_failed");
        assert!(flow.message.is_some());
        assert!(flow.switch_to(ClubMode::Register).message.is_none());
    }
}
