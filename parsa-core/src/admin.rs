//! Admin area: tab selection from the route, session login/logout, editor
//! drafts for the CRUD forms and club-member mutations.

use std::fmt::Write as _;

use sha2::{Digest, Sha256};

use crate::api::{AdminApi, ApiError, LoginRequest};
use crate::catalog::{MutationOutcome, mutate_then_reload};
use crate::model::{ClubMember, ClubStatus, Course, CourseFormat, CourseStatus, CourseType, Language};
use crate::profile::{KeyValueStore, clear_admin_token, store_admin_token, to_ascii_digit};

/// Panel tab, selected by the first segment of the admin sub-path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AdminTab {
    #[default]
    Courses,
    Languages,
    Leads,
    Club,
}

impl AdminTab {
    pub const ALL: [Self; 4] = [Self::Courses, Self::Languages, Self::Leads, Self::Club];

    /// Unknown or empty sub-paths select the courses tab.
    #[must_use]
    pub fn from_sub(sub: &str) -> Self {
        let segment = sub
            .trim_start_matches('/')
            .split(['/', '?'])
            .next()
            .unwrap_or_default();
        match segment {
            "languages" => Self::Languages,
            "leads" => Self::Leads,
            "club" => Self::Club,
            _ => Self::Courses,
        }
    }

    #[must_use]
    pub const fn sub_path(self) -> &'static str {
        match self {
            Self::Courses => "/courses",
            Self::Languages => "/languages",
            Self::Leads => "/leads",
            Self::Club => "/club",
        }
    }

    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Courses => "admin.tab.courses",
            Self::Languages => "admin.tab.languages",
            Self::Leads => "admin.tab.leads",
            Self::Club => "admin.tab.club",
        }
    }
}

/// Lowercase hex SHA-256 digest of `password`.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();
    digest.iter().fold(String::with_capacity(64), |mut hex, byte| {
        let _ = write!(hex, "{byte:02x}");
        hex
    })
}

impl LoginRequest {
    #[must_use]
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            password: hash_password(password),
        }
    }
}

/// Log in and keep the token in the session store.
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] for blank credentials, or whatever the API reports.
pub async fn login<A, S>(api: &A, session: &S, username: &str, password: &str) -> Result<(), ApiError>
where
    A: AdminApi + ?Sized,
    S: KeyValueStore + ?Sized,
{
    if username.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Rejected("username and password are required".into()));
    }
    let token = api.login(&LoginRequest::new(username, password)).await?;
    store_admin_token(session, token.as_str())
        .map_err(|err| ApiError::Rejected(err.to_string()))?;
    log::info!("admin session started");
    Ok(())
}

pub fn logout<S: KeyValueStore + ?Sized>(session: &S) {
    if let Err(err) = clear_admin_token(session) {
        log::warn!("failed to clear admin session: {err}");
    }
}

/// Form overlay open inside the admin panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminEditor {
    Course(CourseDraft),
    Language(Language),
    ClubMember(ClubMember),
}

impl AdminEditor {
    #[must_use]
    pub fn new_course() -> Self {
        Self::Course(CourseDraft::default())
    }

    #[must_use]
    pub fn edit_course(course: &Course) -> Self {
        Self::Course(CourseDraft::from(course))
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        match self {
            Self::Course(draft) => draft.id.is_none(),
            Self::Language(language) => language.id.is_none(),
            Self::ClubMember(member) => member.id.is_none(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("language is required")]
    MissingLanguage,
    #[error("level is required")]
    MissingLevel,
    #[error("price must be a whole number")]
    InvalidPrice,
}

/// Course form contents; price and tags stay as typed until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub id: Option<u64>,
    pub language: String,
    pub level: String,
    pub kind: CourseType,
    pub format: CourseFormat,
    pub schedule: String,
    pub price: String,
    pub status: CourseStatus,
    pub description: String,
    pub tags: String,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            id: None,
            language: String::new(),
            level: String::new(),
            kind: CourseType::Group,
            format: CourseFormat::InPerson,
            schedule: String::new(),
            price: "0".into(),
            status: CourseStatus::Enrolling,
            description: String::new(),
            tags: String::new(),
        }
    }
}

impl From<&Course> for CourseDraft {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            language: course.language.clone(),
            level: course.level.clone(),
            kind: course.kind,
            format: course.format,
            schedule: course.schedule.clone(),
            price: course.price.to_string(),
            status: course.status,
            description: course.description.clone(),
            tags: course.tags.join(", "),
        }
    }
}

impl CourseDraft {
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn to_course(&self) -> Result<Course, DraftError> {
        let language = self.language.trim();
        let level = self.level.trim();
        if language.is_empty() {
            return Err(DraftError::MissingLanguage);
        }
        if level.is_empty() {
            return Err(DraftError::MissingLevel);
        }
        let digits: String = self
            .price
            .chars()
            .map(to_ascii_digit)
            .filter(|c| !matches!(c, ',' | '٬' | ' '))
            .collect();
        let price = if digits.is_empty() {
            0
        } else {
            digits.parse().map_err(|_| DraftError::InvalidPrice)?
        };
        Ok(Course {
            id: self.id,
            language: language.to_string(),
            level: level.to_string(),
            kind: self.kind,
            format: self.format,
            schedule: self.schedule.trim().to_string(),
            price,
            status: self.status,
            description: self.description.trim().to_string(),
            tags: split_tags(&self.tags),
            slug: String::new(),
        })
    }
}

/// Comma-separated tags; Persian commas count too.
#[must_use]
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split([',', '،'])
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[must_use]
pub fn new_club_member() -> ClubMember {
    ClubMember {
        status: ClubStatus::Active,
        ..ClubMember::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberMutation {
    Save(ClubMember),
    Delete(u64),
}

/// Apply a club-member edit and reload the member list on success.
pub async fn apply_member_mutation<A>(
    api: &A,
    mutation: &MemberMutation,
) -> MutationOutcome<Vec<ClubMember>>
where
    A: AdminApi + ?Sized,
{
    let send = async {
        match mutation {
            MemberMutation::Save(member) => match member.id {
                Some(id) => api.update_club_member(id, member).await,
                None => api.create_club_member(member).await,
            },
            MemberMutation::Delete(id) => api.delete_club_member(*id).await,
        }
    };
    mutate_then_reload(send, api.fetch_club_members()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AuthToken;
    use crate::model::RegisteredUser;
    use crate::profile::{MemoryStore, admin_token};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct AdminStub {
        members: RefCell<Vec<ClubMember>>,
        refuse: bool,
        last_login: RefCell<Option<LoginRequest>>,
        fetches: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl AdminApi for AdminStub {
        async fn login(&self, request: &LoginRequest) -> Result<AuthToken, ApiError> {
            *self.last_login.borrow_mut() = Some(request.clone());
            if self.refuse {
                return Err(ApiError::MissingToken);
            }
            AuthToken::new("session-1").ok_or(ApiError::MissingToken)
        }
        async fn fetch_leads(&self) -> Result<Vec<RegisteredUser>, ApiError> {
            Ok(Vec::new())
        }
        async fn fetch_club_members(&self) -> Result<Vec<ClubMember>, ApiError> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(self.members.borrow().clone())
        }
        async fn create_club_member(&self, member: &ClubMember) -> Result<(), ApiError> {
            if self.refuse {
                return Err(ApiError::Network("offline".into()));
            }
            self.members.borrow_mut().push(ClubMember {
                id: Some(1),
                ..member.clone()
            });
            Ok(())
        }
        async fn update_club_member(&self, _: u64, _: &ClubMember) -> Result<(), ApiError> {
            Ok(())
        }
        async fn delete_club_member(&self, id: u64) -> Result<(), ApiError> {
            self.members.borrow_mut().retain(|m| m.id != Some(id));
            Ok(())
        }
    }

    #[test]
    fn tab_follows_first_segment() {
        assert_eq!(AdminTab::from_sub(""), AdminTab::Courses);
        assert_eq!(AdminTab::from_sub("/"), AdminTab::Courses);
        assert_eq!(AdminTab::from_sub("/languages"), AdminTab::Languages);
        assert_eq!(AdminTab::from_sub("/leads/42"), AdminTab::Leads);
        assert_eq!(AdminTab::from_sub("/club?page=2"), AdminTab::Club);
        assert_eq!(AdminTab::from_sub("/whatever"), AdminTab::Courses);
        for tab in AdminTab::ALL {
            assert_eq!(AdminTab::from_sub(tab.sub_path()), tab);
        }
    }

    #[test]
    fn password_is_sha256_hex() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        let request = LoginRequest::new(" admin ", "abc");
        assert_eq!(request.username, "admin");
        assert_eq!(request.password.len(), 64);
    }

    #[test]
    fn login_stores_token_and_logout_clears_it() {
        let api = AdminStub::default();
        let session = MemoryStore::default();
        block_on(login(&api, &session, "admin", "secret")).unwrap();
        assert_eq!(admin_token(&session).as_deref(), Some("session-1"));
        let sent = api.last_login.borrow().clone().unwrap();
        assert_eq!(sent.password, hash_password("secret"));

        logout(&session);
        assert!(admin_token(&session).is_none());
    }

    #[test]
    fn refused_login_stores_nothing() {
        let api = AdminStub {
            refuse: true,
            ..AdminStub::default()
        };
        let session = MemoryStore::default();
        assert!(block_on(login(&api, &session, "admin", "bad")).is_err());
        assert!(admin_token(&session).is_none());
        assert!(matches!(
            block_on(login(&api, &session, " ", "x")),
            Err(ApiError::Rejected(_))
        ));
    }

    #[test]
    fn course_draft_parses_price_and_tags() {
        let draft = CourseDraft {
            language: "English".into(),
            level: "B1".into(),
            price: "۴,۵۰۰,۰۰۰".into(),
            tags: "IELTS، speaking , ,grammar".into(),
            ..CourseDraft::default()
        };
        let course = draft.to_course().unwrap();
        assert_eq!(course.price, 4_500_000);
        assert_eq!(course.tags, vec!["IELTS", "speaking", "grammar"]);

        let bad = CourseDraft {
            price: "12a".into(),
            ..draft.clone()
        };
        assert_eq!(bad.to_course(), Err(DraftError::InvalidPrice));
        let missing = CourseDraft {
            level: " ".into(),
            ..draft
        };
        assert_eq!(missing.to_course(), Err(DraftError::MissingLevel));
    }

    #[test]
    fn draft_round_trips_existing_course() {
        let course = Course {
            id: Some(3),
            language: "German".into(),
            level: "A2".into(),
            price: 1200,
            tags: vec!["kids".into()],
            ..Course::default()
        };
        let editor = AdminEditor::edit_course(&course);
        assert!(!editor.is_new());
        let AdminEditor::Course(draft) = editor else {
            panic!("expected course editor");
        };
        assert_eq!(draft.to_course().unwrap(), course);
        assert!(AdminEditor::new_course().is_new());
    }

    #[test]
    fn member_mutations_reload_only_on_success() {
        let api = AdminStub::default();
        let outcome = block_on(apply_member_mutation(
            &api,
            &MemberMutation::Save(new_club_member()),
        ));
        let MutationOutcome::Applied(members) = outcome else {
            panic!("expected reload");
        };
        assert_eq!(members.len(), 1);

        let refusing = AdminStub {
            refuse: true,
            ..AdminStub::default()
        };
        let outcome = block_on(apply_member_mutation(
            &refusing,
            &MemberMutation::Save(new_club_member()),
        ));
        assert!(matches!(outcome, MutationOutcome::Rejected(_)));
        assert_eq!(refusing.fetches.get(), 0);
    }
}
