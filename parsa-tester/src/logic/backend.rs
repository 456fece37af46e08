//! In-memory stand-in for the webhook backend.
//!
//! Implements every `parsa-core` API trait over a [`Fixture`], with switches
//! that make reads or writes fail so the error paths can be driven on purpose.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use chrono::Utc;
use parsa_core::{
    AdminApi, ApiError, AuthToken, CatalogApi, ClubCodeRequest, ClubMember, ClubRegistration,
    ClubStatus, ClubVerification, ConsultationRequest, Course, Language, LeadApi, LoginRequest,
    RegisteredUser, hash_password, login_refusal,
};

use crate::common::{AdminCredentials, Fixture, report_timestamp};

/// Verification code the fake SMS gateway always "sends".
pub const FIXTURE_OTP: &str = "1234";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Faults {
    /// Every list request fails with a network error.
    pub fail_reads: bool,
    /// Every create, update and delete is refused by the server.
    pub refuse_writes: bool,
}

impl Faults {
    pub const NONE: Self = Self {
        fail_reads: false,
        refuse_writes: false,
    };
}

#[derive(Debug)]
pub struct FixtureBackend {
    courses: RefCell<Vec<Course>>,
    languages: RefCell<Vec<Language>>,
    members: RefCell<Vec<ClubMember>>,
    leads: RefCell<Vec<RegisteredUser>>,
    credentials: AdminCredentials,
    /// Mobile numbers a code has been requested for.
    pending_codes: RefCell<Vec<String>>,
    faults: Cell<Faults>,
    course_fetches: Cell<usize>,
    next_id: Cell<u64>,
}

impl FixtureBackend {
    #[must_use]
    pub fn new(fixture: &Fixture) -> Self {
        Self {
            courses: RefCell::new(fixture.courses.clone()),
            languages: RefCell::new(fixture.languages.clone()),
            members: RefCell::new(fixture.members.clone()),
            leads: RefCell::new(fixture.leads.clone()),
            credentials: fixture.admin.clone(),
            pending_codes: RefCell::new(Vec::new()),
            faults: Cell::new(Faults::NONE),
            course_fetches: Cell::new(0),
            next_id: Cell::new(fixture.max_id() + 1),
        }
    }

    pub fn set_faults(&self, faults: Faults) {
        self.faults.set(faults);
    }

    /// How many times the course collection was requested; one per catalog load.
    #[must_use]
    pub fn course_fetches(&self) -> usize {
        self.course_fetches.get()
    }

    #[must_use]
    pub fn leads(&self) -> Vec<RegisteredUser> {
        self.leads.borrow().clone()
    }

    #[must_use]
    pub fn members(&self) -> Vec<ClubMember> {
        self.members.borrow().clone()
    }

    fn read<T: Clone>(&self, rows: &RefCell<Vec<T>>) -> Result<Vec<T>, ApiError> {
        if self.faults.get().fail_reads {
            return Err(ApiError::Network("fixture backend is unreachable".into()));
        }
        Ok(rows.borrow().clone())
    }

    fn check_write(&self) -> Result<(), ApiError> {
        if self.faults.get().refuse_writes {
            return Err(ApiError::Status {
                status: 500,
                message: "fixture backend refused the write".into(),
            });
        }
        Ok(())
    }

    fn fresh_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

fn not_found(what: &str, id: u64) -> ApiError {
    ApiError::Status {
        status: 404,
        message: format!("{what} {id} not found"),
    }
}

/// Write-side operations shared by every collection the backend keeps.
trait Record: Clone {
    const KIND: &'static str;
    fn id(&self) -> Option<u64>;
    fn set_id(&mut self, id: u64);
}

impl Record for Course {
    const KIND: &'static str = "course";
    fn id(&self) -> Option<u64> {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

impl Record for Language {
    const KIND: &'static str = "language";
    fn id(&self) -> Option<u64> {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

impl Record for ClubMember {
    const KIND: &'static str = "club member";
    fn id(&self) -> Option<u64> {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

impl FixtureBackend {
    fn create<T: Record>(&self, rows: &RefCell<Vec<T>>, record: &T) -> Result<(), ApiError> {
        self.check_write()?;
        let mut record = record.clone();
        record.set_id(self.fresh_id());
        rows.borrow_mut().push(record);
        Ok(())
    }

    fn update<T: Record>(&self, rows: &RefCell<Vec<T>>, id: u64, record: &T) -> Result<(), ApiError> {
        self.check_write()?;
        let mut rows = rows.borrow_mut();
        let slot = rows
            .iter_mut()
            .find(|row| row.id() == Some(id))
            .ok_or_else(|| not_found(T::KIND, id))?;
        *slot = record.clone();
        slot.set_id(id);
        Ok(())
    }

    fn delete<T: Record>(&self, rows: &RefCell<Vec<T>>, id: u64) -> Result<(), ApiError> {
        self.check_write()?;
        let mut rows = rows.borrow_mut();
        let before = rows.len();
        rows.retain(|row| row.id() != Some(id));
        if rows.len() == before {
            return Err(not_found(T::KIND, id));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl CatalogApi for FixtureBackend {
    async fn fetch_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.course_fetches.set(self.course_fetches.get() + 1);
        self.read(&self.courses)
    }

    async fn fetch_languages(&self) -> Result<Vec<Language>, ApiError> {
        self.read(&self.languages)
    }

    async fn create_course(&self, course: &Course) -> Result<(), ApiError> {
        self.create(&self.courses, course)
    }

    async fn update_course(&self, id: u64, course: &Course) -> Result<(), ApiError> {
        self.update(&self.courses, id, course)
    }

    async fn delete_course(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&self.courses, id)
    }

    async fn create_language(&self, language: &Language) -> Result<(), ApiError> {
        self.create(&self.languages, language)
    }

    async fn update_language(&self, id: u64, language: &Language) -> Result<(), ApiError> {
        self.update(&self.languages, id, language)
    }

    async fn delete_language(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&self.languages, id)
    }
}

#[async_trait(?Send)]
impl LeadApi for FixtureBackend {
    async fn submit_consultation(&self, request: &ConsultationRequest) -> Result<(), ApiError> {
        self.check_write()?;
        let lead = RegisteredUser {
            id: self.fresh_id(),
            name: request.name.clone(),
            phone: request.phone.clone(),
            city: request.city.clone(),
            course_of_interest: request.course_of_interest.clone(),
            level: request.level.clone(),
            kind: request.kind.clone(),
            format: request.format.clone(),
            schedule: request.schedule.clone(),
            price: request.price,
            description: request.description.clone(),
            created_at: report_timestamp(Utc::now()),
        };
        log::debug!("lead recorded for {}", lead.course_of_interest);
        self.leads.borrow_mut().push(lead);
        Ok(())
    }

    async fn register_club_member(&self, registration: &ClubRegistration) -> Result<(), ApiError> {
        self.check_write()?;
        if self
            .members
            .borrow()
            .iter()
            .any(|member| member.phone_number == registration.mobile)
        {
            return Err(ApiError::Rejected("mobile number is already registered".into()));
        }
        let member = ClubMember {
            id: Some(self.fresh_id()),
            name: format!("{} {}", registration.first_name, registration.last_name),
            phone_number: registration.mobile.clone(),
            status: ClubStatus::Active,
            created_at: Some(report_timestamp(Utc::now())),
            ..ClubMember::default()
        };
        self.members.borrow_mut().push(member);
        Ok(())
    }

    async fn request_club_code(&self, request: &ClubCodeRequest) -> Result<(), ApiError> {
        let known = self
            .members
            .borrow()
            .iter()
            .any(|member| member.phone_number == request.mobile && member.status == ClubStatus::Active);
        if !known {
            return Err(ApiError::Rejected("no active member with this mobile".into()));
        }
        self.pending_codes.borrow_mut().push(request.mobile.clone());
        Ok(())
    }

    async fn verify_club_code(&self, verification: &ClubVerification) -> Result<String, ApiError> {
        let pending = self
            .pending_codes
            .borrow()
            .iter()
            .any(|mobile| *mobile == verification.mobile);
        if !pending || verification.code != FIXTURE_OTP {
            return Err(ApiError::Rejected("verification code does not match".into()));
        }
        Ok(discount_code_for(&verification.mobile))
    }
}

/// `PARSA-` followed by the last four digits of the mobile number.
#[must_use]
pub fn discount_code_for(mobile: &str) -> String {
    let tail: String = mobile
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("PARSA-{tail}")
}

#[async_trait(?Send)]
impl AdminApi for FixtureBackend {
    async fn login(&self, request: &LoginRequest) -> Result<AuthToken, ApiError> {
        let expected = hash_password(&self.credentials.password);
        if request.username != self.credentials.username || request.password != expected {
            return Err(login_refusal(
                401,
                "Unauthorized",
                r#"{"message":"invalid credentials"}"#,
            ));
        }
        AuthToken::new(format!("fixture-{}", &expected[..16])).ok_or(ApiError::MissingToken)
    }

    async fn fetch_leads(&self) -> Result<Vec<RegisteredUser>, ApiError> {
        self.read(&self.leads)
    }

    async fn fetch_club_members(&self) -> Result<Vec<ClubMember>, ApiError> {
        self.read(&self.members)
    }

    async fn create_club_member(&self, member: &ClubMember) -> Result<(), ApiError> {
        self.create(&self.members, member)
    }

    async fn update_club_member(&self, id: u64, member: &ClubMember) -> Result<(), ApiError> {
        self.update(&self.members, id, member)
    }

    async fn delete_club_member(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&self.members, id)
    }
}
