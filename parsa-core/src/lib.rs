//! Parsa Core
//!
//! Platform-agnostic logic for the Parsa language institute site: catalog
//! model, hash routing, selection and overlay state, remote API contracts,
//! profile persistence and the admin and club flows.
//! This crate has no browser dependencies.

#![forbid(unsafe_code)]

pub mod admin;
pub mod api;
pub mod catalog;
pub mod club;
pub mod model;
pub mod overlay;
pub mod profile;
pub mod route;
pub mod router;
pub mod selection;
pub mod slug;

// Re-export commonly used types
pub use admin::{
    AdminEditor, AdminTab, CourseDraft, DraftError, MemberMutation, apply_member_mutation,
    hash_password, login, logout, new_club_member, split_tags,
};
pub use api::{
    AdminApi, ApiError, AuthToken, CatalogApi, ClubCodeRequest, ClubRegistration,
    ClubVerification, ConsultationRequest, Endpoint, LeadApi, LoginRequest, Method, Resource,
    decode_discount, decode_login, decode_records, login_refusal,
};
pub use catalog::{
    Catalog, CatalogMutation, MutationOutcome, apply_catalog_mutation, count_courses,
    load_catalog, mutate_then_reload,
};
pub use club::{ClubFlow, ClubMessage, ClubMode, ClubRequest, MessageKind, submit_club_request};
pub use model::{
    ClubMember, ClubStatus, Course, CourseFormat, CourseStatus, CourseType, Language,
    RegisteredUser, UserInfo,
};
pub use overlay::{Overlays, VisibleOverlays};
pub use profile::{
    ADMIN_TOKEN_KEY, ContactDetails, ContactError, KeyValueStore, MemoryStore, PROFILE_KEY,
    StorageError, admin_token, clear_admin_token, load_profile, save_profile, store_admin_token,
    to_ascii_digit,
};
pub use route::{Route, normalize, percent_decode, percent_encode};
pub use router::{LoadStatus, RouterAction, Screen, ViewState};
pub use selection::{CourseFilter, Selection, courses_for_language, find_course, find_language, resolve};
pub use slug::{course_slug, language_slug, slugify};
