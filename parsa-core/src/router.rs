//! View router: the single owner of route, selection and overlay state.
//!
//! Every change goes through [`ViewState::reduce`]. After each action the
//! selection is re-resolved against whatever catalog is loaded, so a deep
//! link that arrives before the data settles resolves once it does.

use crate::admin::{AdminEditor, AdminTab};
use crate::catalog::{Catalog, MutationOutcome};
use crate::model::{Course, UserInfo};
use crate::overlay::{Overlays, VisibleOverlays};
use crate::route::{Route, normalize};
use crate::selection::{CourseFilter, Selection, courses_for_language, resolve};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The first load has not settled yet.
    FirstLoad,
    /// The first load failed; carries the message shown to the visitor.
    FirstLoadFailed(String),
    Ready,
}

/// What the top-level view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    LoadFailed(String),
    Main,
    AdminLogin,
    AdminPanel(AdminTab),
}

#[derive(Debug)]
pub enum RouterAction {
    /// Raw location fragment, from a hashchange/popstate event or the initial mount.
    HashChanged(String),
    LoadStarted,
    CatalogLoaded(Catalog),
    LoadFailed(String),
    /// Result of an admin catalog edit and its reload.
    CatalogMutated(MutationOutcome<Catalog>),
    OpenConsultation(String),
    CloseConsultation,
    /// Merged profile written to storage ahead of a consultation request.
    ProfileStored(UserInfo),
    /// Consultation lead recorded; carries the merged profile.
    ConsultationSubmitted(UserInfo),
    OpenProfile,
    CloseProfile,
    CloseUserInfo,
    ProfileSaved(UserInfo),
    OpenClub,
    CloseClub,
    SetFilter(CourseFilter),
    AdminLoggedIn,
    AdminLoggedOut,
    OpenEditor(AdminEditor),
    CloseEditor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub route: Route,
    pub catalog: Catalog,
    pub load: LoadStatus,
    /// A reload is in flight over data that is already shown.
    pub reloading: bool,
    pub selection: Selection,
    pub overlays: Overlays,
    pub filter: CourseFilter,
    pub profile: Option<UserInfo>,
    pub admin_session: bool,
    pub editor: Option<AdminEditor>,
}

impl ViewState {
    /// State at mount time, before the catalog arrives.
    #[must_use]
    pub fn new(initial_hash: &str, profile: Option<UserInfo>, admin_session: bool) -> Self {
        let route = normalize(initial_hash);
        Self {
            route,
            catalog: Catalog::default(),
            load: LoadStatus::FirstLoad,
            reloading: false,
            selection: Selection::none(),
            overlays: Overlays::closed(),
            filter: CourseFilter::ALL,
            profile,
            admin_session,
            editor: None,
        }
    }

    #[must_use]
    pub const fn in_admin_area(&self) -> bool {
        self.route.is_admin()
    }

    #[must_use]
    pub fn reduce(mut self, action: RouterAction) -> Self {
        match action {
            RouterAction::HashChanged(hash) => self.navigate(normalize(&hash)),
            RouterAction::LoadStarted => match self.load {
                LoadStatus::Ready => self.reloading = true,
                LoadStatus::FirstLoad | LoadStatus::FirstLoadFailed(_) => {
                    self.load = LoadStatus::FirstLoad;
                }
            },
            RouterAction::CatalogLoaded(catalog) => self.accept_catalog(catalog),
            RouterAction::LoadFailed(message) => self.reject_load(message),
            RouterAction::CatalogMutated(outcome) => match outcome {
                MutationOutcome::Applied(catalog) => {
                    self.accept_catalog(catalog);
                    self.editor = None;
                }
                MutationOutcome::ReloadFailed(err) => {
                    self.reject_load(err.to_string());
                    self.editor = None;
                }
                // Keep the editor open so the admin can retry.
                MutationOutcome::Rejected(_) => {}
            },
            RouterAction::OpenConsultation(slug) => {
                if !self.in_admin_area() {
                    self.overlays.consultation = Some(slug);
                }
            }
            RouterAction::CloseConsultation => self.overlays.consultation = None,
            RouterAction::ProfileStored(info) => self.profile = Some(info),
            RouterAction::ConsultationSubmitted(info) => {
                self.profile = Some(info);
                self.overlays.consultation = None;
            }
            RouterAction::OpenProfile => {
                if !self.in_admin_area() {
                    if self.profile.is_some() {
                        self.overlays.profile = true;
                    } else {
                        self.overlays.user_info = true;
                    }
                }
            }
            RouterAction::CloseProfile => self.overlays.profile = false,
            RouterAction::CloseUserInfo => self.overlays.user_info = false,
            RouterAction::ProfileSaved(info) => {
                self.profile = Some(info);
                if self.overlays.user_info {
                    self.overlays.user_info = false;
                    self.overlays.profile = !self.in_admin_area();
                }
            }
            RouterAction::OpenClub => {
                if !self.in_admin_area() {
                    self.overlays.club = true;
                }
            }
            RouterAction::CloseClub => self.overlays.club = false,
            RouterAction::SetFilter(filter) => self.filter = filter,
            RouterAction::AdminLoggedIn => self.admin_session = true,
            RouterAction::AdminLoggedOut => {
                self.admin_session = false;
                self.editor = None;
            }
            RouterAction::OpenEditor(editor) => {
                if self.in_admin_area() && self.admin_session {
                    self.editor = Some(editor);
                }
            }
            RouterAction::CloseEditor => self.editor = None,
        }
        self.resolve_selection();
        self
    }

    fn navigate(&mut self, route: Route) {
        if route.is_admin() {
            self.overlays.close_all();
        } else {
            self.editor = None;
        }
        log::debug!("navigate: {route:?}");
        self.route = route;
    }

    fn accept_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.load = LoadStatus::Ready;
        self.reloading = false;
    }

    fn reject_load(&mut self, message: String) {
        self.reloading = false;
        match self.load {
            LoadStatus::Ready => log::warn!("reload failed, keeping previous catalog: {message}"),
            LoadStatus::FirstLoad | LoadStatus::FirstLoadFailed(_) => {
                log::error!("initial catalog load failed: {message}");
                self.load = LoadStatus::FirstLoadFailed(message);
            }
        }
    }

    fn resolve_selection(&mut self) {
        let next = resolve(
            &self.route,
            &self.catalog.courses,
            &self.catalog.languages,
            &self.selection,
        );
        if next.language_name != self.selection.language_name {
            self.filter = CourseFilter::ALL;
        }
        self.selection = next;
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        if let Route::Admin { sub } = &self.route {
            return if self.admin_session {
                Screen::AdminPanel(AdminTab::from_sub(sub))
            } else {
                Screen::AdminLogin
            };
        }
        match &self.load {
            LoadStatus::FirstLoad => Screen::Loading,
            LoadStatus::FirstLoadFailed(message) => Screen::LoadFailed(message.clone()),
            LoadStatus::Ready => Screen::Main,
        }
    }

    #[must_use]
    pub fn visible_overlays(&self) -> VisibleOverlays<'_> {
        VisibleOverlays::gate(
            self.in_admin_area(),
            &self.overlays,
            self.selection.course.as_ref(),
            &self.catalog.courses,
        )
    }

    /// Courses listed under the selected language after the active filter.
    #[must_use]
    pub fn visible_courses(&self) -> Vec<&Course> {
        self.selection
            .language_name
            .as_deref()
            .map(|name| courses_for_language(&self.catalog.courses, name, self.filter))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::model::{CourseFormat, Language};

    fn catalog() -> Catalog {
        let course = |id, language: &str, level: &str| Course {
            id: Some(id),
            language: language.into(),
            level: level.into(),
            ..Course::default()
        };
        let language = |name: &str| Language {
            name: name.into(),
            ..Language::default()
        };
        Catalog::from_records(
            vec![
                course(1, "English", "A1"),
                course(2, "German", "A1"),
                course(3, "German", "B1"),
            ],
            vec![language("English"), language("German")],
        )
    }

    fn ready(hash: &str) -> ViewState {
        ViewState::new(hash, None, false).reduce(RouterAction::CatalogLoaded(catalog()))
    }

    #[test]
    fn deep_link_resolves_after_data_arrives() {
        let state = ViewState::new("#/course/German-B1-3", None, false);
        assert_eq!(state.screen(), Screen::Loading);
        assert!(state.selection.course.is_none());

        let state = state.reduce(RouterAction::CatalogLoaded(catalog()));
        assert_eq!(state.screen(), Screen::Main);
        assert_eq!(state.selection.course.as_ref().map(|c| c.id), Some(Some(3)));
        assert!(state.visible_overlays().course_detail.is_some());
    }

    #[test]
    fn first_load_failure_is_surfaced_and_reload_failure_is_not() {
        let failed = ViewState::new("#/", None, false).reduce(RouterAction::LoadFailed("offline".into()));
        assert_eq!(failed.screen(), Screen::LoadFailed("offline".into()));

        let retried = failed.reduce(RouterAction::LoadStarted);
        assert_eq!(retried.screen(), Screen::Loading);

        let state = ready("#/language/German")
            .reduce(RouterAction::LoadStarted)
            .reduce(RouterAction::LoadFailed("offline".into()));
        assert_eq!(state.screen(), Screen::Main);
        assert!(!state.reloading);
        assert_eq!(state.catalog, catalog());
        assert_eq!(state.visible_courses().len(), 2);
    }

    #[test]
    fn entering_admin_closes_every_overlay_for_good() {
        let state = ready("#/course/English-A1-1")
            .reduce(RouterAction::OpenConsultation("English-A1-1".into()))
            .reduce(RouterAction::OpenClub)
            .reduce(RouterAction::ProfileSaved(UserInfo::default()))
            .reduce(RouterAction::OpenProfile);
        assert!(state.overlays.any_open());
        assert!(state.visible_overlays().any());

        let admin = state.reduce(RouterAction::HashChanged("#/admin".into()));
        assert!(!admin.overlays.any_open());
        assert!(!admin.visible_overlays().any());
        assert!(admin.selection.is_empty());
        assert_eq!(admin.screen(), Screen::AdminLogin);

        let ignored = admin.reduce(RouterAction::OpenClub);
        assert!(!ignored.overlays.club);

        let back = ignored.reduce(RouterAction::HashChanged("#/".into()));
        assert!(!back.visible_overlays().any());
    }

    #[test]
    fn profile_button_opens_capture_first() {
        let state = ready("#/").reduce(RouterAction::OpenProfile);
        assert!(state.overlays.user_info && !state.overlays.profile);

        let state = state.reduce(RouterAction::ProfileSaved(UserInfo {
            name: "Ali".into(),
            ..UserInfo::default()
        }));
        assert!(!state.overlays.user_info);
        assert!(state.overlays.profile);

        let state = state
            .reduce(RouterAction::CloseProfile)
            .reduce(RouterAction::OpenProfile);
        assert!(state.overlays.profile && !state.overlays.user_info);
    }

    #[test]
    fn filter_resets_when_language_changes() {
        let online = CourseFilter {
            kind: None,
            format: Some(CourseFormat::Online),
        };
        let state = ready("#/language/German").reduce(RouterAction::SetFilter(online));
        assert_eq!(state.filter, online);
        assert!(state.visible_courses().is_empty());

        let same = state.reduce(RouterAction::HashChanged("#/language/German".into()));
        assert_eq!(same.filter, online);

        let other = same.reduce(RouterAction::HashChanged("#/language/English".into()));
        assert_eq!(other.filter, CourseFilter::ALL);
    }

    #[test]
    fn admin_tabs_and_editor_lifecycle() {
        let state = ready("#/admin/languages").reduce(RouterAction::AdminLoggedIn);
        assert_eq!(state.screen(), Screen::AdminPanel(AdminTab::Languages));

        let state = state.reduce(RouterAction::OpenEditor(AdminEditor::new_course()));
        assert!(state.editor.is_some());

        let rejected = state.reduce(RouterAction::CatalogMutated(MutationOutcome::Rejected(
            ApiError::Network("offline".into()),
        )));
        assert!(rejected.editor.is_some());
        assert_eq!(rejected.catalog, catalog());

        let left = rejected.reduce(RouterAction::HashChanged("#/".into()));
        assert!(left.editor.is_none());

        let logged_out = left.reduce(RouterAction::AdminLoggedOut);
        assert!(!logged_out.admin_session);
    }

    #[test]
    fn editor_needs_session_inside_admin() {
        let public = ready("#/").reduce(RouterAction::OpenEditor(AdminEditor::new_course()));
        assert!(public.editor.is_none());
        let login = ready("#/admin").reduce(RouterAction::OpenEditor(AdminEditor::new_course()));
        assert!(login.editor.is_none());
    }

    #[test]
    fn stored_profile_applies_before_the_request_settles() {
        let info = UserInfo {
            name: "Reza".into(),
            phone: "09351234567".into(),
            course_of_interest: Some("German".into()),
            ..UserInfo::default()
        };
        let state = ready("#/")
            .reduce(RouterAction::OpenConsultation("German-A1-2".into()))
            .reduce(RouterAction::ProfileStored(info.clone()));
        assert_eq!(state.profile, Some(info));
        assert_eq!(state.overlays.consultation.as_deref(), Some("German-A1-2"));
        assert!(!state.overlays.profile);
        assert!(!state.overlays.user_info);
    }

    #[test]
    fn consultation_submission_records_profile() {
        let info = UserInfo {
            name: "Sara".into(),
            course_of_interest: Some("German".into()),
            ..UserInfo::default()
        };
        let state = ready("#/")
            .reduce(RouterAction::OpenConsultation("German-A1-2".into()))
            .reduce(RouterAction::ConsultationSubmitted(info.clone()));
        assert_eq!(state.profile, Some(info));
        assert!(state.overlays.consultation.is_none());
    }
}
