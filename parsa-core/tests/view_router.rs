use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use futures::executor::block_on;
use parsa_core::{
    ApiError, Catalog, CatalogApi, CatalogMutation, Course, Language, Route, RouterAction, Screen,
    ViewState, apply_catalog_mutation, load_catalog, normalize,
};

#[derive(Default)]
struct RemoteCatalog {
    courses: RefCell<Vec<Course>>,
    languages: Vec<Language>,
    refuse_deletes: bool,
    fetches: Cell<usize>,
}

#[async_trait(?Send)]
impl CatalogApi for RemoteCatalog {
    async fn fetch_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.fetches.set(self.fetches.get() + 1);
        Ok(self.courses.borrow().clone())
    }

    async fn fetch_languages(&self) -> Result<Vec<Language>, ApiError> {
        Ok(self.languages.clone())
    }

    async fn create_course(&self, course: &Course) -> Result<(), ApiError> {
        self.courses.borrow_mut().push(course.clone());
        Ok(())
    }

    async fn update_course(&self, _id: u64, _course: &Course) -> Result<(), ApiError> {
        Ok(())
    }

    async fn delete_course(&self, id: u64) -> Result<(), ApiError> {
        if self.refuse_deletes {
            return Err(ApiError::Status {
                status: 500,
                message: "delete refused".into(),
            });
        }
        self.courses.borrow_mut().retain(|course| course.id != Some(id));
        Ok(())
    }

    async fn create_language(&self, _language: &Language) -> Result<(), ApiError> {
        Ok(())
    }

    async fn update_language(&self, _id: u64, _language: &Language) -> Result<(), ApiError> {
        Ok(())
    }

    async fn delete_language(&self, _id: u64) -> Result<(), ApiError> {
        Ok(())
    }
}

fn course(id: u64, language: &str, level: &str) -> Course {
    Course {
        id: Some(id),
        language: language.into(),
        level: level.into(),
        ..Course::default()
    }
}

fn language(name: &str) -> Language {
    Language {
        name: name.into(),
        ..Language::default()
    }
}

fn remote() -> RemoteCatalog {
    RemoteCatalog {
        courses: RefCell::new(vec![
            course(1, "English", "A1"),
            course(2, "German", "A1"),
            course(3, "German", "B2"),
        ]),
        languages: vec![language("English"), language("German")],
        ..RemoteCatalog::default()
    }
}

fn loaded(api: &RemoteCatalog) -> Catalog {
    block_on(load_catalog(api)).unwrap()
}

#[test]
fn browse_language_then_course_then_admin() {
    let api = remote();
    let state = ViewState::new("#/", None, false).reduce(RouterAction::CatalogLoaded(loaded(&api)));

    let state = state.reduce(RouterAction::HashChanged("#/language/German".into()));
    let listed: Vec<_> = state.visible_courses().iter().map(|c| c.id).collect();
    assert_eq!(listed, vec![Some(2), Some(3)]);
    assert!(state.visible_courses().iter().all(|c| c.language == "German"));

    let slug = state.visible_courses()[1].slug.clone();
    let state = state.reduce(RouterAction::HashChanged(Route::course(&slug).to_hash()));
    assert_eq!(state.selection.course.as_ref().map(|c| c.slug.as_str()), Some(slug.as_str()));
    assert_eq!(state.selection.language_name.as_deref(), Some("German"));

    let state = state
        .reduce(RouterAction::OpenConsultation(slug))
        .reduce(RouterAction::OpenClub)
        .reduce(RouterAction::HashChanged("#/admin".into()));
    assert!(state.selection.course.is_none());
    assert!(state.selection.language_name.is_none());
    assert!(!state.overlays.any_open());
    assert!(!state.visible_overlays().any());
    assert_eq!(state.screen(), Screen::AdminLogin);
}

#[test]
fn rejected_delete_leaves_collection_and_skips_reload() {
    let api = RemoteCatalog {
        refuse_deletes: true,
        ..remote()
    };
    let before = loaded(&api);
    let fetches = api.fetches.get();
    let state = ViewState::new("#/admin/courses", None, true)
        .reduce(RouterAction::CatalogLoaded(before.clone()));

    let outcome = block_on(apply_catalog_mutation(&api, &CatalogMutation::DeleteCourse(2)));
    let state = state.reduce(RouterAction::CatalogMutated(outcome));

    assert_eq!(state.catalog, before);
    assert_eq!(api.courses.borrow().len(), 3);
    assert_eq!(api.fetches.get(), fetches);
}

#[test]
fn accepted_delete_reloads_counts() {
    let api = remote();
    let state = ViewState::new("#/admin", None, true).reduce(RouterAction::CatalogLoaded(loaded(&api)));
    assert_eq!(state.catalog.language("German").map(|l| l.course_count), Some(2));

    let outcome = block_on(apply_catalog_mutation(&api, &CatalogMutation::DeleteCourse(3)));
    let state = state.reduce(RouterAction::CatalogMutated(outcome));
    assert_eq!(state.catalog.courses.len(), 2);
    assert_eq!(state.catalog.language("German").map(|l| l.course_count), Some(1));
}

#[test]
fn navigation_during_first_load_is_not_lost() {
    let api = remote();
    let state = ViewState::new("#/", None, false)
        .reduce(RouterAction::LoadStarted)
        .reduce(RouterAction::HashChanged("#/course/English-A1-1".into()));
    assert_eq!(state.screen(), Screen::Loading);

    let state = state.reduce(RouterAction::CatalogLoaded(loaded(&api)));
    assert_eq!(state.selection.course.as_ref().and_then(|c| c.id), Some(1));
}

#[test]
fn normalize_is_idempotent_over_sample_fragments() {
    for hash in ["", "#", "#/", "#/unknown", "#/admin", "#/admin/leads", "#/course/a%20b", "#/language/%E0"] {
        assert_eq!(normalize(hash), normalize(hash));
    }
    assert_eq!(normalize("#/language/%E0"), Route::Home);
}
