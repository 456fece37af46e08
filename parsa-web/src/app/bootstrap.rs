use parsa_core::{CatalogApi, RouterAction, load_catalog};
use yew::prelude::*;

use crate::api::HttpApi;

/// Load both collections and report the result to the router.
#[allow(clippy::future_not_send)]
pub async fn load_into<A>(api: &A, dispatch: &Callback<RouterAction>)
where
    A: CatalogApi + ?Sized,
{
    dispatch.emit(RouterAction::LoadStarted);
    match load_catalog(api).await {
        Ok(catalog) => dispatch.emit(RouterAction::CatalogLoaded(catalog)),
        Err(err) => dispatch.emit(RouterAction::LoadFailed(err.to_string())),
    }
}

/// Fetch the catalog from the API in the background.
pub fn reload_catalog(dispatch: Callback<RouterAction>) {
    wasm_bindgen_futures::spawn_local(async move {
        load_into(&HttpApi::from_env(), &dispatch).await;
    });
}

/// Initial load on mount.
#[hook]
pub fn use_bootstrap(dispatch: Callback<RouterAction>) {
    use_effect_with((), move |()| {
        reload_catalog(dispatch);
        || {}
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use parsa_core::{ApiError, Course, Language, LoadStatus, Screen, ViewState};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FixedCatalog {
        fail: bool,
    }

    #[async_trait(?Send)]
    impl CatalogApi for FixedCatalog {
        async fn fetch_courses(&self) -> Result<Vec<Course>, ApiError> {
            if self.fail {
                return Err(ApiError::Network("offline".into()));
            }
            Ok(vec![Course {
                id: Some(1),
                language: "English".into(),
                level: "A1".into(),
                ..Course::default()
            }])
        }
        async fn fetch_languages(&self) -> Result<Vec<Language>, ApiError> {
            Ok(vec![Language {
                name: "English".into(),
                ..Language::default()
            }])
        }
        async fn create_course(&self, _: &Course) -> Result<(), ApiError> {
            Ok(())
        }
        async fn update_course(&self, _: u64, _: &Course) -> Result<(), ApiError> {
            Ok(())
        }
        async fn delete_course(&self, _: u64) -> Result<(), ApiError> {
            Ok(())
        }
        async fn create_language(&self, _: &Language) -> Result<(), ApiError> {
            Ok(())
        }
        async fn update_language(&self, _: u64, _: &Language) -> Result<(), ApiError> {
            Ok(())
        }
        async fn delete_language(&self, _: u64) -> Result<(), ApiError> {
            Ok(())
        }
    }

    fn run(api: &FixedCatalog) -> ViewState {
        let state = Rc::new(RefCell::new(ViewState::new("#/course/English-A1-1", None, false)));
        let sink = {
            let state = state.clone();
            Callback::from(move |action: RouterAction| {
                let next = state.borrow().clone().reduce(action);
                *state.borrow_mut() = next;
            })
        };
        block_on(load_into(api, &sink));
        state.borrow().clone()
    }

    #[test]
    fn successful_load_resolves_deep_link() {
        let state = run(&FixedCatalog { fail: false });
        assert_eq!(state.load, LoadStatus::Ready);
        assert!(state.selection.course.is_some());
    }

    #[test]
    fn failed_first_load_is_reported() {
        let state = run(&FixedCatalog { fail: true });
        assert!(matches!(state.screen(), Screen::LoadFailed(_)));
    }
}
