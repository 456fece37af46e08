//! Data loader: fetches the course and language collections, derives slugs
//! and per-language course counts, and reloads after admin mutations.

use futures::future::join;

use crate::api::{ApiError, CatalogApi};
use crate::model::{Course, Language};

/// Both public collections, with every derived field filled in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    pub courses: Vec<Course>,
    pub languages: Vec<Language>,
}

impl Catalog {
    /// Build a catalog from raw API records, deriving slugs and course counts.
    #[must_use]
    pub fn from_records(courses: Vec<Course>, languages: Vec<Language>) -> Self {
        let courses: Vec<Course> = courses.into_iter().map(Course::with_derived_slug).collect();
        let languages = languages
            .into_iter()
            .map(|mut language| {
                language.course_count = count_courses(&courses, &language.name);
                language
            })
            .collect();
        Self { courses, languages }
    }

    #[must_use]
    pub fn language(&self, name: &str) -> Option<&Language> {
        self.languages.iter().find(|language| language.name == name)
    }
}

/// Courses whose `language` field equals `language_name`.
#[must_use]
pub fn count_courses(courses: &[Course], language_name: &str) -> usize {
    courses
        .iter()
        .filter(|course| course.language == language_name)
        .count()
}

/// Fetch both collections concurrently, wait for both, then derive.
///
/// # Errors
///
/// Returns the first failure; nothing is derived from a partial result.
pub async fn load_catalog<A>(api: &A) -> Result<Catalog, ApiError>
where
    A: CatalogApi + ?Sized,
{
    let (courses, languages) = join(api.fetch_courses(), api.fetch_languages()).await;
    let catalog = Catalog::from_records(courses?, languages?);
    log::debug!(
        "catalog loaded: {} courses, {} languages",
        catalog.courses.len(),
        catalog.languages.len()
    );
    Ok(catalog)
}

/// Admin edits to the public catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogMutation {
    /// Create when the course has no id, update otherwise.
    SaveCourse(Course),
    DeleteCourse(u64),
    /// Create when the language has no id, update otherwise.
    SaveLanguage(Language),
    DeleteLanguage(u64),
}

/// Result of a mutation followed by its reload.
#[derive(Debug)]
pub enum MutationOutcome<T> {
    /// Mutation and reload both succeeded.
    Applied(T),
    /// The mutation went through but the reload failed; keep the previous data.
    ReloadFailed(ApiError),
    /// The mutation was refused; nothing was reloaded.
    Rejected(ApiError),
}

/// Run `mutation`, then `reload` only if it succeeded.
pub async fn mutate_then_reload<M, R, T>(mutation: M, reload: R) -> MutationOutcome<T>
where
    M: Future<Output = Result<(), ApiError>>,
    R: Future<Output = Result<T, ApiError>>,
{
    if let Err(err) = mutation.await {
        log::warn!("mutation rejected: {err}");
        return MutationOutcome::Rejected(err);
    }
    match reload.await {
        Ok(value) => MutationOutcome::Applied(value),
        Err(err) => {
            log::warn!("reload after mutation failed: {err}");
            MutationOutcome::ReloadFailed(err)
        }
    }
}

async fn send_mutation<A>(api: &A, mutation: &CatalogMutation) -> Result<(), ApiError>
where
    A: CatalogApi + ?Sized,
{
    match mutation {
        CatalogMutation::SaveCourse(course) => match course.id {
            Some(id) => api.update_course(id, course).await,
            None => api.create_course(course).await,
        },
        CatalogMutation::DeleteCourse(id) => api.delete_course(*id).await,
        CatalogMutation::SaveLanguage(language) => match language.id {
            Some(id) => api.update_language(id, language).await,
            None => api.create_language(language).await,
        },
        CatalogMutation::DeleteLanguage(id) => api.delete_language(*id).await,
    }
}

/// Apply an admin mutation and reload the catalog from the server on success.
pub async fn apply_catalog_mutation<A>(
    api: &A,
    mutation: &CatalogMutation,
) -> MutationOutcome<Catalog>
where
    A: CatalogApi + ?Sized,
{
    mutate_then_reload(send_mutation(api, mutation), load_catalog(api)).await
}
