//! Fixture data the scenarios run against: the public catalog, club members,
//! registered leads and the admin credentials the fake backend accepts.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use parsa_core::{ClubMember, Course, Language, RegisteredUser};
use serde::Deserialize;
use thiserror::Error;

const BUILTIN: &str = include_str!("../../fixtures/catalog.json");

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid fixture JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("course {id:?} references unknown language {language:?}")]
    UnknownLanguage { id: Option<u64>, language: String },
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u64 },
    #[error("fixture needs at least {needed} languages with courses, found {found}")]
    TooSmall { needed: usize, found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Fixture {
    pub admin: AdminCredentials,
    pub languages: Vec<Language>,
    pub courses: Vec<Course>,
    #[serde(default)]
    pub members: Vec<ClubMember>,
    #[serde(default)]
    pub leads: Vec<RegisteredUser>,
}

/// Scenarios compare filter results across two languages.
const MIN_POPULATED_LANGUAGES: usize = 2;

impl Fixture {
    /// Fixture compiled into the binary.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled JSON is broken.
    pub fn builtin() -> Result<Self, FixtureError> {
        Self::parse(BUILTIN)
    }

    /// # Errors
    ///
    /// Returns an error when the file cannot be read, is not valid JSON, or is
    /// not internally consistent.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let text = fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// # Errors
    ///
    /// See [`Fixture::load`].
    pub fn parse(text: &str) -> Result<Self, FixtureError> {
        let fixture: Self = serde_json::from_str(text)?;
        fixture.validate()?;
        Ok(fixture)
    }

    fn validate(&self) -> Result<(), FixtureError> {
        let names: HashSet<&str> = self.languages.iter().map(|l| l.name.as_str()).collect();
        if let Some(course) = self
            .courses
            .iter()
            .find(|course| !names.contains(course.language.as_str()))
        {
            return Err(FixtureError::UnknownLanguage {
                id: course.id,
                language: course.language.clone(),
            });
        }

        unique_ids("course", self.courses.iter().filter_map(|c| c.id))?;
        unique_ids("language", self.languages.iter().filter_map(|l| l.id))?;
        unique_ids("member", self.members.iter().filter_map(|m| m.id))?;

        let populated = self.populated_languages().len();
        if populated < MIN_POPULATED_LANGUAGES {
            return Err(FixtureError::TooSmall {
                needed: MIN_POPULATED_LANGUAGES,
                found: populated,
            });
        }
        Ok(())
    }

    /// Languages that have at least one course, in fixture order.
    #[must_use]
    pub fn populated_languages(&self) -> Vec<&Language> {
        self.languages
            .iter()
            .filter(|language| self.courses.iter().any(|c| c.language == language.name))
            .collect()
    }

    /// Highest id in use across every collection, so the fake backend can hand out fresh ones.
    #[must_use]
    pub fn max_id(&self) -> u64 {
        self.courses
            .iter()
            .filter_map(|c| c.id)
            .chain(self.languages.iter().filter_map(|l| l.id))
            .chain(self.members.iter().filter_map(|m| m.id))
            .chain(self.leads.iter().map(|lead| lead.id))
            .max()
            .unwrap_or(0)
    }
}

fn unique_ids(kind: &'static str, ids: impl Iterator<Item = u64>) -> Result<(), FixtureError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(FixtureError::DuplicateId { kind, id });
        }
    }
    Ok(())
}
