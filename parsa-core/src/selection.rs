//! Selection resolver: derives the highlighted course and language filter
//! from the current route and whatever collections are loaded.

use crate::model::{Course, CourseFormat, CourseType, Language};
use crate::route::Route;
use crate::slug::language_slug;

/// Course and language currently selected.
///
/// Both fields are views over `Route` plus loaded data and are only ever
/// produced by [`resolve`]. The two axes are independent: a course can be
/// open while a language list stays selected underneath it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub course: Option<Course>,
    pub language_name: Option<String>,
}

impl Selection {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            course: None,
            language_name: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.course.is_none() && self.language_name.is_none()
    }
}

/// Resolve the selection for `route` against the loaded collections.
///
/// `previous` supplies the language axis while a course is open: it is kept
/// as long as that language is still loaded. Never fails; unmatched slugs
/// simply select nothing.
#[must_use]
pub fn resolve(
    route: &Route,
    courses: &[Course],
    languages: &[Language],
    previous: &Selection,
) -> Selection {
    match route {
        Route::Home | Route::Admin { .. } => Selection::none(),
        Route::CourseDetail { slug } => Selection {
            course: find_course(courses, slug).cloned(),
            language_name: previous
                .language_name
                .as_deref()
                .and_then(|name| languages.iter().find(|lang| lang.name == name))
                .map(|lang| lang.name.clone()),
        },
        Route::LanguageList { slugified_name } => Selection {
            course: None,
            language_name: find_language(languages, slugified_name).map(|lang| lang.name.clone()),
        },
    }
}

/// Exact, case-sensitive slug lookup.
#[must_use]
pub fn find_course<'a>(courses: &'a [Course], slug: &str) -> Option<&'a Course> {
    courses.iter().find(|course| course.slug == slug)
}

/// First language whose slugified name equals `slugified_name`.
#[must_use]
pub fn find_language<'a>(languages: &'a [Language], slugified_name: &str) -> Option<&'a Language> {
    languages
        .iter()
        .find(|lang| language_slug(&lang.name) == slugified_name)
}

/// Optional narrowing of a language's course list by delivery type and format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CourseFilter {
    pub kind: Option<CourseType>,
    pub format: Option<CourseFormat>,
}

impl CourseFilter {
    pub const ALL: Self = Self {
        kind: None,
        format: None,
    };

    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        self.kind.is_none_or(|kind| course.kind == kind)
            && self.format.is_none_or(|format| course.format == format)
    }
}

#[must_use]
pub fn courses_for_language<'a>(
    courses: &'a [Course],
    language_name: &str,
    filter: CourseFilter,
) -> Vec<&'a Course> {
    courses
        .iter()
        .filter(|course| course.language == language_name && filter.matches(course))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: u64, language: &str, level: &str) -> Course {
        Course {
            id: Some(id),
            language: language.into(),
            level: level.into(),
            ..Course::default()
        }
        .with_derived_slug()
    }

    fn language(name: &str) -> Language {
        Language {
            name: name.into(),
            ..Language::default()
        }
    }

    #[test]
    fn course_route_resolves_exact_slug() {
        let courses = vec![course(7, "English", "A1"), course(8, "English", "A2")];
        let picked = resolve(
            &Route::course("English-A1-7"),
            &courses,
            &[],
            &Selection::none(),
        );
        assert_eq!(picked.course.as_ref(), Some(&courses[0]));

        let missing = resolve(&Route::course("nonexistent"), &courses, &[], &Selection::none());
        assert!(missing.course.is_none());
        let wrong_case = resolve(&Route::course("english-A1-7"), &courses, &[], &Selection::none());
        assert!(wrong_case.course.is_none());
    }

    #[test]
    fn language_route_matches_slugified_names() {
        let languages = vec![language("English"), language("German")];
        let german = resolve(
            &Route::LanguageList {
                slugified_name: "German".into(),
            },
            &[],
            &languages,
            &Selection::none(),
        );
        assert_eq!(german.language_name.as_deref(), Some("German"));

        let french = resolve(
            &Route::LanguageList {
                slugified_name: "french".into(),
            },
            &[],
            &languages,
            &Selection::none(),
        );
        assert!(french.language_name.is_none());
    }

    #[test]
    fn multi_word_language_resolves_from_hyphenated_slug() {
        let languages = vec![language("Brazilian Portuguese")];
        let picked = resolve(
            &Route::language("Brazilian Portuguese"),
            &[],
            &languages,
            &Selection::none(),
        );
        assert_eq!(picked.language_name.as_deref(), Some("Brazilian Portuguese"));
    }

    #[test]
    fn home_and_admin_clear_both_axes() {
        let courses = vec![course(1, "English", "A1")];
        let languages = vec![language("English")];
        let previous = Selection {
            course: Some(courses[0].clone()),
            language_name: Some("English".into()),
        };
        assert!(resolve(&Route::Home, &courses, &languages, &previous).is_empty());
        assert!(resolve(&Route::admin("/x"), &courses, &languages, &previous).is_empty());
    }

    #[test]
    fn course_route_keeps_previous_language_axis() {
        let courses = vec![course(2, "German", "B1")];
        let languages = vec![language("German")];
        let previous = Selection {
            course: None,
            language_name: Some("German".into()),
        };
        let next = resolve(&Route::course(&courses[0].slug), &courses, &languages, &previous);
        assert_eq!(next.course.as_ref(), Some(&courses[0]));
        assert_eq!(next.language_name.as_deref(), Some("German"));

        let gone = resolve(&Route::course(&courses[0].slug), &courses, &[], &previous);
        assert!(gone.language_name.is_none());
    }

    #[test]
    fn empty_collections_resolve_to_nothing() {
        let picked = resolve(&Route::course("English-A1-7"), &[], &[], &Selection::none());
        assert!(picked.is_empty());
    }

    #[test]
    fn filters_narrow_language_courses() {
        let mut online = course(3, "English", "B1");
        online.format = CourseFormat::Online;
        let mut private = course(4, "English", "B2");
        private.kind = CourseType::Private;
        let courses = vec![course(1, "English", "A1"), online, private, course(5, "German", "A1")];

        assert_eq!(courses_for_language(&courses, "English", CourseFilter::ALL).len(), 3);
        let online_only = CourseFilter {
            kind: None,
            format: Some(CourseFormat::Online),
        };
        let picked = courses_for_language(&courses, "English", online_only);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id, Some(3));
        let private_only = CourseFilter {
            kind: Some(CourseType::Private),
            format: None,
        };
        assert_eq!(courses_for_language(&courses, "English", private_only)[0].id, Some(4));
    }
}
