//! Slug derivation shared by the catalog loader, the selection resolver and
//! every link the UI builds. Both sides of a deep-link comparison must go
//! through these functions or links silently stop resolving.

/// Separator substituted for every whitespace character.
pub const SLUG_SEPARATOR: char = '-';

/// Replace each whitespace character with [`SLUG_SEPARATOR`]. Nothing else is touched,
/// so case and non-ASCII letters survive as-is.
#[must_use]
pub fn slugify(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_whitespace() { SLUG_SEPARATOR } else { c })
        .collect()
}

/// Slug of a course: `slugify(language-level-id)`.
///
/// Unsaved drafts have no id yet and get `language-level`.
#[must_use]
pub fn course_slug(language: &str, level: &str, id: Option<u64>) -> String {
    match id {
        Some(id) => slugify(&format!("{language}-{level}-{id}")),
        None => slugify(&format!("{language}-{level}")),
    }
}

/// Slug used in `#/language/<slug>` links.
#[must_use]
pub fn language_slug(name: &str) -> String {
    slugify(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_replaces_each_whitespace_char() {
        assert_eq!(slugify("English  Kids"), "English--Kids");
        assert_eq!(slugify("a\tb\nc"), "a-b-c");
        assert_eq!(slugify("German"), "German");
    }

    #[test]
    fn course_slug_matches_documented_example() {
        assert_eq!(course_slug("English", "A1", Some(7)), "English-A1-7");
        assert_eq!(
            course_slug("انگلیسی", "مقدماتی A1", Some(12)),
            "انگلیسی-مقدماتی-A1-12"
        );
    }

    #[test]
    fn course_slug_without_id_drops_suffix() {
        assert_eq!(course_slug("French", "B2 Plus", None), "French-B2-Plus");
    }

    #[test]
    fn language_slug_keeps_case() {
        assert_eq!(language_slug("Brazilian Portuguese"), "Brazilian-Portuguese");
    }
}
