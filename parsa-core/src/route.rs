//! Hash-fragment routing.
//!
//! The whole navigable state of the site lives in the URL fragment:
//! `#/`, `#/course/<slug>`, `#/language/<slug>` and `#/admin…`.
//! [`normalize`] turns whatever the address bar holds into a [`Route`]
//! and never fails; anything it does not recognise is [`Route::Home`].

pub const ADMIN_PREFIX: &str = "#/admin";
pub const COURSE_PREFIX: &str = "#/course/";
pub const LANGUAGE_PREFIX: &str = "#/language/";
pub const HOME_HASH: &str = "#/";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Home,
    CourseDetail {
        slug: String,
    },
    LanguageList {
        slugified_name: String,
    },
    /// `sub` is everything after `#/admin`, verbatim (e.g. `""`, `"/languages"`).
    Admin {
        sub: String,
    },
}

/// Normalize a raw location fragment (including the leading `#`) into a route.
///
/// Rules apply in priority order: admin prefix, course prefix, language prefix,
/// then home. Course and language remainders are percent-decoded; a malformed
/// escape sequence degrades the whole route to [`Route::Home`].
#[must_use]
pub fn normalize(hash: &str) -> Route {
    if let Some(sub) = hash.strip_prefix(ADMIN_PREFIX) {
        return Route::Admin {
            sub: sub.to_string(),
        };
    }
    if let Some(rest) = hash.strip_prefix(COURSE_PREFIX) {
        return percent_decode(rest).map_or(Route::Home, |slug| Route::CourseDetail { slug });
    }
    if let Some(rest) = hash.strip_prefix(LANGUAGE_PREFIX) {
        return percent_decode(rest).map_or(Route::Home, |slugified_name| {
            Route::LanguageList { slugified_name }
        });
    }
    Route::Home
}

impl Route {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin { .. })
    }

    /// Fragment that navigates to this route. `normalize(route.to_hash()) == route`.
    #[must_use]
    pub fn to_hash(&self) -> String {
        match self {
            Self::Home => HOME_HASH.to_string(),
            Self::CourseDetail { slug } => format!("{COURSE_PREFIX}{}", percent_encode(slug)),
            Self::LanguageList { slugified_name } => {
                format!("{LANGUAGE_PREFIX}{}", percent_encode(slugified_name))
            }
            Self::Admin { sub } => format!("{ADMIN_PREFIX}{sub}"),
        }
    }

    #[must_use]
    pub fn course(slug: &str) -> Self {
        Self::CourseDetail {
            slug: slug.to_string(),
        }
    }

    /// Route to the course list of a language, slugifying its display name.
    #[must_use]
    pub fn language(name: &str) -> Self {
        Self::LanguageList {
            slugified_name: crate::slug::language_slug(name),
        }
    }

    #[must_use]
    pub fn admin(sub: &str) -> Self {
        Self::Admin {
            sub: sub.to_string(),
        }
    }
}

/// Decode `%XX` escapes the way `decodeURIComponent` does.
///
/// Returns `None` for truncated or non-hex escapes and for byte sequences
/// that are not valid UTF-8. `+` is left alone.
#[must_use]
pub fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_value(*bytes.get(i + 1)?)?;
            let lo = hex_value(*bytes.get(i + 2)?)?;
            out.push((hi << 4) | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Encode everything outside the `encodeURIComponent` unreserved set.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(input.len());
    for &byte in input.as_bytes() {
        if byte.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&byte) {
            out.push(char::from(byte));
        } else {
            out.push('%');
            out.push(char::from(HEX[usize::from(byte >> 4)]));
            out.push(char::from(HEX[usize::from(byte & 0x0F)]));
        }
    }
    out
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_prefix_yields_decoded_slug() {
        assert_eq!(normalize("#/course/English-A1-7"), Route::course("English-A1-7"));
        let encoded = format!("#/course/{}", percent_encode("انگلیسی-A1-3"));
        assert!(encoded.starts_with("#/course/%D8%A7"));
        assert_eq!(normalize(&encoded), Route::course("انگلیسی-A1-3"));
    }

    #[test]
    fn admin_prefix_wins_and_keeps_sub_verbatim() {
        assert_eq!(normalize("#/admin"), Route::admin(""));
        assert_eq!(normalize("#/admin/anything"), Route::admin("/anything"));
        assert_eq!(normalize("#/admin/a%20b"), Route::admin("/a%20b"));
        assert!(normalize("#/admin/course/x").is_admin());
    }

    #[test]
    fn unknown_and_empty_fragments_are_home() {
        for hash in ["", "#", "#/", "#/unknown", "/course/x", "#/courses"] {
            assert_eq!(normalize(hash), Route::Home, "hash {hash:?}");
        }
    }

    #[test]
    fn language_prefix_decodes_name() {
        assert_eq!(
            normalize("#/language/German"),
            Route::LanguageList {
                slugified_name: "German".into()
            }
        );
        assert_eq!(
            normalize("#/language/Brazilian%20Portuguese"),
            Route::LanguageList {
                slugified_name: "Brazilian Portuguese".into()
            }
        );
    }

    #[test]
    fn malformed_escapes_degrade_to_home() {
        assert_eq!(normalize("#/course/%E0%A4"), Route::Home);
        assert_eq!(normalize("#/course/%zz"), Route::Home);
        assert_eq!(normalize("#/language/abc%"), Route::Home);
        assert_eq!(normalize("#/course/%+f"), Route::Home);
    }

    #[test]
    fn normalize_is_idempotent() {
        for hash in ["#/course/x-1", "#/admin/club", "#/language/%D8%A2", "junk"] {
            assert_eq!(normalize(hash), normalize(hash));
        }
    }

    #[test]
    fn to_hash_round_trips_through_normalize() {
        let routes = [
            Route::Home,
            Route::course("فرانسه-B1-4"),
            Route::language("Brazilian Portuguese"),
            Route::admin("/languages"),
        ];
        for route in routes {
            assert_eq!(normalize(&route.to_hash()), route);
        }
    }

    #[test]
    fn percent_encode_leaves_unreserved_characters() {
        assert_eq!(percent_encode("A-z_0.!~*'()"), "A-z_0.!~*'()");
        assert_eq!(percent_encode("a b"), "a%20b");
        assert_eq!(percent_encode("آ"), "%D8%A2");
    }
}
