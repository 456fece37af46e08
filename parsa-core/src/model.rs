use serde::{Deserialize, Deserializer, Serialize};

use crate::slug::course_slug;

/// Delivery type of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CourseType {
    #[default]
    #[serde(rename = "گروهی")]
    Group,
    #[serde(rename = "خصوصی")]
    Private,
}

/// Where the classes take place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CourseFormat {
    #[default]
    #[serde(rename = "حضوری")]
    InPerson,
    #[serde(rename = "آنلاین")]
    Online,
}

/// Enrollment status shown on course cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CourseStatus {
    #[default]
    #[serde(rename = "در حال ثبت نام")]
    Enrolling,
    #[serde(rename = "تکمیل ظرفیت")]
    Full,
    #[serde(rename = "شروع به زودی")]
    StartingSoon,
}

impl CourseType {
    pub const ALL: [Self; 2] = [Self::Group, Self::Private];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Group => "گروهی",
            Self::Private => "خصوصی",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

impl CourseFormat {
    pub const ALL: [Self; 2] = [Self::InPerson, Self::Online];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InPerson => "حضوری",
            Self::Online => "آنلاین",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.label() == label)
    }
}

impl CourseStatus {
    pub const ALL: [Self; 3] = [Self::Enrolling, Self::Full, Self::StartingSoon];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Enrolling => "در حال ثبت نام",
            Self::Full => "تکمیل ظرفیت",
            Self::StartingSoon => "شروع به زودی",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

/// A course offered by the institute.
///
/// `id` is assigned by the backend; drafts created in the admin panel have none.
/// `slug` is never sent to or read from the backend. It is derived from
/// language, level and id by [`Course::with_derived_slug`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Course {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub language: String,
    pub level: String,
    #[serde(rename = "type")]
    pub kind: CourseType,
    pub format: CourseFormat,
    #[serde(default)]
    pub schedule: String,
    /// Price in the smallest currency unit (toman).
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: u64,
    #[serde(default)]
    pub status: CourseStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip)]
    pub slug: String,
}

impl Course {
    /// Recompute the slug from the current language, level and id.
    #[must_use]
    pub fn with_derived_slug(mut self) -> Self {
        self.slug = course_slug(&self.language, &self.level, self.id);
        self
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.status == CourseStatus::Full
    }
}

/// Prices arrive as integers, floats or numeric strings depending on who
/// last edited the record. Fractions are rounded; negatives become zero.
fn lenient_price<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Whole(u64),
        Fraction(f64),
        Text(String),
        Missing(()),
    }

    let amount = match RawPrice::deserialize(deserializer)? {
        RawPrice::Whole(value) => return Ok(value),
        RawPrice::Fraction(value) => value,
        RawPrice::Text(text) => text
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .map_err(<D::Error as serde::de::Error>::custom)?,
        RawPrice::Missing(()) => return Ok(0),
    };
    if !amount.is_finite() || amount <= 0.0 {
        return Ok(0);
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = amount.round() as u64;
    Ok(rounded)
}

/// A language the institute teaches.
///
/// Courses reference languages by `name`, so names are the join key.
/// `course_count` is derived client-side and any server-provided count is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Language {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(skip)]
    pub course_count: usize,
}

/// Contact details of a prospective student, persisted in the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserInfo {
    pub name: String,
    pub phone: String,
    pub city: String,
    #[serde(
        rename = "courseOfInterest",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub course_of_interest: Option<String>,
}

/// A lead registered through the consultation form, as listed in the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RegisteredUser {
    pub id: u64,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub city: String,
    #[serde(rename = "courseOfInterest", default)]
    pub course_of_interest: String,
    #[serde(default)]
    pub level: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: u64,
    #[serde(default)]
    pub description: String,
    /// ISO 8601 timestamp
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ClubStatus {
    #[default]
    #[serde(rename = "🟢فعال")]
    Active,
    #[serde(rename = "🔴غیرفعال")]
    Inactive,
}

impl ClubStatus {
    pub const ALL: [Self; 2] = [Self::Active, Self::Inactive];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "🟢فعال",
            Self::Inactive => "🔴غیرفعال",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

/// Member of the students' discount club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClubMember {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub phone_number: String,
    #[serde(default)]
    pub status: ClubStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magic_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_decodes_persian_enum_labels() {
        let json = r#"{
            "id": 7,
            "language": "English",
            "level": "A1",
            "type": "خصوصی",
            "format": "آنلاین",
            "schedule": "Sat 18:00",
            "price": 2500000,
            "status": "تکمیل ظرفیت",
            "description": "",
            "tags": ["speaking"]
        }"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.kind, CourseType::Private);
        assert_eq!(course.format, CourseFormat::Online);
        assert!(course.is_full());
        assert!(course.slug.is_empty());
        assert_eq!(course.with_derived_slug().slug, "English-A1-7");
    }

    #[test]
    fn course_price_tolerates_floats_and_text() {
        let decode = |price: &str| {
            let json = format!(
                r#"{{"language":"English","level":"A1","type":"گروهی","format":"حضوری","price":{price}}}"#
            );
            serde_json::from_str::<Course>(&json).map(|course| course.price)
        };
        assert_eq!(decode("1500000").unwrap(), 1_500_000);
        assert_eq!(decode("1500000.0").unwrap(), 1_500_000);
        assert_eq!(decode("1499999.6").unwrap(), 1_500_000);
        assert_eq!(decode(r#""2,000,000""#).unwrap(), 2_000_000);
        assert_eq!(decode("null").unwrap(), 0);
        assert_eq!(decode("-5").unwrap(), 0);
        assert!(decode(r#""free""#).is_err());
    }

    #[test]
    fn course_slug_is_not_serialized() {
        let course = Course {
            id: Some(3),
            language: "German".into(),
            level: "B1".into(),
            ..Course::default()
        }
        .with_derived_slug();
        let value = serde_json::to_value(&course).unwrap();
        assert!(value.get("slug").is_none());
        assert_eq!(value["type"], "گروهی");
    }

    #[test]
    fn language_ignores_server_course_count() {
        let json = r#"{"id": 1, "name": "German", "description": "", "image": "", "courseCount": 42}"#;
        let language: Language = serde_json::from_str(json).unwrap();
        assert_eq!(language.course_count, 0);
    }

    #[test]
    fn user_info_omits_missing_course_of_interest() {
        let info = UserInfo {
            name: "Sara".into(),
            phone: "09120000000".into(),
            city: "Shiraz".into(),
            course_of_interest: None,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("courseOfInterest"));
        let back: UserInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }

    #[test]
    fn labels_round_trip_through_lookup() {
        for kind in CourseType::ALL {
            assert_eq!(CourseType::from_label(kind.label()), Some(kind));
        }
        for status in CourseStatus::ALL {
            assert_eq!(CourseStatus::from_label(status.label()), Some(status));
        }
        assert_eq!(ClubStatus::from_label("unknown"), None);
    }
}
