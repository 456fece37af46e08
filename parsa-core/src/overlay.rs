//! Modal visibility gate for the public site's transient overlays.

use crate::model::Course;
use crate::selection::find_course;

/// Open/closed flags of every transient overlay on the public site.
///
/// The course-detail overlay has no flag of its own: it is open exactly when
/// the route selects a course.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Overlays {
    /// Slug of the course a consultation is being requested for.
    pub consultation: Option<String>,
    pub profile: bool,
    /// First-time contact capture shown before the profile exists.
    pub user_info: bool,
    pub club: bool,
}

impl Overlays {
    #[must_use]
    pub const fn closed() -> Self {
        Self {
            consultation: None,
            profile: false,
            user_info: false,
            club: false,
        }
    }

    #[must_use]
    pub const fn any_open(&self) -> bool {
        self.consultation.is_some() || self.profile || self.user_info || self.club
    }

    /// Clear every flag. Entering the admin area calls this so nothing
    /// stale survives a later return to the public site.
    pub fn close_all(&mut self) {
        *self = Self::closed();
    }
}

/// What the public site should actually render this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleOverlays<'a> {
    pub course_detail: Option<&'a Course>,
    pub consultation: Option<&'a Course>,
    pub profile: bool,
    pub user_info: bool,
    pub club: bool,
}

impl<'a> VisibleOverlays<'a> {
    /// Apply the gate: inside the admin area nothing is visible, whatever the flags say.
    #[must_use]
    pub fn gate(
        in_admin_area: bool,
        overlays: &Overlays,
        selected_course: Option<&'a Course>,
        courses: &'a [Course],
    ) -> Self {
        if in_admin_area {
            return Self::default();
        }
        Self {
            course_detail: selected_course,
            consultation: overlays
                .consultation
                .as_deref()
                .and_then(|slug| find_course(courses, slug)),
            profile: overlays.profile,
            user_info: overlays.user_info,
            club: overlays.club,
        }
    }

    #[must_use]
    pub const fn any(&self) -> bool {
        self.course_detail.is_some()
            || self.consultation.is_some()
            || self.profile
            || self.user_info
            || self.club
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_open() -> Overlays {
        Overlays {
            consultation: Some("English-A1-1".into()),
            profile: true,
            user_info: true,
            club: true,
        }
    }

    #[test]
    fn close_all_resets_every_flag() {
        let mut overlays = all_open();
        assert!(overlays.any_open());
        overlays.close_all();
        assert_eq!(overlays, Overlays::closed());
        assert!(!overlays.any_open());
    }

    #[test]
    fn gate_hides_everything_in_admin_area() {
        let course = Course {
            id: Some(1),
            language: "English".into(),
            level: "A1".into(),
            ..Course::default()
        }
        .with_derived_slug();
        let courses = vec![course];
        let visible = VisibleOverlays::gate(true, &all_open(), courses.first(), &courses);
        assert!(!visible.any());

        let public = VisibleOverlays::gate(false, &all_open(), courses.first(), &courses);
        assert_eq!(public.course_detail, courses.first());
        assert_eq!(public.consultation, courses.first());
        assert!(public.profile && public.user_info && public.club);
    }

    #[test]
    fn consultation_for_unknown_course_stays_hidden() {
        let overlays = Overlays {
            consultation: Some("gone".into()),
            ..Overlays::closed()
        };
        let visible = VisibleOverlays::gate(false, &overlays, None, &[]);
        assert!(visible.consultation.is_none());
    }
}
