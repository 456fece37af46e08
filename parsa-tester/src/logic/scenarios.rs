//! Named end-to-end scenarios.
//!
//! Each scenario boots a fresh [`FixtureBackend`], drives [`ViewState`] through
//! the same actions the browser shell dispatches, and checks what the page
//! would show after every step.

use std::collections::HashSet;

use anyhow::{Context, Result, bail, ensure};
use parsa_core::{
    AdminEditor, AdminTab, Catalog, CatalogMutation, ClubCodeRequest, ClubFlow, ClubMode,
    ClubRegistration, ClubRequest, ClubVerification, ConsultationRequest, ContactDetails, Course,
    CourseFilter, CourseType, LeadApi, LoadStatus, MemoryStore, MutationOutcome, Route,
    RouterAction, Screen, UserInfo, ViewState, admin_token, apply_catalog_mutation, load_catalog,
    load_profile, login, logout, normalize, save_profile, submit_club_request,
};

use super::backend::{FIXTURE_OTP, Faults, FixtureBackend, discount_code_for};
use crate::common::Fixture;

#[derive(Debug, Clone, Copy)]
pub struct ScenarioCtx<'a> {
    pub fixture: &'a Fixture,
    pub verbose: bool,
}

impl ScenarioCtx<'_> {
    fn step(&self, message: &str) {
        log::debug!("{message}");
        if self.verbose {
            println!("   · {message}");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Smoke,
    DeepLink,
    LanguageBrowse,
    OverlayGate,
    AdminSession,
    MutationRejected,
    ReloadFailure,
    FirstLoadFailure,
    Consultation,
    Club,
}

impl Scenario {
    pub const ALL: [Self; 10] = [
        Self::Smoke,
        Self::DeepLink,
        Self::LanguageBrowse,
        Self::OverlayGate,
        Self::AdminSession,
        Self::MutationRejected,
        Self::ReloadFailure,
        Self::FirstLoadFailure,
        Self::Consultation,
        Self::Club,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Smoke => "smoke",
            Self::DeepLink => "deep-link",
            Self::LanguageBrowse => "language-browse",
            Self::OverlayGate => "overlay-gate",
            Self::AdminSession => "admin-session",
            Self::MutationRejected => "mutation-rejected",
            Self::ReloadFailure => "reload-failure",
            Self::FirstLoadFailure => "first-load-failure",
            Self::Consultation => "consultation",
            Self::Club => "club",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Smoke => "Load the catalog and check derived slugs and course counts",
            Self::DeepLink => "Open every course by URL before and after the data arrives",
            Self::LanguageBrowse => "Walk every language list and apply type filters",
            Self::OverlayGate => "Overlays never render inside the admin area",
            Self::AdminSession => "Log in, switch tabs, open an editor, log out",
            Self::MutationRejected => "A refused edit keeps the editor open and skips the reload",
            Self::ReloadFailure => "A failed reload after an edit keeps the previous catalog",
            Self::FirstLoadFailure => "A failed first load shows the error and recovers on retry",
            Self::Consultation => "Request a consultation and persist the visitor profile",
            Self::Club => "Register, request a code and redeem a discount",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scenario| scenario.key() == key)
    }

    /// # Errors
    ///
    /// Returns the first expectation that did not hold, with context.
    pub async fn run(self, ctx: &ScenarioCtx<'_>) -> Result<()> {
        let api = FixtureBackend::new(ctx.fixture);
        match self {
            Self::Smoke => smoke(ctx, &api).await,
            Self::DeepLink => deep_link(ctx, &api).await,
            Self::LanguageBrowse => language_browse(ctx, &api).await,
            Self::OverlayGate => overlay_gate(ctx, &api).await,
            Self::AdminSession => admin_session(ctx, &api).await,
            Self::MutationRejected => mutation_rejected(ctx, &api).await,
            Self::ReloadFailure => reload_failure(ctx, &api).await,
            Self::FirstLoadFailure => first_load_failure(ctx, &api).await,
            Self::Consultation => consultation(ctx, &api).await,
            Self::Club => club(ctx, &api).await,
        }
    }
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    Scenario::ALL
        .into_iter()
        .map(|scenario| (scenario.key(), scenario.description()))
        .collect()
}

/// Mount at `hash` and complete the first catalog load.
async fn booted(api: &FixtureBackend, hash: &str, admin_session: bool) -> Result<ViewState> {
    let state = ViewState::new(hash, None, admin_session).reduce(RouterAction::LoadStarted);
    let catalog = load_catalog(api).await.context("initial catalog load")?;
    Ok(state.reduce(RouterAction::CatalogLoaded(catalog)))
}

fn derived_catalog(fixture: &Fixture) -> Catalog {
    Catalog::from_records(fixture.courses.clone(), fixture.languages.clone())
}

fn first_course(state: &ViewState) -> Result<Course> {
    state
        .catalog
        .courses
        .first()
        .cloned()
        .context("fixture has no courses")
}

async fn smoke(ctx: &ScenarioCtx<'_>, api: &FixtureBackend) -> Result<()> {
    let mounting = ViewState::new("", None, false);
    ensure!(mounting.screen() == Screen::Loading, "mount should show the loading screen");

    let state = booted(api, "", false).await?;
    ctx.step("catalog loaded");
    ensure!(state.screen() == Screen::Main, "expected main screen, got {:?}", state.screen());
    ensure!(state.route == Route::Home, "empty hash should be home");
    ensure!(
        state.catalog.courses.len() == ctx.fixture.courses.len(),
        "course count mismatch"
    );
    ensure!(
        state.catalog.languages.len() == ctx.fixture.languages.len(),
        "language count mismatch"
    );

    for language in &state.catalog.languages {
        let expected = ctx
            .fixture
            .courses
            .iter()
            .filter(|course| course.language == language.name)
            .count();
        ensure!(
            language.course_count == expected,
            "{} should count {expected} courses, counted {}",
            language.name,
            language.course_count
        );
    }

    let mut slugs = HashSet::new();
    for course in &state.catalog.courses {
        ensure!(!course.slug.is_empty(), "course {:?} has no slug", course.id);
        ensure!(!course.slug.contains(' '), "slug {:?} contains a space", course.slug);
        ensure!(slugs.insert(course.slug.as_str()), "duplicate slug {:?}", course.slug);
    }
    ctx.step(&format!("{} unique slugs", slugs.len()));
    Ok(())
}

async fn deep_link(ctx: &ScenarioCtx<'_>, api: &FixtureBackend) -> Result<()> {
    for course in derived_catalog(ctx.fixture).courses {
        let hash = Route::course(&course.slug).to_hash();
        ensure!(
            normalize(&hash) == Route::course(&course.slug),
            "{hash} does not normalize back to its course"
        );

        let waiting = ViewState::new(&hash, None, false);
        ensure!(
            waiting.selection.course.is_none(),
            "{hash} resolved before any data arrived"
        );
        let state = booted(api, &hash, false).await?;
        let selected = state
            .visible_overlays()
            .course_detail
            .with_context(|| format!("{hash} did not open the course dialog"))?;
        ensure!(selected.slug == course.slug, "{hash} opened {}", selected.slug);
        ctx.step(&format!("{hash} -> {}", selected.slug));
    }

    let state = booted(api, "#/course/no-such-course", false).await?;
    ensure!(
        state.visible_overlays().course_detail.is_none(),
        "unknown slug should open nothing"
    );
    ensure!(state.screen() == Screen::Main, "unknown slug should still show the site");

    let state = booted(api, "#/course/%E0%A4%A", false).await?;
    ensure!(state.route == Route::Home, "malformed escape should degrade to home");
    Ok(())
}

async fn language_browse(ctx: &ScenarioCtx<'_>, api: &FixtureBackend) -> Result<()> {
    let mut state = booted(api, "#/", false).await?;
    let languages = state.catalog.languages.clone();

    for language in &languages {
        state = state.reduce(RouterAction::HashChanged(Route::language(&language.name).to_hash()));
        ensure!(
            state.selection.language_name.as_deref() == Some(language.name.as_str()),
            "{} was not selected",
            language.name
        );
        let listed = state.visible_courses().len();
        ensure!(
            listed == language.course_count,
            "{} lists {listed} courses, expected {}",
            language.name,
            language.course_count
        );
        ctx.step(&format!("{}: {listed} courses", language.name));
    }

    let populated = ctx.fixture.populated_languages();
    let (Some(first), Some(second)) = (populated.first(), populated.get(1)) else {
        bail!("fixture needs two languages with courses");
    };

    state = state.reduce(RouterAction::HashChanged(Route::language(&first.name).to_hash()));
    let private = CourseFilter {
        kind: Some(CourseType::Private),
        format: None,
    };
    state = state.reduce(RouterAction::SetFilter(private));
    ensure!(
        state.visible_courses().iter().all(|c| c.kind == CourseType::Private),
        "filter let a group course through"
    );

    let course = state
        .catalog
        .courses
        .iter()
        .find(|c| c.language == first.name)
        .cloned()
        .context("populated language without courses")?;
    state = state.reduce(RouterAction::HashChanged(Route::course(&course.slug).to_hash()));
    ensure!(
        state.selection.language_name.as_deref() == Some(first.name.as_str()),
        "opening a course dropped the language list underneath"
    );
    ensure!(state.filter == private, "opening a course reset the filter");

    state = state.reduce(RouterAction::HashChanged(Route::language(&second.name).to_hash()));
    ensure!(state.filter == CourseFilter::ALL, "switching language kept the old filter");
    ctx.step("filter resets on language change");
    Ok(())
}

async fn overlay_gate(ctx: &ScenarioCtx<'_>, api: &FixtureBackend) -> Result<()> {
    let state = booted(api, "#/", false).await?;
    let course = first_course(&state)?;
    let state = state
        .reduce(RouterAction::OpenConsultation(course.slug.clone()))
        .reduce(RouterAction::OpenClub)
        .reduce(RouterAction::OpenProfile);

    let visible = state.visible_overlays();
    ensure!(visible.consultation.is_some(), "consultation did not open");
    ensure!(visible.club, "club did not open");
    ensure!(visible.user_info, "profile without data should ask for contact info");
    ensure!(!visible.profile, "profile summary opened without a profile");

    let state = state.reduce(RouterAction::HashChanged("#/admin".into()));
    ctx.step("entered admin area with three overlays open");
    ensure!(
        state.visible_overlays() == parsa_core::VisibleOverlays::default(),
        "an overlay rendered inside the admin area"
    );
    ensure!(!state.overlays.any_open(), "overlay flags survived entering admin");

    let state = state
        .reduce(RouterAction::OpenClub)
        .reduce(RouterAction::OpenConsultation(course.slug.clone()));
    ensure!(!state.overlays.any_open(), "overlays opened from inside admin");

    let state = state.reduce(RouterAction::HashChanged(Route::course(&course.slug).to_hash()));
    let visible = state.visible_overlays();
    ensure!(visible.course_detail.is_some(), "course route did not open its dialog");
    ensure!(
        visible.consultation.is_none() && !visible.club && !visible.user_info,
        "stale overlays came back after leaving admin"
    );
    Ok(())
}

async fn admin_session(ctx: &ScenarioCtx<'_>, api: &FixtureBackend) -> Result<()> {
    let session = MemoryStore::default();
    let creds = &ctx.fixture.admin;
    let mut state = booted(api, "#/admin", false).await?;
    ensure!(state.screen() == Screen::AdminLogin, "expected login screen");

    ensure!(
        login(api, &session, &creds.username, "not-the-password").await.is_err(),
        "wrong password was accepted"
    );
    ensure!(admin_token(&session).is_none(), "a refused login stored a token");

    login(api, &session, &creds.username, &creds.password)
        .await
        .context("fixture credentials were refused")?;
    ensure!(admin_token(&session).is_some(), "login did not store a token");
    state = state.reduce(RouterAction::AdminLoggedIn);
    ensure!(
        state.screen() == Screen::AdminPanel(AdminTab::Courses),
        "bare admin route should open the courses tab"
    );
    ctx.step("logged in");

    for tab in AdminTab::ALL {
        state = state.reduce(RouterAction::HashChanged(Route::admin(tab.sub_path()).to_hash()));
        ensure!(
            state.screen() == Screen::AdminPanel(tab),
            "{} opened {:?}",
            tab.sub_path(),
            state.screen()
        );
    }

    state = state.reduce(RouterAction::OpenEditor(AdminEditor::new_course()));
    ensure!(state.editor.is_some(), "editor did not open");
    state = state.reduce(RouterAction::HashChanged("#/".into()));
    ensure!(state.editor.is_none(), "editor survived leaving the admin area");
    state = state.reduce(RouterAction::OpenEditor(AdminEditor::new_course()));
    ensure!(state.editor.is_none(), "editor opened on the public site");

    logout(&session);
    state = state
        .reduce(RouterAction::AdminLoggedOut)
        .reduce(RouterAction::HashChanged("#/admin".into()));
    ensure!(admin_token(&session).is_none(), "logout kept the token");
    ensure!(state.screen() == Screen::AdminLogin, "logout did not return to the login screen");
    Ok(())
}

async fn admin_with_editor(api: &FixtureBackend) -> Result<ViewState> {
    let state = booted(api, "#/admin/courses", true).await?;
    let course = first_course(&state)?;
    Ok(state.reduce(RouterAction::OpenEditor(AdminEditor::edit_course(&course))))
}

async fn mutation_rejected(ctx: &ScenarioCtx<'_>, api: &FixtureBackend) -> Result<()> {
    let state = admin_with_editor(api).await?;
    ensure!(state.editor.is_some(), "editor did not open");
    let course = first_course(&state)?;
    let id = course.id.context("fixture course without id")?;
    let before = state.catalog.clone();
    let fetches = api.course_fetches();

    api.set_faults(Faults {
        fail_reads: false,
        refuse_writes: true,
    });
    let outcome = apply_catalog_mutation(api, &CatalogMutation::DeleteCourse(id)).await;
    ensure!(
        matches!(outcome, MutationOutcome::Rejected(_)),
        "refused delete reported {outcome:?}"
    );
    ensure!(api.course_fetches() == fetches, "a refused write still reloaded");
    let state = state.reduce(RouterAction::CatalogMutated(outcome));
    ensure!(state.editor.is_some(), "refused edit closed the editor");
    ensure!(state.catalog == before, "refused edit changed the catalog");
    ctx.step("refusal kept the editor open");

    api.set_faults(Faults::NONE);
    let outcome = apply_catalog_mutation(api, &CatalogMutation::DeleteCourse(id)).await;
    ensure!(
        matches!(outcome, MutationOutcome::Applied(_)),
        "retry reported {outcome:?}"
    );
    ensure!(api.course_fetches() == fetches + 1, "applied edit did not reload once");
    let state = state.reduce(RouterAction::CatalogMutated(outcome));
    ensure!(state.editor.is_none(), "applied edit left the editor open");
    ensure!(
        state.catalog.courses.len() + 1 == before.courses.len(),
        "deleted course is still listed"
    );
    let language = before
        .language(&course.language)
        .context("course language missing")?;
    let after = state
        .catalog
        .language(&course.language)
        .context("language vanished with its course")?;
    ensure!(
        after.course_count + 1 == language.course_count,
        "course count was not re-derived"
    );
    Ok(())
}

async fn reload_failure(ctx: &ScenarioCtx<'_>, api: &FixtureBackend) -> Result<()> {
    let state = admin_with_editor(api).await?;
    let before = state.catalog.clone();
    let language = before
        .languages
        .first()
        .context("fixture has no languages")?
        .name
        .clone();
    let draft = Course {
        language: language.clone(),
        level: "C1".into(),
        price: 7_000_000,
        ..Course::default()
    };

    api.set_faults(Faults {
        fail_reads: true,
        refuse_writes: false,
    });
    let outcome = apply_catalog_mutation(api, &CatalogMutation::SaveCourse(draft)).await;
    ensure!(
        matches!(outcome, MutationOutcome::ReloadFailed(_)),
        "reload failure reported {outcome:?}"
    );
    let state = state.reduce(RouterAction::CatalogMutated(outcome));
    ensure!(state.load == LoadStatus::Ready, "reload failure replaced the page with an error");
    ensure!(!state.reloading, "reload failure left the busy flag set");
    ensure!(state.catalog == before, "reload failure dropped the previous data");
    ensure!(state.editor.is_none(), "editor stayed open after the write landed");
    ctx.step("previous catalog kept");

    api.set_faults(Faults::NONE);
    let state = state.reduce(RouterAction::LoadStarted);
    ensure!(state.reloading, "manual reload did not mark the page busy");
    ensure!(state.screen() != Screen::Loading, "reload blanked the page");
    let catalog = load_catalog(api).await.context("manual reload")?;
    let state = state.reduce(RouterAction::CatalogLoaded(catalog));
    ensure!(
        state.catalog.courses.len() == before.courses.len() + 1,
        "created course missing after reload"
    );
    ensure!(
        state
            .catalog
            .courses
            .iter()
            .any(|c| c.language == language && c.level == "C1" && c.id.is_some()),
        "created course has no server id"
    );
    Ok(())
}

async fn first_load_failure(ctx: &ScenarioCtx<'_>, api: &FixtureBackend) -> Result<()> {
    let target = ctx
        .fixture
        .populated_languages()
        .first()
        .map(|language| language.name.clone())
        .context("fixture has no populated language")?;
    let hash = Route::language(&target).to_hash();

    api.set_faults(Faults {
        fail_reads: true,
        refuse_writes: false,
    });
    let state = ViewState::new(&hash, None, false).reduce(RouterAction::LoadStarted);
    let Err(err) = load_catalog(api).await else {
        bail!("load succeeded with reads disabled");
    };
    let state = state.reduce(RouterAction::LoadFailed(err.to_string()));
    let Screen::LoadFailed(message) = state.screen() else {
        bail!("expected the load error screen, got {:?}", state.screen());
    };
    ensure!(message.contains("unreachable"), "error message lost: {message}");
    ctx.step("first load failed as expected");

    api.set_faults(Faults::NONE);
    let state = state.reduce(RouterAction::LoadStarted);
    ensure!(state.screen() == Screen::Loading, "retry did not show the loading screen");
    let catalog = load_catalog(api).await.context("retry")?;
    let state = state.reduce(RouterAction::CatalogLoaded(catalog));
    ensure!(state.screen() == Screen::Main, "retry did not recover");
    ensure!(
        state.selection.language_name.as_deref() == Some(target.as_str()),
        "deep link was lost across the retry"
    );
    Ok(())
}

async fn consultation(ctx: &ScenarioCtx<'_>, api: &FixtureBackend) -> Result<()> {
    let store = MemoryStore::default();
    let state = booted(api, "#/", false).await?;
    let course = first_course(&state)?;
    let leads_before = api.leads().len();

    let state = state.reduce(RouterAction::OpenConsultation(course.slug.clone()));
    let shown = state
        .visible_overlays()
        .consultation
        .context("consultation overlay did not resolve its course")?;
    ensure!(shown.slug == course.slug, "consultation opened for {}", shown.slug);

    let raw = ContactDetails {
        name: "  نگار احمدی ".into(),
        phone: "۰۹۱۲-۳۴۵-۶۷۸۹".into(),
        city: "اصفهان".into(),
    };
    let contact = raw.validated().context("valid contact was refused")?;
    ensure!(contact.phone == "09123456789", "phone not normalized: {}", contact.phone);

    let profile = UserInfo::for_consultation(state.profile.as_ref(), contact, &course);
    save_profile(&store, &profile).context("saving profile")?;
    api.submit_consultation(&ConsultationRequest::new(&profile, &course))
        .await
        .context("lead submission")?;
    let leads = api.leads();
    ensure!(leads.len() == leads_before + 1, "lead was not recorded");
    let lead = leads.last().context("lead list empty")?;
    ensure!(lead.course_of_interest == course.language, "lead lost its course");
    ensure!(lead.price == course.price, "lead lost the price");
    ctx.step("lead recorded");

    let state = state.reduce(RouterAction::ConsultationSubmitted(profile.clone()));
    ensure!(state.overlays.consultation.is_none(), "consultation stayed open");
    ensure!(state.profile.as_ref() == Some(&profile), "profile not kept in state");
    ensure!(load_profile(&store) == Some(profile), "profile not persisted");

    let state = state.reduce(RouterAction::OpenProfile);
    ensure!(
        state.overlays.profile && !state.overlays.user_info,
        "known visitor should see the profile summary"
    );
    Ok(())
}

async fn club(ctx: &ScenarioCtx<'_>, api: &FixtureBackend) -> Result<()> {
    let mobile = "09127654321".to_string();
    let flow = ClubFlow::new().switch_to(ClubMode::Register);

    let flow = submit_club_request(
        api,
        flow,
        &ClubRequest::Register(ClubRegistration {
            first_name: "رضا".into(),
            last_name: "نوری".into(),
            mobile: mobile.clone(),
        }),
    )
    .await;
    ensure!(flow.mode == ClubMode::Login, "registration did not return to login");
    ensure!(
        api.members().iter().any(|m| m.phone_number == mobile),
        "member was not created"
    );

    let again = submit_club_request(
        api,
        ClubFlow::new().switch_to(ClubMode::Register),
        &ClubRequest::Register(ClubRegistration {
            first_name: "رضا".into(),
            last_name: "نوری".into(),
            mobile: mobile.clone(),
        }),
    )
    .await;
    ensure!(
        again.mode == ClubMode::Register && again.message.is_some(),
        "duplicate registration should stay on the form with an error"
    );
    ctx.step("registered");

    let flow = submit_club_request(
        api,
        flow,
        &ClubRequest::RequestCode(ClubCodeRequest {
            mobile: mobile.clone(),
        }),
    )
    .await;
    ensure!(flow.mode == ClubMode::Verify, "code request did not advance");
    ensure!(flow.mobile == mobile, "verify form lost the mobile number");

    let flow = submit_club_request(
        api,
        flow,
        &ClubRequest::Verify(ClubVerification {
            mobile: mobile.clone(),
            code: "0000".into(),
        }),
    )
    .await;
    ensure!(flow.mode == ClubMode::Verify, "wrong code left the verify form");
    ensure!(flow.message.is_some(), "wrong code showed no error");

    let flow = submit_club_request(
        api,
        flow,
        &ClubRequest::Verify(ClubVerification {
            mobile: mobile.clone(),
            code: FIXTURE_OTP.into(),
        }),
    )
    .await;
    let expected = discount_code_for(&mobile);
    ensure!(
        flow.discount_code() == Some(expected.as_str()),
        "expected discount {expected}, got {:?}",
        flow.mode
    );
    ctx.step(&format!("discount {expected}"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for scenario in Scenario::ALL {
            assert_eq!(Scenario::from_key(scenario.key()), Some(scenario));
        }
        assert_eq!(Scenario::from_key("nope"), None);
        assert_eq!(list_scenarios().len(), Scenario::ALL.len());
    }

    #[tokio::test]
    async fn every_scenario_passes_on_the_builtin_fixture() {
        let fixture = Fixture::builtin().unwrap();
        let ctx = ScenarioCtx {
            fixture: &fixture,
            verbose: false,
        };
        for scenario in Scenario::ALL {
            if let Err(err) = scenario.run(&ctx).await {
                panic!("{} failed: {err:#}", scenario.key());
            }
        }
    }
}
