mod handlers;
mod screens;

pub use handlers::{AdminHandlers, SiteHandlers};

use parsa_core::{LoadStatus, RouterAction, ViewState};
use std::rc::Rc;
use yew::prelude::*;

use crate::a11y::{STATUS_REGION_ID, visible_focus_css};
use crate::components::club::ClubModal;
use crate::components::consultation::ConsultationModal;
use crate::components::course_modal::CourseModal;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::profile::{ProfileModal, UserInfoModal};

#[derive(Properties, PartialEq, Clone)]
pub struct SiteProps {
    pub state: Rc<ViewState>,
    pub dispatch: Callback<RouterAction>,
    pub lang: String,
    pub on_lang_change: Callback<String>,
}

/// Site shell: header, the current screen and whichever overlays the gate lets through.
#[function_component(Site)]
pub fn site(p: &SiteProps) -> Html {
    let state = &p.state;
    let handlers = SiteHandlers::new(state, &p.dispatch);
    let main_view = screens::render_screen(state, &handlers);
    let overlays = render_overlays(state, &handlers);

    html! {
        <>
            <Header
                on_lang_change={p.on_lang_change.clone()}
                current_lang={p.lang.clone()}
                on_open_profile={handlers.open_profile.clone()}
                on_open_club={handlers.open_club.clone()}
                show_actions={!state.in_admin_area()}
                course_count={(state.load == LoadStatus::Ready).then_some(state.catalog.courses.len())}
            />
            <main id="main" role="main" aria-busy={state.reloading.then_some("true")}>
                <style>{ visible_focus_css() }</style>
                { main_view }
            </main>
            { overlays }
            <div id={STATUS_REGION_ID} class="sr-only" role="status" aria-live="polite"></div>
            <Footer />
        </>
    }
}

fn render_overlays(state: &ViewState, handlers: &SiteHandlers) -> Html {
    let visible = state.visible_overlays();
    html! {
        <>
            if let Some(course) = visible.course_detail {
                <CourseModal
                    course={course.clone()}
                    on_close={handlers.close_course.clone()}
                    on_consult={handlers.open_consultation.clone()}
                />
            }
            if let Some(course) = visible.consultation {
                <ConsultationModal
                    course={course.clone()}
                    profile={state.profile.clone()}
                    on_close={handlers.close_consultation.clone()}
                    on_submit={handlers.consultation_submit.clone()}
                />
            }
            if visible.user_info {
                <UserInfoModal on_close={handlers.close_user_info.clone()} on_save={handlers.save_profile.clone()} />
            }
            if visible.profile {
                <ProfileModal
                    profile={state.profile.clone()}
                    on_close={handlers.close_profile.clone()}
                    on_save={handlers.save_profile.clone()}
                />
            }
            if visible.club {
                <ClubModal on_close={handlers.close_club.clone()} on_submit={handlers.club_submit.clone()} />
            }
        </>
    }
}
