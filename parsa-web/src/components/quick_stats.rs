use crate::i18n::{fmt_count, t};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub language_count: usize,
    pub course_count: usize,
}

/// Catalog totals shown above the language grid and course lists.
#[function_component(QuickStats)]
pub fn quick_stats(p: &Props) -> Html {
    html! {
        <section class="quick-stats" aria-label={t("stats.title")}>
            <dl class="quick-stats__grid">
                <div class="quick-stats__item">
                    <dt>{ t("stats.languages") }</dt>
                    <dd class="quick-stats__value">{ format!("{}+", fmt_count(p.language_count)) }</dd>
                </div>
                <div class="quick-stats__item">
                    <dt>{ t("stats.courses") }</dt>
                    <dd class="quick-stats__value">{ fmt_count(p.course_count) }</dd>
                </div>
            </dl>
        </section>
    }
}
