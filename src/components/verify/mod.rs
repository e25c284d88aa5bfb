//! Public certificate verification page.
//!
//! Visitors search by holder name, serial number, or both, and see one card
//! per matching certificate with its validity.

use azcert_core::search::{CertificateView, SearchMode};
use chrono::Utc;
use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::SEARCH_THROTTLE_MS;
use crate::utils::Throttle;

stylance::import_crate_style!(css, "src/components/verify/verify.module.css");

const EMPTY_QUERY: &str = "Please enter a search value";

fn placeholder(mode: SearchMode) -> &'static str {
    match mode {
        SearchMode::Name => "Certificate holder name",
        SearchMode::Serial => "Serial number (e.g. CERT-12345)",
        SearchMode::All => "Name or serial number",
    }
}

#[component]
pub fn VerifyPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let (query, set_query) = signal(String::new());
    let (mode, set_mode) = signal(SearchMode::default());
    let (loading, set_loading) = signal(false);
    // None until the first search completes
    let (results, set_results) = signal::<Option<Vec<CertificateView>>>(None);
    let throttle = StoredValue::new(Throttle::new(SEARCH_THROTTLE_MS));

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let now_ms = js_sys::Date::now();
        if !throttle.try_update_value(|t| t.allow(now_ms)).unwrap_or(false) {
            return;
        }

        let api = ctx.api();
        let query = query.get_untracked();
        let mode = mode.get_untracked();
        set_loading.set(true);
        ctx.dismiss();

        spawn_local(async move {
            match api.verify(&query, mode).await {
                Some(records) => {
                    let now = Utc::now();
                    let views = records
                        .iter()
                        .map(|r| CertificateView::from_record(r, now))
                        .collect();
                    set_results.set(Some(views));
                }
                None => ctx.error(EMPTY_QUERY),
            }
            set_loading.set(false);
        });
    };

    view! {
        <section class=css::page>
            <div class=css::intro>
                <Icon icon=ic::VERIFIED />
                <h1>"Certificate Verification"</h1>
                <p>"Confirm that an inspection certificate was issued by AZ International."</p>
            </div>

            <form class=css::searchForm on:submit=on_submit>
                <div class=css::modes role="radiogroup">
                    {[SearchMode::Name, SearchMode::Serial, SearchMode::All]
                        .into_iter()
                        .map(|m| view! {
                            <label class=css::mode>
                                <input
                                    type="radio"
                                    name="mode"
                                    prop:checked=move || mode.get() == m
                                    on:change=move |_| set_mode.set(m)
                                />
                                {match m {
                                    SearchMode::Name => "By name",
                                    SearchMode::Serial => "By serial",
                                    SearchMode::All => "Both",
                                }}
                            </label>
                        })
                        .collect::<Vec<_>>()}
                </div>
                <div class=css::searchRow>
                    <input
                        type="search"
                        class=css::searchInput
                        placeholder=move || placeholder(mode.get())
                        prop:value=query
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                    />
                    <button type="submit" class=css::searchButton disabled=loading>
                        <Icon icon=ic::SEARCH />
                        {move || if loading.get() { "Searching..." } else { "Verify" }}
                    </button>
                </div>
            </form>

            {move || results.get().map(|views| {
                if views.is_empty() {
                    view! {
                        <p class=css::empty>
                            "No certificates found. Check the spelling or try another search."
                        </p>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class=css::results>
                            {views.into_iter()
                                .map(|view| view! { <CertificateCard view=view /> })
                                .collect::<Vec<_>>()}
                        </div>
                    }
                    .into_any()
                }
            })}
        </section>
    }
}

#[component]
fn CertificateCard(view: CertificateView) -> impl IntoView {
    let status_class = match view.status {
        azcert_core::CertificateStatus::Active => css::active,
        azcert_core::CertificateStatus::Expired => css::expired,
    };

    view! {
        <article class=css::card>
            <header class=css::cardHeader>
                <span class=css::certId>{view.display_id}</span>
                <span class=status_class>{view.status.label()}</span>
            </header>
            <h2 class=css::holder>{view.name}</h2>
            <p class=css::title>{view.title}</p>
            <dl class=css::details>
                <dt>"Serial number"</dt>
                <dd>{view.serial_number}</dd>
                <dt><Icon icon=ic::CALENDAR />" Issued"</dt>
                <dd>{view.issue_date}</dd>
                <dt><Icon icon=ic::CALENDAR />" Expires"</dt>
                <dd>{view.expiry_date}</dd>
                <dt><Icon icon=ic::LOCATION />" Location"</dt>
                <dd>{view.location}</dd>
            </dl>
        </article>
    }
}
