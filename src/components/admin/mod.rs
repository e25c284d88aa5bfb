//! Back-office certificate console.
//!
//! - [`AdminPage`] - grouped certificate list with search, delete and upload
//! - [`CertificateEditor`] - create/edit form

mod editor;
mod upload;

pub use editor::CertificateEditor;

use azcert_core::models::CertificateRecord;
use azcert_core::search::{CertificateGroup, format_date, group_by_name, remove_from_groups};
use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::Route;
use crate::utils::Generation;
use crate::utils::dom::confirm;
use upload::UploadPanel;

stylance::import_crate_style!(css, "src/components/admin/admin.module.css");

/// What the list currently shows.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Listing {
    All,
    ByName(String),
    BySerial(String),
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let (groups, set_groups) = signal(Vec::<CertificateGroup>::new());
    let (loading, set_loading) = signal(false);
    let (query, set_query) = signal(String::new());
    let (by_serial, set_by_serial) = signal(false);
    let generation = StoredValue::new(Generation::default());

    let load = move |listing: Listing| {
        let api = ctx.api();
        let Some(ticket) = generation.try_update_value(Generation::start) else {
            return;
        };
        set_loading.set(true);
        spawn_local(async move {
            let records = match listing {
                Listing::All => match api.get_all().await {
                    Ok(records) => records,
                    Err(e) => {
                        ctx.error(e.message());
                        Vec::new()
                    }
                },
                Listing::ByName(q) => api.search_by_name(&q).await,
                Listing::BySerial(q) => api.search_by_serial(&q).await,
            };
            // A newer load owns the list now
            if !generation.with_value(|g| g.is_current(ticket)) {
                return;
            }
            set_groups.set(group_by_name(records));
            set_loading.set(false);
        });
    };

    load(Listing::All);

    let on_search = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let q = query.get_untracked().trim().to_string();
        let listing = match (q.is_empty(), by_serial.get_untracked()) {
            (true, _) => Listing::All,
            (false, true) => Listing::BySerial(q),
            (false, false) => Listing::ByName(q),
        };
        load(listing);
    };

    let on_reset = move |_| {
        set_query.set(String::new());
        load(Listing::All);
    };

    let on_delete = Callback::new(move |record: CertificateRecord| {
        let prompt = format!(
            "Delete certificate {} ({})? This cannot be undone.",
            record.display_id(),
            record.name
        );
        if !confirm(&prompt) {
            return;
        }

        let api = ctx.api();
        spawn_local(async move {
            match api.delete(record.id).await {
                Ok(()) => {
                    set_groups.update(|g| remove_from_groups(g, record.id));
                    ctx.success(format!("Certificate {} deleted", record.display_id()));
                }
                Err(e) => ctx.error(e.message()),
            }
        });
    });

    let on_uploaded = Callback::new(move |_: ()| load(Listing::All));

    view! {
        <section class=css::page>
            <div class=css::toolbar>
                <h1>"Certificates"</h1>
                <a class=css::primary href=Route::NewCertificate.to_hash()>
                    <Icon icon=ic::PLUS />
                    "New certificate"
                </a>
            </div>

            <UploadPanel on_uploaded=on_uploaded />

            <form class=css::search on:submit=on_search>
                <select
                    class=css::select
                    on:change=move |ev| set_by_serial.set(event_target_value(&ev) == "serial")
                >
                    <option value="name" selected=move || !by_serial.get()>"Name"</option>
                    <option value="serial" selected=move || by_serial.get()>"Serial number"</option>
                </select>
                <input
                    type="search"
                    class=css::input
                    placeholder="Search certificates"
                    prop:value=query
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <button type="submit" class=css::secondary>
                    <Icon icon=ic::SEARCH />
                    "Search"
                </button>
                <button type="button" class=css::link on:click=on_reset>"Show all"</button>
            </form>

            {move || {
                if loading.get() {
                    return view! { <p class=css::status>"Loading certificates..."</p> }.into_any();
                }
                let groups = groups.get();
                if groups.is_empty() {
                    return view! { <p class=css::status>"No certificates found"</p> }.into_any();
                }
                groups
                    .into_iter()
                    .map(|group| view! { <GroupTable group=group on_delete=on_delete /> })
                    .collect::<Vec<_>>()
                    .into_any()
            }}
        </section>
    }
}

#[component]
fn GroupTable(group: CertificateGroup, on_delete: Callback<CertificateRecord>) -> impl IntoView {
    let count = group.certificates.len();
    let rows = group
        .certificates
        .into_iter()
        .map(|record| {
            let edit_href = Route::EditCertificate { id: record.id }.to_hash();
            let location = record.location.display();
            let for_delete = record.clone();
            view! {
                <tr>
                    <td class=css::mono>{record.display_id()}</td>
                    <td class=css::mono>{record.serial_number.clone()}</td>
                    <td>{record.method_label()}</td>
                    <td>{record.type_label()}</td>
                    <td>{format_date(record.start_date.as_ref())}</td>
                    <td>{format_date(record.end_date.as_ref())}</td>
                    <td>{location}</td>
                    <td class=css::actions>
                        <a href=edit_href title="Edit"><Icon icon=ic::EDIT /></a>
                        <button
                            class=css::danger
                            title="Delete"
                            on:click=move |_| on_delete.run(for_delete.clone())
                        >
                            <Icon icon=ic::DELETE />
                        </button>
                    </td>
                </tr>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class=css::group>
            <h2 class=css::groupName>
                {group.name}
                <span class=css::count>{count}</span>
            </h2>
            <table class=css::table>
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Serial"</th>
                        <th>"Method"</th>
                        <th>"Type"</th>
                        <th>"Issued"</th>
                        <th>"Expires"</th>
                        <th>"Location"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
}
