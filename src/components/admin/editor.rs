//! Create and edit form for a single certificate.

use azcert_core::models::{CertificateType, ServiceMethod};
use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use super::css;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::{CertificateForm, Route};

/// Accessor for one text field of the form.
type Lens = fn(&mut CertificateForm) -> &mut String;

/// Reactive value and input handler for one form field.
fn bind(form: RwSignal<CertificateForm>, lens: Lens) -> (Signal<String>, Callback<String>) {
    let value = Signal::derive(move || {
        let mut snapshot = form.get();
        lens(&mut snapshot).clone()
    });
    let on_input = Callback::new(move |v: String| form.update(|f| *lens(f) = v));
    (value, on_input)
}

/// Certificate form. `id` is `None` for a new certificate.
#[component]
pub fn CertificateEditor(id: Option<i64>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let form = RwSignal::new(if id.is_some() {
        CertificateForm::default()
    } else {
        CertificateForm::new_certificate()
    });
    let (loading, set_loading) = signal(id.is_some());
    let (saving, set_saving) = signal(false);

    if let Some(id) = id {
        let api = ctx.api();
        spawn_local(async move {
            match api.get_by_id(id).await {
                Ok(record) => form.set(CertificateForm::from_record(&record)),
                Err(e) => ctx.error(e.message()),
            }
            set_loading.set(false);
        });
    }

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }

        let values = form.get_untracked();
        if let Err(message) = values.validate() {
            ctx.error(message);
            return;
        }

        let api = ctx.api();
        let draft = values.to_draft();
        set_saving.set(true);
        spawn_local(async move {
            let result = match id {
                Some(id) => api.update(id, draft).await,
                None => api.create(draft).await,
            };
            set_saving.set(false);

            match result {
                Ok(record) => {
                    let verb = if id.is_some() { "updated" } else { "created" };
                    ctx.success_at(
                        Route::Admin,
                        format!("Certificate {} {}", record.serial_number, verb),
                    );
                }
                Err(e) => ctx.error(e.message()),
            }
        });
    };

    let (name, set_name) = bind(form, |f| &mut f.name);
    let (serial, set_serial) = bind(form, |f| &mut f.serial_number);
    let (method, set_method) = bind(form, |f| &mut f.method);
    let (kind, set_kind) = bind(form, |f| &mut f.kind);
    let (start, set_start) = bind(form, |f| &mut f.start_date);
    let (end, set_end) = bind(form, |f| &mut f.end_date);
    let (country, set_country) = bind(form, |f| &mut f.country);
    let (state, set_state) = bind(form, |f| &mut f.state);
    let (street, set_street) = bind(form, |f| &mut f.street_address);

    let methods = ServiceMethod::ALL
        .iter()
        .map(|m| (m.code().to_string(), m.label()))
        .collect::<Vec<_>>();
    let types = CertificateType::ALL
        .iter()
        .map(|t| (t.code().to_string(), t.label()))
        .collect::<Vec<_>>();

    let title = if id.is_some() { "Edit certificate" } else { "New certificate" };

    view! {
        <section class=css::page>
            <div class=css::toolbar>
                <a class=css::link href=Route::Admin.to_hash()>
                    <Icon icon=ic::BACK />
                    "Back to list"
                </a>
                <h1>{title}</h1>
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class=css::status>"Loading certificate..."</p> }
            >
                <form class=css::form on:submit=on_submit>
                    <Field label="Holder name" value=name on_input=set_name required=true />
                    <Field label="Serial number" value=serial on_input=set_serial required=true />
                    <Select label="Method" value=method on_input=set_method options=methods.clone() />
                    <Select label="Certificate type" value=kind on_input=set_kind options=types.clone() />
                    <Field label="Start date" kind="date" value=start on_input=set_start required=true />
                    <Field label="End date" kind="date" value=end on_input=set_end required=true />
                    <Field label="Country" value=country on_input=set_country />
                    <Field label="State" value=state on_input=set_state />
                    <Field label="Street address" value=street on_input=set_street />

                    <div class=css::formActions>
                        <button type="submit" class=css::primary disabled=saving>
                            {move || if saving.get() { "Saving..." } else { "Save certificate" }}
                        </button>
                    </div>
                </form>
            </Show>
        </section>
    }
}

#[component]
fn Field(
    label: &'static str,
    value: Signal<String>,
    on_input: Callback<String>,
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <label class=css::field>
            <span class=css::fieldLabel>{label}</span>
            <input
                type=kind
                class=css::input
                required=required
                prop:value=value
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
fn Select(
    label: &'static str,
    value: Signal<String>,
    on_input: Callback<String>,
    options: Vec<(String, &'static str)>,
) -> impl IntoView {
    view! {
        <label class=css::field>
            <span class=css::fieldLabel>{label}</span>
            <select
                class=css::select
                prop:value=value
                on:change=move |ev| on_input.run(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(code, label)| view! { <option value=code>{label}</option> })
                    .collect::<Vec<_>>()}
            </select>
        </label>
    }
}
