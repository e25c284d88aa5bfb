//! Bulk spreadsheet upload.

use azcert_core::models::UploadFile;
use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;

use super::css;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::UPLOAD_ACCEPT;
use crate::utils::dom::{log, read_file};

/// File picker plus upload button. Calls `on_uploaded` after a successful
/// upload so the list can refresh.
#[component]
pub fn UploadPanel(on_uploaded: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let (selected, set_selected) = signal::<Option<UploadFile>>(None);
    let (uploading, set_uploading) = signal(false);

    let on_pick = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            set_selected.set(None);
            return;
        };

        spawn_local(async move {
            match read_file(&file).await {
                Ok(bytes) => set_selected.set(Some(UploadFile::new(file.name(), bytes))),
                Err(e) => {
                    log(&e);
                    ctx.error("Could not read the selected file.");
                }
            }
        });
    };

    let on_upload = move |_| {
        let Some(file) = selected.get_untracked() else {
            ctx.error("Please choose a spreadsheet to upload.");
            return;
        };

        let api = ctx.api();
        set_uploading.set(true);
        spawn_local(async move {
            match api.upload_excel(file).await {
                Ok(report) => {
                    ctx.success(report.message());
                    set_selected.set(None);
                    on_uploaded.run(());
                }
                Err(e) => ctx.error(e.message()),
            }
            set_uploading.set(false);
        });
    };

    view! {
        <div class=css::upload>
            <label class=css::filePicker>
                <input type="file" accept=UPLOAD_ACCEPT on:change=on_pick />
                {move || selected
                    .get()
                    .map(|f| f.file_name)
                    .unwrap_or_else(|| "Choose an Excel file".to_string())}
            </label>
            <button
                class=css::secondary
                disabled=move || uploading.get() || selected.with(Option::is_none)
                on:click=on_upload
            >
                <Icon icon=ic::UPLOAD />
                {move || if uploading.get() { "Uploading..." } else { "Upload" }}
            </button>
        </div>
    }
}
