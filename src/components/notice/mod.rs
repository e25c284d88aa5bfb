//! Page notice banner.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::{AppContext, NoticeKind};
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/notice/notice.module.css");

/// Shows the current [`Notice`](crate::app::Notice), if any.
#[component]
pub fn NoticeBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    move || {
        ctx.notice.get().map(|notice| {
            let class = match notice.kind {
                NoticeKind::Success => css::success,
                NoticeKind::Error => css::error,
            };
            view! {
                <div class=class role="status">
                    <span class=css::message>{notice.message}</span>
                    <button
                        class=css::dismiss
                        title="Dismiss"
                        on:click=move |_| ctx.dismiss()
                    >
                        <Icon icon=ic::CLOSE />
                    </button>
                </div>
            }
        })
    }
}
