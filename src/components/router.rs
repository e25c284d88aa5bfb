//! Application router component.
//!
//! Uses native hashchange events instead of leptos_router for hash routing.
//! The URL hash is the source of truth; browser back/forward work for free.

use leptos::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;

use crate::app::AppContext;
use crate::components::admin::{AdminPage, CertificateEditor};
use crate::components::contact::ContactPage;
use crate::components::notice::NoticeBar;
use crate::components::verify::VerifyPage;
use crate::config::{APP_NAME, APP_TAGLINE, nav_links};
use crate::models::Route;
use crate::utils::dom::scroll_to_top;

stylance::import_crate_style!(css, "src/components/router.module.css");

/// Main application router.
///
/// - `#/` → certificate verification
/// - `#/admin` → certificate list
/// - `#/admin/new`, `#/admin/edit/<id>` → certificate form
/// - `#/contact` → contact form
#[component]
pub fn AppRouter() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let route = RwSignal::new(Route::current());

    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        let closure = Closure::wrap(Box::new(move || {
            route.set(Route::current());
        }) as Box<dyn Fn()>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        }

        // Lives as long as the app
        closure.forget();
    }

    // A notice belongs to the page that raised it
    Effect::new(move |prev: Option<Route>| {
        let current = route.get();
        if prev.is_some_and(|p| p != current) {
            if !ctx.keeps_notice_on(&current) {
                ctx.dismiss();
            }
            scroll_to_top();
        }
        current
    });

    view! {
        <NavBar route=route />
        <NoticeBar />
        <main class=css::main>
            {move || match route.get() {
                Route::Verify => view! { <VerifyPage /> }.into_any(),
                Route::Admin => view! { <AdminPage /> }.into_any(),
                Route::NewCertificate => view! { <CertificateEditor id=None /> }.into_any(),
                Route::EditCertificate { id } => {
                    view! { <CertificateEditor id=Some(id) /> }.into_any()
                }
                Route::Contact => view! { <ContactPage /> }.into_any(),
                Route::NotFound { path } => view! { <NotFound path=path /> }.into_any(),
            }}
        </main>
    }
}

#[component]
fn NavBar(route: RwSignal<Route>) -> impl IntoView {
    let links = nav_links()
        .into_iter()
        .map(|(label, target)| {
            let href = target.to_hash();
            let is_current = move || {
                let current = route.get();
                current == target || (target == Route::Admin && current.is_admin())
            };
            view! {
                <a
                    href=href
                    class=move || if is_current() { css::activeLink } else { css::link }
                >
                    {label}
                </a>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <header class=css::header>
            <div class=css::brand>
                <span class=css::brandName>{APP_NAME}</span>
                <span class=css::tagline>{APP_TAGLINE}</span>
            </div>
            <nav class=css::nav>{links}</nav>
        </header>
    }
}

#[component]
fn NotFound(path: String) -> impl IntoView {
    view! {
        <section class=css::notFound>
            <h1>"Page not found"</h1>
            <p>"Nothing lives at " <code>{format!("#/{}", path)}</code></p>
            <a href=Route::Verify.to_hash()>"Back to certificate verification"</a>
        </section>
    }
}
