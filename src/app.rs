//! Root application module.
//!
//! Contains the main App component and the AppContext shared by every page.

use std::sync::Arc;

use azcert_core::ServiceClient;
use leptos::prelude::*;

use crate::components::AppRouter;
use crate::models::Route;
use crate::utils::FetchTransport;

/// The certificate API client used by the pages.
pub type ApiClient = ServiceClient<FetchTransport>;

// ============================================================================
// Notice
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A dismissible message shown at the top of the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// Page the notice survives navigation to.
    pub carry_to: Option<Route>,
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide context, provided at the root of the component tree.
///
/// `Copy` because every field is an arena handle. The API client, and with it
/// the request cache, lives for the whole browser session.
#[derive(Clone, Copy)]
pub struct AppContext {
    api: StoredValue<Arc<ApiClient>>,
    /// Current page notice, if any.
    pub notice: RwSignal<Option<Notice>>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            api: StoredValue::new(Arc::new(ServiceClient::new(FetchTransport))),
            notice: RwSignal::new(None),
        }
    }

    pub fn api(&self) -> Arc<ApiClient> {
        self.api.get_value()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(NoticeKind::Success, message.into(), None);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(NoticeKind::Error, message.into(), None);
    }

    /// Navigate to `route` and report success there.
    pub fn success_at(&self, route: Route, message: impl Into<String>) {
        self.show(NoticeKind::Success, message.into(), Some(route.clone()));
        route.push();
    }

    fn show(&self, kind: NoticeKind, message: String, carry_to: Option<Route>) {
        self.notice.set(Some(Notice {
            kind,
            message,
            carry_to,
        }));
    }

    /// Whether the current notice should stay visible on `route`.
    pub fn keeps_notice_on(&self, route: &Route) -> bool {
        self.notice.with_untracked(|notice| {
            notice
                .as_ref()
                .is_some_and(|n| n.carry_to.as_ref() == Some(route))
        })
    }

    pub fn dismiss(&self) {
        self.notice.set(None);
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

stylance::import_crate_style!(css, "src/app.module.css");

/// Root application component with error boundary.
#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext::new());

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div class=css::fatal>
                    <h1>"Something went wrong"</h1>
                    <p>"An unexpected error occurred. Please try reloading the page."</p>
                    <ul>
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button
                        on:click=move |_| {
                            if let Some(window) = web_sys::window() {
                                let _ = window.location().reload();
                            }
                        }
                    >
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <AppRouter />
        </ErrorBoundary>
    }
}
