//! Contact form, delivered through the email endpoint.

use azcert_core::models::EmailMessage;
use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::CONTACT_EMAIL;

stylance::import_crate_style!(css, "src/components/contact/contact.module.css");

fn missing_field(message: &EmailMessage) -> Option<&'static str> {
    [
        (&message.user_name, "Please enter your name"),
        (&message.user_email, "Please enter your email address"),
        (&message.subject, "Please enter a subject"),
        (&message.message, "Please enter a message"),
    ]
    .into_iter()
    .find(|(value, _)| value.trim().is_empty())
    .map(|(_, error)| error)
}

#[component]
pub fn ContactPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let form = RwSignal::new(EmailMessage::default());
    let (sending, set_sending) = signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if sending.get_untracked() {
            return;
        }

        let message = form.get_untracked();
        if let Some(error) = missing_field(&message) {
            ctx.error(error);
            return;
        }

        let api = ctx.api();
        set_sending.set(true);
        spawn_local(async move {
            match api.send_email(&message).await {
                Ok(_) => {
                    form.set(EmailMessage::default());
                    ctx.success("Thank you, your message has been sent");
                }
                Err(e) => ctx.error(e.message()),
            }
            set_sending.set(false);
        });
    };

    view! {
        <section class=css::page>
            <div class=css::intro>
                <h1>"Contact us"</h1>
                <p>
                    <Icon icon=ic::MAIL />
                    " "
                    <a href=format!("mailto:{}", CONTACT_EMAIL)>{CONTACT_EMAIL}</a>
                </p>
            </div>

            <form class=css::form on:submit=on_submit>
                <input
                    class=css::input
                    placeholder="Your name"
                    prop:value=move || form.with(|m| m.user_name.clone())
                    on:input=move |ev| form.update(|m| m.user_name = event_target_value(&ev))
                />
                <input
                    type="email"
                    class=css::input
                    placeholder="Your email"
                    prop:value=move || form.with(|m| m.user_email.clone())
                    on:input=move |ev| form.update(|m| m.user_email = event_target_value(&ev))
                />
                <input
                    class=css::input
                    placeholder="Subject"
                    prop:value=move || form.with(|m| m.subject.clone())
                    on:input=move |ev| form.update(|m| m.subject = event_target_value(&ev))
                />
                <textarea
                    class=css::textarea
                    rows="6"
                    placeholder="Message"
                    prop:value=move || form.with(|m| m.message.clone())
                    on:input=move |ev| form.update(|m| m.message = event_target_value(&ev))
                ></textarea>
                <button type="submit" class=css::send disabled=sending>
                    <Icon icon=ic::MAIL />
                    {move || if sending.get() { "Sending..." } else { "Send message" }}
                </button>
            </form>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> EmailMessage {
        EmailMessage {
            user_name: "Sara".into(),
            user_email: "sara@example.com".into(),
            subject: "Audit".into(),
            message: "Hello".into(),
        }
    }

    #[test]
    fn complete_message_passes() {
        assert_eq!(missing_field(&filled()), None);
    }

    #[test]
    fn first_blank_field_is_reported() {
        let mut message = filled();
        message.subject = "   ".into();
        message.message.clear();
        assert_eq!(missing_field(&message), Some("Please enter a subject"));
    }
}
