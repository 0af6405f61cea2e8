//! UI Components

use std::time::Duration;

use checkout_core::{Action, FieldValue, NotificationLevel, PaymentMethod};
use leptos::prelude::*;

use crate::store::Store;

/// Button in the payment method grid
#[component]
pub fn MethodButton(store: Store, method: PaymentMethod) -> impl IntoView {
    let class = move || {
        if store.method() == method { "method selected" } else { "method" }
    };

    view! {
        <button
            type="button"
            class=class
            on:click=move |_| store.dispatch(Action::SelectMethod(method))
        >
            <span class="icon">{method.icon()}</span>
            <span class="label">{method.label()}</span>
        </button>
    }
}

/// Text input bound to one payment detail
#[component]
pub fn DetailInput(
    store: Store,
    field: &'static str,
    placeholder: &'static str,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    view! {
        <input
            type=input_type
            placeholder=placeholder
            prop:value=move || store.detail(field)
            on:input=move |ev| {
                let raw = event_target_value(&ev);
                // numeric inputs keep their number type on the wire
                let value = match (input_type, raw.parse::<i64>()) {
                    ("number", Ok(n)) => FieldValue::Number(n),
                    _ => FieldValue::Text(raw),
                };
                store.dispatch(Action::UpdateField { name: field.to_string(), value });
            }
        />
    }
}

/// Seconds a toast stays up before it dismisses itself
const TOAST_SECS: u64 = 5;

/// Toast list; click a toast to dismiss it early
#[component]
pub fn Toasts(store: Store) -> impl IntoView {
    let toasts = move || store.state.with(|s| s.notifications.clone());

    view! {
        <div class="toasts">
            <For
                each=toasts
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    set_timeout(
                        move || store.dispatch(Action::DismissNotification(id)),
                        Duration::from_secs(TOAST_SECS),
                    );
                    let class = match toast.level {
                        NotificationLevel::Success => "toast toast-success",
                        NotificationLevel::Error => "toast toast-error",
                    };
                    view! {
                        <div class=class on:click=move |_| store.dispatch(Action::DismissNotification(id))>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
