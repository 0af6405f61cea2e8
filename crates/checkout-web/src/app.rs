//! Main App Component

use leptos::prelude::*;

use crate::pages::CheckoutPage;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="app">
            <h1>"Pasarela de pago con Wompi"</h1>
            <CheckoutPage />
        </main>
    }
}
