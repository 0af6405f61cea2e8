//! Page Store
//!
//! Signal-backed wrapper around the checkout reducer. Effects run on the
//! browser's event loop and report back through `dispatch`.

use checkout_core::{Action, CheckoutState, Effect, PaymentMethod, run_effect, update};
use leptos::prelude::*;

use crate::api;

#[derive(Clone, Copy)]
pub struct Store {
    pub state: RwSignal<CheckoutState>,
}

impl Store {
    pub fn new() -> Self {
        Self { state: RwSignal::new(CheckoutState::default()) }
    }

    /// Apply an action, then run whatever it asked for
    pub fn dispatch(self, action: Action) {
        let effects = self.state.try_update(|state| update(state, action)).unwrap_or_default();
        for effect in effects {
            self.spawn(effect);
        }
    }

    fn spawn(self, effect: Effect) {
        leptos::task::spawn_local(async move {
            let outcome = run_effect(&api::gateway(), effect).await;
            self.dispatch(outcome);
        });
    }

    pub fn method(self) -> PaymentMethod {
        self.state.with(|s| s.method)
    }

    pub fn busy(self) -> bool {
        self.state.with(CheckoutState::is_busy)
    }

    /// Current text of a detail field, empty when unset
    pub fn detail(self, field: &str) -> String {
        self.state
            .with(|s| s.details.get(field).map(ToString::to_string))
            .unwrap_or_default()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
