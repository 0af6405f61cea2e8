//! Checkout Page

use checkout_core::{Action, Currency, CustomerField, FieldValue, PaymentMethod, amount_from_input};
use leptos::prelude::*;

use crate::components::{DetailInput, MethodButton, Toasts};
use crate::store::Store;

const TERMS_URL: &str = "https://wompi.com/assets/downloadble/reglamento-Usuarios-Colombia.pdf";
const PERSONAL_DATA_URL: &str =
    "https://wompi.com/assets/downloadble/autorizacion-administracion-datos-personales.pdf";

#[component]
pub fn CheckoutPage() -> impl IntoView {
    let store = Store::new();
    // raw text of the amount field; the state only sees complete numbers
    let (amount_text, set_amount_text) = signal(String::from("0"));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        store.dispatch(Action::submit_now());
    };

    let result_json = move || {
        store.state.with(|s| {
            s.result
                .as_ref()
                .map(|r| serde_json::to_string_pretty(r).unwrap_or_default())
        })
    };

    view! {
        <div class="checkout">
            <Toasts store=store />

            <section class="payment-form">
                <h2>"Formulario de Pago"</h2>

                <form on:submit=on_submit>
                    <div class="field">
                        <label>"Monto a pagar"</label>
                        <input
                            type="number"
                            placeholder="0.00"
                            step="0.01"
                            prop:value=amount_text
                            on:input=move |ev| {
                                let raw = event_target_value(&ev);
                                if let Some(amount) = amount_from_input(&raw) {
                                    store.dispatch(Action::SetAmount(amount));
                                }
                                set_amount_text.set(raw);
                            }
                        />
                        <span class="currency">{move || store.state.with(|s| s.currency.as_str())}</span>
                    </div>

                    <div class="field">
                        <label>"Moneda"</label>
                        <select
                            prop:value=move || store.state.with(|s| s.currency.as_str())
                            on:change=move |ev| {
                                store.dispatch(Action::SetCurrency(Currency::from_code(&event_target_value(&ev))));
                            }
                        >
                            {Currency::ALL
                                .into_iter()
                                .map(|c| view! { <option value=c.as_str()>{c.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>

                    <ConsentSection store=store />

                    <button type="submit" class="btn btn-primary" disabled=move || store.busy()>
                        {move || if store.busy() { "Procesando..." } else { "Pagar ahora" }}
                    </button>
                </form>

                <Show when=move || result_json().is_some()>
                    <div class="transaction">
                        <h3>"Respuesta de la transacción:"</h3>
                        <pre>{move || result_json().unwrap_or_default()}</pre>
                    </div>
                </Show>
            </section>

            <section class="payment-methods">
                <h3>"Método de Pago"</h3>
                <div class="method-grid">
                    {PaymentMethod::ALL
                        .into_iter()
                        .map(|method| view! { <MethodButton store=store method=method /> })
                        .collect_view()}
                </div>
                <div class="method-fields">{move || method_fields(store, store.method())}</div>
            </section>
        </div>
    }
}

#[component]
fn ConsentSection(store: Store) -> impl IntoView {
    view! {
        <div class="consent">
            <h3>"Términos y Condiciones"</h3>
            <div class="checkbox">
                <input
                    type="checkbox"
                    id="accept-terms"
                    prop:checked=move || store.state.with(|s| s.consent.terms)
                    on:change=move |_| store.dispatch(Action::ToggleTerms)
                />
                <label for="accept-terms">
                    "Acepto haber leído los reglamentos y la política de privacidad para hacer este pago"
                </label>
                <a href=TERMS_URL target="_blank" rel="noopener noreferrer">"Ver documento →"</a>
            </div>
            <div class="checkbox">
                <input
                    type="checkbox"
                    id="accept-personal-data"
                    prop:checked=move || store.state.with(|s| s.consent.personal_data)
                    on:change=move |_| store.dispatch(Action::TogglePersonalData)
                />
                <label for="accept-personal-data">
                    "Acepto la autorización para la administración de datos personales"
                </label>
                <a href=PERSONAL_DATA_URL target="_blank" rel="noopener noreferrer">"Ver documento →"</a>
            </div>
        </div>
    }
}

fn method_fields(store: Store, method: PaymentMethod) -> AnyView {
    match method {
        PaymentMethod::Card => view! {
            <div class="fields">
                <DetailInput store=store field="number" placeholder="Número de tarjeta" />
                <DetailInput store=store field="cvc" placeholder="CVC" />
                <DetailInput store=store field="exp_month" placeholder="Mes (MM)" />
                <DetailInput store=store field="exp_year" placeholder="Año (YY)" />
                <DetailInput store=store field="installments" placeholder="Cuotas" input_type="number" />
            </div>
        }
        .into_any(),
        PaymentMethod::Nequi | PaymentMethod::Daviplata => view! {
            <DetailInput store=store field="phone_number" placeholder="Número de celular" input_type="tel" />
        }
        .into_any(),
        PaymentMethod::Pse => view! { <PseFields store=store /> }.into_any(),
        PaymentMethod::BancolombiaTransfer | PaymentMethod::BancolombiaCollect => view! {
            <p class="hint">"Serás redirigido a Bancolombia para completar el pago."</p>
        }
        .into_any(),
    }
}

#[component]
fn PseFields(store: Store) -> impl IntoView {
    let select_detail = move |field: &'static str| {
        move |ev: leptos::ev::Event| {
            let value = FieldValue::Text(event_target_value(&ev));
            store.dispatch(Action::UpdateField { name: field.to_string(), value });
        }
    };

    let customer_input = move |field: CustomerField| {
        move |ev: leptos::ev::Event| {
            store.dispatch(Action::UpdateCustomer { field, value: event_target_value(&ev) });
        }
    };

    view! {
        <div class="fields">
            <label>"Banco"</label>
            <select prop:value=move || store.detail("bank") on:change=select_detail("bank")>
                <option value="">"Seleccione un banco"</option>
                <For
                    each=move || store.state.with(|s| s.institutions.clone())
                    key=|bank| bank.financial_institution_code.clone()
                    children=|bank| view! {
                        <option value=bank.financial_institution_code>{bank.financial_institution_name}</option>
                    }
                />
            </select>

            <label>"Tipo de documento"</label>
            <select prop:value=move || store.detail("document_type") on:change=select_detail("document_type")>
                <option value="">"Seleccione un tipo"</option>
                <option value="CC">"Cédula de Ciudadanía"</option>
                <option value="NIT">"NIT"</option>
            </select>

            <label>"Número de documento"</label>
            <DetailInput store=store field="document_number" placeholder="Ingrese su número de documento" />

            <label>"Nombre completo"</label>
            <input
                type="text"
                placeholder="Nombres y apellidos"
                prop:value=move || store.state.with(|s| s.customer.full_name.clone())
                on:input=customer_input(CustomerField::FullName)
            />

            <label>"Correo electrónico"</label>
            <input
                type="email"
                placeholder="ejemplo@correo.com"
                prop:value=move || store.state.with(|s| s.customer.email.clone())
                on:input=customer_input(CustomerField::Email)
            />

            <label>"Teléfono"</label>
            <input
                type="tel"
                placeholder="Número de teléfono"
                prop:value=move || store.state.with(|s| s.customer.phone_number.clone())
                on:input=customer_input(CustomerField::PhoneNumber)
            />
        </div>
    }
}
