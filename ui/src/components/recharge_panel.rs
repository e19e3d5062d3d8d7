use payloads::forms::{MinusForm, RechargeForm};
use rust_decimal::Decimal;
use yew::prelude::*;

use super::TextField;
use crate::contexts::toast::use_toast;
use crate::get_api_client;
use crate::utils::{field_setter, format_amount};

#[derive(Properties, PartialEq)]
pub struct RechargePanelProps {
    /// Fixes the target user; otherwise the admin types a phone number.
    #[prop_or_default]
    pub phone: Option<AttrValue>,
    /// Balance the debit is checked against before anything is sent.
    #[prop_or_default]
    pub known_balance: Option<Decimal>,
    /// Fired after either adjustment succeeded.
    #[prop_or_default]
    pub on_adjusted: Callback<()>,
}

/// Credit a user against a transfer reference, or debit them.
#[function_component]
pub fn RechargePanel(props: &RechargePanelProps) -> Html {
    let toast = use_toast();
    let recharge = use_state(|| RechargeForm {
        phone: props
            .phone
            .as_ref()
            .map(AttrValue::to_string)
            .unwrap_or_default(),
        ..Default::default()
    });
    let minus_amount = use_state(String::new);
    let is_busy = use_state(|| false);

    let on_add = {
        let recharge = recharge.clone();
        let toast = toast.clone();
        let is_busy = is_busy.clone();
        let on_adjusted = props.on_adjusted.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_busy {
                return;
            }
            let details = match recharge.validate() {
                Ok(details) => details,
                Err(e) => return toast.error(e.to_string()),
            };
            let recharge = recharge.clone();
            let toast = toast.clone();
            let is_busy = is_busy.clone();
            let on_adjusted = on_adjusted.clone();
            yew::platform::spawn_local(async move {
                is_busy.set(true);
                match get_api_client().add_recharge(&details).await {
                    Ok(adjustment) => {
                        toast.success(describe(
                            &adjustment.message,
                            adjustment.balance,
                        ));
                        recharge.set(RechargeForm {
                            phone: details.phone,
                            ..Default::default()
                        });
                        on_adjusted.emit(());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
                is_busy.set(false);
            });
        })
    };

    let on_minus = {
        let recharge = recharge.clone();
        let minus_amount = minus_amount.clone();
        let toast = toast.clone();
        let is_busy = is_busy.clone();
        let known_balance = props.known_balance;
        let on_adjusted = props.on_adjusted.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_busy {
                return;
            }
            let form = MinusForm {
                amount: (*minus_amount).clone(),
                phone: recharge.phone.clone(),
            };
            let details = match form.validate(known_balance) {
                Ok(details) => details,
                Err(e) => return toast.error(e.to_string()),
            };
            let minus_amount = minus_amount.clone();
            let toast = toast.clone();
            let is_busy = is_busy.clone();
            let on_adjusted = on_adjusted.clone();
            yew::platform::spawn_local(async move {
                is_busy.set(true);
                match get_api_client().minus_recharge(&details).await {
                    Ok(adjustment) => {
                        toast.success(describe(
                            &adjustment.message,
                            adjustment.balance,
                        ));
                        minus_amount.set(String::new());
                        on_adjusted.emit(());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
                is_busy.set(false);
            });
        })
    };

    let on_minus_input = {
        let minus_amount = minus_amount.clone();
        Callback::from(move |value: String| minus_amount.set(value))
    };

    html! {
        <div class="space-y-6">
            if props.phone.is_none() {
                <TextField
                    label="User phone"
                    value={recharge.phone.clone()}
                    on_change={field_setter(&recharge, |f, v| f.phone = v)}
                    placeholder="10-digit phone"
                />
            }
            if let Some(balance) = props.known_balance {
                <p class="text-sm text-neutral-600">
                    {format!("Current balance: {}", format_amount(balance))}
                </p>
            }
            <form onsubmit={on_add} class="grid gap-4 sm:grid-cols-3 items-end">
                <TextField
                    label="UTR"
                    value={recharge.utr.clone()}
                    on_change={field_setter(&recharge, |f, v| f.utr = v)}
                />
                <TextField
                    label="Amount"
                    input_type="number"
                    value={recharge.amount.clone()}
                    on_change={field_setter(&recharge, |f, v| f.amount = v)}
                />
                <button type="submit" disabled={*is_busy} class={super::primary_button()}>
                    {"Add Amount"}
                </button>
            </form>
            <form onsubmit={on_minus} class="grid gap-4 sm:grid-cols-3 items-end">
                <TextField
                    label="Minus amount"
                    input_type="number"
                    value={(*minus_amount).clone()}
                    on_change={on_minus_input}
                />
                <div></div>
                <button type="submit" disabled={*is_busy} class={super::danger_button()}>
                    {"Minus Amount"}
                </button>
            </form>
        </div>
    }
}

fn describe(message: &str, balance: Option<Decimal>) -> String {
    match balance {
        Some(balance) => {
            format!("{message}. New balance: {}", format_amount(balance))
        }
        None => message.to_string(),
    }
}
