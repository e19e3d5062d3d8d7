//! Table cells that edit one field of a user in place.

use payloads::draft::DraftEdit;
use payloads::forms::{FormError, parse_amount, parse_count};
use payloads::requests::{SpinsUpdate, WithdrawLimitUpdate};
use payloads::{ClientError, UserId};
use rust_decimal::Decimal;
use std::fmt::{self, Display};
use std::future::Future;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::contexts::toast::use_toast;
use crate::get_api_client;

/// A user field that can be edited from the users table.
pub trait InlineField: Clone + Display + PartialEq + 'static {
    const NAME: &'static str;

    fn parse(input: &str) -> Result<Self, FormError>;

    /// Send the value; resolves to what the server stored.
    fn save(
        user_id: UserId,
        value: Self,
    ) -> impl Future<Output = Result<Self, ClientError>> + 'static;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinsToday(pub u32);

impl Display for SpinsToday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl InlineField for SpinsToday {
    const NAME: &'static str = "Spins";

    fn parse(input: &str) -> Result<Self, FormError> {
        parse_count(Self::NAME, input).map(Self)
    }

    fn save(
        user_id: UserId,
        value: Self,
    ) -> impl Future<Output = Result<Self, ClientError>> + 'static {
        async move {
            let update = SpinsUpdate {
                spins_today: value.0,
            };
            get_api_client()
                .update_spins(&user_id, &update)
                .await
                .map(Self)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawLimit(pub Decimal);

impl Display for WithdrawLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl InlineField for WithdrawLimit {
    const NAME: &'static str = "Withdraw limit";

    fn parse(input: &str) -> Result<Self, FormError> {
        parse_amount(Self::NAME, input).map(Self)
    }

    fn save(
        user_id: UserId,
        value: Self,
    ) -> impl Future<Output = Result<Self, ClientError>> + 'static {
        async move {
            let update = WithdrawLimitUpdate { limit: value.0 };
            get_api_client()
                .update_withdraw_limit(&user_id, &update)
                .await
                .map(Self)
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct DraftCellProps<F: InlineField> {
    pub user_id: UserId,
    pub value: F,
    /// Fired after the server accepted a new value.
    #[prop_or_default]
    pub on_saved: Callback<()>,
}

/// Shows the saved value until the user opens an editor. The displayed
/// value only changes once the server confirms a save.
#[function_component]
pub fn DraftCell<F: InlineField>(props: &DraftCellProps<F>) -> Html {
    let toast = use_toast();
    let edit = use_state(|| DraftEdit::new(props.value.clone()));

    // A refetched row replaces the value unless an edit is open.
    {
        let edit = edit.clone();
        use_effect_with(props.value.clone(), move |value| {
            let busy = edit.is_editing() || edit.is_saving();
            if !busy && edit.saved() != value {
                edit.set(DraftEdit::new(value.clone()));
            }
        });
    }

    let on_start = {
        let edit = edit.clone();
        Callback::from(move |_: MouseEvent| edit.set(edit.start_editing()))
    };

    let on_cancel = {
        let edit = edit.clone();
        Callback::from(move |_: MouseEvent| edit.set(edit.cancel()))
    };

    let on_input = {
        let edit = edit.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit.set(edit.update_draft(input.value()));
        })
    };

    let save = {
        let edit = edit.clone();
        let toast = toast.clone();
        let user_id = props.user_id.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |_: ()| match edit.begin_save(F::parse) {
            None => {}
            Some(Err(e)) => toast.error(e.to_string()),
            Some(Ok((saving, value))) => {
                edit.set(saving.clone());
                let edit = edit.clone();
                let toast = toast.clone();
                let user_id = user_id.clone();
                let on_saved = on_saved.clone();
                yew::platform::spawn_local(async move {
                    match F::save(user_id, value).await {
                        Ok(stored) => {
                            edit.set(saving.confirm(stored));
                            toast.success(format!("{} updated", F::NAME));
                            on_saved.emit(());
                        }
                        Err(e) => {
                            edit.set(saving.fail());
                            toast.error(e.to_string());
                        }
                    }
                });
            }
        })
    };

    let on_keydown = {
        let save = save.clone();
        let edit = edit.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "Enter" => save.emit(()),
            "Escape" => edit.set(edit.cancel()),
            _ => {}
        })
    };

    let link_class =
        "ml-2 text-xs font-medium text-blue-600 hover:text-blue-800";

    let saved = edit.saved().to_string();
    if let Some(draft) = edit.draft() {
        return html! {
            <span class="flex items-center whitespace-nowrap">
                <input
                    type="text"
                    value={draft.to_string()}
                    oninput={on_input}
                    onkeydown={on_keydown}
                    class="w-20 px-2 py-1 text-sm border border-neutral-300 rounded"
                />
                <button onclick={save.reform(|_: MouseEvent| ())} class={link_class}>
                    {"Save"}
                </button>
                <button onclick={on_cancel} class={link_class}>{"Cancel"}</button>
            </span>
        };
    }

    if edit.is_saving() {
        html! {
            <span class="whitespace-nowrap text-neutral-500">
                {saved}
                <span class="ml-2 text-xs">{"Saving..."}</span>
            </span>
        }
    } else {
        html! {
            <span class="whitespace-nowrap">
                {saved}
                <button onclick={on_start} class={link_class}>{"Edit"}</button>
            </span>
        }
    }
}
