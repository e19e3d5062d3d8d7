use payloads::forms::CommissionForm;
use yew::prelude::*;

use crate::components::{
    PageHeader, RechargePanel, TextField, primary_button, secondary_button,
};
use crate::contexts::toast::use_toast;
use crate::get_api_client;
use crate::hooks::{use_fetch, use_title};
use crate::utils::field_setter;

/// Referral commission rates, and the phone-keyed balance panel.
#[function_component]
pub fn CommissionPage() -> Html {
    use_title("Commission Settings");
    let toast = use_toast();
    let rates = use_fetch(Some(()), |_| async {
        get_api_client().get_commission().await
    });
    let form = use_state(CommissionForm::default);
    let is_saving = use_state(|| false);

    // Every fresh answer from the server replaces what is in the form.
    {
        let form = form.clone();
        use_effect_with(rates.data.clone(), move |data| {
            if let Some(rates) = data {
                form.set(CommissionForm::from_rates(rates));
            }
        });
    }

    let on_submit = {
        let form = form.clone();
        let toast = toast.clone();
        let is_saving = is_saving.clone();
        let refetch = rates.refetch.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let update = match form.validate() {
                Ok(update) => update,
                Err(e) => return toast.error(e.to_string()),
            };
            let toast = toast.clone();
            let is_saving = is_saving.clone();
            let refetch = refetch.clone();
            yew::platform::spawn_local(async move {
                is_saving.set(true);
                match get_api_client().update_commission(&update).await {
                    Ok(message) => {
                        toast.success(message);
                        refetch.emit(());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
                is_saving.set(false);
            });
        })
    };

    let on_refresh = rates.refetch.reform(|_: MouseEvent| ());

    html! {
        <div class="space-y-8 max-w-3xl">
            <PageHeader title="Commission Settings">
                <button
                    onclick={on_refresh}
                    disabled={rates.is_loading}
                    class={secondary_button()}
                >
                    {if rates.is_loading { "Refreshing..." } else { "Refresh" }}
                </button>
            </PageHeader>
            if let Some(error) = &rates.error {
                <p class="text-sm text-red-600">{error}</p>
            }
            <form onsubmit={on_submit} class="bg-white rounded-lg shadow-sm border border-neutral-200 p-6 space-y-4">
                <div class="grid gap-4 sm:grid-cols-3">
                    <TextField
                        label="Level 1 (%)"
                        input_type="number"
                        value={form.level1.clone()}
                        on_change={field_setter(&form, |f, v| f.level1 = v)}
                    />
                    <TextField
                        label="Level 2 (%)"
                        input_type="number"
                        value={form.level2.clone()}
                        on_change={field_setter(&form, |f, v| f.level2 = v)}
                    />
                    <TextField
                        label="Level 3 (%)"
                        input_type="number"
                        value={form.level3.clone()}
                        on_change={field_setter(&form, |f, v| f.level3 = v)}
                    />
                </div>
                <button
                    type="submit"
                    disabled={*is_saving || rates.is_initial_loading()}
                    class={primary_button()}
                >
                    {"Update Commission"}
                </button>
            </form>
            <section class="bg-white rounded-lg shadow-sm border border-neutral-200 p-6">
                <h2 class="text-lg font-semibold text-neutral-900 mb-4">
                    {"Add / Minus Balance"}
                </h2>
                <RechargePanel />
            </section>
        </div>
    }
}
