use payloads::forms::DemoAccountForm;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::{PageHeader, TextField, primary_button};
use crate::contexts::toast::use_toast;
use crate::get_api_client;
use crate::hooks::use_title;
use crate::utils::field_setter;

/// Registers accounts whose phone numbers start with 50. They are flagged
/// as demo accounts and listed under Demo Users.
#[function_component]
pub fn DemoAccountsPage() -> Html {
    use_title("Create Demo Account");
    let toast = use_toast();
    let form = use_state(DemoAccountForm::default);
    let is_loading = use_state(|| false);

    let on_phone = {
        let form = form.clone();
        Callback::from(move |input: String| {
            let mut next = (*form).clone();
            next.set_phone(&input);
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let is_loading = is_loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let details = match form.validate() {
                Ok(details) => details,
                Err(e) => return toast.error(e.to_string()),
            };
            let form = form.clone();
            let toast = toast.clone();
            let is_loading = is_loading.clone();
            yew::platform::spawn_local(async move {
                is_loading.set(true);
                match get_api_client().register_user(&details).await {
                    Ok(_) => {
                        toast.success("Registration successful!");
                        form.set(DemoAccountForm::default());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
                is_loading.set(false);
            });
        })
    };

    html! {
        <div class="max-w-lg">
            <PageHeader title="Create Demo Account">
                <Link<Route> to={Route::DemoUsers} classes="text-sm text-blue-600 hover:underline">
                    {"View demo users"}
                </Link<Route>>
            </PageHeader>
            <form onsubmit={on_submit} class="bg-white rounded-lg shadow-sm border border-neutral-200 p-6 space-y-4">
                <TextField
                    label="Phone"
                    input_type="tel"
                    value={form.phone.clone()}
                    on_change={on_phone}
                    placeholder="Phone Number (must start with 50)"
                />
                <TextField
                    label="Login password"
                    input_type="password"
                    value={form.password.clone()}
                    on_change={field_setter(&form, |f, v| f.password = v)}
                />
                <TextField
                    label="Trade password"
                    input_type="password"
                    value={form.trade_password.clone()}
                    on_change={field_setter(&form, |f, v| f.trade_password = v)}
                />
                <TextField
                    label="Referral code (optional)"
                    value={form.ref_code.clone()}
                    on_change={field_setter(&form, |f, v| f.ref_code = v)}
                />
                <button type="submit" disabled={*is_loading} class={primary_button()}>
                    {if *is_loading { "Registering..." } else { "Register" }}
                </button>
            </form>
        </div>
    }
}
