use payloads::forms::LoginForm;
use payloads::session::{LoginType, Session};
use yew::prelude::*;

use crate::components::{SelectField, TextField, primary_button};
use crate::contexts::session::use_session;
use crate::get_api_client;
use crate::hooks::use_title;
use crate::utils::field_setter;

#[function_component]
pub fn LoginPage() -> Html {
    use_title("Login");
    let session = use_session();
    let form = use_state(LoginForm::default);
    let error_message = use_state(|| None::<String>);
    let is_loading = use_state(|| false);

    let on_submit = {
        let form = form.clone();
        let error_message = error_message.clone();
        let is_loading = is_loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let credentials = match form.validate() {
                Ok(credentials) => credentials,
                Err(e) => return error_message.set(Some(e.to_string())),
            };
            let login_type = form.login_type;
            let session = session.clone();
            let error_message = error_message.clone();
            let is_loading = is_loading.clone();
            yew::platform::spawn_local(async move {
                is_loading.set(true);
                error_message.set(None);
                match get_api_client().login(login_type, &credentials).await
                {
                    Ok(_) => session.log_in(Session {
                        phone: credentials.phone,
                        login_type,
                    }),
                    Err(e) => error_message.set(Some(e.to_string())),
                }
                is_loading.set(false);
            });
        })
    };

    let on_login_type = {
        let form = form.clone();
        Callback::from(move |value: String| {
            let login_type = if value == LoginType::Subordinate.to_string() {
                LoginType::Subordinate
            } else {
                LoginType::Admin
            };
            form.set(LoginForm {
                login_type,
                ..(*form).clone()
            });
        })
    };

    let login_types = [LoginType::Admin, LoginType::Subordinate]
        .into_iter()
        .map(|t| (AttrValue::from(t.to_string()), AttrValue::from(t.label())))
        .collect::<Vec<_>>();

    html! {
        <div class="min-h-screen flex items-center justify-center bg-neutral-100 px-4">
            <form
                onsubmit={on_submit}
                class="w-full max-w-sm bg-white rounded-lg shadow p-8 space-y-4"
            >
                <h1 class="text-2xl font-semibold text-neutral-900 text-center">
                    {"Admin Login"}
                </h1>
                <SelectField
                    label="Login as"
                    options={login_types}
                    selected={form.login_type.to_string()}
                    on_change={on_login_type}
                />
                <TextField
                    label="Phone"
                    value={form.phone.clone()}
                    on_change={field_setter(&form, |f, v| f.phone = v)}
                />
                <TextField
                    label="Password"
                    input_type="password"
                    value={form.password.clone()}
                    on_change={field_setter(&form, |f, v| f.password = v)}
                />
                if let Some(error) = &*error_message {
                    <p class="text-sm text-red-600">{error}</p>
                }
                <button
                    type="submit"
                    disabled={*is_loading}
                    class={classes!(primary_button(), "w-full")}
                >
                    {if *is_loading { "Logging in..." } else { "Login" }}
                </button>
            </form>
        </div>
    }
}
