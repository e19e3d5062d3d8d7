use payloads::forms::{AdminCredentialsForm, SubordinateForm};
use payloads::requests::AdminCredentials;
use payloads::responses::Subordinate;
use payloads::{DEFAULT_PAGE_SIZE, PageRequest, PagedResult, SubordinateId};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::{
    ConfirmDialog, PageHeader, PaginatedTable, TextField, input_class,
    primary_button, row_action, secondary_button,
};
use crate::contexts::session::use_session;
use crate::contexts::toast::use_toast;
use crate::get_api_client;
use crate::hooks::{use_fetch, use_title};
use crate::utils::field_setter;

/// Subordinate logins, managed on behalf of the admin whose credentials
/// are entered at the top. Every call re-sends those credentials.
#[function_component]
pub fn SubordinatesPage() -> Html {
    use_title("Subordinates");
    let session = use_session();

    if !session.is_admin() {
        return html! {
            <div>
                <PageHeader title="Subordinates" />
                <p class="text-sm text-neutral-600">
                    {"Only the admin can manage subordinates."}
                </p>
            </div>
        };
    }

    html! { <SubordinateManager /> }
}

#[function_component]
fn SubordinateManager() -> Html {
    let toast = use_toast();
    let admin_form = use_state(AdminCredentialsForm::default);
    let admin = use_state(|| None::<AdminCredentials>);
    let new_form = use_state(SubordinateForm::default);
    let editing = use_state(|| None::<(SubordinateId, SubordinateForm)>);
    let deleting = use_state(|| None::<Subordinate>);
    let page = use_state(|| 1u32);

    let subordinates = use_fetch((*admin).clone(), |admin| async move {
        get_api_client().list_subordinates(&admin).await
    });

    let on_fetch = {
        let admin_form = admin_form.clone();
        let admin = admin.clone();
        let page = page.clone();
        let toast = toast.clone();
        let refetch = subordinates.refetch.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match admin_form.validate() {
                Ok(credentials) if (*admin).as_ref() == Some(&credentials) => {
                    refetch.emit(())
                }
                Ok(credentials) => {
                    page.set(1);
                    admin.set(Some(credentials));
                }
                Err(e) => toast.error(e.to_string()),
            }
        })
    };

    // Mutations use the credentials as typed now, not as last fetched.
    let current_admin = {
        let admin_form = admin_form.clone();
        let toast = toast.clone();
        move || match admin_form.validate() {
            Ok(admin) => Some(admin),
            Err(e) => {
                toast.error(e.to_string());
                None
            }
        }
    };

    let on_create = {
        let new_form = new_form.clone();
        let toast = toast.clone();
        let refetch = subordinates.refetch.clone();
        let current_admin = current_admin.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(admin) = current_admin() else {
                return;
            };
            let details = match new_form.validate_create(&admin) {
                Ok(details) => details,
                Err(e) => return toast.error(e.to_string()),
            };
            let new_form = new_form.clone();
            let toast = toast.clone();
            let refetch = refetch.clone();
            yew::platform::spawn_local(async move {
                match get_api_client().create_subordinate(&details).await {
                    Ok(message) => {
                        toast.success(message);
                        new_form.set(SubordinateForm::default());
                        refetch.emit(());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
            });
        })
    };

    let on_save_edit = {
        let editing = editing.clone();
        let toast = toast.clone();
        let refetch = subordinates.refetch.clone();
        let current_admin = current_admin.clone();
        Callback::from(move |_: MouseEvent| {
            let Some((id, form)) = (*editing).clone() else {
                return;
            };
            let Some(admin) = current_admin() else {
                return;
            };
            let details = match form.validate_update(&admin) {
                Ok(details) => details,
                Err(e) => return toast.error(e.to_string()),
            };
            let editing = editing.clone();
            let toast = toast.clone();
            let refetch = refetch.clone();
            yew::platform::spawn_local(async move {
                match get_api_client().update_subordinate(&id, &details).await
                {
                    Ok(message) => {
                        toast.success(message);
                        editing.set(None);
                        refetch.emit(());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
            });
        })
    };

    let on_delete = {
        let deleting = deleting.clone();
        let toast = toast.clone();
        let refetch = subordinates.refetch.clone();
        Callback::from(move |_| {
            let Some(subordinate) = (*deleting).clone() else {
                return;
            };
            let Some(admin) = current_admin() else {
                return;
            };
            let deleting = deleting.clone();
            let toast = toast.clone();
            let refetch = refetch.clone();
            yew::platform::spawn_local(async move {
                let client = get_api_client();
                match client.delete_subordinate(&subordinate.id, &admin).await
                {
                    Ok(message) => {
                        toast.success(message);
                        refetch.emit(());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
                deleting.set(None);
            });
        })
    };

    let request = PageRequest::first(DEFAULT_PAGE_SIZE).at_page(*page);
    let paged = subordinates
        .data
        .clone()
        .map(|all| PagedResult::paginate_locally(all, &request));

    let render_row = {
        let editing = editing.clone();
        let deleting = deleting.clone();
        let on_save_edit = on_save_edit.clone();
        Callback::from(move |(subordinate, index): (Subordinate, u64)| {
            let row_editing = (*editing)
                .as_ref()
                .filter(|(id, _)| *id == subordinate.id)
                .map(|(_, form)| form.clone());
            let actions = match row_editing {
                Some(form) => edit_row_controls(
                    &editing,
                    &subordinate,
                    form,
                    on_save_edit.clone(),
                ),
                None => {
                    let on_edit = {
                        let editing = editing.clone();
                        let id = subordinate.id.clone();
                        Callback::from(move |_: MouseEvent| {
                            editing.set(Some((
                                id.clone(),
                                SubordinateForm::default(),
                            )))
                        })
                    };
                    let on_delete = {
                        let deleting = deleting.clone();
                        let subordinate = subordinate.clone();
                        Callback::from(move |_: MouseEvent| {
                            deleting.set(Some(subordinate.clone()))
                        })
                    };
                    html! {
                        <>
                            <button onclick={on_edit} class={row_action(false)}>
                                {"Edit"}
                            </button>
                            <button onclick={on_delete} class={row_action(true)}>
                                {"Delete"}
                            </button>
                        </>
                    }
                }
            };
            html! {
                <tr key={subordinate.id.to_string()}>
                    <td class="px-4 py-3 text-neutral-500">{index + 1}</td>
                    <td class="px-4 py-3">{&subordinate.phone}</td>
                    <td class="px-4 py-3">{&subordinate.user_type}</td>
                    <td class="px-4 py-3">{actions}</td>
                </tr>
            }
        })
    };

    let header = html! {
        <tr>
            <th class="px-4 py-3">{"#"}</th>
            <th class="px-4 py-3">{"Phone"}</th>
            <th class="px-4 py-3">{"Type"}</th>
            <th class="px-4 py-3">{"Actions"}</th>
        </tr>
    };

    let on_page_change = {
        let page = page.clone();
        Callback::from(move |next: u32| page.set(next))
    };
    let close_delete = {
        let deleting = deleting.clone();
        Callback::from(move |_| deleting.set(None))
    };

    html! {
        <div class="space-y-8 max-w-4xl">
            <PageHeader title="Subordinates" />
            <form onsubmit={on_fetch} class="bg-white rounded-lg shadow-sm border border-neutral-200 p-6 space-y-4">
                <h2 class="text-lg font-semibold text-neutral-900">{"Admin Credentials"}</h2>
                <div class="grid gap-4 sm:grid-cols-2">
                    <TextField
                        label="Admin phone"
                        value={admin_form.phone.clone()}
                        on_change={field_setter(&admin_form, |f, v| f.phone = v)}
                    />
                    <TextField
                        label="Admin password"
                        input_type="password"
                        value={admin_form.password.clone()}
                        on_change={field_setter(&admin_form, |f, v| f.password = v)}
                    />
                </div>
                <button type="submit" class={secondary_button()}>
                    {"Fetch Subordinates"}
                </button>
            </form>
            <form onsubmit={on_create} class="bg-white rounded-lg shadow-sm border border-neutral-200 p-6 space-y-4">
                <h2 class="text-lg font-semibold text-neutral-900">{"Create Subordinate"}</h2>
                <div class="grid gap-4 sm:grid-cols-2">
                    <TextField
                        label="Phone"
                        value={new_form.phone.clone()}
                        on_change={field_setter(&new_form, |f, v| f.phone = v)}
                    />
                    <TextField
                        label="Password"
                        input_type="password"
                        value={new_form.password.clone()}
                        on_change={field_setter(&new_form, |f, v| f.password = v)}
                    />
                </div>
                <button type="submit" class={primary_button()}>{"Create"}</button>
            </form>
            if admin.is_some() {
                if let Some(error) = &subordinates.error {
                    <p class="text-sm text-red-600">{error}</p>
                }
                <PaginatedTable<Subordinate>
                    rows={paged.as_ref().map(|p| p.items.clone()).unwrap_or_default()}
                    header={header}
                    render_row={render_row}
                    empty_message="No subordinates"
                    current_page={*page}
                    total_pages={paged.as_ref().map(|p| p.total_pages).unwrap_or(1)}
                    total_items={paged.as_ref().map(|p| p.total)}
                    page_size={DEFAULT_PAGE_SIZE}
                    on_page_change={on_page_change}
                    loading={subordinates.is_loading}
                    columns={4}
                />
            }
            if let Some(subordinate) = &*deleting {
                <ConfirmDialog
                    title="Delete subordinate"
                    message={format!("{} will no longer be able to log in.", subordinate.phone)}
                    on_confirm={on_delete}
                    on_close={close_delete}
                />
            }
        </div>
    }
}

/// Phone and password inputs plus Save/Cancel for the row being edited.
/// Blank inputs leave that field unchanged.
fn edit_row_controls(
    editing: &UseStateHandle<Option<(SubordinateId, SubordinateForm)>>,
    subordinate: &Subordinate,
    form: SubordinateForm,
    on_save: Callback<MouseEvent>,
) -> Html {
    let id = subordinate.id.clone();
    let on_phone = {
        let editing = editing.clone();
        let id = id.clone();
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let phone = input.value();
            editing.set(Some((
                id.clone(),
                SubordinateForm {
                    phone,
                    ..form.clone()
                },
            )));
        })
    };
    let on_password = {
        let editing = editing.clone();
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let password = input.value();
            editing.set(Some((
                id.clone(),
                SubordinateForm {
                    password,
                    ..form.clone()
                },
            )));
        })
    };
    let on_cancel = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(None))
    };

    html! {
        <div class="flex items-center gap-2">
            <input
                type="text"
                value={form.phone.clone()}
                placeholder={subordinate.phone.clone()}
                oninput={on_phone}
                class={classes!(input_class(), "w-32")}
            />
            <input
                type="password"
                value={form.password.clone()}
                placeholder="New password"
                oninput={on_password}
                class={classes!(input_class(), "w-32")}
            />
            <button onclick={on_save} class={row_action(false)}>{"Save"}</button>
            <button onclick={on_cancel} class={row_action(false)}>{"Cancel"}</button>
        </div>
    }
}
