use payloads::forms::SocialLinksForm;
use payloads::responses::SocialLinks;
use payloads::{
    ClientError, DEFAULT_PAGE_SIZE, PageRequest, PagedResult, SocialLinkId,
};
use yew::prelude::*;

use crate::components::{
    ConfirmDialog, PageHeader, PaginatedTable, TextField, primary_button,
    row_action, secondary_button,
};
use crate::contexts::toast::use_toast;
use crate::get_api_client;
use crate::hooks::{use_paged_list, use_title};
use crate::utils::field_setter;

#[function_component]
pub fn SocialMediaPage() -> Html {
    use_title("Social Media");
    let toast = use_toast();
    let form = use_state(SocialLinksForm::default);
    let editing = use_state(|| None::<SocialLinkId>);
    let deleting = use_state(|| None::<SocialLinkId>);
    let is_saving = use_state(|| false);

    let list = use_paged_list(
        Some(PageRequest::first(DEFAULT_PAGE_SIZE)),
        |request: PageRequest| async move {
            let links = get_api_client().list_social_links().await?;
            Ok::<_, ClientError>(PagedResult::paginate_locally(
                links, &request,
            ))
        },
    );

    let on_submit = {
        let form = form.clone();
        let editing = editing.clone();
        let toast = toast.clone();
        let is_saving = is_saving.clone();
        let refetch = list.refetch();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let details = match form.validate() {
                Ok(details) => details,
                Err(e) => return toast.error(e.to_string()),
            };
            let form = form.clone();
            let editing = editing.clone();
            let toast = toast.clone();
            let is_saving = is_saving.clone();
            let refetch = refetch.clone();
            yew::platform::spawn_local(async move {
                is_saving.set(true);
                let client = get_api_client();
                let result = match &*editing {
                    Some(id) => client.update_social_links(id, &details).await,
                    None => client.create_social_links(&details).await,
                };
                match result {
                    Ok(message) => {
                        toast.success(message);
                        form.set(SocialLinksForm::default());
                        editing.set(None);
                        refetch.emit(());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
                is_saving.set(false);
            });
        })
    };

    let on_cancel_edit = {
        let form = form.clone();
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(SocialLinksForm::default());
            editing.set(None);
        })
    };

    let on_delete = {
        let deleting = deleting.clone();
        let toast = toast.clone();
        let refetch = list.refetch();
        Callback::from(move |_| {
            let Some(id) = (*deleting).clone() else {
                return;
            };
            let deleting = deleting.clone();
            let toast = toast.clone();
            let refetch = refetch.clone();
            yew::platform::spawn_local(async move {
                match get_api_client().delete_social_links(&id).await {
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

    let render_row = {
        let form = form.clone();
        let editing = editing.clone();
        let deleting = deleting.clone();
        Callback::from(move |(links, index): (SocialLinks, u64)| {
            let on_edit = {
                let form = form.clone();
                let editing = editing.clone();
                let links = links.clone();
                Callback::from(move |_: MouseEvent| {
                    form.set(SocialLinksForm::from_links(&links));
                    editing.set(Some(links.id.clone()));
                })
            };
            let on_delete = {
                let deleting = deleting.clone();
                let id = links.id.clone();
                Callback::from(move |_: MouseEvent| {
                    deleting.set(Some(id.clone()))
                })
            };
            html! {
                <tr key={links.id.to_string()}>
                    <td class="px-4 py-3 text-neutral-500">{index + 1}</td>
                    <td class="px-4 py-3">
                        <a href={links.telegram_username_link.clone()} target="_blank" class="text-blue-600 hover:underline">
                            {&links.telegram_username_link}
                        </a>
                    </td>
                    <td class="px-4 py-3">
                        <a href={links.telegram_group_link.clone()} target="_blank" class="text-blue-600 hover:underline">
                            {&links.telegram_group_link}
                        </a>
                    </td>
                    <td class="px-4 py-3 whitespace-nowrap">
                        <button onclick={on_edit} class={row_action(false)}>
                            {"Edit"}
                        </button>
                        <button onclick={on_delete} class={row_action(true)}>
                            {"Delete"}
                        </button>
                    </td>
                </tr>
            }
        })
    };

    let header = html! {
        <tr>
            <th class="px-4 py-3">{"#"}</th>
            <th class="px-4 py-3">{"Telegram Personal"}</th>
            <th class="px-4 py-3">{"Telegram Group"}</th>
            <th class="px-4 py-3">{"Actions"}</th>
        </tr>
    };

    let close_delete = {
        let deleting = deleting.clone();
        Callback::from(move |_| deleting.set(None))
    };

    html! {
        <div class="space-y-8 max-w-4xl">
            <PageHeader title="Manage Telegram Links" />
            <form onsubmit={on_submit} class="bg-white rounded-lg shadow-sm border border-neutral-200 p-6 space-y-4">
                <TextField
                    label="Telegram personal link"
                    value={form.telegram_username_link.clone()}
                    on_change={field_setter(&form, |f, v| f.telegram_username_link = v)}
                    placeholder="https://t.me/username"
                />
                <TextField
                    label="Telegram group link"
                    value={form.telegram_group_link.clone()}
                    on_change={field_setter(&form, |f, v| f.telegram_group_link = v)}
                    placeholder="https://t.me/+group"
                />
                <div class="flex gap-3">
                    <button type="submit" disabled={*is_saving} class={primary_button()}>
                        {if editing.is_some() { "Update Links" } else { "Save Links" }}
                    </button>
                    if editing.is_some() {
                        <button type="button" onclick={on_cancel_edit} class={secondary_button()}>
                            {"Cancel"}
                        </button>
                    }
                </div>
            </form>
            if let Some(error) = &list.fetch.error {
                <p class="text-sm text-red-600">{error}</p>
            }
            <PaginatedTable<SocialLinks>
                rows={list.rows()}
                header={header}
                render_row={render_row}
                empty_message="No links saved"
                current_page={list.page}
                total_pages={list.total_pages()}
                total_items={list.total_items()}
                page_size={list.page_size}
                on_page_change={list.set_page.clone()}
                loading={list.is_loading()}
                columns={4}
            />
            if deleting.is_some() {
                <ConfirmDialog
                    title="Delete links"
                    message="This pair of Telegram links will be removed."
                    on_confirm={on_delete}
                    on_close={close_delete}
                />
            }
        </div>
    }
}
