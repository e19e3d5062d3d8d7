use payloads::forms::GiftcodeForm;
use payloads::responses::Giftcode;
use payloads::{
    ClientError, DEFAULT_PAGE_SIZE, GiftcodeId, PageRequest, PagedResult,
};
use yew::prelude::*;

use crate::components::{
    ConfirmDialog, PageHeader, PaginatedTable, TextField, primary_button,
    row_action, secondary_button,
};
use crate::contexts::toast::use_toast;
use crate::get_api_client;
use crate::hooks::{use_paged_list, use_title};
use crate::utils::{field_setter, format_amount};

#[function_component]
pub fn GiftcodesPage() -> Html {
    use_title("Gift Codes");
    let toast = use_toast();
    let form = use_state(GiftcodeForm::default);
    let editing = use_state(|| None::<GiftcodeId>);
    let deleting = use_state(|| None::<Giftcode>);
    let is_saving = use_state(|| false);

    let list = use_paged_list(
        Some(PageRequest::first(DEFAULT_PAGE_SIZE)),
        |request: PageRequest| async move {
            let codes = get_api_client().list_giftcodes().await?;
            Ok::<_, ClientError>(PagedResult::paginate_locally(
                codes, &request,
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
                    Some(id) => client.update_giftcode(id, &details).await,
                    None => client.create_giftcode(&details).await,
                };
                match result {
                    Ok(saved) => {
                        toast.success(format!(
                            "Gift code {} saved",
                            saved.code
                        ));
                        form.set(GiftcodeForm::default());
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
            form.set(GiftcodeForm::default());
            editing.set(None);
        })
    };

    let on_delete = {
        let deleting = deleting.clone();
        let toast = toast.clone();
        let refetch = list.refetch();
        Callback::from(move |_| {
            let Some(giftcode) = (*deleting).clone() else {
                return;
            };
            let deleting = deleting.clone();
            let toast = toast.clone();
            let refetch = refetch.clone();
            yew::platform::spawn_local(async move {
                match get_api_client().delete_giftcode(&giftcode.id).await {
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
        Callback::from(move |(giftcode, index): (Giftcode, u64)| {
            let on_edit = {
                let form = form.clone();
                let editing = editing.clone();
                let giftcode = giftcode.clone();
                Callback::from(move |_: MouseEvent| {
                    form.set(GiftcodeForm::from_giftcode(&giftcode));
                    editing.set(Some(giftcode.id.clone()));
                })
            };
            let on_delete = {
                let deleting = deleting.clone();
                let giftcode = giftcode.clone();
                Callback::from(move |_: MouseEvent| {
                    deleting.set(Some(giftcode.clone()))
                })
            };
            let usage = match giftcode.usage_limit {
                Some(limit) => format!("{} / {limit}", giftcode.used_count),
                None => format!("{} / unlimited", giftcode.used_count),
            };
            html! {
                <tr key={giftcode.id.to_string()}>
                    <td class="px-4 py-3 text-neutral-500">{index + 1}</td>
                    <td class="px-4 py-3 font-mono">{&giftcode.code}</td>
                    <td class="px-4 py-3">{format_amount(giftcode.amount)}</td>
                    <td class="px-4 py-3">{usage}</td>
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
            <th class="px-4 py-3">{"Code"}</th>
            <th class="px-4 py-3">{"Amount"}</th>
            <th class="px-4 py-3">{"Used"}</th>
            <th class="px-4 py-3">{"Actions"}</th>
        </tr>
    };

    let close_delete = {
        let deleting = deleting.clone();
        Callback::from(move |_| deleting.set(None))
    };

    html! {
        <div class="space-y-8 max-w-4xl">
            <PageHeader title="Gift Codes" />
            <form onsubmit={on_submit} class="bg-white rounded-lg shadow-sm border border-neutral-200 p-6 space-y-4">
                <div class="grid gap-4 sm:grid-cols-3">
                    <TextField
                        label="Code"
                        value={form.code.clone()}
                        on_change={field_setter(&form, |f, v| f.code = v)}
                    />
                    <TextField
                        label="Amount"
                        input_type="number"
                        value={form.amount.clone()}
                        on_change={field_setter(&form, |f, v| f.amount = v)}
                    />
                    <TextField
                        label="Usage limit"
                        input_type="number"
                        value={form.usage_limit.clone()}
                        on_change={field_setter(&form, |f, v| f.usage_limit = v)}
                        placeholder="Unlimited"
                    />
                </div>
                <div class="flex gap-3">
                    <button type="submit" disabled={*is_saving} class={primary_button()}>
                        {if editing.is_some() { "Update Code" } else { "Create Code" }}
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
            <PaginatedTable<Giftcode>
                rows={list.rows()}
                header={header}
                render_row={render_row}
                empty_message="No gift codes yet"
                current_page={list.page}
                total_pages={list.total_pages()}
                total_items={list.total_items()}
                page_size={list.page_size}
                on_page_change={list.set_page.clone()}
                loading={list.is_loading()}
                columns={5}
            />
            if let Some(giftcode) = &*deleting {
                <ConfirmDialog
                    title="Delete gift code"
                    message={format!("Gift code {} will be removed.", giftcode.code)}
                    on_confirm={on_delete}
                    on_close={close_delete}
                />
            }
        </div>
    }
}
