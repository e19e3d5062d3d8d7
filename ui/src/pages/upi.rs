use payloads::forms::UpiForm;
use payloads::responses::UpiRecord;
use payloads::{
    ClientError, DEFAULT_PAGE_SIZE, PageRequest, PagedResult, UpiRecordId,
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
pub fn UpiPage() -> Html {
    use_title("UPI Settings");
    let toast = use_toast();
    let form = use_state(UpiForm::default);
    let editing = use_state(|| None::<UpiRecordId>);
    let deleting = use_state(|| None::<UpiRecord>);
    let is_saving = use_state(|| false);

    let list = use_paged_list(
        Some(PageRequest::first(DEFAULT_PAGE_SIZE)),
        |request: PageRequest| async move {
            let records = get_api_client().list_upis().await?;
            Ok::<_, ClientError>(PagedResult::paginate_locally(
                records, &request,
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
                    Some(id) => client
                        .update_upi(id, &details)
                        .await
                        .map(|_| "UPI updated successfully"),
                    None => client
                        .create_upi(&details)
                        .await
                        .map(|_| "UPI created successfully"),
                };
                match result {
                    Ok(message) => {
                        toast.success(message);
                        form.set(UpiForm::default());
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
            form.set(UpiForm::default());
            editing.set(None);
        })
    };

    let on_delete = {
        let deleting = deleting.clone();
        let toast = toast.clone();
        let refetch = list.refetch();
        Callback::from(move |_| {
            let Some(record) = (*deleting).clone() else {
                return;
            };
            let deleting = deleting.clone();
            let toast = toast.clone();
            let refetch = refetch.clone();
            yew::platform::spawn_local(async move {
                match get_api_client().delete_upi(&record.id).await {
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
        Callback::from(move |(record, index): (UpiRecord, u64)| {
            let on_edit = {
                let form = form.clone();
                let editing = editing.clone();
                let record = record.clone();
                Callback::from(move |_: MouseEvent| {
                    form.set(UpiForm::from_record(&record));
                    editing.set(Some(record.id.clone()));
                })
            };
            let on_delete = {
                let deleting = deleting.clone();
                let record = record.clone();
                Callback::from(move |_: MouseEvent| {
                    deleting.set(Some(record.clone()))
                })
            };
            html! {
                <tr key={record.id.to_string()}>
                    <td class="px-4 py-3 text-neutral-500">{index + 1}</td>
                    <td class="px-4 py-3 font-mono">{&record.upi_id}</td>
                    <td class="px-4 py-3">{&record.payee_name}</td>
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
            <th class="px-4 py-3">{"UPI ID"}</th>
            <th class="px-4 py-3">{"Payee Name"}</th>
            <th class="px-4 py-3">{"Actions"}</th>
        </tr>
    };

    let close_delete = {
        let deleting = deleting.clone();
        Callback::from(move |_| deleting.set(None))
    };

    html! {
        <div class="space-y-8 max-w-4xl">
            <PageHeader title="UPI Management" />
            <form onsubmit={on_submit} class="bg-white rounded-lg shadow-sm border border-neutral-200 p-6 space-y-4">
                <div class="grid gap-4 sm:grid-cols-2">
                    <TextField
                        label="UPI ID"
                        value={form.upi_id.clone()}
                        on_change={field_setter(&form, |f, v| f.upi_id = v)}
                        placeholder="example@bank"
                    />
                    <TextField
                        label="Payee name"
                        value={form.payee_name.clone()}
                        on_change={field_setter(&form, |f, v| f.payee_name = v)}
                        placeholder="Name"
                    />
                </div>
                <div class="flex gap-3">
                    <button type="submit" disabled={*is_saving} class={primary_button()}>
                        {if editing.is_some() { "Update UPI" } else { "Add UPI" }}
                    </button>
                    if editing.is_some() {
                        <button type="button" onclick={on_cancel_edit} class={secondary_button()}>
                            {"Cancel"}
                        </button>
                    }
                </div>
            </form>
            <div>
                <h2 class="text-lg font-semibold text-neutral-900 mb-4">
                    {"Stored UPI Records"}
                </h2>
                if let Some(error) = &list.fetch.error {
                    <p class="mb-4 text-sm text-red-600">{error}</p>
                }
                <PaginatedTable<UpiRecord>
                    rows={list.rows()}
                    header={header}
                    render_row={render_row}
                    empty_message="No UPI records yet"
                    current_page={list.page}
                    total_pages={list.total_pages()}
                    total_items={list.total_items()}
                    page_size={list.page_size}
                    on_page_change={list.set_page.clone()}
                    loading={list.is_loading()}
                    columns={4}
                />
            </div>
            if let Some(record) = &*deleting {
                <ConfirmDialog
                    title="Delete UPI"
                    message={format!("{} will be removed.", record.upi_id)}
                    on_confirm={on_delete}
                    on_close={close_delete}
                />
            }
        </div>
    }
}
