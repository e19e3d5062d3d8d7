use payloads::responses::{Purchase, Recharge, TeamEntry, User, Withdrawal};
use payloads::{DEFAULT_PAGE_SIZE, PageRequest, TeamLevel, UserId};
use yew::prelude::*;

use crate::components::{
    ConfirmDialog, PageHeader, PaginatedTable, RechargePanel, danger_button,
    secondary_button,
};
use crate::contexts::toast::use_toast;
use crate::get_api_client;
use crate::hooks::{use_fetch, use_paged_list};
use crate::utils::{format_amount, format_timestamp};

#[derive(Properties, PartialEq)]
pub struct UserDetailProps {
    /// The row the admin picked; shown until the fresh details arrive.
    pub user: User,
    pub on_back: Callback<()>,
    pub on_deleted: Callback<()>,
}

/// One user's details and histories. Every history pages on its own.
#[function_component]
pub fn UserDetail(props: &UserDetailProps) -> Html {
    let toast = use_toast();
    let details = use_fetch(Some(props.user.id.clone()), |id: UserId| {
        async move { get_api_client().user_details(&id).await }
    });
    let recharges_reload = use_state(|| 0u32);
    let confirm_delete = use_state(|| false);
    let is_deleting = use_state(|| false);

    let user = details.data.clone().unwrap_or_else(|| props.user.clone());

    let on_adjusted = {
        let refetch = details.refetch.clone();
        let recharges_reload = recharges_reload.clone();
        Callback::from(move |_| {
            refetch.emit(());
            recharges_reload.set(*recharges_reload + 1);
        })
    };

    let on_delete = {
        let toast = toast.clone();
        let user_id = user.id.clone();
        let is_deleting = is_deleting.clone();
        let confirm_delete = confirm_delete.clone();
        let on_deleted = props.on_deleted.clone();
        Callback::from(move |_| {
            let toast = toast.clone();
            let user_id = user_id.clone();
            let is_deleting = is_deleting.clone();
            let confirm_delete = confirm_delete.clone();
            let on_deleted = on_deleted.clone();
            yew::platform::spawn_local(async move {
                is_deleting.set(true);
                match get_api_client().delete_user(&user_id).await {
                    Ok(message) => {
                        toast.success(message);
                        confirm_delete.set(false);
                        on_deleted.emit(());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
                is_deleting.set(false);
            });
        })
    };

    let open_confirm = {
        let confirm_delete = confirm_delete.clone();
        Callback::from(move |_: MouseEvent| confirm_delete.set(true))
    };
    let close_confirm = {
        let confirm_delete = confirm_delete.clone();
        Callback::from(move |_| confirm_delete.set(false))
    };
    let on_back = props.on_back.reform(|_: MouseEvent| ());

    let facts = [
        ("Phone", user.phone.clone()),
        ("Balance", format_amount(user.balance)),
        ("Total buy", format_amount(user.total_buy)),
        ("VIP level", user.vip_level().to_string()),
        ("Withdraw limit", format_amount(user.withdraw_limit)),
        ("Spins today", user.lucky_spin.spins_today.to_string()),
        (
            "Referred by",
            user.referred_by.clone().unwrap_or_else(|| "-".into()),
        ),
        ("Joined", format_timestamp(user.created_at)),
    ];

    html! {
        <div class="space-y-8">
            <PageHeader title={format!("User {}", user.phone)}>
                <button onclick={on_back} class={secondary_button()}>
                    {"Back"}
                </button>
                <button onclick={open_confirm} class={danger_button()}>
                    {"Delete User"}
                </button>
            </PageHeader>

            if let Some(error) = &details.error {
                <p class="text-sm text-red-600">{error}</p>
            }

            <Section title="Details">
                <dl class="grid gap-4 sm:grid-cols-4 text-sm">
                    {for facts.into_iter().map(|(label, value)| html! {
                        <div>
                            <dt class="text-neutral-500">{label}</dt>
                            <dd class="font-medium text-neutral-900">{value}</dd>
                        </div>
                    })}
                </dl>
                if let Some(bank) = &user.bank_details {
                    <p class="mt-4 text-sm text-neutral-600">
                        {format!(
                            "{} · {} · {} · {} · {}",
                            bank.holder_name,
                            bank.account_number,
                            bank.ifsc_code,
                            bank.bank_name,
                            bank.upi_id
                        )}
                    </p>
                }
            </Section>

            <Section title="Adjust Balance">
                <RechargePanel
                    phone={Some(AttrValue::from(user.phone.clone()))}
                    known_balance={Some(user.balance)}
                    on_adjusted={on_adjusted}
                />
            </Section>

            {for TeamLevel::ALL.into_iter().map(|level| html! {
                <Section key={level.to_string()} title={level.label()}>
                    <TeamTable user_id={user.id.clone()} level={level} />
                </Section>
            })}
            <Section title="Purchases">
                <PurchaseTable user_id={user.id.clone()} />
            </Section>
            <Section title="Recharges">
                <RechargeTable
                    user_id={user.id.clone()}
                    reload={*recharges_reload}
                />
            </Section>
            <Section title="Withdrawals">
                <WithdrawalTable user_id={user.id.clone()} />
            </Section>

            if *confirm_delete {
                <ConfirmDialog
                    title="Delete user"
                    message={format!(
                        "User {} and their records will be removed.",
                        user.phone
                    )}
                    on_confirm={on_delete}
                    on_close={close_confirm}
                    is_loading={*is_deleting}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SectionProps {
    title: AttrValue,
    children: Html,
}

#[function_component]
fn Section(props: &SectionProps) -> Html {
    html! {
        <section class="bg-white rounded-lg shadow-sm border border-neutral-200 p-6">
            <h2 class="text-lg font-semibold text-neutral-900 mb-4">
                {&props.title}
            </h2>
            {props.children.clone()}
        </section>
    }
}

fn cell(content: impl ToString) -> Html {
    html! { <td class="px-4 py-3">{content.to_string()}</td> }
}

fn heading(labels: &[&'static str]) -> Html {
    html! {
        <tr>
            {for labels.iter().map(|label| html! {
                <th class="px-4 py-3">{*label}</th>
            })}
        </tr>
    }
}

fn first_page() -> Option<PageRequest> {
    Some(PageRequest::first(DEFAULT_PAGE_SIZE))
}

#[derive(Properties, PartialEq)]
struct TeamTableProps {
    user_id: UserId,
    level: TeamLevel,
}

#[function_component]
fn TeamTable(props: &TeamTableProps) -> Html {
    let user_id = props.user_id.clone();
    let level = props.level;
    let list = use_paged_list(first_page(), move |request: PageRequest| {
        let user_id = user_id.clone();
        async move {
            get_api_client().user_team(&user_id, level, &request).await
        }
    });

    let render_row = Callback::from(|(entry, index): (TeamEntry, u64)| {
        let members = entry
            .ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        html! {
            <tr>
                {cell(index + 1)}
                {cell(members)}
                {cell(format_amount(entry.total_recharge))}
                {cell(format_amount(entry.total_commission))}
            </tr>
        }
    });

    html! {
        <PaginatedTable<TeamEntry>
            rows={list.rows()}
            header={heading(&["#", "Members", "Total Recharge", "Commission"])}
            render_row={render_row}
            empty_message="No team members"
            current_page={list.page}
            total_pages={list.total_pages()}
            total_items={list.total_items()}
            page_size={list.page_size}
            on_page_change={list.set_page.clone()}
            loading={list.is_loading()}
            columns={4}
        />
    }
}

#[derive(Properties, PartialEq)]
struct HistoryProps {
    user_id: UserId,
    #[prop_or_default]
    reload: u32,
}

#[function_component]
fn PurchaseTable(props: &HistoryProps) -> Html {
    let user_id = props.user_id.clone();
    let list = use_paged_list(first_page(), move |request: PageRequest| {
        let user_id = user_id.clone();
        async move { get_api_client().user_purchases(&user_id, &request).await }
    });

    let render_row = Callback::from(|(purchase, index): (Purchase, u64)| {
        html! {
            <tr>
                {cell(index + 1)}
                {cell(purchase.product_name)}
                {cell(format_amount(purchase.amount))}
                {cell(format_timestamp(purchase.created_at))}
            </tr>
        }
    });

    html! {
        <PaginatedTable<Purchase>
            rows={list.rows()}
            header={heading(&["#", "Product", "Amount", "Date"])}
            render_row={render_row}
            empty_message="No purchases"
            current_page={list.page}
            total_pages={list.total_pages()}
            total_items={list.total_items()}
            page_size={list.page_size}
            on_page_change={list.set_page.clone()}
            loading={list.is_loading()}
            columns={4}
        />
    }
}

#[function_component]
fn RechargeTable(props: &HistoryProps) -> Html {
    let user_id = props.user_id.clone();
    let list = use_paged_list(first_page(), move |request: PageRequest| {
        let user_id = user_id.clone();
        async move { get_api_client().user_recharges(&user_id, &request).await }
    });

    {
        let refetch = list.refetch();
        use_effect_with(props.reload, move |reload| {
            if *reload > 0 {
                refetch.emit(());
            }
        });
    }

    let render_row = Callback::from(|(recharge, index): (Recharge, u64)| {
        html! {
            <tr>
                {cell(index + 1)}
                {cell(recharge.utr.unwrap_or_else(|| "-".into()))}
                {cell(format_amount(recharge.amount))}
                {cell(recharge.status)}
                {cell(format_timestamp(recharge.created_at))}
            </tr>
        }
    });

    html! {
        <PaginatedTable<Recharge>
            rows={list.rows()}
            header={heading(&["#", "UTR", "Amount", "Status", "Date"])}
            render_row={render_row}
            empty_message="No recharges"
            current_page={list.page}
            total_pages={list.total_pages()}
            total_items={list.total_items()}
            page_size={list.page_size}
            on_page_change={list.set_page.clone()}
            loading={list.is_loading()}
            columns={5}
        />
    }
}

#[function_component]
fn WithdrawalTable(props: &HistoryProps) -> Html {
    let user_id = props.user_id.clone();
    let list = use_paged_list(first_page(), move |request: PageRequest| {
        let user_id = user_id.clone();
        async move {
            get_api_client().user_withdrawals(&user_id, &request).await
        }
    });

    let render_row =
        Callback::from(|(withdrawal, index): (Withdrawal, u64)| {
            html! {
                <tr>
                    {cell(index + 1)}
                    {cell(format_amount(withdrawal.amount))}
                    {cell(withdrawal.status)}
                    {cell(format_timestamp(withdrawal.created_at))}
                </tr>
            }
        });

    html! {
        <PaginatedTable<Withdrawal>
            rows={list.rows()}
            header={heading(&["#", "Amount", "Status", "Date"])}
            render_row={render_row}
            empty_message="No withdrawals"
            current_page={list.page}
            total_pages={list.total_pages()}
            total_items={list.total_items()}
            page_size={list.page_size}
            on_page_change={list.set_page.clone()}
            loading={list.is_loading()}
            columns={4}
        />
    }
}
