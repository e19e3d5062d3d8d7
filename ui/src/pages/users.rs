use payloads::responses::User;
use payloads::{ClientError, DEFAULT_PAGE_SIZE, PageRequest, PagedResult};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::UserDetail;
use crate::components::{
    BankDetailsModal, DraftCell, PageHeader, PaginatedTable, SpinsToday,
    WithdrawLimit, input_class, primary_button, row_action,
    secondary_button,
};
use crate::get_api_client;
use crate::hooks::{use_paged_list, use_title};
use crate::utils::format_amount;

const SEARCH_FILTER: &str = "search";
const DEMO_FILTER: &str = "isDemo";

#[derive(Properties, PartialEq)]
pub struct UsersPageProps {
    /// Only list accounts created through the demo account form.
    pub demo_only: bool,
}

/// The user list, and the detail of one user in place of it. The list
/// stays mounted while a detail is open so its page survives the round
/// trip.
#[function_component]
pub fn UsersPage(props: &UsersPageProps) -> Html {
    use_title(if props.demo_only { "Demo Users" } else { "All Users" });
    let selected = use_state(|| None::<User>);
    let reload = use_state(|| 0u32);

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |user: User| selected.set(Some(user)))
    };

    // Coming back refetches so balance changes made in the detail show.
    let on_back = {
        let selected = selected.clone();
        let reload = reload.clone();
        Callback::from(move |_| {
            selected.set(None);
            reload.set(*reload + 1);
        })
    };

    html! {
        <>
            <div class={classes!(selected.is_some().then_some("hidden"))}>
                <UserList
                    demo_only={props.demo_only}
                    reload={*reload}
                    on_select={on_select}
                />
            </div>
            if let Some(user) = &*selected {
                <UserDetail
                    key={user.id.to_string()}
                    user={user.clone()}
                    on_back={on_back.clone()}
                    on_deleted={on_back}
                />
            }
        </>
    }
}

#[derive(Properties, PartialEq)]
struct UserListProps {
    demo_only: bool,
    /// Bumped by the parent to ask for a refetch.
    reload: u32,
    on_select: Callback<User>,
}

#[function_component]
fn UserList(props: &UserListProps) -> Html {
    let query_input = use_state(String::new);
    let search = use_state(|| None::<String>);
    let bank_user = use_state(|| None::<User>);

    let scope = {
        let request = PageRequest::first(DEFAULT_PAGE_SIZE);
        if props.demo_only {
            request.with_filter(DEMO_FILTER, "true")
        } else {
            request
        }
    };

    let listing = use_paged_list(
        search.is_none().then(|| scope.clone()),
        |request: PageRequest| async move {
            get_api_client().list_users(&request).await
        },
    );

    let results = use_paged_list(
        (*search)
            .clone()
            .map(|query| scope.clone().with_filter(SEARCH_FILTER, query)),
        |request: PageRequest| async move {
            let query = request
                .filters()
                .get(SEARCH_FILTER)
                .cloned()
                .unwrap_or_default();
            let demo_only = request.filters().contains_key(DEMO_FILTER);
            let users = get_api_client()
                .search_users(&query)
                .await?
                .into_iter()
                .filter(|user| !demo_only || user.is_demo)
                .collect();
            Ok::<_, ClientError>(PagedResult::paginate_locally(
                users, &request,
            ))
        },
    );

    {
        let refetch = listing.refetch();
        let results_refetch = results.refetch();
        let searching = search.is_some();
        use_effect_with(props.reload, move |reload| {
            if *reload > 0 {
                if searching {
                    results_refetch.emit(());
                } else {
                    refetch.emit(());
                }
            }
        });
    }

    let active = if search.is_some() { &results } else { &listing };
    let refetch = active.refetch();

    let on_query_input = {
        let query_input = query_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            query_input.set(input.value());
        })
    };

    let on_search = {
        let query_input = query_input.clone();
        let search = search.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let query = query_input.trim().to_string();
            search.set((!query.is_empty()).then_some(query));
        })
    };

    let on_clear = {
        let query_input = query_input.clone();
        let search = search.clone();
        Callback::from(move |_: MouseEvent| {
            query_input.set(String::new());
            search.set(None);
        })
    };

    let render_row = {
        let on_select = props.on_select.clone();
        let bank_user = bank_user.clone();
        Callback::from(move |(user, index): (User, u64)| {
            let view = {
                let on_select = on_select.clone();
                let user = user.clone();
                Callback::from(move |_: MouseEvent| {
                    on_select.emit(user.clone())
                })
            };
            let show_bank = {
                let bank_user = bank_user.clone();
                let user = user.clone();
                Callback::from(move |_: MouseEvent| {
                    bank_user.set(Some(user.clone()))
                })
            };
            html! {
                <tr key={user.id.to_string()} class="hover:bg-neutral-50">
                    <td class="px-4 py-3 text-neutral-500">{index + 1}</td>
                    <td class="px-4 py-3">
                        <button onclick={view.clone()} class="font-medium text-blue-600 hover:underline">
                            {&user.phone}
                        </button>
                    </td>
                    <td class="px-4 py-3">
                        {user.referred_by.clone().unwrap_or_else(|| "-".into())}
                    </td>
                    <td class="px-4 py-3">{format_amount(user.total_buy)}</td>
                    <td class="px-4 py-3">{user.vip_level().to_string()}</td>
                    <td class="px-4 py-3">{format_amount(user.balance)}</td>
                    <td class="px-4 py-3">
                        <DraftCell<SpinsToday>
                            user_id={user.id.clone()}
                            value={SpinsToday(user.lucky_spin.spins_today)}
                            on_saved={refetch.clone()}
                        />
                    </td>
                    <td class="px-4 py-3">
                        <DraftCell<WithdrawLimit>
                            user_id={user.id.clone()}
                            value={WithdrawLimit(user.withdraw_limit)}
                            on_saved={refetch.clone()}
                        />
                    </td>
                    <td class="px-4 py-3 whitespace-nowrap">
                        <button onclick={view} class={row_action(false)}>
                            {"Details"}
                        </button>
                        <button onclick={show_bank} class={row_action(false)}>
                            {"Bank"}
                        </button>
                    </td>
                </tr>
            }
        })
    };

    let header = html! {
        <tr>
            <th class="px-4 py-3">{"#"}</th>
            <th class="px-4 py-3">{"Phone"}</th>
            <th class="px-4 py-3">{"Referred By"}</th>
            <th class="px-4 py-3">{"Total Buy"}</th>
            <th class="px-4 py-3">{"VIP Level"}</th>
            <th class="px-4 py-3">{"Balance"}</th>
            <th class="px-4 py-3">{"Spins Today"}</th>
            <th class="px-4 py-3">{"Withdraw Limit"}</th>
            <th class="px-4 py-3">{"Actions"}</th>
        </tr>
    };

    let on_bank_close = {
        let bank_user = bank_user.clone();
        Callback::from(move |_| bank_user.set(None))
    };

    let title = if props.demo_only { "Demo Users" } else { "All Users" };

    html! {
        <div>
            <PageHeader title={title}>
                <form onsubmit={on_search} class="flex items-center gap-2">
                    <input
                        type="search"
                        placeholder="Search by phone or id"
                        value={(*query_input).clone()}
                        oninput={on_query_input}
                        class={input_class()}
                    />
                    <button type="submit" class={primary_button()}>
                        {"Search"}
                    </button>
                    if search.is_some() {
                        <button type="button" onclick={on_clear} class={secondary_button()}>
                            {"Clear"}
                        </button>
                    }
                </form>
            </PageHeader>
            if let Some(error) = &active.fetch.error {
                <p class="mb-4 text-sm text-red-600">{error}</p>
            }
            <PaginatedTable<User>
                rows={active.rows()}
                header={header}
                render_row={render_row}
                empty_message="No users found"
                current_page={active.page}
                total_pages={active.total_pages()}
                total_items={active.total_items()}
                page_size={active.page_size}
                on_page_change={active.set_page.clone()}
                loading={active.is_loading()}
                columns={9}
            />
            if let Some(user) = &*bank_user {
                <BankDetailsModal
                    user={user.clone()}
                    on_close={on_bank_close}
                />
            }
        </div>
    }
}
