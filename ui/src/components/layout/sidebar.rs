use payloads::session::Session;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::contexts::session::use_session;

const LINKS: [Route; 10] = [
    Route::Users,
    Route::DemoUsers,
    Route::DemoAccounts,
    Route::Products,
    Route::Commission,
    Route::Upi,
    Route::QrCodes,
    Route::Giftcodes,
    Route::SocialMedia,
    Route::Subordinates,
];

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub session: Session,
    pub collapsed: bool,
}

#[function_component]
pub fn Sidebar(props: &SidebarProps) -> Html {
    let session = use_session();
    let current = use_route::<Route>();

    if props.collapsed {
        return html! {};
    }

    let on_logout = Callback::from(move |_: MouseEvent| session.log_out());

    let link = |route: Route| {
        let active = current == Some(route);
        let class = if active {
            "block px-4 py-2 rounded-md text-sm font-medium bg-neutral-800 \
             text-white"
        } else {
            "block px-4 py-2 rounded-md text-sm font-medium text-neutral-300 \
             hover:bg-neutral-700 hover:text-white"
        };
        html! {
            <li>
                <Link<Route> to={route} classes={class}>
                    {route.title()}
                </Link<Route>>
            </li>
        }
    };

    html! {
        <aside class="w-60 shrink-0 bg-neutral-900 min-h-screen flex flex-col">
            <div class="h-16 flex items-center px-4 text-lg font-semibold text-white">
                {"Admin Panel"}
            </div>
            <nav class="flex-1 px-2">
                <ul class="space-y-1">
                    {for LINKS
                        .into_iter()
                        .filter(|route| {
                            *route != Route::Subordinates
                                || props.session.is_admin()
                        })
                        .map(link)}
                </ul>
            </nav>
            <button
                onclick={on_logout}
                class="m-4 px-4 py-2 rounded-md text-sm font-medium text-red-300 hover:bg-red-900 hover:text-white"
            >
                {"Logout"}
            </button>
        </aside>
    }
}
