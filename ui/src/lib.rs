use payloads::APIClient;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

mod components;
mod contexts;
mod hooks;
mod logs;
mod pages;
mod utils;

pub use logs::init_logging;

use components::layout::MainLayout;
use components::toast::ToastContainer;
use contexts::session::{SessionProvider, use_session};
use contexts::toast::ToastProvider;
use pages::{
    CommissionPage, DemoAccountsPage, GiftcodesPage, LoginPage, NotFoundPage,
    ProductsPage, QrCodesPage, SocialMediaPage, SubordinatesPage, UpiPage,
    UsersPage,
};

/// Shell state that outlives any single view.
#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    pub sidebar_collapsed: bool,
}

// Global API client - configurable via environment or same-origin fallback
pub fn get_api_client() -> APIClient {
    let address = option_env!("BACKEND_URL")
        .map(str::to_string)
        .unwrap_or_else(same_origin);

    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

fn same_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

#[function_component]
pub fn App() -> Html {
    html! {
        <BrowserRouter>
            <ToastProvider>
                <SessionProvider>
                    <Shell />
                    <ToastContainer />
                </SessionProvider>
            </ToastProvider>
        </BrowserRouter>
    }
}

/// The login card until a session exists, the panel afterwards.
#[function_component]
fn Shell() -> Html {
    let session = use_session();

    match session.current() {
        None => html! { <LoginPage /> },
        Some(current) => html! {
            <MainLayout session={current.clone()}>
                <Switch<Route> render={switch} />
            </MainLayout>
        },
    }
}

#[derive(Debug, Clone, Copy, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/users")]
    Users,
    #[at("/demo-users")]
    DemoUsers,
    #[at("/demo-accounts")]
    DemoAccounts,
    #[at("/products")]
    Products,
    #[at("/commission")]
    Commission,
    #[at("/upi")]
    Upi,
    #[at("/qr-codes")]
    QrCodes,
    #[at("/social-media")]
    SocialMedia,
    #[at("/giftcodes")]
    Giftcodes,
    #[at("/subordinates")]
    Subordinates,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home | Self::Users => "All Users",
            Self::DemoUsers => "Demo Users",
            Self::DemoAccounts => "Create Demo Account",
            Self::Products => "Manage Products",
            Self::Commission => "Commission Settings",
            Self::Upi => "UPI Settings",
            Self::QrCodes => "QR Codes",
            Self::SocialMedia => "Social Media",
            Self::Giftcodes => "Gift Codes",
            Self::Subordinates => "Subordinates",
            Self::NotFound => "Not Found",
        }
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Redirect<Route> to={Route::Users} /> },
        Route::Users => html! { <UsersPage key="all" demo_only=false /> },
        Route::DemoUsers => html! { <UsersPage key="demo" demo_only=true /> },
        Route::DemoAccounts => html! { <DemoAccountsPage /> },
        Route::Products => html! { <ProductsPage /> },
        Route::Commission => html! { <CommissionPage /> },
        Route::Upi => html! { <UpiPage /> },
        Route::QrCodes => html! { <QrCodesPage /> },
        Route::SocialMedia => html! { <SocialMediaPage /> },
        Route::Giftcodes => html! { <GiftcodesPage /> },
        Route::Subordinates => html! { <SubordinatesPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}
