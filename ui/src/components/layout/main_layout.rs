use payloads::session::Session;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{State, components::layout::Sidebar};

#[derive(Properties, PartialEq)]
pub struct MainLayoutProps {
    pub session: Session,
    pub children: Children,
}

#[function_component]
pub fn MainLayout(props: &MainLayoutProps) -> Html {
    let (state, dispatch) = use_store::<State>();

    let on_toggle = dispatch.reduce_mut_callback(|state| {
        state.sidebar_collapsed = !state.sidebar_collapsed;
    });

    html! {
        <div class="min-h-screen flex bg-neutral-100 text-neutral-900">
            <Sidebar
                session={props.session.clone()}
                collapsed={state.sidebar_collapsed}
            />
            <div class="flex-1 min-w-0">
                <header class="h-16 bg-white border-b border-neutral-200 flex items-center justify-between px-6">
                    <button
                        onclick={on_toggle}
                        class="text-neutral-500 hover:text-neutral-800"
                        title="Toggle menu"
                    >
                        {"☰"}
                    </button>
                    <span class="text-sm text-neutral-600">
                        {format!(
                            "{} · {}",
                            props.session.phone,
                            props.session.login_type.label()
                        )}
                    </span>
                </header>
                <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                    {for props.children.iter()}
                </main>
            </div>
        </div>
    }
}
