use crate::contexts::toast::{
    TOAST_DURATION_MS, Toast, ToastType, use_toast,
};
use gloo_timers::future::TimeoutFuture;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToastItemProps {
    pub toast: Toast,
}

#[function_component]
pub fn ToastItem(props: &ToastItemProps) -> Html {
    let toast_handle = use_toast();
    let toast = &props.toast;

    {
        let toast_handle = toast_handle.clone();
        use_effect_with(toast.id, move |id| {
            let id = *id;
            yew::platform::spawn_local(async move {
                TimeoutFuture::new(TOAST_DURATION_MS).await;
                toast_handle.remove(id);
            });
        });
    }

    let (colors, icon) = match toast.toast_type {
        ToastType::Error => (
            "bg-red-50 border-red-200 text-red-700",
            "✕",
        ),
        ToastType::Success => (
            "bg-green-50 border-green-200 text-green-700",
            "✓",
        ),
    };

    let on_close = {
        let toast_id = toast.id;
        Callback::from(move |_| toast_handle.remove(toast_id))
    };

    html! {
        <div class={classes!(
            "relative", "p-4", "rounded-lg", "border", "shadow-lg", colors
        )}>
            <div class="flex items-start space-x-3">
                <span class="flex-shrink-0 text-sm font-medium">{icon}</span>
                <p class="flex-1 min-w-0 text-sm font-medium leading-5">
                    {&toast.message}
                </p>
                <button
                    onclick={on_close}
                    class="flex-shrink-0 text-neutral-400 hover:text-neutral-600 focus:outline-none"
                    title="Dismiss"
                >
                    <span class="text-lg leading-none">{"×"}</span>
                </button>
            </div>
        </div>
    }
}
