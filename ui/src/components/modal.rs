use wasm_bindgen::JsCast;
use yew::prelude::*;

/// A dialog over a dimmed backdrop. Clicking the backdrop closes it.
#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub children: Html,
    pub on_close: Callback<()>,
    #[prop_or_else(|| AttrValue::from("max-w-md"))]
    pub max_width: AttrValue,
}

#[function_component]
pub fn Modal(props: &ModalProps) -> Html {
    let backdrop_ref = use_node_ref();

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let backdrop_ref = backdrop_ref.clone();
        Callback::from(move |e: MouseEvent| {
            let Some(backdrop) = backdrop_ref.cast::<web_sys::Element>() else {
                return;
            };
            let clicked = e.target();
            if clicked.as_ref().and_then(|t| t.dyn_ref::<web_sys::Element>())
                == Some(&backdrop)
            {
                on_close.emit(());
            }
        })
    };

    let on_close_click = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div
            ref={backdrop_ref}
            onclick={on_backdrop_click}
            class="fixed inset-0 bg-black bg-opacity-50 z-40 flex items-center justify-center p-4"
        >
            <div class={classes!(
                "bg-white", "rounded-lg", "shadow-xl", "w-full", "p-6",
                props.max_width.to_string()
            )}>
                <div class="flex items-center justify-between mb-4">
                    <h3 class="text-lg font-semibold text-neutral-900">
                        {&props.title}
                    </h3>
                    <button
                        onclick={on_close_click}
                        class="text-neutral-400 hover:text-neutral-600"
                        title="Close"
                    >
                        {"×"}
                    </button>
                </div>
                {props.children.clone()}
            </div>
        </div>
    }
}
