use yew::prelude::*;

use super::Modal;

/// Asks before an irreversible action.
#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or_else(|| AttrValue::from("Delete"))]
    pub confirm_text: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub is_loading: bool,
}

#[function_component]
pub fn ConfirmDialog(props: &ConfirmDialogProps) -> Html {
    let on_confirm = props.on_confirm.reform(|_: MouseEvent| ());
    let on_cancel = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <Modal title={props.title.clone()} on_close={props.on_close.clone()}>
            <p class="text-sm text-neutral-600">
                {&props.message}
                {" This action "}
                <span class="font-semibold text-red-600">
                    {"cannot be undone"}
                </span>
                {"."}
            </p>
            <div class="flex justify-end gap-3 mt-6">
                <button
                    onclick={on_cancel}
                    disabled={props.is_loading}
                    class={super::secondary_button()}
                >
                    {"Cancel"}
                </button>
                <button
                    onclick={on_confirm}
                    disabled={props.is_loading}
                    class={super::danger_button()}
                >
                    if props.is_loading {
                        {"Processing..."}
                    } else {
                        {&props.confirm_text}
                    }
                </button>
            </div>
        </Modal>
    }
}
