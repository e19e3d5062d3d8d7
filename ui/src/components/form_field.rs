use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or_else(|| AttrValue::from("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
}

/// A labelled input that reports every keystroke.
#[function_component]
pub fn TextField(props: &TextFieldProps) -> Html {
    let oninput = props.on_change.reform(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.value()
    });

    html! {
        <label class="block">
            <span class="block text-sm font-medium text-neutral-700 mb-1">
                {&props.label}
            </span>
            <input
                type={props.input_type.clone()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                disabled={props.disabled}
                {oninput}
                class={super::input_class()}
            />
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub label: AttrValue,
    /// `(value, label)` pairs.
    pub options: Vec<(AttrValue, AttrValue)>,
    pub selected: AttrValue,
    pub on_change: Callback<String>,
}

#[function_component]
pub fn SelectField(props: &SelectFieldProps) -> Html {
    let onchange = props.on_change.reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        select.value()
    });

    html! {
        <label class="block">
            <span class="block text-sm font-medium text-neutral-700 mb-1">
                {&props.label}
            </span>
            <select {onchange} class={super::input_class()}>
                {for props.options.iter().map(|(value, label)| html! {
                    <option
                        value={value.clone()}
                        selected={*value == props.selected}
                    >
                        {label}
                    </option>
                })}
            </select>
        </label>
    }
}
