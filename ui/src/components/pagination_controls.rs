use payloads::paging::Pager;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub pager: Pager,
    /// Rows on the current page, for the "Showing x to y" label.
    pub rows: usize,
    pub on_page_change: Callback<u32>,
}

/// Previous/Next buttons around a "Showing x to y of z" label. Disabled
/// buttons never emit.
#[function_component]
pub fn PaginationControls(props: &Props) -> Html {
    let pager = props.pager;

    let on_previous = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(page) = pager.previous() {
                on_page_change.emit(page);
            }
        })
    };

    let on_next = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(page) = pager.next() {
                on_page_change.emit(page);
            }
        })
    };

    let prev_disabled = !pager.can_go_previous();
    let next_disabled = !pager.can_go_next();

    let button_class = |disabled: bool| {
        if disabled {
            "px-4 py-2 border border-neutral-300 rounded-md text-sm \
             font-medium text-neutral-400 bg-neutral-100 cursor-not-allowed"
        } else {
            "px-4 py-2 border border-neutral-300 rounded-md text-sm \
             font-medium text-neutral-700 bg-white hover:bg-neutral-50 \
             transition-colors duration-200"
        }
    };

    html! {
        <div class="flex items-center justify-between mt-4 pt-4 \
                    border-t border-neutral-200">
            <span class="text-sm text-neutral-600">
                {pager.label(props.rows)}
            </span>
            <div class="flex items-center gap-3">
                <button
                    onclick={on_previous}
                    disabled={prev_disabled}
                    class={button_class(prev_disabled)}
                >
                    {"Previous"}
                </button>
                <span class="text-sm text-neutral-600">
                    {format!(
                        "Page {} of {}",
                        pager.current_page, pager.total_pages
                    )}
                </span>
                <button
                    onclick={on_next}
                    disabled={next_disabled}
                    class={button_class(next_disabled)}
                >
                    {"Next"}
                </button>
            </div>
        </div>
    }
}
