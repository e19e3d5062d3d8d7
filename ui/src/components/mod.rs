mod bank_details;
mod confirm_dialog;
mod draft_cell;
mod form_field;
pub mod layout;
mod modal;
mod paginated_table;
mod pagination_controls;
mod recharge_panel;
pub mod toast;

pub use bank_details::BankDetailsModal;
pub use confirm_dialog::ConfirmDialog;
pub use draft_cell::{DraftCell, SpinsToday, WithdrawLimit};
pub use form_field::{SelectField, TextField};
pub use modal::Modal;
pub use paginated_table::PaginatedTable;
pub use pagination_controls::PaginationControls;
pub use recharge_panel::RechargePanel;

pub fn primary_button() -> &'static str {
    "px-4 py-2 rounded-md text-sm font-medium text-white bg-blue-600 \
     hover:bg-blue-700 disabled:opacity-50 disabled:cursor-not-allowed \
     transition-colors"
}

pub fn secondary_button() -> &'static str {
    "px-4 py-2 rounded-md text-sm font-medium text-neutral-700 bg-white \
     border border-neutral-300 hover:bg-neutral-50 disabled:opacity-50 \
     disabled:cursor-not-allowed transition-colors"
}

pub fn danger_button() -> &'static str {
    "px-4 py-2 rounded-md text-sm font-medium text-white bg-red-600 \
     hover:bg-red-700 disabled:opacity-50 disabled:cursor-not-allowed \
     transition-colors"
}

pub fn input_class() -> &'static str {
    "w-full px-3 py-2 text-sm border border-neutral-300 rounded-md \
     bg-white text-neutral-900 placeholder-neutral-400 \
     focus:outline-none focus:ring-2 focus:ring-blue-500 \
     disabled:opacity-50"
}

/// A small text button for table row actions.
pub fn row_action(danger: bool) -> &'static str {
    if danger {
        "text-xs font-medium text-red-600 hover:text-red-800 mr-3"
    } else {
        "text-xs font-medium text-blue-600 hover:text-blue-800 mr-3"
    }
}

/// Page heading with an optional action area on the right.
#[derive(yew::Properties, PartialEq)]
pub struct PageHeaderProps {
    pub title: yew::AttrValue,
    #[prop_or_default]
    pub children: yew::Html,
}

#[yew::function_component]
pub fn PageHeader(props: &PageHeaderProps) -> yew::Html {
    yew::html! {
        <div class="flex items-center justify-between mb-6">
            <h1 class="text-2xl font-semibold text-neutral-900">
                {&props.title}
            </h1>
            <div class="flex items-center gap-3">{props.children.clone()}</div>
        </div>
    }
}
