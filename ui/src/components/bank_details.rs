use payloads::responses::User;
use yew::prelude::*;

use super::Modal;

#[derive(Properties, PartialEq)]
pub struct BankDetailsModalProps {
    pub user: User,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn BankDetailsModal(props: &BankDetailsModalProps) -> Html {
    let title = format!("Bank details for {}", props.user.phone);

    let body = match &props.user.bank_details {
        None => html! {
            <p class="text-sm text-neutral-500">{"No bank details on file."}</p>
        },
        Some(bank) => {
            let rows = [
                ("Account holder", &bank.holder_name),
                ("Account number", &bank.account_number),
                ("IFSC code", &bank.ifsc_code),
                ("Bank name", &bank.bank_name),
                ("UPI ID", &bank.upi_id),
            ];
            html! {
                <dl class="divide-y divide-neutral-200 text-sm">
                    {for rows.into_iter().map(|(label, value)| html! {
                        <div class="flex justify-between py-2">
                            <dt class="text-neutral-500">{label}</dt>
                            <dd class="font-medium text-neutral-900">
                                {if value.is_empty() {
                                    "-"
                                } else {
                                    value.as_str()
                                }}
                            </dd>
                        </div>
                    })}
                </dl>
            }
        }
    };

    html! {
        <Modal title={title} on_close={props.on_close.clone()}>
            {body}
        </Modal>
    }
}
