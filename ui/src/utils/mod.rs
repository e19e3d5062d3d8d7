pub mod files;
pub mod time;

use rust_decimal::{Decimal, RoundingStrategy};
use yew::prelude::*;

pub use time::format_timestamp;

/// A callback that writes one field of a form held in `use_state`.
pub fn field_setter<F>(
    form: &UseStateHandle<F>,
    apply: fn(&mut F, String),
) -> Callback<String>
where
    F: Clone + 'static,
{
    let form = form.clone();
    Callback::from(move |value: String| {
        let mut next = (*form).clone();
        apply(&mut next, value);
        form.set(next);
    })
}

/// Rupee amounts with two decimals.
pub fn format_amount(amount: Decimal) -> String {
    let mut amount = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);
    format!("₹{amount}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn amounts_have_two_decimals() {
        assert_eq!(format_amount(dec!(250)), "₹250.00");
        assert_eq!(format_amount(dec!(0.5)), "₹0.50");
        assert_eq!(format_amount(dec!(12.345)), "₹12.35");
    }
}
