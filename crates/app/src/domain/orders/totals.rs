//! Order totals in minor currency units.

/// Price of `quantity` units at `unit_price`, or `None` on overflow.
#[must_use]
pub fn line_total(unit_price: u64, quantity: u32) -> Option<u64> {
    unit_price.checked_mul(u64::from(quantity))
}

/// Sum of line totals over `(unit_price, quantity)` pairs, or `None` on overflow.
#[must_use]
pub fn order_total<I>(lines: I) -> Option<u64>
where
    I: IntoIterator<Item = (u64, u32)>,
{
    lines
        .into_iter()
        .try_fold(0_u64, |total, (unit_price, quantity)| {
            total.checked_add(line_total(unit_price, quantity)?)
        })
}
