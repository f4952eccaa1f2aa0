//! Order pricing: pure arithmetic over catalog prices.
//!
//! Prices are snapshotted at order time; later catalog edits never change
//! an existing order. Add-ons are per-unit, so quantity multiplies the
//! base price and the add-on prices alike.

/// Price one order line. Quantities below 1 are clamped to 1.
pub fn line_subtotal(menu_price: f64, addon_prices: &[f64], quantity: i32) -> f64 {
    let quantity = quantity.max(1);
    let unit_price = menu_price + addon_prices.iter().sum::<f64>();
    unit_price * f64::from(quantity)
}

/// Sum line subtotals into the order total.
pub fn order_total(subtotals: &[f64]) -> f64 {
    subtotals.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_price_times_quantity() {
        assert_eq!(line_subtotal(3.0, &[], 2), 6.0);
    }

    #[test]
    fn test_addons_are_per_unit() {
        // 2.50 base + 0.50 add-on, twice
        assert_eq!(line_subtotal(2.5, &[0.5], 2), 6.0);
    }

    #[test]
    fn test_multiple_addons() {
        assert_eq!(line_subtotal(2.5, &[0.5, 0.3], 1), 3.3);
    }

    #[test]
    fn test_zero_quantity_priced_as_one() {
        assert_eq!(line_subtotal(4.0, &[], 0), 4.0);
    }

    #[test]
    fn test_negative_quantity_priced_as_one() {
        assert_eq!(line_subtotal(4.0, &[1.0], -3), 5.0);
    }

    #[test]
    fn test_order_total_sums_lines() {
        assert_eq!(order_total(&[6.0, 4.0]), 10.0);
        assert_eq!(order_total(&[]), 0.0);
    }
}
