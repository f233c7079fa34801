//! Stock arithmetic shared by the server and the admin CLI.

use crate::types::StockStatus;

/// Nominal shelf capacity of a part, as a multiple of its minimum stock.
pub const CAPACITY_FACTOR: f64 = 2.5;

/// Capacity assumed for parts without a minimum stock level.
pub const DEFAULT_CAPACITY: f64 = 100.0;

/// Placeholder inventory valuation shown on the dashboard.
pub const INVENTORY_VALUE: &str = "48M PLN";

/// Units on hand that are not reserved. Never negative.
pub fn available(quantity: i32, reserved: i32) -> i32 {
    quantity.saturating_sub(reserved).max(0)
}

/// Applies a signed delta to a quantity, clamping at zero.
pub fn adjust_quantity(quantity: i32, change: i32) -> i32 {
    quantity.saturating_add(change).max(0)
}

/// Result of applying a stock delta to a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    pub quantity: i32,
    pub status: StockStatus,
}

pub fn apply_change(quantity: i32, min_stock: i32, change: i32) -> StockLevel {
    let quantity = adjust_quantity(quantity, change);
    StockLevel {
        quantity,
        status: StockStatus::for_levels(quantity, min_stock),
    }
}

/// Fill level of a single part in percent, capped at 100.
pub fn fill_progress(quantity: i32, min_stock: i32) -> f64 {
    let capacity = if min_stock > 0 {
        min_stock as f64 * CAPACITY_FACTOR
    } else {
        DEFAULT_CAPACITY
    };
    (quantity as f64 / capacity * 100.0).min(100.0)
}

/// Whole-warehouse utilization in percent, truncated toward zero.
///
/// Takes the raw `SUM()` results, which are NULL on an empty table. A missing
/// or zero capacity falls back to 1 so the ratio stays defined.
pub fn warehouse_utilization(total_quantity: Option<i64>, total_min_stock: Option<i64>) -> i64 {
    let current = total_quantity.unwrap_or(0) as f64;
    let capacity = total_min_stock
        .map(|m| m as f64 * CAPACITY_FACTOR)
        .filter(|c| *c != 0.0)
        .unwrap_or(1.0);
    (current / capacity * 100.0) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_never_negative() {
        assert_eq!(available(156, 80), 76);
        assert_eq!(available(5, 12), 0);
        assert_eq!(available(0, 0), 0);
    }

    #[test]
    fn adjust_clamps_at_zero() {
        assert_eq!(adjust_quantity(24, -100), 0);
        assert_eq!(adjust_quantity(24, 1), 25);
        assert_eq!(adjust_quantity(0, -1), 0);
        assert_eq!(adjust_quantity(i32::MAX, 1), i32::MAX);
    }

    #[test]
    fn status_flips_below_threshold() {
        assert_eq!(apply_change(20, 20, -1).status, StockStatus::LowStock);
        assert_eq!(apply_change(19, 20, 1).status, StockStatus::Ok);
        assert_eq!(
            apply_change(24, 30, -100),
            StockLevel {
                quantity: 0,
                status: StockStatus::LowStock
            }
        );
    }

    #[test]
    fn progress_is_capped() {
        assert!((fill_progress(850, 500) - 68.0).abs() < 1e-9);
        assert_eq!(fill_progress(300, 100), 100.0);
        assert_eq!(fill_progress(50, 0), 50.0);
        assert_eq!(fill_progress(500, 0), 100.0);
    }

    #[test]
    fn utilization_truncates() {
        // 1293 / (800 * 2.5) = 64.65%
        assert_eq!(warehouse_utilization(Some(1293), Some(800)), 64);
    }

    #[test]
    fn utilization_guards_empty_capacity() {
        assert_eq!(warehouse_utilization(None, None), 0);
        assert_eq!(warehouse_utilization(Some(3), Some(0)), 300);
        assert_eq!(warehouse_utilization(Some(3), None), 300);
    }
}
