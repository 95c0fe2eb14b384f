//! Pricing System
//!
//! Price is a deterministic function of base price and printed area. No
//! rounding happens here; currency rounding is a presentation concern.

use serde::{Deserialize, Serialize};

use crate::geometry::PhysicalSize;

/// Printing cost per square inch of design area.
pub const UNIT_PRINT_COST: f64 = 1.0;

/// Compute the total price for a printed design.
///
/// Callers guarantee `base_price >= 0` and both dimensions positive; the
/// function is pure and monotonically non-decreasing in each dimension.
pub fn price(base_price: f64, width_in: f64, height_in: f64) -> f64 {
    base_price + width_in * height_in * UNIT_PRINT_COST
}

/// Itemized breakdown backing the live price display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub base_price: f64,
    pub print_area: f64,
    pub printing_cost: f64,
    pub total: f64,
}

impl PriceQuote {
    pub fn compute(base_price: f64, size: PhysicalSize) -> Self {
        let print_area = size.print_area();
        let printing_cost = print_area * UNIT_PRINT_COST;
        Self {
            base_price,
            print_area,
            printing_cost,
            total: base_price + printing_cost,
        }
    }
}
