//! Chilean-peso price type.
//!
//! The catalog prices everything in whole Chilean pesos (CLP has no cents in
//! practice), so the representation is a plain `i64` amount. Display follows
//! the `es-CL` convention: `$` prefix and `.` as the thousands separator,
//! e.g. `$120.000`.

use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A price in whole Chilean pesos.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from a peso amount.
    #[must_use]
    pub const fn new(pesos: i64) -> Self {
        Self(pesos)
    }

    /// The raw peso amount.
    #[must_use]
    pub const fn pesos(&self) -> i64 {
        self.0
    }

    /// Whether this price is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiply by a line quantity, saturating on overflow.
    ///
    /// Quantities come from user input; a pathological quantity must not
    /// panic the render path.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Format in the `es-CL` style: `$1.234.567`.
    ///
    /// Negative amounts keep the sign ahead of the `$`.
    #[must_use]
    pub fn format_clp(&self) -> String {
        let negative = self.0 < 0;
        let digits = self.0.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        if negative {
            format!("-${grouped}")
        } else {
            format!("${grouped}")
        }
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_clp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_thousands_separators() {
        assert_eq!(Price::new(0).format_clp(), "$0");
        assert_eq!(Price::new(999).format_clp(), "$999");
        assert_eq!(Price::new(1_000).format_clp(), "$1.000");
        assert_eq!(Price::new(120_000).format_clp(), "$120.000");
        assert_eq!(Price::new(1_234_567).format_clp(), "$1.234.567");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(Price::new(-45_000).format_clp(), "-$45.000");
    }

    #[test]
    fn line_subtotal_is_price_times_quantity() {
        // The Audi A4 example: 60.000 x 2 = $120.000
        let unit = Price::new(60_000);
        assert_eq!(unit.times(2), Price::new(120_000));
        assert_eq!(unit.times(2).format_clp(), "$120.000");
    }

    #[test]
    fn sums_over_line_subtotals() {
        let total: Price = [Price::new(60_000).times(2), Price::new(5_000).times(1)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::new(125_000));
    }

    #[test]
    fn multiplication_saturates_instead_of_panicking() {
        let huge = Price::new(i64::MAX / 2);
        assert_eq!(huge.times(1000).pesos(), i64::MAX);
    }

    #[test]
    fn serializes_as_a_bare_number() {
        let json = serde_json::to_string(&Price::new(60_000)).unwrap();
        assert_eq!(json, "60000");
        let back: Price = serde_json::from_str("60000").unwrap();
        assert_eq!(back, Price::new(60_000));
    }
}
