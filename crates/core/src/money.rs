//! Monetary amounts in Brazilian Real.
//!
//! Amounts are stored in the smallest currency unit (centavos) so sums are exact;
//! the data source speaks decimal reais, which are converted once at the boundary.

use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Non-negative amount of money in BRL, stored as centavos.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_centavos(centavos: u64) -> Self {
        Self(centavos)
    }

    /// Convert a decimal amount in reais, rounding to the nearest centavo.
    ///
    /// Negative, NaN and infinite inputs collapse to zero: prices are never negative.
    pub fn from_reais(reais: f64) -> Self {
        if !reais.is_finite() || reais <= 0.0 {
            return Self::ZERO;
        }
        let centavos = (reais * 100.0).round();
        if centavos >= u64::MAX as f64 {
            Self(u64::MAX)
        } else {
            Self(centavos as u64)
        }
    }

    pub const fn centavos(self) -> u64 {
        self.0
    }

    pub fn as_reais(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    pub const fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }

    /// Render as `pt-BR` currency: `R$ 1.234,56`.
    pub fn format_brl(self) -> String {
        let reais = self.0 / 100;
        let centavos = self.0 % 100;

        let digits = reais.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        format!("R$ {grouped},{centavos:02}")
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        self.saturating_add(rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.format_brl())
    }
}
