//! Type-safe price representation using decimal arithmetic.
//!
//! All amounts are Mexican pesos. The storefront never handles more than one
//! currency, so `Price` carries only the amount.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::cart::CartError;

/// A non-negative amount of money, in whole cents at most.
///
/// Serialized as a JSON number so that cart slots written by the browser
/// storefront (`{"name":"Latte","price":45,"quantity":2}`) remain readable.
/// Constructors only accept amounts that the number survives unchanged: at
/// most [`Price::MAX_SCALE`] decimal places and no more than [`Price::max`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "PriceRepr", into = "PriceRepr")]
pub struct Price(Decimal);

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct PriceRepr(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Zero pesos.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Decimal places a price may carry (cents).
    pub const MAX_SCALE: u32 = 2;

    /// Largest accepted amount, in cents. Twelve significant digits stay
    /// exact through an `f64`.
    const MAX_CENTS: i64 = 999_999_999_999;

    /// The largest accepted amount, `$9999999999.99`.
    #[must_use]
    pub fn max() -> Self {
        Self(Decimal::new(Self::MAX_CENTS, Self::MAX_SCALE))
    }

    /// Create a price, rejecting negative, over-precise and oversized amounts.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (amount >= Decimal::ZERO && Self::in_range(amount)).then(|| Self(amount))
    }

    /// Create a price that must be strictly positive.
    ///
    /// This is the check applied to anything added to the cart: a zero,
    /// negative, over-precise or oversized price is invalid input.
    #[must_use]
    pub fn positive(amount: Decimal) -> Option<Self> {
        (amount > Decimal::ZERO && Self::in_range(amount)).then(|| Self(amount))
    }

    fn in_range(amount: Decimal) -> bool {
        amount.normalize().scale() <= Self::MAX_SCALE && amount <= Self::max().0
    }

    /// Parse a user-supplied amount such as `"45"` or `"52.50"`.
    ///
    /// Returns `None` for non-numeric input or an amount `new` rejects.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Decimal::from_str(raw.trim()).ok().and_then(Self::new)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Amount rounded to whole pesos, half away from zero.
    #[must_use]
    pub fn whole(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Exact amount without trailing zeros, e.g. `$52.5`.
    #[must_use]
    pub fn exact(&self) -> String {
        format!("${}", self.0.normalize())
    }
}

/// Formats as whole pesos, e.g. `$120`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.whole())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u32> for Price {
    fn from(pesos: u32) -> Self {
        Self(Decimal::from(pesos))
    }
}

impl TryFrom<PriceRepr> for Price {
    type Error = CartError;

    fn try_from(repr: PriceRepr) -> Result<Self, Self::Error> {
        Self::new(repr.0).ok_or(CartError::InvalidPrice(repr.0))
    }
}

impl From<Price> for PriceRepr {
    fn from(price: Price) -> Self {
        Self(price.0)
    }
}
