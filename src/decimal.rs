use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Sub, SubAssign};
use std::str::FromStr;

/// number of decimal places kept on every money value.
/// halving a fee stored with 2 places never needs more than 3.
pub const MONEY_SCALE: u32 = 4;

/// largest magnitude accepted from outside the crate (10^15)
pub const MONEY_LIMIT: Decimal = Decimal::from_parts(0xa4c6_8000, 0x0003_8d7e, 0, false, 0);

/// money type for fees, payments and ledger amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(MONEY_SCALE))
    }

    /// create from string with exact parsing ("70.00", "  35.5 ").
    /// values beyond [`MONEY_LIMIT`] are rejected
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        let d = Decimal::from_str(s.trim())?;
        if d > MONEY_LIMIT {
            return Err(rust_decimal::Error::ExceedsMaximumPossibleValue);
        }
        if d < -MONEY_LIMIT {
            return Err(rust_decimal::Error::LessThanMinimumPossibleValue);
        }
        Ok(Money(d.round_dp(MONEY_SCALE)))
    }

    /// create from a float reported by the backend.
    /// non-finite values and values beyond [`MONEY_LIMIT`] have no money representation
    pub fn from_f64(value: f64) -> Option<Self> {
        Decimal::from_f64_retain(value)
            .filter(|d| d.abs() <= MONEY_LIMIT)
            .map(|d| Money(d.round_dp(MONEY_SCALE)))
    }

    /// create from integer amount (pounds, dollars, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// exact half, used for half-fee students
    pub fn half(&self) -> Self {
        *self / Decimal::from(2)
    }

    /// render with a fixed number of places, e.g. "35.50"
    pub fn to_fixed(&self, dp: u32) -> String {
        let mut rounded = self.0.round_dp(dp);
        rounded.rescale(dp);
        rounded.to_string()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

// sums saturate at the decimal bounds instead of panicking
impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0).round_dp(MONEY_SCALE))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).round_dp(MONEY_SCALE))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        *self = *self - other;
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money((self.0 / other).round_dp(MONEY_SCALE))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + *m)
    }
}
