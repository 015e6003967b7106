// ----- standard library imports
use std::{fmt, iter::Sum, ops};
// ----- extra library imports
use serde::{Deserialize, Serialize};
// ----- local imports
use crate::error::{Error, Result};

// ----- end imports

/// Denominated value, in the mint's currency unit.
///
/// Every denominated field on the wire is a power of two; arbitrary totals
/// appear only as sums (token totals, quote amounts, fee reserves).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);
    pub const ONE: Amount = Amount(1);

    pub fn to_u64(self) -> u64 {
        self.0
    }

    pub fn is_power_of_two(self) -> bool {
        self.0.is_power_of_two()
    }

    /// Binary decomposition into powers of two, ascending.
    ///
    /// e.g. 11 -> [1, 2, 8]; 0 -> []
    pub fn split(self) -> Vec<Amount> {
        (0..u64::BITS)
            .filter(|bit| self.0 & (1u64 << bit) != 0)
            .map(|bit| Amount(1u64 << bit))
            .collect()
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ops::Add for Amount {
    type Output = Amount;
    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl ops::Sub for Amount {
    type Output = Amount;
    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl ops::Mul<u64> for Amount {
    type Output = Amount;
    fn mul(self, rhs: u64) -> Amount {
        Amount(self.0 * rhs)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

/// Caller-requested shape for a split: `count` outputs of `amount` each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountPreference {
    pub amount: Amount,
    pub count: u64,
}

pub fn preference_total(preference: &[AmountPreference]) -> Amount {
    preference
        .iter()
        .map(|pref| pref.amount * pref.count)
        .sum()
}

/// Decomposes `amount` into an ordered list of power-of-two denominations.
///
/// With a preference the multiset is emitted verbatim in the given order;
/// the preference must total `amount` and hold only powers of two. Without
/// one, the default split is the minimum-proof binary decomposition.
pub fn split_amount(
    amount: Amount,
    preference: Option<&[AmountPreference]>,
) -> Result<Vec<Amount>> {
    let Some(preference) = preference else {
        return Ok(amount.split());
    };
    if preference.iter().any(|pref| !pref.amount.is_power_of_two()) {
        return Err(Error::InvalidPreference);
    }
    if preference_total(preference) != amount {
        return Err(Error::InvalidPreference);
    }
    let mut amounts = Vec::new();
    for pref in preference {
        amounts.extend(std::iter::repeat(pref.amount).take(pref.count as usize));
    }
    Ok(amounts)
}
