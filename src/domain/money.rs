use crate::error::VendingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// A monetary value in minor currency units (won).
///
/// Integer arithmetic only; a balance can never go negative because
/// subtraction is exposed exclusively through [`Money::checked_sub`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub u64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub fn new(units: u64) -> Self {
        Self(units)
    }

    pub fn units(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Subtracts `rhs`, returning `None` if the result would be negative.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "{grouped}원")
    }
}

/// A single note or coin value accepted by the cash slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u64", into = "u64")]
pub enum Denomination {
    Won100,
    Won500,
    #[default]
    Won1000,
    Won5000,
    Won10000,
}

impl Denomination {
    /// Every accepted denomination, smallest first.
    pub const ALL: [Denomination; 5] = [
        Denomination::Won100,
        Denomination::Won500,
        Denomination::Won1000,
        Denomination::Won5000,
        Denomination::Won10000,
    ];

    pub fn value(&self) -> Money {
        Money(u64::from(*self))
    }
}

impl From<Denomination> for u64 {
    fn from(denomination: Denomination) -> Self {
        match denomination {
            Denomination::Won100 => 100,
            Denomination::Won500 => 500,
            Denomination::Won1000 => 1000,
            Denomination::Won5000 => 5000,
            Denomination::Won10000 => 10000,
        }
    }
}

impl TryFrom<u64> for Denomination {
    type Error = VendingError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| u64::from(*d) == value)
            .ok_or(VendingError::InvalidDenomination(value))
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value(), f)
    }
}
