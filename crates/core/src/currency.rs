/// Type-safe wrapper for the app's virtual currency
///
/// ObroBucks balances are non-negative integers managed server-side; the
/// client performs local arithmetic only for validation and display, with
/// checked operations so overflow is an error rather than a wrap.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_STAKE, MIN_STAKE};
use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObroBucks(u64);

impl ObroBucks {
    pub const ZERO: ObroBucks = ObroBucks(0);

    /// Wrap a raw balance. Any u64 is a legal balance.
    pub fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Validate a user-supplied stake against the allowed betting range
    pub fn stake(amount: u64) -> Result<Self, DomainError> {
        if amount < MIN_STAKE || amount > MAX_STAKE {
            return Err(DomainError::StakeOutOfRange {
                amount,
                min: MIN_STAKE,
                max: MAX_STAKE,
            });
        }
        Ok(Self(amount))
    }

    /// Get the raw amount
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Checked addition
    pub fn checked_add(&self, other: ObroBucks) -> Result<Self, DomainError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(DomainError::BalanceOverflow)
    }

    /// Checked subtraction
    pub fn checked_sub(&self, other: ObroBucks) -> Result<Self, DomainError> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(DomainError::BalanceOverflow)
    }

    /// Checked multiplication
    pub fn checked_mul(&self, multiplier: u64) -> Result<Self, DomainError> {
        self.0
            .checked_mul(multiplier)
            .map(Self)
            .ok_or(DomainError::BalanceOverflow)
    }

    /// Whether this balance covers `cost`
    pub fn covers(&self, cost: ObroBucks) -> bool {
        self.0 >= cost.0
    }
}

impl From<u64> for ObroBucks {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl From<ObroBucks> for u64 {
    fn from(amount: ObroBucks) -> Self {
        amount.0
    }
}

impl FromStr for ObroBucks {
    type Err = DomainError;

    /// Parse a stake from raw form input, range check included
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let amount: u64 = trimmed
            .parse()
            .map_err(|_| DomainError::InvalidStake(trimmed.to_string()))?;
        Self::stake(amount)
    }
}

impl std::fmt::Display for ObroBucks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ObroBucks", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stake_validation() {
        let amount = ObroBucks::stake(100).unwrap();
        assert_eq!(amount.as_u64(), 100);

        assert!(ObroBucks::stake(0).is_err());
        assert!(ObroBucks::stake(MAX_STAKE + 1).is_err());
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = ObroBucks::new(100);
        let b = ObroBucks::new(50);

        assert_eq!(a.checked_add(b).unwrap().as_u64(), 150);
        assert_eq!(a.checked_sub(b).unwrap().as_u64(), 50);
        assert_eq!(a.checked_mul(3).unwrap().as_u64(), 300);
    }

    #[test]
    fn test_overflow() {
        let a = ObroBucks::new(u64::MAX);
        assert!(a.checked_add(ObroBucks::new(1)).is_err());
        assert!(ObroBucks::ZERO.checked_sub(ObroBucks::new(1)).is_err());
    }

    #[test]
    fn test_parse_stake_input() {
        assert_eq!("  250 ".parse::<ObroBucks>().unwrap().as_u64(), 250);
        assert!("".parse::<ObroBucks>().is_err());
        assert!("-5".parse::<ObroBucks>().is_err());
        assert!("12.5".parse::<ObroBucks>().is_err());
        assert!(matches!(
            "0".parse::<ObroBucks>(),
            Err(DomainError::StakeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&ObroBucks::new(100)).unwrap();
        assert_eq!(json, "100");
        let back: ObroBucks = serde_json::from_str("250").unwrap();
        assert_eq!(back.as_u64(), 250);
    }
}
