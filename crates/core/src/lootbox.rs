//! Loot-box economics
//!
//! The client rolls the win amount locally and submits it for settlement;
//! balance updates are the server's job. Randomness is injected so rolls
//! are reproducible in tests.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_WIN_MULTIPLIER, MIN_WIN_MULTIPLIER};
use crate::currency::ObroBucks;
use crate::errors::DomainError;
use crate::rewards::{resolve_reward, RewardResult};

/// Loot-box offerings with fixed entry costs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxKind {
    Bronze,
    Silver,
    Gold,
}

impl BoxKind {
    pub const ALL: [BoxKind; 3] = [BoxKind::Bronze, BoxKind::Silver, BoxKind::Gold];

    /// Entry cost
    pub fn cost(&self) -> ObroBucks {
        match self {
            BoxKind::Bronze => ObroBucks::new(100),
            BoxKind::Silver => ObroBucks::new(250),
            BoxKind::Gold => ObroBucks::new(500),
        }
    }

    /// Ceiling on a single roll: cost times the top multiplier. This is
    /// also the denominator when grading a win for its cosmetic reward.
    pub fn max_win(&self) -> ObroBucks {
        let ceiling = (self.cost().as_u64() as f64 * MAX_WIN_MULTIPLIER).round() as u64;
        ObroBucks::new(ceiling)
    }

    /// Roll a payout for this box. The multiplier is uniform in
    /// `[MIN_WIN_MULTIPLIER, MAX_WIN_MULTIPLIER)`.
    pub fn open<R: Rng + ?Sized>(&self, rng: &mut R) -> LootBoxOutcome {
        let cost = self.cost().as_u64();
        let multiplier = rng.gen_range(MIN_WIN_MULTIPLIER..MAX_WIN_MULTIPLIER);
        let win_amount = (cost as f64 * multiplier).round() as u64;
        let profit = win_amount as i64 - cost as i64;

        tracing::trace!(
            kind = %self,
            cost,
            win_amount,
            profit,
            "Loot box rolled"
        );

        LootBoxOutcome {
            kind: *self,
            cost: ObroBucks::new(cost),
            win_amount: ObroBucks::new(win_amount),
            profit,
        }
    }
}

impl std::fmt::Display for BoxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BoxKind::Bronze => "Bronze",
            BoxKind::Silver => "Silver",
            BoxKind::Gold => "Gold",
        };
        write!(f, "{}", name)
    }
}

/// Result of opening one box; settlement happens server-side
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LootBoxOutcome {
    pub kind: BoxKind,
    pub cost: ObroBucks,
    pub win_amount: ObroBucks,
    /// win minus cost; negative on a losing roll
    pub profit: i64,
}

impl LootBoxOutcome {
    /// Grade this outcome for display
    pub fn reward(&self) -> Result<RewardResult, DomainError> {
        resolve_reward(
            self.win_amount.as_u64() as f64,
            self.kind.max_win().as_u64() as f64,
        )
    }

    pub fn is_profit(&self) -> bool {
        self.profit > 0
    }
}

/// Fail unless `balance` covers the entry cost of `kind`
pub fn ensure_affordable(balance: ObroBucks, kind: BoxKind) -> Result<(), DomainError> {
    let cost = kind.cost();
    if !balance.covers(cost) {
        return Err(DomainError::InsufficientFunds {
            need: cost.as_u64(),
            have: balance.as_u64(),
        });
    }
    Ok(())
}
