//! Cosmetic reward grading for loot-box wins
//!
//! A win is graded against the maximum possible win for its box and mapped
//! to one of ten discrete tiers. Tiers drive display only; payout math
//! happens upstream, before grading.

use serde::{Deserialize, Serialize};

use crate::constants::REWARD_TIER_COUNT;
use crate::errors::DomainError;

/// Cosmetic rarity bands, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Fixed display color for this rarity
    pub fn color(&self) -> &'static str {
        match self {
            Rarity::Common => "#95a5a6",
            Rarity::Uncommon => "#27ae60",
            Rarity::Rare => "#3498db",
            Rarity::Epic => "#9b59b6",
            Rarity::Legendary => "#f39c12",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display color for a free-form rarity label
///
/// Total over any input: the five known labels get their own color, and
/// anything unrecognized falls back to the Common color.
pub fn rarity_color(label: &str) -> &'static str {
    match label {
        "Common" => Rarity::Common.color(),
        "Uncommon" => Rarity::Uncommon.color(),
        "Rare" => Rarity::Rare.color(),
        "Epic" => Rarity::Epic.color(),
        "Legendary" => Rarity::Legendary.color(),
        _ => Rarity::Common.color(),
    }
}

/// One band of the reward table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardTier {
    pub tier: u8,
    pub max_percent_inclusive: f64,
    pub rarity: Rarity,
    pub message: &'static str,
}

/// The ten bands, ascending. Each covers ten percentage points; the last
/// band also absorbs anything above 100%.
const REWARD_TIERS: [RewardTier; REWARD_TIER_COUNT] = [
    RewardTier { tier: 1, max_percent_inclusive: 10.0, rarity: Rarity::Common, message: "Better luck next time!" },
    RewardTier { tier: 2, max_percent_inclusive: 20.0, rarity: Rarity::Common, message: "Not bad, but not great!" },
    RewardTier { tier: 3, max_percent_inclusive: 30.0, rarity: Rarity::Uncommon, message: "Getting warmer!" },
    RewardTier { tier: 4, max_percent_inclusive: 40.0, rarity: Rarity::Uncommon, message: "Decent pull!" },
    RewardTier { tier: 5, max_percent_inclusive: 50.0, rarity: Rarity::Rare, message: "Nice! Above average!" },
    RewardTier { tier: 6, max_percent_inclusive: 60.0, rarity: Rarity::Rare, message: "Great pull!" },
    RewardTier { tier: 7, max_percent_inclusive: 70.0, rarity: Rarity::Epic, message: "Excellent! Very lucky!" },
    RewardTier { tier: 8, max_percent_inclusive: 80.0, rarity: Rarity::Epic, message: "Amazing win!" },
    RewardTier { tier: 9, max_percent_inclusive: 90.0, rarity: Rarity::Legendary, message: "INCREDIBLE! Almost perfect!" },
    RewardTier { tier: 10, max_percent_inclusive: 100.0, rarity: Rarity::Legendary, message: "\u{1f525} LEGENDARY! Maximum winnings! \u{1f525}" },
];

/// Renderable asset per tier, 1-to-1
const TIER_ASSETS: [&str; REWARD_TIER_COUNT] = [
    "assets/rewards/1.png",
    "assets/rewards/2.png",
    "assets/rewards/3.png",
    "assets/rewards/4.png",
    "assets/rewards/5.png",
    "assets/rewards/6.png",
    "assets/rewards/7.png",
    "assets/rewards/8.webp",
    "assets/rewards/9.png",
    "assets/rewards/10.jpg",
];

/// Graded reward for a single win, owned by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RewardResult {
    pub tier: u8,
    pub rarity: Rarity,
    pub message: &'static str,
    pub asset: &'static str,
}

/// Grade `win_amount` against `max_possible` and pick the reward tier.
///
/// Pure and deterministic; any randomness happened upstream when the win
/// was rolled. A win above the maximum grades as tier 10 rather than an
/// error, and a negative win clamps to tier 1.
///
/// `max_possible` must be positive and finite, and `win_amount` finite;
/// anything else is a caller bug and is rejected.
pub fn resolve_reward(win_amount: f64, max_possible: f64) -> Result<RewardResult, DomainError> {
    if !max_possible.is_finite() || max_possible <= 0.0 {
        return Err(DomainError::InvalidRewardBounds(max_possible));
    }
    if !win_amount.is_finite() {
        return Err(DomainError::InvalidWinAmount);
    }

    let percentage = win_amount / max_possible * 100.0;

    let mut tier = 1u8;
    for band in &REWARD_TIERS {
        if percentage <= band.max_percent_inclusive {
            tier = band.tier;
            break;
        }
    }

    // Over the cap is still the top tier, never an error
    if percentage > 100.0 {
        tier = 10;
    }

    let tier = tier.clamp(1, REWARD_TIER_COUNT as u8);
    let band = &REWARD_TIERS[usize::from(tier - 1)];

    Ok(RewardResult {
        tier,
        rarity: band.rarity,
        message: band.message,
        asset: TIER_ASSETS[usize::from(tier - 1)],
    })
}
