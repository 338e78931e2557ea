/// Shared constants for the BetSocial domain
///
/// This module centralizes all magic numbers and tuning knobs to prevent
/// inconsistencies between the domain crate and the API client.

/// Balance granted to every newly created account (100 ObroBucks)
///
/// Rationale: enough to open one Bronze box or place a handful of poll
/// bets, not enough to matter. Matches the server-side signup grant.
pub const STARTING_BALANCE: u64 = 100;

/// Minimum poll stake in ObroBucks
///
/// Rationale: zero-amount bets would clutter poll pools without moving
/// the odds.
pub const MIN_STAKE: u64 = 1;

/// Maximum poll stake in ObroBucks (1,000,000)
///
/// Rationale: anti-fat-finger bound. The server enforces the real balance
/// check; this cap just rejects obviously bogus form input early.
pub const MAX_STAKE: u64 = 1_000_000;

/// Lowest payout multiplier a loot box can roll (0.5x the entry cost)
pub const MIN_WIN_MULTIPLIER: f64 = 0.5;

/// Highest payout multiplier a loot box can roll (3x the entry cost)
///
/// Also the ceiling used when grading a win for the cosmetic reward tier:
/// a roll at exactly the cap grades as 100%.
pub const MAX_WIN_MULTIPLIER: f64 = 3.0;

/// Number of discrete cosmetic reward tiers
pub const REWARD_TIER_COUNT: usize = 10;

/// Exclusive upper bound for the random suffix appended to generated
/// usernames (suffixes are 0..=999)
pub const USERNAME_SUFFIX_SPACE: u32 = 1000;

/// Avatar assigned when the identity provider sends no picture
pub const DEFAULT_AVATAR_URL: &str =
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150";
