//! Poll modelling, creation validation, and the display math the feed
//! screens need (option shares, parimutuel payout quotes).

use std::collections::HashSet;

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::currency::ObroBucks;
use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PollStatus {
    Pending,
    Active,
    Closed,
}

/// Poll record as returned by the polls API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub id: i64,
    pub question: String,
    pub status: PollStatus,
    pub category: Option<String>,
    /// Total ObroBucks staked across all options
    pub total_bets: i64,
    pub created_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub options: Vec<String>,
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_by_username: Option<String>,
}

impl Poll {
    /// Whether bets can still be placed at `now`
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.status == PollStatus::Active && self.ends_at.map_or(true, |ends| now < ends)
    }
}

/// Side of a yes/no poll bet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetChoice {
    Yes,
    No,
}

impl std::fmt::Display for BetChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BetChoice::Yes => write!(f, "yes"),
            BetChoice::No => write!(f, "no"),
        }
    }
}

/// Outbound poll-creation payload. The API expects camelCase `endsAt` on
/// this route even though it serves snake_case back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPoll {
    pub question: String,
    pub options: Vec<String>,
    pub category: String,
    #[serde(rename = "endsAt")]
    pub ends_at: DateTime<Utc>,
    pub status: PollStatus,
}

impl NewPoll {
    /// Validate raw form input into a creation payload.
    ///
    /// Options arrive as one comma-separated line; blanks are dropped and
    /// at least two distinct options must remain.
    pub fn parse(
        question: &str,
        options_csv: &str,
        category: &str,
        ends_at_input: &str,
    ) -> Result<Self, DomainError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DomainError::InvalidPoll("question must not be empty".into()));
        }

        let category = category.trim();
        if category.is_empty() {
            return Err(DomainError::InvalidPoll("category must not be empty".into()));
        }

        let options: Vec<String> = options_csv
            .split(',')
            .map(str::trim)
            .filter(|opt| !opt.is_empty())
            .map(str::to_string)
            .collect();
        if options.len() < 2 {
            return Err(DomainError::InvalidPoll(
                "at least two options are required".into(),
            ));
        }
        let distinct: HashSet<&str> = options.iter().map(String::as_str).collect();
        if distinct.len() != options.len() {
            return Err(DomainError::InvalidPoll("options must be distinct".into()));
        }

        let ends_at = parse_end_date(ends_at_input)?;

        Ok(Self {
            question: question.to_string(),
            options,
            category: category.to_string(),
            ends_at,
            status: PollStatus::Pending,
        })
    }
}

/// Parse a poll end time in `MM/DD/YYYY HH:MM AM/PM` form.
///
/// Hours are on the 12-hour clock and the meridiem is case-insensitive.
/// Impossible calendar dates are rejected. The input carries no zone, so
/// it is interpreted as UTC.
pub fn parse_end_date(input: &str) -> Result<DateTime<Utc>, DomainError> {
    let trimmed = input.trim();

    let naive = NaiveDateTime::parse_from_str(trimmed, "%m/%d/%Y %I:%M %p").map_err(|_| {
        DomainError::InvalidEndDate(format!(
            "expected MM/DD/YYYY HH:MM AM/PM, got {:?}",
            trimmed
        ))
    })?;

    // Four-digit years only; chrono would happily take "25"
    if !(1000..=9999).contains(&naive.year()) {
        return Err(DomainError::InvalidEndDate(format!(
            "year must have four digits, got {}",
            naive.year()
        )));
    }

    Ok(naive.and_utc())
}

/// Each option's share of the pool, in percent.
///
/// An empty pool reads as an even split so fresh polls still render
/// meaningful bars.
pub fn option_shares(option_totals: &[u64]) -> Vec<f64> {
    if option_totals.is_empty() {
        return Vec::new();
    }

    let pool: u128 = option_totals.iter().map(|&t| u128::from(t)).sum();
    if pool == 0 {
        let even = 100.0 / option_totals.len() as f64;
        return vec![even; option_totals.len()];
    }

    option_totals
        .iter()
        .map(|&total| total as f64 / pool as f64 * 100.0)
        .collect()
}

/// Parimutuel quote: what `stake` on one option would pay if that option
/// won, after the stake joins both pools. Floor-rounded.
pub fn potential_payout(
    stake: ObroBucks,
    option_total: ObroBucks,
    pool_total: ObroBucks,
) -> Result<ObroBucks, DomainError> {
    let stake = u128::from(stake.as_u64());
    if stake == 0 {
        return Ok(ObroBucks::ZERO);
    }

    let option = u128::from(option_total.as_u64()) + stake;
    let pool = u128::from(pool_total.as_u64()) + stake;

    let payout = stake
        .checked_mul(pool)
        .map(|gross| gross / option)
        .ok_or(DomainError::BalanceOverflow)?;

    u64::try_from(payout)
        .map(ObroBucks::new)
        .map_err(|_| DomainError::BalanceOverflow)
}
