//! In-memory session driving the account and casino flows
//!
//! Mirrors the mobile app's user context: find-or-create login, profile
//! refresh after server-side balance changes, and the loot-box round
//! trip. Nothing is persisted locally; dropping the session logs out.

use chrono::Utc;
use rand::thread_rng;
use uuid::Uuid;

use betsocial_core::{
    ensure_affordable, BetChoice, BoxKind, DomainError, GoogleUser, LootBoxOutcome, NewPoll,
    NewUser, ObroBucks, Poll, RewardResult, UserProfile, UserUpdate,
};

use crate::api::{ApiClient, LootBoxReceipt, PlacedBet};
use crate::config::ClientConfig;
use crate::errors::{ClientError, Result};
use crate::retry::RetryStrategy;

/// One full loot-box round: the local roll, its cosmetic grading, and the
/// server's settlement receipt
#[derive(Debug, Clone)]
pub struct LootBoxRound {
    pub outcome: LootBoxOutcome,
    pub reward: RewardResult,
    pub receipt: LootBoxReceipt,
}

pub struct Session {
    api: ApiClient,
    retry: RetryStrategy,
    user: Option<UserProfile>,
}

impl Session {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(config)?,
            retry: RetryStrategy::new(config.max_retries),
            user: None,
        })
    }

    /// The cached profile, if logged in
    pub fn current_user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    fn require_user(&self) -> Result<&UserProfile> {
        self.user.as_ref().ok_or(ClientError::NotLoggedIn)
    }

    fn require_user_id_and_balance(&self) -> Result<(Uuid, ObroBucks)> {
        let user = self.require_user()?;
        Ok((user.id, user.obrobucks))
    }

    /// Find-or-create login from an identity payload.
    ///
    /// Looks the account up by Google id first; a missing account is
    /// registered with a generated username and the starting balance.
    pub async fn login(&mut self, google: &GoogleUser) -> Result<&UserProfile> {
        let span = tracing::info_span!("login", google_id = %google.id);
        let _enter = span.enter();

        let user = match self.api.find_user_by_google_id(&google.id).await? {
            Some(existing) => existing,
            None => {
                let new_user = NewUser::from_google(google, &mut thread_rng());
                tracing::info!(username = %new_user.username, "Registering new account");
                self.api.create_user(&new_user).await?
            }
        };

        tracing::info!(user_id = %user.id, balance = %user.obrobucks, "Logged in");
        Ok(self.user.insert(user))
    }

    /// Drop the cached profile
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "Logged out");
        }
    }

    /// Re-fetch the profile to pick up server-side balance changes
    pub async fn refresh(&mut self) -> Result<&UserProfile> {
        let id = self.require_user()?.id;
        let refreshed = self.retry.run(|| self.api.get_user(id)).await?;
        Ok(self.user.insert(refreshed))
    }

    /// PUT whitelisted profile edits and replace the cached profile
    pub async fn update_profile(&mut self, update: &UserUpdate) -> Result<&UserProfile> {
        let id = self.require_user()?.id;
        let updated = self.api.update_user(id, update).await?;
        Ok(self.user.insert(updated))
    }

    /// Fetch the poll feed
    pub async fn polls(&self) -> Result<Vec<Poll>> {
        self.retry.run(|| self.api.list_polls()).await
    }

    /// Validate and submit a new poll
    pub async fn create_poll(&self, poll: &NewPoll) -> Result<Poll> {
        self.api.create_poll(poll).await
    }

    /// Open one loot box end to end: affordability check against the
    /// cached balance, local roll, cosmetic grading, settlement, refresh.
    pub async fn open_loot_box(&mut self, kind: BoxKind) -> Result<LootBoxRound> {
        let (user_id, balance) = self.require_user_id_and_balance()?;
        ensure_affordable(balance, kind)?;

        let outcome = kind.open(&mut thread_rng());
        let reward = outcome.reward()?;

        tracing::info!(
            kind = %kind,
            win_amount = %outcome.win_amount,
            profit = outcome.profit,
            tier = reward.tier,
            "Loot box opened"
        );

        let receipt = self.api.open_lootbox(user_id, &outcome).await?;
        self.refresh().await?;

        Ok(LootBoxRound {
            outcome,
            reward,
            receipt,
        })
    }

    /// Stake on one side of an open poll
    pub async fn place_bet(
        &mut self,
        poll: &Poll,
        choice: BetChoice,
        amount: ObroBucks,
    ) -> Result<PlacedBet> {
        let (user_id, balance) = self.require_user_id_and_balance()?;

        if !poll.is_open_at(Utc::now()) {
            return Err(DomainError::PollClosed(poll.id).into());
        }
        if !balance.covers(amount) {
            return Err(DomainError::InsufficientFunds {
                need: amount.as_u64(),
                have: balance.as_u64(),
            }
            .into());
        }

        let placed = self.api.place_bet(user_id, poll.id, choice, amount).await?;
        self.refresh().await?;

        Ok(placed)
    }
}
