//! HTTP client for the BetSocial REST API
//!
//! Covers the poll, user, gambling, and betting endpoints. All business
//! logic (settlement, payout, balance updates, poll lifecycle) happens
//! server-side; this client only shapes requests and decodes responses.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use betsocial_core::{
    BetChoice, LootBoxOutcome, NewPoll, NewUser, ObroBucks, Poll, UserProfile, UserUpdate,
};

use crate::config::ClientConfig;
use crate::errors::{ClientError, Result};

/// Client for the BetSocial backend API
pub struct ApiClient {
    http: Client,
    base_url: String,
}

/// Error envelope the API uses for non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Settlement receipt for an opened loot box
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LootBoxReceipt {
    pub profit: i64,
    pub new_balance: u64,
}

/// Outbound loot-box settlement request (camelCase per the API)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OpenLootBoxRequest {
    user_id: Uuid,
    cost: u64,
    win_amount: u64,
}

/// Outbound poll-bet request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaceBetRequest {
    user_id: Uuid,
    poll_id: i64,
    choice: BetChoice,
    amount: u64,
}

/// Acknowledgement for a placed poll bet
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedBet {
    pub bet_id: Uuid,
    pub new_balance: u64,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Decode the API's `{"error": "..."}` envelope from a failed response
    async fn decode_error(resp: Response) -> ClientError {
        let status = resp.status().as_u16();
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("HTTP {}", status),
        };
        ClientError::Api { status, message }
    }

    async fn check(resp: Response) -> Result<Response> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(Self::decode_error(resp).await)
        }
    }

    /// Fetch the public poll feed
    pub async fn list_polls(&self) -> Result<Vec<Poll>> {
        let url = format!("{}/api/polls", self.base_url);

        tracing::debug!(url = %url, "Fetching polls");

        let resp = self.http.get(url).send().await?;
        let polls: Vec<Poll> = Self::check(resp).await?.json().await?;

        tracing::debug!(poll_count = polls.len(), "Polls retrieved");
        Ok(polls)
    }

    /// Submit a new poll
    pub async fn create_poll(&self, poll: &NewPoll) -> Result<Poll> {
        let span = tracing::info_span!("create_poll", question = %poll.question);
        let _enter = span.enter();

        let url = format!("{}/api/polls", self.base_url);
        let resp = self.http.post(url).json(poll).send().await?;
        let created: Poll = Self::check(resp).await?.json().await?;

        tracing::info!(poll_id = created.id, "Poll created");
        metrics::counter!("polls_created_total").increment(1);

        Ok(created)
    }

    /// Fetch an account by id
    pub async fn get_user(&self, id: Uuid) -> Result<UserProfile> {
        let url = format!("{}/api/users/{}", self.base_url, id);

        tracing::debug!(user_id = %id, "Fetching user");

        let resp = self.http.get(url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("User {} not found", id)));
        }

        let user: UserProfile = Self::check(resp).await?.json().await?;
        Ok(user)
    }

    /// Look an account up by its identity-provider id; `None` when the
    /// account does not exist yet
    pub async fn find_user_by_google_id(&self, google_id: &str) -> Result<Option<UserProfile>> {
        let url = format!("{}/api/users/google/{}", self.base_url, google_id);

        tracing::debug!(google_id = %google_id, "Looking up user by Google id");

        let resp = self.http.get(url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            tracing::debug!("No account for this Google id yet");
            return Ok(None);
        }

        let user: UserProfile = Self::check(resp).await?.json().await?;
        Ok(Some(user))
    }

    /// Register a new account
    pub async fn create_user(&self, user: &NewUser) -> Result<UserProfile> {
        let span = tracing::info_span!("create_user", username = %user.username);
        let _enter = span.enter();

        let url = format!("{}/api/users", self.base_url);
        let resp = self.http.post(url).json(user).send().await?;
        let created: UserProfile = Self::check(resp).await?.json().await?;

        tracing::info!(user_id = %created.id, "User created");
        metrics::counter!("users_created_total").increment(1);

        Ok(created)
    }

    /// Update profile fields; only whitelisted fields can be sent
    pub async fn update_user(&self, id: Uuid, update: &UserUpdate) -> Result<UserProfile> {
        let span = tracing::info_span!("update_user", user_id = %id);
        let _enter = span.enter();

        let url = format!("{}/api/users/{}", self.base_url, id);
        let resp = self.http.put(url).json(update).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("User {} not found", id)));
        }

        let updated: UserProfile = Self::check(resp).await?.json().await?;
        tracing::info!("User updated");
        Ok(updated)
    }

    /// Submit a rolled loot-box outcome for settlement
    pub async fn open_lootbox(
        &self,
        user_id: Uuid,
        outcome: &LootBoxOutcome,
    ) -> Result<LootBoxReceipt> {
        let span = tracing::info_span!(
            "open_lootbox",
            user_id = %user_id,
            kind = %outcome.kind,
            win_amount = %outcome.win_amount
        );
        let _enter = span.enter();

        let url = format!("{}/api/gambling/open-lootbox", self.base_url);
        let req = OpenLootBoxRequest {
            user_id,
            cost: outcome.cost.as_u64(),
            win_amount: outcome.win_amount.as_u64(),
        };

        let resp = self.http.post(url).json(&req).send().await?;
        let receipt: LootBoxReceipt = Self::check(resp).await?.json().await?;

        tracing::info!(
            profit = receipt.profit,
            new_balance = receipt.new_balance,
            "Loot box settled"
        );
        metrics::counter!("lootboxes_opened_total").increment(1);

        Ok(receipt)
    }

    /// Place a stake on one side of a poll
    pub async fn place_bet(
        &self,
        user_id: Uuid,
        poll_id: i64,
        choice: BetChoice,
        amount: ObroBucks,
    ) -> Result<PlacedBet> {
        let span = tracing::info_span!(
            "place_bet",
            user_id = %user_id,
            poll_id,
            choice = %choice,
            amount = %amount
        );
        let _enter = span.enter();

        let url = format!("{}/api/betting/bets", self.base_url);
        let req = PlaceBetRequest {
            user_id,
            poll_id,
            choice,
            amount: amount.as_u64(),
        };

        let resp = self.http.post(url).json(&req).send().await?;
        let placed: PlacedBet = Self::check(resp).await?.json().await?;

        tracing::info!(bet_id = %placed.bet_id, "Bet placed");
        metrics::counter!("poll_bets_placed_total").increment(1);

        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use betsocial_core::BoxKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_base_url_is_trimmed() {
        let config = ClientConfig {
            api_base_url: "http://localhost:3001///".to_string(),
            ..ClientConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:3001");
    }

    #[test]
    fn test_open_lootbox_request_wire_shape() {
        let mut rng = StdRng::seed_from_u64(11);
        let outcome = BoxKind::Bronze.open(&mut rng);
        let req = OpenLootBoxRequest {
            user_id: Uuid::nil(),
            cost: outcome.cost.as_u64(),
            win_amount: outcome.win_amount.as_u64(),
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["cost"], 100);
        assert!(json.get("winAmount").is_some());
        assert!(json.get("win_amount").is_none());
        assert!(json.get("userId").is_some());
    }

    #[test]
    fn test_place_bet_request_wire_shape() {
        let req = PlaceBetRequest {
            user_id: Uuid::nil(),
            poll_id: 7,
            choice: BetChoice::Yes,
            amount: 50,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["pollId"], 7);
        assert_eq!(json["choice"], "yes");
        assert_eq!(json["amount"], 50);
    }

    #[test]
    fn test_receipt_decodes_camel_case() {
        let receipt: LootBoxReceipt =
            serde_json::from_str(r#"{"profit": -50, "newBalance": 150}"#).unwrap();
        assert_eq!(receipt.profit, -50);
        assert_eq!(receipt.new_balance, 150);
    }

    #[test]
    fn test_error_body_decodes() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "Insufficient balance"}"#).unwrap();
        assert_eq!(body.error, "Insufficient balance");
    }
}
