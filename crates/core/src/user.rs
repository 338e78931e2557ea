//! Account profiles and the payloads that create and edit them
//!
//! The identity-provider handshake itself is external; this module only
//! consumes its final payload and shapes what the users API expects.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{DEFAULT_AVATAR_URL, STARTING_BALANCE, USERNAME_SUFFIX_SPACE};
use crate::currency::ObroBucks;

/// Account record as returned by the users API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub bio: String,
    pub obrobucks: ObroBucks,
    pub google_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Subset of the identity payload the app consumes
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUser {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Account-creation payload
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub username: String,
    pub bio: String,
    pub obrobucks: ObroBucks,
    pub google_id: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_picture_url: String,
}

impl NewUser {
    /// Build a creation payload from an identity payload.
    ///
    /// Prefers the provider's given/family names, falling back to
    /// splitting the display name on whitespace.
    pub fn from_google<R: Rng + ?Sized>(google: &GoogleUser, rng: &mut R) -> Self {
        let first_name = google
            .given_name
            .clone()
            .unwrap_or_else(|| {
                google
                    .name
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string()
            });
        let last_name = google.family_name.clone().unwrap_or_else(|| {
            google
                .name
                .split_whitespace()
                .skip(1)
                .collect::<Vec<_>>()
                .join(" ")
        });

        Self {
            email: google.email.clone(),
            name: google.name.clone(),
            username: generate_username(&google.email, rng),
            bio: format!("Hello, I'm {}!", google.name),
            obrobucks: ObroBucks::new(STARTING_BALANCE),
            google_id: google.id.clone(),
            first_name,
            last_name,
            profile_picture_url: google
                .picture
                .clone()
                .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
        }
    }
}

/// Derive a probably-unique handle from an email address.
///
/// Lowercases the local part, strips everything outside `[a-z0-9]`, and
/// appends a random suffix to dodge collisions. The server still owns the
/// uniqueness check.
pub fn generate_username<R: Rng + ?Sized>(email: &str, rng: &mut R) -> String {
    let local = email.split('@').next().unwrap_or("");
    let base: String = local
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    let base = if base.is_empty() { "user".to_string() } else { base };

    let suffix = rng.gen_range(0..USERNAME_SUFFIX_SPACE);
    format!("{}{}", base, suffix)
}

/// Updatable-field whitelist for profile edits.
///
/// `None` fields are left out of the JSON entirely, so read-only columns
/// (id, email, google_id, timestamps) can never be sent by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obrobucks: Option<ObroBucks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self == &UserUpdate::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn google_user() -> GoogleUser {
        GoogleUser {
            id: "g-123".to_string(),
            email: "Jane.Doe+test@example.com".to_string(),
            name: "Jane Doe".to_string(),
            given_name: None,
            family_name: None,
            picture: None,
        }
    }

    #[test]
    fn test_generate_username_sanitizes() {
        let mut rng = StdRng::seed_from_u64(1);
        let username = generate_username("Jane.Doe+test@example.com", &mut rng);

        let (base, suffix) = username.split_at("janedoetest".len());
        assert_eq!(base, "janedoetest");
        let suffix: u32 = suffix.parse().unwrap();
        assert!(suffix < USERNAME_SUFFIX_SPACE);
    }

    #[test]
    fn test_generate_username_empty_local_part() {
        let mut rng = StdRng::seed_from_u64(1);
        let username = generate_username("@example.com", &mut rng);
        assert!(username.starts_with("user"));
    }

    #[test]
    fn test_new_user_from_google_defaults() {
        let mut rng = StdRng::seed_from_u64(3);
        let new_user = NewUser::from_google(&google_user(), &mut rng);

        assert_eq!(new_user.first_name, "Jane");
        assert_eq!(new_user.last_name, "Doe");
        assert_eq!(new_user.bio, "Hello, I'm Jane Doe!");
        assert_eq!(new_user.obrobucks.as_u64(), STARTING_BALANCE);
        assert_eq!(new_user.profile_picture_url, DEFAULT_AVATAR_URL);
    }

    #[test]
    fn test_new_user_prefers_provider_names() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut google = google_user();
        google.given_name = Some("Janet".to_string());
        google.family_name = Some("Doe-Smith".to_string());
        google.picture = Some("https://example.com/me.png".to_string());

        let new_user = NewUser::from_google(&google, &mut rng);
        assert_eq!(new_user.first_name, "Janet");
        assert_eq!(new_user.last_name, "Doe-Smith");
        assert_eq!(new_user.profile_picture_url, "https://example.com/me.png");
    }

    #[test]
    fn test_user_update_omits_unset_fields() {
        let update = UserUpdate {
            bio: Some("new bio".to_string()),
            ..UserUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();

        assert_eq!(json, serde_json::json!({ "bio": "new bio" }));
        assert!(!update.is_empty());
        assert!(UserUpdate::default().is_empty());
    }

    #[test]
    fn test_profile_decodes_with_missing_optionals() {
        let profile: UserProfile = serde_json::from_str(
            r#"{
                "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "email": "jane@example.com",
                "name": "Jane Doe",
                "username": "janedoe42",
                "obrobucks": 100,
                "google_id": "g-123",
                "created_at": "2025-11-01T12:00:00Z",
                "updated_at": "2025-11-01T12:00:00Z",
                "access_token": null
            }"#,
        )
        .unwrap();

        assert_eq!(profile.obrobucks.as_u64(), 100);
        assert_eq!(profile.bio, "");
        assert_eq!(profile.profile_picture_url, None);
    }
}
