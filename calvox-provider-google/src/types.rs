//! Credential and token types for the Google provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OAuth application credentials for Google Calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Stored tokens for one authenticated account. Issued out of band by the
/// OAuth consent flow; this crate only consumes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTokens {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}
