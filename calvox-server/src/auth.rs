//! Session resolution: bearer token -> stored Google tokens.
//!
//! Token files live at ~/.config/calvox/tokens/{session}.json and are
//! provisioned out of band by the OAuth consent flow. The server only
//! consumes them; issuing and refreshing tokens is not its job.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use calvox_core::{CalvoxError, CalvoxResult};
use calvox_provider_google::AccountTokens;

use crate::config;

/// Pull the session identifier out of the Authorization header.
pub fn bearer_session(headers: &HeaderMap) -> CalvoxResult<String> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| CalvoxError::Auth("Missing Authorization header".into()))?;

    let session = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CalvoxError::Auth("Expected a bearer token".into()))?;

    Ok(session.to_string())
}

/// Load the stored Google tokens for a session.
pub fn load_session_tokens(session: &str) -> CalvoxResult<AccountTokens> {
    let path = config::base_dir()?
        .join("tokens")
        .join(format!("{}.json", sanitize(session)));

    if !path.exists() {
        return Err(CalvoxError::Auth(
            "Google tokens not available for user".into(),
        ));
    }

    let contents = std::fs::read_to_string(&path)?;
    let tokens: AccountTokens = serde_json::from_str(&contents)
        .map_err(|e| CalvoxError::Auth(format!("Stored tokens are unreadable: {e}")))?;

    Ok(tokens)
}

/// Session ids come from clients; keep them path-safe.
fn sanitize(session: &str) -> String {
    session
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_the_bearer_token() {
        let headers = headers_with("Bearer session-abc123");
        assert_eq!(bearer_session(&headers).unwrap(), "session-abc123");
    }

    #[test]
    fn missing_header_is_an_auth_error() {
        let err = bearer_session(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, CalvoxError::Auth(_)));
    }

    #[test]
    fn non_bearer_scheme_is_an_auth_error() {
        let err = bearer_session(&headers_with("Basic dXNlcg==")).unwrap_err();
        assert!(matches!(err, CalvoxError::Auth(_)));
    }

    #[test]
    fn empty_bearer_token_is_an_auth_error() {
        let err = bearer_session(&headers_with("Bearer ")).unwrap_err();
        assert!(matches!(err, CalvoxError::Auth(_)));
    }

    #[test]
    fn session_ids_are_path_safe() {
        assert_eq!(sanitize("user@example.com"), "user_example_com");
        assert_eq!(sanitize("../../etc/passwd"), "______etc_passwd");
        assert_eq!(sanitize("plain-session_1"), "plain-session_1");
    }
}
