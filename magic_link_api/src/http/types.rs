use serde::Deserialize;
use serde::Serialize;

/// Body of `GET /api/v5/slobs/login/token`. Only `login_token` is required, `expires_at`
/// may be fractional, `null` or absent.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct LoginTokenResponse {
    pub login_token: String,
    #[serde(default)]
    pub expires_at: Option<f64>,
}

impl LoginTokenResponse {
    /// Advisory only, the link builder never consults it. A token without an expiry never
    /// counts as expired.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now as f64)
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct MagicLinkRequest {
    pub sub_page: String,
    pub source: Option<String>,
}

impl MagicLinkRequest {
    pub fn new(sub_page: impl Into<String>) -> Self {
        Self {
            sub_page: sub_page.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The referral tag, if one was given and it isn't empty.
    pub fn referral(&self) -> Option<&str> {
        self.source.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_at: Option<f64>) -> LoginTokenResponse {
        LoginTokenResponse {
            login_token: "abc123".to_string(),
            expires_at,
        }
    }

    #[test]
    fn expiry_is_lenient() {
        for body in [
            r#"{"login_token":"abc123","expires_at":1700000000.5}"#,
            r#"{"login_token":"abc123","expires_at":null}"#,
            r#"{"login_token":"abc123"}"#,
        ] {
            let parsed: LoginTokenResponse = serde_json::from_str(body).unwrap();
            assert_eq!(parsed.login_token, "abc123");
        }
        assert!(serde_json::from_str::<LoginTokenResponse>(r#"{"expires_at":1}"#).is_err());
    }

    #[test]
    fn expiry_check() {
        assert!(token(Some(100.0)).is_expired_at(100));
        assert!(!token(Some(100.5)).is_expired_at(100));
        assert!(!token(None).is_expired_at(u64::MAX));
    }
}
