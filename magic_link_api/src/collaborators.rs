//! Capabilities the link generator borrows from the surrounding application.

use anyhow::Result;

use crate::DEFAULT_HOST;

/// Supplies the bearer credential of the signed in user.
pub trait SessionProvider: Send + Sync {
    fn api_token(&self) -> String;
}

/// Supplies the bare domain of the remote service, no scheme and no path.
pub trait HostResolver: Send + Sync {
    fn streamlabs(&self) -> String;
}

/// Fire and forget feature usage events.
pub trait UsageRecorder: Send + Sync {
    fn record_feature_usage(&self, event_name: &str);
}

pub trait BrowserOpener: Send + Sync {
    fn open_external(&self, url: &str) -> Result<()>;
}

#[derive(Clone, Debug)]
pub struct StaticSession {
    pub api_token: String,
}

impl StaticSession {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
        }
    }
}

impl SessionProvider for StaticSession {
    fn api_token(&self) -> String {
        self.api_token.clone()
    }
}

#[derive(Clone, Debug)]
pub struct StaticHosts {
    pub streamlabs: String,
}

impl Default for StaticHosts {
    fn default() -> Self {
        Self {
            streamlabs: DEFAULT_HOST.to_string(),
        }
    }
}

impl StaticHosts {
    pub const HOST_ENV: &'static str = "STREAMLABS_HOST";

    pub fn new(streamlabs: impl Into<String>) -> Self {
        Self {
            streamlabs: streamlabs.into(),
        }
    }

    /// Reads `STREAMLABS_HOST`, falling back to [`DEFAULT_HOST`] when unset or blank.
    pub fn from_env() -> Self {
        match std::env::var(Self::HOST_ENV) {
            Ok(host) if !host.trim().is_empty() => Self::new(host.trim()),
            _ => Self::default(),
        }
    }
}

impl HostResolver for StaticHosts {
    fn streamlabs(&self) -> String {
        self.streamlabs.clone()
    }
}

/// Writes usage events to the log instead of a statistics backend.
#[derive(Clone, Debug, Default)]
pub struct LogUsageRecorder;

impl UsageRecorder for LogUsageRecorder {
    fn record_feature_usage(&self, event_name: &str) {
        log::info!("feature usage: {event_name}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_hosts_default_to_streamlabs() {
        assert_eq!(StaticHosts::default().streamlabs(), "streamlabs.com");
    }

    #[test]
    fn static_session_hands_out_its_token() {
        let session = StaticSession::new("tok");
        assert_eq!(session.api_token(), "tok");
        assert_eq!(session.api_token(), "tok");
    }
}
