use anyhow::Result;
use magic_link_api::prelude::*;

pub const API_TOKEN_ENV: &str = "STREAMLABS_API_TOKEN";

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub host: String,
    pub api_token: String,
}

impl Settings {
    /// Flags win over the environment.
    pub fn resolve(host: Option<&String>, api_token: Option<&String>) -> Result<Self> {
        let host = host
            .cloned()
            .unwrap_or_else(|| StaticHosts::from_env().streamlabs);
        let api_token = api_token
            .cloned()
            .or_else(|| std::env::var(API_TOKEN_ENV).ok());
        Self::from_parts(host, api_token)
    }

    fn from_parts(host: String, api_token: Option<String>) -> Result<Self> {
        let host = host.trim().trim_end_matches('/').to_string();
        if host.is_empty() {
            anyhow::bail!("host may not be empty");
        }
        if host.contains("://") {
            anyhow::bail!("host must be a bare domain, got \"{host}\"");
        }
        let api_token = match api_token.map(|t| t.trim().to_string()) {
            Some(t) if !t.is_empty() => t,
            _ => anyhow::bail!("no api token, pass --token or set {API_TOKEN_ENV}"),
        };
        Ok(Self { host, api_token })
    }
}
