use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;

use super::types::*;
use crate::MagicLinkError;
use crate::Result;
use crate::collaborators::HostResolver;
use crate::collaborators::SessionProvider;
use crate::destination::route_for;

const LOGIN_TOKEN_PATH: &'static str = "/api/v5/slobs/login/token";

pub fn authorized_headers(api_token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut value = HeaderValue::from_str(&format!("Bearer {api_token}"))?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Exchanges the current session for a one-shot login token and turns it into dashboard links.
#[derive(Clone)]
pub struct MagicLinkApi {
    session: Arc<dyn SessionProvider>,
    hosts: Arc<dyn HostResolver>,
    /// Scheme for the token request only. Generated links are always https.
    pub api_scheme: String,
}

impl MagicLinkApi {
    pub fn new(session: Arc<dyn SessionProvider>, hosts: Arc<dyn HostResolver>) -> Self {
        Self {
            session,
            hosts,
            api_scheme: "https".to_string(),
        }
    }

    /// Talk plain http to the token endpoint, for local servers.
    pub fn with_api_scheme(mut self, scheme: &str) -> Self {
        self.api_scheme = scheme.to_string();
        self
    }

    pub fn token_url(&self) -> String {
        self.token_url_for(&self.hosts.streamlabs())
    }

    fn token_url_for(&self, host: &str) -> String {
        format!("{}://{host}{LOGIN_TOKEN_PATH}", self.api_scheme)
    }

    pub async fn fetch_token(&self) -> Result<LoginTokenResponse> {
        self.fetch_token_from(&self.hosts.streamlabs()).await
    }

    async fn fetch_token_from(&self, host: &str) -> Result<LoginTokenResponse> {
        let headers = authorized_headers(&self.session.api_token())?;
        let url = self.token_url_for(host);
        log::debug!("requesting login token from {url}");
        let response = reqwest::Client::new()
            .get(url)
            .headers(headers)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(MagicLinkError::auth(status, body))
        }
    }

    /// Fetch a fresh token and build the link for `sub_page`. Every call hits the token
    /// endpoint exactly once, and the host is resolved once so the token and the link always
    /// point at the same service.
    pub async fn build_dashboard_link(&self, sub_page: &str, source: Option<&str>) -> Result<String> {
        let host = self.hosts.streamlabs();
        let token = self.fetch_token_from(&host).await?.login_token;
        let route = route_for(sub_page);
        log::debug!("building magic link for \"{sub_page}\" ({:?})", route.template);
        Ok(route.format(&host, &token, sub_page, source))
    }

    pub async fn dashboard_magic_link(&self, request: &MagicLinkRequest) -> Result<String> {
        self.build_dashboard_link(&request.sub_page, request.referral())
            .await
    }
}
