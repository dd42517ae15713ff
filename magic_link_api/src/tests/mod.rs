use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use anyhow::Result;
use axum::Router;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use nanoid::nanoid;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;

use crate::prelude::*;


const API_TOKEN: &str = "session-api-token";

#[derive(Clone, Copy, Debug)]
pub enum TokenMode {
    /// A new random token per request.
    Fresh,
    /// Always hand out the same token.
    Fixed(&'static str),
    Malformed,
    /// Reply 200 with this exact body.
    Raw(&'static str),
}

#[derive(Clone)]
struct MockState {
    hits: Arc<AtomicUsize>,
    mode: TokenMode,
}

/// A token endpoint on a random local port that counts the requests it serves.
pub struct MockTokenServer {
    pub host: String,
    hits: Arc<AtomicUsize>,
}

impl MockTokenServer {
    pub async fn new(mode: TokenMode) -> Result<Self> {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/api/v5/slobs/login/token", get(login_token))
            .with_state(MockState {
                hits: hits.clone(),
                mode,
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let host = listener.local_addr()?.to_string();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { host, hits })
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn api(&self) -> MagicLinkApi {
        self.api_with_token(API_TOKEN)
    }

    pub fn api_with_token(&self, api_token: &str) -> MagicLinkApi {
        MagicLinkApi::new(
            Arc::new(StaticSession::new(api_token)),
            Arc::new(StaticHosts::new(self.host.clone())),
        )
        .with_api_scheme("http")
    }
}

async fn login_token(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let expected = format!("Bearer {API_TOKEN}");
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == expected);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "session expired").into_response();
    }
    let login_token = match state.mode {
        TokenMode::Fresh => nanoid!(),
        TokenMode::Fixed(token) => token.to_string(),
        TokenMode::Malformed => return "{\"token\": 12".into_response(),
        TokenMode::Raw(body) => {
            return ([(CONTENT_TYPE, "application/json")], body).into_response();
        }
    };
    axum::Json(LoginTokenResponse {
        login_token,
        expires_at: Some((crate::timestamp() + 60) as f64),
    })
    .into_response()
}

#[derive(Default)]
pub struct RecordingBrowser {
    pub opened: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingBrowser {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl BrowserOpener for RecordingBrowser {
    fn open_external(&self, url: &str) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("no browser available");
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingUsage {
    pub events: Mutex<Vec<String>>,
}

impl RecordingUsage {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl UsageRecorder for RecordingUsage {
    fn record_feature_usage(&self, event_name: &str) {
        self.events.lock().unwrap().push(event_name.to_string());
    }
}
