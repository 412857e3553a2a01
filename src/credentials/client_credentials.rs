use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, SystemTime};

use super::{BearerToken, CredentialProvider, ServiceCredentials};
use crate::error::{Error, Result};
use crate::management::model::string_or_number;

pub const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(5 * 60);

struct CachedToken {
    key: String,
    token: Arc<BearerToken>,
}

pub struct ClientCredentialsProvider {
    http: Client,
    refresh_margin: Duration,
    cached: RwLock<Option<CachedToken>>,
}

impl ClientCredentialsProvider {
    pub fn new(http: Client, refresh_margin: Duration) -> Self {
        ClientCredentialsProvider {
            http,
            refresh_margin,
            cached: RwLock::new(None),
        }
    }

    fn cached_token(&self, key: &str) -> Option<Arc<BearerToken>> {
        let cached = self.cached.read().unwrap_or_else(PoisonError::into_inner);

        cached
            .as_ref()
            .filter(|c| c.key == key && c.token.is_valid_for(self.refresh_margin))
            .map(|c| Arc::clone(&c.token))
    }

    fn fetch_token(&self, credentials: &ServiceCredentials) -> Result<BearerToken> {
        let url = credentials.token_url().map_err(|source| Error::InvalidUrl {
            url: credentials.token_endpoint.to_string(),
            source,
        })?;

        info!(
            "Requesting access token for client {} from {}",
            credentials.client_id, url
        );

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("resource", credentials.resource.as_str()),
        ];

        let response = self.http.post(url).form(&params).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(Error::Auth {
                status: status.as_u16(),
                message: rejection_message(&body),
            });
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(Error::MalformedResponse)?;
        token.into_bearer_token(status.as_u16())
    }
}

impl CredentialProvider for ClientCredentialsProvider {
    fn token(&self, credentials: &ServiceCredentials) -> Result<Arc<BearerToken>> {
        let key = credentials.cache_key();

        if let Some(token) = self.cached_token(&key) {
            return Ok(token);
        }

        let token = Arc::new(self.fetch_token(credentials)?);
        debug!("Caching access token until {:?}", token.expires_at());

        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = Some(CachedToken {
            key,
            token: Arc::clone(&token),
        });

        Ok(token)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    access_token: String,
    #[serde(default, deserialize_with = "string_or_number")]
    expires_in: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl TokenResponse {
    fn into_bearer_token(self, status: u16) -> Result<BearerToken> {
        if self.access_token.is_empty() {
            return Err(Error::Auth {
                status,
                message: "token response did not contain an access token".to_string(),
            });
        }

        // a token without a usable lifetime is handed out once and never reused
        let now = SystemTime::now();
        let expires_at = self
            .expires_in
            .and_then(|s| s.trim().parse::<u64>().ok())
            .and_then(|secs| now.checked_add(Duration::from_secs(secs)))
            .unwrap_or(now);

        Ok(BearerToken::new(
            self.token_type,
            self.access_token,
            expires_at,
        ))
    }
}

#[derive(Debug, Deserialize)]
struct TokenRejection {
    error: Option<String>,
    error_description: Option<String>,
}

fn rejection_message(body: &str) -> String {
    match serde_json::from_str::<TokenRejection>(body) {
        Ok(TokenRejection {
            error_description: Some(description),
            ..
        }) => description,
        Ok(TokenRejection {
            error: Some(error), ..
        }) => error,
        _ => body.to_string(),
    }
}
