mod client_credentials;

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use url::Url;

use crate::error::Result;

pub use client_credentials::{ClientCredentialsProvider, DEFAULT_REFRESH_MARGIN};

pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://login.microsoftonline.com/";
pub const DEFAULT_RESOURCE: &str = "https://rest.media.azure.net";

pub trait CredentialProvider: Send + Sync {
    fn token(&self, credentials: &ServiceCredentials) -> Result<Arc<BearerToken>>;
}

/// Service principal identity used for the client credentials grant.
///
/// `token_endpoint` is the authority root, the tenant and `oauth2/token`
/// are appended to it.
#[derive(Clone, PartialEq)]
pub struct ServiceCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub tenant: String,
    pub resource: String,
    pub token_endpoint: Url,
}

impl ServiceCredentials {
    pub fn new(client_id: String, client_secret: String, tenant: String) -> Self {
        ServiceCredentials {
            client_id,
            client_secret,
            tenant,
            resource: DEFAULT_RESOURCE.to_string(),
            token_endpoint: Url::parse(DEFAULT_TOKEN_ENDPOINT)
                .expect("default token endpoint is a valid url"),
        }
    }

    pub fn token_url(&self) -> std::result::Result<Url, url::ParseError> {
        self.token_endpoint
            .join(&format!("{}/oauth2/token", self.tenant))
    }

    fn cache_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.token_endpoint, self.tenant, self.client_id, self.resource
        )
    }
}

impl fmt::Debug for ServiceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("tenant", &self.tenant)
            .field("resource", &self.resource)
            .field("token_endpoint", &self.token_endpoint.as_str())
            .finish()
    }
}

#[derive(Clone, PartialEq)]
pub struct BearerToken {
    token_type: String,
    access_token: String,
    expires_at: SystemTime,
}

impl BearerToken {
    pub fn new(token_type: String, access_token: String, expires_at: SystemTime) -> Self {
        BearerToken {
            token_type,
            access_token,
            expires_at,
        }
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn expires_at(&self) -> SystemTime {
        self.expires_at
    }

    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    pub fn is_valid_for(&self, margin: Duration) -> bool {
        match SystemTime::now().checked_add(margin) {
            Some(deadline) => deadline < self.expires_at,
            None => false,
        }
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("token_type", &self.token_type)
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl CredentialProvider for BearerToken {
    fn token(&self, _credentials: &ServiceCredentials) -> Result<Arc<BearerToken>> {
        Ok(Arc::new(self.clone()))
    }
}
