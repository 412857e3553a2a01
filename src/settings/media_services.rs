use serde::Deserialize;
use url::Url;

use super::SettingsError;
use crate::credentials::{ServiceCredentials, DEFAULT_RESOURCE, DEFAULT_TOKEN_ENDPOINT};

#[derive(Debug, Clone)]
pub struct MediaServices {
    pub credentials: ServiceCredentials,
    pub rest_api_endpoint: Url,
}

impl MediaServices {
    /// `Ok(None)` when none of the identity values is set anywhere.
    pub fn new(
        scope: &str,
        sources: Vec<PartialMediaServices>,
    ) -> Result<Option<Self>, SettingsError> {
        let merged: PartialMediaServices =
            sources
                .into_iter()
                .fold(Default::default(), |acc, x| PartialMediaServices {
                    client_id: acc.client_id.or(x.client_id),
                    client_secret: acc.client_secret.or(x.client_secret),
                    tenant: acc.tenant.or(x.tenant),
                    rest_api_endpoint: acc.rest_api_endpoint.or(x.rest_api_endpoint),
                    resource: acc.resource.or(x.resource),
                    token_endpoint: acc.token_endpoint.or(x.token_endpoint),
                });

        if !merged.has_identity() {
            return Ok(None);
        }

        let missing = |key: &str| SettingsError::MissingValue(format!("{}.{}", scope, key));

        Ok(Some(MediaServices {
            credentials: ServiceCredentials {
                client_id: merged.client_id.ok_or_else(|| missing("client_id"))?,
                client_secret: merged.client_secret.ok_or_else(|| missing("client_secret"))?,
                tenant: merged.tenant.ok_or_else(|| missing("tenant"))?,
                resource: merged.resource.ok_or_else(|| missing("resource"))?,
                token_endpoint: merged
                    .token_endpoint
                    .ok_or_else(|| missing("token_endpoint"))?,
            },
            rest_api_endpoint: merged
                .rest_api_endpoint
                .ok_or_else(|| missing("rest_api_endpoint"))?,
        }))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialMediaServices {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub tenant: Option<String>,
    pub rest_api_endpoint: Option<Url>,
    pub resource: Option<String>,
    pub token_endpoint: Option<Url>,
}

impl PartialMediaServices {
    pub fn defaults() -> Self {
        PartialMediaServices {
            resource: Some(DEFAULT_RESOURCE.to_string()),
            token_endpoint: Url::parse(DEFAULT_TOKEN_ENDPOINT).ok(),
            ..Default::default()
        }
    }

    fn has_identity(&self) -> bool {
        self.client_id.is_some()
            || self.client_secret.is_some()
            || self.tenant.is_some()
            || self.rest_api_endpoint.is_some()
    }
}
