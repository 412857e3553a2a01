mod error;
mod http;
mod media_services;

pub use error::*;
pub use http::*;
pub use media_services::*;

use anyhow::Context;
use log::info;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::result::Result;

use serde::Deserialize;
use url::Url;

use crate::credentials::{ClientCredentialsProvider, DEFAULT_REFRESH_MARGIN};
use crate::management::{MediaServicesClient, DEFAULT_REQUEST_TIMEOUT};

pub const CONFIG_PATH_VAR: &str = "MEDIA_SERVICES_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.yml";

const CLIENT_ID_VAR: &str = "AZURE_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "AZURE_CLIENT_SECRET";
const TENANT_VAR: &str = "AZURE_TENANT";
const REST_API_ENDPOINT_VAR: &str = "AZURE_REST_API_ENDPOINT";

#[derive(Debug)]
pub struct Settings {
    pub media_services: Option<MediaServices>,
    pub organizations: HashMap<String, MediaServices>,
    pub http: Http,
}

impl Settings {
    pub fn from_file(file_path: &str) -> Result<Self, SettingsError> {
        let reader = File::open(file_path).map_err(|e| SettingsError::FileParse {
            path: Some(file_path.to_string()),
            cause: Box::new(e),
        })?;

        Settings::from_reader(reader)
    }

    pub fn from_reader<T: Read>(reader: T) -> Result<Self, SettingsError> {
        Settings::merge(vec![PartialSettings::from_reader(reader)?, Default::default()])
    }

    pub fn merge(mut sources: Vec<PartialSettings>) -> Result<Self, SettingsError> {
        let media_services_sources = sources
            .iter_mut()
            .filter_map(|s| s.media_services.take())
            .collect();

        let mut organization_sources: HashMap<String, Vec<PartialMediaServices>> = HashMap::new();
        for organizations in sources.iter_mut().filter_map(|s| s.organizations.take()) {
            for (name, partial) in organizations {
                organization_sources.entry(name).or_default().push(partial);
            }
        }

        let http_sources = sources.iter_mut().filter_map(|s| s.http.take()).collect();

        let mut organizations = HashMap::new();
        for (name, mut partials) in organization_sources {
            partials.push(PartialMediaServices::defaults());

            let scope = format!("organizations.{}", name);
            let media_services = MediaServices::new(&scope, partials)?
                .ok_or_else(|| SettingsError::MissingValue(format!("{}.client_id", scope)))?;

            organizations.insert(name, media_services);
        }

        Ok(Settings {
            media_services: MediaServices::new("media_services", media_services_sources)?,
            organizations,
            http: Http::new(http_sources)?,
        })
    }

    /// Organization settings win over the platform wide ones.
    pub fn media_services_for(&self, organization: &str) -> Option<&MediaServices> {
        self.organizations
            .get(organization)
            .or_else(|| self.media_services.as_ref())
    }

    pub fn client_for(&self, organization: &str) -> Result<Option<MediaServicesClient>, SettingsError> {
        let media_services = match self.media_services_for(organization) {
            Some(media_services) => media_services,
            None => return Ok(None),
        };

        let http = self.http.client()?;
        let provider = ClientCredentialsProvider::new(http.clone(), self.http.token_refresh_margin);

        Ok(Some(MediaServicesClient::with_provider(
            http,
            media_services.credentials.clone(),
            media_services.rest_api_endpoint.clone(),
            provider,
        )))
    }
}

#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    media_services: Option<PartialMediaServices>,
    organizations: Option<HashMap<String, PartialMediaServices>>,
    http: Option<PartialHttp>,
}

impl PartialSettings {
    pub fn from_reader<T: Read>(reader: T) -> Result<Self, SettingsError> {
        serde_yaml::from_reader(reader).map_err(|e| SettingsError::FileParse {
            path: None,
            cause: Box::new(e),
        })
    }

    pub fn from_env() -> Result<Self, SettingsError> {
        PartialSettings::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rest_api_endpoint = match var(REST_API_ENDPOINT_VAR) {
            Some(endpoint) => Some(Url::parse(&endpoint).map_err(|cause| {
                SettingsError::InvalidValue {
                    key: REST_API_ENDPOINT_VAR.to_string(),
                    cause,
                }
            })?),
            None => None,
        };

        Ok(PartialSettings {
            media_services: Some(PartialMediaServices {
                client_id: var(CLIENT_ID_VAR),
                client_secret: var(CLIENT_SECRET_VAR),
                tenant: var(TENANT_VAR),
                rest_api_endpoint,
                resource: None,
                token_endpoint: None,
            }),
            organizations: None,
            http: None,
        })
    }
}

impl Default for PartialSettings {
    fn default() -> Self {
        PartialSettings {
            media_services: Some(PartialMediaServices::defaults()),
            organizations: None,
            http: Some(PartialHttp {
                request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
                token_refresh_margin: Some(DEFAULT_REFRESH_MARGIN),
            }),
        }
    }
}

/// Environment first, then the config file, then defaults.
pub fn load_settings() -> anyhow::Result<Settings> {
    let mut sources = vec![PartialSettings::from_env()?];

    match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) => sources.push(read_config_file(&path)?),
        Err(e) => {
            info!(
                "Missing or invalid {} env var, fallback to {}; {:?}",
                CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH, e
            );

            if Path::new(DEFAULT_CONFIG_PATH).exists() {
                sources.push(read_config_file(DEFAULT_CONFIG_PATH)?);
            }
        }
    }

    sources.push(Default::default());

    Ok(Settings::merge(sources)?)
}

fn read_config_file(path: &str) -> anyhow::Result<PartialSettings> {
    let file = File::open(path).with_context(|| format!("Failed to open config file {}", path))?;

    PartialSettings::from_reader(file)
        .with_context(|| format!("Failed to parse config file {}", path))
}
