use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

use super::SettingsError;

#[derive(Debug)]
pub struct Http {
    pub request_timeout: Duration,
    pub token_refresh_margin: Duration,
}

impl Http {
    pub fn new(sources: Vec<PartialHttp>) -> Result<Self, SettingsError> {
        let merged: PartialHttp = sources
            .into_iter()
            .fold(Default::default(), |acc, x| PartialHttp {
                request_timeout: acc.request_timeout.or(x.request_timeout),
                token_refresh_margin: acc.token_refresh_margin.or(x.token_refresh_margin),
            });

        Ok(Http {
            request_timeout: merged
                .request_timeout
                .ok_or_else(|| SettingsError::MissingValue("http.request_timeout".to_string()))?,
            token_refresh_margin: merged.token_refresh_margin.ok_or_else(|| {
                SettingsError::MissingValue("http.token_refresh_margin".to_string())
            })?,
        })
    }

    pub fn client(&self) -> Result<Client, SettingsError> {
        Ok(Client::builder().timeout(self.request_timeout).build()?)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialHttp {
    #[serde(default)]
    #[serde(with = "humantime_serde")]
    pub request_timeout: Option<Duration>,

    #[serde(default)]
    #[serde(with = "humantime_serde")]
    pub token_refresh_margin: Option<Duration>,
}
