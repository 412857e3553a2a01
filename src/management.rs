mod client;
pub mod model;

use log::debug;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_CHARSET, AUTHORIZATION, CONTENT_TYPE, HOST,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::credentials::{
    ClientCredentialsProvider, CredentialProvider, ServiceCredentials, DEFAULT_REFRESH_MARGIN,
};
use crate::error::{Error, Result};

pub use client::HttpClient;
pub use model::{AssetFile, Collection, Locator, LocatorType};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const API_VERSION: &str = "2.15";
const DATA_SERVICE_VERSION: &str = "1.0";
const MAX_DATA_SERVICE_VERSION: &str = "3.0";

pub trait AssetCatalog {
    fn list_on_demand_locators(&self) -> Result<Vec<Locator>>;
    fn list_files(&self, asset_id: &str) -> Result<Vec<AssetFile>>;
    fn signed_locator(&self, asset_id: &str) -> Result<Option<Locator>>;
}

pub struct MediaServicesClient<P = ClientCredentialsProvider>
where
    P: CredentialProvider,
{
    http: HttpClient,
    credentials: ServiceCredentials,
    host: Option<String>,
    token_provider: P,
}

impl MediaServicesClient<ClientCredentialsProvider> {
    pub fn new(credentials: ServiceCredentials, rest_api_endpoint: Url) -> Result<Self> {
        let http = Client::builder().timeout(DEFAULT_REQUEST_TIMEOUT).build()?;
        let provider = ClientCredentialsProvider::new(http.clone(), DEFAULT_REFRESH_MARGIN);

        Ok(Self::with_provider(
            http,
            credentials,
            rest_api_endpoint,
            provider,
        ))
    }
}

impl<P> MediaServicesClient<P>
where
    P: CredentialProvider,
{
    pub fn with_provider(
        http: Client,
        credentials: ServiceCredentials,
        rest_api_endpoint: Url,
        token_provider: P,
    ) -> Self {
        // relative joins replace the last segment unless the path ends with a slash
        let mut rest_api_endpoint = rest_api_endpoint;
        if !rest_api_endpoint.path().ends_with('/') {
            let path = format!("{}/", rest_api_endpoint.path());
            rest_api_endpoint.set_path(&path);
        }

        let host = host_from_endpoint(rest_api_endpoint.as_str());

        MediaServicesClient {
            http: HttpClient::new(http, rest_api_endpoint),
            credentials,
            host,
            token_provider,
        }
    }

    pub fn rest_api_endpoint(&self) -> &Url {
        self.http.base_url()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn credentials(&self) -> &ServiceCredentials {
        &self.credentials
    }

    pub fn headers(&self) -> Result<HeaderMap> {
        let token = self.token_provider.token(&self.credentials)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("dataserviceversion"),
            HeaderValue::from_static(DATA_SERVICE_VERSION),
        );
        headers.insert(
            HeaderName::from_static("maxdataserviceversion"),
            HeaderValue::from_static(MAX_DATA_SERVICE_VERSION),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_CHARSET, HeaderValue::from_static("UTF-8"));
        headers.insert(
            HeaderName::from_static("x-ms-version"),
            HeaderValue::from_static(API_VERSION),
        );
        if let Some(host) = &self.host {
            headers.insert(HOST, HeaderValue::from_str(host)?);
        }

        let mut authorization = HeaderValue::from_str(&token.authorization())?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        Ok(headers)
    }

    fn get_collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let request = self.http.get(path)?.headers(self.headers()?);

        debug!("GET {}{}", self.http.base_url(), path);

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(Error::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let collection: Collection<T> =
            serde_json::from_str(&body).map_err(Error::MalformedResponse)?;

        debug!("GET {} returned {} entries", path, collection.value.len());

        Ok(collection.value)
    }
}

impl<P> AssetCatalog for MediaServicesClient<P>
where
    P: CredentialProvider,
{
    fn list_on_demand_locators(&self) -> Result<Vec<Locator>> {
        self.get_collection("Locators?$filter=Type eq 2")
    }

    fn list_files(&self, asset_id: &str) -> Result<Vec<AssetFile>> {
        self.get_collection(&format!("Assets('{}')/Files", asset_id))
    }

    fn signed_locator(&self, asset_id: &str) -> Result<Option<Locator>> {
        let locators: Vec<Locator> =
            self.get_collection(&format!("Assets('{}')/Locators?$filter=Type eq 1", asset_id))?;

        Ok(locators.into_iter().next())
    }
}

/// Authority between the scheme and the first `/api/` segment, if any.
pub fn host_from_endpoint(endpoint: &str) -> Option<String> {
    let pattern = Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://(.+?)/api/").ok()?;

    pattern
        .captures(endpoint)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
