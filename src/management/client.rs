use reqwest::blocking::{Client, RequestBuilder};
use url::Url;

use crate::error::{Error, Result};

/// Blocking request builder relative to the management api base url.
pub struct HttpClient {
    inner: Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(inner: Client, base_url: Url) -> Self {
        HttpClient { inner, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn get(&self, url: &str) -> Result<RequestBuilder> {
        Ok(self.inner.get(self.url(url)?))
    }

    pub fn url(&self, url: &str) -> Result<Url> {
        self.base_url.join(url).map_err(|source| Error::InvalidUrl {
            url: format!("{}{}", self.base_url, url),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_relative_to_api_root() {
        let client = HttpClient::new(
            Client::new(),
            Url::parse("https://account.restv2.westeurope.media.azure.net/api/").unwrap(),
        );

        assert_eq!(
            client.url("Locators?$filter=Type eq 2").unwrap().as_str(),
            "https://account.restv2.westeurope.media.azure.net/api/Locators?$filter=Type%20eq%202"
        );
        assert_eq!(
            client.url("Assets('nb:cid:UUID:1')/Files").unwrap().as_str(),
            "https://account.restv2.westeurope.media.azure.net/api/Assets('nb:cid:UUID:1')/Files"
        );
    }
}
