use std::time::{Duration, SystemTime};
use url::Url;
use wiremock::MockServer;

use crate::credentials::{BearerToken, ServiceCredentials};
use crate::management::{AssetFile, Locator};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub async fn blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

pub fn credentials_for(server: &MockServer) -> ServiceCredentials {
    let mut credentials =
        ServiceCredentials::new("client".to_string(), "secret".to_string(), "tenant".to_string());
    credentials.token_endpoint = Url::parse(&format!("{}/", server.uri())).unwrap();

    credentials
}

pub fn endpoint_for(server: &MockServer) -> Url {
    Url::parse(&format!("{}/api/", server.uri())).unwrap()
}

pub fn static_token() -> BearerToken {
    BearerToken::new(
        "Bearer".to_string(),
        "static-token".to_string(),
        SystemTime::now() + Duration::from_secs(3600),
    )
}

pub fn file(name: &str, mime_type: Option<&str>, size: Option<&str>) -> AssetFile {
    AssetFile {
        name: name.to_string(),
        mime_type: mime_type.map(str::to_string),
        content_file_size: size.map(str::to_string),
    }
}

pub fn locator(asset_id: &str, path: &str) -> Locator {
    Locator {
        id: None,
        name: None,
        asset_id: asset_id.to_string(),
        path: path.to_string(),
        locator_type: None,
    }
}
