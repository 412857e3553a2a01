pub mod catalog;
pub mod credentials;
pub mod error;
pub mod management;
pub mod playback;
pub mod settings;

#[cfg(test)]
mod test_util;

pub use credentials::{BearerToken, ClientCredentialsProvider, CredentialProvider, ServiceCredentials};
pub use error::{Error, Result};
pub use management::{AssetCatalog, AssetFile, Locator, LocatorType, MediaServicesClient};
pub use playback::{AssetDownloads, CaptionInfo, StreamingManifestInfo};
