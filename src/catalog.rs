use log::{info, warn};

use crate::error::Result;
use crate::management::AssetCatalog;
use crate::playback::{self, AssetDownloads, StreamingManifestInfo};

pub fn stream_videos<C>(catalog: &C) -> Result<Vec<StreamingManifestInfo>>
where
    C: AssetCatalog + ?Sized,
{
    let locators = catalog.list_on_demand_locators()?;

    info!("Found {} on demand origin locators", locators.len());

    locators
        .iter()
        .map(|locator| -> Result<StreamingManifestInfo> {
            let files = catalog.list_files(&locator.asset_id)?;
            Ok(playback::streaming_manifest(&files, locator))
        })
        .collect()
}

/// `None` when the asset has no SAS locator to download from.
pub fn asset_downloads<C>(catalog: &C, asset_id: &str) -> Result<Option<AssetDownloads>>
where
    C: AssetCatalog + ?Sized,
{
    let locator = match catalog.signed_locator(asset_id)? {
        Some(locator) => locator,
        None => {
            warn!(
                "Asset {} has no SAS locator; captions and downloads need a progressive locator in addition to the streaming one",
                asset_id
            );
            return Ok(None);
        }
    };

    let files = catalog.list_files(asset_id)?;
    let (captions, download_video_url) = playback::captions_and_download_url(&locator, &files);

    Ok(Some(AssetDownloads {
        captions,
        download_video_url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::management::{AssetFile, Locator};
    use crate::test_util::{file, locator};
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockCatalog {
        on_demand: Vec<Locator>,
        signed: HashMap<String, Locator>,
        files: HashMap<String, Vec<AssetFile>>,
        file_requests: RefCell<Vec<String>>,
    }

    impl AssetCatalog for MockCatalog {
        fn list_on_demand_locators(&self) -> Result<Vec<Locator>> {
            Ok(self.on_demand.clone())
        }

        fn list_files(&self, asset_id: &str) -> Result<Vec<AssetFile>> {
            self.file_requests.borrow_mut().push(asset_id.to_string());

            self.files.get(asset_id).cloned().ok_or_else(|| Error::Remote {
                status: 404,
                body: format!("asset {} not found", asset_id),
            })
        }

        fn signed_locator(&self, asset_id: &str) -> Result<Option<Locator>> {
            Ok(self.signed.get(asset_id).cloned())
        }
    }

    #[test]
    fn test_stream_videos() {
        let mut catalog = MockCatalog::default();
        catalog.on_demand = vec![
            locator("one", "http://host/loc-1/"),
            locator("two", "http://host/loc-2/"),
        ];
        catalog.files.insert(
            "one".to_string(),
            vec![file("one.ism", Some("application/octet-stream"), None)],
        );
        catalog
            .files
            .insert("two".to_string(), vec![file("two.mp4", Some("video/mp4"), None)]);

        let videos = stream_videos(&catalog).unwrap();

        assert_eq!(
            videos,
            vec![
                StreamingManifestInfo {
                    manifest_url: "//host/loc-1/one.ism/manifest".to_string(),
                    manifest_filename: "one.ism".to_string(),
                    asset_id: "one".to_string(),
                },
                StreamingManifestInfo {
                    manifest_url: "//host/loc-2//manifest".to_string(),
                    manifest_filename: "".to_string(),
                    asset_id: "two".to_string(),
                },
            ]
        );
        assert_eq!(*catalog.file_requests.borrow(), vec!["one", "two"]);
    }

    #[test]
    fn test_stream_videos_propagates_failures() {
        let mut catalog = MockCatalog::default();
        catalog.on_demand = vec![locator("missing", "http://host/loc/")];

        let err = stream_videos(&catalog).unwrap_err();

        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_asset_downloads() {
        let mut catalog = MockCatalog::default();
        catalog.signed.insert(
            "asset".to_string(),
            locator("asset", "https://store/asset?sv=1&sr=c"),
        );
        catalog.files.insert(
            "asset".to_string(),
            vec![
                file("c1.vtt", None, None),
                file("c2.vtt", None, None),
                file("v_1000.mp4", None, Some("1000")),
                file("v_1001.mp4", None, Some("1001")),
            ],
        );

        let downloads = asset_downloads(&catalog, "asset").unwrap().unwrap();

        assert_eq!(
            serde_json::to_value(&downloads).unwrap(),
            serde_json::json!({
                "captions": [
                    {"download_url": "//store/asset/c1.vtt?sv=1&sr=c", "name_file": "c1.vtt"},
                    {"download_url": "//store/asset/c2.vtt?sv=1&sr=c", "name_file": "c2.vtt"}
                ],
                "download_video_url": "//store/asset/v_1001.mp4?sv=1&sr=c"
            })
        );
    }

    #[test]
    fn test_asset_downloads_without_signed_locator() {
        let catalog = MockCatalog::default();

        let downloads = asset_downloads(&catalog, "asset").unwrap();

        assert!(downloads.is_none());
        assert!(catalog.file_requests.borrow().is_empty());
    }
}
