//! Playback and download urls derived from asset listings.
//!
//! Everything in here is a pure function of an already fetched listing and
//! degrades to empty values instead of failing. Urls are protocol relative
//! so the player inherits the scheme of the embedding page.

mod captions;
mod manifest;

use serde::Serialize;

pub use captions::{caption_infos, captions_and_download_url, download_video_url};
pub use manifest::streaming_manifest;

pub const MANIFEST_EXTENSION: &str = ".ism";
pub const MANIFEST_MIME_TYPE: &str = "application/octet-stream";
pub const CAPTION_EXTENSION: &str = ".vtt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamingManifestInfo {
    pub manifest_url: String,
    pub manifest_filename: String,
    pub asset_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptionInfo {
    pub download_url: String,
    #[serde(rename = "name_file")]
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetDownloads {
    pub captions: Vec<CaptionInfo>,
    pub download_video_url: Option<String>,
}

/// Drops everything up to and including the first `:`.
fn strip_scheme(url: &str) -> &str {
    match url.find(':') {
        Some(idx) => &url[idx + 1..],
        None => url,
    }
}
