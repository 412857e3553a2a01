use log::debug;

use super::{strip_scheme, StreamingManifestInfo, MANIFEST_EXTENSION, MANIFEST_MIME_TYPE};
use crate::management::{AssetFile, Locator};

pub fn streaming_manifest(files: &[AssetFile], locator: &Locator) -> StreamingManifestInfo {
    let manifest_filename = files
        .iter()
        .find(|f| is_manifest(f))
        .map(|f| f.name.clone())
        .unwrap_or_default();

    if manifest_filename.is_empty() {
        debug!("No streaming manifest among files of asset {}", locator.asset_id);
    }

    StreamingManifestInfo {
        manifest_url: format!(
            "{}{}/manifest",
            strip_scheme(&locator.path),
            manifest_filename
        ),
        manifest_filename,
        asset_id: locator.asset_id.clone(),
    }
}

fn is_manifest(file: &AssetFile) -> bool {
    file.mime_type.as_deref() == Some(MANIFEST_MIME_TYPE) && file.name.ends_with(MANIFEST_EXTENSION)
}
