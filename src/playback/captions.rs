use log::debug;

use super::{strip_scheme, CaptionInfo, CAPTION_EXTENSION};
use crate::management::{AssetFile, Locator};

pub fn captions_and_download_url(
    locator: &Locator,
    files: &[AssetFile],
) -> (Vec<CaptionInfo>, Option<String>) {
    let container = SignedContainer::parse(&locator.path);

    (
        caption_infos_in(&container, files),
        download_video_url_in(&container, files),
    )
}

pub fn caption_infos(locator: &Locator, files: &[AssetFile]) -> Vec<CaptionInfo> {
    caption_infos_in(&SignedContainer::parse(&locator.path), files)
}

pub fn download_video_url(locator: &Locator, files: &[AssetFile]) -> Option<String> {
    download_video_url_in(&SignedContainer::parse(&locator.path), files)
}

fn caption_infos_in(container: &SignedContainer, files: &[AssetFile]) -> Vec<CaptionInfo> {
    files
        .iter()
        .filter(|f| f.name.ends_with(CAPTION_EXTENSION))
        .map(|f| CaptionInfo {
            download_url: container.file_url(&f.name),
            filename: f.name.clone(),
        })
        .collect()
}

fn download_video_url_in(container: &SignedContainer, files: &[AssetFile]) -> Option<String> {
    let mut largest: Option<(u64, &AssetFile)> = None;

    for file in files {
        let size = match file.size() {
            Some(size) => size,
            None => {
                if let Some(raw) = &file.content_file_size {
                    debug!("Skipping {} with non numeric size `{}`", file.name, raw);
                }
                continue;
            }
        };

        match largest {
            Some((current, _)) if current >= size => {}
            _ => largest = Some((size, file)),
        }
    }

    largest.map(|(_, file)| container.file_url(&file.name))
}

/// A SAS locator path split into its container url and signature query.
struct SignedContainer<'a> {
    base: &'a str,
    query: Option<&'a str>,
}

impl<'a> SignedContainer<'a> {
    fn parse(path: &'a str) -> Self {
        let (base, query) = match path.find('?') {
            Some(idx) => (&path[..idx], Some(&path[idx + 1..])),
            None => (path, None),
        };

        SignedContainer {
            base: strip_scheme(base).trim_end_matches('/'),
            query,
        }
    }

    fn file_url(&self, filename: &str) -> String {
        match self.query {
            Some(query) => format!("{}/{}?{}", self.base, filename, query),
            None => format!("{}/{}", self.base, filename),
        }
    }
}
