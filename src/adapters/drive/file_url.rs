use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_THUMBNAIL_SIZE: u32 = 200;
const THUMBNAIL_BASE: &str = "https://drive.google.com/thumbnail";

static FILE_PATH_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/file/d/([a-zA-Z0-9_-]+)").expect("valid file path pattern"));
static CONTENT_HOST_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"googleusercontent\.com/d/([a-zA-Z0-9_-]+)").expect("valid content host pattern")
});
static QUERY_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]id=([a-zA-Z0-9_-]+)").expect("valid query pattern"));

/// Drive file id of a share, download or content URL.
///
/// `…/file/d/ID/view` takes precedence over `googleusercontent.com/d/ID`, which
/// takes precedence over `…?id=ID`.
pub fn file_id(url: &str) -> Option<&str> {
    [&*FILE_PATH_ID, &*CONTENT_HOST_ID, &*QUERY_ID]
        .into_iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

/// Small preview of a Drive image; URLs that are not Drive URLs are returned as is.
pub fn thumbnail_url(url: &str, size: u32) -> String {
    match file_id(url) {
        Some(id) => format!("{}?id={}&sz=w{}", THUMBNAIL_BASE, id, size),
        None => url.to_owned(),
    }
}

/// URL that renders the image itself, `{public_base}{id}`.
pub fn direct_url(url: &str, public_base: &str) -> String {
    match file_id(url) {
        Some(id) => format!("{}{}", public_base, id),
        None => url.to_owned(),
    }
}
