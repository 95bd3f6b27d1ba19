//! Writing resize requests into asset URLs.

use url::Url;

use super::resize::ResizeDimensions;
use super::{RESIZE_HEIGHT_PARAM, RESIZE_WIDTH_PARAM};

/// Set the `h` and `w` query parameters on `url` to `dimensions`.
///
/// The first existing occurrence of each parameter is replaced in place and
/// later duplicates are dropped; missing parameters are appended. Nothing
/// else in the URL changes.
pub fn add_resizing_params(dimensions: &ResizeDimensions, url: &mut Url) {
    set_query_param(url, RESIZE_HEIGHT_PARAM, &dimensions.height.to_string());
    set_query_param(url, RESIZE_WIDTH_PARAM, &dimensions.width.to_string());
}

/// Replace-or-append a single query parameter.
pub fn set_query_param(url: &mut Url, name: &str, value: &str) {
    let mut replaced = false;
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (key, existing) in url.query_pairs() {
        if key == name {
            if !replaced {
                pairs.push((key.into_owned(), value.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((key.into_owned(), existing.into_owned()));
        }
    }
    if !replaced {
        pairs.push((name.to_string(), value.to_string()));
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);
}
