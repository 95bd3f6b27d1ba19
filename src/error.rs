//! Error types for attachment sizing.

use thiserror::Error;

/// Errors surfaced by the attachment resolver.
///
/// Missing or unusable CSS constraints and malformed `oh`/`ow` metadata are
/// not errors; they degrade to an unresized URL. Only an unusable source URL
/// reaches the caller.
#[derive(Debug, Error)]
pub enum SizingError {
    /// The attachment has no non-empty image or thumbnail URL.
    #[error("attachment has no source url")]
    MissingSourceUrl,

    /// The source URL could not be parsed.
    #[error("invalid attachment url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl SizingError {
    pub(crate) fn invalid_url(url: &str, source: url::ParseError) -> Self {
        SizingError::InvalidUrl {
            url: url.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_message_names_the_input() {
        let err = SizingError::invalid_url("not a url", url::ParseError::RelativeUrlWithoutBase);
        let message = err.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("relative URL without a base"));
    }

    #[test]
    fn missing_source_message() {
        assert_eq!(
            SizingError::MissingSourceUrl.to_string(),
            "attachment has no source url"
        );
    }
}
