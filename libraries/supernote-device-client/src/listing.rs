//! Extraction of the directory listing embedded in browse pages.
//!
//! The device does not expose a JSON endpoint; each directory page embeds
//! its listing as `const json = '{"fileList": [...]}'` inside a script tag.

use crate::error::{DeviceClientError, Result};
use crate::types::DirectoryPayload;
use crate::LISTING_MARKER;
use supernote_core::RemoteFile;

/// Pull the single-quoted JSON literal out of a browse page.
pub(crate) fn extract_embedded_json(html: &str) -> Result<&str> {
    let start = html
        .find(LISTING_MARKER)
        .ok_or_else(|| DeviceClientError::Protocol("no embedded listing in response".into()))?
        + LISTING_MARKER.len();

    let end = html[start..].find('\'').ok_or_else(|| {
        DeviceClientError::Protocol("unterminated embedded listing".into())
    })?;

    Ok(&html[start..start + end])
}

/// Parse a browse page into its directory entries, in page order.
pub(crate) fn parse_directory(html: &str) -> Result<Vec<RemoteFile>> {
    let json = extract_embedded_json(html)?;

    let payload: DirectoryPayload = serde_json::from_str(json).map_err(|e| {
        DeviceClientError::Protocol(format!("malformed embedded listing: {}", e))
    })?;

    Ok(payload.file_list.into_iter().map(RemoteFile::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><script>
        const json = '{"fileList": [{"name": "Note", "uri": "/Note", "isDirectory": true}, {"name": "a.note", "uri": "/a.note", "size": 10, "date": "2024-01-02 10:00"}]}';
        render(json);
    </script></body></html>"#;

    #[test]
    fn test_parse_directory() {
        let entries = parse_directory(PAGE).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].name, "Note");
        assert!(entries[0].is_directory);

        assert_eq!(entries[1].uri, "/a.note");
        assert_eq!(entries[1].size, 10);
        assert_eq!(entries[1].modified.as_deref(), Some("2024-01-02 10:00"));
        assert!(!entries[1].is_directory);
    }

    #[test]
    fn test_missing_marker_is_protocol_error() {
        let result = parse_directory("<html><body>plain page</body></html>");
        assert!(matches!(result, Err(DeviceClientError::Protocol(_))));
    }

    #[test]
    fn test_unterminated_literal_is_protocol_error() {
        let result = parse_directory("const json = '{\"fileList\": []}");
        assert!(matches!(result, Err(DeviceClientError::Protocol(_))));
    }

    #[test]
    fn test_malformed_json_is_protocol_error() {
        let result = parse_directory("const json = 'not json'");
        assert!(matches!(result, Err(DeviceClientError::Protocol(_))));
    }

    #[test]
    fn test_protocol_errors_are_not_transient() {
        let err = parse_directory("nope").unwrap_err();
        assert!(!err.is_transient());
    }
}
