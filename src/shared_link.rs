//! Validation of Dropbox shared folder links.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{DropboxError, Result};

/// Any non-empty path on a dropbox.com host. The API decides whether the
/// link itself is usable.
static SHARED_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://(?:[a-z0-9-]+\.)*dropbox\.com/\S+$")
        .expect("Invalid shared link regex")
});

/// Check that a string points at a Dropbox host and return it trimmed.
///
/// Query parameters such as `rlkey` are part of the link's access grant and
/// are kept as given.
///
/// # Examples
///
/// ```
/// use dropbox_download::shared_link::normalize_shared_link;
///
/// let link = normalize_shared_link(" https://www.dropbox.com/sh/abc/DEF?dl=0 ").unwrap();
/// assert_eq!(link, "https://www.dropbox.com/sh/abc/DEF?dl=0");
///
/// assert!(normalize_shared_link("https://example.com/sh/abc").is_err());
/// ```
pub fn normalize_shared_link(link: &str) -> Result<String> {
    let trimmed = link.trim();

    if SHARED_LINK_REGEX.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    Err(DropboxError::InvalidSharedLink(link.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_folder_link() {
        let link = "https://www.dropbox.com/sh/a1b2c3/AAD_x-y?dl=0";
        assert_eq!(normalize_shared_link(link).unwrap(), link);
    }

    #[test]
    fn test_scl_folder_link_with_rlkey() {
        let link = "https://www.dropbox.com/scl/fo/abc123/h?rlkey=xyz&dl=0";
        assert_eq!(normalize_shared_link(link).unwrap(), link);
    }

    #[test]
    fn test_link_without_www() {
        let link = "https://dropbox.com/s/abc/file.txt";
        assert_eq!(normalize_shared_link(link).unwrap(), link);
    }

    #[test]
    fn test_mixed_case_host() {
        let link = "https://www.Dropbox.com/sh/x";
        assert_eq!(normalize_shared_link(link).unwrap(), link);
        assert!(normalize_shared_link("HTTPS://WWW.DROPBOX.COM/SH/X").is_ok());
    }

    #[test]
    fn test_other_link_forms_passed_through() {
        assert!(normalize_shared_link("https://www.dropbox.com/l/scl/AAB").is_ok());
        assert!(normalize_shared_link("https://www.dropbox.com/t/abcdef").is_ok());
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(
            normalize_shared_link("\thttps://www.dropbox.com/sh/abc\n").unwrap(),
            "https://www.dropbox.com/sh/abc"
        );
    }

    #[test]
    fn test_invalid_links() {
        assert!(normalize_shared_link("").is_err());
        assert!(normalize_shared_link("   ").is_err());
        assert!(normalize_shared_link("https://example.com/sh/abc").is_err());
        assert!(normalize_shared_link("https://www.dropbox.com/").is_err());
        assert!(normalize_shared_link("https://notdropbox.com/sh/abc").is_err());
        assert!(normalize_shared_link("https://dropbox.com.evil.io/sh/abc").is_err());
        assert!(normalize_shared_link("ftp://www.dropbox.com/sh/abc").is_err());
    }
}
