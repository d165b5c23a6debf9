//! Data models for Dropbox API v2 requests and responses.

use serde::{Deserialize, Serialize};

/// Kind of a listed entry, taken from the `.tag` field.
///
/// Entries without a tag are treated as files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryTag {
    #[default]
    File,
    Folder,
    Deleted,
    #[serde(other)]
    Unknown,
}

/// Metadata for a file or folder inside a shared folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = ".tag", default)]
    pub tag: EntryTag,
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub path_display: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub server_modified: Option<String>,
    #[serde(default)]
    pub rev: Option<String>,
    #[serde(default)]
    pub content_hash: Option<String>,
}

impl Entry {
    pub fn is_folder(&self) -> bool {
        self.tag == EntryTag::Folder
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.tag {
            EntryTag::File => "file",
            EntryTag::Folder => "folder",
            EntryTag::Deleted => "deleted",
            EntryTag::Unknown => "-",
        };
        let size_str = self
            .size
            .map(format_size)
            .unwrap_or_else(|| "-".to_string());
        let modified = self.server_modified.as_deref().unwrap_or("-");
        write!(f, "{:<8} {:>10} {:<22} {}", kind, size_str, modified, self.name)
    }
}

/// Format bytes into human-readable size.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Shared link reference inside a list_folder request.
#[derive(Debug, Clone, Serialize)]
pub struct SharedLink {
    pub url: String,
}

/// Body of `files/list_folder`.
#[derive(Debug, Clone, Serialize)]
pub struct ListFolderArg {
    pub path: String,
    pub shared_link: SharedLink,
}

/// Body of `files/list_folder/continue`.
#[derive(Debug, Clone, Serialize)]
pub struct ListFolderContinueArg {
    pub cursor: String,
}

/// Response from both listing endpoints.
#[derive(Debug, Deserialize)]
pub struct ListFolderResponse {
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub cursor: String,
}

/// Value of the `Dropbox-API-Arg` header for `sharing/get_shared_link_file`.
#[derive(Debug, Clone, Serialize)]
pub struct SharedLinkFileArg {
    pub url: String,
    pub path: String,
}

/// Serialize a value to JSON that is safe to put in an HTTP header.
///
/// Characters outside ASCII are written as `\uXXXX` escapes, using surrogate
/// pairs above the BMP.
pub fn header_safe_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut buf = [0u16; 2];
            for unit in c.encode_utf16(&mut buf) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    Ok(out)
}
