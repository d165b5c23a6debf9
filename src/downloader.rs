//! Downloading the entries of a listed shared folder to local disk.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::client::DropboxClient;
use crate::error::{DropboxError, Result};
use crate::models::Entry;

/// Options for a download run.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Local directory files are written into.
    pub destination: PathBuf,
    /// Folder inside the shared link the entries were listed from.
    pub remote_folder: String,
    /// Only consider the first N entries.
    pub count: Option<usize>,
}

impl DownloadOptions {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            remote_folder: String::new(),
            count: None,
        }
    }

    /// Number of entries a run over `available` listed entries will consider.
    pub fn total(&self, available: usize) -> usize {
        match self.count {
            Some(count) => count.min(available),
            None => available,
        }
    }
}

/// Progress reported while downloading. `index` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent<'a> {
    Started {
        index: usize,
        total: usize,
        name: &'a str,
    },
    Finished {
        index: usize,
        total: usize,
        path: &'a Path,
        bytes: u64,
    },
    Skipped {
        index: usize,
        total: usize,
        name: &'a str,
    },
    FolderSkipped {
        index: usize,
        total: usize,
        name: &'a str,
    },
}

/// Counts from a finished run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub folders: usize,
    pub bytes: u64,
}

/// Download every listed entry that is not already on disk.
///
/// Entries are processed in listing order. Files whose target path already
/// exists are skipped without contacting the server. The first failed
/// download ends the run.
pub async fn download_entries<F>(
    client: &DropboxClient,
    shared_link: &str,
    entries: &[Entry],
    options: &DownloadOptions,
    mut on_event: F,
) -> Result<DownloadSummary>
where
    F: FnMut(DownloadEvent<'_>),
{
    let total = options.total(entries.len());
    let mut summary = DownloadSummary::default();

    for (i, entry) in entries.iter().take(total).enumerate() {
        let index = i + 1;
        let name = entry.name.as_str();

        if entry.is_folder() {
            on_event(DownloadEvent::FolderSkipped { index, total, name });
            summary.folders += 1;
            continue;
        }

        let local_path = local_path(&options.destination, name)?;
        if local_path.exists() {
            on_event(DownloadEvent::Skipped { index, total, name });
            summary.skipped += 1;
            continue;
        }

        on_event(DownloadEvent::Started { index, total, name });

        let remote = remote_path(&options.remote_folder, name);
        let bytes = client
            .download_shared_file(shared_link, &remote, &local_path)
            .await?;

        info!(path = %local_path.display(), bytes, "saved file");
        on_event(DownloadEvent::Finished {
            index,
            total,
            path: &local_path,
            bytes,
        });
        summary.downloaded += 1;
        summary.bytes += bytes;
    }

    Ok(summary)
}

/// Path of an entry inside the shared link, e.g. `("/Photos", "a.jpg")` -> `/Photos/a.jpg`.
pub fn remote_path(folder: &str, name: &str) -> String {
    format!("{}/{}", folder.trim_end_matches('/'), name)
}

/// Local target for an entry, refusing names that would leave `destination`.
pub fn local_path(destination: &Path, name: &str) -> Result<PathBuf> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');

    if invalid {
        return Err(DropboxError::InvalidEntryName(name.to_string()));
    }

    Ok(destination.join(name))
}
