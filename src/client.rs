//! Dropbox API client for shared folder listing and downloads.

use std::path::Path;

use futures::StreamExt;
use reqwest::{Client, Response, StatusCode};
use tempfile::NamedTempFile;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::auth::AccessToken;
use crate::error::{DropboxError, Result};
use crate::models::{
    header_safe_json, Entry, ListFolderArg, ListFolderContinueArg, ListFolderResponse, SharedLink,
    SharedLinkFileArg,
};

/// Base URL for RPC-style endpoints such as `files/list_folder`.
pub const API_BASE: &str = "https://api.dropboxapi.com";

/// Base URL for content-download endpoints.
pub const CONTENT_BASE: &str = "https://content.dropboxapi.com";

/// Prefix and suffix of the hidden file a download is staged in.
const STAGING_PREFIX: &str = ".dropbox-download-";
const STAGING_SUFFIX: &str = ".part";

/// Client for reading a Dropbox shared folder.
pub struct DropboxClient {
    token: AccessToken,
    http: Client,
    api_base: String,
    content_base: String,
    verbose: bool,
}

impl DropboxClient {
    /// Create a new DropboxClient against the public Dropbox hosts.
    pub fn new(token: AccessToken) -> Self {
        Self {
            token,
            http: Client::new(),
            api_base: API_BASE.to_string(),
            content_base: CONTENT_BASE.to_string(),
            verbose: false,
        }
    }

    /// Point the client at different API and content hosts.
    pub fn with_base_urls(mut self, api_base: impl Into<String>, content_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self.content_base = content_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Print the raw JSON of every listing response.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// List the first page of a folder inside a shared link.
    ///
    /// # Arguments
    /// * `path` - Folder path relative to the shared link root (`""` for the root)
    /// * `shared_link` - The shared folder URL
    pub async fn list_folder(&self, path: &str, shared_link: &str) -> Result<ListFolderResponse> {
        let arg = ListFolderArg {
            path: path.to_string(),
            shared_link: SharedLink {
                url: shared_link.to_string(),
            },
        };

        debug!(path, "listing shared folder");
        let response = self
            .http
            .post(format!("{}/2/files/list_folder", self.api_base))
            .bearer_auth(self.token.as_str())
            .json(&arg)
            .send()
            .await?;

        self.parse_listing(response).await
    }

    /// Fetch the next page of a listing.
    pub async fn list_folder_continue(&self, cursor: &str) -> Result<ListFolderResponse> {
        let arg = ListFolderContinueArg {
            cursor: cursor.to_string(),
        };

        debug!("continuing listing");
        let response = self
            .http
            .post(format!("{}/2/files/list_folder/continue", self.api_base))
            .bearer_auth(self.token.as_str())
            .json(&arg)
            .send()
            .await?;

        self.parse_listing(response).await
    }

    /// List every entry of a shared folder, following the cursor until the
    /// server reports no more pages.
    pub async fn list_all_entries(&self, path: &str, shared_link: &str) -> Result<Vec<Entry>> {
        let first = self.list_folder(path, shared_link).await?;
        let mut all_entries = first.entries;
        let mut has_more = first.has_more;
        let mut cursor = first.cursor;
        let mut pages = 1usize;

        while has_more {
            if cursor.is_empty() {
                return Err(DropboxError::MissingCursor);
            }

            let page = self.list_folder_continue(&cursor).await?;
            all_entries.extend(page.entries);
            has_more = page.has_more;
            cursor = page.cursor;
            pages += 1;
        }

        debug!(pages, entries = all_entries.len(), "listing complete");
        Ok(all_entries)
    }

    /// Download one file of a shared folder to a local path.
    ///
    /// The body is streamed into a uniquely named hidden file next to
    /// `destination`, which is renamed onto `destination` once the transfer
    /// completes. The staging file is removed if the transfer fails. Nothing
    /// is written when the server rejects the request.
    ///
    /// # Arguments
    /// * `shared_link` - The shared folder URL
    /// * `remote_path` - Path of the file relative to the shared link root
    /// * `destination` - The local path to save the file
    pub async fn download_shared_file<P: AsRef<Path>>(
        &self,
        shared_link: &str,
        remote_path: &str,
        destination: P,
    ) -> Result<u64> {
        let destination = destination.as_ref();
        let arg = SharedLinkFileArg {
            url: shared_link.to_string(),
            path: remote_path.to_string(),
        };

        debug!(remote_path, "downloading shared file");
        let response = self
            .http
            .post(format!("{}/2/sharing/get_shared_link_file", self.content_base))
            .bearer_auth(self.token.as_str())
            .header("Dropbox-API-Arg", header_safe_json(&arg)?)
            .send()
            .await?;

        let response = check_status(response).await?;

        let staging = staging_file(destination)?;
        let written = stream_to_file(response, staging.as_file().try_clone()?).await?;
        staging
            .persist(destination)
            .map_err(|e| DropboxError::IoError(e.error))?;

        Ok(written)
    }

    async fn parse_listing(&self, response: Response) -> Result<ListFolderResponse> {
        let response = check_status(response).await?;
        let body = response.text().await?;

        if self.verbose {
            println!("Verbose info: {}", body);
        }

        let listing: ListFolderResponse = serde_json::from_str(&body)?;
        Ok(listing)
    }
}

/// Turn any status other than 200 or 201 into an `ApiError` carrying the body.
pub async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::OK || status == StatusCode::CREATED {
        return Ok(response);
    }

    let error_body = response.text().await.unwrap_or_default();
    Err(DropboxError::ApiError {
        status: status.as_u16(),
        message: error_body,
    })
}

/// Create the staging file in the destination's directory so the final
/// rename stays on one filesystem. It is created exclusively under a random
/// hidden name, so it never replaces a file already on disk, and dropping it
/// unpersisted deletes it.
fn staging_file(destination: &Path) -> Result<NamedTempFile> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(STAGING_SUFFIX)
        .tempfile_in(dir)?;
    Ok(staging)
}

async fn stream_to_file(response: Response, file: std::fs::File) -> Result<u64> {
    let mut file = File::from_std(file);
    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}
