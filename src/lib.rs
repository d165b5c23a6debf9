//! dropbox_download - Download every file of a shared Dropbox folder.
//!
//! This library provides functionality to:
//! - List all entries of a shared folder, following pagination cursors
//! - Download each file through the shared-link file endpoint
//! - Skip files that already exist locally
//!
//! # Example
//!
//! ```no_run
//! use dropbox_download::{download_entries, AccessToken, DownloadOptions, DropboxClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let link = "https://www.dropbox.com/sh/abc/DEF?dl=0";
//!     let client = DropboxClient::new(AccessToken::new("sl.token")?);
//!
//!     let entries = client.list_all_entries("", link).await?;
//!     let options = DownloadOptions::new("downloads");
//!     let summary = download_entries(&client, link, &entries, &options, |event| {
//!         println!("{:?}", event);
//!     })
//!     .await?;
//!
//!     println!("{} downloaded", summary.downloaded);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod downloader;
pub mod error;
pub mod models;
pub mod shared_link;

// Re-exports for convenience
pub use auth::AccessToken;
pub use client::DropboxClient;
pub use downloader::{download_entries, DownloadEvent, DownloadOptions, DownloadSummary};
pub use error::{DropboxError, Result};
pub use models::Entry;
pub use shared_link::normalize_shared_link;
