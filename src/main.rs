//! dropbox_download CLI - Download every file of a shared Dropbox folder.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::{fmt, EnvFilter};

use dropbox_download::client::{API_BASE, CONTENT_BASE};
use dropbox_download::{
    download_entries, normalize_shared_link, AccessToken, DownloadEvent, DownloadOptions,
    DropboxClient,
};

/// Download files from a shared Dropbox folder.
///
/// An access token can be generated in the Dropbox API explorer
/// (https://dropbox.github.io/dropbox-api-v2-explorer/#files_list_folder).
#[derive(Parser)]
#[command(name = "dropbox_download")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Access token for the Dropbox API.
    #[arg(long, short = 't', env = "DROPBOX_TOKEN", hide_env_values = true)]
    token: String,

    /// Shared Dropbox folder link (also accepted as -url).
    #[arg(long, short = 'u')]
    url: String,

    /// Local folder to download into.
    #[arg(
        long = "download_folder",
        short = 'd',
        visible_alias = "destination_folder",
        default_value = "downloads"
    )]
    download_folder: PathBuf,

    /// Folder inside the shared link to download, e.g. "/Name". Defaults to the link root.
    #[arg(long, short = 'f', default_value = "")]
    folder: String,

    /// Number of files to download. All files are downloaded when omitted.
    #[arg(long, short = 'c')]
    count: Option<usize>,

    /// Print the full API responses.
    #[arg(long, short = 'v')]
    verbose: bool,

    /// List the folder's entries instead of downloading them.
    #[arg(long)]
    list: bool,

    /// Show all options with a brief description.
    #[arg(long = "h", action = ArgAction::Help)]
    short_help: Option<bool>,

    #[arg(long, env = "DROPBOX_API_URL", default_value = API_BASE, hide = true)]
    api_url: String,

    #[arg(long, env = "DROPBOX_CONTENT_URL", default_value = CONTENT_BASE, hide = true)]
    content_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_legacy_args(std::env::args_os()));

    init_logging(cli.verbose);

    let token = AccessToken::new(&cli.token).context("Invalid access token")?;
    let shared_link = normalize_shared_link(&cli.url)
        .with_context(|| format!("Invalid shared link: {}", cli.url))?;

    // Create client
    let client = DropboxClient::new(token)
        .with_base_urls(&cli.api_url, &cli.content_url)
        .with_verbose(cli.verbose);

    if !cli.list {
        std::fs::create_dir_all(&cli.download_folder).with_context(|| {
            format!("Failed to create directory: {:?}", cli.download_folder)
        })?;
    }

    println!("Fetching file list...");

    let entries = client
        .list_all_entries(&cli.folder, &shared_link)
        .await
        .with_context(|| format!("Failed to list shared folder: {}", shared_link))?;

    if entries.is_empty() {
        println!("No files found in the shared folder.");
        return Ok(());
    }

    if cli.list {
        println!("{:<8} {:>10} {:<22} {}", "TYPE", "SIZE", "MODIFIED", "NAME");
        println!("{}", "-".repeat(60));
        for entry in &entries {
            println!("{}", entry);
        }
        return Ok(());
    }

    let options = DownloadOptions {
        destination: cli.download_folder,
        remote_folder: cli.folder,
        count: cli.count,
    };

    println!("Total files to download: {}", options.total(entries.len()));

    let summary = download_entries(&client, &shared_link, &entries, &options, |event| {
        match event {
            DownloadEvent::Started { index, total, name } => {
                println!("Downloading file {} of {}: {}...", index, total, name);
            }
            DownloadEvent::Finished { path, .. } => {
                println!("Download complete. File saved as: {}", path.display());
            }
            DownloadEvent::Skipped { index, total, name } => {
                println!("File {} of {}: {} already exists, skipping.", index, total, name);
            }
            DownloadEvent::FolderSkipped { index, total, name } => {
                println!("File {} of {}: {} is a folder, skipping.", index, total, name);
            }
        }
    })
    .await
    .context("Download failed")?;

    println!(
        "Done. {} downloaded, {} skipped.",
        summary.downloaded,
        summary.skipped + summary.folders
    );

    Ok(())
}

/// Initialize logging to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "dropbox_download=debug"
    } else {
        "dropbox_download=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Rewrite the single-dash long flags `-url` and `-df` into their `--` forms.
fn normalize_legacy_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(s) = arg.to_str() else {
                return arg;
            };

            for (legacy, modern) in [("-url", "--url"), ("-df", "--download_folder")] {
                if s == legacy {
                    return OsString::from(modern);
                }
                if let Some(value) = s.strip_prefix(legacy).and_then(|v| v.strip_prefix('=')) {
                    return OsString::from(format!("{}={}", modern, value));
                }
            }

            arg
        })
        .collect()
}
