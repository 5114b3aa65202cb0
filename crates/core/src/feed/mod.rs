//! File-fetch collaborator interface.
//!
//! The batch files arrive in a remote inbox; how they are transported
//! (FTP in production) is not this crate's concern. The core only needs
//! a directory listing and a binary download, expressed by [`FileFeed`].
//! [`fetch_matching`] layers the daily selection rule on top: keep the
//! files for one date that match any of the configured name patterns.

use async_trait::async_trait;

use crate::errors::Result;

/// A remote file retrieved to memory.
#[derive(Clone, Debug)]
pub struct FetchedFile {
    /// Remote file name.
    pub name: String,
    /// Raw file contents.
    pub contents: Vec<u8>,
}

/// Access to the remote inbox holding the daily batch files.
///
/// Implementations report transport failures as
/// [`Error::Feed`](crate::errors::Error::Feed).
#[async_trait]
pub trait FileFeed: Send + Sync {
    /// List the file names currently in the inbox.
    async fn list(&self) -> Result<Vec<String>>;

    /// Download one file's contents.
    async fn fetch(&self, name: &str) -> Result<Vec<u8>>;
}

/// Fetch the files for one date.
///
/// Keeps listed names that start with `date_prefix` and contain any of
/// the `include` substrings, then downloads each. Listing order is
/// preserved.
pub async fn fetch_matching(
    feed: &dyn FileFeed,
    date_prefix: &str,
    include: &[&str],
) -> Result<Vec<FetchedFile>> {
    let names = feed.list().await?;

    let mut files = Vec::new();
    for name in names {
        let wanted = name.starts_with(date_prefix)
            && include.iter().any(|pattern| name.contains(pattern));
        if !wanted {
            continue;
        }
        let contents = feed.fetch(&name).await?;
        files.push(FetchedFile { name, contents });
    }
    Ok(files)
}
