//! Fetching and unpacking the daily NRD feed.
//!
//! The feed publishes one zip archive per day. Its URL embeds the
//! base64-encoded archive file name (`YYYY-MM-DD.zip`) between a fixed base
//! URL and a fixed suffix. Inside the archive sits a single interesting
//! member, `domain-names.txt`, one registered domain per line.
//!
//! Downloading goes through the [`FeedTransport`] trait so unit tests can
//! supply canned bytes; everything after the transfer (writing the archive,
//! unpacking it, locating the list) runs against the real filesystem in tests
//! too, using locally written fixture archives.

use std::fs::File;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{Local, NaiveDate};

use crate::config::{FeedConfig, NetworkConfig};
use crate::errors::{IoResultExt, NrdscanError, Result};
use crate::workdir::Workdir;

/// Yesterday's date in local time, `YYYY-MM-DD`: the most recent day the feed
/// has published.
pub fn default_stamp() -> String {
    (Local::now() - chrono::Duration::days(1))
        .format("%Y-%m-%d")
        .to_string()
}

/// Validate a user-supplied feed day and normalize it to `YYYY-MM-DD`.
pub fn validate_stamp(value: &str) -> Result<String> {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Ok(date.format("%Y-%m-%d").to_string()),
        Err(_) => Err(NrdscanError::invalid_date(value)),
    }
}

/// Transfer layer for the archive download, separated so tests can hand back
/// canned bytes instead of reaching a live server.
#[allow(async_fn_in_trait)]
pub trait FeedTransport {
    /// Fetch `url` and return the full response body.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Production transport backed by reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(network.http_timeout)
            .connect_timeout(network.connect_timeout)
            .user_agent(network.user_agent.clone())
            .build()
            .map_err(|e| NrdscanError::download("<client setup>", e))?;
        Ok(Self { client })
    }
}

impl FeedTransport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NrdscanError::feed_status(url, status.as_u16()));
        }
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Locates, downloads and unpacks one day of the feed.
pub struct FeedClient<T = HttpTransport> {
    feed: FeedConfig,
    transport: T,
}

impl FeedClient<HttpTransport> {
    pub fn new(feed: FeedConfig, network: &NetworkConfig) -> Result<Self> {
        Ok(Self {
            feed,
            transport: HttpTransport::new(network)?,
        })
    }
}

impl<T: FeedTransport> FeedClient<T> {
    /// Build a client over a custom transport.
    pub fn with_transport(feed: FeedConfig, transport: T) -> Self {
        Self { feed, transport }
    }

    /// The archive URL for one feed day.
    pub fn archive_url(&self, stamp: &str) -> String {
        let encoded = STANDARD.encode(format!("{stamp}.zip"));
        format!("{}{}{}", self.feed.base_url, encoded, self.feed.url_suffix)
    }

    /// Download the day's archive into the working directory and return its
    /// path.
    pub async fn download(&self, workdir: &Workdir) -> Result<PathBuf> {
        let url = self.archive_url(workdir.stamp());
        let body = self.transport.fetch(&url).await?;

        let archive = workdir.archive_path();
        tokio::fs::write(&archive, &body)
            .await
            .with_path(archive.to_string_lossy(), "write")?;
        Ok(archive)
    }

    /// Unpack the archive into the working directory and return the path of
    /// the domain list it must contain.
    pub fn extract(&self, archive: &Path, workdir: &Workdir) -> Result<PathBuf> {
        let file = File::open(archive).with_path(archive.to_string_lossy(), "open")?;
        let mut zip = zip::ZipArchive::new(file).map_err(|e| {
            NrdscanError::archive_extraction(archive.to_string_lossy(), e.to_string())
        })?;
        zip.extract(workdir.path()).map_err(|e| {
            NrdscanError::archive_extraction(archive.to_string_lossy(), e.to_string())
        })?;

        let list = workdir.path().join(&self.feed.list_file_name);
        if !list.is_file() {
            return Err(NrdscanError::feed_list_missing(
                archive.to_string_lossy(),
                self.feed.list_file_name.as_str(),
            ));
        }
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    struct StubTransport {
        body: Vec<u8>,
        requested: RefCell<Option<String>>,
    }

    impl StubTransport {
        fn new(body: &[u8]) -> Self {
            Self {
                body: body.to_vec(),
                requested: RefCell::new(None),
            }
        }
    }

    impl FeedTransport for StubTransport {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            *self.requested.borrow_mut() = Some(url.to_string());
            Ok(self.body.clone())
        }
    }

    fn write_fixture_zip(path: &Path, member: &str, content: &[u8]) {
        let file = File::create(path).unwrap();
        let mut writer = ZipWriter::new(file);
        writer
            .start_file(member, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn archive_url_encodes_the_day() {
        let client = FeedClient::with_transport(FeedConfig::default(), StubTransport::new(b""));
        assert_eq!(
            client.archive_url("2024-01-02"),
            "https://www.whoisds.com/whois-database/newly-registered-domains/MjAyNC0wMS0wMi56aXA=/nrd"
        );
    }

    #[tokio::test]
    async fn download_writes_archive_into_workdir() {
        let root = tempdir().unwrap();
        let workdir = Workdir::create(root.path(), "2024-01-02").unwrap();
        let client =
            FeedClient::with_transport(FeedConfig::default(), StubTransport::new(b"archive bytes"));

        let archive = client.download(&workdir).await.unwrap();

        assert_eq!(archive, workdir.archive_path());
        assert_eq!(fs::read(&archive).unwrap(), b"archive bytes");
        assert_eq!(
            client.transport.requested.borrow().as_deref(),
            Some(client.archive_url("2024-01-02").as_str())
        );
    }

    #[test]
    fn extract_finds_the_domain_list() {
        let root = tempdir().unwrap();
        let workdir = Workdir::create(root.path(), "2024-01-02").unwrap();
        let archive = workdir.archive_path();
        write_fixture_zip(&archive, "domain-names.txt", b"example.com\nexample.net\n");

        let client = FeedClient::with_transport(FeedConfig::default(), StubTransport::new(b""));
        let list = client.extract(&archive, &workdir).unwrap();

        assert!(list.ends_with("domain-names.txt"));
        let content = fs::read_to_string(&list).unwrap();
        assert!(content.contains("example.com"));
    }

    #[test]
    fn extract_rejects_archive_without_the_list() {
        let root = tempdir().unwrap();
        let workdir = Workdir::create(root.path(), "2024-01-02").unwrap();
        let archive = workdir.archive_path();
        write_fixture_zip(&archive, "readme.txt", b"not the list");

        let client = FeedClient::with_transport(FeedConfig::default(), StubTransport::new(b""));
        let err = client.extract(&archive, &workdir).unwrap_err();
        assert!(matches!(err, NrdscanError::FeedListMissing { .. }));
    }

    #[test]
    fn extract_rejects_corrupt_archive() {
        let root = tempdir().unwrap();
        let workdir = Workdir::create(root.path(), "2024-01-02").unwrap();
        let archive = workdir.archive_path();
        fs::write(&archive, b"this is not a zip file").unwrap();

        let client = FeedClient::with_transport(FeedConfig::default(), StubTransport::new(b""));
        let err = client.extract(&archive, &workdir).unwrap_err();
        assert!(matches!(err, NrdscanError::ArchiveExtraction { .. }));
    }

    #[test]
    fn default_stamp_is_a_calendar_date() {
        let stamp = default_stamp();
        assert_eq!(stamp.len(), 10);
        assert!(NaiveDate::parse_from_str(&stamp, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn validate_stamp_normalizes_and_rejects() {
        assert_eq!(validate_stamp("2024-01-02").unwrap(), "2024-01-02");
        assert_eq!(validate_stamp("2024-1-2").unwrap(), "2024-01-02");

        assert!(matches!(
            validate_stamp("yesterday").unwrap_err(),
            NrdscanError::InvalidDate { .. }
        ));
        assert!(validate_stamp("2024-13-40").is_err());
    }
}
