use std::{collections::{HashMap, HashSet}, fmt, future::Future, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use bytes::Bytes;

use crate::config::MapConfig;

/// The two datasets a map is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feed {
    Seismic,
    Plates,
}

impl Feed {
    pub fn to_str(&self) -> &'static str {
        match self {
            Feed::Seismic => "seismic",
            Feed::Plates => "plates",
        }
    }

    /// File name used when a feed is saved to disk.
    pub fn file_name(&self) -> &'static str {
        match self {
            Feed::Seismic => "earthquakes.geojson",
            Feed::Plates => "plates.geojson",
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.to_str()) }
}

/// Read-only access to the raw GeoJSON bytes of each feed.
pub trait FeedSource: Send + Sync {
    fn fetch(&self, feed: Feed) -> impl Future<Output = Result<Bytes>> + Send;
}

/// Where a feed lives: a remote URL or a local file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    Url(String),
    Path(PathBuf),
}

impl Location {
    /// Anything starting with `http://` or `https://` is a URL, everything else a path.
    pub fn parse(s: &str) -> Self {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Location::Url(s.to_string())
        } else {
            Location::Path(PathBuf::from(s))
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Url(url) => f.write_str(url),
            Location::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Feeds resolved from configured locations, fetched over HTTP or read from disk.
pub struct LocatedFeeds {
    seismic: Location,
    plates: Location,
    #[cfg(feature = "download")]
    client: reqwest::Client,
}

impl LocatedFeeds {
    pub fn new(seismic: Location, plates: Location) -> Result<Self> {
        Ok(Self {
            seismic,
            plates,
            #[cfg(feature = "download")]
            client: reqwest::Client::builder()
                .user_agent(concat!("quakemap/", env!("CARGO_PKG_VERSION")))
                .build()
                .context("[feed] Failed to build HTTP client")?,
        })
    }

    pub fn from_config(config: &MapConfig) -> Result<Self> {
        Self::new(Location::parse(&config.seismic_feed), Location::parse(&config.plates_feed))
    }

    pub fn location(&self, feed: Feed) -> &Location {
        match feed {
            Feed::Seismic => &self.seismic,
            Feed::Plates => &self.plates,
        }
    }

    #[cfg(feature = "download")]
    async fn get(&self, url: &str) -> Result<Bytes> {
        let resp = self.client.get(url).send().await
            .with_context(|| format!("[feed] GET {url}"))?
            .error_for_status()
            .with_context(|| format!("[feed] GET {url} returned error status"))?;
        resp.bytes().await.with_context(|| format!("[feed] GET {url} body"))
    }

    #[cfg(not(feature = "download"))]
    async fn get(&self, url: &str) -> Result<Bytes> {
        Err(anyhow!("[feed] cannot fetch {url}: built without the `download` feature"))
    }
}

impl FeedSource for LocatedFeeds {
    async fn fetch(&self, feed: Feed) -> Result<Bytes> {
        let location = self.location(feed);
        tracing::debug!("[feed] {feed} <- {location}");
        match location {
            Location::Url(url) => self.get(url).await,
            Location::Path(path) => tokio::fs::read(path).await
                .map(Bytes::from)
                .with_context(|| format!("[feed] Failed to read {}", path.display())),
        }
    }
}

/// In-memory feeds. A feed that is neither inserted nor stalled fails to fetch.
#[derive(Default, Clone)]
pub struct MemFeeds {
    files: HashMap<Feed, Bytes>,
    stalled: HashSet<Feed>,
}

impl MemFeeds {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, feed: Feed, bytes: impl Into<Bytes>) -> Self {
        self.files.insert(feed, bytes.into());
        self
    }

    /// Make fetches of `feed` wait forever, like a request that never gets an answer.
    pub fn stall(mut self, feed: Feed) -> Self {
        self.stalled.insert(feed);
        self
    }
}

impl FeedSource for MemFeeds {
    async fn fetch(&self, feed: Feed) -> Result<Bytes> {
        if self.stalled.contains(&feed) {
            std::future::pending::<()>().await;
        }
        self.files.get(&feed).cloned()
            .ok_or_else(|| anyhow!("[feed] missing in-memory feed: {feed}"))
    }
}
