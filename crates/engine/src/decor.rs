//! The decoration layer: photo search and icon lookup.
//!
//! Everything here is best-effort. A failed search, fetch, or lookup is
//! reported as [`Error::Decoration`] and the renderer continues without
//! the decoration; nothing in this module may abort a slide.

use deckgen_core::{Error, Result};
use rand::rngs::StdRng;
use rand::Rng;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

const PEXELS_SEARCH_URL: &str = "https://api.pexels.com/v1/search";
const REQUEST_TIMEOUT_SECS: u64 = 12;
/// Photos per search request.
const PER_PAGE: usize = 3;

/// Some image CDNs reject requests from non-browser user agents.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:10.0) Gecko/20100101 Firefox/10.0";

/// Requested photo size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSize {
    Small,
    Medium,
    Large,
}

impl PhotoSize {
    /// The query-parameter value for this size.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// A photo search response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoSet {
    #[serde(default)]
    pub photos: Vec<Photo>,
}

/// One photo candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Photo {
    /// The photo's page, used for attribution.
    #[serde(default)]
    pub url: Option<String>,

    /// Downloadable variants by size.
    #[serde(default)]
    pub src: Option<PhotoSources>,
}

/// Downloadable URL variants of a photo.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoSources {
    #[serde(default)]
    pub large: Option<String>,

    #[serde(default)]
    pub original: Option<String>,
}

/// A photo chosen from a search response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedPhoto {
    /// URL of the image bytes.
    pub photo_url: String,

    /// URL of the photo's page, for the attribution footer.
    pub page_url: Option<String>,
}

/// Choose one photo from a response: a random candidate among the first
/// `max_candidates`, preferring its `large` variant over `original`.
/// Returns `None` when the response is empty or the chosen candidate has
/// no downloadable variant.
pub fn pick_photo(set: &PhotoSet, max_candidates: usize, rng: &mut StdRng) -> Option<PickedPhoto> {
    let count = set.photos.len().min(max_candidates);
    if count == 0 {
        return None;
    }

    let photo = &set.photos[rng.random_range(0..count)];
    let sources = photo.src.as_ref()?;
    let photo_url = sources.large.clone().or_else(|| sources.original.clone())?;

    Some(PickedPhoto {
        photo_url,
        page_url: photo.url.clone(),
    })
}

/// A photo backend: search plus byte fetch.
pub trait PhotoSearch {
    /// Search for photos matching the keywords.
    fn search(&self, query: &str, size: PhotoSize) -> Result<PhotoSet>;

    /// Download image bytes.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Pexels-backed photo search over blocking HTTP.
pub struct PexelsClient {
    http: reqwest::blocking::Client,
    api_key: String,
}

impl PexelsClient {
    /// Build a client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(decoration)?;

        Ok(Self {
            http,
            api_key: api_key.into(),
        })
    }

    /// Build a client from the `PEXELS_API_KEY` environment variable.
    /// Returns `None` when the key is absent or empty.
    pub fn from_env() -> Option<Self> {
        std::env::var("PEXELS_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .and_then(|key| Self::new(key).ok())
    }
}

impl PhotoSearch for PexelsClient {
    fn search(&self, query: &str, size: PhotoSize) -> Result<PhotoSet> {
        let per_page = PER_PAGE.to_string();
        let response = self
            .http
            .get(PEXELS_SEARCH_URL)
            .header("Authorization", &self.api_key)
            .query(&[
                ("query", query),
                ("size", size.as_str()),
                ("page", "1"),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .map_err(decoration)?
            .error_for_status()
            .map_err(decoration)?;

        response.json().map_err(decoration)
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .map_err(decoration)?
            .error_for_status()
            .map_err(decoration)?;

        Ok(response.bytes().map_err(decoration)?.to_vec())
    }
}

/// A backend that finds nothing. Used when no API key is configured, so
/// generation degrades to undecorated slides instead of failing.
pub struct NoPhotos;

impl PhotoSearch for NoPhotos {
    fn search(&self, _query: &str, _size: PhotoSize) -> Result<PhotoSet> {
        Ok(PhotoSet::default())
    }

    fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
        Err(Error::Decoration("photo search is disabled".into()))
    }
}

fn decoration(err: impl std::fmt::Display) -> Error {
    Error::Decoration(err.to_string())
}

/// A directory of PNG icon assets addressed by stem name.
#[derive(Debug, Clone)]
pub struct IconStore {
    dir: PathBuf,
}

impl IconStore {
    /// A store rooted at the given directory. The directory may be missing;
    /// lookups then simply find nothing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Whether an icon asset with this exact name exists.
    pub fn exists(&self, name: &str) -> bool {
        !name.is_empty() && self.path(name).is_file()
    }

    /// The asset path for an icon name.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.png"))
    }

    /// All icon names in the store, sorted.
    pub fn names(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "png") {
                    path.file_stem()
                        .and_then(|stem| stem.to_str())
                        .map(str::to_string)
                } else {
                    None
                }
            })
            .collect();
        names.sort();
        names
    }

    /// Read an icon's bytes.
    pub fn load(&self, name: &str) -> Result<Vec<u8>> {
        std::fs::read(self.path(name)).map_err(|e| {
            Error::Decoration(format!("failed to read icon '{}': {e}", name))
        })
    }
}

/// Finds the nearest available icon for each keyword.
pub trait IconMatcher {
    /// One icon name per keyword, order-preserving.
    fn find_fallback(&self, keywords: &[String]) -> Vec<String>;
}

/// Icon matching by lexical similarity: exact match, then containment,
/// then word overlap against normalized names.
#[derive(Debug, Clone)]
pub struct LexicalIconMatcher {
    names: Vec<String>,
}

impl LexicalIconMatcher {
    /// A matcher over the given candidate names.
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// A matcher over everything in an icon store.
    pub fn for_store(store: &IconStore) -> Self {
        Self::new(store.names())
    }

    fn best_match(&self, keyword: &str) -> Option<&str> {
        let normalized_keyword = normalize_for_comparison(keyword);

        self.names
            .iter()
            .map(|name| {
                let score = similarity(&normalize_for_comparison(name), &normalized_keyword);
                (name, score)
            })
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(name, _)| name.as_str())
    }
}

impl IconMatcher for LexicalIconMatcher {
    fn find_fallback(&self, keywords: &[String]) -> Vec<String> {
        keywords
            .iter()
            .map(|keyword| {
                self.best_match(keyword)
                    .map(str::to_string)
                    .unwrap_or_else(|| keyword.clone())
            })
            .collect()
    }
}

/// Normalize a name or keyword for comparison: lowercase, separators to
/// spaces, punctuation dropped, whitespace collapsed.
fn normalize_for_comparison(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c == '-' || c == '_' || c.is_whitespace() {
                ' '
            } else {
                c
            }
        })
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Similarity between two normalized strings, 0.0 to 1.0: exact match,
/// containment scaled by length ratio, then Jaccard word overlap.
fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if a == b {
        return 1.0;
    }

    if a.contains(b) || b.contains(a) {
        let shorter = a.len().min(b.len()) as f64;
        let longer = a.len().max(b.len()) as f64;
        return shorter / longer;
    }

    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();

    let intersection = words_a.intersection(&words_b).count() as f64;
    let union = words_a.union(&words_b).count() as f64;

    intersection / union
}

/// Search, pick, and fetch in one step. `Ok(None)` means the search came
/// back empty; errors mean a request failed.
pub(crate) fn fetch_photo(
    photos: &dyn PhotoSearch,
    query: &str,
    size: PhotoSize,
    max_candidates: usize,
    rng: &mut StdRng,
) -> Result<Option<(Vec<u8>, Option<String>)>> {
    let set = photos.search(query, size)?;
    let Some(picked) = pick_photo(&set, max_candidates, rng) else {
        return Ok(None);
    };

    let bytes = photos.fetch(&picked.photo_url)?;
    Ok(Some((bytes, picked.page_url)))
}
