//! In-memory catalog provider.
//!
//! The catalog is either read from a JSONL file (one [`ContentItem`] per
//! line) or generated synthetically. Lines that fail to parse are skipped
//! with a warning; the first occurrence of an id wins.

use super::ContentProvider;
use crate::model::{CatalogError, ContentId, ContentItem, Filter, ProviderError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

const SYNTHETIC_MEDIA_TYPES: [&str; 2] = ["movie", "tv"];

const SYNTHETIC_GENRES: [&str; 8] = [
    "Action",
    "Comedy",
    "Drama",
    "Documentary",
    "Horror",
    "Romance",
    "Sci-Fi",
    "Thriller",
];

const SYNTHETIC_WORDS: [&str; 16] = [
    "Silent", "Harbor", "Neon", "Winter", "Echo", "Paper", "Orbit", "Crimson", "Hollow", "Atlas",
    "Velvet", "Signal", "Tide", "Ember", "Glass", "North",
];

/// Ordered, de-duplicated list of catalog items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<ContentItem>,
}

impl Catalog {
    /// Build a catalog from items, keeping the first occurrence of each id.
    pub fn from_items(items: impl IntoIterator<Item = ContentItem>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for item in items {
            if seen.insert(item.id.clone()) {
                kept.push(item);
            } else {
                debug!(id = %item.id, "Duplicate catalog id ignored");
            }
        }
        Self { items: kept }
    }

    /// Load a JSONL catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the file does not exist and
    /// [`CatalogError::Io`] if it cannot be read.
    pub fn load_jsonl(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::parse_jsonl(&content);
        info!(path = %path.display(), items = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parse JSONL text. Blank lines are ignored, malformed lines skipped.
    pub fn parse_jsonl(content: &str) -> Self {
        let mut malformed = 0usize;
        let items = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match serde_json::from_str::<ContentItem>(line) {
                Ok(item) => Some(item),
                Err(err) => {
                    malformed += 1;
                    warn!(line = index + 1, error = %err, "Skipping malformed catalog line");
                    None
                }
            })
            .collect::<Vec<_>>();
        if malformed > 0 {
            warn!(malformed, "Catalog contained malformed lines");
        }
        Self::from_items(items)
    }

    /// Generate `count` plausible items, reproducible for a given `seed`.
    pub fn synthetic(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let items = (0..count).filter_map(|index| {
            let id = ContentId::new(format!("syn-{index:05}")).ok()?;
            let first = SYNTHETIC_WORDS[rng.gen_range(0..SYNTHETIC_WORDS.len())];
            let second = SYNTHETIC_WORDS[rng.gen_range(0..SYNTHETIC_WORDS.len())];
            let media_type = SYNTHETIC_MEDIA_TYPES[rng.gen_range(0..SYNTHETIC_MEDIA_TYPES.len())];
            let mut item = ContentItem::new(id, format!("{first} {second} {}", index + 1))
                .with_media_type(media_type)
                .with_year(rng.gen_range(1970..=2025));
            let genre_count = rng.gen_range(1..=2);
            for genre in SYNTHETIC_GENRES.choose_multiple(&mut rng, genre_count) {
                item = item.with_genre(*genre);
            }
            Some(item)
        });
        Self::from_items(items.collect::<Vec<_>>())
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the catalog holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in catalog order.
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Shuffle the item order reproducibly.
    pub fn shuffled(mut self, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        self.items.shuffle(&mut rng);
        self
    }
}

/// [`ContentProvider`] serving a [`Catalog`] in order.
#[derive(Debug, Clone)]
pub struct CatalogProvider {
    catalog: Catalog,
    latency: Duration,
    calls: usize,
}

impl CatalogProvider {
    /// Serve `catalog` without artificial delay.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            latency: Duration::ZERO,
            calls: 0,
        }
    }

    /// Sleep for `latency` before answering each call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of `fetch_batch` calls served.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Backing catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl ContentProvider for CatalogProvider {
    fn fetch_batch(
        &mut self,
        exclude_ids: &[ContentId],
        batch_size: usize,
        filter: &Filter,
    ) -> Result<Vec<ContentItem>, ProviderError> {
        self.calls += 1;
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        let excluded: HashSet<&ContentId> = exclude_ids.iter().collect();
        let batch: Vec<ContentItem> = self
            .catalog
            .items
            .iter()
            .filter(|item| !excluded.contains(&item.id) && filter.matches(item))
            .take(batch_size)
            .cloned()
            .collect();

        debug!(
            requested = batch_size,
            returned = batch.len(),
            excluded = exclude_ids.len(),
            filter = %filter.describe(),
            "Catalog batch served"
        );
        Ok(batch)
    }
}
