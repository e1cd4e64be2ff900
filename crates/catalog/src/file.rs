use crate::{CatalogError, CatalogSource, id_or_raw_input};
use domain::{CatalogEntry, CategoryMap};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::btree_map::Entry;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

/// A JSON catalog on disk:
///
/// ```json
/// {
///   "Lottery": [
///     "duAeRtYeC0E",
///     "https://youtu.be/pZfZRybbCTA",
///     { "Title": "Powerball 12-14-24", "Source": "WITN-TV", "URL": "https://www.youtube.com/watch?v=Dvx_L3_2Bkc" },
///     { "video_id": "SUUaR2cpAOI", "title": "No big winner" }
///   ]
/// }
/// ```
///
/// A category that appears more than once has its lists appended in file
/// order.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse catalog JSON that has already been read
    pub fn parse(json: &str) -> Result<CategoryMap, CatalogError> {
        let RawCatalog(raw) = serde_json::from_str(json)?;
        let mut map = CategoryMap::new();
        for (category, entries) in raw {
            let resolved = entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| entry.resolve(&category, index))
                .collect::<Result<Vec<_>, _>>()?;
            match map.entry(category) {
                Entry::Occupied(mut existing) => {
                    warn!(
                        category = %existing.key(),
                        added = resolved.len(),
                        "Category listed more than once in catalog, appending its entries"
                    );
                    existing.get_mut().extend(resolved);
                }
                Entry::Vacant(slot) => {
                    slot.insert(resolved);
                }
            }
        }
        Ok(map)
    }
}

impl CatalogSource for FileCatalog {
    fn load(&self) -> Result<CategoryMap, CatalogError> {
        debug!(path = %self.path.display(), "Loading catalog file");
        let json = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        Self::parse(&json)
    }
}

/// Categories in file order, repeated keys kept
struct RawCatalog(Vec<(String, Vec<RawEntry>)>);

impl<'de> Deserialize<'de> for RawCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = RawCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category name to video entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RawCatalog, A::Error> {
                let mut categories = Vec::new();
                while let Some(category) = access.next_entry::<String, Vec<RawEntry>>()? {
                    categories.push(category);
                }
                Ok(RawCatalog(categories))
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Bare(String),
    Detailed(DetailedEntry),
}

/// Capitalized aliases accept the `Title`/`Source`/`URL` records of the
/// older category dictionaries.
#[derive(Debug, Deserialize)]
struct DetailedEntry {
    #[serde(default, alias = "videoId")]
    video_id: Option<String>,
    #[serde(default, alias = "URL")]
    url: Option<String>,
    #[serde(default, alias = "Title")]
    title: Option<String>,
    #[serde(default, alias = "Source")]
    source: Option<String>,
}

impl RawEntry {
    fn resolve(self, category: &str, index: usize) -> Result<CatalogEntry, CatalogError> {
        let missing = || CatalogError::MissingVideoId {
            category: category.to_string(),
            index,
        };
        match self {
            RawEntry::Bare(value) => {
                if value.trim().is_empty() {
                    return Err(missing());
                }
                let entry = CatalogEntry::new(id_or_raw_input(category, &value));
                Ok(if value.contains('/') {
                    entry.with_url(value)
                } else {
                    entry
                })
            }
            RawEntry::Detailed(detailed) => {
                let video_id = match (detailed.video_id, detailed.url.as_deref()) {
                    (Some(id), _) if !id.trim().is_empty() => id.trim().to_string(),
                    (_, Some(url)) if !url.trim().is_empty() => id_or_raw_input(category, url),
                    _ => return Err(missing()),
                };
                Ok(CatalogEntry {
                    video_id,
                    label: detailed.title,
                    source: detailed.source,
                    url: detailed.url,
                })
            }
        }
    }
}
