//! The aggregated collection and its query functions.
//!
//! A [`Catalog`] is built once from ordered topic sources and never mutated.
//! Every query is a linear scan in collection order.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;

use super::aggregate::{aggregate, TopicSource};
use super::error::CatalogError;
use crate::domain::{Record, RecordId, RecordKind};

/// What to do when two records share an id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail catalog construction
    #[default]
    Reject,

    /// Keep both, log a warning; `by_id` returns the first in collection order
    FirstWins,
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePolicy::Reject => write!(f, "reject"),
            DuplicatePolicy::FirstWins => write!(f, "first_wins"),
        }
    }
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "reject" | "strict" => Ok(DuplicatePolicy::Reject),
            "first_wins" | "first" => Ok(DuplicatePolicy::FirstWins),
            _ => anyhow::bail!("Unknown duplicate policy: {}", s),
        }
    }
}

/// A duplicate id tolerated under [`DuplicatePolicy::FirstWins`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateId {
    pub id: RecordId,
    pub first_source: String,
    pub second_source: String,
}

/// Immutable, ordered collection of one record kind
#[derive(Debug, Clone)]
pub struct Catalog<R> {
    records: Vec<R>,

    /// Topic source of each record, parallel to `records`
    origins: Vec<Arc<str>>,

    duplicates: Vec<DuplicateId>,

    fingerprint: String,
}

impl<R: Record> Default for Catalog<R> {
    fn default() -> Self {
        Self::assemble(Vec::new(), Vec::new(), Vec::new())
    }
}

impl<R: Record> Catalog<R> {
    /// Build a catalog by aggregating sources in order.
    ///
    /// Id uniqueness is checked here; see [`DuplicatePolicy`].
    pub fn from_sources(
        sources: Vec<TopicSource<R>>,
        policy: DuplicatePolicy,
    ) -> Result<Self, CatalogError> {
        let origins: Vec<Arc<str>> = sources
            .iter()
            .flat_map(|source| {
                let name: Arc<str> = Arc::from(source.name.as_str());
                std::iter::repeat(name).take(source.len())
            })
            .collect();

        let records = aggregate(sources);
        let duplicates = find_duplicates(&records, &origins);

        if let Some(first) = duplicates.first() {
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(CatalogError::DuplicateId {
                        kind: R::KIND,
                        id: first.id.clone(),
                        first_source: first.first_source.clone(),
                        second_source: first.second_source.clone(),
                    });
                }
                DuplicatePolicy::FirstWins => {
                    for dup in &duplicates {
                        warn!(
                            kind = %R::KIND,
                            id = %dup.id,
                            first = %dup.first_source,
                            second = %dup.second_source,
                            "Duplicate id tolerated; lookups return the first"
                        );
                    }
                }
            }
        }

        Ok(Self::assemble(records, origins, duplicates))
    }

    /// Build a catalog from a single inline source with the default policy
    pub fn from_records(records: Vec<R>) -> Result<Self, CatalogError> {
        Self::from_sources(
            vec![TopicSource::new("<inline>", records)],
            DuplicatePolicy::default(),
        )
    }

    fn assemble(records: Vec<R>, origins: Vec<Arc<str>>, duplicates: Vec<DuplicateId>) -> Self {
        let fingerprint = fingerprint_of(&records);
        Self {
            records,
            origins,
            duplicates,
            fingerprint,
        }
    }

    /// Kind of record held
    pub fn kind(&self) -> RecordKind {
        R::KIND
    }

    /// The full aggregated collection
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Get the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in a domain, in collection order
    pub fn by_domain(&self, domain: &str) -> Vec<&R> {
        self.filter(|r| r.domain() == domain)
    }

    /// Records in a blueprint area, in collection order
    pub fn by_area(&self, area: &str) -> Vec<&R> {
        self.filter(|r| r.area() == Some(area))
    }

    /// First record with this id, in collection order
    pub fn by_id(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Topic source the first record with this id came from
    pub fn source_of(&self, id: &str) -> Option<&str> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .map(|pos| &*self.origins[pos])
    }

    /// Records matching a predicate, in collection order
    pub fn filter<F>(&self, mut predicate: F) -> Vec<&R>
    where
        F: FnMut(&R) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Search records by query (case-insensitive substring match)
    pub fn search(&self, query: &str) -> Vec<&R> {
        let query_lower = query.to_lowercase();

        self.filter(|r| {
            r.search_text()
                .iter()
                .any(|text| text.to_lowercase().contains(&query_lower))
        })
    }

    /// First `limit` records in collection order (all when `None`)
    pub fn list(&self, limit: Option<usize>) -> Vec<&R> {
        let take = limit.unwrap_or(self.records.len());
        self.records.iter().take(take).collect()
    }

    /// Distinct domain codes in order of first appearance
    pub fn domains(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.domain()) {
                seen.push(record.domain());
            }
        }
        seen
    }

    /// Pairs of each record with the topic source it came from
    pub fn with_origins(&self) -> impl Iterator<Item = (&R, &str)> {
        self.records
            .iter()
            .zip(self.origins.iter().map(|o| &**o))
    }

    /// Duplicate ids that were tolerated at construction
    pub fn duplicates(&self) -> &[DuplicateId] {
        &self.duplicates
    }

    /// Stable digest of the ordered collection (16 hex chars).
    ///
    /// Changes whenever any record, or the aggregation order, changes.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl<'a, R: Record> IntoIterator for &'a Catalog<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn find_duplicates<R: Record>(records: &[R], origins: &[Arc<str>]) -> Vec<DuplicateId> {
    let mut first_seen: HashMap<&RecordId, usize> = HashMap::with_capacity(records.len());
    let mut duplicates = Vec::new();

    for (pos, record) in records.iter().enumerate() {
        if let Some(&first) = first_seen.get(record.id()) {
            duplicates.push(DuplicateId {
                id: record.id().clone(),
                first_source: origins[first].to_string(),
                second_source: origins[pos].to_string(),
            });
        } else {
            first_seen.insert(record.id(), pos);
        }
    }

    duplicates
}

fn fingerprint_of<R: Record>(records: &[R]) -> String {
    let mut hasher = Sha256::new();

    for record in records {
        match serde_json::to_vec(record) {
            Ok(bytes) => hasher.update(&bytes),
            Err(_) => hasher.update(record.id().as_str().as_bytes()),
        }
        hasher.update(b"\n");
    }

    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}
