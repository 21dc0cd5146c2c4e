//! The set of content packs available to a process.
//!
//! Each pack is an independent catalog; nothing is shared between exams.

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use tokio::fs;
use tracing::info;

use super::pack::ContentPack;
use crate::catalog::{CatalogError, DuplicatePolicy};

/// Content packs keyed by exam code
#[derive(Debug, Clone, Default)]
pub struct Library {
    packs: IndexMap<String, ContentPack>,
}

impl Library {
    /// Load packs from a content root.
    ///
    /// The root is either a pack directory itself or a directory whose
    /// immediate subdirectories are packs (visited in name order).
    pub async fn load(root: &Path, policy: DuplicatePolicy) -> Result<Self> {
        if ContentPack::is_pack_dir(root).await {
            let pack = ContentPack::load(root, policy).await?;
            return Ok(Self::from_packs(vec![pack])?);
        }

        let mut dirs = Vec::new();
        let mut entries = fs::read_dir(root)
            .await
            .with_context(|| format!("Failed to read content root: {}", root.display()))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if ContentPack::is_pack_dir(&path).await {
                dirs.push(path);
            }
        }
        dirs.sort();

        if dirs.is_empty() {
            anyhow::bail!(
                "No content packs found under {} (expected */pack.yaml)",
                root.display()
            );
        }

        let mut packs = Vec::with_capacity(dirs.len());
        for dir in &dirs {
            packs.push(ContentPack::load(dir, policy).await?);
        }

        let library = Self::from_packs(packs)?;
        info!(root = %root.display(), packs = library.len(), "Loaded content library");
        Ok(library)
    }

    /// Build a library from loaded packs; exam codes must be unique
    pub fn from_packs(packs: Vec<ContentPack>) -> Result<Self, CatalogError> {
        let mut map: IndexMap<String, ContentPack> = IndexMap::with_capacity(packs.len());

        for pack in packs {
            if let Some(existing) = map.get(pack.code()) {
                return Err(CatalogError::DuplicateExam {
                    code: pack.code().to_string(),
                    first: existing.root.display().to_string(),
                    second: pack.root.display().to_string(),
                });
            }
            map.insert(pack.code().to_string(), pack);
        }

        Ok(Self { packs: map })
    }

    /// Get a pack by exam code
    pub fn get(&self, code: &str) -> Option<&ContentPack> {
        self.packs.get(code)
    }

    /// Pick a pack: the named one, or the only one when no name is given
    pub fn select(&self, code: Option<&str>) -> Result<&ContentPack, CatalogError> {
        match code {
            Some(code) => self.get(code).ok_or_else(|| CatalogError::UnknownExam {
                code: code.to_string(),
                available: self.exam_codes(),
            }),
            None if self.packs.len() == 1 => Ok(&self.packs[0]),
            None => Err(CatalogError::AmbiguousExam {
                available: self.exam_codes(),
            }),
        }
    }

    /// Loaded exam codes
    pub fn exam_codes(&self) -> Vec<String> {
        self.packs.keys().cloned().collect()
    }

    pub fn packs(&self) -> impl Iterator<Item = &ContentPack> {
        self.packs.values()
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::domain::ExamDefinition;

    fn pack(code: &str) -> ContentPack {
        let exam = ExamDefinition::from_yaml(&format!(
            "code: {}\nname: {}\ndomains:\n  - {{ code: D1, name: Domain, exam_weight: 100 }}\n",
            code, code
        ))
        .unwrap();
        ContentPack::from_parts(exam, Catalog::default(), Catalog::default())
    }

    #[test]
    fn test_select() {
        let single = Library::from_packs(vec![pack("cfp")]).unwrap();
        assert_eq!(single.select(None).unwrap().code(), "cfp");

        let library = Library::from_packs(vec![pack("cfp"), pack("cisa")]).unwrap();
        assert_eq!(library.select(Some("cisa")).unwrap().code(), "cisa");
        assert!(matches!(library.select(None), Err(CatalogError::AmbiguousExam { .. })));
        assert!(matches!(
            library.select(Some("cma")),
            Err(CatalogError::UnknownExam { .. })
        ));
    }

    #[test]
    fn test_duplicate_exam_codes_rejected() {
        let result = Library::from_packs(vec![pack("cfp"), pack("cfp")]);
        assert!(matches!(result, Err(CatalogError::DuplicateExam { .. })));
    }
}
