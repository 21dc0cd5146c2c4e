//! Per-domain statistics for display.
//!
//! Counts come from the query layer (`by_domain(code).len()`), so a domain's
//! count always equals the number of records a caller would get back for it.

use indexmap::IndexMap;
use serde::Serialize;

use super::collection::Catalog;
use super::summary::{Summarize, Summary};
use crate::domain::{ExamDefinition, ExamWeight, RecordKind};

/// Statistics for one exam domain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainStats {
    pub code: String,
    pub name: String,
    pub exam_weight: ExamWeight,

    /// Number of records in the domain (the lesson count, for lesson catalogs)
    pub record_count: usize,

    /// Declared area codes
    pub areas: Vec<String>,
}

/// Statistics for a whole catalog, keyed by domain code in blueprint order
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub kind: RecordKind,
    pub domains: IndexMap<String, DomainStats>,

    /// Records whose domain the exam does not declare
    pub unclassified: usize,

    /// Kind-specific totals over the whole catalog
    pub summary: Summary,
}

impl CatalogStats {
    /// Compute statistics for every domain the exam declares
    pub fn build<R: Summarize>(catalog: &Catalog<R>, exam: &ExamDefinition) -> Self {
        let domains: IndexMap<String, DomainStats> = exam
            .domains
            .iter()
            .map(|domain| {
                let stats = DomainStats {
                    code: domain.code.clone(),
                    name: domain.name.clone(),
                    exam_weight: domain.exam_weight,
                    record_count: catalog.by_domain(&domain.code).len(),
                    areas: domain.area_codes(),
                };
                (domain.code.clone(), stats)
            })
            .collect();

        let classified: usize = domains.values().map(|d| d.record_count).sum();

        Self {
            kind: catalog.kind(),
            domains,
            unclassified: catalog.len() - classified,
            summary: R::summarize(catalog),
        }
    }

    /// Statistics for one domain
    pub fn get(&self, code: &str) -> Option<&DomainStats> {
        self.domains.get(code)
    }

    /// Records counted across all declared domains
    pub fn total(&self) -> usize {
        self.domains.values().map(|d| d.record_count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainStats> {
        self.domains.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Lesson;

    const EXAM_YAML: &str = r#"
code: cfp
name: CFP
domains:
  - code: CFP-GEN
    name: General Principles
    exam_weight: 15
    areas: [{ code: GEN-1 }, { code: GEN-3 }]
  - code: CFP-TAX
    name: Tax Planning
    exam_weight: 14
  - code: CFP-EST
    name: Estate Planning
    exam_weight: 10
"#;

    #[test]
    fn test_stats_follow_exam_order_and_counts() {
        let exam = ExamDefinition::from_yaml(EXAM_YAML).unwrap();
        let catalog = Catalog::from_records(vec![
            Lesson::new("T1", "CFP-TAX", "Tax 1", 1),
            Lesson::new("G1", "CFP-GEN", "Gen 1", 1),
            Lesson::new("G2", "CFP-GEN", "Gen 2", 2),
            Lesson::new("X1", "CFP-XYZ", "Stray", 1),
        ])
        .unwrap();

        let stats = CatalogStats::build(&catalog, &exam);
        let codes: Vec<&str> = stats.domains.keys().map(String::as_str).collect();

        assert_eq!(codes, vec!["CFP-GEN", "CFP-TAX", "CFP-EST"]);
        assert_eq!(stats.get("CFP-GEN").unwrap().record_count, 2);
        assert_eq!(stats.get("CFP-GEN").unwrap().areas, vec!["GEN-1", "GEN-3"]);
        assert_eq!(stats.get("CFP-EST").unwrap().record_count, 0);
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.unclassified, 1);
        assert!(stats.get("CFP-XYZ").is_none());
        assert!(matches!(stats.summary, Summary::Lessons(_)));
    }
}
