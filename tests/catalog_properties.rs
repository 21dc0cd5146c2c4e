//! Catalog Integration Tests
//!
//! Query and statistics behavior of aggregated catalogs: uniqueness,
//! domain filtering, determinism and duplicate handling.

use std::collections::HashSet;

use prepcat::catalog::{Catalog, CatalogError, CatalogStats, DuplicatePolicy, TopicSource};
use prepcat::domain::{ExamDefinition, Lesson, Question, Record};

const EXAM_YAML: &str = r#"
code: test
name: Test Exam
domains:
  - code: X
    name: Domain X
    exam_weight: 60
    areas: [{ code: X-1 }, { code: X-2 }]
  - code: Y
    name: Domain Y
    exam_weight: 40
"#;

fn exam() -> ExamDefinition {
    ExamDefinition::from_yaml(EXAM_YAML).unwrap()
}

/// `count` lessons in one domain, ids prefixed so sources never collide
fn topic(prefix: &str, domain: &str, count: usize) -> TopicSource<Lesson> {
    let records = (1..=count)
        .map(|i| {
            let area = if i % 2 == 0 { "X-2" } else { "X-1" };
            Lesson::new(format!("{}-{:03}", prefix, i), domain, format!("{} {}", prefix, i), i as u32)
                .with_area(area)
        })
        .collect();
    TopicSource::new(format!("{}.yaml", prefix.to_lowercase()), records)
}

fn mixed_catalog() -> Catalog<Lesson> {
    Catalog::from_sources(
        vec![
            topic("XA", "X", 5),
            topic("YA", "Y", 4),
            topic("XB", "X", 7),
            topic("XC", "X", 3),
            topic("YB", "Y", 2),
        ],
        DuplicatePolicy::Reject,
    )
    .unwrap()
}

#[test]
fn test_ids_are_unique() {
    let catalog = mixed_catalog();
    let ids: HashSet<&str> = catalog.iter().map(|l| l.id.as_str()).collect();

    assert_eq!(ids.len(), catalog.len());
    assert!(catalog.duplicates().is_empty());
}

#[test]
fn test_domain_filter_is_complete_and_ordered() {
    let catalog = mixed_catalog();

    for domain in ["X", "Y"] {
        let filtered = catalog.by_domain(domain);
        let expected: Vec<&Lesson> = catalog.iter().filter(|l| l.section == domain).collect();

        assert_eq!(filtered, expected);
        assert!(filtered.iter().all(|l| l.domain() == domain));
    }

    // Sources interleave domains; filtering keeps collection order
    let ids: Vec<&str> = catalog.by_domain("X").iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids.first(), Some(&"XA-001"));
    assert_eq!(ids[5], "XB-001");
    assert_eq!(ids.last(), Some(&"XC-003"));
}

#[test]
fn test_queries_are_idempotent() {
    let catalog = mixed_catalog();

    assert_eq!(catalog.by_domain("X"), catalog.by_domain("X"));
    assert_eq!(catalog.by_area("X-2"), catalog.by_area("X-2"));
    assert_eq!(catalog.by_id("YB-002"), catalog.by_id("YB-002"));

    let again = mixed_catalog();
    assert_eq!(catalog.fingerprint(), again.fingerprint());
}

#[test]
fn test_three_sources_in_one_domain() {
    let catalog = mixed_catalog();
    let stats = CatalogStats::build(&catalog, &exam());

    assert!(catalog.len() >= 15);
    assert_eq!(catalog.by_domain("X").len(), 15);
    assert_eq!(stats.get("X").unwrap().record_count, 15);
    assert_eq!(stats.get("Y").unwrap().record_count, 6);
}

#[test]
fn test_stats_match_queries() {
    let catalog = mixed_catalog();
    let exam = exam();
    let stats = CatalogStats::build(&catalog, &exam);

    for domain in stats.iter() {
        assert_eq!(domain.record_count, catalog.by_domain(&domain.code).len());
        assert_eq!(Some(domain.exam_weight.to_string()), exam.domain_weight(&domain.code));
    }

    let codes: Vec<&str> = stats.domains.keys().map(String::as_str).collect();
    assert_eq!(codes, vec!["X", "Y"]);
    assert_eq!(stats.get("X").unwrap().areas, vec!["X-1", "X-2"]);
    assert_eq!(stats.total() + stats.unclassified, catalog.len());
}

#[test]
fn test_stats_ignore_undeclared_domains() {
    let catalog = Catalog::from_sources(
        vec![topic("XA", "X", 2), topic("ZA", "Z", 3)],
        DuplicatePolicy::Reject,
    )
    .unwrap();

    let stats = CatalogStats::build(&catalog, &exam());

    assert!(stats.get("Z").is_none());
    assert_eq!(stats.get("Y").unwrap().record_count, 0);
    assert_eq!(stats.unclassified, 3);
}

#[test]
fn test_not_found_is_empty_not_an_error() {
    let catalog = mixed_catalog();

    assert!(catalog.by_id("NOPE-001").is_none());
    assert!(catalog.by_id("").is_none());
    assert!(catalog.by_domain("Q").is_empty());
    assert!(catalog.by_area("X-9").is_empty());

    let empty: Catalog<Lesson> = Catalog::default();
    assert!(empty.by_id("XA-001").is_none());
    assert!(empty.by_domain("X").is_empty());
    assert!(empty.is_empty());
}

#[test]
fn test_area_matching_is_exact() {
    let catalog = Catalog::from_records(vec![
        Lesson::new("A", "X", "Lower", 1).with_area("x-1"),
        Lesson::new("B", "X", "Upper", 2).with_area("X-1"),
        Lesson::new("C", "X", "None", 3),
    ])
    .unwrap();

    let ids: Vec<&str> = catalog.by_area("X-1").iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["B"]);
}

fn duplicated_sources() -> Vec<TopicSource<Question>> {
    vec![
        TopicSource::new(
            "first.json",
            vec![Question::new("DUP-001", "X", "Which comes first?", ["This one", "Other"], 0)],
        ),
        TopicSource::new(
            "second.json",
            vec![Question::new("DUP-001", "X", "Which comes second?", ["Other", "This one"], 1)],
        ),
    ]
}

#[test]
fn test_duplicate_ids_rejected_by_default() {
    let err = Catalog::from_sources(duplicated_sources(), DuplicatePolicy::default()).unwrap_err();

    match &err {
        CatalogError::DuplicateId {
            id,
            first_source,
            second_source,
            ..
        } => {
            assert_eq!(id.as_str(), "DUP-001");
            assert_eq!(first_source, "first.json");
            assert_eq!(second_source, "second.json");
        }
        other => panic!("Expected DuplicateId, got {:?}", other),
    }
    assert!(err.to_string().contains("DUP-001"));
}

#[test]
fn test_duplicate_ids_first_wins() {
    let catalog = Catalog::from_sources(duplicated_sources(), DuplicatePolicy::FirstWins).unwrap();

    let found = catalog.by_id("DUP-001").unwrap();
    assert_eq!(found.question, "Which comes first?");
    assert_eq!(catalog.source_of("DUP-001"), Some("first.json"));

    // Both records stay in the collection
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.by_domain("X").len(), 2);
    assert_eq!(catalog.duplicates().len(), 1);
}
