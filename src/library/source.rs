//! Topic files: reading one file of records into a [`TopicSource`].
//!
//! A topic file is a YAML (`.yaml`/`.yml`) or JSON (`.json`) list of records.
//! Manifest entries may be plain paths or glob patterns; glob matches are
//! taken in sorted path order so aggregation stays deterministic.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, warn};

use crate::catalog::TopicSource;
use crate::domain::Record;

/// Supported topic file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicFormat {
    Yaml,
    Json,
}

impl TopicFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "yaml" | "yml" => Ok(TopicFormat::Yaml),
            "json" => Ok(TopicFormat::Json),
            _ => anyhow::bail!("Unsupported topic file extension: {}", path.display()),
        }
    }

    /// Parse a list of records
    pub fn parse<R: Record>(self, content: &str) -> Result<Vec<R>> {
        match self {
            TopicFormat::Yaml => serde_yaml::from_str(content).context("Failed to parse topic YAML"),
            TopicFormat::Json => serde_json::from_str(content).context("Failed to parse topic JSON"),
        }
    }
}

/// Read one topic file. `name` labels the source in errors and reports.
pub async fn load_topic_file<R: Record>(path: &Path, name: impl Into<String>) -> Result<TopicSource<R>> {
    let format = TopicFormat::from_path(path)?;

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read topic file: {}", path.display()))?;

    let records: Vec<R> = format
        .parse(&content)
        .with_context(|| format!("Invalid topic file: {}", path.display()))?;

    let name = name.into();
    debug!(kind = %R::KIND, source = %name, count = records.len(), "Loaded topic file");

    Ok(TopicSource::new(name, records))
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Whether a path is an existing regular file (symlinks followed)
pub(crate) async fn is_file(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
}

/// Glob matches of one manifest entry. Only the entry is a pattern: the root
/// is escaped so directory names like `cfp[2026]` are taken literally.
fn glob_matches(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = Path::new(&glob::Pattern::escape(&root.to_string_lossy())).join(pattern);

    let mut matched = Vec::new();
    for entry in glob::glob(&full.to_string_lossy())
        .with_context(|| format!("Invalid topic file pattern: {}", pattern))?
    {
        matched.push(entry.with_context(|| format!("Failed to read match of {}", pattern))?);
    }
    matched.sort();

    Ok(matched)
}

/// Resolve manifest entries to files, relative to `root`.
///
/// Plain paths must exist. A glob that matches nothing is logged and skipped.
/// A file reached twice (e.g. listed and also globbed, or listed under two
/// domains) is only kept once, at its first position.
pub async fn expand_patterns(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let matched = if is_glob(pattern) {
            let mut matched = Vec::new();
            for path in glob_matches(root, pattern)? {
                if is_file(&path).await {
                    matched.push(path);
                }
            }

            if matched.is_empty() {
                warn!(pattern = %pattern, root = %root.display(), "Topic pattern matched no files");
            }
            matched
        } else {
            let path = root.join(pattern);
            if !is_file(&path).await {
                anyhow::bail!("Topic file not found: {}", path.display());
            }
            vec![path]
        };

        for path in matched {
            if files.contains(&path) {
                warn!(path = %path.display(), "Topic file listed more than once; skipping repeat");
            } else {
                files.push(path);
            }
        }
    }

    Ok(files)
}

/// Label a file by its path relative to the pack root
pub fn source_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Load every topic file a list of manifest entries resolves to
pub async fn load_topic_files<R: Record>(root: &Path, patterns: &[String]) -> Result<Vec<TopicSource<R>>> {
    let mut sources = Vec::new();

    for path in expand_patterns(root, patterns).await? {
        let name = source_name(root, &path);
        sources.push(load_topic_file(&path, name).await?);
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Lesson, Question};
    use tempfile::TempDir;

    #[test]
    fn test_format_detection() {
        assert_eq!(TopicFormat::from_path(Path::new("a/b.yaml")).unwrap(), TopicFormat::Yaml);
        assert_eq!(TopicFormat::from_path(Path::new("b.YML")).unwrap(), TopicFormat::Yaml);
        assert_eq!(TopicFormat::from_path(Path::new("b.json")).unwrap(), TopicFormat::Json);
        assert!(TopicFormat::from_path(Path::new("b.ts")).is_err());
    }

    #[test]
    fn test_glob_detection() {
        assert!(is_glob("lessons/gen_*.yaml"));
        assert!(is_glob("questions/tax_batch?.json"));
        assert!(!is_glob("lessons/gen_planning_process.yaml"));
    }

    #[tokio::test]
    async fn test_expand_patterns_sorted_and_deduplicated() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("lessons");
        std::fs::create_dir_all(&dir).unwrap();
        for name in ["gen_b.yaml", "gen_a.yaml", "tax.yaml"] {
            std::fs::write(dir.join(name), "[]").unwrap();
        }

        let patterns = vec![
            "lessons/tax.yaml".to_string(),
            "lessons/*.yaml".to_string(),
            "lessons/none_*.yaml".to_string(),
        ];
        let files = expand_patterns(temp.path(), &patterns).await.unwrap();
        let names: Vec<String> = files.iter().map(|p| source_name(temp.path(), p)).collect();

        assert_eq!(names, vec!["lessons/tax.yaml", "lessons/gen_a.yaml", "lessons/gen_b.yaml"]);
    }

    #[tokio::test]
    async fn test_missing_plain_path_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = expand_patterns(temp.path(), &["lessons/missing.yaml".to_string()]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_glob_under_root_with_metacharacters() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("cfp[2026]");
        std::fs::create_dir_all(root.join("lessons")).unwrap();
        std::fs::write(root.join("lessons").join("gen.yaml"), "[]").unwrap();

        let files = expand_patterns(&root, &["lessons/*.yaml".to_string()]).await.unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(source_name(&root, &files[0]), "lessons/gen.yaml");
    }

    #[tokio::test]
    async fn test_load_yaml_and_json_topic_files() {
        let temp = TempDir::new().unwrap();
        let yaml_path = temp.path().join("gen.yaml");
        let json_path = temp.path().join("tax.json");

        std::fs::write(
            &yaml_path,
            "- { id: G1, section: CFP-GEN, title: Process, order: 1 }\n\
             - { id: G2, section: CFP-GEN, title: Statements, order: 2 }\n",
        )
        .unwrap();
        std::fs::write(
            &json_path,
            r#"[{"id":"T1","section":"CFP-TAX","question":"Q?","options":["A","B"],"correctAnswer":1}]"#,
        )
        .unwrap();

        let lessons: TopicSource<Lesson> = load_topic_file(&yaml_path, "gen.yaml").await.unwrap();
        let questions: TopicSource<Question> = load_topic_file(&json_path, "tax.json").await.unwrap();

        assert_eq!(lessons.len(), 2);
        assert_eq!(lessons.records[1].title, "Statements");
        assert_eq!(questions.records[0].correct_answer, 1);
    }

    #[tokio::test]
    async fn test_malformed_topic_file_names_the_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.yaml");
        std::fs::write(&path, "- { id: G1, title: no section }\n").unwrap();

        let err = load_topic_file::<Lesson>(&path, "broken.yaml").await.unwrap_err();
        assert!(format!("{:#}", err).contains("broken.yaml"));
    }
}
