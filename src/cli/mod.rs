//! Command-line interface for prepcat.
//!
//! Loads the content library once, then answers listing, lookup, search,
//! statistics and validation commands against it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::catalog::{Catalog, CatalogStats, DuplicatePolicy};
use crate::config::{self, ResolvedConfig};
use crate::domain::{Record, RecordKind};
use crate::library::{ContentPack, FoundRecord, Library};

pub mod render;

/// prepcat - exam-prep content catalog
#[derive(Parser, Debug)]
#[command(name = "prepcat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Content root (overrides config and PREPCAT_CONTENT)
    #[arg(long, global = true)]
    pub content: Option<PathBuf>,

    /// Exam code (defaults to the configured exam, or the only loaded one)
    #[arg(short, long, global = true)]
    pub exam: Option<String>,

    /// Tolerate duplicate ids (first record wins) instead of failing
    #[arg(long, global = true)]
    pub allow_duplicates: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List loaded exams
    Exams,

    /// Show per-domain statistics
    Domains {
        #[arg(short, long, value_enum, default_value = "lessons")]
        kind: KindArg,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List records, optionally filtered by domain or area
    List {
        #[arg(short, long, value_enum, default_value = "lessons")]
        kind: KindArg,

        /// Domain code (e.g. CFP-GEN)
        #[arg(short, long)]
        domain: Option<String>,

        /// Blueprint area code (e.g. GEN-1)
        #[arg(short, long)]
        area: Option<String>,

        /// Maximum number of records to show
        #[arg(short, long, default_value = "50")]
        limit: usize,

        #[arg(long)]
        json: bool,
    },

    /// Show one record by id
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Search titles, topics and question text
    Search {
        query: String,

        #[arg(short, long, value_enum, default_value = "lessons")]
        kind: KindArg,
    },

    /// Check content for authoring problems
    Validate {
        /// Fail on warnings too
        #[arg(long)]
        strict: bool,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Record kind for CLI (maps to RecordKind)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Lessons,
    Questions,
}

impl From<KindArg> for RecordKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Lessons => RecordKind::Lesson,
            KindArg::Questions => RecordKind::Question,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        // With --content the config file is optional
        let cfg = match &self.content {
            Some(_) => config::lenient_config()?,
            None => config::config()?.clone(),
        };

        let root = self.content.clone().unwrap_or_else(|| cfg.content_root.clone());
        let policy = if self.allow_duplicates {
            DuplicatePolicy::FirstWins
        } else {
            cfg.duplicate_policy
        };
        let exam = self.exam.as_deref().or(cfg.default_exam.as_deref());

        match self.command {
            Commands::Exams => {
                let library = open_library(&root, policy).await?;
                list_exams(&library)
            }
            Commands::Domains { kind, json } => {
                let library = open_library(&root, policy).await?;
                show_domains(library.select(exam)?, kind.into(), json)
            }
            Commands::List {
                kind,
                domain,
                area,
                limit,
                json,
            } => {
                let library = open_library(&root, policy).await?;
                let pack = library.select(exam)?;
                let filter = ListFilter {
                    domain: domain.as_deref(),
                    area: area.as_deref(),
                    limit,
                };
                match RecordKind::from(kind) {
                    RecordKind::Lesson => list_records(&pack.lessons, &filter, json),
                    RecordKind::Question => list_records(&pack.questions, &filter, json),
                }
            }
            Commands::Show { id, json } => {
                let library = open_library(&root, policy).await?;
                show_record(library.select(exam)?, &id, json)
            }
            Commands::Search { query, kind } => {
                let library = open_library(&root, policy).await?;
                let pack = library.select(exam)?;
                match RecordKind::from(kind) {
                    RecordKind::Lesson => search_records(&pack.lessons, &query),
                    RecordKind::Question => search_records(&pack.questions, &query),
                }
            }
            Commands::Validate { strict } => {
                let library = open_library(&root, policy).await?;
                let packs: Vec<&ContentPack> = match exam {
                    Some(code) => vec![library.select(Some(code))?],
                    None => library.packs().collect(),
                };
                validate_packs(&packs, strict)
            }
            Commands::Config => show_config(&cfg, self.content.as_deref()),
        }
    }
}

/// Load every pack under the content root
async fn open_library(root: &Path, policy: DuplicatePolicy) -> Result<Library> {
    Library::load(root, policy)
        .await
        .with_context(|| format!("Failed to load content from {}", root.display()))
}

/// Filters for `list`
struct ListFilter<'a> {
    domain: Option<&'a str>,
    area: Option<&'a str>,
    limit: usize,
}

/// List loaded exams
fn list_exams(library: &Library) -> Result<()> {
    println!(
        "{:<10} {:<40} {:>8} {:>10}  {:<16}",
        "EXAM", "NAME", "LESSONS", "QUESTIONS", "FINGERPRINT"
    );
    println!("{}", "-".repeat(90));

    for pack in library.packs() {
        println!(
            "{:<10} {:<40} {:>8} {:>10}  {:<16}",
            pack.code(),
            render::truncate(&pack.exam.name, 40),
            pack.lessons.len(),
            pack.questions.len(),
            pack.lessons.fingerprint()
        );
    }

    println!("\nTotal: {} exams", library.len());
    Ok(())
}

/// Show per-domain statistics
fn show_domains(pack: &ContentPack, kind: RecordKind, json: bool) -> Result<()> {
    let stats: &CatalogStats = pack.stats(kind);

    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!("{} ({}) - {}s by domain\n", pack.exam.name, pack.code(), kind);
    println!("{:<10} {:<45} {:>8} {:>7}  {}", "DOMAIN", "NAME", "WEIGHT", "COUNT", "AREAS");
    println!("{}", "-".repeat(90));

    for domain in stats.iter() {
        println!(
            "{:<10} {:<45} {:>8} {:>7}  {}",
            domain.code,
            render::truncate(&domain.name, 45),
            domain.exam_weight.to_string(),
            domain.record_count,
            domain.areas.join(", ")
        );
    }

    println!("\nTotal: {} {}s", stats.total(), kind);
    if stats.unclassified > 0 {
        println!("Unclassified (undeclared domain): {}", stats.unclassified);
    }
    render::print_summary(&stats.summary);

    Ok(())
}

/// List records of one kind
fn list_records<R: Record>(catalog: &Catalog<R>, filter: &ListFilter<'_>, json: bool) -> Result<()> {
    let mut records: Vec<&R> = match (filter.domain, filter.area) {
        (Some(domain), Some(area)) => catalog
            .by_domain(domain)
            .into_iter()
            .filter(|r| r.area() == Some(area))
            .collect(),
        (Some(domain), None) => catalog.by_domain(domain),
        (None, Some(area)) => catalog.by_area(area),
        (None, None) => catalog.list(None),
    };
    let matched = records.len();
    records.truncate(filter.limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No {}s found", catalog.kind());
        return Ok(());
    }

    render::print_table(&records);
    println!("\nShowing {} of {} matching ({} total)", records.len(), matched, catalog.len());

    Ok(())
}

/// Search one catalog
fn search_records<R: Record>(catalog: &Catalog<R>, query: &str) -> Result<()> {
    let results = catalog.search(query);

    if results.is_empty() {
        println!("No results found for: {}", query);
        return Ok(());
    }

    println!("Found {} result(s) for \"{}\":\n", results.len(), query);
    render::print_table(&results);

    Ok(())
}

#[derive(Serialize)]
struct ShownRecord<'a> {
    source: Option<&'a str>,
    record: FoundRecord<'a>,
}

/// Show a single record
fn show_record(pack: &ContentPack, id: &str, json: bool) -> Result<()> {
    let found = pack
        .find(id)
        .ok_or_else(|| anyhow::anyhow!("Record not found in exam '{}': {}", pack.code(), id))?;
    let source = pack.source_of(id);

    if json {
        let shown = ShownRecord {
            source,
            record: found,
        };
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    match found {
        FoundRecord::Lesson(lesson) => render::print_lesson(lesson, source),
        FoundRecord::Question(question) => render::print_question(question, source),
    }

    Ok(())
}

/// Validate packs and report
fn validate_packs(packs: &[&ContentPack], strict: bool) -> Result<()> {
    let mut failed = false;

    for pack in packs {
        let report = pack.validate();

        println!(
            "{}: {} lessons, {} questions, {} error(s), {} warning(s)",
            pack.code(),
            pack.lessons.len(),
            pack.questions.len(),
            report.errors().count(),
            report.warnings().count()
        );
        for issue in &report.issues {
            println!("  {}", issue);
        }

        if !report.passes(strict) {
            failed = true;
        }
    }

    if failed {
        eprintln!("\n[Validation failed]");
        std::process::exit(1);
    }

    println!("\n[Validation passed]");
    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig, content_override: Option<&Path>) -> Result<()> {
    println!("prepcat configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Content root:     {}", cfg.content_root.display());
    if let Some(path) = content_override {
        println!("  (overridden by --content: {})", path.display());
    }
    println!("Duplicate policy: {}", cfg.duplicate_policy);
    println!(
        "Default exam:     {}",
        cfg.default_exam.as_deref().unwrap_or("(none)")
    );

    Ok(())
}
