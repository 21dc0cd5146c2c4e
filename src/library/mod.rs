//! Loading content from disk.
//!
//! # Storage Layout
//!
//! ```text
//! content/                     # content root (see config)
//! ├── cfp/
//! │   ├── pack.yaml            # exam, domains, weights, areas, topic files
//! │   ├── lessons/*.yaml
//! │   └── questions/*.json
//! └── cisa/
//!     └── pack.yaml
//! ```

pub mod pack;
pub mod registry;
pub mod source;

pub use pack::{ContentPack, FoundRecord, MANIFEST_FILE};
pub use registry::Library;
pub use source::{expand_patterns, load_topic_file, load_topic_files, TopicFormat};
