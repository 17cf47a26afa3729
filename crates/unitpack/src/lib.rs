//! unitpack packs a multi-project codebase into one self-contained
//! translation unit for deployment targets that accept a single source
//! file with a single designated entry type.
//!
//! The pipeline is a one-shot batch transform: collect the project
//! dependency closure, merge modules into one tree, consolidate namespaces
//! by resolved identity, separate the entry declaration, assemble the
//! final text. Identical inputs produce byte-identical output.

pub mod assembler;
pub mod config;
pub mod consolidator;
pub mod dep_graph;
pub mod emit;
pub mod error;
pub mod frontend;
pub mod merger;
pub mod packer;
pub mod separator;
pub mod types;
pub mod workspace;
