//! Command-line host for the notelink engine.
//!
//! The CLI plays the role of the host application: it implements the
//! [`DocumentStore`](notelink_core::DocumentStore) boundary over a directory
//! of Markdown files and drives scans from the command line. All linking
//! logic lives in the library crates.

pub mod cli;
pub mod commands;
pub mod store;

pub use store::FsDocumentStore;
