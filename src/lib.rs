//! tagpage - Tag page synthesis for markdown note vaults
//!
//! Extracts every occurrence of a tag (and, for wildcard queries, its
//! nested variants) across a vault of markdown notes and renders them into
//! a single regenerable tag page, preserving user-authored text around the
//! generated region.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::TagPageError;
