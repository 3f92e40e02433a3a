//! multisplit: path filtering, file discovery and split-view planning.
//!
//! The core is [`scan`]: an ignore-pattern matcher ([`scan::IgnorePatterns`])
//! and a directory walker ([`scan::FileDiscovery`]) that consults it at every
//! directory and file boundary. [`plan`] composes the core with binary
//! detection, count limits and the grid [`layout`].

pub mod cli;
pub mod config;
pub mod domain;
pub mod layout;
pub mod plan;
pub mod render;
pub mod scan;
pub mod utils;
pub mod workspace;
