//! libyear - dependency freshness measured in libyears
//!
//! A libyear is the time between the release of the version a project
//! declares and the release of the newest version available. This library
//! reads manifests, queries their registries and aggregates the result:
//! - Node.js (package.json, npm)
//! - Python (pyproject.toml, PyPI)
//! - Rust (Cargo.toml, crates.io)

pub mod checker;
pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod output;
pub mod parser;
pub mod progress;
pub mod registry;
pub mod resolver;
