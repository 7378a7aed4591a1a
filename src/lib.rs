//! # jclec
//!
//! Checks whether classes suspected to be vulnerable really ship inside the
//! Maven artifacts they are attributed to, and searches Maven Central for
//! other artifacts carrying the class when they do not.
//!
//! ## Architecture
//!
//! - **dataset**: Component list loading (bundled or from a file)
//! - **coords**: Maven coordinates and repository layout paths
//! - **transport**: Blocking HTTP access behind the `Transport` trait
//! - **metadata**: `maven-metadata.xml` reading for versionless coordinates
//! - **version**: Maven version ordering
//! - **resolver**: Local repository lookup and remote download chain
//! - **probe**: Jar inspection for class entries
//! - **verifier**: Class-in-artifact verification
//! - **search**: Maven Central full-text class search
//! - **report**: Per-component orchestration and console report

pub mod cli;
pub mod config;
pub mod coords;
pub mod dataset;
pub mod error;
pub mod metadata;
pub mod probe;
pub mod report;
pub mod resolver;
pub mod search;
pub mod transport;
pub mod verifier;
pub mod version;

#[cfg(test)]
mod testing;
