use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::coords::default_m2_repository;
use crate::resolver::RemoteRepository;
use crate::search::DEFAULT_SEARCH_URL;

pub const M2_ENV: &str = "JCLEC_M2";

/// Effective run configuration after flags, environment and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub local_repository: PathBuf,
    pub remotes: Vec<RemoteRepository>,
    pub search_url: String,
    pub offline: bool,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            local_repository: resolve_m2_repo(cli)?,
            remotes: resolve_remotes(cli),
            search_url: cli
                .search_url
                .clone()
                .unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
            offline: cli.offline,
        })
    }
}

pub fn resolve_m2_repo(cli: &Cli) -> Result<PathBuf> {
    if let Some(p) = cli.m2.clone() {
        return Ok(p);
    }

    if let Ok(p) = env::var(M2_ENV)
        && !p.trim().is_empty()
    {
        return Ok(PathBuf::from(p));
    }

    default_m2_repository()
}

pub fn resolve_remotes(cli: &Cli) -> Vec<RemoteRepository> {
    if cli.repos.is_empty() {
        return vec![RemoteRepository::central(), RemoteRepository::jcenter()];
    }

    cli.repos
        .iter()
        .enumerate()
        .map(|(i, url)| RemoteRepository::new(format!("repo{}", i + 1), url.as_str()))
        .collect()
}
