//! Artifact resolution against a local Maven repository and a chain of
//! remote repositories.
//!
//! The local repository is a pass-through cache: a jar already present on
//! disk is returned without touching the network. Downloaded jars are written
//! to a temporary file next to their final location and persisted into
//! place; a failed write or rename removes the temporary file.

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::coords::Coordinates;
use crate::metadata::VersionMetadata;
use crate::transport::Transport;
use crate::version::compare_versions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    pub id: String,
    pub url: String,
}

impl RemoteRepository {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            id: id.into(),
            url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn central() -> Self {
        Self::new("central", "https://repo.maven.apache.org/maven2/")
    }

    pub fn jcenter() -> Self {
        Self::new("jcenter", "https://jcenter.bintray.com/")
    }

    pub fn url_for(&self, relative: &str) -> String {
        format!("{}/{}", self.url, relative.trim_start_matches('/'))
    }
}

pub struct ArtifactResolver {
    local: PathBuf,
    remotes: Vec<RemoteRepository>,
    transport: Arc<dyn Transport>,
    offline: bool,
}

impl ArtifactResolver {
    pub fn new(
        local: PathBuf,
        remotes: Vec<RemoteRepository>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            local,
            remotes,
            transport,
            offline: false,
        }
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn local_repository(&self) -> &Path {
        &self.local
    }

    /// Returns the path of the jar in the local repository, downloading it
    /// first when needed.
    pub fn resolve(&self, coords: &Coordinates) -> Result<PathBuf> {
        let coords = match coords.version {
            Some(_) => coords.clone(),
            None => {
                let version = self.resolve_latest_version(coords)?;
                coords.with_version(&version)
            }
        };
        let relative = coords
            .jar_path()
            .with_context(|| format!("No version for {coords}"))?;

        let local_path = self.local.join(&relative);
        if local_path.is_file() {
            debug!("{coords} found in local repository: {}", local_path.display());
            return Ok(local_path);
        }

        if self.offline {
            bail!(
                "{coords} is not in the local repository {} and offline mode is enabled",
                self.local.display()
            );
        }

        let mut failures = Vec::new();
        for repo in &self.remotes {
            let url = repo.url_for(&relative);
            match self.transport.get(&url) {
                Ok(Some(bytes)) => {
                    self.verify_checksum(&url, &bytes)?;
                    install(&local_path, &bytes)?;
                    info!("Downloaded {coords} from {} ({} bytes)", repo.id, bytes.len());
                    return Ok(local_path);
                }
                Ok(None) => failures.push(format!("{}: not found", repo.id)),
                Err(e) => failures.push(format!("{}: {e:#}", repo.id)),
            }
        }

        if failures.is_empty() {
            bail!("Could not resolve {coords}: no remote repositories configured");
        }
        bail!("Could not resolve {coords} ({})", failures.join("; "))
    }

    fn resolve_latest_version(&self, coords: &Coordinates) -> Result<String> {
        if !self.offline {
            let relative = coords.metadata_path();
            for repo in &self.remotes {
                let url = repo.url_for(&relative);
                match self.transport.get(&url) {
                    Ok(Some(bytes)) => {
                        match VersionMetadata::parse(&String::from_utf8_lossy(&bytes)) {
                            Ok(meta) => {
                                if let Some(version) = meta.preferred_version() {
                                    info!("Resolved {coords} to version {version} from {}", repo.id);
                                    return Ok(version.to_string());
                                }
                            }
                            Err(e) => warn!("Ignoring {url}: {e:#}"),
                        }
                    }
                    Ok(None) => {}
                    Err(e) => warn!("Failed to fetch {url}: {e:#}"),
                }
            }
        }

        if let Some(version) = self.local_latest_version(coords) {
            info!("Resolved {coords} to version {version} from local repository");
            return Ok(version);
        }

        bail!("No version available for {coords}")
    }

    /// Consults local metadata files first, then falls back to the highest
    /// version directory (Maven ordering) that actually holds the jar.
    fn local_latest_version(&self, coords: &Coordinates) -> Option<String> {
        let dir = self.local.join(coords.artifact_dir());
        let entries = std::fs::read_dir(&dir).ok()?;

        let mut metadata_files = Vec::new();
        let mut version_dirs = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            if path.is_dir() {
                version_dirs.push(name);
            } else if name.starts_with("maven-metadata") && name.ends_with(".xml") {
                metadata_files.push(path);
            }
        }
        metadata_files.sort();

        let jar_exists = |version: &str| {
            coords
                .with_version(version)
                .jar_path()
                .is_some_and(|rel| self.local.join(rel).is_file())
        };

        for path in metadata_files {
            let meta = match std::fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|xml| VersionMetadata::parse(&xml))
            {
                Ok(meta) => meta,
                Err(e) => {
                    warn!("Ignoring {}: {e:#}", path.display());
                    continue;
                }
            };
            if let Some(version) = meta.preferred_version()
                && jar_exists(version)
            {
                return Some(version.to_string());
            }
        }

        version_dirs.retain(|v| jar_exists(v.as_str()));
        version_dirs
            .into_iter()
            .max_by(|a, b| compare_versions(a, b))
    }

    fn verify_checksum(&self, jar_url: &str, bytes: &[u8]) -> Result<()> {
        let url = format!("{jar_url}.sha256");
        match self.transport.get(&url) {
            Ok(Some(body)) => {
                let text = String::from_utf8_lossy(&body);
                let Some(expected) = text.split_whitespace().next() else {
                    debug!("Empty checksum file at {url}");
                    return Ok(());
                };
                let expected = expected.to_ascii_lowercase();
                let actual = sha256_hex(bytes);
                if expected != actual {
                    bail!("Checksum mismatch for {jar_url}: expected {expected}, got {actual}");
                }
                debug!("Checksum verified for {jar_url}");
                Ok(())
            }
            Ok(None) => {
                debug!("No checksum published at {url}");
                Ok(())
            }
            Err(e) => {
                warn!("Could not fetch checksum {url}: {e:#}");
                Ok(())
            }
        }
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn install(target: &Path, bytes: &[u8]) -> Result<()> {
    let parent = target
        .parent()
        .with_context(|| format!("Artifact path has no parent: {}", target.display()))?;
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    tmp.write_all(bytes)
        .with_context(|| format!("Failed to write artifact: {}", tmp.path().display()))?;
    tmp.persist(target).map_err(|e| {
        anyhow::Error::new(e.error)
            .context(format!("Failed to move artifact into place: {}", target.display()))
    })?;
    Ok(())
}
