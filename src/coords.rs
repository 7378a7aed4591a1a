use anyhow::{Result, bail};
use std::fmt;
use std::path::PathBuf;

pub const JAR_PACKAGING: &str = "jar";

/// `groupId:artifactId[:version]`, packaging is always `jar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

impl Coordinates {
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.trim().split(':').map(str::trim).collect();
        if parts.len() < 2 {
            bail!("Invalid Maven coordinates: {raw}");
        }
        if parts[0].is_empty() || parts[1].is_empty() {
            bail!("Invalid Maven coordinates: {raw}");
        }

        let version = parts
            .get(2)
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string());

        Ok(Self {
            group_id: parts[0].to_string(),
            artifact_id: parts[1].to_string(),
            version,
        })
    }

    pub fn with_version(&self, version: &str) -> Self {
        Self {
            version: Some(version.to_string()),
            ..self.clone()
        }
    }

    /// `org/apache/commons/commons-text`, relative to a repository root.
    pub fn artifact_dir(&self) -> String {
        format!("{}/{}", self.group_id.replace('.', "/"), self.artifact_id)
    }

    /// Repository-relative path of the jar, `None` until a version is known.
    pub fn jar_path(&self) -> Option<String> {
        let version = self.version.as_deref()?;
        Some(format!(
            "{}/{version}/{}-{version}.{JAR_PACKAGING}",
            self.artifact_dir(),
            self.artifact_id
        ))
    }

    pub fn metadata_path(&self) -> String {
        format!("{}/maven-metadata.xml", self.artifact_dir())
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}:{}:{v}", self.group_id, self.artifact_id),
            None => write!(f, "{}:{}", self.group_id, self.artifact_id),
        }
    }
}

pub fn default_m2_repository() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Failed to resolve home directory"))?;
    Ok(home.join(".m2").join("repository"))
}

pub fn class_name_to_class_path(class_name: &str) -> String {
    format!("{}.class", class_name.trim().replace('.', "/"))
}
