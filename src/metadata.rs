//! Reader for `maven-metadata.xml`.
//!
//! Only the `<versioning>` children needed to pick a version are extracted:
//! `<release>`, `<latest>` and the `<versions>` list.

use anyhow::{Context, Result, bail};
use roxmltree::{Document, Node};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionMetadata {
    pub release: Option<String>,
    pub latest: Option<String>,
    pub versions: Vec<String>,
}

impl VersionMetadata {
    pub fn parse(xml: &str) -> Result<Self> {
        let document = Document::parse(xml).context("Malformed maven-metadata.xml")?;
        let root = document.root_element();
        if !root.has_tag_name("metadata") {
            bail!(
                "Unexpected root element <{}> in maven-metadata.xml",
                root.tag_name().name()
            );
        }

        let Some(versioning) = child(root, "versioning") else {
            return Ok(Self::default());
        };

        let versions = child(versioning, "versions")
            .map(|list| {
                list.children()
                    .filter(|n| n.has_tag_name("version"))
                    .filter_map(text_of)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            release: child(versioning, "release").and_then(text_of),
            latest: child(versioning, "latest").and_then(text_of),
            versions,
        })
    }

    /// `<release>`, then `<latest>`, then the last listed version.
    pub fn preferred_version(&self) -> Option<&str> {
        self.release
            .as_deref()
            .or(self.latest.as_deref())
            .or_else(|| self.versions.last().map(String::as_str))
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

fn text_of(node: Node<'_, '_>) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
