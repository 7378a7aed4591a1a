use log::info;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::DatasetError;

const BUNDLED_DATASET: &str = include_str!("../resources/jc_dataset.json");

/// A software component and the classes suspected to carry a vulnerability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Component {
    #[serde(rename = "component", default)]
    pub name: String,

    #[serde(rename = "maven", default)]
    pub coordinates: Option<String>,

    #[serde(rename = "vulnerableClasses", default)]
    pub vulnerable_classes: Vec<String>,
}

impl Component {
    /// Coordinates worth handing to the verifier; blank strings count as absent.
    pub fn usable_coordinates(&self) -> Option<&str> {
        self.coordinates
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

pub fn load_bundled() -> Result<Vec<Component>, DatasetError> {
    let components = parse(BUNDLED_DATASET, "bundled dataset")?;
    info!("Loaded {} components from bundled dataset", components.len());
    Ok(components)
}

pub fn load_from_path(path: &Path) -> Result<Vec<Component>, DatasetError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DatasetError::ResourceNotFound {
            path: path.to_path_buf(),
        },
        _ => DatasetError::ParseError {
            source_name: path.display().to_string(),
            details: e.to_string(),
        },
    })?;

    let components = parse(&text, &path.display().to_string())?;
    info!(
        "Loaded {} components from {}",
        components.len(),
        path.display()
    );
    Ok(components)
}

pub fn parse(text: &str, source_name: &str) -> Result<Vec<Component>, DatasetError> {
    serde_json::from_str(text).map_err(|e| DatasetError::ParseError {
        source_name: source_name.to_string(),
        details: e.to_string(),
    })
}
