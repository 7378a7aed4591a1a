use anyhow::{Context, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use zip::ZipArchive;

use crate::coords::class_name_to_class_path;

pub fn jar_contains_entry(jar_path: &Path, entry_path: &str) -> Result<bool> {
    let file = File::open(jar_path)
        .with_context(|| format!("Failed to open jar: {}", jar_path.display()))?;
    // SAFETY: The file is opened read-only and outlives the mapping.
    let mmap = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to mmap jar: {}", jar_path.display()))?;
    let mut archive = ZipArchive::new(Cursor::new(&mmap[..]))
        .with_context(|| format!("Failed to read zip structure: {}", jar_path.display()))?;
    Ok(archive.by_name(entry_path).is_ok())
}

pub fn jar_contains_class(jar_path: &Path, class_name: &str) -> Result<bool> {
    jar_contains_entry(jar_path, &class_name_to_class_path(class_name))
}
