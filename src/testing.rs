use anyhow::{Result, bail};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Mutex;
use zip::write::{FileOptions, ZipWriter};

use crate::transport::Transport;

enum Canned {
    Body(Vec<u8>),
    Fail(String),
}

/// In-memory transport; unknown URLs answer 404. Every request is recorded.
#[derive(Default)]
pub struct StubTransport {
    responses: HashMap<String, Canned>,
    requests: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses
            .insert(url.to_string(), Canned::Body(body.into()));
        self
    }

    pub fn with_failure(mut self, url: &str, reason: &str) -> Self {
        self.responses
            .insert(url.to_string(), Canned::Fail(reason.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for StubTransport {
    fn get(&self, url: &str) -> Result<Option<Vec<u8>>> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(Canned::Body(body)) => Ok(Some(body.clone())),
            Some(Canned::Fail(reason)) => bail!("{reason}"),
            None => Ok(None),
        }
    }
}

pub fn jar_bytes(entries: &[&str]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for name in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(b"dummy").unwrap();
    }
    zip.finish().unwrap().into_inner()
}

pub fn write_jar(path: &Path, entries: &[&str]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, jar_bytes(entries)).unwrap();
}
