//! Core data models for certsplit
//!
//! These structures describe a split run: what to read, what was found in
//! the bundle, and what ended up on disk.

use serde::Serialize;
use std::path::PathBuf;

use crate::splitter::{BEGIN_CERTIFICATE, OUTPUT_EXTENSION, OUTPUT_PREFIX};

/// Bundle file read when no input is given
pub const DEFAULT_INPUT: &str = "all_certs.pem";

/// Settings for a single split run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    /// PEM bundle to read
    pub input: PathBuf,
    /// Directory the per-certificate files are written into
    pub output_dir: PathBuf,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
        }
    }
}

/// One non-empty fragment of a bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Position of the fragment in the raw split sequence (0 = text before the first header)
    pub index: usize,
    /// Fragment text exactly as it appeared after the header, untrimmed
    pub body: String,
}

impl Segment {
    pub fn new(index: usize, body: impl Into<String>) -> Self {
        Self {
            index,
            body: body.into(),
        }
    }

    /// Output file name, e.g. `cert-01.cer`
    pub fn file_name(&self) -> String {
        format!("{}{:02}.{}", OUTPUT_PREFIX, self.index, OUTPUT_EXTENSION)
    }

    /// The segment with its `BEGIN CERTIFICATE` header restored
    pub fn to_pem(&self) -> String {
        let mut pem = String::with_capacity(BEGIN_CERTIFICATE.len() + self.body.len());
        pem.push_str(BEGIN_CERTIFICATE);
        pem.push_str(&self.body);
        pem
    }
}

/// A certificate file that has been committed to disk
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WrittenFile {
    pub index: usize,
    pub file_name: String,
    pub path: PathBuf,
    /// Number of bytes written
    pub bytes: usize,
}

/// Summary of a completed split run
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SplitReport {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Files in the order they were written
    pub files: Vec<WrittenFile>,
    /// Fragments dropped because they held only whitespace
    pub skipped: usize,
}

impl SplitReport {
    pub fn count(&self) -> usize {
        self.files.len()
    }
}
