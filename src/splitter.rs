//! Bundle splitter
//!
//! Reads a concatenated PEM bundle, cuts it on every `BEGIN CERTIFICATE`
//! header and writes each non-empty piece to its own numbered file.
//!
//! # Output naming
//!
//! ```text
//! bundle:  <lead>HDR<a>HDR<b>
//! split:   [0]=<lead> [1]=<a> [2]=<b>
//! files:   cert-01.cer = HDR<a>, cert-02.cer = HDR<b>
//! ```
//!
//! Numbers are the fragment's position in the raw split, so a dropped
//! fragment leaves a gap rather than shifting later files.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::models::{Segment, SplitConfig, SplitReport, WrittenFile};

/// PEM header that starts every certificate block
pub const BEGIN_CERTIFICATE: &str = "-----BEGIN CERTIFICATE-----";

pub const OUTPUT_PREFIX: &str = "cert-";
pub const OUTPUT_EXTENSION: &str = "cer";

/// Split bundle text into its non-empty certificate segments
///
/// The header itself is consumed by the split and is not part of any
/// segment body. Fragments that are empty after trimming whitespace are
/// dropped; retained bodies are kept untrimmed.
pub fn split_bundle(bundle: &str) -> Vec<Segment> {
    bundle
        .split(BEGIN_CERTIFICATE)
        .enumerate()
        .filter(|(_, fragment)| !fragment.trim().is_empty())
        .map(|(index, fragment)| Segment::new(index, fragment))
        .collect()
}

/// Writes the certificates of one bundle to individual files
pub struct Splitter {
    config: SplitConfig,
}

impl Splitter {
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Read the whole bundle into memory
    pub fn read_bundle(&self) -> Result<String> {
        fs::read_to_string(&self.config.input)
            .with_context(|| format!("Failed to read bundle {}", self.config.input.display()))
    }

    /// Write one segment to `<output_dir>/cert-NN.cer`, replacing any existing file
    pub fn write_segment(&self, segment: &Segment) -> Result<WrittenFile> {
        let file_name = segment.file_name();
        let path = self.config.output_dir.join(&file_name);
        let pem = segment.to_pem();

        write_file(&path, &pem)?;
        log::debug!("Wrote {} bytes to {}", pem.len(), path.display());

        Ok(WrittenFile {
            index: segment.index,
            file_name,
            path,
            bytes: pem.len(),
        })
    }

    pub fn run(&self) -> Result<SplitReport> {
        self.run_with(|_| Ok(()))
    }

    /// Split the bundle, calling `on_created` after each file is committed
    ///
    /// The first failure, including one returned by `on_created`, aborts the
    /// run. Files written before it stay on disk.
    pub fn run_with<F>(&self, mut on_created: F) -> Result<SplitReport>
    where
        F: FnMut(&WrittenFile) -> Result<()>,
    {
        log::info!("Splitting bundle {}", self.config.input.display());

        let bundle = self.read_bundle()?;
        let fragment_count = bundle.matches(BEGIN_CERTIFICATE).count() + 1;
        let segments = split_bundle(&bundle);
        let skipped = fragment_count - segments.len();

        if skipped > 0 {
            log::debug!("Skipped {} whitespace-only fragment(s)", skipped);
        }

        let mut files = Vec::with_capacity(segments.len());
        for segment in &segments {
            let written = self.write_segment(segment)?;
            on_created(&written)?;
            files.push(written);
        }

        if files.is_empty() {
            log::warn!("No certificates found in {}", self.config.input.display());
        }

        log::info!(
            "Wrote {} certificate file(s) to {}",
            files.len(),
            self.config.output_dir.display()
        );

        Ok(SplitReport {
            input: self.config.input.clone(),
            output_dir: self.config.output_dir.clone(),
            files,
            skipped,
        })
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TWO_CERTS: &str =
        "-----BEGIN CERTIFICATE-----\nAAA\n-----BEGIN CERTIFICATE-----\nBBB\n";

    fn splitter_in(temp: &TempDir, bundle: &str) -> Splitter {
        let input = temp.path().join("all_certs.pem");
        fs::write(&input, bundle).unwrap();
        Splitter::new(SplitConfig {
            input,
            output_dir: temp.path().to_path_buf(),
        })
    }

    #[test]
    fn test_split_two_certs() {
        let segments = split_bundle(TWO_CERTS);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], Segment::new(1, "\nAAA\n"));
        assert_eq!(segments[1], Segment::new(2, "\nBBB\n"));
    }

    #[test]
    fn test_split_empty_bundle() {
        assert!(split_bundle("").is_empty());
    }

    #[test]
    fn test_split_whitespace_only_bundle() {
        assert!(split_bundle("  \n\t\n").is_empty());
    }

    #[test]
    fn test_split_drops_leading_whitespace() {
        let segments = split_bundle("\n\n-----BEGIN CERTIFICATE-----\nAAA\n");

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].index, 1);
    }

    #[test]
    fn test_split_keeps_leading_text() {
        let segments = split_bundle("subject=CN=Root\n-----BEGIN CERTIFICATE-----\nAAA\n");

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], Segment::new(0, "subject=CN=Root\n"));
        assert_eq!(segments[0].file_name(), "cert-00.cer");
        assert_eq!(segments[1].index, 1);
    }

    #[test]
    fn test_split_keeps_gap_for_empty_middle_fragment() {
        let bundle = "-----BEGIN CERTIFICATE-----\nAAA\n-----BEGIN CERTIFICATE-----  \n-----BEGIN CERTIFICATE-----\nCCC\n";
        let indices: Vec<usize> = split_bundle(bundle).iter().map(|s| s.index).collect();

        assert_eq!(indices, vec![1, 3]);
    }

    #[test]
    fn test_split_body_is_untrimmed() {
        let bundle = "-----BEGIN CERTIFICATE-----\nAAA\n-----END CERTIFICATE-----\n\n";
        let segments = split_bundle(bundle);

        assert_eq!(segments[0].body, "\nAAA\n-----END CERTIFICATE-----\n\n");
    }

    #[test]
    fn test_run_writes_files() {
        let temp = TempDir::new().unwrap();
        let report = splitter_in(&temp, TWO_CERTS).run().unwrap();

        assert_eq!(report.count(), 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("cert-01.cer")).unwrap(),
            "-----BEGIN CERTIFICATE-----\nAAA\n"
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("cert-02.cer")).unwrap(),
            "-----BEGIN CERTIFICATE-----\nBBB\n"
        );
        assert!(!temp.path().join("cert-00.cer").exists());
    }

    #[test]
    fn test_run_reports_in_processing_order() {
        let temp = TempDir::new().unwrap();
        let mut created = Vec::new();
        splitter_in(&temp, TWO_CERTS)
            .run_with(|file| {
                created.push(format!("Created {}", file.file_name));
                Ok(())
            })
            .unwrap();

        assert_eq!(created, vec!["Created cert-01.cer", "Created cert-02.cer"]);
    }

    #[test]
    fn test_written_file_metadata() {
        let temp = TempDir::new().unwrap();
        let report = splitter_in(&temp, TWO_CERTS).run().unwrap();
        let first = &report.files[0];

        assert_eq!(first.index, 1);
        assert_eq!(first.path, temp.path().join("cert-01.cer"));
        assert_eq!(first.bytes, "-----BEGIN CERTIFICATE-----\nAAA\n".len());
    }

    #[test]
    fn test_run_missing_input() {
        let temp = TempDir::new().unwrap();
        let splitter = Splitter::new(SplitConfig {
            input: temp.path().join("missing.pem"),
            output_dir: temp.path().to_path_buf(),
        });

        let err = splitter.run().unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read bundle"));
    }

    #[test]
    fn test_run_missing_output_dir() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("all_certs.pem");
        fs::write(&input, TWO_CERTS).unwrap();
        let splitter = Splitter::new(SplitConfig {
            input,
            output_dir: temp.path().join("does-not-exist"),
        });

        let mut created = 0;
        let err = splitter
            .run_with(|_| {
                created += 1;
                Ok(())
            })
            .unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to write"));
        assert_eq!(created, 0);
    }
}
