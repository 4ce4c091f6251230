//! certsplit: split a concatenated PEM bundle into per-certificate files
//!
//! A bundle such as `all_certs.pem` is cut on every
//! `-----BEGIN CERTIFICATE-----` header. Each non-empty piece is written,
//! header restored, to `cert-NN.cer` where `NN` is its position in the split.
//!
//! # Example Usage
//!
//! ```no_run
//! use certsplit::{SplitConfig, Splitter};
//!
//! let splitter = Splitter::new(SplitConfig::default());
//! let report = splitter.run().unwrap();
//!
//! for file in &report.files {
//!     println!("Created {}", file.file_name);
//! }
//! ```

pub mod cli;
pub mod models;
pub mod output;
pub mod splitter;

// Re-export commonly used types
pub use models::{Segment, SplitConfig, SplitReport, WrittenFile};
pub use splitter::{BEGIN_CERTIFICATE, Splitter, split_bundle};
