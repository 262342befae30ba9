//! # exif-shift
//!
//! Shift the EXIF date-taken of JPEG files by patching the raw bytes,
//! without re-encoding the image or rebuilding its metadata.
//!
//! The `DateTimeOriginal` field is stored as fixed-width ASCII text
//! (`YYYY:MM:DD HH:MM:SS`, 19 bytes). Moving it by whole days, hours and
//! minutes never changes the text length, so the old value can be located
//! in the raw file and overwritten in place. Segment lengths and IFD
//! offsets around it stay valid because nothing grows or shrinks; the
//! pipeline verifies that invariant and refuses to write if it would break.
//!
//! ## Quick Start
//!
//! The simplest way to use the library is through the pipeline module,
//! which handles collection, bounded concurrency, and result aggregation:
//!
//! ```rust,no_run
//! use exif_shift::config::Config;
//! use exif_shift::exif::TimeShift;
//! use exif_shift::pipeline::{apply_batch, collect_files};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Some("config.json".as_ref()))?;
//!
//!     // Collect JPEG files from paths (files or directories)
//!     let files = collect_files(&[PathBuf::from("./photos")]);
//!
//!     // Two hours forward, for a camera clock left in the wrong zone
//!     let shift = TimeShift { days: 0, hours: 2, minutes: 0 };
//!
//!     let outcome = apply_batch(&files, shift, &config).await?;
//!     println!("{}", outcome.message);
//!
//!     for result in &outcome.results {
//!         if let Some(ref err) = result.error {
//!             eprintln!("Error patching {}: {err}", result.path.display());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! For a single file, call the read and patch operations directly:
//!
//! ```rust,no_run
//! use exif_shift::exif::{apply_shift, read_date_taken, TimeShift};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let source = Path::new("photo.jpg");
//!
//!     // 1. Inspect without touching anything
//!     let original = read_date_taken(source).await?;
//!     println!("date-taken: {original}");
//!
//!     // 2. Patch a copy, one day forward
//!     let shifted = apply_shift(
//!         source,
//!         Path::new("patched.jpg"),
//!         TimeShift { days: 1, hours: 0, minutes: 0 },
//!     )
//!     .await?;
//!     println!("patched to: {shifted}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`bytes`] — Exact byte-pattern search and allocation-once replace
//! - [`config`] — Configuration types and loading/saving
//! - [`error`] — The library error type
//! - [`exif`] — Date-taken reading and the length-invariant patch
//! - [`pipeline`] — Batch application, file collection, and the run log

pub mod bytes;
pub mod config;
pub mod error;
pub mod exif;
pub mod pipeline;
