//! # ismread - Zahner Thales ISM File Reader
//!
//! `ismread` decodes the proprietary binary `.ism` format written by Zahner
//! Thales impedance-spectroscopy instruments into in-memory measurement
//! arrays ready for further analysis.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ismread::IsmRecord;
//!
//! let record = IsmRecord::open("measurement.ism")?;
//!
//! println!("measured on {}", record.measurement_date());
//! println!("{} samples, sweep ends {}", record.element_count(),
//!     record.measurement_end_datetime());
//!
//! // Trimmed views: the overlapping head of the sweep is dropped and the
//! // remaining samples are returned final-sample-first.
//! for (f, z) in record
//!     .frequency_array()
//!     .iter()
//!     .zip(record.complex_impedance_array())
//! {
//!     println!("{f:.3} Hz -> {z}");
//! }
//! # Ok::<(), ismread::IsmError>(())
//! ```
//!
//! ## Format Layout
//!
//! All multi-byte values are big-endian. With `n` = element count:
//!
//! | Offset | Size | Content |
//! |--------|------|---------|
//! | 0 | 6 | format marker, uninterpreted |
//! | 6 | 6 | signed integer; element count = value + 1 |
//! | 12 | 8 × n | frequency, f64 per sample (Hz) |
//! | .. | 8 × n | impedance magnitude, f64 per sample (Ohm) |
//! | .. | 8 × n | phase, f64 per sample (radians) |
//! | .. | 8 × n | time offset, f64 per sample (seconds from 1980-01-01) |
//! | .. | 2 × n | significance flag, i16 per sample |
//! | .. | 2 | signed length `L` of the date field |
//! | .. | L | date field; first 6 bytes are ASCII `DDMMYY` |
//!
//! ## Sweep Trimming
//!
//! The instrument sweeps frequency monotonically in one direction, reaches a
//! turning point, then sweeps back over an overlapping range. The decoder
//! locates the reversal and the `*_array()` accessors expose only the
//! non-overlapping portion from the reversal point to the final sample, as
//! the exact reversal of that tail. The untrimmed arrays remain available
//! through the `raw_*()` accessors.

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

mod decode;
mod sweep;
mod time;

pub mod error;
pub mod record;

pub use error::IsmError;
pub use record::IsmRecord;
pub use time::{ism_epoch, CENTURY_PIVOT};
