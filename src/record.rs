//! The decoded measurement record and its accessor views.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use num_complex::Complex64;

use crate::decode;
use crate::error::IsmError;
use crate::sweep;
use crate::time;

/// A fully decoded ISM measurement.
///
/// Holds five parallel per-sample arrays plus the derived date, timestamps
/// and sweep shape. Everything is decoded eagerly in a single pass over the
/// input bytes; the record is immutable afterwards and safe to share
/// read-only across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct IsmRecord {
    element_count: usize,
    frequency: Vec<f64>,
    impedance: Vec<f64>,
    phase: Vec<f64>,
    time_offsets: Vec<f64>,
    significance: Vec<i16>,
    measurement_date: NaiveDate,
    timestamps: Vec<NaiveDateTime>,
    first_up: bool,
    reverse_index: Option<usize>,
}

impl IsmRecord {
    /// Decode an ISM file from disk.
    ///
    /// The file is read in full and released before decoding; it is closed
    /// on every exit path, success or error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, IsmError> {
        let path = path.as_ref();
        let mut bytes = Vec::new();
        File::open(path)?.read_to_end(&mut bytes)?;
        debug!("read {} bytes from {}", bytes.len(), path.display());
        Self::from_bytes(&bytes)
    }

    /// Decode an ISM measurement from an in-memory byte buffer.
    ///
    /// Decoding is all-or-nothing: on any error no partial record is
    /// returned.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IsmError> {
        let raw = decode::decode_raw(bytes)?;
        let measurement_date = time::decode_date(&raw.date_field)?;
        let timestamps = raw
            .time_offsets
            .iter()
            .map(|&t| time::decode_timestamp(t))
            .collect();
        let shape = sweep::analyze(&raw.frequency);
        debug!(
            "sweep starts {}, reversal at {:?}",
            if shape.first_up { "up" } else { "down" },
            shape.reverse_index
        );

        Ok(Self {
            element_count: raw.element_count,
            frequency: raw.frequency,
            impedance: raw.impedance,
            phase: raw.phase,
            time_offsets: raw.time_offsets,
            significance: raw.significance,
            measurement_date,
            timestamps,
            first_up: shape.first_up,
            reverse_index: shape.reverse_index,
        })
    }

    /// Number of samples in the measurement.
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Calendar date of the measurement, decoded from the file header.
    pub fn measurement_date(&self) -> NaiveDate {
        self.measurement_date
    }

    /// Whether the sweep starts ascending (sample 0 to sample 1).
    pub fn first_up(&self) -> bool {
        self.first_up
    }

    /// Index of the last sample before the sweep reverses direction, or
    /// `None` if the sweep never turns.
    pub fn reverse_index(&self) -> Option<usize> {
        self.reverse_index
    }

    /// Frequency points between the reversal point and the final sample
    /// (Hz), ordered from the final sample back to the reversal point.
    pub fn frequency_array(&self) -> Vec<f64> {
        self.reversed_tail(&self.frequency)
    }

    /// Impedance magnitudes between the reversal point and the final
    /// sample (Ohm), aligned with [`IsmRecord::frequency_array`].
    pub fn impedance_array(&self) -> Vec<f64> {
        self.reversed_tail(&self.impedance)
    }

    /// Phase values between the reversal point and the final sample
    /// (radians), aligned with [`IsmRecord::frequency_array`].
    pub fn phase_array(&self) -> Vec<f64> {
        self.reversed_tail(&self.phase)
    }

    /// Significance flags between the reversal point and the final
    /// sample, aligned with [`IsmRecord::frequency_array`].
    pub fn significance_array(&self) -> Vec<i16> {
        self.reversed_tail(&self.significance)
    }

    /// Sample timestamps between the reversal point and the final sample,
    /// aligned with [`IsmRecord::frequency_array`].
    ///
    /// The smallest timestamp in this view is the reversal point; the
    /// start of the measurement is excluded because the overlapping head
    /// of the sweep is dropped.
    pub fn measurement_datetime_array(&self) -> Vec<NaiveDateTime> {
        self.reversed_tail(&self.timestamps)
    }

    /// End of the measurement: the maximum over the full, untrimmed
    /// timestamp sequence.
    ///
    /// Deliberately not restricted to the trimmed view; the end time is
    /// well-defined even for samples dropped by the trim.
    pub fn measurement_end_datetime(&self) -> NaiveDateTime {
        self.timestamps
            .iter()
            .copied()
            .max()
            .unwrap_or_else(time::ism_epoch)
    }

    /// Complex impedance between the reversal point and the final sample,
    /// aligned with [`IsmRecord::frequency_array`].
    ///
    /// Each value is synthesized from the trimmed magnitude/phase pair:
    /// `|Z| * cos(phi) + j * |Z| * sin(phi)`.
    pub fn complex_impedance_array(&self) -> Vec<Complex64> {
        self.impedance_array()
            .iter()
            .zip(self.phase_array())
            .map(|(&magnitude, phi)| Complex64::from_polar(magnitude, phi))
            .collect()
    }

    /// Raw frequency array in instrument-scan order (untrimmed).
    pub fn raw_frequency(&self) -> &[f64] {
        &self.frequency
    }

    /// Raw impedance magnitude array in instrument-scan order (untrimmed).
    pub fn raw_impedance(&self) -> &[f64] {
        &self.impedance
    }

    /// Raw phase array in instrument-scan order (untrimmed).
    pub fn raw_phase(&self) -> &[f64] {
        &self.phase
    }

    /// Raw per-sample time offsets in seconds from the epoch. Signs are as
    /// stored in the file; timestamps use their magnitude.
    pub fn raw_time_offsets(&self) -> &[f64] {
        &self.time_offsets
    }

    /// Raw significance flags in instrument-scan order (untrimmed).
    pub fn raw_significance(&self) -> &[i16] {
        &self.significance
    }

    /// Absolute sample timestamps in instrument-scan order (untrimmed).
    pub fn raw_timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// First index kept by the trimmed views.
    fn trim_start(&self) -> usize {
        self.reverse_index.unwrap_or(0)
    }

    fn reversed_tail<T: Copy>(&self, values: &[T]) -> Vec<T> {
        values[self.trim_start()..].iter().rev().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(frequency: Vec<f64>) -> IsmRecord {
        let n = frequency.len();
        let shape = sweep::analyze(&frequency);
        IsmRecord {
            element_count: n,
            impedance: (0..n).map(|i| 100.0 + i as f64).collect(),
            phase: (0..n).map(|i| -0.1 * i as f64).collect(),
            time_offsets: (0..n).map(|i| 10.0 * i as f64).collect(),
            significance: (0..n as i16).collect(),
            measurement_date: NaiveDate::from_ymd_opt(2021, 12, 24).unwrap(),
            timestamps: (0..n)
                .map(|i| time::decode_timestamp(10.0 * i as f64))
                .collect(),
            first_up: shape.first_up,
            reverse_index: shape.reverse_index,
            frequency,
        }
    }

    #[test]
    fn views_are_reversed_tails_from_the_reversal_point() {
        let rec = record(vec![1.0, 2.0, 3.0, 2.0]);
        assert_eq!(rec.reverse_index(), Some(2));
        assert_eq!(rec.frequency_array(), vec![2.0, 3.0]);
        assert_eq!(rec.impedance_array(), vec![103.0, 102.0]);
        assert_eq!(rec.significance_array(), vec![3, 2]);
    }

    #[test]
    fn no_reversal_yields_the_full_reversed_array() {
        let rec = record(vec![1.0, 2.0, 4.0, 8.0]);
        assert_eq!(rec.reverse_index(), None);
        assert_eq!(rec.frequency_array(), vec![8.0, 4.0, 2.0, 1.0]);
        assert_eq!(rec.frequency_array().len(), rec.element_count());
    }

    #[test]
    fn complex_values_match_magnitude_and_phase() {
        let rec = record(vec![10.0, 100.0, 1000.0, 100.0]);
        let complex = rec.complex_impedance_array();
        let magnitude = rec.impedance_array();
        let phase = rec.phase_array();

        assert_eq!(complex.len(), magnitude.len());
        for i in 0..complex.len() {
            assert!((complex[i].norm() - magnitude[i]).abs() < 1e-9);
            assert!((complex[i].arg() - phase[i]).abs() < 1e-9);
            assert!((complex[i].re - magnitude[i] * phase[i].cos()).abs() < 1e-9);
            assert!((complex[i].im - magnitude[i] * phase[i].sin()).abs() < 1e-9);
        }
    }

    #[test]
    fn end_datetime_covers_trimmed_samples() {
        let mut rec = record(vec![1.0, 2.0, 3.0, 2.0]);
        // Largest offset in the head that gets trimmed away.
        rec.time_offsets = vec![500.0, 10.0, 20.0, 30.0];
        rec.timestamps = rec
            .time_offsets
            .iter()
            .map(|&t| time::decode_timestamp(t))
            .collect();

        let end = rec.measurement_end_datetime();
        assert_eq!(end, time::decode_timestamp(500.0));
        assert!(rec.measurement_datetime_array().iter().all(|&t| t < end));
    }

    #[test]
    fn datetime_view_starts_at_the_reversal_point() {
        let rec = record(vec![1.0, 2.0, 3.0, 2.0]);
        let view = rec.measurement_datetime_array();
        assert_eq!(view.len(), 2);
        // Reversed tail: final sample first, reversal sample last. The
        // smallest timestamp in the view is the reversal point.
        assert_eq!(view[0], time::decode_timestamp(30.0));
        assert_eq!(view[1], time::decode_timestamp(20.0));
        assert_eq!(view.iter().min(), view.last());
    }
}
