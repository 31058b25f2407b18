//! Binary layout decoding for ISM files.
//!
//! An ISM file is a fixed sequence of big-endian fields: a 6-byte marker, a
//! 6-byte signed element count, five parallel numeric arrays (frequency,
//! impedance, phase, time offset as f64; significance as i16) and a
//! length-prefixed date field. This module turns the byte stream into those
//! raw fields; calendar and sweep interpretation happen elsewhere.

use byteorder::{BigEndian, ByteOrder};
use log::debug;

use crate::error::IsmError;

/// Leading bytes skipped before the element count (format/version marker).
const MARKER_LEN: usize = 6;
/// Width of the big-endian signed element count field.
const COUNT_LEN: usize = 6;
/// Width of the big-endian signed date-field length.
const DATE_LEN_WIDTH: usize = 2;

/// Raw numeric fields of an ISM file, in storage order.
#[derive(Debug, Clone)]
pub(crate) struct RawIsm {
    pub element_count: usize,
    pub frequency: Vec<f64>,
    pub impedance: Vec<f64>,
    pub phase: Vec<f64>,
    pub time_offsets: Vec<f64>,
    pub significance: Vec<i16>,
    pub date_field: Vec<u8>,
}

/// Position-tracking view over the input bytes.
///
/// Every read goes through [`ByteReader::take`], so a short input always
/// surfaces as [`IsmError::TruncatedInput`] naming the field that ran dry.
struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], IsmError> {
        let available = self.buf.len() - self.pos;
        if available < len {
            return Err(IsmError::TruncatedInput {
                field,
                needed: len,
                available,
            });
        }
        let chunk = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(chunk)
    }
}

/// Decode the raw fields of an ISM byte buffer.
///
/// The format carries no checksum or magic number; beyond the element count
/// the layout is trusted structurally.
pub(crate) fn decode_raw(bytes: &[u8]) -> Result<RawIsm, IsmError> {
    let mut reader = ByteReader::new(bytes);

    reader.take(MARKER_LEN, "format marker")?;

    let raw_count = BigEndian::read_int(reader.take(COUNT_LEN, "element count")?, COUNT_LEN);
    if raw_count < 0 {
        return Err(IsmError::InvalidCount(raw_count));
    }
    let element_count = raw_count as usize + 1;
    debug!("decoding ISM data with {element_count} samples");

    let frequency = read_f64_array(&mut reader, element_count, "frequency array")?;
    let impedance = read_f64_array(&mut reader, element_count, "impedance array")?;
    let phase = read_f64_array(&mut reader, element_count, "phase array")?;
    let time_offsets = read_f64_array(&mut reader, element_count, "time array")?;
    let significance = read_i16_array(&mut reader, element_count, "significance array")?;

    let date_len = BigEndian::read_i16(reader.take(DATE_LEN_WIDTH, "date field length")?);
    if date_len < 0 {
        return Err(IsmError::InvalidDate(format!(
            "negative date field length {date_len}"
        )));
    }
    let date_field = reader.take(date_len as usize, "date field")?.to_vec();

    Ok(RawIsm {
        element_count,
        frequency,
        impedance,
        phase,
        time_offsets,
        significance,
        date_field,
    })
}

fn read_f64_array(
    reader: &mut ByteReader<'_>,
    count: usize,
    field: &'static str,
) -> Result<Vec<f64>, IsmError> {
    let chunk = reader.take(count * 8, field)?;
    Ok(chunk.chunks_exact(8).map(BigEndian::read_f64).collect())
}

fn read_i16_array(
    reader: &mut ByteReader<'_>,
    count: usize,
    field: &'static str,
) -> Result<Vec<i16>, IsmError> {
    let chunk = reader.take(count * 2, field)?;
    Ok(chunk.chunks_exact(2).map(BigEndian::read_i16).collect())
}
