//! Date and timestamp decoding for ISM files.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::IsmError;

/// Two-digit years below this pivot map to `2000 + yy`, the rest to
/// `1900 + yy`.
///
/// The format stores only the last two digits of the year, so all
/// measurements are assumed to fall between 1970 and 2069. This is a
/// documented limitation of the format, not of the decoder.
pub const CENTURY_PIVOT: u32 = 70;

/// The instant all per-sample time offsets are measured from:
/// 1980-01-01T00:00:00.
pub fn ism_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1980, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("1980-01-01 00:00:00 is a valid datetime")
}

/// Decode the header date field.
///
/// The first 6 bytes are ASCII digits in `DDMMYY` order; anything after
/// them is ignored. The two-digit year is resolved through
/// [`CENTURY_PIVOT`].
pub(crate) fn decode_date(field: &[u8]) -> Result<NaiveDate, IsmError> {
    if field.len() < 6 {
        return Err(IsmError::InvalidDate(format!(
            "date field holds {} bytes, need 6",
            field.len()
        )));
    }
    let text = std::str::from_utf8(&field[..6])
        .ok()
        .filter(|t| t.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| {
            IsmError::InvalidDate(format!("date field {:?} is not 6 ASCII digits", &field[..6]))
        })?;

    let day: u32 = parse_digits(&text[0..2])?;
    let month: u32 = parse_digits(&text[2..4])?;
    let yy: u32 = parse_digits(&text[4..6])?;
    let year = if yy < CENTURY_PIVOT { 2000 + yy } else { 1900 + yy };
    let year = year as i32;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| IsmError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
}

fn parse_digits(text: &str) -> Result<u32, IsmError> {
    text.parse()
        .map_err(|_| IsmError::InvalidDate(format!("non-numeric date component {text:?}")))
}

/// Convert a raw per-sample time value to an absolute timestamp.
///
/// The value is seconds relative to [`ism_epoch`]; its sign is discarded,
/// matching the instrument convention. Sub-second precision is kept at f64
/// resolution. The conversion is total: non-finite or out-of-range offsets
/// degrade to the epoch or a clamped maximum instead of panicking.
pub(crate) fn decode_timestamp(raw_seconds: f64) -> NaiveDateTime {
    let seconds = raw_seconds.abs();
    let whole = Duration::try_seconds(seconds.trunc() as i64).unwrap_or_else(Duration::zero);
    let frac = Duration::nanoseconds((seconds.fract() * 1e9).round() as i64);
    let offset = whole.checked_add(&frac).unwrap_or(whole);
    ism_epoch()
        .checked_add_signed(offset)
        .unwrap_or(NaiveDateTime::MAX)
}
