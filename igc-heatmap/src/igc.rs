//! Reading positions out of IGC flight logs.
//!
//! Only `B` (fix) records carry positions:
//!
//! ```text
//! B HHMMSS DDMMmmm N DDDMMmmm E V PPPPP GGGGG
//! B 110135 5206343 N 00006198 W A 00587 00558
//! ```
//!
//! Every other record type is ignored. Lines are handled as raw bytes since
//! header records are frequently not valid UTF-8.

use std::io::BufRead;

use tracing::{debug, span, Level};

use crate::error::IgcError;
use crate::geometry::CoordGeo;

const MIN_FIX_LEN: usize = 25;

/// Positions read from one flight log.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IgcTrack {
    pub points: Vec<CoordGeo>,
    /// `B` records that could not be decoded and were skipped.
    pub malformed_fixes: usize,
}

/// Iterator over the fixes of an IGC stream. Yields one item per `B`
/// record; malformed records come out as `IgcError::MalformedFix` without
/// ending the iteration.
pub struct IgcReader<R: BufRead> {
    stream: R,
    line: usize,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> IgcReader<R> {
    pub fn new(stream: R) -> Self {
        Self {
            stream,
            line: 0,
            buf: Vec::with_capacity(80),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for IgcReader<R> {
    type Item = Result<CoordGeo, IgcError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.stream.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line += 1;
                    let record = trim_line_end(&self.buf);
                    if record.first() != Some(&b'B') {
                        continue;
                    }
                    return Some(parse_fix(record).map_err(|reason| IgcError::MalformedFix {
                        line: self.line,
                        reason,
                    }));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(IgcError::Io(e)));
                }
            }
        }
        None
    }
}

/// Reads every fix of a track. Malformed fixes are counted and skipped;
/// an I/O error aborts the track.
pub fn read_track<R: BufRead>(stream: R) -> Result<IgcTrack, IgcError> {
    let _span = span!(Level::DEBUG, "read_track").entered();

    let mut track = IgcTrack::default();
    for fix in IgcReader::new(stream) {
        match fix {
            Ok(point) => track.points.push(point),
            Err(IgcError::MalformedFix { line, reason }) => {
                debug!("Skipping malformed fix on line {}: {}", line, reason);
                track.malformed_fixes += 1;
            }
            Err(e) => return Err(e),
        }
    }
    debug!("Read {} fixes ({} malformed)", track.points.len(), track.malformed_fixes);
    Ok(track)
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    while end > 0 && matches!(line[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    &line[..end]
}

/// Decodes the position of a single `B` record.
pub fn parse_fix(record: &[u8]) -> Result<CoordGeo, &'static str> {
    if record.len() < MIN_FIX_LEN {
        return Err("record too short");
    }
    let latitude = parse_angle(&record[7..9], &record[9..14], 90)
        .ok_or("invalid latitude digits")?;
    let latitude = match record[14] {
        b'N' => latitude,
        b'S' => -latitude,
        _ => return Err("latitude hemisphere must be N or S"),
    };
    let longitude = parse_angle(&record[15..18], &record[18..23], 180)
        .ok_or("invalid longitude digits")?;
    let longitude = match record[23] {
        b'E' => longitude,
        b'W' => -longitude,
        _ => return Err("longitude hemisphere must be E or W"),
    };
    if !matches!(record[24], b'A' | b'V') {
        return Err("fix validity must be A or V");
    }
    Ok(CoordGeo { latitude, longitude })
}

/// `degrees` whole degrees plus `milli_minutes` thousandths of a minute.
fn parse_angle(degrees: &[u8], milli_minutes: &[u8], max_degrees: u32) -> Option<f64> {
    let degrees = parse_digits(degrees)?;
    let milli_minutes = parse_digits(milli_minutes)?;
    if milli_minutes >= 60_000 {
        return None;
    }
    let angle = degrees as f64 + milli_minutes as f64 / 60_000.0;
    if angle > max_degrees as f64 {
        return None;
    }
    Some(angle)
}

fn parse_digits(digits: &[u8]) -> Option<u32> {
    digits.iter().try_fold(0u32, |acc, &d| {
        if d.is_ascii_digit() {
            Some(acc * 10 + (d - b'0') as u32)
        } else {
            None
        }
    })
}
