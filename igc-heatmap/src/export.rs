use std::fmt;
use std::io::{self, Write};

use crate::field::SumField;
use crate::grid::GridGeometry;

/// One exported cell: its origin in projected coordinates and its count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct XyzRecord {
    pub x: i64,
    pub y: i64,
    pub count: u32,
}

impl fmt::Display for XyzRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.x, self.y, self.count)
    }
}

/// Every cell of `sum`, `i` outer and `j` inner, as expected by GIS XYZ
/// raster readers.
pub fn export<'a>(
    geometry: &'a GridGeometry,
    sum: &'a SumField,
) -> impl Iterator<Item = XyzRecord> + 'a {
    let (width, height) = sum.shape();
    (0..width).flat_map(move |i| {
        (0..height).map(move |j| {
            let origin = geometry.cell_to_projected(i, j);
            XyzRecord {
                x: origin.x as i64,
                y: origin.y as i64,
                count: sum.get(i, j),
            }
        })
    })
}

/// Writes one tab-separated line per record. Returns the number of lines.
pub fn write_xyz<W, I>(out: &mut W, records: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = XyzRecord>,
{
    let mut lines = 0;
    for record in records {
        writeln!(out, "{}", record)?;
        lines += 1;
    }
    out.flush()?;
    Ok(lines)
}
