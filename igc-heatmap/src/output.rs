//! File encoders for rendered and exported rasters.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use tracing::{debug, info};

use crate::error::OutputError;
use crate::export::{export, write_xyz};
use crate::field::SumField;
use crate::grid::GridGeometry;
use crate::render::{MaskImage, RgbaImage};

/// Encodes a heat rendering as an RGBA PNG, keeping transparency.
pub fn write_heat_png(path: &Path, heat: &RgbaImage) -> Result<(), OutputError> {
    let (width, height) = (heat.width() as u32, heat.height() as u32);
    let bytes = heat.to_rgba_bytes();
    let len = bytes.len();
    let buffer = image::RgbaImage::from_raw(width, height, bytes)
        .ok_or(OutputError::BufferSize { len, width, height })?;
    buffer.save_with_format(path, image::ImageFormat::Png)?;
    info!("Heatmap saved to: {}", path.display());
    Ok(())
}

/// Paints a track silhouette pixel by pixel and saves it as PNG.
pub fn write_mask_png(path: &Path, mask: &MaskImage) -> Result<(), OutputError> {
    let root = BitMapBackend::new(path, (mask.width() as u32, mask.height() as u32))
        .into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.pixel(x, y) {
                root.draw_pixel((x as i32, y as i32), &BLACK).map_err(draw_error)?;
            }
        }
    }
    root.present().map_err(draw_error)?;
    debug!("Mask saved to: {}", path.display());
    Ok(())
}

fn draw_error<E>(e: DrawingAreaErrorKind<E>) -> OutputError
where
    E: std::error::Error + Send + Sync,
{
    OutputError::Draw(e.to_string())
}

/// World file (`.pgw`) placing pixel centres of an image rendered from
/// `geometry` in projected coordinates.
pub fn write_world_file<W: Write>(out: &mut W, geometry: &GridGeometry) -> std::io::Result<()> {
    let size = geometry.cell_size() as f64;
    let upper_left = geometry.upper_left_corner();
    writeln!(out, "{}", size)?;
    writeln!(out, "0")?;
    writeln!(out, "0")?;
    writeln!(out, "{}", -size)?;
    writeln!(out, "{}", upper_left.x + size / 2.0)?;
    writeln!(out, "{}", upper_left.y - size / 2.0)?;
    Ok(())
}

/// Sibling path of `image` with a `.pgw` extension.
pub fn world_file_path(image: &Path) -> PathBuf {
    image.with_extension("pgw")
}

pub fn save_world_file(image: &Path, geometry: &GridGeometry) -> Result<PathBuf, OutputError> {
    let path = world_file_path(image);
    let mut out = BufWriter::new(File::create(&path)?);
    write_world_file(&mut out, geometry)?;
    out.flush()?;
    Ok(path)
}

/// Writes the tab-separated `x y count` listing of `sum` to `path`.
pub fn save_xyz(path: &Path, geometry: &GridGeometry, sum: &SumField) -> Result<usize, OutputError> {
    let mut out = BufWriter::new(File::create(path)?);
    let lines = write_xyz(&mut out, export(geometry, sum))?;
    info!("Wrote {} cells to: {}", lines, path.display());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::OccupancyGrid;
    use crate::grid::{CellIndex, Extent};
    use crate::render::{render_heat, render_mask};

    fn toy_geometry() -> GridGeometry {
        GridGeometry::with_extent(Extent { x_min: 0, y_min: 0, x_max: 4, y_max: 4 }, 1).unwrap()
    }

    #[test]
    fn world_file_for_lv95_grid() {
        let geometry = GridGeometry::new(100).unwrap();
        let mut out = Vec::new();
        write_world_file(&mut out, &geometry).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["100", "0", "0", "-100", "2450050", "1309950"]);
    }

    #[test]
    fn world_file_sits_next_to_image() {
        assert_eq!(world_file_path(Path::new("out/heat.png")), PathBuf::from("out/heat.pgw"));
    }

    #[test]
    fn heat_png_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heat.png");
        let mut sum = SumField::new(4, 4);
        sum.set(1, 1, 3);
        write_heat_png(&path, &render_heat(&sum, 3)).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 4));
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
        // cell (1, 1) lands on image row 4 - 1 - 1
        assert_eq!(decoded.get_pixel(1, 2).0, [0, 255, 0, 255]);
    }

    #[test]
    fn mask_png_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.png");
        let mut grid = OccupancyGrid::new(4, 4);
        grid.mark(CellIndex { i: 0, j: 0 });
        write_mask_png(&path, &render_mask(&grid)).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(0, 3).0, [0, 0, 0]);
        assert_eq!(decoded.get_pixel(3, 0).0, [255, 255, 255]);
    }

    #[test]
    fn xyz_file_has_one_line_per_cell() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sum.xyz");
        let geometry = toy_geometry();
        let sum = SumField::for_geometry(&geometry);
        assert_eq!(save_xyz(&path, &geometry, &sum).unwrap(), 16);
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 16);
    }
}
