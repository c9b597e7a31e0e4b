use crate::error::RasterError;
use crate::geometry::Coord2D;

/// Axis-aligned bounding box in projected coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Extent {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl Extent {
    /// Coverage of Switzerland in LV95 metres.
    pub const SWITZERLAND_LV95: Extent = Extent {
        x_min: 2_450_000,
        y_min: 1_050_000,
        x_max: 2_850_000,
        y_max: 1_310_000,
    };

    pub fn width(&self) -> i64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> i64 {
        self.y_max - self.y_min
    }
}

/// Column `i` (along x) and row `j` (along y) of a grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellIndex {
    pub i: usize,
    pub j: usize,
}

/// Fixed extent divided into square cells of `cell_size` units.
///
/// Cell `(i, j)` covers `[x_min + i*cell_size, x_min + (i+1)*cell_size)` and
/// the analogous half-open range along y. Any remainder of the extent that
/// does not fill a whole cell lies outside the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    extent: Extent,
    cell_size: i64,
    nb_elem_x: usize,
    nb_elem_y: usize,
}

impl GridGeometry {
    /// Grid over the Swiss LV95 extent.
    pub fn new(cell_size: i64) -> Result<Self, RasterError> {
        Self::with_extent(Extent::SWITZERLAND_LV95, cell_size)
    }

    pub fn with_extent(extent: Extent, cell_size: i64) -> Result<Self, RasterError> {
        if cell_size <= 0 {
            return Err(RasterError::Configuration(format!(
                "cell size must be positive, got {}",
                cell_size
            )));
        }
        if extent.width() <= 0 || extent.height() <= 0 {
            return Err(RasterError::Configuration(format!(
                "extent is empty: {:?}",
                extent
            )));
        }
        let nb_elem_x = extent.width().div_euclid(cell_size);
        let nb_elem_y = extent.height().div_euclid(cell_size);
        if nb_elem_x == 0 || nb_elem_y == 0 {
            return Err(RasterError::Configuration(format!(
                "cell size {} exceeds the extent ({} x {})",
                cell_size,
                extent.width(),
                extent.height()
            )));
        }
        Ok(Self {
            extent,
            cell_size,
            nb_elem_x: nb_elem_x as usize,
            nb_elem_y: nb_elem_y as usize,
        })
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn cell_size(&self) -> i64 {
        self.cell_size
    }

    pub fn nb_elem_x(&self) -> usize {
        self.nb_elem_x
    }

    pub fn nb_elem_y(&self) -> usize {
        self.nb_elem_y
    }

    /// `(nb_elem_x, nb_elem_y)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nb_elem_x, self.nb_elem_y)
    }

    pub fn cell_count(&self) -> usize {
        self.nb_elem_x * self.nb_elem_y
    }

    /// Cell containing `point`, or `None` when the point lies outside the
    /// grid. Upper bounds are exclusive.
    pub fn cell_index_of(&self, point: &Coord2D) -> Option<CellIndex> {
        let size = self.cell_size as f64;
        let i = ((point.x - self.extent.x_min as f64) / size).floor();
        let j = ((point.y - self.extent.y_min as f64) / size).floor();
        // NaN fails both comparisons
        if !(i >= 0.0 && i < self.nb_elem_x as f64) || !(j >= 0.0 && j < self.nb_elem_y as f64) {
            return None;
        }
        Some(CellIndex {
            i: i as usize,
            j: j as usize,
        })
    }

    /// Projected coordinate of the cell's lower-left (origin) corner.
    pub fn cell_to_projected(&self, i: usize, j: usize) -> Coord2D {
        Coord2D {
            x: (self.extent.x_min + i as i64 * self.cell_size) as f64,
            y: (self.extent.y_min + j as i64 * self.cell_size) as f64,
        }
    }

    pub fn upper_left_corner(&self) -> Coord2D {
        Coord2D::new(self.extent.x_min as f64, self.extent.y_max as f64)
    }

    pub fn lower_right_corner(&self) -> Coord2D {
        Coord2D::new(self.extent.x_max as f64, self.extent.y_min as f64)
    }
}
