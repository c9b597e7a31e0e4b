use tracing::{info, span, Level};

use crate::error::RasterError;
use crate::field::{OccupancyGrid, SumField};
use crate::grid::GridGeometry;

/// Result of a `finalize_sum` pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SumStats {
    pub tracks: usize,
    pub max_occurrence: u32,
    pub active_cells: usize,
}

/// Collects per-track occupancy grids and counts, per cell, how many of
/// them passed through it.
///
/// Two phases: `add` every track, then `finalize_sum`. The sum field and
/// max occurrence are only readable after a finalize that happened after
/// the last `add`.
#[derive(Debug)]
pub struct RasterAccumulator {
    geometry: GridGeometry,
    grids: Vec<OccupancyGrid>,
    sum: SumField,
    max_occurrence: u32,
    finalized: bool,
}

impl RasterAccumulator {
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            geometry,
            grids: Vec::new(),
            sum: SumField::for_geometry(&geometry),
            max_occurrence: 0,
            finalized: false,
        }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Takes ownership of a track's grid. Invalidates any previous sum.
    pub fn add(&mut self, grid: OccupancyGrid) -> Result<(), RasterError> {
        if grid.shape() != self.geometry.shape() {
            return Err(RasterError::ShapeMismatch {
                expected: self.geometry.shape(),
                actual: grid.shape(),
            });
        }
        self.grids.push(grid);
        self.finalized = false;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    pub fn grids(&self) -> &[OccupancyGrid] {
        &self.grids
    }

    /// Recomputes the sum field and max occurrence from every stored grid.
    pub fn finalize_sum(&mut self) -> SumStats {
        let _span = span!(Level::DEBUG, "finalize_sum", tracks = self.grids.len()).entered();

        let (width, height) = self.geometry.shape();
        let mut max_occurrence = 0;
        for j in 0..height {
            for i in 0..width {
                let count = self.grids.iter().filter(|g| g.get(i, j)).count() as u32;
                self.sum.set(i, j, count);
                max_occurrence = max_occurrence.max(count);
            }
        }
        self.max_occurrence = max_occurrence;
        self.finalized = true;

        let stats = SumStats {
            tracks: self.grids.len(),
            max_occurrence,
            active_cells: self.sum.active_cells(),
        };
        info!(
            "Combined {} rasters: max occurrence {}, {} active cells",
            stats.tracks, stats.max_occurrence, stats.active_cells
        );
        stats
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn sum_field(&self) -> Result<&SumField, RasterError> {
        self.ensure_finalized()?;
        Ok(&self.sum)
    }

    pub fn max_occurrence(&self) -> Result<u32, RasterError> {
        self.ensure_finalized()?;
        Ok(self.max_occurrence)
    }

    fn ensure_finalized(&self) -> Result<(), RasterError> {
        if self.finalized {
            Ok(())
        } else {
            Err(RasterError::InvalidState("sum field queried before finalize_sum"))
        }
    }
}
