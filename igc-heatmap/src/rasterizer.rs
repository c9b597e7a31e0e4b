use tracing::{debug, span, trace, Level};

use crate::field::OccupancyGrid;
use crate::geometry::{Coord2D, CoordGeo, Projection};
use crate::grid::GridGeometry;

/// What happened to the points of one track.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackStats {
    pub points: usize,
    pub projection_failures: usize,
    pub out_of_extent: usize,
    pub active_cells: usize,
}

/// Turns tracks into occupancy grids over a fixed geometry.
///
/// Holds no mutable state; every call allocates a fresh grid, so one
/// rasterizer can serve several threads.
#[derive(Debug)]
pub struct TrackRasterizer<'g, P> {
    geometry: &'g GridGeometry,
    projection: P,
}

impl<'g, P> TrackRasterizer<'g, P>
where
    P: Projection<CoordGeo, Coord2D>,
{
    pub fn new(geometry: &'g GridGeometry, projection: P) -> Self {
        Self { geometry, projection }
    }

    pub fn geometry(&self) -> &GridGeometry {
        self.geometry
    }

    pub fn rasterize<'a, I>(&self, track: I) -> OccupancyGrid
    where
        I: IntoIterator<Item = &'a CoordGeo>,
    {
        self.rasterize_with_stats(track).0
    }

    /// Marks the cell of every point that projects into the grid. Points
    /// that fail to project or land outside the extent are skipped.
    pub fn rasterize_with_stats<'a, I>(&self, track: I) -> (OccupancyGrid, TrackStats)
    where
        I: IntoIterator<Item = &'a CoordGeo>,
    {
        let _span = span!(Level::DEBUG, "rasterize").entered();

        let mut grid = OccupancyGrid::for_geometry(self.geometry);
        let mut stats = TrackStats::default();

        for point in track {
            stats.points += 1;
            let projected = match self.projection.project(point) {
                Ok(p) => p,
                Err(e) => {
                    trace!("Skipping point: {}", e);
                    stats.projection_failures += 1;
                    continue;
                }
            };
            match self.geometry.cell_index_of(&projected) {
                Some(cell) => grid.mark(cell),
                None => stats.out_of_extent += 1,
            }
        }

        stats.active_cells = grid.active_cells();
        debug!(
            "Rasterized {} points: {} active cells, {} outside extent, {} projection failures",
            stats.points, stats.active_cells, stats.out_of_extent, stats.projection_failures
        );
        (grid, stats)
    }
}
