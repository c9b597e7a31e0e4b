//! Overflight heatmaps from batches of GPS flight tracks.
//!
//! Each track is rasterized onto a boolean grid covering a fixed extent,
//! the grids are summed per cell, and the sum is rendered as a false-colour
//! image or exported as an `x y count` listing.
//!
//! ```
//! use igc_heatmap::{CoordGeo, GridGeometry, Lv95Projection, RasterAccumulator, TrackRasterizer};
//!
//! let geometry = GridGeometry::new(1000).unwrap();
//! let rasterizer = TrackRasterizer::new(&geometry, Lv95Projection);
//! let mut accumulator = RasterAccumulator::new(geometry);
//!
//! let track = [CoordGeo::new(46.95, 7.44), CoordGeo::new(46.96, 7.45)];
//! accumulator.add(rasterizer.rasterize(&track)).unwrap();
//! let stats = accumulator.finalize_sum();
//! assert_eq!(stats.max_occurrence, 1);
//! ```

pub mod accumulator;
pub mod error;
pub mod export;
pub mod field;
pub mod geometry;
pub mod grid;
pub mod igc;
pub mod output;
pub mod rasterizer;
pub mod render;
pub mod track_stream;

pub use accumulator::{RasterAccumulator, SumStats};
pub use error::{IgcError, OutputError, ProjectionError, RasterError};
pub use export::{export, write_xyz, XyzRecord};
pub use field::{Field, OccupancyGrid, SumField};
pub use geometry::{Coord2D, CoordGeo, Lv95Projection, Projection};
pub use grid::{CellIndex, Extent, GridGeometry};
pub use igc::{read_track, IgcReader, IgcTrack};
pub use rasterizer::{TrackRasterizer, TrackStats};
pub use render::{render_heat, render_mask, MaskImage, PixelGrid, RgbaImage};
pub use track_stream::TrackStream;
