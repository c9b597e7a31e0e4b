use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

use igc_heatmap::output::{save_world_file, save_xyz, write_heat_png};
use igc_heatmap::{
    export, read_track, render_heat, CellIndex, Coord2D, CoordGeo, Extent, GridGeometry,
    Lv95Projection, ProjectionError, RasterAccumulator, TrackRasterizer, TrackStream,
};

fn planar(p: &CoordGeo) -> Result<Coord2D, ProjectionError> {
    Ok(Coord2D::new(p.longitude, p.latitude))
}

fn at(x: f64, y: f64) -> CoordGeo {
    CoordGeo::new(y, x)
}

#[test]
fn two_tracks_on_a_four_by_four_grid() {
    let extent = Extent { x_min: 0, y_min: 0, x_max: 4, y_max: 4 };
    let geometry = GridGeometry::with_extent(extent, 1).unwrap();
    assert_eq!(geometry.shape(), (4, 4));

    let rasterizer = TrackRasterizer::new(&geometry, planar);
    let mut accumulator = RasterAccumulator::new(geometry);

    let track_a = [at(0.5, 0.5), at(1.2, 1.7), at(1.8, 1.1)];
    let track_b = [at(1.5, 1.5), at(9.0, 9.0)];
    accumulator.add(rasterizer.rasterize(&track_a)).unwrap();
    accumulator.add(rasterizer.rasterize(&track_b)).unwrap();
    let stats = accumulator.finalize_sum();

    let sum = accumulator.sum_field().unwrap();
    assert_eq!(sum.get(1, 1), 2);
    assert_eq!(sum.get(0, 0), 1);
    assert_eq!(sum.active_cells(), 2);
    assert_eq!(stats.max_occurrence, 2);
    assert_eq!(accumulator.max_occurrence().unwrap(), 2);

    let records: Vec<_> = export(&geometry, sum).collect();
    assert_eq!(records.len(), 16);
    let busiest = records.iter().find(|r| r.count == 2).unwrap();
    assert_eq!((busiest.x, busiest.y), (1, 1));
    assert_eq!(busiest.to_string(), "1\t1\t2");

    let heat = render_heat(sum, stats.max_occurrence);
    assert_eq!(heat.pixel(1, 2), [0, 255, 0, 255]);
    assert_eq!(heat.pixel(3, 3), [0, 0, 0, 0]);
}

#[test]
fn compressed_igc_files_end_to_end() {
    let dir = tempfile::tempdir().unwrap();

    // Around Bern, a few hundred metres apart
    let log = "AXCS00001\n\
HFDTE010722\n\
B1200004657100N00726350EA0055000600\n\
B1200104657200N00726500EA0055500605\n\
B1200204657400N00726700EA0056000610\n";
    let igc_path = dir.path().join("flight.igc.gz");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(log.as_bytes()).unwrap();
    std::fs::write(&igc_path, encoder.finish().unwrap()).unwrap();

    let track = read_track(TrackStream::from_file(&igc_path).unwrap()).unwrap();
    assert_eq!(track.points.len(), 3);

    let geometry = GridGeometry::new(1000).unwrap();
    let rasterizer = TrackRasterizer::new(&geometry, Lv95Projection);
    let mut accumulator = RasterAccumulator::new(geometry);
    let (grid, stats) = rasterizer.rasterize_with_stats(&track.points);
    assert_eq!(stats.out_of_extent, 0);
    // Just north-east of the LV95 origin (2 600 000, 1 200 000): cell (150, 150)
    assert!(grid.is_marked(CellIndex { i: 150, j: 150 }));
    accumulator.add(grid.clone()).unwrap();
    accumulator.add(grid).unwrap();
    let summary = accumulator.finalize_sum();
    assert_eq!(summary.max_occurrence, 2);

    let sum = accumulator.sum_field().unwrap();
    let png = dir.path().join("heat.png");
    write_heat_png(&png, &render_heat(sum, summary.max_occurrence)).unwrap();
    let pgw = save_world_file(&png, &geometry).unwrap();
    let xyz = dir.path().join("heat.xyz");
    let lines = save_xyz(&xyz, &geometry, sum).unwrap();

    assert!(png.exists());
    assert_eq!(std::fs::read_to_string(pgw).unwrap().lines().count(), 6);
    assert_eq!(lines, 400 * 260);
}
