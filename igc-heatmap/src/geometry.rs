use std::fmt;

use crate::error::ProjectionError;

// --------------------------------------------------------------------------
// CoordGeo

/// Geographic point in decimal degrees (WGS84).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoordGeo {
    pub latitude: f64,
    pub longitude: f64,
}

impl CoordGeo {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for CoordGeo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ latitude: {}, longitude: {} }}", self.latitude, self.longitude)
    }
}


// --------------------------------------------------------------------------
// Coord2D

/// Point in the grid's projected (planar) coordinate system.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coord2D {
    pub x: f64,
    pub y: f64,
}

impl Coord2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ x: {}, y: {}}}", self.x, self.y)
    }
}


// --------------------------------------------------------------------------
// Projection

/// Maps a point from one coordinate system into another. A failure only
/// concerns the one point passed in.
pub trait Projection<From, To> {
    fn project(&self, input: &From) -> Result<To, ProjectionError>;
}

impl<F> Projection<CoordGeo, Coord2D> for F
where
    F: Fn(&CoordGeo) -> Result<Coord2D, ProjectionError>,
{
    fn project(&self, input: &CoordGeo) -> Result<Coord2D, ProjectionError> {
        self(input)
    }
}

/// Swiss LV95 (EPSG:2056) via the swisstopo approximate formulas.
/// Accurate to about one metre inside Switzerland.
#[derive(Copy, Clone, Debug, Default)]
pub struct Lv95Projection;

impl Projection<CoordGeo, Coord2D> for Lv95Projection {
    fn project(&self, input: &CoordGeo) -> Result<Coord2D, ProjectionError> {
        let CoordGeo { latitude, longitude } = *input;
        let fail = |reason| ProjectionError { latitude, longitude, reason };
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(fail("non-finite coordinate"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(fail("latitude out of range"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(fail("longitude out of range"));
        }

        // Auxiliary values: arc seconds relative to Bern, in units of 10000"
        let phi = (latitude * 3600.0 - 169_028.66) / 10_000.0;
        let lambda = (longitude * 3600.0 - 26_782.5) / 10_000.0;

        let east = 2_600_072.37 + 211_455.93 * lambda
            - 10_938.51 * lambda * phi
            - 0.36 * lambda * phi.powi(2)
            - 44.54 * lambda.powi(3);
        let north = 1_200_147.07 + 308_807.95 * phi
            + 3_745.25 * lambda.powi(2)
            + 76.63 * phi.powi(2)
            - 194.56 * lambda.powi(2) * phi
            + 119.79 * phi.powi(3);

        Ok(Coord2D { x: east, y: north })
    }
}
