use palette::{FromColor, Hsv, Srgb};

use crate::field::{OccupancyGrid, SumField};

/// Hue at the top of the ramp, in degrees. The ramp runs from red (0°) at a
/// count of one up to this hue at the max occurrence.
const HUE_SPAN_DEGREES: f32 = 120.0;

pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Image-ordered pixel buffer: row 0 is the top (northern) edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid<P> {
    width: usize,
    height: usize,
    pixels: Vec<P>,
}

/// RGBA pixels, straight alpha.
pub type RgbaImage = PixelGrid<[u8; 4]>;

/// One bit per pixel, `true` meaning black.
pub type MaskImage = PixelGrid<bool>;

impl<P: Copy> PixelGrid<P> {
    fn filled(width: usize, height: usize, value: P) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at column `x`, row `y` (counted from the top).
    pub fn pixel(&self, x: usize, y: usize) -> P {
        self.pixels[y * self.width + x]
    }

    /// Pixels row by row, top row first.
    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    /// Writes grid cell `(i, j)`; rows are flipped so that increasing y
    /// (north) moves up the image.
    fn put_cell(&mut self, i: usize, j: usize, value: P) {
        let row = self.height - j - 1;
        self.pixels[row * self.width + i] = value;
    }
}

impl RgbaImage {
    /// Flat `RGBARGBA...` buffer for encoders.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }
}

/// Position of `count` on the logarithmic colour ramp, in `[0, 1]`.
/// Only meaningful for `1 <= count <= max_occurrence`.
pub fn ramp_position(count: u32, max_occurrence: u32) -> f32 {
    if max_occurrence <= 1 {
        // ln(1) / ln(1) is undefined; a lone track is the top of the ramp
        return 1.0;
    }
    let c = (count as f64).ln() / (max_occurrence as f64).ln();
    c.clamp(0.0, 1.0) as f32
}

/// Colour for one cell of the sum field. Empty cells are transparent.
pub fn heat_color(count: u32, max_occurrence: u32) -> [u8; 4] {
    if count == 0 {
        return TRANSPARENT;
    }
    let c = ramp_position(count, max_occurrence);
    let hsv = Hsv::new_srgb(c * HUE_SPAN_DEGREES, 0.5 + c * 0.5, 1.0);
    let rgb: Srgb<u8> = Srgb::<f32>::from_color(hsv).into_format();
    [rgb.red, rgb.green, rgb.blue, u8::MAX]
}

/// False-colour rendering of a finalized sum field.
pub fn render_heat(sum: &SumField, max_occurrence: u32) -> RgbaImage {
    let (width, height) = sum.shape();
    let mut image = RgbaImage::filled(width, height, TRANSPARENT);
    for i in 0..width {
        for j in 0..height {
            let count = sum.get(i, j);
            if count > 0 {
                image.put_cell(i, j, heat_color(count, max_occurrence));
            }
        }
    }
    image
}

/// Black-on-white silhouette of a single track.
pub fn render_mask(grid: &OccupancyGrid) -> MaskImage {
    let (width, height) = grid.shape();
    let mut image = MaskImage::filled(width, height, false);
    for i in 0..width {
        for j in 0..height {
            if grid.get(i, j) {
                image.put_cell(i, j, true);
            }
        }
    }
    image
}
