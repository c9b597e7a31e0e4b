use crate::grid::{CellIndex, GridGeometry};

/// Dense 2-D field of `width * height` cells, stored row by row
/// (`j * width + i`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

/// Cells visited by a single track.
pub type OccupancyGrid = Field<bool>;

/// Per-cell number of tracks passing through.
pub type SumField = Field<u32>;

impl<T: Copy + Default> Field<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }

    /// Field shaped like `geometry`, every cell at its default value.
    pub fn for_geometry(geometry: &GridGeometry) -> Self {
        Self::new(geometry.nb_elem_x(), geometry.nb_elem_y())
    }

    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[j * self.width + i]
    }

    pub fn set(&mut self, i: usize, j: usize, value: T) {
        self.data[j * self.width + i] = value;
    }

    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|v| *v = value);
    }
}

impl<T> Field<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }
}

impl OccupancyGrid {
    pub fn mark(&mut self, cell: CellIndex) {
        self.set(cell.i, cell.j, true);
    }

    pub fn is_marked(&self, cell: CellIndex) -> bool {
        self.get(cell.i, cell.j)
    }

    /// Number of cells set to `true`.
    pub fn active_cells(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

impl SumField {
    pub fn max_value(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Number of cells with a non-zero count.
    pub fn active_cells(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_field_is_default_filled() {
        let grid = OccupancyGrid::new(3, 2);
        assert_eq!(grid.shape(), (3, 2));
        assert_eq!(grid.active_cells(), 0);
        assert!(grid.values().all(|v| !v));
    }

    #[test]
    fn cells_are_addressed_by_column_and_row() {
        let mut sum = SumField::new(3, 2);
        sum.set(2, 0, 7);
        sum.set(0, 1, 3);
        assert_eq!(sum.get(2, 0), 7);
        assert_eq!(sum.get(0, 1), 3);
        assert_eq!(sum.get(1, 1), 0);
        assert_eq!(sum.max_value(), 7);
        assert_eq!(sum.active_cells(), 2);
    }

    #[test]
    fn marking_is_idempotent() {
        let mut grid = OccupancyGrid::new(2, 2);
        let cell = CellIndex { i: 1, j: 0 };
        grid.mark(cell);
        grid.mark(cell);
        assert!(grid.is_marked(cell));
        assert_eq!(grid.active_cells(), 1);
    }

    #[test]
    fn empty_sum_field_has_zero_max() {
        assert_eq!(SumField::new(4, 4).max_value(), 0);
    }
}
