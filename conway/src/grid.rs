// grid.rs - Dense fixed-size grid for Conway's Game of Life

use std::ops::{Index, IndexMut};
use thiserror::Error;

/// Moore neighborhood offsets, `dy` outer and `dx` inner, center skipped.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds { x: i32, y: i32, width: u32, height: u32 },
}

/// Integer grid position. Signed so callers can compute offsets left of or
/// above the grid before placing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Row-major 2D array sized once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseGrid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T: Clone> DenseGrid<T> {
    pub fn new(width: u32, height: u32, default: T) -> Self {
        let len = width as usize * height as usize;
        Self { width, height, cells: vec![default; len] }
    }
}

impl<T> DenseGrid<T> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Row-major index of `(x, y)`, or `None` when either axis is out of range.
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y)
            .then(|| x as usize + self.width as usize * y as usize)
    }

    /// Inverse of [`index_of`](Self::index_of). `index` must be below `len()`.
    pub fn pos_of(&self, index: usize) -> Pos {
        let width = self.width as usize;
        Pos::new((index % width) as i32, (index / width) as i32)
    }

    fn checked_index(&self, x: i32, y: i32) -> Result<usize, GridError> {
        self.index_of(x, y).ok_or(GridError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    pub fn get(&self, x: i32, y: i32) -> Result<&T, GridError> {
        let idx = self.checked_index(x, y)?;
        Ok(&self.cells[idx])
    }

    pub fn set(&mut self, x: i32, y: i32, value: T) -> Result<(), GridError> {
        let idx = self.checked_index(x, y)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Values of the in-bounds Moore neighbors of `(x, y)`. No wraparound.
    pub fn neighbors(&self, x: i32, y: i32) -> impl Iterator<Item = &T> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let idx = self.index_of(x.checked_add(dx)?, y.checked_add(dy)?)?;
            Some(&self.cells[idx])
        })
    }

    /// Every cell once, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.cells.iter().enumerate()
    }

    /// Same traversal as [`iter`](Self::iter), with coordinates instead of indices.
    pub fn iter_coords(&self) -> impl Iterator<Item = (Pos, &T)> + '_ {
        self.iter().map(move |(idx, value)| (self.pos_of(idx), value))
    }
}

impl<T> Index<usize> for DenseGrid<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.cells[index]
    }
}

impl<T> IndexMut<usize> for DenseGrid<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.cells[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_fills_with_default() {
        let grid = DenseGrid::new(4, 3, 7u8);
        assert_eq!(grid.len(), 12);
        assert!(grid.iter().all(|(_, &v)| v == 7));
    }

    #[test]
    fn get_and_set_round_trip() {
        let mut grid = DenseGrid::new(5, 5, 0u8);
        grid.set(2, 3, 9).unwrap();
        assert_eq!(grid.get(2, 3), Ok(&9));
        assert_eq!(grid[2 + 5 * 3], 9);
    }

    #[test]
    fn out_of_bounds_is_checked_per_axis() {
        let mut grid = DenseGrid::new(4, 4, 0u8);
        // (4, 0) would alias (0, 1) with a flat index check
        assert_eq!(
            grid.get(4, 0),
            Err(GridError::OutOfBounds { x: 4, y: 0, width: 4, height: 4 })
        );
        assert!(grid.get(-1, 2).is_err());
        assert!(grid.get(0, 4).is_err());
        assert!(grid.set(0, -1, 1).is_err());
    }

    #[test]
    fn neighbor_counts_by_position() {
        let grid = DenseGrid::new(5, 4, ());
        assert_eq!(grid.neighbors(2, 2).count(), 8);
        assert_eq!(grid.neighbors(0, 0).count(), 3);
        assert_eq!(grid.neighbors(4, 3).count(), 3);
        assert_eq!(grid.neighbors(2, 0).count(), 5);
        assert_eq!(grid.neighbors(0, 2).count(), 5);
    }

    #[test]
    fn neighbors_at_coordinate_extremes() {
        let grid = DenseGrid::new(3, 3, ());
        assert_eq!(grid.neighbors(i32::MAX, i32::MAX).count(), 0);
        assert_eq!(grid.neighbors(i32::MIN, 1).count(), 0);
        assert_eq!(grid.neighbors(-1, -1).count(), 1);
    }

    #[test]
    fn neighbors_follow_row_major_order() {
        let mut grid = DenseGrid::new(3, 3, 0usize);
        for idx in 0..grid.len() {
            grid[idx] = idx;
        }
        let values: Vec<usize> = grid.neighbors(1, 1).copied().collect();
        assert_eq!(values, vec![0, 1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn iter_coords_is_row_major() {
        let grid = DenseGrid::new(2, 2, false);
        let coords: Vec<Pos> = grid.iter_coords().map(|(p, _)| p).collect();
        assert_eq!(
            coords,
            vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1), Pos::new(1, 1)]
        );
        // fresh traversal each call
        assert_eq!(grid.iter_coords().count(), 4);
    }
}
