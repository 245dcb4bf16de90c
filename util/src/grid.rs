use std::ops::{Index, IndexMut};

use glam::{ivec2, IVec2};

/// Dense rectangular 2D storage with its origin at (0, 0).
///
/// The grid has no opinion on the units of its cells. The same bounds rule
/// applies whether a cell is a single map tile or a whole map chunk.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Grid<T> {
    dim: IVec2,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a new grid of the given dimensions with every cell set to
    /// `fill`.
    pub fn new(dim: impl Into<IVec2>, fill: T) -> Self {
        let dim = dim.into();
        assert!(dim.x >= 0 && dim.y >= 0, "Grid: negative dimensions");
        Grid {
            dim,
            cells: vec![fill; (dim.x * dim.y) as usize],
        }
    }
}

impl<T: Clone + Default> Grid<T> {
    pub fn with_default(dim: impl Into<IVec2>) -> Self {
        Grid::new(dim, T::default())
    }
}

impl<T> Grid<T> {
    /// Build a grid from cells stored in scanline order.
    ///
    /// Returns `None` if the number of cells doesn't match the dimensions.
    pub fn from_vec(dim: impl Into<IVec2>, cells: Vec<T>) -> Option<Self> {
        let dim = dim.into();
        if dim.x < 0 || dim.y < 0 || (dim.x * dim.y) as usize != cells.len() {
            return None;
        }
        Some(Grid { dim, cells })
    }

    pub fn dim(&self) -> IVec2 {
        self.dim
    }

    pub fn width(&self) -> i32 {
        self.dim.x
    }

    pub fn height(&self) -> i32 {
        self.dim.y
    }

    /// Return whether `0 <= x < width` and `0 <= y < height`.
    pub fn contains(&self, p: impl Into<IVec2>) -> bool {
        let p = p.into();
        p.x >= 0 && p.y >= 0 && p.x < self.dim.x && p.y < self.dim.y
    }

    pub fn get(&self, p: impl Into<IVec2>) -> Option<&T> {
        let i = self.index_of(p.into())?;
        Some(&self.cells[i])
    }

    pub fn get_mut(&mut self, p: impl Into<IVec2>) -> Option<&mut T> {
        let i = self.index_of(p.into())?;
        Some(&mut self.cells[i])
    }

    /// Replace the value at a position, return the previous value or `None`
    /// if the position is outside the grid.
    pub fn set(&mut self, p: impl Into<IVec2>, value: T) -> Option<T> {
        let cell = self.get_mut(p)?;
        Some(std::mem::replace(cell, value))
    }

    /// Iterate positions of the grid in scanline order.
    pub fn positions(&self) -> impl Iterator<Item = IVec2> {
        let w = self.dim.x;
        (0..self.dim.y).flat_map(move |y| (0..w).map(move |x| ivec2(x, y)))
    }

    /// Iterate positions and values in scanline order.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &T)> {
        self.positions().zip(self.cells.iter())
    }

    /// Cell values in scanline order.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }

    fn index_of(&self, p: IVec2) -> Option<usize> {
        self.contains(p)
            .then(|| (p.y * self.dim.x + p.x) as usize)
    }
}

impl<T> Index<IVec2> for Grid<T> {
    type Output = T;

    fn index(&self, p: IVec2) -> &Self::Output {
        self.get(p).expect("Grid: position out of bounds")
    }
}

impl<T> IndexMut<IVec2> for Grid<T> {
    fn index_mut(&mut self, p: IVec2) -> &mut Self::Output {
        self.get_mut(p).expect("Grid: position out of bounds")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bounds() {
        let grid: Grid<u8> = Grid::with_default([3, 2]);
        assert!(grid.contains([0, 0]));
        assert!(grid.contains([2, 1]));
        assert!(!grid.contains([3, 1]));
        assert!(!grid.contains([2, 2]));
        assert!(!grid.contains([-1, 0]));
        assert_eq!(grid.positions().count(), 6);
    }

    #[test]
    fn scanline_order() {
        let grid = Grid::from_vec([2, 2], vec!['a', 'b', 'c', 'd']).unwrap();
        assert_eq!(grid[ivec2(1, 0)], 'b');
        assert_eq!(grid[ivec2(0, 1)], 'c');
        assert_eq!(
            grid.iter().map(|(_, c)| *c).collect::<String>(),
            "abcd"
        );
        assert!(Grid::from_vec([2, 2], vec![0; 3]).is_none());
    }

    #[test]
    fn set_outside() {
        let mut grid = Grid::new([2, 2], 0);
        assert_eq!(grid.set([1, 1], 5), Some(0));
        assert_eq!(grid.set([2, 1], 5), None);
        assert_eq!(grid.as_slice(), &[0, 0, 0, 5]);
    }
}
