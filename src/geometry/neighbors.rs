//! Edge-clamped neighbor lookup on a square vertex grid.
//!
//! Grids are indexed `index = x * size + y`. At the border a missing neighbor
//! is replaced by the vertex itself (clamped, never wrapped).

/// The four cardinal neighbors of a grid vertex, as flat indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors4 {
    /// `(x, y + 1)`
    pub north: usize,
    /// `(x, y - 1)`
    pub south: usize,
    /// `(x + 1, y)`
    pub east: usize,
    /// `(x - 1, y)`
    pub west: usize,
}

fn clamp_coord(v: i64, size: usize) -> usize {
    v.clamp(0, size as i64 - 1) as usize
}

/// Flat index of `(x, y)` on a `size x size` grid.
#[inline]
pub fn grid_index(size: usize, x: usize, y: usize) -> usize {
    debug_assert!(x < size && y < size);
    x * size + y
}

/// Returns the flat index of `(x + dx, y + dy)`, clamped to the grid.
pub fn neighbor_clamped(size: usize, x: usize, y: usize, dx: i64, dy: i64) -> usize {
    debug_assert!(size >= 1);
    let nx = clamp_coord(x as i64 + dx, size);
    let ny = clamp_coord(y as i64 + dy, size);
    grid_index(size, nx, ny)
}

/// Returns the 4-neighborhood (von Neumann) of `(x, y)` with edge clamping.
pub fn neighbor_4(size: usize, x: usize, y: usize) -> Neighbors4 {
    Neighbors4 {
        north: neighbor_clamped(size, x, y, 0, 1),
        south: neighbor_clamped(size, x, y, 0, -1),
        east: neighbor_clamped(size, x, y, 1, 0),
        west: neighbor_clamped(size, x, y, -1, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_neighbors() {
        let n = neighbor_4(4, 1, 2);
        assert_eq!(n.north, grid_index(4, 1, 3));
        assert_eq!(n.south, grid_index(4, 1, 1));
        assert_eq!(n.east, grid_index(4, 2, 2));
        assert_eq!(n.west, grid_index(4, 0, 2));
    }

    #[test]
    fn test_corner_neighbors_clamp_to_self() {
        let n = neighbor_4(4, 0, 0);
        let me = grid_index(4, 0, 0);
        assert_eq!(n.south, me);
        assert_eq!(n.west, me);
        assert_eq!(n.north, grid_index(4, 0, 1));
        assert_eq!(n.east, grid_index(4, 1, 0));

        let n = neighbor_4(4, 3, 3);
        let me = grid_index(4, 3, 3);
        assert_eq!(n.north, me);
        assert_eq!(n.east, me);
    }

    #[test]
    fn test_no_wrapping() {
        // The far column must never be reported as a neighbor of column 0.
        for y in 0..5 {
            let n = neighbor_4(5, 0, y);
            assert_ne!(n.west, grid_index(5, 4, y));
        }
    }
}
