// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Epsilon-grid spatial hash
//!
//! Near-linear duplicate detection: points are bucketed by their coordinates
//! floored to the ε cell grid, and a query inspects the 27 surrounding cells.
//! The closeness predicate is the per-axis box test
//! `|Δx|<ε ∧ |Δy|<ε ∧ |Δz|<ε`; any point passing it against a query lies in
//! a cell at most one step away per axis, so the neighborhood scan is
//! exhaustive. Candidates are returned in ascending insertion order, which is
//! what keeps the welder's lowest-id tie-break identical to a full pairwise
//! scan.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

type CellKey = (i64, i64, i64);

/// Spatial hash over an ε grid; handles are dense 0-based insertion indices
#[derive(Debug)]
pub struct SpatialGrid {
    epsilon: f64,
    cells: FxHashMap<CellKey, SmallVec<[u32; 4]>>,
    points: Vec<[f64; 3]>,
}

impl SpatialGrid {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            cells: FxHashMap::default(),
            points: Vec::new(),
        }
    }

    pub fn with_capacity(epsilon: f64, capacity: usize) -> Self {
        Self {
            epsilon,
            cells: FxHashMap::default(),
            points: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    fn cell_key(&self, x: f64, y: f64, z: f64) -> CellKey {
        (
            (x / self.epsilon).floor() as i64,
            (y / self.epsilon).floor() as i64,
            (z / self.epsilon).floor() as i64,
        )
    }

    #[inline]
    fn box_close(&self, handle: u32, x: f64, y: f64, z: f64) -> bool {
        let p = self.points[handle as usize];
        (p[0] - x).abs() < self.epsilon
            && (p[1] - y).abs() < self.epsilon
            && (p[2] - z).abs() < self.epsilon
    }

    /// Insert a point, returning its 0-based handle
    pub fn insert(&mut self, x: f64, y: f64, z: f64) -> u32 {
        let handle = self.points.len() as u32;
        let key = self.cell_key(x, y, z);
        self.points.push([x, y, z]);
        self.cells.entry(key).or_default().push(handle);
        handle
    }

    /// All inserted points within the ε box of the query, handles ascending
    pub fn close_candidates(&self, x: f64, y: f64, z: f64) -> Vec<u32> {
        let (cx, cy, cz) = self.cell_key(x, y, z);
        let mut found = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(bucket) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) {
                        for &handle in bucket {
                            if self.box_close(handle, x, y, z) {
                                found.push(handle);
                            }
                        }
                    }
                }
            }
        }
        // Buckets are visited in hash order; restore insertion (id) order
        found.sort_unstable();
        found
    }

    /// Lowest-handle point within the ε box of the query, if any
    pub fn find_close(&self, x: f64, y: f64, z: f64) -> Option<u32> {
        self.close_candidates(x, y, z).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_duplicate_found() {
        let mut grid = SpatialGrid::new(1e-8);
        grid.insert(1.0, 2.0, 3.0);
        assert_eq!(grid.find_close(1.0, 2.0, 3.0), Some(0));
        assert_eq!(grid.find_close(1.0, 2.0, 4.0), None);
    }

    #[test]
    fn test_near_duplicate_across_cell_boundary() {
        let e = 1e-8;
        let mut grid = SpatialGrid::new(e);
        // Straddle a cell boundary: values on either side of a multiple of e
        grid.insert(2.0 * e - 1e-10, 0.0, 0.0);
        assert_eq!(grid.find_close(2.0 * e + 1e-10, 0.0, 0.0), Some(0));
    }

    #[test]
    fn test_box_not_euclidean() {
        let e = 1e-8;
        let mut grid = SpatialGrid::new(e);
        grid.insert(0.0, 0.0, 0.0);
        // Per-axis within e although the Euclidean norm is ~1.56e
        assert_eq!(grid.find_close(0.9e-8, 0.9e-8, 0.9e-8), Some(0));
        // One axis at exactly e fails the strict inequality
        assert_eq!(grid.find_close(e, 0.0, 0.0), None);
    }

    #[test]
    fn test_candidates_ascend_by_handle() {
        let mut grid = SpatialGrid::new(1e-8);
        for _ in 0..4 {
            grid.insert(5.0, 5.0, 5.0);
        }
        assert_eq!(grid.close_candidates(5.0, 5.0, 5.0), vec![0, 1, 2, 3]);
        assert_eq!(grid.find_close(5.0, 5.0, 5.0), Some(0));
    }

    #[test]
    fn test_negative_coordinates() {
        let mut grid = SpatialGrid::new(1e-8);
        grid.insert(-1.0, -2.0, -3.0);
        assert_eq!(grid.find_close(-1.0, -2.0, -3.0), Some(0));
    }
}
