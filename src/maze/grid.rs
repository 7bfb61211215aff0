//! Cell arena and wall-pair bookkeeping
//!
//! Cells live in one row-major `Vec` (index = `y * cols + x`). Every wall
//! between two cells is stored twice, once per side, and the two flags are
//! only ever changed together through [`Grid::open_wall_pair`].

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::error::MazeError;

/// Integer cell address, `x` in `[0, cols)`, `y` in `[0, rows)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance in cells
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Wall flags for one cell; `true` means blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }
}

impl Walls {
    pub fn get(&self, dir: Direction) -> bool {
        match dir {
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
        }
    }

    // Private: single-sided writes would break pair consistency.
    fn set(&mut self, dir: Direction, closed: bool) {
        match dir {
            Direction::Top => self.top = closed,
            Direction::Right => self.right = closed,
            Direction::Bottom => self.bottom = closed,
            Direction::Left => self.left = closed,
        }
    }
}

/// One maze square
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
    /// Spanning-tree membership, only meaningful while carving
    #[serde(skip)]
    pub visited: bool,
    pub walls: Walls,
}

impl Cell {
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

/// Rectangular grid of cells.
///
/// Decoding goes through [`RawGrid`] and is rejected unless the result is a
/// grid [`Grid::new`] plus paired wall openings could have built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    cols: u32,
    rows: u32,
    cells: Vec<Cell>,
}

/// Unchecked wire form of a [`Grid`]
#[derive(Deserialize)]
struct RawGrid {
    cols: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = MazeError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let RawGrid { cols, rows, cells } = raw;
        if cols == 0 || rows == 0 {
            return Err(MazeError::InvalidDimensions { cols, rows });
        }
        if cells.len() != cols as usize * rows as usize {
            return Err(MazeError::MalformedGrid {
                reason: "cell count does not match dimensions",
            });
        }

        let grid = Self { cols, rows, cells };
        let in_order = grid
            .cells
            .iter()
            .enumerate()
            .all(|(idx, cell)| grid.coord_at(idx) == cell.coord());
        if !in_order {
            return Err(MazeError::MalformedGrid {
                reason: "cells are not in row-major order",
            });
        }
        let border_closed = grid.cells.iter().all(|cell| {
            Direction::ALL
                .into_iter()
                .all(|dir| grid.neighbor(cell.coord(), dir).is_some() || cell.walls.get(dir))
        });
        if !border_closed {
            return Err(MazeError::MalformedGrid {
                reason: "outer wall is open",
            });
        }
        if !grid.is_consistent() {
            return Err(MazeError::MalformedGrid {
                reason: "wall pair disagrees",
            });
        }

        Ok(grid)
    }
}

impl Grid {
    /// Build a fully walled, unvisited `cols x rows` grid
    pub fn new(cols: u32, rows: u32) -> Result<Self, MazeError> {
        if cols == 0 || rows == 0 {
            return Err(MazeError::InvalidDimensions { cols, rows });
        }

        let mut cells = Vec::with_capacity(cols as usize * rows as usize);
        for y in 0..rows {
            for x in 0..cols {
                cells.push(Cell {
                    x,
                    y,
                    visited: false,
                    walls: Walls::default(),
                });
            }
        }

        Ok(Self { cols, rows, cells })
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Entrance, always the top-left cell
    pub fn start(&self) -> Coord {
        Coord::new(0, 0)
    }

    /// Exit, always the bottom-right cell
    pub fn goal(&self) -> Coord {
        Coord::new(self.cols - 1, self.rows - 1)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.cols && coord.y < self.rows
    }

    /// Arena index of an in-bounds coordinate
    pub(crate) fn index(&self, coord: Coord) -> usize {
        coord.y as usize * self.cols as usize + coord.x as usize
    }

    pub(crate) fn coord_at(&self, index: usize) -> Coord {
        let cols = self.cols as usize;
        Coord::new((index % cols) as u32, (index / cols) as u32)
    }

    fn check(&self, coord: Coord) -> Result<usize, MazeError> {
        if self.contains(coord) {
            Ok(self.index(coord))
        } else {
            Err(MazeError::OutOfBounds {
                x: coord.x,
                y: coord.y,
                cols: self.cols,
                rows: self.rows,
            })
        }
    }

    pub fn cell(&self, coord: Coord) -> Result<&Cell, MazeError> {
        let idx = self.check(coord)?;
        Ok(&self.cells[idx])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cell_at_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    /// In-bounds neighbor on the given side, if any
    pub fn neighbor(&self, coord: Coord, dir: Direction) -> Option<Coord> {
        let (dx, dy) = dir.delta();
        let x = coord.x.checked_add_signed(dx)?;
        let y = coord.y.checked_add_signed(dy)?;
        let next = Coord::new(x, y);
        self.contains(next).then_some(next)
    }

    /// Open the wall between `coord` and its neighbor on `dir`, on both sides.
    ///
    /// Returns `Ok(true)` if a wall was removed, `Ok(false)` if the pair was
    /// already open or `dir` points off the grid (the border is never opened).
    pub fn open_wall_pair(&mut self, coord: Coord, dir: Direction) -> Result<bool, MazeError> {
        let idx = self.check(coord)?;
        Ok(self.open_pair_at(idx, dir))
    }

    /// [`Grid::open_wall_pair`] for an index already known to be in bounds
    pub(crate) fn open_pair_at(&mut self, index: usize, dir: Direction) -> bool {
        let Some(next) = self.neighbor(self.coord_at(index), dir) else {
            return false;
        };
        if !self.cells[index].walls.get(dir) {
            return false;
        }

        let next_idx = self.index(next);
        self.cells[index].walls.set(dir, false);
        self.cells[next_idx].walls.set(dir.opposite(), false);
        true
    }

    /// Indices of cells reachable in one step from `index`
    pub(crate) fn open_neighbor_indices(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let coord = self.coord_at(index);
        let walls = self.cells[index].walls;
        Direction::ALL
            .into_iter()
            .filter(move |&dir| !walls.get(dir))
            .filter_map(move |dir| self.neighbor(coord, dir).map(|next| self.index(next)))
    }

    /// Closed interior sides for an index already known to be in bounds
    pub(crate) fn closed_walls_at(&self, index: usize) -> Vec<Direction> {
        let coord = self.coord_at(index);
        let walls = self.cells[index].walls;
        Direction::ALL
            .into_iter()
            .filter(|&dir| walls.get(dir) && self.neighbor(coord, dir).is_some())
            .collect()
    }

    /// True when a step from `coord` toward `dir` is legal
    pub fn is_open(&self, coord: Coord, dir: Direction) -> Result<bool, MazeError> {
        let idx = self.check(coord)?;
        Ok(self.neighbor(coord, dir).is_some() && !self.cells[idx].walls.get(dir))
    }

    /// Neighbors reachable through open walls, in [`Direction::ALL`] order
    pub fn open_neighbors(&self, coord: Coord) -> Result<Vec<(Coord, Direction)>, MazeError> {
        let idx = self.check(coord)?;
        let walls = self.cells[idx].walls;
        Ok(Direction::ALL
            .into_iter()
            .filter(|&dir| !walls.get(dir))
            .filter_map(|dir| self.neighbor(coord, dir).map(|next| (next, dir)))
            .collect())
    }

    /// Interior sides of `coord` that are still walled
    pub fn closed_walls(&self, coord: Coord) -> Result<Vec<Direction>, MazeError> {
        let idx = self.check(coord)?;
        Ok(self.closed_walls_at(idx))
    }

    /// Number of open interior wall pairs (each counted once)
    pub fn open_pair_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                let coord = cell.coord();
                [Direction::Right, Direction::Bottom]
                    .into_iter()
                    .filter(|&dir| !cell.walls.get(dir) && self.neighbor(coord, dir).is_some())
                    .count()
            })
            .sum()
    }

    /// Number of interior wall pairs, open or closed
    pub fn interior_pair_count(&self) -> usize {
        let (cols, rows) = (self.cols as usize, self.rows as usize);
        (cols - 1) * rows + cols * (rows - 1)
    }

    /// Checks that every wall pair agrees on both sides
    pub fn is_consistent(&self) -> bool {
        self.cells.iter().all(|cell| {
            let coord = cell.coord();
            Direction::ALL.into_iter().all(|dir| match self.neighbor(coord, dir) {
                Some(next) => {
                    cell.walls.get(dir) == self.cells[self.index(next)].walls.get(dir.opposite())
                }
                None => true,
            })
        })
    }

    /// Count of cells reachable from `from` through open walls
    pub fn reachable_from(&self, from: Coord) -> Result<usize, MazeError> {
        let first = self.check(from)?;
        let mut seen = vec![false; self.cells.len()];
        let mut stack = vec![first];
        seen[first] = true;
        let mut count = 0;

        while let Some(idx) = stack.pop() {
            count += 1;
            for next_idx in self.open_neighbor_indices(idx) {
                if !seen[next_idx] {
                    seen[next_idx] = true;
                    stack.push(next_idx);
                }
            }
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_fully_walled() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.len(), 12);
        assert!(grid.cells().iter().all(|c| c.walls == Walls::default() && !c.visited));
        assert_eq!(grid.open_pair_count(), 0);
        assert_eq!(grid.interior_pair_count(), 3 * 3 + 4 * 2);
        assert_eq!(grid.start(), Coord::new(0, 0));
        assert_eq!(grid.goal(), Coord::new(3, 2));
    }

    #[test]
    fn test_new_grid_rejects_zero_dimensions() {
        assert_eq!(
            Grid::new(0, 5),
            Err(MazeError::InvalidDimensions { cols: 0, rows: 5 })
        );
        assert!(Grid::new(3, 0).is_err());
    }

    #[test]
    fn test_cells_keep_their_coordinates() {
        let grid = Grid::new(5, 2).unwrap();
        for (idx, cell) in grid.cells().iter().enumerate() {
            assert_eq!(grid.coord_at(idx), cell.coord());
            assert_eq!(grid.index(cell.coord()), idx);
        }
    }

    #[test]
    fn test_open_wall_pair_updates_both_sides() {
        let mut grid = Grid::new(3, 3).unwrap();
        let here = Coord::new(1, 1);
        assert!(grid.open_wall_pair(here, Direction::Top).unwrap());

        assert!(!grid.cell(here).unwrap().walls.top);
        assert!(!grid.cell(Coord::new(1, 0)).unwrap().walls.bottom);
        assert!(grid.is_consistent());
        assert_eq!(grid.open_pair_count(), 1);

        // Second open of the same pair is a no-op
        assert!(!grid.open_wall_pair(Coord::new(1, 0), Direction::Bottom).unwrap());
        assert_eq!(grid.open_pair_count(), 1);
    }

    #[test]
    fn test_border_walls_never_open() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(!grid.open_wall_pair(Coord::new(0, 0), Direction::Left).unwrap());
        assert!(!grid.open_wall_pair(Coord::new(1, 1), Direction::Bottom).unwrap());
        assert!(grid.cell(Coord::new(0, 0)).unwrap().walls.left);
        assert!(!grid.is_open(Coord::new(0, 0), Direction::Top).unwrap());
    }

    #[test]
    fn test_out_of_bounds_queries_fail() {
        let mut grid = Grid::new(2, 2).unwrap();
        let outside = Coord::new(2, 0);
        let err = MazeError::OutOfBounds { x: 2, y: 0, cols: 2, rows: 2 };
        assert_eq!(grid.cell(outside).unwrap_err(), err);
        assert_eq!(grid.is_open(outside, Direction::Left), Err(err));
        assert_eq!(grid.open_wall_pair(outside, Direction::Left), Err(err));
        assert!(grid.open_neighbors(outside).is_err());
    }

    #[test]
    fn test_open_neighbors_and_closed_walls() {
        let mut grid = Grid::new(3, 1).unwrap();
        let mid = Coord::new(1, 0);
        grid.open_wall_pair(mid, Direction::Left).unwrap();

        assert_eq!(
            grid.open_neighbors(mid).unwrap(),
            vec![(Coord::new(0, 0), Direction::Left)]
        );
        assert_eq!(grid.closed_walls(mid).unwrap(), vec![Direction::Right]);
        assert_eq!(grid.reachable_from(Coord::new(0, 0)).unwrap(), 2);
    }

    fn two_by_two_json() -> serde_json::Value {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.open_wall_pair(Coord::new(0, 0), Direction::Right).unwrap();
        grid.open_wall_pair(Coord::new(1, 0), Direction::Bottom).unwrap();
        serde_json::to_value(&grid).unwrap()
    }

    #[test]
    fn test_decoded_grid_keeps_walls() {
        let back: Grid = serde_json::from_value(two_by_two_json()).unwrap();
        assert!(back.is_open(Coord::new(0, 0), Direction::Right).unwrap());
        assert!(back.is_open(Coord::new(1, 1), Direction::Top).unwrap());
        assert!(!back.is_open(Coord::new(0, 1), Direction::Top).unwrap());
        assert!(back.is_consistent());
    }

    #[test]
    fn test_decode_rejects_missing_cells() {
        let mut value = two_by_two_json();
        value["cells"] = serde_json::json!([]);
        assert!(serde_json::from_value::<Grid>(value).is_err());
    }

    #[test]
    fn test_decode_rejects_zero_dimensions() {
        let value = serde_json::json!({ "cols": 0, "rows": 0, "cells": [] });
        assert!(serde_json::from_value::<Grid>(value).is_err());
    }

    #[test]
    fn test_decode_rejects_one_sided_wall() {
        let mut value = two_by_two_json();
        value["cells"][2]["walls"]["right"] = serde_json::json!(false);
        let err = serde_json::from_value::<Grid>(value).unwrap_err();
        assert!(err.to_string().contains("wall pair disagrees"));
    }

    #[test]
    fn test_decode_rejects_open_border() {
        let mut value = two_by_two_json();
        value["cells"][0]["walls"]["top"] = serde_json::json!(false);
        let err = serde_json::from_value::<Grid>(value).unwrap_err();
        assert!(err.to_string().contains("outer wall is open"));
    }

    #[test]
    fn test_decode_rejects_shuffled_cells() {
        let mut value = two_by_two_json();
        let cells = value["cells"].as_array_mut().unwrap();
        cells.swap(0, 3);
        assert!(serde_json::from_value::<Grid>(value).is_err());
    }
}
