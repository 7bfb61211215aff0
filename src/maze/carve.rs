//! Spanning-tree carving and the loosening pass
//!
//! Carving is a randomized depth-first backtracker driven by an explicit
//! stack: it always extends from the top of the stack and only backtracks
//! when that cell has no unvisited neighbor left. The result is a perfect
//! maze (exactly one simple path between any two cells).

use super::direction::Direction;
use super::grid::Grid;
use super::rng::MazeRng;

/// Carve a spanning tree into a fully walled grid, starting from `(0, 0)`
pub fn carve<R: MazeRng>(grid: &mut Grid, rng: &mut R) {
    let start = grid.index(grid.start());
    grid.cell_at_mut(start).visited = true;
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let coord = grid.coord_at(current);
        let candidates: Vec<(Direction, usize)> = Direction::ALL
            .into_iter()
            .filter_map(|dir| grid.neighbor(coord, dir).map(|next| (dir, grid.index(next))))
            .filter(|&(_, next)| !grid.cells()[next].visited)
            .collect();

        let Some(&(dir, next)) = rng.pick(&candidates) else {
            stack.pop();
            continue;
        };

        grid.open_pair_at(current, dir);
        grid.cell_at_mut(next).visited = true;
        stack.push(next);
    }
}

/// Open each still-closed interior wall with probability `extra_open_probability`.
///
/// Each wall is considered once, from the cell on its left or top side.
/// Returns how many walls were opened.
pub fn loosen<R: MazeRng>(grid: &mut Grid, extra_open_probability: f64, rng: &mut R) -> usize {
    let mut opened = 0;

    for idx in 0..grid.len() {
        for dir in [Direction::Right, Direction::Bottom] {
            let walls = grid.cells()[idx].walls;
            let interior = grid.neighbor(grid.coord_at(idx), dir).is_some();
            if interior && walls.get(dir) && rng.chance(extra_open_probability) {
                grid.open_pair_at(idx, dir);
                opened += 1;
            }
        }
    }

    opened
}
