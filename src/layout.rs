//! Fitting a maze grid into the available screen area
//!
//! Cell size is capped, the column/row counts have a floor, and the grid is
//! centered inside the area. All values are in CSS pixels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::maze::Coord;

/// Pixel placement of a `cols x rows` grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MazeLayout {
    pub cols: u32,
    pub rows: u32,
    /// Side of one square cell
    pub cell_size: f32,
    /// Top-left corner of the grid
    pub origin: Vec2,
}

impl MazeLayout {
    /// Fit as many cells of at most `max_cell_size` as the area allows,
    /// never fewer than `min_cols` x `min_rows`
    pub fn fit(
        area_origin: Vec2,
        area_size: Vec2,
        max_cell_size: f32,
        min_cols: u32,
        min_rows: u32,
    ) -> Self {
        let area_size = area_size.max(Vec2::ZERO);
        let cols = ((area_size.x / max_cell_size).floor() as u32).max(min_cols).max(1);
        let rows = ((area_size.y / max_cell_size).floor() as u32).max(min_rows).max(1);

        let cell_size = (area_size.x / cols as f32)
            .min(area_size.y / rows as f32)
            .floor();
        let total = Vec2::new(cols as f32, rows as f32) * cell_size;

        Self {
            cols,
            rows,
            cell_size,
            origin: area_origin + (area_size - total) / 2.0,
        }
    }

    /// Maze area for a scene of `width x height`, with the game's margins
    /// and limits
    pub fn for_screen(width: f32, height: f32) -> Self {
        let origin = Vec2::splat(MAZE_AREA_INSET);
        let size = Vec2::new(width - MAZE_AREA_MARGIN_X, height - MAZE_AREA_MARGIN_Y);
        Self::fit(origin, size, MAX_CELL_SIZE, MIN_MAZE_COLS, MIN_MAZE_ROWS)
    }

    /// Total pixel size of the grid
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.cols as f32, self.rows as f32) * self.cell_size
    }

    /// Pixel center of a cell
    pub fn cell_center(&self, coord: Coord) -> Vec2 {
        self.origin + (Vec2::new(coord.x as f32, coord.y as f32) + 0.5) * self.cell_size
    }
}
