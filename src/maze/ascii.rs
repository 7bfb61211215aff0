//! Plain-text maze drawing for the terminal and logs

use super::generator::Maze;
use super::grid::Coord;

/// Draw the maze with `+---+` borders, `S` at the start and `G` at the goal
pub fn render(maze: &Maze) -> String {
    render_with(maze, |_| None)
}

/// Like [`render`], with `mark` supplying a glyph for any other cell
pub fn render_with<F>(maze: &Maze, mark: F) -> String
where
    F: Fn(Coord) -> Option<char>,
{
    let grid = maze.grid();
    let mut out = String::new();

    for y in 0..grid.rows() {
        let row = &grid.cells()[(y * grid.cols()) as usize..((y + 1) * grid.cols()) as usize];

        for cell in row {
            out.push('+');
            out.push_str(if cell.walls.top { "---" } else { "   " });
        }
        out.push_str("+\n");

        for cell in row {
            out.push(if cell.walls.left { '|' } else { ' ' });
            let here = cell.coord();
            let glyph = if here == maze.start() {
                'S'
            } else if here == maze.goal() {
                'G'
            } else {
                mark(here).unwrap_or(' ')
            };
            out.push(' ');
            out.push(glyph);
            out.push(' ');
        }
        let last = &row[row.len() - 1];
        out.push(if last.walls.right { '|' } else { ' ' });
        out.push('\n');
    }

    let bottom = &grid.cells()[((grid.rows() - 1) * grid.cols()) as usize..];
    for cell in bottom {
        out.push('+');
        out.push_str(if cell.walls.bottom { "---" } else { "   " });
    }
    out.push_str("+\n");

    out
}
