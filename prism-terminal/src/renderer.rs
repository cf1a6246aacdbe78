//! Character-cell rasterizer.
//!
//! Shares the pipeline's normalized screen coordinates with the polygon
//! flavor but lands them on a fixed character grid: Bresenham walks for
//! outlines, a two-part scan-line fill for interiors. Out-of-bounds plots
//! are silently dropped; clipping beyond that is nobody's business here.

use std::io::Write;

use crossterm::{
    cursor,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use prism_core::Triangle2D;

/// Reference console dimensions, in character cells.
pub const SCREEN_WIDTH: usize = 120;
pub const SCREEN_HEIGHT: usize = 60;

pub struct AsciiRasterizer {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl AsciiRasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Blanks the grid. Called once per frame before drawing.
    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    pub fn cell(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x]
    }

    /// Strokes the three edges of a projected triangle.
    pub fn outline_triangle(&mut self, triangle: &Triangle2D, ch: char) {
        let (xs, ys) = self.to_cells(triangle);
        self.draw_line(xs[0], ys[0], xs[1], ys[1], ch);
        self.draw_line(xs[1], ys[1], xs[2], ys[2], ch);
        self.draw_line(xs[2], ys[2], xs[0], ys[0], ch);
    }

    /// Fills the interior of a projected triangle.
    pub fn fill_triangle(&mut self, triangle: &Triangle2D, ch: char) {
        let (xs, ys) = self.to_cells(triangle);
        self.fill_cells(xs, ys, ch);
    }

    /// Maps normalized device coordinates onto the grid: x to
    /// `[0, width-1]`, y to `[0, height-1]` with the axis inverted, since
    /// projected "up" must decrease the row index.
    fn to_cells(&self, triangle: &Triangle2D) -> ([i32; 3], [i32; 3]) {
        let nx = triangle.x_values();
        let ny = triangle.y_values();
        let mut xs = [0i32; 3];
        let mut ys = [0i32; 3];
        for i in 0..3 {
            xs[i] = ((nx[i] + 1.0) * (self.width - 1) as f32 / 2.0) as i32;
            ys[i] = ((1.0 - ny[i]) * (self.height - 1) as f32 / 2.0) as i32;
        }
        (xs, ys)
    }

    /// Scan-line fill over grid cells. Vertices are sorted by row; the
    /// lower half runs between the short and long edges, then the short
    /// edge is re-aimed at the highest vertex for the upper half.
    pub fn fill_cells(&mut self, xs: [i32; 3], ys: [i32; 3], ch: char) {
        let mut order = [0usize, 1, 2];
        order.sort_by_key(|&i| ys[i]);
        let (x0, y0) = (xs[order[0]], ys[order[0]]);
        let (x1, y1) = (xs[order[1]], ys[order[1]]);
        let (x2, y2) = (xs[order[2]], ys[order[2]]);

        // Run-over-rise; a zero-height edge contributes no horizontal step.
        let slope1 = inv_slope(x0, y0, x1, y1);
        let slope2 = inv_slope(x0, y0, x2, y2);
        for scan_y in y0..=y1 {
            let x_start = (x0 as f32 + (scan_y - y0) as f32 * slope1) as i32;
            let x_end = (x0 as f32 + (scan_y - y0) as f32 * slope2) as i32;
            self.hline(x_start, x_end, scan_y, ch);
        }

        let slope1 = inv_slope(x1, y1, x2, y2);
        for scan_y in y1..=y2 {
            let x_start = (x1 as f32 + (scan_y - y1) as f32 * slope1) as i32;
            let x_end = (x0 as f32 + (scan_y - y0) as f32 * slope2) as i32;
            self.hline(x_start, x_end, scan_y, ch);
        }
    }

    /// Integer Bresenham line walk.
    pub fn draw_line(&mut self, mut x0: i32, mut y0: i32, x1: i32, y1: i32, ch: char) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, ch);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn hline(&mut self, mut x_start: i32, mut x_end: i32, y: i32, ch: char) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        if x_start > x_end {
            std::mem::swap(&mut x_start, &mut x_end);
        }
        for x in x_start..=x_end {
            self.plot(x, y, ch);
        }
    }

    fn plot(&mut self, x: i32, y: i32, ch: char) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.cells[y as usize * self.width + x as usize] = ch;
        }
    }

    fn row(&self, y: usize) -> String {
        self.cells[y * self.width..(y + 1) * self.width]
            .iter()
            .collect()
    }

    /// Queues the whole grid to the terminal: clear screen, then row by
    /// row from the top. The caller flushes.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        for y in 0..self.height {
            queue!(out, cursor::MoveTo(0, y as u16), Print(self.row(y)))?;
        }
        Ok(())
    }
}

fn inv_slope(x_from: i32, y_from: i32, x_to: i32, y_to: i32) -> f32 {
    if y_to != y_from {
        (x_to - x_from) as f32 / (y_to - y_from) as f32
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::ScreenPoint;

    fn filled_in_row(r: &AsciiRasterizer, y: usize, ch: char) -> usize {
        (0..r.width()).filter(|&x| r.cell(x, y) == ch).count()
    }

    #[test]
    fn right_triangle_fill_fixture() {
        let mut r = AsciiRasterizer::new(8, 8);
        r.fill_cells([0, 4, 0], [0, 0, 4], '#');
        for y in 0..=4 {
            assert_eq!(filled_in_row(&r, y, '#'), 5 - y, "row {y}");
        }
        for y in 5..8 {
            assert_eq!(filled_in_row(&r, y, '#'), 0, "row {y}");
        }
    }

    #[test]
    fn bresenham_hits_both_endpoints() {
        let mut r = AsciiRasterizer::new(10, 10);
        r.draw_line(1, 1, 7, 4, '*');
        assert_eq!(r.cell(1, 1), '*');
        assert_eq!(r.cell(7, 4), '*');
        // A line never leaves gaps: one cell per column between endpoints.
        for x in 1..=7 {
            assert!((1..=4).any(|y| r.cell(x, y) == '*'), "column {x} empty");
        }
    }

    #[test]
    fn out_of_bounds_plots_are_dropped() {
        let mut r = AsciiRasterizer::new(4, 4);
        r.draw_line(-5, -5, 8, 8, '*');
        r.fill_cells([-2, 6, -2], [-2, -2, 6], '#');
        // No panic, and whatever landed inside stayed inside.
        assert_eq!(r.cell(0, 0), '#');
    }

    #[test]
    fn mapping_pins_the_corners() {
        let r = AsciiRasterizer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let t = Triangle2D::new(
            ScreenPoint::new(-1.0, 1.0),
            ScreenPoint::new(1.0, -1.0),
            ScreenPoint::new(0.0, 0.0),
        );
        let (xs, ys) = r.to_cells(&t);
        // NDC top-left lands on cell (0, 0), bottom-right on the far corner.
        assert_eq!((xs[0], ys[0]), (0, 0));
        assert_eq!(
            (xs[1], ys[1]),
            (SCREEN_WIDTH as i32 - 1, SCREEN_HEIGHT as i32 - 1)
        );
    }

    #[test]
    fn clear_blanks_every_cell() {
        let mut r = AsciiRasterizer::new(6, 6);
        r.fill_cells([0, 5, 0], [0, 0, 5], '#');
        r.clear();
        for y in 0..6 {
            assert_eq!(filled_in_row(&r, y, ' '), 6);
        }
    }

    #[test]
    fn fill_then_outline_keeps_the_outline_visible() {
        let mut r = AsciiRasterizer::new(20, 20);
        let t = Triangle2D::new(
            ScreenPoint::new(-0.5, -0.5),
            ScreenPoint::new(0.5, -0.5),
            ScreenPoint::new(0.0, 0.5),
        );
        r.fill_triangle(&t, '#');
        r.outline_triangle(&t, '*');
        let stars: usize = (0..20).map(|y| filled_in_row(&r, y, '*')).sum();
        assert!(stars > 0);
    }
}
