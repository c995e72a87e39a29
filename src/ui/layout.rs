use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::rules::GRID_SIZE;

pub const HORIZONTAL_MARGIN: u16 = 5;
pub const VERTICAL_MARGIN: u16 = 1;

/// Regions of the play screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayLayout {
    pub status: Rect,
    pub target: Rect,
    pub grid: Rect,
    pub legend: Rect,
}

pub fn play_layout(area: Rect) -> PlayLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // score / time / round
            Constraint::Length(3), // target swatch
            Constraint::Min(GRID_SIZE as u16),
            Constraint::Length(1), // legend
        ])
        .split(area);

    PlayLayout {
        status: chunks[0],
        target: chunks[1],
        grid: square_grid(chunks[2]),
        legend: chunks[3],
    }
}

/// Largest centered grid whose tiles look roughly square (cells are about
/// twice as tall as they are wide)
fn square_grid(area: Rect) -> Rect {
    let n = GRID_SIZE as u16;
    let tile_w = (area.width / n).min((area.height / n) * 2);
    let tile_h = (tile_w / 2).max(1).min(area.height / n);
    if tile_w == 0 || tile_h == 0 {
        return Rect::new(area.x, area.y, 0, 0);
    }
    let width = tile_w * n;
    let height = tile_h * n;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Tile rectangles in row-major order
pub fn tile_rects(grid: Rect) -> Vec<Rect> {
    let n = GRID_SIZE as u16;
    let tile_w = grid.width / n;
    let tile_h = grid.height / n;
    (0..n)
        .flat_map(|row| {
            (0..n).map(move |col| {
                Rect::new(grid.x + col * tile_w, grid.y + row * tile_h, tile_w, tile_h)
            })
        })
        .collect()
}

/// Tile under a terminal cell, if any
pub fn tile_at(area: Rect, column: u16, row: u16) -> Option<usize> {
    let layout = play_layout(area);
    tile_rects(layout.grid).iter().position(|r| {
        column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::TILE_COUNT;

    #[test]
    fn test_grid_fits_standard_terminal() {
        let layout = play_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.grid.width, 32);
        assert_eq!(layout.grid.height, 16);
        assert!(layout.grid.y >= layout.target.y + layout.target.height);
        assert!(layout.grid.y + layout.grid.height <= layout.legend.y);
    }

    #[test]
    fn test_tile_rects_do_not_overlap() {
        let layout = play_layout(Rect::new(0, 0, 80, 24));
        let rects = tile_rects(layout.grid);
        assert_eq!(rects.len(), TILE_COUNT);
        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                assert!(a.intersection(*b).area() == 0);
            }
        }
    }

    #[test]
    fn test_tile_at_hits_and_misses() {
        let area = Rect::new(0, 0, 80, 24);
        let rects = tile_rects(play_layout(area).grid);

        assert_eq!(tile_at(area, rects[0].x, rects[0].y), Some(0));
        let last = rects[15];
        assert_eq!(
            tile_at(area, last.x + last.width - 1, last.y + last.height - 1),
            Some(15)
        );
        assert_eq!(tile_at(area, 0, 0), None);
    }

    #[test]
    fn test_tiny_terminal_has_no_tiles() {
        let area = Rect::new(0, 0, 12, 6);
        assert_eq!(tile_at(area, 6, 3), None);
    }
}
