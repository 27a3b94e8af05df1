//! Screen placement of the grid, tooltip and popup, shared by drawing and
//! mouse hit testing so both agree on where things are.

use crate::calc::{GridCell, GridLayout};
use crate::ui::interaction::Anchor;
use ratatui::layout::Rect;

/// Each cell is a glyph plus a space.
pub const CELL_WIDTH: u16 = 2;
/// Row label column, e.g. " 69 ".
pub const LABEL_WIDTH: u16 = 4;
/// Header line with month numbers above the first row.
pub const HEADER_HEIGHT: u16 = 1;
/// Rows between the pointer and the tooltip, so the tooltip doesn't cover it.
pub const TOOLTIP_OFFSET_ROWS: u16 = 2;

pub const POPUP_WIDTH: u16 = 46;
pub const POPUP_HEIGHT: u16 = 9;
pub const CANCEL_LABEL: &str = "[ Cancel ]";
pub const SAVE_LABEL: &str = "[ Save ]";

pub fn contains(r: Rect, x: u16, y: u16) -> bool {
    x >= r.x && x < r.x.saturating_add(r.width) && y >= r.y && y < r.y.saturating_add(r.height)
}

/// Places a `width` x `height` box with its top-left at (x, y), shifted to stay inside `bounds`.
fn clamp_rect(x: i32, y: i32, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);
    let max_x = i32::from(bounds.x) + i32::from(bounds.width - width);
    let max_y = i32::from(bounds.y) + i32::from(bounds.height - height);
    Rect::new(
        x.clamp(i32::from(bounds.x), max_x) as u16,
        y.clamp(i32::from(bounds.y), max_y) as u16,
        width,
        height,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    /// Top-left of the header line.
    pub area: Rect,
    pub layout: GridLayout,
}

impl GridGeometry {
    pub fn new(area: Rect, layout: GridLayout) -> Self {
        GridGeometry { area, layout }
    }

    pub fn width(layout: &GridLayout) -> u16 {
        LABEL_WIDTH + layout.cells_per_row as u16 * CELL_WIDTH
    }

    pub fn height(layout: &GridLayout) -> u16 {
        HEADER_HEIGHT + layout.row_count() as u16
    }

    /// Cell whose glyph or trailing space is at (x, y).
    pub fn cell_at(&self, x: u16, y: u16) -> Option<GridCell> {
        if !contains(self.area, x, y) {
            return None;
        }
        let col_x = x.checked_sub(self.area.x + LABEL_WIDTH)?;
        let row = y.checked_sub(self.area.y + HEADER_HEIGHT)?;
        self.layout
            .index_at(row as usize, (col_x / CELL_WIDTH) as usize)
            .map(GridCell::new)
    }

    /// Screen position of a cell's glyph.
    pub fn cell_anchor(&self, cell: GridCell) -> Option<Anchor> {
        let (row, col) = self.layout.position(cell.index)?;
        Some(Anchor::new(
            self.area.x + LABEL_WIDTH + col as u16 * CELL_WIDTH,
            self.area.y + HEADER_HEIGHT + row as u16,
        ))
    }
}

/// One-line tooltip centred over the anchor, `TOOLTIP_OFFSET_ROWS` above it.
pub fn tooltip_rect(anchor: Anchor, text: &str, bounds: Rect) -> Rect {
    let width = text.chars().count() as u16 + 2;
    clamp_rect(
        i32::from(anchor.x) - i32::from(width / 2),
        i32::from(anchor.y) - i32::from(TOOLTIP_OFFSET_ROWS),
        width,
        1,
        bounds,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupGeometry {
    pub area: Rect,
    pub text_area: Rect,
    pub cancel: Rect,
    pub save: Rect,
}

impl PopupGeometry {
    /// Opens mostly to the left of and just below the anchor.
    pub fn new(anchor: Anchor, bounds: Rect) -> Self {
        let area = clamp_rect(
            i32::from(anchor.x) - i32::from(POPUP_WIDTH * 4 / 5),
            i32::from(anchor.y) + 1,
            POPUP_WIDTH,
            POPUP_HEIGHT,
            bounds,
        );
        let inner_x = area.x + 1;
        let inner_width = area.width.saturating_sub(2);
        let button_y = (area.y + area.height).saturating_sub(2);
        let save_width = SAVE_LABEL.len() as u16;
        let cancel_width = CANCEL_LABEL.len() as u16;
        let save_x = (inner_x + inner_width).saturating_sub(save_width + 1);
        let cancel_x = save_x.saturating_sub(cancel_width + 2);
        PopupGeometry {
            area,
            text_area: Rect::new(
                inner_x + 1,
                area.y + 1,
                inner_width.saturating_sub(2),
                area.height.saturating_sub(4),
            ),
            cancel: Rect::new(cancel_x, button_y, cancel_width, 1),
            save: Rect::new(save_x, button_y, save_width, 1),
        }
    }
}
