use crate::calc::GridCell;

/// Terminal column/row a tooltip or popup is positioned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    pub x: u16,
    pub y: u16,
}

impl Anchor {
    pub fn new(x: u16, y: u16) -> Self {
        Anchor { x, y }
    }
}

/// Where a click landed, resolved by the view's hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    PopupCancel,
    PopupSave,
    /// Anywhere else inside the open popup.
    PopupBody,
    Cell(GridCell),
    Elsewhere,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickEffect {
    None,
    /// The user pressed Save; hand the text to the annotation store.
    Save { cell: GridCell, text: String },
}

/// Hover/selection state of the grid.
///
/// Tooltip and popup can never be visible together: the tooltip only exists
/// in `Hovering`, the popup only in `Selected` with `editing` set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Hovering {
        cell: GridCell,
        anchor: Anchor,
    },
    Selected {
        cell: GridCell,
        anchor: Anchor,
        /// Draft annotation text while the popup is open.
        editing: Option<String>,
    },
}

impl Interaction {
    /// Pointer moved over `cell`. Ignored while a cell is selected.
    pub fn pointer_enter(&mut self, cell: GridCell, anchor: Anchor) {
        if !self.is_selected() {
            *self = Interaction::Hovering { cell, anchor };
        }
    }

    /// Pointer left the grid.
    pub fn pointer_leave(&mut self) {
        if !self.is_selected() {
            *self = Interaction::Idle;
        }
    }

    /// Selects `cell` and opens the popup with an empty draft.
    pub fn select(&mut self, cell: GridCell, anchor: Anchor) {
        *self = Interaction::Selected {
            cell,
            anchor,
            editing: Some(String::new()),
        };
    }

    /// Document-level click: drops any selection and editing.
    pub fn deselect(&mut self) {
        *self = Interaction::Idle;
    }

    pub fn cancel(&mut self) {
        if self.is_editing() {
            *self = Interaction::Idle;
        }
    }

    /// Closes the popup, keeping the cell selected, and returns the draft.
    pub fn finish_save(&mut self) -> ClickEffect {
        match self {
            Interaction::Selected { cell, editing, .. } => match editing.take() {
                Some(text) => ClickEffect::Save { cell: *cell, text },
                None => ClickEffect::None,
            },
            _ => ClickEffect::None,
        }
    }

    pub fn click(&mut self, target: ClickTarget, anchor: Anchor) -> ClickEffect {
        match target {
            ClickTarget::PopupCancel => {
                self.cancel();
                ClickEffect::None
            }
            ClickTarget::PopupSave => self.finish_save(),
            ClickTarget::PopupBody => ClickEffect::None,
            ClickTarget::Cell(cell) => {
                self.select(cell, anchor);
                ClickEffect::None
            }
            ClickTarget::Elsewhere => {
                self.deselect();
                ClickEffect::None
            }
        }
    }

    pub fn tooltip(&self) -> Option<(GridCell, Anchor)> {
        match self {
            Interaction::Hovering { cell, anchor } => Some((*cell, *anchor)),
            _ => None,
        }
    }

    pub fn selected(&self) -> Option<GridCell> {
        match self {
            Interaction::Selected { cell, .. } => Some(*cell),
            _ => None,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Interaction::Selected { .. })
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Interaction::Selected { editing: Some(_), .. })
    }

    /// Cell, anchor and draft of the open popup.
    pub fn popup(&self) -> Option<(GridCell, Anchor, &str)> {
        match self {
            Interaction::Selected {
                cell,
                anchor,
                editing: Some(text),
            } => Some((*cell, *anchor, text.as_str())),
            _ => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut String> {
        match self {
            Interaction::Selected {
                editing: Some(text),
                ..
            } => Some(text),
            _ => None,
        }
    }
}
