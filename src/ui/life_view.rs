use crate::calc::summary::display_count;
use crate::calc::{
    calculate_summary, cell_label, filled_cells, is_filled, tooltip_text, GridCell, GridLayout,
};
use crate::data::{AnnotationStore, LifeConfig};
use crate::ui::config_panel::{ConfigPanel, FormField, PanelAction};
use crate::ui::geometry::{
    contains, tooltip_rect, GridGeometry, PopupGeometry, CANCEL_LABEL, LABEL_WIDTH, SAVE_LABEL,
};
use crate::ui::interaction::{Anchor, ClickEffect, ClickTarget, Interaction};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use crossterm::event::{
    self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::Duration as StdDuration;

// Cell colors
const FILLED_COLOR: Color = Color::Rgb(99, 102, 241); // indigo
const SELECTED_COLOR: Color = Color::Rgb(67, 56, 202); // deep indigo
const TOOLTIP_BG: Color = Color::Rgb(31, 41, 55);

const FILLED_GLYPH: &str = "■";
const EMPTY_GLYPH: &str = "□";

const CONFIGURE_LABEL: &str = "[ Configure ]";
const APPLY_LABEL: &str = "[ Apply ]";
/// Width of "Birth Month: " in the config panel.
const FORM_LABEL_WIDTH: u16 = 13;
const PANEL_HEIGHT: u16 = 5;
const DESCRIPTION: &str = "Each square is one month of your life. Filled squares are months \
    already lived. The grid extends to 72 years.";
const DRAFT_PLACEHOLDER: &str = "Enter description here (markdown supported)";

/// Where each clickable part was placed for the current terminal size.
#[derive(Debug, Clone, Copy, Default)]
struct Regions {
    frame: Rect,
    header: Rect,
    configure_button: Rect,
    description: Rect,
    panel: Rect,
    year_field: Rect,
    month_field: Rect,
    apply_button: Rect,
    grid_block: Rect,
    grid: Option<GridGeometry>,
    legend: Rect,
    status: Rect,
}

pub struct App<'a> {
    pub config: LifeConfig,
    today: NaiveDate,
    layout: GridLayout,
    interaction: Interaction,
    panel: ConfigPanel,
    /// Keyboard cursor; behaves like the pointer resting on a cell.
    cursor: Option<GridCell>,
    store: &'a mut dyn AnnotationStore,
    /// Result of the last save (message, color). Cleared on next key or click.
    status: Option<(String, Color)>,
    regions: Regions,
}

impl<'a> App<'a> {
    pub fn new(config: LifeConfig, today: NaiveDate, store: &'a mut dyn AnnotationStore) -> Self {
        App {
            config,
            today,
            layout: GridLayout::default(),
            interaction: Interaction::default(),
            panel: ConfigPanel::new(&config),
            cursor: None,
            store,
            status: None,
            regions: Regions::default(),
        }
    }

    pub fn filled(&self) -> Option<i64> {
        filled_cells(&self.config, self.today)
    }

    /// Recomputes hit-test regions for a terminal of the given size.
    pub fn set_viewport(&mut self, area: Rect) {
        self.regions = self.compute_regions(area);
    }

    fn compute_regions(&self, area: Rect) -> Regions {
        let grid_height = GridGeometry::height(&self.layout);
        let panel_height = if self.panel.visible { PANEL_HEIGHT } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),               // title + configure button
                Constraint::Length(2),               // description
                Constraint::Length(panel_height),    // config panel
                Constraint::Length(grid_height + 2), // grid with borders
                Constraint::Length(3),               // legend
                Constraint::Length(1),               // status / hints
                Constraint::Min(0),
            ])
            .split(area);

        let header = chunks[0];
        let button_width = CONFIGURE_LABEL.chars().count() as u16;
        let configure_button = Rect::new(
            header.x + header.width.saturating_sub(button_width),
            header.y,
            button_width.min(header.width),
            header.height,
        );

        let panel = chunks[2];
        let panel_inner = inner(panel);
        let field_x = panel_inner.x + FORM_LABEL_WIDTH;
        let field = |dy: u16, width: u16| {
            if panel_inner.height > dy {
                Rect::new(field_x, panel_inner.y + dy, width, 1)
            } else {
                Rect::default()
            }
        };

        let grid_block = chunks[3];
        let grid_inner = inner(grid_block);
        let grid = (grid_inner.width > 0 && grid_inner.height > 0).then(|| {
            GridGeometry::new(
                Rect::new(
                    grid_inner.x,
                    grid_inner.y,
                    grid_inner.width.min(GridGeometry::width(&self.layout)),
                    grid_inner.height.min(grid_height),
                ),
                self.layout,
            )
        });

        Regions {
            frame: area,
            header,
            configure_button,
            description: chunks[1],
            panel,
            year_field: field(0, 8),
            month_field: field(1, 14),
            apply_button: field(2, APPLY_LABEL.chars().count() as u16),
            grid_block,
            grid,
            legend: chunks[4],
            status: chunks[5],
        }
    }

    fn cell_anchor(&self, cell: GridCell) -> Anchor {
        self.regions
            .grid
            .and_then(|g| g.cell_anchor(cell))
            .unwrap_or_default()
    }

    fn cell_at(&self, x: u16, y: u16) -> Option<GridCell> {
        self.regions.grid.and_then(|g| g.cell_at(x, y))
    }

    fn popup_geometry(&self) -> Option<PopupGeometry> {
        self.interaction
            .popup()
            .map(|(_, anchor, _)| PopupGeometry::new(anchor, self.regions.frame))
    }

    /// The month containing today, or the first cell when unknown.
    fn current_month_cell(&self) -> GridCell {
        let last = self.layout.total_cells.saturating_sub(1) as i64;
        let index = self.filled().map_or(0, |n| (n - 1).clamp(0, last));
        GridCell::new(index as usize)
    }

    fn apply_config(&mut self, config: LifeConfig) {
        log::info!(
            "birth date set to {:?}/{}",
            config.birth_year,
            config.birth_month
        );
        self.config = config;
    }

    fn save_annotation(&mut self, cell: GridCell, text: &str) {
        match self.store.save_annotation(cell.key(), text) {
            Ok(ack) => self.status = Some((ack, Color::Yellow)),
            Err(e) => {
                log::warn!("failed to save annotation for {}: {e:#}", cell.key());
                self.status = Some((format!("Save failed: {e}"), Color::Red));
            }
        }
    }

    // ── Mouse ────────────────────────────────────────────────────────────────

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => match self.cell_at(x, y) {
                Some(cell) => self.interaction.pointer_enter(cell, Anchor::new(x, y)),
                None => self.interaction.pointer_leave(),
            },
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(x, y),
            _ => {}
        }
    }

    fn click_target(&self, x: u16, y: u16) -> ClickTarget {
        if let Some(popup) = self.popup_geometry() {
            if contains(popup.cancel, x, y) {
                return ClickTarget::PopupCancel;
            }
            if contains(popup.save, x, y) {
                return ClickTarget::PopupSave;
            }
            if contains(popup.area, x, y) {
                return ClickTarget::PopupBody;
            }
        }
        match self.cell_at(x, y) {
            Some(cell) => ClickTarget::Cell(cell),
            None => ClickTarget::Elsewhere,
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        self.status = None;
        let target = self.click_target(x, y);
        if let ClickEffect::Save { cell, text } = self.interaction.click(target, Anchor::new(x, y)) {
            self.save_annotation(cell, &text);
        }
        match target {
            ClickTarget::Cell(cell) => {
                log::debug!("selected cell {}", cell.key());
                self.cursor = Some(cell);
            }
            ClickTarget::Elsewhere => self.click_document(x, y),
            _ => {}
        }
    }

    /// Controls outside the grid; the selection was already cleared.
    fn click_document(&mut self, x: u16, y: u16) {
        let r = self.regions;
        if contains(r.configure_button, x, y) {
            self.panel.toggle(&self.config);
        } else if self.panel.visible {
            if contains(r.year_field, x, y) {
                self.panel.focus = FormField::Year;
            } else if contains(r.month_field, x, y) {
                self.panel.focus = FormField::Month;
            } else if contains(r.apply_button, x, y) {
                let config = self.panel.submit();
                self.apply_config(config);
            }
        }
    }

    // ── Keyboard ─────────────────────────────────────────────────────────────

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Clear the save status message on every keypress
        self.status = None;

        if self.interaction.is_editing() {
            self.handle_editing_key(code, modifiers);
            return false;
        }

        if self.panel.visible {
            if let PanelAction::Apply(config) = self.panel.handle_key(code, self.today.year()) {
                self.apply_config(config);
            }
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') => {
                self.interaction.deselect();
                self.panel.toggle(&self.config);
            }
            KeyCode::Left => self.move_cursor(-1, 0),
            KeyCode::Right => self.move_cursor(1, 0),
            KeyCode::Up => self.move_cursor(0, -1),
            KeyCode::Down => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let cell = self.cursor.unwrap_or_else(|| self.current_month_cell());
                self.cursor = Some(cell);
                let anchor = self.cell_anchor(cell);
                self.interaction.select(cell, anchor);
            }
            KeyCode::Esc => self.interaction.deselect(),
            _ => {}
        }
        false
    }

    fn handle_editing_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc => self.interaction.cancel(),
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
                if let ClickEffect::Save { cell, text } = self.interaction.finish_save() {
                    self.save_annotation(cell, &text);
                }
            }
            KeyCode::Enter => {
                if let Some(draft) = self.interaction.draft_mut() {
                    draft.push('\n');
                }
            }
            KeyCode::Backspace => {
                if let Some(draft) = self.interaction.draft_mut() {
                    draft.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(draft) = self.interaction.draft_mut() {
                    draft.push(c);
                }
            }
            _ => {}
        }
    }

    /// Moves the keyboard cursor and hovers the cell under it. The first
    /// press lands on the current month.
    fn move_cursor(&mut self, dx: i64, dy: i64) {
        let cell = match self.cursor {
            None => self.current_month_cell(),
            Some(current) => {
                let (row, col) = self.layout.position(current.index).unwrap_or((0, 0));
                let last_row = self.layout.row_count().saturating_sub(1) as i64;
                let last_col = self.layout.cells_per_row as i64 - 1;
                let row = (row as i64 + dy).clamp(0, last_row) as usize;
                let col = (col as i64 + dx).clamp(0, last_col) as usize;
                match self.layout.index_at(row, col) {
                    Some(index) => GridCell::new(index),
                    None => return,
                }
            }
        };
        self.cursor = Some(cell);
        let anchor = self.cell_anchor(cell);
        self.interaction.pointer_enter(cell, anchor);
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    pub fn render(&mut self, f: &mut Frame) {
        self.set_viewport(f.area());
        let filled = self.filled();

        self.render_header(f);
        let description = Paragraph::new(DESCRIPTION)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        f.render_widget(description, self.regions.description);
        if self.panel.visible {
            self.render_panel(f);
        }
        self.render_grid(f, filled);
        self.render_legend(f);
        self.render_status(f);
        self.render_tooltip(f);
        self.render_popup(f);
    }

    fn render_header(&self, f: &mut Frame) {
        let title = Paragraph::new(Span::styled(
            "Life Grid Visualization",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        f.render_widget(title, self.regions.header);
        let button = Paragraph::new(CONFIGURE_LABEL).style(
            Style::default()
                .fg(Color::White)
                .bg(FILLED_COLOR)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(button, self.regions.configure_button);
    }

    fn render_panel(&self, f: &mut Frame) {
        let focused = Style::default().add_modifier(Modifier::REVERSED);
        let field_style = |field: FormField| {
            if self.panel.focus == field {
                focused
            } else {
                Style::default()
            }
        };
        let lines = vec![
            Line::from(vec![
                Span::raw("Birth Year:  "),
                Span::styled(
                    format!("{:<8}", self.panel.year_input),
                    field_style(FormField::Year),
                ),
            ]),
            Line::from(vec![
                Span::raw("Birth Month: "),
                Span::styled(
                    format!("< {:<9} >", self.panel.month_label()),
                    field_style(FormField::Month),
                ),
            ]),
            Line::from(vec![
                Span::raw(" ".repeat(FORM_LABEL_WIDTH as usize)),
                Span::styled(
                    APPLY_LABEL,
                    Style::default().fg(Color::White).bg(FILLED_COLOR),
                ),
            ]),
        ];
        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Configure Your Timeline "),
        );
        f.render_widget(panel, self.regions.panel);
    }

    fn render_grid(&self, f: &mut Frame, filled: Option<i64>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Your life in months ");
        f.render_widget(block, self.regions.grid_block);
        let Some(grid) = self.regions.grid else {
            return;
        };

        let label_pad = " ".repeat(LABEL_WIDTH as usize);
        let mut header = vec![Span::raw(label_pad)];
        for col in 0..self.layout.cells_per_row {
            header.push(Span::styled(
                format!("{:<2}", col % 12 + 1),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let selected = self.interaction.selected();
        let mut lines = vec![Line::from(header)];
        for row in 0..self.layout.row_count() {
            let mut spans = vec![Span::styled(
                format!("{:>3} ", self.layout.row_label(row)),
                Style::default().fg(Color::DarkGray),
            )];
            for cell in self.layout.row_cells(row) {
                let (glyph, style) = cell_style(
                    selected == Some(cell),
                    self.cursor == Some(cell),
                    is_filled(cell.index, filled),
                );
                spans.push(Span::styled(glyph, style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
        f.render_widget(Paragraph::new(lines), grid.area);
    }

    fn render_legend(&self, f: &mut Frame) {
        let summary = calculate_summary(&self.config, self.today, &self.layout);
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let line = Line::from(vec![
            Span::styled(FILLED_GLYPH, Style::default().fg(FILLED_COLOR)),
            Span::raw(" Months lived: "),
            Span::styled(display_count(summary.months_lived), bold),
            Span::raw("    "),
            Span::styled(EMPTY_GLYPH, Style::default().fg(Color::DarkGray)),
            Span::raw(" Months remaining: "),
            Span::styled(display_count(summary.months_remaining), bold),
            Span::raw("    Current age: "),
            Span::styled(summary.current_age_text(), bold),
        ]);
        let legend =
            Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Legend "));
        f.render_widget(legend, self.regions.legend);
    }

    fn render_status(&self, f: &mut Frame) {
        let line = match &self.status {
            Some((msg, color)) => Line::from(Span::styled(msg.clone(), Style::default().fg(*color))),
            None => {
                let hint = if self.interaction.is_editing() {
                    "Type to annotate  Enter=newline  Ctrl+S=save  Esc=cancel"
                } else if self.panel.visible {
                    "Tab=switch field  ↑↓=adjust  Enter=apply  Esc=close"
                } else {
                    "Hover/click cells  ←↑↓→=move  Enter=annotate  c=configure  Esc=deselect  q=quit"
                };
                Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
            }
        };
        f.render_widget(Paragraph::new(line), self.regions.status);
    }

    fn render_tooltip(&self, f: &mut Frame) {
        let Some((cell, anchor)) = self.interaction.tooltip() else {
            return;
        };
        let text = tooltip_text(cell);
        let area = tooltip_rect(anchor, &text, self.regions.frame);
        f.render_widget(Clear, area);
        let tooltip = Paragraph::new(format!(" {text} "))
            .style(Style::default().fg(Color::White).bg(TOOLTIP_BG));
        f.render_widget(tooltip, area);
    }

    fn render_popup(&self, f: &mut Frame) {
        let (Some((cell, _, draft)), Some(geo)) = (self.interaction.popup(), self.popup_geometry())
        else {
            return;
        };
        f.render_widget(Clear, geo.area);
        let block = Block::default().borders(Borders::ALL).title(Span::styled(
            format!(" {} ", cell_label(&self.config, cell)),
            Style::default()
                .fg(FILLED_COLOR)
                .add_modifier(Modifier::BOLD),
        ));
        f.render_widget(block, geo.area);

        let text = if draft.is_empty() {
            Paragraph::new(Span::styled(
                DRAFT_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Paragraph::new(format!("{draft}_"))
        };
        f.render_widget(text.wrap(Wrap { trim: false }), geo.text_area);

        f.render_widget(
            Paragraph::new(CANCEL_LABEL).style(Style::default().fg(Color::Black).bg(Color::Gray)),
            geo.cancel,
        );
        f.render_widget(
            Paragraph::new(SAVE_LABEL).style(
                Style::default()
                    .fg(Color::White)
                    .bg(SELECTED_COLOR)
                    .add_modifier(Modifier::BOLD),
            ),
            geo.save,
        );
    }
}

fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

/// Glyph and style for a grid cell.
pub(crate) fn cell_style(is_selected: bool, is_cursor: bool, is_filled: bool) -> (&'static str, Style) {
    let glyph = if is_filled || is_selected {
        FILLED_GLYPH
    } else {
        EMPTY_GLYPH
    };
    let mut style = if is_selected {
        Style::default()
            .fg(SELECTED_COLOR)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else if is_filled {
        Style::default().fg(FILLED_COLOR)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    if is_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    (glyph, style)
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key.code, key.modifiers) {
                        break;
                    }
                }
                CEvent::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }
    Ok(())
}
