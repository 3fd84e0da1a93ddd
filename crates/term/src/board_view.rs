//! BoardView: rebuilds the picture of the field from game output events.
//!
//! The view never looks at the game itself. It keeps its own mirror of the
//! settled cells and the active piece, updated only through [`BoardView::apply`],
//! and draws that mirror into a [`FrameBuffer`]. This module is pure (no I/O).

use crate::core::{Grid, Output, Piece};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::PieceKind;

const TITLE: &str = "WELCOME TO TETRIS!";

const LEGEND: [(&str, &str); 6] = [
    ("Move", "← → / j l"),
    ("Down", "↓ / k"),
    ("Rotate", "↑ / i"),
    ("Drop", "space"),
    ("Quit", "q"),
    ("Start", "any key"),
];

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Event-driven view of one play session.
#[derive(Debug, Clone)]
pub struct BoardView {
    /// Board cell width in terminal columns (2 compensates for glyph aspect ratio).
    cell_w: u16,
    settled: Option<Grid>,
    active: Option<Piece>,
    welcome: bool,
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new(2)
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            settled: None,
            active: None,
            welcome: false,
        }
    }

    /// Settled cells as the view currently knows them (after the first `Welcome`)
    pub fn settled(&self) -> Option<&Grid> {
        self.settled.as_ref()
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn welcome_visible(&self) -> bool {
        self.welcome
    }

    /// Update the mirror from one event.
    pub fn apply(&mut self, event: &Output) {
        match event {
            Output::Welcome { width, height } => {
                let fits = self
                    .settled
                    .as_ref()
                    .is_some_and(|g| g.width() == *width && g.height() == *height);
                if !fits {
                    self.settled = Some(Grid::new(*height, *width));
                }
                self.welcome = true;
            }
            Output::RemoveWelcome => self.welcome = false,
            Output::Materialize(piece) => {
                // A new piece means the previous one was placed.
                self.commit_active();
                self.active = Some(*piece);
            }
            Output::Move(piece) | Output::Rotate(piece) => self.active = Some(*piece),
            Output::LineClear(rows) => {
                self.commit_active();
                if let Some(grid) = self.settled.as_mut() {
                    grid.clear_rows(rows);
                }
            }
        }
    }

    fn commit_active(&mut self) {
        if let (Some(piece), Some(grid)) = (self.active.take(), self.settled.as_mut()) {
            grid.insert(&piece);
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::new(PANEL_BG, PANEL_BG).glyph(' '));

        let Some(grid) = self.settled.as_ref() else {
            return;
        };

        // Fields wider than the terminal are clipped by the framebuffer.
        let field_w = clamp_u16(grid.width()).saturating_mul(self.cell_w);
        let field_h = clamp_u16(grid.height());
        let frame_w = field_w.saturating_add(2);
        let frame_h = field_h.saturating_add(2);
        let origin_x = viewport.width.saturating_sub(frame_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;

        draw_border(fb, origin_x, origin_y, frame_w, frame_h);

        for (r, row) in grid.rows().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                let (x, y) = self.cell_origin(origin_x, origin_y, r, c);
                match PieceKind::from_fill(cell) {
                    Some(kind) => self.draw_block(fb, x, y, kind),
                    None => self.draw_empty(fb, x, y),
                }
            }
        }

        if let Some(piece) = self.active {
            for (dr, dc) in piece.cells() {
                let r = piece.row + dr as i32;
                let c = piece.col + dc as i32;
                if r < 0 || c < 0 || r as usize >= grid.height() || c as usize >= grid.width() {
                    continue;
                }
                let (x, y) = self.cell_origin(origin_x, origin_y, r as usize, c as usize);
                self.draw_block(fb, x, y, piece.kind);
            }
        }

        if self.welcome {
            let title = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
            let text_w = TITLE.chars().count() as u16;
            let x = origin_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            fb.put_str(x, origin_y.saturating_add(frame_h / 2), TITLE, title);
            let legend_x = origin_x.saturating_add(frame_w).saturating_add(2);
            self.draw_legend(fb, viewport, legend_x, origin_y);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(viewport, &mut fb);
        fb
    }

    fn cell_origin(&self, origin_x: u16, origin_y: u16, row: usize, col: usize) -> (u16, u16) {
        let x = clamp_u16(col)
            .saturating_mul(self.cell_w)
            .saturating_add(origin_x.saturating_add(1));
        let y = clamp_u16(row).saturating_add(origin_y.saturating_add(1));
        (x, y)
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        let style = Style::new(Rgb::new(90, 90, 100), FIELD_BG).dim();
        fb.put_char(x, y, '·', style);
        fb.fill_rect(x.saturating_add(1), y, self.cell_w - 1, 1, ' ', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let style = Style::new(kind_color(kind), FIELD_BG).bold();
        fb.fill_rect(x, y, self.cell_w, 1, '█', style);
    }

    fn draw_legend(&self, fb: &mut FrameBuffer, viewport: Viewport, x: u16, y: u16) {
        if x.saturating_add(16) > viewport.width {
            return;
        }
        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);
        for (i, (name, keys)) in LEGEND.iter().enumerate() {
            let row = y.saturating_add(2 * i as u16);
            fb.put_str(x, row, name, label);
            fb.put_str(x + 2, row.saturating_add(1), keys, value);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    let style = Style::new(Rgb::new(200, 200, 200), PANEL_BG);
    let right = x.saturating_add(w - 1);
    let bottom = y.saturating_add(h - 1);

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x.saturating_add(dx), y, '─', style);
        fb.put_char(x.saturating_add(dx), bottom, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y.saturating_add(dy), '│', style);
        fb.put_char(right, y.saturating_add(dy), '│', style);
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Per-kind block color
pub fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
    }
}
