//! Board rendering for the tic-tac-toe GUI

use egui::{CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::{Board, Cell, Player, Pos};

use super::theme::*;

/// What the board needs to know about the round besides the marks
pub struct BoardOverlay<'a> {
    pub current_player: Player,
    pub winning_line: Option<&'a [Pos]>,
    pub flash: Option<(Pos, f32)>,
    /// Clicks and hover are ignored
    pub locked: bool,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Cells per row of the last drawn board
    n: usize,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 100.0,
            n: 3,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return click position if any
    pub fn show(&mut self, ui: &mut egui::Ui, board: &Board, overlay: BoardOverlay<'_>) -> Option<Pos> {
        let available_size = ui.available_size();

        // Calculate board size to fit available space
        let board_size = (available_size.x.min(available_size.y) - 20.0).max(120.0);
        self.n = board.size().n();
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / self.n as f32;

        let (response, painter) = ui.allocate_painter(Vec2::splat(board_size), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(6), BOARD_BG);

        for idx in 0..board.size().cells() {
            let pos = Pos::from_index(idx, self.n);
            let rect = self.cell_rect(pos);
            painter.rect_filled(rect, CornerRadius::same(4), CELL_BG);
            match board.cell_at(idx) {
                Cell::X => self.draw_x(&painter, rect),
                Cell::O => self.draw_o(&painter, rect),
                Cell::Empty => {}
            }
        }

        if let Some((pos, strength)) = overlay.flash {
            painter.rect_filled(
                self.cell_rect(pos),
                CornerRadius::same(4),
                FLASH.gamma_multiply(0.6 * strength),
            );
        }

        if let Some(line) = overlay.winning_line {
            self.draw_winning_line(&painter, line);
        }

        if overlay.locked {
            return None;
        }

        // Handle hover preview and click
        let pointer = response.hover_pos()?;
        let pos = self.screen_to_board(pointer)?;
        let is_valid = board.is_empty(pos);

        let hover_color = if is_valid { hover_valid() } else { hover_invalid() };
        painter.rect_filled(self.cell_rect(pos), CornerRadius::same(4), hover_color);
        if is_valid {
            self.draw_preview(&painter, pos, overlay.current_player);
        }

        (response.clicked() && is_valid).then_some(pos)
    }

    fn mark_stroke(&self, color: egui::Color32) -> Stroke {
        Stroke::new(self.cell_size * MARK_STROKE_RATIO, color)
    }

    fn draw_x(&self, painter: &Painter, rect: Rect) {
        let inner = rect.shrink(rect.width() * MARK_INSET_RATIO);
        let stroke = self.mark_stroke(X_MARK);
        painter.line_segment([inner.left_top(), inner.right_bottom()], stroke);
        painter.line_segment([inner.right_top(), inner.left_bottom()], stroke);
    }

    fn draw_o(&self, painter: &Painter, rect: Rect) {
        let radius = rect.width() * (0.5 - MARK_INSET_RATIO);
        painter.circle_stroke(rect.center(), radius, self.mark_stroke(O_MARK));
    }

    /// Faded mark of the player to move
    fn draw_preview(&self, painter: &Painter, pos: Pos, player: Player) {
        let rect = self.cell_rect(pos);
        let inner = rect.shrink(rect.width() * MARK_INSET_RATIO);
        match player {
            Player::X => {
                let stroke = self.mark_stroke(X_MARK.gamma_multiply(0.3));
                painter.line_segment([inner.left_top(), inner.right_bottom()], stroke);
                painter.line_segment([inner.right_top(), inner.left_bottom()], stroke);
            }
            Player::O => {
                let radius = rect.width() * (0.5 - MARK_INSET_RATIO);
                painter.circle_stroke(rect.center(), radius, self.mark_stroke(O_MARK.gamma_multiply(0.3)));
            }
        }
    }

    /// Stroke through the centers of the winning cells
    fn draw_winning_line(&self, painter: &Painter, line: &[Pos]) {
        let (Some(first), Some(last)) = (line.first(), line.last()) else {
            return;
        };
        let stroke = Stroke::new(WIN_STROKE_WIDTH, WIN_HIGHLIGHT);
        painter.line_segment([self.board_to_screen(*first), self.board_to_screen(*last)], stroke);
    }

    /// Screen rectangle of a cell, inset by the gap
    fn cell_rect(&self, pos: Pos) -> Rect {
        let min = self.board_rect.min
            + Vec2::new(
                BOARD_MARGIN + pos.col as f32 * self.cell_size,
                BOARD_MARGIN + pos.row as f32 * self.cell_size,
            );
        Rect::from_min_size(min, Vec2::splat(self.cell_size)).shrink(CELL_GAP * 0.5)
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let col = ((relative.x - BOARD_MARGIN) / self.cell_size).floor() as i32;
        let row = ((relative.y - BOARD_MARGIN) / self.cell_size).floor() as i32;

        let n = self.n as i32;
        if (0..n).contains(&col) && (0..n).contains(&row) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Convert board position to the screen coordinates of the cell center
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + (pos.col as f32 + 0.5) * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + (pos.row as f32 + 0.5) * self.cell_size;
        Pos2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(n: usize) -> BoardView {
        BoardView {
            cell_size: 100.0,
            n,
            board_rect: Rect::from_min_size(Pos2::ZERO, Vec2::splat(2.0 * BOARD_MARGIN + 100.0 * n as f32)),
        }
    }

    #[test]
    fn test_screen_board_round_trip() {
        let view = view(4);
        for idx in 0..16 {
            let pos = Pos::from_index(idx, 4);
            assert_eq!(view.screen_to_board(view.board_to_screen(pos)), Some(pos));
        }
    }

    #[test]
    fn test_outside_board_is_none() {
        let view = view(3);
        assert_eq!(view.screen_to_board(Pos2::new(1.0, 1.0)), None);
        assert_eq!(view.screen_to_board(Pos2::new(BOARD_MARGIN + 301.0, 50.0)), None);
    }
}
