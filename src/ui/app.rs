//! Main application for the tic-tac-toe GUI

use eframe::egui;
use egui::{Align2, CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Window};

use super::board_view::{BoardOverlay, BoardView};
use super::game_state::{GameMode, Session};
use super::theme::*;
use crate::{BoardSize, GameStatus, Player};

/// Main tic-tac-toe application
pub struct TicTacToeApp {
    session: Session,
    board_view: BoardView,
    show_debug: bool,
}

impl Default for TicTacToeApp {
    fn default() -> Self {
        Self::with_session(Session::new(BoardSize::Three, GameMode::default(), false))
    }
}

impl TicTacToeApp {
    /// Create the app with the size and mode picked on the command line
    pub fn new(_cc: &eframe::CreationContext<'_>, size: BoardSize, mode: GameMode, parallel: bool) -> Self {
        Self::with_session(Session::new(size, mode, parallel))
    }

    fn with_session(session: Session) -> Self {
        Self {
            session,
            board_view: BoardView::default(),
            show_debug: false,
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("Restart (R)").clicked() {
                        self.session.reset();
                        ui.close_menu();
                    }
                    ui.separator();
                    for mode in [GameMode::Multiplayer, GameMode::VsAi] {
                        if ui.button(mode.label()).clicked() {
                            self.session.set_mode(mode);
                            ui.close_menu();
                        }
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} - {}", self.session.mode.label(), self.session.game.size()));
                });
            });
        });
    }

    /// Render the side panel with game info and controls
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(220.0)
            .max_width(260.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.label(RichText::new("TIC-TAC-TOE").size(22.0).strong().color(TEXT_PRIMARY));
                });
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_settings_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(msg) = &self.session.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn player_color(player: Player) -> egui::Color32 {
        match player {
            Player::X => X_MARK,
            Player::O => O_MARK,
        }
    }

    /// Render turn indicator card
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let color = match self.session.game.status() {
                GameStatus::InProgress => Self::player_color(self.session.game.current_player()),
                GameStatus::Won(player) => Self::player_color(player),
                GameStatus::Draw => TEXT_PRIMARY,
            };
            ui.label(RichText::new(self.session.status_text()).size(18.0).strong().color(color));

            let sub = if self.session.is_ai_thinking() {
                RichText::new("AI thinking...").color(STATUS_THINKING)
            } else {
                RichText::new(format!("Move #{}", self.session.game.history().len() + 1)).color(TEXT_SECONDARY)
            };
            ui.label(sub.size(12.0));
        });
    }

    /// Board size, mode and restart
    fn render_settings_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("SETTINGS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            let mut size = self.session.game.size();
            egui::ComboBox::from_label("Board")
                .selected_text(size.to_string())
                .show_ui(ui, |ui| {
                    for option in BoardSize::ALL {
                        ui.selectable_value(&mut size, option, option.to_string());
                    }
                });
            if size != self.session.game.size() {
                self.session.set_size(size);
            }

            ui.add_space(6.0);
            let toggle = format!("Switch to {}", self.session.mode.toggled().label());
            if ui.button(toggle).clicked() {
                self.session.set_mode(self.session.mode.toggled());
            }

            ui.add_space(6.0);
            if ui.button("Restart").clicked() {
                self.session.reset();
            }
        });
    }

    /// Render debug card
    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            match &self.session.last_ai_result {
                Some(result) => {
                    ui.label(RichText::new(format!("{:?}", result.search_type)).size(11.0).strong().color(WIN_HIGHLIGHT));
                    ui.label(RichText::new(format!("Score: {}", result.score)).size(10.0).color(TEXT_SECONDARY));
                    ui.label(RichText::new(format!("{}ms, {} nodes", result.time_ms, result.nodes)).size(10.0).color(TEXT_SECONDARY));
                    if let Some(pos) = result.best_move {
                        ui.label(RichText::new(format!("-> {pos}")).size(12.0).strong().color(TEXT_PRIMARY));
                    }
                }
                None => {
                    let text = match self.session.ai_thinking_elapsed() {
                        Some(elapsed) => format!("Thinking {:.2}s", elapsed.as_secs_f32()),
                        None => "Waiting for AI...".to_string(),
                    };
                    ui.label(RichText::new(text).size(10.0).color(TEXT_MUTED));
                }
            }
        });
    }

    /// Render status message card
    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(STATUS_ERROR)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Modal-style window announcing the result
    fn render_game_over(&mut self, ctx: &Context) {
        if !self.session.is_over() {
            return;
        }
        Window::new("Game Over")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(self.session.status_text()).size(20.0).strong().color(TEXT_PRIMARY));
                    ui.add_space(10.0);
                    if ui.button("Restart").clicked() {
                        self.session.reset();
                    }
                });
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let winning_line = self.session.game.winning_line();
            let locked = self.session.is_over()
                || self.session.is_ai_thinking()
                || !self.session.is_human(self.session.game.current_player());

            let clicked = ui
                .vertical_centered(|ui| {
                    self.board_view.show(
                        ui,
                        self.session.game.board(),
                        BoardOverlay {
                            current_player: self.session.game.current_player(),
                            winning_line: winning_line.as_deref(),
                            flash: self.session.flash(),
                            locked,
                        },
                    )
                })
                .inner;

            if let Some(pos) = clicked {
                if let Err(msg) = self.session.try_play(pos) {
                    self.session.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (debug, restart) = ctx.input(|i| (i.key_pressed(egui::Key::D), i.key_pressed(egui::Key::R)));
        if debug {
            self.show_debug = !self.show_debug;
        }
        if restart {
            self.session.reset();
        }
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        // Check AI result
        self.session.check_ai_result();

        // Start AI thinking if needed
        if self.session.is_ai_turn() && !self.session.is_ai_thinking() {
            self.session.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);
        self.render_game_over(ctx);

        // Request repaint while the flash fades or AI is thinking
        if self.session.is_ai_thinking() || self.session.flash().is_some() {
            ctx.request_repaint();
        }
    }
}
