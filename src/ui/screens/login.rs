//! Login screen.

use egui::{RichText, Ui, Vec2};

use crate::auth::{AccessController, Session};
use crate::storage::Database;

use super::Notice;

/// Login form state.
#[derive(Default)]
pub struct LoginScreen {
    username: String,
    password: String,
    notice: Option<Notice>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the form. Returns a session once credentials check out.
    pub fn show(&mut self, ui: &mut Ui, db: &Database) -> Option<Session> {
        let mut session = None;

        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.label(RichText::new("Running Analysis Suite").size(40.0).strong());
            ui.add_space(8.0);
            ui.label(RichText::new("Login to Continue").size(18.0).weak());
            ui.add_space(32.0);

            ui.group(|ui| {
                ui.set_max_width(320.0);

                egui::Grid::new("login_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Username");
                        ui.add(egui::TextEdit::singleline(&mut self.username).desired_width(200.0));
                        ui.end_row();

                        ui.label("Password");
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut self.password)
                                .password(true)
                                .desired_width(200.0),
                        );
                        ui.end_row();

                        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            session = self.submit(db);
                        }
                    });

                ui.add_space(8.0);
                if ui
                    .add_sized(Vec2::new(280.0, 36.0), egui::Button::new("Login"))
                    .clicked()
                {
                    session = self.submit(db);
                }
            });

            if let Some(notice) = &self.notice {
                ui.add_space(8.0);
                notice.show(ui);
            }

            ui.add_space(16.0);
            ui.label(RichText::new("Don't have an account? Contact admin for registration.").weak());
        });

        session
    }

    fn submit(&mut self, db: &Database) -> Option<Session> {
        let access = AccessController::new(db);
        match access.authenticate(self.username.trim(), &self.password) {
            Some(user) => {
                *self = Self::default();
                Some(Session::login(user))
            }
            None => {
                self.password.clear();
                self.notice = Some(Notice::Error("Invalid username or password".to_string()));
                None
            }
        }
    }
}
