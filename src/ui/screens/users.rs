//! Manage Users screen (admin only).

use chrono::Local;
use egui::{RichText, ScrollArea, Ui};

use crate::auth::{AccessController, RegisterError, Role, Session};
use crate::storage::models::User;
use crate::storage::Database;

use super::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum UsersTab {
    #[default]
    View,
    Add,
}

/// Manage Users screen state.
#[derive(Default)]
pub struct UsersScreen {
    tab: UsersTab,
    users: Vec<User>,
    loaded: bool,
    username: String,
    password: String,
    role: Option<Role>,
    notice: Option<Notice>,
}

impl UsersScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload users on the next frame.
    pub fn invalidate(&mut self) {
        self.loaded = false;
    }

    fn refresh(&mut self, db: &Database, session: &Session) {
        match AccessController::new(db).list_users(session) {
            Ok(users) => self.users = users,
            Err(e) => {
                tracing::warn!("Failed to load users: {}", e);
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }
        self.loaded = true;
    }

    /// Render the screen.
    pub fn show(&mut self, ui: &mut Ui, db: &Database, session: &Session) {
        if !self.loaded {
            self.refresh(db, session);
        }

        ui.heading("Manage Users");
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.tab, UsersTab::View, "View Users");
            ui.selectable_value(&mut self.tab, UsersTab::Add, "Add User");
        });
        ui.separator();

        match self.tab {
            UsersTab::View => self.render_list(ui),
            UsersTab::Add => self.render_form(ui, db),
        }

        if let Some(notice) = &self.notice {
            ui.add_space(8.0);
            notice.show(ui);
        }
    }

    fn render_list(&self, ui: &mut Ui) {
        ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("users_grid")
                .num_columns(3)
                .striped(true)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for header in ["Username", "User Type", "Created"] {
                        ui.label(RichText::new(header).strong());
                    }
                    ui.end_row();

                    for user in &self.users {
                        ui.label(user.username.as_str());
                        ui.label(user.role.as_str());
                        ui.label(
                            user.created_at
                                .with_timezone(&Local)
                                .format("%Y-%m-%d %H:%M")
                                .to_string(),
                        );
                        ui.end_row();
                    }
                });
        });
    }

    fn render_form(&mut self, ui: &mut Ui, db: &Database) {
        let role = *self.role.get_or_insert(Role::Runner);

        egui::Grid::new("add_user_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Username");
                ui.add(egui::TextEdit::singleline(&mut self.username).desired_width(200.0));
                ui.end_row();

                ui.label("Password");
                ui.add(
                    egui::TextEdit::singleline(&mut self.password)
                        .password(true)
                        .desired_width(200.0),
                );
                ui.end_row();

                ui.label("User Type");
                egui::ComboBox::from_id_salt("new_user_role")
                    .selected_text(role.as_str())
                    .show_ui(ui, |ui| {
                        for option in Role::ALL {
                            ui.selectable_value(&mut self.role, Some(option), option.as_str());
                        }
                    });
                ui.end_row();
            });

        ui.add_space(8.0);
        if ui.button("Add User").clicked() {
            self.submit(db, role);
        }
    }

    fn submit(&mut self, db: &Database, role: Role) {
        let username = self.username.trim().to_string();
        if username.is_empty() || self.password.is_empty() {
            self.notice = Some(Notice::Error("Username and password are required".to_string()));
            return;
        }

        self.notice = Some(
            match AccessController::new(db).register(&username, &self.password, role) {
                Ok(_) => {
                    self.username.clear();
                    self.password.clear();
                    self.loaded = false;
                    Notice::Success(format!("User {} added successfully!", username))
                }
                Err(RegisterError::DuplicateUsername(_)) => {
                    Notice::Error("Username already exists!".to_string())
                }
                Err(e) => Notice::Error(e.to_string()),
            },
        );
    }
}
