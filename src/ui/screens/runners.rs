//! Manage Runners screen (admin only).

use egui::{RichText, ScrollArea, Ui};
use uuid::Uuid;

use crate::auth::{AccessController, Session};
use crate::storage::models::{RunnerListing, User};
use crate::storage::Database;

use super::Notice;

/// Manage Runners screen state.
#[derive(Default)]
pub struct RunnersScreen {
    runners: Vec<RunnerListing>,
    coaches: Vec<User>,
    loaded: bool,
    name: String,
    coach_id: Option<Uuid>,
    notice: Option<Notice>,
}

impl RunnersScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload runners and coaches on the next frame.
    pub fn invalidate(&mut self) {
        self.loaded = false;
    }

    fn refresh(&mut self, db: &Database, session: &Session) {
        let access = AccessController::new(db);
        let loaded = access
            .visible_runners(session)
            .and_then(|runners| Ok((runners, access.assignable_coaches(session)?)));

        match loaded {
            Ok((runners, coaches)) => {
                self.runners = runners;
                self.coaches = coaches;
            }
            Err(e) => {
                tracing::warn!("Failed to load runners: {}", e);
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

        ui.heading("Manage Runners");
        ui.separator();

        ui.label(RichText::new("Add New Runner").size(16.0).strong());
        self.render_form(ui, db, session);

        if let Some(notice) = &self.notice {
            ui.add_space(8.0);
            notice.show(ui);
        }

        ui.add_space(12.0);
        ui.label(RichText::new("Current Runners").size(16.0).strong());
        self.render_list(ui);
    }

    fn render_form(&mut self, ui: &mut Ui, db: &Database, session: &Session) {
        if self.coaches.is_empty() {
            ui.label(RichText::new("No coaches available. Please add a coach user first.").weak());
            return;
        }

        let coach_text = self
            .coaches
            .iter()
            .find(|c| Some(c.id) == self.coach_id)
            .map_or("Unassigned", |c| c.username.as_str())
            .to_string();

        egui::Grid::new("add_runner_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Runner Name/ID");
                ui.add(egui::TextEdit::singleline(&mut self.name).desired_width(200.0));
                ui.end_row();

                ui.label("Assign to Coach");
                egui::ComboBox::from_id_salt("runner_coach")
                    .selected_text(coach_text)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.coach_id, None, "Unassigned");
                        for coach in &self.coaches {
                            ui.selectable_value(
                                &mut self.coach_id,
                                Some(coach.id),
                                coach.username.as_str(),
                            );
                        }
                    });
                ui.end_row();
            });

        ui.add_space(8.0);
        if ui.button("Add Runner").clicked() {
            let result = AccessController::new(db).create_runner(session, &self.name, self.coach_id);
            self.notice = Some(match result {
                Ok(runner) => {
                    self.name.clear();
                    self.loaded = false;
                    Notice::Success(format!("Runner {} added successfully!", runner.name))
                }
                Err(e) => Notice::Error(e.to_string()),
            });
        }
    }

    fn render_list(&self, ui: &mut Ui) {
        if self.runners.is_empty() {
            ui.label(RichText::new("No runners yet.").weak());
            return;
        }

        ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("runners_grid")
                .num_columns(2)
                .striped(true)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Runner").strong());
                    ui.label(RichText::new("Coach").strong());
                    ui.end_row();

                    for listing in &self.runners {
                        ui.label(listing.runner.name.as_str());
                        ui.label(listing.coach_username.as_deref().unwrap_or("-"));
                        ui.end_row();
                    }
                });
        });
    }
}
