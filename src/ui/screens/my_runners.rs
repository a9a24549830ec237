//! My Runners screen (coach only).

use egui::{RichText, Ui};

use crate::auth::{AccessController, Session};
use crate::storage::models::CoachRunnerStats;
use crate::storage::Database;
use crate::ui::widgets::{MetricDisplay, MetricSize};

use super::Notice;

/// My Runners screen state.
#[derive(Default)]
pub struct MyRunnersScreen {
    stats: Vec<CoachRunnerStats>,
    loaded: bool,
    notice: Option<Notice>,
}

impl MyRunnersScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload stats on the next frame.
    pub fn invalidate(&mut self) {
        self.loaded = false;
    }

    /// Render the screen.
    pub fn show(&mut self, ui: &mut Ui, db: &Database, session: &Session) {
        if !self.loaded {
            match AccessController::new(db).my_runner_stats(session) {
                Ok(stats) => self.stats = stats,
                Err(e) => {
                    tracing::warn!("Failed to load runner stats: {}", e);
                    self.notice = Some(Notice::Error(e.to_string()));
                }
            }
            self.loaded = true;
        }

        ui.heading("My Runners");
        ui.separator();

        if let Some(notice) = &self.notice {
            notice.show(ui);
        }

        if self.stats.is_empty() {
            ui.label(RichText::new("No runners assigned to you yet.").weak());
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for runner in &self.stats {
                ui.group(|ui| {
                    ui.set_min_width(ui.available_width() - 16.0);
                    ui.label(RichText::new(&runner.name).size(16.0).strong());
                    ui.horizontal(|ui| {
                        MetricDisplay::count("Total Tests", runner.total_tests)
                            .with_size(MetricSize::Small)
                            .show(ui);
                        MetricDisplay::speed("Best Speed", runner.best_speed)
                            .with_size(MetricSize::Small)
                            .show(ui);
                        MetricDisplay::speed("Avg Speed", runner.avg_speed)
                            .with_size(MetricSize::Small)
                            .show(ui);
                    });
                });
                ui.add_space(4.0);
            }
        });
    }
}
