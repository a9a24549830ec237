//! Upload & Analyze screen.

use chrono::{Local, NaiveDateTime};
use egui::{RichText, ScrollArea, Ui};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::auth::{AccessController, Session};
use crate::performance::parser::read_performance_file;
use crate::performance::pipeline::{run_analysis, AnalysisOutcome, RangeSource, RangeUploads};
use crate::performance::types::RangeLabel;
use crate::report::spreadsheet::{generate_report, generate_report_filename, save_report};
use crate::storage::models::RunnerListing;
use crate::storage::{AppConfig, Database};
use crate::ui::theme::color32;
use crate::ui::widgets::{MetricDisplay, SpeedChartView};

use super::Notice;

/// A finished run kept on screen for charting and export.
struct CompletedAnalysis {
    runner_name: String,
    generated_at: NaiveDateTime,
    outcome: AnalysisOutcome,
}

/// Upload & Analyze screen state.
pub struct AnalyzeScreen {
    runners: Vec<RunnerListing>,
    loaded: bool,
    selected_runner: Option<Uuid>,
    uploads: RangeUploads,
    /// Picked file name per range
    file_names: [Option<String>; 4],
    completed: Option<CompletedAnalysis>,
    notice: Option<Notice>,
    rng: StdRng,
}

impl Default for AnalyzeScreen {
    fn default() -> Self {
        Self {
            runners: Vec::new(),
            loaded: false,
            selected_runner: None,
            uploads: RangeUploads::new(),
            file_names: Default::default(),
            completed: None,
            notice: None,
            rng: StdRng::from_entropy(),
        }
    }
}

impl AnalyzeScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload the runner list on the next frame.
    pub fn invalidate(&mut self) {
        self.loaded = false;
    }

    fn refresh(&mut self, db: &Database, session: &Session) {
        match AccessController::new(db).visible_runners(session) {
            Ok(runners) => {
                if !runners
                    .iter()
                    .any(|l| Some(l.runner.id) == self.selected_runner)
                {
                    self.selected_runner = runners.first().map(|l| l.runner.id);
                }
                self.runners = runners;
            }
            Err(e) => {
                tracing::warn!("Failed to load runners: {}", e);
                self.notice = Some(Notice::Error(format!("Could not load runners: {}", e)));
            }
        }
        self.loaded = true;
    }

    /// Render the screen.
    pub fn show(&mut self, ui: &mut Ui, db: &Database, session: &Session, config: &AppConfig) {
        if !self.loaded {
            self.refresh(db, session);
        }

        ui.heading("Upload & Analyze Performance");
        ui.separator();

        if self.runners.is_empty() {
            ui.label(RichText::new("No runners available. Please add runners first.").weak());
            return;
        }

        ScrollArea::vertical().show(ui, |ui| {
            self.render_runner_picker(ui);
            ui.add_space(12.0);
            self.render_uploads(ui);
            ui.add_space(12.0);

            if ui.button("Analyze Performance").clicked() {
                self.analyze(db, session, config);
            }

            if let Some(notice) = &self.notice {
                ui.add_space(8.0);
                notice.show(ui);
            }

            if self.completed.is_some() {
                ui.add_space(12.0);
                ui.separator();
                self.render_results(ui, config);
            }
        });
    }

    fn selected_name(&self) -> Option<&str> {
        self.runners
            .iter()
            .find(|l| Some(l.runner.id) == self.selected_runner)
            .map(|l| l.runner.name.as_str())
    }

    fn render_runner_picker(&mut self, ui: &mut Ui) {
        let selected_text = self.selected_name().unwrap_or("Select runner").to_string();
        ui.horizontal(|ui| {
            ui.label("Select Runner:");
            egui::ComboBox::from_id_salt("analyze_runner")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for listing in &self.runners {
                        ui.selectable_value(
                            &mut self.selected_runner,
                            Some(listing.runner.id),
                            listing.runner.name.as_str(),
                        );
                    }
                });
        });
    }

    fn render_uploads(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Performance Data (Text Files)").size(16.0).strong());
        ui.label(
            RichText::new("Ranges without a file are filled with simulated sample data.").weak(),
        );
        ui.add_space(4.0);

        egui::Grid::new("upload_grid")
            .num_columns(3)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for range in RangeLabel::ALL {
                    ui.label(format!("{} Data", range.display_name()));

                    let name = self.file_names[range.index()].as_deref().unwrap_or("No file");
                    ui.label(RichText::new(name).weak());

                    ui.horizontal(|ui| {
                        if ui.button("Browse…").clicked() {
                            self.pick_file(range);
                        }
                        if self.uploads.is_uploaded(range) && ui.button("Clear").clicked() {
                            self.uploads.clear(range);
                            self.file_names[range.index()] = None;
                        }
                    });
                    ui.end_row();
                }
            });
    }

    fn pick_file(&mut self, range: RangeLabel) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Performance data", &["txt"])
            .pick_file()
        else {
            return;
        };

        match read_performance_file(&path) {
            Ok(content) => {
                self.uploads.set(range, content);
                self.file_names[range.index()] = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned());
                self.notice = None;
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                self.notice = Some(Notice::Error(format!("Could not read file: {}", e)));
            }
        }
    }

    fn analyze(&mut self, db: &Database, session: &Session, config: &AppConfig) {
        let Some(runner_id) = self.selected_runner else {
            self.notice = Some(Notice::Error("Select a runner first".to_string()));
            return;
        };
        let runner_name = self.selected_name().unwrap_or_default().to_string();

        match AccessController::new(db).can_record_for(session, &runner_id) {
            Ok(true) => {}
            Ok(false) => {
                self.notice = Some(Notice::Error("You cannot record tests for this runner".into()));
                return;
            }
            Err(e) => {
                self.notice = Some(Notice::Error(e.to_string()));
                return;
            }
        }

        let result = run_analysis(
            db,
            runner_id,
            self.uploads.clone(),
            &config.analysis,
            &config.report,
            &mut self.rng,
        );

        match result {
            Ok(outcome) => {
                self.completed = Some(CompletedAnalysis {
                    runner_name,
                    generated_at: Local::now().naive_local(),
                    outcome,
                });
                self.notice = Some(Notice::Success(
                    "Analysis complete. Data saved to database.".to_string(),
                ));
            }
            Err(e) => {
                tracing::warn!("Analysis failed: {}", e);
                self.notice = Some(Notice::Error(format!("Analysis failed: {}", e)));
            }
        }
    }

    fn render_results(&mut self, ui: &mut Ui, config: &AppConfig) {
        let Some(completed) = &self.completed else {
            return;
        };
        let outcome = &completed.outcome;

        ui.label(RichText::new("Performance Metrics").size(18.0).strong());
        ui.horizontal_wrapped(|ui| {
            for range in &outcome.summary.ranges {
                let caption = match outcome.source(range.label) {
                    RangeSource::Uploaded => format!("Avg: {:.2}", range.avg_speed),
                    RangeSource::Placeholder => format!("Avg: {:.2} (simulated)", range.avg_speed),
                };
                MetricDisplay::speed(range.label.display_name(), range.max_speed)
                    .with_caption(caption)
                    .with_color(color32(config.report.palette.color(range.label)))
                    .show(ui);
            }
        });

        ui.horizontal(|ui| {
            MetricDisplay::speed("Overall Max", outcome.summary.max_speed).show(ui);
            MetricDisplay::speed("Overall Avg", outcome.summary.avg_speed).show(ui);
            MetricDisplay::seconds("Total Time", outcome.summary.total_time).show(ui);
        });

        ui.add_space(12.0);
        ui.label(RichText::new("Speed Analysis").size(18.0).strong());
        SpeedChartView::new(&outcome.chart).show(ui);

        ui.add_space(12.0);
        if ui.button("Download Excel Report").clicked() {
            let file_name = generate_report_filename(&completed.runner_name, completed.generated_at);
            let notice = export(completed, &file_name, config);
            self.notice = notice;
        }
    }
}

/// Ask for a location and write the report there.
fn export(completed: &CompletedAnalysis, file_name: &str, config: &AppConfig) -> Option<Notice> {
    let path = rfd::FileDialog::new()
        .add_filter("Excel workbook", &["xlsx"])
        .set_file_name(file_name)
        .save_file()?;

    let result = generate_report(
        &completed.runner_name,
        completed.generated_at,
        &completed.outcome.ranges,
        &config.report,
    )
    .and_then(|bytes| save_report(&path, &bytes));

    Some(match result {
        Ok(()) => Notice::Success(format!("Report saved to {}", path.display())),
        Err(e) => {
            tracing::warn!("Report export failed: {}", e);
            Notice::Error(format!("Report export failed: {}", e))
        }
    })
}
