//! View Reports screen.

use chrono::{Local, NaiveDate};
use egui::{RichText, ScrollArea, Ui};

use crate::auth::{AccessController, Session};
use crate::metrics::reports::{progression, summarize_records};
use crate::report::chart::ProgressionChart;
use crate::storage::models::{RecordFilter, RecordListing};
use crate::storage::Database;
use crate::ui::theme::Theme;
use crate::ui::widgets::{MetricDisplay, ProgressionChartView};

use super::Notice;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// View Reports screen state.
#[derive(Default)]
pub struct ReportsScreen {
    records: Vec<RecordListing>,
    loaded: bool,
    runner_filter: Option<String>,
    from_input: String,
    to_input: String,
    notice: Option<Notice>,
}

impl ReportsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload records on the next frame.
    pub fn invalidate(&mut self) {
        self.loaded = false;
    }

    fn refresh(&mut self, db: &Database, session: &Session) {
        match AccessController::new(db).visible_records(session) {
            Ok(records) => {
                self.from_input = bound_text(records.iter().map(|l| l.record.test_date).min());
                self.to_input = bound_text(records.iter().map(|l| l.record.test_date).max());
                self.records = records;
                self.notice = None;
            }
            Err(e) => {
                tracing::warn!("Failed to load records: {}", e);
                self.notice = Some(Notice::Error(format!("Could not load records: {}", e)));
            }
        }
        self.loaded = true;
    }

    /// Current filter. Unparseable dates leave that bound open.
    fn filter(&self) -> RecordFilter {
        RecordFilter {
            runner_name: self.runner_filter.clone(),
            from: parse_date(&self.from_input),
            to: parse_date(&self.to_input),
        }
    }

    /// Render the screen.
    pub fn show(&mut self, ui: &mut Ui, db: &Database, session: &Session) {
        if !self.loaded {
            self.refresh(db, session);
        }

        ui.heading("Performance Reports");
        ui.separator();

        if let Some(notice) = &self.notice {
            notice.show(ui);
        }

        if self.records.is_empty() {
            ui.label(RichText::new("No performance data available yet.").weak());
            return;
        }

        self.render_filters(ui);
        ui.add_space(8.0);

        let filter = self.filter();
        let filtered: Vec<&RecordListing> =
            self.records.iter().filter(|l| filter.matches(l)).collect();

        ScrollArea::vertical().show(ui, |ui| {
            ui.label(RichText::new("Summary Statistics").size(18.0).strong());
            let stats = summarize_records(&filtered);
            ui.horizontal_wrapped(|ui| {
                MetricDisplay::count("Total Tests", stats.total_tests).show(ui);
                MetricDisplay::speed("Avg Max Speed", stats.avg_max_speed).show(ui);
                MetricDisplay::speed("Best Speed", stats.best_speed).show(ui);
                MetricDisplay::seconds("Avg Time", stats.avg_total_time).show(ui);
            });

            ui.add_space(12.0);
            ui.label(RichText::new("Performance Trends").size(18.0).strong());
            match &self.runner_filter {
                Some(runner) => match ProgressionChart::build(runner, &progression(&filtered)) {
                    Some(chart) => {
                        ProgressionChartView::new(&chart).show(ui);
                    }
                    None => {
                        ui.label(RichText::new("At least two tests are needed for a trend.").weak());
                    }
                },
                None => {
                    ui.label(RichText::new("Select a runner to see their progression.").weak());
                }
            }

            ui.add_space(12.0);
            ui.label(RichText::new("Detailed Records").size(18.0).strong());
            render_table(ui, &filtered);
        });
    }

    fn render_filters(&mut self, ui: &mut Ui) {
        let mut runners: Vec<&str> = self.records.iter().map(|l| l.runner_name.as_str()).collect();
        runners.sort_unstable();
        runners.dedup();

        let selected = self.runner_filter.clone().unwrap_or_else(|| "All".to_string());
        let mut choice = self.runner_filter.clone();

        ui.horizontal(|ui| {
            ui.label("Filter by Runner:");
            egui::ComboBox::from_id_salt("reports_runner")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut choice, None, "All");
                    for name in &runners {
                        ui.selectable_value(&mut choice, Some(name.to_string()), *name);
                    }
                });

            ui.separator();

            ui.label("From:");
            date_field(ui, &mut self.from_input);
            ui.label("To:");
            date_field(ui, &mut self.to_input);
        });

        if choice != self.runner_filter {
            tracing::debug!("Reports runner filter: {:?}", choice);
            self.runner_filter = choice;
        }
    }
}

fn render_table(ui: &mut Ui, records: &[&RecordListing]) {
    egui::Grid::new("records_grid")
        .num_columns(5)
        .striped(true)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for header in [
                "Runner",
                "Test Date",
                "Max Speed (m/s)",
                "Avg Speed (m/s)",
                "Total Time (s)",
            ] {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();

            for listing in records {
                let record = &listing.record;
                ui.label(listing.runner_name.as_str());
                ui.label(
                    record
                        .test_date
                        .with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M")
                        .to_string(),
                );
                ui.label(format!("{:.2}", record.max_speed));
                ui.label(format!("{:.2}", record.avg_speed));
                ui.label(format!("{:.2}", record.total_time));
                ui.end_row();
            }
        });
}

fn date_field(ui: &mut Ui, text: &mut String) {
    let valid = text.trim().is_empty() || parse_date(text).is_some();
    let mut edit = egui::TextEdit::singleline(text)
        .desired_width(100.0)
        .hint_text("YYYY-MM-DD");
    if !valid {
        edit = edit.text_color(Theme::of(ui).palette().error);
    }
    ui.add(edit);
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

fn bound_text(date: Option<chrono::DateTime<chrono::Utc>>) -> String {
    date.map(|d| d.date_naive().format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
