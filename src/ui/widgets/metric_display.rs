//! Metric card widget for headline speed and time values.

use egui::{Align, Color32, Layout, RichText, Ui, Vec2};

/// A widget for displaying a single metric.
pub struct MetricDisplay<'a> {
    /// The metric value to display
    value: String,
    /// The unit label
    unit: &'a str,
    /// The metric name/label
    label: &'a str,
    /// Secondary line under the value
    caption: Option<String>,
    /// Optional accent colour for the value
    color: Option<Color32>,
    /// Size multiplier
    size: MetricSize,
}

/// Size variants for metric display.
#[derive(Debug, Clone, Copy, Default)]
pub enum MetricSize {
    /// Small metric (secondary display)
    Small,
    /// Medium metric (standard display)
    #[default]
    Medium,
    /// Large metric (primary focus)
    Large,
}

impl MetricSize {
    fn value_size(&self) -> f32 {
        match self {
            MetricSize::Small => 22.0,
            MetricSize::Medium => 32.0,
            MetricSize::Large => 48.0,
        }
    }

    fn unit_size(&self) -> f32 {
        match self {
            MetricSize::Small => 12.0,
            MetricSize::Medium => 14.0,
            MetricSize::Large => 18.0,
        }
    }

    fn label_size(&self) -> f32 {
        match self {
            MetricSize::Small => 11.0,
            MetricSize::Medium => 13.0,
            MetricSize::Large => 15.0,
        }
    }
}

impl<'a> MetricDisplay<'a> {
    /// Create a new metric display.
    pub fn new(value: impl Into<String>, unit: &'a str, label: &'a str) -> Self {
        Self {
            value: value.into(),
            unit,
            label,
            caption: None,
            color: None,
            size: MetricSize::default(),
        }
    }

    /// Speed in m/s with two decimals.
    pub fn speed(label: &'a str, meters_per_sec: f64) -> Self {
        Self::new(format!("{:.2}", meters_per_sec), "m/s", label)
    }

    /// Duration in seconds with two decimals.
    pub fn seconds(label: &'a str, secs: f64) -> Self {
        Self::new(format!("{:.2}", secs), "s", label)
    }

    /// Plain count.
    pub fn count(label: &'a str, n: usize) -> Self {
        Self::new(n.to_string(), "", label)
    }

    /// Add a secondary line, e.g. `Avg: 7.20`.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Colour the value.
    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the display size.
    pub fn with_size(mut self, size: MetricSize) -> Self {
        self.size = size;
        self
    }

    /// Render the metric display.
    pub fn show(self, ui: &mut Ui) {
        let min_size = match self.size {
            MetricSize::Small => Vec2::new(80.0, 60.0),
            MetricSize::Medium => Vec2::new(140.0, 80.0),
            MetricSize::Large => Vec2::new(180.0, 100.0),
        };

        egui::Frame::group(ui.style()).inner_margin(8.0).show(ui, |ui| {
            ui.set_min_size(min_size);

            ui.with_layout(Layout::top_down(Align::Center), |ui| {
                ui.label(RichText::new(self.label).size(self.size.label_size()).weak());

                ui.add_space(4.0);

                let value_text = RichText::new(&self.value).size(self.size.value_size()).strong();
                let value_text = match self.color {
                    Some(color) => value_text.color(color),
                    None => value_text,
                };

                ui.horizontal(|ui| {
                    ui.label(value_text);
                    if !self.unit.is_empty() {
                        ui.label(RichText::new(self.unit).size(self.size.unit_size()).weak());
                    }
                });

                if let Some(caption) = &self.caption {
                    ui.label(RichText::new(caption).size(self.size.label_size()).weak());
                }
            });
        });
    }
}
