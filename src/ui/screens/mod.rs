//! UI screens for the application.

pub mod analyze;
pub mod login;
pub mod my_runners;
pub mod reports;
pub mod runners;
pub mod users;

pub use analyze::AnalyzeScreen;
pub use login::LoginScreen;
pub use my_runners::MyRunnersScreen;
pub use reports::ReportsScreen;
pub use runners::RunnersScreen;
pub use users::UsersScreen;

use egui::{RichText, Ui};

use crate::auth::Page;
use crate::ui::theme::Theme;

/// Screen navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Login form, the only screen of an anonymous session
    #[default]
    Login,
    /// A dashboard page
    Page(Page),
}

/// One-line feedback shown under a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Error(String),
}

impl Notice {
    pub fn show(&self, ui: &mut Ui) {
        let palette = Theme::of(ui).palette();
        let (text, color) = match self {
            Notice::Success(text) => (text, palette.success),
            Notice::Info(text) => (text, palette.accent),
            Notice::Error(text) => (text, palette.error),
        };
        ui.label(RichText::new(text).color(color));
    }
}
