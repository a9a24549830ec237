//! Main application state and egui integration.

use eframe::egui;

use runsuite::auth::{Page, Session};
use runsuite::storage::{AppConfig, Database};
use runsuite::ui::screens::{
    AnalyzeScreen, LoginScreen, MyRunnersScreen, ReportsScreen, RunnersScreen, Screen,
    UsersScreen,
};
use runsuite::ui::theme::Theme;

/// Main application state.
pub struct RunSuiteApp {
    /// Current screen
    current_screen: Screen,
    /// UI theme
    theme: Theme,
    /// Application configuration
    config: AppConfig,
    /// Record store
    db: Database,
    /// Logged-in user, if any
    session: Session,
    login_screen: LoginScreen,
    analyze_screen: AnalyzeScreen,
    reports_screen: ReportsScreen,
    users_screen: UsersScreen,
    runners_screen: RunnersScreen,
    my_runners_screen: MyRunnersScreen,
}

impl RunSuiteApp {
    /// Create a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, db: Database) -> Self {
        let theme = Theme::default();
        cc.egui_ctx.set_visuals(theme.visuals());

        Self {
            current_screen: Screen::Login,
            theme,
            config,
            db,
            session: Session::anonymous(),
            login_screen: LoginScreen::new(),
            analyze_screen: AnalyzeScreen::new(),
            reports_screen: ReportsScreen::new(),
            users_screen: UsersScreen::new(),
            runners_screen: RunnersScreen::new(),
            my_runners_screen: MyRunnersScreen::new(),
        }
    }

    /// Open a page, reloading its data.
    fn navigate(&mut self, page: Page) {
        if !self.session.can_view(page) {
            tracing::warn!("Blocked navigation to {}", page.label());
            return;
        }

        tracing::debug!("Navigating to {}", page.label());
        match page {
            Page::UploadAnalyze => self.analyze_screen.invalidate(),
            Page::ViewReports => self.reports_screen.invalidate(),
            Page::ManageUsers => self.users_screen.invalidate(),
            Page::ManageRunners => self.runners_screen.invalidate(),
            Page::MyRunners => self.my_runners_screen.invalidate(),
        }
        self.current_screen = Screen::Page(page);
    }

    fn logout(&mut self) {
        self.session.logout();
        self.current_screen = Screen::Login;
        // Drop per-user state so the next login starts clean.
        self.analyze_screen = AnalyzeScreen::new();
        self.reports_screen = ReportsScreen::new();
        self.users_screen = UsersScreen::new();
        self.runners_screen = RunnersScreen::new();
        self.my_runners_screen = MyRunnersScreen::new();
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme = self.theme.toggled();
        ctx.set_visuals(self.theme.visuals());
    }

    fn render_navigation(&mut self, ctx: &egui::Context) {
        let mut next = None;
        let mut logout = false;

        egui::SidePanel::left("navigation")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                if let Some(user) = self.session.user() {
                    ui.label(
                        egui::RichText::new(format!(
                            "{}: {}",
                            user.role.as_str().to_uppercase(),
                            user.username
                        ))
                        .strong(),
                    );
                }

                ui.add_space(8.0);
                if ui.button("Logout").clicked() {
                    logout = true;
                }
                ui.separator();

                for &page in self.session.pages() {
                    let selected = self.current_screen == Screen::Page(page);
                    if ui.selectable_label(selected, page.label()).clicked() {
                        next = Some(page);
                    }
                }
            });

        if logout {
            self.logout();
        } else if let Some(page) = next {
            self.navigate(page);
        }
    }
}

impl eframe::App for RunSuiteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Running Analysis Suite");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = match self.theme {
                        Theme::Dark => "Light mode",
                        Theme::Light => "Dark mode",
                    };
                    if ui.button(theme_label).clicked() {
                        self.toggle_theme(ctx);
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("v{}", env!("CARGO_PKG_VERSION")));
                ui.separator();
                ui.label(self.config.database_path().display().to_string());
            });
        });

        if self.session.is_authenticated() {
            self.render_navigation(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.current_screen {
            Screen::Login => {
                if let Some(session) = self.login_screen.show(ui, &self.db) {
                    self.session = session;
                    self.navigate(Page::default());
                }
            }
            Screen::Page(Page::UploadAnalyze) => {
                self.analyze_screen
                    .show(ui, &self.db, &self.session, &self.config);
            }
            Screen::Page(Page::ViewReports) => {
                self.reports_screen.show(ui, &self.db, &self.session);
            }
            Screen::Page(Page::ManageUsers) => {
                self.users_screen.show(ui, &self.db, &self.session);
            }
            Screen::Page(Page::ManageRunners) => {
                self.runners_screen.show(ui, &self.db, &self.session);
            }
            Screen::Page(Page::MyRunners) => {
                self.my_runners_screen.show(ui, &self.db, &self.session);
            }
        });
    }
}
