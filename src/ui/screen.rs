use ratatui::Frame;

use crate::app::{App, AppState};
use crate::ui::{menu::MenuView, quiz::QuizView, results::ResultsView};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Set picker with platform toggle
pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(MenuView::new(app), f.area());
    }
}

/// Active question, live chord and feedback
pub struct QuizScreen;

impl Screen for QuizScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        let snapshot = app.quiz.snapshot();
        let set_name = app.selected_info().map(|s| s.name.as_str());
        let view = QuizView::new(&snapshot, app.platform, set_name).palette(app.theme.palette());
        f.render_widget(view, f.area());
    }
}

/// Score and per-question breakdown
pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        if let Some(report) = app.quiz.report() {
            let view = ResultsView::new(&report).palette(app.theme.palette());
            f.render_widget(view, f.area());
        }
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Menu => Box::new(MenuScreen),
        AppState::Quiz => Box::new(QuizScreen),
        AppState::Results => Box::new(ResultsScreen),
    }
}
