use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{info, warn};

use crate::catalog::{ShortcutSetInfo, ShortcutSource};
use crate::config::{Config, ConfigStore};
use crate::error::QuizError;
use crate::input::{to_key_action, KeyAction};
use crate::platform::{Platform, PlatformChoice, PlatformProbe};
use crate::quiz::{Quiz, QuizState};
use crate::theme::Theme;

/// How long an error notice stays up unless dismissed
pub const NOTICE_TTL: Duration = Duration::from_secs(10);

pub const NO_SET_SELECTED: &str = "Please select a shortcut set first";
pub const EMPTY_SET: &str = "No shortcuts available for this set. Please select a different set.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Quiz,
    Results,
}

/// What the event loop should do after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct MenuState {
    pub cursor: usize,
}

/// Everything the terminal front-end needs: the quiz plus menu, platform, theme and notices
pub struct App {
    pub quiz: Quiz,
    pub state: AppState,
    pub menu: MenuState,
    pub sets: Vec<ShortcutSetInfo>,
    pub selected_set: Option<String>,
    pub platform_choice: PlatformChoice,
    pub platform: Platform,
    pub theme: Theme,
    pub notice: Option<Notice>,
    /// Preferences as stored; a `--platform` override never lands here
    config: Config,
    source: Box<dyn ShortcutSource>,
    probe: Box<dyn PlatformProbe>,
    store: Box<dyn ConfigStore>,
}

impl App {
    pub fn new(
        source: Box<dyn ShortcutSource>,
        probe: Box<dyn PlatformProbe>,
        store: Box<dyn ConfigStore>,
        platform_override: Option<PlatformChoice>,
    ) -> Self {
        let config = store.load();
        let platform_choice = platform_override.unwrap_or(config.platform);
        let platform = platform_choice.resolve(probe.as_ref());
        let sets = source.sets();

        let mut menu = MenuState::default();
        let selected_set = config
            .last_set
            .clone()
            .filter(|id| sets.iter().any(|s| &s.id == id));
        if let Some(id) = &selected_set {
            menu.cursor = sets.iter().position(|s| &s.id == id).unwrap_or(0);
        }

        Self {
            quiz: Quiz::new(),
            state: AppState::Menu,
            menu,
            sets,
            selected_set,
            platform_choice,
            platform,
            theme: config.theme,
            notice: None,
            config,
            source,
            probe,
            store,
        }
    }

    pub fn selected_info(&self) -> Option<&ShortcutSetInfo> {
        let id = self.selected_set.as_deref()?;
        self.sets.iter().find(|s| s.id == id)
    }

    pub fn set_platform_choice(&mut self, choice: PlatformChoice) {
        self.platform_choice = choice;
        self.platform = choice.resolve(self.probe.as_ref());
        info!(choice = %choice, platform = %self.platform, "platform changed");
        self.config.platform = choice;
        self.save_config();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        info!(theme = %self.theme, "theme changed");
        self.config.theme = self.theme;
        self.save_config();
    }

    /// Marks the set under the menu cursor as the one to test
    pub fn select_at_cursor(&mut self) {
        if let Some(set) = self.sets.get(self.menu.cursor) {
            self.selected_set = Some(set.id.clone());
            self.config.last_set = Some(set.id.clone());
            self.save_config();
        }
    }

    pub fn select_set(&mut self, id: &str) -> bool {
        match self.sets.iter().position(|s| s.id == id) {
            Some(pos) => {
                self.menu.cursor = pos;
                self.select_at_cursor();
                true
            }
            None => false,
        }
    }

    /// Loads the selected set and begins a quiz, or leaves a notice explaining why not
    pub fn start_test(&mut self, now: Instant) {
        self.notice = None;

        let Some(set_id) = self.selected_set.clone() else {
            self.show_notice(NO_SET_SELECTED, now);
            return;
        };

        let shortcuts = match self.source.shortcuts(&set_id, self.platform) {
            Ok(shortcuts) => shortcuts,
            Err(e) => {
                warn!(error = %e, "failed to load shortcuts");
                self.show_notice(format!("Failed to load shortcuts: {e}"), now);
                return;
            }
        };

        match self.quiz.start(shortcuts) {
            Ok(()) => {
                info!(set = %set_id, platform = %self.platform, "test started");
                self.state = AppState::Quiz;
            }
            Err(QuizError::EmptySet) => self.show_notice(EMPTY_SET, now),
        }
    }

    pub fn back_to_menu(&mut self) {
        self.quiz.reset();
        self.state = AppState::Menu;
    }

    pub fn show_notice(&mut self, text: impl Into<String>, now: Instant) {
        self.notice = Some(Notice {
            text: text.into(),
            expires_at: now + NOTICE_TTL,
        });
    }

    /// Fires due quiz timers and expires notices. Returns true if a redraw is needed.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let mut changed = self.quiz.on_tick(now);

        if self.state == AppState::Quiz && self.quiz.state() == QuizState::Completed {
            self.state = AppState::Results;
            changed = true;
        }

        if self.notice.as_ref().is_some_and(|n| n.expires_at <= now) {
            self.notice = None;
            changed = true;
        }

        changed
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        let notice = self.notice.as_ref().map(|n| n.expires_at);
        match (self.quiz.next_deadline(), notice) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        match self.state {
            AppState::Quiz => {
                self.on_quiz_key(key, now);
                Flow::Continue
            }
            _ if key.kind == KeyEventKind::Release => Flow::Continue,
            _ if is_ctrl_c(&key) => Flow::Quit,
            AppState::Menu => self.on_menu_key(key, now),
            AppState::Results => self.on_results_key(key, now),
        }
    }

    fn on_quiz_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(action) = to_key_action(&key) else {
            return;
        };

        match action {
            KeyAction::Down(press) if !press.has_modifier() && press.key == "Esc" => {
                self.back_to_menu();
            }
            KeyAction::Down(press) if !press.has_modifier() && press.key == "Tab" => {
                self.quiz.skip(now);
            }
            KeyAction::Down(press) => self.quiz.on_key_down(&press, now),
            KeyAction::Up(press) => self.quiz.on_key_up(&press),
        }
    }

    fn on_menu_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu.cursor = self.menu.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.menu.cursor + 1 < self.sets.len() {
                    self.menu.cursor += 1;
                }
            }
            KeyCode::Char(' ') => self.select_at_cursor(),
            KeyCode::Enter => {
                self.select_at_cursor();
                self.start_test(now);
            }
            KeyCode::Char('s') => self.start_test(now),
            KeyCode::Char('p') => self.set_platform_choice(self.platform_choice.cycle()),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('x') => self.notice = None,
            _ => {}
        }
        Flow::Continue
    }

    fn on_results_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        match key.code {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('r') => self.start_test(now),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('m') => self.back_to_menu(),
            _ => {}
        }
        Flow::Continue
    }

    fn save_config(&self) {
        if let Err(e) = self.store.save(&self.config) {
            warn!(error = %e, "failed to save preferences");
        }
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
