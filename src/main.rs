use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    tty::IsTty,
};
use memokeys::{
    app::{App, Flow},
    app_dirs::AppDirs,
    catalog::{categories, Catalog, ShortcutSource},
    config::FileConfigStore,
    logging,
    platform::{HostPlatform, PlatformChoice},
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    ui,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{info, warn};

const TICK_RATE_MS: u64 = 25;

/// keyboard shortcut quiz: press the chord, get graded, learn your shortcuts
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A keyboard shortcut quiz for the terminal. Pick a shortcut set, press the chord for each action and see how many you know."
)]
pub struct Cli {
    /// shortcut set to start right away (see --list)
    #[clap(short = 's', long = "set")]
    set: Option<String>,

    /// which platform's shortcuts to ask for; overrides the saved preference
    #[clap(short = 'p', long, value_enum)]
    platform: Option<PlatformChoice>,

    /// load shortcut sets from this directory instead of the built-in ones
    #[clap(long)]
    sets_dir: Option<PathBuf>,

    /// print the available shortcut sets and exit
    #[clap(short = 'l', long)]
    list: bool,

    /// write logs here instead of the default state directory
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn catalog(&self) -> Result<Catalog, memokeys::error::CatalogError> {
        match &self.sets_dir {
            Some(dir) => Catalog::from_dir(dir),
            None => Catalog::embedded(),
        }
    }
}

/// Keyboard enhancement is what lets the terminal report key releases and bare modifiers
struct KeyboardModes {
    enhanced: bool,
}

impl KeyboardModes {
    fn enable() -> io::Result<Self> {
        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )?;
        }
        info!(enhanced, "keyboard modes enabled");
        Ok(Self { enhanced })
    }
}

impl Drop for KeyboardModes {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let catalog = match cli.catalog() {
        Ok(catalog) => catalog,
        Err(e) => Cli::command().error(ErrorKind::Io, e).exit(),
    };

    if cli.list {
        print_sets(&catalog, &mut io::stdout())?;
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        if let Err(e) = logging::init(&path) {
            eprintln!("memokeys: logging disabled: {e}");
        }
    }

    let mut app = App::new(
        Box::new(catalog),
        Box::new(HostPlatform),
        Box::new(FileConfigStore::new()),
        cli.platform,
    );

    if let Some(id) = &cli.set {
        if !app.select_set(id) {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::InvalidValue,
                format!("unknown shortcut set '{id}', see --list"),
            )
            .exit();
        }
        app.start_test(Instant::now());
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let modes = KeyboardModes::enable()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    drop(modes);
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        warn!(error = %e, "exited with error");
    }
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        let redraw = match runner.step(app.next_deadline()) {
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize => true,
            AppEvent::Key(key) => {
                let now = Instant::now();
                if app.on_key(key, now) == Flow::Quit {
                    break;
                }
                app.on_tick(now);
                true
            }
        };

        if redraw {
            terminal.draw(|f| ui::draw(app, f))?;
        }
    }

    info!("bye");
    Ok(())
}

fn print_sets<W: Write>(source: &dyn ShortcutSource, out: &mut W) -> io::Result<()> {
    let sets = source.sets();
    for category in categories(&sets) {
        writeln!(out, "{category}")?;
        for set in sets.iter().filter(|s| s.category == category) {
            writeln!(out, "  {:<10} {} ({} shortcuts)", set.id, set.name, set.size)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["memokeys"]);

        assert_eq!(cli.set, None);
        assert_eq!(cli.platform, None);
        assert_eq!(cli.sets_dir, None);
        assert!(!cli.list);
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn test_cli_set() {
        let cli = Cli::parse_from(["memokeys", "-s", "vscode"]);
        assert_eq!(cli.set.as_deref(), Some("vscode"));

        let cli = Cli::parse_from(["memokeys", "--set", "shell"]);
        assert_eq!(cli.set.as_deref(), Some("shell"));
    }

    #[test]
    fn test_cli_platform() {
        let cli = Cli::parse_from(["memokeys", "-p", "mac"]);
        assert_eq!(cli.platform, Some(PlatformChoice::Mac));

        let cli = Cli::parse_from(["memokeys", "--platform", "windows"]);
        assert_eq!(cli.platform, Some(PlatformChoice::Windows));

        let cli = Cli::parse_from(["memokeys", "--platform", "auto"]);
        assert_eq!(cli.platform, Some(PlatformChoice::Auto));
    }

    #[test]
    fn test_cli_rejects_unknown_platform() {
        assert!(Cli::try_parse_from(["memokeys", "--platform", "linux"]).is_err());
    }

    #[test]
    fn test_cli_paths_and_list() {
        let cli = Cli::parse_from([
            "memokeys",
            "--sets-dir",
            "/tmp/sets",
            "--log-file",
            "/tmp/mk.log",
            "--list",
        ]);
        assert_eq!(cli.sets_dir, Some(PathBuf::from("/tmp/sets")));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/mk.log")));
        assert!(cli.list);
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_print_sets() {
        let catalog = Catalog::embedded().unwrap();
        let mut out = Vec::new();
        print_sets(&catalog, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("System\n"));
        assert!(text.contains("  system"));
        assert!(text.contains("System Basics (8 shortcuts)"));
    }

    #[test]
    fn test_missing_sets_dir() {
        let cli = Cli::parse_from(["memokeys", "--sets-dir", "/definitely/not/here"]);
        assert!(cli.catalog().is_err());
    }

    #[test]
    fn test_tick_rate_constant() {
        const _: () = assert!(TICK_RATE_MS > 0);
        const _: () = assert!(TICK_RATE_MS <= 100);
    }
}
