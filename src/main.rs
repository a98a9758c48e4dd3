mod app;
mod event;
mod ui;

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use typerush::config::Config;
use typerush::generator::TestMode;
use typerush::session::Key;
use typerush::session::typing::{DURATION_PRESETS, is_valid_duration};

use app::{App, AppScreen};
use event::{AppEvent, EventHandler, FRAME_TICK};
use ui::components::arcade_field::{ArcadeField, field_for};
use ui::components::results::ResultsDashboard;
use ui::components::session_header::{HEADER_HEIGHT, SessionHeader};
use ui::components::typing_area::TypingArea;
use ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "typerush",
    version,
    about = "Timed terminal typing test with a falling-words arcade"
)]
struct Cli {
    #[arg(short, long, help = "Test mode (words, adjectives, numbers, characters, punctuation)")]
    mode: Option<TestMode>,

    #[arg(short, long, help = "Test length in seconds (1-300)")]
    duration: Option<u32>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Start in the falling-words arcade")]
    arcade: bool,
}

/// Logs go to a file; the terminal belongs to the UI. The guard flushes on drop.
fn init_logging(level: &str) -> Result<WorkerGuard> {
    let path = Config::log_path();
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let file_name = path.file_name().unwrap_or_else(|| OsStr::new("typerush.log"));

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;
    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|err| {
        eprintln!("typerush: ignoring unreadable config: {err:#}");
        Config::default()
    });
    let _log_guard = match init_logging(&config.log_level) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("typerush: logging disabled: {err:#}");
            None
        }
    };

    if let Some(mode) = cli.mode {
        config.mode = mode.as_str().to_string();
    }
    if let Some(secs) = cli.duration {
        if is_valid_duration(secs) {
            config.duration_secs = secs;
        } else {
            warn!(secs, "ignoring out-of-range --duration");
        }
    }
    if let Some(name) = cli.theme {
        config.theme = name;
    }
    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        let available = Theme::available_themes().join(", ");
        warn!(theme = %config.theme, %available, "theme not found, using default");
        Theme::default()
    });

    let mut app = App::new(config, theme);
    if cli.arcade {
        app.toggle_arcade(Instant::now());
    }
    info!(mode = %app.session.mode(), duration = app.session.duration_secs(), "typerush starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(FRAME_TICK);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.save_preferences();

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    let size = terminal.size()?;
    app.resize_arcade(field_for(arcade_inner(Rect::new(0, 0, size.width, size.height))));

    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => {}
            AppEvent::Resize(w, h) => {
                app.resize_arcade(field_for(arcade_inner(Rect::new(0, 0, w, h))));
            }
        }
        app.advance(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

fn to_session_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Char(ch) => Key::from(ch),
        KeyCode::Backspace => Key::Backspace,
        _ => Key::Other,
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only process Press events; Release and Repeat would inflate input.
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('g') => app.toggle_arcade(Instant::now()),
            _ => {}
        }
        return;
    }

    match app.screen {
        AppScreen::Typing | AppScreen::Results => handle_test_key(app, key),
        AppScreen::Arcade => handle_arcade_key(app, key),
    }
}

fn handle_test_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => app.restart_test(),
        KeyCode::F(n @ 1..=5) => app.select_mode(TestMode::ALL[usize::from(n) - 1]),
        KeyCode::F(n @ 6..=8) => app.select_duration(DURATION_PRESETS[usize::from(n) - 6]),
        code if app.screen == AppScreen::Typing => {
            app.type_key(to_session_key(code), Instant::now());
        }
        _ => {}
    }
}

fn handle_arcade_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.toggle_arcade(Instant::now()),
        KeyCode::Enter => app.restart_arcade(),
        KeyCode::Char(ch) => app.arcade_key(ch),
        _ => {}
    }
}

/// Area the arcade field occupies inside its border, above the footer.
fn arcade_inner(area: Rect) -> Rect {
    Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(3),
    )
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let buf = frame.buffer_mut();

    Block::default()
        .style(Style::default().bg(colors.bg()))
        .render(area, buf);

    let hints: &[&str] = match app.screen {
        AppScreen::Typing => &[
            "[Tab] Restart",
            "[F1-F5] Mode",
            "[F6-F8] 15/30/60s",
            "[Ctrl-G] Arcade",
            "[Esc] Quit",
        ],
        AppScreen::Results => &[
            "[Tab] Again",
            "[F1-F8] Settings",
            "[Ctrl-G] Arcade",
            "[Esc] Quit",
        ],
        AppScreen::Arcade => &[
            "type a word to lock on",
            "[Enter] Restart after game over",
            "[Esc] Back",
        ],
    };

    match app.screen {
        AppScreen::Typing => {
            let layout = AppLayout::new(area, HEADER_HEIGHT);
            let view = app.session.snapshot();
            SessionHeader::new(&view, colors).render(layout.header, buf);
            let typing = centered_rect(layout.main.width.saturating_sub(4).min(90), 5, layout.main);
            TypingArea::new(&view, colors).render(typing, buf);
            render_footer(hints, layout.footer, buf, app);
        }
        AppScreen::Results => {
            let layout = AppLayout::new(area, 0);
            match app.session.summary() {
                Some(summary) => ResultsDashboard::new(summary, colors).render(layout.main, buf),
                None => Paragraph::new("no results yet").render(layout.main, buf),
            }
            render_footer(hints, layout.footer, buf, app);
        }
        AppScreen::Arcade => {
            let layout = AppLayout::new(area, 0);
            let snapshot = app.arcade.snapshot();
            ArcadeField::new(&snapshot, colors).render(layout.main, buf);
            render_footer(hints, layout.footer, buf, app);
        }
    }
}

fn render_footer(hints: &[&str], area: Rect, buf: &mut ratatui::buffer::Buffer, app: &App) {
    let colors = &app.theme.colors;
    let line = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .next()
        .unwrap_or_default();
    Paragraph::new(Line::from(Span::styled(line, Style::default().fg(colors.text_pending()))))
        .render(area, buf);
}
