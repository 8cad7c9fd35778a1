//! Tandem CLI - side-by-side diff viewer with change-block navigation

mod app;
mod config;
mod ui;
mod views;

use anyhow::{Context, Result};
use app::{App, PatchSource};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tandem_core::{AlignedDiff, DiffSession, Direction, FileStatus, ViewMode};

#[derive(Parser, Debug)]
#[command(name = "tdm")]
#[command(author, version, about = "A side-by-side diff viewer with change-block navigation")]
struct Args {
    /// Unified diff to show (`git diff` output); `-` or nothing reads stdin
    patch: Option<PathBuf>,

    /// View mode: combined or split
    #[arg(short, long)]
    view: Option<CliViewMode>,

    /// Print the aligned columns and change blocks as JSON and exit
    #[arg(long)]
    json: bool,

    /// Start on the Nth file (1-based)
    #[arg(long)]
    file: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliViewMode {
    /// One column with both line numbers
    #[value(alias = "unified")]
    Combined,
    /// Old and new columns aligned row by row
    #[value(alias = "sbs")]
    Split,
}

impl From<CliViewMode> for ViewMode {
    fn from(mode: CliViewMode) -> Self {
        match mode {
            CliViewMode::Combined => ViewMode::Combined,
            CliViewMode::Split => ViewMode::SideBySide,
        }
    }
}

/// Log to the file named by `TANDEM_LOG`; the terminal belongs to the TUI
fn init_tracing() -> Result<()> {
    let Some(path) = std::env::var_os("TANDEM_LOG") else {
        return Ok(());
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", Path::new(&path).display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_env("TANDEM_LOG_LEVEL")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: &'a Path,
    status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    aligned: Option<AlignedDiff>,
}

fn print_json(session: &DiffSession) -> Result<()> {
    let files: Vec<JsonFile> = session
        .patches()
        .iter()
        .enumerate()
        .map(|(index, patch)| JsonFile {
            path: &patch.path,
            status: patch.status,
            placeholder: session.placeholder_at(index),
            aligned: patch.text().map(|text| AlignedDiff::new(&text.lines)),
        })
        .collect();

    let json = serde_json::to_string_pretty(&files).context("Failed to serialize diff")?;
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing()?;
    let config = config::Config::load();

    let source = PatchSource::from_arg(args.patch);
    let text = source.read()?;

    // CLI overrides config
    let view_mode = args
        .view
        .map(ViewMode::from)
        .or_else(|| config.parse_view_mode())
        .unwrap_or_default();

    let session = DiffSession::from_patch(&text, view_mode).context("Failed to parse patch")?;
    tracing::info!(files = session.file_count(), ?view_mode, "patch loaded");

    if session.file_count() == 0 {
        println!("No changes found.");
        return Ok(());
    }

    if args.json {
        return print_json(&session);
    }

    let mut app = App::new(session, source, &config);
    if let Some(file) = args.file {
        app.select_file(file.saturating_sub(1));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        return Err(err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(50);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(tick_rate)? {
            continue;
        }

        match event::read()? {
            Event::Mouse(me) => match me.kind {
                MouseEventKind::ScrollUp => app.scroll_by(-3),
                MouseEventKind::ScrollDown => app.scroll_by(3),
                _ => {}
            },
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                handle_key(app, key.code, key.modifiers);
            }
            _ => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if app.show_help {
        if matches!(code, KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    // Any key replaces the last message
    app.status_message = None;
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    match code {
        KeyCode::Char(c @ '1'..='9') => app.push_count_digit(c as u8 - b'0'),
        KeyCode::Char('0') if app.pending_count.is_some() => app.push_count_digit(0),
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc => {
            app.reset_count();
            if !app.clear_selection() {
                app.should_quit = true;
            }
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('d') if ctrl => app.half_page_down(),
        KeyCode::Char('u') if ctrl => app.half_page_up(),
        KeyCode::Down | KeyCode::Char('j') => {
            let count = app.take_count();
            app.caret_down(count);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            let count = app.take_count();
            app.caret_up(count);
        }
        KeyCode::PageDown => app.half_page_down(),
        KeyCode::PageUp => app.half_page_up(),
        KeyCode::Char('J') => app.scroll_by(1),
        KeyCode::Char('K') => app.scroll_by(-1),
        KeyCode::Char('n') => {
            for _ in 0..app.take_count() {
                app.goto_block(Direction::Next);
            }
        }
        KeyCode::Char('p') => {
            for _ in 0..app.take_count() {
                app.goto_block(Direction::Prev);
            }
        }
        KeyCode::Char('g') | KeyCode::Home => app.goto_block(Direction::First),
        KeyCode::Char('G') | KeyCode::End => app.goto_block(Direction::Last),
        KeyCode::Tab => app.toggle_view_mode(),
        KeyCode::Left | KeyCode::Char('h') => app.set_side(true),
        KeyCode::Right | KeyCode::Char('l') => app.set_side(false),
        KeyCode::Char('v') => app.toggle_selection(),
        KeyCode::Char('y') => app.map_selection(),
        KeyCode::Enter => app.map_hunk(),
        KeyCode::Char(']') => app.next_file(),
        KeyCode::Char('[') => app.prev_file(),
        KeyCode::Char('r') => {
            if let Err(err) = app.refresh() {
                tracing::warn!(error = %err, "refresh failed");
                app.status_message = Some(format!("Refresh failed: {:#}", err));
            }
        }
        _ => {}
    }

    if !matches!(code, KeyCode::Char('0'..='9')) {
        app.reset_count();
    }
}
