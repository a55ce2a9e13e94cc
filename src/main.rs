use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lingo::app::{App, AppScreen};
use lingo::config::Config;
use lingo::course::topic::TOPICS;
use lingo::event::{AppEvent, EventHandler, spawn_lesson_request};
use lingo::generator::LessonGenerator;
use lingo::generator::gemini::GeminiGenerator;
use lingo::session::quiz::SessionPhase;
use lingo::store::json_store::JsonStore;
use lingo::store::progress::ProgressStore;
use lingo::ui::components::challenge_view::ChallengeView;
use lingo::ui::components::language_picker::LanguagePicker;
use lingo::ui::components::lesson_complete::LessonComplete;
use lingo::ui::components::lesson_path::LessonPath;
use lingo::ui::components::notice::{Notice, NoticeKind};
use lingo::ui::components::stats_header::StatsHeader;
use lingo::ui::layout::{AppLayout, centered_column, centered_rect, pack_hint_lines};
use lingo::ui::theme::Theme;

const TICK_RATE: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "lingo", version, about = "Terminal language tutor with AI-generated lessons")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Language to learn (id or name, e.g. es or Spanish)")]
    language: Option<String>,

    #[arg(short, long, help = "Gemini model used to generate lessons")]
    model: Option<String>,
}

fn log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lingo")
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging() -> Result<()> {
    let dir = log_dir();
    fs::create_dir_all(&dir)?;
    let file = File::create(dir.join("lingo.log"))?;

    let filter = EnvFilter::try_from_env("LINGO_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = init_logging() {
        eprintln!("logging disabled: {err}");
    }

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "config unreadable, using defaults");
            Config::default()
        }
    };
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(theme) = cli.theme {
        if Theme::load(&theme).is_some() {
            config.theme = theme;
        } else {
            warn!(theme = %theme, "unknown theme");
        }
    }
    config.validate();

    let backend = match JsonStore::new() {
        Ok(store) => Some(store),
        Err(err) => {
            warn!(error = %err, "progress will not be saved");
            None
        }
    };
    let progress = ProgressStore::load(backend);

    let generator: Arc<dyn LessonGenerator> = Arc::new(GeminiGenerator::from_config(&config)?);
    let mut app = App::new(config, progress);

    if let Some(key) = cli.language {
        if !app.select_language_by_id(&key) {
            warn!(language = %key, "unknown language");
        }
    }
    info!(model = %app.config.model, screen = ?app.screen, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(TICK_RATE);

    let result = run_app(&mut terminal, &mut app, &events, generator);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    generator: Arc<dyn LessonGenerator>,
) -> Result<()> {
    let started = Instant::now();
    loop {
        let frame_no = (started.elapsed().as_millis() / TICK_RATE.as_millis()) as usize;
        terminal.draw(|frame| render(frame, app, frame_no))?;

        match events.next()? {
            AppEvent::Key(key) => {
                if let Some(ticket) = handle_key(app, key) {
                    spawn_lesson_request(generator.clone(), ticket, events.sender());
                }
            }
            AppEvent::Tick => app.tick(Instant::now()),
            AppEvent::Resize(_, _) => {}
            AppEvent::Lesson { generation, result } => {
                app.receive_lesson(generation, result, Instant::now());
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Returns a ticket when the key started a lesson request.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<lingo::app::LessonTicket> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return None;
    }

    match app.screen {
        AppScreen::Welcome => handle_welcome_key(app, key),
        AppScreen::Map => return handle_map_key(app, key),
        AppScreen::LessonLoading => {
            if key.code == KeyCode::Esc {
                app.cancel_loading();
            }
        }
        AppScreen::LessonActive => handle_lesson_key(app, key),
        AppScreen::LessonComplete => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                app.finish_complete();
            }
        }
        AppScreen::Error => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                app.go_to_map();
            }
        }
    }
    None
}

fn handle_welcome_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.language_next(),
        KeyCode::Up | KeyCode::Char('k') => app.language_prev(),
        KeyCode::Enter => app.select_language(app.language_selected),
        KeyCode::Char(ch) if ch.is_ascii_digit() && ch != '0' => {
            let idx = ch as usize - '1' as usize;
            if idx < app.languages.len() {
                app.select_language(idx);
            }
        }
        KeyCode::Char('t') => app.cycle_theme(),
        _ => {}
    }
}

fn handle_map_key(app: &mut App, key: KeyEvent) -> Option<lingo::app::LessonTicket> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.topic_next(),
        KeyCode::Up | KeyCode::Char('k') => app.topic_prev(),
        KeyCode::Enter | KeyCode::Char(' ') => return app.start_lesson(app.topic_selected),
        KeyCode::Char('c') => app.change_language(),
        KeyCode::Char('t') => app.cycle_theme(),
        _ => {}
    }
    None
}

fn handle_lesson_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_lesson(),
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm(),
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => app.option_next(),
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => app.option_prev(),
        KeyCode::Char(ch @ '1'..='4') => app.pick_option(ch as usize - '1' as usize),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App, frame_no: usize) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Welcome => render_welcome(frame, app),
        AppScreen::Map => render_map(frame, app),
        AppScreen::LessonLoading => render_loading(frame, app, frame_no),
        AppScreen::LessonActive => render_lesson(frame, app),
        AppScreen::LessonComplete => render_complete(frame, app),
        AppScreen::Error => render_error(frame, app),
    }
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, hints: &[&str]) -> AppLayout {
    let area = frame.area();
    let lines = pack_hint_lines(hints, area.width as usize);
    let layout = AppLayout::new(area, lines.len() as u16);
    let footer = Paragraph::new(
        lines
            .into_iter()
            .map(|l| {
                Line::from(Span::styled(
                    l,
                    Style::default().fg(app.theme.colors.text_muted()),
                ))
            })
            .collect::<Vec<_>>(),
    );
    frame.render_widget(footer, layout.footer);
    layout
}

fn render_header(frame: &mut ratatui::Frame, app: &App, layout: &AppLayout) {
    let progress = app.progress.progress();
    let header = StatsHeader::new(
        progress.current_language.as_ref(),
        progress.hearts,
        progress.xp,
        app.theme,
    );
    frame.render_widget(header, layout.header);
}

fn render_welcome(frame: &mut ratatui::Frame, app: &App) {
    let layout = render_footer(
        frame,
        app,
        &["[Up/Down] Move", "[Enter] Start", "[1-6] Pick", "[t] Theme", "[q] Quit"],
    );
    render_header(frame, app, &layout);

    let picker = LanguagePicker::new(&app.languages, app.language_selected, app.theme);
    frame.render_widget(picker, centered_column(48, layout.main));
}

fn render_map(frame: &mut ratatui::Frame, app: &App) {
    let layout = render_footer(
        frame,
        app,
        &[
            "[Up/Down] Move",
            "[Enter] Start lesson",
            "[c] Change language",
            "[t] Theme",
            "[q] Quit",
        ],
    );
    render_header(frame, app, &layout);

    let statuses = (0..TOPICS.len()).map(|i| app.topic_status(i)).collect();
    let path = LessonPath::new(TOPICS, statuses, app.topic_selected, app.theme);
    frame.render_widget(path, centered_column(60, layout.main));
}

fn render_loading(frame: &mut ratatui::Frame, app: &App, frame_no: usize) {
    let layout = render_footer(frame, app, &["[Esc] Back to map"]);
    render_header(frame, app, &layout);

    let topic = app
        .loading_topic
        .map(|t| format!("{} {}", t.icon, t.title))
        .unwrap_or_default();
    let notice = Notice::new(
        NoticeKind::Loading {
            topic,
            frame: frame_no,
        },
        app.theme,
    );
    frame.render_widget(notice, centered_rect(50, 30, layout.main));
}

fn render_lesson(frame: &mut ratatui::Frame, app: &App) {
    let Some(session) = app.session.as_ref() else {
        return;
    };

    if session.phase() == SessionPhase::Failed {
        let layout = render_footer(frame, app, &["[Enter/Esc] Back to map"]);
        render_header(frame, app, &layout);
        let notice = Notice::new(NoticeKind::OutOfHearts, app.theme);
        frame.render_widget(notice, centered_rect(50, 30, layout.main));
        return;
    }

    let hints: &[&str] = match session.phase() {
        SessionPhase::Checked(..) => &["[Enter] Continue", "[Esc] Quit lesson"],
        _ => &["[1-4] Pick", "[Up/Down] Move", "[Enter] Check", "[Esc] Quit lesson"],
    };
    let layout = render_footer(frame, app, hints);
    let body = layout.header.union(layout.main);
    frame.render_widget(ChallengeView::new(session, app.theme), centered_column(72, body));
}

fn render_complete(frame: &mut ratatui::Frame, app: &App) {
    let layout = render_footer(frame, app, &["[Enter] Continue"]);
    render_header(frame, app, &layout);
    if let Some(ref result) = app.last_result {
        let panel = LessonComplete::new(result, app.theme);
        frame.render_widget(panel, centered_rect(50, 60, layout.main));
    }
}

fn render_error(frame: &mut ratatui::Frame, app: &App) {
    let layout = render_footer(frame, app, &["[Enter] Back to map"]);
    render_header(frame, app, &layout);
    let notice = Notice::new(
        NoticeKind::Error {
            message: app.error_message.clone().unwrap_or_default(),
            returns_in: app.error_return_remaining(Instant::now()),
        },
        app.theme,
    );
    frame.render_widget(notice, centered_rect(60, 40, layout.main));
}
