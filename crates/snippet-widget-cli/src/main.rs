use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use snippet_widget_config::Config;
use snippet_widget_engine::{
    Cmd, EditorMode, EditorSnapshot, IconFetcher, IconRequest, IconResponse, PreviewSegment,
    SnippetCodec, SnippetEditor, io,
};
use std::{
    env,
    fs::{self, File},
    io::stdout,
    path::PathBuf,
    process,
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};

mod fetcher;

use fetcher::CliIconFetcher;

const DEFAULT_FRAGMENT: &str = "snippet.html";
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    IconUrl,
    Text,
    Code,
}

struct App {
    fragment_path: PathBuf,
    editor: SnippetEditor,
    focus: Focus,
    fetcher: Arc<dyn IconFetcher>,
    responses_tx: Sender<IconResponse>,
    responses_rx: Receiver<IconResponse>,
    status: Option<String>,
}

impl App {
    fn new(fragment_path: PathBuf, config: &Config, fetcher: Arc<dyn IconFetcher>) -> Result<Self> {
        let stored = io::read_fragment(&fragment_path)?;
        let codec = SnippetCodec::new().escaping_ampersands(config.escape_ampersands);
        let editor = SnippetEditor::open(&stored, codec);
        let (responses_tx, responses_rx) = mpsc::channel();

        let focus = match editor.mode() {
            EditorMode::Basic => Focus::Text,
            EditorMode::Advanced => Focus::Code,
        };

        Ok(Self {
            fragment_path,
            editor,
            focus,
            fetcher,
            responses_tx,
            responses_rx,
            status: None,
        })
    }

    fn apply(&mut self, cmd: Cmd) {
        self.status = None;
        let patch = self.editor.apply(cmd);
        if let Some(request) = patch.icon_request {
            self.dispatch(request);
        }
    }

    /// Fetch off the event loop; the response comes back through the channel.
    fn dispatch(&self, request: IconRequest) {
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.responses_tx.clone();
        thread::spawn(move || {
            // The receiver only goes away when the app exits.
            let _ = tx.send(request.fetch_with(fetcher.as_ref()));
        });
    }

    fn drain_responses(&mut self) {
        while let Ok(response) = self.responses_rx.try_recv() {
            self.editor.complete_icon(response);
        }
    }

    fn save(&mut self) {
        match io::write_fragment(&self.fragment_path, &self.editor.output()) {
            Ok(()) => {
                self.editor.mark_saved();
                log::info!("saved {}", self.fragment_path.display());
                self.status = Some(format!("Saved {}", self.fragment_path.display()));
            }
            Err(e) => {
                log::error!("failed to save {}: {e}", self.fragment_path.display());
                self.status = Some(format!("Error saving: {e}"));
            }
        }
    }

    fn toggle_mode(&mut self) {
        self.apply(Cmd::SwitchMode(self.editor.mode().toggled()));
        self.focus = match self.editor.mode() {
            EditorMode::Basic if self.focus == Focus::Code => Focus::Text,
            EditorMode::Basic => self.focus,
            EditorMode::Advanced => Focus::Code,
        };
    }

    fn next_focus(&mut self) {
        self.focus = match (self.editor.mode(), self.focus) {
            (EditorMode::Basic, Focus::IconUrl) => Focus::Text,
            (EditorMode::Basic, _) => Focus::IconUrl,
            (EditorMode::Advanced, _) => Focus::Code,
        };
    }

    fn focused_value(&self) -> String {
        match self.focus {
            Focus::IconUrl => self.editor.icon_url().to_string(),
            Focus::Text => self.editor.snippet().text.clone(),
            Focus::Code => self.editor.output(),
        }
    }

    fn set_focused_value(&mut self, value: String) {
        let cmd = match self.focus {
            Focus::IconUrl => Cmd::SetIconUrl(value),
            Focus::Text => Cmd::SetText(value),
            Focus::Code => Cmd::SetRaw(value),
        };
        self.apply(cmd);
    }

    fn insert_char(&mut self, c: char) {
        if self.focus == Focus::IconUrl && c == '\n' {
            return;
        }
        let mut value = self.focused_value();
        value.push(c);
        self.set_focused_value(value);
    }

    fn delete_char(&mut self) {
        let mut value = self.focused_value();
        if value.pop().is_some() {
            self.set_focused_value(value);
        }
    }

    /// Returns `false` when the app should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return true;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('q') if ctrl => return false,
            KeyCode::Char('s') if ctrl => self.save(),
            KeyCode::F(2) => self.toggle_mode(),
            KeyCode::Tab => self.next_focus(),
            KeyCode::Enter => self.insert_char('\n'),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Char(c) if !ctrl => self.insert_char(c),
            _ => {}
        }
        true
    }
}

fn init_logging() {
    let log_path = Config::log_path();
    if let Some(parent) = log_path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        eprintln!("Warning: cannot create log directory {}: {e}", parent.display());
        return;
    }

    match File::options().create(true).append(true).open(&log_path) {
        Ok(file) => {
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Info)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("Warning: cannot open log file {}: {e}", log_path.display()),
    }
}

fn main() -> Result<()> {
    // Determine fragment path from CLI args
    let args: Vec<String> = env::args().collect();
    let fragment_path = match args.len() {
        1 => PathBuf::from(DEFAULT_FRAGMENT),
        2 => PathBuf::from(&args[1]),
        _ => {
            eprintln!("Usage: {} [fragment-file]", args[0]);
            process::exit(1);
        }
    };

    init_logging();
    log::info!("snippet-widget starting up!");

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::info!("No config file at {}, using defaults", Config::config_path().display());
            Config::default()
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let fetcher: Arc<dyn IconFetcher> = Arc::new(CliIconFetcher::new(config.clone())?);

    let mut app = match App::new(fragment_path.clone(), &config, fetcher) {
        Ok(app) => app,
        Err(e) => {
            eprintln!(
                "Error: Cannot open fragment '{}': {e}",
                fragment_path.display()
            );
            process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    if app.editor.is_modified() {
        println!(
            "Unsaved changes to {} were discarded",
            app.fragment_path.display()
        );
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        app.drain_responses();
        terminal.draw(|f| ui(f, app))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && !app.handle_key(key)
        {
            return Ok(());
        }
    }
}

fn pane<'a>(title: String, focused: bool) -> Block<'a> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

fn preview_lines(segments: &[PreviewSegment]) -> Vec<Line<'static>> {
    let mut lines = vec![];
    let mut current: Vec<Span<'static>> = vec![];

    for segment in segments {
        match segment {
            PreviewSegment::Icon { .. } => {
                current.push(Span::styled("[icon] ", Style::default().fg(Color::Magenta)));
            }
            PreviewSegment::Text(text) => {
                let mut parts = text.split('\n');
                if let Some(first) = parts.next() {
                    current.push(Span::raw(first.to_string()));
                }
                for part in parts {
                    lines.push(Line::from(std::mem::take(&mut current)));
                    current.push(Span::raw(part.to_string()));
                }
            }
            PreviewSegment::Link { href, label } => {
                current.push(Span::styled(
                    label.clone(),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED),
                ));
                current.push(Span::styled(
                    format!(" <{href}>"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            PreviewSegment::Break => lines.push(Line::from(std::mem::take(&mut current))),
        }
    }
    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

fn status_line(app: &App, snapshot: &EditorSnapshot) -> Line<'static> {
    if let Some(message) = &snapshot.notification {
        return Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ));
    }
    if let Some(url) = &snapshot.pending_icon {
        return Line::from(format!("Loading icon {url}..."));
    }
    if let Some(status) = &app.status {
        return Line::from(status.clone());
    }
    if snapshot.modified {
        Line::from("Modified")
    } else {
        Line::from("")
    }
}

fn ui(f: &mut Frame, app: &App) {
    let snapshot = app.editor.snapshot();
    let basic = snapshot.mode == EditorMode::Basic;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Min(4),
                Constraint::Length(8),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    let disabled = Style::default().fg(Color::DarkGray);
    let form_style = if basic { Style::default() } else { disabled };

    let icon_url = Paragraph::new(snapshot.icon_url.clone())
        .style(form_style)
        .block(pane(
            "Icon URL".to_string(),
            basic && app.focus == Focus::IconUrl,
        ));
    f.render_widget(icon_url, chunks[0]);

    let text = Paragraph::new(snapshot.text.clone())
        .style(form_style)
        .block(pane(
            "Text ([URL|label] for a link)".to_string(),
            basic && app.focus == Focus::Text,
        ))
        .wrap(Wrap { trim: false });
    f.render_widget(text, chunks[1]);

    let preview = Paragraph::new(preview_lines(&snapshot.preview))
        .block(pane("Preview".to_string(), false))
        .wrap(Wrap { trim: false });
    f.render_widget(preview, chunks[2]);

    let code_title = if basic {
        "Code".to_string()
    } else {
        "Code (raw HTML)".to_string()
    };
    let code = Paragraph::new(snapshot.code.clone())
        .style(if basic { disabled } else { Style::default() })
        .block(pane(code_title, !basic && app.focus == Focus::Code))
        .wrap(Wrap { trim: false });
    f.render_widget(code, chunks[3]);

    f.render_widget(Paragraph::new(status_line(app, &snapshot)), chunks[4]);

    let help_text = Line::from(vec![
        Span::styled(
            format!("[{}] ", snapshot.mode.label()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("Esc/Ctrl-Q: Quit | "),
        Span::raw("Ctrl-S: Save | "),
        Span::raw("Tab: Next field | "),
        Span::raw("F2: Basic/Advanced"),
    ]);
    f.render_widget(Paragraph::new(help_text), chunks[5]);
}
