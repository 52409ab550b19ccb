use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use fbref_bot::config::{self, BotConfig};
use fbref_bot::{QueryEngine, StatsStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Speaker {
    You,
    Bot,
}

struct App {
    engine: QueryEngine,
    input: String,
    transcript: Vec<(Speaker, String)>,
    /// Lines scrolled up from the bottom of the transcript.
    scroll_back: u16,
    should_quit: bool,
}

impl App {
    fn new(engine: QueryEngine) -> Self {
        let greeting = if engine.store().is_empty() {
            "No player data loaded. Every answer will come back empty.".to_string()
        } else {
            format!(
                "Loaded {} players. Try 'Mohamed Salah stats', 'compare haaland and salah' or 'arsenal top scorers'.",
                engine.store().len()
            )
        };
        Self {
            engine,
            input: String::new(),
            transcript: vec![(Speaker::Bot, greeting)],
            scroll_back: 0,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up | KeyCode::PageUp => {
                self.scroll_back = self.scroll_back.saturating_add(3)
            }
            KeyCode::Down | KeyCode::PageDown => {
                self.scroll_back = self.scroll_back.saturating_sub(3)
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn submit(&mut self) {
        let text = std::mem::take(&mut self.input);
        if text.trim().is_empty() {
            return;
        }
        if matches!(text.trim().to_lowercase().as_str(), "exit" | "quit") {
            self.should_quit = true;
            return;
        }
        let reply = self.engine.handle_query(&text);
        self.transcript.push((Speaker::You, text));
        self.transcript.push((Speaker::Bot, reply));
        self.scroll_back = 0;
    }
}

fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    if config::opt_env("FBREF_LOG_STDERR").is_some_and(|v| v == "1") {
        config::init_tracing();
    }
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cfg = BotConfig::from_env().with_args(&args);
    let engine = QueryEngine::new(StatsStore::load(&cfg.stats_csv));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(engine);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    println!("👋 Goodbye!");
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new("⚽ Football Stats Chatbot")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_transcript(frame, chunks[1], app);

    let input = Paragraph::new(format!("🗣 {}", app.input))
        .block(Block::default().title("You").borders(Borders::ALL));
    frame.render_widget(input, chunks[2]);

    let footer = Paragraph::new("Enter Ask | ↑/↓ Scroll | exit/quit or Esc Leave")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);
}

fn render_transcript(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();
    for (speaker, text) in &app.transcript {
        let (label, color) = match speaker {
            Speaker::You => ("You", Color::Cyan),
            Speaker::Bot => ("Bot", Color::Green),
        };
        lines.push(Line::from(Span::styled(
            format!("{label}:"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.extend(text.lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::default());
    }

    let width = area.width.max(1) as usize;
    let rendered: usize = lines
        .iter()
        .map(|l| l.width().max(1).div_ceil(width))
        .sum();
    let height = area.height as usize;
    let bottom = rendered.saturating_sub(height);
    let offset = bottom.saturating_sub(app.scroll_back as usize);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);

    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    frame.render_widget(transcript, area);
}
