//! TUI application state and event loop.
//!
//! Everything runs on one thread. Terminal input and the refresh timer are
//! turned into [`AppEvent`]s, queued, and handled in arrival order; each pass
//! ends with a full redraw. The dose log only changes while an event is being
//! handled, so a frame always renders a settled log.

use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant, SystemTime};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use neuronek_core::{DoseLog, RenderConfig, Substance, SubstanceId, SubstanceTable};

use super::theme::Theme;
use crate::commands::parse_amount;

/// Longest amount the entry field accepts.
pub const AMOUNT_CHAR_LIMIT: usize = 6;

// ---------------------------------------------------------------------------
// Modes and events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Chart,
    SelectSubstance,
    EnterAmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    Key(KeyEvent),
    Resize(u16, u16),
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

pub struct App {
    table: SubstanceTable,
    doses: DoseLog,
    config: RenderConfig,
    theme: Theme,
    refresh_rate: Duration,
    mode: Mode,
    cursor: usize,
    selected: Option<SubstanceId>,
    amount_input: String,
    status: Option<String>,
    show_help: bool,
    running: bool,
    ticks: u64,
    queue: VecDeque<AppEvent>,
}

impl App {
    pub fn new(table: SubstanceTable, config: RenderConfig, refresh_rate: Duration) -> Self {
        Self {
            table,
            doses: DoseLog::new(),
            config,
            theme: Theme::default(),
            refresh_rate,
            mode: Mode::Chart,
            cursor: 0,
            selected: None,
            amount_input: String::new(),
            status: None,
            show_help: false,
            running: true,
            ticks: 0,
            queue: VecDeque::new(),
        }
    }

    pub fn table(&self) -> &SubstanceTable {
        &self.table
    }

    pub fn doses(&self) -> &DoseLog {
        &self.doses
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Substance picked in the list, while its amount is being entered.
    pub fn selected_substance(&self) -> Option<&Substance> {
        self.selected.and_then(|id| self.table.get(id))
    }

    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // -----------------------------------------------------------------------
    // Event queue
    // -----------------------------------------------------------------------

    pub fn push(&mut self, event: AppEvent) {
        self.queue.push_back(event);
    }

    /// Handle every queued event in order. Stops early once the app quits.
    pub fn drain_events(&mut self, now: SystemTime) {
        while self.running
            && let Some(event) = self.queue.pop_front()
        {
            self.handle_event(event, now);
        }
        self.queue.clear();
    }

    fn handle_event(&mut self, event: AppEvent, now: SystemTime) {
        match event {
            AppEvent::Tick => self.ticks += 1,
            AppEvent::Key(key) => self.handle_key(key, now),
            AppEvent::Resize(w, h) => log::debug!("terminal resized to {w}x{h}"),
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: SystemTime) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }

        match self.mode {
            Mode::Chart => match key.code {
                KeyCode::Char('q') => self.running = false,
                KeyCode::Char('a') if !self.table.is_empty() => {
                    self.status = None;
                    self.mode = Mode::SelectSubstance;
                }
                KeyCode::Char('?') => self.show_help = !self.show_help,
                _ => {}
            },
            Mode::SelectSubstance => match key.code {
                KeyCode::Esc => self.mode = Mode::Chart,
                KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.cursor + 1 < self.table.len() {
                        self.cursor += 1;
                    }
                }
                KeyCode::Enter => {
                    self.selected = self.table.ids().nth(self.cursor);
                    if self.selected.is_some() {
                        self.amount_input.clear();
                        self.mode = Mode::EnterAmount;
                    }
                }
                _ => {}
            },
            Mode::EnterAmount => match key.code {
                KeyCode::Esc => {
                    self.amount_input.clear();
                    self.selected = None;
                    self.mode = Mode::SelectSubstance;
                }
                KeyCode::Enter => self.submit_amount(now),
                KeyCode::Backspace => {
                    self.amount_input.pop();
                }
                KeyCode::Char(c)
                    if (c.is_ascii_digit() || c == '.')
                        && self.amount_input.len() < AMOUNT_CHAR_LIMIT =>
                {
                    self.amount_input.push(c);
                }
                _ => {}
            },
        }
    }

    fn submit_amount(&mut self, now: SystemTime) {
        let input = std::mem::take(&mut self.amount_input);
        let selected = self.selected.take();
        self.mode = Mode::Chart;

        let Some(id) = selected else {
            return;
        };
        let Some(amount) = parse_amount(&input) else {
            log::debug!("ignoring invalid amount {input:?}");
            self.status = Some(format!("Ignored invalid amount '{input}'"));
            return;
        };

        self.status = Some(match self.doses.record(&self.table, id, amount, now) {
            Ok(event) => {
                let symbol = self.table.get(id).map(|s| s.symbol()).unwrap_or('?');
                format!(
                    "Added {symbol} {:.0}{}",
                    event.amount(),
                    self.config.dose_unit
                )
            }
            Err(e) => e.to_string(),
        });
    }

    // -----------------------------------------------------------------------
    // Terminal lifecycle
    // -----------------------------------------------------------------------

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        let _ = std::panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        let mut last_tick = Instant::now();

        while self.is_running() {
            terminal.draw(|f| super::ui::draw(f, self, SystemTime::now()))?;

            let timeout = self.refresh_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.push(AppEvent::Key(key))
                    }
                    Event::Resize(w, h) => self.push(AppEvent::Resize(w, h)),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= self.refresh_rate {
                self.push(AppEvent::Tick);
                last_tick = Instant::now();
            }

            self.drain_events(SystemTime::now());
        }

        Ok(())
    }
}
