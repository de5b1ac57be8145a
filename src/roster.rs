//! Attendee roster TUI using ratatui + crossterm.
//!
//! A scrollable roster for one event at a time, with incremental loading:
//! scrolling near the bottom of the list requests the next page, switching
//! events starts a fresh pagination session, and responses that arrive for
//! a superseded session are dropped by the pager. Fetches run in spawned
//! tasks and report back over a channel, so the view never blocks.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use rsvp_api::{ApiError, Attendee, Event, EventsApi, Page};

use crate::error::RsvpError;
use crate::output;
use crate::pager::{Applied, LoadPhase, LoadTicket, Pager, ScrollMetrics};
use crate::timezone;

/// Target render interval (10 FPS).
const RENDER_INTERVAL: Duration = Duration::from_millis(100);

/// Timestamp pattern for the registered column.
const REGISTERED_PATTERN: &str = "%b %-d, %Y %H:%M";

type FetchOutcome = (LoadTicket, Result<Page<Attendee>, ApiError>);

/// Mutable view state.
struct App {
    api: Arc<EventsApi>,
    tx: mpsc::UnboundedSender<FetchOutcome>,
    events: Vec<Event>,
    selected: usize,
    pager: Pager<Attendee>,
    page_size: u32,
    threshold: i64,
    tz: Tz,
    scroll_top: i64,
    viewport_rows: i64,
    last_error: Option<String>,
    quit: bool,
}

/// Run the roster view.
///
/// # Arguments
///
/// * `initial_event` - Event to open first; defaults to the first listed.
/// * `page_size` - Rows fetched per page for this view.
/// * `threshold` - Rows from the list bottom at which the next page loads.
/// * `tz` - Timezone for displayed dates.
/// * `cancel` - Cancellation token for graceful shutdown.
pub async fn run_roster(
    api: EventsApi,
    initial_event: Option<i64>,
    page_size: u32,
    threshold: i64,
    tz: Tz,
    cancel: CancellationToken,
) -> Result<(), RsvpError> {
    let events = api.list_events().await?;
    if events.is_empty() {
        println!("No upcoming events.");
        return Ok(());
    }
    let selected = match initial_event {
        Some(id) => events
            .iter()
            .position(|e| e.id == id)
            .ok_or(RsvpError::EventNotFound(id))?,
        None => 0,
    };

    info!(
        events = events.len(),
        page_size, threshold, "starting roster view"
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();
    let mut app = App {
        api: Arc::new(api),
        tx,
        events,
        selected,
        pager: Pager::new(page_size),
        page_size,
        threshold,
        tz,
        scroll_top: 0,
        viewport_rows: 20,
        last_error: None,
        quit: false,
    };
    app.open_selected_event();

    // Set up terminal.
    enable_raw_mode().map_err(|_| RsvpError::Terminal("failed to enable raw mode".into()))?;
    io::stdout()
        .execute(EnterAlternateScreen)
        .map_err(|_| RsvpError::Terminal("failed to enter alternate screen".into()))?;
    let mut terminal = match Terminal::new(CrosstermBackend::new(io::stdout())) {
        Ok(t) => t,
        Err(_) => {
            let _ = disable_raw_mode();
            let _ = io::stdout().execute(LeaveAlternateScreen);
            return Err(RsvpError::Terminal("failed to create terminal".into()));
        }
    };

    let mut render_interval = tokio::time::interval(RENDER_INTERVAL);

    // Main event loop.
    let result: Result<(), RsvpError> = loop {
        if app.quit {
            break Ok(());
        }

        tokio::select! {
            _ = cancel.cancelled() => break Ok(()),

            // A fetch finished; stale-session outcomes are dropped.
            Some((ticket, outcome)) = rx.recv() => {
                app.on_fetch_outcome(ticket, outcome);
            }

            _ = render_interval.tick() => {
                if let Err(e) = app.drain_input() {
                    break Err(e);
                }
                app.clamp_scroll();
                app.maybe_fetch_more();
                let draw = terminal.draw(|frame| app.render(frame));
                if draw.is_err() {
                    break Err(RsvpError::Terminal("failed to draw frame".into()));
                }
            }
        }
    };

    // Tear down terminal.
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);

    result
}

impl App {
    /// Apply a finished fetch through its ticket; errors from the current
    /// session surface on the status line, stale ones vanish silently.
    fn on_fetch_outcome(&mut self, ticket: LoadTicket, outcome: Result<Page<Attendee>, ApiError>) {
        match outcome {
            Ok(page) => {
                self.pager.apply(&ticket, page);
            }
            Err(e) => {
                if self.pager.apply_error(&ticket) == Applied::Updated {
                    self.last_error = Some(e.to_string());
                }
            }
        }
    }

    /// Start a fresh pagination session for the selected event.
    fn open_selected_event(&mut self) {
        self.scroll_top = 0;
        self.last_error = None;
        let ticket = self.pager.start(self.events[self.selected].id);
        self.spawn_fetch(ticket);
    }

    /// Fetch one page in the background and report through the channel.
    fn spawn_fetch(&self, ticket: LoadTicket) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let page_size = self.page_size;
        tokio::spawn(async move {
            let outcome = api
                .event_attendees(ticket.collection, ticket.page, page_size)
                .await;
            let _ = tx.send((ticket, outcome));
        });
    }

    /// Handle all pending keyboard input.
    fn drain_input(&mut self) -> Result<(), RsvpError> {
        while event::poll(Duration::ZERO)
            .map_err(|_| RsvpError::Terminal("failed to poll input".into()))?
        {
            let ev =
                event::read().map_err(|_| RsvpError::Terminal("failed to read input".into()))?;
            let TermEvent::Key(key) = ev else { continue };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
                KeyCode::Down | KeyCode::Char('j') => self.scroll_top += 1,
                KeyCode::Up | KeyCode::Char('k') => self.scroll_top -= 1,
                KeyCode::PageDown => self.scroll_top += self.viewport_rows,
                KeyCode::PageUp => self.scroll_top -= self.viewport_rows,
                KeyCode::Home => self.scroll_top = 0,
                KeyCode::End => self.scroll_top = self.pager.items().len() as i64,
                KeyCode::Left | KeyCode::Char('h') => {
                    self.selected = (self.selected + self.events.len() - 1) % self.events.len();
                    self.open_selected_event();
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.selected = (self.selected + 1) % self.events.len();
                    self.open_selected_event();
                }
                // Retry a failed first page; failed follow-ups are retried
                // by scrolling again.
                KeyCode::Char('r') => {
                    if self.pager.phase() == LoadPhase::Idle && self.pager.collection().is_some() {
                        self.open_selected_event();
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn clamp_scroll(&mut self) {
        let max_top = (self.pager.items().len() as i64 - self.viewport_rows).max(0);
        self.scroll_top = self.scroll_top.clamp(0, max_top);
    }

    /// The sole load-more trigger: viewport bottom near content bottom,
    /// measured in rows.
    fn maybe_fetch_more(&mut self) {
        let metrics = ScrollMetrics {
            scroll_top: self.scroll_top,
            scroll_height: self.pager.items().len() as i64,
            client_height: self.viewport_rows,
        };
        if let Some(ticket) = self.pager.maybe_load_more(metrics, self.threshold) {
            self.spawn_fetch(ticket);
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // event header
                Constraint::Min(5),    // roster
                Constraint::Length(1), // status
                Constraint::Length(1), // key hints
            ])
            .split(area);

        self.render_header(frame, layout[0]);
        self.render_roster(frame, layout[1]);
        self.render_status(frame, layout[2]);

        let hints = Paragraph::new(" q quit | ↑/↓ scroll | ←/→ switch event | r retry")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hints, layout[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let event = &self.events[self.selected];
        let label = timezone::offset_label(self.tz);
        let lines = vec![
            Line::from(Span::styled(
                format!(" #{} {}", event.id, event.name),
                Style::default().bold(),
            )),
            Line::from(format!(
                " {} | {} {} | {}",
                event.location,
                output::display_instant(&event.start_time, self.tz),
                label,
                output::capacity_summary(event),
            )),
        ];
        let header = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .title(" roster ")
                .title_style(Style::default().fg(Color::Blue).bold()),
        );
        frame.render_widget(header, area);
    }

    fn render_roster(&mut self, frame: &mut Frame, area: Rect) {
        // Rows available inside the block: minus border and table header.
        self.viewport_rows = (area.height.saturating_sub(3) as i64).max(1);

        let items = self.pager.items();
        let start = (self.scroll_top.max(0) as usize).min(items.len());
        let end = (start + self.viewport_rows as usize).min(items.len());

        let rows: Vec<Row> = items[start..end]
            .iter()
            .map(|a| {
                Row::new(vec![
                    a.name.clone(),
                    a.email.clone(),
                    timezone::format_instant(&a.registered_at, self.tz, REGISTERED_PATTERN)
                        .unwrap_or_else(|_| "Invalid date".to_string()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ],
        )
        .header(
            Row::new(vec!["NAME", "EMAIL", "REGISTERED"]).style(Style::default().fg(Color::Cyan)),
        )
        .block(Block::default().borders(Borders::BOTTOM));

        frame.render_widget(table, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(format!(
            " {} of {} attendees | page {} | {}",
            self.pager.items().len(),
            self.pager.total(),
            self.pager.current_page(),
            phase_label(self.pager.phase()),
        ))];
        if let Some(message) = &self.last_error {
            spans.push(Span::styled(
                format!(" | {message}"),
                Style::default().fg(Color::Red),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn phase_label(phase: LoadPhase) -> &'static str {
    match phase {
        LoadPhase::Idle => "idle (r to retry)",
        LoadPhase::LoadingFirst => "loading…",
        LoadPhase::Ready => "more available",
        LoadPhase::LoadingMore => "loading more…",
        LoadPhase::Exhausted => "all loaded",
    }
}
