use super::{report, Report};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use std::{
    io::{self, Stdout},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

pub enum ViewerEvent {
    Quit,
    Next,
    Previous,
    None,
}

const TICK_RATE: Duration = Duration::from_millis(200);

trait EventSource {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
}

struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// Forwards key presses and ticks until `stop` is raised or the receiver hangs up.
fn pump_events<S: EventSource>(
    source: &mut S,
    input_tx: &Sender<DisplayEvent>,
    stop: &AtomicBool,
) {
    let mut last_tick = Instant::now();
    while !stop.load(Ordering::Relaxed) {
        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        match source.poll(timeout) {
            Ok(true) => {
                // A pending event after stop belongs to whoever reads stdin next.
                if stop.load(Ordering::Relaxed) {
                    return;
                }
                match source.read() {
                    Ok(Event::Key(key)) => {
                        if input_tx.send(DisplayEvent::Input(key)).is_err() {
                            return;
                        }
                    }
                    Ok(_) => {}
                    Err(err) => {
                        warn!("failed to read terminal event: {}", err);
                        return;
                    }
                }
            }
            Ok(false) => {}
            Err(err) => {
                warn!("failed to poll terminal events: {}", err);
                return;
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            if input_tx.send(DisplayEvent::Tick).is_err() {
                return;
            }
            last_tick = Instant::now();
        }
    }
}

/// Runs `undo` if `result` failed, for backing out of a half-built terminal setup.
fn undo_on_error<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
    stop: Arc<AtomicBool>,
    input_thread: Option<JoinHandle<()>>,
}

impl DisplayTerminal {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        undo_on_error(execute!(io::stdout(), EnterAlternateScreen), || {
            let _ = terminal::disable_raw_mode();
        })?;

        // Set up the terminal-user-interface
        let ui = undo_on_error(Terminal::new(CrosstermBackend::new(io::stdout())), || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        })?;

        // Set up the input handling thread
        let stop = Arc::new(AtomicBool::new(false));
        let (input_tx, input_rx) = mpsc::channel();
        let input_thread = {
            let stop = Arc::clone(&stop);
            thread::spawn(move || pump_events(&mut CrosstermEvents, &input_tx, &stop))
        };

        Ok(Self {
            terminal: ui,
            input_rx,
            stop,
            input_thread: Some(input_thread),
        })
    }

    pub fn draw(&mut self, reports: &[Report], selected: usize) -> Result<(), io::Error> {
        let report = match reports.get(selected) {
            Some(report) => report,
            None => return Ok(()),
        };
        let schedule = &report.schedule;

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(4),
                    Constraint::Min(5),
                    Constraint::Length(6),
                ])
                .split(f.size());

            let header = Paragraph::new(format!(
                "{} ({}/{})  |  <-/-> switch algorithm, q quit",
                report.title,
                selected + 1,
                reports.len()
            ))
            .style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Algorithm")
                    .border_type(BorderType::Rounded),
            );
            f.render_widget(header, chunks[0]);

            let gantt_lines: Vec<Spans> = report::render_gantt(schedule)
                .lines()
                .map(|line| Spans::from(Span::raw(line.to_owned())))
                .collect();
            let gantt = Paragraph::new(gantt_lines)
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().title("Gantt Chart").borders(Borders::ALL));
            f.render_widget(gantt, chunks[1]);

            let items = schedule.records().iter().map(|record| {
                let mut cells = vec![
                    Cell::from(record.pid().to_owned())
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(record.arrival().to_string()),
                    Cell::from(record.burst().to_string()),
                ];
                if report.show_priority {
                    cells.push(Cell::from(record.priority().to_string()));
                }
                cells.push(Cell::from(report::start_label(record)));
                cells.push(Cell::from(record.completion().to_string()));
                cells.push(Cell::from(record.turnaround().to_string()));
                cells.push(Cell::from(record.waiting().to_string()));
                Row::new(cells)
            });

            let mut header = vec!["Process", "Arrival", "Burst"];
            if report.show_priority {
                header.push("Priority");
            }
            header.extend(["Start", "Completion", "Turnaround", "Waiting"]);
            let widths = vec![Constraint::Length(12); header.len()];

            let table = Table::new(items)
                .header(
                    Row::new(header).style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&widths)
                .block(Block::default().title("Results").borders(Borders::ALL))
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);
            f.render_widget(table, chunks[2]);

            let summary = Paragraph::new(report::render_summary(schedule))
                .block(Block::default().title("Averages").borders(Borders::ALL));
            f.render_widget(summary, chunks[3]);
        })?;
        Ok(())
    }

    pub fn get_input(&self) -> ViewerEvent {
        // Get the user's input and return a matching event
        match self.input_rx.recv() {
            Ok(DisplayEvent::Input(key)) => {
                if key.modifiers.is_empty() {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return ViewerEvent::Quit,
                        KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => {
                            return ViewerEvent::Next
                        }
                        KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => {
                            return ViewerEvent::Previous
                        }
                        _ => {}
                    };
                }
            }
            Ok(DisplayEvent::Tick) => {}
            // The input thread is gone, so nothing can ever be pressed again.
            Err(_) => return ViewerEvent::Quit,
        }
        ViewerEvent::None
    }

    /// Shows the reports until the user quits.
    pub fn browse(&mut self, reports: &[Report]) -> Result<(), io::Error> {
        let mut selected = 0;
        loop {
            self.draw(reports, selected)?;
            match self.get_input() {
                ViewerEvent::Quit => return Ok(()),
                ViewerEvent::Next if !reports.is_empty() => {
                    selected = (selected + 1) % reports.len();
                }
                ViewerEvent::Previous if !reports.is_empty() => {
                    selected = (selected + reports.len() - 1) % reports.len();
                }
                _ => {}
            }
        }
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        // The input thread must be gone before stdin goes back to line mode.
        self.stop.store(true, Ordering::Relaxed);
        if let Some(input_thread) = self.input_thread.take() {
            let _ = input_thread.join();
        }

        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
