//! Main TUI application state and logic

use crate::config::Config;
use crate::errors::AppError;
use crate::event::EventLog;
use crate::playback::{Animator, Timeline};
use crate::producers::init_log;
use crate::session::Session;
use crate::snapshot::StructureKind;
use crate::ui::metrics::Metrics;
use crate::ui::panes::{self, CodeScrollState, Indicator, InfoRenderData};
use crate::ui::scene::{Scene, Tone};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Highest speed reachable with `+`
const MAX_SPEED: f64 = 64.0;

/// Whether keys drive playback or edit the operand prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Operand,
}

/// The main application state
pub struct App {
    pub session: Session,
    pub animator: Animator<Scene, Metrics>,

    /// Time between two playback frames
    pub frame_interval: Duration,
    pub last_frame: Instant,

    pub input_mode: InputMode,
    pub operand_buffer: String,

    /// The bound log is an operation whose result has not been stored yet
    pub pending_result: bool,

    pub code_scroll: CodeScrollState,
    pub should_quit: bool,
    pub status_message: String,
}

impl App {
    /// Create the app and bind the first log.
    ///
    /// With `--operand` the selected operation runs right away.
    pub fn new(session: Session, config: &Config) -> Self {
        let scene = Scene::new(*session.meta(), session.input());
        let mut animator = Animator::with_observer(scene, Metrics::new());
        animator.set_speed(config.speed);

        let mut app = App {
            session,
            animator,
            frame_interval: config.frame_interval(),
            last_frame: Instant::now(),
            input_mode: InputMode::Normal,
            operand_buffer: String::new(),
            pending_result: false,
            code_scroll: CodeScrollState::default(),
            should_quit: false,
            status_message: String::from("Ready!"),
        };
        match config.operand {
            Some(operand) if app.session.meta().takes_operand => {
                app.run_operation(Some(operand))
            }
            _ => app.load_selected(),
        }
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.last_frame.elapsed() >= self.frame_interval {
                self.last_frame = Instant::now();
                if self.animator.frame() {
                    self.after_advance();
                }
            }

            // Poll until the next frame is due
            let timeout = self.frame_interval.saturating_sub(self.last_frame.elapsed());
            if event::poll(timeout)? {
                if let TermEvent::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Bind a log for the selected algorithm.
    ///
    /// Sorts and operand-free operations produce their full log; operations
    /// waiting for an operand show the current contents until one is entered.
    pub fn load_selected(&mut self) {
        let meta = *self.session.meta();
        let log = if meta.structure == StructureKind::Array {
            self.status_message = String::from("Ready!");
            self.session.run(None)
        } else {
            self.status_message = if meta.takes_operand {
                String::from("Press o to enter a value")
            } else {
                String::from("Press o to run")
            };
            init_log(&self.session.input())
        };
        self.animator.pause();
        self.bind(log, false);
        // Show the starting contents right away
        self.animator.seek(0);
    }

    /// Produce and start playing one operation on the current contents.
    ///
    /// An operation still playing is committed first, so the new one runs on
    /// its result.
    pub fn run_operation(&mut self, operand: Option<f64>) {
        self.commit_pending();
        info!(algorithm = self.session.meta().id, ?operand, "running operation");
        let log = self.session.run(operand);
        self.bind(log, true);
        self.animator.play();
        self.status_message = String::from("Playing...");
    }

    fn bind(&mut self, log: EventLog, pending_result: bool) {
        self.animator
            .renderer_mut()
            .rebind(*self.session.meta(), self.session.input());
        self.animator.set_timeline(Timeline::new(log));
        self.animator.reset();
        self.pending_result = pending_result;
        self.code_scroll = CodeScrollState::default();
    }

    /// Bookkeeping after any forward movement
    fn after_advance(&mut self) {
        if !self.animator.is_finished() {
            return;
        }
        if self.animator.is_playing() {
            self.animator.pause();
            self.status_message = String::from("Playback complete");
        }
        self.commit_pending();
    }

    /// Store the bound operation's result if it has not been stored yet.
    ///
    /// Logs are produced in full up front, so this is valid mid-playback.
    fn commit_pending(&mut self) {
        if !self.pending_result {
            return;
        }
        self.pending_result = false;
        if let Some(timeline) = self.animator.timeline() {
            if self.session.apply(timeline.events()) {
                debug!(algorithm = self.session.meta().id, "operation result stored");
            }
        }
    }

    fn indicator(&self) -> Indicator {
        if self.input_mode == InputMode::Operand {
            Indicator::Input
        } else if self.animator.is_playing() {
            Indicator::Playing
        } else if self.animator.is_finished() {
            Indicator::End
        } else if self.animator.time() <= 0.0 {
            Indicator::Start
        } else {
            Indicator::None
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: canvas (top) | info (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(7)])
            .split(columns[0]);

        let scene = self.animator.renderer();
        panes::render_canvas_pane(frame, left_rows[0], scene);

        let timeline = self.animator.timeline();
        let info = InfoRenderData {
            scene,
            metrics: self.animator.observer(),
            time: self.animator.time(),
            end_tick: timeline.and_then(Timeline::end_tick),
            speed: self.animator.speed(),
            operand_input: (self.input_mode == InputMode::Operand)
                .then_some(self.operand_buffer.as_str()),
        };
        panes::render_info_pane(frame, left_rows[1], &info);

        let is_error = matches!(scene.message(), Some((Tone::Error, _)));
        panes::render_code_pane(
            frame,
            columns[1],
            scene.meta().name,
            scene.meta().source,
            scene.line(),
            is_error,
            &mut self.code_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            timeline.map_or(0, Timeline::position),
            timeline.map_or(0, Timeline::len),
            self.indicator(),
            self.session.meta().takes_operand,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.input_mode == InputMode::Operand {
            self.handle_operand_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                if self.animator.is_playing() {
                    self.animator.pause();
                    self.status_message = String::from("Paused");
                } else {
                    if self.animator.is_finished() {
                        self.animator.reset();
                    }
                    self.animator.play();
                    self.status_message = String::from("Playing...");
                }
            }
            KeyCode::Right => {
                self.animator.pause();
                self.animator.step();
                self.status_message = String::from("Stepped forward");
                self.after_advance();
            }
            KeyCode::Left => {
                self.animator.pause();
                self.animator.step_back();
                self.status_message = String::from("Stepped backward");
            }
            KeyCode::Enter => {
                self.animator.pause();
                if let Some(end) = self.animator.timeline().and_then(Timeline::end_tick) {
                    self.animator.seek(end);
                }
                self.status_message = String::from("Jumped to end");
                self.after_advance();
            }
            KeyCode::Backspace => {
                self.animator.pause();
                self.animator.reset();
                self.status_message = String::from("Jumped to start");
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let speed = (self.animator.speed() * 2.0).min(MAX_SPEED);
                self.animator.set_speed(speed);
                self.status_message = format!("Speed {:.2}x", self.animator.speed());
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.animator.set_speed(self.animator.speed() / 2.0);
                self.status_message = format!("Speed {:.2}x", self.animator.speed());
            }
            KeyCode::Tab => {
                self.commit_pending();
                self.session.select_next();
                self.load_selected();
            }
            KeyCode::BackTab => {
                self.commit_pending();
                self.session.select_prev();
                self.load_selected();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.commit_pending();
                self.session.randomize();
                self.load_selected();
                self.status_message = String::from("Randomized input");
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                if self.session.structure() == StructureKind::Array {
                    self.status_message = String::from("Sorts run on load; press r for new input");
                } else if self.session.meta().takes_operand {
                    self.animator.pause();
                    self.input_mode = InputMode::Operand;
                    self.operand_buffer.clear();
                } else {
                    self.run_operation(None);
                }
            }
            KeyCode::Up => {
                // Scrolling up makes the current line move down visually
                if let Some(row) = self.code_scroll.target_line_row {
                    self.code_scroll.target_line_row = Some(row.saturating_add(1));
                }
            }
            KeyCode::Down => {
                if let Some(row) = self.code_scroll.target_line_row {
                    self.code_scroll.target_line_row = Some(row.saturating_sub(1));
                }
            }
            _ => {}
        }
    }

    fn handle_operand_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.status_message = String::from("Cancelled");
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                // Unparsable text becomes a missing operand, which the
                // producer reports as an error event
                let operand = self.operand_buffer.trim().parse::<f64>().ok();
                self.run_operation(operand);
            }
            KeyCode::Backspace => {
                self.operand_buffer.pop();
            }
            KeyCode::Char(c) if !c.is_control() => {
                self.operand_buffer.push(c);
            }
            _ => {}
        }
    }
}
