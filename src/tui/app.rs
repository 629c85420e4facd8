//! TUI application state and event handling.

use std::cell::Cell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::{debug, info};

use super::ui;
use super::widget::{contains, ButtonStyle};
use crate::config::{ButtonConfig, ConfigError};
use crate::hold::{ClockTick, HoldButton, PointerEvent, ProgressClock, Transition};

/// Input poll interval, roughly one frame.
const FRAME: Duration = Duration::from_millis(16);

/// TUI application state (separate from terminal for borrowing).
#[derive(Debug)]
pub struct TuiState {
    /// Completed holds, shown above the button.
    pub count: Rc<Cell<u64>>,
    /// The hold control.
    pub button: HoldButton,
    /// Resolved button styling.
    pub style: ButtonStyle,
    /// Where the button was last drawn.
    pub button_area: Rect,
    /// Whether the terminal reports key release events.
    pub keyboard_enhanced: bool,
    /// Whether the hold key is currently down.
    key_down: bool,
}

impl TuiState {
    /// Build the demo state: a button whose action increments the counter.
    pub fn new(config: &ButtonConfig, clock: ProgressClock) -> Result<Self, ConfigError> {
        let style = ButtonStyle::from_config(config)?;
        let count = Rc::new(Cell::new(0u64));
        let counter = Rc::clone(&count);
        let mut button = HoldButton::new(
            config.text.clone(),
            config.duration(),
            clock,
            move || counter.set(counter.get() + 1),
        );
        button.mount();

        Ok(Self {
            count,
            button,
            style,
            button_area: Rect::default(),
            keyboard_enhanced: false,
            key_down: false,
        })
    }

    /// Translate a mouse event into a pointer sample for the button.
    pub fn pointer_for_mouse(&self, mouse: MouseEvent) -> Option<PointerEvent> {
        let inside = contains(self.style.shape, self.button_area, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::down(inside)),
            MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::moved(inside)),
            MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::up(inside)),
            _ => None,
        }
    }

    /// Translate the hold key into a pointer sample for the button.
    ///
    /// Only terminals that report releases can drive a hold from the
    /// keyboard; elsewhere key repeat would look like a stream of presses.
    pub fn pointer_for_key(&mut self, key: KeyEvent) -> Option<PointerEvent> {
        if !self.keyboard_enhanced || !matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
            return None;
        }
        match key.kind {
            KeyEventKind::Press if !self.key_down => {
                self.key_down = true;
                Some(PointerEvent::down(true))
            }
            KeyEventKind::Press | KeyEventKind::Repeat => Some(PointerEvent::moved(true)),
            KeyEventKind::Release => {
                self.key_down = false;
                Some(PointerEvent::up(true))
            }
        }
    }

    /// Feed a pointer sample to the button.
    pub fn apply(&mut self, pointer: PointerEvent, now: Instant) {
        for transition in self.button.pointer(pointer, now) {
            self.log_transition(transition);
        }
    }

    /// Apply a clock tick and fire the threshold if it is due.
    pub fn tick(&mut self, tick: ClockTick, now: Instant) {
        let transition = self.button.on_tick(tick);
        self.log_transition(transition);
        self.poll(now);
    }

    /// Fire the threshold if it is due.
    pub fn poll(&mut self, now: Instant) {
        if let Some(transition) = self.button.poll(now) {
            self.log_transition(transition);
        }
    }

    fn log_transition(&self, transition: Transition) {
        if transition == Transition::Completed {
            info!(count = self.count.get(), "counter increased");
        }
    }
}

/// TUI application.
pub struct TuiApp {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Clock ticks from the button's background ticker.
    ticks: Receiver<ClockTick>,
    /// Application state.
    state: TuiState,
}

impl TuiApp {
    /// Set up the terminal and the demo state.
    pub fn new(config: &ButtonConfig, granularity: Duration) -> anyhow::Result<Self> {
        let (tx, ticks) = mpsc::channel();
        let mut state = TuiState::new(config, ProgressClock::threaded(granularity, tx))?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        state.keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if state.keyboard_enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        debug!(keyboard_enhanced = state.keyboard_enhanced, "terminal ready");
        Ok(Self {
            terminal,
            ticks,
            state,
        })
    }

    /// Completed holds so far.
    pub fn count(&self) -> u64 {
        self.state.count.get()
    }

    /// Run the TUI event loop until the user quits.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            // Draw UI - borrow state separately
            let state = &self.state;
            let mut button_area = state.button_area;
            self.terminal.draw(|f| button_area = ui::draw(f, state))?;
            self.state.button_area = button_area;

            if event::poll(FRAME)? {
                match event::read()? {
                    Event::Key(key) => {
                        if key.kind == KeyEventKind::Press && is_quit(&key) {
                            break;
                        }
                        if let Some(pointer) = self.state.pointer_for_key(key) {
                            self.state.apply(pointer, Instant::now());
                        }
                    }
                    Event::Mouse(mouse) => {
                        if let Some(pointer) = self.state.pointer_for_mouse(mouse) {
                            self.state.apply(pointer, Instant::now());
                        }
                    }
                    _ => {}
                }
            }

            // Apply clock ticks (non-blocking)
            while let Ok(tick) = self.ticks.try_recv() {
                self.state.tick(tick, Instant::now());
            }
            self.state.poll(Instant::now());
        }

        Ok(())
    }

    /// Clean up and restore terminal.
    pub fn cleanup(&mut self) -> io::Result<()> {
        if self.state.keyboard_enhanced {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
            self.state.keyboard_enhanced = false;
        }
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

/// `q`, `Esc` or Ctrl-C, which raw mode delivers as a key.
fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
