//! Interactive terminal keypad
//!
//! Keyboard events come through an [`EventSource`] so the session loop runs
//! the same against a real terminal and a scripted queue. The poll timeout
//! doubles as the restore timer: it never sleeps past the next pending
//! display restore.

use crate::error::{CliError, CliResult};
use crate::output::render_screen;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue, style::Print};
use std::collections::VecDeque;
use std::io::Write;
use std::time::Duration;
use ti83_core::clock::{Clock, SystemClock};
use ti83_core::config::CalculatorConfig;
use ti83_core::controller::KeypadController;
use ti83_core::display::{DisplaySink, MemoryDisplay};
use ti83_core::haptics::{Haptics, NoHaptics};
use ti83_core::keypad::Keypad;
use ti83_core::keys::Key;
use tracing::{debug, trace};

/// Longest wait between polls when no restore is pending
pub const IDLE_POLL: Duration = Duration::from_millis(250);

/// Source of terminal events
pub trait EventSource {
    /// Waits up to `timeout` for an event, returning true if one is ready
    fn poll(&mut self, timeout: Duration) -> CliResult<bool>;

    /// Reads the next event; call only after [`poll`](Self::poll) returned true
    fn read(&mut self) -> CliResult<Event>;

    /// True once no more events will arrive
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Reads events from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalEventSource;

impl TerminalEventSource {
    /// Create a new terminal event source
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EventSource for TerminalEventSource {
    fn poll(&mut self, timeout: Duration) -> CliResult<bool> {
        Ok(event::poll(timeout)?)
    }

    fn read(&mut self) -> CliResult<Event> {
        Ok(event::read()?)
    }
}

/// Pre-programmed event queue
#[derive(Debug, Clone, Default)]
pub struct TestEventSource {
    events: VecDeque<Event>,
}

impl TestEventSource {
    /// Create an empty queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue holding `events`
    #[must_use]
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
        }
    }

    /// Queues key presses for each character of `text`
    #[must_use]
    pub fn typing(text: &str) -> Self {
        Self::with_events(text.chars().map(|c| key_event(KeyCode::Char(c))).collect())
    }

    /// Appends an event
    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Events not yet read
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for TestEventSource {
    fn poll(&mut self, _timeout: Duration) -> CliResult<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> CliResult<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| CliError::invalid_argument("no events queued"))
    }

    fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }
}

/// Builds a key-press event with no modifiers
#[must_use]
pub fn key_event(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

/// What a terminal event means to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send a key to the controller
    Press(Key),
    /// Redraw without input
    Redraw,
    /// End the session
    Quit,
}

/// Maps a terminal event onto a session action
///
/// Key releases and unmapped keys yield `None`.
#[must_use]
pub fn translate(event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Resize(..) => Some(Action::Redraw),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'd') => Some(Action::Quit),
            _ => None,
        };
    }
    let name = match key.code {
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Char(c) => c.to_string(),
        _ => return None,
    };
    Keypad::key_for_keyboard(&name).map(Action::Press)
}

/// How long the next poll may block
#[must_use]
pub fn poll_timeout<D, H, C>(controller: &KeypadController<D, H, C>) -> Duration
where
    D: DisplaySink,
    H: Haptics,
    C: Clock,
{
    let now = controller.clock().now_ms();
    controller.pending_restore_due().map_or(IDLE_POLL, |due| {
        Duration::from_millis(due.saturating_sub(now)).min(IDLE_POLL)
    })
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Keys sent to the controller
    pub keys_handled: usize,
    /// The user asked to quit
    pub quit_requested: bool,
}

/// Runs the event loop until quit or until the source is exhausted
///
/// `redraw` receives the primary display and history text whenever either
/// may have changed, starting with the initial screen.
pub fn run_session<S, D, H, C, F>(
    controller: &mut KeypadController<D, H, C>,
    source: &mut S,
    mut redraw: F,
) -> CliResult<SessionOutcome>
where
    S: EventSource,
    D: DisplaySink,
    H: Haptics,
    C: Clock,
    F: FnMut(&str, &str) -> CliResult<()>,
{
    let mut outcome = SessionOutcome {
        keys_handled: 0,
        quit_requested: false,
    };
    redraw(controller.screen(), controller.history())?;

    loop {
        let mut dirty = false;
        if source.poll(poll_timeout(controller))? {
            let event = source.read()?;
            match translate(&event) {
                Some(Action::Press(key)) => {
                    trace!(key = %key, "terminal key");
                    controller.handle_key(key);
                    outcome.keys_handled += 1;
                    dirty = true;
                }
                Some(Action::Redraw) => dirty = true,
                Some(Action::Quit) => {
                    outcome.quit_requested = true;
                    break;
                }
                None => {}
            }
        }
        if controller.tick() {
            dirty = true;
        }
        if dirty {
            redraw(controller.screen(), controller.history())?;
        }
        if source.is_exhausted() {
            break;
        }
    }

    debug!(keys = outcome.keys_handled, "session ended");
    Ok(outcome)
}

/// Raw mode plus alternate screen, undone on drop
#[derive(Debug)]
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> CliResult<Self> {
        enable_raw_mode()?;
        execute!(std::io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(std::io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

fn draw(out: &mut impl Write, display: &str, history: &str, use_color: bool) -> CliResult<()> {
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    for line in render_screen(display, history, use_color) {
        queue!(out, Print(line), Print("\r\n"))?;
    }
    queue!(out, Print("\r\nCtrl-C to quit, `ti83 keys` for the key map\r\n"))?;
    out.flush()?;
    Ok(())
}

/// Controller for a long-running session
///
/// The display keeps only the latest text; the terminal redraw reads the
/// controller, never a frame log.
#[must_use]
pub fn session_controller<C: Clock>(
    config: CalculatorConfig,
    clock: C,
) -> KeypadController<MemoryDisplay, NoHaptics, C> {
    KeypadController::with_config(MemoryDisplay::latest_only(), NoHaptics, clock, config)
}

/// Runs the keypad on the controlling terminal
pub fn run_interactive(config: CalculatorConfig, use_color: bool) -> CliResult<SessionOutcome> {
    let mut controller = session_controller(config, SystemClock::new());
    let mut source = TerminalEventSource::new();
    let _guard = TerminalGuard::enter()?;
    let mut stdout = std::io::stdout();
    run_session(&mut controller, &mut source, |display, history| {
        draw(&mut stdout, display, history, use_color)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use ti83_core::clock::ManualClock;
    use ti83_core::core::Operation;

    type TestController = KeypadController<MemoryDisplay, NoHaptics, ManualClock>;

    fn controller() -> (TestController, ManualClock) {
        let clock = ManualClock::new();
        (
            KeypadController::new(MemoryDisplay::new(), NoHaptics, clock.clone()),
            clock,
        )
    }

    fn frames(
        controller: &mut TestController,
        source: &mut TestEventSource,
    ) -> (SessionOutcome, Vec<(String, String)>) {
        let mut frames = Vec::new();
        let outcome = run_session(controller, source, |d, h| {
            frames.push((d.to_string(), h.to_string()));
            Ok(())
        })
        .unwrap();
        (outcome, frames)
    }

    // ===== Translation tests =====

    #[test]
    fn test_translate_digits_and_operators() {
        assert_eq!(
            translate(&key_event(KeyCode::Char('7'))),
            Key::digit(7).map(Action::Press)
        );
        assert_eq!(
            translate(&key_event(KeyCode::Char('*'))),
            Some(Action::Press(Key::Operator(Operation::Multiply)))
        );
        assert_eq!(
            translate(&key_event(KeyCode::Enter)),
            Some(Action::Press(Key::Enter))
        );
        assert_eq!(
            translate(&key_event(KeyCode::Esc)),
            Some(Action::Press(Key::Clear))
        );
        assert_eq!(
            translate(&key_event(KeyCode::Backspace)),
            Some(Action::Press(Key::Delete))
        );
    }

    #[test]
    fn test_translate_ctrl_c_quits() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(&event), Some(Action::Quit));
    }

    #[test]
    fn test_translate_ignores_release_and_unmapped() {
        let mut release = KeyEvent::new(KeyCode::Char('5'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(&Event::Key(release)), None);
        assert_eq!(translate(&key_event(KeyCode::Char('z'))), None);
        assert_eq!(translate(&key_event(KeyCode::F(1))), None);
        assert_eq!(translate(&Event::FocusGained), None);
    }

    #[test]
    fn test_translate_resize_redraws() {
        assert_eq!(translate(&Event::Resize(80, 24)), Some(Action::Redraw));
    }

    // ===== Event source tests =====

    #[test]
    fn test_event_source_drains() {
        let mut source = TestEventSource::typing("12");
        assert_eq!(source.remaining(), 2);
        assert!(source.poll(Duration::ZERO).unwrap());
        source.read().unwrap();
        source.read().unwrap();
        assert!(source.is_exhausted());
        assert!(!source.poll(Duration::ZERO).unwrap());
        assert!(source.read().is_err());
    }

    #[test]
    fn test_terminal_source_never_exhausted() {
        assert!(!TerminalEventSource::new().is_exhausted());
    }

    // ===== Session tests =====

    #[test]
    fn test_session_computes() {
        let (mut c, _) = controller();
        let mut source = TestEventSource::typing("5+3+2");
        source.push(key_event(KeyCode::Enter));
        let (outcome, frames) = frames(&mut c, &mut source);

        assert_eq!(outcome.keys_handled, 6);
        assert!(!outcome.quit_requested);
        assert_eq!(frames.first().unwrap().0, "0");
        assert_eq!(frames.last().unwrap(), &("10".to_string(), "8 + 2".to_string()));
    }

    #[test]
    fn test_session_stops_at_quit() {
        let (mut c, _) = controller();
        let mut source = TestEventSource::typing("4");
        source.push(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        source.push(key_event(KeyCode::Char('9')));
        let (outcome, _) = frames(&mut c, &mut source);

        assert!(outcome.quit_requested);
        assert_eq!(c.current_input(), "4");
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_session_restores_after_mode_message() {
        let (mut c, clock) = controller();
        let mut source = TestEventSource::typing("7m");
        let (_, frames_before) = frames(&mut c, &mut source);
        assert_eq!(frames_before.last().unwrap().0, "Radian Mode");

        clock.advance_ms(1500);
        let mut source = TestEventSource::new();
        let (_, frames_after) = frames(&mut c, &mut source);
        assert_eq!(frames_after.last().unwrap().0, "7");
    }

    #[test]
    fn test_session_display_does_not_grow() {
        let clock = ManualClock::new();
        let mut c = session_controller(CalculatorConfig::default(), clock);
        let mut source = TestEventSource::new();
        for _ in 0..10_000 {
            source.push(key_event(KeyCode::Char('1')));
            source.push(key_event(KeyCode::Esc));
        }
        let outcome = run_session(&mut c, &mut source, |_, _| Ok(())).unwrap();

        assert_eq!(outcome.keys_handled, 20_000);
        assert!(c.display().frames().is_empty());
        assert_eq!(c.display().primary(), "0");
    }

    #[test]
    fn test_poll_timeout_tracks_restore() {
        let (mut c, clock) = controller();
        assert_eq!(poll_timeout(&c), IDLE_POLL);

        c.handle_key(Key::Mode);
        assert_eq!(poll_timeout(&c), IDLE_POLL);
        clock.advance_ms(1400);
        assert_eq!(poll_timeout(&c), Duration::from_millis(100));
        clock.advance_ms(200);
        assert_eq!(poll_timeout(&c), Duration::ZERO);
    }
}
