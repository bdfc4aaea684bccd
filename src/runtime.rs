use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use tracing::warn;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source reading crossterm events on a background thread
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                Ok(CtEvent::Key(key)) => AppEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    warn!(error = %e, "terminal event reader stopped");
                    break;
                }
            };
            if tx.send(ev).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Event source fed from a channel, for headless runs and tests
pub struct ChannelEventSource {
    rx: Receiver<AppEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Returns the next event, or Tick once the tick interval passes.
    ///
    /// A pending `deadline` shortens the wait so quiz timers fire close to on time.
    pub fn step(&self, deadline: Option<Instant>) -> AppEvent {
        let mut wait = self.ticker.interval();
        if let Some(due) = deadline {
            wait = wait.min(due.saturating_duration_since(Instant::now()));
        }

        match self.event_source.recv_timeout(wait) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(rx: Receiver<AppEvent>, interval_ms: u64) -> Runner<ChannelEventSource, FixedTicker> {
        Runner::new(
            ChannelEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(interval_ms)),
        )
    }

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        assert!(matches!(runner(rx, 1).step(None), AppEvent::Tick));
    }

    #[test]
    fn step_ticks_after_disconnect() {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        drop(tx);
        assert!(matches!(runner(rx, 1).step(None), AppEvent::Tick));
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize).unwrap();
        assert!(matches!(runner(rx, 10).step(None), AppEvent::Resize));
    }

    #[test]
    fn step_wakes_for_earlier_deadline() {
        let (_tx, rx) = mpsc::channel();
        let runner = runner(rx, 10_000);

        let started = Instant::now();
        let ev = runner.step(Some(started + Duration::from_millis(5)));

        assert!(matches!(ev, AppEvent::Tick));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn step_with_past_deadline_does_not_block() {
        let (_tx, rx) = mpsc::channel();
        let runner = runner(rx, 10_000);

        let started = Instant::now();
        runner.step(Some(started));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
