//! Low-level input collection: crossterm polling, mouse wheel coalescing, and
//! translation into primitive events the input service consumes.
//!
//! Wheel ticks arrive in bursts; folding a burst into one scroll step keeps the number
//! of viewport updates per frame small.

use crate::error::Result;
use crate::input::service::ScrollDirection;
use ratatui::crossterm::event::{self, Event, KeyEvent, MouseEventKind};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default coalescing window in milliseconds for scroll events.
const DEFAULT_COALESCE_WINDOW_MS: u64 = 12;
/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Low-level events surfaced by the raw input collector.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    Scroll { direction: ScrollDirection, lines: u64 },
}

#[derive(Debug, Clone)]
struct PendingScroll {
    direction: ScrollDirection,
    lines: u64,
    last_event: Instant,
}

/// Aggregates same-direction wheel ticks that arrive within `window` of each other.
#[derive(Debug, Clone)]
pub struct ScrollCoalescer {
    window: Duration,
    pending: Option<PendingScroll>,
}

impl ScrollCoalescer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Register a tick, returning a previously queued scroll when the direction flips.
    pub fn push(
        &mut self,
        direction: ScrollDirection,
        lines: u64,
        now: Instant,
    ) -> Option<(ScrollDirection, u64)> {
        if let Some(pending) = self.pending.as_mut() {
            if pending.direction == direction {
                pending.lines = pending.lines.saturating_add(lines);
                pending.last_event = now;
                return None;
            }
        }
        self.pending
            .replace(PendingScroll {
                direction,
                lines,
                last_event: now,
            })
            .map(|flushed| (flushed.direction, flushed.lines))
    }

    /// Flush accumulated ticks once the window has expired.
    pub fn flush_if_stale(&mut self, now: Instant) -> Option<(ScrollDirection, u64)> {
        match &self.pending {
            Some(pending) if now.duration_since(pending.last_event) >= self.window => {
                self.flush()
            }
            _ => None,
        }
    }

    pub fn flush(&mut self) -> Option<(ScrollDirection, u64)> {
        self.pending
            .take()
            .map(|pending| (pending.direction, pending.lines))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

/// Collector that polls crossterm for events and applies scroll coalescing.
#[derive(Debug)]
pub struct RawInputCollector {
    coalescer: ScrollCoalescer,
    pending_events: VecDeque<RawInputEvent>,
    lines_per_tick: u64,
}

impl RawInputCollector {
    pub fn new(lines_per_tick: u64) -> Self {
        Self::with_window(
            Duration::from_millis(DEFAULT_COALESCE_WINDOW_MS),
            lines_per_tick,
        )
    }

    /// Custom coalescing window (useful for tests).
    pub fn with_window(window: Duration, lines_per_tick: u64) -> Self {
        Self {
            coalescer: ScrollCoalescer::new(window),
            pending_events: VecDeque::new(),
            lines_per_tick: lines_per_tick.max(1),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pending_events.is_empty() && self.coalescer.is_empty()
    }

    /// Feed an event without polling the terminal.
    pub fn process_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                self.flush_pending_scroll();
                self.pending_events.push_back(RawInputEvent::Key(key_event));
            }
            Event::Resize(width, height) => {
                self.flush_pending_scroll();
                self.pending_events
                    .push_back(RawInputEvent::Resize { width, height });
            }
            Event::Mouse(mouse_event) => {
                let direction = match mouse_event.kind {
                    MouseEventKind::ScrollUp => ScrollDirection::Up,
                    MouseEventKind::ScrollDown => ScrollDirection::Down,
                    _ => return,
                };
                if let Some((direction, lines)) =
                    self.coalescer
                        .push(direction, self.lines_per_tick, Instant::now())
                {
                    self.pending_events
                        .push_back(RawInputEvent::Scroll { direction, lines });
                }
            }
            _ => {}
        }
    }

    /// Next ready event without blocking: a stale scroll burst first, then queued events.
    pub fn try_flush(&mut self) -> Option<RawInputEvent> {
        self.coalescer
            .flush_if_stale(Instant::now())
            .map(|(direction, lines)| RawInputEvent::Scroll { direction, lines })
            .or_else(|| self.pending_events.pop_front())
    }

    /// Retrieve the next raw input event, blocking up to `timeout`.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.try_flush() {
            return Ok(Some(event));
        }

        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        if event::poll(poll_timeout)? {
            self.process_event(event::read()?);
        }
        Ok(self.try_flush())
    }

    fn flush_pending_scroll(&mut self) {
        if let Some((direction, lines)) = self.coalescer.flush() {
            self.pending_events
                .push_back(RawInputEvent::Scroll { direction, lines });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers, MouseEvent};

    fn wheel(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn coalescer_merges_same_direction() {
        let mut coalescer = ScrollCoalescer::new(Duration::from_millis(10));
        let now = Instant::now();
        assert_eq!(coalescer.push(ScrollDirection::Down, 3, now), None);
        assert_eq!(coalescer.push(ScrollDirection::Down, 3, now), None);
        assert_eq!(
            coalescer.push(ScrollDirection::Up, 3, now),
            Some((ScrollDirection::Down, 6))
        );
        assert_eq!(coalescer.flush_if_stale(now), None);
        assert_eq!(
            coalescer.flush_if_stale(now + Duration::from_millis(10)),
            Some((ScrollDirection::Up, 3))
        );
        assert!(coalescer.is_empty());
    }

    #[test]
    fn key_event_flushes_pending_scroll_first() {
        let mut collector = RawInputCollector::with_window(Duration::from_secs(60), 3);
        collector.process_event(wheel(MouseEventKind::ScrollDown));
        collector.process_event(wheel(MouseEventKind::ScrollDown));
        collector.process_event(Event::Key(KeyEvent::new(
            KeyCode::Char('j'),
            KeyModifiers::NONE,
        )));

        assert_eq!(
            collector.try_flush(),
            Some(RawInputEvent::Scroll {
                direction: ScrollDirection::Down,
                lines: 6,
            })
        );
        assert!(matches!(collector.try_flush(), Some(RawInputEvent::Key(_))));
        assert!(collector.is_idle());
    }

    #[test]
    fn stale_burst_is_flushed() {
        let mut collector = RawInputCollector::with_window(Duration::from_millis(1), 2);
        collector.process_event(wheel(MouseEventKind::ScrollUp));
        std::thread::sleep(Duration::from_millis(3));
        assert_eq!(
            collector.try_flush(),
            Some(RawInputEvent::Scroll {
                direction: ScrollDirection::Up,
                lines: 2,
            })
        );
    }

    #[test]
    fn other_mouse_events_ignored() {
        let mut collector = RawInputCollector::new(3);
        collector.process_event(wheel(MouseEventKind::Moved));
        assert!(collector.is_idle());
    }
}
