//! Cancelable one-shot timers driven by a caller-supplied clock.
//!
//! Nothing here sleeps or spawns: the owner passes `Instant`s in and polls
//! whenever it gets control back. A [`Timer`] holds at most one pending
//! payload; scheduling again replaces it.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Quiet period before a typed query is applied.
pub const QUERY_DEBOUNCE: Duration = Duration::from_millis(300);

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Identifies one scheduling of a [`Timer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Pending<T> {
	handle: TimerHandle,
	due: Instant,
	payload: T,
}

#[derive(Debug, Clone)]
pub struct Timer<T> {
	pending: Option<Pending<T>>,
	next_id: u64,
}

impl<T> Default for Timer<T> {
	fn default() -> Self {
		Self {
			pending: None,
			next_id: 0,
		}
	}
}

impl<T> Timer<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Schedule `payload` to fire `delay` after `now`, discarding whatever
	/// was pending.
	pub fn schedule(&mut self, payload: T, now: Instant, delay: Duration) -> TimerHandle {
		let handle = TimerHandle(self.next_id);
		self.next_id += 1;
		self.pending = Some(Pending {
			handle,
			due: now + delay,
			payload,
		});
		handle
	}

	/// Drop the pending payload, if any.
	pub fn cancel(&mut self) -> Option<T> {
		self.pending.take().map(|pending| pending.payload)
	}

	/// Cancel only if `handle` is still the pending scheduling.
	pub fn cancel_handle(&mut self, handle: TimerHandle) -> bool {
		if self.pending.as_ref().is_some_and(|pending| pending.handle == handle) {
			self.pending = None;
			true
		} else {
			false
		}
	}

	/// Take the payload once its deadline has passed.
	pub fn poll(&mut self, now: Instant) -> Option<T> {
		if self.pending.as_ref().is_some_and(|pending| now >= pending.due) {
			self.cancel()
		} else {
			None
		}
	}

	/// Take the payload regardless of its deadline.
	pub fn fire_now(&mut self) -> Option<T> {
		self.cancel()
	}

	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}
}

/// Holds back the latest input until it has been quiet for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
	delay: Duration,
	timer: Timer<T>,
}

impl<T> Default for Debouncer<T> {
	fn default() -> Self {
		Self::new(QUERY_DEBOUNCE)
	}
}

impl<T> Debouncer<T> {
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			timer: Timer::new(),
		}
	}

	/// Record new input, restarting the quiet period.
	pub fn input(&mut self, value: T, now: Instant) -> TimerHandle {
		self.timer.schedule(value, now, self.delay)
	}

	/// The settled value, once the quiet period has elapsed.
	pub fn poll(&mut self, now: Instant) -> Option<T> {
		self.timer.poll(now)
	}

	/// Settle immediately.
	pub fn flush(&mut self) -> Option<T> {
		self.timer.fire_now()
	}

	pub fn cancel(&mut self) -> Option<T> {
		self.timer.cancel()
	}

	pub fn is_pending(&self) -> bool {
		self.timer.is_pending()
	}
}

/// A short user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
	pub message: String,
}

/// The current notice, which dismisses itself after [`NOTICE_TTL`].
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
	current: Option<Notice>,
	expiry: Timer<()>,
}

impl NoticeBoard {
	/// Show `message`, replacing any visible notice and restarting the
	/// dismissal timer.
	pub fn post(&mut self, message: impl Into<String>, now: Instant) {
		self.current = Some(Notice {
			message: message.into(),
		});
		self.expiry.schedule((), now, NOTICE_TTL);
	}

	/// The notice still visible at `now`.
	pub fn current(&mut self, now: Instant) -> Option<&Notice> {
		if self.expiry.poll(now).is_some() {
			self.current = None;
		}
		self.current.as_ref()
	}

	pub fn dismiss(&mut self) {
		self.expiry.cancel();
		self.current = None;
	}
}
