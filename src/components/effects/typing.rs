//! Typewriter tagline: types a phrase, holds it, deletes it, moves on.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;

use super::dom::PendingTimeout;
use crate::components::particle_field::StopHandle;

pub const TAGLINES: [&str; 4] = [
	"La batalla más épica del Caribe.",
	"Adrenalina pura. Equipo premium.",
	"Tu siguiente misión te espera.",
	"Paintball de élite en Barranquilla.",
];

pub const TYPE_DELAY: Duration = Duration::from_millis(80);
pub const DELETE_DELAY: Duration = Duration::from_millis(50);
/// Pause with the full phrase on screen.
pub const HOLD_DELAY: Duration = Duration::from_millis(2200);
/// Pause on an empty line before the next phrase.
pub const NEXT_PHRASE_DELAY: Duration = Duration::from_millis(400);
pub const START_DELAY: Duration = Duration::from_millis(300);

/// Typing cursor over a cycle of phrases. Positions count chars, not bytes.
#[derive(Clone, Debug)]
pub struct Typewriter {
	phrases: Vec<String>,
	phrase: usize,
	chars: usize,
	deleting: bool,
}

impl Typewriter {
	pub fn new<S: Into<String>>(phrases: impl IntoIterator<Item = S>) -> Self {
		Self {
			phrases: phrases.into_iter().map(Into::into).collect(),
			phrase: 0,
			chars: 0,
			deleting: false,
		}
	}

	/// Advances one keystroke. Returns the visible text and how long to wait before the next tick.
	pub fn tick(&mut self) -> (String, Duration) {
		let Some(current) = self.phrases.get(self.phrase) else {
			return (String::new(), NEXT_PHRASE_DELAY);
		};
		let len = current.chars().count();

		let mut delay = if self.deleting {
			self.chars = self.chars.saturating_sub(1);
			DELETE_DELAY
		} else {
			self.chars = (self.chars + 1).min(len);
			TYPE_DELAY
		};
		let visible = current.chars().take(self.chars).collect();

		if !self.deleting && self.chars == len {
			self.deleting = true;
			delay = HOLD_DELAY;
		} else if self.deleting && self.chars == 0 {
			self.deleting = false;
			self.phrase = (self.phrase + 1) % self.phrases.len();
			delay = NEXT_PHRASE_DELAY;
		}

		(visible, delay)
	}
}

/// One keystroke unless `stop` has fired.
fn advance(writer: &RefCell<Typewriter>, stop: &StopHandle) -> Option<(String, Duration)> {
	if stop.is_stopped() {
		return None;
	}
	Some(writer.borrow_mut().tick())
}

struct TypingRun {
	writer: RefCell<Typewriter>,
	set_text: WriteSignal<String>,
	stop: StopHandle,
	pending: PendingTimeout,
}

fn schedule(run: Rc<TypingRun>, delay: Duration) {
	let next_run = run.clone();
	run.pending.restart(
		move || {
			if let Some((visible, next)) = advance(&next_run.writer, &next_run.stop) {
				next_run.set_text.set(visible);
				schedule(next_run, next);
			}
		},
		delay,
	);
}

/// Tagline that starts typing the first time `active` turns true.
#[component]
pub fn TypingText(#[prop(into)] active: Signal<bool>) -> impl IntoView {
	let (text, set_text) = signal(String::new());
	let started = Rc::new(Cell::new(false));
	let stop = StopHandle::new();
	let stop_cleanup = stop.clone();

	Effect::new(move |_| {
		if active.get() && !started.replace(true) {
			let run = Rc::new(TypingRun {
				writer: RefCell::new(Typewriter::new(TAGLINES)),
				set_text,
				stop: stop.clone(),
				pending: PendingTimeout::default(),
			});
			run.pending.clear_on(&stop);
			schedule(run, START_DELAY);
		}
	});

	on_cleanup(move || stop_cleanup.stop());

	view! {
		<span id="typingText" class="typing-text">{move || text.get()}</span>
		<span class="typing-caret">"|"</span>
	}
}
