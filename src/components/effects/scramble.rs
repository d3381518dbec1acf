//! Hover scramble for section labels: glyph noise that resolves left to right.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use web_sys::MouseEvent;

use crate::components::particle_field::StopHandle;

pub const GLYPHS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%&";
pub const SCRAMBLE_TICK: Duration = Duration::from_millis(30);
/// Resolved chars gained per tick.
const FRAME_STEP: f64 = 0.5;

fn keeps_shape(c: char) -> bool {
	matches!(c, ' ' | '/' | '.')
}

/// One scramble run over a fixed label.
#[derive(Clone, Debug)]
pub struct TextScramble {
	original: Vec<char>,
	glyphs: Vec<char>,
	frame: f64,
	running: bool,
}

impl TextScramble {
	pub fn new(text: &str) -> Self {
		Self {
			original: text.chars().collect(),
			glyphs: GLYPHS.chars().collect(),
			frame: 0.0,
			running: false,
		}
	}

	pub fn original(&self) -> String {
		self.original.iter().collect()
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Begins a run. Returns `false` if one is already in progress.
	pub fn start(&mut self) -> bool {
		if self.running {
			return false;
		}
		self.running = true;
		self.frame = 0.0;
		true
	}

	/// Aborts a run, leaving the label resolved.
	pub fn cancel(&mut self) {
		self.running = false;
	}

	/// Produces the next frame. The `bool` is true once the run has finished
	/// and the original text is back.
	pub fn tick<R: Rng>(&mut self, rng: &mut R) -> (String, bool) {
		let text = self
			.original
			.iter()
			.enumerate()
			.map(|(i, &c)| {
				if keeps_shape(c) || (i as f64) < self.frame {
					c
				} else {
					self.glyphs[rng.random_range(0..self.glyphs.len())]
				}
			})
			.collect();

		self.frame += FRAME_STEP;
		if self.frame >= self.original.len() as f64 {
			self.running = false;
			return (self.original(), true);
		}
		(text, false)
	}
}

/// Section label that scrambles on hover. Hovering mid-run is ignored.
#[component]
pub fn ScrambleLabel(#[prop(into)] text: String) -> impl IntoView {
	let (shown, set_shown) = signal(text.clone());
	let scramble = Rc::new(RefCell::new(TextScramble::new(&text)));
	let rng = Rc::new(RefCell::new(Pcg32::seed_from_u64(crate::random_seed())));
	let interval: Rc<Cell<Option<IntervalHandle>>> = Rc::default();
	let stop = StopHandle::new();

	let interval_stop = interval.clone();
	stop.on_stop(move || {
		if let Some(handle) = interval_stop.take() {
			handle.clear();
		}
	});
	let stop_cleanup = stop.clone();
	on_cleanup(move || stop_cleanup.stop());

	let on_enter = move |_: MouseEvent| {
		if stop.is_stopped() || !scramble.borrow_mut().start() {
			return;
		}
		let (scramble_tick, rng_tick, interval_tick) = (scramble.clone(), rng.clone(), interval.clone());

		let tick = move || {
			let (frame, done) = scramble_tick.borrow_mut().tick(&mut *rng_tick.borrow_mut());
			set_shown.set(frame);
			if done {
				if let Some(handle) = interval_tick.take() {
					handle.clear();
				}
			}
		};

		match set_interval_with_handle(tick, SCRAMBLE_TICK) {
			Ok(handle) => interval.set(Some(handle)),
			Err(_) => scramble.borrow_mut().cancel(),
		}
	};

	view! { <span class="section-eyebrow" on:mouseenter=on_enter>{move || shown.get()}</span> }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn run_to_end(scramble: &mut TextScramble, seed: u64) -> Vec<String> {
		let mut rng = Pcg32::seed_from_u64(seed);
		assert!(scramble.start());
		let mut frames = Vec::new();
		loop {
			let (text, done) = scramble.tick(&mut rng);
			frames.push(text);
			if done {
				return frames;
			}
		}
	}

	#[test]
	fn frames_keep_length_separators_and_resolved_prefix() {
		let label = "// NUESTROS SERVICIOS.";
		let mut scramble = TextScramble::new(label);
		let original: Vec<char> = label.chars().collect();
		let frames = run_to_end(&mut scramble, 15);

		for (n, frame) in frames.iter().enumerate() {
			let chars: Vec<char> = frame.chars().collect();
			assert_eq!(chars.len(), original.len());
			let resolved = n as f64 * FRAME_STEP;
			for (i, (&got, &want)) in chars.iter().zip(&original).enumerate() {
				if keeps_shape(want) || (i as f64) < resolved {
					assert_eq!(got, want);
				} else {
					assert!(GLYPHS.contains(got));
				}
			}
		}
	}

	#[test]
	fn run_lasts_two_ticks_per_char_and_restores_label() {
		let mut scramble = TextScramble::new("ZONA");
		let frames = run_to_end(&mut scramble, 1);
		assert_eq!(frames.len(), 8);
		assert_eq!(frames.last().map(String::as_str), Some("ZONA"));
		assert!(!scramble.is_running());
	}

	#[test]
	fn hover_during_run_is_ignored() {
		let mut scramble = TextScramble::new("EQUIPO");
		assert!(scramble.start());
		assert!(!scramble.start());
		scramble.cancel();
		assert!(scramble.start());
	}

	#[test]
	fn empty_label_finishes_at_once() {
		let mut scramble = TextScramble::new("");
		let frames = run_to_end(&mut scramble, 0);
		assert_eq!(frames, vec![String::new()]);
	}
}
