//! Boot-style loading overlay.
//!
//! Progress advances in random jumps while status lines cycle through a
//! "tactical" boot sequence. Once full, the overlay lingers briefly and then
//! marks the page as loaded, which starts the hero effects.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Status lines, shown in order as progress crosses each fifth.
pub const LOADER_MESSAGES: [&str; 5] = [
	"INICIANDO SISTEMA...",
	"CARGANDO CAMPOS DE BATALLA...",
	"CALIBRANDO MARCADORAS...",
	"ACTIVANDO ESCUADRÓN...",
	"LISTO PARA EL COMBATE.",
];

pub const LOADER_TICK: Duration = Duration::from_millis(80);
/// Delay between reaching 100% and hiding the overlay.
pub const LOADER_EXIT_DELAY: Duration = Duration::from_millis(500);

const JUMP_MIN: f64 = 8.0;
const JUMP_SPAN: f64 = 18.0;

/// Snapshot after one loader tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoaderStep {
	/// Percent, 0..=100.
	pub progress: f64,
	pub message: &'static str,
	pub done: bool,
}

#[derive(Clone, Debug, Default)]
pub struct LoaderSequence {
	progress: f64,
	message_index: usize,
}

impl LoaderSequence {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn step<R: Rng>(&mut self, rng: &mut R) -> LoaderStep {
		let count = LOADER_MESSAGES.len();
		self.progress = (self.progress + JUMP_MIN + rng.random::<f64>() * JUMP_SPAN).min(100.0);

		let message_step = (self.progress / 100.0 * count as f64).floor() as usize;
		if message_step < count && message_step != self.message_index {
			self.message_index = message_step;
		}

		let done = self.progress >= 100.0;
		if done {
			self.message_index = count - 1;
		}

		LoaderStep {
			progress: self.progress,
			message: LOADER_MESSAGES[self.message_index],
			done,
		}
	}
}

/// Full-screen loader; flips `set_loaded` once the sequence has finished.
#[component]
pub fn Loader(set_loaded: WriteSignal<bool>) -> impl IntoView {
	let (progress, set_progress) = signal(0.0_f64);
	let (status, set_status) = signal(LOADER_MESSAGES[0]);
	let (hidden, set_hidden) = signal(false);

	let sequence = Rc::new(RefCell::new(LoaderSequence::new()));
	let rng = Rc::new(RefCell::new(Pcg32::seed_from_u64(crate::random_seed())));
	let interval: Rc<Cell<Option<IntervalHandle>>> = Rc::default();
	let interval_inner = interval.clone();

	let tick = move || {
		let step = sequence.borrow_mut().step(&mut *rng.borrow_mut());
		set_progress.set(step.progress);
		set_status.set(step.message);

		if step.done {
			if let Some(handle) = interval_inner.take() {
				handle.clear();
			}
			set_timeout(
				move || {
					set_hidden.set(true);
					set_loaded.set(true);
					info!("loader: page ready");
				},
				LOADER_EXIT_DELAY,
			);
		}
	};

	match set_interval_with_handle(tick, LOADER_TICK) {
		Ok(handle) => interval.set(Some(handle)),
		Err(e) => {
			warn!("loader: could not start timer: {:?}", e);
			set_hidden.set(true);
			set_loaded.set(true);
		}
	}

	view! {
		<div id="loader" class="loader" class:hidden=move || hidden.get()>
			<div class="loader-track">
				<div
					id="loaderBar"
					class="loader-bar"
					style:width=move || format!("{}%", progress.get())
				/>
			</div>
			<p id="loaderStatus" class="loader-status">{move || status.get()}</p>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn progress_is_monotonic_and_capped() {
		let mut rng = Pcg32::seed_from_u64(80);
		let mut seq = LoaderSequence::new();
		let mut last = 0.0;
		for _ in 0..40 {
			let step = seq.step(&mut rng);
			assert!(step.progress >= last);
			assert!(step.progress <= 100.0);
			last = step.progress;
		}
		assert_eq!(last, 100.0);
	}

	#[test]
	fn finishes_within_worst_case_steps() {
		for seed in 0..64 {
			let mut rng = Pcg32::seed_from_u64(seed);
			let mut seq = LoaderSequence::new();
			let steps = (1..=13)
				.find(|_| seq.step(&mut rng).done)
				.expect("loader never finished");
			assert!(steps >= 4, "seed {seed} finished in {steps} steps");
		}
	}

	#[test]
	fn messages_follow_progress_and_end_ready() {
		let mut rng = Pcg32::seed_from_u64(3);
		let mut seq = LoaderSequence::new();
		let mut seen = Vec::new();
		loop {
			let step = seq.step(&mut rng);
			let expected = ((step.progress / 100.0 * 5.0).floor() as usize).min(4);
			assert_eq!(step.message, LOADER_MESSAGES[expected]);
			seen.push(step.message);
			if step.done {
				break;
			}
		}
		assert_eq!(seen.last(), Some(&"LISTO PARA EL COMBATE."));
	}
}
