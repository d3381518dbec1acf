//! Count-up numbers with an ease-out-expo curve.

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;

/// Duration for the hero stats.
pub const HERO_COUNT_MS: f64 = 1800.0;
/// Duration for the smaller counters in the about section.
pub const MINI_COUNT_MS: f64 = 1600.0;

/// `1 - 2^(-10t)`, with `t` clamped to `[0, 1]`.
pub fn ease_out_expo(t: f64) -> f64 {
	1.0 - 2f64.powf(-10.0 * t.clamp(0.0, 1.0))
}

/// Displayed value `elapsed_ms` into a count towards `target`. Lands exactly on
/// `target` once the duration has passed.
pub fn counter_value(target: u32, elapsed_ms: f64, duration_ms: f64) -> u32 {
	if duration_ms <= 0.0 || elapsed_ms >= duration_ms {
		return target;
	}
	(ease_out_expo(elapsed_ms / duration_ms) * target as f64).round() as u32
}

fn animate(start: f64, target: u32, duration_ms: f64, set_value: WriteSignal<u32>) {
	request_animation_frame(move || {
		let elapsed = js_sys::Date::now() - start;
		set_value.set(counter_value(target, elapsed, duration_ms));
		if elapsed < duration_ms {
			animate(start, target, duration_ms, set_value);
		}
	});
}

/// Number that counts from 0 to `target` the first time `active` turns true.
#[component]
pub fn Counter(
	target: u32,
	#[prop(into)] active: Signal<bool>,
	#[prop(default = HERO_COUNT_MS)] duration_ms: f64,
) -> impl IntoView {
	let (value, set_value) = signal(0_u32);
	let started = Rc::new(Cell::new(false));

	Effect::new(move |_| {
		if active.get() && !started.replace(true) {
			animate(js_sys::Date::now(), target, duration_ms, set_value);
		}
	});

	view! { <span class="stat-num" data-count={target.to_string()}>{move || value.get()}</span> }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn curve_endpoints() {
		assert_eq!(ease_out_expo(0.0), 0.0);
		assert!((ease_out_expo(1.0) - 0.999_023_437_5).abs() < 1e-12);
		assert_eq!(ease_out_expo(-3.0), 0.0);
		assert_eq!(ease_out_expo(7.0), ease_out_expo(1.0));
	}

	#[test]
	fn front_loaded_progress() {
		// Half way through the duration the count is already ~97% done.
		assert_eq!(counter_value(1000, 900.0, 1800.0), 969);
	}

	#[test]
	fn never_overshoots_and_lands_on_target() {
		let mut last = 0;
		for ms in (0..=2000).step_by(16) {
			let v = counter_value(5000, ms as f64, HERO_COUNT_MS);
			assert!(v >= last && v <= 5000);
			last = v;
		}
		assert_eq!(last, 5000);
		assert_eq!(counter_value(5000, HERO_COUNT_MS, HERO_COUNT_MS), 5000);
	}

	#[test]
	fn zero_duration_completes_immediately() {
		assert_eq!(counter_value(12, 0.0, 0.0), 12);
	}
}
