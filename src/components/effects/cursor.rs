//! Custom cursor: a dot pinned to the pointer and a ring that trails it.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

use super::dom::{DomListener, PendingTimeout, closest, detach_on};
use crate::components::particle_field::{StopHandle, run_frame_loop};

/// Share of the remaining distance the ring covers each frame.
pub const RING_LERP: f64 = 0.12;
pub const BURST_SCALE: f64 = 2.5;
pub const BURST_OPACITY: f64 = 0.4;
pub const BURST_DURATION: Duration = Duration::from_millis(200);
/// Elements that enlarge the ring while hovered.
pub const INTERACTIVE_SELECTOR: &str =
	"a, button, .service-card, .team-card, .gallery-item, .price-card";

const RING_SIZE: f64 = 34.0;
const RING_SIZE_HOVER: f64 = 50.0;
const RING_BORDER: &str = "rgba(0,245,255,0.55)";
const RING_BORDER_HOVER: &str = "rgba(0,245,255,0.8)";
const DOT_SCALE_HOVER: f64 = 0.4;

/// Ring position easing towards the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RingFollower {
	pub x: f64,
	pub y: f64,
}

impl RingFollower {
	pub fn step(&mut self, target_x: f64, target_y: f64) -> (f64, f64) {
		self.x += (target_x - self.x) * RING_LERP;
		self.y += (target_y - self.y) * RING_LERP;
		(self.x, self.y)
	}
}

/// Pointer state that decides how the dot and ring are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorState {
	/// Pointer is inside the window
	pub visible: bool,
	/// Pointer is over an interactive element
	pub hovering: bool,
	/// A click burst is playing
	pub bursting: bool,
}

impl Default for CursorState {
	fn default() -> Self {
		Self {
			visible: true,
			hovering: false,
			bursting: false,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorLook {
	pub dot_scale: f64,
	pub dot_opacity: f64,
	pub ring_size: f64,
	pub ring_border: &'static str,
	pub ring_opacity: f64,
}

impl CursorState {
	/// A burst wins over hover for the dot; leaving the window hides both parts.
	pub fn look(self) -> CursorLook {
		let (dot_scale, dot_opacity) = match (self.bursting, self.hovering) {
			(true, _) => (BURST_SCALE, BURST_OPACITY),
			(false, true) => (DOT_SCALE_HOVER, 1.0),
			(false, false) => (1.0, 1.0),
		};
		let (ring_size, ring_border) = if self.hovering {
			(RING_SIZE_HOVER, RING_BORDER_HOVER)
		} else {
			(RING_SIZE, RING_BORDER)
		};
		let shown = if self.visible { 1.0 } else { 0.0 };
		CursorLook {
			dot_scale,
			dot_opacity: dot_opacity * shown,
			ring_size,
			ring_border,
			ring_opacity: shown,
		}
	}
}

fn dot_transform(scale: f64) -> String {
	format!("translate(-50%, -50%) scale({scale})")
}

fn px(v: f64) -> String {
	format!("{v}px")
}

/// Dot and trailing ring that replace the system pointer.
#[component]
pub fn CursorFollower() -> impl IntoView {
	let (dot, set_dot) = signal((0.0_f64, 0.0_f64));
	let (ring, set_ring) = signal((0.0_f64, 0.0_f64));
	let state = RwSignal::new(CursorState::default());
	let look = Memo::new(move |_| state.get().look());
	let stop = StopHandle::new();
	let stop_cleanup = stop.clone();

	Effect::new(move |_| {
		let Some(window) = web_sys::window() else {
			return;
		};
		let pointer = Rc::new(Cell::new((0.0, 0.0)));
		let burst = PendingTimeout::default();
		burst.clear_on(&stop);

		let pointer_move = pointer.clone();
		let listeners = [
			DomListener::attach(&window, "mousemove", move |ev| {
				if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
					let at = (ev.client_x() as f64, ev.client_y() as f64);
					pointer_move.set(at);
					set_dot.set(at);
				}
			}),
			DomListener::attach(&window, "mouseover", move |ev| {
				let hovering = closest(&ev, INTERACTIVE_SELECTOR).is_some();
				state.update(|s| {
					s.visible = true;
					s.hovering = hovering;
				});
			}),
			DomListener::attach(&window, "mouseout", move |ev| {
				let left_window = ev
					.dyn_ref::<MouseEvent>()
					.is_some_and(|ev| ev.related_target().is_none());
				if left_window {
					state.update(|s| s.visible = false);
				}
			}),
			DomListener::attach(&window, "click", move |_| {
				state.update(|s| s.bursting = true);
				burst.restart(move || state.update(|s| s.bursting = false), BURST_DURATION);
			}),
		];
		detach_on(&stop, listeners.into_iter().flatten().collect());

		let mut follower = RingFollower::default();
		let step = move || {
			let (x, y) = pointer.get();
			set_ring.set(follower.step(x, y));
		};
		if run_frame_loop(stop.clone(), step, || {}).is_none() {
			debug!("cursor: no window for frame loop");
		}
	});

	on_cleanup(move || stop_cleanup.stop());

	view! {
		<div
			id="cursorDot"
			class="cursor-dot"
			style:left=move || px(dot.get().0)
			style:top=move || px(dot.get().1)
			style:opacity=move || look.get().dot_opacity.to_string()
			style:transform=move || dot_transform(look.get().dot_scale)
		/>
		<div
			id="cursorRing"
			class="cursor-ring"
			style:left=move || px(ring.get().0)
			style:top=move || px(ring.get().1)
			style:width=move || px(look.get().ring_size)
			style:height=move || px(look.get().ring_size)
			style:border-color=move || look.get().ring_border
			style:opacity=move || look.get().ring_opacity.to_string()
		/>
	}
}
