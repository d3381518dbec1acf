//! Leptos component wrapping the particle field canvas.
//!
//! The component creates a full-viewport canvas, keeps it sized to the window,
//! and drives the field from a `requestAnimationFrame` loop. The canvas is
//! blanked while the page is hidden. The loop and its listeners are torn down
//! when the component is cleaned up.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use super::config::FieldConfig;
use super::frame_loop::{StopHandle, run_frame_loop};
use super::particles::ParticleField;
use super::render;
use super::theme::FieldStyle;

fn viewport_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(dim(window.inner_width()), dim(window.inner_height()))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn set_opacity(canvas: &HtmlCanvasElement, opacity: f64) {
	// Explicit path: the leptos prelude's `ElementExt::style` shadows the web-sys getter.
	let _ = web_sys::HtmlElement::style(canvas).set_property("opacity", &opacity.to_string());
}

fn sync_visibility(document: &Document, canvas: &HtmlCanvasElement, config: &FieldConfig) -> bool {
	let hidden = document.hidden();
	set_opacity(canvas, config.canvas_opacity(hidden));
	hidden
}

/// Renders the ambient particle field behind the page content.
///
/// The field is sized from the window at mount time; its particle count stays
/// fixed afterwards while the canvas follows window resizes.
#[component]
pub fn ParticleFieldCanvas(#[prop(default = FieldConfig::default())] config: FieldConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let stop = StopHandle::new();
	let stop_cleanup = stop.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(document) = window.document() else {
			return;
		};
		let Some(mut ctx) = context_2d(&canvas) else {
			debug!("particle field: no 2d context, skipping");
			return;
		};

		let (w, h) = viewport_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let config = config.clone();
		let seed = config.seed.unwrap_or_else(crate::random_seed);
		let field = Rc::new(RefCell::new(ParticleField::new(
			w,
			h,
			config.clone(),
			FieldStyle::default(),
			Pcg32::seed_from_u64(seed),
		)));
		info!(
			"particle field: {} particles on {}x{}",
			field.borrow().particles.len(),
			w,
			h
		);

		let hidden = Rc::new(Cell::new(sync_visibility(&document, &canvas, &config)));

		let (field_resize, canvas_resize) = (field.clone(), canvas.clone());
		let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = viewport_size(&win);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			field_resize.borrow_mut().resize(nw, nh);
		});
		let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());

		let (hidden_vis, canvas_vis, config_vis) = (hidden.clone(), canvas.clone(), config.clone());
		let on_visibility: Closure<dyn FnMut()> = Closure::new(move || {
			if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
				hidden_vis.set(sync_visibility(&doc, &canvas_vis, &config_vis));
			}
		});
		let _ = document.add_event_listener_with_callback(
			"visibilitychange",
			on_visibility.as_ref().unchecked_ref(),
		);

		let step = move || {
			if config.skips_frame(hidden.get()) {
				return;
			}
			let mut field = field.borrow_mut();
			field.update();
			render::render(&*field, &mut ctx);
		};

		let teardown = move || {
			let _ = window
				.remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
			let _ = document.remove_event_listener_with_callback(
				"visibilitychange",
				on_visibility.as_ref().unchecked_ref(),
			);
		};

		if run_frame_loop(stop.clone(), step, teardown).is_none() {
			debug!("particle field: no window for frame loop");
		}
	});

	on_cleanup(move || stop_cleanup.stop());

	view! {
		<canvas
			node_ref=canvas_ref
			id="particleCanvas"
			class="particle-canvas"
			style="position: fixed; inset: 0; pointer-events: none; z-index: 0;"
		/>
	}
}
