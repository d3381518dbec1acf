//! combat-zone-fx: visual effects for the Paintball House Barranquilla landing page.
//!
//! This crate provides a WASM-based page shell whose centrepiece is an ambient
//! particle field drawn on a full-viewport canvas, surrounded by a boot-style
//! loader, a typed tagline, count-up stats, scrambling section labels, a
//! trailing custom cursor, a section-aware navbar and the contact form.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::effects::{
	ContactForm, Counter, CursorFollower, Loader, MINI_COUNT_MS, Navbar, ScrambleLabel, TypingText,
};
pub use components::particle_field::{FieldConfig, ParticleField, ParticleFieldCanvas};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("PAINTBALL HOUSE BARRANQUILLA // Combat Zone v2.0 // Est. 2016");
}

/// Fresh seed for effects that don't need to be reproducible.
pub(crate) fn random_seed() -> u64 {
	let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
	let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
	(hi << 32) | lo
}

/// Load the particle field configuration from a script element with id="fx-config".
/// Expected format: JSON object with any subset of [`FieldConfig`]'s fields.
fn load_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("fx-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<FieldConfig>(&json_text) {
		Ok(config) => {
			info!(
				"combat-zone-fx: loaded config (max {} particles)",
				config.max_particles
			);
			Some(config)
		}
		Err(e) => {
			warn!("combat-zone-fx: failed to parse fx-config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Shows the loader, then reveals the hero over the particle field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();
	let (loaded, set_loaded) = signal(false);

	view! {
		<Html attr:lang="es" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Paintball House Barranquilla" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Loader set_loaded=set_loaded />
		<CursorFollower />
		<ParticleFieldCanvas config=config />
		<Navbar />

		<main class="page" class:loaded=move || loaded.get()>
			<section id="inicio" class="hero">
				<ScrambleLabel text="// ZONA DE COMBATE" />
				<h1>"PAINTBALL HOUSE"</h1>
				<p class="hero-tagline">
					<TypingText active=loaded />
				</p>
				<div class="hero-stats">
					<div class="stat">
						<Counter target=5000 active=loaded />
						<span class="stat-label">"Jugadores"</span>
					</div>
					<div class="stat">
						<Counter target=6 active=loaded />
						<span class="stat-label">"Campos"</span>
					</div>
					<div class="stat">
						<Counter target=9 active=loaded />
						<span class="stat-label">"Años"</span>
					</div>
				</div>
			</section>

			<section id="nosotros" class="about">
				<ScrambleLabel text="// NOSOTROS." />
				<div class="about-mini">
					<Counter target=120 active=loaded duration_ms=MINI_COUNT_MS />
					<span class="stat-label">"Torneos"</span>
				</div>
				<div class="about-mini">
					<Counter target=40 active=loaded duration_ms=MINI_COUNT_MS />
					<span class="stat-label">"Marcadoras"</span>
				</div>
			</section>

			<section id="contacto" class="contact">
				<ScrambleLabel text="// CONTACTO." />
				<h2>"ÚNETE A LA BATALLA"</h2>
				<ContactForm />
			</section>
		</main>
	}
}
