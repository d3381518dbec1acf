//! Tunable parameters for the particle field.
//!
//! Loaded from the page as JSON; every field is optional and falls back to
//! the values the site ships with.

use serde::Deserialize;

/// Particle field configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Hard cap on particle count, regardless of viewport size.
	pub max_particles: usize,
	/// Viewport area (px²) that earns one particle.
	pub area_per_particle: f64,
	/// Particles closer than this are joined by a line.
	pub link_distance: f64,
	/// Line alpha for two coincident particles; fades linearly to 0 at `link_distance`.
	pub link_alpha: f64,
	/// CSS opacity of the canvas while the page is visible.
	pub visible_opacity: f64,
	/// Skip update and render while the page is hidden.
	pub pause_when_hidden: bool,
	/// Fixed seed for a reproducible field. A random seed is drawn when absent.
	pub seed: Option<u64>,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			max_particles: 80,
			area_per_particle: 14000.0,
			link_distance: 120.0,
			link_alpha: 0.08,
			visible_opacity: 0.45,
			pause_when_hidden: true,
			seed: None,
		}
	}
}

impl FieldConfig {
	/// CSS opacity for the canvas given the page visibility.
	pub fn canvas_opacity(&self, hidden: bool) -> f64 {
		if hidden {
			0.0
		} else {
			self.visible_opacity
		}
	}

	/// Whether a frame should be skipped entirely.
	pub fn skips_frame(&self, hidden: bool) -> bool {
		hidden && self.pause_when_hidden
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_json_yields_defaults() {
		let config: FieldConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config, FieldConfig::default());
	}

	#[test]
	fn partial_json_overrides_only_named_fields() {
		let config: FieldConfig =
			serde_json::from_str(r#"{ "max_particles": 40, "seed": 7 }"#).unwrap();
		assert_eq!(config.max_particles, 40);
		assert_eq!(config.seed, Some(7));
		assert_eq!(config.link_distance, 120.0);
		assert!(config.pause_when_hidden);
	}

	#[test]
	fn hidden_page_blanks_canvas_and_pauses() {
		let config = FieldConfig::default();
		assert_eq!(config.canvas_opacity(false), 0.45);
		assert_eq!(config.canvas_opacity(true), 0.0);
		assert!(config.skips_frame(true));
		assert!(!config.skips_frame(false));
	}

	#[test]
	fn pause_can_be_disabled() {
		let config = FieldConfig {
			pause_when_hidden: false,
			..FieldConfig::default()
		};
		assert!(!config.skips_frame(true));
		assert_eq!(config.canvas_opacity(true), 0.0);
	}
}
