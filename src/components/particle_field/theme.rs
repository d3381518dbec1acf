//! Colors and visual style for the particle field.
//!
//! The palette is the site's "combat zone" neon: mostly cyan points with the
//! occasional deep blue one, all glowing cyan.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Color category a particle is assigned at reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
	Cyan,
	Blue,
}

/// Particle and connection styling.
#[derive(Clone, Debug)]
pub struct FieldStyle {
	/// Fill for cyan particles (alpha replaced by the particle's opacity)
	pub cyan: Color,
	/// Fill for blue particles (alpha replaced by the particle's opacity)
	pub blue: Color,
	/// Share of particles that come out cyan
	pub cyan_share: f64,
	/// Shadow color used for the soft glow around each particle
	pub glow_color: Color,
	/// Glow blur radius per unit of particle size
	pub glow_per_size: f64,
	/// Stroke color for connections
	pub link_color: Color,
	/// Stroke width for connections
	pub link_width: f64,
}

impl FieldStyle {
	/// Cyan/blue neon on a dark page (default)
	pub fn combat_zone() -> Self {
		Self {
			cyan: Color::rgb(0, 245, 255),
			blue: Color::rgb(0, 71, 255),
			cyan_share: 0.7,
			glow_color: Color::rgb(0, 245, 255),
			glow_per_size: 4.0,
			link_color: Color::rgb(0, 245, 255),
			link_width: 0.5,
		}
	}

	/// Base color for a tint, with the given opacity baked into its alpha.
	pub fn tint_color(&self, tint: Tint, opacity: f64) -> Color {
		match tint {
			Tint::Cyan => self.cyan.with_alpha(opacity),
			Tint::Blue => self.blue.with_alpha(opacity),
		}
	}
}

impl Default for FieldStyle {
	fn default() -> Self {
		Self::combat_zone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn opaque_colors_render_as_hex() {
		assert_eq!(Color::rgb(0, 245, 255).to_css(), "#00f5ff");
	}

	#[test]
	fn translucent_colors_render_as_rgba() {
		let c = FieldStyle::default().tint_color(Tint::Blue, 0.25);
		assert_eq!(c.to_css(), "rgba(0, 71, 255, 0.25)");
	}
}
