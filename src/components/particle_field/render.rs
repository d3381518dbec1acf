//! Canvas rendering for the particle field.
//!
//! Drawing goes through [`DrawSurface`], a thin slice of the 2D canvas API,
//! so the render pass can be checked against a recording surface in tests.
//! Each frame:
//! 1. Clear the whole surface
//! 2. Glowing particles, each at its shimmer alpha
//! 3. Faint connections between nearby particles

use std::f64::consts::PI;

use rand::Rng;
use web_sys::CanvasRenderingContext2d;

use super::particles::ParticleField;

/// The drawing operations the particle field needs from a 2D surface.
pub trait DrawSurface {
	fn clear(&mut self, width: f64, height: f64);
	fn save(&mut self);
	fn restore(&mut self);
	fn set_global_alpha(&mut self, alpha: f64);
	fn set_glow(&mut self, color: &str, blur: f64);
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str);
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64);
}

impl DrawSurface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn save(&mut self) {
		CanvasRenderingContext2d::save(self);
	}

	fn restore(&mut self) {
		CanvasRenderingContext2d::restore(self);
	}

	fn set_global_alpha(&mut self, alpha: f64) {
		CanvasRenderingContext2d::set_global_alpha(self, alpha);
	}

	fn set_glow(&mut self, color: &str, blur: f64) {
		self.set_shadow_color(color);
		self.set_shadow_blur(blur);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
		self.set_fill_style_str(color);
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64) {
		self.set_stroke_style_str(color);
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}

/// Renders one frame of the field.
pub fn render<R: Rng, S: DrawSurface>(field: &ParticleField<R>, surface: &mut S) {
	surface.clear(field.width(), field.height());
	draw_particles(field, surface);
	draw_connections(field, surface);
}

fn draw_particles<R: Rng, S: DrawSurface>(field: &ParticleField<R>, surface: &mut S) {
	let style = field.style();
	let glow = style.glow_color.to_css();

	for p in &field.particles {
		surface.save();
		surface.set_global_alpha(p.shimmer_alpha());
		surface.set_glow(&glow, p.size * style.glow_per_size);
		surface.fill_circle(p.x, p.y, p.size, &p.color.to_css());
		surface.restore();
	}
}

fn draw_connections<R: Rng, S: DrawSurface>(field: &ParticleField<R>, surface: &mut S) {
	let style = field.style();
	let color = style.link_color.to_css();

	for link in field.connections() {
		let (a, b) = (&field.particles[link.a], &field.particles[link.b]);
		surface.save();
		surface.set_global_alpha(link.alpha);
		surface.stroke_line((a.x, a.y), (b.x, b.y), &color, style.link_width);
		surface.restore();
	}
}
