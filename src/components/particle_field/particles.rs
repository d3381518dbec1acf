//! Ambient particle simulation.
//!
//! Particles drift upward with a gentle sinusoidal sway and are recycled
//! below the bottom edge once they leave through the top. All randomness
//! comes from the generator the field is built with, so a seeded generator
//! reproduces a field exactly.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::FieldConfig;
use super::theme::{Color, FieldStyle, Tint};

/// Phase advance per frame (radians).
pub const PHASE_STEP: f64 = 0.02;
/// Horizontal sway amplitude per frame.
pub const SWAY: f64 = 0.2;
/// Distance past an edge at which particles leave and re-enter.
pub const EDGE_MARGIN: f64 = 20.0;

const SIZE_RANGE: (f64, f64) = (0.5, 3.0);
const RISE_RANGE: (f64, f64) = (0.2, 0.8);
const LATERAL_SPEED: f64 = 0.175;
const OPACITY_RANGE: (f64, f64) = (0.1, 0.6);

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	/// Always negative: particles only rise.
	pub vy: f64,
	pub size: f64,
	pub opacity: f64,
	pub phase: f64, // shimmer + sway
	pub tint: Tint,
	/// Tint color with `opacity` baked into the alpha channel.
	pub color: Color,
}

/// Uniform sample between `lo` (inclusive) and `hi` (exclusive). Never panics:
/// `lo == hi` yields `lo`, and `hi < lo` samples `(hi, lo]`, so callers clamp.
fn uniform<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
	lo + rng.random::<f64>() * (hi - lo)
}

impl Particle {
	/// Draws a fresh particle. The initial placement scatters it over the whole
	/// viewport, later ones start just below the bottom edge.
	pub fn spawn<R: Rng>(
		rng: &mut R,
		style: &FieldStyle,
		width: f64,
		height: f64,
		initial: bool,
	) -> Self {
		let x = uniform(rng, 0.0, width.max(0.0));
		let y = if initial {
			uniform(rng, 0.0, height.max(0.0))
		} else {
			height + EDGE_MARGIN
		};
		let size = uniform(rng, SIZE_RANGE.0, SIZE_RANGE.1);
		let vy = -uniform(rng, RISE_RANGE.0, RISE_RANGE.1);
		let vx = uniform(rng, -LATERAL_SPEED, LATERAL_SPEED);
		let opacity = uniform(rng, OPACITY_RANGE.0, OPACITY_RANGE.1);
		let phase = uniform(rng, 0.0, TAU);
		let tint = if rng.random::<f64>() < style.cyan_share {
			Tint::Cyan
		} else {
			Tint::Blue
		};

		Self {
			x,
			y,
			vx,
			vy,
			size,
			opacity,
			phase,
			tint,
			color: style.tint_color(tint, opacity),
		}
	}

	/// Alpha the particle is drawn with this frame: a slow pulse around its base opacity.
	pub fn shimmer_alpha(&self) -> f64 {
		self.opacity * (0.8 + 0.2 * self.phase.sin())
	}
}

/// Faint line between two nearby particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub a: usize,
	pub b: usize,
	pub alpha: f64,
}

/// Connection alpha for a pair, or `None` if they are too far apart.
/// Symmetric in its arguments.
pub fn link_alpha(a: &Particle, b: &Particle, config: &FieldConfig) -> Option<f64> {
	let (dx, dy) = (a.x - b.x, a.y - b.y);
	let dist = (dx * dx + dy * dy).sqrt();
	(dist < config.link_distance).then(|| (1.0 - dist / config.link_distance) * config.link_alpha)
}

/// Number of particles for a viewport: one per `area_per_particle`, capped at `max_particles`.
/// Degenerate viewports (hidden tab, zero size) get none.
pub fn particle_count(width: f64, height: f64, config: &FieldConfig) -> usize {
	if !(width > 0.0 && height > 0.0 && config.area_per_particle > 0.0) {
		return 0;
	}
	let by_area = (width * height / config.area_per_particle).floor();
	if !by_area.is_finite() {
		return config.max_particles;
	}
	(by_area as usize).min(config.max_particles)
}

/// Owns the live particles, the viewport bounds and the random source.
pub struct ParticleField<R> {
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
	config: FieldConfig,
	style: FieldStyle,
	rng: R,
}

impl<R: Rng> ParticleField<R> {
	pub fn new(width: f64, height: f64, config: FieldConfig, style: FieldStyle, mut rng: R) -> Self {
		let count = particle_count(width, height, &config);
		let particles = (0..count)
			.map(|_| Particle::spawn(&mut rng, &style, width, height, true))
			.collect();

		Self {
			particles,
			width,
			height,
			config,
			style,
			rng,
		}
	}

	/// Advance every particle by one frame, recycling those that left through the top.
	pub fn update(&mut self) {
		let Self {
			particles,
			width,
			height,
			style,
			rng,
			..
		} = self;

		for p in particles.iter_mut() {
			p.phase += PHASE_STEP;
			p.x += p.vx + p.phase.sin() * SWAY;
			p.y += p.vy;

			if p.y < -EDGE_MARGIN {
				*p = Particle::spawn(rng, style, *width, *height, false);
			}
		}
	}

	/// Update the viewport bounds. Particles keep their positions and count;
	/// any left outside a shrunk viewport drift out and get recycled.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// All pairs close enough to be connected, each unordered pair once.
	pub fn connections(&self) -> impl Iterator<Item = Link> + '_ {
		let ps = &self.particles;
		(0..ps.len()).flat_map(move |a| {
			((a + 1)..ps.len()).filter_map(move |b| {
				link_alpha(&ps[a], &ps[b], &self.config).map(|alpha| Link { a, b, alpha })
			})
		})
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn style(&self) -> &FieldStyle {
		&self.style
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rand::SeedableRng;
	use rand_pcg::Pcg32;

	fn field(width: f64, height: f64, seed: u64) -> ParticleField<Pcg32> {
		ParticleField::new(
			width,
			height,
			FieldConfig::default(),
			FieldStyle::default(),
			Pcg32::seed_from_u64(seed),
		)
	}

	fn at(x: f64, y: f64) -> Particle {
		let mut rng = Pcg32::seed_from_u64(0);
		Particle {
			x,
			y,
			..Particle::spawn(&mut rng, &FieldStyle::default(), 100.0, 100.0, true)
		}
	}

	#[test]
	fn count_scales_with_area_and_caps_at_max() {
		let config = FieldConfig::default();
		assert_eq!(particle_count(400.0, 350.0, &config), 10);
		assert_eq!(particle_count(1920.0, 1080.0, &config), 80);
		assert_eq!(particle_count(100.0, 100.0, &config), 0);
	}

	#[test]
	fn degenerate_viewport_yields_empty_field() {
		let config = FieldConfig::default();
		assert_eq!(particle_count(0.0, 1080.0, &config), 0);
		assert_eq!(particle_count(-5.0, -5.0, &config), 0);
		assert_eq!(particle_count(f64::NAN, 900.0, &config), 0);

		let mut empty = field(0.0, 0.0, 1);
		empty.update();
		assert!(empty.particles.is_empty());
		assert_eq!(empty.connections().count(), 0);
	}

	#[test]
	fn initial_particles_fill_the_viewport() {
		let f = field(1280.0, 800.0, 3);
		assert_eq!(f.particles.len(), 73);
		for p in &f.particles {
			assert!((0.0..1280.0).contains(&p.x));
			assert!((0.0..800.0).contains(&p.y));
			assert!((0.5..3.0).contains(&p.size));
			assert!((-0.8..=-0.2).contains(&p.vy));
			assert!((-0.175..0.175).contains(&p.vx));
			assert!((0.1..0.6).contains(&p.opacity));
			assert!((0.0..TAU).contains(&p.phase));
			assert_eq!(p.color.a, p.opacity);
		}
		// Scattered, not all parked below the bottom edge.
		assert!(f.particles.iter().any(|p| p.y < 400.0));
	}

	#[test]
	fn particle_leaving_top_respawns_below_bottom() {
		let mut f = field(1000.0, 700.0, 11);
		{
			let p = &mut f.particles[0];
			p.y = -25.0;
			p.size = 99.0;
			p.vy = -5.0;
			p.opacity = 0.99;
		}
		f.update();

		let p = &f.particles[0];
		assert_eq!(p.y, 700.0 + EDGE_MARGIN);
		assert!(p.y >= f.height());
		assert!((0.5..3.0).contains(&p.size));
		assert!((-0.8..=-0.2).contains(&p.vy));
		assert!((0.1..0.6).contains(&p.opacity));
		assert_eq!(p.color.a, p.opacity);
	}

	#[test]
	fn update_advances_phase_and_sways() {
		let mut f = field(1000.0, 700.0, 5);
		let before = f.particles[0].clone();
		f.update();
		let after = &f.particles[0];

		let phase = before.phase + PHASE_STEP;
		assert!((after.phase - phase).abs() < 1e-12);
		assert!((after.x - (before.x + before.vx + phase.sin() * SWAY)).abs() < 1e-12);
		assert!((after.y - (before.y + before.vy)).abs() < 1e-12);
	}

	#[test]
	fn shimmer_stays_within_base_opacity_band() {
		let mut p = at(0.0, 0.0);
		p.opacity = 0.5;
		for step in 0..700 {
			p.phase = step as f64 * 0.01;
			let alpha = p.shimmer_alpha();
			assert!(alpha >= 0.6 * p.opacity - 1e-12);
			assert!(alpha <= p.opacity + 1e-12);
			assert!((0.0..=1.0).contains(&alpha));
		}
	}

	#[test]
	fn links_fade_with_distance_and_are_symmetric() {
		let config = FieldConfig::default();
		let (a, b) = (at(0.0, 0.0), at(60.0, 0.0));
		let ab = link_alpha(&a, &b, &config).unwrap();
		assert!((ab - 0.04).abs() < 1e-12);
		assert_eq!(link_alpha(&b, &a, &config), Some(ab));

		assert!(link_alpha(&a, &at(120.0, 0.0), &config).is_none());
		assert!(link_alpha(&a, &at(119.9, 0.0), &config).is_some());
	}

	#[test]
	fn connections_visit_each_close_pair_once() {
		let mut f = field(1000.0, 700.0, 2);
		f.particles = vec![at(0.0, 0.0), at(50.0, 0.0), at(500.0, 500.0), at(0.0, 100.0)];
		let links: Vec<_> = f.connections().collect();
		let pairs: Vec<_> = links.iter().map(|l| (l.a, l.b)).collect();
		assert_eq!(pairs, vec![(0, 1), (0, 3), (1, 3)]);
	}

	#[test]
	fn cyan_share_converges_to_seventy_percent() {
		let style = FieldStyle::default();
		let mut rng = Pcg32::seed_from_u64(2016);
		let n = 20_000;
		let cyan = (0..n)
			.filter(|_| Particle::spawn(&mut rng, &style, 800.0, 600.0, false).tint == Tint::Cyan)
			.count();
		let share = cyan as f64 / n as f64;
		assert!((share - 0.7).abs() < 0.02, "cyan share {share}");
	}

	#[test]
	fn same_seed_reproduces_trajectories() {
		let (mut a, mut b) = (field(1440.0, 900.0, 42), field(1440.0, 900.0, 42));
		for _ in 0..2_000 {
			a.update();
			b.update();
		}
		assert_eq!(a.particles, b.particles);
	}

	#[test]
	fn resize_only_touches_bounds() {
		let mut f = field(1440.0, 900.0, 9);
		let before = f.particles.clone();
		f.resize(800.0, 600.0);
		f.resize(800.0, 600.0);
		assert_eq!(f.particles, before);
		assert_eq!((f.width(), f.height()), (800.0, 600.0));

		// Recycled particles use the new bounds.
		f.particles[0].y = -30.0;
		f.update();
		assert_eq!(f.particles[0].y, 600.0 + EDGE_MARGIN);
		assert!(f.particles[0].x < 800.0);
	}

	#[test]
	fn collapsed_viewport_keeps_positions_finite() {
		let mut f = field(1024.0, 768.0, 21);
		f.resize(0.0, 0.0);
		for _ in 0..5_000 {
			f.update();
		}
		assert_eq!(f.particles.len(), 56);
		for p in &f.particles {
			assert!(p.x.is_finite() && p.y.is_finite());
			assert!(p.y <= EDGE_MARGIN);
		}
	}

	#[test]
	fn uniform_handles_empty_and_reversed_ranges() {
		let mut rng = Pcg32::seed_from_u64(4);
		assert_eq!(uniform(&mut rng, 3.0, 3.0), 3.0);
		for _ in 0..1_000 {
			let v = uniform(&mut rng, 5.0, 1.0);
			assert!(v > 1.0 && v <= 5.0);
		}
	}

	proptest! {
		#[test]
		fn count_is_bounded(w in 0u32..5000, h in 0u32..5000) {
			let config = FieldConfig::default();
			let n = particle_count(w as f64, h as f64, &config);
			let by_area = (w as u64 * h as u64 / 14000) as usize;
			prop_assert!(n <= 80);
			if by_area <= 80 {
				prop_assert_eq!(n, by_area);
			}
		}

		#[test]
		fn particles_only_rise_between_resets(seed in any::<u64>(), frames in 1usize..300) {
			let mut f = field(1024.0, 768.0, seed);
			for _ in 0..frames {
				let before: Vec<_> = f.particles.iter().map(|p| (p.y, p.vy)).collect();
				f.update();
				for (p, (y, vy)) in f.particles.iter().zip(before) {
					if y + vy < -EDGE_MARGIN {
						prop_assert_eq!(p.y, 768.0 + EDGE_MARGIN);
					} else {
						prop_assert!(p.y < y);
					}
				}
			}
		}

		#[test]
		fn connection_alpha_is_order_independent(
			ax in -200.0f64..200.0, ay in -200.0f64..200.0,
			bx in -200.0f64..200.0, by in -200.0f64..200.0,
		) {
			let config = FieldConfig::default();
			let (a, b) = (at(ax, ay), at(bx, by));
			let ab = link_alpha(&a, &b, &config);
			prop_assert_eq!(ab, link_alpha(&b, &a, &config));
			if let Some(alpha) = ab {
				prop_assert!(alpha > 0.0 && alpha <= config.link_alpha);
			}
		}
	}
}
