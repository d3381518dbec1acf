//! Page components: the particle field and the smaller landing-page effects.

pub mod effects;
pub mod particle_field;
