//! Ambient particle field.
//!
//! Renders a full-viewport canvas of glowing points drifting upward, with
//! faint lines joining neighbours:
//! - Area-scaled particle count, capped for large screens
//! - Sinusoidal shimmer and sway driven by a per-particle phase
//! - Seedable random source for reproducible fields
//! - Frame loop that pauses while the page is hidden and stops on cleanup
//!
//! # Example
//!
//! ```ignore
//! use combat_zone_fx::components::particle_field::{FieldConfig, ParticleFieldCanvas};
//!
//! view! { <ParticleFieldCanvas config=FieldConfig::default() /> }
//! ```

mod component;
mod config;
mod frame_loop;
mod particles;
pub mod render;
pub mod theme;

pub use component::ParticleFieldCanvas;
pub use config::FieldConfig;
pub use frame_loop::{StopHandle, run_frame_loop};
pub use particles::{Link, Particle, ParticleField, link_alpha, particle_count};
pub use theme::{Color, FieldStyle, Tint};
