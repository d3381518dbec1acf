//! Landing-page effects: loader, typed tagline, counters, scrambling section
//! labels, the custom cursor, the navbar and the contact form.

mod contact;
mod counter;
mod cursor;
mod dom;
mod loader;
mod navbar;
mod scramble;
mod typing;

pub use contact::{ContactDraft, ContactForm, ContactFormState, Field, SubmitOutcome};
pub use counter::{Counter, HERO_COUNT_MS, MINI_COUNT_MS, counter_value, ease_out_expo};
pub use cursor::{CursorFollower, CursorLook, CursorState, RingFollower};
pub use loader::{LOADER_MESSAGES, Loader, LoaderSequence, LoaderStep};
pub use navbar::{Navbar, Shortcut, active_section, is_scrolled, scroll_target, shortcut};
pub use scramble::{ScrambleLabel, TextScramble};
pub use typing::{TAGLINES, Typewriter, TypingText};
