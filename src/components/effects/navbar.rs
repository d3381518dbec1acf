//! Fixed navbar: scrolled state, active-section link, mobile menu, smooth
//! anchor scrolling and the page keyboard shortcuts.

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, KeyboardEvent, ScrollBehavior, ScrollToOptions, Window};

use super::dom::{DomListener, closest, detach_on};
use crate::components::particle_field::StopHandle;

/// Scroll offset past which the bar turns solid.
pub const SCROLLED_AFTER: f64 = 60.0;
/// A section counts as current this far before its top reaches the viewport.
pub const SECTION_LEAD: f64 = 120.0;
/// Anchor scroll offset used when the bar has no measurable height.
pub const DEFAULT_NAV_HEIGHT: f64 = 80.0;

pub const NAV_LINKS: [(&str, &str); 3] = [
	("inicio", "Inicio"),
	("nosotros", "Nosotros"),
	("contacto", "Contacto"),
];

pub fn is_scrolled(scroll_y: f64) -> bool {
	scroll_y > SCROLLED_AFTER
}

/// Id of the current section: the last one, in document order, whose top
/// minus [`SECTION_LEAD`] has been scrolled past.
pub fn active_section<'a>(scroll_y: f64, sections: &'a [(String, f64)]) -> Option<&'a str> {
	sections
		.iter()
		.rev()
		.find(|(_, top)| scroll_y >= top - SECTION_LEAD)
		.map(|(id, _)| id.as_str())
}

/// Page offset to scroll to so the target lands just below the bar.
pub fn scroll_target(rect_top: f64, scroll_y: f64, nav_height: f64) -> f64 {
	let nav = if nav_height > 0.0 { nav_height } else { DEFAULT_NAV_HEIGHT };
	rect_top + scroll_y - nav
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
	BackToTop,
	CloseMenu,
}

/// Alt+T scrolls back to the top; Escape closes the mobile menu.
pub fn shortcut(key: &str, alt: bool) -> Option<Shortcut> {
	match key {
		"t" if alt => Some(Shortcut::BackToTop),
		"Escape" => Some(Shortcut::CloseMenu),
		_ => None,
	}
}

fn smooth_scroll(window: &Window, top: f64) {
	let options = ScrollToOptions::new();
	options.set_top(top);
	options.set_behavior(ScrollBehavior::Smooth);
	window.scroll_to_with_scroll_to_options(&options);
}

fn section_offsets(document: &Document) -> Vec<(String, f64)> {
	let Ok(nodes) = document.query_selector_all("section[id]") else {
		return Vec::new();
	};
	(0..nodes.length())
		.filter_map(|i| nodes.item(i)?.dyn_into::<HtmlElement>().ok())
		.map(|section| (section.id(), section.offset_top() as f64))
		.collect()
}

/// Navbar that tracks scroll position and the section in view.
#[component]
pub fn Navbar() -> impl IntoView {
	let (scrolled, set_scrolled) = signal(false);
	let (active, set_active) = signal(None::<String>);
	let (menu_open, set_menu_open) = signal(false);
	let stop = StopHandle::new();
	let stop_cleanup = stop.clone();

	let sync_scroll = move || {
		let Some(window) = web_sys::window() else {
			return;
		};
		let scroll_y = window.scroll_y().unwrap_or(0.0);
		set_scrolled.set(is_scrolled(scroll_y));
		if let Some(document) = window.document() {
			let sections = section_offsets(&document);
			set_active.set(active_section(scroll_y, &sections).map(str::to_owned));
		}
	};

	Effect::new(move |_| {
		let Some(window) = web_sys::window() else {
			return;
		};
		sync_scroll();

		let listeners = [
			DomListener::attach(&window, "scroll", move |_| sync_scroll()),
			DomListener::attach(&window, "keydown", move |ev| {
				let Some(ev) = ev.dyn_ref::<KeyboardEvent>() else {
					return;
				};
				match shortcut(&ev.key(), ev.alt_key()) {
					Some(Shortcut::BackToTop) => {
						if let Some(win) = web_sys::window() {
							smooth_scroll(&win, 0.0);
						}
					}
					Some(Shortcut::CloseMenu) => set_menu_open.set(false),
					None => {}
				}
			}),
			DomListener::attach(&window, "click", move |ev| {
				let Some(anchor) = closest(&ev, "a[href^=\"#\"]") else {
					return;
				};
				if anchor.closest("#navLinks").ok().flatten().is_some() {
					set_menu_open.set(false);
				}
				let (Some(win), Some(href)) = (web_sys::window(), anchor.get_attribute("href")) else {
					return;
				};
				let Some(doc) = win.document() else {
					return;
				};
				// A bare "#" is not a valid selector; leave it to the browser.
				let Some(target) = doc.query_selector(&href).ok().flatten() else {
					return;
				};
				ev.prevent_default();

				let nav_height = doc
					.get_element_by_id("navbar")
					.and_then(|nav| nav.dyn_into::<HtmlElement>().ok())
					.map_or(0.0, |nav| nav.offset_height() as f64);
				let top = scroll_target(
					target.get_bounding_client_rect().top(),
					win.scroll_y().unwrap_or(0.0),
					nav_height,
				);
				debug!("navbar: scrolling to {href} at {top}");
				smooth_scroll(&win, top);
			}),
		];
		detach_on(&stop, listeners.into_iter().flatten().collect());
	});

	on_cleanup(move || stop_cleanup.stop());

	let links = NAV_LINKS
		.iter()
		.map(|&(id, label)| {
			view! {
				<li>
					<a
						href=format!("#{id}")
						class="nav-link"
						class:active=move || active.with(|a| a.as_deref() == Some(id))
					>
						{label}
					</a>
				</li>
			}
		})
		.collect_view();

	view! {
		<nav id="navbar" class="navbar" class:scrolled=move || scrolled.get()>
			<a href="#inicio" class="nav-logo">"PAINTBALL HOUSE"</a>
			<button
				id="hamburger"
				class="hamburger"
				class:open=move || menu_open.get()
				aria-label="Menú"
				on:click=move |_| set_menu_open.update(|open| *open = !*open)
			>
				<span />
				<span />
				<span />
			</button>
			<ul id="navLinks" class="nav-links" class:open=move || menu_open.get()>
				{links}
			</ul>
		</nav>
	}
}
