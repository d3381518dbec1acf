//! Listener and timer handles that can be released from a [`StopHandle`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget};

use crate::components::particle_field::StopHandle;

/// A listener added with a raw closure. The closure lives until `detach`.
pub(crate) struct DomListener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl DomListener {
	pub(crate) fn attach(
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Option<Self> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		target
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.ok()?;
		Some(Self {
			target: target.clone(),
			event,
			callback,
		})
	}

	pub(crate) fn detach(self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// Detaches every listener when `stop` fires.
pub(crate) fn detach_on(stop: &StopHandle, listeners: Vec<DomListener>) {
	stop.on_stop(move || {
		for listener in listeners {
			listener.detach();
		}
	});
}

/// At most one pending `setTimeout`; restarting drops the previous one.
#[derive(Clone, Default)]
pub(crate) struct PendingTimeout(Rc<Cell<Option<TimeoutHandle>>>);

impl PendingTimeout {
	pub(crate) fn restart(&self, f: impl FnOnce() + 'static, delay: Duration) {
		self.clear();
		let slot = self.0.clone();
		let handle = set_timeout_with_handle(
			move || {
				slot.set(None);
				f();
			},
			delay,
		);
		self.0.set(handle.ok());
	}

	pub(crate) fn clear(&self) {
		if let Some(handle) = self.0.take() {
			handle.clear();
		}
	}

	pub(crate) fn clear_on(&self, stop: &StopHandle) {
		let pending = self.clone();
		stop.on_stop(move || pending.clear());
	}
}

/// Element the event fired on, if it is one.
pub(crate) fn event_element(event: &Event) -> Option<Element> {
	event.target()?.dyn_into::<Element>().ok()
}

/// Nearest ancestor-or-self of the event target matching `selector`.
pub(crate) fn closest(event: &Event, selector: &str) -> Option<Element> {
	event_element(event)?.closest(selector).ok().flatten()
}
