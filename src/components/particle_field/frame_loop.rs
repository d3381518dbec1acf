//! `requestAnimationFrame` loop with an explicit stop signal.
//!
//! The frame closure keeps itself alive through a shared slot so it can
//! reschedule every frame. Each running loop registers its cancel and
//! teardown actions with its [`StopHandle`]; stopping the handle on the
//! thread that started the loop cancels the pending frame and tears down at
//! once, without waiting for another frame (hidden tabs never deliver one).
//! A stop from any other thread is picked up by the next frame instead.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use log::debug;
use wasm_bindgen::prelude::*;

static NEXT_LOOP_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
	/// Pending stop actions per handle id, in registration order.
	static ON_STOP: RefCell<HashMap<u64, Vec<Box<dyn FnOnce()>>>> = RefCell::new(HashMap::new());
}

/// Runs the actions registered for `id` once; later calls are no-ops.
fn finish(id: u64) {
	let actions = ON_STOP.with(|pending| pending.borrow_mut().remove(&id));
	if let Some(actions) = actions {
		for action in actions {
			action();
		}
		debug!("stop handle {id} released");
	}
}

/// Cancellation token for a running frame loop, or for any timers and
/// listeners registered with [`StopHandle::on_stop`].
///
/// Cheap to clone and `Send + Sync`, so it can be handed to reactive cleanup
/// hooks that outlive the component scope.
#[derive(Clone, Debug)]
pub struct StopHandle {
	flag: Arc<AtomicBool>,
	id: u64,
}

impl Default for StopHandle {
	fn default() -> Self {
		Self {
			flag: Arc::default(),
			id: NEXT_LOOP_ID.fetch_add(1, Ordering::Relaxed),
		}
	}
}

impl StopHandle {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn stop(&self) {
		self.flag.store(true, Ordering::Relaxed);
		finish(self.id);
	}

	pub fn is_stopped(&self) -> bool {
		self.flag.load(Ordering::Relaxed)
	}

	/// Registers an action for `stop` to run on this thread, such as
	/// clearing a timer. Runs it immediately if the handle is already stopped.
	pub fn on_stop(&self, action: impl FnOnce() + 'static) {
		ON_STOP.with(|pending| {
			pending
				.borrow_mut()
				.entry(self.id)
				.or_default()
				.push(Box::new(action))
		});
		if self.is_stopped() {
			finish(self.id);
		}
	}
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Runs `step` once per display frame until `stop` fires, then calls `teardown` once.
///
/// Returns `None` without scheduling anything when there is no window.
pub fn run_frame_loop(
	stop: StopHandle,
	mut step: impl FnMut() + 'static,
	teardown: impl FnOnce() + 'static,
) -> Option<()> {
	let window = web_sys::window()?;
	let slot: FrameSlot = Rc::new(RefCell::new(None));
	let pending: Rc<Cell<Option<i32>>> = Rc::default();
	let (slot_inner, pending_inner, stop_inner) = (slot.clone(), pending.clone(), stop.clone());

	*slot.borrow_mut() = Some(Closure::new(move || {
		pending_inner.set(None);
		if stop_inner.is_stopped() {
			// Stopped off-thread; wasm-bindgen defers freeing this closure until it returns.
			finish(stop_inner.id);
			return;
		}

		step();

		if let (Some(win), Some(cb)) = (web_sys::window(), slot_inner.borrow().as_ref()) {
			if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
				pending_inner.set(Some(id));
			}
		}
	}));

	if let Some(ref cb) = *slot.borrow() {
		if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			pending.set(Some(id));
		}
	}

	let cancel = move || {
		if let (Some(id), Some(win)) = (pending.take(), web_sys::window()) {
			let _ = win.cancel_animation_frame(id);
		}
		// Breaks the closure's self-reference.
		slot.borrow_mut().take();
	};
	stop.on_stop(cancel);
	stop.on_stop(teardown);
	Some(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn counting_actions(handle: &StopHandle) -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
		let (cancels, teardowns) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
		let (c, t) = (cancels.clone(), teardowns.clone());
		handle.on_stop(move || c.set(c.get() + 1));
		handle.on_stop(move || t.set(t.get() + 1));
		(cancels, teardowns)
	}

	#[test]
	fn stop_is_shared_across_clones() {
		let handle = StopHandle::new();
		let cleanup = handle.clone();
		assert!(!handle.is_stopped());

		cleanup.stop();
		assert!(handle.is_stopped());
		assert!(cleanup.is_stopped());
	}

	#[test]
	fn stop_handle_crosses_threads() {
		let handle = StopHandle::new();
		let remote = handle.clone();
		std::thread::spawn(move || remote.stop()).join().unwrap();
		assert!(handle.is_stopped());
	}

	#[test]
	fn stop_cancels_and_tears_down_immediately_once() {
		let handle = StopHandle::new();
		let (cancels, teardowns) = counting_actions(&handle);
		assert_eq!((cancels.get(), teardowns.get()), (0, 0));

		handle.clone().stop();
		assert_eq!((cancels.get(), teardowns.get()), (1, 1));

		handle.stop();
		finish(handle.id);
		assert_eq!((cancels.get(), teardowns.get()), (1, 1));
	}

	#[test]
	fn registering_on_stopped_handle_tears_down_at_once() {
		let handle = StopHandle::new();
		handle.stop();
		let (cancels, teardowns) = counting_actions(&handle);
		assert_eq!((cancels.get(), teardowns.get()), (1, 1));
	}

	#[test]
	fn actions_run_in_registration_order() {
		let handle = StopHandle::new();
		let order = Rc::new(RefCell::new(Vec::new()));
		for n in 0..3 {
			let order = order.clone();
			handle.on_stop(move || order.borrow_mut().push(n));
		}
		handle.stop();
		assert_eq!(*order.borrow(), vec![0, 1, 2]);
	}

	#[test]
	fn handles_are_independent() {
		let (a, b) = (StopHandle::new(), StopHandle::new());
		let (_, a_down) = counting_actions(&a);
		let (_, b_down) = counting_actions(&b);
		a.stop();
		assert_eq!((a_down.get(), b_down.get()), (1, 0));
		b.stop();
		assert_eq!(b_down.get(), 1);
	}
}
