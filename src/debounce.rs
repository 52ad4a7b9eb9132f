//! Debounce scheduler for input-driven fetches. Keyed slots instead of a
//! single global timer, so independent trigger sites cannot starve each
//! other's pending action.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Latest-wins bookkeeping for the pending action of each debounce key.
#[derive(Debug, Default)]
pub struct DebounceSlots {
	generations: HashMap<&'static str, u64>,
}

impl DebounceSlots {
	/// Arm `key`, staling any previously armed generation, and return the
	/// token the pending action must present to fire.
	pub fn arm(&mut self, key: &'static str) -> u64 {
		let generation = self.generations.entry(key).or_insert(0);
		*generation += 1;
		*generation
	}

	/// Whether `generation` is still the newest armed for `key`.
	pub fn is_current(&self, key: &'static str, generation: u64) -> bool {
		self.generations.get(key) == Some(&generation)
	}
}

/// Coalesces rapid triggers into one delayed action per key. Each call for
/// a key cancels that key's pending timer; only the most recent action runs,
/// after `delay_ms` of quiescence.
#[derive(Clone, Default)]
pub struct Debouncer {
	slots: Rc<RefCell<DebounceSlots>>,
	timers: Rc<RefCell<HashMap<&'static str, Timeout>>>,
}

impl Debouncer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Run `action` once `key` has been quiet for `delay_ms`.
	pub fn schedule(&self, key: &'static str, delay_ms: u32, action: impl FnOnce() + 'static) {
		let generation = self.slots.borrow_mut().arm(key);
		let slots = Rc::clone(&self.slots);
		let timer = Timeout::new(delay_ms, move || {
			// Superseded timers are cancelled when the map entry below is
			// replaced; the token check keeps staleness observable.
			if slots.borrow().is_current(key, generation) {
				action();
			}
		});
		self.timers.borrow_mut().insert(key, timer);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rearming_a_key_stales_the_previous_generation() {
		let mut slots = DebounceSlots::default();
		let first = slots.arm("search");
		let second = slots.arm("search");
		assert!(!slots.is_current("search", first));
		assert!(slots.is_current("search", second));
	}

	#[test]
	fn keys_are_independent() {
		let mut slots = DebounceSlots::default();
		let prefix = slots.arm("value-prefix");
		let name = slots.arm("partial-name");
		assert!(slots.is_current("value-prefix", prefix));
		assert!(slots.is_current("partial-name", name));
	}
}
