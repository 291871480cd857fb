//! Core, non-public data structures for the resolution pipeline.

use std::cell::RefCell;

use crate::error::ContainerError;

thread_local! {
  // The chain of bean names currently being resolved on this thread.
  // Property references re-enter the pipeline, so a name showing up twice
  // means the definitions form a cycle.
  static RESOLVING_STACK: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// An RAII guard marking a bean name as in-flight on the current thread.
///
/// Created at the top of every resolution. If the name is already on the
/// stack the resolution fails with `CircularReference` instead of recursing
/// until the stack overflows. Dropping the guard pops the name again.
pub(crate) struct ResolutionGuard;

impl ResolutionGuard {
  pub(crate) fn begin(name: &str) -> Result<Self, ContainerError> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if stack.iter().any(|entry| entry == name) {
        return Err(ContainerError::CircularReference(format!(
          "{} -> {}",
          stack.join(" -> "),
          name
        )));
      }
      stack.push(name.to_owned());
      Ok(ResolutionGuard)
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().pop();
    });
  }
}
