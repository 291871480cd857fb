//! Post-processing hooks applied around bean creation.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::bean::BeanHandle;
use crate::error::{BeanError, ContainerError};
use crate::registry::DefinitionRegistry;

/// A hook applied around the initialization of every bean.
///
/// Either phase may return the input unchanged or a wrapping substitute;
/// whatever the last processor returns is what the pipeline carries forward.
pub trait BeanPostProcessor: Send + Sync {
  /// Runs after population, before the bean's init callbacks.
  fn before_initialization(&self, bean: BeanHandle, name: &str) -> Result<BeanHandle, BeanError> {
    let _ = name;
    Ok(bean)
  }

  /// Runs after the bean's init callbacks.
  fn after_initialization(&self, bean: BeanHandle, name: &str) -> Result<BeanHandle, BeanError> {
    let _ = name;
    Ok(bean)
  }
}

/// A hook over the definition registry, applied during bootstrap before any
/// bean is instantiated. Definitions are amended by clone-and-re-register.
pub trait DefinitionPostProcessor: Send + Sync {
  fn post_process_definitions(&self, definitions: &DefinitionRegistry)
    -> Result<(), ContainerError>;
}

/// The ordered, de-duplicated processor list.
///
/// Identity is pointer identity on the shared processor. Re-adding a
/// processor that is already present moves it to the tail, so each
/// processor appears exactly once and the most recent registration decides
/// its position.
#[derive(Default)]
pub struct PostProcessorChain {
  processors: RwLock<Vec<Arc<dyn BeanPostProcessor>>>,
}

impl PostProcessorChain {
  pub fn add(&self, processor: Arc<dyn BeanPostProcessor>) {
    let mut processors = self.processors.write();
    processors.retain(|existing| !Arc::ptr_eq(existing, &processor));
    processors.push(processor);
  }

  /// The chain in current order.
  pub fn snapshot(&self) -> Vec<Arc<dyn BeanPostProcessor>> {
    self.processors.read().clone()
  }

  pub fn len(&self) -> usize {
    self.processors.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.processors.read().is_empty()
  }
}
