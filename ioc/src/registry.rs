//! The singleton cache and the definition registry.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::bean::BeanHandle;
use crate::definition::BeanDefinition;
use crate::error::ContainerError;
use crate::lifecycle::DisposableAdapter;

/// The keyed cache of fully-constructed singleton instances, together with
/// the destruction callbacks registered during their creation.
#[derive(Default)]
pub struct SingletonRegistry {
  singletons: DashMap<String, BeanHandle>,
  disposables: Mutex<Vec<DisposableAdapter>>,
}

impl SingletonRegistry {
  /// Pure lookup. Never creates.
  pub fn get_singleton(&self, name: &str) -> Option<BeanHandle> {
    self.singletons.get(name).map(|entry| entry.value().clone())
  }

  /// Inserts or replaces the instance registered under `name`.
  pub fn register_singleton(&self, name: impl Into<String>, bean: BeanHandle) {
    let name = name.into();
    trace!(bean = %name, "registered singleton");
    self.singletons.insert(name, bean);
  }

  pub fn contains_singleton(&self, name: &str) -> bool {
    self.singletons.contains_key(name)
  }

  pub fn singleton_count(&self) -> usize {
    self.singletons.len()
  }

  pub(crate) fn register_disposable(&self, adapter: DisposableAdapter) {
    self.disposables.lock().push(adapter);
  }

  /// Invokes the destruction callbacks in reverse registration order, then
  /// clears the cache. A failing callback is logged and the sequence
  /// continues with the remaining beans.
  pub(crate) fn destroy_singletons(&self) {
    let mut disposables = std::mem::take(&mut *self.disposables.lock());
    debug!(count = disposables.len(), "destroying singletons");
    while let Some(adapter) = disposables.pop() {
      if let Err(error) = adapter.destroy() {
        warn!(bean = %adapter.bean_name(), %error, "destroy callback failed");
      }
    }
    self.singletons.clear();
  }
}

/// The keyed mapping from bean name to definition.
#[derive(Default)]
pub struct DefinitionRegistry {
  definitions: DashMap<String, Arc<BeanDefinition>>,
}

impl DefinitionRegistry {
  /// Inserts or replaces the definition registered under `name`.
  pub fn register_bean_definition(&self, name: impl Into<String>, definition: BeanDefinition) {
    self.definitions.insert(name.into(), Arc::new(definition));
  }

  pub fn get_bean_definition(&self, name: &str) -> Result<Arc<BeanDefinition>, ContainerError> {
    self
      .definitions
      .get(name)
      .map(|entry| entry.value().clone())
      .ok_or_else(|| ContainerError::NoSuchDefinition(name.to_owned()))
  }

  pub fn contains_bean_definition(&self, name: &str) -> bool {
    self.definitions.contains_key(name)
  }

  /// The names of all registered definitions, in no particular order.
  pub fn definition_names(&self) -> Vec<String> {
    self.definitions.iter().map(|entry| entry.key().clone()).collect()
  }
}
