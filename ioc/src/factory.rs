//! Factory beans: registered producers whose product, not the producer
//! itself, is what callers receive.

use std::any::TypeId;

use dashmap::DashMap;

use crate::bean::{Bean, BeanHandle};
use crate::error::{BeanError, ContainerError};
use crate::registry::SingletonRegistry;

/// A bean that produces another object.
///
/// When a resolved bean reports this capability, the container returns the
/// factory's product instead of the factory. A singleton-producing factory
/// yields the same product across calls; a prototype-producing factory
/// yields a fresh product each call.
pub trait FactoryBean: Bean {
  /// Produces the object this factory stands in for.
  fn get_object(&self) -> Result<BeanHandle, BeanError>;

  /// Whether the product is shared across calls. Defaults to shared.
  fn is_singleton(&self) -> bool {
    true
  }

  /// The concrete type of the product.
  fn object_type(&self) -> TypeId;
}

/// The singleton cache extended with a secondary cache for factory-produced
/// objects.
///
/// The factory bean itself lives in the singleton cache; its product lives
/// here under the same name. The two mappings are distinct, so the keys
/// never collide.
#[derive(Default)]
pub struct FactoryObjectRegistry {
  singletons: SingletonRegistry,
  factory_objects: DashMap<String, BeanHandle>,
}

impl FactoryObjectRegistry {
  /// The underlying singleton cache.
  pub fn singletons(&self) -> &SingletonRegistry {
    &self.singletons
  }

  /// Pure lookup of a cached factory product.
  pub fn cached_factory_product(&self, name: &str) -> Option<BeanHandle> {
    self.factory_objects.get(name).map(|entry| entry.value().clone())
  }

  /// Obtains the product of `factory`, consulting and maintaining the
  /// product cache for singleton-producing factories.
  pub fn object_from_factory(
    &self,
    factory: &dyn FactoryBean,
    name: &str,
  ) -> Result<BeanHandle, ContainerError> {
    if !factory.is_singleton() {
      return self.produce(factory, name);
    }
    if let Some(product) = self.cached_factory_product(name) {
      return Ok(product);
    }
    let product = self.produce(factory, name)?;
    // The entry API keeps the first product if another thread won the race.
    let entry = self
      .factory_objects
      .entry(name.to_owned())
      .or_insert(product);
    Ok(entry.value().clone())
  }

  /// Produces without consulting or filling the cache. Used for factories
  /// reached through a prototype-scoped definition, where every request
  /// must observe a fresh product regardless of what the factory declares.
  pub(crate) fn uncached_object_from_factory(
    &self,
    factory: &dyn FactoryBean,
    name: &str,
  ) -> Result<BeanHandle, ContainerError> {
    self.produce(factory, name)
  }

  fn produce(&self, factory: &dyn FactoryBean, name: &str) -> Result<BeanHandle, ContainerError> {
    factory
      .get_object()
      .map_err(|source| ContainerError::FactoryProduction {
        name: name.to_owned(),
        source,
      })
  }

  /// Drops every cached product and destroys the underlying singletons.
  pub(crate) fn destroy_singletons(&self) {
    self.factory_objects.clear();
    self.singletons.destroy_singletons();
  }
}
