//! The `Container` struct: the get-or-create resolution pipeline.

use std::any::Any;
use std::sync::Arc;

use parking_lot::{ReentrantMutex, RwLock};
use tracing::debug;

use crate::bean::{Bean, BeanArgs, BeanHandle};
use crate::core::ResolutionGuard;
use crate::creation::{ConstructorStrategy, InstantiationStrategy};
use crate::definition::BeanDefinition;
use crate::error::ContainerError;
use crate::factory::FactoryObjectRegistry;
use crate::processor::{BeanPostProcessor, DefinitionPostProcessor, PostProcessorChain};
use crate::registry::DefinitionRegistry;

/// The Inversion of Control (IoC) container.
///
/// A container owns its registries and processor chain; separate containers
/// share nothing. The intended lifecycle is explicit: construct, register
/// definitions, [`bootstrap`](Container::bootstrap), serve
/// [`get_bean`](Container::get_bean) requests, and finally
/// [`shutdown`](Container::shutdown).
pub struct Container {
  pub(crate) singletons: FactoryObjectRegistry,
  pub(crate) definitions: DefinitionRegistry,
  pub(crate) processors: PostProcessorChain,
  pub(crate) strategy: Box<dyn InstantiationStrategy>,
  definition_processors: RwLock<Vec<Arc<dyn DefinitionPostProcessor>>>,
  // Serializes singleton creation so the read-check/create/publish sequence
  // cannot run twice for one name. Reentrant: property references re-enter
  // get_bean on the creating thread.
  creation_lock: ReentrantMutex<()>,
}

impl Default for Container {
  fn default() -> Self {
    Self::with_strategy(ConstructorStrategy)
  }
}

impl Container {
  /// Creates an empty container using the default constructor-invocation
  /// strategy.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates an empty container with a custom instantiation strategy.
  pub fn with_strategy(strategy: impl InstantiationStrategy + 'static) -> Self {
    Self {
      singletons: FactoryObjectRegistry::default(),
      definitions: DefinitionRegistry::default(),
      processors: PostProcessorChain::default(),
      strategy: Box::new(strategy),
      definition_processors: RwLock::new(Vec::new()),
      creation_lock: ReentrantMutex::new(()),
    }
  }

  // --- Registration ---

  /// Registers the definition to build the bean `name` from. A repeated
  /// registration under the same name replaces the earlier one.
  pub fn register_bean_definition(&self, name: impl Into<String>, definition: BeanDefinition) {
    self.definitions.register_bean_definition(name, definition);
  }

  pub fn contains_bean_definition(&self, name: &str) -> bool {
    self.definitions.contains_bean_definition(name)
  }

  pub fn get_bean_definition(&self, name: &str) -> Result<Arc<BeanDefinition>, ContainerError> {
    self.definitions.get_bean_definition(name)
  }

  /// Registers an externally constructed singleton under `name`, bypassing
  /// definition-driven creation.
  pub fn register_singleton(&self, name: impl Into<String>, bean: BeanHandle) {
    self.singletons.singletons().register_singleton(name, bean);
  }

  /// Appends `processor` to the chain. If it is already present it moves to
  /// the tail instead of appearing twice.
  pub fn add_bean_post_processor(&self, processor: Arc<dyn BeanPostProcessor>) {
    self.processors.add(processor);
  }

  /// The processor chain in its current order.
  pub fn bean_post_processors(&self) -> Vec<Arc<dyn BeanPostProcessor>> {
    self.processors.snapshot()
  }

  pub fn add_definition_post_processor(&self, processor: Arc<dyn DefinitionPostProcessor>) {
    self.definition_processors.write().push(processor);
  }

  // --- Resolution ---

  /// Returns the fully initialized bean registered under `name`, creating
  /// it from its definition on a cache miss.
  pub fn get_bean(&self, name: &str) -> Result<BeanHandle, ContainerError> {
    self.do_get_bean(name, None)
  }

  /// Like [`get_bean`](Container::get_bean), with candidate constructor
  /// arguments. Arguments apply only when the bean is actually created; an
  /// existing singleton is returned as-is.
  pub fn get_bean_with_args(
    &self,
    name: &str,
    args: BeanArgs,
  ) -> Result<BeanHandle, ContainerError> {
    self.do_get_bean(name, Some(&args))
  }

  /// Resolves `name` and narrows the result to the concrete type `T`.
  pub fn get_bean_as<T: Bean>(&self, name: &str) -> Result<Arc<T>, ContainerError> {
    let bean = self.get_bean(name)?;
    let bean: Arc<dyn Any + Send + Sync> = bean;
    bean
      .downcast::<T>()
      .map_err(|_| ContainerError::TypeMismatch {
        name: name.to_owned(),
        requested: std::any::type_name::<T>(),
      })
  }

  fn do_get_bean(&self, name: &str, args: Option<&BeanArgs>) -> Result<BeanHandle, ContainerError> {
    let _guard = ResolutionGuard::begin(name)?;

    if let Some(singleton) = self.singletons.singletons().get_singleton(name) {
      return self.resolve_bean_instance(singleton, name);
    }

    let definition = self.definitions.get_bean_definition(name)?;
    if definition.is_singleton() {
      let _creating = self.creation_lock.lock();
      // Double check: another thread may have published while we waited.
      let bean = match self.singletons.singletons().get_singleton(name) {
        Some(existing) => existing,
        None => self.create_bean(name, &definition, args)?,
      };
      self.resolve_bean_instance(bean, name)
    } else {
      // Prototype scope: nothing about this request may be cached, not
      // even the product of a factory that calls itself singleton.
      let bean = self.create_bean(name, &definition, args)?;
      match bean.as_factory_bean() {
        Some(factory) => self.singletons.uncached_object_from_factory(factory, name),
        None => Ok(bean),
      }
    }
  }

  /// The factory-object unwrap step. A plain bean passes through; a factory
  /// bean is swapped for its product, cached when the factory produces a
  /// shared one. Cache hits route through here too, since a cached
  /// singleton may itself be a factory.
  fn resolve_bean_instance(
    &self,
    bean: BeanHandle,
    name: &str,
  ) -> Result<BeanHandle, ContainerError> {
    match bean.as_factory_bean() {
      Some(factory) => self.singletons.object_from_factory(factory, name),
      None => Ok(bean),
    }
  }

  /// Pure lookup of a cached factory product.
  pub fn cached_factory_product(&self, name: &str) -> Option<BeanHandle> {
    self.singletons.cached_factory_product(name)
  }

  // --- Lifecycle ---

  /// Applies the registered definition post-processors, then eagerly
  /// resolves every singleton-scoped definition.
  pub fn bootstrap(&self) -> Result<(), ContainerError> {
    let processors: Vec<_> = self.definition_processors.read().clone();
    for processor in processors {
      processor.post_process_definitions(&self.definitions)?;
    }
    self.pre_instantiate_singletons()
  }

  /// Eagerly resolves every singleton-scoped definition. Prototype-scoped
  /// definitions are left alone.
  pub fn pre_instantiate_singletons(&self) -> Result<(), ContainerError> {
    // The registry iterates in arbitrary order; sort for a stable
    // instantiation order.
    let mut names = self.definitions.definition_names();
    names.sort();
    for name in names {
      let definition = self.definitions.get_bean_definition(&name)?;
      if definition.is_singleton() {
        self.get_bean(&name)?;
      }
    }
    Ok(())
  }

  /// Destroys the cached singletons, invoking their destruction callbacks
  /// in reverse registration order, and clears the factory-product cache.
  /// A failing callback is logged and does not stop the rest.
  pub fn shutdown(&self) {
    debug!("container shutting down");
    self.singletons.destroy_singletons();
  }
}
