//! Definition-driven bean creation: instantiate, populate, initialize.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::bean::{Bean, BeanArgs, BeanHandle, ValueHandle};
use crate::container::Container;
use crate::definition::{BeanDefinition, PropertyArg};
use crate::error::ContainerError;
use crate::lifecycle::DisposableAdapter;

/// Produces a bare object from a definition.
///
/// The default strategy invokes the constructor captured in the
/// definition's [`BeanType`](crate::BeanType); alternative strategies can
/// wrap construction in instrumentation or substitute test doubles.
pub trait InstantiationStrategy: Send + Sync {
  fn instantiate(
    &self,
    definition: &BeanDefinition,
    name: &str,
    args: Option<&BeanArgs>,
  ) -> Result<Box<dyn Bean>, ContainerError>;
}

/// Invokes the definition's captured constructor directly.
#[derive(Default)]
pub struct ConstructorStrategy;

impl InstantiationStrategy for ConstructorStrategy {
  fn instantiate(
    &self,
    definition: &BeanDefinition,
    name: &str,
    args: Option<&BeanArgs>,
  ) -> Result<Box<dyn Bean>, ContainerError> {
    definition
      .bean_type()
      .construct(args)
      .map_err(|source| ContainerError::Instantiation {
        name: name.to_owned(),
        source,
      })
  }
}

impl Container {
  /// Builds a bean from its definition: instantiate, apply properties, run
  /// the initialization phase, and, for singletons, publish the result and
  /// its destruction callback.
  ///
  /// Nothing is published on failure, so a later request for the same name
  /// re-attempts creation from scratch.
  pub(crate) fn create_bean(
    &self,
    name: &str,
    definition: &BeanDefinition,
    args: Option<&BeanArgs>,
  ) -> Result<BeanHandle, ContainerError> {
    debug!(bean = %name, scope = %definition.scope(), "creating bean from definition");
    let mut bean = self.strategy.instantiate(definition, name, args)?;
    self.populate_bean(name, bean.as_mut(), definition)?;
    if let Some(aware) = bean.as_bean_name_aware() {
      aware.set_bean_name(name);
    }
    let bean: BeanHandle = Arc::from(bean);
    let bean = self.initialize_bean(name, bean, definition)?;
    if definition.is_singleton() {
      self
        .singletons
        .singletons()
        .register_singleton(name, bean.clone());
      if bean.as_disposable().is_some() || definition.destroy_method().is_some() {
        self.singletons.singletons().register_disposable(DisposableAdapter::new(
          bean.clone(),
          name.to_owned(),
          definition.destroy_method().map(str::to_owned),
        ));
      }
    }
    Ok(bean)
  }

  /// Applies the definition's property sequence in order. Bean references
  /// resolve through the container, so a referenced bean is created on
  /// demand.
  fn populate_bean(
    &self,
    name: &str,
    bean: &mut dyn Bean,
    definition: &BeanDefinition,
  ) -> Result<(), ContainerError> {
    for property in definition.property_values().iter() {
      let injection_error = |source: Box<dyn std::error::Error + Send + Sync>| {
        ContainerError::PropertyInjection {
          name: name.to_owned(),
          property: property.name().to_owned(),
          source,
        }
      };
      let value: ValueHandle = match property.arg() {
        PropertyArg::Value(value) => value.clone(),
        PropertyArg::BeanRef(target) => {
          let resolved: ValueHandle = self
            .get_bean(target)
            .map_err(|source| injection_error(Box::new(source)))?;
          resolved
        }
      };
      trace!(bean = %name, property = %property.name(), "applying property");
      bean
        .set_property(property.name(), value)
        .map_err(|source| injection_error(Box::new(source)))?;
    }
    Ok(())
  }

  /// Runs the initialization phase: before-processors in chain order, the
  /// bean's init callbacks, then after-processors in chain order. Each
  /// phase carries forward whatever handle the previous one returned.
  fn initialize_bean(
    &self,
    name: &str,
    mut bean: BeanHandle,
    definition: &BeanDefinition,
  ) -> Result<BeanHandle, ContainerError> {
    let initialization_error = |source: Box<dyn std::error::Error + Send + Sync>| {
      ContainerError::Initialization {
        name: name.to_owned(),
        source,
      }
    };
    for processor in self.processors.snapshot() {
      bean = processor
        .before_initialization(bean, name)
        .map_err(|source| initialization_error(Box::new(source)))?;
    }
    if let Some(initializing) = bean.as_initializing() {
      initializing
        .after_properties_set()
        .map_err(|source| initialization_error(Box::new(source)))?;
    }
    if let Some(method) = definition.init_method() {
      bean
        .invoke_callback(method)
        .map_err(|source| initialization_error(Box::new(source)))?;
    }
    for processor in self.processors.snapshot() {
      bean = processor
        .after_initialization(bean, name)
        .map_err(|source| initialization_error(Box::new(source)))?;
    }
    Ok(bean)
  }
}
