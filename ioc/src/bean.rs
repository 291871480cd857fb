//! The managed-object contract and the type-erased handles the container
//! passes around.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::BeanError;
use crate::factory::FactoryBean;
use crate::lifecycle::{BeanNameAware, Disposable, Initializing};

/// A shared handle to a container-managed object.
pub type BeanHandle = Arc<dyn Bean>;

/// A type-erased value, as stored in definitions and handed to property
/// setters. Resolved bean references arrive through the same type.
pub type ValueHandle = Arc<dyn Any + Send + Sync>;

/// Implemented by every object the container manages.
///
/// All methods have defaults, so a plain `impl Bean for MyType {}` is enough
/// for a type with no injectable properties and no lifecycle callbacks. The
/// `as_*` probes are capability tests: the container asks once, through a
/// single virtual call, whether the object opts into a contract.
pub trait Bean: Any + Send + Sync {
  /// Assigns a named property during population.
  ///
  /// Called with exclusive access, before the object is shared. The default
  /// rejects every name.
  fn set_property(&mut self, name: &str, value: ValueHandle) -> Result<(), BeanError> {
    let _ = value;
    Err(BeanError::UnknownProperty(name.to_owned()))
  }

  /// Invokes a lifecycle callback by name.
  ///
  /// Definitions refer to init and destroy callbacks by name; this is the
  /// dispatch point for both. The default rejects every name.
  fn invoke_callback(&self, method: &str) -> Result<(), BeanError> {
    Err(BeanError::UnknownCallback(method.to_owned()))
  }

  /// Reports whether this object is a factory for another object.
  fn as_factory_bean(&self) -> Option<&dyn FactoryBean> {
    None
  }

  /// Reports whether this object wants the post-population callback.
  fn as_initializing(&self) -> Option<&dyn Initializing> {
    None
  }

  /// Reports whether this object wants a destruction callback at shutdown.
  fn as_disposable(&self) -> Option<&dyn Disposable> {
    None
  }

  /// Reports whether this object wants to learn its own bean name.
  fn as_bean_name_aware(&mut self) -> Option<&mut dyn BeanNameAware> {
    None
  }
}

impl fmt::Debug for dyn Bean {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("dyn Bean")
  }
}

/// Ordered candidate constructor arguments for
/// [`get_bean_with_args`](crate::Container::get_bean_with_args).
///
/// Arguments are consulted only when a bean is actually created; a cached
/// singleton ignores them.
#[derive(Default)]
pub struct BeanArgs {
  values: Vec<ValueHandle>,
}

impl BeanArgs {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push<T: Any + Send + Sync>(&mut self, value: T) {
    self.values.push(Arc::new(value));
  }

  /// Borrows the argument at `index` as `T`, if present and of that type.
  pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Option<&T> {
    self.values.get(index).and_then(|value| value.downcast_ref::<T>())
  }

  /// Like [`get`](Self::get), but a miss is an error a constructor can
  /// propagate directly.
  pub fn require<T: Any + Send + Sync>(&self, index: usize) -> Result<&T, BeanError> {
    self.get(index).ok_or(BeanError::MissingArgument(index))
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}
