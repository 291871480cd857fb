//! Lifecycle contracts a managed object can opt into.

use crate::bean::BeanHandle;
use crate::error::BeanError;

/// Invoked once all properties have been applied, before the definition's
/// named init callback.
pub trait Initializing {
  fn after_properties_set(&self) -> Result<(), BeanError>;
}

/// Invoked at container shutdown, before the definition's named destroy
/// callback. Only singleton-scoped beans are ever destroyed.
pub trait Disposable {
  fn destroy(&self) -> Result<(), BeanError>;
}

/// Lets a bean learn the name it was registered under. Invoked after
/// population, while the object is still exclusively owned.
pub trait BeanNameAware {
  fn set_bean_name(&mut self, name: &str);
}

/// Binds a singleton to its destruction work: the `Disposable` capability
/// if the bean reports it, then the definition's named destroy callback.
pub(crate) struct DisposableAdapter {
  bean: BeanHandle,
  name: String,
  destroy_method: Option<String>,
}

impl DisposableAdapter {
  pub(crate) fn new(bean: BeanHandle, name: String, destroy_method: Option<String>) -> Self {
    Self {
      bean,
      name,
      destroy_method,
    }
  }

  pub(crate) fn bean_name(&self) -> &str {
    &self.name
  }

  pub(crate) fn destroy(&self) -> Result<(), BeanError> {
    if let Some(disposable) = self.bean.as_disposable() {
      disposable.destroy()?;
    }
    if let Some(method) = &self.destroy_method {
      self.bean.invoke_callback(method)?;
    }
    Ok(())
  }
}
