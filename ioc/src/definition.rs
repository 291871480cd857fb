//! Bean definitions: the declarative records the container turns into live
//! objects.

use std::any::{Any, TypeId};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::bean::{Bean, BeanArgs, ValueHandle};
use crate::error::{BeanError, ContainerError};

/// Scope attribute value for singleton-scoped beans, as it appears in
/// external descriptors. Case-sensitive.
pub const SCOPE_SINGLETON: &str = "singleton";

/// Scope attribute value for prototype-scoped beans. Case-sensitive.
pub const SCOPE_PROTOTYPE: &str = "prototype";

/// The lifetime of a bean: one shared instance per container, or a fresh
/// instance per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
  #[default]
  Singleton,
  Prototype,
}

impl Scope {
  pub fn as_str(&self) -> &'static str {
    match self {
      Scope::Singleton => SCOPE_SINGLETON,
      Scope::Prototype => SCOPE_PROTOTYPE,
    }
  }
}

impl FromStr for Scope {
  type Err = ContainerError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      SCOPE_SINGLETON => Ok(Scope::Singleton),
      SCOPE_PROTOTYPE => Ok(Scope::Prototype),
      other => Err(ContainerError::UnrecognizedScope(other.to_owned())),
    }
  }
}

impl fmt::Display for Scope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The source of one property value.
#[derive(Clone)]
pub enum PropertyArg {
  /// A concrete value, handed to the setter as-is.
  Value(ValueHandle),
  /// The name of another bean, resolved through the container at population
  /// time.
  BeanRef(String),
}

/// One name/value pair of a definition's property sequence.
#[derive(Clone)]
pub struct PropertyValue {
  name: String,
  arg: PropertyArg,
}

impl PropertyValue {
  /// A property carrying a direct value.
  pub fn value<T: Any + Send + Sync>(name: impl Into<String>, value: T) -> Self {
    Self {
      name: name.into(),
      arg: PropertyArg::Value(Arc::new(value)),
    }
  }

  /// A property referring to another bean by name.
  pub fn bean_ref(name: impl Into<String>, target: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      arg: PropertyArg::BeanRef(target.into()),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn arg(&self) -> &PropertyArg {
    &self.arg
  }
}

/// The ordered property sequence of a definition. An empty sequence is the
/// default; there is no unset state.
#[derive(Clone, Default)]
pub struct PropertyValues {
  values: Vec<PropertyValue>,
}

impl PropertyValues {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends a property. Application order equals insertion order.
  pub fn add(&mut self, value: PropertyValue) {
    self.values.push(value);
  }

  pub fn iter(&self) -> impl Iterator<Item = &PropertyValue> {
    self.values.iter()
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

type Constructor = dyn Fn(Option<&BeanArgs>) -> Result<Box<dyn Bean>, BeanError> + Send + Sync;

/// A handle to the concrete type a definition instantiates.
///
/// Rust has no runtime reflection, so the constructor is captured here at
/// the point where the concrete type is statically known. The instantiation
/// strategy invokes it with the caller-supplied arguments, if any.
#[derive(Clone)]
pub struct BeanType {
  type_id: TypeId,
  type_name: &'static str,
  constructor: Arc<Constructor>,
}

impl BeanType {
  /// A bean type built from an explicit constructor function.
  pub fn new<B, F>(constructor: F) -> Self
  where
    B: Bean,
    F: Fn(Option<&BeanArgs>) -> Result<B, BeanError> + Send + Sync + 'static,
  {
    Self {
      type_id: TypeId::of::<B>(),
      type_name: std::any::type_name::<B>(),
      constructor: Arc::new(move |args| {
        constructor(args).map(|bean| Box::new(bean) as Box<dyn Bean>)
      }),
    }
  }

  /// A bean type for a default-constructible bean.
  pub fn of<B: Bean + Default>() -> Self {
    Self::new(|_| Ok(B::default()))
  }

  pub fn id(&self) -> TypeId {
    self.type_id
  }

  pub fn name(&self) -> &'static str {
    self.type_name
  }

  pub(crate) fn construct(&self, args: Option<&BeanArgs>) -> Result<Box<dyn Bean>, BeanError> {
    (self.constructor)(args)
  }
}

impl fmt::Debug for BeanType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "BeanType({})", self.type_name)
  }
}

/// Describes how to build one bean: its concrete type, the properties to
/// inject after construction, its scope and its lifecycle callback names.
///
/// Definitions are registered once under a unique name and treated as
/// immutable from the first resolution of that name onward.
#[derive(Clone)]
pub struct BeanDefinition {
  bean_type: BeanType,
  property_values: PropertyValues,
  scope: Scope,
  init_method: Option<String>,
  destroy_method: Option<String>,
}

impl BeanDefinition {
  pub fn new(bean_type: BeanType) -> Self {
    Self::with_properties(bean_type, PropertyValues::new())
  }

  pub fn with_properties(bean_type: BeanType, property_values: PropertyValues) -> Self {
    Self {
      bean_type,
      property_values,
      scope: Scope::default(),
      init_method: None,
      destroy_method: None,
    }
  }

  pub fn bean_type(&self) -> &BeanType {
    &self.bean_type
  }

  pub fn property_values(&self) -> &PropertyValues {
    &self.property_values
  }

  /// Appends a property to the injection sequence.
  pub fn add_property(&mut self, value: PropertyValue) -> &mut Self {
    self.property_values.add(value);
    self
  }

  pub fn scope(&self) -> Scope {
    self.scope
  }

  /// Sets the scope. The singleton/prototype flags are derived from this
  /// single field, so they can never disagree with it.
  pub fn set_scope(&mut self, scope: Scope) -> &mut Self {
    self.scope = scope;
    self
  }

  pub fn is_singleton(&self) -> bool {
    self.scope == Scope::Singleton
  }

  pub fn is_prototype(&self) -> bool {
    self.scope == Scope::Prototype
  }

  pub fn init_method(&self) -> Option<&str> {
    self.init_method.as_deref()
  }

  /// Names the callback to invoke once the bean is populated.
  pub fn set_init_method(&mut self, name: impl Into<String>) -> &mut Self {
    self.init_method = Some(name.into());
    self
  }

  pub fn destroy_method(&self) -> Option<&str> {
    self.destroy_method.as_deref()
  }

  /// Names the callback to invoke when the container shuts down. Only
  /// meaningful for singleton-scoped beans.
  pub fn set_destroy_method(&mut self, name: impl Into<String>) -> &mut Self {
    self.destroy_method = Some(name.into());
    self
  }
}
