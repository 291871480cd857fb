//! Declarative bean metadata, as handed over by an external configuration
//! source.
//!
//! The container does not parse descriptor files itself. A loader that does
//! (XML, YAML, whatever) deserializes each bean's attributes into a
//! [`BeanDescriptor`] and applies it to the definition it is building.

use std::str::FromStr;

use serde::Deserialize;

use crate::definition::{BeanDefinition, PropertyValue, Scope};
use crate::error::ContainerError;

/// The per-bean attribute set of an external descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BeanDescriptor {
  /// `"singleton"` or `"prototype"`, case-sensitive.
  pub scope: Option<String>,
  pub init_method: Option<String>,
  pub destroy_method: Option<String>,
  pub properties: Vec<PropertyEntry>,
}

/// One property attribute: a name plus exactly one of a literal value or a
/// reference to another bean.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyEntry {
  pub name: String,
  #[serde(default)]
  pub value: Option<String>,
  #[serde(default, rename = "ref")]
  pub bean_ref: Option<String>,
}

impl BeanDescriptor {
  /// Applies the descriptor's attributes to `definition`.
  pub fn apply_to(&self, definition: &mut BeanDefinition) -> Result<(), ContainerError> {
    if let Some(scope) = &self.scope {
      definition.set_scope(Scope::from_str(scope)?);
    }
    if let Some(init_method) = &self.init_method {
      definition.set_init_method(init_method.clone());
    }
    if let Some(destroy_method) = &self.destroy_method {
      definition.set_destroy_method(destroy_method.clone());
    }
    for entry in &self.properties {
      let property = match (&entry.value, &entry.bean_ref) {
        (Some(value), None) => PropertyValue::value(entry.name.as_str(), value.clone()),
        (None, Some(target)) => PropertyValue::bean_ref(entry.name.as_str(), target.as_str()),
        _ => {
          return Err(ContainerError::Descriptor(format!(
            "property '{}' must carry exactly one of 'value' or 'ref'",
            entry.name
          )))
        }
      };
      definition.add_property(property);
    }
    Ok(())
  }
}
