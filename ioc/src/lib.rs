//! # Weft IoC
//!
//! A declarative, definition-driven Inversion of Control (IoC) container
//! for Rust.
//!
//! Beans are described by [`BeanDefinition`] records registered under a
//! name. The container turns a name into a fully initialized object on
//! demand: it instantiates the bean through its definition, applies the
//! definition's property sequence (resolving references to other beans
//! recursively), runs the registered [`BeanPostProcessor`] chain around the
//! bean's init callbacks, and caches singleton-scoped results so every
//! later request observes the same instance.
//!
//! ## Core Concepts
//!
//! - **Container**: owns the registries and the processor chain; separate
//!   containers share nothing.
//! - **Definition**: how to build one bean, including its scope
//!   (`singleton` or `prototype`), properties and lifecycle callbacks.
//! - **Factory bean**: a registered producer; callers receive its product,
//!   not the producer itself.
//! - **Post-processor**: a hook that can observe or wrap every bean around
//!   its initialization step.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use weft_ioc::{Bean, BeanDefinition, BeanType, Container};
//!
//! struct Greeting {
//!   message: String,
//! }
//!
//! impl Bean for Greeting {}
//!
//! let container = Container::new();
//! container.register_bean_definition(
//!   "greeting",
//!   BeanDefinition::new(BeanType::new(|_| {
//!     Ok(Greeting {
//!       message: "Hello, World!".to_string(),
//!     })
//!   })),
//! );
//!
//! let greeting = container.get_bean_as::<Greeting>("greeting").unwrap();
//! let again = container.get_bean_as::<Greeting>("greeting").unwrap();
//!
//! assert_eq!(greeting.message, "Hello, World!");
//! // Singleton scope: both requests observe the same instance.
//! assert!(Arc::ptr_eq(&greeting, &again));
//! ```

mod bean;
mod container;
mod core;
mod creation;
mod definition;
mod descriptor;
mod error;
mod factory;
mod lifecycle;
mod macros;
mod processor;
mod registry;

pub use bean::{Bean, BeanArgs, BeanHandle, ValueHandle};
pub use container::Container;
pub use creation::{ConstructorStrategy, InstantiationStrategy};
pub use definition::{
  BeanDefinition, BeanType, PropertyArg, PropertyValue, PropertyValues, Scope, SCOPE_PROTOTYPE,
  SCOPE_SINGLETON,
};
pub use descriptor::{BeanDescriptor, PropertyEntry};
pub use error::{BeanError, ContainerError, Result};
pub use factory::{FactoryBean, FactoryObjectRegistry};
pub use lifecycle::{BeanNameAware, Disposable, Initializing};
pub use processor::{BeanPostProcessor, DefinitionPostProcessor, PostProcessorChain};
pub use registry::{DefinitionRegistry, SingletonRegistry};
