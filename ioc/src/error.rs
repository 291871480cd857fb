use thiserror::Error;

/// Errors raised by bean-side hooks: constructors, property setters and
/// lifecycle callbacks implemented on the managed object itself.
#[derive(Debug, Error)]
pub enum BeanError {
  #[error("no writable property named '{0}'")]
  UnknownProperty(String),

  #[error("property '{0}' received a value of an unexpected type")]
  PropertyType(String),

  #[error("no lifecycle callback named '{0}'")]
  UnknownCallback(String),

  #[error("missing constructor argument at position {0}")]
  MissingArgument(usize),

  #[error("{0}")]
  Failed(String),
}

/// The main error type for the `weft_ioc` container.
///
/// Creation failures never leave a partial cache entry behind: a name that
/// failed to resolve can be requested again and creation is re-attempted.
#[derive(Debug, Error)]
pub enum ContainerError {
  #[error("no bean definition registered under '{0}'")]
  NoSuchDefinition(String),

  #[error("failed to instantiate bean '{name}'")]
  Instantiation {
    name: String,
    #[source]
    source: BeanError,
  },

  #[error("failed to inject property '{property}' of bean '{name}'")]
  PropertyInjection {
    name: String,
    property: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("initialization of bean '{name}' failed")]
  Initialization {
    name: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("factory bean '{name}' failed to produce its object")]
  FactoryProduction {
    name: String,
    #[source]
    source: BeanError,
  },

  #[error("bean '{name}' is not of the requested type {requested}")]
  TypeMismatch {
    name: String,
    requested: &'static str,
  },

  #[error("circular bean reference detected: {0}")]
  CircularReference(String),

  #[error("unrecognized bean scope '{0}' (expected \"singleton\" or \"prototype\")")]
  UnrecognizedScope(String),

  #[error("invalid bean descriptor: {0}")]
  Descriptor(String),
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = ContainerError> = std::result::Result<T, E>;
