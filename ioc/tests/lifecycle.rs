use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use weft_ioc::{
  Bean, BeanDefinition, BeanError, BeanNameAware, BeanType, Container, ContainerError,
  DefinitionPostProcessor, DefinitionRegistry, Disposable, Initializing, PropertyValue, Scope,
  ValueHandle,
};

// --- Test Fixtures ---

type EventLog = Arc<Mutex<Vec<String>>>;

fn push(log: &EventLog, event: impl Into<String>) {
  log.lock().unwrap().push(event.into());
}

// A bean participating in every lifecycle contract, journaling each step.
struct Worker {
  log: EventLog,
  name: String,
  fail_destroy: bool,
}

impl Worker {
  fn definition(log: &EventLog) -> BeanDefinition {
    Self::failing_definition(log, false)
  }

  fn failing_definition(log: &EventLog, fail_destroy: bool) -> BeanDefinition {
    let log = log.clone();
    BeanDefinition::new(BeanType::new(move |_| {
      Ok(Worker {
        log: log.clone(),
        name: String::new(),
        fail_destroy,
      })
    }))
  }
}

impl Bean for Worker {
  fn set_property(&mut self, name: &str, _value: ValueHandle) -> Result<(), BeanError> {
    push(&self.log, format!("property:{name}"));
    Ok(())
  }

  fn invoke_callback(&self, method: &str) -> Result<(), BeanError> {
    match method {
      "start" => {
        push(&self.log, format!("start:{}", self.name));
        Ok(())
      }
      "stop" => {
        push(&self.log, format!("stop:{}", self.name));
        Ok(())
      }
      other => Err(BeanError::UnknownCallback(other.to_owned())),
    }
  }

  fn as_initializing(&self) -> Option<&dyn Initializing> {
    Some(self)
  }

  fn as_disposable(&self) -> Option<&dyn Disposable> {
    Some(self)
  }

  fn as_bean_name_aware(&mut self) -> Option<&mut dyn BeanNameAware> {
    Some(self)
  }
}

impl Initializing for Worker {
  fn after_properties_set(&self) -> Result<(), BeanError> {
    push(&self.log, format!("after_properties_set:{}", self.name));
    Ok(())
  }
}

impl Disposable for Worker {
  fn destroy(&self) -> Result<(), BeanError> {
    if self.fail_destroy {
      return Err(BeanError::Failed("destroy exploded".to_string()));
    }
    push(&self.log, format!("destroy:{}", self.name));
    Ok(())
  }
}

impl BeanNameAware for Worker {
  fn set_bean_name(&mut self, name: &str) {
    self.name = name.to_owned();
  }
}

// Rewrites a named definition's scope before any bean is created.
struct ScopeOverride {
  target: &'static str,
  scope: Scope,
}

impl DefinitionPostProcessor for ScopeOverride {
  fn post_process_definitions(
    &self,
    definitions: &DefinitionRegistry,
  ) -> Result<(), ContainerError> {
    let mut definition = (*definitions.get_bean_definition(self.target)?).clone();
    definition.set_scope(self.scope);
    definitions.register_bean_definition(self.target, definition);
    Ok(())
  }
}

// --- Lifecycle Tests ---

#[test]
fn test_initialization_sequence() {
  // Arrange
  let log: EventLog = Arc::default();
  let container = Container::new();
  let mut definition = Worker::definition(&log);
  definition
    .add_property(PropertyValue::value("queue", "inbound".to_string()))
    .set_init_method("start");
  container.register_bean_definition("worker", definition);

  // Act
  container.get_bean("worker").unwrap();

  // Assert: properties first, then the post-population callback, then the
  // named init callback. The bean already knows its name by init time.
  assert_eq!(
    *log.lock().unwrap(),
    vec!["property:queue", "after_properties_set:worker", "start:worker"]
  );
}

#[test]
fn test_unknown_init_callback_fails_initialization() {
  let log: EventLog = Arc::default();
  let container = Container::new();
  let mut definition = Worker::definition(&log);
  definition.set_init_method("warm_up");
  container.register_bean_definition("worker", definition);

  let error = container.get_bean("worker").unwrap_err();

  assert!(matches!(error, ContainerError::Initialization { ref name, .. } if name == "worker"));
}

#[test]
fn test_shutdown_destroys_in_reverse_registration_order() {
  // Arrange: two singletons created in a known order.
  let log: EventLog = Arc::default();
  let container = Container::new();
  let mut first = Worker::definition(&log);
  first.set_destroy_method("stop");
  container.register_bean_definition("first", first);
  let mut second = Worker::definition(&log);
  second.set_destroy_method("stop");
  container.register_bean_definition("second", second);
  container.get_bean("first").unwrap();
  container.get_bean("second").unwrap();
  log.lock().unwrap().clear();

  // Act
  container.shutdown();

  // Assert: last created, first destroyed; the capability callback runs
  // before the named one for each bean.
  assert_eq!(
    *log.lock().unwrap(),
    vec!["destroy:second", "stop:second", "destroy:first", "stop:first"]
  );
}

#[test]
fn test_failing_destroyer_does_not_abort_shutdown() {
  // Arrange: the later bean fails its destroy callback.
  let log: EventLog = Arc::default();
  let container = Container::new();
  container.register_bean_definition("steady", Worker::definition(&log));
  container.register_bean_definition("explosive", Worker::failing_definition(&log, true));
  container.get_bean("steady").unwrap();
  container.get_bean("explosive").unwrap();
  log.lock().unwrap().clear();

  // Act
  container.shutdown();

  // Assert: the failure is swallowed and the remaining bean still runs.
  assert_eq!(*log.lock().unwrap(), vec!["destroy:steady"]);
}

#[test]
fn test_prototypes_are_not_destroyed() {
  // Arrange
  let log: EventLog = Arc::default();
  let container = Container::new();
  let mut definition = Worker::definition(&log);
  definition.set_scope(Scope::Prototype).set_destroy_method("stop");
  container.register_bean_definition("worker", definition);
  container.get_bean("worker").unwrap();
  log.lock().unwrap().clear();

  // Act
  container.shutdown();

  // Assert: nothing to destroy; prototypes are the caller's to dispose.
  assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_shutdown_is_idempotent() {
  let log: EventLog = Arc::default();
  let container = Container::new();
  container.register_bean_definition("worker", Worker::definition(&log));
  container.get_bean("worker").unwrap();

  container.shutdown();
  let after_first = log.lock().unwrap().len();
  container.shutdown();

  assert_eq!(log.lock().unwrap().len(), after_first);
}

#[test]
fn test_pre_instantiation_covers_singletons_only() {
  // Arrange
  static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

  #[derive(Default)]
  struct Counted;
  impl Bean for Counted {}

  let counted_type = || {
    BeanType::new(|_| {
      CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
      Ok(Counted)
    })
  };
  let container = Container::new();
  container.register_bean_definition("one", BeanDefinition::new(counted_type()));
  container.register_bean_definition("two", BeanDefinition::new(counted_type()));
  let mut prototype = BeanDefinition::new(counted_type());
  prototype.set_scope(Scope::Prototype);
  container.register_bean_definition("each_time", prototype);

  // Act
  container.bootstrap().unwrap();

  // Assert: both singletons exist, the prototype was left alone, and a
  // later request hits the cache without constructing again.
  assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), 2);
  container.get_bean("one").unwrap();
  assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), 2);
}

#[test]
fn test_definition_post_processor_runs_before_instantiation() {
  // Arrange: the definition starts out singleton; a post-processor flips
  // it to prototype during bootstrap.
  let log: EventLog = Arc::default();
  let container = Container::new();
  container.register_bean_definition("worker", Worker::definition(&log));
  container.add_definition_post_processor(Arc::new(ScopeOverride {
    target: "worker",
    scope: Scope::Prototype,
  }));

  // Act
  container.bootstrap().unwrap();

  // Assert: resolved as a prototype, so two requests yield two instances.
  let first = container.get_bean("worker").unwrap();
  let second = container.get_bean("worker").unwrap();
  assert!(!Arc::ptr_eq(&first, &second));
}
