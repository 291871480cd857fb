//! Public macros for ergonomic argument construction.

/// Builds a [`BeanArgs`](crate::BeanArgs) from a list of values.
///
/// Each value is type-erased in order, matching the positions a definition's
/// constructor reads them back from.
///
/// # Examples
///
/// ```
/// use weft_ioc::bean_args;
///
/// let args = bean_args!["primary".to_string(), 8u32];
/// assert_eq!(args.get::<String>(0).unwrap(), "primary");
/// assert_eq!(*args.get::<u32>(1).unwrap(), 8);
/// ```
#[macro_export]
macro_rules! bean_args {
  () => {
    $crate::BeanArgs::new()
  };
  ($($value:expr),+ $(,)?) => {{
    let mut args = $crate::BeanArgs::new();
    $( args.push($value); )+
    args
  }};
}
