//! crates/chainlog/src/macros.rs
//! Construction helpers for record context maps.

/// Builds a [`Context`](crate::Context) from `key => value` pairs.
///
/// Keys accept anything convertible into `String`; values anything
/// convertible into [`serde_json::Value`].
///
/// # Example
/// ```
/// use chainlog::context;
///
/// let ctx = context! { "user" => "alice", "attempt" => 3 };
/// assert_eq!(ctx.len(), 2);
/// assert!(context! {}.is_empty());
/// ```
#[macro_export]
macro_rules! context {
    () => {
        $crate::Context::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut context = $crate::Context::new();
        $(
            context.insert(
                ::std::string::String::from($key),
                $crate::__private::Value::from($value),
            );
        )+
        context
    }};
}
