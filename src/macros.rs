//! Macros for building values and rule maps with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`value!`] — JSON-like [`Value`](crate::value::Value) literals, plus
//!   `undefined`
//! - [`rules!`] — `key => rule` sugar for [`RuleMap`](crate::engine::RuleMap)
//!
//! # Examples
//!
//! ```
//! use sift::engine::Rule;
//! use sift::{rules, value};
//!
//! let user = value!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["admin", "ops"],
//!     "manager": null,
//! });
//!
//! let rule_map = rules! {
//!     "name" => Rule::leaf(|ctx| ctx.required()?.string()),
//!     "age" => Rule::leaf(|ctx| ctx.required()?.positive_number()),
//! };
//!
//! assert_eq!(user.entries().unwrap().len(), 4);
//! assert_eq!(rule_map.len(), 2);
//! ```

/// Builds a [`Value`](crate::value::Value) from a JSON-like literal.
///
/// Supports `null`, `undefined`, scalar expressions, nested arrays, and
/// objects with string-literal keys.
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::value::Value::Null
    };
    (undefined) => {
        $crate::value::Value::Undefined
    };
    ([]) => {
        $crate::value::Value::Array(::std::vec::Vec::new())
    };
    ([ $($tt:tt)+ ]) => {
        $crate::value::Value::Array($crate::value_items!(@list [] $($tt)+))
    };
    ({}) => {
        $crate::value::Value::Object($crate::value::Entries::new())
    };
    ({ $($tt:tt)+ }) => {
        $crate::value::Value::object($crate::value_entries!(@list [] $($tt)+))
    };
    ($other:expr) => {
        $crate::value::Value::from($other)
    };
}

/// Array-element muncher behind [`value!`]. Not public API.
#[doc(hidden)]
#[macro_export]
macro_rules! value_items {
    (@list [ $($done:expr,)* ]) => {
        ::std::vec![ $($done),* ]
    };
    (@list [ $($done:expr,)* ] null , $($rest:tt)*) => {
        $crate::value_items!(@list [ $($done,)* $crate::value::Value::Null, ] $($rest)*)
    };
    (@list [ $($done:expr,)* ] null) => {
        $crate::value_items!(@list [ $($done,)* $crate::value::Value::Null, ])
    };
    (@list [ $($done:expr,)* ] undefined , $($rest:tt)*) => {
        $crate::value_items!(@list [ $($done,)* $crate::value::Value::Undefined, ] $($rest)*)
    };
    (@list [ $($done:expr,)* ] undefined) => {
        $crate::value_items!(@list [ $($done,)* $crate::value::Value::Undefined, ])
    };
    (@list [ $($done:expr,)* ] { $($obj:tt)* } , $($rest:tt)*) => {
        $crate::value_items!(@list [ $($done,)* $crate::value!({ $($obj)* }), ] $($rest)*)
    };
    (@list [ $($done:expr,)* ] { $($obj:tt)* }) => {
        $crate::value_items!(@list [ $($done,)* $crate::value!({ $($obj)* }), ])
    };
    (@list [ $($done:expr,)* ] [ $($arr:tt)* ] , $($rest:tt)*) => {
        $crate::value_items!(@list [ $($done,)* $crate::value!([ $($arr)* ]), ] $($rest)*)
    };
    (@list [ $($done:expr,)* ] [ $($arr:tt)* ]) => {
        $crate::value_items!(@list [ $($done,)* $crate::value!([ $($arr)* ]), ])
    };
    (@list [ $($done:expr,)* ] $next:expr , $($rest:tt)*) => {
        $crate::value_items!(@list [ $($done,)* $crate::value::Value::from($next), ] $($rest)*)
    };
    (@list [ $($done:expr,)* ] $next:expr) => {
        $crate::value_items!(@list [ $($done,)* $crate::value::Value::from($next), ])
    };
}

/// Object-entry muncher behind [`value!`]. Not public API.
#[doc(hidden)]
#[macro_export]
macro_rules! value_entries {
    (@list [ $($done:expr,)* ]) => {
        ::std::vec![ $($done),* ]
    };
    (@list [ $($done:expr,)* ] $key:literal : null , $($rest:tt)*) => {
        $crate::value_entries!(@list [ $($done,)* ($key, $crate::value::Value::Null), ] $($rest)*)
    };
    (@list [ $($done:expr,)* ] $key:literal : null) => {
        $crate::value_entries!(@list [ $($done,)* ($key, $crate::value::Value::Null), ])
    };
    (@list [ $($done:expr,)* ] $key:literal : undefined , $($rest:tt)*) => {
        $crate::value_entries!(@list [ $($done,)* ($key, $crate::value::Value::Undefined), ] $($rest)*)
    };
    (@list [ $($done:expr,)* ] $key:literal : undefined) => {
        $crate::value_entries!(@list [ $($done,)* ($key, $crate::value::Value::Undefined), ])
    };
    (@list [ $($done:expr,)* ] $key:literal : { $($obj:tt)* } , $($rest:tt)*) => {
        $crate::value_entries!(@list [ $($done,)* ($key, $crate::value!({ $($obj)* })), ] $($rest)*)
    };
    (@list [ $($done:expr,)* ] $key:literal : { $($obj:tt)* }) => {
        $crate::value_entries!(@list [ $($done,)* ($key, $crate::value!({ $($obj)* })), ])
    };
    (@list [ $($done:expr,)* ] $key:literal : [ $($arr:tt)* ] , $($rest:tt)*) => {
        $crate::value_entries!(@list [ $($done,)* ($key, $crate::value!([ $($arr)* ])), ] $($rest)*)
    };
    (@list [ $($done:expr,)* ] $key:literal : [ $($arr:tt)* ]) => {
        $crate::value_entries!(@list [ $($done,)* ($key, $crate::value!([ $($arr)* ])), ])
    };
    (@list [ $($done:expr,)* ] $key:literal : $val:expr , $($rest:tt)*) => {
        $crate::value_entries!(@list [ $($done,)* ($key, $crate::value::Value::from($val)), ] $($rest)*)
    };
    (@list [ $($done:expr,)* ] $key:literal : $val:expr) => {
        $crate::value_entries!(@list [ $($done,)* ($key, $crate::value::Value::from($val)), ])
    };
}

/// Builds a [`RuleMap`](crate::engine::RuleMap) from `key => rule` pairs.
#[macro_export]
macro_rules! rules {
    ( $( $key:literal => $rule:expr ),* $(,)? ) => {{
        let mut map = $crate::engine::RuleMap::new();
        $( map.insert($key, $rule); )*
        map
    }};
}

// ============================================================================
// TESTS
// ============================================================================
