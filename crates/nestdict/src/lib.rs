//! Key path navigation over nested mappings and sequences.
//!
//! `nestdict` addresses deeply nested elements with a *key path*, an ordered
//! list of keys and indices, instead of chained single-step subscripting.
//!
//! # Core Concepts
//!
//! - **Value**: the nested document model; mappings keep insertion order and
//!   accept string or integer keys
//! - **Key / KeyPath**: typed path segments and the routes built from them
//! - **Container**: the capability mappings and sequences share; traversal is
//!   written once against it
//! - **resolve / set / insert / find_all**: the stateless traversal engine
//! - **NestedDict**: a wrapper that owns or borrows a structure and accepts
//!   string paths such as `"users.0.name"`
//!
//! # Quick Start
//!
//! ```
//! use nestdict::{keypath, NestedDict, Value};
//! use serde_json::json;
//!
//! let mut nd = NestedDict::try_from(json!({
//!     "k": 1,
//!     "sub": {"k": 2},
//!     "list": [{"k": 3}]
//! }))
//! .unwrap();
//!
//! // Typed or string paths
//! assert_eq!(nd.get(keypath!("list", 0, "k")).unwrap(), &Value::from(3));
//! assert_eq!(nd.get("sub.k").unwrap(), &Value::from(2));
//!
//! // Search the whole structure
//! assert_eq!(
//!     nd.find_all("k"),
//!     vec![keypath!("k"), keypath!("sub", "k"), keypath!("list", 0, "k")]
//! );
//!
//! // Autocreate missing mapping levels
//! nd.insert("a.b.c", "x").unwrap();
//! assert_eq!(nd.get("a.b.c").unwrap(), &Value::from("x"));
//! ```

mod container;
mod error;
mod key;
mod nested;
mod parse;
mod path;
mod resolve;
mod value;

// Core types
pub use container::{Container, Miss};
pub use error::{value_type_name, NestError, NestResult};
pub use key::Key;
pub use path::KeyPath;
pub use value::{Map, Value};

// Traversal
pub use resolve::{
    find_all, find_all_with_values, get, get_or, get_with, insert, resolve, resolve_mut, set,
    Found,
};

// String paths and configuration
pub use parse::{parse_key_path, ParseOptions, PathSpec, DEFAULT_SEPARATOR};

// Wrapper
pub use nested::NestedDict;
