//! objcache-core: Core traits and types for the objcache library
//!
//! Key derivation, group classification, the stored value type and its wire
//! codec, and the primitive store trait that backends implement.

mod error;
mod groups;
mod key;
mod traits;
mod types;
mod value;

pub use error::{CacheError, Result};
pub use groups::{
    DEFAULT_GLOBAL_GROUPS, DEFAULT_GROUP, DEFAULT_NON_PERSISTENT_GROUPS, GroupClassifier,
    IntoGroupNames, normalize_group,
};
pub use key::{KeyBuilder, Scope, ScopePrefix};
pub use traits::*;
pub use types::*;
pub use value::CacheValue;
