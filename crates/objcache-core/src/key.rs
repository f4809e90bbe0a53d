//! Derived key construction
//!
//! A derived key is `salt + prefix + group + ":" + raw_key` with every
//! whitespace character removed. The prefix comes from the scope: global
//! groups use the global prefix, all other groups the local (tenant) one.
//!
//! Stripping whitespace means raw keys that differ only in whitespace map to
//! the same derived key. That collision is accepted.

use serde::{Deserialize, Serialize};

use crate::groups::{GroupClassifier, normalize_group};

/// Installation scope that separates co-hosted installations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Multi-tenant installation; the id namespaces local groups
    Tenant(String),
    /// Single installation identified by its table namespace
    Table(String),
}

impl Default for Scope {
    fn default() -> Self {
        Scope::Table("cache".to_string())
    }
}

/// Global and local key prefixes, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopePrefix {
    global: String,
    local: String,
}

impl ScopePrefix {
    /// Compute prefixes for a scope
    ///
    /// Tenants share global groups, so a tenant scope has an empty global
    /// prefix. A table scope keeps its table namespace on global groups unless
    /// `shared_global_tables` says the global tables are shared with other
    /// installations.
    pub fn new(scope: &Scope, shared_global_tables: bool) -> Self {
        match scope {
            Scope::Tenant(id) => Self {
                global: String::new(),
                local: format!("{}:", id),
            },
            Scope::Table(prefix) => Self {
                global: if shared_global_tables {
                    String::new()
                } else {
                    prefix.clone()
                },
                local: format!("{}:", prefix),
            },
        }
    }

    pub fn global(&self) -> &str {
        &self.global
    }

    pub fn local(&self) -> &str {
        &self.local
    }
}

/// Builds derived keys from raw keys and groups
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    salt: String,
    prefix: ScopePrefix,
}

impl KeyBuilder {
    pub fn new(salt: impl Into<String>, prefix: ScopePrefix) -> Self {
        Self {
            salt: salt.into(),
            prefix,
        }
    }

    pub fn prefix(&self) -> &ScopePrefix {
        &self.prefix
    }

    /// Derive the storage key for `raw_key` in `group`
    pub fn build_key(&self, raw_key: &str, group: &str, groups: &GroupClassifier) -> String {
        let group = normalize_group(group);
        let prefix = if groups.is_global(group) {
            self.prefix.global()
        } else {
            self.prefix.local()
        };

        let mut key = String::with_capacity(
            self.salt.len() + prefix.len() + group.len() + raw_key.len() + 1,
        );
        let parts = [self.salt.as_str(), prefix, group, ":", raw_key];
        for part in parts {
            key.extend(part.chars().filter(|c| !c.is_whitespace()));
        }
        key
    }
}
