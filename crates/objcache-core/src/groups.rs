//! Group classification
//!
//! Every group is in exactly one routing class: global, non-persistent, or
//! local (the default for anything not listed). Classes only grow; there is
//! no way to take a group back out once it was added.

use std::collections::HashSet;

/// Group used when the caller passes an empty group name
pub const DEFAULT_GROUP: &str = "default";

/// Groups shared by every tenant of an installation
pub const DEFAULT_GLOBAL_GROUPS: &[&str] = &[
    "users",
    "userlogins",
    "usermeta",
    "site-options",
    "site-lookup",
    "blog-lookup",
    "blog-details",
    "rss",
];

/// Groups whose values only make sense for the current process
pub const DEFAULT_NON_PERSISTENT_GROUPS: &[&str] = &["comment", "counts"];

/// Map an empty group name onto [`DEFAULT_GROUP`]
pub fn normalize_group(group: &str) -> &str {
    if group.is_empty() { DEFAULT_GROUP } else { group }
}

/// Anything that can name one or more groups
///
/// Lets the classification methods take either a single name or a collection.
pub trait IntoGroupNames {
    fn into_group_names(self) -> Vec<String>;
}

impl IntoGroupNames for &str {
    fn into_group_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoGroupNames for String {
    fn into_group_names(self) -> Vec<String> {
        vec![self]
    }
}

impl<S: Into<String>> IntoGroupNames for Vec<S> {
    fn into_group_names(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String>, const N: usize> IntoGroupNames for [S; N] {
    fn into_group_names(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String> + Clone> IntoGroupNames for &[S] {
    fn into_group_names(self) -> Vec<String> {
        self.iter().cloned().map(Into::into).collect()
    }
}

/// Global and non-persistent group sets
#[derive(Debug, Clone)]
pub struct GroupClassifier {
    global: HashSet<String>,
    non_persistent: HashSet<String>,
}

impl Default for GroupClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupClassifier {
    /// Classifier seeded with the default global and non-persistent lists
    pub fn new() -> Self {
        Self {
            global: DEFAULT_GLOBAL_GROUPS.iter().map(|g| g.to_string()).collect(),
            non_persistent: DEFAULT_NON_PERSISTENT_GROUPS
                .iter()
                .map(|g| g.to_string())
                .collect(),
        }
    }

    /// Mark groups as shared across tenants
    pub fn add_global_groups(&mut self, names: impl IntoGroupNames) {
        self.global.extend(names.into_group_names());
    }

    /// Mark groups as process-local
    pub fn add_non_persistent_groups(&mut self, names: impl IntoGroupNames) {
        self.non_persistent.extend(names.into_group_names());
    }

    pub fn is_global(&self, group: &str) -> bool {
        self.global.contains(normalize_group(group))
    }

    pub fn is_non_persistent(&self, group: &str) -> bool {
        self.non_persistent.contains(normalize_group(group))
    }
}
