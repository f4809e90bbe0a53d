//! Facade configuration

use objcache_core::Scope;
use serde::Deserialize;

/// Installation settings consumed once at construction
///
/// The salt and scope decide every derived key, so changing either one on a
/// running installation orphans everything already stored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Installation-wide salt prepended to every derived key
    pub salt: String,
    /// Tenant or table namespace
    pub scope: Scope,
    /// Global tables are shared with other installations, so global groups
    /// drop the table namespace
    pub shared_global_tables: bool,
    /// Extra global groups on top of the defaults
    pub global_groups: Vec<String>,
    /// Extra non-persistent groups on top of the defaults
    pub non_persistent_groups: Vec<String>,
}

impl CacheConfig {
    /// Config for one tenant of a multi-tenant installation
    pub fn tenant(id: impl Into<String>) -> Self {
        Self {
            scope: Scope::Tenant(id.into()),
            ..Default::default()
        }
    }

    /// Config for a single installation identified by its table namespace
    pub fn table(prefix: impl Into<String>) -> Self {
        Self {
            scope: Scope::Table(prefix.into()),
            ..Default::default()
        }
    }

    /// Set the key salt
    pub fn salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = salt.into();
        self
    }

    /// Share global groups with other installations using the same tables
    pub fn shared_global_tables(mut self, shared: bool) -> Self {
        self.shared_global_tables = shared;
        self
    }

    /// Add global groups
    pub fn global_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.global_groups.extend(groups.into_iter().map(Into::into));
        self
    }

    /// Add non-persistent groups
    pub fn non_persistent_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_persistent_groups
            .extend(groups.into_iter().map(Into::into));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let config = CacheConfig::tenant("4")
            .salt("s1")
            .global_groups(["networks"])
            .non_persistent_groups(vec!["plugins".to_string()]);

        assert_eq!(config.scope, Scope::Tenant("4".into()));
        assert_eq!(config.salt, "s1");
        assert_eq!(config.global_groups, vec!["networks"]);
        assert_eq!(config.non_persistent_groups, vec!["plugins"]);
    }

    #[test]
    fn test_deserialize() {
        let config: CacheConfig = serde_json::from_str(
            r#"{
                "salt": "prod_",
                "scope": {"table": "shop_"},
                "shared_global_tables": true,
                "non_persistent_groups": ["sessions"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.salt, "prod_");
        assert_eq!(config.scope, Scope::Table("shop_".into()));
        assert!(config.shared_global_tables);
        assert!(config.global_groups.is_empty());
        assert_eq!(config.non_persistent_groups, vec!["sessions"]);
    }
}
