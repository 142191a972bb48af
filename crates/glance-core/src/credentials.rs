//! API credential lookup.
//!
//! The credential is resolved exactly once at startup from an ordered list of
//! sources. The first source holding a non-empty value wins; values are never
//! merged across sources.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Key under which the credential is stored in every source.
pub const CREDENTIAL_KEY: &str = "GOOGLE_API_KEY";

/// Opaque API token. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for placing in request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// A place a credential may be stored.
pub trait CredentialSource: Send + Sync {
    /// Source name for logging and remediation messages.
    fn name(&self) -> &str;

    /// Look up `key`, returning `None` when absent.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Starting contents for a new secrets file. The key is commented out so the
/// file resolves to nothing until it is filled in.
pub const SECRETS_TEMPLATE: &str = "\
# Glance secrets. Keep this file out of version control.
#
# Values here take precedence over the environment.
# GOOGLE_API_KEY = \"your-api-key\"
";

/// Deployment-managed secrets held in a flat TOML file.
///
/// ```toml
/// GOOGLE_API_KEY = "..."
/// ```
#[derive(Debug, Default)]
pub struct SecretStore {
    path: Option<PathBuf>,
    values: HashMap<String, String>,
}

impl SecretStore {
    /// Load secrets from `path`. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No secrets file at {}", path.display());
            return Ok(Self {
                path: Some(path.to_path_buf()),
                values: HashMap::new(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let table: toml::Table = toml::from_str(&content)?;

        // Only string values are secrets; nested tables and numbers are ignored.
        let values = table
            .into_iter()
            .filter_map(|(k, v)| match v {
                toml::Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect();

        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    /// Build a store from in-memory pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            path: None,
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl CredentialSource for SecretStore {
    fn name(&self) -> &str {
        "secrets file"
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// The process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct Environment;

impl CredentialSource for Environment {
    fn name(&self) -> &str {
        "environment"
    }

    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Resolves the credential from an ordered list of sources.
pub struct CredentialResolver {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl CredentialResolver {
    /// Create a resolver that consults `sources` in order.
    pub fn new(sources: Vec<Box<dyn CredentialSource>>) -> Self {
        Self { sources }
    }

    /// The standard order: secrets file first, then the environment.
    pub fn standard(secrets: SecretStore) -> Self {
        Self::new(vec![Box::new(secrets), Box::new(Environment)])
    }

    /// Return the first non-empty value for [`CREDENTIAL_KEY`].
    pub fn resolve(&self) -> Option<Credential> {
        self.find().map(|(source, credential)| {
            tracing::debug!("Using {CREDENTIAL_KEY} from {source}");
            credential
        })
    }

    /// Name of the source [`resolve`](Self::resolve) would take the value from.
    pub fn resolved_source(&self) -> Option<&str> {
        self.find().map(|(source, _)| source)
    }

    fn find(&self) -> Option<(&str, Credential)> {
        self.sources.iter().find_map(|source| {
            let value = source.lookup(CREDENTIAL_KEY)?;
            let value = value.trim();
            if value.is_empty() {
                tracing::debug!("{} has an empty {CREDENTIAL_KEY}, skipping", source.name());
                return None;
            }
            Some((source.name(), Credential::new(value)))
        })
    }

    /// Names of the consulted sources, in order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }
}
