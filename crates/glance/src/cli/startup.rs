//! One-time session setup: credential resolution and client construction.

use glance_core::credentials::CREDENTIAL_KEY;
use glance_core::{Config, ConfigError, Credential, CredentialResolver, Glance, SecretStore};

/// Resolve the API credential, or fail with a remediation message.
///
/// Runs once per process, before any user interaction.
pub fn resolve_credential(config: &Config) -> anyhow::Result<Credential> {
    let secrets_path = config.secrets_path();
    let secrets = SecretStore::load(&secrets_path)?;
    let resolver = CredentialResolver::standard(secrets);

    resolver.resolve().ok_or_else(|| {
        let err = ConfigError::MissingCredential {
            key: CREDENTIAL_KEY.to_string(),
            secrets_file: secrets_path.display().to_string(),
        };
        anyhow::anyhow!(
            "{err}\n\n  \
             - Local development: add {CREDENTIAL_KEY}=... to a .env file or export it\n  \
             - Deployment: add {CREDENTIAL_KEY} = \"...\" to {}",
            secrets_path.display()
        )
    })
}

/// Build a session, resolving the credential first.
pub fn open_session(config: &Config) -> anyhow::Result<Glance> {
    let credential = resolve_credential(config)?;
    let glance = Glance::new(config.clone(), credential);
    tracing::debug!("Session ready (model: {})", glance.model_name());
    Ok(glance)
}
