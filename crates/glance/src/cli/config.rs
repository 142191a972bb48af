//! The `glance config` command: inspect settings and scaffold the files
//! Glance reads at startup.

use clap::{Args, Subcommand};
use glance_core::credentials::{CREDENTIAL_KEY, SECRETS_TEMPLATE};
use glance_core::{Config, CredentialResolver, SecretStore};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration and where the API key comes from
    Show,

    /// Show config and secrets file paths
    Path,

    /// Write a default config file and a secrets template
    Init {
        /// Overwrite an existing config file (the secrets file is never overwritten)
        #[arg(long)]
        force: bool,
    },
}

/// What `config init` did to each file.
#[derive(Debug, PartialEq, Eq)]
pub enum FileAction {
    Created(PathBuf),
    Overwritten(PathBuf),
    Kept(PathBuf),
}

impl std::fmt::Display for FileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created(p) => write!(f, "created     {}", p.display()),
            Self::Overwritten(p) => write!(f, "overwritten {}", p.display()),
            Self::Kept(p) => write!(f, "kept        {}", p.display()),
        }
    }
}

pub fn execute(args: ConfigArgs) -> anyhow::Result<ExitCode> {
    match args.command {
        ConfigCommand::Show => show()?,
        ConfigCommand::Path => {
            let config = Config::load().unwrap_or_default();
            println!("config:  {}", Config::default_path().display());
            println!("secrets: {}", config.secrets_path().display());
        }
        ConfigCommand::Init { force } => {
            let config = Config::default();
            let actions = init_at(
                &config,
                &Config::default_path(),
                &config.secrets_path(),
                force,
            )?;
            for action in &actions {
                println!("{action}");
            }
            if matches!(actions.last(), Some(FileAction::Created(_))) {
                println!("\nAdd your {CREDENTIAL_KEY} to the secrets file to get started.");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// TOML on stdout; credential status on stderr so the TOML stays pipeable.
fn show() -> anyhow::Result<()> {
    let config = Config::load()?;
    println!("{}", config.to_toml()?);

    let secrets = SecretStore::load(&config.secrets_path())?;
    match CredentialResolver::standard(secrets).resolved_source() {
        Some(source) => eprintln!("{CREDENTIAL_KEY}: set (from {source})"),
        None => eprintln!("{CREDENTIAL_KEY}: not set"),
    }
    Ok(())
}

/// Write `config` to `config_path` and the secrets template to `secrets_path`.
///
/// An existing config file is an error unless `force` is set. An existing
/// secrets file is always kept.
fn init_at(
    config: &Config,
    config_path: &Path,
    secrets_path: &Path,
    force: bool,
) -> anyhow::Result<Vec<FileAction>> {
    let config_existed = config_path.exists();
    if config_existed && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    write_file(config_path, &config.to_toml()?)?;
    tracing::info!("Config file written to: {}", config_path.display());
    let config_action = if config_existed {
        FileAction::Overwritten(config_path.to_path_buf())
    } else {
        FileAction::Created(config_path.to_path_buf())
    };

    let secrets_action = if secrets_path.exists() {
        FileAction::Kept(secrets_path.to_path_buf())
    } else {
        write_file(secrets_path, SECRETS_TEMPLATE)?;
        restrict_permissions(secrets_path)?;
        FileAction::Created(secrets_path.to_path_buf())
    };

    Ok(vec![config_action, secrets_action])
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
