//! Command-line interface for layerterm.
//!
//! Loads settings documents in phase order and inspects the resulting
//! profiles: listing, showing effective values, identifiers and stubs.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use layerterm_config::{ResolvedProfile, format_guid, generate_guid, parse_guid};
use serde_json::Value;

use crate::debug::DebugLevel;
use crate::settings::{LoadPhase, Settings, SettingsDocument, SettingsLoader};

/// layerterm - layered terminal profile settings
#[derive(Parser, Debug)]
#[command(name = "layerterm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Built-in defaults document (applied first)
    #[arg(long = "defaults", value_name = "FILE")]
    pub defaults: Vec<PathBuf>,

    /// User settings document (applied after defaults; carries loader options)
    #[arg(long = "user", value_name = "FILE")]
    pub user: Option<PathBuf>,

    /// Dynamic profile fragments (applied last)
    #[arg(long = "dynamic", value_name = "FILE")]
    pub dynamic: Vec<PathBuf>,

    /// Debug log level 0-4, overriding LAYERTERM_DEBUG_LEVEL
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<u8>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List profiles in display order
    List {
        /// Include hidden profiles
        #[arg(short, long)]
        all: bool,
    },
    /// Show the effective settings of one profile
    Show {
        /// Profile name (case-insensitive) or identifier
        profile: String,

        /// Print only the explicitly set fields instead of effective values
        #[arg(long)]
        sparse: bool,
    },
    /// Print stubs for dynamic profiles the user document does not mention yet
    Stubs,
    /// Print the identifier generated for a name and source
    Guid {
        name: String,

        #[arg(long, default_value = "")]
        source: String,
    },
    /// Print the merged settings document
    Dump {
        /// Write the document to this file instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Debug level requested on the command line
    pub fn debug_level(&self) -> Option<DebugLevel> {
        self.log_level
            .map(|level| DebugLevel::parse(&level.to_string()))
    }
}

/// Load every document named on the command line
pub fn load_settings(cli: &Cli) -> Result<(Settings, Vec<Value>)> {
    let mut loader = SettingsLoader::new();
    for path in &cli.defaults {
        loader.add_document(LoadPhase::Defaults, SettingsDocument::load_file(path)?);
    }
    let mut user_docs = Vec::new();
    if let Some(path) = &cli.user {
        let document = SettingsDocument::load_file(path)?;
        user_docs = document.profiles.clone();
        loader.add_document(LoadPhase::User, document);
    }
    for path in &cli.dynamic {
        loader.add_document(LoadPhase::Dynamic, SettingsDocument::load_file(path)?);
    }
    Ok((loader.load(), user_docs))
}

/// Run one command, writing its output to `out`
pub fn execute(cli: &Cli, out: &mut impl Write) -> Result<()> {
    if let Commands::Guid { name, source } = &cli.command {
        writeln!(out, "{}", format_guid(&generate_guid(name, source)))?;
        return Ok(());
    }

    let (settings, user_docs) = load_settings(cli)?;
    for warning in settings.warnings() {
        eprintln!("layerterm: warning: {warning}");
    }

    match &cli.command {
        Commands::List { all } => {
            let profiles = if *all {
                settings.profiles().profiles_ordered()
            } else {
                settings.profiles().visible_profiles()
            };
            for profile in profiles {
                write_summary(out, &profile)?;
            }
        }
        Commands::Show { profile, sparse } => {
            let resolved = find_profile(&settings, profile)?;
            let json = if *sparse {
                resolved.profile().to_json()
            } else {
                resolved.to_effective_json()
            };
            write_json(out, &json)?;
        }
        Commands::Stubs => {
            write_json(out, &Value::Array(settings.dynamic_profile_stubs(&user_docs)))?;
        }
        Commands::Dump { output: Some(path) } => save_document(&settings, path)?,
        Commands::Dump { output: None } => write_json(out, &settings.to_document())?,
        Commands::Guid { .. } => {}
    }
    Ok(())
}

fn find_profile<'a>(settings: &'a Settings, key: &str) -> Result<ResolvedProfile<'a>> {
    let by_guid = parse_guid(key).and_then(|guid| settings.profiles().resolved_by_guid(&guid));
    match by_guid.or_else(|| settings.profiles().find_by_name(key)) {
        Some(profile) => Ok(profile),
        None => bail!("no profile named or identified by '{key}'"),
    }
}

fn write_summary(out: &mut impl Write, profile: &ResolvedProfile<'_>) -> Result<()> {
    let source = profile.source();
    writeln!(
        out,
        "{}  {:<10} {}{}{}",
        format_guid(&profile.guid()),
        profile.origin().display_name(),
        profile.display_label(),
        if source.is_empty() {
            String::new()
        } else {
            format!("  [{source}]")
        },
        if profile.hidden() { "  (hidden)" } else { "" }
    )?;
    Ok(())
}

fn write_json(out: &mut impl Write, value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    writeln!(out, "{text}")?;
    Ok(())
}

/// Save a settings document to disk, creating parent directories
pub fn save_document(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {:?}", parent))?;
    }
    let contents = serde_json::to_string_pretty(&settings.to_document())
        .context("Failed to serialize settings")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write settings to {:?}", path))?;
    log::info!("Saved {} profiles to {:?}", settings.profiles().len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        execute(&cli, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_guid_command() {
        let output = run(&["layerterm", "guid", "Ubuntu", "--source", "Canonical.Ubuntu"]);
        assert_eq!(
            output.trim(),
            format_guid(&generate_guid("Ubuntu", "Canonical.Ubuntu"))
        );
    }

    #[test]
    fn test_list_without_documents_is_empty() {
        assert_eq!(run(&["layerterm", "list"]), "");
    }

    #[test]
    fn test_parse_repeated_paths() {
        let cli = Cli::try_parse_from([
            "layerterm",
            "--defaults",
            "a.json",
            "--defaults",
            "b.json",
            "--user",
            "u.json",
            "--log-level",
            "3",
            "show",
            "Foo",
            "--sparse",
        ])
        .unwrap();
        assert_eq!(cli.defaults.len(), 2);
        assert_eq!(cli.user, Some(PathBuf::from("u.json")));
        assert_eq!(cli.debug_level(), Some(DebugLevel::Debug));
        assert!(matches!(cli.command, Commands::Show { sparse: true, .. }));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let cli = Cli::try_parse_from(["layerterm", "--user", "/nonexistent/layerterm.json", "list"])
            .unwrap();
        let mut out = Vec::new();
        let err = execute(&cli, &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read settings"));
    }
}
