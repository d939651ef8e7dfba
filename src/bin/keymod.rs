// Keymod CLI
// Inspect key resolution and settings from the command line

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use keymod_core::settings::default_settings_content;
use keymod_core::{Accent, Flags, KeyRegistry, Resolver, Settings};

/// On-screen keyboard modifier resolution
#[derive(Parser, Debug)]
#[command(name = "keymod")]
#[command(author = "keymod contributors")]
#[command(version)]
#[command(about = "Resolve keys under modifiers and inspect keyboard settings", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a key name under a set of modifiers
    Resolve {
        /// Registry name of the key (e.g. "a", "1", "up")
        name: String,

        /// Active flag, by name (shift, fn, accent_caron...). Repeatable.
        #[arg(short, long = "flag", value_name = "FLAG")]
        flags: Vec<String>,

        /// Pending accent (grave, acute, cedilla, superscript...)
        #[arg(short, long, value_name = "ACCENT")]
        accent: Option<String>,
    },

    /// Load a settings file and print the derived configuration
    CheckSettings {
        /// Settings file (defaults to ~/.config/keymod/settings.toml)
        #[arg(short, long, value_name = "SETTINGS")]
        settings: Option<PathBuf>,
    },

    /// Print a settings file with every default
    DefaultSettings,

    /// List every key known to the registry
    ListKeys,
}

fn parse_flags(names: &[String], accent: Option<&str>) -> Result<Flags> {
    let mut flags = Flags::empty();
    for name in names {
        flags |= Flags::from_name_ignore_case(name).ok_or_else(|| anyhow!("unknown flag: {}", name))?;
    }
    if let Some(accent) = accent {
        let accent: Accent = accent
            .parse()
            .map_err(|_| anyhow!("unknown accent: {}", accent))?;
        flags |= accent.flag();
    }
    Ok(flags)
}

fn resolve(name: &str, flags: Flags) -> Result<()> {
    let resolver = Resolver::new()?;
    match resolver.resolve_name(name, flags)? {
        Some(key) => {
            let character = key
                .character()
                .map(|c| format!("{:?}", c))
                .unwrap_or_else(|| "none".to_string());
            println!(
                "{} [{}] -> {} (symbol {:?}, char {}, event {})",
                name,
                flags,
                key.name(),
                key.symbol(),
                character,
                key.event()
            );
        }
        None => println!("{} [{}] -> removed", name, flags),
    }
    Ok(())
}

fn check_settings(path: Option<PathBuf>) -> Result<()> {
    let settings = match path {
        Some(path) => Settings::from_file(&path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => Settings::load_default()?,
    };
    let config = settings.to_configuration();

    match settings.source_path() {
        Some(path) => println!("Settings: {}", path.display()),
        None => println!("Settings: defaults"),
    }
    println!("Layout: {}", settings.layout());
    match settings.layout().numeric() {
        Some(numeric) => println!("Numeric pane: {}", numeric),
        None => println!("Numeric pane: system"),
    }
    println!("Theme: {}", settings.theme());
    println!("Lockable modifiers: {}", config.lockable_modifier_mask);
    match &config.extra_keys {
        Some(keys) => {
            let mut keys: Vec<&str> = keys.iter().map(String::as_str).collect();
            keys.sort_unstable();
            println!("Extra keys: {}", keys.join(" "));
        }
        None => println!("Extra keys: all"),
    }
    Ok(())
}

fn list_keys() {
    let registry = KeyRegistry::global();
    println!("{} keys:", registry.len());
    for key in registry.iter() {
        println!(
            "  {:<20} {:<8} {:<24} {}",
            key.name(),
            key.symbol(),
            key.event().to_string(),
            key.flags()
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::debug!("{:?}", args.command);

    match args.command {
        Command::Resolve {
            name,
            flags,
            accent,
        } => {
            let flags = parse_flags(&flags, accent.as_deref())?;
            resolve(&name, flags)
        }
        Command::CheckSettings { settings } => check_settings(settings),
        Command::DefaultSettings => {
            print!("{}", default_settings_content());
            Ok(())
        }
        Command::ListKeys => {
            list_keys();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_resolve() {
        let args = Args::parse_from(["keymod", "resolve", "a", "--flag", "shift", "-f", "fn"]);
        match args.command {
            Command::Resolve { name, flags, accent } => {
                assert_eq!(name, "a");
                assert_eq!(flags, vec!["shift", "fn"]);
                assert!(accent.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_check_settings() {
        let args = Args::parse_from(["keymod", "-v", "check-settings", "--settings", "/tmp/s.toml"]);
        assert!(args.verbose);
        match args.command {
            Command::CheckSettings { settings } => {
                assert_eq!(settings, Some(PathBuf::from("/tmp/s.toml")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_flags() {
        let flags = parse_flags(&["Shift".to_string()], Some("acute")).unwrap();
        assert_eq!(flags, Flags::SHIFT | Flags::ACCENT2);
        assert!(parse_flags(&["hyper".to_string()], None).is_err());
        assert!(parse_flags(&[], Some("breve")).is_err());
    }
}
