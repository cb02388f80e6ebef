use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileSelectionConfig};
use super::models::AppConfig;
use crate::cli::ExtractArgs;
use crate::error::{CliError, Result};
use std::path::Path;
use tracing::warn;
use watershell::core::topology::water::WaterSelection;
use watershell::engine::config::{self as core_config, ShellMode, ShellSizePolicy};

pub fn build_config(args: &ExtractArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(args.config.as_deref(), &args.set_values)?;

    let mode = args.mode.or(file_config.mode).unwrap_or(defaults.mode);
    let shell_policy = if args.truncate_short_shells {
        ShellSizePolicy::Truncate
    } else {
        file_config.short_shells.unwrap_or(defaults.short_shells)
    };
    let selection = merge_selection(file_config.selection, defaults.selection);

    let core_config = core_config::ExtractionConfigBuilder::new()
        .mode(mode)
        .shell_policy(shell_policy)
        .selection(selection)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        core_config,
    })
}

/// Resolves only the water selection, for commands that never extract shells.
pub fn build_selection(config_path: Option<&Path>, set_values: &[String]) -> Result<WaterSelection> {
    let file_config = load_file_config(config_path, set_values)?;
    Ok(merge_selection(
        file_config.selection,
        DefaultsConfig::default().selection,
    ))
}

fn load_file_config(config_path: Option<&Path>, set_values: &[String]) -> Result<FileConfig> {
    let file_config = match config_path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    apply_set_values(file_config, set_values)
}

fn merge_selection(file_val: Option<FileSelectionConfig>, defaults: WaterSelection) -> WaterSelection {
    let file_val = file_val.unwrap_or_default();
    let selection = WaterSelection {
        oxygen_name: file_val.oxygen_name.unwrap_or(defaults.oxygen_name),
        water_residues: file_val.water_residues.unwrap_or(defaults.water_residues),
    };
    if selection.water_residues.is_empty() {
        warn!("The water residue list is empty; no atoms will be selected.");
    }
    selection
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();
        let value_str = value_str.trim();

        match key {
            "mode" => {
                config.mode = Some(
                    value_str
                        .parse::<ShellMode>()
                        .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))?,
                );
            }
            "short-shells" => {
                config.short_shells = Some(
                    value_str
                        .parse::<ShellSizePolicy>()
                        .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))?,
                );
            }
            "selection.oxygen-name" => {
                config
                    .selection
                    .get_or_insert_with(Default::default)
                    .oxygen_name = Some(value_str.to_string());
            }
            "selection.water-residues" => {
                config
                    .selection
                    .get_or_insert_with(Default::default)
                    .water_residues = Some(
                    value_str
                        .split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn base_extract_args() -> ExtractArgs {
        ExtractArgs {
            input: PathBuf::from("in.bgf"),
            output: PathBuf::from("out.csv"),
            config: None,
            mode: None,
            truncate_short_shells: false,
            set_values: vec![],
        }
    }

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("watershell.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let app = build_config(&base_extract_args()).expect("build ok");
        let cfg = app.core_config;

        assert_eq!(cfg.mode, ShellMode::All);
        assert_eq!(cfg.shell_policy, ShellSizePolicy::Reject);
        assert_eq!(cfg.selection, WaterSelection::default());
        assert_eq!(app.input_path, PathBuf::from("in.bgf"));
        assert_eq!(app.output_path, PathBuf::from("out.csv"));
    }

    #[test]
    fn file_values_are_used() {
        let dir = tempdir().unwrap();
        let mut args = base_extract_args();
        args.config = Some(write_config(
            dir.path(),
            r#"
            mode = "secondshell"
            short-shells = "truncate"

            [selection]
            oxygen-name = "OW"
            "#,
        ));

        let cfg = build_config(&args).expect("build ok").core_config;

        assert_eq!(cfg.mode, ShellMode::SecondShell);
        assert_eq!(cfg.shell_policy, ShellSizePolicy::Truncate);
        assert_eq!(cfg.selection.oxygen_name, "OW");
        assert_eq!(cfg.selection.water_residues, vec!["HOH", "SOL"]);
    }

    #[test]
    fn set_values_override_file() {
        let dir = tempdir().unwrap();
        let mut args = base_extract_args();
        args.config = Some(write_config(
            dir.path(),
            "mode = \"firstshell\"\n[selection]\nwater-residues = [\"HOH\"]\n",
        ));
        args.set_values = vec![
            "mode=bothshells".to_string(),
            "selection.water-residues=WAT, TIP3".to_string(),
            "short-shells=truncate".to_string(),
        ];

        let cfg = build_config(&args).expect("build ok").core_config;

        assert_eq!(cfg.mode, ShellMode::BothShells);
        assert_eq!(cfg.shell_policy, ShellSizePolicy::Truncate);
        assert_eq!(cfg.selection.water_residues, vec!["WAT", "TIP3"]);
    }

    #[test]
    fn cli_flags_override_set_values() {
        let mut args = base_extract_args();
        args.mode = Some(ShellMode::FirstShell);
        args.truncate_short_shells = true;
        args.set_values = vec!["mode=all".to_string(), "short-shells=reject".to_string()];

        let cfg = build_config(&args).expect("build ok").core_config;

        assert_eq!(cfg.mode, ShellMode::FirstShell);
        assert_eq!(cfg.shell_policy, ShellSizePolicy::Truncate);
    }

    #[test]
    fn invalid_set_values_are_config_errors() {
        for bad in ["mode", "mode=banana", "cutoff=3.0", "short-shells=maybe"] {
            let mut args = base_extract_args();
            args.set_values = vec![bad.to_string()];
            assert!(
                matches!(build_config(&args), Err(CliError::Config(_))),
                "expected config error for {bad}"
            );
        }
    }

    #[test]
    fn short_shells_set_value_accepts_strict_alias() {
        let mut args = base_extract_args();
        args.set_values = vec!["mode=firstshell".to_string(), "short-shells=Strict".to_string()];
        let cfg = build_config(&args).unwrap().core_config;
        assert_eq!(cfg.shell_policy, ShellSizePolicy::Reject);

        args.set_values = vec!["short-shells=bogus".to_string()];
        match build_config(&args) {
            Err(CliError::Config(message)) => {
                assert!(message.contains("short-shells"));
                assert!(message.contains("expected one of: reject, truncate"));
            }
            Err(other) => panic!("expected config error, got {}", other),
            Ok(_) => panic!("expected config error for an unknown policy"),
        }
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let mut args = base_extract_args();
        args.config = Some(PathBuf::from("/nonexistent/watershell.toml"));
        assert!(matches!(build_config(&args), Err(CliError::Io(_))));
    }

    #[test]
    fn build_selection_merges_file_and_overrides() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "[selection]\noxygen-name = \"OW\"\n");

        let selection =
            build_selection(Some(&path), &["selection.water-residues=SOL".to_string()]).unwrap();

        assert_eq!(selection, WaterSelection::new("OW", &["SOL"]));
    }
}
