use crate::core::topology::water::WaterSelection;
use phf::{Map, phf_map};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of nearest neighbours that form a water's first solvation shell.
pub const FIRST_SHELL_SIZE: usize = 4;

/// Smallest water count for which a full first shell exists (self + 4 neighbours).
pub const MIN_WATERS_FOR_SHELLS: usize = FIRST_SHELL_SIZE + 1;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Selects which view of the distance tensor shell extraction returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ShellMode {
    /// All distances to the other waters, ascending.
    All,
    /// Distances to the four nearest waters, nearest first.
    FirstShell,
    /// Distances from the water to each first-shell neighbour's own first shell.
    SecondShell,
    /// `FirstShell` followed by `SecondShell`.
    BothShells,
}

static MODE_NAMES: Map<&'static str, ShellMode> = phf_map! {
    "all" => ShellMode::All,
    "firstshell" => ShellMode::FirstShell,
    "secondshell" => ShellMode::SecondShell,
    "bothshells" => ShellMode::BothShells,
};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Invalid shell mode '{0}'; expected one of: all, firstshell, secondshell, bothshells")]
pub struct ParseShellModeError(pub String);

impl ShellMode {
    pub const ALL_MODES: [ShellMode; 4] = [
        ShellMode::All,
        ShellMode::FirstShell,
        ShellMode::SecondShell,
        ShellMode::BothShells,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShellMode::All => "all",
            ShellMode::FirstShell => "firstshell",
            ShellMode::SecondShell => "secondshell",
            ShellMode::BothShells => "bothshells",
        }
    }

    /// Whether the mode needs first-shell neighbour lists.
    pub fn uses_shells(&self) -> bool {
        !matches!(self, ShellMode::All)
    }

    /// Number of distances reported per water for `n_waters` waters and a
    /// first shell of `shell_size` neighbours.
    pub fn width(&self, n_waters: usize, shell_size: usize) -> usize {
        match self {
            ShellMode::All => n_waters.saturating_sub(1),
            ShellMode::FirstShell => shell_size,
            ShellMode::SecondShell => shell_size * shell_size,
            ShellMode::BothShells => shell_size + shell_size * shell_size,
        }
    }
}

impl FromStr for ShellMode {
    type Err = ParseShellModeError;

    /// Parses a mode name case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MODE_NAMES
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ParseShellModeError(s.to_string()))
    }
}

impl TryFrom<String> for ShellMode {
    type Error = ParseShellModeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ShellMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How shell modes treat systems with fewer than five waters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShellSizePolicy {
    /// Reject the input with `InsufficientShellSize`.
    #[default]
    #[serde(alias = "strict")]
    Reject,
    /// Shrink the first shell to `min(4, waters - 1)` neighbours for every water.
    Truncate,
}

static POLICY_NAMES: Map<&'static str, ShellSizePolicy> = phf_map! {
    "reject" => ShellSizePolicy::Reject,
    "strict" => ShellSizePolicy::Reject,
    "truncate" => ShellSizePolicy::Truncate,
};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Invalid short-shell policy '{0}'; expected one of: reject, truncate")]
pub struct ParseShellSizePolicyError(pub String);

impl FromStr for ShellSizePolicy {
    type Err = ParseShellSizePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        POLICY_NAMES
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ParseShellSizePolicyError(s.to_string()))
    }
}

impl ShellSizePolicy {
    /// First-shell size used for `n_waters` waters, or `None` if the policy
    /// rejects the system.
    pub fn shell_size(&self, n_waters: usize) -> Option<usize> {
        if n_waters >= MIN_WATERS_FOR_SHELLS {
            return Some(FIRST_SHELL_SIZE);
        }
        match self {
            ShellSizePolicy::Reject => None,
            ShellSizePolicy::Truncate => Some(n_waters.saturating_sub(1)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    pub mode: ShellMode,
    pub shell_policy: ShellSizePolicy,
    pub selection: WaterSelection,
}

#[derive(Default)]
pub struct ExtractionConfigBuilder {
    mode: Option<ShellMode>,
    shell_policy: Option<ShellSizePolicy>,
    selection: Option<WaterSelection>,
}

impl ExtractionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: ShellMode) -> Self {
        self.mode = Some(mode);
        self
    }
    pub fn shell_policy(mut self, policy: ShellSizePolicy) -> Self {
        self.shell_policy = Some(policy);
        self
    }
    pub fn selection(mut self, selection: WaterSelection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn build(self) -> Result<ExtractionConfig, ConfigError> {
        Ok(ExtractionConfig {
            mode: self.mode.ok_or(ConfigError::MissingParameter("mode"))?,
            shell_policy: self.shell_policy.unwrap_or_default(),
            selection: self.selection.unwrap_or_default(),
        })
    }
}
