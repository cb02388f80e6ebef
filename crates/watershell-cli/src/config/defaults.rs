use watershell::core::topology::water::WaterSelection;
use watershell::engine::config::{ShellMode, ShellSizePolicy};

pub struct DefaultsConfig {
    pub mode: ShellMode,
    pub short_shells: ShellSizePolicy,
    pub selection: WaterSelection,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mode: ShellMode::All,
            short_shells: ShellSizePolicy::Reject,
            selection: WaterSelection::default(),
        }
    }
}
