// Centralized configuration for Kanban Bot

/// Settings file path used when SETTINGS_FILE is not set
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Discord embed colors
pub mod colors {
    pub const PRIMARY: u32 = 0x00bfff;
    pub const INFO: u32 = 0x3498db;
}
