// Settings storage - durable configuration backed by a single JSON file

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::settings::BotSettings;

/// Failures while reading or writing the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// File-backed store for [`BotSettings`]
///
/// The log-routing and role-grant groups are updated independently, so every
/// mutation goes through a full load-patch-write cycle: whichever group is
/// not being touched keeps its stored values.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the full record. A missing file is a normal cold start and
    /// yields the all-absent default; a file that exists but does not
    /// parse is an error, never a silent reset.
    pub fn load(&self) -> Result<BotSettings, SettingsError> {
        if !self.path.exists() {
            return Ok(BotSettings::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Load-patch-write. All setters and clearers funnel through here.
    fn update(&self, patch: impl FnOnce(&mut BotSettings)) -> Result<(), SettingsError> {
        let mut settings = self.load()?;
        patch(&mut settings);
        let raw = serde_json::to_string(&settings)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    pub fn load_log_routing(&self) -> Result<(Option<u64>, Option<u64>), SettingsError> {
        let settings = self.load()?;
        Ok((settings.log_text_channel_id, settings.log_forum_channel_id))
    }

    pub fn save_log_routing(
        &self,
        text_id: Option<u64>,
        forum_id: Option<u64>,
    ) -> Result<(), SettingsError> {
        self.update(|settings| {
            settings.log_text_channel_id = text_id;
            settings.log_forum_channel_id = forum_id;
        })
    }

    pub fn clear_log_routing(&self) -> Result<(), SettingsError> {
        self.update(|settings| {
            settings.log_text_channel_id = None;
            settings.log_forum_channel_id = None;
        })
    }

    pub fn load_role_settings(&self) -> Result<(Option<u64>, Option<u64>), SettingsError> {
        let settings = self.load()?;
        Ok((
            settings.role_settings.forum_channel_id,
            settings.role_settings.role_id,
        ))
    }

    pub fn save_role_settings(&self, forum_id: u64, role_id: u64) -> Result<(), SettingsError> {
        self.update(|settings| {
            settings.role_settings.forum_channel_id = Some(forum_id);
            settings.role_settings.role_id = Some(role_id);
        })
    }

    pub fn clear_role_settings(&self) -> Result<(), SettingsError> {
        self.update(|settings| {
            settings.role_settings.forum_channel_id = None;
            settings.role_settings.role_id = None;
        })
    }
}
