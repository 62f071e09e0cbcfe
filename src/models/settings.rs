use serde::{Deserialize, Serialize};

/// Role-grant settings, nested under `role_settings` in the backing file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSettings {
    /// Forum channel whose posts trigger the grant
    pub forum_channel_id: Option<u64>,
    /// Role handed to posting users
    pub role_id: Option<u64>,
}

/// Persisted bot configuration
///
/// Every field is optional; an absent value means the feature is off.
/// `log_forum_channel_id` is informational only, the router never reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotSettings {
    /// Channel that receives mirrored forum posts
    pub log_text_channel_id: Option<u64>,
    /// Forum channel being watched for the log feature
    pub log_forum_channel_id: Option<u64>,
    /// May be absent entirely in files written before the role feature was configured
    #[serde(default)]
    pub role_settings: RoleSettings,
}
