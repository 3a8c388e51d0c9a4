use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Description of a completed recording, produced once per session at stop.
///
/// Ownership of the output location transfers from the session to this value;
/// no other component may delete or rename the file while the session runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDescription {
    /// Platform-addressable path to the artifact file.
    pub location: PathBuf,

    /// Externally resolvable reference to the same file. Derived by the
    /// transport layer, never computed by the state machine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_address: Option<String>,

    /// Recording duration in milliseconds, absent if undeterminable.
    pub duration_millis: Option<u64>,

    /// File extension including the leading dot, e.g. `".m4a"`.
    pub file_extension: String,

    /// MIME type, e.g. `"audio/aac"`.
    pub mime_type: String,
}
