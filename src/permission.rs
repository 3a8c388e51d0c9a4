use serde::{Deserialize, Serialize};

/// Outcome of a microphone permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionState {
    Granted,
    Denied,
}

/// Gate consulted once before arming capture.
///
/// The actual grant/deny decision (a platform prompt, an OS policy) lives
/// behind this trait; the state machine only asks and never prompts.
pub trait PermissionGate: Send + Sync {
    /// Current grant state without prompting.
    fn current(&self) -> PermissionState;

    /// Request access, possibly prompting the user. Defaults to the current
    /// state for gates that cannot prompt.
    fn request(&self) -> PermissionState {
        self.current()
    }
}

/// Gate driven by configuration, for deployments without an interactive
/// permission prompt.
pub struct ConfigPermissionGate {
    allow: bool,
}

impl ConfigPermissionGate {
    pub fn new(allow: bool) -> Self {
        Self { allow }
    }
}

impl PermissionGate for ConfigPermissionGate {
    fn current(&self) -> PermissionState {
        if self.allow {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        }
    }
}
