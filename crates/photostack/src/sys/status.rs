use crate::gui::stack::PhotoName;
use parking_lot::RwLock;
use serde::Serialize;
use stackring::{Direction, Role};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoStatus {
    pub name: PhotoName,
    pub slot: usize,
    pub role: Role,
}

/// What the socket reports for `status`. The GUI thread publishes a fresh copy
/// after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StackStatus {
    pub direction: Option<Direction>,
    pub photos: Vec<PhotoStatus>,
}

pub type SharedStatus = Arc<RwLock<StackStatus>>;

pub fn shared(status: StackStatus) -> SharedStatus {
    Arc::new(RwLock::new(status))
}

impl StackStatus {
    pub fn to_line(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json + "\n",
            Err(e) => {
                log::error!("Failed to serialize status: {}", e);
                "{}\n".to_string()
            }
        }
    }
}
