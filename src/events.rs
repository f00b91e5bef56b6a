// Events recorded in the selection session log
//
// One JSON object per line, tagged by `type`, so a session can be replayed
// or inspected with jq.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// First line of every session log
    SessionStarted {
        timestamp: DateTime<Utc>,
        session_id: String,
        version: String,
        sed_source: String,
        uncertainty_source: String,
        initial_galaxy: Option<String>,
    },

    /// A galaxy was selected
    GalaxySelected {
        timestamp: DateTime<Utc>,
        /// 1-based selection counter within the session
        sequence: u64,
        galaxy: String,
    },
}

impl SelectionEvent {
    pub fn galaxy_selected(sequence: u64, galaxy: impl Into<String>) -> Self {
        Self::GalaxySelected {
            timestamp: Utc::now(),
            sequence,
            galaxy: galaxy.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_json_shape() {
        let event = SelectionEvent::galaxy_selected(3, "G12.DR1.3786");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "galaxy_selected");
        assert_eq!(json["sequence"], 3);
        assert_eq!(json["galaxy"], "G12.DR1.3786");

        let back: SelectionEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
