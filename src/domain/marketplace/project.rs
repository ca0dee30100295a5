//! Project record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ProjectId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Open,
    InProgress,
    Closed,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Open => "open",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(ProjectStatus::Open),
            "in_progress" => Some(ProjectStatus::InProgress),
            "closed" => Some(ProjectStatus::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project posted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub client_id: UserId,
    pub title: String,
    pub status: ProjectStatus,
    pub is_deleted: bool,
}

impl Project {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.client_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_storage_value() {
        for status in [ProjectStatus::Open, ProjectStatus::InProgress, ProjectStatus::Closed] {
            assert_eq!(ProjectStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ProjectStatus::parse("archived"), None);
    }

    #[test]
    fn ownership_compares_client_id() {
        let project = Project {
            id: ProjectId::new("project-1").unwrap(),
            client_id: UserId::new("client-1").unwrap(),
            title: "Logo design".to_string(),
            status: ProjectStatus::Open,
            is_deleted: false,
        };
        assert!(project.is_owned_by(&UserId::new("client-1").unwrap()));
        assert!(!project.is_owned_by(&UserId::new("client-2").unwrap()));
    }
}
