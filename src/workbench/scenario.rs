// SPDX-License-Identifier: MIT

//! Scenario files: a server workflow list plus a script of tracker events
//!
//! ```yaml
//! workflows:
//!   - id: 5
//!     name: old
//! events:
//!   - begin-edit: { step: rename, id: 5, changes: { name: A } }
//!   - end-edit: { step: rename }
//! ```
//!
//! End events name the `step` of the begin they complete. Replay stops at the
//! first event the tracker rejects, such as ending a step twice.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::client::error::SyncError;
use crate::workbench::workflows::tracker::WorkflowEdits;
use crate::workbench::workflows::types::{Changes, WorkflowId, WorkflowSummary};
use crate::workbench::workflows::EditTicket;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub workflows: Vec<WorkflowSummary>,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioEvent {
    BeginEdit {
        step: String,
        id: WorkflowId,
        #[serde(default)]
        changes: Changes,
    },
    EndEdit {
        step: String,
        #[serde(default)]
        changes: Changes,
    },
    BeginDuplicate {
        step: String,
        id: WorkflowId,
    },
    EndDuplicate {
        step: String,
        workflow: WorkflowSummary,
    },
}

impl ScenarioEvent {
    pub fn step(&self) -> &str {
        match self {
            ScenarioEvent::BeginEdit { step, .. }
            | ScenarioEvent::EndEdit { step, .. }
            | ScenarioEvent::BeginDuplicate { step, .. }
            | ScenarioEvent::EndDuplicate { step, .. } => step,
        }
    }
}

impl Scenario {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SyncError> {
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    pub fn parse_yaml(content: &str) -> Result<Self, SyncError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Run every event through a fresh tracker and return the resulting list
    pub async fn replay(&self) -> Result<Vec<WorkflowSummary>, SyncError> {
        let edits = WorkflowEdits::new();
        let mut tickets: HashMap<&str, EditTicket> = HashMap::new();

        let ticket_for = |tickets: &HashMap<&str, EditTicket>, step: &str| {
            tickets
                .get(step)
                .copied()
                .ok_or_else(|| SyncError::Scenario(format!("end of unknown step '{}'", step)))
        };

        for (i, event) in self.events.iter().enumerate() {
            match event {
                ScenarioEvent::BeginEdit { step, id, changes } => {
                    let ticket = edits.on_workflow_changing(*id, changes.clone())?;
                    tickets.insert(step.as_str(), ticket);
                }
                ScenarioEvent::EndEdit { step, changes } => {
                    let ticket = ticket_for(&tickets, step)?;
                    edits.on_workflow_changed(ticket, changes.clone())?;
                }
                ScenarioEvent::BeginDuplicate { step, id } => {
                    let ticket = edits.on_workflow_duplicating(*id)?;
                    tickets.insert(step.as_str(), ticket);
                }
                ScenarioEvent::EndDuplicate { step, workflow } => {
                    let ticket = ticket_for(&tickets, step)?;
                    edits.on_workflow_duplicated(ticket, workflow.clone())?;
                }
            }

            edits.store().flush().await?;
            if edits.store().dropped() > 0 {
                return Err(SyncError::Scenario(format!(
                    "event {} (step '{}') was rejected by the tracker",
                    i + 1,
                    event.step()
                )));
            }
        }

        Ok(edits.edited_workflows(&self.workflows).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario() {
        let yaml = r#"
workflows:
  - id: 5
    name: old
    public: false
events:
  - begin-edit: { step: rename, id: 5, changes: { name: A } }
  - end-edit: { step: rename }
  - begin-duplicate: { step: dup, id: 5 }
  - end-duplicate:
      step: dup
      workflow: { id: 9, name: Copy of A }
"#;
        let scenario = Scenario::parse_yaml(yaml).unwrap();
        assert_eq!(scenario.workflows.len(), 1);
        assert_eq!(scenario.events.len(), 4);
        assert!(matches!(
            &scenario.events[0],
            ScenarioEvent::BeginEdit { id, .. } if *id == WorkflowId(5)
        ));
        assert!(matches!(
            &scenario.events[1],
            ScenarioEvent::EndEdit { changes, .. } if changes.is_empty()
        ));
    }

    #[tokio::test]
    async fn test_replay() {
        let yaml = r#"
workflows:
  - { id: 5, name: old }
  - { id: 6, name: gone }
events:
  - begin-edit: { step: rename, id: 5, changes: { name: A } }
  - begin-edit: { step: delete, id: 6, changes: { isDeleted: true } }
  - end-edit: { step: delete }
  - begin-duplicate: { step: dup, id: 5 }
  - end-duplicate: { step: dup, workflow: { id: 9, name: Copy of A } }
"#;
        let view = Scenario::parse_yaml(yaml).unwrap().replay().await.unwrap();
        let names: Vec<&str> = view.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Copy of A", "A"]);
        assert_eq!(view[1].n_pending_changes, 1);
    }

    #[tokio::test]
    async fn test_replay_unknown_step() {
        let yaml = r#"
events:
  - end-edit: { step: nowhere }
"#;
        let err = Scenario::parse_yaml(yaml)
            .unwrap()
            .replay()
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Scenario(_)));
    }

    #[tokio::test]
    async fn test_replay_rejects_step_ended_twice() {
        let yaml = r#"
workflows:
  - { id: 6, name: doomed }
events:
  - begin-edit: { step: delete, id: 6, changes: { isDeleted: true } }
  - begin-edit: { step: rename, id: 6, changes: { name: B } }
  - end-edit: { step: rename }
  - end-edit: { step: rename }
"#;
        let err = Scenario::parse_yaml(yaml)
            .unwrap()
            .replay()
            .await
            .unwrap_err();
        match err {
            SyncError::Scenario(message) => {
                assert!(message.contains("event 4"));
                assert!(message.contains("rename"));
            }
            other => panic!("expected scenario error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Scenario::load("does/not/exist.yaml"),
            Err(SyncError::Io(_))
        ));
    }
}
