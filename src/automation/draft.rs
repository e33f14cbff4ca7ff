use super::definition::{AutomationBlock, Connection, LogicOperator, Trigger};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AUTOMATION_NAME: &str = "Nova Automação";

/// The full in-memory aggregate handed to a store on save.
///
/// Field names follow the camelCase layout used by the dashboard front end, so a
/// draft can be exchanged with it as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationDraft {
    pub name: String,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    #[serde(default)]
    pub logic_operators: Vec<LogicOperator>,
    #[serde(default)]
    pub exclusion_triggers: Vec<Trigger>,
    #[serde(default)]
    pub exclusion_operators: Vec<LogicOperator>,
    #[serde(default)]
    pub blocks: Vec<AutomationBlock>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Default for AutomationDraft {
    fn default() -> Self {
        Self {
            name: DEFAULT_AUTOMATION_NAME.to_string(),
            triggers: Vec::new(),
            logic_operators: Vec::new(),
            exclusion_triggers: Vec::new(),
            exclusion_operators: Vec::new(),
            blocks: Vec::new(),
            connections: Vec::new(),
        }
    }
}

impl AutomationDraft {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
