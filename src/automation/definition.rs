use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifies one block of the flow. Used as the lookup key by the graph
    /// and the connector registry.
    BlockId
);
string_id!(
    /// Identifies one trigger inside a trigger list.
    TriggerId
);
string_id!(
    /// Identifies one AND/OR combinator between two triggers.
    OperatorId
);
string_id!(
    /// Identifies a saved automation. Absent while editing a new one.
    AutomationId
);

/// The condition kinds a trigger can be set to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    Segment,
    Tag,
    Form,
    Manual,
    Link,
}

impl TriggerKind {
    pub fn key(self) -> &'static str {
        match self {
            TriggerKind::Segment => "segment",
            TriggerKind::Tag => "tag",
            TriggerKind::Form => "form",
            TriggerKind::Manual => "manual",
            TriggerKind::Link => "link",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "segment" => Some(TriggerKind::Segment),
            "tag" => Some(TriggerKind::Tag),
            "form" => Some(TriggerKind::Form),
            "manual" => Some(TriggerKind::Manual),
            "link" => Some(TriggerKind::Link),
            _ => None,
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One entry or exclusion condition. `kind` is `None` until the user picks one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub id: TriggerId,
    #[serde(rename = "type", with = "kind_or_empty")]
    pub kind: Option<TriggerKind>,
}

impl Trigger {
    pub fn unset(id: TriggerId) -> Self {
        Self { id, kind: None }
    }

    pub fn is_set(&self) -> bool {
        self.kind.is_some()
    }
}

/// Unset trigger kinds travel as `""`, matching the saved draft format.
mod kind_or_empty {
    use super::TriggerKind;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(kind: &Option<TriggerKind>, s: S) -> Result<S::Ok, S::Error> {
        match kind {
            Some(kind) => s.serialize_str(kind.key()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<TriggerKind>, D::Error> {
        let raw = String::deserialize(d)?;
        if raw.is_empty() {
            return Ok(None);
        }
        TriggerKind::from_key(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("unknown trigger kind '{}'", raw)))
    }
}

/// Boolean combinator stored between two adjacent triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LogicKind {
    #[serde(rename = "AND")]
    And,
    #[default]
    #[serde(rename = "OR")]
    Or,
}

impl LogicKind {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicKind::And => "AND",
            LogicKind::Or => "OR",
        }
    }
}

impl fmt::Display for LogicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicOperator {
    pub id: OperatorId,
    #[serde(rename = "type")]
    pub kind: LogicKind,
}

/// The content type of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Plain outgoing message.
    Input,
    Question,
    /// Conditional response.
    Response,
    /// Terminates the flow.
    End,
}

/// What kind of answer a question block accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    #[default]
    Text,
    Number,
    Range,
}

/// Answer validation settings of a question block. `min`/`max` only apply to
/// [`ResponseKind::Range`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOptions {
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

/// One node of the automation flow. Position in the block sequence is its
/// visual left-to-right order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationBlock {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<QuestionOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Vec<String>>,
}

impl AutomationBlock {
    pub fn new(id: BlockId, block_type: BlockType) -> Self {
        Self {
            id,
            block_type,
            content: String::new(),
            options: None,
            responses: None,
        }
    }
}

/// A directed edge between two blocks, independent of sequence order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: BlockId,
    pub to: BlockId,
    pub tipo: String,
}

impl Connection {
    pub fn touches(&self, id: &BlockId) -> bool {
        &self.from == id || &self.to == id
    }

    /// Key used to address the rendered curve of this edge.
    pub fn path_key(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

/// The two attachment points of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Input,
    Output,
}
