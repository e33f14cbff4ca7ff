//! Static label and icon tables for trigger kinds and palette actions.

use super::definition::{BlockType, TriggerKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display metadata for one selectable trigger kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerKindInfo {
    pub kind: TriggerKind,
    pub label: &'static str,
    pub icon: &'static str,
}

const ENTRY_KINDS: [TriggerKindInfo; 5] = [
    TriggerKindInfo {
        kind: TriggerKind::Segment,
        label: "Entrou no Segmento",
        icon: "🎯",
    },
    TriggerKindInfo {
        kind: TriggerKind::Tag,
        label: "Recebeu a Tag",
        icon: "🏷️",
    },
    TriggerKindInfo {
        kind: TriggerKind::Form,
        label: "Preencheu o Formulário",
        icon: "📝",
    },
    TriggerKindInfo {
        kind: TriggerKind::Manual,
        label: "Adicionado Manualmente",
        icon: "👤",
    },
    TriggerKindInfo {
        kind: TriggerKind::Link,
        label: "Clicou em um Link",
        icon: "🔗",
    },
];

const EXCLUSION_KINDS: [TriggerKindInfo; 4] = [
    TriggerKindInfo {
        kind: TriggerKind::Segment,
        label: "Está no Segmento",
        icon: "🎯",
    },
    TriggerKindInfo {
        kind: TriggerKind::Tag,
        label: "Tem a Tag",
        icon: "🏷️",
    },
    TriggerKindInfo {
        kind: TriggerKind::Form,
        label: "Já Preencheu o Formulário",
        icon: "📝",
    },
    TriggerKindInfo {
        kind: TriggerKind::Manual,
        label: "Lista de Bloqueio",
        icon: "🚫",
    },
];

/// Which trigger list a vocabulary belongs to. Entry triggers gate whether a
/// lead may enter the flow; exclusion triggers block it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vocabulary {
    Entry,
    Exclusion,
}

impl Vocabulary {
    pub fn kinds(self) -> &'static [TriggerKindInfo] {
        match self {
            Vocabulary::Entry => &ENTRY_KINDS,
            Vocabulary::Exclusion => &EXCLUSION_KINDS,
        }
    }

    pub fn info(self, kind: TriggerKind) -> Option<&'static TriggerKindInfo> {
        self.kinds().iter().find(|info| info.kind == kind)
    }

    pub fn contains(self, kind: TriggerKind) -> bool {
        self.info(kind).is_some()
    }

    pub fn title(self) -> &'static str {
        match self {
            Vocabulary::Entry => "Gatilhos de Entrada",
            Vocabulary::Exclusion => "Condições de Exclusão",
        }
    }

    /// Caption shown above a logic operator selector.
    pub fn operator_caption(self) -> &'static str {
        match self {
            Vocabulary::Entry => "Continuar se:",
            Vocabulary::Exclusion => "Bloquear se:",
        }
    }

    /// Whether the trigger at `index` gets a delete affordance. The first entry
    /// trigger is anchored; every exclusion trigger can be removed.
    pub fn is_removable(self, index: usize) -> bool {
        match self {
            Vocabulary::Entry => index > 0,
            Vocabulary::Exclusion => true,
        }
    }
}

/// The items offered by the actions palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SendMessage,
    AskQuestion,
    Conditional,
    EndFlow,
}

/// Display metadata for one palette action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionInfo {
    pub kind: ActionKind,
    pub block_type: BlockType,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const ACTIONS: [ActionInfo; 4] = [
    ActionInfo {
        kind: ActionKind::SendMessage,
        block_type: BlockType::Input,
        label: "Enviar Mensagem",
        icon: "message-square",
    },
    ActionInfo {
        kind: ActionKind::AskQuestion,
        block_type: BlockType::Question,
        label: "Fazer Pergunta",
        icon: "help-circle",
    },
    ActionInfo {
        kind: ActionKind::Conditional,
        block_type: BlockType::Response,
        label: "Resposta Condicional",
        icon: "git-fork",
    },
    ActionInfo {
        kind: ActionKind::EndFlow,
        block_type: BlockType::End,
        label: "Finalizar Fluxo",
        icon: "flag",
    },
];

impl ActionKind {
    pub fn info(self) -> &'static ActionInfo {
        match self {
            ActionKind::SendMessage => &ACTIONS[0],
            ActionKind::AskQuestion => &ACTIONS[1],
            ActionKind::Conditional => &ACTIONS[2],
            ActionKind::EndFlow => &ACTIONS[3],
        }
    }

    pub fn block_type(self) -> BlockType {
        self.info().block_type
    }

    pub fn key(self) -> &'static str {
        match self {
            ActionKind::SendMessage => "send_message",
            ActionKind::AskQuestion => "ask_question",
            ActionKind::Conditional => "conditional",
            ActionKind::EndFlow => "end_flow",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ACTIONS
            .iter()
            .map(|info| info.kind)
            .find(|kind| kind.key() == key)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl BlockType {
    /// Heading rendered at the top of a block card.
    pub fn heading(self) -> &'static str {
        match self {
            BlockType::Input => "Mensagem Inicial",
            BlockType::Question => "Configurar Pergunta",
            BlockType::Response => "Resposta Condicional",
            BlockType::End => "Finalizar Fluxo",
        }
    }
}
