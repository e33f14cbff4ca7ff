use super::definition::{BlockId, OperatorId, TriggerId};
use tracing::warn;

/// Highest numeric suffix a restored id may move the counter past. Larger
/// suffixes are left alone so the counter always has room to grow.
pub const MAX_RESTORED_SUFFIX: u64 = u64::MAX >> 1;

/// Hands out ids for new triggers, operators and blocks.
///
/// A single counter backs every kind of id, so ids never collide across
/// triggers and blocks even when two are created within the same event.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn starting_at(next: u64) -> Self {
        Self {
            next: next.clamp(1, MAX_RESTORED_SUFFIX + 1),
        }
    }

    fn bump(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }

    pub fn block_id(&mut self) -> BlockId {
        BlockId::new(self.bump().to_string())
    }

    pub fn trigger_id(&mut self) -> TriggerId {
        TriggerId::new(self.bump().to_string())
    }

    pub fn operator_id(&mut self) -> OperatorId {
        OperatorId::new(format!("op-{}", self.bump()))
    }

    /// Moves the counter past every numeric suffix found in `existing`, so ids
    /// restored from a saved draft are never handed out again. Suffixes above
    /// [`MAX_RESTORED_SUFFIX`] are ignored.
    pub fn skip_past<'a>(&mut self, existing: impl IntoIterator<Item = &'a str>) {
        let highest = existing
            .into_iter()
            .filter_map(|id| {
                let digits: String = id
                    .chars()
                    .rev()
                    .take_while(|c| c.is_ascii_digit())
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                let suffix = digits.parse::<u64>().ok()?;
                if suffix > MAX_RESTORED_SUFFIX {
                    warn!(id, "id suffix too large to continue numbering from, ignored");
                    return None;
                }
                Some(suffix)
            })
            .max();

        if let Some(highest) = highest {
            self.next = self.next.max(highest.saturating_add(1));
        }
    }

    pub fn peek(&self) -> u64 {
        self.next
    }
}
