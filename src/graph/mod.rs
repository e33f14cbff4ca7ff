//! Directed connections between blocks and the two-click wiring gesture.

use crate::automation::{BlockId, Connection, Endpoint};
use tracing::debug;

pub const DEFAULT_CONNECTION_KIND: &str = "fluxo";

/// What a connector click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectorOutcome {
    /// An output connector was clicked; the block is now the pending origin.
    OriginMarked(BlockId),
    /// An input connector completed a new edge.
    Connected(Connection),
    /// The input of the pending origin itself was clicked; nothing was created.
    Cancelled,
    /// An input was clicked with no pending origin.
    Ignored,
}

impl ConnectorOutcome {
    /// Whether curve geometry must be recomputed after this click.
    pub fn needs_recompute(&self) -> bool {
        matches!(self, ConnectorOutcome::Connected(_))
    }
}

/// The set of edges plus the pending connection origin.
///
/// Duplicate edges between the same pair of blocks are allowed, and cycles are
/// not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionGraph {
    connections: Vec<Connection>,
    pending_origin: Option<BlockId>,
    connection_kind: String,
}

impl Default for ConnectionGraph {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECTION_KIND)
    }
}

impl ConnectionGraph {
    pub fn new(connection_kind: impl Into<String>) -> Self {
        Self {
            connections: Vec::new(),
            pending_origin: None,
            connection_kind: connection_kind.into(),
        }
    }

    pub fn with_connections(mut self, connections: Vec<Connection>) -> Self {
        self.connections = connections;
        self
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn pending_origin(&self) -> Option<&BlockId> {
        self.pending_origin.as_ref()
    }

    /// Handles a click on a block's connector.
    ///
    /// Clicking an output marks that block as the pending origin (replacing any
    /// earlier one). Clicking an input then completes an edge from the origin,
    /// unless it is the origin's own input, which cancels the gesture.
    pub fn connector_click(&mut self, block: &BlockId, endpoint: Endpoint) -> ConnectorOutcome {
        match endpoint {
            Endpoint::Output => {
                self.pending_origin = Some(block.clone());
                debug!(origin = %block, "connection origin marked");
                ConnectorOutcome::OriginMarked(block.clone())
            }
            Endpoint::Input => match self.pending_origin.take() {
                None => ConnectorOutcome::Ignored,
                Some(origin) if &origin == block => {
                    debug!(block = %block, "connection cancelled");
                    ConnectorOutcome::Cancelled
                }
                Some(origin) => {
                    let connection = Connection {
                        from: origin,
                        to: block.clone(),
                        tipo: self.connection_kind.clone(),
                    };
                    debug!(from = %connection.from, to = %connection.to, "connection created");
                    self.connections.push(connection.clone());
                    ConnectorOutcome::Connected(connection)
                }
            },
        }
    }

    /// Removes every edge going from `from` to `to`. Returns how many were
    /// removed.
    pub fn delete_edge(&mut self, from: &BlockId, to: &BlockId) -> usize {
        let before = self.connections.len();
        self.connections
            .retain(|c| !(&c.from == from && &c.to == to));
        let removed = before - self.connections.len();
        debug!(from = %from, to = %to, removed, "connection deleted");
        removed
    }

    /// Drops every edge touching `block`, and the pending origin if it is that
    /// block.
    pub fn remove_block(&mut self, block: &BlockId) -> usize {
        let before = self.connections.len();
        self.connections.retain(|c| !c.touches(block));
        if self.pending_origin.as_ref() == Some(block) {
            self.pending_origin = None;
        }
        before - self.connections.len()
    }

    pub fn clear_pending(&mut self) {
        self.pending_origin = None;
    }

    pub fn into_connections(self) -> Vec<Connection> {
        self.connections
    }
}
