//! Per-call environment context

use serde::{Deserialize, Serialize};

use crate::identifiers::{ActorId, Tick};

/// Invoking actor and current tick, supplied by the environment at call entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Authenticated caller
    pub caller: ActorId,
    /// Current logical clock value
    pub tick: Tick,
}

impl CallContext {
    /// Create a context for `caller` at `tick`
    pub fn new(caller: impl Into<ActorId>, tick: u64) -> Self {
        Self {
            caller: caller.into(),
            tick: Tick(tick),
        }
    }

    /// Same caller at a different tick
    pub fn at(&self, tick: u64) -> Self {
        Self {
            caller: self.caller.clone(),
            tick: Tick(tick),
        }
    }
}
