//! Game events.
//!
//! The controller never calls out to narration, displays or claim services.
//! It records what happened as `GameEvent`s on the game state; whoever runs
//! the round drains them and reacts (announces the number, redraws the
//! board, shows the winner).

use serde::{Deserialize, Serialize};

use super::controller::GameStatus;
use crate::cards::CardId;
use crate::core::{BallNumber, EvaluationMode};
use crate::rules::Evaluation;

/// Something that happened during a round, in emission order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Status moved between two states.
    StatusChanged { from: GameStatus, to: GameStatus },

    /// A number was drawn. `call_count` includes it.
    NumberCalled { number: BallNumber, call_count: usize },

    /// A card won. Emitted at most once per round generation.
    WinnerDeclared {
        card_id: CardId,
        generation: u64,
        evaluation: Evaluation,
    },

    /// A manual check found no win. The round continues.
    ManualCheckFailed { card_id: CardId, evaluation: Evaluation },

    /// Every number was called without a winner.
    PoolExhausted,

    ModeChanged { mode: EvaluationMode },

    /// The round was reset; `generation` is the new one.
    RoundReset { generation: u64 },
}

impl GameEvent {
    /// The number called, for `NumberCalled` events.
    #[must_use]
    pub fn called_number(&self) -> Option<BallNumber> {
        match self {
            GameEvent::NumberCalled { number, .. } => Some(*number),
            _ => None,
        }
    }

    /// Whether speech in progress should be cut off.
    #[must_use]
    pub fn silences_narration(&self) -> bool {
        matches!(
            self,
            GameEvent::WinnerDeclared { .. } | GameEvent::RoundReset { .. }
        )
    }
}
