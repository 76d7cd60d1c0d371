//! Round state and the controller that advances it.
//!
//! ## GameState
//!
//! Everything that changes during a round lives in one owned `GameState`:
//! status, evaluation mode, call history, draw pool, last check result,
//! claim progress and the round generation. Nothing is global.
//!
//! ## GameController
//!
//! The controller holds the immutable round rules (configuration and the
//! selected cards) and applies operator commands and timer ticks to a
//! `&mut GameState`:
//!
//! ```text
//! Idle --start--> Running <--pause/start--> Paused
//! Running --tick (winner)--> Concluded
//! Running/Paused/Exhausted --manual_check (winner)--> Concluded
//! Running --tick (pool empty)--> Exhausted
//! any --restart--> Idle
//! ```
//!
//! Once a round is `Concluded`, ticks and manual checks are ignored, so at
//! most one winner and one claim exist per generation.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::claim::{ClaimReceipt, ClaimState, ClaimTicket, WinningClaim};
use super::event::GameEvent;
use crate::cards::{Card, CardCatalog, CardId};
use crate::core::{
    BallNumber, CalledSet, DrawPool, DrawSource, EvaluationMode, GameRng, RoundConfig,
    WinningPattern,
};
use crate::error::{Error, Result};
use crate::rules::{evaluate, Evaluation};

/// Where the round stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Not started, or restarted.
    Idle,
    /// Numbers are being drawn on the cadence.
    Running,
    Paused,
    /// Every number was drawn and nobody won.
    Exhausted,
    /// A winner was declared.
    Concluded { winner: CardId },
}

impl GameStatus {
    #[must_use]
    pub fn is_running(self) -> bool {
        self == GameStatus::Running
    }

    #[must_use]
    pub fn is_concluded(self) -> bool {
        matches!(self, GameStatus::Concluded { .. })
    }

    /// The declared winner, if any.
    #[must_use]
    pub fn winner(self) -> Option<CardId> {
        match self {
            GameStatus::Concluded { winner } => Some(winner),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Idle => f.write_str("idle"),
            GameStatus::Running => f.write_str("running"),
            GameStatus::Paused => f.write_str("paused"),
            GameStatus::Exhausted => f.write_str("exhausted"),
            GameStatus::Concluded { winner } => write!(f, "concluded ({winner} won)"),
        }
    }
}

/// Verdict of the last card check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Failed,
}

/// The last card check and its verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRecord {
    pub card_id: CardId,
    pub outcome: Outcome,
}

/// Result of one timer tick.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// The round is not running; nothing happened.
    Ignored,
    /// A number was called. `winner` is set when automatic evaluation
    /// found a winning card on this call.
    Called {
        number: BallNumber,
        winner: Option<ClaimTicket>,
    },
    /// The pool ran dry; the round ended without a winner.
    Exhausted,
}

/// Result of a manual card check.
#[derive(Clone, Debug, PartialEq)]
pub enum CheckOutcome {
    /// The round already has a winner; nothing happened.
    Ignored,
    Won {
        evaluation: Evaluation,
        ticket: ClaimTicket,
    },
    /// Not a winner. Status is unchanged.
    Failed { evaluation: Evaluation },
}

impl CheckOutcome {
    /// The verdict, `None` when the check was ignored.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            CheckOutcome::Ignored => None,
            CheckOutcome::Won { .. } => Some(Outcome::Won),
            CheckOutcome::Failed { .. } => Some(Outcome::Failed),
        }
    }
}

/// How a claim service result was applied.
#[derive(Debug)]
pub enum ClaimResolution {
    Accepted,
    /// The claim failed and can be retried. The win stands.
    Failed(Error),
    /// The result belongs to an earlier round or is no longer awaited.
    Stale,
}

/// Mutable state of one round.
#[derive(Debug)]
pub struct GameState {
    status: GameStatus,
    mode: EvaluationMode,
    called: CalledSet,
    pool: DrawPool,
    last_check: Option<CheckRecord>,
    claim: ClaimState,
    generation: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle state with a full pool.
    pub fn new(mode: EvaluationMode, source: impl DrawSource + 'static) -> Self {
        Self {
            status: GameStatus::Idle,
            mode,
            called: CalledSet::new(),
            pool: DrawPool::new(source),
            last_check: None,
            claim: ClaimState::None,
            generation: 0,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    #[must_use]
    pub fn called(&self) -> &CalledSet {
        &self.called
    }

    #[must_use]
    pub fn pool(&self) -> &DrawPool {
        &self.pool
    }

    #[must_use]
    pub fn last_check(&self) -> Option<CheckRecord> {
        self.last_check
    }

    #[must_use]
    pub fn claim(&self) -> &ClaimState {
        &self.claim
    }

    /// Incremented on every restart.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Take all events emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_status(&mut self, to: GameStatus) {
        let from = self.status;
        if from != to {
            self.status = to;
            info!(%from, %to, "status changed");
            self.events.push(GameEvent::StatusChanged { from, to });
        }
    }
}

/// Serializable view of a round for displays.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundSnapshot {
    pub round_id: String,
    pub generation: u64,
    pub status: GameStatus,
    pub mode: EvaluationMode,
    pub pattern: WinningPattern,
    pub prize: f64,
    pub current_call: Option<BallNumber>,
    /// Last five calls, newest first.
    pub recent: Vec<BallNumber>,
    /// All calls, newest first.
    pub called: CalledSet,
    pub remaining: usize,
    pub last_check: Option<CheckRecord>,
    pub claim: ClaimState,
}

/// Number of recent calls shown in snapshots.
const RECENT_CALLS: usize = 5;

/// Applies round rules to a [`GameState`].
#[derive(Clone, Debug)]
pub struct GameController {
    config: RoundConfig,
    cards: Vec<Card>,
}

impl GameController {
    /// Validate `config` against `catalog` and take the selected cards.
    pub fn new(config: RoundConfig, catalog: &CardCatalog) -> Result<Self> {
        config.validate(catalog)?;
        let cards = catalog.select(&config.selected_cards)?;
        info!(
            round = %config.round_id,
            cards = cards.len(),
            pattern = %config.winning_pattern,
            "round configured"
        );
        Ok(Self { config, cards })
    }

    #[must_use]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Selected cards in evaluation order.
    #[must_use]
    pub fn selected_cards(&self) -> &[Card] {
        &self.cards
    }

    /// Look a card up among the selected cards only.
    #[must_use]
    pub fn selected_card(&self, card_id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id() == card_id)
    }

    /// Fresh state drawing from the configured seed, or a random one.
    #[must_use]
    pub fn new_state(&self) -> GameState {
        let rng = match self.config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        debug!(seed = rng.seed(), "draw rng seeded");
        self.new_state_with_source(rng)
    }

    /// Fresh state drawing from `source`.
    pub fn new_state_with_source(&self, source: impl DrawSource + 'static) -> GameState {
        GameState::new(self.config.mode, source)
    }

    /// Start or resume. Returns whether the status changed.
    pub fn start(&self, state: &mut GameState) -> bool {
        match state.status {
            GameStatus::Idle | GameStatus::Paused => {
                state.set_status(GameStatus::Running);
                true
            }
            _ => false,
        }
    }

    /// Pause a running round. Returns whether the status changed.
    pub fn pause(&self, state: &mut GameState) -> bool {
        if state.status.is_running() {
            state.set_status(GameStatus::Paused);
            true
        } else {
            false
        }
    }

    /// Switch between automatic and manual evaluation.
    pub fn set_mode(&self, state: &mut GameState, mode: EvaluationMode) {
        if state.mode != mode {
            state.mode = mode;
            info!(%mode, "evaluation mode changed");
            state.events.push(GameEvent::ModeChanged { mode });
        }
    }

    /// Draw the next number. Only acts while running.
    ///
    /// In automatic mode every selected card is checked in configured order
    /// and the first winner concludes the round.
    pub fn tick(&self, state: &mut GameState) -> TickOutcome {
        if !state.status.is_running() {
            return TickOutcome::Ignored;
        }

        let number = match state.pool.draw_next() {
            Ok(number) => number,
            Err(Error::ExhaustedPool) => {
                info!(calls = state.called.len(), "pool exhausted without a winner");
                state.set_status(GameStatus::Exhausted);
                state.events.push(GameEvent::PoolExhausted);
                return TickOutcome::Exhausted;
            }
            Err(err) => {
                // draw_next only fails with ExhaustedPool
                warn!(error = %err, "unexpected draw failure");
                return TickOutcome::Ignored;
            }
        };

        state.called.record(number);
        state.events.push(GameEvent::NumberCalled {
            number,
            call_count: state.called.len(),
        });
        info!(call = %number.label(), count = state.called.len(), "number called");

        let winner = match state.mode {
            EvaluationMode::Automatic => self.find_winner(&state.called).map(|(card_id, evaluation)| {
                self.declare_winner(state, card_id, evaluation)
            }),
            EvaluationMode::Manual => None,
        };

        TickOutcome::Called { number, winner }
    }

    /// Check one selected card on the operator's request.
    ///
    /// Never draws. A non-winning check records `Failed` and leaves the
    /// status alone. Checks stay open after the pool runs dry.
    pub fn manual_check(&self, state: &mut GameState, card_id: CardId) -> Result<CheckOutcome> {
        match state.status {
            GameStatus::Concluded { .. } => return Ok(CheckOutcome::Ignored),
            GameStatus::Running | GameStatus::Paused | GameStatus::Exhausted => {}
            other => return Err(Error::CheckNotAllowed(other)),
        }

        let card = self
            .selected_card(card_id)
            .ok_or(Error::CardNotSelected(card_id))?;

        if state.called.is_empty() {
            return Err(Error::NoNumbersCalled);
        }

        let evaluation = evaluate(card, &state.called, self.config.winning_pattern);
        if evaluation.is_winner {
            let ticket = self.declare_winner(state, card_id, evaluation.clone());
            Ok(CheckOutcome::Won { evaluation, ticket })
        } else {
            info!(%card_id, lines = evaluation.lines_completed, "manual check failed");
            state.last_check = Some(CheckRecord {
                card_id,
                outcome: Outcome::Failed,
            });
            state.events.push(GameEvent::ManualCheckFailed {
                card_id,
                evaluation: evaluation.clone(),
            });
            Ok(CheckOutcome::Failed { evaluation })
        }
    }

    /// Reset to an idle round with an empty board and a full pool.
    ///
    /// Bumps the generation so late claim results are ignored.
    pub fn restart(&self, state: &mut GameState) {
        state.set_status(GameStatus::Idle);
        state.called.clear();
        state.pool.reset();
        state.last_check = None;
        state.claim = ClaimState::None;
        state.generation += 1;
        info!(generation = state.generation, "round restarted");
        state.events.push(GameEvent::RoundReset {
            generation: state.generation,
        });
    }

    /// Apply the claim service's answer for the ticket of `generation`.
    ///
    /// A failure never rolls back the win.
    pub fn resolve_claim(
        &self,
        state: &mut GameState,
        generation: u64,
        result: Result<ClaimReceipt>,
    ) -> ClaimResolution {
        let claim = match &state.claim {
            ClaimState::Pending(ticket) if ticket.generation == generation && generation == state.generation => {
                ticket.claim.clone()
            }
            _ => {
                debug!(generation, current = state.generation, "ignoring stale claim result");
                return ClaimResolution::Stale;
            }
        };

        match result {
            Ok(receipt) => {
                info!(card_id = %claim.card_id, "claim accepted");
                state.claim = ClaimState::Submitted { claim, receipt };
                ClaimResolution::Accepted
            }
            Err(err) => {
                let message = err.to_string();
                warn!(card_id = %claim.card_id, error = %message, "claim submission failed");
                let card_id = claim.card_id;
                state.claim = ClaimState::Failed {
                    claim,
                    error: message.clone(),
                };
                ClaimResolution::Failed(Error::ClaimSubmissionFailed { card_id, message })
            }
        }
    }

    /// Re-issue a ticket for a failed claim.
    pub fn retry_claim(&self, state: &mut GameState) -> Option<ClaimTicket> {
        let claim = match &state.claim {
            ClaimState::Failed { claim, .. } => claim.clone(),
            _ => return None,
        };
        let ticket = ClaimTicket {
            generation: state.generation,
            claim,
        };
        info!(card_id = %ticket.claim.card_id, "retrying claim");
        state.claim = ClaimState::Pending(ticket.clone());
        Some(ticket)
    }

    /// Display view of the round.
    #[must_use]
    pub fn snapshot(&self, state: &GameState) -> RoundSnapshot {
        RoundSnapshot {
            round_id: self.config.round_id.clone(),
            generation: state.generation,
            status: state.status,
            mode: state.mode,
            pattern: self.config.winning_pattern,
            prize: self.config.prize,
            current_call: state.called.last(),
            recent: state.called.recent(RECENT_CALLS),
            called: state.called.clone(),
            remaining: state.pool.remaining_len(),
            last_check: state.last_check,
            claim: state.claim.clone(),
        }
    }

    fn find_winner(&self, called: &CalledSet) -> Option<(CardId, Evaluation)> {
        self.cards.iter().find_map(|card| {
            let evaluation = evaluate(card, called, self.config.winning_pattern);
            evaluation.is_winner.then(|| (card.id(), evaluation))
        })
    }

    fn declare_winner(&self, state: &mut GameState, card_id: CardId, evaluation: Evaluation) -> ClaimTicket {
        info!(%card_id, lines = evaluation.lines_completed, "winner declared");

        // Concluded is committed before the ticket leaves, so nothing can
        // declare a second winner while the claim is in flight.
        state.set_status(GameStatus::Concluded { winner: card_id });
        state.last_check = Some(CheckRecord {
            card_id,
            outcome: Outcome::Won,
        });

        let ticket = ClaimTicket {
            generation: state.generation,
            claim: WinningClaim {
                card_id,
                round_id: self.config.round_id.clone(),
                shop_id: self.config.shop_id.clone(),
                prize: self.config.prize,
            },
        };
        state.claim = ClaimState::Pending(ticket.clone());
        state.events.push(GameEvent::WinnerDeclared {
            card_id,
            generation: state.generation,
            evaluation,
        });
        ticket
    }
}
