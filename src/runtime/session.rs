//! The session task: one owner for a round's state.
//!
//! Operator commands, timer ticks and claim results all arrive on a single
//! channel and are applied one at a time, so no two of them ever touch the
//! `GameState` concurrently. After each command the session:
//!
//! 1. forwards drained game events to the narrator and to the notice stream
//! 2. dispatches any claim ticket to the claim service on its own task
//! 3. arms the draw cadence while running and cancels it otherwise

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::scheduler::{CancelHandle, Scheduler};
use crate::cards::CardId;
use crate::core::EvaluationMode;
use crate::error::{Error, Result};
use crate::game::{
    CheckOutcome, ClaimReceipt, ClaimResolution, ClaimState, ClaimTicket, GameController, GameEvent,
    GameState, RoundSnapshot, TickOutcome,
};
use crate::narration::Narrator;
use crate::service::ClaimService;

/// Messages processed by the session, in arrival order.
#[derive(Debug)]
pub enum Command {
    Start,
    Pause,
    Restart,
    SetMode(EvaluationMode),
    /// Draw cadence fired.
    Tick,
    Check {
        card_id: CardId,
        reply: oneshot::Sender<Result<CheckOutcome>>,
    },
    /// Resubmit a failed claim. Replies whether a retry was dispatched.
    RetryClaim {
        reply: oneshot::Sender<bool>,
    },
    Snapshot {
        reply: oneshot::Sender<RoundSnapshot>,
    },
    /// Answer from the claim service for the ticket of `generation`.
    ClaimResolved {
        generation: u64,
        result: Result<ClaimReceipt>,
    },
    Shutdown,
}

/// Operator-facing notifications published by the session.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Event(GameEvent),
    ClaimAccepted {
        card_id: CardId,
        receipt: ClaimReceipt,
    },
    /// The claim failed; the win stands and a retry is available.
    ClaimFailed {
        card_id: CardId,
        message: String,
    },
}

/// Owns the controller, the round state and everything driven by it.
pub struct Session<S: Scheduler> {
    controller: GameController,
    state: GameState,
    scheduler: S,
    ticker: Option<CancelHandle>,
    claims: Arc<dyn ClaimService>,
    narrator: Narrator,
    commands: mpsc::UnboundedSender<Command>,
    inbox: mpsc::UnboundedReceiver<Command>,
    notices: mpsc::UnboundedSender<Notice>,
}

impl<S: Scheduler + 'static> Session<S> {
    /// Build a session plus the handle that drives it and the receiver for
    /// its notices.
    pub fn new(
        controller: GameController,
        state: GameState,
        scheduler: S,
        claims: Arc<dyn ClaimService>,
        narrator: Narrator,
    ) -> (Self, SessionHandle, mpsc::UnboundedReceiver<Notice>) {
        let (commands, inbox) = mpsc::unbounded_channel();
        let (notices, notice_rx) = mpsc::unbounded_channel();
        let handle = SessionHandle {
            commands: commands.clone(),
        };
        let session = Self {
            controller,
            state,
            scheduler,
            ticker: None,
            claims,
            narrator,
            commands,
            inbox,
            notices,
        };
        (session, handle, notice_rx)
    }

    /// Run on a new tokio task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Process commands until `Shutdown`.
    pub async fn run(mut self) {
        info!(round = %self.controller.config().round_id, "session started");
        while let Some(command) = self.inbox.recv().await {
            if matches!(command, Command::Shutdown) {
                break;
            }
            self.process(command);
        }
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        info!("session stopped");
    }

    fn process(&mut self, command: Command) {
        match command {
            Command::Start => {
                self.controller.start(&mut self.state);
            }
            Command::Pause => {
                self.controller.pause(&mut self.state);
            }
            Command::Restart => self.controller.restart(&mut self.state),
            Command::SetMode(mode) => self.controller.set_mode(&mut self.state, mode),
            Command::Tick => {
                if let TickOutcome::Called {
                    winner: Some(ticket),
                    ..
                } = self.controller.tick(&mut self.state)
                {
                    self.dispatch_claim(ticket);
                }
            }
            Command::Check { card_id, reply } => {
                let result = self.controller.manual_check(&mut self.state, card_id);
                if let Ok(CheckOutcome::Won { ticket, .. }) = &result {
                    self.dispatch_claim(ticket.clone());
                }
                let _ = reply.send(result);
            }
            Command::RetryClaim { reply } => {
                let ticket = self.controller.retry_claim(&mut self.state);
                let retried = ticket.is_some();
                if let Some(ticket) = ticket {
                    self.dispatch_claim(ticket);
                }
                let _ = reply.send(retried);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.controller.snapshot(&self.state));
            }
            Command::ClaimResolved { generation, result } => {
                self.apply_claim_result(generation, result);
            }
            Command::Shutdown => {}
        }

        self.flush_events();
        self.reconcile_ticker();
    }

    fn apply_claim_result(&mut self, generation: u64, result: Result<ClaimReceipt>) {
        match self.controller.resolve_claim(&mut self.state, generation, result) {
            ClaimResolution::Accepted => {
                if let ClaimState::Submitted { claim, receipt } = self.state.claim() {
                    self.publish(Notice::ClaimAccepted {
                        card_id: claim.card_id,
                        receipt: receipt.clone(),
                    });
                }
            }
            ClaimResolution::Failed(Error::ClaimSubmissionFailed { card_id, message }) => {
                self.publish(Notice::ClaimFailed { card_id, message });
            }
            ClaimResolution::Failed(err) => {
                warn!(error = %err, "unexpected claim failure");
            }
            ClaimResolution::Stale => {}
        }
    }

    fn dispatch_claim(&self, ticket: ClaimTicket) {
        let claims = Arc::clone(&self.claims);
        let commands = self.commands.clone();
        debug!(card_id = %ticket.claim.card_id, generation = ticket.generation, "dispatching claim");
        tokio::spawn(async move {
            let result = claims.submit(&ticket.claim).await;
            let _ = commands.send(Command::ClaimResolved {
                generation: ticket.generation,
                result,
            });
        });
    }

    fn flush_events(&mut self) {
        for event in self.state.drain_events() {
            self.narrator.handle(&event);
            self.publish(Notice::Event(event));
        }
    }

    fn publish(&self, notice: Notice) {
        // Nobody listening is fine
        let _ = self.notices.send(notice);
    }

    fn reconcile_ticker(&mut self) {
        let running = self.state.status().is_running();
        match (&self.ticker, running) {
            (None, true) => {
                let commands = self.commands.clone();
                let interval = self.controller.config().draw_interval();
                let handle = self.scheduler.schedule(
                    Box::new(move || {
                        let _ = commands.send(Command::Tick);
                    }),
                    interval,
                );
                self.ticker = Some(handle);
            }
            (Some(_), false) => {
                if let Some(ticker) = self.ticker.take() {
                    ticker.cancel();
                }
            }
            _ => {}
        }
    }
}

impl<S: Scheduler> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("status", &self.state.status())
            .field("generation", &self.state.generation())
            .field("ticking", &self.ticker.is_some())
            .finish_non_exhaustive()
    }
}

/// Cloneable front door to a running session.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl SessionHandle {
    fn send(&self, command: Command) -> Result<()> {
        self.commands.send(command).map_err(|_| Error::SessionClosed)
    }

    pub fn start(&self) -> Result<()> {
        self.send(Command::Start)
    }

    pub fn pause(&self) -> Result<()> {
        self.send(Command::Pause)
    }

    pub fn restart(&self) -> Result<()> {
        self.send(Command::Restart)
    }

    pub fn set_mode(&self, mode: EvaluationMode) -> Result<()> {
        self.send(Command::SetMode(mode))
    }

    /// Draw once now, as if the cadence fired.
    pub fn tick(&self) -> Result<()> {
        self.send(Command::Tick)
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }

    pub async fn check(&self, card_id: CardId) -> Result<CheckOutcome> {
        let (reply, answer) = oneshot::channel();
        self.send(Command::Check { card_id, reply })?;
        answer.await.map_err(|_| Error::SessionClosed)?
    }

    pub async fn retry_claim(&self) -> Result<bool> {
        let (reply, answer) = oneshot::channel();
        self.send(Command::RetryClaim { reply })?;
        answer.await.map_err(|_| Error::SessionClosed)
    }

    pub async fn snapshot(&self) -> Result<RoundSnapshot> {
        let (reply, answer) = oneshot::channel();
        self.send(Command::Snapshot { reply })?;
        answer.await.map_err(|_| Error::SessionClosed)
    }
}
