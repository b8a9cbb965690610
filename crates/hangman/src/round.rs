//! Round actor: an isolated Tokio task that owns one [`Round`].
//!
//! The actor runs a `tokio::select!` loop over its command channel and
//! its [`RoundClock`]. Commands and ticks are handled one at a time, so
//! the round itself needs no locking. The host talks to it through a
//! [`RoundHandle`] and renders the [`RoundEvent`] stream.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use hangman_protocol::{HintType, Identity, RoundEvent};
use hangman_round::{GuessOutcome, HintOutcome, Round, RoundSnapshot, TickOutcome};
use hangman_session::PlayAllowance;
use hangman_tick::{ClockConfig, RoundClock, TickInfo};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

use crate::{HangmanError, RoundOutcome, StatsSink};

/// Remaining seconds at which the host is warned, in crossing order.
pub const TIME_LOW_THRESHOLDS: [u32; 2] = [30, 10];

static NEXT_ROUND_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique id of a running round, for logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(pub u64);

impl RoundId {
    fn next() -> Self {
        Self(NEXT_ROUND_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

/// Receiving end of a round's event stream.
pub type RoundEvents = mpsc::UnboundedReceiver<RoundEvent>;

/// What `start_round` and `accept_challenge` hand back.
#[derive(Debug)]
pub struct StartedRound {
    pub handle: RoundHandle,
    pub events: RoundEvents,
    /// The player's plays left after this one; `None` for guests.
    pub allowance: Option<PlayAllowance>,
}

/// Commands sent to a round actor.
enum RoundCommand {
    Guess {
        letter: char,
        reply: oneshot::Sender<GuessOutcome>,
    },
    Hint {
        hint: HintType,
        reply: oneshot::Sender<HintOutcome>,
    },
    Snapshot {
        reply: oneshot::Sender<RoundSnapshot>,
    },
    /// The host is done with the round; the actor exits.
    Acknowledge,
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Handle to a running round. Cheap to clone.
///
/// Every call fails with [`HangmanError::RoundClosed`] once the actor
/// has exited.
#[derive(Debug, Clone)]
pub struct RoundHandle {
    round_id: RoundId,
    sender: mpsc::Sender<RoundCommand>,
}

impl fmt::Debug for RoundCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guess { letter, .. } => write!(f, "Guess({letter})"),
            Self::Hint { hint, .. } => write!(f, "Hint({hint})"),
            Self::Snapshot { .. } => f.write_str("Snapshot"),
            Self::Acknowledge => f.write_str("Acknowledge"),
        }
    }
}

impl RoundHandle {
    pub fn round_id(&self) -> RoundId {
        self.round_id
    }

    /// Submits a guessed letter.
    pub async fn guess(&self, letter: char) -> Result<GuessOutcome, HangmanError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoundCommand::Guess { letter, reply }).await?;
        rx.await.map_err(|_| self.closed())
    }

    /// Requests a hint of the given type.
    pub async fn hint(&self, hint: HintType) -> Result<HintOutcome, HangmanError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoundCommand::Hint { hint, reply }).await?;
        rx.await.map_err(|_| self.closed())
    }

    /// The round's current state. The word is included once the round is over.
    pub async fn snapshot(&self) -> Result<RoundSnapshot, HangmanError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoundCommand::Snapshot { reply }).await?;
        rx.await.map_err(|_| self.closed())
    }

    /// Tells the actor the host is finished with the round. An unfinished
    /// round is abandoned and never reported.
    pub async fn acknowledge(&self) -> Result<(), HangmanError> {
        self.send(RoundCommand::Acknowledge).await
    }

    /// `true` once the actor has exited.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    async fn send(&self, cmd: RoundCommand) -> Result<(), HangmanError> {
        self.sender.send(cmd).await.map_err(|_| self.closed())
    }

    fn closed(&self) -> HangmanError {
        HangmanError::RoundClosed(self.round_id)
    }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

struct RoundActor<S: StatsSink> {
    round_id: RoundId,
    round: Round,
    identity: Identity,
    clock: RoundClock,
    receiver: mpsc::Receiver<RoundCommand>,
    events: mpsc::UnboundedSender<RoundEvent>,
    stats: Arc<S>,
    rng: StdRng,
    reported: bool,
}

impl<S: StatsSink> RoundActor<S> {
    async fn run(mut self) {
        tracing::info!(
            round_id = %self.round_id,
            identity = %self.identity,
            difficulty = %self.round.word().difficulty(),
            category = %self.round.word().category(),
            "round started"
        );

        loop {
            tokio::select! {
                cmd = self.receiver.recv() => match cmd {
                    Some(RoundCommand::Acknowledge) | None => break,
                    Some(cmd) => self.handle_command(cmd),
                },
                info = self.clock.wait_for_tick() => self.handle_tick(info),
            }
        }

        if !self.round.status().is_terminal() {
            tracing::info!(round_id = %self.round_id, "round abandoned");
        }
        tracing::debug!(round_id = %self.round_id, "round actor stopped");
    }

    fn handle_command(&mut self, cmd: RoundCommand) {
        match cmd {
            RoundCommand::Guess { letter, reply } => {
                let before = self.round.time_remaining();
                let outcome = self.round.submit_guess(letter);
                if let GuessOutcome::Applied(result) = &outcome {
                    self.emit(RoundEvent::GuessApplied {
                        letter: result.letter,
                        correct: result.correct,
                        status: result.status,
                        time_remaining: result.time_remaining,
                        remaining_guesses: result.remaining_guesses,
                    });
                    self.warn_if_time_low(before);
                }
                self.finish_if_terminal();
                let _ = reply.send(outcome);
            }
            RoundCommand::Hint { hint, reply } => {
                let before = self.round.time_remaining();
                let outcome = self.round.consume_hint(hint, &mut self.rng);
                match &outcome {
                    HintOutcome::Granted(grant) => {
                        self.emit(RoundEvent::HintGranted {
                            hint: grant.hint,
                            payload: grant.payload.clone(),
                            hints_remaining: grant.hints_remaining,
                            time_remaining: grant.time_remaining,
                        });
                        self.warn_if_time_low(before);
                    }
                    HintOutcome::Declined(reason) => {
                        self.emit(RoundEvent::HintDeclined {
                            hint,
                            reason: *reason,
                        });
                    }
                    HintOutcome::Refunded(hint) => {
                        self.emit(RoundEvent::HintRefunded { hint: *hint });
                    }
                    HintOutcome::Ignored(_) => {}
                }
                let _ = reply.send(outcome);
            }
            RoundCommand::Snapshot { reply } => {
                let _ = reply.send(self.round.snapshot());
            }
            RoundCommand::Acknowledge => {}
        }
    }

    /// Applies the tick plus any periods the clock reports as missed.
    fn handle_tick(&mut self, info: TickInfo) {
        for _ in 0..=info.missed {
            let before = self.round.time_remaining();
            match self.round.tick() {
                TickOutcome::Running { time_remaining } => {
                    self.emit(RoundEvent::Ticked { time_remaining });
                    self.warn_if_time_low(before);
                }
                TickOutcome::Expired => {
                    self.emit(RoundEvent::Ticked { time_remaining: 0 });
                    self.warn_if_time_low(before);
                    break;
                }
                TickOutcome::Stopped => break,
            }
        }
        self.finish_if_terminal();
    }

    /// Emits `TimeLow` for every threshold the clock just crossed downward.
    fn warn_if_time_low(&self, before: u32) {
        let now = self.round.time_remaining();
        for seconds in TIME_LOW_THRESHOLDS {
            if before > seconds && now <= seconds && now > 0 {
                self.emit(RoundEvent::TimeLow { seconds });
            }
        }
    }

    /// Stops the clock, emits `Finished` and reports the outcome, once.
    fn finish_if_terminal(&mut self) {
        if self.reported || !self.round.status().is_terminal() {
            return;
        }
        self.reported = true;
        self.clock.stop();

        let snapshot = self.round.snapshot();
        let won = snapshot.is_won();
        tracing::info!(
            round_id = %self.round_id,
            identity = %self.identity,
            won,
            score = snapshot.score,
            time_remaining = snapshot.time_remaining,
            "round finished"
        );

        self.emit(RoundEvent::Finished {
            won,
            score: snapshot.score,
            word: self.round.word().text().to_string(),
            time_remaining: snapshot.time_remaining,
        });

        let outcome = RoundOutcome {
            identity: self.identity.clone(),
            difficulty: snapshot.difficulty,
            category: snapshot.category,
            won,
            score: snapshot.score,
            wrong_guesses: snapshot.wrong_guesses,
            hints_used: snapshot.hints_used,
        };
        let stats = Arc::clone(&self.stats);
        let round_id = self.round_id;
        tokio::spawn(async move {
            if let Err(e) = stats.record_outcome(&outcome).await {
                tracing::warn!(%round_id, error = %e, "failed to record round outcome");
            }
        });
    }

    /// Sends an event to the host. Silently drops if the host stopped listening.
    fn emit(&self, event: RoundEvent) {
        let _ = self.events.send(event);
    }
}

/// Spawns a round actor and returns its handle and event stream.
pub(crate) fn spawn_round<S: StatsSink>(
    round: Round,
    identity: Identity,
    clock: ClockConfig,
    stats: Arc<S>,
    channel_size: usize,
) -> (RoundHandle, RoundEvents) {
    let round_id = RoundId::next();
    let (tx, rx) = mpsc::channel(channel_size.max(1));
    let (events_tx, events_rx) = mpsc::unbounded_channel();

    let actor = RoundActor {
        round_id,
        round,
        identity,
        clock: RoundClock::new(clock),
        receiver: rx,
        events: events_tx,
        stats,
        rng: StdRng::from_rng(&mut rand::rng()),
        reported: false,
    };

    tokio::spawn(actor.run());

    (
        RoundHandle {
            round_id,
            sender: tx,
        },
        events_rx,
    )
}
