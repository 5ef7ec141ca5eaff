//! The game driver.
//!
//! `Game` owns the single active `Session` together with everything that
//! acts on it over time: the CPU agent, the scheduler, and the random
//! source. All mutation goes through `reveal`, the deferred tasks fired by
//! `run_due`, and `new_game`.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use memory_engine::cards::CardId;
//! use memory_engine::core::{EngineConfig, GameMode, SequenceRng};
//! use memory_engine::engine::{Game, RevealOutcome};
//!
//! // Unshuffled board: card i pairs with card i + 8.
//! let config = EngineConfig::new().with_mode(GameMode::Solo);
//! let mut game = Game::with_rng(config, SequenceRng::default()).unwrap();
//!
//! game.reveal(CardId::new(0)).unwrap();
//! let outcome = game.reveal(CardId::new(8)).unwrap();
//! assert!(matches!(outcome, RevealOutcome::Matched { .. }));
//!
//! game.reveal(CardId::new(1)).unwrap();
//! assert_eq!(game.reveal(CardId::new(2)).unwrap(), RevealOutcome::Mismatched);
//! game.advance(Duration::from_millis(1000));
//! assert!(game.session().revealed().is_empty());
//! ```

use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use super::events::GameEvent;
use crate::cards::{CardId, GridGenerator, Symbol, SymbolCatalog};
use crate::core::{EngineConfig, EngineError, GameMode, GameRng, GridSize, PlayerId, RandomSource};
use crate::cpu::{CpuAgent, CpuPlan};
use crate::persistence::{GameId, PersistenceCollaborator, PersistenceError};
use crate::schedule::{DeferredTask, ManualScheduler, Scheduler};
use crate::session::{
    Actor, GameOutcome, IgnoreReason, MatchEvaluator, PairResult, Reveal, Session,
    SessionSnapshot, SessionStatus, TurnController, WinDetector,
};

/// What a reveal did, as seen by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Illegal right now; nothing changed.
    Ignored(IgnoreReason),
    /// First card of a pair is up.
    Revealed,
    /// The pair matched; the same seat keeps the turn.
    Matched { scorer: Option<PlayerId> },
    /// The pair differs and will turn down after the settle delay.
    Mismatched,
    /// The last pair matched.
    Won(GameOutcome),
}

/// One running memory game.
pub struct Game<S = ManualScheduler, R = GameRng> {
    config: EngineConfig,
    generator: GridGenerator,
    session: Session,
    cpu: Option<CpuAgent>,
    scheduler: S,
    rng: R,
    events: Vec<GameEvent>,
    outcome: Option<GameOutcome>,
    game_id: Option<GameId>,
}

impl Game<ManualScheduler, GameRng> {
    /// Game on virtual time with a seeded RNG (entropy when no seed is set).
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        info!(seed = rng.seed(), "Seeded game RNG");
        Self::with_parts(config, SymbolCatalog::default(), ManualScheduler::new(), rng)
    }
}

impl<R: RandomSource> Game<ManualScheduler, R> {
    /// Game on virtual time with a caller-supplied random source.
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, EngineError> {
        Self::with_parts(config, SymbolCatalog::default(), ManualScheduler::new(), rng)
    }

    /// Move virtual time forward, firing every task that falls due on the
    /// way in deadline order. Returns the number of tasks fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.scheduler.now() + by;
        let mut fired = 0;

        while let Some(deadline) = self.scheduler.next_deadline() {
            if deadline > target {
                break;
            }
            self.scheduler.set_now(deadline);
            fired += self.run_due();
        }

        self.scheduler.set_now(target);
        fired
    }
}

impl<S: Scheduler, R: RandomSource> Game<S, R> {
    /// Assemble a game from explicit parts and deal the first board.
    pub fn with_parts(
        config: EngineConfig,
        catalog: SymbolCatalog,
        scheduler: S,
        mut rng: R,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let generator = GridGenerator::new(catalog);
        let (session, cpu) = deal(&generator, &config, &mut rng)?;

        let mut game = Self {
            config,
            generator,
            session,
            cpu,
            scheduler,
            rng,
            events: Vec::new(),
            outcome: None,
            game_id: None,
        };
        game.announce_start();
        Ok(game)
    }

    // === Lifecycle ===

    /// Discard the current session and deal a new board with the same settings.
    ///
    /// Every pending deferred task is cancelled first, so nothing scheduled
    /// for the old board can fire against the new one.
    pub fn new_game(&mut self) -> Result<(), EngineError> {
        let config = self.config.clone();
        self.restart(config)
    }

    /// Start a new game with a different board size and mode.
    pub fn new_game_with(&mut self, grid_size: GridSize, mode: GameMode) -> Result<(), EngineError> {
        let config = self.config.clone().with_grid_size(grid_size).with_mode(mode);
        self.restart(config)
    }

    #[instrument(skip(self, config), fields(grid = %config.grid_size, mode = ?config.mode))]
    fn restart(&mut self, config: EngineConfig) -> Result<(), EngineError> {
        config.validate()?;
        let (session, cpu) = deal(&self.generator, &config, &mut self.rng)?;

        self.scheduler.cancel_all();
        self.config = config;
        self.session = session;
        self.cpu = cpu;
        self.outcome = None;
        self.game_id = None;
        self.announce_start();
        Ok(())
    }

    fn announce_start(&mut self) {
        info!(
            grid = %self.session.grid_size(),
            mode = ?self.session.mode(),
            "New game"
        );
        self.events.push(GameEvent::GameStarted {
            grid_size: self.session.grid_size(),
            mode: self.session.mode(),
        });
    }

    // === Input ===

    /// Reveal a card on behalf of the human player.
    ///
    /// Out-of-range ids are rejected with an error. Input that is illegal
    /// right now (resolving, card already up, CPU's turn, game over) is
    /// ignored and reported as `RevealOutcome::Ignored`.
    #[instrument(level = "debug", skip(self))]
    pub fn reveal(&mut self, card: CardId) -> Result<RevealOutcome, EngineError> {
        self.reveal_as(card, Actor::Human)
    }

    fn reveal_as(&mut self, card: CardId, actor: Actor) -> Result<RevealOutcome, EngineError> {
        match self.session.reveal(card, actor)? {
            Reveal::Ignored(reason) => {
                debug!(%card, ?actor, ?reason, "Reveal ignored");
                Ok(RevealOutcome::Ignored(reason))
            }
            Reveal::First { card, symbol } => {
                self.card_up(card, symbol);
                if self.session.clock_pending() {
                    self.start_clock();
                }
                Ok(RevealOutcome::Revealed)
            }
            Reveal::Second { card, symbol } => {
                self.card_up(card, symbol);
                Ok(self.resolve_pair())
            }
        }
    }

    fn card_up(&mut self, card: CardId, symbol: Symbol) {
        if let Some(cpu) = self.cpu.as_mut() {
            cpu.observe(card, symbol);
        }

        let by = self
            .session
            .mode()
            .is_versus()
            .then(|| self.session.current_turn());
        debug!(%card, ?by, "Card revealed");
        self.events.push(GameEvent::CardRevealed { card, symbol, by });
    }

    fn start_clock(&mut self) {
        let now = self.scheduler.now();
        self.session.start_clock(now);
        self.scheduler
            .schedule_after(self.config.tick_interval(), DeferredTask::ClockTick);
        self.events.push(GameEvent::ClockStarted);
    }

    // === Resolution ===

    fn resolve_pair(&mut self) -> RevealOutcome {
        let Some(result) = MatchEvaluator::resolve(&mut self.session) else {
            return RevealOutcome::Ignored(IgnoreReason::NotInProgress);
        };

        match result {
            PairResult::Match {
                first,
                second,
                scorer,
            } => {
                if let Some(cpu) = self.cpu.as_mut() {
                    cpu.forget_pair(first, second);
                }
                self.events.push(GameEvent::PairMatched {
                    first,
                    second,
                    scorer,
                });

                if let Some(outcome) = self.check_win() {
                    return RevealOutcome::Won(outcome);
                }
                self.schedule_cpu_if_due();
                RevealOutcome::Matched { scorer }
            }
            PairResult::Mismatch { first, second } => {
                self.events.push(GameEvent::PairMismatched { first, second });
                self.scheduler.schedule_after(
                    self.config.settle_delay(),
                    DeferredTask::SettleMismatch { first, second },
                );
                RevealOutcome::Mismatched
            }
        }
    }

    fn settle(&mut self, first: CardId, second: CardId) {
        if self.session.status() != SessionStatus::Resolving
            || self.session.revealed() != [first, second]
        {
            debug!(%first, %second, "Stale settle skipped");
            return;
        }

        let turn = MatchEvaluator::settle(&mut self.session, first, second);
        self.events.push(GameEvent::CardsHidden { first, second });
        if let Some(to) = turn {
            self.events.push(GameEvent::TurnChanged { to });
        }

        if self.check_win().is_some() {
            return;
        }
        self.schedule_cpu_if_due();
    }

    fn check_win(&mut self) -> Option<GameOutcome> {
        if !WinDetector::check(&mut self.session) {
            return None;
        }

        // Stops the tick and anything else still pending.
        self.scheduler.cancel_all();
        let now = self.scheduler.now();
        self.session.stop_clock(now);

        let outcome = WinDetector::outcome(&self.session, now);
        info!(?outcome, "Game won");
        self.outcome = Some(outcome.clone());
        self.events.push(GameEvent::GameWon {
            outcome: outcome.clone(),
        });
        Some(outcome)
    }

    // === CPU ===

    fn schedule_cpu_if_due(&mut self) {
        if TurnController::cpu_should_move(&self.session) {
            self.scheduler
                .schedule_after(self.config.settle_delay(), DeferredTask::CpuMove);
        }
    }

    fn cpu_move(&mut self) {
        if !TurnController::cpu_should_move(&self.session) || !self.session.revealed().is_empty() {
            return;
        }
        let Some(cpu) = self.cpu.as_ref() else {
            return;
        };

        match cpu.plan(&self.session, &mut self.rng) {
            CpuPlan::KnownPair(first, second) => {
                if self.cpu_reveal(first) == Some(RevealOutcome::Revealed) {
                    self.scheduler.schedule_after(
                        self.config.cpu_reveal_delay(),
                        DeferredTask::CpuReveal(second),
                    );
                }
            }
            CpuPlan::Explore(first) => {
                if self.cpu_reveal(first) == Some(RevealOutcome::Revealed) {
                    self.scheduler.schedule_after(
                        self.config.cpu_reveal_delay(),
                        DeferredTask::CpuFollowUp { first },
                    );
                }
            }
            CpuPlan::Yield => warn!("CPU has nothing to reveal"),
        }
    }

    fn cpu_follow_up(&mut self, first: CardId) {
        if self.session.revealed() != [first] {
            return;
        }
        let Some(cpu) = self.cpu.as_ref() else {
            return;
        };

        match cpu.choose_second(&self.session, first, &mut self.rng) {
            Some(second) => {
                self.cpu_reveal(second);
            }
            None => warn!(%first, "CPU has no second card to reveal"),
        }
    }

    fn cpu_reveal(&mut self, card: CardId) -> Option<RevealOutcome> {
        match self.reveal_as(card, Actor::Cpu) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(error = %e, "CPU chose an invalid card");
                None
            }
        }
    }

    // === Deferred tasks ===

    /// Fire every task that is due now. Returns the number fired.
    pub fn run_due(&mut self) -> usize {
        let mut fired = 0;
        while let Some(task) = self.scheduler.pop_due() {
            self.fire(task);
            fired += 1;
        }
        fired
    }

    fn fire(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::SettleMismatch { first, second } => self.settle(first, second),
            DeferredTask::CpuMove => self.cpu_move(),
            DeferredTask::CpuReveal(card) => {
                self.cpu_reveal(card);
            }
            DeferredTask::CpuFollowUp { first } => self.cpu_follow_up(first),
            DeferredTask::ClockTick => self.tick(),
        }
    }

    fn tick(&mut self) {
        if self.session.status() == SessionStatus::Won || self.session.started_at().is_none() {
            return;
        }
        let elapsed_seconds = self.session.elapsed_seconds(self.scheduler.now());
        self.events.push(GameEvent::ClockTick { elapsed_seconds });
        self.scheduler
            .schedule_after(self.config.tick_interval(), DeferredTask::ClockTick);
    }

    // === Persistence ===

    /// Create this game with the collaborator and attach the issued id.
    /// Only solo games are recorded.
    pub fn register<P: PersistenceCollaborator>(
        &mut self,
        store: &mut P,
        player: &str,
    ) -> Result<GameId, PersistenceError> {
        if self.session.mode() != GameMode::Solo {
            return Err(PersistenceError::new("only solo games are recorded"));
        }
        let grid_size = self.session.grid_size();
        let id = store.create_game(player, grid_size, grid_size.difficulty_label())?;
        self.attach_game_id(id);
        Ok(id)
    }

    /// Attach an id the collaborator issued for this game.
    pub fn attach_game_id(&mut self, id: GameId) {
        self.game_id = Some(id);
    }

    /// Hand the finished solo record to the collaborator.
    ///
    /// A collaborator failure is logged and reported as
    /// `GameEvent::PersistenceFailed`; the win and score are unaffected and
    /// the call may be retried.
    pub fn submit_result<P: PersistenceCollaborator>(
        &mut self,
        store: &mut P,
    ) -> Result<GameId, PersistenceError> {
        let record = match &self.outcome {
            Some(GameOutcome::Solo(record)) => *record,
            _ => return Err(PersistenceError::new("no finished solo game to submit")),
        };
        let game_id = self
            .game_id
            .ok_or_else(|| PersistenceError::new("no game id attached"))?;

        match store.submit(game_id, &record) {
            Ok(()) => {
                info!(%game_id, score = record.score, "Finished game stored");
                self.events.push(GameEvent::RecordSaved { game_id });
                Ok(game_id)
            }
            Err(e) => {
                warn!(error = %e, %game_id, "Failed to store finished game");
                self.events.push(GameEvent::PersistenceFailed {
                    message: e.message.clone(),
                });
                Err(e)
            }
        }
    }

    // === Views ===

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &SymbolCatalog {
        self.generator.catalog()
    }

    #[must_use]
    pub fn cpu(&self) -> Option<&CpuAgent> {
        self.cpu.as_ref()
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Outcome of the current session once won.
    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn game_id(&self) -> Option<GameId> {
        self.game_id
    }

    /// Current clock time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Redraw data for the current session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.session, self.scheduler.now())
    }

    /// Drain events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Deal a fresh, started session and the CPU agent its mode needs.
fn deal<R: RandomSource>(
    generator: &GridGenerator,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<(Session, Option<CpuAgent>), EngineError> {
    let cards = generator.generate(config.grid_size, rng)?;
    let mut session = Session::new(cards, config.grid_size, config.mode);
    session.start();

    let cpu = config
        .mode
        .cpu_seat()
        .map(|seat| CpuAgent::new(seat, config.cpu_difficulty))
        .transpose()?;

    Ok((session, cpu))
}
