//! The [`Game`] composition root.
//!
//! One `Game` owns every piece of mutable state: the ledger, the day clock,
//! the Docks, the shade roster, the spawner and its RNG, and the event bus.
//! There are no globals. A host builds a `Game` from a [`GameConfig`], keeps
//! it for the whole session, and calls [`Game::reset`] to start over.
//!
//! Every mutating call runs to completion synchronously and delivers its
//! events to subscribers before returning.

use std::collections::BTreeMap;

use ferryman_events::{EventBus, EventKind, GameEvent, SubscriptionId};
use ferryman_ledger::{Ledger, LedgerError};
use ferryman_shades::{HiredSummary, Shade, ShadeError, ShadeRoster, ShadeSpawner};
use ferryman_types::{Afterlife, Phase, ResourceKind, SaveState, ShadeId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::clock::{ClockError, PhaseAdvance, PhaseClock};
use crate::config::{ConfigError, GameConfig};
use crate::docks::{Docks, DocksError};
use crate::save::{self, SaveError};

/// Errors surfaced by [`Game`] operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The configuration is unusable.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The day clock refused to move.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The Docks rejected a shade.
    #[error("docks error: {source}")]
    Docks {
        /// The underlying Docks error.
        #[from]
        source: DocksError,
    },

    /// A shade could not be created, judged, or hired.
    #[error("shade error: {source}")]
    Shade {
        /// The underlying shade error.
        #[from]
        source: ShadeError,
    },

    /// A ledger mutation was rejected.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },

    /// A snapshot could not be restored.
    #[error("save error: {source}")]
    Save {
        /// The underlying save error.
        #[from]
        source: SaveError,
    },
}

/// A running Ferryman session.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    ledger: Ledger,
    clock: PhaseClock,
    docks: Docks,
    roster: ShadeRoster,
    spawner: ShadeSpawner,
    rng: StdRng,
    bus: EventBus,
}

impl Game {
    /// Build a game in its configured initial state.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if the configuration fails validation,
    /// or the relevant component error if a component rejects its section.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let ledger = Ledger::with_cast(config.ledger.cast.iter().cloned())
            .with_starting_resources(&config.ledger.starting_resources)?;
        let clock = PhaseClock::new(&config.clock)?;
        let docks = Docks::new(config.docks.daily_processing_limit)?;
        let spawner = ShadeSpawner::new(&config.spawner)?;
        let rng = match config.spawner.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        info!(
            max_days = clock.max_days(),
            day = clock.day(),
            daily_processing_limit = docks.daily_processing_limit(),
            batch_size = spawner.batch_size(),
            cast = config.ledger.cast.len(),
            "Game initialized"
        );

        Ok(Self {
            config,
            ledger,
            clock,
            docks,
            roster: ShadeRoster::new(),
            spawner,
            rng,
            bus: EventBus::new(),
        })
    }

    /// Tear everything down to the configured initial state.
    ///
    /// Subscribers stay registered. Nothing is emitted; hosts that need to
    /// resynchronize should read state back after the call. The RNG is
    /// re-seeded from config, so a seeded game replays the same shades.
    ///
    /// # Errors
    ///
    /// Returns an error only if the stored configuration has become
    /// unusable, which cannot happen through this type's API. The game and
    /// its subscribers are untouched in that case.
    pub fn reset(&mut self) -> Result<(), GameError> {
        let mut fresh = Self::new(self.config.clone())?;
        std::mem::swap(&mut fresh.bus, &mut self.bus);
        *self = fresh;
        info!("Game reset");
        Ok(())
    }

    /// Return the configuration this game was built from.
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Subscriptions
    // -----------------------------------------------------------------------

    /// Subscribe to one kind of event.
    pub fn subscribe<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.bus.subscribe(kind, callback)
    }

    /// Subscribe to every event.
    pub fn subscribe_all<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.bus.subscribe_all(callback)
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // -----------------------------------------------------------------------
    // Clock
    // -----------------------------------------------------------------------

    /// Move the clock one phase forward.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Clock`] if the day counter would overflow.
    pub fn advance_phase(&mut self) -> Result<PhaseAdvance, GameError> {
        Ok(self.clock.advance(&mut self.bus)?)
    }

    /// Return the current day number.
    pub const fn day(&self) -> u32 {
        self.clock.day()
    }

    /// Return the current phase.
    pub const fn phase(&self) -> Phase {
        self.clock.phase()
    }

    /// Return whether the end-of-game signal has fired.
    pub const fn is_over(&self) -> bool {
        self.clock.is_over()
    }

    /// Return the day clock.
    pub const fn clock(&self) -> &PhaseClock {
        &self.clock
    }

    // -----------------------------------------------------------------------
    // Ledger
    // -----------------------------------------------------------------------

    /// Return the current value of a resource counter.
    pub fn resource(&self, kind: ResourceKind) -> i64 {
        self.ledger.resource(kind)
    }

    /// Apply `delta` to a resource. Returns `false` if it would overdraw.
    pub fn modify_resource(&mut self, kind: ResourceKind, delta: i64) -> bool {
        self.ledger.modify_resource(kind, delta, &mut self.bus)
    }

    /// Apply `delta` to a resource, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Ledger`] if the change would overdraw or
    /// overflow the counter.
    pub fn try_modify_resource(&mut self, kind: ResourceKind, delta: i64) -> Result<i64, GameError> {
        Ok(self.ledger.try_modify_resource(kind, delta, &mut self.bus)?)
    }

    /// Return the relationship with `name`, 0 for strangers.
    pub fn relationship(&self, name: &str) -> i64 {
        self.ledger.relationship(name)
    }

    /// Apply `delta` to the relationship with `name`; strangers are ignored.
    pub fn modify_relationship(&mut self, name: &str, delta: i64) -> Option<i64> {
        self.ledger.modify_relationship(name, delta, &mut self.bus)
    }

    /// Set a single flag.
    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.ledger.set_flag(name, value, &mut self.bus);
    }

    /// Return a flag's value, `false` if unset.
    pub fn flag(&self, name: &str) -> bool {
        self.ledger.flag(name)
    }

    /// Return whether a flag exists, regardless of its value.
    pub fn has_flag(&self, name: &str) -> bool {
        self.ledger.has_flag(name)
    }

    /// Remove a flag. Returns whether it existed.
    pub fn remove_flag(&mut self, name: &str) -> bool {
        self.ledger.remove_flag(name, &mut self.bus)
    }

    /// Write a batch of flags under a single notification.
    pub fn set_flags(&mut self, batch: &BTreeMap<String, bool>) {
        self.ledger.set_flags(batch, &mut self.bus);
    }

    /// Return every flag whose name starts with `prefix`.
    pub fn flags_with_prefix(&self, prefix: &str) -> BTreeMap<String, bool> {
        self.ledger.flags_with_prefix(prefix)
    }

    /// Return whether every named flag is set to `true`.
    pub fn all_flags_set(&self, names: &[&str]) -> bool {
        self.ledger.all_flags_set(names)
    }

    /// Return whether any named flag is set to `true`.
    pub fn any_flag_set(&self, names: &[&str]) -> bool {
        self.ledger.any_flag_set(names)
    }

    /// Remove every flag starting with `prefix`. Returns how many went.
    pub fn remove_all_flags_with_prefix(&mut self, prefix: &str) -> usize {
        self.ledger.remove_all_flags_with_prefix(prefix, &mut self.bus)
    }

    /// Return the ledger.
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // -----------------------------------------------------------------------
    // Shades
    // -----------------------------------------------------------------------

    /// Sweep away un-hired shades and spawn a fresh batch.
    ///
    /// Returns the new pending pool.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Shade`] if a spawned shade is invalid.
    pub fn spawn_shades(&mut self) -> Result<&[Shade], GameError> {
        let swept = self.roster.clear_pending();
        let batch = self.spawner.spawn_batch(&mut self.rng)?;
        info!(
            day = self.clock.day(),
            spawned = batch.len(),
            swept,
            "New shades arrived"
        );
        self.roster.add_batch(batch);
        Ok(self.roster.pending())
    }

    /// Return the shades awaiting a decision.
    pub fn pending_shades(&self) -> &[Shade] {
        self.roster.pending()
    }

    /// Return the shades the player has hired.
    pub fn hired_shades(&self) -> &[Shade] {
        self.roster.hired()
    }

    /// Count hired shades by origin and by occupation.
    pub fn hired_summary(&self) -> HiredSummary {
        self.roster.hired_summary()
    }

    /// Judge a pending shade and send it to the Docks.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Shade`] if the shade is not pending or was
    /// already judged.
    pub fn assign_afterlife(&mut self, id: ShadeId, afterlife: Afterlife) -> Result<(), GameError> {
        let shade = self.roster.assign(id, afterlife)?;
        self.docks.enqueue(shade)?;
        Ok(())
    }

    /// Keep a pending shade on as a worker.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Shade`] if the shade is not pending.
    pub fn hire_shade(&mut self, id: ShadeId) -> Result<&Shade, GameError> {
        Ok(self.roster.hire(id)?)
    }

    // -----------------------------------------------------------------------
    // Docks
    // -----------------------------------------------------------------------

    /// Put a judged shade straight onto the Docks queue.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Docks`] if the shade has no assigned afterlife.
    pub fn enqueue(&mut self, shade: Shade) -> Result<(), GameError> {
        Ok(self.docks.enqueue(shade)?)
    }

    /// Ferry up to the daily limit of shades. Returns how many went.
    pub fn drain(&mut self) -> usize {
        self.docks.drain(&mut self.bus)
    }

    /// Run the end-of-day work: drain the Docks.
    pub fn end_of_day(&mut self) -> usize {
        let processed = self.drain();
        info!(
            day = self.clock.day(),
            processed,
            waiting = self.docks.queue_length(),
            "Day closed"
        );
        processed
    }

    /// Return the number of shades waiting at the Docks.
    pub fn queue_length(&self) -> usize {
        self.docks.queue_length()
    }

    /// Return the Docks.
    pub const fn docks(&self) -> &Docks {
        &self.docks
    }

    // -----------------------------------------------------------------------
    // Save / restore
    // -----------------------------------------------------------------------

    /// Capture the clock and ledger as a snapshot.
    pub fn export_state(&self) -> SaveState {
        save::export(&self.clock, &self.ledger)
    }

    /// Replace clock and ledger state from a snapshot.
    ///
    /// The snapshot is validated in full before anything is written. On
    /// success observers receive `DayChanged`, `PhaseChanged`, then one
    /// `ResourceChanged` per resource, one `RelationshipChanged` per cast
    /// member, and one `FlagChanged` per flag. Pending shades, hired shades
    /// and the Docks queue are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Save`] if the snapshot is rejected; the game is
    /// unchanged in that case.
    pub fn import_state(&mut self, state: &SaveState) -> Result<(), GameError> {
        if let Err(e) = save::validate(state) {
            warn!(error = %e, "Rejected save state");
            return Err(e.into());
        }

        self.clock.restore(state.day, state.phase, &mut self.bus);
        self.ledger
            .restore(
                &state.resources,
                &state.relationships,
                &state.flags,
                &mut self.bus,
            )
            .map_err(SaveError::from)?;

        info!(day = state.day, phase = %state.phase, version = state.version, "State imported");
        Ok(())
    }
}
