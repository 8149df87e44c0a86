//! Batch execution of independent sessions.

use rand::Rng;
use serde::Serialize;

use crate::enhancement::{Enhancement, rank_enhancements};
use crate::error::SimError;
use crate::profile::{Profile, ProfileCatalog};

/// A session simulator plus the analytics that summarize its output.
///
/// Implemented once per platform variant (desktop, mobile).
pub trait Simulator {
    type Profile: Profile;
    type Session: Serialize;
    type Metrics: Serialize;

    /// Short label used in progress output.
    fn name(&self) -> &'static str;

    /// Run one session to completion.
    fn simulate<R: Rng + ?Sized>(
        &self,
        profile: &Self::Profile,
        session_id: u32,
        rng: &mut R,
    ) -> Self::Session;

    /// Fold a finished batch into summary metrics.
    fn analyze(&self, sessions: &[Self::Session]) -> Self::Metrics;

    /// Derive action items from summary metrics, in generation order.
    fn recommend(&self, metrics: &Self::Metrics) -> Vec<Enhancement>;
}

/// Progress snapshot handed to the scheduler after each session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

/// Suspension point between sessions. Carries no ordering requirement.
pub trait Scheduler {
    fn pause(&mut self, progress: Progress);
}

/// Scheduler that never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Scheduler for NoDelay {
    fn pause(&mut self, _progress: Progress) {}
}

/// The object handed to reporting and persistence layers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome<M, S> {
    pub results: M,
    pub recommendations: Vec<Enhancement>,
    pub raw_data: Vec<S>,
}

pub type OutcomeOf<S> = RunOutcome<<S as Simulator>::Metrics, <S as Simulator>::Session>;

pub struct SimulationRunner<S: Simulator> {
    simulator: S,
    catalog: ProfileCatalog<S::Profile>,
}

impl<S: Simulator> SimulationRunner<S> {
    pub const fn new(simulator: S, catalog: ProfileCatalog<S::Profile>) -> Self {
        Self { simulator, catalog }
    }

    #[must_use]
    pub const fn simulator(&self) -> &S {
        &self.simulator
    }

    #[must_use]
    pub const fn catalog(&self) -> &ProfileCatalog<S::Profile> {
        &self.catalog
    }

    /// Execute `count` sessions in order, pausing through `scheduler` between
    /// them, then analyze the batch.
    ///
    /// # Errors
    ///
    /// Returns an error when `count` is zero.
    pub fn run<R, Sch>(
        &self,
        count: usize,
        rng: &mut R,
        scheduler: &mut Sch,
    ) -> Result<OutcomeOf<S>, SimError>
    where
        R: Rng + ?Sized,
        Sch: Scheduler + ?Sized,
    {
        ensure_count(count)?;
        log::info!("{} run starting: {count} sessions", self.simulator.name());
        let mut sessions = Vec::with_capacity(count);
        for index in 0..count {
            sessions.push(self.session_at(index, rng));
            scheduler.pause(Progress {
                completed: index + 1,
                total: count,
            });
        }
        Ok(self.finish(sessions))
    }

    /// Async variant of [`Self::run`] that sleeps `delay` between sessions
    /// and publishes the completed count through `progress`.
    ///
    /// # Errors
    ///
    /// Returns an error when `count` is zero.
    #[cfg(feature = "async")]
    pub async fn run_paced<R>(
        &self,
        count: usize,
        rng: &mut R,
        delay: std::time::Duration,
        progress: &std::sync::atomic::AtomicUsize,
    ) -> Result<OutcomeOf<S>, SimError>
    where
        R: Rng + ?Sized,
    {
        use std::sync::atomic::Ordering;

        ensure_count(count)?;
        log::info!("{} paced run starting: {count} sessions", self.simulator.name());
        let mut sessions = Vec::with_capacity(count);
        for index in 0..count {
            sessions.push(self.session_at(index, rng));
            progress.store(index + 1, Ordering::Relaxed);
            tokio::time::sleep(delay).await;
        }
        Ok(self.finish(sessions))
    }

    fn session_at<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> S::Session {
        let profile = self.catalog.pick(rng);
        let session_id = u32::try_from(index + 1).unwrap_or(u32::MAX);
        log::debug!(
            "{} session {session_id}: profile {}",
            self.simulator.name(),
            profile.label()
        );
        self.simulator.simulate(profile, session_id, rng)
    }

    fn finish(&self, sessions: Vec<S::Session>) -> OutcomeOf<S> {
        let results = self.simulator.analyze(&sessions);
        let recommendations = rank_enhancements(self.simulator.recommend(&results));
        log::info!(
            "{} run finished: {} sessions, {} recommendations",
            self.simulator.name(),
            sessions.len(),
            recommendations.len()
        );
        RunOutcome {
            results,
            recommendations,
            raw_data: sessions,
        }
    }
}

fn ensure_count(count: usize) -> Result<(), SimError> {
    if count == 0 {
        Err(SimError::NoSessions)
    } else {
        Ok(())
    }
}
