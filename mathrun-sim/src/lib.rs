//! Mathrun Session Simulator
//!
//! Synthetic user-testing engine for the Mathrun arithmetic runner. Simulates
//! desktop and mobile play sessions for archetypal players, aggregates the
//! batch into metrics and derives prioritized enhancement recommendations.
//! This crate has no UI, filesystem or clock dependencies; callers inject the
//! random source and the pacing between sessions.

pub mod action;
mod constants;
pub mod desktop;
pub mod enhancement;
pub mod error;
pub mod feedback;
pub mod mobile;
pub mod numbers;
pub mod profile;
mod rng;
pub mod runner;

// Re-export commonly used types
pub use action::{Action, ActionKind, ActionLog, SpeedChangeReason};
pub use desktop::{DesktopMetrics, DesktopSession, DesktopSimulator, FailureReason};
pub use enhancement::{Enhancement, Impact, Priority, rank_enhancements};
pub use error::SimError;
pub use feedback::{Feedback, Recommendations};
pub use mobile::{
    IssueCount, IssueKind, IssueTally, MobileIssue, MobileMetrics, MobileRatings, MobileSession,
    MobileSimulator, QuitReason,
};
pub use profile::{
    DesktopArchetype, DesktopProfile, Device, MobileArchetype, MobileProfile, Orientation,
    Profile, ProfileCatalog, ScreenSize, SpeedPref, desktop_profiles, mobile_profiles,
};
pub use runner::{
    NoDelay, OutcomeOf, Progress, RunOutcome, Scheduler, SimulationRunner, Simulator,
};

/// Runner over the built-in desktop catalog.
///
/// # Errors
///
/// Returns an error if the built-in catalog fails validation.
pub fn desktop_runner() -> Result<SimulationRunner<DesktopSimulator>, SimError> {
    Ok(SimulationRunner::new(
        DesktopSimulator,
        ProfileCatalog::new(desktop_profiles())?,
    ))
}

/// Runner over the built-in mobile catalog.
///
/// # Errors
///
/// Returns an error if the built-in catalog fails validation.
pub fn mobile_runner() -> Result<SimulationRunner<MobileSimulator>, SimError> {
    Ok(SimulationRunner::new(
        MobileSimulator,
        ProfileCatalog::new(mobile_profiles())?,
    ))
}
