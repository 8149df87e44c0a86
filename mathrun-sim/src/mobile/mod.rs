//! Mobile variant: touch input, small screens and device interruptions.

mod analysis;
mod enhancements;
mod feedback;
mod issues;
mod session;

pub use analysis::{IssueCount, MobileMetrics, analyze_mobile};
pub use enhancements::mobile_enhancements;
pub use feedback::{MobileRatings, mobile_ratings, usability_score};
pub use issues::{IssueDetail, IssueKind, IssueTally, MobileIssue};
pub use session::{MobileSession, QuitReason, mobile_problem_level, simulate_mobile};

use rand::Rng;

use crate::enhancement::Enhancement;
use crate::profile::MobileProfile;
use crate::runner::Simulator;

#[derive(Debug, Clone, Copy, Default)]
pub struct MobileSimulator;

impl Simulator for MobileSimulator {
    type Profile = MobileProfile;
    type Session = MobileSession;
    type Metrics = MobileMetrics;

    fn name(&self) -> &'static str {
        "mobile"
    }

    fn simulate<R: Rng + ?Sized>(
        &self,
        profile: &MobileProfile,
        session_id: u32,
        rng: &mut R,
    ) -> MobileSession {
        simulate_mobile(profile, session_id, rng)
    }

    fn analyze(&self, sessions: &[MobileSession]) -> MobileMetrics {
        analyze_mobile(sessions)
    }

    fn recommend(&self, metrics: &MobileMetrics) -> Vec<Enhancement> {
        mobile_enhancements(metrics)
    }
}
