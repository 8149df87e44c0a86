//! Desktop variant: keyboard play with speed control and a pause menu.

mod analysis;
mod enhancements;
mod feedback;
mod frustration;
mod session;

pub use analysis::{DesktopMetrics, RecommendationCount, analyze_desktop, pauses_per_session};
pub use enhancements::desktop_enhancements;
pub use feedback::{REC_PAUSE_MENU, REC_SPEED_ADJUSTMENT};
pub use frustration::{
    FrustrationResponse, handle_frustration, quit_probability, suggest_speed_change,
};
pub use session::{DesktopSession, FailureReason, problem_level, simulate_desktop};

use rand::Rng;

use crate::enhancement::Enhancement;
use crate::profile::DesktopProfile;
use crate::runner::Simulator;

#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopSimulator;

impl Simulator for DesktopSimulator {
    type Profile = DesktopProfile;
    type Session = DesktopSession;
    type Metrics = DesktopMetrics;

    fn name(&self) -> &'static str {
        "desktop"
    }

    fn simulate<R: Rng + ?Sized>(
        &self,
        profile: &DesktopProfile,
        session_id: u32,
        rng: &mut R,
    ) -> DesktopSession {
        simulate_desktop(profile, session_id, rng)
    }

    fn analyze(&self, sessions: &[DesktopSession]) -> DesktopMetrics {
        analyze_desktop(sessions)
    }

    fn recommend(&self, metrics: &DesktopMetrics) -> Vec<Enhancement> {
        desktop_enhancements(metrics)
    }
}
