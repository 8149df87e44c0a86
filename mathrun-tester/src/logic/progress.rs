use anyhow::Result;
use colored::Colorize;
use mathrun_sim::{OutcomeOf, SimulationRunner, Simulator};
use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const TICK: Duration = Duration::from_secs(1);

pub fn progress_line(label: &str, completed: usize, total: usize) -> String {
    format!("{label} progress: {completed}/{total} sessions completed")
}

/// Run `count` sessions with `delay` between them while a background task
/// prints the completed count once a second.
pub async fn run_with_ticker<S, R>(
    runner: &SimulationRunner<S>,
    count: usize,
    rng: &mut R,
    delay: Duration,
) -> Result<OutcomeOf<S>>
where
    S: Simulator,
    R: Rng + ?Sized,
{
    let label = runner.simulator().name();
    let progress = Arc::new(AtomicUsize::new(0));

    let ticker = {
        let progress = Arc::clone(&progress);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK);
            // The first tick fires immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let completed = progress.load(Ordering::Relaxed);
                println!("{}", progress_line(label, completed, count).dimmed());
            }
        })
    };

    let outcome = runner.run_paced(count, rng, delay, &progress).await;
    ticker.abort();

    let outcome = outcome?;
    println!(
        "{}",
        progress_line(label, outcome.raw_data.len(), count).green()
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn progress_line_mentions_counts() {
        assert_eq!(
            progress_line("mobile", 12, 40),
            "mobile progress: 12/40 sessions completed"
        );
    }

    #[test]
    fn ticker_run_returns_every_session() {
        let runner = mathrun_sim::desktop_runner().unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(21);
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let outcome = rt
            .block_on(run_with_ticker(&runner, 4, &mut rng, Duration::ZERO))
            .unwrap();
        assert_eq!(outcome.raw_data.len(), 4);
    }

    #[test]
    fn zero_sessions_propagate_the_error() {
        let runner = mathrun_sim::mobile_runner().unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let result = tokio_test::block_on(run_with_ticker(&runner, 0, &mut rng, Duration::ZERO));
        assert!(result.is_err());
    }
}
