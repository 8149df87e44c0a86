mod logic;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use mathrun_sim::{
    DesktopSimulator, MobileSimulator, OutcomeOf, ProfileCatalog, SimulationRunner, Simulator,
    desktop_profiles, mobile_profiles,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use logic::{
    fingerprint, generate_desktop_console_report, generate_desktop_markdown_report,
    generate_json_report, generate_mobile_console_report, generate_mobile_markdown_report,
    load_catalog, run_with_ticker, save_outcome,
};

const DESKTOP_SESSIONS: usize = 50;
const MOBILE_SESSIONS: usize = 40;
const DESKTOP_DELAY: Duration = Duration::from_millis(50);
const MOBILE_DELAY: Duration = Duration::from_millis(80);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Keyboard-driven desktop sessions
    Desktop,
    /// Touch-driven phone and tablet sessions
    Mobile,
    /// Desktop batch followed by a mobile batch
    Both,
}

impl Variant {
    const fn runs_desktop(self) -> bool {
        matches!(self, Self::Desktop | Self::Both)
    }

    const fn runs_mobile(self) -> bool {
        matches!(self, Self::Mobile | Self::Both)
    }
}

#[derive(Debug, Parser)]
#[command(name = "mathrun-tester", version = "0.1.0")]
#[command(about = "Synthetic user testing for Mathrun - simulated desktop and mobile players")]
struct Args {
    /// Platform variant to simulate
    #[arg(long, value_enum, default_value_t = Variant::Desktop)]
    variant: Variant,

    /// Sessions per variant (defaults: 50 desktop, 40 mobile)
    #[arg(long)]
    sessions: Option<usize>,

    /// Seed for the random source; a fresh one is drawn and printed when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory receiving the timestamped results files
    #[arg(long, default_value = ".")]
    save_dir: PathBuf,

    /// Skip writing results files
    #[arg(long)]
    no_save: bool,

    /// JSON file replacing the built-in desktop profiles
    #[arg(long)]
    profiles: Option<PathBuf>,

    /// JSON file replacing the built-in mobile profiles
    #[arg(long)]
    mobile_profiles: Option<PathBuf>,

    /// Pause between sessions in milliseconds (defaults: 50 desktop, 80 mobile)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Default, Serialize)]
struct Outcomes {
    #[serde(skip_serializing_if = "Option::is_none")]
    desktop: Option<OutcomeOf<DesktopSimulator>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mobile: Option<OutcomeOf<MobileSimulator>>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    announce_banner();
    let start_time = Instant::now();

    let seed = args.seed.unwrap_or_else(rand::random);
    println!("🎲 Seed: {}", seed.to_string().yellow());
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let mut outcomes = Outcomes::default();
    if args.variant.runs_desktop() {
        let catalog = load_catalog(args.profiles.as_deref(), desktop_profiles)?;
        let outcome = run_variant(
            &args,
            DesktopSimulator,
            catalog,
            DESKTOP_SESSIONS,
            DESKTOP_DELAY,
            &mut rng,
        )
        .await?;
        persist(&args, "test_results", &outcome)?;
        outcomes.desktop = Some(outcome);
    }
    if args.variant.runs_mobile() {
        let catalog = load_catalog(args.mobile_profiles.as_deref(), mobile_profiles)?;
        let outcome = run_variant(
            &args,
            MobileSimulator,
            catalog,
            MOBILE_SESSIONS,
            MOBILE_DELAY,
            &mut rng,
        )
        .await?;
        persist(&args, "mobile_test_results", &outcome)?;
        outcomes.mobile = Some(outcome);
    }

    write_reports(&args, &outcomes)?;
    log::info!("finished in {:?}", start_time.elapsed());
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let init = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .try_init();
    if let Err(err) = init {
        eprintln!("logging already initialized: {err}");
    }
}

fn announce_banner() {
    println!("{}", "🧪 Mathrun User Testing Simulator".bright_cyan().bold());
    println!("{}", "=================================".cyan());
}

async fn run_variant<S: Simulator>(
    args: &Args,
    simulator: S,
    catalog: ProfileCatalog<S::Profile>,
    default_sessions: usize,
    default_delay: Duration,
    rng: &mut ChaCha20Rng,
) -> Result<OutcomeOf<S>> {
    let sessions = args.sessions.unwrap_or(default_sessions);
    let delay = args
        .delay_ms
        .map_or(default_delay, Duration::from_millis);
    let runner = SimulationRunner::new(simulator, catalog);
    println!(
        "{} {} ({sessions} sessions, {} profiles)",
        "▶ Simulating".bold(),
        runner.simulator().name(),
        runner.catalog().len()
    );
    run_with_ticker(&runner, sessions, rng, delay)
        .await
        .with_context(|| format!("{} simulation failed", runner.simulator().name()))
}

fn persist<M: Serialize, S: Serialize>(
    args: &Args,
    prefix: &str,
    outcome: &mathrun_sim::RunOutcome<M, S>,
) -> Result<Option<PathBuf>> {
    let digest = fingerprint(&outcome.raw_data)?;
    println!("🔏 Session fingerprint: {}", digest.dimmed());
    if args.no_save {
        return Ok(None);
    }
    let path = save_outcome(&args.save_dir, prefix, outcome, Utc::now())?;
    println!("📄 Detailed results saved to: {}", path.display());
    Ok(Some(path))
}

fn write_reports(args: &Args, outcomes: &Outcomes) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.as_deref())?;

    match args.report.as_str() {
        "json" => match (&outcomes.desktop, &outcomes.mobile) {
            (Some(desktop), None) => generate_json_report(&mut output_target, desktop)?,
            (None, Some(mobile)) => generate_json_report(&mut output_target, mobile)?,
            _ => generate_json_report(&mut output_target, outcomes)?,
        },
        "markdown" => {
            if let Some(desktop) = &outcomes.desktop {
                generate_desktop_markdown_report(&mut output_target, desktop)?;
            }
            if let Some(mobile) = &outcomes.mobile {
                generate_mobile_markdown_report(&mut output_target, mobile)?;
            }
        }
        _ => {
            if let Some(desktop) = &outcomes.desktop {
                generate_desktop_console_report(&mut output_target, desktop)?;
            }
            if let Some(mobile) = &outcomes.mobile {
                generate_mobile_console_report(&mut output_target, mobile)?;
            }
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathrun_sim::{NoDelay, desktop_runner, mobile_runner};

    fn base_args() -> Args {
        Args {
            variant: Variant::Desktop,
            sessions: Some(3),
            seed: Some(42),
            report: "console".to_string(),
            output: None,
            save_dir: std::env::temp_dir(),
            no_save: true,
            profiles: None,
            mobile_profiles: None,
            delay_ms: Some(0),
            verbose: false,
        }
    }

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mathrun-main-{label}-{}", std::process::id()))
    }

    fn sample_outcomes() -> Outcomes {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        Outcomes {
            desktop: Some(desktop_runner().unwrap().run(4, &mut rng, &mut NoDelay).unwrap()),
            mobile: Some(mobile_runner().unwrap().run(4, &mut rng, &mut NoDelay).unwrap()),
        }
    }

    #[test]
    fn variant_selects_batches() {
        assert!(Variant::Desktop.runs_desktop() && !Variant::Desktop.runs_mobile());
        assert!(!Variant::Mobile.runs_desktop() && Variant::Mobile.runs_mobile());
        assert!(Variant::Both.runs_desktop() && Variant::Both.runs_mobile());
    }

    #[test]
    fn args_parse_defaults() {
        let args = Args::try_parse_from(["mathrun-tester"]).unwrap();
        assert_eq!(args.variant, Variant::Desktop);
        assert_eq!(args.report, "console");
        assert_eq!(args.save_dir, PathBuf::from("."));
        assert!(args.sessions.is_none() && args.seed.is_none());
    }

    #[test]
    fn args_reject_unknown_report_format() {
        assert!(Args::try_parse_from(["mathrun-tester", "--report", "csv"]).is_err());
    }

    #[test]
    fn write_reports_emits_combined_json() {
        let temp = temp_path("both.json");
        let args = Args {
            report: "json".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &sample_outcomes()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&temp).unwrap()).unwrap();
        assert!(value["desktop"]["results"].is_object());
        assert_eq!(value["mobile"]["rawData"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn write_reports_emits_single_variant_json_unwrapped() {
        let temp = temp_path("desktop.json");
        let args = Args {
            report: "json".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        let outcomes = Outcomes {
            mobile: None,
            ..sample_outcomes()
        };
        write_reports(&args, &outcomes).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&temp).unwrap()).unwrap();
        assert!(value.get("rawData").is_some());
        assert!(value.get("desktop").is_none());
    }

    #[test]
    fn write_reports_emits_markdown_for_both() {
        let temp = temp_path("report.md");
        let args = Args {
            report: "markdown".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &sample_outcomes()).unwrap();
        let text = std::fs::read_to_string(&temp).unwrap();
        assert!(text.contains("# Mathrun Desktop User Testing Report"));
        assert!(text.contains("# Mathrun Mobile User Testing Report"));
    }

    #[test]
    fn write_reports_emits_console_report() {
        let temp = temp_path("report.txt");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &sample_outcomes()).unwrap();
        let text = std::fs::read_to_string(&temp).unwrap();
        assert!(text.contains("MATH GAME USER TESTING REPORT"));
        assert!(text.contains("MOBILE UX SCORES"));
    }

    #[test]
    fn persist_respects_no_save() {
        let outcomes = sample_outcomes();
        let desktop = outcomes.desktop.as_ref().unwrap();
        assert!(persist(&base_args(), "test_results", desktop).unwrap().is_none());

        let dir = temp_path("saved");
        let args = Args {
            no_save: false,
            save_dir: dir.clone(),
            ..base_args()
        };
        let path = persist(&args, "test_results", desktop).unwrap().unwrap();
        assert!(path.starts_with(&dir));
        assert!(path.exists());
    }

    #[test]
    fn repeated_logging_init_does_not_panic() {
        init_logging(false);
        init_logging(true);
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
    }
}
