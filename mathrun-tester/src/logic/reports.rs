use anyhow::Result;
use colored::Colorize;
use mathrun_sim::{
    DesktopSimulator, Enhancement, IssueCount, MobileMetrics, MobileSimulator, OutcomeOf,
    Priority,
};
use serde::Serialize;
use std::io::Write;

type DesktopOutcome = OutcomeOf<DesktopSimulator>;
type MobileOutcome = OutcomeOf<MobileSimulator>;

const KEY_FINDINGS: usize = 5;

fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

fn rounded(value: f64) -> String {
    format!("{:.0}", value.round())
}

fn with_priority(items: &[Enhancement], priority: Priority) -> impl Iterator<Item = &Enhancement> {
    items.iter().filter(move |e| e.priority == priority)
}

fn device_share(metrics: &MobileMetrics, count: u32) -> String {
    let total = u32::try_from(metrics.total_sessions.max(1)).unwrap_or(u32::MAX);
    percent(f64::from(count) / f64::from(total))
}

pub fn generate_desktop_console_report<W: Write + ?Sized>(
    w: &mut W,
    outcome: &DesktopOutcome,
) -> Result<()> {
    let m = &outcome.results;
    writeln!(w)?;
    writeln!(w, "{}", "🎮 MATH GAME USER TESTING REPORT".bright_cyan().bold())?;
    writeln!(w, "{}", "=================================".cyan())?;
    writeln!(w)?;

    writeln!(w, "{}", "📊 OVERALL METRICS".bold())?;
    writeln!(w, "- Total Sessions: {}", m.total_sessions)?;
    writeln!(w, "- Completion Rate: {}", percent(m.completion_rate))?;
    writeln!(w, "- Average Score: {}", rounded(m.average_score))?;
    writeln!(w, "- Average Play Time: {}s", rounded(m.average_play_time_secs))?;
    writeln!(w, "- Total Pauses Used: {}", m.pause_usage)?;
    writeln!(w, "- Speed Changes: {}", m.speed_changes)?;
    writeln!(w, "- Rage Quits: {}", m.ragequits.to_string().red())?;
    writeln!(w)?;

    writeln!(w, "{}", "🎯 KEY FINDINGS".bold())?;
    for item in outcome.recommendations.iter().take(KEY_FINDINGS) {
        writeln!(
            w,
            "  {} PRIORITY - {}",
            item.priority.label().yellow(),
            item.category
        )?;
        writeln!(w, "  Issue: {}", item.issue)?;
        writeln!(w, "  Recommendation: {}", item.recommendation)?;
        writeln!(w, "  Implementation: {}", item.implementation)?;
        writeln!(w)?;
    }

    writeln!(w, "{}", "💡 TOP ENHANCEMENT PRIORITIES".bold())?;
    for (i, item) in with_priority(&outcome.recommendations, Priority::High).enumerate() {
        writeln!(w, "  {}. {}", i + 1, item.recommendation.green())?;
        writeln!(w, "     Category: {}", item.category)?;
        writeln!(w, "     Implementation: {}", item.implementation)?;
    }
    writeln!(w)?;

    writeln!(w, "{}", "📈 SPEED PREFERENCES".bold())?;
    for (speed, count) in &m.speed_preferences {
        writeln!(w, "  {speed}: {count} changes")?;
    }
    writeln!(w)?;

    writeln!(w, "{}", "🎨 USER SATISFACTION".bold())?;
    writeln!(w, "Average Enjoyment: {:.1}/10", m.average_enjoyment)?;
    writeln!(w, "Average Difficulty Rating: {:.1}/10", m.average_difficulty)?;
    writeln!(w, "Average Controls Rating: {:.1}/10", m.average_controls)?;
    Ok(())
}

pub fn generate_mobile_console_report<W: Write + ?Sized>(
    w: &mut W,
    outcome: &MobileOutcome,
) -> Result<()> {
    let m = &outcome.results;
    writeln!(w)?;
    writeln!(
        w,
        "{}",
        "📱 MOBILE MATH GAME USER TESTING REPORT".bright_cyan().bold()
    )?;
    writeln!(w, "{}", "=======================================".cyan())?;
    writeln!(w)?;

    writeln!(w, "{}", "📊 MOBILE-SPECIFIC METRICS".bold())?;
    writeln!(w, "- Total Mobile Sessions: {}", m.total_sessions)?;
    writeln!(w, "- Mobile Success Rate: {}", percent(m.success_rate))?;
    writeln!(w, "- Average Mobile Score: {}", rounded(m.average_score))?;
    writeln!(
        w,
        "- Average Usability Score: {:.1}/100",
        m.average_usability_score
    )?;
    writeln!(w, "- Total Touch Interactions: {}", m.total_touch_interactions)?;
    writeln!(w, "- Touch Accuracy: {}", percent(m.average_touch_accuracy))?;
    writeln!(w)?;

    writeln!(w, "{}", "📱 DEVICE BREAKDOWN".bold())?;
    for (device, count) in &m.device_breakdown {
        writeln!(
            w,
            "  {device}: {count} sessions ({})",
            device_share(m, *count)
        )?;
    }
    writeln!(w)?;

    writeln!(w, "{}", "🔄 ORIENTATION BREAKDOWN".bold())?;
    for (orientation, count) in &m.orientation_breakdown {
        writeln!(w, "  {orientation}: {count} sessions")?;
    }
    writeln!(w)?;

    writeln!(w, "{}", "⚠️ CRITICAL MOBILE ISSUES".red().bold())?;
    for (i, item) in with_priority(&outcome.recommendations, Priority::Critical).enumerate() {
        writeln!(w, "  {}. {}", i + 1, item.issue.red())?;
        writeln!(w, "     Recommendation: {}", item.recommendation)?;
        writeln!(w, "     Implementation: {}", item.implementation)?;
        writeln!(w, "     Impact: {}", item.impact)?;
    }
    writeln!(w)?;

    writeln!(w, "{}", "📈 HIGH PRIORITY MOBILE FIXES".yellow().bold())?;
    for (i, item) in with_priority(&outcome.recommendations, Priority::High).enumerate() {
        writeln!(w, "  {}. {}", i + 1, item.issue)?;
        writeln!(w, "     Fix: {}", item.recommendation)?;
        writeln!(w, "     How: {}", item.implementation)?;
    }
    writeln!(w)?;

    writeln!(w, "{}", "🔧 MOBILE ISSUE FREQUENCY".bold())?;
    for IssueCount { kind, count } in &m.common_mobile_issues {
        writeln!(w, "  {kind}: {count} occurrences")?;
    }
    writeln!(w)?;

    let r = &m.average_ratings;
    writeln!(w, "{}", "🎯 MOBILE UX SCORES".bold())?;
    writeln!(w, "Average Touch Controls: {:.1}/10", r.touch_controls)?;
    writeln!(w, "Average Screen Layout: {:.1}/10", r.screen_layout)?;
    writeln!(w, "Average Performance: {:.1}/10", r.performance)?;
    writeln!(w, "Overall Mobile Rating: {:.1}/10", r.overall)?;
    Ok(())
}

fn write_markdown_recommendations<W: Write + ?Sized>(
    w: &mut W,
    items: &[Enhancement],
) -> Result<()> {
    writeln!(w, "## Recommendations\n")?;
    if items.is_empty() {
        writeln!(w, "_No enhancements triggered._\n")?;
        return Ok(());
    }
    writeln!(w, "| Priority | Category | Issue | Recommendation |")?;
    writeln!(w, "|----------|----------|-------|----------------|")?;
    for item in items {
        writeln!(
            w,
            "| {} | {} | {} | {} |",
            item.priority, item.category, item.issue, item.recommendation
        )?;
    }
    writeln!(w)?;
    Ok(())
}

pub fn generate_desktop_markdown_report<W: Write + ?Sized>(
    w: &mut W,
    outcome: &DesktopOutcome,
) -> Result<()> {
    let m = &outcome.results;
    writeln!(w, "# Mathrun Desktop User Testing Report\n")?;
    writeln!(w, "## Summary\n")?;
    writeln!(w, "- **Total sessions**: {}", m.total_sessions)?;
    writeln!(w, "- **Completion rate**: {}", percent(m.completion_rate))?;
    writeln!(w, "- **Average score**: {}", rounded(m.average_score))?;
    writeln!(
        w,
        "- **Average play time**: {}s",
        rounded(m.average_play_time_secs)
    )?;
    writeln!(w, "- **Pauses used**: {}", m.pause_usage)?;
    writeln!(w, "- **Speed changes**: {}", m.speed_changes)?;
    writeln!(
        w,
        "- **Rage quits**: {} ({})\n",
        m.ragequits,
        percent(m.ragequit_rate)
    )?;

    writeln!(w, "## Satisfaction\n")?;
    writeln!(w, "- **Enjoyment**: {:.1}/10", m.average_enjoyment)?;
    writeln!(w, "- **Difficulty**: {:.1}/10", m.average_difficulty)?;
    writeln!(w, "- **Controls**: {:.1}/10\n", m.average_controls)?;

    if !m.speed_preferences.is_empty() {
        writeln!(w, "## Speed Preferences\n")?;
        for (speed, count) in &m.speed_preferences {
            writeln!(w, "- {speed}: {count} changes")?;
        }
        writeln!(w)?;
    }

    write_markdown_recommendations(w, &outcome.recommendations)
}

pub fn generate_mobile_markdown_report<W: Write + ?Sized>(
    w: &mut W,
    outcome: &MobileOutcome,
) -> Result<()> {
    let m = &outcome.results;
    writeln!(w, "# Mathrun Mobile User Testing Report\n")?;
    writeln!(w, "## Summary\n")?;
    writeln!(w, "- **Total sessions**: {}", m.total_sessions)?;
    writeln!(w, "- **Success rate**: {}", percent(m.success_rate))?;
    writeln!(w, "- **Average score**: {}", rounded(m.average_score))?;
    writeln!(
        w,
        "- **Average usability**: {:.1}/100",
        m.average_usability_score
    )?;
    writeln!(w, "- **Touch accuracy**: {}\n", percent(m.average_touch_accuracy))?;

    writeln!(w, "## Devices\n")?;
    for (device, count) in &m.device_breakdown {
        writeln!(w, "- {device}: {count} ({})", device_share(m, *count))?;
    }
    writeln!(w)?;

    if !m.common_mobile_issues.is_empty() {
        writeln!(w, "## Issue Frequency\n")?;
        for IssueCount { kind, count } in &m.common_mobile_issues {
            writeln!(w, "- `{kind}`: {count}")?;
        }
        writeln!(w)?;
    }

    write_markdown_recommendations(w, &outcome.recommendations)
}

pub fn generate_json_report<W: Write + ?Sized, T: Serialize + ?Sized>(
    w: &mut W,
    value: &T,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathrun_sim::{NoDelay, desktop_runner, mobile_runner};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn desktop() -> DesktopOutcome {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        desktop_runner().unwrap().run(12, &mut rng, &mut NoDelay).unwrap()
    }

    fn mobile() -> MobileOutcome {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        mobile_runner().unwrap().run(12, &mut rng, &mut NoDelay).unwrap()
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn desktop_console_lists_every_section() {
        let outcome = desktop();
        let text = render(|w| generate_desktop_console_report(w, &outcome));
        for heading in [
            "OVERALL METRICS",
            "KEY FINDINGS",
            "TOP ENHANCEMENT PRIORITIES",
            "SPEED PREFERENCES",
            "USER SATISFACTION",
        ] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.contains("- Total Sessions: 12"));
    }

    #[test]
    fn mobile_console_lists_every_section() {
        let outcome = mobile();
        let text = render(|w| generate_mobile_console_report(w, &outcome));
        for heading in [
            "MOBILE-SPECIFIC METRICS",
            "DEVICE BREAKDOWN",
            "ORIENTATION BREAKDOWN",
            "CRITICAL MOBILE ISSUES",
            "HIGH PRIORITY MOBILE FIXES",
            "MOBILE ISSUE FREQUENCY",
            "MOBILE UX SCORES",
        ] {
            assert!(text.contains(heading), "missing {heading}");
        }
    }

    #[test]
    fn markdown_reports_have_titles_and_tables() {
        let d = desktop();
        let text = render(|w| generate_desktop_markdown_report(w, &d));
        assert!(text.starts_with("# Mathrun Desktop User Testing Report"));
        assert!(text.contains("## Recommendations"));

        let m = mobile();
        let text = render(|w| generate_mobile_markdown_report(w, &m));
        assert!(text.starts_with("# Mathrun Mobile User Testing Report"));
        assert!(text.contains("## Devices"));
    }

    #[test]
    fn json_report_is_parseable() {
        let outcome = desktop();
        let text = render(|w| generate_json_report(w, &outcome));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["rawData"].as_array().map(Vec::len), Some(12));
    }

    #[test]
    fn percent_and_rounding_helpers() {
        assert_eq!(percent(0.4567), "45.7%");
        assert_eq!(rounded(2.5), "3");
    }
}
