//! Simulate command implementation.
//!
//! Runs the hold state machine on a virtual timeline and reports what the
//! button did, as text or JSON.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::hold::simulate::{Outcome, SimulationReport};
use crate::hold::{simulate, Scenario};

/// Run `scenario` and print the report to stdout.
pub fn simulate_command(scenario: &Scenario, json: bool) -> anyhow::Result<SimulationReport> {
    let report = simulate(scenario)?;
    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, scenario, &report, json)?;
    Ok(report)
}

/// Write `report` in the requested format.
pub fn write_report(
    out: &mut dyn Write,
    scenario: &Scenario,
    report: &SimulationReport,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
    } else {
        out.write_all(format_report(scenario, report).as_bytes())?;
    }
    Ok(())
}

/// Human-readable report.
pub fn format_report(scenario: &Scenario, report: &SimulationReport) -> String {
    let presses = if scenario.repeat == 1 { "press" } else { "presses" };
    let outcomes = report
        .outcomes
        .iter()
        .map(|o| match o {
            Outcome::Completed => "\x1b[32mcompleted\x1b[0m",
            Outcome::Cancelled => "\x1b[33mcancelled\x1b[0m",
        })
        .collect::<Vec<_>>()
        .join(", ");
    let session = &report.final_session;

    let mut text = String::new();
    let _ = writeln!(
        text,
        "\x1b[1m{} {presses} on \"{}\"\x1b[0m \x1b[2m(duration {} ms, tick {} ms, hold {} ms)\x1b[0m",
        scenario.repeat,
        scenario.label,
        report.duration_ms,
        report.granularity_ms,
        report.hold_ms,
    );
    let _ = writeln!(text, "  {:<16} {}", "ticks applied", report.ticks_applied);
    let _ = writeln!(text, "  {:<16} {:.2}", "peak progress", report.peak_progress);
    let _ = writeln!(text, "  {:<16} {}", "actions fired", report.completions);
    let _ = writeln!(text, "  {:<16} {}", "cancelled", report.cancellations);
    let _ = writeln!(text, "  {:<16} {}", "outcomes", outcomes);
    let _ = writeln!(
        text,
        "  {:<16} holding={} finished={} elapsed={}ms progress={:.2}",
        "final session", session.holding, session.finished, session.elapsed_ms, session.progress,
    );
    text
}
