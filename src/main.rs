//! `nurse-roster` command-line front end.
//!
//! ```text
//! nurse-roster <input> [--config FILE] [--runs N] [--out DIR] [--rank K] [--nurse ID]
//! ```
//!
//! `<input>` is an `.xlsx` workbook or a directory of CSV tables.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing::info;

use nurse_roster::capacity::CapacityDeriver;
use nurse_roster::config::RunConfig;
use nurse_roster::io::{export_nurse_calendar, export_trial, load_input};
use nurse_roster::logging;
use nurse_roster::penalty::PenaltyCategory;
use nurse_roster::report::{top_n_summary, violation_overview, NurseCalendar, WEEKDAY_LABELS};
use nurse_roster::scheduler::{Orchestrator, RosterProblem};
use nurse_roster::validation::validate_capacity_overrides;
use nurse_roster::RosterError;

const USAGE: &str =
    "usage: nurse-roster <input> [--config FILE] [--runs N] [--out DIR] [--rank K] [--nurse ID]";

struct Cli {
    input: PathBuf,
    config: Option<PathBuf>,
    runs: Option<u64>,
    out: Option<PathBuf>,
    rank: usize,
    nurse: Option<String>,
}

fn parse_cli() -> Result<Cli> {
    let mut args = std::env::args().skip(1);

    let mut input: Option<PathBuf> = None;
    let mut config = None;
    let mut runs = None;
    let mut out = None;
    let mut rank = 1;
    let mut nurse = None;

    while let Some(a) = args.next() {
        match a.as_str() {
            "--config" => config = args.next().map(PathBuf::from),
            "--runs" => {
                let raw = args.next().context("--runs needs a value")?;
                runs = Some(raw.parse().with_context(|| format!("invalid --runs '{raw}'"))?);
            }
            "--out" => out = args.next().map(PathBuf::from),
            "--rank" => {
                let raw = args.next().context("--rank needs a value")?;
                rank = raw.parse().with_context(|| format!("invalid --rank '{raw}'"))?;
            }
            "--nurse" => nurse = args.next(),
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other if other.starts_with("--") => bail!("unknown option '{other}'\n{USAGE}"),
            other => input = Some(PathBuf::from(other)),
        }
    }

    Ok(Cli {
        input: input.context(USAGE)?,
        config,
        runs,
        out,
        rank,
        nurse,
    })
}

fn main() -> Result<()> {
    logging::init();
    let cli = parse_cli()?;

    let mut config = match &cli.config {
        Some(path) => RunConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(runs) = cli.runs {
        config.runs = runs;
    }

    let mut input = load_input(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;

    validate_capacity_overrides(&input.nurses, &config.capacity_overrides).map_err(RosterError::from)?;
    let quota = CapacityDeriver::new()
        .with_overrides(&config.capacity_overrides)
        .apply(&input.calendar, &mut input.nurses);
    info!(quota, "monthly max shifts per nurse");

    let problem = RosterProblem::validated(
        input.nurses,
        &input.calendar,
        &input.requirements,
        input.requests,
    )?;
    if let Some(id) = cli.nurse.as_deref() {
        if !problem.has_nurse(id) {
            bail!("unknown nurse '{id}' for --nurse");
        }
    }

    let outcome = Orchestrator::new(&config).run_with_fallback(&problem)?;
    if outcome.is_empty() {
        bail!("no schedule produced ({} trials attempted)", outcome.attempted);
    }

    let top_n = config.top_n.min(outcome.trials.len());
    println!("Mode: {}  ({} kept / {} attempted)", outcome.mode, outcome.trials.len(), outcome.attempted);
    println!();
    println!("{:>4}  {:>6}  {:>13}", "rank", "seed", "total_penalty");
    for row in top_n_summary(&outcome.trials, top_n) {
        println!("{:>4}  {:>6}  {:>13}", row.rank, row.seed, row.total_penalty);
    }

    println!();
    println!("{:>4}  {:>6}  {:>9}  {:>11}  {:>8}", "rank", "seed", "off_req", "consecutive", "night");
    for row in violation_overview(&outcome.trials, top_n) {
        println!(
            "{:>4}  {:>6}  {:>9}  {:>11}  {:>8}",
            row.rank, row.seed, row.off_request_count, row.consecutive_work_count, row.night_imbalance_count
        );
    }

    let chosen = outcome
        .rank(cli.rank)
        .with_context(|| format!("rank {} not available (1..={})", cli.rank, outcome.trials.len()))?;

    println!();
    println!("Rank {}  seed {}  total penalty {}", cli.rank, chosen.seed, chosen.total_penalty());
    for category in PenaltyCategory::ALL {
        println!("  {:<18} {}", category.key(), chosen.penalty.get(category));
    }
    println!("  unfilled slots     {}", chosen.unfilled_count);
    for record in chosen.violations.all_records() {
        println!("  [{}] {}: {}", record.kind(), record.nurse_id(), record.detail());
    }

    let calendar = cli
        .nurse
        .as_deref()
        .and_then(|id| NurseCalendar::build(&chosen.schedule, id));
    if let Some(cal) = &calendar {
        println!();
        println!("Calendar for {}", cal.nurse_id);
        println!("{:>8}  {}", "week", WEEKDAY_LABELS.map(|l| format!("{l:>4}")).join(""));
        for week in &cal.weeks {
            let cells: String = (0..7).map(|i| format!("{:>4}", week.cell(i))).collect();
            println!("{:>4}-W{:02}  {cells}", week.iso_year, week.week);
        }
    }

    if let Some(dir) = &cli.out {
        let mut files = export_trial(chosen, dir)
            .with_context(|| format!("exporting to {}", dir.display()))?;
        if let Some(cal) = &calendar {
            files.push(export_nurse_calendar(cal, dir)?);
        }
        for f in files {
            println!("wrote {}", f.display());
        }
    }

    Ok(())
}
