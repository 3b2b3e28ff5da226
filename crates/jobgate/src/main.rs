#![forbid(unsafe_code)]

use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use jobgate_core::config::RiskGateConfig;
use jobgate_core::job::Job;
use jobgate_core::record::{DecisionRecord, FollowUp};
use jobgate_core::risk::RiskGateResult;
use jobgate_core::signal::ParticipantSignal;
use jobgate_core::traits::{FixedClock, SequenceSource};
use jobgate_core::types::{DecisionOutcome, GateStatus, UnitFloat};
use jobgate_engine::decision::digest::verify_context;
use jobgate_engine::decision::sequence::{CounterSequence, RandomSequence};
use jobgate_engine::decision::summary::{decision_summary, reasoning_templates};
use jobgate_engine::decision::{analyze_signals, CreateRecordInput, DecisionRecordEngine};
use jobgate_engine::risk::RiskGateEngine;

#[derive(Parser)]
#[command(
    name = "jobgate",
    version,
    about = "Risk gates and team decision records for freelance listings."
)]
struct Cli {
    /// Raise log verbosity on stderr (-v info, -vv debug). JOBGATE_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the risk gate over a job listing.
    Evaluate {
        /// Path to job .json (or "-" / omit for stdin).
        #[arg(default_value = "-")]
        file: String,

        /// Risk gate configuration overrides (.json).
        #[arg(long)]
        config: Option<String>,

        /// Evaluate as of this RFC 3339 instant instead of the current time.
        #[arg(long)]
        now: Option<String>,

        /// Output the full result as JSON.
        #[arg(long)]
        json: bool,

        /// Exit non-zero when the gate hard-blocks.
        #[arg(long)]
        fail_on_block: bool,
    },

    /// Assemble a decision record from a job, its risk result and team signals.
    Decide {
        /// Path to decision input .json (or "-" for stdin).
        file: String,

        /// Risk gate configuration, used when the input has no risk_assessment.
        #[arg(long)]
        config: Option<String>,

        /// Timestamp the record (and any evaluation) at this RFC 3339 instant.
        #[arg(long)]
        now: Option<String>,

        /// Use this sequence number instead of a random draw (1 or higher).
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        sequence: Option<u32>,
    },

    /// Count reviewer signals and classify team consensus.
    Consensus {
        /// Signals .json array, or a decision record (or "-" for stdin).
        file: String,

        /// Output JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print summary lines and reasoning prompts for a decision record.
    Summary {
        /// Path to decision record .json (or "-" for stdin).
        file: String,

        /// Output JSON.
        #[arg(long)]
        json: bool,
    },

    /// Attach a retrospective to a decision record.
    FollowUp {
        /// Path to decision record .json (or "-" for stdin).
        file: String,

        /// What actually happened.
        #[arg(long)]
        actual: Option<String>,

        /// Lessons for the next decision.
        #[arg(long)]
        lessons: Option<String>,

        /// Review date (RFC 3339); defaults to now.
        #[arg(long)]
        review_date: Option<String>,

        /// Update timestamp (RFC 3339); defaults to the current time.
        #[arg(long)]
        now: Option<String>,
    },

    /// Check that a record's frozen context still matches its digest.
    Verify {
        /// Path to decision record .json (or "-" for stdin).
        file: String,
    },

    /// Print the default risk gate configuration, or validate a file.
    Config {
        /// Validate this configuration file instead of printing defaults.
        #[arg(long)]
        check: Option<String>,
    },
}

/// Input document for `jobgate decide`.
#[derive(Debug, Deserialize)]
struct DecideInput {
    #[serde(default)]
    job_id: Option<String>,
    #[serde(default)]
    team_id: Option<String>,
    job: Job,
    #[serde(default)]
    risk_assessment: Option<RiskGateResult>,
    #[serde(default, alias = "signals")]
    participant_signals: Vec<ParticipantSignal>,
    decided_by: String,
    outcome: DecisionOutcome,
    reasoning: String,
    confidence: UnitFloat,
    #[serde(default)]
    conditions: Option<Vec<String>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Cmd::Evaluate {
            file,
            config,
            now,
            json,
            fail_on_block,
        } => cmd_evaluate(&file, config.as_deref(), now.as_deref(), json, fail_on_block),

        Cmd::Decide {
            file,
            config,
            now,
            sequence,
        } => cmd_decide(&file, config.as_deref(), now.as_deref(), sequence),

        Cmd::Consensus { file, json } => cmd_consensus(&file, json),

        Cmd::Summary { file, json } => cmd_summary(&file, json),

        Cmd::FollowUp {
            file,
            actual,
            lessons,
            review_date,
            now,
        } => cmd_follow_up(&file, actual, lessons, review_date.as_deref(), now.as_deref()),

        Cmd::Verify { file } => cmd_verify(&file),

        Cmd::Config { check } => cmd_config(check.as_deref()),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env("JOBGATE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// ── Input helpers ───────────────────────────────────────────────

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("cannot read {file}"))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(file: &str) -> Result<T> {
    let content = read_input(file)?;
    serde_json::from_str(&content).with_context(|| format!("{file}: invalid input"))
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid RFC 3339 timestamp '{s}'"))
}

fn clock(now: Option<&str>) -> Result<FixedClock> {
    let at = match now {
        Some(s) => parse_instant(s)?,
        None => Utc::now(),
    };
    Ok(FixedClock(at))
}

fn load_config(path: Option<&str>) -> Result<RiskGateConfig> {
    match path {
        Some(p) => RiskGateConfig::load(p).with_context(|| format!("config {p}")),
        None => Ok(RiskGateConfig::default()),
    }
}

fn risk_engine(config: Option<&str>, now: Option<&str>) -> Result<RiskGateEngine<FixedClock>> {
    Ok(RiskGateEngine::with_clock(load_config(config)?, clock(now)?)?)
}

// ── Commands ────────────────────────────────────────────────────

fn cmd_evaluate(
    file: &str,
    config: Option<&str>,
    now: Option<&str>,
    json_out: bool,
    fail_on_block: bool,
) -> Result<()> {
    let job: Job = read_json(file)?;
    let result = risk_engine(config, now)?.evaluate(&job)?;

    if json_out {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in &result.explanation {
            println!("{line}");
        }
        println!();
        println!("score: {:.2}", result.score);
    }

    if fail_on_block && result.gate_status == GateStatus::HardBlock {
        bail!("job {} is hard-blocked by the risk gate", job.id);
    }
    Ok(())
}

fn cmd_decide(
    file: &str,
    config: Option<&str>,
    now: Option<&str>,
    sequence: Option<u32>,
) -> Result<()> {
    let input: DecideInput = read_json(file)?;
    if input.participant_signals.is_empty() {
        bail!("{file}: a decision needs at least one participant signal");
    }
    let clock = clock(now)?;

    let risk_assessment = match input.risk_assessment {
        Some(risk) => risk,
        None => RiskGateEngine::with_clock(load_config(config)?, clock)?.evaluate(&input.job)?,
    };

    let create = CreateRecordInput {
        job_id: input.job_id.unwrap_or_else(|| input.job.id.clone()),
        team_id: input.team_id,
        job: input.job,
        risk_assessment,
        participant_signals: input.participant_signals,
        decided_by: input.decided_by,
        outcome: input.outcome,
        reasoning: input.reasoning,
        confidence: input.confidence,
        conditions: input.conditions,
    };

    let record = match sequence {
        Some(first) => create_with(CounterSequence::starting_at(first), clock, create)?,
        None => create_with(RandomSequence, clock, create)?,
    };

    eprintln!(
        "  {} → {:?} (risk gate: {:?})",
        record.decision_id, record.decision.outcome, record.context.risk_assessment.gate_status
    );
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn create_with<S: SequenceSource>(
    sequence: S,
    clock: FixedClock,
    input: CreateRecordInput,
) -> Result<DecisionRecord> {
    Ok(DecisionRecordEngine::with_parts(sequence, clock).create_record(input)?)
}

fn cmd_consensus(file: &str, json_out: bool) -> Result<()> {
    let value: serde_json::Value = read_json(file)?;
    let signals: Vec<ParticipantSignal> = match value {
        serde_json::Value::Object(mut obj) => match obj.remove("participants") {
            Some(p) => serde_json::from_value(p)?,
            None => bail!("{file}: expected a signal array or a record with participants"),
        },
        other => serde_json::from_value(other)?,
    };

    let analysis = analyze_signals(&signals)?;
    if json_out {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("  recommend {:>3}", analysis.recommend);
        println!("  caution   {:>3}", analysis.caution);
        println!("  reject    {:>3}", analysis.reject);
        println!("  consensus: {}", analysis.consensus.label());
    }
    Ok(())
}

fn cmd_summary(file: &str, json_out: bool) -> Result<()> {
    let record: DecisionRecord = read_json(file)?;
    let analysis = analyze_signals(&record.participants)?;
    let summary = decision_summary(&record, &analysis);
    let templates = reasoning_templates(
        &record.context.risk_assessment,
        &analysis,
        record.decision.outcome,
    );

    if json_out {
        let out = serde_json::json!({
            "decision_id": record.decision_id,
            "summary": summary,
            "templates": templates,
            "analysis": analysis,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", record.decision_id);
    for line in &summary {
        println!("{line}");
    }
    if !templates.is_empty() {
        println!();
        println!("Reasoning prompts:");
        for t in &templates {
            println!("  - {t}");
        }
    }
    Ok(())
}

fn cmd_follow_up(
    file: &str,
    actual: Option<String>,
    lessons: Option<String>,
    review_date: Option<&str>,
    now: Option<&str>,
) -> Result<()> {
    if actual.is_none() && lessons.is_none() {
        bail!("follow-up needs --actual and/or --lessons");
    }
    let record: DecisionRecord = read_json(file)?;
    let clock = clock(now)?;
    let review_date = match review_date {
        Some(s) => parse_instant(s)?,
        None => clock.0,
    };

    let engine = DecisionRecordEngine::with_parts(RandomSequence, clock);
    let updated = engine.attach_follow_up(
        record,
        FollowUp {
            review_date,
            actual_outcome: actual,
            lessons_learned: lessons,
        },
    )?;
    println!("{}", serde_json::to_string_pretty(&updated)?);
    Ok(())
}

fn cmd_verify(file: &str) -> Result<()> {
    let record: DecisionRecord = read_json(file)?;
    if !verify_context(&record)? {
        bail!(
            "{}: context does not match digest {}",
            record.decision_id,
            record.context_digest
        );
    }
    eprintln!("  ok  {} ({})", record.decision_id, record.context_digest);
    Ok(())
}

fn cmd_config(check: Option<&str>) -> Result<()> {
    match check {
        Some(path) => {
            RiskGateConfig::load(path).with_context(|| format!("config {path}"))?;
            eprintln!("  ok  {path}");
        }
        None => println!(
            "{}",
            serde_json::to_string_pretty(&RiskGateConfig::default())?
        ),
    }
    Ok(())
}
