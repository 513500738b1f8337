use attest_analyzers::{AnalyzerConfig, AnalyzerSet, ExecutionTrace, Pipeline, RunArtifacts};
use attest_audit::{AuditConfig, AuditOutcome, ClaimAuditor};
use attest_facts::{extract, seal_engine, RunReportWire, SEAL_VERSION};
use attest_judge::{HttpJudge, Judge, SimulatedJudge};
use attest_trust::{score, ScoreWeights};
use attest_types::{FactSheetWire, TestCategory, VerifiedFactSheet};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "attest", about = "Tamper-evident test-run verification")]
#[command(version)]
struct Cli {
    /// Log level
    #[arg(long, env = "ATTEST_LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "ATTEST_LOG_JSON", global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seal a raw run report into a verified fact sheet
    Verify {
        /// Run report JSON produced by the test runner
        #[arg(short, long)]
        report: PathBuf,

        /// Write the sealed sheet here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Recompute the seal of a fact sheet and fail on any mismatch
    CheckSeal {
        #[arg(short, long)]
        sheet: PathBuf,
    },

    /// Run the analyzer pipeline over a report and score trust
    Judge(JudgeArgs),

    /// Audit a narrative against a sealed fact sheet
    Audit {
        /// Plain-text narrative to audit
        #[arg(short, long)]
        narrative: PathBuf,

        #[arg(short, long)]
        sheet: PathBuf,

        /// Configuration overrides (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct JudgeArgs {
    /// Run report JSON produced by the test runner
    #[arg(short, long)]
    report: PathBuf,

    /// Run artifacts JSON: test sources, readme, implementation index
    #[arg(short, long)]
    artifacts: Option<PathBuf>,

    /// External judge endpoint; without it, judge-dependent checks
    /// degrade to unavailable findings
    #[arg(long, env = "ATTEST_JUDGE_ENDPOINT")]
    judge_endpoint: Option<String>,

    #[arg(long, env = "ATTEST_JUDGE_TOKEN", hide_env_values = true)]
    judge_token: Option<String>,

    /// Configuration overrides (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Finding categories that force exit code 1
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "honeypot_manipulated,skeleton,mock_abuse"
    )]
    fail_on: Vec<String>,
}

/// Optional overrides loaded from `--config`.
#[derive(Default, Deserialize)]
struct CliConfig {
    #[serde(default)]
    analyzer: AnalyzerConfig,
    #[serde(default)]
    weights: ScoreWeights,
    #[serde(default)]
    audit: AuditConfig,
}

#[derive(Debug)]
struct CliFailure {
    kind: &'static str,
    message: String,
}

impl CliFailure {
    fn new(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<attest_facts::FactError> for CliFailure {
    fn from(e: attest_facts::FactError) -> Self {
        use attest_facts::FactError;
        let kind = match &e {
            FactError::Validation { .. } => "validation",
            FactError::TamperDetected { .. } => "tamper_detected",
            FactError::MalformedReport(_) => "malformed_report",
        };
        Self::new(kind, e.to_string())
    }
}

impl From<attest_analyzers::AnalyzerError> for CliFailure {
    fn from(e: attest_analyzers::AnalyzerError) -> Self {
        Self::new("analyzer", e.to_string())
    }
}

impl From<attest_audit::AuditError> for CliFailure {
    fn from(e: attest_audit::AuditError) -> Self {
        Self::new("audit_config", e.to_string())
    }
}

impl From<attest_judge::JudgeError> for CliFailure {
    fn from(e: attest_judge::JudgeError) -> Self {
        Self::new("judge", e.to_string())
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());
    if cli.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let result = match cli.command {
        Commands::Verify { report, output } => cmd_verify(&report, output.as_deref()),
        Commands::CheckSeal { sheet } => cmd_check_seal(&sheet),
        Commands::Judge(args) => cmd_judge(args).await,
        Commands::Audit {
            narrative,
            sheet,
            config,
        } => cmd_audit(&narrative, &sheet, config.as_deref()),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(failure) => {
            let payload = serde_json::json!({
                "error": { "kind": failure.kind, "message": failure.message }
            });
            eprintln!("{}", payload);
            std::process::exit(1);
        }
    }
}

fn cmd_verify(report_path: &Path, output: Option<&Path>) -> Result<i32, CliFailure> {
    let json = read_file(report_path)?;
    let records = RunReportWire::from_json(&json)?.into_records()?;
    let facts = extract(&records)?;
    let sheet = seal_engine::seal(facts, SEAL_VERSION);
    let wire = sheet.to_wire();
    let rendered = serde_json::to_string_pretty(&wire)
        .map_err(|e| CliFailure::new("serialize", e.to_string()))?;
    match output {
        Some(path) => fs::write(path, rendered)
            .map_err(|e| CliFailure::new("io", format!("{}: {}", path.display(), e)))?,
        None => println!("{}", rendered),
    }
    Ok(0)
}

fn cmd_check_seal(sheet_path: &Path) -> Result<i32, CliFailure> {
    let sheet = load_sheet(sheet_path)?;
    seal_engine::ensure_intact(&sheet)?;
    println!(
        "{}",
        serde_json::json!({ "seal": sheet.seal.to_hex(), "status": "intact" })
    );
    Ok(0)
}

async fn cmd_judge(args: JudgeArgs) -> Result<i32, CliFailure> {
    let fail_on = parse_fail_on(&args.fail_on)?;
    let config = load_config(args.config.as_deref())?;

    let json = read_file(&args.report)?;
    let records = RunReportWire::from_json(&json)?.into_records()?;
    let test_ids: BTreeSet<String> = records.iter().map(|r| r.id.clone()).collect();

    let mut run = match &args.artifacts {
        Some(path) => serde_json::from_str::<RunArtifacts>(&read_file(path)?)
            .map_err(|e| CliFailure::new("malformed_artifacts", e.to_string()))?,
        None => RunArtifacts::default(),
    };
    attach_traces(&mut run, &records);

    let judge: Arc<dyn Judge> = match &args.judge_endpoint {
        Some(endpoint) => Arc::new(HttpJudge::new(endpoint.as_str(), args.judge_token.clone())?),
        None => Arc::new(SimulatedJudge::unreachable()),
    };

    let set = AnalyzerSet::standard(&config.analyzer, judge)?;
    let pipeline = Pipeline::new(set, &config.analyzer);
    let findings = pipeline.run(Arc::new(run)).await;
    let report = score(&findings, &test_ids, &config.weights);

    println!(
        "{}",
        serde_json::to_string_pretty(&report)
            .map_err(|e| CliFailure::new("serialize", e.to_string()))?
    );
    if report.has_any(&fail_on) {
        return Ok(1);
    }
    Ok(0)
}

fn cmd_audit(
    narrative_path: &Path,
    sheet_path: &Path,
    config_path: Option<&Path>,
) -> Result<i32, CliFailure> {
    let narrative = read_file(narrative_path)?;
    let sheet = load_sheet(sheet_path)?;
    // A tampered sheet must never be audited against.
    seal_engine::ensure_intact(&sheet)?;

    let config = load_config(config_path)?;
    let auditor = ClaimAuditor::new(config.audit)?;
    let report = auditor.audit(&narrative, &sheet);
    println!(
        "{}",
        serde_json::to_string_pretty(&report)
            .map_err(|e| CliFailure::new("serialize", e.to_string()))?
    );
    Ok(match report.outcome {
        AuditOutcome::Contradicted => 1,
        _ => 0,
    })
}

fn read_file(path: &Path) -> Result<String, CliFailure> {
    fs::read_to_string(path).map_err(|e| CliFailure::new("io", format!("{}: {}", path.display(), e)))
}

fn load_sheet(path: &Path) -> Result<VerifiedFactSheet, CliFailure> {
    let wire: FactSheetWire = serde_json::from_str(&read_file(path)?)
        .map_err(|e| CliFailure::new("malformed_sheet", e.to_string()))?;
    Ok(wire.into_sheet())
}

fn load_config(path: Option<&Path>) -> Result<CliConfig, CliFailure> {
    match path {
        Some(path) => serde_json::from_str(&read_file(path)?)
            .map_err(|e| CliFailure::new("config", e.to_string())),
        None => Ok(CliConfig::default()),
    }
}

fn parse_fail_on(raw: &[String]) -> Result<Vec<TestCategory>, CliFailure> {
    raw.iter()
        .map(|s| {
            TestCategory::parse(s)
                .ok_or_else(|| CliFailure::new("config", format!("unknown category '{}'", s)))
        })
        .collect()
}

/// Merge execution traces from the report into the artifact units,
/// creating bare units for tests the artifacts file does not mention.
fn attach_traces(run: &mut RunArtifacts, records: &[attest_types::RawTestRecord]) {
    for record in records {
        let trace = ExecutionTrace::from_record(record);
        match run.units.iter_mut().find(|u| u.test_id == record.id) {
            Some(unit) => unit.trace = Some(trace),
            None => {
                run.units
                    .push(attest_analyzers::AnalysisUnit::new(record.id.clone()).with_trace(trace));
            }
        }
    }
}
