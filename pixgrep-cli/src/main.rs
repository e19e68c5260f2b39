use clap::{Parser, ValueEnum};
use pixgrep::fixture::{outcome_to_quad, NOT_FOUND_QUAD};
use pixgrep::io::load_rgb_image;
use pixgrep::{
    find_all, FailureReport, FixtureRecord, MatchOutcome, ScaledMatcher, Verdict, Verifier,
};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Locate a template image inside a scene image")]
struct Cli {
    /// Scene image to search in (optional when --fixture and
    /// --resource-root provide the paths).
    scene: Option<PathBuf>,
    /// Template image to search for.
    template: Option<PathBuf>,
    /// Matching strategy.
    #[arg(long, value_enum, default_value = "scaled")]
    mode: Mode,
    /// Fixture record whose accepted answers the result is verified against.
    #[arg(long, value_name = "FILE")]
    fixture: Option<PathBuf>,
    /// Resource root for resolving fixture-relative image paths.
    #[arg(long, value_name = "DIR")]
    resource_root: Option<PathBuf>,
    /// On failed verification, report the closest candidate's reason instead
    /// of the last one checked.
    #[arg(long)]
    best_candidate: bool,
    /// Write the JSON result to this file instead of stdout.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Pixel-identical matching; reports every occurrence.
    Exact,
    /// Scale-robust approximate matching; reports at most one occurrence.
    Scaled,
}

#[derive(Debug, Serialize)]
struct Output {
    /// Best outcome as an `[x, y, w, h]` quad; all zeros means no match.
    outcome: [u32; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<f32>,
    /// All exact matches, in row-major order (exact mode only). Keeps the
    /// historical one-element sentinel list when nothing matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<Vec<[u32; 4]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verdict: Option<String>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("pixgrep=info".parse()?))
            .with_target(false)
            .init();
    }

    let record: Option<FixtureRecord> = match &cli.fixture {
        Some(path) => Some(serde_json::from_str(&fs::read_to_string(path)?)?),
        None => None,
    };

    let (scene_path, template_path) = match (&cli.scene, &cli.template) {
        (Some(scene), Some(template)) => (scene.clone(), template.clone()),
        _ => {
            let record = record
                .as_ref()
                .ok_or("scene and template paths are required unless --fixture is given")?;
            let root = cli
                .resource_root
                .as_ref()
                .ok_or("--resource-root is required to resolve fixture image paths")?;
            (record.image_path(root), record.template_path(root))
        }
    };

    let scene = load_rgb_image(&scene_path)?;
    let template = load_rgb_image(&template_path)?;

    let (outcome, mut output) = match cli.mode {
        Mode::Exact => {
            let matches = find_all(scene.view(), template.view());
            let outcome = MatchOutcome::from(matches.first().copied());
            let quads = if matches.is_empty() {
                vec![NOT_FOUND_QUAD]
            } else {
                matches
                    .iter()
                    .map(|&bbox| outcome_to_quad(MatchOutcome::Found(bbox)))
                    .collect()
            };
            let output = Output {
                outcome: outcome_to_quad(outcome),
                score: None,
                scale: None,
                matches: Some(quads),
                verdict: None,
            };
            (outcome, output)
        }
        Mode::Scaled => {
            let found = ScaledMatcher::new().find(scene.view(), template.view());
            let outcome = MatchOutcome::from(found.map(|m| m.bbox));
            let output = Output {
                outcome: outcome_to_quad(outcome),
                score: found.map(|m| m.score),
                scale: found.map(|m| m.scale),
                matches: None,
                verdict: None,
            };
            (outcome, output)
        }
    };
    tracing::info!(outcome = ?outcome, "match complete");

    let mut exit = ExitCode::SUCCESS;
    if let Some(record) = &record {
        let failure_report = if cli.best_candidate {
            FailureReport::BestCandidate
        } else {
            FailureReport::LastCandidate
        };
        let verdict = Verifier::new()
            .with_failure_report(failure_report)
            .verify(outcome, &record.accepted_answers());
        output.verdict = Some(match verdict {
            Verdict::Pass => "pass".to_string(),
            Verdict::Fail(reason) => {
                exit = ExitCode::FAILURE;
                format!("fail: {reason}")
            }
        });
    }

    let json = serde_json::to_string_pretty(&output)?;
    match &cli.output {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(exit)
}
