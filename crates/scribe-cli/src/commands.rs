use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;

use scribe_analysis::{AnalysisService, BatchReport};
use scribe_llm::{Completion, OpenAiCompletion, ScriptedCompletion};
use scribe_server::handler::BatchReportView;
use scribe_server::{AppState, ScribeServer};
use scribe_store::InMemoryResultStore;
use scribe_types::{AnalysisResponse, TranscriptAnalysis};

use crate::cli::*;
use crate::config::ScribeConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = ScribeConfig::load(cli.config.as_deref())?;
    if cli.verbose {
        config.logging.level = "debug".into();
    }
    config.logging.init();

    match cli.command {
        Command::Serve(args) => cmd_serve(config, args, cli.offline),
        Command::Analyze(args) => cmd_analyze(&config, args, cli.offline, cli.format),
        Command::Batch(args) => cmd_batch(&config, args, cli.offline, cli.format),
        Command::Config => cmd_config(&config),
    }
}

fn build_service(config: &ScribeConfig, offline: bool) -> anyhow::Result<AnalysisService> {
    let completion: Arc<dyn Completion> = if offline {
        Arc::new(offline_completion())
    } else {
        let client = OpenAiCompletion::from_config(&config.llm)
            .context("configuring completion backend (use --offline to run without one)")?;
        tracing::info!(model = client.model(), endpoint = client.endpoint(), "completion backend ready");
        Arc::new(client)
    };
    let store = Arc::new(InMemoryResultStore::<TranscriptAnalysis>::new());
    Ok(AnalysisService::new(completion, store))
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")
}

fn cmd_serve(mut config: ScribeConfig, args: ServeArgs, offline: bool) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }
    let service = build_service(&config, offline)?;
    let server = ScribeServer::new(config.server, AppState::new(service));
    println!(
        "{} Scribe listening on {}{}",
        "✓".green().bold(),
        server.config().bind_addr.to_string().bold(),
        if offline { " (offline)".yellow().to_string() } else { String::new() },
    );
    runtime()?.block_on(server.serve())?;
    Ok(())
}

fn cmd_analyze(
    config: &ScribeConfig,
    args: AnalyzeArgs,
    offline: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let service = build_service(config, offline)?;
    let response = service.analyze_blocking(&args.transcript)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Text => print_analysis(&response),
    }
    Ok(())
}

fn cmd_batch(
    config: &ScribeConfig,
    args: BatchArgs,
    offline: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut transcripts = args.transcripts;
    if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading transcripts from {}", path.display()))?;
        transcripts.extend(text.lines().map(str::to_string));
    }

    let service = build_service(config, offline)?;
    let report = runtime()?.block_on(service.batch(transcripts))?;

    if args.report {
        match format {
            OutputFormat::Json => {
                let view = BatchReportView::from(report);
                println!("{}", serde_json::to_string_pretty(&view)?);
            }
            OutputFormat::Text => print_report(&report),
        }
        return Ok(());
    }

    let responses = report.into_all_or_nothing().map_err(|e| {
        anyhow::anyhow!(
            "batch failed at item {} ({} of {} failed): {}",
            e.index,
            e.failed,
            e.total,
            e
        )
    })?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&responses)?),
        OutputFormat::Text => {
            for response in &responses {
                print_analysis(response);
                println!();
            }
        }
    }
    Ok(())
}

fn cmd_config(config: &ScribeConfig) -> anyhow::Result<()> {
    let key = if config.llm.api_key.is_some() { "set" } else { "unset" };
    println!("{}", toml::to_string_pretty(config)?);
    println!("# OPENAI_API_KEY: {}", key);
    Ok(())
}

fn print_analysis(response: &AnalysisResponse) {
    println!("{} {}", "id:".bold(), response.id.cyan());
    println!("{} {}", "summary:".bold(), response.summary);
    if response.next_actions.is_empty() {
        println!("{} none", "next actions:".bold());
    } else {
        println!("{}", "next actions:".bold());
        for action in &response.next_actions {
            println!("  - {}", action);
        }
    }
}

fn print_report(report: &BatchReport) {
    for item in report.items() {
        let state = item.state().to_string();
        match &item.result {
            Ok(response) => println!(
                "[{}] {} {} {}",
                item.index,
                state.green(),
                response.id.cyan(),
                response.summary
            ),
            Err(failure) => println!("[{}] {} {}", item.index, state.red(), failure),
        }
    }
    println!(
        "{} of {} stored, {} failed",
        (report.len() - report.failed_count()).to_string().bold(),
        report.len(),
        report.failed_count().to_string().bold(),
    );
}

/// Local backend for `--offline`: the summary is the transcript's first
/// line, and every line mentioning "will" becomes a next action.
fn offline_completion() -> ScriptedCompletion {
    ScriptedCompletion::new(|_, user| {
        let transcript = embedded_transcript(user);
        let summary = transcript.lines().next().unwrap_or_default().trim();
        let next_actions: Vec<&str> = transcript
            .lines()
            .map(str::trim)
            .filter(|line| line.contains(" will "))
            .collect();
        Ok(json!({ "summary": summary, "next_actions": next_actions }).to_string())
    })
}

fn embedded_transcript(prompt: &str) -> &str {
    let mut parts = prompt.splitn(2, "\"\"\"");
    let _ = parts.next();
    let rest = parts.next().unwrap_or_default();
    rest.rsplit_once("\"\"\"")
        .map(|(body, _)| body)
        .unwrap_or(rest)
        .trim()
}
