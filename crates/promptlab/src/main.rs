// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Promptlab - prompt optimization and blind judging workbench.
//!
//! This is the binary entry point.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use promptlab::bench::{load_dataset, run_bench, BenchOptions};
use promptlab::serve::{init_tracing, run_serve};
use promptlab::{Arm, CompareOptions, RetryPolicy, Workbench};
use promptlab_config::model::PromptlabConfig;
use promptlab_core::PromptlabError;
use serde::Serialize;
use tracing::error;

/// Promptlab - optimize prompts, generate answers and blind-judge them.
#[derive(Parser, Debug)]
#[command(name = "promptlab", version, about, long_about = None)]
struct Cli {
    /// Load this TOML file instead of the default lookup hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway.
    Serve,
    /// Rewrite a prompt with an optimization strategy.
    Optimize {
        #[arg(long)]
        prompt: String,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        strategy: Option<String>,
    },
    /// Answer a prompt.
    Generate {
        #[arg(long)]
        prompt: String,
        #[arg(long)]
        model: Option<String>,
    },
    /// Blind-compare two answers to the same prompt.
    Judge {
        #[arg(long)]
        original_prompt: String,
        #[arg(long)]
        output_a: String,
        #[arg(long)]
        output_b: String,
        #[arg(long)]
        model: Option<String>,
    },
    /// Optimize, answer both prompts and judge the pair.
    Compare {
        #[arg(long)]
        prompt: String,
        /// Strategy for the optimized side.
        #[arg(long)]
        strategy: Option<String>,
        #[arg(long)]
        optimizer_model: Option<String>,
        #[arg(long)]
        generator_model: Option<String>,
        #[arg(long)]
        judge_model: Option<String>,
    },
    /// Compare two strategies over every prompt of a JSON dataset.
    Bench {
        #[arg(long)]
        dataset: PathBuf,
        /// Strategy id, or `original` for the raw prompt.
        #[arg(long, default_value = "original")]
        strategy_a: String,
        #[arg(long, default_value = "role-play")]
        strategy_b: String,
        #[arg(long, default_value_t = 10_000)]
        delay_ms: u64,
        /// Calls per request when the provider is overloaded, the first one included.
        #[arg(long, default_value_t = 3)]
        attempts: u32,
        #[arg(long, default_value_t = 2_000)]
        backoff_ms: u64,
        #[arg(long, default_value = "results")]
        out: PathBuf,
        #[arg(long)]
        optimizer_model: Option<String>,
        #[arg(long)]
        generator_model: Option<String>,
        #[arg(long)]
        judge_model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => promptlab_config::load_and_validate_path(path),
        None => promptlab_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            promptlab_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.server.log_level);

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(kind = %err.kind(), error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: PromptlabConfig) -> Result<(), PromptlabError> {
    if let Commands::Serve = command {
        return run_serve(config).await;
    }

    let workbench = Workbench::from_config(&config)?;
    match command {
        Commands::Serve => Ok(()),
        Commands::Optimize {
            prompt,
            model,
            strategy,
        } => {
            let optimization = workbench
                .optimizer
                .optimize(&prompt, model.as_deref(), strategy.as_deref())
                .await?;
            print_json(&optimization)
        }
        Commands::Generate { prompt, model } => {
            let content = workbench.generator.generate(&prompt, model.as_deref()).await?;
            print_json(&serde_json::json!({ "generatedContent": content }))
        }
        Commands::Judge {
            original_prompt,
            output_a,
            output_b,
            model,
        } => {
            let report = workbench
                .judge
                .judge(&original_prompt, &output_a, &output_b, model.as_deref())
                .await?;
            print_json(&report)
        }
        Commands::Compare {
            prompt,
            strategy,
            optimizer_model,
            generator_model,
            judge_model,
        } => {
            let arm_b = match strategy {
                Some(id) => id.parse::<Arm>()?,
                None => Arm::Strategy(workbench.optimizer.default_strategy()),
            };
            let opts = CompareOptions {
                arm_b,
                optimizer_model,
                generator_model,
                judge_model,
                ..CompareOptions::default()
            };
            let comparison = workbench.compare(&prompt, &opts).await?;
            print_json(&comparison)
        }
        Commands::Bench {
            dataset,
            strategy_a,
            strategy_b,
            delay_ms,
            attempts,
            backoff_ms,
            out,
            optimizer_model,
            generator_model,
            judge_model,
        } => {
            let items = load_dataset(&dataset)?;
            let opts = BenchOptions {
                compare: CompareOptions {
                    arm_a: strategy_a.parse()?,
                    arm_b: strategy_b.parse()?,
                    optimizer_model,
                    generator_model,
                    judge_model,
                    retry: RetryPolicy::new(attempts, Duration::from_millis(backoff_ms)),
                },
                delay: Duration::from_millis(delay_ms),
                out_dir: out,
            };
            let criteria: Vec<String> = config.judge.criteria.iter().map(|c| c.name.clone()).collect();
            let outcome = run_bench(&workbench, &items, &criteria, &opts).await?;
            print_json(&serde_json::json!({
                "judged": outcome.records.len(),
                "failed": outcome.failed,
                "csv": outcome.csv_path,
                "json": outcome.json_path,
            }))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), PromptlabError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| PromptlabError::Internal(format!("cannot encode output: {e}")))?;
    println!("{text}");
    Ok(())
}
