// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `promptlab bench`: strategy-versus-strategy benchmark over a dataset.
//!
//! Each item goes through the compare pipeline with overload backoff, is
//! scored per criterion (one decimal), and lands as one CSV row plus one
//! JSON record. Failed items are logged and skipped.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use promptlab_core::PromptlabError;
use promptlab_judge::JudgeResult;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{error, info};

use crate::pipeline::{Arm, CompareOptions};
use crate::workbench::Workbench;

/// One dataset entry. `id` may be a string or a number in the source file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BenchItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub category: String,
    pub prompt: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }
    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

pub fn load_dataset(path: &Path) -> Result<Vec<BenchItem>, PromptlabError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        PromptlabError::InputValidation(format!("cannot read dataset {}: {e}", path.display()))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        PromptlabError::InputValidation(format!("invalid dataset {}: {e}", path.display()))
    })
}

#[derive(Debug, Clone)]
pub struct BenchOptions {
    pub compare: CompareOptions,
    /// Pause between items, as a courtesy to provider rate limits.
    pub delay: Duration,
    pub out_dir: PathBuf,
}

/// Per-criterion scores rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScores {
    pub criterion: String,
    pub score_a: f64,
    pub score_b: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub scores: Vec<CriterionScores>,
    pub total_a: f64,
    pub total_b: f64,
    pub wins_a: usize,
    pub wins_b: usize,
    /// `Tie`, or `<arm> (+<diff>)` for the higher total.
    pub comparison: String,
    /// `<arm> wins (n/total)`, or `Draw (a-b)`.
    pub win_count: String,
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Aggregates a judge report from the point of view of the two arms.
pub fn tally(report: &JudgeResult, arm_a: &Arm, arm_b: &Arm) -> Tally {
    let scores: Vec<CriterionScores> = report
        .criteria
        .iter()
        .map(|c| CriterionScores {
            criterion: c.criterion_name.clone(),
            score_a: round1(c.score_a),
            score_b: round1(c.score_b),
        })
        .collect();

    let total_a = round1(scores.iter().map(|s| s.score_a).sum());
    let total_b = round1(scores.iter().map(|s| s.score_b).sum());
    let wins_a = scores.iter().filter(|s| s.score_a > s.score_b).count();
    let wins_b = scores.iter().filter(|s| s.score_b > s.score_a).count();
    let diff = round1((total_b - total_a).abs());

    let comparison = if total_a > total_b {
        format!("{arm_a} (+{diff:.1})")
    } else if total_b > total_a {
        format!("{arm_b} (+{diff:.1})")
    } else {
        "Tie".to_string()
    };
    let win_count = if wins_a > wins_b {
        format!("{arm_a} wins ({wins_a}/{})", scores.len())
    } else if wins_b > wins_a {
        format!("{arm_b} wins ({wins_b}/{})", scores.len())
    } else {
        format!("Draw ({wins_a}-{wins_b})")
    };

    Tally {
        scores,
        total_a,
        total_b,
        wins_a,
        wins_b,
        comparison,
        win_count,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchRecord {
    pub id: String,
    pub category: String,
    pub prompt: String,
    pub prompt_a: String,
    pub prompt_b: String,
    pub output_a: String,
    pub output_b: String,
    pub judge_summary: String,
    #[serde(flatten)]
    pub tally: Tally,
    pub timestamp: String,
}

#[derive(Debug)]
pub struct BenchOutcome {
    pub records: Vec<BenchRecord>,
    pub failed: Vec<String>,
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
}

/// Runs every item, then writes the CSV and JSON reports.
pub async fn run_bench(
    workbench: &Workbench,
    items: &[BenchItem],
    criteria: &[String],
    opts: &BenchOptions,
) -> Result<BenchOutcome, PromptlabError> {
    let cmp = &opts.compare;
    let mut records = Vec::with_capacity(items.len());
    let mut failed = Vec::new();

    for (index, item) in items.iter().enumerate() {
        info!(
            item = index + 1,
            of = items.len(),
            id = %item.id,
            category = %item.category,
            "benchmarking item"
        );
        match workbench.compare(&item.prompt, cmp).await {
            Ok(comparison) => {
                let tally = tally(&comparison.report, &cmp.arm_a, &cmp.arm_b);
                info!(id = %item.id, result = %tally.comparison, "item judged");
                records.push(BenchRecord {
                    id: item.id.clone(),
                    category: item.category.clone(),
                    prompt: item.prompt.clone(),
                    prompt_a: comparison.prompt_a,
                    prompt_b: comparison.prompt_b,
                    output_a: comparison.output_a,
                    output_b: comparison.output_b,
                    judge_summary: if comparison.report.summary.trim().is_empty() {
                        "No summary".to_string()
                    } else {
                        comparison.report.summary
                    },
                    tally,
                    timestamp: chrono::Utc::now().to_rfc3339(),
                });
            }
            Err(err) => {
                error!(id = %item.id, kind = %err.kind(), error = %err, "item failed, skipping");
                failed.push(item.id.clone());
            }
        }

        if index + 1 < items.len() && !opts.delay.is_zero() {
            tokio::time::sleep(opts.delay).await;
        }
    }

    fs::create_dir_all(&opts.out_dir).map_err(|e| {
        PromptlabError::Internal(format!("cannot create {}: {e}", opts.out_dir.display()))
    })?;
    let stem = format!(
        "strategy_compare_{}_vs_{}_{}",
        cmp.arm_a,
        cmp.arm_b,
        chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ")
    );
    let csv_path = opts.out_dir.join(format!("{stem}.csv"));
    let json_path = opts.out_dir.join(format!("{stem}.json"));

    write_csv(&csv_path, &records, criteria, &cmp.arm_a, &cmp.arm_b)?;
    let json = serde_json::to_string_pretty(&records)
        .map_err(|e| PromptlabError::Internal(format!("cannot encode results: {e}")))?;
    fs::write(&json_path, json)
        .map_err(|e| PromptlabError::Internal(format!("cannot write {}: {e}", json_path.display())))?;

    info!(
        judged = records.len(),
        failed = failed.len(),
        csv = %csv_path.display(),
        json = %json_path.display(),
        "benchmark complete"
    );
    Ok(BenchOutcome {
        records,
        failed,
        csv_path,
        json_path,
    })
}

/// Finds the scores the judge reported for a configured criterion.
///
/// An exact name wins; otherwise the judge's name only has to contain the
/// configured one, ignoring case, punctuation, numbering and `&` vs `and`.
fn find_scores<'a>(scores: &'a [CriterionScores], name: &str) -> Option<&'a CriterionScores> {
    scores.iter().find(|s| s.criterion == name).or_else(|| {
        let wanted = normalize_criterion(name);
        if wanted.is_empty() {
            return None;
        }
        scores
            .iter()
            .find(|s| normalize_criterion(&s.criterion).contains(&wanted))
    })
}

fn normalize_criterion(name: &str) -> String {
    name.replace('&', " and ")
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Columns: id, category, comparison, win count, one score column per
/// criterion and arm, judge summary, then the prompts and outputs.
fn write_csv(
    path: &Path,
    records: &[BenchRecord],
    criteria: &[String],
    arm_a: &Arm,
    arm_b: &Arm,
) -> Result<(), PromptlabError> {
    let csv_err = |e: csv::Error| PromptlabError::Internal(format!("cannot write {}: {e}", path.display()));
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;

    let mut header = vec![
        "ID".to_string(),
        "Category".to_string(),
        "Total comparison".to_string(),
        "Criteria wins".to_string(),
    ];
    for name in criteria {
        header.push(format!("{name} ({arm_a})"));
        header.push(format!("{name} ({arm_b})"));
    }
    header.extend([
        "Judge summary".to_string(),
        "Original User Prompt".to_string(),
        format!("Prompt ({arm_a})"),
        format!("Prompt ({arm_b})"),
        format!("Output ({arm_a})"),
        format!("Output ({arm_b})"),
    ]);
    writer.write_record(&header).map_err(csv_err)?;

    for record in records {
        let mut row = vec![
            record.id.clone(),
            record.category.clone(),
            record.tally.comparison.clone(),
            record.tally.win_count.clone(),
        ];
        for name in criteria {
            match find_scores(&record.tally.scores, name) {
                Some(s) => {
                    row.push(format!("{:.1}", s.score_a));
                    row.push(format!("{:.1}", s.score_b));
                }
                None => row.extend([String::new(), String::new()]),
            }
        }
        row.extend([
            record.judge_summary.clone(),
            record.prompt.clone(),
            record.prompt_a.clone(),
            record.prompt_b.clone(),
            record.output_a.clone(),
            record.output_b.clone(),
        ]);
        writer.write_record(&row).map_err(csv_err)?;
    }
    writer
        .flush()
        .map_err(|e| PromptlabError::Internal(format!("cannot write {}: {e}", path.display())))
}
