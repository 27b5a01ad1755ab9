use std::fmt::{self, Write};

use crate::error::{Error, Result};
use crate::plan::{BlindLevel, OptimizationResult, RevaluationResult};

pub trait Formatter {
    fn optimization(&self, result: &OptimizationResult) -> Result<String>;
    fn revaluation(&self, result: &RevaluationResult) -> Result<String>;
}

pub struct HumanFormatter;
pub struct SummaryFormatter;
pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn optimization(&self, result: &OptimizationResult) -> Result<String> {
        render(|out| write_plan(out, result, true))
    }

    fn revaluation(&self, result: &RevaluationResult) -> Result<String> {
        render(|out| write_revaluation(out, result, true))
    }
}

impl Formatter for SummaryFormatter {
    fn optimization(&self, result: &OptimizationResult) -> Result<String> {
        render(|out| write_plan(out, result, false))
    }

    fn revaluation(&self, result: &RevaluationResult) -> Result<String> {
        render(|out| write_revaluation(out, result, false))
    }
}

impl Formatter for JsonFormatter {
    fn optimization(&self, result: &OptimizationResult) -> Result<String> {
        to_json(result)
    }

    fn revaluation(&self, result: &RevaluationResult) -> Result<String> {
        to_json(result)
    }
}

fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> Result<String> {
    let mut out = String::new();
    write(&mut out).map_err(|err| Error::Output(format!("failed to format result: {}", err)))?;
    Ok(out)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map(|mut json| {
            json.push('\n');
            json
        })
        .map_err(|err| Error::Output(format!("failed to serialize result: {}", err)))
}

fn write_plan(out: &mut String, result: &OptimizationResult, detailed: bool) -> fmt::Result {
    let metrics = &result.metrics;
    writeln!(out, "Stack size: {}", result.stack_size)?;
    writeln!(out, "Chips per player: {}", metrics.total_chips_per_player)?;

    if detailed {
        writeln!(out, "Distribution:")?;
        for entry in &result.distribution {
            writeln!(
                out,
                "  {} x {} ({}) = {} [{}]",
                entry.count, entry.value, entry.color, entry.total, entry.purpose
            )?;
        }
        writeln!(out, "Structure:")?;
        for level in &result.structure {
            writeln!(out, "  {}", describe_level(level))?;
        }
    }

    writeln!(out, "Scores:")?;
    writeln!(out, "  coverage: {:.2}", metrics.blind_coverage_score)?;
    writeln!(out, "  playability: {:.2}", metrics.playability_score)?;
    writeln!(out, "  duration gap: {}min", metrics.duration_match)?;
    writeln!(out, "  utilization: {:.2}%", metrics.utilization_rate)?;
    writeln!(out, "  overall: {:.2}", metrics.overall_score)?;

    for warning in &result.analysis.warnings {
        writeln!(out, "Warning: {}", warning)?;
    }
    for recommendation in &result.analysis.recommendations {
        writeln!(out, "Recommendation: {}", recommendation)?;
    }
    Ok(())
}

fn describe_level(level: &BlindLevel) -> String {
    if level.is_break {
        return format!("break ({}min)", level.duration);
    }
    match level.ante {
        Some(ante) => format!(
            "level {}: {}/{} ante {} ({}min)",
            level.level, level.small_blind, level.big_blind, ante, level.duration
        ),
        None => format!(
            "level {}: {}/{} ({}min)",
            level.level, level.small_blind, level.big_blind, level.duration
        ),
    }
}

fn write_revaluation(
    out: &mut String,
    result: &RevaluationResult,
    detailed: bool,
) -> fmt::Result {
    if result.suggestions.is_empty() {
        writeln!(out, "No revaluation suggested")?;
    } else {
        writeln!(out, "Suggestions:")?;
        for suggestion in &result.suggestions {
            writeln!(
                out,
                "  {} ({}) -> {}: +{:.2}% coverage",
                suggestion.original_value,
                suggestion.color,
                suggestion.suggested_value,
                suggestion.improved_coverage
            )?;
            if detailed {
                writeln!(out, "    {}", suggestion.reason)?;
            }
        }
    }

    for (label, plan) in [
        ("Before", &result.before_optimization),
        ("After", &result.after_optimization),
    ] {
        match plan {
            Some(plan) => {
                writeln!(
                    out,
                    "{}: stack {} overall {:.2}",
                    label, plan.stack_size, plan.metrics.overall_score
                )?;
            }
            None => {
                writeln!(out, "{}: no feasible plan", label)?;
            }
        }
    }
    writeln!(out, "Worth it: {}", if result.worth_it { "yes" } else { "no" })?;
    writeln!(out, "Improvement: {:.2}", result.improvement_score)?;

    if detailed {
        if let Some(plan) = &result.after_optimization {
            writeln!(out, "Revalued plan:")?;
            write_plan(out, plan, true)?;
        }
    }
    Ok(())
}
