use crate::export::BatchReport;
use anyhow::Result;
use clap::ValueEnum;
use colored::{Color, Colorize};
use pedigree_scoring::{
    BatchOutcome, GraphSummary, ReportSheet, ScoreBand, Tier, TierWeights, Workbook,
};
use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
    Table,
}

const RULE_WIDTH: usize = 50;

fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Excellent => Color::Green,
        ScoreBand::Good => Color::Yellow,
        ScoreBand::Acceptable => Color::BrightYellow,
        ScoreBand::Poor => Color::Red,
        ScoreBand::Failing => Color::BrightRed,
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn table<I, R>(headers: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row);
    }
    builder.build().with(Style::rounded()).to_string()
}

fn sheet_table(sheet: &ReportSheet) -> String {
    table(sheet.headers(), sheet.rows.iter().map(|r| r.cells()))
}

pub fn print_comparison(format: &OutputFormat, workbook: &Workbook<'_>) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(workbook.comparison),
        OutputFormat::Pretty => {
            print_score_breakdown(workbook);
            Ok(())
        }
        OutputFormat::Table => {
            for sheet in &workbook.sheets {
                println!("{}", sheet.name.cyan().bold());
                println!("{}\n", sheet_table(sheet));
            }
            Ok(())
        }
    }
}

fn print_score_breakdown(workbook: &Workbook<'_>) {
    let score = &workbook.comparison.score;
    let color = band_color(score.band);
    let weights = TierWeights::for_scheme(score.scheme);

    println!("{}", "COMPREHENSIVE SCORE BREAKDOWN".bold());
    println!("{}", "=".repeat(RULE_WIDTH));
    println!(
        "{} {}",
        "FINAL SCORE:".bold(),
        format!("{:.1}/100", score.final_score).color(color).bold()
    );
    println!("Interpretation: {}", score.band.to_string().color(color));
    println!("Scheme: {}", score.scheme.as_str().cyan());
    println!();

    println!("{}", "TIER BREAKDOWN:".bold());
    for tier in Tier::ALL {
        let label = format!(
            "{} {:.0}%):",
            tier.to_string().trim_end_matches(')'),
            weights.get(tier) * 100.0
        );
        println!(
            "   {:<30} {}",
            label,
            format!("-{:.1} pts", score.weighted(tier)).yellow()
        );
    }
    println!(
        "   {:<30} {}",
        "Total Deductions:",
        format!("-{:.1} pts", score.total_deductions).yellow().bold()
    );

    if !score.items.is_empty() {
        println!();
        println!("{}", "DEDUCTIONS (unweighted):".bold());
        for item in &score.items {
            println!(
                "   T{} {:<34} diff {:>3}  {}",
                item.tier.number(),
                item.metric,
                item.difference,
                format!("-{:.2}", item.points).red()
            );
        }
    }

    let issues = |summary: &GraphSummary| {
        summary
            .extended
            .consistency_checks
            .as_ref()
            .map(|c| c.issue_count())
    };
    if let (Some(golden), Some(candidate)) = (
        issues(&workbook.comparison.golden),
        issues(&workbook.comparison.candidate),
    ) {
        println!();
        println!(
            "{} golden {}, candidate {}",
            "Consistency issues:".bold(),
            golden.to_string().yellow(),
            candidate.to_string().yellow()
        );
    }
}

pub fn print_metrics(format: &OutputFormat, summary: &GraphSummary) -> Result<()> {
    let value = serde_json::to_value(summary)?;
    match format {
        OutputFormat::Json => print_json(&value),
        OutputFormat::Pretty => {
            print_pretty(&value, 0);
            Ok(())
        }
        OutputFormat::Table => {
            let mut rows = Vec::new();
            flatten(&value, String::new(), &mut rows);
            println!(
                "{}",
                table(&["Metric", "Value"], rows.into_iter().map(|(k, v)| [k, v]))
            );
            Ok(())
        }
    }
}

/// Leaf values keyed by their dotted path; arrays stay whole.
fn flatten(value: &Value, path: String, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                flatten(val, child, out);
            }
        }
        Value::String(s) => out.push((path, s.clone())),
        other => out.push((path, other.to_string())),
    }
}

fn print_pretty(value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let key_colored = key.cyan().bold();
                match val {
                    Value::Object(_) => {
                        println!("{}{}:", indent, key_colored);
                        print_pretty(val, depth + 1);
                    }
                    Value::String(s) => println!("{}{}: {}", indent, key_colored, s.green()),
                    Value::Number(n) => {
                        println!("{}{}: {}", indent, key_colored, n.to_string().yellow())
                    }
                    Value::Bool(b) => {
                        let val_colored = if *b { "true".green() } else { "false".red() };
                        println!("{}{}: {}", indent, key_colored, val_colored);
                    }
                    Value::Array(items) if items.is_empty() => {
                        println!("{}{}: {}", indent, key_colored, "[]".dimmed())
                    }
                    _ => println!("{}{}: {}", indent, key_colored, val),
                }
            }
        }
        _ => println!("{}{}", indent, value),
    }
}

pub fn print_batch(format: &OutputFormat, report: &BatchReport<'_>) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Pretty => {
            for row in report.rows {
                match &row.outcome {
                    BatchOutcome::Scored {
                        final_score, band, ..
                    } => println!(
                        "{:>8}  {}  {}",
                        row.id.cyan(),
                        format!("{:>5.1}/100", final_score).color(band_color(*band)).bold(),
                        band.as_str().color(band_color(*band))
                    ),
                    BatchOutcome::Failed { error } => {
                        println!("{:>8}  {} {}", row.id.cyan(), "FAILED".red().bold(), error)
                    }
                }
            }
            print_batch_totals(report);
            Ok(())
        }
        OutputFormat::Table => {
            let rows = report.rows.iter().map(|row| {
                let (score, band, error) = match &row.outcome {
                    BatchOutcome::Scored {
                        final_score, band, ..
                    } => (format!("{:.1}", final_score), band.as_str().to_string(), String::new()),
                    BatchOutcome::Failed { error } => (String::new(), String::new(), error.clone()),
                };
                [
                    row.id.clone(),
                    score,
                    band,
                    row.golden_file.clone(),
                    row.candidate_file.clone(),
                    error,
                ]
            });
            println!(
                "{}",
                table(&["ID", "Score", "Band", "Golden", "Candidate", "Error"], rows)
            );
            print_batch_totals(report);
            Ok(())
        }
    }
}

fn print_batch_totals(report: &BatchReport<'_>) {
    let mean = report
        .mean_score
        .map_or_else(|| "n/a".to_string(), |m| format!("{:.1}/100", m));
    println!(
        "\n{} {} pairs, {} scored, {} failed, mean {}",
        "Batch:".bold(),
        report.pairs,
        report.scored.to_string().green(),
        report.failed.to_string().red(),
        mean.yellow()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_nested_sections() {
        let mut rows = Vec::new();
        flatten(
            &json!({"basic": {"total_nodes": 3}, "extended": {"spatial": {"pairs": [["A", "B"]]}, "name": "x"}}),
            String::new(),
            &mut rows,
        );
        assert_eq!(
            rows,
            vec![
                ("basic.total_nodes".to_string(), "3".to_string()),
                ("extended.name".to_string(), "x".to_string()),
                ("extended.spatial.pairs".to_string(), r#"[["A","B"]]"#.to_string()),
            ]
        );
    }

    #[test]
    fn renders_rounded_tables() {
        let out = table(&["Metric", "Value"], vec![["a".to_string(), "1".to_string()]]);
        assert!(out.contains("Metric"));
        assert!(out.contains('╭'));
    }
}
