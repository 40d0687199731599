//! Vertical card display for scan results, plus plain listings for the
//! PLU table, history, and fraud reports.

use std::fmt::{self, Write};

use agriscan_core::{AdviceSections, FraudReport, PluLookupResult, ScanRecord};
use agriscan_verdict::PluTable;

use crate::scan::Evaluation;

fn percent(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

fn organic_word(is_organic: bool) -> &'static str {
    if is_organic { "organic" } else { "conventional" }
}

// ── Scan card ──

pub fn verdict_card(eval: &Evaluation) -> Result<String, fmt::Error> {
    let obs = &eval.observation;
    let verdict = &eval.verdict;
    let mut out = String::new();

    writeln!(out, "=== {} ===", obs.produce_label)?;
    writeln!(
        out,
        "{} ({} confidence)",
        verdict.verdict.display_name(),
        percent(verdict.verdict_confidence)
    )?;
    writeln!(out)?;

    writeln!(out, "Verdict")?;
    writeln!(out, "  {:<26} {}", "match", verdict.match_type.display_name())?;
    writeln!(out, "  {:<26} {}", "reliability", verdict.reliability.display_name())?;
    writeln!(out)?;

    writeln!(out, "Classifier")?;
    writeln!(out, "  {:<26} {}", "produce_confidence", percent(obs.produce_confidence))?;
    writeln!(
        out,
        "  {:<26} {} ({})",
        "model_prediction",
        obs.model_organic_prediction.display_name(),
        percent(obs.model_organic_confidence)
    )?;
    let detected = obs
        .detected_plu
        .as_ref()
        .map_or_else(|| "Not Detected".to_string(), |c| c.to_string());
    writeln!(out, "  {:<26} {}", "detected_plu", detected)?;
    if let Some(c) = obs.plu_confidence {
        writeln!(out, "  {:<26} {}", "plu_confidence", percent(c))?;
    }
    if eval.manual {
        if let Some(code) = &eval.plu {
            writeln!(out, "  {:<26} {}", "manual_plu", code)?;
        }
    }
    if let Some(meaning) = &eval.plu_meaning {
        writeln!(out, "  {:<26} {}", "plu_meaning", meaning)?;
    }
    writeln!(out)?;

    if verdict.needs_attention() {
        writeln!(out, "Verification Analysis")?;
        writeln!(out, "  {}", verdict.reasoning)?;
        writeln!(out)?;
    }

    writeln!(out, "Recommendation")?;
    writeln!(out, "  {}", verdict.recommendation)?;

    if let Some(advice) = &eval.advice {
        let sections = AdviceSections::parse(advice);
        let titled = [
            ("Nutrition", &sections.nutrition),
            ("Cleaning Tips", &sections.cleaning),
        ];
        for (title, body) in titled {
            if let Some(body) = body {
                writeln!(out)?;
                writeln!(out, "{title}")?;
                for line in body.lines() {
                    writeln!(out, "  {}", line.trim())?;
                }
            }
        }
    }
    Ok(out)
}

// ── Listings ──

pub fn lookup_line(found: &PluLookupResult) -> String {
    format!(
        "{}  {} ({})",
        found.code,
        found.meaning,
        organic_word(found.is_organic)
    )
}

pub fn print_table(table: &PluTable) {
    let summary = table.summary();
    println!("PLU table");
    println!("  {:<26} {}", "total", summary.total);
    println!("  {:<26} {}", "organic", summary.organic);
    println!("  {:<26} {}", "conventional", summary.conventional);
    println!();
    for entry in table.entries() {
        println!("  {:<8} {:<13} {}", entry.code, organic_word(entry.is_organic), entry.meaning);
    }
}

pub fn print_history(user: &str, records: &[ScanRecord]) {
    if records.is_empty() {
        println!("No scans saved for {user}.");
        return;
    }
    println!("{} scan(s) for {user}", records.len());
    for r in records {
        println!(
            "  {:<28} {:<16} {:<12} {:<18} {}",
            r.created_at,
            r.observation.produce_label,
            r.verdict.verdict.display_name(),
            r.verdict.match_type.display_name(),
            percent(r.verdict.verdict_confidence)
        );
    }
}

pub fn print_reports(reports: &[FraudReport]) {
    if reports.is_empty() {
        println!("No fraud reports.");
        return;
    }
    println!("{} fraud report(s)", reports.len());
    for r in reports {
        let report = &r.report;
        println!(
            "  {:<28} {} @ {}: {} labelled {}",
            r.created_at, report.vendor_name, report.location, report.produce_label, report.organic_label
        );
        if let Some(plu) = &report.plu {
            println!("    {:<24} {}", "plu", plu);
        }
        if let Some(desc) = &report.description {
            println!("    {:<24} {}", "description", desc);
        }
    }
}

pub fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
