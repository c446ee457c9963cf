//! Job summary in GitHub-flavored Markdown
//!
//! Layout, top to bottom:
//! - heading naming the linted file
//! - overall score with a pass/fail mark and a meter
//! - one block per category (score + issue count)
//! - the same categories as a plain table
//! - short summary, collapsible advice, link to the hosted report

use crate::models::{FullReport, Report};
use anyhow::Result;
use serde_json::Value;
use std::fmt::Write;

/// Glyphs and pass mark used by the renderer
#[derive(Debug, Clone)]
pub struct SummaryStyle {
    pub pass_mark: &'static str,
    pub fail_mark: &'static str,
    /// Scores at or above this get the pass mark
    pub pass_score: f64,
}

impl Default for SummaryStyle {
    fn default() -> Self {
        Self {
            pass_mark: "✅",
            fail_mark: "❌",
            pass_score: f64::from(crate::config::DEFAULT_MINIMUM_SCORE),
        }
    }
}

impl SummaryStyle {
    pub fn with_pass_score(pass_score: u32) -> Self {
        Self {
            pass_score: f64::from(pass_score),
            ..Default::default()
        }
    }

    fn mark(&self, score: f64) -> &'static str {
        if score >= self.pass_score {
            self.pass_mark
        } else {
            self.fail_mark
        }
    }
}

/// Score and issue count of one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub name: &'static str,
    pub score: f64,
    pub issues: usize,
}

pub fn categories(report: &Report) -> [CategoryScore; 4] {
    let simple = &report.results.simple_report;
    [
        CategoryScore {
            name: "Docs",
            score: simple.docs_score,
            issues: issue_count(report, |f| &f.docs_issues),
        },
        CategoryScore {
            name: "Completeness",
            score: simple.completeness_score,
            issues: issue_count(report, |f| &f.completeness_issues),
        },
        CategoryScore {
            name: "SDK Generation",
            score: simple.sdk_generation_score,
            issues: issue_count(report, |f| &f.sdk_generation_issues),
        },
        CategoryScore {
            name: "Security",
            score: simple.security_score,
            issues: issue_count(report, |f| &f.security_issues),
        },
    ]
}

fn issue_count(report: &Report, pick: fn(&FullReport) -> &Value) -> usize {
    report
        .results
        .full_report
        .as_ref()
        .and_then(|f| pick(f).as_array())
        .map_or(0, Vec::len)
}

/// Render the job summary for `file`
pub fn render(file: &str, report: &Report, style: &SummaryStyle) -> Result<String> {
    let simple = &report.results.simple_report;
    let cats = categories(report);
    let mut md = String::new();

    writeln!(md, "# RMOA lint results for '{}'\n", file)?;
    md.push_str(&overall_score(simple.score, style));
    md.push('\n');

    for cat in &cats {
        md.push_str(&category_block(cat, style));
        md.push('\n');
    }

    md.push_str("| Category | Score | Issues |\n");
    md.push_str("|----------|-------|--------|\n");
    for cat in &cats {
        md.push_str(&category_row(cat));
    }
    md.push('\n');

    writeln!(md, "**Summary:** {}\n", simple.short_summary)?;

    writeln!(md, "<details>\n<summary>Advice</summary>\n")?;
    writeln!(md, "{}\n", simple.long_summary.trim())?;
    writeln!(md, "</details>\n")?;

    writeln!(md, "[View the full report]({})", report.report_url)?;

    Ok(md)
}

fn overall_score(score: f64, style: &SummaryStyle) -> String {
    format!(
        "## {} Overall score: {}/100\n\n`{}`\n",
        style.mark(score),
        score,
        score_bar(score)
    )
}

fn category_block(cat: &CategoryScore, style: &SummaryStyle) -> String {
    format!(
        "> {} **{}**\n> Score: **{}**/100 · Issues: **{}**\n",
        style.mark(cat.score),
        cat.name,
        cat.score,
        cat.issues
    )
}

fn category_row(cat: &CategoryScore) -> String {
    format!("| {} | {} | {} |\n", cat.name, cat.score, cat.issues)
}

/// Ten-cell meter, one cell per 10 points
fn score_bar(score: f64) -> String {
    let filled = (score.clamp(0.0, 100.0) / 10.0).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}
