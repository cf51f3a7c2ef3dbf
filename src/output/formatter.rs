//! Output formatters: console, JSON and Markdown renderings of a match report

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::MatchReport;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting match reports
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter; emits the caller-facing response object
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn format_verdict(&self, qualified: bool) -> String {
        let (label, color) = if qualified {
            ("QUALIFIED", Color::Green)
        } else {
            ("NOT QUALIFIED", Color::Red)
        };

        if self.use_colors {
            format!("[{}]", label.color(color).bold())
        } else {
            format!("[{}]", label)
        }
    }

    fn format_list(&self, items: &[String], color: Color) -> String {
        if items.is_empty() {
            return "  (none)\n".to_string();
        }
        items
            .iter()
            .map(|item| format!("  • {}\n", self.colorize(item, color)))
            .collect()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let response = report.response();
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME QUALIFICATION"));
        output.push_str(&format!(
            "Similarity score: {:.1}% {}\n",
            response.similarity_score * 100.0,
            self.format_verdict(response.qualified)
        ));

        output.push_str(&self.format_header("Candidate"));
        output.push_str(&format!(
            "  Name:       {}\n",
            response.name.as_deref().unwrap_or("-")
        ));
        output.push_str(&format!(
            "  Email:      {}\n",
            response.email.as_deref().unwrap_or("-")
        ));
        let experience = match (response.experience_years, report.job.minimum_experience_years) {
            (Some(years), _) => format!("{:.1} years", years),
            (None, Some(minimum)) => self.colorize(&format!("below the required {} years", minimum), Color::Yellow),
            (None, None) => "-".to_string(),
        };
        output.push_str(&format!("  Experience: {}\n", experience));
        output.push_str(&format!(
            "  GPA:        {}\n",
            response.education.gpa.as_deref().unwrap_or("-")
        ));

        output.push_str(&self.format_header("Matched Skills"));
        output.push_str(&self.format_list(&response.matched_skills, Color::Green));

        output.push_str(&self.format_header("Missing Skills"));
        output.push_str(&self.format_list(&response.missing_skills, Color::Red));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let response = report.response();
        if self.pretty {
            Ok(serde_json::to_string_pretty(&response)?)
        } else {
            Ok(serde_json::to_string(&response)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let response = report.response();
        let mut md = String::new();

        md.push_str("# Resume Qualification\n\n");
        md.push_str(&format!(
            "**Verdict:** {}  \n**Similarity score:** {:.1}%\n\n",
            if response.qualified { "Qualified" } else { "Not Qualified" },
            response.similarity_score * 100.0
        ));

        md.push_str("## Candidate\n\n");
        md.push_str("| Field | Value |\n|---|---|\n");
        md.push_str(&format!("| Name | {} |\n", response.name.as_deref().unwrap_or("-")));
        md.push_str(&format!("| Email | {} |\n", response.email.as_deref().unwrap_or("-")));
        md.push_str(&format!(
            "| Experience | {} |\n",
            response
                .experience_years
                .map(|years| format!("{:.1} years", years))
                .unwrap_or_else(|| "-".to_string())
        ));
        md.push_str(&format!(
            "| GPA | {} |\n\n",
            response.education.gpa.as_deref().unwrap_or("-")
        ));

        md.push_str("## Matched Skills\n\n");
        md.push_str(&Self::bullet_list(&response.matched_skills));
        md.push_str("\n## Missing Skills\n\n");
        md.push_str(&Self::bullet_list(&response.missing_skills));

        Ok(md)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl MarkdownFormatter {
    fn bullet_list(items: &[String]) -> String {
        if items.is_empty() {
            return "_None_\n".to_string();
        }
        items.iter().map(|item| format!("- {}\n", item)).collect()
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter,
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(true, true)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
