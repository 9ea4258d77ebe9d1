//! Output formatting for extracted facts.
//!
//! Supports two output formats:
//! - Text: one line per fact, stable and grep-friendly
//! - JSON: structured output with the result objects' field names

use std::io::{self, IsTerminal, Write};

use colored::*;
use serde::Serialize;

use crate::analysis::{
    ImportStatement, InitializerStatement, Modifier, PropertyInfo, StaticUsage, TypeConformance,
    TypeInfo,
};
use crate::config::OutputFormat;
use crate::parser::FileIdentity;

/// A fact paired with the file it was extracted from.
#[derive(Debug, Clone, Serialize)]
pub struct FileFact<T> {
    pub file: FileIdentity,
    #[serde(flatten)]
    pub fact: T,
}

impl<T> FileFact<T> {
    pub fn new(file: FileIdentity, fact: T) -> Self {
        Self { file, fact }
    }
}

/// Single-record text rendering.
pub trait TextRecord {
    fn to_text(&self) -> String;
}

impl TextRecord for ImportStatement {
    fn to_text(&self) -> String {
        let mut line = String::new();
        if !self.kind.is_empty() {
            line.push_str(&self.kind);
            line.push(' ');
        }
        line.push_str(&self.main_module);
        if !self.submodule.is_empty() {
            line.push('.');
            line.push_str(&self.submodule);
        }
        line
    }
}

impl TextRecord for FileFact<TypeConformance> {
    fn to_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.file,
            self.fact.type_name,
            self.fact.does_conform,
            self.fact.conforming_type_names.join(",")
        )
        .trim_end()
        .to_string()
    }
}

impl TextRecord for FileFact<StaticUsage> {
    fn to_text(&self) -> String {
        let member = &self.fact.queried_member;
        format!(
            "{} {}.{} {}",
            self.file, member.type_name, member.member_name, self.fact.is_used
        )
    }
}

impl TextRecord for FileFact<InitializerStatement> {
    fn to_text(&self) -> String {
        let params = if self.fact.parameters.is_empty() {
            "()".to_string()
        } else {
            self.fact
                .parameters
                .iter()
                .map(|p| format!("{}:{}", p.name, p.type_names.join("|")))
                .collect::<Vec<_>>()
                .join(",")
        };
        format!(
            "{} {} {} {}",
            self.file,
            self.fact.type_name,
            params,
            join_modifiers(self.fact.modifiers.iter())
        )
    }
}

impl TextRecord for FileFact<PropertyInfo> {
    fn to_text(&self) -> String {
        format!(
            "{} {} {}",
            self.file,
            self.fact.name,
            join_modifiers(self.fact.modifiers.iter())
        )
    }
}

impl TextRecord for FileFact<TypeInfo> {
    fn to_text(&self) -> String {
        let mut text = format!("{} {} {}", self.file, self.fact.kind, self.fact.name);
        for line in self.fact.comment.lines() {
            text.push_str("\n  ");
            text.push_str(line);
        }
        text
    }
}

fn join_modifiers<'a>(modifiers: impl Iterator<Item = &'a Modifier>) -> String {
    modifiers.map(Modifier::as_str).collect::<Vec<_>>().join(",")
}

/// Render records as text lines.
pub fn render_text<T: TextRecord>(records: &[T]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.to_text());
        out.push('\n');
    }
    out
}

/// Render records as a pretty-printed JSON array.
pub fn render_json<T: Serialize>(records: &[T]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write records to stdout in the requested format.
pub fn write_records<T>(records: &[T], format: OutputFormat) -> anyhow::Result<()>
where
    T: TextRecord + Serialize,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => writeln!(out, "{}", render_json(records)?)?,
        OutputFormat::Text => write!(out, "{}", render_text(records))?,
    }
    Ok(())
}

/// Print a one-line run summary to stderr.
pub fn write_summary(command: &str, files_scanned: usize, files_failed: usize) {
    if !io::stderr().is_terminal() {
        colored::control::set_override(false);
    }

    let status = if files_failed == 0 {
        "ok".green().bold()
    } else {
        "incomplete".yellow().bold()
    };
    eprint!("  {} ", command.cyan().bold());
    eprint!("{} ", status);
    eprint!("{}", format!("{} files scanned", files_scanned).dimmed());
    if files_failed > 0 {
        eprint!(", {}", format!("{} failed to parse", files_failed).red());
    }
    eprintln!();
}
