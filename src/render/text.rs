use crate::matrix::Entry;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// kernel: linux, arch: amd64
    #[default]
    Text,
    /// amd64/linux
    Brief,
    /// JSON array of objects
    Json,
    /// MATRIX_* variables, one block per entry
    Env,
}

/// Render entries for stdout. Every format except json ends with a newline
/// per line; an empty list renders as nothing (json: `[]`).
pub fn render_entries(entries: &[Entry], format: OutputFormat) -> anyhow::Result<String> {
    let out = match format {
        OutputFormat::Text => lines(entries.iter().map(Entry::to_string)),
        OutputFormat::Brief => lines(entries.iter().map(Entry::brief)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(entries)?;
            json.push('\n');
            json
        }
        OutputFormat::Env => entries
            .iter()
            .map(|e| {
                lines(
                    e.env_vars()
                        .into_iter()
                        .map(|(k, v)| format!("{}={}", k, v)),
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(out)
}

/// Prefix for log lines of one task run: `[golang:build]{amd64/linux}`.
pub fn log_prefix(task: &str, entry: &Entry) -> String {
    if entry.is_empty() {
        format!("[{}]", task)
    } else {
        format!("[{}]{{{}}}", task, entry.brief())
    }
}

fn lines(items: impl Iterator<Item = String>) -> String {
    items.map(|l| l + "\n").collect()
}
