//! Task file (dukkha.yaml / dukkha.json): tasks and their matrices.
//!
//! YAML shape:
//!   tasks:
//!   - name: build
//!     tool: golang           # optional, task id becomes "golang:build"
//!     matrix:
//!       kernel: [linux, darwin]
//!       arch: [amd64, arm64]
//!       go: ["1.22"]
//!       exclude:
//!       - {kernel: [darwin], arch: [amd64]}
//!
//! Matrix values arrive already resolved; nothing is rendered here. We check
//! what the expansion engine takes for granted: unique task ids, no custom
//! dimension shadowing a reserved key, and dimension names usable as
//! environment variable suffixes.

use crate::Result;
use crate::diagnostics;
use crate::matrix::spec::{ARCH, KERNEL};
use crate::matrix::{DimensionSet, Spec};

use anyhow::{Context, bail};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const RESERVED: [&str; 4] = [KERNEL, ARCH, "include", "exclude"];
const DIMENSION_NAME_RE: &str = r"^[A-Za-z_][A-Za-z0-9_.\-]*$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn from_path(path: &str) -> Self {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub tasks: Vec<RawTask>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTask {
    pub name: String,

    #[serde(default)]
    pub tool: Option<String>,

    #[serde(default)]
    pub matrix: Option<Spec>,
}

/// Validated task ready for expansion.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    pub id: String,
    pub matrix: Option<Spec>,
}

#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub tasks: BTreeMap<String, TaskSpec>,
}

impl ValidatedConfig {
    /// Look up by full id ("tool:name"), falling back to a bare name when it
    /// is unambiguous.
    pub fn task(&self, id: &str) -> Result<&TaskSpec> {
        if let Some(task) = self.tasks.get(id) {
            return Ok(task);
        }

        let by_name: Vec<&TaskSpec> = self
            .tasks
            .values()
            .filter(|t| t.id.rsplit(':').next() == Some(id))
            .collect();

        match by_name.as_slice() {
            [task] => Ok(*task),
            [] => bail!("{}", diagnostics::error_message(format!("unknown task {}", id))),
            many => bail!(
                "{}",
                diagnostics::error_message(format!(
                    "task name {} is ambiguous: {}",
                    id,
                    many.iter().map(|t| t.id.as_str()).collect::<Vec<_>>().join(", ")
                ))
            ),
        }
    }
}

pub fn load_config(path: &str) -> Result<RawConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| diagnostics::error_message(format!("read config file {}", path)))?;
    parse_config(&text, Format::from_path(path))
        .with_context(|| diagnostics::error_message(format!("parse config file {}", path)))
}

pub fn parse_config(text: &str, format: Format) -> Result<RawConfig> {
    let raw: RawConfig = match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Yaml => serde_yml::from_str(text)?,
    };
    Ok(raw)
}

impl RawConfig {
    pub fn validate_and_build(&self) -> Result<ValidatedConfig> {
        let name_re = Regex::new(DIMENSION_NAME_RE)?;

        let mut tasks: BTreeMap<String, TaskSpec> = BTreeMap::new();
        for raw in &self.tasks {
            let name = raw.name.trim();
            if name.is_empty() {
                bail!("{}", diagnostics::error_message("task name cannot be empty"));
            }

            let id = match raw.tool.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
                Some(tool) => format!("{}:{}", tool, name),
                None => name.to_string(),
            };

            if let Some(matrix) = &raw.matrix {
                validate_matrix(&id, matrix, &name_re)?;
            }

            if tasks.contains_key(&id) {
                bail!("{}", diagnostics::error_message(format!("duplicate task id: {}", id)));
            }
            tasks.insert(
                id.clone(),
                TaskSpec {
                    id,
                    matrix: raw.matrix.clone(),
                },
            );
        }

        Ok(ValidatedConfig { tasks })
    }
}

fn validate_matrix(task: &str, matrix: &Spec, name_re: &Regex) -> Result<()> {
    for name in matrix.custom.keys() {
        if RESERVED.contains(&name.as_str()) {
            bail!(
                "{}",
                diagnostics::error_message(format!(
                    "task {}: custom matrix dimension '{}' is reserved",
                    task, name
                ))
            );
        }
    }

    let sets = std::iter::once(&matrix.custom)
        .chain(&matrix.include)
        .chain(&matrix.exclude);
    for set in sets {
        check_names(task, set, name_re)?;
    }
    Ok(())
}

fn check_names(task: &str, set: &DimensionSet, name_re: &Regex) -> Result<()> {
    for name in set.keys() {
        if !name_re.is_match(name) {
            bail!(
                "{}",
                diagnostics::error_message(format!(
                    "task {}: invalid matrix dimension name '{}'",
                    task, name
                ))
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const YAML: &str = r#"
tasks:
- name: build
  tool: golang
  matrix:
    kernel: [linux, darwin]
    arch: [amd64]
    go: ["1.22", "1.23"]
    include:
    - {kernel: [windows], arch: [amd64]}
- name: lint
"#;

    #[test]
    fn parses_yaml_tasks() {
        let cfg = parse_config(YAML, Format::Yaml)
            .unwrap()
            .validate_and_build()
            .unwrap();

        assert_eq!(cfg.tasks.keys().collect::<Vec<_>>(), vec!["golang:build", "lint"]);

        let build = cfg.task("golang:build").unwrap();
        let matrix = build.matrix.as_ref().unwrap();
        assert_eq!(matrix.kernel, vec!["linux", "darwin"]);
        assert_eq!(matrix.custom["go"], vec!["1.22", "1.23"]);
        assert_eq!(matrix.include.len(), 1);

        assert!(cfg.task("lint").unwrap().matrix.is_none());
    }

    #[test]
    fn parses_json_tasks() {
        let json = r#"{"tasks": [{"name": "test", "matrix": {"arch": ["arm64"]}}]}"#;
        let cfg = parse_config(json, Format::Json)
            .unwrap()
            .validate_and_build()
            .unwrap();
        assert_eq!(cfg.task("test").unwrap().matrix.as_ref().unwrap().arch, vec!["arm64"]);
    }

    #[test]
    fn bare_name_lookup() {
        let cfg = parse_config(YAML, Format::Yaml)
            .unwrap()
            .validate_and_build()
            .unwrap();
        assert_eq!(cfg.task("build").unwrap().id, "golang:build");
        assert!(cfg.task("missing").is_err());
    }

    #[test]
    fn ambiguous_bare_name() {
        let yaml = "tasks:\n- {name: build, tool: a}\n- {name: build, tool: b}\n";
        let cfg = parse_config(yaml, Format::Yaml)
            .unwrap()
            .validate_and_build()
            .unwrap();
        let err = cfg.task("build").unwrap_err().to_string();
        assert!(err.contains("ambiguous"), "{}", err);
        assert!(cfg.task("a:build").is_ok());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let yaml = "tasks:\n- {name: build}\n- {name: build}\n";
        let err = parse_config(yaml, Format::Yaml)
            .unwrap()
            .validate_and_build()
            .unwrap_err();
        assert!(err.to_string().contains("duplicate task id"));
    }

    #[test]
    fn rejects_bad_dimension_names() {
        let yaml = "tasks:\n- name: build\n  matrix:\n    exclude:\n    - {\"bad name\": [x]}\n";
        let err = parse_config(yaml, Format::Yaml)
            .unwrap()
            .validate_and_build()
            .unwrap_err();
        assert!(err.to_string().contains("invalid matrix dimension name"));
    }

    #[test]
    fn rejects_reserved_custom_dimension() {
        let mut spec = Spec::default();
        spec.custom.insert("include".into(), vec!["x".into()]);
        let re = Regex::new(DIMENSION_NAME_RE).unwrap();
        let err = validate_matrix("build", &spec, &re).unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path("dukkha.json"), Format::Json);
        assert_eq!(Format::from_path("dukkha.yaml"), Format::Yaml);
        assert_eq!(Format::from_path("dukkha.yml"), Format::Yaml);
        assert_eq!(Format::from_path("dukkha"), Format::Yaml);
    }
}
