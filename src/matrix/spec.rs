//! Declarative matrix of a task.
//!
//! Shape (YAML):
//!   kernel: [linux, darwin]
//!   arch: [amd64, arm64]
//!   go: ["1.22", "1.23"]     # any other key is a custom dimension
//!   include:
//!   - {kernel: [windows], arch: [amd64]}
//!   exclude:
//!   - {kernel: [darwin], arch: [amd64]}

use crate::matrix::DimensionSet;
use serde::Deserialize;

pub const KERNEL: &str = "kernel";
pub const ARCH: &str = "arch";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Spec {
    #[serde(default)]
    pub kernel: Vec<String>,

    #[serde(default)]
    pub arch: Vec<String>,

    #[serde(default)]
    pub include: Vec<DimensionSet>,

    #[serde(default)]
    pub exclude: Vec<DimensionSet>,

    /// Extra dimensions, inline next to kernel/arch.
    #[serde(flatten)]
    pub custom: DimensionSet,
}

impl Spec {
    /// No dimension and no override declared.
    pub fn is_empty(&self) -> bool {
        self.kernel.is_empty()
            && self.arch.is_empty()
            && self.custom.is_empty()
            && self.include.is_empty()
            && self.exclude.is_empty()
    }

    /// Base dimensions keyed by name; empty lists are left out.
    pub fn dimensions(&self) -> DimensionSet {
        let mut out = DimensionSet::new();
        if !self.kernel.is_empty() {
            out.insert(KERNEL.to_string(), self.kernel.clone());
        }
        if !self.arch.is_empty() {
            out.insert(ARCH.to_string(), self.arch.clone());
        }
        for (name, values) in &self.custom {
            if !values.is_empty() {
                out.insert(name.clone(), values.clone());
            }
        }
        out
    }
}
