//! Instance file loading (TOML or JSON).

use anyhow::{Context, Result};
use consultplan_core::{CompatibilityRow, CompatibilityTable, Consultant, Instance, Task};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Toml,
    Json,
}

impl InputFormat {
    /// `.json` files are JSON, everything else TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Toml,
        }
    }
}

/// On-disk layout of an instance
#[derive(Debug, Deserialize)]
pub struct InstanceFile {
    pub tasks: Vec<Task>,
    pub consultants: Vec<Consultant>,
    /// Generated from skills when absent
    #[serde(default)]
    pub compatibility: Option<Vec<CompatibilityRow>>,
}

impl InstanceFile {
    pub fn parse(contents: &str, format: InputFormat) -> Result<Self> {
        match format {
            InputFormat::Toml => toml::from_str(contents).context("invalid TOML instance"),
            InputFormat::Json => serde_json::from_str(contents).context("invalid JSON instance"),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&contents, InputFormat::from_path(path))
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Sort everything by id and validate.
    pub fn into_instance(mut self) -> Result<Instance> {
        self.tasks.sort_by_key(|t| t.id);
        self.consultants.sort_by_key(|c| c.id);

        let compatibility = match self.compatibility.take() {
            Some(rows) => {
                let mut table = CompatibilityTable::from_rows(rows);
                table.sort_by_task();
                table
            }
            None => {
                tracing::debug!("no compatibility table given, deriving it from skills");
                CompatibilityTable::from_skills(&self.tasks, &self.consultants)
            }
        };

        Ok(Instance::new(self.tasks, self.consultants, compatibility)?)
    }
}

/// Read, sort and validate an instance file
pub fn load_instance(path: &Path) -> Result<Instance> {
    InstanceFile::read(path)?
        .into_instance()
        .with_context(|| format!("invalid instance in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TOML_INSTANCE: &str = r#"
[[tasks]]
id = 2
hours = 6.0

[[tasks]]
id = 1
hours = 4.0
skills = ["java"]

[[consultants]]
id = 1
hourly_cost = 10.0
seniority = "senior"
skills = ["java"]

[[consultants]]
id = 2
hourly_cost = 20.0

[[compatibility]]
task = 2
factors = [100.0, 180.0]

[[compatibility]]
task = 1
factors = [85.0, 100.0]
"#;

    #[test]
    fn toml_instance_is_sorted_by_id() {
        let instance = InstanceFile::parse(TOML_INSTANCE, InputFormat::Toml)
            .unwrap()
            .into_instance()
            .unwrap();

        let ids: Vec<u32> = instance.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        let times = instance.processing_times().unwrap();
        assert!((times.get(0, 0) - 3.4).abs() < 1e-9);
        assert!((times.get(1, 1) - 10.8).abs() < 1e-9);
    }

    #[test]
    fn json_instance_without_compatibility_uses_skills() {
        let json = r#"{
            "tasks": [{"id": 1, "hours": 10.0, "skills": ["rust"]}],
            "consultants": [
                {"id": 1, "hourly_cost": 50.0, "seniority": "junior", "skills": ["rust"]},
                {"id": 2, "hourly_cost": 80.0, "seniority": "senior"}
            ]
        }"#;
        let instance = InstanceFile::parse(json, InputFormat::Json)
            .unwrap()
            .into_instance()
            .unwrap();

        let row = instance.compatibility().row(1).unwrap();
        assert!((row[0] - 180.0).abs() < 1e-9);
        assert!((row[1] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.JSON")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("a.toml")), InputFormat::Toml);
        assert_eq!(InputFormat::from_path(Path::new("a")), InputFormat::Toml);
    }

    #[test]
    fn negative_hours_are_rejected() {
        let bad = "[[tasks]]\nid = 1\nhours = -2.0\n\n[[consultants]]\nid = 1\nhourly_cost = 1.0\n";
        let parsed = InstanceFile::parse(bad, InputFormat::Toml).unwrap();
        assert!(parsed.into_instance().is_err());
    }
}
