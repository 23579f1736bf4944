//! Tenant-scoped session policies
//!
//! The template bundle unpacks into a directory of IAM policy documents with
//! `{{placeholder}}` markers. Rendering substitutes the caller's values and
//! folds every statement into one inline session policy.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

const POLICY_VERSION: &str = "2012-10-17";

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Cannot read policy templates in {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Rendered template {0} is not valid JSON: {1}")]
    InvalidTemplate(String, serde_json::Error),
}

#[derive(Debug, Clone, Default)]
pub struct PolicyTemplates {
    templates: Vec<(String, String)>,
}

impl PolicyTemplates {
    /// Reads every `*.json` file under `dir`, descending into
    /// subdirectories, ordered by relative path. A missing directory yields
    /// an empty set.
    pub fn load(dir: &Path) -> Result<Self, PolicyError> {
        if !dir.exists() {
            return Ok(Self::default());
        }

        let mut paths = Vec::new();
        collect_json_files(dir, &mut paths)?;
        paths.sort();

        let mut templates = Vec::with_capacity(paths.len());
        for path in paths {
            let body = std::fs::read_to_string(&path).map_err(|source| PolicyError::Io {
                path: path.clone(),
                source,
            })?;
            let name = path
                .strip_prefix(dir)
                .unwrap_or(&path)
                .to_string_lossy()
                .into_owned();
            templates.push((name, body));
        }

        debug!("Loaded {} policy templates from {}", templates.len(), dir.display());
        Ok(Self { templates })
    }

    pub fn from_templates(templates: Vec<(String, String)>) -> Self {
        Self { templates }
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Renders one policy document, or `None` when there are no templates.
    /// Values are JSON-escaped before substitution.
    pub fn render(&self, vars: &[(&str, &str)]) -> Result<Option<String>, PolicyError> {
        if self.templates.is_empty() {
            return Ok(None);
        }

        let mut statements = Vec::new();
        for (name, template) in &self.templates {
            let mut rendered = template.clone();
            for (key, value) in vars {
                rendered = rendered.replace(&format!("{{{{{}}}}}", key), &escape(value));
            }

            let document: Value = serde_json::from_str(&rendered)
                .map_err(|e| PolicyError::InvalidTemplate(name.clone(), e))?;

            match document.get("Statement") {
                Some(Value::Array(items)) => statements.extend(items.iter().cloned()),
                Some(item @ Value::Object(_)) => statements.push(item.clone()),
                _ => debug!("Template {} has no statements, skipping", name),
            }
        }

        let policy = json!({
            "Version": POLICY_VERSION,
            "Statement": statements,
        });
        Ok(Some(policy.to_string()))
    }
}

fn collect_json_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), PolicyError> {
    let io_err = |source| PolicyError::Io {
        path: dir.to_path_buf(),
        source,
    };

    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_dir() {
            collect_json_files(&path, out)?;
        } else if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    Ok(())
}

fn escape(value: &str) -> String {
    let quoted = Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DYNAMO_TEMPLATE: &str = r#"{
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Action": ["dynamodb:GetItem", "dynamodb:PutItem"],
            "Resource": ["arn:aws:dynamodb:*:*:table/{{table}}"],
            "Condition": {
                "ForAllValues:StringEquals": { "dynamodb:LeadingKeys": ["{{tenant}}"] }
            }
        }]
    }"#;

    const S3_TEMPLATE: &str = r#"{
        "Statement": {
            "Effect": "Allow",
            "Action": "s3:GetObject",
            "Resource": "arn:aws:s3:::{{bucket}}/{{tenant}}/*"
        }
    }"#;

    #[test]
    fn test_render_substitutes_and_merges() {
        let templates = PolicyTemplates::from_templates(vec![
            ("dynamodb.json".into(), DYNAMO_TEMPLATE.into()),
            ("s3.json".into(), S3_TEMPLATE.into()),
        ]);

        let policy = templates
            .render(&[("tenant", "t-123"), ("table", "TenantInfo"), ("bucket", "exports")])
            .unwrap()
            .unwrap();
        let policy: Value = serde_json::from_str(&policy).unwrap();

        assert_eq!(policy["Version"], POLICY_VERSION);
        let statements = policy["Statement"].as_array().unwrap();
        assert_eq!(statements.len(), 2);
        assert_eq!(
            statements[0]["Condition"]["ForAllValues:StringEquals"]["dynamodb:LeadingKeys"][0],
            "t-123"
        );
        assert_eq!(statements[0]["Resource"][0], "arn:aws:dynamodb:*:*:table/TenantInfo");
        assert_eq!(statements[1]["Resource"], "arn:aws:s3:::exports/t-123/*");
    }

    #[test]
    fn test_values_cannot_break_out_of_strings() {
        let templates =
            PolicyTemplates::from_templates(vec![("dynamodb.json".into(), DYNAMO_TEMPLATE.into())]);
        let policy = templates
            .render(&[("tenant", r#"t"],"Effect":"Allow"#), ("table", "TenantInfo")])
            .unwrap()
            .unwrap();
        let policy: Value = serde_json::from_str(&policy).unwrap();
        assert_eq!(
            policy["Statement"][0]["Condition"]["ForAllValues:StringEquals"]["dynamodb:LeadingKeys"]
                .as_array()
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_no_templates_no_policy() {
        assert!(PolicyTemplates::default().render(&[("tenant", "t-1")]).unwrap().is_none());
    }

    #[test]
    fn test_invalid_template() {
        let templates = PolicyTemplates::from_templates(vec![("broken.json".into(), "{ nope".into())]);
        assert!(matches!(
            templates.render(&[]),
            Err(PolicyError::InvalidTemplate(name, _)) if name == "broken.json"
        ));
    }

    #[test]
    fn test_load_reads_json_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), S3_TEMPLATE).unwrap();
        std::fs::write(dir.path().join("a.json"), DYNAMO_TEMPLATE).unwrap();
        std::fs::write(dir.path().join("README.txt"), "not a policy").unwrap();

        let templates = PolicyTemplates::load(dir.path()).unwrap();
        assert_eq!(templates.templates.len(), 2);
        assert_eq!(templates.templates[0].0, "a.json");
    }

    #[test]
    fn test_load_descends_into_bundle_folders() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("templates").join("aws");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("dynamodb.json"), DYNAMO_TEMPLATE).unwrap();
        std::fs::write(dir.path().join("templates").join("s3.json"), S3_TEMPLATE).unwrap();

        let templates = PolicyTemplates::load(dir.path()).unwrap();
        assert_eq!(templates.templates.len(), 2);

        let policy = templates
            .render(&[("tenant", "t-7"), ("table", "TenantInfo"), ("bucket", "exports")])
            .unwrap()
            .unwrap();
        let policy: Value = serde_json::from_str(&policy).unwrap();
        assert_eq!(policy["Statement"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_load_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let templates = PolicyTemplates::load(&dir.path().join("policies")).unwrap();
        assert!(templates.is_empty());
    }
}
