//! Validation for pipeline configurations and user input.
//!
//! [`ValidationEngine`] checks a parsed [`PipelineSpec`] with every
//! registered rule and returns all findings together in a
//! [`ValidationReport`]; one bad field does not hide the next.
//!
//! Free text is checked separately by [`validate_input`] before it reaches
//! the pipeline.
//!
//! # Quick start
//!
//! ```rust
//! use textprep::pipeline::spec::PipelineSpec;
//! use textprep::pipeline::validation::ValidationEngine;
//!
//! let spec = PipelineSpec::from_json(r#"{ "v": 1 }"#).unwrap();
//! let report = ValidationEngine::with_defaults().validate(&spec);
//! assert!(report.is_valid());
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::spec::{PipelineSpec, SPEC_VERSION};
use crate::error::InputError;

// ─── Input ──────────────────────────────────────────────────────────────────

/// Reject empty or whitespace-only text; otherwise hand it back unchanged.
pub fn validate_input(text: &str) -> Result<&str, InputError> {
    if text.trim().is_empty() {
        Err(InputError::Empty)
    } else {
        Ok(text)
    }
}

// ─── Issue ──────────────────────────────────────────────────────────────────

/// Stable machine-readable category of a configuration problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    UnsupportedVersion,
    UnknownField,
    InvalidValue,
}

/// One configuration problem: what, where (JSON pointer), and how to fix it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecIssue {
    pub code: IssueCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl SpecIssue {
    pub fn new(code: IssueCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for SpecIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{path}: {}", self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

// ─── Findings ───────────────────────────────────────────────────────────────

/// Hard errors reject the configuration; warnings are only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Error when `strict` is set, otherwise warning.
    pub fn strict_or_warning(strict: bool) -> Self {
        if strict {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub severity: Severity,
    #[serde(flatten)]
    pub issue: SpecIssue,
}

/// Everything the rules found, in rule order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn push(&mut self, severity: Severity, issue: SpecIssue) {
        self.findings.push(Finding { severity, issue });
    }

    pub fn error(&mut self, issue: SpecIssue) {
        self.push(Severity::Error, issue);
    }

    pub fn warning(&mut self, issue: SpecIssue) {
        self.push(Severity::Warning, issue);
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &SpecIssue> {
        self.findings
            .iter()
            .filter(move |f| f.severity == severity)
            .map(|f| &f.issue)
    }

    pub fn errors(&self) -> impl Iterator<Item = &SpecIssue> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &SpecIssue> {
        self.with_severity(Severity::Warning)
    }

    /// No errors; warnings are allowed.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// All errors joined into one line, for wrapping in an error value.
    pub fn error_summary(&self) -> String {
        self.errors()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ─── Rules and engine ───────────────────────────────────────────────────────

/// One check over a [`PipelineSpec`]. Rules record findings and never stop
/// the engine.
pub trait ValidationRule: Send + Sync {
    /// Stable identifier, e.g. `"version"`.
    fn name(&self) -> &str;

    fn check(&self, spec: &PipelineSpec, report: &mut ValidationReport);
}

/// An ordered set of [`ValidationRule`]s.
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// No rules at all.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Version, index URL and unknown-field checks.
    pub fn with_defaults() -> Self {
        Self::empty()
            .with_rule(VersionRule)
            .with_rule(IndexUrlRule)
            .with_rule(UnknownFieldsRule)
    }

    pub fn with_rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn validate(&self, spec: &PipelineSpec) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            rule.check(spec, &mut report);
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ─── version ────────────────────────────────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn check(&self, spec: &PipelineSpec, report: &mut ValidationReport) {
        if spec.v != SPEC_VERSION {
            report.error(
                SpecIssue::new(
                    IssueCode::UnsupportedVersion,
                    "/v",
                    format!("unsupported config version {}", spec.v),
                )
                .with_hint(format!("Set \"v\" to {SPEC_VERSION}")),
            );
        }
    }
}

// ─── index_url must be http(s) ──────────────────────────────────────────────

struct IndexUrlRule;

impl ValidationRule for IndexUrlRule {
    fn name(&self) -> &str {
        "index_url"
    }

    fn check(&self, spec: &PipelineSpec, report: &mut ValidationReport) {
        let url = spec.resources.index_url.trim();
        if url.starts_with("https://") || url.starts_with("http://") {
            return;
        }
        let issue = SpecIssue::new(
            IssueCode::InvalidValue,
            "/resources/index_url",
            format!("index_url \"{url}\" is not an http(s) URL"),
        )
        .with_hint("Remove index_url to use the default NLTK package index");

        // Never contacted when downloads are off.
        if spec.resources.download {
            report.error(issue);
        } else {
            report.warning(issue);
        }
    }
}

// ─── unknown fields (error when strict) ─────────────────────────────────────

struct UnknownFieldsRule;

fn report_unknown(
    report: &mut ValidationReport,
    section: &str,
    fields: &HashMap<String, serde_json::Value>,
    strict: bool,
) {
    let mut keys: Vec<&String> = fields.keys().collect();
    keys.sort();
    for key in keys {
        report.push(
            Severity::strict_or_warning(strict),
            SpecIssue::new(
                IssueCode::UnknownField,
                format!("{section}/{key}"),
                format!("unrecognized field \"{key}\""),
            )
            .with_hint("Check spelling or remove this field"),
        );
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn check(&self, spec: &PipelineSpec, report: &mut ValidationReport) {
        report_unknown(report, "", &spec.unknown_fields, spec.strict);
        report_unknown(
            report,
            "/resources",
            &spec.resources.unknown_fields,
            spec.strict,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(json: &str) -> ValidationReport {
        let spec: PipelineSpec = serde_json::from_str(json).unwrap();
        ValidationEngine::with_defaults().validate(&spec)
    }

    #[test]
    fn test_input_rejects_empty_and_whitespace() {
        assert_eq!(validate_input(""), Err(InputError::Empty));
        assert_eq!(validate_input("   \n\t "), Err(InputError::Empty));
        assert_eq!(InputError::Empty.to_string(), "Please type some text first.");
    }

    #[test]
    fn test_input_passes_text_through() {
        assert_eq!(validate_input("  hi  "), Ok("  hi  "));
        assert_eq!(validate_input("123!!! 456???"), Ok("123!!! 456???"));
    }

    #[test]
    fn test_default_rules() {
        assert_eq!(
            ValidationEngine::default().rule_names(),
            vec!["version", "index_url", "unknown_fields"]
        );
    }

    #[test]
    fn test_clean_configs_have_no_findings() {
        assert!(validate(r#"{ "v": 1 }"#).is_empty());
        assert!(ValidationEngine::default()
            .validate(&PipelineSpec::default())
            .is_empty());
    }

    #[test]
    fn test_unsupported_version() {
        let report = validate(r#"{ "v": 2 }"#);
        let errors: Vec<_> = report.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, IssueCode::UnsupportedVersion);
        assert_eq!(errors[0].path, "/v");
    }

    #[test]
    fn test_index_url_must_be_http() {
        let report = validate(r#"{ "v": 1, "resources": { "index_url": "ftp://mirror/packages" } }"#);
        let errors: Vec<_> = report.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, IssueCode::InvalidValue);
        assert_eq!(errors[0].path, "/resources/index_url");
    }

    #[test]
    fn test_bad_index_url_only_warns_when_offline() {
        let report =
            validate(r#"{ "v": 1, "resources": { "index_url": "nowhere", "download": false } }"#);
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_unknown_field_is_warning_by_default() {
        let report = validate(r#"{ "v": 1, "stemer": "porter" }"#);
        assert!(report.is_valid());
        let warnings: Vec<_> = report.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, IssueCode::UnknownField);
        assert_eq!(warnings[0].path, "/stemer");
    }

    #[test]
    fn test_unknown_fields_strict_are_sorted_errors() {
        let report = validate(r#"{ "v": 1, "strict": true, "zzz": 1, "aaa": 2, "resources": { "mirror": 1 } }"#);
        let paths: Vec<_> = report.errors().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/aaa", "/zzz", "/resources/mirror"]);
    }

    #[test]
    fn test_rules_do_not_short_circuit() {
        let report = validate(
            r#"{
                "v": 3,
                "strict": true,
                "bogus": true,
                "resources": { "index_url": "file:///tmp" }
            }"#,
        );
        assert_eq!(report.errors().count(), 3);
        assert!(report
            .error_summary()
            .starts_with("/v: unsupported config version 3 (Set \"v\" to 1)"));
    }

    #[test]
    fn test_custom_rule() {
        struct NoSnowball;
        impl ValidationRule for NoSnowball {
            fn name(&self) -> &str {
                "no_snowball"
            }
            fn check(&self, spec: &PipelineSpec, report: &mut ValidationReport) {
                if spec.stemmer == crate::nlp::stemmer::StemmerKind::Snowball {
                    report.warning(SpecIssue::new(IssueCode::InvalidValue, "", "snowball in use"));
                }
            }
        }

        let engine = ValidationEngine::empty().with_rule(NoSnowball);
        let spec: PipelineSpec = serde_json::from_str(r#"{ "v": 1, "stemmer": "snowball" }"#).unwrap();
        let report = engine.validate(&spec);
        assert!(report.is_valid());
        assert_eq!(report.warnings().next().unwrap().to_string(), "/: snowball in use");
    }

    #[test]
    fn test_report_json_shape() {
        let json = serde_json::to_value(validate(r#"{ "v": 7 }"#)).unwrap();
        let findings = json["findings"].as_array().unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0]["severity"], "error");
        assert_eq!(findings[0]["code"], "unsupported_version");
        assert_eq!(findings[0]["hint"], "Set \"v\" to 1");
    }
}
