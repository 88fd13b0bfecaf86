//! Finding records as produced by the findings feed.
//!
//! A finding carries a severity, display text and an optional attack path.
//! Like [`crate::attack_path`], everything here reads the wire shape
//! defensively: missing or mistyped fields fall back to safe defaults.

use crate::attack_path::{self, AttackPath};
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;

/// Finding severity. Unrecognized or missing labels fall back to `Medium`,
/// matching how the console pill styling treats unknown values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Case-insensitive parse; never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "LOW" => Self::Low,
            "MEDIUM" => Self::Medium,
            "HIGH" => Self::High,
            "CRITICAL" => Self::Critical,
            _ => Self::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// CSS hook used by the host page, e.g. `sev-HIGH`.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Low => "sev-LOW",
            Self::Medium => "sev-MEDIUM",
            Self::High => "sev-HIGH",
            Self::Critical => "sev-CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sanitizes an arbitrary string into an id token safe to embed in markup
/// ids and selection keys. Keeps `[A-Za-z0-9-_:.]`, replaces the rest with
/// `-`; empty input becomes `"unknown"`.
pub fn safe_id(raw: &str) -> String {
    if raw.is_empty() {
        return "unknown".to_string();
    }
    raw.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | ':' | '.') {
                ch
            } else {
                '-'
            }
        })
        .collect()
}

/// One finding record from the feed.
#[derive(Debug, Clone, Default)]
pub struct Finding {
    finding_id: Option<String>,
    severity_label: Option<String>,
    title: Option<String>,
    risk_summary: Option<String>,
    attack_path: Value,
    lab_url: Option<String>,
}

impl Finding {
    /// Reads a finding from an arbitrary JSON value. Total: mistyped fields
    /// are treated as absent.
    pub fn from_value(raw: &Value) -> Self {
        let get = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            finding_id: get("finding_id").or_else(|| get("id")),
            severity_label: get("severity"),
            title: get("title"),
            risk_summary: get("risk_summary").or_else(|| get("summary")),
            attack_path: raw.get("attack_path").cloned().unwrap_or(Value::Null),
            lab_url: get("lab_url"),
        }
    }

    pub fn finding_id(&self) -> Option<&str> {
        self.finding_id.as_deref()
    }

    pub fn severity(&self) -> Severity {
        self.severity_label
            .as_deref()
            .map(Severity::parse)
            .unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled finding")
    }

    pub fn risk_summary(&self) -> &str {
        self.risk_summary.as_deref().unwrap_or("")
    }

    /// Sanitized id token, `"unknown"` when the record has no id.
    pub fn safe_id(&self) -> String {
        safe_id(self.finding_id.as_deref().unwrap_or(""))
    }

    /// Lab link, honored only when explicitly present and https.
    pub fn lab_url(&self) -> Option<&str> {
        self.lab_url.as_deref().filter(|u| u.starts_with("https://"))
    }

    /// The raw `attack_path` value as it arrived from the feed.
    pub fn attack_path_value(&self) -> &Value {
        &self.attack_path
    }

    /// Normalized attack path; empty when the record carries none.
    pub fn attack_path(&self) -> AttackPath {
        attack_path::normalize(&self.attack_path)
    }
}

/// Tolerant reader for the findings feed document (`{"findings": [...]}`;
/// a bare array is accepted too).
#[derive(Debug, Clone, Default)]
pub struct FindingsDocument {
    findings: Vec<Finding>,
}

impl FindingsDocument {
    pub fn from_value(raw: &Value) -> Self {
        let entries = match raw {
            Value::Object(map) => map.get("findings").and_then(Value::as_array),
            Value::Array(entries) => Some(entries),
            _ => None,
        };
        let findings = entries
            .map(|entries| entries.iter().map(Finding::from_value).collect())
            .unwrap_or_default();
        Self { findings }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Selects a finding by sanitized id, or the first record when no id is
    /// given (the console auto-selects the first finding).
    pub fn select(&self, id: Option<&str>) -> Result<&Finding> {
        match id {
            Some(id) => {
                let wanted = safe_id(id);
                self.findings
                    .iter()
                    .find(|f| f.safe_id() == wanted)
                    .ok_or_else(|| Error::FindingNotFound { id: id.to_string() })
            }
            None => self.findings.first().ok_or(Error::EmptyFeed),
        }
    }
}
