use serde::Serialize;
use std::fmt;

use crate::config::SwordConfiguration;

pub mod rules;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("Error"),
            Severity::Warning => f.write_str("Warning"),
        }
    }
}

// The structure of a finding
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ValidationError {
    pub code: String,           // e.g., "SWORD-002"
    pub severity: Severity,
    pub message: String,
    pub target: Option<String>, // Which setting failed?
}

// The contract every rule must fulfill
pub trait ValidationRule {
    fn check(&self, config: &SwordConfiguration) -> Vec<ValidationError>;
    fn rule_id(&self) -> &str;
}

// The Engine that holds the registry of all rules
#[derive(Default)]
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule<R: ValidationRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn run(&self, config: &SwordConfiguration) -> Vec<ValidationError> {
        self.rules.iter().flat_map(|rule| rule.check(config)).collect()
    }
}

pub fn has_errors(findings: &[ValidationError]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Error)
}
