use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::warn;

use sword_core::config::SwordConfiguration;
use sword_core::get_standard_validator;
use sword_core::validation::{has_errors, Severity};

use crate::config::Config;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Configuration file to check (defaults to $SWORD_CONFIG)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

pub fn execute(config: Config, args: ValidateArgs) -> Result<()> {
    let path = args.file.unwrap_or(config.sword_config);
    println!("Validating: {}", path.display());

    let sword = SwordConfiguration::from_file(&path)?;
    let findings = get_standard_validator().run(&sword);

    if findings.is_empty() {
        println!("VALIDATION PASSED: no findings.");
        return Ok(());
    }

    println!("Found {} finding(s).", findings.len());
    println!("{:-<50}", "-");
    for finding in &findings {
        warn!(code = %finding.code, severity = %finding.severity, "{}", finding.message);

        let marker = match finding.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        println!("{} [{}] {}", marker, finding.code, finding.message);
        if let Some(target) = &finding.target {
            println!("   Ref: {}", target);
        }
    }
    println!("{:-<50}", "-");

    if has_errors(&findings) {
        bail!("{} has error-severity findings", path.display());
    }
    Ok(())
}
