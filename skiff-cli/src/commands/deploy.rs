//! `skiff deploy` — sync the build directory and invalidate the CDN.
//!
//! Exit codes: 0 success or declined confirmation gate; 1 upload phase
//! aborted; 2 startup precondition failure (missing config or build
//! directory). Invalidation failures are soft and never change the code.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::SystemTime;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use colored::Colorize;

use skiff_aws::{CloudFrontCdn, S3Store};
use skiff_core::config::{self, DEFAULT_CONFIG_FILE};
use skiff_sync::{
    invalidate_uploaded, sync_assets, ProbeFailurePolicy, SyncOptions, SyncRunReport,
};

use crate::console;
use crate::reporter::TerminalReporter;

/// Arguments for `skiff deploy`.
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Path to the deploy configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Skip the interactive confirmation gates.
    #[arg(long)]
    pub yes: bool,

    /// Abort the run when a remote probe fails, instead of re-uploading.
    #[arg(long)]
    pub strict_probe: bool,
}

impl DeployArgs {
    pub async fn run(self) -> Result<ExitCode> {
        println!("{}", "Skiff Release Tool".bold());
        println!("Deploys a static-site build to S3 + CloudFront");
        println!();

        let config = match config::load_at(&self.config) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{}", err.to_string().red());
                return Ok(ExitCode::from(2));
            }
        };

        // Startup precondition: the build directory must exist before any
        // remote call is attempted.
        println!(
            "{} {}",
            "Build directory:".bold(),
            config.build_dir.display()
        );
        if !config.build_dir.exists() {
            println!(
                "{} Generate a build first.",
                "Directory does not exist.".red()
            );
            return Ok(ExitCode::from(2));
        }
        print_last_modified(&config.build_dir);
        println!();

        if !self.yes && !confirm_deploy_ready()? {
            println!("Deploy cancelled.");
            return Ok(ExitCode::SUCCESS);
        }

        let assets = skiff_assets::enumerate(&config.build_dir).with_context(|| {
            format!(
                "failed to enumerate assets under {}",
                config.build_dir.display()
            )
        })?;

        println!("{}", "Beginning S3 upload.".bold());
        let store = S3Store::new(&config.bucket.region, &config.bucket.name).await;
        let options = SyncOptions {
            probe_failure: if self.strict_probe {
                ProbeFailurePolicy::Abort
            } else {
                ProbeFailurePolicy::Reupload
            },
        };
        let mut reporter = TerminalReporter::new();
        let report = sync_assets(&store, &assets, &options, &mut reporter)
            .await
            .context("sync run failed")?;

        print_summary(&report);

        // An aborted run never reaches the invalidation phase, even for keys
        // uploaded earlier in the same run.
        if !report.succeeded() {
            return Ok(ExitCode::from(1));
        }

        if report.uploaded.is_empty() {
            println!(
                "{} No files were uploaded.",
                "Skipping CloudFront invalidation.".bold()
            );
            return Ok(ExitCode::SUCCESS);
        }

        println!("{}", "Beginning CloudFront invalidation.".bold());
        let cdn = CloudFrontCdn::new(&config.cdn.region, &config.cdn.distribution_id).await;
        let reference = Utc::now().timestamp_millis().to_string();
        match invalidate_uploaded(&cdn, &report.uploaded, &reference).await {
            Ok(Some(id)) => println!("{} {id}", "Invalidation success.".bold()),
            Ok(None) => {}
            // Soft failure: uploads stand, the CDN serves stale copies until
            // they expire or a later run succeeds.
            Err(err) => eprintln!("{} {err}", "Invalidation failed.".red()),
        }

        Ok(ExitCode::SUCCESS)
    }
}

// ---------------------------------------------------------------------------
// Confirmation gates
// ---------------------------------------------------------------------------

fn confirm_deploy_ready() -> Result<bool> {
    let wants_to_deploy =
        console::confirm("Deploy the latest build in the build directory?")
            .context("failed to read confirmation")?;
    if !wants_to_deploy {
        return Ok(false);
    }

    let build_is_fresh = console::confirm("Has the production build already been generated?")
        .context("failed to read confirmation")?;
    Ok(build_is_fresh)
}

// ---------------------------------------------------------------------------
// Build directory age
// ---------------------------------------------------------------------------

fn print_last_modified(build_dir: &std::path::Path) {
    let Ok(modified) = std::fs::metadata(build_dir).and_then(|m| m.modified()) else {
        return;
    };
    let secs = SystemTime::now()
        .duration_since(modified)
        .unwrap_or_default()
        .as_secs();
    let (label, recent) = age_parts(secs);
    let line = format!("{} {label}", "Last modified:".bold());
    if recent {
        println!("{line}");
    } else {
        // A stale build directory usually means someone forgot to rebuild.
        println!("{}", line.red());
    }
}

/// Human label plus "is this recent enough to deploy without suspicion".
fn age_parts(secs: u64) -> (String, bool) {
    const ONE_MINUTE: u64 = 60;
    const ONE_HOUR: u64 = 60 * ONE_MINUTE;
    const ONE_DAY: u64 = 24 * ONE_HOUR;

    if secs < 1 {
        return ("just now".to_string(), true);
    }
    if secs < ONE_MINUTE {
        return (plural(secs, "second"), true);
    }
    if secs < ONE_HOUR {
        let minutes = secs / ONE_MINUTE;
        return (plural(minutes, "minute"), minutes < 3);
    }
    if secs < ONE_DAY {
        return (plural(secs / ONE_HOUR, "hour"), false);
    }
    (plural(secs / ONE_DAY, "day"), false)
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

fn print_summary(report: &SyncRunReport) {
    println!();
    let count = report.uploaded.len();
    let noun = if count == 1 { "asset" } else { "assets" };

    if let Some(failure) = &report.failure {
        println!(
            "{} {count} {noun} uploaded before the failure.",
            "S3 upload aborted.".red().bold()
        );
        println!("  {}: {}", failure.key, failure.message);
    } else {
        println!("{} {count} {noun} uploaded.", "S3 upload complete.".bold());
    }

    if !report.uploaded.is_empty() {
        for key in &report.uploaded {
            println!(" • {key}");
        }
        println!();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_label_singular_and_plural() {
        assert_eq!(age_parts(0).0, "just now");
        assert_eq!(age_parts(1).0, "1 second ago");
        assert_eq!(age_parts(45).0, "45 seconds ago");
        assert_eq!(age_parts(60).0, "1 minute ago");
        assert_eq!(age_parts(7 * 60).0, "7 minutes ago");
        assert_eq!(age_parts(3600).0, "1 hour ago");
        assert_eq!(age_parts(2 * 24 * 3600).0, "2 days ago");
    }

    #[test]
    fn recency_cutoff_is_three_minutes() {
        assert!(age_parts(30).1);
        assert!(age_parts(2 * 60).1);
        assert!(!age_parts(3 * 60).1);
        assert!(!age_parts(3600).1);
    }
}
