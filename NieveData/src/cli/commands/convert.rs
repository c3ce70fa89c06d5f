//! CLI interface for running the conversions
use std::time::Instant;

use crate::cli::progress::{DISK, LOOKING_GLASS, print_done, print_status, print_step};
use crate::config::ConvertConfig;
use crate::converter::{ConvertProgress, Stage};

pub fn execute(config: &ConvertConfig, stages: &[Stage], quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    let total = stages.len();

    if !quiet {
        print_status(
            &LOOKING_GLASS,
            &format!(
                "Converting {} → {}",
                config.source_dir.display(),
                config.dest_dir.display()
            ),
        );
    }

    let log_progress = |p: &ConvertProgress| {
        tracing::debug!(
            "[{}/{}] {} {}",
            p.current,
            p.total,
            p.phase.as_str(),
            p.message.as_deref().unwrap_or_default()
        );
    };

    for (index, stage) in stages.iter().enumerate() {
        let report = stage.run(config, &log_progress)?;
        if !quiet {
            print_step(
                index + 1,
                total,
                &DISK,
                &format!("{} written", report.stage.output_file()),
            );
        }
    }

    if !quiet {
        print_done(started.elapsed());
    }
    Ok(())
}
