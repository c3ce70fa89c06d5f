//! Runs the conversion stages in order
//!
//! Stages are independent and always run as navigation/home, content,
//! hotels. The first failing stage stops the run; its error names the
//! stage. Files from stages that already finished stay on disk.

use std::fmt;

use super::{ConvertProgressCallback, StageReport, content, hoteles, inicio};
use crate::config::{ConvertConfig, outputs};
use crate::error::Result;

/// One conversion stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// `inicio.xml` + `menu.xml` → `inicio.json`
    Inicio,
    /// `pageUTF8.xml` → `content.json`
    Content,
    /// `hotelesUTF8.xml` → `hoteles.json`
    Hoteles,
}

impl Stage {
    /// Every stage, in run order.
    pub const ALL: [Stage; 3] = [Stage::Inicio, Stage::Content, Stage::Hoteles];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Inicio => "inicio",
            Stage::Content => "content",
            Stage::Hoteles => "hoteles",
        }
    }

    /// File name written by this stage.
    pub fn output_file(self) -> &'static str {
        match self {
            Stage::Inicio => outputs::INICIO,
            Stage::Content => outputs::CONTENT,
            Stage::Hoteles => outputs::HOTELES,
        }
    }

    /// Run this stage alone.
    ///
    /// # Errors
    /// Returns the stage's error wrapped with the stage name.
    pub fn run(self, config: &ConvertConfig, progress: ConvertProgressCallback) -> Result<StageReport> {
        let result = match self {
            Stage::Inicio => inicio::convert_inicio_with_progress(config, progress),
            Stage::Content => content::convert_content_with_progress(config, progress),
            Stage::Hoteles => hoteles::convert_hoteles_with_progress(config, progress),
        };
        result.map_err(|err| {
            tracing::error!("Stage '{}' failed: {}", self.name(), err);
            err.in_stage(self.name())
        })
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run all three stages in order.
///
/// # Errors
/// Returns the first stage failure.
pub fn run_all(config: &ConvertConfig) -> Result<Vec<StageReport>> {
    run_stages(config, &Stage::ALL, &|_| {})
}

/// Run the given stages in order, stopping at the first failure.
///
/// # Errors
/// Returns the first stage failure.
pub fn run_stages(
    config: &ConvertConfig,
    stages: &[Stage],
    progress: ConvertProgressCallback,
) -> Result<Vec<StageReport>> {
    tracing::info!(
        "Running {} stage(s): {:?} → {:?}",
        stages.len(),
        config.source_dir,
        config.dest_dir
    );

    let mut reports = Vec::with_capacity(stages.len());
    for stage in stages {
        let report = stage.run(config, progress)?;
        tracing::info!("{} written ({} entries)", report.output.display(), report.entries);
        reports.push(report);
    }
    Ok(reports)
}
