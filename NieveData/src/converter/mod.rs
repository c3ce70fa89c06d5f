//! SPDX-FileCopyrightText: 2025 Nievemar
//!
//! SPDX-License-Identifier: MIT
//!
//! Legacy XML to site JSON conversions
//!
//! Three independent extractors, each turning one document shape into one
//! JSON file:
//! - `inicio.xml` + `menu.xml` → `inicio.json` - navigation and home page
//! - `pageUTF8.xml` → `content.json` - content sections per language
//! - `hotelesUTF8.xml` → `hoteles.json` - hotel listings per city
//!
//! [`pipeline`] runs them in that order.

pub mod content;
pub mod hoteles;
pub mod inicio;
pub mod pipeline;

use std::path::PathBuf;

pub use content::{ContentDocument, convert_content, convert_content_with_progress};
pub use hoteles::{HotelesDocument, convert_hoteles, convert_hoteles_with_progress};
pub use inicio::{InicioDocument, convert_inicio, convert_inicio_with_progress};
pub use pipeline::{Stage, run_all, run_stages};

/// Phase of a single conversion stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertPhase {
    /// Reading and decoding source XML.
    ReadingSource,
    /// Walking the parsed tree into the output structure.
    Converting,
    /// Serializing and writing JSON.
    WritingOutput,
    /// Stage finished.
    Complete,
}

impl ConvertPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            ConvertPhase::ReadingSource => "Reading",
            ConvertPhase::Converting => "Converting",
            ConvertPhase::WritingOutput => "Writing",
            ConvertPhase::Complete => "Complete",
        }
    }
}

/// Progress update emitted while a stage runs.
#[derive(Debug, Clone)]
pub struct ConvertProgress {
    pub phase: ConvertPhase,
    /// 1-based step within the stage.
    pub current: usize,
    pub total: usize,
    pub message: Option<String>,
}

impl ConvertProgress {
    pub fn new(phase: ConvertPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            message: None,
        }
    }

    pub fn with_message<S: Into<String>>(
        phase: ConvertPhase,
        current: usize,
        total: usize,
        message: S,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            message: Some(message.into()),
        }
    }
}

/// Progress callback type for conversion operations.
pub type ConvertProgressCallback<'a> = &'a dyn Fn(&ConvertProgress);

/// Outcome of one successful stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    /// The JSON file that was written.
    pub output: PathBuf,
    /// Top-level entries written (languages, or cities for hotels).
    pub entries: usize,
}
