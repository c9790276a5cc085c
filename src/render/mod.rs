// src/render/mod.rs
//! Turning a customized application into documents

pub mod typst;

pub use self::typst::TypstRenderer;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;

use crate::core::template_engine::TemplateInfo;
use crate::types::CustomizedApplication;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Resume, DocumentKind::CoverLetter];

    /// Main source file of this document inside a template set.
    pub fn template_file(self, template: &TemplateInfo) -> &str {
        match self {
            DocumentKind::Resume => template.resume_file(),
            DocumentKind::CoverLetter => template.cover_letter_file(),
        }
    }

    pub fn output_file_name(self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume.pdf",
            DocumentKind::CoverLetter => "cover_letter.pdf",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Resume => f.write_str("resume"),
            DocumentKind::CoverLetter => f.write_str("cover letter"),
        }
    }
}

/// Fills a layout with the application record and writes a document to `output`.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(
        &self,
        kind: DocumentKind,
        application: &CustomizedApplication,
        output: &Path,
    ) -> Result<()>;
}
