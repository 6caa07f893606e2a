use std::sync::Arc;

use sheetpress_logging::{press_debug, press_warn};

const DOCUMENT_CONTENT_TYPE: &str = "application/pdf";
const DOCUMENT_EXTENSION: &str = ".pdf";

/// Opaque handle to a file's bytes. Cloning shares the buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Payload(Arc<[u8]>);

impl Payload {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Payload({} B)", self.0.len())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Document,
    Other,
}

impl MediaKind {
    /// Declared content type wins; the file name is only consulted without one.
    pub fn classify(name: &str, declared_type: Option<&str>) -> Self {
        let is_document = match declared_type {
            Some(content_type) => {
                let essence = content_type.split(';').next().unwrap_or(content_type).trim();
                essence.eq_ignore_ascii_case(DOCUMENT_CONTENT_TYPE)
            }
            None => has_document_extension(name),
        };
        if is_document {
            MediaKind::Document
        } else {
            MediaKind::Other
        }
    }
}

fn has_document_extension(name: &str) -> bool {
    let len = name.len();
    len >= DOCUMENT_EXTENSION.len()
        && name.is_char_boundary(len - DOCUMENT_EXTENSION.len())
        && name[len - DOCUMENT_EXTENSION.len()..].eq_ignore_ascii_case(DOCUMENT_EXTENSION)
}

/// A file as handed over by the host, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub payload: Payload,
    pub declared_type: Option<String>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, payload: impl Into<Payload>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
            declared_type: None,
        }
    }

    pub fn with_declared_type(mut self, content_type: impl Into<String>) -> Self {
        self.declared_type = Some(content_type.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    pub payload: Payload,
    pub media_kind: MediaKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationWarning {
    pub skipped: usize,
}

impl ValidationWarning {
    pub fn message(&self) -> String {
        format!(
            "{} file(s) skipped: only PDF documents are accepted",
            self.skipped
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddOutcome {
    pub accepted: usize,
    pub skipped: usize,
}

/// Ordered set of documents staged for the next submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchSelector {
    files: Vec<PendingFile>,
    warning: Option<ValidationWarning>,
}

impl BatchSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every document candidate in order and drops the rest.
    pub fn add_files(&mut self, candidates: Vec<Candidate>) -> AddOutcome {
        let mut outcome = AddOutcome::default();
        for candidate in candidates {
            match MediaKind::classify(&candidate.name, candidate.declared_type.as_deref()) {
                MediaKind::Document => {
                    let described = sheetpress_logging::describe_payload(
                        &candidate.name,
                        candidate.payload.len(),
                    );
                    press_debug!("batch: accepted {}", described);
                    self.files.push(PendingFile {
                        name: candidate.name,
                        payload: candidate.payload,
                        media_kind: MediaKind::Document,
                    });
                    outcome.accepted += 1;
                }
                MediaKind::Other => {
                    press_warn!("batch: skipped {} (not a PDF document)", candidate.name);
                    outcome.skipped += 1;
                }
            }
        }

        self.warning = if outcome.skipped > 0 {
            Some(ValidationWarning {
                skipped: outcome.skipped,
            })
        } else {
            None
        };
        outcome
    }

    /// Removes the file at `index`. Callers only pass indices they display;
    /// anything else is ignored.
    pub fn remove_file(&mut self, index: usize) -> Option<PendingFile> {
        if index >= self.files.len() {
            press_warn!(
                "batch: remove index {} out of range (len {})",
                index,
                self.files.len()
            );
            return None;
        }
        Some(self.files.remove(index))
    }

    pub fn reset(&mut self) {
        self.files.clear();
        self.warning = None;
    }

    pub fn files(&self) -> &[PendingFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn warning(&self) -> Option<ValidationWarning> {
        self.warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> Candidate {
        Candidate::new(name, b"%PDF-1.7".to_vec())
    }

    fn names(selector: &BatchSelector) -> Vec<&str> {
        selector.files().iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn classify_prefers_declared_type() {
        assert_eq!(
            MediaKind::classify("scan.bin", Some("application/pdf")),
            MediaKind::Document
        );
        assert_eq!(
            MediaKind::classify("notes.pdf", Some("text/plain")),
            MediaKind::Other
        );
        assert_eq!(
            MediaKind::classify("x", Some("Application/PDF; charset=binary")),
            MediaKind::Document
        );
    }

    #[test]
    fn classify_falls_back_to_extension() {
        assert_eq!(MediaKind::classify("Lecture.PDF", None), MediaKind::Document);
        assert_eq!(MediaKind::classify("notes.txt", None), MediaKind::Other);
        assert_eq!(MediaKind::classify("pdf", None), MediaKind::Other);
        assert_eq!(MediaKind::classify("résumé", None), MediaKind::Other);
    }

    #[test]
    fn accumulates_across_calls_in_order() {
        let mut selector = BatchSelector::new();
        selector.add_files(vec![pdf("a.pdf"), pdf("b.pdf")]);
        selector.add_files(vec![pdf("c.pdf"), pdf("a.pdf")]);
        assert_eq!(names(&selector), vec!["a.pdf", "b.pdf", "c.pdf", "a.pdf"]);
    }

    #[test]
    fn mixed_call_keeps_valid_and_warns() {
        let mut selector = BatchSelector::new();
        let outcome = selector.add_files(vec![
            pdf("a.pdf"),
            Candidate::new("b.docx", vec![1u8, 2]),
            pdf("c.pdf"),
        ]);
        assert_eq!(outcome, AddOutcome { accepted: 2, skipped: 1 });
        assert_eq!(names(&selector), vec!["a.pdf", "c.pdf"]);
        assert_eq!(selector.warning(), Some(ValidationWarning { skipped: 1 }));

        selector.add_files(vec![pdf("d.pdf")]);
        assert_eq!(selector.warning(), None);
    }

    #[test]
    fn all_rejected_call_accepts_nothing_but_warns() {
        let mut selector = BatchSelector::new();
        selector.add_files(vec![pdf("a.pdf")]);
        let outcome = selector.add_files(vec![Candidate::new("x.png", vec![0u8])]);
        assert_eq!(outcome.accepted, 0);
        assert_eq!(selector.len(), 1);
        assert_eq!(
            selector.warning().map(|w| w.message()),
            Some("1 file(s) skipped: only PDF documents are accepted".to_string())
        );
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut selector = BatchSelector::new();
        selector.add_files(vec![pdf("a.pdf"), pdf("b.pdf"), pdf("c.pdf")]);
        let removed = selector.remove_file(1).map(|f| f.name);
        assert_eq!(removed.as_deref(), Some("b.pdf"));
        assert_eq!(names(&selector), vec!["a.pdf", "c.pdf"]);
    }

    #[test]
    fn remove_out_of_range_is_ignored() {
        let mut selector = BatchSelector::new();
        selector.add_files(vec![pdf("a.pdf")]);
        assert!(selector.remove_file(3).is_none());
        assert_eq!(selector.len(), 1);
    }

    #[test]
    fn reset_clears_files_and_warning() {
        let mut selector = BatchSelector::new();
        selector.add_files(vec![pdf("a.pdf"), Candidate::new("b.txt", Vec::<u8>::new())]);
        selector.reset();
        assert!(selector.is_empty());
        assert!(selector.warning().is_none());
    }
}
