#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked one or more files; they are classified on arrival.
    FilesSelected(Vec<crate::Candidate>),
    /// User removed the file at this position of the displayed list.
    FileRemoved(usize),
    /// User discarded the whole selection.
    BatchCleared,
    FontSizeSelected(crate::FontSize),
    ColumnsSelected(crate::Columns),
    OrientationSelected(crate::Orientation),
    /// User clicked Submit.
    SubmitClicked,
    /// Engine finished the request with this id.
    SubmissionSettled {
        request_id: crate::RequestId,
        reply: crate::ServiceReply,
    },
    /// User switched between the rendered and textual views.
    ViewModeSelected(crate::ViewMode),
    /// User clicked Download / Copy.
    ExportClicked,
    /// Engine finished an export; `Ok` carries a short summary for the user.
    ExportFinished(Result<String, String>),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
