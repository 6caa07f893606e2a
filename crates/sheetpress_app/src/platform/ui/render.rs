use sheetpress_core::{AppViewModel, ExportNotice, SubmissionStatus, ViewMode};

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "Files ({}): {}",
        view.files.len(),
        if view.files.is_empty() {
            "none".to_string()
        } else {
            view.files
                .iter()
                .map(|row| format!("[{}] {} ({})", row.index, row.name, format_bytes(row.bytes)))
                .collect::<Vec<_>>()
                .join(", ")
        }
    ));
    if let Some(warning) = &view.warning {
        lines.push(format!("Warning: {warning}"));
    }
    lines.push(format!(
        "Options: font {} | columns {} | {}",
        view.options.font_size.wire_value(),
        view.options.columns.wire_value(),
        view.options.orientation.wire_value()
    ));
    lines.push(format!("Status: {}", status_label(&view.status)));

    if let Some(result) = &view.result {
        let modes = view
            .offered_modes
            .iter()
            .map(|mode| mode_label(*mode))
            .collect::<Vec<_>>()
            .join("/");
        lines.push(format!(
            "Result: {} [view: {}; offered: {}]",
            result.artifact_url,
            mode_label(view.view_mode),
            modes
        ));
    }
    if let Some(body) = &view.textual_body {
        lines.push("----- source -----".to_string());
        lines.extend(body.lines().map(ToOwned::to_owned));
        lines.push("------------------".to_string());
    }
    match &view.export_notice {
        Some(ExportNotice::Completed(summary)) => lines.push(format!("Export: {summary}")),
        Some(ExportNotice::Failed(message)) => lines.push(format!("Export failed: {message}")),
        None => {}
    }

    lines
}

fn status_label(status: &SubmissionStatus) -> String {
    match status {
        SubmissionStatus::Idle => "Idle".to_string(),
        SubmissionStatus::Submitting => "Processing...".to_string(),
        SubmissionStatus::Succeeded => "Done".to_string(),
        SubmissionStatus::Failed(message) => format!("Failed: {message}"),
    }
}

fn mode_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Rendered => "rendered",
        ViewMode::Textual => "textual",
    }
}

fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < KIB * KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MiB", bytes as f64 / (KIB * KIB) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetpress_core::{FileRowView, ResultView};

    #[test]
    fn renders_failure_and_warning() {
        let view = AppViewModel {
            files: vec![FileRowView {
                index: 0,
                name: "a.pdf".to_string(),
                bytes: 2048,
            }],
            warning: Some("1 file(s) skipped: only PDF documents are accepted".to_string()),
            status: SubmissionStatus::Failed("unsupported file".to_string()),
            ..AppViewModel::default()
        };
        let lines = render(&view);
        assert_eq!(lines[0], "Files (1): [0] a.pdf (2.0 KiB)");
        assert!(lines.contains(&"Status: Failed: unsupported file".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("Warning: 1 file(s) skipped")));
    }

    #[test]
    fn renders_textual_body() {
        let view = AppViewModel {
            status: SubmissionStatus::Succeeded,
            result: Some(ResultView {
                artifact_url: "http://svc/out/1.pdf".to_string(),
                has_source_text: true,
            }),
            view_mode: ViewMode::Textual,
            offered_modes: vec![ViewMode::Rendered, ViewMode::Textual],
            textual_body: Some("\\documentclass{article}\n\\begin{document}".to_string()),
            ..AppViewModel::default()
        };
        let lines = render(&view);
        assert!(lines.contains(
            &"Result: http://svc/out/1.pdf [view: textual; offered: rendered/textual]".to_string()
        ));
        assert!(lines.contains(&"\\begin{document}".to_string()));
    }
}
