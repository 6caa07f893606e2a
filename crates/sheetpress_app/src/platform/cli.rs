use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sheetpress_core::{Columns, FontSize, Orientation, ViewMode};

/// Submit PDF documents to a processing service and fetch the rendered sheet.
#[derive(Debug, Parser)]
#[command(name = "sheetpress", version)]
pub struct Cli {
    /// Documents to submit, in order. Non-PDF files are skipped with a warning.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Config file (RON). Defaults to ./sheetpress.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Processing service upload URL.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// small | normal | large
    #[arg(long, default_value = "normal")]
    pub font_size: FontSize,

    /// 1 | 2 | 3
    #[arg(long, default_value = "1")]
    pub columns: Columns,

    /// portrait | landscape
    #[arg(long, default_value = "portrait")]
    pub orientation: Orientation,

    /// View to show once the result arrives.
    #[arg(long, value_enum, default_value_t = ViewArg::Rendered)]
    pub view: ViewArg,

    /// Run the export action for the chosen view (download or copy).
    #[arg(long)]
    pub export: bool,

    /// Download destination: a directory or a file path.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Copy target for the textual view: a file path, or `-` for stdout.
    #[arg(long)]
    pub copy_to: Option<String>,

    /// Drop the staged files after a successful submission.
    #[arg(long)]
    pub clear_on_success: bool,

    /// Log debug detail to the terminal.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Rendered,
    Textual,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Rendered => ViewMode::Rendered,
            ViewArg::Textual => ViewMode::Textual,
        }
    }
}
