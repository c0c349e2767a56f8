use clap::ValueEnum;
use renbatch_core::{Preview, RuleKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RuleArg {
    /// Match a year (19xx/20xx) and prefix the name with [year]
    Year,
    /// Match the first N characters
    Prefix,
    /// Match the last N characters before the extension
    Suffix,
    /// Match N characters starting at position P
    Slice,
    /// Match everything after marker X
    After,
    /// Match everything before marker X
    Before,
    /// Match N characters after marker X
    AfterN,
    /// Match N characters before marker X
    BeforeN,
}

impl From<RuleArg> for RuleKind {
    fn from(arg: RuleArg) -> Self {
        match arg {
            RuleArg::Year => Self::YearPrefix,
            RuleArg::Prefix => Self::PrefixChars,
            RuleArg::Suffix => Self::SuffixCharsNoExt,
            RuleArg::Slice => Self::SliceAt,
            RuleArg::After => Self::AfterMarker,
            RuleArg::Before => Self::BeforeMarker,
            RuleArg::AfterN => Self::AfterMarkerChars,
            RuleArg::BeforeN => Self::BeforeMarkerChars,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PreviewArg {
    Table,
    Summary,
    Json,
}

impl From<PreviewArg> for Preview {
    fn from(arg: PreviewArg) -> Self {
        match arg {
            PreviewArg::Table => Self::Table,
            PreviewArg::Summary => Self::Summary,
            PreviewArg::Json => Self::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl From<OutputFormat> for renbatch_core::OutputFormat {
    fn from(arg: OutputFormat) -> Self {
        match arg {
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}
