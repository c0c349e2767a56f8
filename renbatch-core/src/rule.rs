use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while turning raw shell input into a [`RuleSelector`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("unknown rule '{0}'")]
    UnknownRule(String),
    #[error("rule '{rule}' requires a {param}")]
    MissingParameter { rule: RuleKind, param: &'static str },
    #[error("invalid {param} '{value}': expected an integer")]
    InvalidInteger { param: &'static str, value: String },
}

/// The eight extraction strategies, without their parameters.
///
/// The shell uses this to decide which parameters to ask for before building
/// a full [`RuleSelector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    YearPrefix,
    PrefixChars,
    SuffixCharsNoExt,
    SliceAt,
    AfterMarker,
    BeforeMarker,
    AfterMarkerChars,
    BeforeMarkerChars,
}

impl RuleKind {
    pub const ALL: [Self; 8] = [
        Self::YearPrefix,
        Self::PrefixChars,
        Self::SuffixCharsNoExt,
        Self::SliceAt,
        Self::AfterMarker,
        Self::BeforeMarker,
        Self::AfterMarkerChars,
        Self::BeforeMarkerChars,
    ];

    /// Map a 1-based menu number to a rule
    pub fn from_menu_choice(choice: u8) -> Option<Self> {
        match choice {
            1..=8 => Some(Self::ALL[usize::from(choice - 1)]),
            _ => None,
        }
    }

    pub fn menu_choice(self) -> u8 {
        match self {
            Self::YearPrefix => 1,
            Self::PrefixChars => 2,
            Self::SuffixCharsNoExt => 3,
            Self::SliceAt => 4,
            Self::AfterMarker => 5,
            Self::BeforeMarker => 6,
            Self::AfterMarkerChars => 7,
            Self::BeforeMarkerChars => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::YearPrefix => "year",
            Self::PrefixChars => "prefix",
            Self::SuffixCharsNoExt => "suffix",
            Self::SliceAt => "slice",
            Self::AfterMarker => "after",
            Self::BeforeMarker => "before",
            Self::AfterMarkerChars => "after-n",
            Self::BeforeMarkerChars => "before-n",
        }
    }

    /// One-line description used in menus and help text
    pub fn description(self) -> &'static str {
        match self {
            Self::YearPrefix => "Match a year (19xx/20xx) and prefix the name with [year]",
            Self::PrefixChars => "Match the first N characters",
            Self::SuffixCharsNoExt => "Match the last N characters before the extension",
            Self::SliceAt => "Match N characters starting at position P",
            Self::AfterMarker => "Match everything after marker X",
            Self::BeforeMarker => "Match everything before marker X",
            Self::AfterMarkerChars => "Match N characters after marker X",
            Self::BeforeMarkerChars => "Match N characters before marker X",
        }
    }

    pub fn needs_marker(self) -> bool {
        matches!(
            self,
            Self::AfterMarker | Self::BeforeMarker | Self::AfterMarkerChars | Self::BeforeMarkerChars
        )
    }

    pub fn needs_count(self) -> bool {
        matches!(
            self,
            Self::PrefixChars
                | Self::SuffixCharsNoExt
                | Self::SliceAt
                | Self::AfterMarkerChars
                | Self::BeforeMarkerChars
        )
    }

    pub fn needs_pos(self) -> bool {
        matches!(self, Self::SliceAt)
    }

    /// Year-prefix inserts a bracketed year; every other rule substitutes a replacement
    pub fn takes_replacement(self) -> bool {
        !matches!(self, Self::YearPrefix)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleKind {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if let Ok(choice) = normalized.parse::<u8>() {
            return Self::from_menu_choice(choice).ok_or(RuleError::UnknownRule(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| RuleError::UnknownRule(s.to_string()))
    }
}

/// Raw parameters collected by the shell, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleParams {
    pub marker: Option<String>,
    pub count: Option<i64>,
    pub pos: Option<i64>,
}

/// A rule together with the parameters it needs.
///
/// Counts and positions are signed so any integer the user typed can be
/// carried through; the extractor clamps them instead of rejecting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum RuleSelector {
    YearPrefix,
    PrefixChars { count: i64 },
    SuffixCharsNoExt { count: i64 },
    SliceAt { pos: i64, count: i64 },
    AfterMarker { marker: String },
    BeforeMarker { marker: String },
    AfterMarkerChars { marker: String, count: i64 },
    BeforeMarkerChars { marker: String, count: i64 },
}

impl RuleSelector {
    /// Build a selector from a rule kind and the parameters the shell collected
    pub fn build(kind: RuleKind, params: RuleParams) -> Result<Self, RuleError> {
        let count = || {
            params.count.ok_or(RuleError::MissingParameter {
                rule: kind,
                param: "count",
            })
        };
        let marker = || {
            params.marker.clone().ok_or(RuleError::MissingParameter {
                rule: kind,
                param: "marker",
            })
        };

        Ok(match kind {
            RuleKind::YearPrefix => Self::YearPrefix,
            RuleKind::PrefixChars => Self::PrefixChars { count: count()? },
            RuleKind::SuffixCharsNoExt => Self::SuffixCharsNoExt { count: count()? },
            RuleKind::SliceAt => Self::SliceAt {
                pos: params.pos.ok_or(RuleError::MissingParameter {
                    rule: kind,
                    param: "position",
                })?,
                count: count()?,
            },
            RuleKind::AfterMarker => Self::AfterMarker { marker: marker()? },
            RuleKind::BeforeMarker => Self::BeforeMarker { marker: marker()? },
            RuleKind::AfterMarkerChars => Self::AfterMarkerChars {
                marker: marker()?,
                count: count()?,
            },
            RuleKind::BeforeMarkerChars => Self::BeforeMarkerChars {
                marker: marker()?,
                count: count()?,
            },
        })
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Self::YearPrefix => RuleKind::YearPrefix,
            Self::PrefixChars { .. } => RuleKind::PrefixChars,
            Self::SuffixCharsNoExt { .. } => RuleKind::SuffixCharsNoExt,
            Self::SliceAt { .. } => RuleKind::SliceAt,
            Self::AfterMarker { .. } => RuleKind::AfterMarker,
            Self::BeforeMarker { .. } => RuleKind::BeforeMarker,
            Self::AfterMarkerChars { .. } => RuleKind::AfterMarkerChars,
            Self::BeforeMarkerChars { .. } => RuleKind::BeforeMarkerChars,
        }
    }
}

impl fmt::Display for RuleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YearPrefix => write!(f, "year"),
            Self::PrefixChars { count } => write!(f, "prefix(n={})", count),
            Self::SuffixCharsNoExt { count } => write!(f, "suffix(n={})", count),
            Self::SliceAt { pos, count } => write!(f, "slice(pos={}, n={})", pos, count),
            Self::AfterMarker { marker } => write!(f, "after({:?})", marker),
            Self::BeforeMarker { marker } => write!(f, "before({:?})", marker),
            Self::AfterMarkerChars { marker, count } => {
                write!(f, "after-n({:?}, n={})", marker, count)
            },
            Self::BeforeMarkerChars { marker, count } => {
                write!(f, "before-n({:?}, n={})", marker, count)
            },
        }
    }
}

/// Parse an integer parameter typed by the user
pub fn parse_integer(param: &'static str, raw: &str) -> Result<i64, RuleError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| RuleError::InvalidInteger {
            param,
            value: raw.trim().to_string(),
        })
}
