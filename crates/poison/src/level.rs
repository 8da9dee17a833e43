use anyhow::{Error, anyhow};
use core::fmt;

/// How aggressively exported content is poisoned against scrapers.
///
/// Each level includes every lower one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ProtectionLevel {
    #[default]
    Off = 0,
    /// Zero-size black filler paragraphs between adjacent paragraphs.
    Moderate = 1,
    /// Adds 1px white filler paragraphs.
    Strong = 2,
    /// Adds a hidden marker letter in place of every space.
    Maximum = 3,
}

impl ProtectionLevel {
    pub const ALL: [Self; 4] = [Self::Off, Self::Moderate, Self::Strong, Self::Maximum];

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether the passes of `other` run at this level.
    pub fn includes(self, other: Self) -> bool {
        self >= other
    }

    /// Short explanation shown next to the level picker.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Off => "No protection",
            Self::Moderate => "Invisible black 0px text between paragraphs, moderate protection",
            Self::Strong => "Invisible white 1px text between paragraphs, strong protection",
            Self::Maximum => "White span for each space, maximum protection",
        }
    }

    /// Side effects the author should know about, if any.
    pub const fn warning(self) -> Option<&'static str> {
        match self {
            Self::Off => None,
            Self::Moderate | Self::Strong => Some("Warning: Will increase word count."),
            Self::Maximum => Some(
                "Warning: Spaces and line breaks may become inconsistent, will increase word count.",
            ),
        }
    }
}

impl TryFrom<u8> for ProtectionLevel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_u8() == value)
            .ok_or_else(|| anyhow!("protection level must be between 0 and 3, got {value}"))
    }
}

impl fmt::Display for ProtectionLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.as_u8())
    }
}
