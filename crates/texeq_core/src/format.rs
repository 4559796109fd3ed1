//! Output formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PipelineError;

/// Final artifact format.
///
/// `Pdf` is also the intermediate format produced by the typesetting tool,
/// so requesting it skips the conversion stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Pdf,
    Svg,
    Png,
}

impl Format {
    /// All supported formats.
    pub const ALL: [Format; 3] = [Format::Pdf, Format::Svg, Format::Png];

    /// The format produced by the typesetting stage.
    pub const INTERMEDIATE: Format = Format::Pdf;

    /// File extension (also the format tag).
    pub fn extension(self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Svg => "svg",
            Format::Png => "png",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.extension() == s)
            .ok_or_else(|| PipelineError::unsupported_format(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pdf", Format::Pdf)]
    #[case("svg", Format::Svg)]
    #[case("png", Format::Png)]
    fn test_parse_supported(#[case] tag: &str, #[case] expected: Format) {
        assert_eq!(tag.parse::<Format>().unwrap(), expected);
        assert_eq!(expected.to_string(), tag);
    }

    #[rstest]
    #[case::unknown("bmp")]
    #[case::upper_case("PNG")]
    #[case::empty("")]
    #[case::dotted(".svg")]
    fn test_parse_unsupported(#[case] tag: &str) {
        let err = tag.parse::<Format>().unwrap_err();
        assert!(
            matches!(err, PipelineError::UnsupportedFormat { ref requested } if requested == tag)
        );
    }

    #[test]
    fn test_serde_uses_tags() {
        let json = serde_json::to_string(&Format::Svg).unwrap();
        assert_eq!(json, r#""svg""#);
        let parsed: Format = serde_json::from_str(r#""png""#).unwrap();
        assert_eq!(parsed, Format::Png);
    }
}
