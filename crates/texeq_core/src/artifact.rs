//! Artifact paths for one cache key.

use std::path::{Path, PathBuf};

use crate::{CacheKey, Format};

/// Extension of the generated LaTeX document.
pub const DOCUMENT_EXT: &str = "tex";

/// Byproducts of the typesetting stage, removed after it succeeds.
pub const BYPRODUCT_EXTS: [&str; 2] = ["aux", "log"];

/// The document, intermediate and final paths of one equation in one format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFamily {
    stem: PathBuf,
    format: Format,
    document: PathBuf,
    intermediate: PathBuf,
    output: PathBuf,
}

impl ArtifactFamily {
    /// Lays out the artifacts for `key` under `root`.
    pub fn new(root: &Path, key: &CacheKey, format: Format) -> Self {
        let stem = root.join(key.as_str());
        let document = with_ext(&stem, DOCUMENT_EXT);
        let intermediate = with_ext(&stem, Format::INTERMEDIATE.extension());
        let output = with_ext(&stem, format.extension());

        Self {
            stem,
            format,
            document,
            intermediate,
            output,
        }
    }

    /// Requested output format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// `<key>.tex`
    pub fn document(&self) -> &Path {
        &self.document
    }

    /// `<key>.pdf`
    pub fn intermediate(&self) -> &Path {
        &self.intermediate
    }

    /// `<key>.<format>`
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Returns true when no conversion stage is needed.
    pub fn output_is_intermediate(&self) -> bool {
        self.output == self.intermediate
    }

    /// Final files of every format converted from the intermediate, whichever
    /// format this family was laid out for.
    pub fn derived_outputs(&self) -> impl Iterator<Item = PathBuf> + '_ {
        Format::ALL
            .iter()
            .filter(|format| **format != Format::INTERMEDIATE)
            .map(move |format| with_ext(&self.stem, format.extension()))
    }

    /// Paths of the typesetting byproducts (`.aux`, `.log`).
    pub fn byproducts(&self) -> impl Iterator<Item = PathBuf> + '_ {
        BYPRODUCT_EXTS
            .iter()
            .map(move |ext| with_ext(&self.stem, ext))
    }
}

fn with_ext(stem: &Path, ext: &str) -> PathBuf {
    let mut path = stem.as_os_str().to_owned();
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_png_layout() {
        let key = CacheKey::new("x^2");
        let family = ArtifactFamily::new(Path::new("cache"), &key, Format::Png);

        assert_eq!(family.document(), Path::new("cache/785e32.tex"));
        assert_eq!(family.intermediate(), Path::new("cache/785e32.pdf"));
        assert_eq!(family.output(), Path::new("cache/785e32.png"));
        assert!(!family.output_is_intermediate());
    }

    #[test]
    fn test_pdf_output_is_intermediate() {
        let key = CacheKey::new("x^2");
        let family = ArtifactFamily::new(Path::new("cache"), &key, Format::Pdf);

        assert_eq!(family.output(), family.intermediate());
        assert!(family.output_is_intermediate());
    }

    #[test]
    fn test_derived_outputs_cover_every_converted_format() {
        let key = CacheKey::new("x^2");
        let family = ArtifactFamily::new(Path::new("cache"), &key, Format::Pdf);

        let outputs: Vec<PathBuf> = family.derived_outputs().collect();

        assert_eq!(
            outputs,
            vec![
                PathBuf::from("cache/785e32.svg"),
                PathBuf::from("cache/785e32.png")
            ]
        );
    }

    #[test]
    fn test_byproducts() {
        let key = CacheKey::new("x^2");
        let family = ArtifactFamily::new(Path::new("cache"), &key, Format::Svg);

        let byproducts: Vec<PathBuf> = family.byproducts().collect();

        assert_eq!(
            byproducts,
            vec![
                PathBuf::from("cache/785e32.aux"),
                PathBuf::from("cache/785e32.log")
            ]
        );
    }
}
