//! LaTeX document generation.

/// Standalone document body. `\formula` is defined ahead of it.
const DOCUMENT_TEMPLATE: &str = r"\documentclass[crop=true,border=0pt]{standalone}
\usepackage{amsmath}
\usepackage{varwidth}
\begin{document}
\begin{varwidth}{\linewidth}
\[ \formula \]
\end{varwidth}
\end{document}";

/// Wraps the raw equation in the standalone document.
///
/// The equation is inserted verbatim. Malformed LaTeX surfaces later as a
/// compilation failure.
pub fn document_source(equation: &str) -> String {
    format!("\\def\\formula{{{equation}}}\n{DOCUMENT_TEMPLATE}")
}
