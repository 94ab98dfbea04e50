use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Kind of symbol region a detector can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Class,
    Function,
}

/// A detected top-level class/function region within a file.
///
/// Line indices are 0-based and inclusive on both ends; `lines` holds the
/// original lines of the region, opening and closing lines included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRegion {
    /// Symbol identifier as it appears in source
    pub name: String,

    /// Class or function
    pub kind: SymbolKind,

    /// First line of the region (0-indexed)
    pub start_line: usize,

    /// Last line of the region (0-indexed, inclusive)
    pub end_line: usize,

    /// Original lines spanning `[start_line, end_line]`
    pub lines: Vec<String>,
}

/// Seam for symbol boundary detection.
///
/// The shipped implementation is a line-oriented heuristic; a language-aware
/// parser can be substituted here without touching the classifier or the
/// assembler. Implementations that fail mid-file should return the regions
/// completed before the fault alongside the error path — the assembler never
/// lets one file's fault abort the batch.
pub trait BoundaryDetector: Send + Sync {
    /// Scan ordered file lines and return detected regions in start-line order
    fn detect_symbols(&self, lines: &[&str]) -> Result<Vec<SymbolRegion>>;
}

// `class`/`interface` keyword followed by an identifier, anywhere on the line.
static CLASS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:class|interface)\s+([A-Za-z_][A-Za-z0-9_]*)").expect("valid class pattern")
});

// Optional leading `export`/`async` modifiers, an optional declaration
// keyword, an identifier, a parenthesized argument list and an optional
// trailing opening brace (or `:` for def-style headers). Anchored to the
// whole line so bare call statements (trailing `;`, chained expressions) do
// not open regions.
static FUNCTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:(?:export|async)\s+)*(?:(?:function|def|public|private|protected)\s+)?([A-Za-z_][A-Za-z0-9_]*)\s*\([^()]*\)\s*[{:]?\s*$",
    )
    .expect("valid function pattern")
});

// A line consisting solely of `}` closes the open region.
static REGION_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\}\s*$").expect("valid close pattern"));

/// Line-oriented heuristic boundary detector.
///
/// Single pass, at most one open region at a time, no nesting support. The
/// same lone-closing-brace rule ends class and function regions alike; a
/// region still open at EOF is closed at the last line. This trades boundary
/// precision for language independence.
#[derive(Debug, Default, Clone)]
pub struct HeuristicBoundaryDetector;

impl HeuristicBoundaryDetector {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn try_open_region(line: &str, index: usize) -> Option<OpenRegion> {
        // Class pattern takes priority over the function pattern.
        if let Some(caps) = CLASS_PATTERN.captures(line) {
            return Some(OpenRegion::start(
                caps[1].to_string(),
                SymbolKind::Class,
                index,
                line,
            ));
        }

        if let Some(caps) = FUNCTION_PATTERN.captures(line) {
            return Some(OpenRegion::start(
                caps[1].to_string(),
                SymbolKind::Function,
                index,
                line,
            ));
        }

        None
    }
}

impl BoundaryDetector for HeuristicBoundaryDetector {
    fn detect_symbols(&self, lines: &[&str]) -> Result<Vec<SymbolRegion>> {
        let mut symbols = Vec::new();
        let mut open: Option<OpenRegion> = None;

        for (index, line) in lines.iter().enumerate() {
            match open.take() {
                Some(mut region) => {
                    region.lines.push((*line).to_string());
                    if REGION_CLOSE.is_match(line) {
                        symbols.push(region.close(index));
                    } else {
                        open = Some(region);
                    }
                }
                None => {
                    open = Self::try_open_region(line, index);
                    // Lines matching neither pattern are not part of any chunk.
                }
            }
        }

        // A region still open at EOF ends on the last line (truncated files,
        // non-brace-terminated constructs).
        if let Some(region) = open {
            if !lines.is_empty() {
                symbols.push(region.close(lines.len() - 1));
            }
        }

        Ok(symbols)
    }
}

struct OpenRegion {
    name: String,
    kind: SymbolKind,
    start_line: usize,
    lines: Vec<String>,
}

impl OpenRegion {
    fn start(name: String, kind: SymbolKind, index: usize, line: &str) -> Self {
        Self {
            name,
            kind,
            start_line: index,
            lines: vec![line.to_string()],
        }
    }

    fn close(self, end_line: usize) -> SymbolRegion {
        SymbolRegion {
            name: self.name,
            kind: self.kind,
            start_line: self.start_line,
            end_line,
            lines: self.lines,
        }
    }
}
