//! Configuration for writing and reading.

/// Default bound on object and list nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Controls the layout of written text.
///
/// Layout is cosmetic: the reader accepts any whitespace between tokens, so
/// text written under any configuration reads back the same.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriterConfig {
    /// Break objects and non-empty lists across lines and indent their contents.
    pub pretty: bool,

    /// Spaces per indentation level when `pretty` is set.
    pub indent_width: usize,

    /// Deepest object/list nesting that may be written.
    pub max_depth: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self::pretty()
    }
}

impl WriterConfig {
    /// Multi-line layout with four-space indentation.
    #[must_use]
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            indent_width: 4,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Single-line layout with no optional whitespace.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::pretty()
        }
    }

    /// Builder method to set the layout.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Builder method to set the indentation width.
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Builder method to set the nesting bound.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Controls how text is read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Deepest object/list nesting that may be read.
    pub max_depth: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ReaderConfig {
    /// Builder method to set the nesting bound.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
