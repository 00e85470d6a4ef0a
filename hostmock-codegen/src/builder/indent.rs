//! Indentation configuration for code generation.

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
}

impl Indent {
    /// rustfmt's default.
    pub const RUST: Self = Self::Spaces(4);

    /// Append `level` indentation units to `buf`.
    pub fn write(&self, buf: &mut String, level: usize) {
        match self {
            Self::Spaces(width) => {
                buf.extend(std::iter::repeat_n(' ', level * *width as usize));
            }
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::RUST
    }
}
