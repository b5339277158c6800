use kigu_array::ArrayError;
use thiserror::Error;

/// Error types for encoding and string building operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum UnicodeError {
    /// Codepoint is outside the Unicode range and has no encoding
    #[error("Invalid codepoint: {codepoint:#X} is above U+10FFFF")]
    InvalidCodepoint {
        /// The rejected value
        codepoint: u32,
    },
    /// Output buffer cannot hold the encoded codepoint
    #[error("Buffer too small: {required} code units required, but only {provided} provided")]
    BufferTooSmall {
        /// Code units the encoding needs
        required: usize,
        /// Code units available in the output buffer
        provided: usize,
    },
    /// The backing array could not be allocated or grown
    #[error(transparent)]
    Array(#[from] ArrayError),
}

#[cold]
#[track_caller]
pub(crate) fn fail(error: UnicodeError) -> ! {
    panic!("{error}")
}
