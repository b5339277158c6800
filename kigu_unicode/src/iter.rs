use core::iter::FusedIterator;

use crate::codec::{CodeUnit, DecodedCodepoint};

/// Iterator decoding the codepoints of a code unit buffer from the front
///
/// Malformed units are yielded as invalid codepoints with an advance of one.
/// This iterator implements `Clone`.
#[derive(Clone)]
pub struct Codepoints<'a, U: CodeUnit> {
    rest: &'a [U],
    offset: usize,
}

impl<'a, U: CodeUnit> Codepoints<'a, U> {
    pub(crate) fn new(units: &'a [U]) -> Self {
        Self {
            rest: units,
            offset: 0,
        }
    }

    /// Offset in code units of the next codepoint from the start of the
    /// iterated buffer.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Units not yet decoded.
    #[must_use]
    pub fn rest(&self) -> &'a [U] {
        self.rest
    }
}

impl<U: CodeUnit> Iterator for Codepoints<'_, U> {
    type Item = DecodedCodepoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let decoded = U::decode(self.rest);
        self.rest = self.rest.get(decoded.advance..).unwrap_or_default();
        self.offset += decoded.advance;
        Some(decoded)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let units = self.rest.len();
        (units.div_ceil(U::MAX_ADVANCE), Some(units))
    }
}

impl<U: CodeUnit> FusedIterator for Codepoints<'_, U> {}
