//! Input buffer shared by every parser in a run.
//!
//! Parsers never copy or re-slice the text they work on. They receive the
//! buffer by reference together with a [`Position`], and report how far they
//! got as another position.

/// Character offset into an [`Input`].
pub type Position = usize;

/// Immutable, randomly indexable view of the text being parsed.
#[derive(Debug, Clone)]
pub struct Input<'a> {
    text: &'a str,
    chars: Vec<char>,
    /// Byte offset of each character, with `text.len()` as a trailing sentinel.
    offsets: Vec<usize>,
}

impl<'a> Input<'a> {
    pub fn new(text: &'a str) -> Self {
        let (mut offsets, chars): (Vec<usize>, Vec<char>) = text.char_indices().unzip();
        offsets.push(text.len());

        Input {
            text,
            chars,
            offsets,
        }
    }

    /// Number of characters in the buffer
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn at_end(&self, pos: Position) -> bool {
        pos >= self.len()
    }

    /// Character at `pos`, or `None` at or past the end.
    pub fn get(&self, pos: Position) -> Option<char> {
        self.chars.get(pos).copied()
    }

    /// Everything from `pos` to the end, as a slice of the original text.
    pub fn rest(&self, pos: Position) -> &'a str {
        &self.text[self.byte_offset(pos)..]
    }

    /// Text between two positions. Bounds are clamped to the buffer.
    pub fn slice(&self, from: Position, to: Position) -> &'a str {
        let start = self.byte_offset(from);
        let end = self.byte_offset(to).max(start);
        &self.text[start..end]
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    fn byte_offset(&self, pos: Position) -> usize {
        self.offsets
            .get(pos)
            .copied()
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_indexing() {
        let input = Input::new("aap");
        assert_eq!(input.len(), 3);
        assert_eq!(input.get(0), Some('a'));
        assert_eq!(input.get(2), Some('p'));
        assert_eq!(input.get(3), None);
        assert!(input.at_end(3));
        assert!(!input.at_end(2));
    }

    #[test]
    fn test_input_rest_is_a_view() {
        let input = Input::new("aap noot mies");
        assert_eq!(input.rest(0), "aap noot mies");
        assert_eq!(input.rest(3), " noot mies");
        assert_eq!(input.rest(13), "");
        assert_eq!(input.rest(99), "");
    }

    #[test]
    fn test_input_multibyte_characters() {
        let input = Input::new("×é<a>");
        assert_eq!(input.len(), 5);
        assert_eq!(input.get(1), Some('é'));
        assert_eq!(input.rest(2), "<a>");
        assert_eq!(input.slice(0, 2), "×é");
    }

    #[test]
    fn test_input_slice_clamps() {
        let input = Input::new("noot");
        assert_eq!(input.slice(1, 3), "oo");
        assert_eq!(input.slice(3, 1), "");
        assert_eq!(input.slice(2, 10), "ot");
    }

    #[test]
    fn test_empty_input() {
        let input = Input::new("");
        assert!(input.is_empty());
        assert!(input.at_end(0));
        assert_eq!(input.rest(0), "");
    }
}
