//! Offset-based view over an encoding string. Productions hand cursors around instead of
//! re-slicing owned strings, so the trailing remainder of every step is just a start offset.

use super::node::TypeNode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            end: src.len(),
        }
    }

    #[inline]
    pub fn offset(self) -> usize {
        self.pos
    }

    #[inline]
    pub fn len(self) -> usize {
        self.end - self.pos
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.pos >= self.end
    }

    #[inline]
    fn bytes(self) -> &'a [u8] {
        &self.src.as_bytes()[self.pos..self.end]
    }

    #[inline]
    pub fn peek(self) -> Option<u8> {
        self.peek_at(0)
    }

    #[inline]
    pub fn peek_at(self, index: usize) -> Option<u8> {
        self.bytes().get(index).copied()
    }

    pub fn starts_with(self, prefix: &[u8]) -> bool {
        self.bytes().starts_with(prefix)
    }

    /// Moves forward by `count` bytes, clamped to the end of the view.
    pub fn advance(self, count: usize) -> Self {
        Self {
            pos: self.pos.saturating_add(count).min(self.end),
            ..self
        }
    }

    /// Repositions the start at absolute offset `offset`, keeping the end.
    pub fn jump_to(self, offset: usize) -> Self {
        Self {
            pos: offset.clamp(self.pos, self.end),
            ..self
        }
    }

    /// Narrows the view so it ends at absolute offset `offset`.
    pub fn until(self, offset: usize) -> Self {
        Self {
            end: offset.clamp(self.pos, self.end),
            ..self
        }
    }

    pub fn rest(self) -> &'a str {
        // Cursor boundaries only ever land next to ASCII delimiters, which are char boundaries.
        &self.src[self.pos..self.end]
    }

    /// Absolute offset of the first `byte` in the view.
    pub fn find_byte(self, byte: u8) -> Option<usize> {
        self.bytes()
            .iter()
            .position(|candidate| *candidate == byte)
            .map(|index| self.pos + index)
    }

    /// Reads a run of ASCII digits, optionally preceded by a single `-` when `signed` is set.
    /// Returns `None` when no digit follows.
    pub fn take_digits(self, signed: bool) -> Option<(&'a str, Self)> {
        let bytes = self.bytes();
        let sign = usize::from(signed && bytes.first() == Some(&b'-'));
        let digits = bytes[sign..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        if digits == 0 {
            return None;
        }
        let taken = sign + digits;
        Some((&self.src[self.pos..self.pos + taken], self.advance(taken)))
    }

    /// Absolute offset of the `close` that balances the `open` at the start of the view.
    /// Only the given pair is depth-counted; quoted names are skipped.
    pub fn find_closing(self, open: u8, close: u8) -> Option<usize> {
        let bytes = self.bytes();
        if bytes.first() != Some(&open) {
            return None;
        }
        let mut depth = 0usize;
        let mut index = 0usize;
        while index < bytes.len() {
            let byte = bytes[index];
            if byte == b'"' {
                let closing = bytes[index + 1..].iter().position(|b| *b == b'"')?;
                index += closing + 2;
                continue;
            }
            if byte == open {
                depth += 1;
            } else if byte == close {
                depth -= 1;
                if depth == 0 {
                    return Some(self.pos + index);
                }
            }
            index += 1;
        }
        None
    }

    /// Absolute offset of the first `needle` that sits outside any bracket pair or quoted run.
    pub fn find_top_level(self, needle: u8) -> Option<usize> {
        let bytes = self.bytes();
        let mut depth = 0usize;
        let mut in_quote = false;
        for (index, byte) in bytes.iter().copied().enumerate() {
            if byte == b'"' {
                in_quote = !in_quote;
                continue;
            }
            if in_quote {
                continue;
            }
            if depth == 0 && byte == needle {
                return Some(self.pos + index);
            }
            match byte {
                b'{' | b'(' | b'[' | b'<' => depth += 1,
                b'}' | b')' | b']' | b'>' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        None
    }
}

/// One successful production: the node plus the cursor positioned after it.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded<'a> {
    pub node: TypeNode,
    pub rest: Cursor<'a>,
}

impl<'a> Decoded<'a> {
    pub fn new(node: TypeNode, rest: Cursor<'a>) -> Self {
        Self { node, rest }
    }

    /// Unconsumed suffix, or `None` when the production reached the end of its view.
    pub fn trailing(&self) -> Option<&'a str> {
        if self.rest.is_empty() {
            None
        } else {
            Some(self.rest.rest())
        }
    }
}

#[cfg(test)]
mod tests {
    //! Cursor arithmetic used by every production.
    use super::*;

    #[test]
    fn closing_bracket_counts_nesting() {
        // the outer '{' must pair with the last '}', not the first
        let cursor = Cursor::new("{a={b=i}i}d");
        assert_eq!(cursor.find_closing(b'{', b'}'), Some(9), "outer brace closes at offset 9");
    }

    #[test]
    fn closing_bracket_skips_quoted_names() {
        // a '>' inside a quoted class name must not close the block signature
        let cursor = Cursor::new("<@\"NSObject<P>\"@?>");
        assert_eq!(cursor.find_closing(b'<', b'>'), Some(17), "quoted brackets are ignored");
    }

    #[test]
    fn unbalanced_input_reports_none() {
        assert_eq!(Cursor::new("[10i").find_closing(b'[', b']'), None, "missing ']' yields None");
    }

    #[test]
    fn top_level_search_ignores_nested_equals() {
        let cursor = Cursor::new("?={Inner=i}");
        assert_eq!(cursor.find_top_level(b'='), Some(1), "first '=' at depth zero wins");
        let nested = Cursor::new("{Inner=i}");
        assert_eq!(nested.find_top_level(b'='), None, "'=' inside braces is not top level");
    }

    #[test]
    fn digits_respect_sign_flag() {
        // the leading '-' is only accepted when signed parsing is requested
        let (digits, rest) = Cursor::new("-12x").take_digits(true).expect("signed digits");
        assert_eq!(digits, "-12", "sign belongs to the digit run");
        assert_eq!(rest.rest(), "x", "cursor should stop after the digits");
        assert!(Cursor::new("-12").take_digits(false).is_none(), "unsigned reads reject '-'");
        assert!(Cursor::new("x").take_digits(true).is_none(), "no digits yields None");
    }

    #[test]
    fn narrowed_views_keep_absolute_offsets() {
        // until/jump_to operate on absolute offsets into the shared source
        let cursor = Cursor::new("[10i]d").advance(1);
        let inner = cursor.until(4);
        assert_eq!(inner.rest(), "10i", "view should stop before ']'");
        assert_eq!(cursor.jump_to(5).rest(), "d", "jump_to repositions the start");
        assert_eq!(inner.offset(), 1, "offsets stay relative to the full input");
    }

    #[test]
    fn trailing_is_none_when_consumed() {
        let full = Decoded::new(TypeNode::INT, Cursor::new("i").advance(1));
        assert_eq!(full.trailing(), None, "fully consumed input has no trailing text");
        let partial = Decoded::new(TypeNode::INT, Cursor::new("id").advance(1));
        assert_eq!(partial.trailing(), Some("d"), "remaining bytes are reported");
    }
}
