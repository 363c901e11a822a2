//! Delimiter-based string tokenizer.
//!
//! Splits a string on any of a set of delimiter characters, yielding
//! borrowed subslices instead of mutating the input. Consecutive delimiters
//! yield empty tokens, and the remainder after the last delimiter is always
//! yielded — so an empty input produces exactly one empty token.

/// An iterator over the tokens of a string, split on any character of a
/// delimiter set.
///
/// ```rust
/// use slotkit::Tokenizer;
///
/// let tokens: Vec<&str> = Tokenizer::new("a,b;;c", ",;").collect();
/// assert_eq!(tokens, ["a", "b", "", "c"]);
/// ```
pub struct Tokenizer<'a> {
    rest: Option<&'a str>,
    delimiters: &'a str,
}

impl<'a> Tokenizer<'a> {
    /// Tokenize `input`, splitting on any character in `delimiters`.
    pub fn new(input: &'a str, delimiters: &'a str) -> Self {
        Self {
            rest: Some(input),
            delimiters,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        match rest
            .char_indices()
            .find(|(_, c)| self.delimiters.contains(*c))
        {
            Some((pos, delim)) => {
                self.rest = Some(&rest[pos + delim.len_utf8()..]);
                Some(&rest[..pos])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}
