//! Word cursor for the heading scan

/// Read position over a word sequence
///
/// Matchers only look ahead through [`WordCursor::peek`]; the scan loop is the
/// only caller of [`WordCursor::advance`].
#[derive(Debug, Clone)]
pub struct WordCursor<'a, S: AsRef<str>> {
    words: &'a [S],
    pos: usize,
}

impl<'a, S: AsRef<str>> WordCursor<'a, S> {
    /// Cursor at the first word
    pub fn new(words: &'a [S]) -> Self {
        Self { words, pos: 0 }
    }

    /// Word `k` positions ahead of the cursor (0 = current)
    pub fn peek(&self, k: usize) -> Option<&'a str> {
        self.words.get(self.pos + k).map(|w| w.as_ref())
    }

    /// Move forward `n` words, stopping at the end
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.words.len());
    }

    /// Whether every word has been consumed
    pub fn at_end(&self) -> bool {
        self.pos >= self.words.len()
    }

    /// Current position
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Words left including the current one
    pub fn remaining(&self) -> usize {
        self.words.len() - self.pos
    }
}
