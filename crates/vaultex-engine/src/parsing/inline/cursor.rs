/// A byte cursor over a note body.
///
/// Delimiters are all ASCII, so byte-wise scanning never splits a UTF-8
/// sequence at a position that is later used for slicing.
#[derive(Clone)]
pub struct Cursor<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    pub fn byte_at(&self, i: usize) -> Option<u8> {
        self.s.as_bytes().get(i).copied()
    }

    /// The byte just before the cursor, if any.
    pub fn prev(&self) -> Option<u8> {
        self.i.checked_sub(1).and_then(|p| self.byte_at(p))
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat)
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Advances until `stop` matches or input ends.
    pub fn bump_until(&mut self, stop: impl Fn(&Self) -> bool) {
        while !self.eof() && !stop(self) {
            self.i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_previous_byte() {
        let mut cur = Cursor::new("![[x]]");
        assert_eq!(cur.prev(), None);
        cur.bump();
        assert_eq!(cur.prev(), Some(b'!'));
        assert!(cur.starts_with(b"[["));
    }

    #[test]
    fn bump_until_stops_at_predicate() {
        let mut cur = Cursor::new("target|alias]]");
        cur.bump_until(|c| c.peek() == Some(b'|'));
        assert_eq!(cur.pos(), 6);
    }

    #[test]
    fn bump_until_runs_to_end() {
        let mut cur = Cursor::new("abc");
        cur.bump_until(|c| c.starts_with(b"]]"));
        assert!(cur.eof());
        assert_eq!(cur.bump(), None);
    }

    #[test]
    fn starts_with_past_end_is_safe() {
        let mut cur = Cursor::new("ab");
        cur.bump_n(5);
        assert!(cur.eof());
        assert!(!cur.starts_with(b"a"));
    }
}
