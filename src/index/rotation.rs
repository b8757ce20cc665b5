//! Word rotation generator
//!
//! A [`WordRing`] is a circular view over a fixed word slice. Moving the
//! front word to the back only advances the start offset, so stepping is
//! O(1) and never reallocates; only materializing a rotation with
//! [`WordRing::join`] touches every word.

/// Circular view over a word slice with a rotating start offset
#[derive(Debug, Clone)]
pub struct WordRing<'a, S> {
    words: &'a [S],
    start: usize,
}

impl<'a, S: AsRef<str>> WordRing<'a, S> {
    pub fn new(words: &'a [S]) -> Self {
        Self { words, start: 0 }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of words moved from the front to the back so far (mod len)
    pub fn offset(&self) -> usize {
        self.start
    }

    /// Move the front word to the back
    #[inline]
    pub fn step(&mut self) {
        if self.words.is_empty() {
            return;
        }
        self.start += 1;
        if self.start == self.words.len() {
            self.start = 0;
        }
    }

    /// Words in the current rotated order
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        let (head, tail) = self.words.split_at(self.start);
        tail.iter().chain(head).map(AsRef::as_ref)
    }

    /// Join the current rotation with single spaces
    pub fn join(&self) -> String {
        let chars: usize = self.words.iter().map(|w| w.as_ref().len()).sum();
        let mut out = String::with_capacity(chars + self.words.len().saturating_sub(1));

        for (i, word) in self.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(word);
        }

        out
    }
}

/// Iterator over every rotation of a word sequence.
///
/// Rotation `i` moves the first `i` words to the end; rotation 0 is the
/// input order. An empty sequence yields nothing.
pub struct RotationIter<'a, S> {
    ring: WordRing<'a, S>,
    remaining: usize,
}

impl<'a, S: AsRef<str>> RotationIter<'a, S> {
    pub fn new(words: &'a [S]) -> Self {
        Self {
            ring: WordRing::new(words),
            remaining: words.len(),
        }
    }
}

impl<S: AsRef<str>> Iterator for RotationIter<'_, S> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let rotation = self.ring.join();
        self.ring.step();
        self.remaining -= 1;
        Some(rotation)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<S: AsRef<str>> ExactSizeIterator for RotationIter<'_, S> {}

/// Collect all rotations of `words` in generation order
pub fn rotations<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    RotationIter::new(words).collect()
}
