//! Path tokenizer.
//!
//! A [`Splitter`] walks a path string and yields its [`Segment`]s in order.
//! Separators only split at bracket depth zero, so filter expressions such as
//! `[name='a.b']` survive intact. A `[` that is not preceded by the separator
//! starts a new segment of its own: `Books[1].Title` yields `Books`, `[1]`
//! and `Title`.

/// Separator used when none (or an empty one) is configured.
pub const DEFAULT_SEPARATOR: &str = ".";

/// One step of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The raw text between separators.
    pub text: &'a str,
    /// Zero-based position of the segment in the path.
    pub ordinal: usize,
    /// `true` when the segment was cut right before an opening bracket
    /// rather than at a separator.
    pub attached: bool,
}

impl<'a> Segment<'a> {
    /// Returns `true` if the segment is wrapped in `[` and `]`.
    pub fn is_bracketed(&self) -> bool {
        self.text.len() >= 2 && self.text.starts_with('[') && self.text.ends_with(']')
    }

    /// Returns the text inside the brackets, or the whole text when the
    /// segment is not bracketed.
    pub fn inner(&self) -> &'a str {
        if self.is_bracketed() {
            &self.text[1..self.text.len() - 1]
        } else {
            self.text
        }
    }

    /// Returns `true` if every `]` closes an earlier `[` and none is left open.
    pub fn is_balanced(&self) -> bool {
        let mut depth = 0usize;
        for byte in self.text.bytes() {
            match byte {
                b'[' => depth += 1,
                b']' => match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return false,
                },
                _ => {}
            }
        }
        depth == 0
    }
}

/// Lazily splits a path into segments.
///
/// The empty path yields a single empty segment; callers that treat the empty
/// path as "the root itself" must check for it before splitting.
///
/// ```
/// use dipper::Splitter;
///
/// let parts: Vec<&str> = Splitter::new("genres[id=0.0].name", ".")
///     .map(|segment| segment.text)
///     .collect();
/// assert_eq!(parts, ["genres", "[id=0.0]", "name"]);
/// ```
#[derive(Debug, Clone)]
pub struct Splitter<'a> {
    path: &'a str,
    separator: &'a str,
    offset: usize,
    ordinal: usize,
    in_bracket: bool,
    exhausted: bool,
}

impl<'a> Splitter<'a> {
    /// Creates a splitter over `path`. An empty separator falls back to
    /// [`DEFAULT_SEPARATOR`].
    pub fn new(path: &'a str, separator: &'a str) -> Self {
        let separator = if separator.is_empty() {
            DEFAULT_SEPARATOR
        } else {
            separator
        };
        Splitter {
            path,
            separator,
            offset: 0,
            ordinal: 0,
            in_bracket: false,
            exhausted: false,
        }
    }

    /// Returns `true` while segments remain.
    pub fn has_more(&self) -> bool {
        !self.exhausted
    }

    /// Returns how many segments remain, without consuming them.
    pub fn count_remaining(&self) -> usize {
        self.clone().count()
    }
}

impl<'a> Iterator for Splitter<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if self.exhausted {
            return None;
        }

        let remain = &self.path[self.offset..];
        let bytes = remain.as_bytes();
        let separator = self.separator.as_bytes();
        let mut depth: isize = 0;
        // (end of segment, length of the separator that follows it)
        let mut cut = None;

        for i in 0..bytes.len() {
            match bytes[i] {
                b'[' if depth == 0 && !self.in_bracket => {
                    self.in_bracket = true;
                    cut = Some((i, 0));
                    break;
                }
                b'[' => depth += 1,
                b']' => {
                    depth -= 1;
                    if depth <= 0 {
                        self.in_bracket = false;
                    }
                }
                _ => {}
            }

            if depth == 0 && bytes[i..].starts_with(separator) {
                cut = Some((i, separator.len()));
                break;
            }
        }

        let ordinal = self.ordinal;
        match cut {
            None => {
                self.exhausted = true;
                Some(Segment {
                    text: remain,
                    ordinal,
                    attached: false,
                })
            }
            Some((end, skip)) => {
                self.offset += end + skip;
                self.ordinal += 1;
                Some(Segment {
                    text: &remain[..end],
                    ordinal,
                    attached: skip == 0,
                })
            }
        }
    }
}
