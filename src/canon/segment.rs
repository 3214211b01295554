//! Comment-preserving segmentation.
//!
//! SQL text is cut into an ordered run of code and comment spans whose
//! concatenation is exactly the input. Comment markers inside quoted literals
//! do not open comments.

/// What a [`Segment`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Code,
    /// `-- ...` up to and including the terminating newline.
    LineComment,
    /// `/* ... */`, unterminated ones run to the end of input.
    BlockComment,
}

/// A contiguous slice of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
}

impl<'a> Segment<'a> {
    const fn new(kind: SegmentKind, text: &'a str) -> Self {
        Self { kind, text }
    }

    pub fn is_comment(&self) -> bool {
        self.kind != SegmentKind::Code
    }
}

/// Split `sql` into code and comment segments.
///
/// Inside a quote a backslash skips the next byte and a doubled quote
/// character stays inside the literal. Empty segments are never produced.
pub fn segment(sql: &str) -> Vec<Segment<'_>> {
    let bytes = sql.as_bytes();
    let len = bytes.len();
    let mut segments = Vec::new();
    let mut code_start = 0;
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < len {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
            } else if b == q {
                if bytes.get(i + 1) == Some(&q) {
                    i += 2;
                } else {
                    quote = None;
                    i += 1;
                }
            } else {
                i += 1;
            }
            continue;
        }

        let comment_end = match (b, bytes.get(i + 1)) {
            (b'\'' | b'"', _) => {
                quote = Some(b);
                i += 1;
                continue;
            }
            (b'-', Some(b'-')) => bytes[i + 2..]
                .iter()
                .position(|&c| c == b'\n')
                .map_or(len, |p| i + 2 + p + 1),
            (b'/', Some(b'*')) => sql[i + 2..].find("*/").map_or(len, |p| i + 2 + p + 2),
            _ => {
                i += 1;
                continue;
            }
        };

        if code_start < i {
            segments.push(Segment::new(SegmentKind::Code, &sql[code_start..i]));
        }
        let kind = if b == b'-' {
            SegmentKind::LineComment
        } else {
            SegmentKind::BlockComment
        };
        segments.push(Segment::new(kind, &sql[i..comment_end]));
        i = comment_end;
        code_start = comment_end;
    }

    if code_start < len {
        segments.push(Segment::new(SegmentKind::Code, &sql[code_start..]));
    }
    segments
}
