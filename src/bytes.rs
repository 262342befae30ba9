//! Exact byte-pattern search and replace over in-memory buffers and
//! forward-only byte streams.
//!
//! All entry points share one occurrence rule: matches are found greedily
//! left to right and never overlap. After a match at offset `i` the scan
//! resumes at `i + pattern.len()`, but a failed partial match only advances
//! by one byte, so a later occurrence starting inside the failed attempt is
//! still found.
//!
//! The scan itself is a naive per-position comparison. The patterns this
//! crate cares about are short fixed-width date strings, so the O(N * M)
//! worst case is irrelevant in practice and not worth a skip table.

use std::borrow::Cow;
use std::collections::VecDeque;

use thiserror::Error;

/// Error returned when a search pattern is empty.
///
/// A zero-length pattern would match at every offset and has no meaningful
/// replacement, so every entry point rejects it up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search pattern must not be empty")]
pub struct EmptyPattern;

/// Find the first occurrence of `pattern` in `buffer` at or after `from`.
///
/// Returns the absolute offset of the match. A `from` at or past the end of
/// the buffer yields `Ok(None)` rather than an error, so callers can probe
/// past the last match without bookkeeping.
pub fn find(buffer: &[u8], pattern: &[u8], from: usize) -> Result<Option<usize>, EmptyPattern> {
    if pattern.is_empty() {
        return Err(EmptyPattern);
    }
    Ok(search(buffer, pattern, from))
}

/// Iterate the non-overlapping occurrences of `pattern` in `buffer`, capped
/// at `limit` matches when a budget is given. `None` means unbounded.
pub fn occurrences<'b, 'p>(
    buffer: &'b [u8],
    pattern: &'p [u8],
    limit: Option<usize>,
) -> Result<Occurrences<'b, 'p>, EmptyPattern> {
    if pattern.is_empty() {
        return Err(EmptyPattern);
    }
    Ok(Occurrences {
        buffer,
        pattern,
        at: 0,
        remaining: limit,
    })
}

/// Replace up to `limit` non-overlapping occurrences of `pattern` in
/// `source` with `replacement`.
///
/// When the pattern does not occur, the source slice itself comes back as
/// `Cow::Borrowed` with no allocation, so callers can distinguish "nothing
/// to do" from a rebuilt buffer. Otherwise the result is assembled in a
/// single allocation of exactly the final size: the span before the first
/// match, then for each match the replacement followed by the span up to
/// the next match or the end of the buffer.
///
/// The replacement may be any length, including empty; keeping the output
/// the same size as the input is the caller's invariant to check, not this
/// function's.
pub fn replace<'s>(
    source: &'s [u8],
    pattern: &[u8],
    replacement: &[u8],
    limit: Option<usize>,
) -> Result<Cow<'s, [u8]>, EmptyPattern> {
    let hits: Vec<usize> = occurrences(source, pattern, limit)?.collect();
    if hits.is_empty() {
        return Ok(Cow::Borrowed(source));
    }

    // Matches never overlap, so the subtraction cannot underflow.
    let patched_len = source.len() - pattern.len() * hits.len() + replacement.len() * hits.len();
    let mut patched = Vec::with_capacity(patched_len);

    let mut copied_to = 0;
    for &hit in &hits {
        patched.extend_from_slice(&source[copied_to..hit]);
        patched.extend_from_slice(replacement);
        copied_to = hit + pattern.len();
    }
    patched.extend_from_slice(&source[copied_to..]);

    Ok(Cow::Owned(patched))
}

/// Find the first occurrence of `pattern` in a forward-only byte source at
/// or after offset `from`.
pub fn stream_find<I>(source: I, pattern: &[u8], from: usize) -> Result<Option<usize>, EmptyPattern>
where
    I: IntoIterator<Item = u8>,
{
    let mut hits = stream_occurrences(source.into_iter().skip(from), pattern, Some(1))?;
    Ok(hits.next().map(|hit| hit + from))
}

/// Iterate the non-overlapping occurrences of `pattern` in a forward-only
/// byte source, capped at `limit` matches when a budget is given.
///
/// Produces exactly the offsets [`occurrences`] would produce for the same
/// bytes, while holding only a pattern-sized window in memory. Once the
/// budget is exhausted the underlying source is not pulled any further.
pub fn stream_occurrences<'p, I>(
    source: I,
    pattern: &'p [u8],
    limit: Option<usize>,
) -> Result<StreamOccurrences<'p, I::IntoIter>, EmptyPattern>
where
    I: IntoIterator<Item = u8>,
{
    if pattern.is_empty() {
        return Err(EmptyPattern);
    }
    Ok(StreamOccurrences {
        source: source.into_iter(),
        pattern,
        window: VecDeque::with_capacity(pattern.len()),
        consumed: 0,
        remaining: limit,
    })
}

fn search(buffer: &[u8], pattern: &[u8], from: usize) -> Option<usize> {
    let tail = buffer.get(from..)?;
    tail.windows(pattern.len())
        .position(|window| window == pattern)
        .map(|at| at + from)
}

/// Lazy iterator over the non-overlapping occurrences of a pattern in a
/// buffer. Offsets are strictly increasing; the scan resumes right after the
/// end of each match.
#[derive(Debug, Clone)]
pub struct Occurrences<'b, 'p> {
    buffer: &'b [u8],
    pattern: &'p [u8],
    at: usize,
    remaining: Option<usize>,
}

impl Iterator for Occurrences<'_, '_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == Some(0) {
            return None;
        }
        let hit = search(self.buffer, self.pattern, self.at)?;
        self.at = hit + self.pattern.len();
        if let Some(left) = self.remaining.as_mut() {
            *left -= 1;
        }
        Some(hit)
    }
}

/// Lazy occurrence scan over a forward-only byte source.
///
/// Keeps a rolling window of the last `pattern.len()` bytes and clears it on
/// each match, which makes consecutive matches non-overlapping just like the
/// buffer scan.
#[derive(Debug)]
pub struct StreamOccurrences<'p, I> {
    source: I,
    pattern: &'p [u8],
    window: VecDeque<u8>,
    consumed: usize,
    remaining: Option<usize>,
}

impl<I: Iterator<Item = u8>> Iterator for StreamOccurrences<'_, I> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == Some(0) {
            return None;
        }
        for byte in self.source.by_ref() {
            if self.window.len() == self.pattern.len() {
                self.window.pop_front();
            }
            self.window.push_back(byte);
            self.consumed += 1;

            if self.window.len() == self.pattern.len() && self.window.iter().eq(self.pattern.iter())
            {
                self.window.clear();
                if let Some(left) = self.remaining.as_mut() {
                    *left -= 1;
                }
                return Some(self.consumed - self.pattern.len());
            }
        }
        None
    }
}
