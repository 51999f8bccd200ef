//! `Range` request header parsing.
//!
//! One deliberate looseness runs through this module: anything that is not a
//! well-formed single `bytes=` range — wrong unit, comma lists, garbage —
//! degrades to [`RangeVerdict::NoRange`] and the client gets the whole file
//! with a 200. Browsers handle that fine; a 400 would stall playback. Only a
//! range that parses but cannot be satisfied earns a 416.

/// The parser's verdict on one request's `Range` header.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RangeVerdict {
    /// No usable range — serve the whole file with 200.
    NoRange,
    /// Serve bytes `start..=end` with 206. Invariant: `start <= end < total`.
    Satisfiable { start: u64, end: u64 },
    /// Syntactically valid but out of bounds — answer 416.
    Unsatisfiable,
}

/// Parses a `Range` header value against the file's total byte length.
///
/// Grammar accepted: `bytes=<start>-<end>`, `bytes=<start>-`, `bytes=-<n>`
/// (suffix: the last `n` bytes). A too-large `end` clamps to `total - 1`;
/// that is not an error. `start == end` is a valid one-byte range.
pub fn parse(header: Option<&str>, total: u64) -> RangeVerdict {
    let Some(header) = header else {
        return RangeVerdict::NoRange;
    };
    let Some(spec) = header.trim().strip_prefix("bytes=") else {
        return RangeVerdict::NoRange;
    };
    // Multi-range requests would need a multipart/byteranges body; serving
    // the whole file instead is valid per RFC 7233 (a server may ignore the
    // header) and every player copes.
    if spec.contains(',') {
        return RangeVerdict::NoRange;
    }
    let Some((start, end)) = spec.split_once('-') else {
        return RangeVerdict::NoRange;
    };
    let (start, end) = (start.trim(), end.trim());

    let (start, end) = if start.is_empty() {
        // Suffix form: bytes=-n, the last n bytes.
        let Ok(suffix) = end.parse::<u64>() else {
            return RangeVerdict::NoRange;
        };
        if suffix == 0 || total == 0 {
            return RangeVerdict::Unsatisfiable;
        }
        (total.saturating_sub(suffix), total - 1)
    } else {
        let Ok(start) = start.parse::<u64>() else {
            return RangeVerdict::NoRange;
        };
        let end = if end.is_empty() {
            // Open-ended: bytes=n-, to end of file.
            total.saturating_sub(1)
        } else {
            let Ok(end) = end.parse::<u64>() else {
                return RangeVerdict::NoRange;
            };
            end.min(total.saturating_sub(1))
        };
        (start, end)
    };

    if total == 0 || start >= total || start > end {
        return RangeVerdict::Unsatisfiable;
    }
    RangeVerdict::Satisfiable { start, end }
}
