//! Column name → struct field name conversion
//!
//! Database columns are snake_case (`user_id`), struct fields are camel-case.
//! A field may be written either plainly (`UserId`) or with common initialisms
//! upper-cased (`UserID`), so every column produces two candidates.

mod initialisms;

pub use initialisms::{lookup_initialism, INITIALISMS};

/// The two camel-case renderings of a snake_case identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateNames {
    /// Title-cased segments, underscores dropped: "user_id" → "UserId"
    pub plain: String,
    /// Same as `plain` with table initialisms upper-cased: "user_id" → "UserID"
    pub initialism: String,
}

impl CandidateNames {
    /// Candidates in resolution order: plain first, then initialism
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [self.plain.as_str(), self.initialism.as_str()].into_iter()
    }

    /// True when no segment matched the initialism table
    pub fn is_same(&self) -> bool {
        self.plain == self.initialism
    }
}

/// Convert a snake_case identifier into its two candidate field names
///
/// "user_id" → ("UserId", "UserID")
/// "http_url" → ("HttpUrl", "HTTPURL")
///
/// Casing is forced by position, never preserved: the first byte of every
/// segment is upper-cased, the rest lower-cased. Empty segments (leading,
/// trailing or doubled underscores) contribute nothing.
pub fn to_candidate_names(identifier: &str) -> CandidateNames {
    let bytes = identifier.as_bytes();
    // Output is never longer than the input since underscores are dropped
    let mut plain: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut special: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut segment_start = 0;
    let mut at_segment_start = true;

    for &byte in bytes {
        if byte == b'_' {
            apply_initialism(&plain, &mut special, segment_start);
            at_segment_start = true;
            segment_start = plain.len();
            continue;
        }

        let cased = if at_segment_start {
            byte.to_ascii_uppercase()
        } else {
            byte.to_ascii_lowercase()
        };
        plain.push(cased);
        special.push(cased);
        at_segment_start = false;
    }
    apply_initialism(&plain, &mut special, segment_start);

    CandidateNames {
        plain: into_string(plain),
        initialism: into_string(special),
    }
}

/// Overwrite the segment `plain[start..]` in `special` if it is a known initialism
fn apply_initialism(plain: &[u8], special: &mut [u8], start: usize) {
    let Ok(segment) = std::str::from_utf8(&plain[start..]) else {
        return;
    };
    if let Some(upper) = lookup_initialism(segment) {
        special[start..start + upper.len()].copy_from_slice(upper.as_bytes());
    }
}

// Only ASCII bytes are ever rewritten, so the buffers stay valid UTF-8
fn into_string(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
