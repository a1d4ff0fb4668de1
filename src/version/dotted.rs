use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::VersionError;

/// Number of segments in the padded display form (e.g. "1.62.1.0")
pub const PADDED_SEGMENTS: usize = 4;

/// A dotted numeric version such as "1.62.1" or "1.62.1.0".
///
/// Ordering is segment-wise numeric, so "1.10.0" sorts after "1.9.0". Missing trailing
/// segments compare as zero, which makes "1.62.1" equal to "1.62.1.0".
///
/// The parsed text is kept as-is and is what [`Display`](fmt::Display) prints, so
/// "1.62.01" is written back as "1.62.01", not "1.62.1".
#[derive(Debug, Clone)]
pub struct DottedVersion {
    raw: String,
    segments: Vec<u64>,
}

impl DottedVersion {
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// Right-pads with zero segments until there are [`PADDED_SEGMENTS`] of them.
    /// Never removes segments.
    pub fn padded(&self) -> DottedVersion {
        let missing = PADDED_SEGMENTS.saturating_sub(self.segments.len());
        let mut raw = self.raw.clone();
        let mut segments = self.segments.clone();
        for _ in 0..missing {
            raw.push_str(".0");
            segments.push(0);
        }
        DottedVersion { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for DottedVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VersionError::Empty);
        }

        let segments = s
            .split('.')
            .map(|segment| {
                // u64::from_str accepts a leading '+', so check digits explicitly
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(VersionError::InvalidSegment {
                        version: s.to_string(),
                        segment: segment.to_string(),
                    });
                }
                segment
                    .parse::<u64>()
                    .map_err(|_| VersionError::InvalidSegment {
                        version: s.to_string(),
                        segment: segment.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if segments.len() > PADDED_SEGMENTS {
            return Err(VersionError::TooManySegments {
                version: s.to_string(),
                count: segments.len(),
                max: PADDED_SEGMENTS,
            });
        }

        Ok(Self {
            raw: s.to_string(),
            segments,
        })
    }
}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| {
                let a = self.segments.get(i).copied().unwrap_or(0);
                let b = other.segments.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DottedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DottedVersion {}
