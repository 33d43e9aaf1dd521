//! Literal marker replacement.
//!
//! Rules apply in order, but only to text that came from the input: a
//! replacement is never rescanned by a later rule, so the pass terminates no
//! matter what the replacement text contains. Removing a marker does not
//! join its neighbours into a new match for a later rule.
use serde::Serialize;

/// One `(marker, replacement)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub marker: String,
    pub replacement: String,
}

impl Substitution {
    pub fn new(marker: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            replacement: replacement.into(),
        }
    }
}

enum Segment<'a> {
    Original(&'a str),
    Inserted(&'a str),
}

/// Replace every occurrence of each rule's marker, in rule order.
pub fn substitute(text: &str, rules: &[Substitution]) -> String {
    let mut segments = vec![Segment::Original(text)];
    for rule in rules {
        if rule.marker.is_empty() {
            continue;
        }
        let mut next = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                Segment::Original(chunk) => {
                    let mut pieces = chunk.split(rule.marker.as_str());
                    if let Some(first) = pieces.next() {
                        next.push(Segment::Original(first));
                    }
                    for piece in pieces {
                        next.push(Segment::Inserted(rule.replacement.as_str()));
                        next.push(Segment::Original(piece));
                    }
                }
                inserted => next.push(inserted),
            }
        }
        segments = next;
    }

    let mut out = String::with_capacity(text.len());
    for segment in segments {
        match segment {
            Segment::Original(chunk) | Segment::Inserted(chunk) => out.push_str(chunk),
        }
    }
    out
}

#[cfg(test)]
#[path = "substitute_tests.rs"]
mod tests;
