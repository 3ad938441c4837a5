//! Sub-route pattern compiler.
//!
//! App sub-routes are declared as small path patterns ("equipment",
//! ":field_id", "docs/*"). Instead of building a regex from the template
//! string, each pattern is compiled once into typed segments so matching and
//! parameter extraction stay testable on their own.

/// One compiled pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Matches the segment text exactly.
    Literal(String),
    /// Matches exactly one non-empty segment and captures it by name.
    Param(String),
    /// Matches the whole remainder of the path, including an empty one.
    Wildcard,
}

/// Parameters captured by a successful match, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, name: &str, value: &str) {
        self.0.push((name.to_string(), value.to_string()));
    }
}

/// A compiled sub-route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern string.
    ///
    /// `:name` segments become named parameters, a `*` segment becomes a
    /// wildcard; anything after a wildcard is unreachable and ignored.
    pub fn compile(pattern: &str) -> Self {
        let mut segments = Vec::new();
        for part in pattern.split('/').filter(|s| !s.is_empty()) {
            if part == "*" {
                segments.push(Segment::Wildcard);
                break;
            }
            if let Some(name) = part.strip_prefix(':') {
                segments.push(Segment::Param(name.to_string()));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }
        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Test the pattern against a sub-path, anchored over the whole path.
    ///
    /// Returns the captured parameters on success. A prefix match is not a
    /// match: "equipment" does not match "equipment/history".
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut params = PathParams::default();
        let mut index = 0;

        for segment in &self.segments {
            match segment {
                Segment::Wildcard => return Some(params),
                Segment::Literal(text) => {
                    if parts.get(index).copied() != Some(text.as_str()) {
                        return None;
                    }
                    index += 1;
                }
                Segment::Param(name) => {
                    let value = parts.get(index)?;
                    params.push(name, value);
                    index += 1;
                }
            }
        }

        // anchored: the pattern must consume the entire path
        if index == parts.len() { Some(params) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_match_is_exact() {
        let pattern = PathPattern::compile("equipment");
        assert!(pattern.matches("equipment").is_some());
        assert!(pattern.matches("alerts").is_none());
        // anchored, not a prefix match
        assert!(pattern.matches("equipment/history").is_none());
    }

    #[test]
    fn param_captures_a_single_segment() {
        let pattern = PathPattern::compile(":field_id");
        let params = pattern.matches("field-42").unwrap();
        assert_eq!(params.get("field_id"), Some("field-42"));
        // one segment only
        assert!(pattern.matches("field-42/extra").is_none());
        assert!(pattern.matches("").is_none());
    }

    #[test]
    fn mixed_literals_and_params() {
        let pattern = PathPattern::compile("fields/:field_id/edit");
        let params = pattern.matches("fields/f9/edit").unwrap();
        assert_eq!(params.get("field_id"), Some("f9"));
        assert!(pattern.matches("fields/f9").is_none());
        assert!(pattern.matches("fields/f9/view").is_none());
    }

    #[test]
    fn wildcard_consumes_the_remainder() {
        let pattern = PathPattern::compile("docs/*");
        assert!(pattern.matches("docs").is_some());
        assert!(pattern.matches("docs/a").is_some());
        assert!(pattern.matches("docs/a/b/c").is_some());
        assert!(pattern.matches("other/a").is_none());
    }

    #[test]
    fn empty_pattern_matches_only_empty_path() {
        let pattern = PathPattern::compile("");
        assert!(pattern.matches("").is_some());
        assert!(pattern.matches("x").is_none());
    }

    #[test]
    fn captures_come_back_in_pattern_order() {
        let pattern = PathPattern::compile(":section/:item");
        let params = pattern.matches("alerts/17").unwrap();
        assert_eq!(params.get("section"), Some("alerts"));
        assert_eq!(params.get("item"), Some("17"));
        assert!(params.get("missing").is_none());
        assert!(!params.is_empty());
    }
}
