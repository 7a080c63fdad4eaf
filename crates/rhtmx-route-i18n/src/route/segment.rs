//! Path segment classification
//!
//! A path template is split on `/` and every piece is one of three kinds.
//! Only literal segments are ever handed to a translation catalog.

/// Kind of a single path template segment
///
/// # Examples
///
/// ```
/// use rhtmx_route_i18n::route::segment::{classify_segment, SegmentKind};
///
/// let prefixes = vec![":".to_string(), "*".to_string()];
///
/// assert_eq!(classify_segment("", &prefixes), SegmentKind::Empty);
/// assert_eq!(classify_segment(":id", &prefixes), SegmentKind::Dynamic(":id"));
/// assert_eq!(classify_segment("*path", &prefixes), SegmentKind::Dynamic("*path"));
/// assert_eq!(classify_segment("pages", &prefixes), SegmentKind::Literal("pages"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind<'a> {
    /// Produced by leading, trailing or doubled separators
    Empty,
    /// Runtime parameter such as `:id` or `*path`
    Dynamic(&'a str),
    /// Plain text that may be translated
    Literal(&'a str),
}

/// Classifies a segment against the configured dynamic prefixes (pure function)
pub fn classify_segment<'a>(segment: &'a str, dynamic_prefixes: &[String]) -> SegmentKind<'a> {
    if segment.is_empty() {
        return SegmentKind::Empty;
    }

    if dynamic_prefixes
        .iter()
        .any(|prefix| !prefix.is_empty() && segment.starts_with(prefix.as_str()))
    {
        return SegmentKind::Dynamic(segment);
    }

    SegmentKind::Literal(segment)
}

/// Literal segments of a path template, in order of appearance
pub fn literal_segments<'a>(
    path: &'a str,
    dynamic_prefixes: &'a [String],
) -> impl Iterator<Item = &'a str> + 'a {
    path.split('/')
        .filter_map(move |segment| match classify_segment(segment, dynamic_prefixes) {
            SegmentKind::Literal(text) => Some(text),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes() -> Vec<String> {
        vec![":".to_string(), "*".to_string()]
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(classify_segment("", &prefixes()), SegmentKind::Empty);
    }

    #[test]
    fn test_classify_dynamic() {
        assert_eq!(classify_segment(":id", &prefixes()), SegmentKind::Dynamic(":id"));
        assert_eq!(classify_segment(":", &prefixes()), SegmentKind::Dynamic(":"));
    }

    #[test]
    fn test_classify_literal_with_inner_marker() {
        // Only a leading marker makes a segment dynamic
        assert_eq!(
            classify_segment("page:id", &prefixes()),
            SegmentKind::Literal("page:id")
        );
    }

    #[test]
    fn test_empty_prefix_is_ignored() {
        let prefixes = vec![String::new()];
        assert_eq!(classify_segment("users", &prefixes), SegmentKind::Literal("users"));
    }

    #[test]
    fn test_literal_segments() {
        let prefixes = prefixes();
        let literals: Vec<&str> = literal_segments("/users/:id/faces/*rest/", &prefixes).collect();
        assert_eq!(literals, vec!["users", "faces"]);
    }
}
