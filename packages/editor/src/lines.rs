/// Byte offset of the first character of a line
///
/// # Arguments
/// * `source` - The document text
/// * `line` - Line number (0-indexed)
///
/// # Returns
/// The offset, or `None` if the text has fewer lines
pub fn position_from_line(source: &str, line: usize) -> Option<usize> {
    if line == 0 {
        return Some(0);
    }
    source
        .match_indices('\n')
        .nth(line - 1)
        .map(|(idx, _)| idx + 1)
}

/// Line containing a byte offset
///
/// # Arguments
/// * `source` - The document text
/// * `offset` - Byte offset, clamped to the text length
///
/// # Returns
/// Line number (0-indexed)
pub fn line_from_position(source: &str, offset: usize) -> usize {
    let offset = offset.min(source.len());
    source.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
}

/// Number of lines; an empty text still has one line
pub fn line_count(source: &str) -> usize {
    source.matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_line() {
        let source = "line 1\nline 2\nline 3";

        assert_eq!(position_from_line(source, 0), Some(0));
        assert_eq!(position_from_line(source, 1), Some(7));
        assert_eq!(position_from_line(source, 2), Some(14));
        assert_eq!(position_from_line(source, 3), None);
    }

    #[test]
    fn test_trailing_newline_opens_empty_last_line() {
        let source = "a\nb\n";
        assert_eq!(line_count(source), 3);
        assert_eq!(position_from_line(source, 2), Some(4));
    }

    #[test]
    fn test_line_from_position() {
        let source = "line 1\nline 2\nline 3";

        assert_eq!(line_from_position(source, 0), 0);
        assert_eq!(line_from_position(source, 6), 0);
        assert_eq!(line_from_position(source, 7), 1);
        assert_eq!(line_from_position(source, 100), 2);
    }

    #[test]
    fn test_unicode_handling() {
        let source = "日本語\ntext";
        assert_eq!(position_from_line(source, 1), Some(10));
        assert_eq!(line_from_position(source, 10), 1);
    }
}
