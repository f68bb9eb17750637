use anyhow::{anyhow, Result};
use regex::Regex;

const MIN_FRAGMENT_CHARS: usize = 3;

/// Splits a free-form text block into candidate task strings.
pub struct TaskExtractor {
    marker: Regex,
    separator: Regex,
}

impl TaskExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // "1.", "2)", "- ", "• ", "→ ", "## ", "#1 " ...
            // a number counts only when a separator follows it ("3D print" stays)
            marker: Regex::new(r"^(?:\d+[\s.):\]-]+|[-–—*•·→➔>#]+\d*[\s.):\]-]*)")?,
            separator: Regex::new(r"(?i)[,;]|\s+and\s+")?,
        })
    }

    pub fn extract(&self, text: &str) -> Vec<String> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        match lines.len() {
            0 => Vec::new(),
            1 => self
                .separator
                .split(lines[0])
                .map(str::trim)
                .filter(|f| long_enough(f))
                .map(str::to_string)
                .collect(),
            _ => lines
                .into_iter()
                .map(|l| self.marker.replace(l, "").trim().to_string())
                .filter(|l| long_enough(l))
                .collect(),
        }
    }
}

fn long_enough(fragment: &str) -> bool {
    fragment.chars().count() >= MIN_FRAGMENT_CHARS
}

/// Resolves a possibly abbreviated key against the known candidates.
pub fn expand_key(key: &str, candidates: &[String]) -> Result<String> {
    // 1. Exact match
    if candidates.iter().any(|c| c == key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&String> = candidates.iter().filter(|c| c.starts_with(key)).collect();

    match matches.len() {
        1 => Ok(matches[0].clone()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {} entries", key, matches.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> TaskExtractor {
        TaskExtractor::new().unwrap()
    }

    #[test]
    fn test_newline_items_strip_markers() {
        let text = "1. estudar matemática\n- lavar a louça\n• pagar conta de luz";
        let tasks = extractor().extract(text);
        assert_eq!(tasks, vec!["estudar matemática", "lavar a louça", "pagar conta de luz"]);
    }

    #[test]
    fn test_various_markers() {
        let text =
            "  2) call mom  \n\n→ buy bread\n## review notes\n* walk the dog\n10 - file taxes";
        let tasks = extractor().extract(text);
        assert_eq!(
            tasks,
            vec!["call mom", "buy bread", "review notes", "walk the dog", "file taxes"]
        );
    }

    #[test]
    fn test_leading_digits_that_are_not_markers() {
        let text = "3D print the case\n2fa setup for bank\n#1 call mom";
        let tasks = extractor().extract(text);
        assert_eq!(tasks, vec!["3D print the case", "2fa setup for bank", "call mom"]);
    }

    #[test]
    fn test_single_line_splits_on_separators() {
        let tasks =
            extractor().extract("study math, clean the kitchen; pay the bill AND call grandma");
        assert_eq!(tasks, vec!["study math", "clean the kitchen", "pay the bill", "call grandma"]);
    }

    #[test]
    fn test_and_inside_word_is_not_a_separator() {
        let tasks = extractor().extract("understand android handbook");
        assert_eq!(tasks, vec!["understand android handbook"]);
    }

    #[test]
    fn test_short_fragments_dropped() {
        let tasks = extractor().extract("a, bc, abc, ok");
        assert_eq!(tasks, vec!["abc"]);

        let tasks = extractor().extract("1. ab\n2. xy\n3. read");
        assert_eq!(tasks, vec!["read"]);
        assert!(tasks.iter().all(|t| t.chars().count() > 2));
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(extractor().extract("").is_empty());
        assert!(extractor().extract("   \n \n").is_empty());
        assert!(extractor().extract(",,;").is_empty());
    }

    #[test]
    fn test_multibyte_length_counts_chars() {
        // "açã" is three chars even though it is more than three bytes
        let tasks = extractor().extract("açã, çã");
        assert_eq!(tasks, vec!["açã"]);
    }

    #[test]
    fn test_expand_key() {
        let candidates: Vec<String> = vec!["3f2a9c10".into(), "3f9b0000".into(), "a1b2c3d4".into()];

        assert_eq!(expand_key("a", &candidates).unwrap(), "a1b2c3d4");
        assert_eq!(expand_key("3f2", &candidates).unwrap(), "3f2a9c10");
        assert_eq!(expand_key("a1b2c3d4", &candidates).unwrap(), "a1b2c3d4");

        // Ambiguous
        assert!(expand_key("3f", &candidates).is_err());

        // Unknown
        assert!(expand_key("zz", &candidates).is_err());
    }
}
