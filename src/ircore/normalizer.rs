use once_cell::sync::Lazy;
use regex::Regex;

// markup noise removed before tokenization, applied in this order
static NOISE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // fenced code blocks
        r"(?s)```.+?```",
        // front matter
        r"(?s)---.+?---",
        // inline math
        r"(?s)\$.+?\$",
        // block math
        r"(?s)\$\$.+?\$\$",
        // table rows
        r"(?m)^\|.*\|$",
        // html tags
        r"<.+?>",
        // bare urls
        r"http[^ ]+",
        // punctuation
        r"[#!()*_\[\]|=>+`:\-]",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("noise pattern must compile"))
    .collect()
});

/// Strips markdown noise from raw document text.
pub fn normalize(raw_text: &str) -> String {
    let mut text = raw_text.to_string();
    for pattern in NOISE_PATTERNS.iter() {
        if let std::borrow::Cow::Owned(replaced) = pattern.replace_all(&text, "") {
            text = replaced;
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_and_front_matter() {
        let md = "---\ntitle: hello\ntags: [a, b]\n---\nintro text\n```rust\nfn main() {}\n```\noutro";
        let text = normalize(md);
        assert!(!text.contains("title"));
        assert!(!text.contains("fn main"));
        assert!(text.contains("intro text"));
        assert!(text.contains("outro"));
    }

    #[test]
    fn test_strip_math_tables_tags_urls() {
        let md = "energy $e mc^2$ here\n$$\\sum x$$\n| a | b |\n|---|---|\nsee <b>bold</b> at https://example.com/page now";
        let text = normalize(md);
        assert!(!text.contains("mc"));
        assert!(!text.contains("sum"));
        assert!(!text.contains("| a |"));
        assert!(!text.contains("<b>"));
        assert!(text.contains("bold"));
        assert!(!text.contains("example.com"));
        assert!(text.contains("energy"));
        assert!(text.contains("now"));
    }

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(normalize("# Title! (note) *em* _u_ [x] a=b > c + d : e-f"),
            " Title note em u x ab  c  d  ef");
    }

    #[test]
    fn test_unmatched_patterns_are_noop() {
        assert_eq!(normalize("plain words only"), "plain words only");
        assert_eq!(normalize(""), "");
        // a lone fence or dollar sign never matches
        assert_eq!(normalize("price $5 today"), "price $5 today");
    }

    #[test]
    fn test_normalize_idempotent_on_clean_text() {
        let samples = [
            "apple apple banana",
            "---\nfront: matter\n---\nbody with `code` and <i>tags</i>",
            "  spaced   out\nlines  ",
            "滚滚长江东逝水，浪花淘尽英雄。",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_only_noise_leaves_whitespace() {
        let text = normalize("```\ncode\n```\n<br>\n");
        assert!(text.trim().is_empty());
    }
}
