//! Sentence segmentation.
//!
//! `AppState` holds an `Arc<dyn SentenceSegmenter>` so the splitter can be swapped
//! without touching the matcher or handlers. The default `RuleSegmenter` is a
//! deterministic, English-only rule set tuned for CV-shaped text: lots of
//! short unpunctuated lines, bullet points and abbreviations.

/// Text in, ordered sentences out. Implementations must never yield empty sentences.
pub trait SentenceSegmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

const ABBREVIATIONS: &[&str] = &[
    "dr", "mr", "mrs", "ms", "prof", "sr", "jr", "st", "mt", "inc", "ltd", "co", "corp", "dept",
    "univ", "assn", "est", "approx", "vs", "etc", "e.g", "i.e", "cf", "al", "no", "vol", "fig",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "u.s",
    "u.k", "ph.d", "m.s", "b.s", "m.a", "b.a", "m.d",
];

const TERMINALS: &[char] = &['.', '!', '?'];
const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201d}', '\u{2019}'];

/// Rule-based English sentence splitter.
///
/// Boundaries:
/// - after a word ending in `.`, `!` or `?` (closing quotes/brackets allowed)
///   when the next word does not start lower-case, unless the word is a known
///   abbreviation or a single-letter initial ("J.");
/// - at every line break, except when the next line starts lower-case or
///   with `,` `;` `:` or `)`, which marks a wrapped continuation;
/// - at blank lines, always.
///
/// Whitespace inside a sentence is collapsed to a single space.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSegmenter;

impl RuleSegmenter {
    pub fn english() -> Self {
        RuleSegmenter
    }
}

impl SentenceSegmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        for block in logical_lines(text) {
            split_block(&block, &mut sentences);
        }
        sentences
    }
}

/// Joins wrapped lines; a blank line or a line that starts a new thought closes the block.
fn logical_lines(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            flush(&mut current, &mut blocks);
            continue;
        }
        if !current.is_empty() && is_continuation(line) {
            current.push(' ');
        } else {
            flush(&mut current, &mut blocks);
        }
        current.push_str(line);
    }
    flush(&mut current, &mut blocks);
    blocks
}

fn is_continuation(line: &str) -> bool {
    match line.chars().next() {
        Some(c) => c.is_lowercase() || matches!(c, ',' | ';' | ':' | ')'),
        None => false,
    }
}

fn flush(current: &mut String, out: &mut Vec<String>) {
    if !current.trim().is_empty() {
        out.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

fn split_block(block: &str, out: &mut Vec<String>) {
    let words: Vec<&str> = block.split_whitespace().collect();
    let mut sentence: Vec<&str> = Vec::new();

    for (i, &word) in words.iter().enumerate() {
        sentence.push(word);
        let next = words.get(i + 1);
        let at_boundary = match next {
            Some(next) => ends_sentence(word) && !starts_lowercase(next),
            None => true,
        };
        if at_boundary {
            out.push(sentence.join(" "));
            sentence.clear();
        }
    }
}

fn starts_lowercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_lowercase)
}

fn ends_sentence(word: &str) -> bool {
    let core = word.trim_end_matches(CLOSERS);
    let Some(last) = core.chars().last() else {
        return false;
    };
    if !TERMINALS.contains(&last) {
        return false;
    }
    if last == '.' {
        let stem = core.trim_end_matches('.');
        if is_abbreviation(stem) {
            return false;
        }
    }
    true
}

fn is_abbreviation(stem: &str) -> bool {
    let stem = stem.trim_start_matches(|c: char| !c.is_alphanumeric());
    let mut chars = stem.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c.is_uppercase();
    }
    let lowered = stem.to_lowercase();
    ABBREVIATIONS.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str) -> Vec<String> {
        RuleSegmenter::english().segment(text)
    }

    #[test]
    fn test_splits_on_terminal_punctuation() {
        assert_eq!(
            seg("I won a prize. Then I founded a company! Did it work? Yes."),
            vec![
                "I won a prize.",
                "Then I founded a company!",
                "Did it work?",
                "Yes."
            ]
        );
    }

    #[test]
    fn test_abbreviations_and_initials_do_not_split() {
        assert_eq!(
            seg("Worked with Dr. Smith and J. Doe at Acme Inc. in 2019. Then left."),
            vec!["Worked with Dr. Smith and J. Doe at Acme Inc. in 2019.", "Then left."]
        );
        assert_eq!(
            seg("Earned a Ph.D. From MIT."),
            vec!["Earned a Ph.D. From MIT."]
        );
    }

    #[test]
    fn test_lowercase_after_period_does_not_split() {
        assert_eq!(
            seg("Version 2.0 shipped. then more work."),
            vec!["Version 2.0 shipped. then more work."]
        );
    }

    #[test]
    fn test_closing_quote_after_terminal_splits() {
        assert_eq!(
            seg(r#"He said "we won." Then we left."#),
            vec![r#"He said "we won.""#, "Then we left."]
        );
    }

    #[test]
    fn test_each_cv_line_is_its_own_sentence() {
        let text = "EXPERIENCE\nFounder, Acme Robotics\nBest Paper Award 2021\n";
        assert_eq!(
            seg(text),
            vec!["EXPERIENCE", "Founder, Acme Robotics", "Best Paper Award 2021"]
        );
    }

    #[test]
    fn test_wrapped_line_joins_previous() {
        let text = "Led the team that filed three\npatents on battery chemistry.\nNext line.";
        assert_eq!(
            seg(text),
            vec![
                "Led the team that filed three patents on battery chemistry.",
                "Next line."
            ]
        );
    }

    #[test]
    fn test_blank_lines_always_break() {
        assert_eq!(seg("first part\n\n  \nsecond part"), vec!["first part", "second part"]);
    }

    #[test]
    fn test_whitespace_collapsed_and_no_empty_sentences() {
        assert_eq!(seg("  spaced    out\ttext.  "), vec!["spaced out text."]);
        assert!(seg("").is_empty());
        assert!(seg(" \n\t\n ").is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(seg("One line\r\nTwo line\r\n"), vec!["One line", "Two line"]);
    }
}
