use serde::Serialize;

pub const WORDS_PER_MINUTE: f64 = 200.0;

/// An estimate of how long a piece of text takes to read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingTime {
    pub words: usize,
    pub minutes: f64,
    /// Human readable form, e.g. "3 min read".
    pub text: String,
}

/// Estimates the reading time of `text` at [`WORDS_PER_MINUTE`].
pub fn reading_time(text: &str) -> ReadingTime {
    let words = count_words(text);
    let minutes = words as f64 / WORDS_PER_MINUTE;

    // Round to two places before taking the ceiling so that floating point
    // noise never adds a minute.
    let displayed = ((minutes * 100.0).round() / 100.0).ceil() as u64;

    ReadingTime {
        words,
        minutes,
        text: format!("{displayed} min read"),
    }
}

/// Counts whitespace separated words. CJK ideographs are not separated by
/// spaces, so each one counts as a word of its own.
fn count_words(text: &str) -> usize {
    let mut words = 0;
    let mut in_word = false;

    for c in text.chars() {
        if is_cjk(c) {
            words += 1;
            in_word = false;
        } else if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            words += 1;
            in_word = true;
        }
    }

    words
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30ff}'     // Hiragana, Katakana
        | '\u{3400}'..='\u{4dbf}'   // CJK Extension A
        | '\u{4e00}'..='\u{9fff}'   // CJK Unified Ideographs
        | '\u{ac00}'..='\u{d7af}'   // Hangul syllables
        | '\u{f900}'..='\u{faff}'   // CJK Compatibility Ideographs
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text() {
        let rt = reading_time("");
        assert_eq!(rt.words, 0);
        assert_eq!(rt.text, "0 min read");
    }

    #[test]
    fn short_text_is_one_minute() {
        let rt = reading_time("Hello there,  world.\nSecond line");
        assert_eq!(rt.words, 5);
        assert_eq!(rt.text, "1 min read");
    }

    #[test]
    fn rounds_up_to_whole_minutes() {
        let text = "word ".repeat(401);
        let rt = reading_time(&text);
        assert_eq!(rt.words, 401);
        assert_eq!(rt.text, "3 min read");
    }

    #[test]
    fn exact_minutes_are_not_rounded_up() {
        let text = "word ".repeat(400);
        assert_eq!(reading_time(&text).text, "2 min read");
    }

    #[test]
    fn cjk_characters_count_individually() {
        let rt = reading_time("你好世界 hello");
        assert_eq!(rt.words, 5);
    }
}
