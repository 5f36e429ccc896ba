//! Character classification for Arabic display text
//!
//! Token indices reported by the search engine count Arabic words *after* the
//! indexing pipeline has stripped punctuation, Latin letters, and digits. The
//! classes here must therefore match that pipeline's character tables exactly,
//! or highlight positions drift off by one word per mismatch.

use serde::{Deserialize, Serialize};

/// Class of a single Unicode scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    /// An Arabic letter: opens or extends a word.
    ArabicLetter,
    /// A tashkil mark or superscript alef: extends the current word but is
    /// never a letter for boundary purposes.
    Tashkil,
    /// Latin letters used in transliteration; stripped before indexing.
    Latin,
    /// ASCII or Arabic-Indic digits; stripped before indexing.
    Digit,
    /// One of the fixed punctuation/symbol characters the indexing pipeline
    /// strips.
    Punctuation,
    /// Everything else, including whitespace: a true word boundary.
    Other,
}

/// Classify a single character. Total over all of Unicode; never fails.
pub fn classify(c: char) -> CharClass {
    match c {
        // Tashkil and the superscript alef come first: they live inside the
        // main Arabic block but are not letters.
        '\u{064B}'..='\u{065F}' | '\u{0670}' => CharClass::Tashkil,

        '0'..='9' | '\u{0660}'..='\u{0669}' | '\u{06F0}'..='\u{06F9}' => CharClass::Digit,

        // ASCII punctuation and symbols.
        '!' | '"' | '#' | '$' | '%' | '&' | '\'' | '(' | ')' | '*' | '+' | ','
        | '-' | '.' | '/' | ':' | ';' | '<' | '=' | '>' | '?' | '@' | '['
        | '\\' | ']' | '^' | '_' | '`' | '{' | '|' | '}' | '~' => CharClass::Punctuation,

        // Arabic punctuation, the tatweel filler, and typographic marks that
        // appear in digitized texts. This set is closed and enumerated; it
        // mirrors the stripped-character table of the indexing pipeline.
        '\u{060C}' // ، comma
        | '\u{061B}' // ؛ semicolon
        | '\u{061F}' // ؟ question mark
        | '\u{0640}' // ـ tatweel
        | '\u{066A}' // ٪ percent
        | '\u{066B}' // ٫ decimal separator
        | '\u{066C}' // ٬ thousands separator
        | '\u{066D}' // ٭ five-pointed star
        | '\u{06D4}' // ۔ full stop
        | '\u{00AB}' | '\u{00BB}' // « »
        | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' // ' ' " "
        | '\u{2013}' | '\u{2014}' // – —
        | '\u{2026}' // …
        | '\u{FD3E}' | '\u{FD3F}' // ﴾ ﴿ ornate parentheses
        => CharClass::Punctuation,

        // Arabic letter blocks: main, Supplement, Extended-A.
        '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}' | '\u{08A0}'..='\u{08FF}' => {
            CharClass::ArabicLetter
        }

        // Latin letters, including the accented ranges used in
        // transliteration (Latin-1 Supplement, Extended-A/B, Extended
        // Additional for ḥ/ṣ/ṭ and friends).
        'A'..='Z' | 'a'..='z' | '\u{1E00}'..='\u{1EFF}' => CharClass::Latin,
        '\u{00C0}'..='\u{024F}' => {
            if c == '\u{00D7}' || c == '\u{00F7}' {
                CharClass::Punctuation
            } else {
                CharClass::Latin
            }
        }

        _ => CharClass::Other,
    }
}

/// True for Arabic letters only; tashkil marks do not count.
pub fn is_arabic_letter(c: char) -> bool {
    classify(c) == CharClass::ArabicLetter
}

pub fn is_tashkil(c: char) -> bool {
    classify(c) == CharClass::Tashkil
}

/// Transparent characters are stripped by the indexing pipeline before
/// tokenization: they carry no token index and must not terminate a word.
pub fn is_transparent(c: char) -> bool {
    matches!(
        classify(c),
        CharClass::Punctuation | CharClass::Latin | CharClass::Digit
    )
}

/// True word boundaries: whitespace, control characters, anything unclassified.
pub fn is_boundary(c: char) -> bool {
    classify(c) == CharClass::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arabic_letters() {
        for c in ['ا', 'ب', 'ي', 'ء', 'أ', 'ة', 'ک'] {
            assert_eq!(classify(c), CharClass::ArabicLetter, "{c:?}");
        }
        // Supplement and Extended-A blocks
        assert_eq!(classify('\u{0750}'), CharClass::ArabicLetter);
        assert_eq!(classify('\u{08A0}'), CharClass::ArabicLetter);
    }

    #[test]
    fn test_tashkil_is_not_a_letter() {
        for c in ['\u{064B}', '\u{064E}', '\u{0651}', '\u{0652}', '\u{0670}'] {
            assert_eq!(classify(c), CharClass::Tashkil, "{c:?}");
            assert!(!is_arabic_letter(c));
        }
    }

    #[test]
    fn test_digits_both_scripts() {
        assert_eq!(classify('3'), CharClass::Digit);
        assert_eq!(classify('٣'), CharClass::Digit);
        assert_eq!(classify('۳'), CharClass::Digit);
    }

    #[test]
    fn test_arabic_punctuation_wins_over_letter_block() {
        // These sit inside U+0600..=U+06FF but must classify as punctuation.
        for c in ['،', '؛', '؟', 'ـ', '٭'] {
            assert_eq!(classify(c), CharClass::Punctuation, "{c:?}");
        }
    }

    #[test]
    fn test_latin_and_transliteration() {
        assert_eq!(classify('q'), CharClass::Latin);
        assert_eq!(classify('Ḥ'), CharClass::Latin);
        assert_eq!(classify('ā'), CharClass::Latin);
        assert_eq!(classify('\u{00D7}'), CharClass::Punctuation);
    }

    #[test]
    fn test_boundaries() {
        for c in [' ', '\n', '\t', '\u{00A0}'] {
            assert_eq!(classify(c), CharClass::Other, "{c:?}");
            assert!(is_boundary(c));
        }
    }

    #[test]
    fn test_transparent_set() {
        assert!(is_transparent('.'));
        assert!(is_transparent('A'));
        assert!(is_transparent('7'));
        assert!(is_transparent('«'));
        assert!(!is_transparent('ب'));
        assert!(!is_transparent(' '));
    }
}
