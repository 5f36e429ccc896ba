//! Arabic query normalization
//!
//! The index stores diacritic-free, alef-folded surface forms, so every query
//! string has to pass through the same folding table before it is matched or
//! compared. This table is shared with the indexing pipeline; changing one
//! side without the other silently breaks matching.

/// Normalize Arabic text for search: removes diacritics, normalizes
/// hamza/alif variants, folds Perso-Arabic letter variants.
pub fn normalize_arabic(text: &str) -> String {
    text.trim()
        .chars()
        .filter_map(|c| match c {
            '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{0671}' => None,
            'أ' | 'إ' | 'آ' => Some('ا'),
            'ؤ' => Some('و'),
            'ئ' | 'ى' => Some('ي'),
            'ک' | 'گ' | 'ڭ' => Some('ك'),
            'ی' | 'ے' => Some('ي'),
            'ۀ' | 'ە' => Some('ه'),
            'ۃ' => Some('ة'),
            'ٹ' => Some('ت'),
            'پ' => Some('ب'),
            'چ' => Some('ج'),
            'ژ' => Some('ز'),
            'ڤ' => Some('ف'),
            'ڨ' => Some('ق'),
            _ => Some(c),
        })
        .collect()
}

/// Convert a root query to indexed format: adds dots between radicals,
/// replaces weak letters with `#`.
pub fn normalize_root_query(query: &str) -> String {
    let normalized = normalize_arabic(query);
    let weak_letters = ['و', 'ي', 'ا', 'ء'];

    normalized
        .split_whitespace()
        .map(|word| {
            word.chars()
                .map(|c| {
                    if weak_letters.contains(&c) {
                        "#".to_string()
                    } else {
                        c.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(".")
        })
        .collect::<Vec<_>>()
        .join(" ")
}
