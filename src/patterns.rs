//! Name-based search pattern generation
//!
//! A structured name description (kunya, nasab chain, nisba epithets, shuhra)
//! is expanded into the combinatorial set of surface forms a biographical
//! entry may use for that person. The same base set feeds two consumers: the
//! search service gets the proclitic-expanded variants, the UI preview gets
//! the case-collapsed display variants. Both must be derived from an
//! identical base set, so generation is a pure function of the form.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::normalize_arabic;

/// The three case forms of "father of". A kunya may surface in any of them
/// depending on its grammatical position in the sentence.
const KUNYA_CASE_FORMS: [&str; 3] = ["ابو", "ابا", "ابي"];

/// Placeholder shown in display patterns where the three case forms were
/// collapsed into one entry.
const KUNYA_PLACEHOLDER: &str = "اب*";

/// Single-letter proclitics that attach to the front of an Arabic word
/// without a space: wa-, fa-, bi-, li-, ka-.
const PROCLITICS: [char; 5] = ['و', 'ف', 'ب', 'ل', 'ك'];

/// Lineage connector word, which doubles as the grammatical sex marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connector {
    /// "son of"
    #[default]
    Bin,
    /// "daughter of"
    Bint,
}

impl Connector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Connector::Bin => "بن",
            Connector::Bint => "بنت",
        }
    }
}

/// Structured description of an Arabic personal name.
///
/// Owned and replaced whole by the caller on every edit; the generators never
/// mutate it. The five booleans opt into narrower pattern families that are
/// linguistically valid but noisy, so they are off by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameForm {
    pub id: u64,
    /// Patronymic variants; only the first two are used.
    pub kunyas: Vec<String>,
    /// Free-text lineage chain, split on bin/bint connectors.
    pub nasab: String,
    /// Attributive epithets (origin, affiliation, trait).
    pub nisbas: Vec<String>,
    /// Epithet of fame, rendered through "known as" / "famous as" templates.
    pub shuhra: Option<String>,
    pub include_kunya_nisba: bool,
    pub include_kunya_first_name: bool,
    pub include_first_name: bool,
    pub include_first_name_nisba: bool,
    pub include_two_part_nasab: bool,
}

impl NameForm {
    /// An empty form under a caller-minted identifier.
    pub fn new(id: u64) -> Self {
        Self { id, ..Self::default() }
    }
}

/// Deduplicated set of normalized patterns, preserving insertion order so
/// membership and iteration are reproducible for identical input.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl PatternSet {
    fn insert(&mut self, pattern: String) {
        let pattern = pattern.split_whitespace().collect::<Vec<_>>().join(" ");
        if pattern.is_empty() {
            return;
        }
        if self.seen.insert(pattern.clone()) {
            self.items.push(pattern);
        }
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.seen.contains(pattern)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

#[derive(Debug, Clone)]
struct ParsedNasab {
    parts: Vec<String>,
    connector: Connector,
}

/// Split a nasab string on the bin/bint connector words into ordered name
/// parts, remembering which connector was used so patterns re-join with it.
fn parse_nasab(nasab: &str) -> ParsedNasab {
    let normalized = normalize_arabic(nasab);
    let mut parts = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut connector = Connector::Bin;
    let mut connector_seen = false;

    for word in normalized.split_whitespace() {
        match word {
            "بن" | "بنت" => {
                if !connector_seen {
                    connector = if word == "بنت" { Connector::Bint } else { Connector::Bin };
                    connector_seen = true;
                }
                if !current.is_empty() {
                    parts.push(current.join(" "));
                    current.clear();
                }
            }
            _ => current.push(word),
        }
    }
    if !current.is_empty() {
        parts.push(current.join(" "));
    }

    ParsedNasab { parts, connector }
}

fn join_parts(parts: &[String], connector: Connector) -> String {
    parts.join(&format!(" {} ", connector.as_str()))
}

/// Expand a kunya into its three case forms when it has the "father-of"
/// shape; anything else comes back normalized but unexpanded.
fn expand_kunya(kunya: &str) -> Vec<String> {
    let normalized = normalize_arabic(kunya);
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut words = normalized.splitn(2, ' ');
    let first = words.next().unwrap_or("");
    let rest = words.next();

    if !KUNYA_CASE_FORMS.contains(&first) {
        return vec![normalized];
    }
    match rest {
        Some(rest) => KUNYA_CASE_FORMS.iter().map(|form| format!("{form} {rest}")).collect(),
        None => KUNYA_CASE_FORMS.iter().map(|form| form.to_string()).collect(),
    }
}

/// Shuhra text for the fame templates: after the bi- proclitic the epithet is
/// in the genitive, so a father-of kunya takes its case-i form.
fn shuhra_body(shuhra: &str) -> String {
    let normalized = normalize_arabic(shuhra);
    let mut words = normalized.splitn(2, ' ');
    let first = words.next().unwrap_or("");
    let rest = words.next();

    if first == "ابو" || first == "ابا" {
        match rest {
            Some(rest) => format!("ابي {rest}"),
            None => "ابي".to_string(),
        }
    } else {
        normalized
    }
}

/// Build the base pattern set for a form: the union of every kunya/nasab/
/// nisba combination, plus the opt-in narrow families and the shuhra
/// templates. Deduplicated after normalization; insertion-ordered.
pub fn generate_patterns(form: &NameForm) -> PatternSet {
    let mut set = PatternSet::default();

    let ParsedNasab { parts, connector } = parse_nasab(&form.nasab);
    // Only the first three lineage parts participate in patterns.
    let parts: Vec<String> = parts.into_iter().take(3).collect();

    let nisbas: Vec<String> = form
        .nisbas
        .iter()
        .map(|n| normalize_arabic(n))
        .filter(|n| !n.is_empty())
        .collect();
    let kunya_variants: Vec<String> =
        form.kunyas.iter().take(2).flat_map(|k| expand_kunya(k)).collect();

    let first = parts.first();
    let first_two = (parts.len() >= 2).then(|| join_parts(&parts[..2], connector));
    let first_three = (parts.len() >= 3).then(|| join_parts(&parts[..3], connector));

    for kunya in &kunya_variants {
        if let Some(two) = &first_two {
            set.insert(format!("{kunya} {two}"));
            for nisba in &nisbas {
                set.insert(format!("{kunya} {two} {nisba}"));
            }
        }
        if let Some(three) = &first_three {
            set.insert(format!("{kunya} {three}"));
            for nisba in &nisbas {
                set.insert(format!("{kunya} {three} {nisba}"));
            }
        }
        if let Some(first) = first {
            for nisba in &nisbas {
                set.insert(format!("{kunya} {first} {nisba}"));
            }
        }
        // Kunya followed directly by the lineage, first name omitted:
        // one pattern per suffix run of the remaining parts.
        for skip in 1..parts.len() {
            let run = join_parts(&parts[skip..], connector);
            set.insert(format!("{kunya} {} {run}", connector.as_str()));
            for nisba in &nisbas {
                set.insert(format!("{kunya} {} {run} {nisba}", connector.as_str()));
            }
        }
        if form.include_kunya_nisba {
            for nisba in &nisbas {
                set.insert(format!("{kunya} {nisba}"));
            }
        }
        if form.include_kunya_first_name {
            if let Some(first) = first {
                set.insert(format!("{kunya} {first}"));
            }
        }
    }

    if let Some(three) = &first_three {
        set.insert(three.clone());
        for nisba in &nisbas {
            set.insert(format!("{three} {nisba}"));
        }
    }
    if let Some(two) = &first_two {
        for nisba in &nisbas {
            set.insert(format!("{two} {nisba}"));
        }
        if form.include_two_part_nasab {
            set.insert(two.clone());
        }
    }
    if form.include_first_name {
        if let Some(first) = first {
            set.insert(first.clone());
        }
    }
    if form.include_first_name_nisba {
        if let Some(first) = first {
            for nisba in &nisbas {
                set.insert(format!("{first} {nisba}"));
            }
        }
    }

    if let Some(shuhra) = form.shuhra.as_deref() {
        let body = shuhra_body(shuhra);
        if !body.is_empty() {
            set.insert(format!("المعروف ب{body}"));
            set.insert(format!("المشهور ب{body}"));
        }
    }

    set
}

/// Every base pattern plus one variant per proclitic letter, the proclitic
/// prepended to the first word only. This is the exhaustive set sent to the
/// search service.
pub fn generate_search_patterns(form: &NameForm) -> PatternSet {
    let base = generate_patterns(form);
    let expanded = expand_with_proclitics(&base);
    debug!(base = base.len(), expanded = expanded.len(), "expanded name patterns");
    expanded
}

/// Combine each pattern with the fixed proclitic alphabet. The proclitic
/// attaches without a space, so prepending to the pattern prepends to its
/// first word; later words are untouched.
pub fn expand_with_proclitics(patterns: &PatternSet) -> PatternSet {
    let mut set = PatternSet::default();
    for pattern in patterns.iter() {
        set.insert(pattern.to_string());
        for proclitic in PROCLITICS {
            set.insert(format!("{proclitic}{pattern}"));
        }
    }
    set
}

/// Base patterns with the three kunya case forms collapsed to a single
/// placeholder for human preview. Never used for querying.
pub fn generate_display_patterns(form: &NameForm) -> PatternSet {
    let base = generate_patterns(form);
    let mut set = PatternSet::default();
    for pattern in base.iter() {
        set.insert(collapse_kunya_prefix(pattern));
    }
    set
}

fn collapse_kunya_prefix(pattern: &str) -> String {
    let mut words = pattern.splitn(2, ' ');
    let first = words.next().unwrap_or("");
    let rest = words.next();

    if !KUNYA_CASE_FORMS.contains(&first) {
        return pattern.to_string();
    }
    match rest {
        Some(rest) => format!("{KUNYA_PLACEHOLDER} {rest}"),
        None => KUNYA_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_form() -> NameForm {
        NameForm {
            kunyas: vec!["ابو منصور".to_string()],
            nasab: "معمر بن أحمد بن زياد".to_string(),
            nisbas: vec!["الأصبهاني".to_string()],
            ..NameForm::new(1)
        }
    }

    #[test]
    fn test_parse_nasab_tracks_connector() {
        let parsed = parse_nasab("معمر بن أحمد بن زياد");
        assert_eq!(parsed.parts, vec!["معمر", "احمد", "زياد"]);
        assert_eq!(parsed.connector, Connector::Bin);

        let parsed = parse_nasab("فاطمة بنت محمد");
        assert_eq!(parsed.parts, vec!["فاطمة", "محمد"]);
        assert_eq!(parsed.connector, Connector::Bint);
    }

    #[test]
    fn test_expand_kunya_case_forms() {
        assert_eq!(
            expand_kunya("أبو منصور"),
            vec!["ابو منصور", "ابا منصور", "ابي منصور"]
        );
        // A kunya without the father-of shape stays unexpanded.
        assert_eq!(expand_kunya("ام كلثوم"), vec!["ام كلثوم"]);
        assert!(expand_kunya("  ").is_empty());
    }

    #[test]
    fn test_base_patterns_for_example_form() {
        let set = generate_patterns(&example_form());

        assert!(set.contains("ابو منصور معمر الاصبهاني"));
        assert!(set.contains("ابا منصور معمر الاصبهاني"));
        assert!(set.contains("ابي منصور معمر الاصبهاني"));
        assert!(set.contains("ابو منصور معمر بن احمد"));
        assert!(set.contains("ابو منصور معمر بن احمد بن زياد"));
        assert!(set.contains("ابو منصور بن احمد بن زياد"));
        assert!(set.contains("ابو منصور بن زياد"));
        assert!(set.contains("معمر بن احمد بن زياد"));
        assert!(set.contains("معمر بن احمد بن زياد الاصبهاني"));
        assert!(set.contains("معمر بن احمد الاصبهاني"));
    }

    #[test]
    fn test_narrow_families_require_opt_in() {
        let form = example_form();
        let set = generate_patterns(&form);
        assert!(!set.contains("معمر"));
        assert!(!set.contains("معمر الاصبهاني"));
        assert!(!set.contains("معمر بن احمد"));
        assert!(!set.contains("ابو منصور معمر"));
        assert!(!set.contains("ابو منصور الاصبهاني"));

        let form = NameForm {
            include_kunya_nisba: true,
            include_kunya_first_name: true,
            include_first_name: true,
            include_first_name_nisba: true,
            include_two_part_nasab: true,
            ..example_form()
        };
        let set = generate_patterns(&form);
        assert!(set.contains("معمر"));
        assert!(set.contains("معمر الاصبهاني"));
        assert!(set.contains("معمر بن احمد"));
        assert!(set.contains("ابو منصور معمر"));
        assert!(set.contains("ابو منصور الاصبهاني"));
    }

    #[test]
    fn test_bint_connector_re_joins_patterns() {
        let form = NameForm {
            nasab: "فاطمة بنت محمد بنت عبد الله".to_string(),
            include_two_part_nasab: true,
            ..NameForm::new(2)
        };
        let set = generate_patterns(&form);
        assert!(set.contains("فاطمة بنت محمد"));
        assert!(set.contains("فاطمة بنت محمد بنت عبد الله"));
    }

    #[test]
    fn test_shuhra_templates() {
        let form = NameForm {
            shuhra: Some("ابن تيمية".to_string()),
            ..NameForm::new(3)
        };
        let set = generate_patterns(&form);
        assert!(set.contains("المعروف بابن تيمية"));
        assert!(set.contains("المشهور بابن تيمية"));

        // A father-of shuhra takes the genitive case form after bi-.
        let form = NameForm {
            shuhra: Some("أبو تراب".to_string()),
            ..NameForm::new(4)
        };
        let set = generate_patterns(&form);
        assert!(set.contains("المعروف بابي تراب"));
        assert!(set.contains("المشهور بابي تراب"));
        assert!(!set.contains("المعروف بابو تراب"));
    }

    #[test]
    fn test_search_patterns_carry_proclitic_variants() {
        let set = generate_search_patterns(&example_form());

        for base in [
            "ابو منصور معمر الاصبهاني",
            "ابا منصور معمر الاصبهاني",
            "ابي منصور معمر الاصبهاني",
        ] {
            assert!(set.contains(base));
            for proclitic in ['و', 'ف', 'ب', 'ل', 'ك'] {
                assert!(set.contains(&format!("{proclitic}{base}")), "{proclitic}{base}");
            }
        }
        // Proclitics attach to the first word only.
        assert!(!set.contains("ابو ومنصور معمر الاصبهاني"));
        // The display placeholder never reaches the search set.
        assert!(!set.iter().any(|p| p.contains("اب*")));
    }

    #[test]
    fn test_display_patterns_collapse_kunya_case_forms() {
        let set = generate_display_patterns(&example_form());

        assert!(set.contains("اب* منصور معمر الاصبهاني"));
        for pattern in set.iter() {
            let first = pattern.split(' ').next().unwrap();
            assert!(!KUNYA_CASE_FORMS.contains(&first), "uncollapsed: {pattern}");
        }
        // Collapsing merges the three case variants into one entry.
        let base = generate_patterns(&example_form());
        assert!(set.len() < base.len());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let form = NameForm {
            shuhra: Some("الجاحظ".to_string()),
            include_first_name: true,
            ..example_form()
        };
        let a: Vec<String> = generate_search_patterns(&form).into_vec();
        let b: Vec<String> = generate_search_patterns(&form).into_vec();
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicate_inputs_deduplicate() {
        let form = NameForm {
            kunyas: vec!["ابو منصور".to_string(), "أبو منصور".to_string()],
            ..example_form()
        };
        let deduped = generate_patterns(&form);
        let single = generate_patterns(&example_form());
        assert_eq!(deduped.len(), single.len());
    }

    #[test]
    fn test_empty_form_yields_no_patterns() {
        let set = generate_patterns(&NameForm::new(9));
        assert!(set.is_empty());

        let set = generate_search_patterns(&NameForm::new(9));
        assert!(set.is_empty());
    }
}
