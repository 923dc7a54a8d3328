//! Name ordering for Arabic course titles

use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];
const TATWEEL: char = 'ـ';

static PUNCTUATION: OnceLock<Option<Regex>> = OnceLock::new();
static WHITESPACE: OnceLock<Option<Regex>> = OnceLock::new();

/// Fold a course name into its comparison form.
///
/// Arabic-Indic digits become ASCII, tatweel and harakat are dropped, alef
/// variants share one base letter, dashes are unified and punctuation or
/// whitespace runs collapse to a single space.
pub fn collation_key(name: &str) -> String {
    let folded: String = name
        .chars()
        .filter(|&c| c != TATWEEL && !is_haraka(c))
        .map(|c| match c {
            '–' | '—' => '-',
            'أ' | 'إ' | 'آ' | 'ٱ' => 'ا',
            'ى' => 'ي',
            'ة' => 'ه',
            c => fold_digit(c),
        })
        .collect();

    let mut key = folded;
    if let Some(re) = PUNCTUATION.get_or_init(|| Regex::new(r"[()\[\]{}،,:;|]+").ok()) {
        key = re.replace_all(&key, " ").into_owned();
    }
    if let Some(re) = WHITESPACE.get_or_init(|| Regex::new(r"\s+").ok()) {
        key = re.replace_all(&key, " ").into_owned();
    }
    key.trim().to_string()
}

/// Total order on names: folded key first, then the raw text
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn is_haraka(c: char) -> bool {
    ('\u{064B}'..='\u{0652}').contains(&c)
}

fn fold_digit(c: char) -> char {
    ARABIC_INDIC_DIGITS
        .iter()
        .position(|&d| d == c)
        .and_then(|i| char::from_digit(i as u32, 10))
        .unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_and_diacritics_fold() {
        assert_eq!(collation_key("لغة انجليزية تطبيقية ١"), "لغة انجليزية تطبيقية 1");
        assert_eq!(collation_key("رِيَاضِيَّات"), "رياضيات");
        assert_eq!(collation_key("برمجـــة"), "برمجة");
    }

    #[test]
    fn test_punctuation_and_whitespace_collapse() {
        assert_eq!(collation_key("  فيزياء (1)،  عملي "), "فيزياء 1 عملي");
        assert_eq!(collation_key("دوائر – 2"), "دوائر - 2");
    }

    #[test]
    fn test_compare_orders_alphabetically() {
        let mut names = vec!["فيزياء 1", "برمجة 2", "رياضيات 1", "برمجة 1", "أخلاقيات"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(
            names,
            vec!["أخلاقيات", "برمجة 1", "برمجة 2", "رياضيات 1", "فيزياء 1"]
        );
    }

    #[test]
    fn test_alef_variants_share_a_base_letter() {
        assert_eq!(collation_key("إدارة"), "اداره");
        assert_eq!(collation_key("مستوى"), "مستوي");

        let mut names = vec!["إدارة", "ابتكار", "أمن معلومات"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["ابتكار", "إدارة", "أمن معلومات"]);
    }

    #[test]
    fn test_compare_is_total_for_equal_keys() {
        assert_eq!(compare_names("برمجة ١", "برمجة 1"), "برمجة ١".cmp("برمجة 1"));
        assert_eq!(compare_names("x", "x"), Ordering::Equal);
    }
}
