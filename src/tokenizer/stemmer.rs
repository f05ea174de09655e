// src/tokenizer/stemmer.rs

/// Reduces a single word to its stem.
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;
}

/// Leaves every word untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_string()
    }
}

/// Martin Porter's 1980 suffix-stripping algorithm.
///
/// Words are lowercased first. Words of one or two letters, or containing
/// anything outside ASCII, are only lowercased.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        if !word.is_ascii() {
            return word.to_lowercase();
        }
        let mut w = word.as_bytes().to_ascii_lowercase();
        if w.len() <= 2 {
            return String::from_utf8(w).unwrap_or_else(|_| word.to_string());
        }
        step1ab(&mut w);
        step1c(&mut w);
        step2(&mut w);
        step3(&mut w);
        step4(&mut w);
        step5(&mut w);
        // Only ASCII bytes were touched.
        String::from_utf8(w).unwrap_or_else(|_| word.to_string())
    }
}

fn is_consonant(w: &[u8], i: usize) -> bool {
    match w[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(w, i - 1),
        _ => true,
    }
}

/// Number of vowel-consonant sequences in `w[..len]`.
fn measure(w: &[u8], len: usize) -> usize {
    let mut n = 0;
    let mut i = 0;
    while i < len && is_consonant(w, i) {
        i += 1;
    }
    loop {
        while i < len && !is_consonant(w, i) {
            i += 1;
        }
        if i >= len {
            return n;
        }
        while i < len && is_consonant(w, i) {
            i += 1;
        }
        n += 1;
    }
}

fn has_vowel(w: &[u8], len: usize) -> bool {
    (0..len).any(|i| !is_consonant(w, i))
}

fn ends_double_consonant(w: &[u8], len: usize) -> bool {
    len >= 2 && w[len - 1] == w[len - 2] && is_consonant(w, len - 1)
}

/// consonant-vowel-consonant ending at `len - 1`, last one not w, x or y.
fn ends_cvc(w: &[u8], len: usize) -> bool {
    if len < 3 {
        return false;
    }
    let i = len - 1;
    is_consonant(w, i)
        && !is_consonant(w, i - 1)
        && is_consonant(w, i - 2)
        && !matches!(w[i], b'w' | b'x' | b'y')
}

/// Length of the stem left after removing `suffix`, if `w` ends with it.
fn stem_len(w: &[u8], suffix: &str) -> Option<usize> {
    w.ends_with(suffix.as_bytes()).then(|| w.len() - suffix.len())
}

fn replace_suffix(w: &mut Vec<u8>, stem: usize, with: &str) {
    w.truncate(stem);
    w.extend_from_slice(with.as_bytes());
}

/// First rule whose suffix matches decides; it applies when the stem
/// measure exceeds `min_measure`.
fn apply_rules(w: &mut Vec<u8>, rules: &[(&str, &str)], min_measure: usize) {
    for (suffix, with) in rules {
        if let Some(stem) = stem_len(w, suffix) {
            if measure(w, stem) > min_measure {
                replace_suffix(w, stem, with);
            }
            return;
        }
    }
}

fn step1ab(w: &mut Vec<u8>) {
    if w.ends_with(b"s") {
        if w.ends_with(b"sses") || w.ends_with(b"ies") {
            w.truncate(w.len() - 2);
        } else if w.len() >= 2 && w[w.len() - 2] != b's' {
            w.pop();
        }
    }

    if let Some(stem) = stem_len(w, "eed") {
        if measure(w, stem) > 0 {
            w.pop();
        }
        return;
    }

    let Some(stem) = stem_len(w, "ed").or(stem_len(w, "ing")) else {
        return;
    };
    if !has_vowel(w, stem) {
        return;
    }
    w.truncate(stem);

    if w.ends_with(b"at") || w.ends_with(b"bl") || w.ends_with(b"iz") {
        w.push(b'e');
    } else if ends_double_consonant(w, w.len())
        && !matches!(w[w.len() - 1], b'l' | b's' | b'z')
    {
        w.pop();
    } else if measure(w, w.len()) == 1 && ends_cvc(w, w.len()) {
        w.push(b'e');
    }
}

fn step1c(w: &mut [u8]) {
    if let Some(stem) = stem_len(w, "y") {
        if has_vowel(w, stem) {
            w[stem] = b'i';
        }
    }
}

const STEP2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

fn step2(w: &mut Vec<u8>) {
    apply_rules(w, STEP2, 0);
}

fn step3(w: &mut Vec<u8>) {
    apply_rules(w, STEP3, 0);
}

fn step4(w: &mut Vec<u8>) {
    for suffix in STEP4 {
        let Some(stem) = stem_len(w, suffix) else {
            continue;
        };
        // "ion" only counts after s or t.
        if *suffix == "ion" && !(stem > 0 && matches!(w[stem - 1], b's' | b't')) {
            continue;
        }
        if measure(w, stem) > 1 {
            w.truncate(stem);
        }
        return;
    }
}

fn step5(w: &mut Vec<u8>) {
    if let Some(stem) = stem_len(w, "e") {
        let m = measure(w, stem);
        if m > 1 || (m == 1 && !ends_cvc(w, stem)) {
            w.truncate(stem);
        }
    }
    if ends_double_consonant(w, w.len()) && w.ends_with(b"l") && measure(w, w.len()) > 1 {
        w.pop();
    }
}
