//! Rule-based lemma normalization.
//!
//! Both keywords and review tokens pass through the same reduction, so the
//! output only has to be a stable canonical form, not a dictionary word.

/// Reduce a lowercase word to its canonical matching form.
pub fn lemma(word: &str) -> String {
    let word = word.to_lowercase();

    let stem = strip_plural(&word)
        .or_else(|| strip_suffix_with_repair(&word, "ing", 3))
        .or_else(|| strip_suffix_with_repair(&word, "ed", 3))
        .unwrap_or(word);

    // Final-e strip keeps e-final verbs and their inflections aligned
    // (purchase / purchased / purchasing all reduce to "purchas").
    if stem.len() >= 4 && stem.ends_with('e') {
        stem[..stem.len() - 1].to_string()
    } else {
        stem
    }
}

fn strip_plural(word: &str) -> Option<String> {
    if word.len() > 4 && word.ends_with("ies") {
        return Some(format!("{}y", &word[..word.len() - 3]));
    }
    if word.len() > 4
        && (word.ends_with("shes")
            || word.ends_with("ches")
            || word.ends_with("xes")
            || word.ends_with("sses")
            || word.ends_with("zes"))
    {
        return Some(word[..word.len() - 2].to_string());
    }
    if word.len() > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        return Some(word[..word.len() - 1].to_string());
    }
    None
}

// Strips a verbal suffix, undoing consonant doubling (running -> run).
fn strip_suffix_with_repair(word: &str, suffix: &str, min_stem: usize) -> Option<String> {
    let stem = word.strip_suffix(suffix)?;
    if stem.len() < min_stem {
        return None;
    }

    let bytes = stem.as_bytes();
    let last = *bytes.last()? as char;
    if stem.len() > min_stem
        && bytes.len() >= 2
        && bytes[bytes.len() - 1] == bytes[bytes.len() - 2]
        && !matches!(last, 'l' | 's' | 'z')
    {
        return Some(stem[..stem.len() - 1].to_string());
    }

    Some(stem.to_string())
}
