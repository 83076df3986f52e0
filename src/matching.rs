/// True when `haystack` case-insensitively contains any of `needles`.
pub fn contains_any(haystack: &str, needles: &[String]) -> bool {
    if haystack.is_empty() {
        return false;
    }
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .filter(|needle| !needle.is_empty())
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

/// Substring containment in either direction, case-insensitive: `name`
/// contains the entry, or the entry contains `name`.
pub fn overlaps_any(name: &str, entries: &[String]) -> bool {
    if name.is_empty() {
        return false;
    }
    let name = name.to_lowercase();
    entries.iter().filter(|entry| !entry.is_empty()).any(|entry| {
        let entry = entry.to_lowercase();
        name.contains(&entry) || entry.contains(&name)
    })
}
