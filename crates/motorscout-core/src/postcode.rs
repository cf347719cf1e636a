/// Normalise a UK postcode to upper case with a single space before the
/// inward code, e.g. `"sw1a1aa"` → `"SW1A 1AA"`.
///
/// Returns `None` for input that cannot be a postcode (empty, non-alphanumeric,
/// or outside the 5–7 character range once spaces are removed). Callers treat
/// `None` as "no location supplied" rather than an error.
#[must_use]
pub fn normalize_postcode(raw: &str) -> Option<String> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if !(5..=7).contains(&compact.len()) || !compact.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let (outward, inward) = compact.split_at(compact.len() - 3);
    Some(format!("{outward} {inward}"))
}
