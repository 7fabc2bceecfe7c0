//! Field filters.

/// A collection item with filterable text fields.
pub trait Filterable {
    /// Closed set of filterable fields.
    type Field: Copy;

    /// Text of `field` on this item.
    fn filter_text(&self, field: Self::Field) -> &str;

    /// Whether `field` matches by equality rather than by substring.
    fn is_exact(field: Self::Field) -> bool;
}

/// Keeps the items matching every present criterion, in their original order.
///
/// Criteria without a value are ignored; every other criterion applies, an
/// empty value included. Exact fields compare case-insensitively for
/// equality; the others match when the item text contains the value,
/// ignoring case.
pub fn filter<T: Filterable>(items: Vec<T>, criteria: &[(T::Field, Option<&str>)]) -> Vec<T> {
    let active: Vec<(T::Field, String)> = criteria
        .iter()
        .filter_map(|(field, value)| value.map(|v| (*field, v.to_lowercase())))
        .collect();

    if active.is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| {
            active.iter().all(|(field, wanted)| {
                let text = item.filter_text(*field).to_lowercase();
                if T::is_exact(*field) {
                    text == *wanted
                } else {
                    text.contains(wanted.as_str())
                }
            })
        })
        .collect()
}
