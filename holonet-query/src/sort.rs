//! Stable single-field sorting.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Value an item exposes for one sort field.
#[derive(Clone, Copy, Debug)]
pub enum SortKey<'a> {
    /// Case-insensitive text
    Text(&'a str),
    /// Number as text, possibly with thousands separators or `"unknown"`
    Numeric(&'a str),
    /// Integer
    Integer(i64),
}

/// A collection item with sortable fields.
pub trait Sortable {
    /// Closed set of sort fields.
    type Field: Copy;

    /// Sort value of `field` on this item.
    fn sort_key(&self, field: Self::Field) -> SortKey<'_>;
}

/// Normalized key, computed once per item.
enum Key {
    Text(String),
    Number(Option<f64>),
    Integer(i64),
}

impl From<SortKey<'_>> for Key {
    fn from(key: SortKey<'_>) -> Self {
        match key {
            SortKey::Text(s) => Key::Text(s.to_lowercase()),
            SortKey::Numeric(s) => Key::Number(parse_number(s)),
            SortKey::Integer(n) => Key::Integer(n),
        }
    }
}

/// Parses a measurement such as `"1,358"`; `None` when not a finite number.
fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn compare(a: &Key, b: &Key, order: SortOrder) -> Ordering {
    match (a, b) {
        (Key::Text(x), Key::Text(y)) => order.apply(x.cmp(y)),
        (Key::Integer(x), Key::Integer(y)) => order.apply(x.cmp(y)),
        (Key::Number(Some(x)), Key::Number(Some(y))) => order.apply(x.total_cmp(y)),
        // Unknown numbers go last whichever the direction.
        (Key::Number(None), Key::Number(Some(_))) => Ordering::Greater,
        (Key::Number(Some(_)), Key::Number(None)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// Sorts items on one field. Items with equal keys keep their relative order.
pub fn sort<T: Sortable>(items: Vec<T>, field: T::Field, order: SortOrder) -> Vec<T> {
    let mut keyed: Vec<(Key, T)> = items
        .into_iter()
        .map(|item| (Key::from(item.sort_key(field)), item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare(a, b, order));
    keyed.into_iter().map(|(_, item)| item).collect()
}
