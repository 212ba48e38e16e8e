//! Sort keys and multi-key stable sorting

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

/// Direction of one sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Descending,
    Ascending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Descending => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
        }
    }

    /// Marker appended to a sort button label
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Descending => "↓",
            SortDirection::Ascending => "↑",
        }
    }
}

/// A field a list kind can be sorted by
pub trait SortField: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every sortable field, in button order
    const ALL: &'static [Self];

    /// Stable identifier used in callback tokens
    fn key(self) -> &'static str;

    /// Button text
    fn label(self) -> &'static str {
        self.key()
    }

    fn parse(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }
}

/// Field type for list kinds that offer no sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoSort {}

impl SortField for NoSort {
    const ALL: &'static [Self] = &[];

    fn key(self) -> &'static str {
        match self {}
    }
}

/// Value of one item field, as seen by the sorter
///
/// `Missing` orders before every present value so items lacking a field
/// never have to be compared against items that have it.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Time(DateTime<Utc>),
}

impl SortValue {
    fn rank(&self) -> u8 {
        match self {
            SortValue::Missing => 0,
            SortValue::Bool(_) => 1,
            SortValue::Int(_) => 2,
            SortValue::Float(_) => 3,
            SortValue::Text(_) => 4,
            SortValue::Time(_) => 5,
        }
    }

    /// Total order over values: missing first, then by value
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Bool(a), SortValue::Bool(b)) => a.cmp(b),
            (SortValue::Int(a), SortValue::Int(b)) => a.cmp(b),
            (SortValue::Float(a), SortValue::Float(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Time(a), SortValue::Time(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<bool> for SortValue {
    fn from(value: bool) -> Self {
        SortValue::Bool(value)
    }
}

impl From<u64> for SortValue {
    fn from(value: u64) -> Self {
        SortValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        SortValue::Int(value)
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        SortValue::Float(value)
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        SortValue::Text(value.to_string())
    }
}

impl From<DateTime<Utc>> for SortValue {
    fn from(value: DateTime<Utc>) -> Self {
        SortValue::Time(value)
    }
}

impl<T: Into<SortValue>> From<Option<T>> for SortValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SortValue::Missing, Into::into)
    }
}

/// Sort `items` by every `(field, direction)` pair of `keys`
///
/// The first pair has the highest precedence. Keys are applied from the
/// lowest precedence to the highest, each pass a stable sort, so ties on a
/// key keep the order established by the keys after it.
pub fn sort_by_keys<T, F, V>(items: &mut [T], keys: &[(F, SortDirection)], value: V)
where
    F: SortField,
    V: Fn(&T, F) -> SortValue,
{
    for &(field, direction) in keys.iter().rev() {
        items.sort_by(|a, b| {
            let ord = value(a, field).compare(&value(b, field));
            match direction {
                SortDirection::Descending => ord.reverse(),
                SortDirection::Ascending => ord,
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Size,
        Name,
    }

    impl SortField for Field {
        const ALL: &'static [Self] = &[Field::Size, Field::Name];

        fn key(self) -> &'static str {
            match self {
                Field::Size => "size",
                Field::Name => "name",
            }
        }
    }

    fn value(item: &(Option<u64>, &'static str), field: Field) -> SortValue {
        match field {
            Field::Size => item.0.into(),
            Field::Name => item.1.into(),
        }
    }

    #[test]
    fn test_missing_sorts_before_present() {
        assert_eq!(SortValue::Missing.compare(&SortValue::Int(0)), Ordering::Less);
        assert_eq!(SortValue::Int(0).compare(&SortValue::Missing), Ordering::Greater);
        assert_eq!(SortValue::Missing.compare(&SortValue::Missing), Ordering::Equal);
        assert_eq!(SortValue::from(None::<u64>), SortValue::Missing);
    }

    #[test]
    fn test_float_order_is_total() {
        assert_eq!(SortValue::Float(0.5).compare(&SortValue::Float(1.5)), Ordering::Less);
        assert_eq!(SortValue::Float(f64::NAN).compare(&SortValue::Float(f64::NAN)), Ordering::Equal);
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(Field::parse("size"), Some(Field::Size));
        assert_eq!(Field::parse("bogus"), None);
        assert_eq!(NoSort::parse("size"), None);
        assert!(NoSort::ALL.is_empty());
    }

    #[test]
    fn test_descending_keeps_ties_in_input_order() {
        let mut items = vec![(Some(1), "a"), (Some(2), "b"), (Some(1), "c"), (None, "d")];
        sort_by_keys(&mut items, &[(Field::Size, SortDirection::Descending)], value);
        let names: Vec<_> = items.iter().map(|i| i.1).collect();
        assert_eq!(names, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_first_key_has_precedence() {
        let mut items = vec![(Some(1), "b"), (Some(2), "a"), (Some(1), "a"), (Some(2), "b")];
        let keys = [(Field::Size, SortDirection::Ascending), (Field::Name, SortDirection::Descending)];
        sort_by_keys(&mut items, &keys, value);
        assert_eq!(items, vec![(Some(1), "b"), (Some(1), "a"), (Some(2), "b"), (Some(2), "a")]);
    }

    #[test]
    fn test_direction_flip() {
        assert_eq!(SortDirection::Descending.flipped(), SortDirection::Ascending);
        assert_eq!(SortDirection::Ascending.flipped(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.arrow(), "↓");
    }
}
