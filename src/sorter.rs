use std::cmp::Ordering;

use tracing::trace;

use crate::domain::{PageableError, Row, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// A value reduced to its comparable form.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

/// Reduces a cell value to its sort key.
///
/// Numeric-looking strings become numbers, other strings are trimmed and
/// lower-cased, null maps to the empty string. Booleans keep the upstream
/// mapping of true to "0" and false to "1". Structured values are rejected.
pub fn normalize(value: &Value) -> Result<SortKey, PageableError> {
    match value {
        Value::Null => Ok(SortKey::Text(String::new())),
        Value::Bool(true) => Ok(SortKey::Text("0".to_string())),
        Value::Bool(false) => Ok(SortKey::Text("1".to_string())),
        Value::Number(n) => Ok(SortKey::Number(*n)),
        Value::Text(s) => {
            let trimmed = s.trim();
            match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(SortKey::Number(n)),
                _ => Ok(SortKey::Text(trimmed.to_lowercase())),
            }
        }
        Value::List(_) | Value::Record(_) => {
            Err(PageableError::UnsortableValue { kind: value.kind() })
        }
    }
}

/// Compares two sort keys. A mixed number/text pair is compared on the
/// string form of both sides.
pub fn compare(a: &SortKey, b: &SortKey) -> Ordering {
    match (a, b) {
        (SortKey::Number(x), SortKey::Number(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        (x, y) => stringify(x).cmp(&stringify(y)),
    }
}

fn stringify(key: &SortKey) -> String {
    match key {
        SortKey::Number(n) => n.to_string(),
        SortKey::Text(s) => s.clone(),
    }
}

/// Reorders the row index by the given field. Rows missing the field read as
/// null. Every key is normalized before the ordering is touched, so an
/// unsortable value leaves the index as it was.
pub fn sort_rows(
    data: &[Row],
    rows: &mut Vec<usize>,
    field: &str,
    direction: SortDirection,
) -> Result<(), PageableError> {
    let mut keyed: Vec<(usize, SortKey)> = Vec::with_capacity(rows.len());
    for &idx in rows.iter() {
        let value = data[idx].get(field).unwrap_or(&Value::Null);
        keyed.push((idx, normalize(value)?));
    }

    keyed.sort_by(|(_, a), (_, b)| match direction {
        SortDirection::Ascending => compare(a, b),
        SortDirection::Descending => compare(b, a),
    });

    trace!("Sorted {} rows by \"{field}\" ({direction:?})", keyed.len());
    *rows = keyed.into_iter().map(|(idx, _)| idx).collect();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(field: &str, value: Value) -> Row {
        let mut row = Row::new();
        row.insert(field.to_string(), value);
        row
    }

    #[test]
    fn numeric_strings_normalize_to_numbers() {
        assert_eq!(
            normalize(&Value::Text("10".to_string())).unwrap(),
            SortKey::Number(10.0)
        );
        assert_eq!(normalize(&Value::Number(10.0)).unwrap(), SortKey::Number(10.0));
        assert_eq!(
            normalize(&Value::Text(" 2.5 ".to_string())).unwrap(),
            SortKey::Number(2.5)
        );
    }

    #[test]
    fn text_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize(&Value::Text("Foo ".to_string())).unwrap(),
            normalize(&Value::Text("foo".to_string())).unwrap()
        );
    }

    #[test]
    fn null_normalizes_to_empty_string() {
        assert_eq!(normalize(&Value::Null).unwrap(), SortKey::Text(String::new()));
    }

    #[test]
    fn booleans_keep_the_inverted_mapping() {
        assert_eq!(
            normalize(&Value::Bool(true)).unwrap(),
            SortKey::Text("0".to_string())
        );
        assert_eq!(
            normalize(&Value::Bool(false)).unwrap(),
            SortKey::Text("1".to_string())
        );
    }

    #[test]
    fn structured_values_are_rejected() {
        let err = normalize(&Value::List(vec![Value::Number(1.0)])).unwrap_err();
        assert!(matches!(err, PageableError::UnsortableValue { kind: "list" }));

        let err = normalize(&Value::Record(vec![])).unwrap_err();
        assert!(matches!(err, PageableError::UnsortableValue { kind: "record" }));
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(
            compare(&SortKey::Number(2.0), &SortKey::Number(10.0)),
            Ordering::Less
        );
    }

    #[test]
    fn mixed_pairs_compare_as_strings() {
        // "2" vs "10x" lexicographically: "10x" sorts first
        assert_eq!(
            compare(&SortKey::Number(2.0), &SortKey::Text("10x".to_string())),
            Ordering::Greater
        );
    }

    #[test]
    fn sorts_rows_by_field() {
        let data = vec![
            row("age", Value::Number(34.0)),
            row("age", Value::Text("7".to_string())),
            row("age", Value::Number(28.0)),
        ];
        let mut rows: Vec<usize> = vec![0, 1, 2];

        sort_rows(&data, &mut rows, "age", SortDirection::Ascending).unwrap();
        assert_eq!(rows, vec![1, 2, 0]);

        sort_rows(&data, &mut rows, "age", SortDirection::Descending).unwrap();
        assert_eq!(rows, vec![0, 2, 1]);
    }

    #[test]
    fn missing_field_reads_as_null() {
        let data = vec![row("name", Value::Text("bob".to_string())), Row::new()];
        let mut rows: Vec<usize> = vec![0, 1];

        sort_rows(&data, &mut rows, "name", SortDirection::Ascending).unwrap();
        // Empty string sorts before "bob"
        assert_eq!(rows, vec![1, 0]);
    }

    #[test]
    fn unsortable_value_leaves_index_untouched() {
        let data = vec![
            row("x", Value::Number(2.0)),
            row("x", Value::List(vec![])),
            row("x", Value::Number(1.0)),
        ];
        let mut rows: Vec<usize> = vec![2, 0, 1];

        let result = sort_rows(&data, &mut rows, "x", SortDirection::Ascending);
        assert!(result.is_err());
        assert_eq!(rows, vec![2, 0, 1]);
    }
}
