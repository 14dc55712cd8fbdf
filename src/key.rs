//! Composite key construction
use crate::{Headers, Row};

/// Delimiter used to join key columns when none is given.
pub const DEFAULT_DELIMITER: &str = "_";

/// Joins the values of `columns` in `row`, in order, with `delimiter`.
///
/// A column that the row doesn't have contributes an empty string, so
/// sources lacking one of the key columns still produce a key.
pub fn build_key<S: AsRef<str>>(headers: &Headers, row: &Row, columns: &[S], delimiter: &str) -> String {
    let mut key = String::new();

    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            key.push_str(delimiter);
        }

        key.push_str(headers.get_field(row, column.as_ref()).unwrap_or(""));
    }

    key
}

#[cfg(test)]
mod tests {
    use super::{build_key, DEFAULT_DELIMITER};
    use crate::{Headers, Row};

    fn people() -> (Headers, Row) {
        (
            Headers::from_row(Row::from(vec!["First", "Last", "SSN"])),
            Row::from(vec!["Bill", "Smith", "111-22-3333"]),
        )
    }

    #[test]
    fn test_single_column() {
        let (h, r) = people();

        assert_eq!(build_key(&h, &r, &["First"], DEFAULT_DELIMITER), "Bill");
    }

    #[test]
    fn test_composite_key() {
        let (h, r) = people();

        assert_eq!(build_key(&h, &r, &["First", "Last"], DEFAULT_DELIMITER), "Bill_Smith");
        assert_eq!(build_key(&h, &r, &["First", "Last"], "-"), "Bill-Smith");
        assert_eq!(build_key(&h, &r, &["Last", "First"], ""), "SmithBill");
    }

    #[test]
    fn test_missing_column_is_empty() {
        let (h, r) = people();

        assert_eq!(build_key(&h, &r, &["First", "Middle", "Last"], "_"), "Bill__Smith");
        assert_eq!(build_key(&h, &r, &["Middle"], "_"), "");
    }

    #[test]
    fn test_is_pure() {
        let (h, r) = people();
        let columns = vec!["First".to_string(), "Last".to_string()];

        let first = build_key(&h, &r, &columns, "_");
        let second = build_key(&h, &r, &columns, "_");

        assert_eq!(first, second);
        assert_eq!(r, Row::from(vec!["Bill", "Smith", "111-22-3333"]));
    }
}
