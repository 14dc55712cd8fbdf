use log::trace;
use serde_json::{Map, Value};

use crate::{
    error::Result,
    key::build_key,
    value::build_value,
    Headers, Mapping, Row, RowStream,
};

/// The object built from all the rows, keyed by composite key.
pub type ResultMap = Map<String, Value>;

/// Folds rows into a [`ResultMap`].
///
/// Without duplicate keys the last row seen for a key wins. With duplicate
/// keys every value is appended to a list under its key, in arrival order.
#[derive(Debug)]
pub struct Aggregator {
    mapping: Mapping,
    map: ResultMap,
    rows: usize,
}

impl Aggregator {
    pub fn new(mapping: Mapping) -> Aggregator {
        Aggregator {
            mapping,
            map: ResultMap::new(),
            rows: 0,
        }
    }

    pub fn apply(&mut self, headers: &Headers, row: &Row) {
        let key = build_key(
            headers,
            row,
            self.mapping.key_columns(),
            self.mapping.delimiter(),
        );
        let value = build_value(
            headers,
            row,
            self.mapping.value_columns(),
            self.mapping.duplicate_keys(),
        );

        trace!("{} => {}", key, value);

        if self.mapping.duplicate_keys() {
            let entry = self
                .map
                .entry(key)
                .or_insert_with(|| Value::Array(Vec::new()));

            if let Value::Array(list) = entry {
                list.push(value);
            }
        } else {
            self.map.insert(key, value);
        }

        self.rows += 1;
    }

    /// Drains `stream` into the map, stopping at the first error. Returns the
    /// number of rows applied from this stream.
    pub fn consume<S: RowStream>(&mut self, stream: S) -> Result<usize> {
        let headers = stream.headers().clone();
        let before = self.rows;

        for result in stream {
            self.apply(&headers, &result?);
        }

        Ok(self.rows - before)
    }

    /// Total rows applied so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(self) -> ResultMap {
        self.map
    }
}

#[cfg(test)]
mod tests {
    use super::Aggregator;
    use crate::{mock::MockStream, Error, Mapping, Row};
    use serde_json::json;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn people() -> MockStream<std::vec::IntoIter<crate::RowResult>> {
        MockStream::from_rows(
            vec![
                Ok(Row::from(vec!["Name", "SSN"])),
                Ok(Row::from(vec!["Bill", "111-22-3333"])),
                Ok(Row::from(vec!["Sue", "444-55-6666"])),
            ]
            .into_iter(),
        )
        .unwrap()
    }

    fn sports() -> MockStream<std::vec::IntoIter<crate::RowResult>> {
        MockStream::from_rows(
            vec![
                Ok(Row::from(vec!["Name", "Sport"])),
                Ok(Row::from(vec!["Joe", "Soccer"])),
                Ok(Row::from(vec!["Sally", "Rugby"])),
                Ok(Row::from(vec!["Joe", "Boxing"])),
                Ok(Row::from(vec!["Sally", "Sailing"])),
            ]
            .into_iter(),
        )
        .unwrap()
    }

    #[test]
    fn test_whole_rows() {
        let mut agg = Aggregator::new(Mapping::new(names(&["Name"]), vec![], None, false).unwrap());

        assert_eq!(agg.consume(people()).unwrap(), 2);
        assert_eq!(
            serde_json::Value::Object(agg.finish()),
            json!({
                "Bill": {"Name": "Bill", "SSN": "111-22-3333"},
                "Sue": {"Name": "Sue", "SSN": "444-55-6666"},
            })
        );
    }

    #[test]
    fn test_single_value() {
        let mut agg = Aggregator::new(
            Mapping::new(names(&["Name"]), names(&["SSN"]), None, false).unwrap(),
        );

        agg.consume(people()).unwrap();

        assert_eq!(
            serde_json::Value::Object(agg.finish()),
            json!({"Bill": "111-22-3333", "Sue": "444-55-6666"})
        );
    }

    #[test]
    fn test_last_row_wins() {
        let mut agg = Aggregator::new(
            Mapping::new(names(&["Name"]), names(&["Sport"]), None, false).unwrap(),
        );

        assert_eq!(agg.consume(sports()).unwrap(), 4);

        let map = agg.finish();

        assert_eq!(map.len(), 2);
        assert_eq!(map["Joe"], json!("Boxing"));
        assert_eq!(map["Sally"], json!("Sailing"));
    }

    #[test]
    fn test_duplicate_keys() {
        let mut agg = Aggregator::new(
            Mapping::new(names(&["Name"]), names(&["Sport"]), None, true).unwrap(),
        );

        agg.consume(sports()).unwrap();

        assert_eq!(
            serde_json::Value::Object(agg.finish()),
            json!({
                "Joe": ["Soccer", "Boxing"],
                "Sally": ["Rugby", "Sailing"],
            })
        );
    }

    #[test]
    fn test_keys_keep_arrival_order() {
        let mut agg = Aggregator::new(
            Mapping::new(names(&["Name"]), names(&["Sport"]), None, true).unwrap(),
        );

        agg.consume(sports()).unwrap();

        let keys: Vec<_> = agg.finish().keys().cloned().collect();

        assert_eq!(keys, vec!["Joe", "Sally"]);
    }

    #[test]
    fn test_two_streams_different_columns() {
        let mut agg = Aggregator::new(
            Mapping::new(names(&["Name"]), names(&["Sport"]), None, true).unwrap(),
        );

        agg.consume(sports()).unwrap();
        agg.consume(
            MockStream::from_rows(
                vec![
                    Ok(Row::from(vec!["Age", "Sport", "Name"])),
                    Ok(Row::from(vec!["31", "Chess", "Joe"])),
                    Ok(Row::from(vec!["22", "Golf", "Ann"])),
                ]
                .into_iter(),
            )
            .unwrap(),
        )
        .unwrap();

        assert_eq!(agg.rows(), 6);
        assert_eq!(
            serde_json::Value::Object(agg.finish()),
            json!({
                "Joe": ["Soccer", "Boxing", "Chess"],
                "Sally": ["Rugby", "Sailing"],
                "Ann": ["Golf"],
            })
        );
    }

    #[test]
    fn test_missing_key_column() {
        let mut agg = Aggregator::new(
            Mapping::new(names(&["Team"]), names(&["Sport"]), None, false).unwrap(),
        );

        agg.consume(sports()).unwrap();

        assert_eq!(
            serde_json::Value::Object(agg.finish()),
            json!({"": "Sailing"})
        );
    }

    #[test]
    fn test_stops_at_error() {
        let mut agg = Aggregator::new(
            Mapping::new(names(&["Name"]), names(&["SSN"]), None, false).unwrap(),
        );
        let stream = MockStream::from_rows(
            vec![
                Ok(Row::from(vec!["Name", "SSN"])),
                Ok(Row::from(vec!["Bill", "111-22-3333"])),
                Err(Error::Config("broken".to_string())),
                Ok(Row::from(vec!["Sue", "444-55-6666"])),
            ]
            .into_iter(),
        )
        .unwrap();

        match agg.consume(stream) {
            Err(Error::Config(msg)) => assert_eq!(msg, "broken"),
            _ => panic!("expected the stream error"),
        }

        assert_eq!(agg.rows(), 1);
    }
}
