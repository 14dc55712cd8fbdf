//! Provides a source of data from a vector, used in testing
use crate::{Headers, RowResult, RowStream};

#[derive(Debug, PartialEq)]
pub enum BuildError {
    EmptyIterator,
    FailedHeader,
}

pub struct MockStream<I> {
    iter: I,
    headers: Headers,
}

impl<I> MockStream<I>
where
    I: Iterator<Item = RowResult>,
{
    pub fn new(iter: I, headers: Headers) -> MockStream<I> {
        MockStream { iter, headers }
    }

    /// Uses the first row of `iter` as headers and the rest as data.
    pub fn from_rows(mut iter: I) -> Result<MockStream<I>, BuildError> {
        match iter.next() {
            Some(Ok(row)) => Ok(MockStream::new(iter, Headers::from_row(row))),
            Some(Err(_)) => Err(BuildError::FailedHeader),
            None => Err(BuildError::EmptyIterator),
        }
    }
}

impl<I> IntoIterator for MockStream<I>
where
    I: Iterator<Item = RowResult>,
{
    type Item = RowResult;

    type IntoIter = I;

    fn into_iter(self) -> Self::IntoIter {
        self.iter
    }
}

impl<I> RowStream for MockStream<I>
where
    I: Iterator<Item = RowResult>,
{
    fn headers(&self) -> &Headers {
        &self.headers
    }
}
