use crate::{error::Result, Aggregator, Headers, RowResult};

/// A lazy, one pass sequence of rows that all share the same headers. Every
/// row source in the crate implements it, so the aggregation doesn't care
/// whether rows come from a file, a stream or memory.
pub trait RowStream: IntoIterator<Item = RowResult> {
    /// Headers shared by every row of this stream.
    fn headers(&self) -> &Headers;

    /// Feeds every row of the stream into `aggregator`. Returns how many rows
    /// were applied.
    fn aggregate(self, aggregator: &mut Aggregator) -> Result<usize>
    where
        Self: Sized,
    {
        aggregator.consume(self)
    }
}
