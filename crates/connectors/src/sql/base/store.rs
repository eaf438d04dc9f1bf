use crate::sql::base::error::DbError;
use async_trait::async_trait;
use chrono::NaiveDate;
use model::records::row::{AffectedRow, RowId};

/// Storage seen by the remediator: one table with an id and a timezone column.
///
/// Implementations are driven strictly sequentially; no method is called
/// while another is still in flight.
#[async_trait]
pub trait TimezoneStore: Send {
    /// Rows whose timezone column equals one of `zones`. An empty `zones`
    /// slice matches nothing.
    async fn find_rows_with_zones(&mut self, zones: &[&str]) -> Result<Vec<AffectedRow>, DbError>;

    /// Opens the unit of work for a single row fix.
    async fn begin<'a>(&'a mut self) -> Result<Box<dyn ZoneTransaction + 'a>, DbError>;

    /// Local date of "now" converted through UTC into `zone`. Errors when the
    /// server does not recognise the name.
    async fn probe_zone(&mut self, zone: &str) -> Result<NaiveDate, DbError>;

    /// Releases the connection. Safe to call more than once.
    async fn disconnect(&mut self);
}

/// Update and read-back of one row. Dropping without `commit` rolls back.
#[async_trait]
pub trait ZoneTransaction: Send {
    /// Returns the number of rows the update touched.
    async fn update_zone(&mut self, id: &RowId, zone: &str) -> Result<u64, DbError>;

    /// Current value of the row's timezone column, `None` when the row is gone
    /// or the column is NULL.
    async fn read_zone(&mut self, id: &RowId) -> Result<Option<String>, DbError>;

    async fn commit(self: Box<Self>) -> Result<(), DbError>;
}
