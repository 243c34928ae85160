//! Read-back verification queries.

use std::fmt;

use visits_core::VisitRecord;

use crate::Result;
use crate::connection::DbHandle;
use crate::schema::VISITS_TABLE;

/// Reader facade for the visits table.
#[derive(Clone)]
pub struct DbReader {
    handle: DbHandle,
}

impl fmt::Debug for DbReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbReader").finish_non_exhaustive()
    }
}

impl DbReader {
    pub fn new(handle: DbHandle) -> Self {
        Self { handle }
    }

    /// Count rows currently in the visits table.
    pub async fn visits_count(&self) -> Result<u64> {
        self.handle.count_rows(VISITS_TABLE).await
    }

    /// Fetch every visit row, ordered by patient id.
    pub async fn fetch_visits(&self) -> Result<Vec<VisitRecord>> {
        self.handle.fetch_visits(VISITS_TABLE).await
    }
}
