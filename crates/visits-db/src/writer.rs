//! Replace-mode write operations.

use std::fmt;

use visits_core::VisitRecord;

use crate::Result;
use crate::connection::DbHandle;
use crate::schema::visits_table;

/// Writer facade for the visits table.
#[derive(Clone)]
pub struct DbWriter {
    handle: DbHandle,
}

impl fmt::Debug for DbWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbWriter").finish_non_exhaustive()
    }
}

impl DbWriter {
    pub fn new(handle: DbHandle) -> Self {
        Self { handle }
    }

    /// Replace the visits table with `rows`: drop, recreate and insert
    /// inside one transaction. Returns the number of rows written.
    pub async fn replace_visits(&self, rows: &[VisitRecord]) -> Result<u64> {
        self.handle.replace_table(&visits_table(), rows).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "memory")]
    use visits_core::{MANAGED_ROWS, VM_ROWS};

    #[cfg(feature = "memory")]
    #[tokio::test]
    async fn writes_all_five_seed_rows() {
        let handle = DbHandle::memory();
        let writer = DbWriter::new(handle.clone());

        let written = writer.replace_visits(&VM_ROWS).await.unwrap();
        assert_eq!(written, 5);
    }

    #[cfg(feature = "memory")]
    #[tokio::test]
    async fn second_write_replaces_instead_of_appending() {
        let handle = DbHandle::memory();
        let writer = DbWriter::new(handle.clone());

        writer.replace_visits(&VM_ROWS).await.unwrap();
        writer.replace_visits(&MANAGED_ROWS).await.unwrap();

        assert_eq!(handle.count_rows("visits").await.unwrap(), 5);
        let rows = handle.fetch_visits("visits").await.unwrap();
        assert_eq!(rows, MANAGED_ROWS);
    }
}
