//! Referential integrity checks over the denormalized ancestor keys.
//!
//! A row's parent must exist, and every ancestor key the row carries beyond
//! its parent must equal the parent's key for the same ancestor. Checked
//! level by level, this makes every full chain consistent.

use crate::error::{DataError, Result};
use crate::schema::EntityKind;
use crate::tree::TerritorialData;

impl TerritorialData {
    /// Every orphaned or contradictory reference, in dependency order.
    ///
    /// Problems are reported, never repaired.
    pub fn check_integrity(&self) -> Vec<DataError> {
        let mut problems = Vec::new();
        for kind in EntityKind::ALL {
            let Some(parent_kind) = kind.parent() else {
                continue;
            };
            let table = kind.table_name();

            for row in self.rows(kind) {
                let Some(parent_id) = row.reference(parent_kind) else {
                    continue;
                };
                let Some(parent) = self.get(parent_kind, parent_id) else {
                    problems.push(DataError::OrphanedReference {
                        table,
                        id: row.id,
                        column: parent_kind.foreign_key_column(),
                        value: parent_id,
                    });
                    continue;
                };

                for &ancestor in parent_kind.ancestors() {
                    if let (Some(expected), Some(found)) =
                        (parent.reference(ancestor), row.reference(ancestor))
                    {
                        if expected != found {
                            problems.push(DataError::InconsistentReference {
                                table,
                                id: row.id,
                                column: ancestor.foreign_key_column(),
                                expected,
                                found,
                            });
                        }
                    }
                }
            }
        }
        problems
    }

    /// Fail with the first integrity problem, if any.
    pub fn verify_integrity(&self) -> Result<()> {
        match self.check_integrity().into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(()),
        }
    }
}
