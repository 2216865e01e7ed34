//! Medication rows: bulk insert and name lookup

use crate::config::IngestPolicy;
use crate::db::{Database, contains_pattern};
use crate::error::Result;
use medimate_types::{MedicationRecord, NewMedication};

impl Database {
    /// Insert a batch in one transaction. Returns the number of rows written.
    ///
    /// With `IngestPolicy::UpsertByName` a record whose exact name is already
    /// stored overwrites the oldest such row instead of adding a new one.
    pub fn insert_medications(
        &self,
        records: &[NewMedication],
        policy: IngestPolicy,
    ) -> Result<usize> {
        let _guard = self.write_guard();
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let mut written = 0;
        {
            let mut insert = tx.prepare(
                "INSERT INTO medications
                 (name, description, side_effects, dosage, indications,
                  contraindications, pharmacokinetics, interactions)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            let mut update = tx.prepare(
                "UPDATE medications
                 SET description = ?2, side_effects = ?3, dosage = ?4, indications = ?5,
                     contraindications = ?6, pharmacokinetics = ?7, interactions = ?8
                 WHERE id = (SELECT id FROM medications WHERE name = ?1 ORDER BY id LIMIT 1)",
            )?;

            for m in records {
                let params = rusqlite::params![
                    m.name,
                    m.description,
                    m.side_effects,
                    m.dosage,
                    m.indications,
                    m.contraindications,
                    m.pharmacokinetics,
                    m.interactions,
                ];
                let updated = match policy {
                    IngestPolicy::Append => 0,
                    IngestPolicy::UpsertByName => update.execute(params)?,
                };
                if updated == 0 {
                    insert.execute(params)?;
                }
                written += 1;
            }
        }

        tx.commit()?;
        Ok(written)
    }

    /// All medications whose name contains `substr`, in insertion order.
    ///
    /// `substr` is bound as a parameter; LIKE wildcards in it match literally.
    pub fn query_medications_by_name(&self, substr: &str) -> Result<Vec<MedicationRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, description, side_effects, dosage, indications,
                    contraindications, pharmacokinetics, interactions
             FROM medications
             WHERE name LIKE ?1 ESCAPE '\\'
             ORDER BY id",
        )?;

        let rows = stmt
            .query_map(rusqlite::params![contains_pattern(substr)], row_to_medication)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn medication_count(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM medications", [], |r| r.get(0))?;
        Ok(count)
    }
}

fn row_to_medication(row: &rusqlite::Row) -> rusqlite::Result<MedicationRecord> {
    Ok(MedicationRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        side_effects: row.get(3)?,
        dosage: row.get(4)?,
        indications: row.get(5)?,
        contraindications: row.get(6)?,
        pharmacokinetics: row.get(7)?,
        interactions: row.get(8)?,
    })
}
