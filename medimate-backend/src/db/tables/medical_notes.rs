//! Medical notes keyed by topic

use crate::db::{Database, contains_pattern};
use crate::error::Result;
use medimate_types::MedicalNote;

impl Database {
    pub fn insert_note(&self, topic: &str, content: &str) -> Result<MedicalNote> {
        let _guard = self.write_guard();
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO medical_notes (topic, content) VALUES (?1, ?2)",
            rusqlite::params![topic, content],
        )?;
        Ok(MedicalNote {
            id: conn.last_insert_rowid(),
            topic: topic.to_string(),
            content: content.to_string(),
        })
    }

    /// Content of every note whose topic contains `substr`, in insertion order
    pub fn query_notes_by_topic(&self, substr: &str) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT content FROM medical_notes
             WHERE topic LIKE ?1 ESCAPE '\\'
             ORDER BY id",
        )?;
        let contents = stmt
            .query_map(rusqlite::params![contains_pattern(substr)], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(contents)
    }

    pub fn list_notes(&self) -> Result<Vec<MedicalNote>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, topic, content FROM medical_notes ORDER BY id")?;
        let notes = stmt
            .query_map([], |row| {
                Ok(MedicalNote {
                    id: row.get(0)?,
                    topic: row.get(1)?,
                    content: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    pub fn note_count(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM medical_notes", [], |r| r.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_by_topic_in_insertion_order() {
        let db = Database::open(":memory:").unwrap();
        db.insert_note("diabetes", "Monitor glucose.").unwrap();
        db.insert_note("hypertension", "Reduce salt.").unwrap();
        db.insert_note("diabetes care", "Check feet.").unwrap();

        let contents = db.query_notes_by_topic("diabetes").unwrap();
        assert_eq!(contents, vec!["Monitor glucose.", "Check feet."]);
    }

    #[test]
    fn test_insert_note_assigns_ids() {
        let db = Database::open(":memory:").unwrap();
        let a = db.insert_note("asthma", "Use a spacer.").unwrap();
        let b = db.insert_note("asthma", "Rinse after steroids.").unwrap();
        assert!(b.id > a.id);

        let all = db.list_notes().unwrap();
        assert_eq!(all, vec![a, b]);
        assert_eq!(db.note_count().unwrap(), 2);
    }

    #[test]
    fn test_unknown_topic_is_empty() {
        let db = Database::open(":memory:").unwrap();
        db.insert_note("asthma", "Use a spacer.").unwrap();
        assert!(db.query_notes_by_topic("gout").unwrap().is_empty());
    }
}
