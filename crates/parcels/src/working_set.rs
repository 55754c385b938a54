//! The in-memory working set of parcel records, newest first.

use bevy::prelude::*;

use crate::record::ParcelRecord;

/// Records currently on screen. Index 0 is always the most recently added.
#[derive(Resource, Debug, Default, Clone)]
pub struct ParcelList {
    records: Vec<ParcelRecord>,
}

impl ParcelList {
    /// Replace the whole set with a freshly loaded, newest-first page.
    pub fn replace(&mut self, records: Vec<ParcelRecord>) {
        self.records = records;
    }

    /// Put a just-created record at the head of the list.
    pub fn prepend(&mut self, record: ParcelRecord) {
        self.records.insert(0, record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[ParcelRecord] {
        &self.records
    }

    pub fn head(&self) -> Option<&ParcelRecord> {
        self.records.first()
    }

    pub fn get(&self, index: usize) -> Option<&ParcelRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NewParcel;

    fn record(id: &str) -> ParcelRecord {
        ParcelRecord::from_new(
            NewParcel {
                ada_no: id.to_string(),
                parsel_no: "1".to_string(),
                il: None,
                ilce: None,
                mahalle: None,
                coordinates: None,
            },
            id.to_string(),
            format!("2024-01-01T00:00:0{id}Z"),
        )
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let mut list = ParcelList::default();
        list.replace(vec![record("2"), record("1")]);
        list.prepend(record("3"));
        let ids: Vec<&str> = list.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
        assert_eq!(list.head().map(|r| r.id.as_str()), Some("3"));
    }

    #[test]
    fn test_clear_and_empty() {
        let mut list = ParcelList::default();
        assert!(list.is_empty());
        list.prepend(record("1"));
        assert_eq!(list.len(), 1);
        list.clear();
        assert!(list.is_empty());
        assert!(list.get(0).is_none());
    }
}
