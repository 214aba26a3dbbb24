//! Flat-file event store.
//!
//! Events live in memory as an insertion-ordered list mirrored by a CSV file
//! (see [`codec`]). Every mutation writes to disk first and only touches
//! memory once the write succeeded, so a failed write never leaves the two
//! out of sync.

pub mod codec;
mod file;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use log::{debug, error, warn};

use crate::config::DaybookConfig;
use crate::date::CalendarDate;
use crate::error::{DaybookError, DaybookResult};
use crate::event::Event;

pub struct EventStore {
    path: PathBuf,
    events: Vec<Event>,
    strict_load: bool,
    loaded: bool,
}

impl EventStore {
    /// A store backed by `path`. Nothing is read until [`Self::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        EventStore {
            path: path.into(),
            events: Vec::new(),
            strict_load: true,
            loaded: false,
        }
    }

    pub fn from_config(config: &DaybookConfig) -> Self {
        Self::new(config.events_path()).with_strict_load(config.strict_load)
    }

    /// In strict mode (the default) one malformed record fails the whole
    /// load. Otherwise malformed records are logged and skipped.
    pub fn with_strict_load(mut self, strict: bool) -> Self {
        self.strict_load = strict;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory events with the file's content, creating an
    /// empty file if there is none. On error, memory is left unchanged.
    pub fn load(&mut self) -> DaybookResult<()> {
        let created = self.report("create", file::ensure_exists(&self.path))?;
        if created {
            debug!("Created empty events file {}", self.path.display());
            self.events.clear();
            self.loaded = true;
            return Ok(());
        }

        let content = self.report("read", std::fs::read_to_string(&self.path))?;

        let mut events = Vec::new();
        for (line, record) in codec::split_records(&content) {
            if record.trim().is_empty() {
                continue;
            }

            match codec::decode(&record) {
                Ok(event) => events.push(event),
                Err(reason) if self.strict_load => {
                    error!("{}:{}: {}", self.path.display(), line, reason);
                    return Err(DaybookError::parse(line, reason));
                }
                Err(reason) => {
                    warn!("Skipping {}:{}: {}", self.path.display(), line, reason);
                }
            }
        }

        debug!("Loaded {} events from {}", events.len(), self.path.display());
        self.events = events;
        self.loaded = true;
        Ok(())
    }

    /// Append a new event to the file, then to memory. An empty description
    /// is rejected since it could not be read back.
    pub fn add(&mut self, date: CalendarDate, description: impl Into<String>) -> DaybookResult<Event> {
        let event = Self::new_event(date, description)?;

        self.report("append to", file::append_line(&self.path, &codec::encode(&event)))?;
        self.events.push(event.clone());

        Ok(event)
    }

    /// Remove every event on `date` and rewrite the file. Returns how many
    /// events were removed.
    pub fn remove(&mut self, date: CalendarDate) -> DaybookResult<usize> {
        self.ensure_loaded()?;

        let retained = self.events_except(date);
        let removed = self.events.len() - retained.len();

        self.rewrite(retained)?;
        Ok(removed)
    }

    /// Replace every event on `date` with a single event on `new_date`, in one
    /// file rewrite.
    pub fn replace(
        &mut self,
        date: CalendarDate,
        new_date: CalendarDate,
        description: impl Into<String>,
    ) -> DaybookResult<Event> {
        let event = Self::new_event(new_date, description)?;
        self.ensure_loaded()?;
        let mut events = self.events_except(date);
        events.push(event.clone());

        self.rewrite(events)?;
        Ok(event)
    }

    /// All events on `date`, in insertion order.
    pub fn events_for_date(&self, date: CalendarDate) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| e.date() == date)
            .cloned()
            .collect()
    }

    pub fn first_match_for_date(&self, date: CalendarDate) -> Option<Event> {
        self.events.iter().find(|e| e.date() == date).cloned()
    }

    /// The most recently added event on `date`.
    pub fn last_match_for_date(&self, date: CalendarDate) -> Option<Event> {
        self.events.iter().rev().find(|e| e.date() == date).cloned()
    }

    /// Events with `from <= date <= to`, in insertion order.
    pub fn events_between(&self, from: CalendarDate, to: CalendarDate) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| (from..=to).contains(&e.date()))
            .cloned()
            .collect()
    }

    /// Dates that carry at least one event.
    pub fn event_dates(&self) -> BTreeSet<CalendarDate> {
        self.events.iter().map(Event::date).collect()
    }

    pub fn all_events(&self) -> Vec<Event> {
        self.events.clone()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn new_event(date: CalendarDate, description: impl Into<String>) -> DaybookResult<Event> {
        let description = description.into();
        if description.is_empty() {
            return Err(DaybookError::EmptyDescription);
        }
        Ok(Event::new(date, description))
    }

    // Rewriting from a never-loaded store would drop whatever is on disk
    fn ensure_loaded(&mut self) -> DaybookResult<()> {
        if self.loaded { Ok(()) } else { self.load() }
    }

    fn events_except(&self, date: CalendarDate) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| e.date() != date)
            .cloned()
            .collect()
    }

    fn rewrite(&mut self, events: Vec<Event>) -> DaybookResult<()> {
        let content: String = events
            .iter()
            .map(|e| codec::encode(e) + "\n")
            .collect();

        self.report("rewrite", file::write_atomic(&self.path, &content))?;
        debug!("Wrote {} events to {}", events.len(), self.path.display());

        self.events = events;
        Ok(())
    }

    fn report<T>(&self, action: &str, result: std::io::Result<T>) -> DaybookResult<T> {
        result.map_err(|e| {
            error!("Failed to {} {}: {}", action, self.path.display(), e);
            DaybookError::Io(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn date(day: u8, month: u8, year: i32) -> CalendarDate {
        CalendarDate::new(day, month, year).unwrap()
    }

    fn temp_store() -> (tempfile::TempDir, EventStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::new(dir.path().join("events.csv"));
        (dir, store)
    }

    #[test]
    fn test_load_creates_missing_file() {
        let (dir, mut store) = temp_store();
        store.load().unwrap();

        assert!(store.is_empty());
        assert!(dir.path().join("events.csv").exists());
    }

    #[test]
    fn test_add_then_load_roundtrip() {
        let (_dir, mut store) = temp_store();
        store.load().unwrap();
        store.add(date(15, 3, 2024), "Meeting").unwrap();

        let mut reloaded = EventStore::new(store.path());
        reloaded.load().unwrap();

        assert_eq!(
            reloaded.all_events(),
            vec![Event::new(date(15, 3, 2024), "Meeting")]
        );
    }

    #[test]
    fn test_remove_clears_memory_and_file() {
        let (_dir, mut store) = temp_store();
        store.load().unwrap();
        store.add(date(15, 3, 2024), "Meeting").unwrap();
        store.add(date(16, 3, 2024), "Gym").unwrap();
        store.add(date(15, 3, 2024), "Dinner").unwrap();

        assert_eq!(store.remove(date(15, 3, 2024)).unwrap(), 2);

        assert!(store.events_for_date(date(15, 3, 2024)).is_empty());
        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "16-03-2024,Gym\n");
    }

    #[test]
    fn test_remove_before_load_keeps_other_events() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "01-01-2024,A\n02-01-2024,B\n").unwrap();

        let mut store = EventStore::new(store.path());
        assert_eq!(store.remove(date(1, 1, 2024)).unwrap(), 1);

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "02-01-2024,B\n");
    }

    #[test]
    fn test_queries_preserve_insertion_order() {
        let (_dir, mut store) = temp_store();
        store.load().unwrap();
        store.add(date(10, 5, 2024), "first").unwrap();
        store.add(date(1, 5, 2024), "early").unwrap();
        store.add(date(10, 5, 2024), "second").unwrap();
        store.add(date(20, 5, 2024), "late").unwrap();

        let on_tenth: Vec<String> = store
            .events_for_date(date(10, 5, 2024))
            .iter()
            .map(|e| e.description().to_string())
            .collect();
        assert_eq!(on_tenth, vec!["first", "second"]);

        assert_eq!(store.first_match_for_date(date(10, 5, 2024)).unwrap().description(), "first");
        assert_eq!(store.last_match_for_date(date(10, 5, 2024)).unwrap().description(), "second");
        assert!(store.first_match_for_date(date(11, 5, 2024)).is_none());
        assert!(store.events_for_date(date(11, 5, 2024)).is_empty());

        let range: Vec<String> = store
            .events_between(date(1, 5, 2024), date(10, 5, 2024))
            .iter()
            .map(|e| e.description().to_string())
            .collect();
        assert_eq!(range, vec!["first", "early", "second"]);

        assert_eq!(
            store.event_dates().into_iter().collect::<Vec<_>>(),
            vec![date(1, 5, 2024), date(10, 5, 2024), date(20, 5, 2024)]
        );
    }

    #[test]
    fn test_all_events_is_a_copy() {
        let (_dir, mut store) = temp_store();
        store.load().unwrap();
        store.add(date(1, 1, 2024), "A").unwrap();

        let mut copy = store.all_events();
        copy.clear();

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_replace_moves_event() {
        let (_dir, mut store) = temp_store();
        store.load().unwrap();
        store.add(date(1, 1, 2024), "Old").unwrap();
        store.add(date(2, 1, 2024), "Other").unwrap();

        store.replace(date(1, 1, 2024), date(3, 1, 2024), "New").unwrap();

        assert!(store.events_for_date(date(1, 1, 2024)).is_empty());
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "02-01-2024,Other\n03-01-2024,New\n"
        );
    }

    #[test]
    fn test_strict_load_fails_and_keeps_memory() {
        let (_dir, mut store) = temp_store();
        store.load().unwrap();
        store.add(date(1, 1, 2024), "A").unwrap();

        fs::write(store.path(), "01-01-2024,A\nnot a record\n03-01-2024,C\n").unwrap();

        match store.load() {
            Err(DaybookError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected parse error, got {:?}", other),
        }
        assert_eq!(store.all_events(), vec![Event::new(date(1, 1, 2024), "A")]);
    }

    #[test]
    fn test_lenient_load_skips_bad_records() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "01-01-2024,A\n\n31-02-2024,bad\n03-01-2024,C\n").unwrap();

        let mut store = store.with_strict_load(false);
        store.load().unwrap();

        let descriptions: Vec<String> =
            store.all_events().iter().map(|e| e.description().to_string()).collect();
        assert_eq!(descriptions, vec!["A", "C"]);
    }

    #[test]
    fn test_lenient_load_then_rewrite_keeps_valid_events() {
        let (_dir, store) = temp_store();
        fs::write(
            store.path(),
            "01-01-2024,\"oops\n02-01-2024,B\n31-02-2024,bad\n04-01-2024,D\n",
        )
        .unwrap();

        let mut store = store.with_strict_load(false);
        store.load().unwrap();
        assert_eq!(store.len(), 3);

        assert_eq!(store.remove(date(9, 9, 2024)).unwrap(), 0);

        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "01-01-2024,\"\"\"oops\"\n02-01-2024,B\n04-01-2024,D\n"
        );

        let mut reloaded = EventStore::new(store.path());
        reloaded.load().unwrap();
        assert_eq!(reloaded.all_events(), store.all_events());
    }

    #[test]
    fn test_strict_load_reads_unescaped_leading_quotes() {
        let (_dir, mut store) = temp_store();
        fs::write(store.path(), "01-01-2024,\"Big\" meeting\n02-01-2024,B\n").unwrap();

        store.load().unwrap();

        let descriptions: Vec<String> =
            store.all_events().iter().map(|e| e.description().to_string()).collect();
        assert_eq!(descriptions, vec!["\"Big\" meeting", "B"]);

        // A rewrite escapes the quote and still reads back the same
        store.add(date(3, 1, 2024), "C").unwrap();
        store.remove(date(2, 1, 2024)).unwrap();

        let mut reloaded = EventStore::new(store.path());
        reloaded.load().unwrap();
        assert_eq!(reloaded.all_events(), store.all_events());
    }

    #[test]
    fn test_empty_description_is_rejected_before_writing() {
        let (_dir, mut store) = temp_store();
        store.load().unwrap();

        assert!(matches!(
            store.add(date(1, 1, 2024), ""),
            Err(DaybookError::EmptyDescription)
        ));
        store.add(date(2, 1, 2024), "Later").unwrap();
        assert!(matches!(
            store.replace(date(2, 1, 2024), date(2, 1, 2024), ""),
            Err(DaybookError::EmptyDescription)
        ));

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "02-01-2024,Later\n");

        let mut reloaded = EventStore::new(store.path());
        reloaded.load().unwrap();
        assert_eq!(reloaded.all_events(), vec![Event::new(date(2, 1, 2024), "Later")]);
    }

    #[test]
    fn test_descriptions_with_commas_and_newlines_persist() {
        let (_dir, mut store) = temp_store();
        store.load().unwrap();
        store.add(date(1, 1, 2024), "Lunch, then gym").unwrap();
        store.add(date(1, 1, 2024), "two\nlines").unwrap();
        store.add(date(2, 1, 2024), "after").unwrap();

        let mut reloaded = EventStore::new(store.path());
        reloaded.load().unwrap();

        assert_eq!(reloaded.all_events(), store.all_events());
    }

    #[test]
    fn test_failed_add_leaves_memory_untouched() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending
        let mut store = EventStore::new(dir.path());

        assert!(matches!(store.add(date(1, 1, 2024), "A"), Err(DaybookError::Io(_))));
        assert!(store.is_empty());
    }
}
