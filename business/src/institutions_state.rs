//! State behind the institutions list and detail pages.

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::api::ApiError;
use crate::institution::{Institution, institutions_table};
use crate::table::{RowId, TableError, TableModel};

#[derive(Debug)]
pub struct InstitutionsState {
    /// Rows plus sort and page state.
    pub table: TableModel<Institution>,

    /// Search box input.
    pub search_input: String,

    /// Query of the rows currently shown, empty for the full list.
    pub shown_query: String,

    pub is_fetching: bool,

    pub error: Option<String>,

    /// Last successful fetch (`DateTime<Utc>` so tests can fake it).
    pub last_fetch: Option<DateTime<Utc>>,

    /// Detail lookup of a code missing from the rows. Never touches the list.
    lookup: Option<Lookup>,
}

#[derive(Debug)]
struct Lookup {
    id: RowId,
    pending: bool,
    found: Option<Institution>,
    error: Option<String>,
}

impl InstitutionsState {
    pub fn new() -> Result<Self, TableError> {
        Ok(Self {
            table: institutions_table()?,
            search_input: String::new(),
            shown_query: String::new(),
            is_fetching: false,
            error: None,
            last_fetch: None,
            lookup: None,
        })
    }

    pub fn has_loaded(&self) -> bool {
        self.last_fetch.is_some()
    }

    /// Marks a fetch as started and returns the query to send.
    pub fn start_fetch(&mut self) -> String {
        self.is_fetching = true;
        self.error = None;
        self.search_input.trim().to_owned()
    }

    /// Applies a list answer. Sort and page survive a reload.
    pub fn finish_fetch(
        &mut self,
        query: String,
        result: Result<Vec<Institution>, ApiError>,
        now: DateTime<Utc>,
    ) {
        self.is_fetching = false;
        match result {
            Ok(institutions) => {
                info!("Loaded {} institution(s)", institutions.len());
                match self.table.set_rows(institutions) {
                    Ok(()) => {
                        self.shown_query = query;
                        self.last_fetch = Some(now);
                    }
                    Err(err) => {
                        warn!("Institutions do not fit the table: {err}");
                        self.error = Some(err.to_string());
                    }
                }
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    pub fn find(&self, id: &RowId) -> Option<&Institution> {
        self.table.rows().iter().find(|institution| &institution.id == id)
    }

    /// A loaded row, or the result of a finished lookup for `id`.
    pub fn detail(&self, id: &RowId) -> Option<&Institution> {
        self.find(id).or_else(|| {
            self.lookup
                .as_ref()
                .filter(|lookup| &lookup.id == id)
                .and_then(|lookup| lookup.found.as_ref())
        })
    }

    /// Starts a lookup of `id` unless one was already made. Returns whether
    /// a request has to be sent.
    pub fn start_lookup(&mut self, id: &RowId) -> bool {
        if self.find(id).is_some() || self.lookup.as_ref().is_some_and(|lookup| &lookup.id == id) {
            return false;
        }
        self.lookup = Some(Lookup {
            id: id.clone(),
            pending: true,
            found: None,
            error: None,
        });
        true
    }

    /// Applies a lookup answer. Answers for an older id are dropped.
    pub fn finish_lookup(&mut self, id: RowId, result: Result<Option<Institution>, ApiError>) {
        let Some(lookup) = self.lookup.as_mut().filter(|lookup| lookup.id == id) else {
            warn!("Dropping stale lookup answer for {id}");
            return;
        };
        lookup.pending = false;
        match result {
            Ok(found) => lookup.found = found,
            Err(err) => lookup.error = Some(err.to_string()),
        }
    }

    /// Failure of the lookup for `id`, kept apart from the list's error.
    pub fn lookup_error(&self, id: &RowId) -> Option<&str> {
        self.lookup
            .as_ref()
            .filter(|lookup| &lookup.id == id)
            .and_then(|lookup| lookup.error.as_deref())
    }

    /// True while the lookup of `id` has not answered yet.
    pub fn is_looking_up(&self, id: &RowId) -> bool {
        self.lookup
            .as_ref()
            .is_some_and(|lookup| &lookup.id == id && lookup.pending)
    }

    /// Adds a freshly created record, replacing one with the same code.
    pub fn insert(&mut self, institution: Institution) -> Result<(), TableError> {
        let mut rows: Vec<Institution> = self
            .table
            .rows()
            .iter()
            .filter(|row| row.id != institution.id)
            .cloned()
            .collect();
        rows.push(institution);
        self.table.set_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::institution::fixtures;

    #[test]
    fn test_fetch_lifecycle() {
        let mut state = InstitutionsState::new().unwrap();
        assert!(!state.has_loaded());

        state.search_input = " LLGGI ".to_owned();
        let query = state.start_fetch();
        assert_eq!(query, "LLGGI");
        assert!(state.is_fetching);

        let now = Utc::now();
        state.finish_fetch(query, Ok(vec![fixtures().remove(5)]), now);
        assert!(!state.is_fetching);
        assert_eq!(state.last_fetch, Some(now));
        assert_eq!(state.shown_query, "LLGGI");
        assert_eq!(state.table.len(), 1);
        assert!(state.find(&RowId::from("LLGGI")).is_some());
        assert!(state.find(&RowId::Number(1)).is_none());
    }

    #[test]
    fn test_failed_fetch_keeps_rows() {
        let mut state = InstitutionsState::new().unwrap();
        state.finish_fetch(String::new(), Ok(fixtures()), Utc::now());

        state.start_fetch();
        state.finish_fetch(
            String::new(),
            Err(ApiError::Status { status: 500 }),
            Utc::now(),
        );
        assert_eq!(state.table.len(), 11);
        assert_eq!(
            state.error.as_deref(),
            Some("Server antwortete mit Status 500")
        );

        state.start_fetch();
        assert_eq!(state.error, None, "new fetch clears the banner");
    }

    #[test]
    fn test_insert_replaces_same_code() {
        let mut state = InstitutionsState::new().unwrap();
        state.finish_fetch(String::new(), Ok(fixtures()), Utc::now());

        let mut renamed = fixtures().remove(5);
        renamed.name = "Umbenannt".to_owned();
        state.insert(renamed).unwrap();
        assert_eq!(state.table.len(), 11);
        assert_eq!(state.find(&RowId::from("LLGGI")).unwrap().name, "Umbenannt");

        let mut added = fixtures().remove(0);
        added.id = RowId::Number(99);
        state.insert(added).unwrap();
        assert_eq!(state.table.len(), 12);
    }

    #[test]
    fn test_lookup_leaves_list_alone() {
        let mut state = InstitutionsState::new().unwrap();
        state.finish_fetch(String::new(), Ok(fixtures()), Utc::now());
        let id = RowId::from("NEU");

        assert!(state.start_lookup(&id));
        assert!(!state.start_lookup(&id), "asked once");
        assert!(state.is_looking_up(&id));

        let mut found = fixtures().remove(0);
        found.id = id.clone();
        state.finish_lookup(id.clone(), Ok(Some(found)));
        assert!(!state.is_looking_up(&id));
        assert!(state.detail(&id).is_some());
        assert_eq!(state.table.len(), 11);
        assert_eq!(state.search_input, "");
        assert_eq!(state.shown_query, "");

        assert!(!state.start_lookup(&RowId::from("LLGGI")), "already loaded");
        state.finish_lookup(RowId::from("other"), Ok(None));
        assert!(state.detail(&id).is_some(), "stale answer ignored");
    }

    #[test]
    fn test_failed_lookup_does_not_block_list() {
        let mut state = InstitutionsState::new().unwrap();
        let id = RowId::from("nope");
        state.start_lookup(&id);
        state.finish_lookup(id.clone(), Err(ApiError::Status { status: 503 }));

        assert_eq!(state.lookup_error(&id), Some("Server antwortete mit Status 503"));
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_reload_keeps_sort_and_page() {
        let mut state = InstitutionsState::new().unwrap();
        state.finish_fetch(String::new(), Ok(fixtures()), Utc::now());
        state.table.toggle_sort_by_label("Name").unwrap();
        state.table.set_page(1);

        state.finish_fetch(String::new(), Ok(fixtures()), Utc::now());
        assert!(state.table.sort_state().active().is_some());
        assert_eq!(state.table.pagination().page(), 1);
    }
}
