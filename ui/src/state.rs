use std::sync::Arc;

use chrono::Utc;
use institutions_business::table::{RowId, TableError};
use institutions_business::{
    ApiClient, ApiEvent, BusinessConfig, CreateInstitutionState, EhttpFetcher, FetchService,
    InstitutionsState, Route,
};
use log::{debug, error, info, warn};

/// The main application state.
///
/// Note: there is no `Default` because building the institutions table can
/// fail and the API channel has to be wired to the client.
pub struct State {
    pub config: BusinessConfig,
    /// Page currently shown.
    pub route: Route,
    /// List and detail data.
    pub institutions: InstitutionsState,
    /// Create page form.
    pub create: CreateInstitutionState,
    api: ApiClient,
    events: flume::Receiver<ApiEvent>,
    repaint_attached: bool,
}

impl State {
    pub fn new(config: BusinessConfig, fetcher: Arc<dyn FetchService>) -> Result<Self, TableError> {
        let (api, events) = ApiClient::new(config.clone(), fetcher);
        Ok(Self {
            config,
            route: Route::default(),
            institutions: InstitutionsState::new()?,
            create: CreateInstitutionState::new(),
            api,
            events,
            repaint_attached: false,
        })
    }

    /// Configuration from the environment, talking HTTP through ehttp.
    pub fn from_env() -> Result<Self, TableError> {
        Self::new(BusinessConfig::from_env(), Arc::new(EhttpFetcher))
    }

    /// State against a live server at `base_url`, without fixtures.
    pub fn test(base_url: String) -> Result<Self, TableError> {
        Self::new(BusinessConfig::new(base_url), Arc::new(EhttpFetcher))
    }

    /// Makes API answers wake up the UI.
    pub fn attach_repaint(&mut self, ctx: &egui::Context) {
        if self.repaint_attached {
            return;
        }
        let ctx = ctx.clone();
        self.api = self.api.clone().with_waker(move || ctx.request_repaint());
        self.repaint_attached = true;
    }

    /// Switches to the page at `path`. Unknown paths show the list.
    pub fn navigate(&mut self, path: &str) {
        let route = Route::parse(path).unwrap_or_else(|| {
            warn!("Unknown path {path:?}, showing the list");
            Route::List
        });
        debug!("Navigating to {}", route.path());
        self.route = route;
    }

    /// Fetches the list for the current search input.
    pub fn reload(&mut self) {
        if self.institutions.is_fetching {
            return;
        }
        let query = self.institutions.start_fetch();
        self.api.list(&query);
    }

    /// Loads the list the first time it is shown.
    pub fn ensure_loaded(&mut self) {
        if !self.institutions.has_loaded()
            && !self.institutions.is_fetching
            && self.institutions.error.is_none()
        {
            self.reload();
        }
    }

    /// Searches for `id` once when it is not among the loaded rows.
    /// The list, its search input and its query stay as they are.
    pub fn look_up(&mut self, id: &RowId) {
        if self.institutions.start_lookup(id) {
            info!("Institution {id} not loaded, searching for it");
            self.api.find(id);
        }
    }

    /// Validates the create form and posts it when valid.
    pub fn submit_create(&mut self) {
        if let Some(institution) = self.create.submit() {
            info!("New institution: {institution:?}");
            self.api.create(&institution);
        }
    }

    /// Applies every API answer that arrived since the last frame.
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                ApiEvent::Listed { query, result } => {
                    self.institutions.finish_fetch(query, result, Utc::now());
                }
                ApiEvent::Found { id, result } => {
                    self.institutions.finish_lookup(id, result);
                }
                ApiEvent::Created(result) => {
                    self.create.finish(&result);
                    if let Ok(institution) = result {
                        let target = Route::Detail(institution.id.clone()).path();
                        if let Err(err) = self.institutions.insert(institution) {
                            error!("Created institution does not fit the table: {err}");
                            self.institutions.error = Some(err.to_string());
                        }
                        self.navigate(&target);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use institutions_business::{FormField, MockFetcher, fixtures};

    fn fixture_state() -> State {
        State::new(BusinessConfig::default(), Arc::new(MockFetcher::default())).unwrap()
    }

    #[test]
    fn test_fixture_list_loads_on_first_show() {
        let mut state = fixture_state();
        state.ensure_loaded();
        assert!(state.institutions.is_fetching);

        state.poll_events();
        assert!(!state.institutions.is_fetching);
        assert_eq!(state.institutions.table.len(), 11);

        state.ensure_loaded();
        assert!(!state.institutions.is_fetching, "loaded once");
    }

    #[test]
    fn test_failed_load_is_not_retried_every_frame() {
        let mut state = State::new(
            BusinessConfig::new("http://api.test"),
            Arc::new(MockFetcher::failing("offline")),
        )
        .unwrap();
        state.ensure_loaded();
        state.poll_events();
        assert!(state.institutions.error.is_some());

        state.ensure_loaded();
        assert!(!state.institutions.is_fetching);
    }

    #[test]
    fn test_navigate() {
        let mut state = fixture_state();
        state.navigate("/institutions/new");
        assert_eq!(state.route, Route::Create);
        state.navigate("/institutions/LLGGI");
        assert_eq!(state.route, Route::Detail(RowId::from("LLGGI")));
        state.navigate("/somewhere");
        assert_eq!(state.route, Route::List);
    }

    #[test]
    fn test_look_up_searches_once() {
        let mut state = fixture_state();
        let id = RowId::from("nope");
        state.navigate(&Route::Detail(id.clone()).path());

        state.look_up(&id);
        assert!(state.institutions.is_looking_up(&id));
        state.poll_events();
        assert!(!state.institutions.is_looking_up(&id));
        assert!(state.institutions.detail(&id).is_none());

        state.look_up(&id);
        assert!(!state.institutions.is_looking_up(&id), "no second search");
    }

    #[test]
    fn test_missing_detail_keeps_list() {
        let mut state = fixture_state();
        state.ensure_loaded();
        state.poll_events();
        assert_eq!(state.institutions.table.len(), 11);

        let id = RowId::from("nope");
        state.navigate(&Route::Detail(id.clone()).path());
        state.look_up(&id);
        state.poll_events();

        state.navigate(&Route::List.path());
        state.ensure_loaded();
        state.poll_events();
        assert_eq!(state.institutions.table.len(), 11);
        assert_eq!(state.institutions.search_input, "");
        assert_eq!(state.institutions.shown_query, "");
    }

    #[test]
    fn test_look_up_finds_unlisted_record() {
        let mut state = fixture_state();
        let id = RowId::from("LLGGI");
        state.navigate(&Route::Detail(id.clone()).path());

        state.look_up(&id);
        state.poll_events();
        assert_eq!(state.institutions.detail(&id).unwrap().address.zip_code, 35396);
        assert!(state.institutions.table.is_empty(), "list not loaded by the lookup");
    }

    #[test]
    fn test_create_navigates_to_detail() {
        let mut state = fixture_state();
        let institution = fixtures().remove(5);
        state.create.form.name = institution.name.clone();
        state.create.form.id = "NEU".to_owned();
        state.create.form.phone_number = "0641 123".to_owned();
        state.create.form.town = "Gießen".to_owned();
        state.create.form.set_zip_code("35396");
        state.create.form.street = "Weg".to_owned();
        state.create.form.street_number = "3".to_owned();
        state.create.field_changed(FormField::ZipCode);

        state.submit_create();
        state.poll_events();

        assert_eq!(state.route, Route::Detail(RowId::from("NEU")));
        assert!(state.institutions.find(&RowId::from("NEU")).is_some());
        assert_eq!(state.create.form.name, "", "form reset after success");
    }
}
