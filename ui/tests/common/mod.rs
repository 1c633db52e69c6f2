use egui_kittest::Harness;
use institutions_business::fixtures;
use institutions_ui::InstitutionsApp;
use institutions_ui::state::State;
use wiremock::Mock;
use wiremock::matchers::{method, path, query_param};
use wiremock::{MockServer, ResponseTemplate};

pub struct TestCtx<'a, T = State> {
    mock_server: MockServer,
    harness: Harness<'a, T>,
}

impl<'a, T> TestCtx<'a, T> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, T> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, T> {
        &self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }
}

impl<'a> TestCtx<'a, InstitutionsApp> {
    pub async fn new_app() -> Self {
        Self::new_app_with_status(200).await
    }

    /// App whose list endpoint answers with `status_code`.
    pub async fn new_app_with_status(status_code: u16) -> Self {
        let mock_server = setup_mock_server(status_code).await;
        let state = State::test(mock_server.uri()).expect("institutions table");
        let app = InstitutionsApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }
}

/// Runs frames, waiting in between so ehttp answers can arrive.
#[allow(unused)]
pub async fn settle<T>(harness: &mut Harness<'_, T>) {
    for _ in 0..10 {
        harness.step();
        tokio::time::sleep(std::time::Duration::from_millis(30)).await;
    }
    harness.step();
}

async fn setup_mock_server(status_code: u16) -> MockServer {
    let _ = env_logger::builder().is_test(true).try_init();
    let mock_server = MockServer::start().await;

    let llggi: Vec<_> = fixtures().into_iter().filter(|i| i.id.to_string() == "LLGGI").collect();
    Mock::given(method("GET"))
        .and(path("/institution"))
        .and(query_param("id", "LLGGI"))
        .respond_with(ResponseTemplate::new(status_code).set_body_json(llggi))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/institution"))
        .respond_with(ResponseTemplate::new(status_code).set_body_json(fixtures()))
        .mount(&mock_server)
        .await;

    mock_server
}
