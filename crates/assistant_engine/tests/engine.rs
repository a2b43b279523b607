use std::sync::{Arc, Mutex};
use std::time::Duration;

use assistant_core::{OperationKind, SelectionRequest};
use assistant_engine::{DispatchSettings, Dispatcher, EngineEvent, EngineHandle, ProcessingError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct RecordingDispatcher {
    seen: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl Dispatcher for RecordingDispatcher {
    async fn process(&self, request: &SelectionRequest) -> Result<String, ProcessingError> {
        self.seen.lock().unwrap().push(request.content().to_string());
        match request.operation() {
            OperationKind::Summarize => Ok(format!("summary of {}", request.content())),
            _ => Err(ProcessingError::Api { status: 500 }),
        }
    }
}

fn request(content: &str, operation: OperationKind) -> SelectionRequest {
    SelectionRequest::new(content, operation).unwrap()
}

#[test]
fn completion_carries_request_id_and_result() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let seen = dispatcher.seen.clone();
    let engine = EngineHandle::with_dispatcher(dispatcher);

    engine.process(7, request("a long enough selection", OperationKind::Summarize));

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::ProcessCompleted {
            request_id: 7,
            result: Ok("summary of a long enough selection".to_string()),
        })
    );
    assert_eq!(seen.lock().unwrap().as_slice(), ["a long enough selection"]);
    assert_eq!(engine.try_recv(), None);
}

#[test]
fn failures_are_reported_not_swallowed() {
    let engine = EngineHandle::with_dispatcher(Arc::new(RecordingDispatcher::default()));

    engine.process(1, request("a long enough selection", OperationKind::Explain));

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::ProcessCompleted {
            request_id: 1,
            result: Err(ProcessingError::Api { status: 500 }),
        })
    );
}

#[test]
fn reqwest_engine_talks_to_service() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/research/process"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Explained."))
            .mount(&server)
            .await;
        server
    });

    let engine = EngineHandle::new(DispatchSettings::with_base_url(server.uri()));
    engine.process(3, request("a long enough selection", OperationKind::Explain));

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::ProcessCompleted {
            request_id: 3,
            result: Ok("Explained.".to_string()),
        })
    );
}
