//! Behavioural tests for the JSONL serving loop.

use std::io::Cursor;
use std::sync::Arc;

use bigtop_protocol::{AccessPolicy, Identity, Response, Status};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;

use super::support::{FakeSupervisor, HealthEvent, RecordingHealthReporter};
use crate::dispatch::Dispatcher;

struct DispatchWorld {
    supervisor: Option<FakeSupervisor>,
    reporter: Arc<RecordingHealthReporter>,
    responses: Vec<Response>,
}

#[fixture]
fn world() -> DispatchWorld {
    DispatchWorld {
        supervisor: None,
        reporter: Arc::new(RecordingHealthReporter::default()),
        responses: Vec::new(),
    }
}

impl DispatchWorld {
    fn serve(&mut self, input: String) {
        let supervisor = self.supervisor.take().expect("supervisor configured");
        let mut dispatcher = Dispatcher::with_reporter(supervisor, self.reporter.clone());
        let mut output = Vec::new();
        dispatcher
            .serve(Cursor::new(input), &mut output)
            .expect("serve requests");

        self.responses = String::from_utf8(output)
            .expect("utf8 output")
            .lines()
            .map(|line| serde_json::from_str(line).expect("response line"))
            .collect();
        self.supervisor = Some(dispatcher.into_supervisor());
    }

    fn response(&self, position: &str) -> &Response {
        let index: usize = position.parse().expect("numeric response position");
        self.responses
            .get(index - 1)
            .unwrap_or_else(|| panic!("no response {index} in {:?}", self.responses))
    }
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("a supervisor with {count} shows")]
fn given_supervisor(world: &mut DispatchWorld, count: String) {
    let shows = count.parse().expect("numeric show count");
    world.supervisor = Some(FakeSupervisor::with_shows(shows));
}

#[given("a supervisor restricted to uid {uid}")]
fn given_restricted_supervisor(world: &mut DispatchWorld, uid: String) {
    let owner = uid.parse().expect("numeric uid");
    world.supervisor = Some(FakeSupervisor {
        policy: AccessPolicy::owner_restricted(Identity::Uid(owner)),
        ..FakeSupervisor::default()
    });
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the client sends the request {request}")]
fn when_client_sends(world: &mut DispatchWorld, request: String) {
    world.serve(format!("{request}\n"));
}

#[when("the client sends the lines {first} and {second}")]
fn when_client_sends_lines(world: &mut DispatchWorld, first: String, second: String) {
    world.serve(format!("{first}\n{second}\n"));
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("response {position} is ok")]
fn then_response_ok(world: &mut DispatchWorld, position: String) {
    let response = world.response(&position);
    assert_eq!(response.status(), Status::Ok, "{response:?}");
}

#[then("response {position} is ok with \"{key}\" equal to {expected}")]
fn then_response_field(world: &mut DispatchWorld, position: String, key: String, expected: String) {
    let response = world.response(&position);
    assert_eq!(response.status(), Status::Ok, "{response:?}");
    let value: Value = serde_json::from_str(&expected).expect("expected JSON");
    assert_eq!(response.get(&key), Some(&value));
}

#[then("response {position} is an error with reason \"{reason}\"")]
fn then_response_error(world: &mut DispatchWorld, position: String, reason: String) {
    let response = world.response(&position);
    assert_eq!(response.status(), Status::Error);
    assert_eq!(response.reason(), Some(reason.as_str()));
}

#[then("response {position} is an error starting with \"{prefix}\"")]
fn then_response_error_prefix(world: &mut DispatchWorld, position: String, prefix: String) {
    let response = world.response(&position);
    assert_eq!(response.status(), Status::Error);
    assert!(
        response
            .reason()
            .is_some_and(|reason| reason.starts_with(&prefix)),
        "{response:?}"
    );
}

#[then("the supervisor has no watchers")]
fn then_no_watchers(world: &mut DispatchWorld) {
    let supervisor = world.supervisor.as_ref().expect("supervisor returned");
    assert!(supervisor.watchers.is_empty());
}

#[then("the health reporter saw serving start and stop after {count} requests")]
fn then_health_events(world: &mut DispatchWorld, count: String) {
    let handled = count.parse().expect("numeric request count");
    assert_eq!(
        world.reporter.events(),
        [HealthEvent::Started, HealthEvent::Stopped(handled)]
    );
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/dispatch.feature", name = "Counting shows over the wire")]
fn counting_shows(world: DispatchWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dispatch.feature",
    name = "Unknown commands are answered with an error"
)]
fn unknown_commands(world: DispatchWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dispatch.feature",
    name = "Malformed lines do not stop the daemon"
)]
fn malformed_lines(world: DispatchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/dispatch.feature", name = "Added watchers are listed")]
fn added_watchers_are_listed(world: DispatchWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dispatch.feature",
    name = "Endpoint owner mode rejects a foreign uid"
)]
fn owner_mode_rejects(world: DispatchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/dispatch.feature", name = "Serving reports its lifecycle")]
fn serving_lifecycle(world: DispatchWorld) {
    let _ = world;
}
