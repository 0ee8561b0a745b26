// End-to-end tests for the Tamil translation HTTP API and HTML page
//
// Each test starts the full router on an ephemeral port with fake
// translation and speech backends, so the suite runs offline and in
// parallel. Tests against the hosted model and speech endpoints live in
// test_live.rs and are ignored by default:
//
//     cargo test -- --ignored

mod helpers;
mod test_artifacts;
mod test_page;
