// Library root
// -----------
// Terminal client for the face-box image backend. The binary
// (`main.rs`) wires these modules together and runs the interactive UI.
//
// Module responsibilities:
// - `payload`: form values and the JSON request bodies built from them.
// - `routes`: batch modes and the backend route table.
// - `api`: blocking HTTP client that posts payloads and returns blobs.
// - `workflow`: the upload controller (validate, encode, post, save).
// - `config`: environment-driven settings.
// - `ui`: dialoguer menus that fill the forms and show outcomes.
pub mod api;
pub mod config;
pub mod error;
pub mod payload;
pub mod routes;
pub mod ui;
pub mod workflow;
