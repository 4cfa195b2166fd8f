//! Tool input models.
//!
//! Inputs use `#[serde(rename_all = "camelCase")]` like the rest of the MCP
//! surface and also accept the snake_case argument names older clients send.

mod inputs;

pub use inputs::*;
