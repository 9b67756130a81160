//! Session protocol module
//!
//! Request decoding, response encoding and the per-session dispatcher.

pub mod dispatcher;
pub mod request;
pub mod response;

pub use dispatcher::{Dispatcher, DEFAULT_DEPOT};
pub use request::{ContainerReport, ProtocolError, Request};
pub use response::{Circuit, Response, ResponseType, SupervisionState};
