//! Request dispatch for the items function.
//!
//! The gateway delivers proxy events describing an HTTP request. The
//! dispatcher picks one of five operations from the method, the path and the
//! `id` path parameter, performs the matching store call, and answers with a
//! uniform envelope:
//!
//! ```json
//! {"statusCode":201,"headers":{"content-type":"application/json"},
//!  "body":"{\"message\":\"Item created successfully.\",\"data\":{\"id\":\"42\"}}"}
//! ```
//!
//! Failures never escape [`Dispatcher::handle`]. Client mistakes become 400 or
//! 404 responses; store and item-shaping failures become 500 responses that
//! echo the error in `data.error`.

mod errors;
mod handler;
mod request;
mod response;
mod router;

pub use self::errors::DispatchError;
pub use self::handler::Dispatcher;
pub use self::request::{GatewayRequest, Method};
pub use self::response::{GatewayResponse, ResponseBody, messages};
pub use self::router::Route;
pub(crate) use self::router::DISPATCH_TARGET;
