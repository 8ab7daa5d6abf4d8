//! JSONL request dispatch.
//!
//! Clients send one request per line:
//!
//! ```json
//! {"command":"numshows","properties":{}}
//! ```
//!
//! and receive one response per line:
//!
//! ```json
//! {"status":"ok","numshows":2,"time":1700000000.25}
//! {"status":"error","reason":"unknown command 'restart'","time":1700000000.5}
//! ```

mod dispatcher;
mod errors;
mod reader;
mod request;
mod response;

pub use self::dispatcher::Dispatcher;
pub use self::errors::DispatchError;
pub use self::request::{MAX_REQUEST_BYTES, parse_request};
pub use self::response::ResponseWriter;
