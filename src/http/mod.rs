//! Request building, SigV4 signing, dispatch and connection tracing.
mod client;
mod result;
mod sign;
mod tls;
mod tracer;
mod transport;
mod url;


pub use client::{CLIENT_TARGET, Client, ClientSettings, header_map};
pub use result::{RequestResult, SentRequest};
pub use sign::credentials_from_env;
pub use tracer::{TRACE_TARGET, TraceEvent, TraceReport, TraceSink, Tracer};
pub use self::url::parse_url;
