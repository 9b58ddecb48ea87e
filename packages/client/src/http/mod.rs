//! HTTP message and routing types for the execution layer

pub mod body;
pub mod request;
pub mod response;
pub mod route;

pub use body::{RequestBody, ResponseBody, StreamBody};
pub use request::Request;
pub use response::Response;
pub use route::{Host, Route};
