//! Request execution: chain, runtime, interceptors and the protocol layer

pub mod chain;
pub mod processor;
pub mod protocol;
pub mod runtime;

pub use chain::{ExecChain, ExecScope};
pub use processor::{
    HttpProcessor, InterceptorPipeline, RequestInterceptor, RequestUserAgent, ResponseInterceptor,
};
pub use protocol::ProtocolExec;
pub use runtime::ExecRuntime;
