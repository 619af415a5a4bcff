//! HTTP 请求管道
//! 统一出站请求：附加凭证、401 拦截、单飞刷新

pub mod pipeline;
pub mod request;
pub mod transport;

pub use pipeline::RequestPipeline;
pub use request::{ApiRequest, ApiResponse, RequestDescriptor, MAX_AUTH_RETRIES};
pub use transport::{ReqwestTransport, Transport};
