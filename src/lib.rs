//! 犯罪举报客户端库
//! 会话与令牌刷新、请求管道、乐观投票与评论，以及远端/内存两种 API 实现

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod models;
pub mod optimistic;
pub mod session;
pub mod telemetry;

pub use client::IncidentClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use events::{ClientEvent, EventBus};
