// stagehand/src/server/mod.rs

//! The development server descriptor: connection parameters, proxy rules and
//! history-API fallback, passed through unmodified to an external HTTP server.

pub mod options;
pub mod proxy;

pub use options::{HistoryApiFallback, OverlayOptions, ServerOptions, DEFAULT_HOST, DEFAULT_PORT};
pub use proxy::{ProxyRule, ProxyTable};
