pub mod config;
pub mod credential;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod tunnel;

pub use config::AppConfig;
pub use dispatch::{CommandSpec, Invocation};
pub use error::{CoreError, DispatchError, FailureKind};
pub use tunnel::Tunnel;
