pub mod config;
pub mod protocol;
pub mod session;

pub use config::GlobeConfig;
pub use protocol::{Graticules, HostMessage, HostSink};
pub use session::{DragPhase, GlobeSession, SessionError};
