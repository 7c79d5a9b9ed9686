pub mod protocol;

pub use protocol::{ProtocolLayout, MAX_BALLS, PROTOCOL_VERSION};
