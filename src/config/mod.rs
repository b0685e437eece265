pub mod codec;

pub use codec::{CodecConfig, CodecConfigError, ENV_PREFIX};
