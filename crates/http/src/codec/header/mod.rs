//! Header rows of the head block.
//!
//! - [`HeaderDecoder`]: splits `Name: Value` rows into [`Header`](crate::protocol::Header)s
//! - [`HeaderEncoder`]: renders headers back into rows

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub(crate) use header_encoder::encode_row;
pub use header_encoder::HeaderEncoder;
