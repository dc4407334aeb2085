pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use codec::TokenCodec;
pub use codec::DEFAULT_EXPIRATION_MINUTES;
pub use errors::TokenError;
