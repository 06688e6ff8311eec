//! Request and response verification headers.
//!
//! Every NeoFS service message carries a body, a meta header and a chain of
//! verification headers. The sender at each hop adds one header that signs the
//! meta header and the previous header; only the first hop signs the body.

mod headers;
mod verification;

pub use self::headers::{MetaHeader, ServiceMessage, VerificationHeader};
pub use self::verification::{chain_depth, forward, sign_message, verify_message, Signed};
