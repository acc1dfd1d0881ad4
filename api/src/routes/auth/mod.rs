//! Auth routes driving the verification pipeline
//!
//! Only the two endpoints that touch the delivery pipeline live here; the
//! rest of the account surface is served elsewhere.

mod send_code;
mod verify_email;

pub use send_code::send_code;
pub use verify_email::verify_email;
