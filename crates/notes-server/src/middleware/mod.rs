//! Tower middleware wrapped around the router.

pub mod request_id;
