//! Response middleware layered over the whole router.

pub mod security_headers;
