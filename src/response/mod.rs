// response/mod.rs

pub mod http_response;
pub mod overrides;

pub use http_response::Response;
pub use overrides::ResponseOverrides;
