pub mod headers;
pub mod time;

pub use headers::headers_to_json;
pub use time::format_datetime;
