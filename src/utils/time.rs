use std::time::SystemTime;
use chrono::{DateTime, Local};

pub fn format_datetime(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_milliseconds() {
        let formatted = format_datetime(SystemTime::now());
        // 2024-01-01 12:00:00.000
        assert_eq!(formatted.len(), 23);
        assert_eq!(&formatted[4..5], "-");
        assert_eq!(&formatted[19..20], ".");
    }
}
