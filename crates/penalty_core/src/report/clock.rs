use crate::models::Seconds;

/// Game time as `mm:ss`. Minutes are not wrapped at 60.
pub fn format_clock(seconds: Seconds) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn format_optional_clock(seconds: Option<Seconds>) -> String {
    seconds.map_or_else(|| "--:--".to_string(), format_clock)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(754), "12:34");
        assert_eq!(format_clock(3600), "60:00");
        assert_eq!(format_clock(6005), "100:05");
    }

    #[test]
    fn test_format_optional_clock() {
        assert_eq!(format_optional_clock(Some(120)), "02:00");
        assert_eq!(format_optional_clock(None), "--:--");
    }
}
