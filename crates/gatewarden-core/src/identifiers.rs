use regex::Regex;

/// Minimum length of an asset serial number.
pub const MIN_SERIAL_LEN: usize = 3;

/// Checks a scanned student id against the campus id format: leading
/// alphanumeric, then at least two more characters from the id alphabet.
pub fn is_valid_student_id(student_id: &str) -> bool {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9/_-]{2,31}$")
        .expect("invalid regex")
        .is_match(student_id)
}

/// Checks an asset serial number for registration.
pub fn is_valid_serial_number(serial_number: &str) -> bool {
    serial_number.trim().len() >= MIN_SERIAL_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_campus_style_ids() {
        assert!(is_valid_student_id("DBU1401234"));
        assert!(is_valid_student_id("DBU/1401/12"));
        assert!(is_valid_student_id("S-1"));
    }

    #[test]
    fn rejects_short_empty_and_odd_ids() {
        assert!(!is_valid_student_id(""));
        assert!(!is_valid_student_id("AB"));
        assert!(!is_valid_student_id("-DBU123"));
        assert!(!is_valid_student_id("DBU 123"));
        assert!(!is_valid_student_id(&"X".repeat(33)));
    }

    #[test]
    fn serial_numbers_need_three_visible_chars() {
        assert!(is_valid_serial_number("SN1"));
        assert!(!is_valid_serial_number("  A  "));
        assert!(!is_valid_serial_number(""));
    }
}
