//! Phone number helpers shared by every layer that logs a phone number

/// Mask a phone number for logs (e.g., +99****4567)
///
/// Keeps the first 3 and last 4 characters; anything shorter than 7
/// characters is masked entirely.
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() >= 7 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}****{}", head, tail)
    } else {
        "****".to_string()
    }
}
