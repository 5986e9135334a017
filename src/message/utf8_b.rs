// https://tools.ietf.org/html/rfc1522

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

fn allowed_char(c: char) -> bool {
    c >= 1 as char && c <= 9 as char
        || c == 11 as char
        || c == 12 as char
        || c >= 14 as char && c <= 127 as char
}

pub fn encode(s: &str) -> String {
    if s.chars().all(allowed_char) {
        s.into()
    } else {
        format!("=?utf-8?b?{}?=", BASE64.encode(s))
    }
}

#[cfg(test)]
mod test {
    use super::encode;

    #[test]
    fn encode_ascii() {
        assert_eq!(&encode("Kayo. ?"), "Kayo. ?");
    }

    #[test]
    fn encode_utf8() {
        assert_eq!(
            &encode("Привет, мир!"),
            "=?utf-8?b?0J/RgNC40LLQtdGCLCDQvNC40YAh?="
        );
    }
}
