//! Case conversion for event names and payload keys.
//!
//! Camel-case input is split before every ASCII uppercase letter that is not
//! the first character and does not directly follow an `_`. Each uppercase
//! letter starts a new word, so `HTTPRequest` becomes `h_t_t_p_request`.
//! Only ASCII letters change case; the transform never consults a locale.

/// `ButtonClicked` → `button_clicked`, `userId` → `user_id`.
pub fn to_snake_case(name: &str) -> String {
    convert(name, char::to_ascii_lowercase)
}

/// `ButtonClicked` → `BUTTON_CLICKED`.
pub fn to_screaming_snake_case(name: &str) -> String {
    convert(name, char::to_ascii_uppercase)
}

fn convert(name: &str, map: fn(&char) -> char) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| p != '_') {
            out.push('_');
        }
        out.push(map(&c));
        prev = Some(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(to_screaming_snake_case("ButtonClicked"), "BUTTON_CLICKED");
        assert_eq!(to_screaming_snake_case("ActivityCreated"), "ACTIVITY_CREATED");
        assert_eq!(to_screaming_snake_case("Created"), "CREATED");
    }

    #[test]
    fn test_payload_keys() {
        assert_eq!(to_snake_case("label"), "label");
        assert_eq!(to_snake_case("userId"), "user_id");
        assert_eq!(to_snake_case("result_count"), "result_count");
        assert_eq!(to_snake_case("pageUrl2"), "page_url2");
    }

    #[test]
    fn test_each_capital_starts_a_word() {
        assert_eq!(to_snake_case("HTTPRequest"), "h_t_t_p_request");
        assert_eq!(to_screaming_snake_case("Page2Viewed"), "PAGE2_VIEWED");
    }

    #[test]
    fn test_existing_separators_kept() {
        assert_eq!(to_snake_case("user_Id"), "user_id");
        assert_eq!(to_snake_case("_private"), "_private");
    }

    #[test]
    fn test_non_ascii_untouched() {
        assert_eq!(to_snake_case("größeÄnderung"), "größeÄnderung");
        assert_eq!(to_screaming_snake_case("Émis"), "ÉMIS");
    }
}
