//! Key names used in `hotkeys.toml`, mapped to Windows virtual key codes.

/// Named keys and their aliases.
const NAMED_KEYS: &[(u32, &[&str])] = &[
    (0x08, &["BACKSPACE"]),
    (0x09, &["TAB"]),
    (0x0D, &["ENTER", "RETURN"]),
    (0x13, &["PAUSE"]),
    (0x1B, &["ESCAPE", "ESC"]),
    (0x20, &["SPACE"]),
    (0x21, &["PAGEUP", "PGUP"]),
    (0x22, &["PAGEDOWN", "PGDN"]),
    (0x23, &["END"]),
    (0x24, &["HOME"]),
    (0x25, &["LEFT"]),
    (0x26, &["UP"]),
    (0x27, &["RIGHT"]),
    (0x28, &["DOWN"]),
    (0x2C, &["PRINTSCREEN", "PRTSC"]),
    (0x2D, &["INSERT", "INS"]),
    (0x2E, &["DELETE", "DEL"]),
    (0xBA, &["SEMICOLON"]),
    (0xBB, &["PLUS", "EQUALS"]),
    (0xBC, &["COMMA"]),
    (0xBD, &["MINUS"]),
    (0xBE, &["PERIOD", "DOT"]),
    (0xBF, &["SLASH"]),
    (0xC0, &["BACKTICK", "GRAVE"]),
    (0xDB, &["LBRACKET"]),
    (0xDC, &["BACKSLASH"]),
    (0xDD, &["RBRACKET"]),
    (0xDE, &["QUOTE"]),
];

const VK_NUMPAD0: u32 = 0x60;
const VK_F1: u32 = 0x70;

/// Resolves a key name to its virtual key code, case-insensitively.
///
/// Accepts a single letter or digit, `F1`..`F24`, `Num0`..`Num9`, the
/// names in [`NAMED_KEYS`], or a raw code such as `0x7B`.
pub fn vk_from_name(name: &str) -> Option<u32> {
    let name = name.trim().to_ascii_uppercase();

    if let [ch] = name.as_bytes()
        && ch.is_ascii_alphanumeric()
    {
        return Some(u32::from(*ch));
    }

    if let Some(hex) = name.strip_prefix("0X") {
        return u32::from_str_radix(hex, 16)
            .ok()
            .filter(|vk| (0x01..=0xFE).contains(vk));
    }

    if let Some(n) = numbered(&name, "NUM", 0..=9) {
        return Some(VK_NUMPAD0 + n);
    }
    if let Some(n) = numbered(&name, "F", 1..=24) {
        return Some(VK_F1 + n - 1);
    }

    NAMED_KEYS
        .iter()
        .find(|(_, aliases)| aliases.contains(&name.as_str()))
        .map(|(vk, _)| *vk)
}

/// Parses `<prefix><n>` with `n` in `range`.
fn numbered(name: &str, prefix: &str, range: std::ops::RangeInclusive<u32>) -> Option<u32> {
    let n = name.strip_prefix(prefix)?.parse().ok()?;
    range.contains(&n).then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_map_to_ascii() {
        assert_eq!(vk_from_name("h"), Some(0x48));
        assert_eq!(vk_from_name("Z"), Some(0x5A));
        assert_eq!(vk_from_name("7"), Some(0x37));
    }

    #[test]
    fn function_keys_cover_f1_to_f24() {
        assert_eq!(vk_from_name("F1"), Some(0x70));
        assert_eq!(vk_from_name("f9"), Some(0x78));
        assert_eq!(vk_from_name("F24"), Some(0x87));
        assert_eq!(vk_from_name("F0"), None);
        assert_eq!(vk_from_name("F25"), None);
    }

    #[test]
    fn numpad_and_raw_codes() {
        assert_eq!(vk_from_name("num0"), Some(0x60));
        assert_eq!(vk_from_name("Num9"), Some(0x69));
        assert_eq!(vk_from_name("Num10"), None);
        assert_eq!(vk_from_name("0xAD"), Some(0xAD));
        assert_eq!(vk_from_name("0x00"), None);
        assert_eq!(vk_from_name("0xZZ"), None);
    }

    #[test]
    fn aliases_resolve_to_same_code() {
        // Act
        let pairs = [("Esc", "Escape"), ("PgUp", "PageUp"), ("Return", "Enter")];

        // Assert
        for (a, b) in pairs {
            assert_eq!(vk_from_name(a), vk_from_name(b));
            assert!(vk_from_name(a).is_some());
        }
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert_eq!(vk_from_name("Hyper"), None);
        assert_eq!(vk_from_name(""), None);
        assert_eq!(vk_from_name("é"), None);
    }
}
