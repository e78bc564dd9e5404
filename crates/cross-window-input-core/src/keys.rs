//! Virtual key codes by name.

pub const VK_BACK: u16 = 0x08;
pub const VK_TAB: u16 = 0x09;
pub const VK_RETURN: u16 = 0x0D;
pub const VK_SHIFT: u16 = 0x10;
pub const VK_CONTROL: u16 = 0x11;
pub const VK_MENU: u16 = 0x12;
pub const VK_PAUSE: u16 = 0x13;
pub const VK_CAPITAL: u16 = 0x14;
pub const VK_ESCAPE: u16 = 0x1B;
pub const VK_SPACE: u16 = 0x20;
pub const VK_PRIOR: u16 = 0x21;
pub const VK_NEXT: u16 = 0x22;
pub const VK_END: u16 = 0x23;
pub const VK_HOME: u16 = 0x24;
pub const VK_LEFT: u16 = 0x25;
pub const VK_UP: u16 = 0x26;
pub const VK_RIGHT: u16 = 0x27;
pub const VK_DOWN: u16 = 0x28;
pub const VK_INSERT: u16 = 0x2D;
pub const VK_DELETE: u16 = 0x2E;
pub const VK_LWIN: u16 = 0x5B;
pub const VK_F1: u16 = 0x70;

const NAMED: &[(&str, u16)] = &[
    ("BACK", VK_BACK),
    ("BACKSPACE", VK_BACK),
    ("TAB", VK_TAB),
    ("RETURN", VK_RETURN),
    ("ENTER", VK_RETURN),
    ("SHIFT", VK_SHIFT),
    ("CONTROL", VK_CONTROL),
    ("CTRL", VK_CONTROL),
    ("MENU", VK_MENU),
    ("ALT", VK_MENU),
    ("PAUSE", VK_PAUSE),
    ("CAPITAL", VK_CAPITAL),
    ("CAPSLOCK", VK_CAPITAL),
    ("ESCAPE", VK_ESCAPE),
    ("ESC", VK_ESCAPE),
    ("SPACE", VK_SPACE),
    ("PRIOR", VK_PRIOR),
    ("PAGEUP", VK_PRIOR),
    ("NEXT", VK_NEXT),
    ("PAGEDOWN", VK_NEXT),
    ("END", VK_END),
    ("HOME", VK_HOME),
    ("LEFT", VK_LEFT),
    ("UP", VK_UP),
    ("RIGHT", VK_RIGHT),
    ("DOWN", VK_DOWN),
    ("INSERT", VK_INSERT),
    ("DELETE", VK_DELETE),
    ("DEL", VK_DELETE),
    ("LWIN", VK_LWIN),
    ("WIN", VK_LWIN),
];

/// Resolves a key name (case-insensitive, optional `VK_` prefix), a single
/// letter or digit, `F1`..`F24`, or a `0x` hex code.
pub fn vk_from_name(name: &str) -> Option<u16> {
    let owned = name.trim().to_ascii_uppercase();
    let upper = owned.strip_prefix("VK_").unwrap_or(&owned);

    if let Some(hex) = upper.strip_prefix("0X") {
        return u16::from_str_radix(hex, 16)
            .ok()
            .filter(|vk| (0x01..=0xFE).contains(vk));
    }

    let mut chars = upper.chars();
    if let (Some(ch), None) = (chars.next(), chars.next())
        && ch.is_ascii_alphanumeric()
    {
        // Letters and digits share their ASCII code with their virtual key.
        return Some(u16::from(ch as u8));
    }

    if let Some(n) = upper.strip_prefix('F').and_then(|n| n.parse::<u16>().ok())
        && (1..=24).contains(&n)
    {
        return Some(VK_F1 + n - 1);
    }

    NAMED
        .iter()
        .find(|(key, _)| *key == upper)
        .map(|(_, vk)| *vk)
}
