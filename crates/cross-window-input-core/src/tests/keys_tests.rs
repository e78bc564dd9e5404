use crate::keys::{VK_DELETE, VK_F1, VK_MENU, VK_RETURN, vk_from_name};

#[test]
fn names_are_case_insensitive_with_optional_prefix() {
    assert_eq!(vk_from_name("RETURN"), Some(VK_RETURN));
    assert_eq!(vk_from_name("enter"), Some(VK_RETURN));
    assert_eq!(vk_from_name("vk_return"), Some(VK_RETURN));
    assert_eq!(vk_from_name("Alt"), Some(VK_MENU));
    assert_eq!(vk_from_name(" del "), Some(VK_DELETE));
}

#[test]
fn letters_and_digits_map_to_their_ascii_code() {
    assert_eq!(vk_from_name("a"), Some(0x41));
    assert_eq!(vk_from_name("Z"), Some(0x5A));
    assert_eq!(vk_from_name("7"), Some(0x37));
    assert_eq!(vk_from_name("/"), None);
}

#[test]
fn function_keys_cover_f1_to_f24() {
    assert_eq!(vk_from_name("F1"), Some(VK_F1));
    assert_eq!(vk_from_name("f24"), Some(0x87));
    assert_eq!(vk_from_name("F25"), None);
    assert_eq!(vk_from_name("F0"), None);
}

#[test]
fn hex_codes_must_be_valid_virtual_keys() {
    assert_eq!(vk_from_name("0x0D"), Some(VK_RETURN));
    assert_eq!(vk_from_name("0xa0"), Some(0xA0));
    assert_eq!(vk_from_name("0x00"), None);
    assert_eq!(vk_from_name("0xFF"), None);
    assert_eq!(vk_from_name("0xZZ"), None);
}
