use cross_window_input_core::KeyboardLayout;
use windows::Win32::UI::Input::KeyboardAndMouse::{MAPVK_VK_TO_VSC, MapVirtualKeyW};

/// Scan codes from the calling thread's active keyboard layout.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemLayout;

impl KeyboardLayout for SystemLayout {
    fn scan_code(&self, vk: u16) -> u16 {
        let sc = unsafe { MapVirtualKeyW(u32::from(vk), MAPVK_VK_TO_VSC) };
        // 0 means the key has no scan code in this layout.
        u16::try_from(sc).unwrap_or(0)
    }
}
