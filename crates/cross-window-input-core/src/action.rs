//! The instruction set understood by the interpreter.
//!
//! Actions are immutable values. Key actions precompute their message
//! parameters and batches precompute their low-level input records, so
//! interpreting a sequence never has to consult the keyboard layout again.

use crate::{codec, timing::MAX_WAIT_MS};

/// Text encoding used for message based delivery.
///
/// `Narrow` selects the `*A` calls (code-page text, one `WM_CHAR` per UTF-8
/// byte); `Wide` selects the `*W` calls (one `WM_CHAR` per UTF-16 unit).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Narrow,
    Wide,
}

/// How message based events reach the window.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Queue the message and return immediately (`PostMessage`).
    #[default]
    Post,
    /// Block until the window procedure has handled the message (`SendMessage`).
    Send,
}

/// Which transitions a key action produces. Down always precedes up.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
    #[default]
    DownAndUp,
}

impl KeyPhase {
    pub const DOWN_BIT: u8 = 0x01;
    pub const UP_BIT: u8 = 0x02;

    pub const fn bits(self) -> u8 {
        match self {
            KeyPhase::Down => Self::DOWN_BIT,
            KeyPhase::Up => Self::UP_BIT,
            KeyPhase::DownAndUp => Self::DOWN_BIT | Self::UP_BIT,
        }
    }

    pub const fn has_down(self) -> bool {
        self.bits() & Self::DOWN_BIT != 0
    }

    pub const fn has_up(self) -> bool {
        self.bits() & Self::UP_BIT != 0
    }
}

/// Maps virtual key codes to hardware scan codes for the active layout.
pub trait KeyboardLayout {
    fn scan_code(&self, vk: u16) -> u16;
}

/// Repeat count 1, scan code in bits 16..24.
const LPARAM_DOWN_BASE: u32 = 0x0000_0001;
/// Repeat count 1, previous state down, transition up.
const LPARAM_UP_BASE: u32 = 0xC000_0001;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPress {
    vk: u16,
    phase: KeyPhase,
    scan_code: u16,
    lparam_down: isize,
    lparam_up: isize,
}

impl KeyPress {
    pub fn new<L: KeyboardLayout + ?Sized>(vk: u16, phase: KeyPhase, layout: &L) -> Self {
        Self::with_scan_code(vk, phase, layout.scan_code(vk))
    }

    pub fn with_scan_code(vk: u16, phase: KeyPhase, scan_code: u16) -> Self {
        let scan = u32::from(scan_code) << 16;
        Self {
            vk,
            phase,
            scan_code,
            lparam_down: (LPARAM_DOWN_BASE | scan) as isize,
            lparam_up: (LPARAM_UP_BASE | scan) as isize,
        }
    }

    pub fn vk(&self) -> u16 {
        self.vk
    }

    pub fn phase(&self) -> KeyPhase {
        self.phase
    }

    pub fn scan_code(&self) -> u16 {
        self.scan_code
    }

    pub fn lparam_down(&self) -> isize {
        self.lparam_down
    }

    pub fn lparam_up(&self) -> isize {
        self.lparam_up
    }
}

/// Text carried in both encodings, so either delivery path can use it as is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text {
    utf8: String,
    utf16: Vec<u16>,
}

impl Text {
    pub fn from_utf8(text: &str) -> Self {
        Self {
            utf8: text.to_owned(),
            utf16: codec::to_wide(text),
        }
    }

    pub fn from_utf16(units: &[u16]) -> Self {
        Self {
            utf8: codec::to_narrow(units),
            utf16: units.to_vec(),
        }
    }

    pub fn utf8(&self) -> &str {
        &self.utf8
    }

    pub fn utf16(&self) -> &[u16] {
        &self.utf16
    }
}

/// One record of a low-level `SendInput` submission.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputRecord {
    Key { vk: u16, scan_code: u16, key_up: bool },
    Unicode { unit: u16, key_up: bool },
}

/// Key and text actions are the only things a batch can hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchItem {
    Key(KeyPress),
    Text(Text),
}

impl From<KeyPress> for BatchItem {
    fn from(key: KeyPress) -> Self {
        BatchItem::Key(key)
    }
}

impl From<Text> for BatchItem {
    fn from(text: Text) -> Self {
        BatchItem::Text(text)
    }
}

/// Input records synthesized ahead of time for a single atomic injection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Batch {
    records: Vec<InputRecord>,
}

impl Batch {
    /// Flattens key and text items into records, in order.
    ///
    /// A key contributes a down record, an up record, or both, per its phase.
    /// Each UTF-16 unit of a text contributes a Unicode down record followed by
    /// its up record.
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<BatchItem>,
    {
        let mut records = Vec::new();
        for item in items {
            match item.into() {
                BatchItem::Key(key) => push_key_records(&mut records, &key),
                BatchItem::Text(text) => {
                    records.extend(text.utf16().iter().flat_map(|&unit| {
                        [
                            InputRecord::Unicode {
                                unit,
                                key_up: false,
                            },
                            InputRecord::Unicode { unit, key_up: true },
                        ]
                    }));
                }
            }
        }
        Self { records }
    }

    pub fn records(&self) -> &[InputRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn push_key_records(records: &mut Vec<InputRecord>, key: &KeyPress) {
    let record = |key_up| InputRecord::Key {
        vk: key.vk(),
        scan_code: key.scan_code(),
        key_up,
    };
    if key.phase().has_down() {
        records.push(record(false));
    }
    if key.phase().has_up() {
        records.push(record(true));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Key(KeyPress),
    Text(Text),
    /// Block for the given number of milliseconds.
    Wait(u32),
    /// Milliseconds to pause after every following key, text or batch action.
    Delay(u32),
    Encoding(Encoding),
    Delivery(DeliveryMode),
    Batch(Batch),
}

impl Action {
    pub fn text(text: &str) -> Self {
        Action::Text(Text::from_utf8(text))
    }

    pub fn wide_text(units: &[u16]) -> Self {
        Action::Text(Text::from_utf16(units))
    }

    pub fn wait(ms: u32) -> Self {
        Action::Wait(ms)
    }

    pub fn delay(ms: u32) -> Self {
        Action::Delay(ms)
    }

    pub fn batch<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<BatchItem>,
    {
        Action::Batch(Batch::new(items))
    }

    /// Whether the interpreter pauses for the configured delay after this action.
    pub fn is_paced(&self) -> bool {
        matches!(self, Action::Key(_) | Action::Text(_) | Action::Batch(_))
    }

    /// `false` for a wait that is already known to exceed [`MAX_WAIT_MS`].
    ///
    /// The bound is enforced when the action runs; this only lets callers
    /// reject a sequence up front.
    pub fn is_within_wait_bound(&self) -> bool {
        match self {
            Action::Wait(ms) | Action::Delay(ms) => *ms <= MAX_WAIT_MS,
            _ => true,
        }
    }
}

impl From<KeyPress> for Action {
    fn from(key: KeyPress) -> Self {
        Action::Key(key)
    }
}

impl From<Text> for Action {
    fn from(text: Text) -> Self {
        Action::Text(text)
    }
}

impl From<Encoding> for Action {
    fn from(encoding: Encoding) -> Self {
        Action::Encoding(encoding)
    }
}

impl From<DeliveryMode> for Action {
    fn from(mode: DeliveryMode) -> Self {
        Action::Delivery(mode)
    }
}

impl From<Batch> for Action {
    fn from(batch: Batch) -> Self {
        Action::Batch(batch)
    }
}
