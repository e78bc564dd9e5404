use tracing_test::traced_test;

use super::fake_desktop::{Call, FakeDesktop, TARGET, UsLayout};
use crate::{
    action::{Action, BatchItem, DeliveryMode, Encoding, InputRecord, KeyPhase, KeyPress, Text},
    desktop::{MessageKind, WindowMessage},
    error::ErrorKind,
    interpreter::{DEFAULT_DELAY_MS, Interpreter, InterpreterState, interpret},
    keys::VK_RETURN,
    timing::MAX_WAIT_MS,
};

const VK_X: u16 = 0x58;

fn key(vk: u16) -> Action {
    Action::Key(KeyPress::new(vk, KeyPhase::DownAndUp, &UsLayout))
}

fn deliver(mode: DeliveryMode, encoding: Encoding, kind: MessageKind, wparam: usize, lparam: isize) -> Call {
    Call::Deliver {
        window: TARGET,
        mode,
        encoding,
        message: WindowMessage {
            kind,
            wparam,
            lparam,
        },
    }
}

fn post(kind: MessageKind, wparam: usize, lparam: isize) -> Call {
    deliver(DeliveryMode::Post, Encoding::Narrow, kind, wparam, lparam)
}

#[test]
fn key_text_key_delivers_in_order_with_one_delay_after_each() {
    let mut desktop = FakeDesktop::new();
    let actions = [Action::delay(7), key(VK_X), Action::text("t"), key(VK_X)];

    assert_eq!(interpret(&mut desktop, TARGET, &actions), Ok(()));

    let x_down = 0x002D_0001;
    let x_up = 0xC02D_0001_u32 as isize;
    assert_eq!(
        desktop.calls,
        vec![
            post(MessageKind::KeyDown, usize::from(VK_X), x_down),
            post(MessageKind::KeyUp, usize::from(VK_X), x_up),
            Call::Wait(7),
            post(MessageKind::Char, usize::from(b't'), 0),
            Call::Wait(7),
            post(MessageKind::KeyDown, usize::from(VK_X), x_down),
            post(MessageKind::KeyUp, usize::from(VK_X), x_up),
            Call::Wait(7),
        ]
    );
}

#[test]
fn default_state_posts_narrow_with_one_millisecond_delay() {
    let state = InterpreterState::default();
    assert_eq!(state.delay_ms, DEFAULT_DELAY_MS);
    assert_eq!(state.encoding, Encoding::Narrow);
    assert_eq!(state.delivery, DeliveryMode::Post);

    let mut desktop = FakeDesktop::new();
    interpret(&mut desktop, TARGET, &[Action::text("a")]).unwrap();
    assert_eq!(desktop.waits(), vec![DEFAULT_DELAY_MS]);
}

#[test]
fn failure_in_second_action_stops_the_sequence() {
    let mut desktop = FakeDesktop::new();
    // Deliveries: 0 = key down, 1 = key up, 2 = the 't' character.
    desktop.fail_delivery_at = Some(2);
    desktop.last_error = 1400;

    let actions = [key(VK_X), Action::text("t"), key(VK_X)];
    let err = interpret(&mut desktop, TARGET, &actions).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CanNotSendMessage);
    assert_eq!(err.os_code(), Some(1400));
    assert_eq!(err.message(), "Can not post character message.");
    assert_eq!(desktop.deliveries().len(), 3);
    // Only the delay after the first action ran.
    assert_eq!(desktop.waits(), vec![DEFAULT_DELAY_MS]);
}

#[test]
fn send_mode_failure_names_send() {
    let mut desktop = FakeDesktop::new();
    desktop.fail_delivery_at = Some(0);

    let actions = [Action::Delivery(DeliveryMode::Send), key(VK_RETURN)];
    let err = interpret(&mut desktop, TARGET, &actions).unwrap_err();

    assert_eq!(err.message(), "Can not send key down message.");
    assert!(desktop.waits().is_empty());
}

#[test]
fn narrow_text_is_delivered_per_utf8_byte() {
    let mut desktop = FakeDesktop::new();
    interpret(&mut desktop, TARGET, &[Action::text("ś😀")]).unwrap();

    let wparams: Vec<usize> = desktop.deliveries().iter().map(|m| m.wparam).collect();
    let expected: Vec<usize> = "ś😀".bytes().map(usize::from).collect();
    assert_eq!(wparams.len(), 6);
    assert_eq!(wparams, expected);
}

#[test]
fn wide_text_is_delivered_per_utf16_unit() {
    let mut desktop = FakeDesktop::new();
    let actions = [Action::Encoding(Encoding::Wide), Action::text("ś😀")];
    interpret(&mut desktop, TARGET, &actions).unwrap();

    let wparams: Vec<usize> = desktop.deliveries().iter().map(|m| m.wparam).collect();
    assert_eq!(wparams, vec![0x015B, 0xD83D, 0xDE00]);
    assert!(desktop.calls.iter().all(|call| match call {
        Call::Deliver { encoding, .. } => *encoding == Encoding::Wide,
        _ => true,
    }));
}

#[test]
fn modes_apply_to_every_following_action() {
    let mut desktop = FakeDesktop::new();
    let actions = [
        Action::Delivery(DeliveryMode::Send),
        Action::Encoding(Encoding::Wide),
        Action::delay(3),
        key(VK_RETURN),
        Action::Delivery(DeliveryMode::Post),
        Action::text("a"),
    ];
    interpret(&mut desktop, TARGET, &actions).unwrap();

    assert_eq!(
        desktop.calls,
        vec![
            deliver(DeliveryMode::Send, Encoding::Wide, MessageKind::KeyDown, 0x0D, 0x001C_0001),
            deliver(
                DeliveryMode::Send,
                Encoding::Wide,
                MessageKind::KeyUp,
                0x0D,
                0xC01C_0001_u32 as isize
            ),
            Call::Wait(3),
            deliver(DeliveryMode::Post, Encoding::Wide, MessageKind::Char, 0x61, 0),
            Call::Wait(3),
        ]
    );
}

#[test]
fn state_only_actions_have_no_side_effects() {
    let mut desktop = FakeDesktop::new();
    let actions = [
        Action::delay(10),
        Action::Encoding(Encoding::Wide),
        Action::Delivery(DeliveryMode::Send),
    ];
    let mut interpreter = Interpreter::new(&mut desktop, TARGET);
    interpreter.run(&actions).unwrap();

    assert_eq!(
        interpreter.state(),
        InterpreterState {
            delay_ms: 10,
            encoding: Encoding::Wide,
            delivery: DeliveryMode::Send,
        }
    );
    assert!(desktop.calls.is_empty());
}

#[test]
fn key_phases_produce_only_requested_transitions() {
    let mut desktop = FakeDesktop::new();
    let actions = [
        Action::Key(KeyPress::new(VK_RETURN, KeyPhase::Down, &UsLayout)),
        Action::Key(KeyPress::new(VK_RETURN, KeyPhase::Up, &UsLayout)),
    ];
    interpret(&mut desktop, TARGET, &actions).unwrap();

    let kinds: Vec<MessageKind> = desktop.deliveries().iter().map(|m| m.kind).collect();
    assert_eq!(kinds, vec![MessageKind::KeyDown, MessageKind::KeyUp]);
    assert_eq!(desktop.waits().len(), 2);
}

#[test]
fn wait_action_waits_once_without_trailing_delay() {
    let mut desktop = FakeDesktop::new();
    interpret(&mut desktop, TARGET, &[Action::delay(4), Action::wait(250)]).unwrap();
    assert_eq!(desktop.calls, vec![Call::Wait(250)]);
}

#[test]
fn oversized_wait_is_fatal() {
    let mut desktop = FakeDesktop::new();
    let actions = [Action::wait(MAX_WAIT_MS + 1), key(VK_RETURN)];
    let err = interpret(&mut desktop, TARGET, &actions).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CanNotWait);
    assert_eq!(err.os_code(), None);
    assert!(err.message().contains("from a wait action"));
    assert!(err.message().contains("DURATION_TOO_LARGE"));
    assert!(desktop.deliveries().is_empty());
}

#[test]
fn oversized_delay_fails_after_the_first_paced_action() {
    let mut desktop = FakeDesktop::new();
    let actions = [Action::delay(MAX_WAIT_MS + 1), Action::text("a"), Action::text("b")];
    let err = interpret(&mut desktop, TARGET, &actions).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CanNotWait);
    assert!(err.message().contains("after delivering an action"));
    assert_eq!(desktop.deliveries().len(), 1);
}

#[test]
fn batch_is_injected_once_regardless_of_modes() {
    let mut desktop = FakeDesktop::new();
    let batch = Action::batch([
        BatchItem::Key(KeyPress::new(VK_RETURN, KeyPhase::DownAndUp, &UsLayout)),
        BatchItem::Text(Text::from_utf8("k")),
    ]);
    let actions = [
        Action::Delivery(DeliveryMode::Send),
        Action::Encoding(Encoding::Narrow),
        Action::delay(2),
        batch,
    ];
    interpret(&mut desktop, TARGET, &actions).unwrap();

    assert_eq!(
        desktop.calls,
        vec![
            Call::Inject(vec![
                InputRecord::Key {
                    vk: VK_RETURN,
                    scan_code: 0x1C,
                    key_up: false
                },
                InputRecord::Key {
                    vk: VK_RETURN,
                    scan_code: 0x1C,
                    key_up: true
                },
                InputRecord::Unicode {
                    unit: 0x6B,
                    key_up: false
                },
                InputRecord::Unicode {
                    unit: 0x6B,
                    key_up: true
                },
            ]),
            Call::Wait(2),
        ]
    );
}

#[test]
fn rejected_batch_reports_send_failure() {
    let mut desktop = FakeDesktop::new();
    desktop.fail_inject = true;
    desktop.last_error = 87;

    let actions = [Action::batch([Text::from_utf8("x")]), key(VK_RETURN)];
    let err = interpret(&mut desktop, TARGET, &actions).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CanNotSendMessage);
    assert_eq!(err.os_code(), Some(87));
    assert!(desktop.deliveries().is_empty());
}

#[test]
fn empty_batch_skips_injection_but_keeps_pacing() {
    let mut desktop = FakeDesktop::new();
    interpret(&mut desktop, TARGET, &[Action::batch(Vec::<Text>::new())]).unwrap();
    assert_eq!(desktop.calls, vec![Call::Wait(DEFAULT_DELAY_MS)]);
}

#[traced_test]
#[test]
fn delivery_failure_is_traced_with_os_code() {
    let mut desktop = FakeDesktop::new();
    desktop.fail_delivery_at = Some(0);
    desktop.last_error = 1400;

    let _ = interpret(&mut desktop, TARGET, &[Action::text("a")]);

    assert!(logs_contain("delivery failed"));
    assert!(logs_contain("code=1400"));
}
