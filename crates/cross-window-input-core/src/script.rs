//! Action sequences written as short step tokens.
//!
//! ```text
//! key:RETURN  down:SHIFT  up:SHIFT  text:/kills  wait:100  delay:10
//! mode:post|send  encoding:narrow|wide  [ key:RETURN text:hi ]
//! ```
//!
//! Steps between `[` and `]` become one batch; only key and text steps may
//! appear there.

use crate::{
    action::{Action, BatchItem, DeliveryMode, Encoding, KeyPhase, KeyPress, KeyboardLayout, Text},
    keys::vk_from_name,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("step {index}: unknown step `{token}`")]
    UnknownStep { index: usize, token: String },
    #[error("step {index}: unknown key `{name}`")]
    UnknownKey { index: usize, name: String },
    #[error("step {index}: `{value}` is not a number of milliseconds")]
    BadNumber { index: usize, value: String },
    #[error("step {index}: unknown mode `{value}`")]
    UnknownMode { index: usize, value: String },
    #[error("step {index}: batches can not be nested")]
    NestedBatch { index: usize },
    #[error("step {index}: `]` without a matching `[`")]
    UnmatchedClose { index: usize },
    #[error("batch opened at step {index} is never closed")]
    UnclosedBatch { index: usize },
    #[error("step {index}: only key and text steps can be batched")]
    NotBatchable { index: usize },
}

pub fn parse_steps<I, S, L>(tokens: I, layout: &L) -> Result<Vec<Action>, ScriptError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    L: KeyboardLayout + ?Sized,
{
    let mut actions = Vec::new();
    let mut open_batch: Option<(usize, Vec<BatchItem>)> = None;

    for (index, token) in tokens.into_iter().enumerate() {
        let token = token.as_ref();
        match token {
            "[" => {
                if open_batch.is_some() {
                    return Err(ScriptError::NestedBatch { index });
                }
                open_batch = Some((index, Vec::new()));
            }
            "]" => {
                let (_, items) = open_batch
                    .take()
                    .ok_or(ScriptError::UnmatchedClose { index })?;
                actions.push(Action::batch(items));
            }
            _ => {
                let action = parse_step(index, token, layout)?;
                match (&mut open_batch, action) {
                    (Some((_, items)), Action::Key(key)) => items.push(key.into()),
                    (Some((_, items)), Action::Text(text)) => items.push(text.into()),
                    (Some(_), _) => return Err(ScriptError::NotBatchable { index }),
                    (None, action) => actions.push(action),
                }
            }
        }
    }

    if let Some((index, _)) = open_batch {
        return Err(ScriptError::UnclosedBatch { index });
    }
    Ok(actions)
}

fn parse_step<L>(index: usize, token: &str, layout: &L) -> Result<Action, ScriptError>
where
    L: KeyboardLayout + ?Sized,
{
    let unknown = || ScriptError::UnknownStep {
        index,
        token: token.to_owned(),
    };
    let (kind, value) = token.split_once(':').ok_or_else(unknown)?;

    let key = |phase| {
        vk_from_name(value)
            .map(|vk| Action::Key(KeyPress::new(vk, phase, layout)))
            .ok_or_else(|| ScriptError::UnknownKey {
                index,
                name: value.to_owned(),
            })
    };
    let millis = || {
        value.trim().parse::<u32>().map_err(|_| ScriptError::BadNumber {
            index,
            value: value.to_owned(),
        })
    };
    let bad_mode = || ScriptError::UnknownMode {
        index,
        value: value.to_owned(),
    };

    match kind.to_ascii_lowercase().as_str() {
        "key" => key(KeyPhase::DownAndUp),
        "down" => key(KeyPhase::Down),
        "up" => key(KeyPhase::Up),
        "text" => Ok(Action::Text(Text::from_utf8(value))),
        "wait" => millis().map(Action::Wait),
        "delay" => millis().map(Action::Delay),
        "mode" => match value.to_ascii_lowercase().as_str() {
            "post" => Ok(Action::Delivery(DeliveryMode::Post)),
            "send" => Ok(Action::Delivery(DeliveryMode::Send)),
            _ => Err(bad_mode()),
        },
        "encoding" => match value.to_ascii_lowercase().as_str() {
            "narrow" | "utf8" => Ok(Action::Encoding(Encoding::Narrow)),
            "wide" | "utf16" => Ok(Action::Encoding(Encoding::Wide)),
            _ => Err(bad_mode()),
        },
        _ => Err(unknown()),
    }
}
