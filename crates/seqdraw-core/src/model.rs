//! The semantic sequence diagram model.
//!
//! This is the hand-off point between a front-end (a DSL parser, a JSON document, or code) and
//! the layout engine. The model is plain data: actors are referenced by their index in
//! [`Diagram::actors`], events are laid out top to bottom in the order they appear.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a closed string-keyed enumeration.
///
/// Unknown names are rejected with [`Error::UnknownValue`] naming the field, both through
/// [`FromStr`] and when deserializing.
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim() {
                    $($text => Ok($name::$variant),)+
                    other => Err(Error::unknown($field, other)),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(value: String) -> Result<Self> {
                value.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

named_enum! {
    /// Stroke of the message line.
    ArrowStem, "arrow stem" {
        #[default]
        Solid => "solid",
        Dashed => "dashed",
        Thick => "thick",
    }
}

named_enum! {
    ArrowHead, "arrow head" {
        /// Filled triangle.
        #[default]
        Solid => "solid",
        /// Outlined triangle.
        Open => "open",
        /// Single upper barb.
        Barb => "barb",
        /// Single lower barb.
        LowerBarb => "lower_barb",
    }
}

named_enum! {
    ArrowDirection, "message direction" {
        /// A head at the receiving end only.
        #[default]
        Forward => "forward",
        /// Heads at both ends.
        Both => "both",
    }
}

named_enum! {
    /// Where a note sits relative to its actor's lifeline.
    NotePosition, "note placement" {
        LeftOf => "left_of",
        RightOf => "right_of",
        #[default]
        Over => "over",
    }
}

named_enum! {
    DividerType, "divider type" {
        /// A blank band that interrupts the lifelines.
        Gap => "gap",
        /// A framed band across the diagram.
        Frame => "frame",
        /// A horizontal rule with an optional centered label.
        #[default]
        Line => "line",
        /// Vertical space only.
        Spacer => "spacer",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub processing_instructions: Vec<ProcessingInstruction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    /// Name of a built-in icon drawn instead of a box (e.g. `human`).
    #[serde(default)]
    pub icon: Option<String>,
}

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
        }
    }

    pub fn with_icon(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: Some(icon.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Message(Message),
    Note(Note),
    BlockStart(BlockStart),
    /// Starts the next segment of the innermost open block (the `else` branch of an `alt`).
    BlockSegment(BlockSegment),
    BlockEnd,
    Divider(Divider),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrow {
    #[serde(default)]
    pub stem: ArrowStem,
    #[serde(default)]
    pub head: ArrowHead,
    #[serde(default)]
    pub direction: ArrowDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub from: usize,
    pub to: usize,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub arrow: Arrow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub actor: usize,
    /// Second actor for a note stretched over two lifelines. Only meaningful for
    /// [`NotePosition::Over`].
    #[serde(default)]
    pub span_to: Option<usize>,
    #[serde(default)]
    pub position: NotePosition,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStart {
    /// Block keyword shown in the frame's tag (`alt`, `loop`, `opt`, ...).
    pub kind: String,
    #[serde(default)]
    pub condition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSegment {
    #[serde(default)]
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Divider {
    #[serde(default)]
    pub divider_type: DividerType,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingInstruction {
    pub prefix: String,
    pub value: String,
}

impl Event {
    pub fn message(from: usize, to: usize, label: impl Into<String>) -> Self {
        Event::Message(Message {
            from,
            to,
            label: label.into(),
            arrow: Arrow::default(),
        })
    }

    pub fn note(actor: usize, position: NotePosition, text: impl Into<String>) -> Self {
        Event::Note(Note {
            actor,
            span_to: None,
            position,
            text: text.into(),
        })
    }

    pub fn block_start(kind: impl Into<String>, condition: impl Into<String>) -> Self {
        Event::BlockStart(BlockStart {
            kind: kind.into(),
            condition: condition.into(),
        })
    }

    pub fn block_segment(condition: impl Into<String>) -> Self {
        Event::BlockSegment(BlockSegment {
            condition: condition.into(),
        })
    }

    pub fn divider(divider_type: DividerType, label: impl Into<String>) -> Self {
        Event::Divider(Divider {
            divider_type,
            label: label.into(),
        })
    }
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Appends an actor and returns its index.
    pub fn push_actor(&mut self, actor: Actor) -> usize {
        self.actors.push(actor);
        self.actors.len() - 1
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Checks the structural invariants the layout relies on: every actor reference is in range,
    /// block open/close events are balanced and segments only appear inside a block.
    pub fn validate(&self) -> Result<()> {
        let actor_count = self.actors.len();
        let check_actor = |event_idx: usize, actor: usize| -> Result<()> {
            if actor >= actor_count {
                return Err(Error::invalid_model(format!(
                    "event {event_idx} references actor {actor} but only {actor_count} actor(s) are declared"
                )));
            }
            Ok(())
        };

        let mut open_blocks = 0usize;
        for (idx, event) in self.events.iter().enumerate() {
            match event {
                Event::Message(msg) => {
                    check_actor(idx, msg.from)?;
                    check_actor(idx, msg.to)?;
                }
                Event::Note(note) => {
                    check_actor(idx, note.actor)?;
                    if let Some(other) = note.span_to {
                        check_actor(idx, other)?;
                    }
                }
                Event::BlockStart(_) => open_blocks += 1,
                Event::BlockSegment(_) => {
                    if open_blocks == 0 {
                        return Err(Error::invalid_model(format!(
                            "event {idx} starts a block segment outside of any block"
                        )));
                    }
                }
                Event::BlockEnd => {
                    if open_blocks == 0 {
                        return Err(Error::invalid_model(format!(
                            "event {idx} closes a block that was never opened"
                        )));
                    }
                    open_blocks -= 1;
                }
                Event::Divider(_) => {}
            }
        }

        if open_blocks > 0 {
            return Err(Error::invalid_model(format!(
                "{open_blocks} block(s) left open at the end of the diagram"
            )));
        }
        Ok(())
    }
}
