use crate::model::*;
use crate::Error;
use serde_json::json;

#[test]
fn diagram_deserializes_from_json_with_defaults() {
    let diagram = Diagram::from_value(json!({
        "title": "Login",
        "actors": [{ "name": "Client" }, { "name": "Server", "icon": "cylinder" }],
        "events": [
            { "type": "message", "from": 0, "to": 1, "label": "hello" },
            { "type": "message", "from": 1, "to": 0, "label": "ok",
              "arrow": { "stem": "dashed", "head": "open" } },
            { "type": "note", "actor": 0, "position": "left_of", "text": "thinking" },
            { "type": "block_start", "kind": "loop", "condition": "every second" },
            { "type": "divider", "dividerType": "gap" },
            { "type": "block_end" }
        ],
        "processingInstructions": [{ "prefix": "seqdraw", "value": "out.svg" }]
    }))
    .unwrap();

    assert_eq!(diagram.title.as_deref(), Some("Login"));
    assert_eq!(diagram.actors[1].icon.as_deref(), Some("cylinder"));
    assert_eq!(diagram.events[0], Event::message(0, 1, "hello"));
    let Event::Message(reply) = &diagram.events[1] else {
        panic!("expected message");
    };
    assert_eq!(reply.arrow.stem, ArrowStem::Dashed);
    assert_eq!(reply.arrow.head, ArrowHead::Open);
    assert_eq!(reply.arrow.direction, ArrowDirection::Forward);
    assert_eq!(diagram.events[2], Event::note(0, NotePosition::LeftOf, "thinking"));
    assert_eq!(diagram.events[4], Event::divider(DividerType::Gap, ""));
    assert_eq!(diagram.events[5], Event::BlockEnd);
    assert_eq!(diagram.processing_instructions.len(), 1);
    diagram.validate().unwrap();
}

#[test]
fn unknown_enumeration_values_name_the_field() {
    let err = Diagram::from_value(json!({
        "actors": [{ "name": "A" }],
        "events": [{ "type": "note", "actor": 0, "position": "under", "text": "x" }]
    }))
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("note placement"), "{msg}");
    assert!(msg.contains("under"), "{msg}");

    let err = "spiky".parse::<ArrowHead>().unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownValue { field: "arrow head", ref value } if value == "spiky"
    ));
}

#[test]
fn enum_names_round_trip_through_from_str() {
    for head in ArrowHead::ALL {
        assert_eq!(head.as_str().parse::<ArrowHead>().unwrap(), *head);
    }
    for ty in DividerType::ALL {
        assert_eq!(ty.to_string().parse::<DividerType>().unwrap(), *ty);
    }
    assert_eq!(
        serde_json::to_value(NotePosition::RightOf).unwrap(),
        json!("right_of")
    );
}

#[test]
fn validate_rejects_out_of_range_actor_references() {
    let mut d = Diagram::new();
    d.push_actor(Actor::new("A"));
    d.push_event(Event::message(0, 3, "lost"));
    let err = d.validate().unwrap_err();
    assert!(matches!(err, Error::InvalidModel { .. }));
    assert!(err.to_string().contains("actor 3"));
}

#[test]
fn validate_rejects_unbalanced_blocks() {
    let mut d = Diagram::new();
    d.push_actor(Actor::new("A"));
    d.push_event(Event::BlockEnd);
    assert!(d.validate().is_err());

    let mut d = Diagram::new();
    d.push_actor(Actor::new("A"));
    d.push_event(Event::block_start("alt", "ok"));
    d.push_event(Event::message(0, 0, "self"));
    let err = d.validate().unwrap_err();
    assert!(err.to_string().contains("left open"));
}

#[test]
fn block_segments_belong_to_an_open_block() {
    let d = Diagram::from_value(json!({
        "actors": [{ "name": "A" }, { "name": "B" }],
        "events": [
            { "type": "block_start", "kind": "alt", "condition": "ok" },
            { "type": "message", "from": 0, "to": 1 },
            { "type": "block_segment", "condition": "else" },
            { "type": "message", "from": 1, "to": 0 },
            { "type": "block_end" }
        ]
    }))
    .unwrap();
    assert_eq!(d.events[2], Event::block_segment("else"));
    d.validate().unwrap();

    let mut stray = Diagram::new();
    stray.push_actor(Actor::new("A"));
    stray.push_event(Event::block_segment("else"));
    let err = stray.validate().unwrap_err();
    assert!(err.to_string().contains("outside of any block"), "{err}");
}

#[test]
fn empty_diagram_is_valid() {
    Diagram::new().validate().unwrap();
    assert_eq!(Diagram::from_json_str("{}").unwrap(), Diagram::default());
}
