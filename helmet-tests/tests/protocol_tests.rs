//! Integration Tests für das WebSocket-Protokoll
//!
//! JSON rein → ControlCommand, Notification → JSON raus

use helmet_core::protocol::{ProtocolError, encode_notification, parse_command};
use helmet_core::{
    EffectKind, LogEvent, MelodyChoice, MelodyName, Notification, Word, WordList,
};
use rgb::RGB8;

fn encode(notification: &Notification) -> String {
    let mut buffer = [0u8; 128];
    let n = encode_notification(notification, &mut buffer).unwrap();
    String::from_utf8(buffer[..n].to_vec()).unwrap()
}

// ============================================================================
// Tests: Eingehende Kommandos
// ============================================================================

#[test]
fn test_parse_all_fields_at_once() {
    let json = br##"{"timer":30,"word":"cat","remove":"dog","melody":"nokia","start":true,"colors":["#FF0000","#00FF00"],"effect":"blink"}"##;
    let command = parse_command(json).unwrap();

    assert_eq!(command.timer_secs, Some(30));
    assert_eq!(command.add_word.as_deref(), Some("cat"));
    assert_eq!(command.remove_word.as_deref(), Some("dog"));
    assert_eq!(command.melody, Some(MelodyChoice::Tune(MelodyName::Nokia)));
    assert!(command.start);

    let lighting = command.lighting.unwrap();
    assert_eq!(lighting.effect, Some(EffectKind::Blink));
    assert_eq!(
        lighting.palette.as_slice(),
        [RGB8 { r: 255, g: 0, b: 0 }, RGB8 { r: 0, g: 255, b: 0 }]
    );
}

#[test]
fn test_parse_unknown_effect_keeps_palette() {
    let command = parse_command(br##"{"colors":["#0000FF"],"effect":"rainbow"}"##).unwrap();
    let lighting = command.lighting.unwrap();
    assert_eq!(lighting.effect, None);
    assert_eq!(lighting.palette.len(), 1);
}

#[test]
fn test_parse_invalid_hex_becomes_black() {
    let command = parse_command(br##"{"colors":["nope"],"effect":"solid"}"##).unwrap();
    assert_eq!(command.lighting.unwrap().palette[0], RGB8::default());
}

#[test]
fn test_parse_overlong_word_is_discarded() {
    let json = br#"{"word":"abcdefghijklmnopqrstuvwxyzabcdefghij"}"#;
    assert_eq!(parse_command(json), Err(ProtocolError::Malformed));
}

#[test]
fn test_escaped_word_survives_add_remove_and_broadcast() {
    let added = parse_command(br#"{"word":"say \"hi\""}"#).unwrap().add_word.unwrap();
    assert_eq!(added.as_str(), r#"say "hi""#);
    assert_eq!(added.len(), 8);

    assert_eq!(
        encode(&Notification::Word(added.clone())),
        r#"{"word":"say \"hi\""}"#
    );

    let mut words = WordList::new();
    assert!(words.add(added));
    let removed = parse_command(br#"{"remove":"say \"hi\""}"#)
        .unwrap()
        .remove_word
        .unwrap();
    assert_eq!(words.remove(&removed), Some(0));
    assert!(words.is_empty());
}

#[test]
fn test_parse_word_length_counts_unescaped_bytes() {
    // 30 Buchstaben + 2 Anführungszeichen = 32 Bytes, roh aber 34
    let json = br#"{"word":"abcdefghijklmnopqrstuvwxyzabcd\"\""}"#;
    let word = parse_command(json).unwrap().add_word.unwrap();
    assert_eq!(word.len(), 32);
    assert!(word.ends_with(r#""""#));

    let json = br#"{"word":"\u00e9t\u00e9"}"#;
    assert_eq!(parse_command(json).unwrap().add_word.as_deref(), Some("été"));
}

#[test]
fn test_parse_malformed_json_is_discarded() {
    assert_eq!(parse_command(br#"{"timer":"#), Err(ProtocolError::Malformed));
    assert_eq!(parse_command(br#"{"timer":"ten"}"#), Err(ProtocolError::Malformed));
    assert_eq!(parse_command(b""), Err(ProtocolError::Malformed));
}

#[test]
fn test_parse_too_many_colors_is_discarded() {
    let colors = vec!["\"#FFFFFF\""; 17].join(",");
    let json = format!(r#"{{"colors":[{}],"effect":"solid"}}"#, colors);
    assert_eq!(parse_command(json.as_bytes()), Err(ProtocolError::Malformed));
}

// ============================================================================
// Tests: Ausgehende Benachrichtigungen
// ============================================================================

#[test]
fn test_encode_word_and_game_over() {
    let word = Notification::Word(Word::try_from("dog").unwrap());
    assert_eq!(encode(&word), r#"{"word":"dog"}"#);
    assert_eq!(encode(&Notification::GameOver), r#"{"word":"Game Over"}"#);
}

#[test]
fn test_encode_logs() {
    assert_eq!(
        encode(&Notification::Log(LogEvent::HeadNod)),
        r#"{"log":"MPU6050: Head nod detected"}"#
    );
    assert_eq!(
        encode(&Notification::Log(LogEvent::EffectChanged(EffectKind::Breathing))),
        "{\"log\":\"Rotary Encoder turned \u{2014} Effect: breathing\"}"
    );
}
