use super::*;

#[test]
fn test_action_kind_round_trips_through_str() {
    for kind in ActionKind::ALL {
        assert_eq!(kind.as_str().parse::<ActionKind>().unwrap(), kind);
    }
}

#[test]
fn test_unknown_action() {
    let err = "bogus".parse::<ActionKind>().unwrap_err();
    assert_eq!(err, UnknownAction("bogus".to_string()));
    assert_eq!(err.to_string(), "Unknown action: bogus");
}

#[test]
fn test_action_kind_is_case_sensitive() {
    assert!("Navigate".parse::<ActionKind>().is_err());
}

#[test]
fn test_command_accepts_command_key() {
    let json = r#"{"action": "navigate", "command": "go to example.com", "parameters": {}, "confidence": 0.95}"#;
    let command: Command = serde_json::from_str(json).unwrap();
    assert_eq!(command.action, "navigate");
    assert_eq!(command.instruction, "go to example.com");
    assert_eq!(command.parameters, Some(Map::new()));
    assert_eq!(command.confidence, Some(0.95));
    assert_eq!(command.kind().unwrap(), ActionKind::Navigate);
}

#[test]
fn test_command_accepts_instruction_key() {
    let json = r#"{"action": "act", "instruction": "click search"}"#;
    let command: Command = serde_json::from_str(json).unwrap();
    assert_eq!(command.instruction, "click search");
    assert!(command.parameters.is_none());
    assert!(command.confidence.is_none());
}

#[test]
fn test_command_null_parameters() {
    let json = r#"{"action": "observe", "command": "what is here", "parameters": null}"#;
    let command: Command = serde_json::from_str(json).unwrap();
    assert!(command.parameters.is_none());
}

#[test]
fn test_command_requires_action() {
    let json = r#"{"command": "go somewhere"}"#;
    assert!(serde_json::from_str::<Command>(json).is_err());
}

#[test]
fn test_unknown_action_parses_but_fails_kind() {
    let command: Command = serde_json::from_str(r#"{"action": "bogus", "command": "x"}"#).unwrap();
    assert!(command.kind().is_err());
}

#[test]
fn test_batch_from_single_object() {
    let batch: CommandBatch =
        serde_json::from_str(r#"{"action": "act", "command": "click"}"#).unwrap();
    let commands = batch.into_commands();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].instruction, "click");
}

#[test]
fn test_batch_from_array_keeps_order() {
    let batch: CommandBatch = serde_json::from_str(
        r#"[{"action": "navigate", "command": "a.com"}, {"action": "act", "command": "click"}]"#,
    )
    .unwrap();
    let commands = batch.into_commands();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0].action, "navigate");
    assert_eq!(commands[1].action, "act");
}

#[test]
fn test_empty_batch() {
    let batch = CommandBatch::from(Vec::new());
    assert!(batch.into_commands().is_empty());
}

#[test]
fn test_command_string_confidence_is_parsed() {
    let json = r#"{"action": "navigate", "command": "go to example.com", "confidence": "0.9"}"#;
    let command: Command = serde_json::from_str(json).unwrap();
    assert_eq!(command.confidence, Some(0.9));
}

#[test]
fn test_command_unusable_confidence_is_dropped() {
    let json = r#"{"action": "act", "command": "click", "confidence": "high"}"#;
    let command: Command = serde_json::from_str(json).unwrap();
    assert_eq!(command.instruction, "click");
    assert!(command.confidence.is_none());
}

#[test]
fn test_command_non_object_parameters_are_dropped() {
    let json = r#"{"action": "act", "command": "click", "parameters": []}"#;
    let command: Command = serde_json::from_str(json).unwrap();
    assert!(command.parameters.is_none());
}

#[test]
fn test_command_prefers_command_key_over_instruction() {
    let json = r#"{"action": "act", "command": "click search", "instruction": "click"}"#;
    let command: Command = serde_json::from_str(json).unwrap();
    assert_eq!(command.instruction, "click search");
}

#[test]
fn test_command_empty_command_key_falls_back_to_instruction() {
    let json = r#"{"action": "act", "command": "", "instruction": "click"}"#;
    let command: Command = serde_json::from_str(json).unwrap();
    assert_eq!(command.instruction, "click");
}

#[test]
fn test_command_serializes_instruction_key() {
    let mut command = Command::new("extract", "get the title");
    command.confidence = Some(0.5);
    let value = serde_json::to_value(&command).unwrap();
    assert_eq!(value["instruction"], "get the title");
    assert_eq!(value["confidence"], 0.5);
    assert!(value.get("parameters").is_none());

    let back: Command = serde_json::from_value(value).unwrap();
    assert_eq!(back, command);
}
