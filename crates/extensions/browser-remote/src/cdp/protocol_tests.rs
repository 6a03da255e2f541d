    use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 1,
        method: "Page.navigate".to_string(),
        params: Some(serde_json::json!({"url": "https://example.com"})),
        session_id: Some("sess-1".to_string()),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["method"], "Page.navigate");
    assert_eq!(json["params"]["url"], "https://example.com");
    assert_eq!(json["sessionId"], "sess-1");
}

#[test]
fn test_cdp_request_omits_empty_fields() {
    let req = CdpRequest {
        id: 7,
        method: "Target.getTargets".to_string(),
        params: None,
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(!json.contains("params"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_cdp_response_deserialize() {
    let json = r#"{"id": 1, "result": {"frameId": "abc"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(1));
    assert_eq!(resp.result.unwrap()["frameId"], "abc");
}

#[test]
fn test_cdp_error_response_deserialize() {
    let json = r#"{"id": 3, "error": {"code": -32000, "message": "Cannot navigate to invalid URL"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    let error = resp.error.unwrap();
    assert_eq!(error.code, -32000);
}

#[test]
fn test_cdp_event_deserialize() {
    let json = r#"{"method": "Page.loadEventFired", "params": {"timestamp": 1.0}, "sessionId": "s"}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert!(resp.id.is_none());
    assert_eq!(resp.method.as_deref(), Some("Page.loadEventFired"));
}

#[test]
fn test_browser_version_deserialize() {
    let json = r#"{
        "Browser": "HeadlessChrome/120.0.6099.109",
        "Protocol-Version": "1.3",
        "User-Agent": "Mozilla/5.0",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/abc"
    }"#;
    let version: BrowserVersion = serde_json::from_str(json).unwrap();
    assert_eq!(version.web_socket_debugger_url, "ws://localhost:9222/devtools/browser/abc");
}

#[test]
fn test_target_info_deserialize() {
    let json = r#"{"targetId": "T1", "type": "page", "title": "", "url": "about:blank", "attached": false}"#;
    let target: TargetInfo = serde_json::from_str(json).unwrap();
    assert_eq!(target.target_id, "T1");
    assert_eq!(target.target_type, "page");
}

#[test]
fn test_enums_serialize() {
    assert_eq!(serde_json::to_value(MouseEventType::MousePressed).unwrap(), "mousePressed");
    assert_eq!(serde_json::to_value(KeyEventType::KeyUp).unwrap(), "keyUp");
    assert_eq!(serde_json::to_value(ScreenshotFormat::Png).unwrap(), "png");
    assert_eq!(serde_json::to_value(MouseButton::Left).unwrap(), "left");
}
