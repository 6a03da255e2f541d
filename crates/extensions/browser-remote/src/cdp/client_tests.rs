    use super::*;

fn pending_with(id: u64) -> (PendingMap, oneshot::Receiver<Result<Value, CdpError>>) {
    let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
    let (tx, rx) = oneshot::channel();
    pending.lock().insert(id, tx);
    (pending, rx)
}

#[tokio::test]
async fn test_dispatch_result() {
    let (pending, rx) = pending_with(4);
    let resp: CdpResponse = serde_json::from_str(r#"{"id": 4, "result": {"ok": true}}"#).unwrap();
    dispatch_response(resp, &pending);

    let value = rx.await.unwrap().unwrap();
    assert_eq!(value["ok"], true);
    assert!(pending.lock().is_empty());
}

#[tokio::test]
async fn test_dispatch_protocol_error() {
    let (pending, rx) = pending_with(9);
    let resp: CdpResponse =
        serde_json::from_str(r#"{"id": 9, "error": {"code": -32601, "message": "not found"}}"#)
            .unwrap();
    dispatch_response(resp, &pending);

    let err = rx.await.unwrap().unwrap_err();
    assert!(matches!(err, CdpError::Protocol { code: -32601, .. }));
}

#[tokio::test]
async fn test_dispatch_missing_result_is_null() {
    let (pending, rx) = pending_with(1);
    let resp: CdpResponse = serde_json::from_str(r#"{"id": 1}"#).unwrap();
    dispatch_response(resp, &pending);
    assert_eq!(rx.await.unwrap().unwrap(), Value::Null);
}

#[test]
fn test_dispatch_ignores_events_and_unknown_ids() {
    let (pending, _rx) = pending_with(2);
    let event: CdpResponse =
        serde_json::from_str(r#"{"method": "Page.frameNavigated", "params": {}}"#).unwrap();
    dispatch_response(event, &pending);
    let other: CdpResponse = serde_json::from_str(r#"{"id": 77, "result": {}}"#).unwrap();
    dispatch_response(other, &pending);

    assert!(pending.lock().contains_key(&2));
}

#[tokio::test]
async fn test_connect_unreachable_endpoint() {
    let result = CdpClient::connect("http://127.0.0.1:1").await;
    assert!(matches!(result, Err(CdpError::BrowserNotAvailable(_))));
}

#[tokio::test]
async fn test_connect_ws_rejects_invalid_url() {
    let result = CdpClient::connect_ws("not a url").await;
    assert!(matches!(result, Err(CdpError::ConnectionFailed(_))));
}
