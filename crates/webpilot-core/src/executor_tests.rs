    use super::*;
    use crate::mocks::{MockHandle, SCREENSHOT};
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use webpilot_protocols::RemoteBrowser;

    fn session_with(handle: Arc<MockHandle>) -> Session {
        Session::new("s1", RemoteBrowser::new(handle))
    }

    fn setup() -> (Arc<MockHandle>, Session) {
        let handle = Arc::new(MockHandle::default());
        let session = session_with(handle.clone());
        (handle, session)
    }

    #[tokio::test]
    async fn test_single_command_result_is_raw_payload() {
        let (handle, session) = setup();

        let response = ActionExecutor::new()
            .execute(&session, Command::new("navigate", "go to example.com"))
            .await;

        assert!(response.success);
        assert_eq!(response.results, Some(json!({"navigatedTo": "https://example.com"})));
        assert_eq!(response.messages, vec!["Executed: go to example.com"]);
        assert_eq!(response.screenshot.as_deref(), Some(SCREENSHOT));
        assert_eq!(
            handle.calls(),
            vec!["goto:https://example.com:Load", "screenshot:Png:false"]
        );
    }

    #[tokio::test]
    async fn test_multiple_commands_results_are_ordered_list() {
        let (handle, session) = setup();
        let batch = vec![
            Command::new("navigate", "open http://example.com"),
            Command::new("act", "click the login button"),
            Command::new("observe", "what can I click"),
        ];

        let response = ActionExecutor::new().execute(&session, batch).await;

        assert!(response.success);
        let results = response.results.unwrap();
        let results = results.as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], json!({"navigatedTo": "http://example.com"}));
        assert_eq!(results[1]["action"], "click the login button");
        assert_eq!(response.messages.len(), 3);
        assert_eq!(response.messages[2], "Executed: what can I click");
        assert_eq!(handle.screenshot_count(), 1);
    }

    #[tokio::test]
    async fn test_extract_uses_open_schema() {
        let (handle, session) = setup();

        let response = ActionExecutor::new()
            .execute(&session, Command::new("extract", "get all links"))
            .await;

        assert!(response.success);
        assert_eq!(response.results, Some(json!({"data": ["a", "b"]})));
        let expected = format!("extract:get all links:{}", extraction_schema());
        assert_eq!(handle.calls()[0], expected);
    }

    #[tokio::test]
    async fn test_agent_execute_reuses_agent() {
        let (handle, session) = setup();
        let executor = ActionExecutor::new();

        let first = executor
            .execute(&session, Command::new("agent_execute", "find the cheapest car"))
            .await;
        executor
            .execute(&session, Command::new("agent_execute", "now open it"))
            .await;

        assert!(first.success);
        assert_eq!(first.results.unwrap()["message"], "find the cheapest car");
        assert_eq!(handle.agents_created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_commands() {
        let (handle, session) = setup();
        let batch = vec![
            Command::new("navigate", "badscheme://x"),
            Command::new("act", "click button"),
        ];

        let response = ActionExecutor::new().execute(&session, batch).await;

        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some(FAILURE_MESSAGE));
        assert!(response.error.unwrap().contains("badscheme://x"));
        assert!(response.screenshot.is_none());
        assert!(response.results.is_none());
        assert!(!handle.calls().iter().any(|c| c.starts_with("act:")));
        assert_eq!(handle.screenshot_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_action_fails_without_screenshot() {
        let (handle, session) = setup();

        let response = ActionExecutor::new()
            .execute(&session, Command::new("bogus", "do something"))
            .await;

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Unknown action: bogus"));
        assert_eq!(handle.screenshot_count(), 0);
        assert!(handle.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_action_mid_batch_stops_later_commands() {
        let (handle, session) = setup();
        let batch = vec![
            Command::new("act", "type hello"),
            Command::new("teleport", "somewhere"),
            Command::new("act", "press enter"),
        ];

        let response = ActionExecutor::new().execute(&session, batch).await;

        assert!(!response.success);
        assert_eq!(handle.calls(), vec!["act:type hello"]);
    }

    #[tokio::test]
    async fn test_screenshot_failure_fails_batch() {
        let handle = Arc::new(MockHandle {
            fail_screenshot: true,
            ..Default::default()
        });
        let session = session_with(handle);

        let response = ActionExecutor::new()
            .execute(&session, Command::new("act", "scroll down"))
            .await;

        assert!(!response.success);
        assert!(response.error.unwrap().contains("target closed"));
    }

    #[tokio::test]
    async fn test_empty_batch_still_captures_screenshot() {
        let (handle, session) = setup();

        let response = ActionExecutor::new().execute(&session, Vec::<Command>::new()).await;

        assert!(response.success);
        assert_eq!(response.results, Some(json!([])));
        assert!(response.messages.is_empty());
        assert_eq!(handle.screenshot_count(), 1);
    }

    #[tokio::test]
    async fn test_execute_touches_session() {
        let (_handle, session) = setup();
        let before = session.last_activity();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        ActionExecutor::new()
            .execute(&session, Command::new("bogus", "x"))
            .await;

        assert!(session.last_activity() > before);
    }
