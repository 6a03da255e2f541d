    use super::*;
    use crate::mocks::{MockEngine, MockHandle};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn store(engine: Arc<MockEngine>) -> SessionStore {
        SessionStore::new(engine)
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_session() {
        let engine = Arc::new(MockEngine::default());
        let store = store(engine.clone());

        let created = store.create("s1").await.unwrap();
        let fetched = store.get("s1").unwrap();

        assert!(Arc::ptr_eq(&created, &fetched));
        assert_eq!(fetched.id(), "s1");
        assert_eq!(fetched.created_at(), fetched.last_activity());
        assert_eq!(fetched.live_view_url(), Some("https://live.example/1"));
        assert_eq!(engine.opened(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown() {
        let store = store(Arc::new(MockEngine::default()));
        assert!(store.get("nope").is_none());
        assert!(!store.contains("nope"));
    }

    #[tokio::test]
    async fn test_create_duplicate_id_rejected_without_provisioning() {
        let engine = Arc::new(MockEngine::default());
        let store = store(engine.clone());

        store.create("s1").await.unwrap();
        let err = store.create("s1").await.err().unwrap();

        assert!(matches!(err, SessionError::Exists(id) if id == "s1"));
        assert_eq!(engine.opened(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_create_provisioning_failure() {
        let store = store(Arc::new(MockEngine::failing()));

        let err = store.create("s1").await.err().unwrap();
        assert!(matches!(err, SessionError::Provisioning(EngineError::Provisioning(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let engine = Arc::new(MockEngine::default());
        let store = store(engine.clone());
        store.create("s1").await.unwrap();

        assert!(store.close("s1").await);
        assert!(!store.close("s1").await);
        assert!(store.get("s1").is_none());
        assert_eq!(engine.closed(), 1);
    }

    #[tokio::test]
    async fn test_close_removes_entry_even_if_release_fails() {
        let engine = Arc::new(MockEngine {
            fail_close: true,
            ..Default::default()
        });
        let store = store(engine.clone());
        store.create("s1").await.unwrap();

        assert!(store.close("s1").await);
        assert!(store.is_empty());
        assert_eq!(engine.closed(), 1);
    }

    #[tokio::test]
    async fn test_close_all() {
        let engine = Arc::new(MockEngine::default());
        let store = store(engine.clone());
        store.create("a").await.unwrap();
        store.create("b").await.unwrap();
        store.create("c").await.unwrap();

        assert_eq!(store.close_all().await, 3);
        assert!(store.is_empty());
        assert_eq!(engine.closed(), 3);
    }

    #[tokio::test]
    async fn test_list_oldest_first() {
        let store = store(Arc::new(MockEngine::default()));
        store.create("first").await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        store.create("second").await.unwrap();

        let list = store.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].session_id, "first");
        assert_eq!(list[1].session_id, "second");
    }

    #[tokio::test]
    async fn test_touch_advances_last_activity() {
        let store = store(Arc::new(MockEngine::default()));
        let session = store.create("s1").await.unwrap();
        let before = session.last_activity();

        tokio::time::sleep(Duration::from_millis(10)).await;
        session.touch();

        assert!(session.last_activity() > before);
        assert_eq!(session.created_at(), before);
    }

    #[tokio::test]
    async fn test_agent_created_once() {
        let handle = Arc::new(MockHandle::default());
        let session = Session::new("s1", RemoteBrowser::new(handle.clone()));

        let a = session.agent().await.unwrap();
        let b = session.agent().await.unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(handle.agents_created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_summary_serialization() {
        let session = Session::new(
            "s1",
            RemoteBrowser::new(Arc::new(MockHandle::default())).with_live_view_url("https://live/1"),
        );
        let json = serde_json::to_value(session.summary()).unwrap();
        assert_eq!(json["sessionId"], "s1");
        assert_eq!(json["liveViewUrl"], "https://live/1");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("lastActivity").is_some());
    }
