use axum::extract::ws::Message;

use groupwatch_api::ws::WsManager;

#[tokio::test]
async fn add_and_remove_tracks_connection_count() {
    let manager = WsManager::new();
    assert_eq!(manager.connection_count().await, 0);

    let _rx1 = manager.add("conn-1".to_string()).await;
    let _rx2 = manager.add("conn-2".to_string()).await;
    assert_eq!(manager.connection_count().await, 2);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 1);
}

#[tokio::test]
async fn send_to_group_reaches_only_members() {
    let manager = WsManager::new();
    let mut rx_member = manager.add("member".to_string()).await;
    let mut rx_other = manager.add("other".to_string()).await;
    let mut rx_unjoined = manager.add("unjoined".to_string()).await;

    assert!(manager.join_group("member", "ab12cd34").await);
    assert!(manager.join_group("other", "ffffffff").await);
    assert_eq!(manager.group_member_count("ab12cd34").await, 1);

    let sent = manager
        .send_to_group("ab12cd34", Message::Text("hello".into()))
        .await;
    assert_eq!(sent, 1);

    let received = rx_member.recv().await.expect("member should receive");
    assert_eq!(received, Message::Text("hello".into()));
    assert!(rx_other.try_recv().is_err());
    assert!(rx_unjoined.try_recv().is_err());
}

#[tokio::test]
async fn rejoining_moves_the_subscription() {
    let manager = WsManager::new();
    let _rx = manager.add("conn".to_string()).await;

    assert!(manager.join_group("conn", "group-a").await);
    assert!(manager.join_group("conn", "group-b").await);

    assert_eq!(manager.group_member_count("group-a").await, 0);
    assert_eq!(manager.group_member_count("group-b").await, 1);
}

#[tokio::test]
async fn join_unknown_connection_returns_false() {
    let manager = WsManager::new();
    assert!(!manager.join_group("ghost", "ab12cd34").await);
    assert!(!manager.send_to("ghost", Message::Text("hi".into())).await);
}

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn".to_string()).await;

    manager.shutdown_all().await;
    assert_eq!(manager.connection_count().await, 0);

    let msg = rx.recv().await.expect("close frame should be delivered");
    assert_eq!(msg, Message::Close(None));
}
