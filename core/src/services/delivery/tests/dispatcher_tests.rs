//! Unit tests for the delivery dispatcher

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::mocks::{MockCodeStore, MockJobQueue, MockMailer};
use crate::errors::DispatchError;
use crate::services::delivery::{DeliveryPolicy, Dispatcher, DispatcherConfig};
use crate::services::verification::JobQueue;

fn dispatcher(
    queue: Arc<MockJobQueue>,
    store: Arc<MockCodeStore>,
    mailer: Arc<MockMailer>,
    policy: DeliveryPolicy,
) -> Arc<Dispatcher> {
    Arc::new(Dispatcher::new(
        queue,
        store,
        mailer,
        DispatcherConfig {
            pop_timeout: Duration::ZERO,
            policy,
        },
    ))
}

/// Poll until `condition` holds, failing the test after two seconds
async fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met within 2s");
}

#[tokio::test]
async fn delivers_jobs_in_fifo_order() {
    let queue = Arc::new(MockJobQueue::new());
    let store = Arc::new(MockCodeStore::new());
    let mailer = Arc::new(MockMailer::new());

    for (address, code) in [("a@x.com", "111111"), ("b@x.com", "222222"), ("c@x.com", "333333")] {
        store.insert(address, code);
        queue.enqueue(address).await.unwrap();
    }

    let worker = dispatcher(queue.clone(), store, mailer.clone(), DeliveryPolicy::Drop);
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn({
        let worker = Arc::clone(&worker);
        let token = shutdown.clone();
        async move { worker.run(token).await }
    });

    wait_until(|| mailer.sent_count() == 3).await;
    shutdown.cancel();
    handle.await.unwrap().unwrap();

    let sent = mailer.sent.lock().unwrap().clone();
    assert_eq!(
        sent,
        vec![
            ("a@x.com".to_string(), "111111".to_string()),
            ("b@x.com".to_string(), "222222".to_string()),
            ("c@x.com".to_string(), "333333".to_string()),
        ]
    );
    assert_eq!(queue.len(), 0);
}

#[tokio::test]
async fn continues_after_missing_code() {
    let queue = Arc::new(MockJobQueue::new());
    let store = Arc::new(MockCodeStore::with_code("b@x.com", "222222"));
    let mailer = Arc::new(MockMailer::new());

    // No code staged for the first job
    queue.enqueue("a@x.com").await.unwrap();
    queue.enqueue("b@x.com").await.unwrap();

    let worker = dispatcher(queue.clone(), store, mailer.clone(), DeliveryPolicy::Drop);
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn({
        let worker = Arc::clone(&worker);
        let token = shutdown.clone();
        async move { worker.run(token).await }
    });

    wait_until(|| mailer.sent_count() == 1).await;
    shutdown.cancel();
    handle.await.unwrap().unwrap();

    let sent = mailer.sent.lock().unwrap().clone();
    assert_eq!(sent, vec![("b@x.com".to_string(), "222222".to_string())]);
    // The dead job was not requeued
    assert_eq!(queue.len(), 0);
}

#[tokio::test]
async fn drop_policy_never_retries_failed_delivery() {
    let queue = Arc::new(MockJobQueue::new());
    let store = Arc::new(MockCodeStore::new());
    store.insert("a@x.com", "111111");
    store.insert("b@x.com", "222222");
    // First send fails, everything after succeeds
    let mailer = Arc::new(MockMailer::failing_times(1));

    queue.enqueue("a@x.com").await.unwrap();
    queue.enqueue("b@x.com").await.unwrap();

    let worker = dispatcher(queue.clone(), store, mailer.clone(), DeliveryPolicy::Drop);
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn({
        let worker = Arc::clone(&worker);
        let token = shutdown.clone();
        async move { worker.run(token).await }
    });

    wait_until(|| mailer.sent_count() == 1).await;
    shutdown.cancel();
    handle.await.unwrap().unwrap();

    // The failed job got exactly one attempt and was not requeued
    assert_eq!(mailer.attempt_count(), 2);
    let sent = mailer.sent.lock().unwrap().clone();
    assert_eq!(sent, vec![("b@x.com".to_string(), "222222".to_string())]);
    assert_eq!(queue.len(), 0);
}

#[tokio::test]
async fn requeue_policy_retries_until_success() {
    let queue = Arc::new(MockJobQueue::new());
    let store = Arc::new(MockCodeStore::with_code("a@x.com", "111111"));
    let mailer = Arc::new(MockMailer::failing_times(2));

    queue.enqueue("a@x.com").await.unwrap();

    let worker = dispatcher(
        queue.clone(),
        store,
        mailer.clone(),
        DeliveryPolicy::Requeue {
            max_attempts: 5,
            backoff: Duration::ZERO,
        },
    );
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn({
        let worker = Arc::clone(&worker);
        let token = shutdown.clone();
        async move { worker.run(token).await }
    });

    wait_until(|| mailer.sent_count() == 1).await;
    shutdown.cancel();
    handle.await.unwrap().unwrap();

    assert_eq!(mailer.attempt_count(), 3);
    let sent = mailer.sent.lock().unwrap().clone();
    assert_eq!(sent, vec![("a@x.com".to_string(), "111111".to_string())]);
}

#[tokio::test]
async fn requeue_policy_gives_up_after_max_attempts() {
    let queue = Arc::new(MockJobQueue::new());
    let store = Arc::new(MockCodeStore::with_code("a@x.com", "111111"));
    let mailer = Arc::new(MockMailer::always_failing());

    queue.enqueue("a@x.com").await.unwrap();

    let worker = dispatcher(
        queue.clone(),
        store,
        mailer.clone(),
        DeliveryPolicy::Requeue {
            max_attempts: 2,
            backoff: Duration::ZERO,
        },
    );
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn({
        let worker = Arc::clone(&worker);
        let token = shutdown.clone();
        async move { worker.run(token).await }
    });

    wait_until(|| mailer.attempt_count() == 2).await;
    // Give a wrongly scheduled third attempt a chance to show up
    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown.cancel();
    handle.await.unwrap().unwrap();

    assert_eq!(mailer.attempt_count(), 2);
    assert_eq!(mailer.sent_count(), 0);
    assert_eq!(queue.len(), 0);
}

#[tokio::test]
async fn pop_timeout_is_not_an_error() {
    let queue = Arc::new(MockJobQueue::new());
    let store = Arc::new(MockCodeStore::with_code("a@x.com", "111111"));
    let mailer = Arc::new(MockMailer::new());

    let worker = Arc::new(Dispatcher::new(
        queue.clone(),
        store,
        mailer.clone(),
        DispatcherConfig {
            pop_timeout: Duration::from_millis(20),
            policy: DeliveryPolicy::Drop,
        },
    ));
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn({
        let worker = Arc::clone(&worker);
        let token = shutdown.clone();
        async move { worker.run(token).await }
    });

    // Several empty pops elapse without terminating the worker
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!handle.is_finished());

    queue.enqueue("a@x.com").await.unwrap();
    wait_until(|| mailer.sent_count() == 1).await;
    shutdown.cancel();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn queue_error_terminates_worker() {
    let queue = Arc::new(MockJobQueue::new());
    let store = Arc::new(MockCodeStore::new());
    let mailer = Arc::new(MockMailer::new());
    queue.fail_next_pop("connection reset");

    let worker = dispatcher(queue, store, mailer, DeliveryPolicy::Drop);
    let result = worker.run(CancellationToken::new()).await;

    match result {
        Err(DispatchError::QueueUnavailable { reason }) => {
            assert_eq!(reason, "connection reset");
        }
        other => panic!("expected QueueUnavailable, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn cancellation_stops_idle_worker() {
    let queue = Arc::new(MockJobQueue::new());
    let store = Arc::new(MockCodeStore::new());
    let mailer = Arc::new(MockMailer::new());

    let worker = dispatcher(queue, store, mailer, DeliveryPolicy::Drop);
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn({
        let worker = Arc::clone(&worker);
        let token = shutdown.clone();
        async move { worker.run(token).await }
    });

    tokio::time::sleep(Duration::from_millis(20)).await;
    shutdown.cancel();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn delivered_job_leaves_code_entry_untouched() {
    let queue = Arc::new(MockJobQueue::new());
    let store = Arc::new(MockCodeStore::with_code("a@x.com", "123456"));
    let mailer = Arc::new(MockMailer::new());

    queue.enqueue("a@x.com").await.unwrap();

    let worker = dispatcher(
        queue.clone(),
        store.clone(),
        mailer.clone(),
        DeliveryPolicy::Drop,
    );
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn({
        let worker = Arc::clone(&worker);
        let token = shutdown.clone();
        async move { worker.run(token).await }
    });

    wait_until(|| mailer.sent_count() == 1).await;
    shutdown.cancel();
    handle.await.unwrap().unwrap();

    let sent = mailer.sent.lock().unwrap().clone();
    assert_eq!(sent, vec![("a@x.com".to_string(), "123456".to_string())]);
    // The entry stays live until TTL or explicit verification
    assert_eq!(
        store.entries.lock().unwrap().get("a@x.com"),
        Some(&"123456".to_string())
    );
    assert_eq!(queue.len(), 0);
}
