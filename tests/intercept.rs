// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! End-to-end interception tests over a local mock server
//!
//! The registry and the fetch slot are process-wide, so every test in
//! this file serializes on one lock and unregisters before releasing it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::{Mutex, MutexGuard};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fetchtap::{Failure, FetchArgs, FetchInterceptor, FetchOptions, Hooks, Request};

lazy_static! {
    static ref INTERCEPT_LOCK: Mutex<()> = Mutex::new(());
}

fn serialized() -> MutexGuard<'static, ()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    INTERCEPT_LOCK.lock()
}

#[tokio::test]
async fn intercepts_successful_exchange() {
    let _guard = serialized();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hello"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hi there"))
        .mount(&server)
        .await;

    let log = Arc::new(Mutex::new(Vec::<String>::new()));

    let before_log = Arc::clone(&log);
    let after_log = Arc::clone(&log);
    let success_log = Arc::clone(&log);
    let interceptor = FetchInterceptor::register(
        Hooks::new()
            .on_before_request(move |request, _controller| {
                before_log.lock().push(format!("before {}", request.url.path()));
                Ok(())
            })
            .on_after_request(move |request, _controller| {
                after_log.lock().push(format!("after {}", request.url.path()));
            })
            .on_request_success(move |response, _request, _controller| {
                let log = Arc::clone(&success_log);
                async move {
                    log.lock().push(format!("success {}", response.status_code()));
                    Ok(())
                }
            }),
    )
    .unwrap();

    let response = fetchtap::fetch_url(format!("{}/hello", server.uri()), None)
        .await
        .unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text().unwrap(), "hi there");
    assert_eq!(
        log.lock().as_slice(),
        &["before /hello", "after /hello", "success 200"]
    );

    interceptor.unregister();
}

#[tokio::test]
async fn http_failure_routes_to_failure_hook_but_resolves() {
    let _guard = serialized();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let failures = Arc::new(AtomicUsize::new(0));
    let successes = Arc::new(AtomicUsize::new(0));

    let failure_count = Arc::clone(&failures);
    let success_count = Arc::clone(&successes);
    let interceptor = FetchInterceptor::register(
        Hooks::new()
            .on_request_success(move |_response, _request, _controller| {
                let count = Arc::clone(&success_count);
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .on_request_failure(move |failure, _request, _controller| {
                let count = Arc::clone(&failure_count);
                async move {
                    match failure {
                        Failure::Status(response) => {
                            assert_eq!(response.status_code(), 500);
                            count.fetch_add(1, Ordering::SeqCst);
                        }
                        Failure::Rejected { .. } => panic!("transport did not reject"),
                    }
                    Ok(())
                }
            }),
    )
    .unwrap();

    // fulfilled promise contract: a 500 resolves, it does not reject
    let response = fetchtap::fetch_url(format!("{}/broken", server.uri()), None)
        .await
        .unwrap();

    assert_eq!(response.status_code(), 500);
    assert_eq!(response.text().unwrap(), "oops");
    assert_eq!(failures.load(Ordering::SeqCst), 1);
    assert_eq!(successes.load(Ordering::SeqCst), 0);

    interceptor.unregister();
}

#[tokio::test]
async fn network_failure_rejects_after_notifying_hook() {
    let _guard = serialized();

    let rejections = Arc::new(AtomicUsize::new(0));

    let count = Arc::clone(&rejections);
    let interceptor = FetchInterceptor::register(Hooks::new().on_request_failure(
        move |failure, _request, _controller| {
            let count = Arc::clone(&count);
            async move {
                assert!(failure.is_rejection());
                count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        },
    ))
    .unwrap();

    // start a server only to learn a free port, then shut it down
    let server = MockServer::start().await;
    let vacated = format!("{}/unreachable", server.uri());
    drop(server);

    let err = fetchtap::fetch_url(&vacated, None).await.unwrap_err();

    assert!(err.is_network());
    assert_eq!(rejections.load(Ordering::SeqCst), 1);

    interceptor.unregister();
}

#[tokio::test]
async fn call_shapes_observed_identically() {
    let _guard = serialized();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let observed = Arc::new(Mutex::new(Vec::<(String, String)>::new()));

    let seen = Arc::clone(&observed);
    let interceptor = FetchInterceptor::register(Hooks::new().on_before_request(
        move |request, _controller| {
            seen.lock()
                .push((request.method.to_string(), request.url.to_string()));
            Ok(())
        },
    ))
    .unwrap();

    let target = format!("{}/items", server.uri());

    let from_options = fetchtap::fetch_url(
        &target,
        FetchOptions::new().method(reqwest::Method::POST),
    )
    .await
    .unwrap();

    let prebuilt = Request::post(&target).unwrap();
    let from_request = fetchtap::fetch(FetchArgs::from(prebuilt)).await.unwrap();

    assert_eq!(from_options.status_code(), 201);
    assert_eq!(from_request.status_code(), 201);

    let observed = observed.lock();
    assert_eq!(observed.len(), 2);
    assert_eq!(observed[0], observed[1]);

    interceptor.unregister();
}

#[tokio::test]
async fn unregister_restores_plain_fetch() {
    let _guard = serialized();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("untapped"))
        .mount(&server)
        .await;

    let before_count = Arc::new(AtomicUsize::new(0));

    let count = Arc::clone(&before_count);
    let interceptor = FetchInterceptor::register(Hooks::new().on_before_request(
        move |_request, _controller| {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        },
    ))
    .unwrap();

    let url = format!("{}/plain", server.uri());

    fetchtap::fetch_url(&url, None).await.unwrap();
    assert_eq!(before_count.load(Ordering::SeqCst), 1);

    interceptor.unregister();
    assert!(FetchInterceptor::active().is_none());

    // same call surface, no hook runs anymore
    let response = fetchtap::fetch_url(&url, None).await.unwrap();
    assert_eq!(response.text().unwrap(), "untapped");
    assert_eq!(before_count.load(Ordering::SeqCst), 1);
}
