//! The HTTP service and the driver against a live mock server.

use std::sync::Arc;
use std::time::Duration;

use todo_app::runtime::Driver;
use todo_app::service::{HttpTodoService, TodoService};
use todo_core::view::{Action, Screen};
use todo_core::{ApiError, CreateTodo, TodoId, UpdateTodo};

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

fn service(base_url: &str) -> HttpTodoService {
    HttpTodoService::new(base_url, Duration::from_secs(5))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn service_operations_round_trip() {
    let svc = service(&start_server().await);

    assert!(svc.list().await.unwrap().is_empty());

    let created = svc.add(CreateTodo::new("Buy milk").unwrap()).await.unwrap();
    assert_eq!(created.title, "Buy milk");
    assert!(!created.completed);

    let updated = svc
        .update(created.id.clone(), UpdateTodo { completed: true })
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert!(updated.completed);

    let deleted = svc.delete(created.id.clone()).await.unwrap();
    assert_eq!(deleted, updated);

    let err = svc.delete(created.id).await.unwrap_err();
    assert_eq!(err, ApiError::NotFound);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let svc = service(&format!("http://{addr}"));

    let err = svc.list().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn driver_against_live_server() {
    let base_url = start_server().await;
    let (mut driver, mut responses) = Driver::new(Arc::new(service(&base_url)));

    driver.mount();
    driver.settle(&mut responses).await;
    assert!(matches!(driver.screen(), Screen::List(ref list) if list.rows.is_empty()));

    driver.apply(Action::DraftChanged("Walk dog".to_string()));
    driver.apply(Action::Submit);
    driver.settle(&mut responses).await;

    let Screen::List(list) = driver.screen() else {
        panic!("expected list");
    };
    assert_eq!(list.rows.len(), 1);
    assert_eq!(list.rows[0].title, "Walk dog");
    assert_eq!(list.draft, "");
    let id = list.rows[0].id.clone();

    driver.apply(Action::Toggle {
        id: id.clone(),
        completed: true,
    });
    driver.settle(&mut responses).await;
    let Screen::List(list) = driver.screen() else {
        panic!("expected list");
    };
    assert!(list.rows[0].checked && list.rows[0].struck);

    driver.apply(Action::RequestDelete(id));
    driver.apply(Action::ConfirmDelete);
    driver.settle(&mut responses).await;
    let Screen::List(list) = driver.screen() else {
        panic!("expected list");
    };
    assert!(list.rows.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn load_failure_shows_error_screen() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let (mut driver, mut responses) = Driver::new(Arc::new(service(&format!("http://{addr}"))));

    driver.mount();
    driver.settle(&mut responses).await;

    assert!(matches!(driver.screen(), Screen::Error { .. }));
    // A toggle while the error is shown goes nowhere.
    driver.apply(Action::Toggle {
        id: TodoId::new("1"),
        completed: true,
    });
    assert_eq!(driver.in_flight(), 0);
}
