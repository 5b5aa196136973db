mod common;

use serde_json::json;
use tickkk::models::{User, UserUpdate};
use tickkk::types::{TicketCategory, UserRole};
use tickkk::view::detail::COMMENT_ERROR_MESSAGE;
use tickkk::view::users::LOAD_USERS_ERROR;
use tickkk::view::{
    AdminPanel, CommentForm, NewTicketForm, QueueFilter, TicketDetailView, UserManagement,
};
use tickkk::{Ticket, TickkkError};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client_for, comment_json, ticket_json, user_json};

fn user(id: u64, role: UserRole) -> User {
    serde_json::from_value(user_json(id, "staff", &role.to_string(), true)).unwrap()
}

#[tokio::test]
async fn test_mine_queue_queries_by_assignee_and_narrows_by_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets"))
        .and(query_param("assigned", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tickets"))
        .and(query_param("assigned_to_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            ticket_json(3, "Router caído en planta 2", "en_proceso", "red"),
            ticket_json(2, "Factura duplicada de marzo", "abierto", "facturacion"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let mut panel = AdminPanel::new(user(7, UserRole::Agent));
    assert!(panel.reload(&api).await);
    assert_eq!(panel.heading(), "Sin Asignar (0)");

    assert!(panel.set_queue(&api, QueueFilter::Mine).await);
    assert_eq!(panel.count(), 2);

    panel.set_category(Some(TicketCategory::Red));
    let visible: Vec<u64> = panel.visible().iter().map(|t| t.id).collect();
    assert_eq!(visible, vec![3]);
    assert_eq!(panel.heading(), "Mis Tickets (2)");

    // Same queue again: no request.
    assert!(!panel.set_queue(&api, QueueFilter::Mine).await);
}

#[tokio::test]
async fn test_invalid_ticket_form_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut form = NewTicketForm::for_client("Ana", "ana@example")
        .with_subject("Corto")
        .with_description("Muy breve");

    let err = form.submit(&client_for(&server)).await.unwrap_err();
    let TickkkError::Validation(errors) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert!(errors.contains("client_email"));
    assert!(errors.contains("subject"));
    assert!(errors.contains("description"));
}

#[tokio::test]
async fn test_valid_ticket_form_creates_and_resets() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets"))
        .and(body_json(json!({
            "client_name": "Ana Pérez",
            "client_email": "ana@example.com",
            "subject": "No puedo acceder al portal",
            "description": "El portal devuelve un error al iniciar sesión",
            "priority": "alta",
            "category": "cuenta",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(ticket_json(
            11,
            "No puedo acceder al portal",
            "abierto",
            "cuenta",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = NewTicketForm::for_client("Ana Pérez", "ana@example.com")
        .with_subject("No puedo acceder al portal")
        .with_description("El portal devuelve un error al iniciar sesión")
        .with_priority(tickkk::TicketPriority::Alta)
        .with_category(TicketCategory::Cuenta);

    let ticket = form.submit(&client_for(&server)).await.unwrap();
    assert_eq!(ticket.id, 11);
    assert_eq!(form, NewTicketForm::default());
}

#[tokio::test]
async fn test_add_comment_appends_and_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/3/comments"))
        .and(body_json(json!({
            "author_name": "Ana",
            "author_email": "ana@example.com",
            "comment_text": "Sigue sin funcionar",
            "is_internal": false,
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(comment_json(40, 3, "Sigue sin funcionar")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut refreshed = ticket_json(3, "Router caído en planta 2", "abierto", "red");
    refreshed["comments"] = json!([comment_json(40, 3, "Sigue sin funcionar")]);
    Mock::given(method("GET"))
        .and(path("/api/tickets/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(refreshed))
        .expect(1)
        .mount(&server)
        .await;

    let ticket: Ticket = serde_json::from_value(ticket_json(
        3,
        "Router caído en planta 2",
        "abierto",
        "red",
    ))
    .unwrap();
    let mut detail = TicketDetailView::new(ticket);
    let mut form = CommentForm::new("Ana", "ana@example.com", "Sigue sin funcionar");

    let outcome = detail
        .add_comment(&client_for(&server), &mut form)
        .await
        .unwrap();

    assert_eq!(outcome.comment.id, 40);
    assert!(outcome.ticket.is_some());
    assert_eq!(detail.comments().len(), 1);
    assert!(form.comment_text.is_empty());
    assert_eq!(form.author_name, "Ana");
}

#[tokio::test]
async fn test_failed_comment_post_leaves_comments() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/3/comments"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tickets/3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let ticket: Ticket =
        serde_json::from_value(ticket_json(3, "Router caído", "abierto", "red")).unwrap();
    let mut detail = TicketDetailView::new(ticket);
    let mut form = CommentForm::new("Ana", "ana@example.com", "hola");

    let result = detail.add_comment(&client_for(&server), &mut form).await;

    assert!(result.is_err());
    assert!(detail.comments().is_empty());
    assert_eq!(form.comment_text, "hola");
    assert_eq!(detail.error(), Some(COMMENT_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_blank_comment_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/3/comments"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let ticket: Ticket =
        serde_json::from_value(ticket_json(3, "Router caído", "abierto", "red")).unwrap();
    let mut detail = TicketDetailView::new(ticket);
    let mut form = CommentForm::new("Ana", "ana@example.com", "   ");

    let err = detail
        .add_comment(&client_for(&server), &mut form)
        .await
        .unwrap_err();
    assert!(matches!(err, TickkkError::Validation(_)));
    assert!(detail.comments().is_empty());
}

#[tokio::test]
async fn test_toggle_user_sends_inverse_flag_and_reloads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_json(1, "admin", "admin", true),
            user_json(5, "agent5", "agent", true),
        ])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/auth/users/5"))
        .and(body_json(json!({"is_active": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User updated successfully",
            "user": user_json(5, "agent5", "agent", false),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let admin = user(1, UserRole::Admin);
    let mut management = UserManagement::open(Some(&admin)).unwrap();
    management.load(&api).await.unwrap();

    let updated = management.toggle_active(&api, 5).await.unwrap();
    assert!(!updated.is_active);
}

#[tokio::test]
async fn test_successful_user_reload_clears_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([user_json(1, "admin", "admin", true)])),
        )
        .mount(&server)
        .await;

    let api = client_for(&server);
    let admin = user(1, UserRole::Admin);
    let mut management = UserManagement::open(Some(&admin)).unwrap();

    assert!(management.load(&api).await.is_err());
    assert_eq!(management.error(), Some(LOAD_USERS_ERROR));

    management.load(&api).await.unwrap();
    assert!(management.error().is_none());
    assert_eq!(management.users().len(), 1);
}

#[tokio::test]
async fn test_edit_user_drops_blank_password() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/auth/users/5"))
        .and(body_json(json!({"full_name": "Agente Cinco"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user_json(5, "agent5", "agent", true),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let admin = user(1, UserRole::Admin);
    let mut management = UserManagement::open(Some(&admin)).unwrap();
    let update = UserUpdate {
        full_name: Some("Agente Cinco".to_string()),
        password: Some("  ".to_string()),
        ..UserUpdate::default()
    };
    management
        .edit(&client_for(&server), 5, update)
        .await
        .unwrap();
}

#[test]
fn test_user_management_requires_admin() {
    let agent = user(7, UserRole::Agent);
    assert!(matches!(
        UserManagement::open(Some(&agent)),
        Err(TickkkError::Forbidden)
    ));
    assert!(matches!(
        UserManagement::open(None),
        Err(TickkkError::NotAuthenticated)
    ));
}
