use actix_web::{App, test, web};
use finance_tracker_api::application::auth_service::AuthService;
use finance_tracker_api::application::budget_service::BudgetService;
use finance_tracker_api::application::budget_tracker::BudgetTracker;
use finance_tracker_api::application::expense_service::ExpenseService;
use finance_tracker_api::application::ledger_service::LedgerService;
use finance_tracker_api::data::memory::InMemoryStore;
use finance_tracker_api::data::user_repository::InMemoryUserRepository;
use finance_tracker_api::domain::categorizer::Categorizer;
use finance_tracker_api::domain::ledger::{Bill, Reward, SavingsGoal};
use finance_tracker_api::domain::user::RegisterUser;
use finance_tracker_api::infrastructure::notify::LogOverageNotifier;
use finance_tracker_api::presentation::handlers::{
    AppState, currency_convert, currency_rates, health_check, scan_receipt,
};
use finance_tracker_api::presentation::ledger::{
    create_bill, create_reward, create_savings_goal, delete_bill, delete_reward,
    delete_savings_goal, list_bills, list_rewards, list_savings_goals, update_bill, update_reward,
    update_savings_goal,
};
use finance_tracker_api::presentation::middleware::{
    JwtAuthMiddleware, RequestIdMiddleware, TimingMiddleware,
};
use std::sync::Arc;

const TEST_SECRET: &str = "test-secret-key-for-api-tests";

macro_rules! setup_api_test {
    () => {{
        let store = Arc::new(InMemoryStore::new());
        let tracker = Arc::new(BudgetTracker::new(
            store.clone(),
            Arc::new(LogOverageNotifier),
        ));
        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            TEST_SECRET.to_string(),
        ));

        let (user, token) = auth_service
            .register_user(RegisterUser {
                email: "api@example.com".to_string(),
                password: "test123".to_string(),
                display_name: None,
                currency_preference: None,
                language: None,
            })
            .await
            .unwrap();

        let state = web::Data::new(AppState {
            expenses: ExpenseService::new(
                store.clone(),
                Categorizer::with_default_rules(),
                tracker,
            ),
            budgets: BudgetService::new(store.clone()),
            ledger: LedgerService::new(store.clone()),
            auth_service,
        });

        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .wrap(TimingMiddleware)
                .wrap(RequestIdMiddleware)
                .route("/health", web::get().to(health_check))
                .service(
                    web::scope("")
                        .wrap(JwtAuthMiddleware::new(TEST_SECRET.to_string()))
                        .route(
                            "/users/{user_id}/savings",
                            web::post().to(create_savings_goal),
                        )
                        .route("/users/{user_id}/savings", web::get().to(list_savings_goals))
                        .route(
                            "/users/{user_id}/savings/{goal_id}",
                            web::put().to(update_savings_goal),
                        )
                        .route(
                            "/users/{user_id}/savings/{goal_id}",
                            web::delete().to(delete_savings_goal),
                        )
                        .route("/users/{user_id}/bills", web::post().to(create_bill))
                        .route("/users/{user_id}/bills", web::get().to(list_bills))
                        .route("/users/{user_id}/bills/{bill_id}", web::put().to(update_bill))
                        .route(
                            "/users/{user_id}/bills/{bill_id}",
                            web::delete().to(delete_bill),
                        )
                        .route("/users/{user_id}/rewards", web::post().to(create_reward))
                        .route("/users/{user_id}/rewards", web::get().to(list_rewards))
                        .route(
                            "/users/{user_id}/rewards/{reward_id}",
                            web::put().to(update_reward),
                        )
                        .route(
                            "/users/{user_id}/rewards/{reward_id}",
                            web::delete().to(delete_reward),
                        )
                        .route("/users/{user_id}/receipts", web::post().to(scan_receipt))
                        .route("/currency/rates", web::get().to(currency_rates))
                        .route("/currency/convert", web::get().to(currency_convert)),
                ),
        )
        .await;

        (app, user.id, token)
    }};
}

#[actix_web::test]
async fn test_health_check() {
    let (app, _uid, _token) = setup_api_test!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert!(resp.headers().contains_key("x-response-time"));

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_currency_rates_default_base() {
    let (app, _uid, token) = setup_api_test!();

    let req = test::TestRequest::get()
        .uri("/currency/rates")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["base"], "USD");
    assert_eq!(body["rates"]["USD"], 1.0);
    assert_eq!(body["rates"]["EUR"], 0.92);
}

#[actix_web::test]
async fn test_currency_rates_rebased() {
    let (app, _uid, token) = setup_api_test!();

    let req = test::TestRequest::get()
        .uri("/currency/rates?base=EUR")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["base"], "EUR");
    assert_eq!(body["rates"]["EUR"], 1.0);
}

#[actix_web::test]
async fn test_currency_convert() {
    let (app, _uid, token) = setup_api_test!();

    let req = test::TestRequest::get()
        .uri("/currency/convert?from=USD&to=EUR&amount=100")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["converted_amount"], 92.0);
    assert_eq!(body["rate"], 0.92);
}

#[actix_web::test]
async fn test_currency_convert_unknown_currency() {
    let (app, _uid, token) = setup_api_test!();

    let req = test::TestRequest::get()
        .uri("/currency/convert?from=USD&to=XXX&amount=100")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_savings_goal_crud() {
    let (app, uid, token) = setup_api_test!();

    let req = test::TestRequest::post()
        .uri(&format!("/users/{uid}/savings"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({
            "goal_name": "Vacation",
            "target_amount": 2000.0
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
    let goal: SavingsGoal = test::read_body_json(resp).await;
    assert_eq!(goal.goal_name, "Vacation");
    assert_eq!(goal.current_amount.inner(), 0.0);

    let req = test::TestRequest::put()
        .uri(&format!("/users/{uid}/savings/{}", goal.id))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({ "current_amount": 350.0 }))
        .to_request();
    let updated: SavingsGoal = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated.current_amount.inner(), 350.0);
    assert_eq!(updated.target_amount.inner(), 2000.0);

    let req = test::TestRequest::get()
        .uri(&format!("/users/{uid}/savings"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let goals: Vec<SavingsGoal> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(goals.len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{uid}/savings/{}", goal.id))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/users/{uid}/savings"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let goals: Vec<SavingsGoal> = test::call_and_read_body_json(&app, req).await;
    assert!(goals.is_empty());
}

#[actix_web::test]
async fn test_bill_crud() {
    let (app, uid, token) = setup_api_test!();

    let req = test::TestRequest::post()
        .uri(&format!("/users/{uid}/bills"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({
            "bill_name": "Electricity",
            "due_date": "2026-09-15T00:00:00Z",
            "amount": 85.5
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
    let bill: Bill = test::read_body_json(resp).await;
    assert_eq!(bill.bill_name, "Electricity");
    assert!(!bill.reminder);

    let req = test::TestRequest::put()
        .uri(&format!("/users/{uid}/bills/{}", bill.id))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({ "reminder": true, "amount": 90.0 }))
        .to_request();
    let updated: Bill = test::call_and_read_body_json(&app, req).await;
    assert!(updated.reminder);
    assert_eq!(updated.amount.inner(), 90.0);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{uid}/bills/{}", bill.id))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{uid}/bills/{}", bill.id))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_reward_crud() {
    let (app, uid, token) = setup_api_test!();

    let req = test::TestRequest::post()
        .uri(&format!("/users/{uid}/rewards"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({
            "reward_name": "Cashback bonus",
            "points": 500
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
    let reward: Reward = test::read_body_json(resp).await;
    assert_eq!(reward.points, 500);

    let req = test::TestRequest::put()
        .uri(&format!("/users/{uid}/rewards/{}", reward.id))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({ "points": 750 }))
        .to_request();
    let updated: Reward = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated.points, 750);
    assert_eq!(updated.reward_name, "Cashback bonus");

    let req = test::TestRequest::get()
        .uri(&format!("/users/{uid}/rewards"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let rewards: Vec<Reward> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(rewards.len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{uid}/rewards/{}", reward.id))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn test_ledger_routes_scoped_to_owner() {
    let (app, _uid, token) = setup_api_test!();

    let req = test::TestRequest::get()
        .uri("/users/intruder/bills")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_receipt_scan_returns_dummy_text() {
    let (app, uid, token) = setup_api_test!();

    let req = test::TestRequest::post()
        .uri(&format!("/users/{uid}/receipts"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_payload(vec![0xFFu8, 0xD8, 0xFF, 0xE0])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(
        body["extracted_text"]
            .as_str()
            .unwrap()
            .contains("Dummy receipt text")
    );
}

#[actix_web::test]
async fn test_receipt_scan_rejects_empty_body() {
    let (app, uid, token) = setup_api_test!();

    let req = test::TestRequest::post()
        .uri(&format!("/users/{uid}/receipts"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}
