use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use finance_tracker_api::application::auth_service::AuthService;
use finance_tracker_api::application::budget_service::BudgetService;
use finance_tracker_api::application::budget_tracker::BudgetTracker;
use finance_tracker_api::application::expense_service::ExpenseService;
use finance_tracker_api::application::ledger_service::LedgerService;
use finance_tracker_api::data::memory::InMemoryStore;
use finance_tracker_api::data::user_repository::InMemoryUserRepository;
use finance_tracker_api::domain::categorizer::Categorizer;
use finance_tracker_api::infrastructure::logging::init_logging;
use finance_tracker_api::infrastructure::notify::LogOverageNotifier;
use finance_tracker_api::presentation::auth::{
    get_profile, login, register, update_profile, update_settings,
};
use finance_tracker_api::presentation::handlers::{
    AppState, budget_overview, create_budget, create_expense, currency_convert, currency_rates,
    delete_budget, delete_expense, health_check, list_expenses, scan_receipt, spending_insights,
    update_budget, update_expense,
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
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| "your-secret-key".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!("Creating in-memory document store");
    let store = Arc::new(InMemoryStore::new());
    let user_repository = Arc::new(InMemoryUserRepository::new());

    let tracker = Arc::new(BudgetTracker::new(
        store.clone(),
        Arc::new(LogOverageNotifier),
    ));
    let state = web::Data::new(AppState {
        expenses: ExpenseService::new(store.clone(), Categorizer::with_default_rules(), tracker),
        budgets: BudgetService::new(store.clone()),
        ledger: LedgerService::new(store.clone()),
        auth_service: Arc::new(AuthService::new(user_repository, jwt_secret.clone())),
    });
    info!("Application state initialized");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(health_check))
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(register))
                            .route("/login", web::post().to(login)),
                    )
                    .service(
                        web::scope("")
                            .wrap(JwtAuthMiddleware::new(jwt_secret.clone()))
                            .route(
                                "/users/{user_id}/expenses",
                                web::post().to(create_expense),
                            )
                            .route("/users/{user_id}/expenses", web::get().to(list_expenses))
                            .route(
                                "/users/{user_id}/expenses/{expense_id}",
                                web::put().to(update_expense),
                            )
                            .route(
                                "/users/{user_id}/expenses/{expense_id}",
                                web::delete().to(delete_expense),
                            )
                            .route("/users/{user_id}/budgets", web::post().to(create_budget))
                            .route("/users/{user_id}/budgets", web::get().to(budget_overview))
                            .route(
                                "/users/{user_id}/budgets/{budget_id}",
                                web::put().to(update_budget),
                            )
                            .route(
                                "/users/{user_id}/budgets/{budget_id}",
                                web::delete().to(delete_budget),
                            )
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
                            .route(
                                "/users/{user_id}/bills/{bill_id}",
                                web::put().to(update_bill),
                            )
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
                            .route(
                                "/users/{user_id}/insights",
                                web::get().to(spending_insights),
                            )
                            .route("/users/{user_id}/profile", web::get().to(get_profile))
                            .route("/users/{user_id}/profile", web::put().to(update_profile))
                            .route("/users/{user_id}/settings", web::put().to(update_settings))
                            .route("/users/{user_id}/receipts", web::post().to(scan_receipt))
                            .route("/currency/rates", web::get().to(currency_rates))
                            .route("/currency/convert", web::get().to(currency_convert)),
                    ),
            )
    });

    info!(host = %host, port = port, "Starting HTTP server");
    server.bind((host.as_str(), port))?.run().await
}
