use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use sqlx::postgres::PgPoolOptions;

use forum_api::config::Config;
use forum_api::event::ApiGatewayEvent;
use forum_api::{handle_event, AppState};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_level))
        .init();

    // The pool outlives individual invocations; connections are reused
    // across requests for the lifetime of the container.
    let db_pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Database connection pool established");

    let state = AppState { db_pool };

    run(service_fn(move |event: LambdaEvent<ApiGatewayEvent>| {
        let state = state.clone();
        async move { Ok::<_, Error>(handle_event(&state, event.payload).await) }
    }))
    .await
}
