// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use url::Url;

use todo_api::{
    ApiError, PaginatedTodos, create_todo, delete_todo, list_todos, retrieve_todo, update_todo,
};
use todo_domain::Todo;
use todo_persistence::SqliteTodoStore;
use todo_query::{ParserRegistry, ValidationError};

/// Todo Server - HTTP server for the todo record service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses an
    /// in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Default number of records per page when `count` is not requested
    #[arg(long, default_value_t = 20)]
    page_size: i64,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The todo store wrapped in a Mutex to allow safe concurrent access.
    store: Arc<Mutex<SqliteTodoStore>>,
    /// The recognized query parameter vocabulary.
    registry: Arc<ParserRegistry>,
    /// Page size applied when a list request carries no `count`.
    default_limit: i64,
}

/// The JSON error envelope returned for every failed request.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    /// The HTTP status code, repeated in the body.
    code: u16,
    /// A human-readable summary.
    message: String,
    /// Per-value validation failures, when applicable.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ValidationError>,
}

/// An error response carrying an HTTP status code.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Per-value validation failures, when applicable.
    errors: Vec<ValidationError>,
}

impl HttpError {
    fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
            errors: Vec::new(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            code: self.status.as_u16(),
            message: self.message,
            errors: self.errors,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidQuery { errors } => Self {
                status: StatusCode::BAD_REQUEST,
                message: String::from("Invalid query parameters"),
                errors,
            },
            ApiError::InvalidBody { errors } => Self {
                status: StatusCode::BAD_REQUEST,
                message: String::from("Invalid body attributes"),
                errors,
            },
            ApiError::MalformedBody { message } => {
                Self::new(StatusCode::BAD_REQUEST, &message)
            }
            ApiError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, "Not found"),
            ApiError::Internal { message } => {
                error!(error = %message, "Internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, &message)
            }
        }
    }
}

/// Reconstructs the request URL from the `Host` header and request URI,
/// so pagination links point back at the address the client used.
fn request_base_url(headers: &HeaderMap, uri: &Uri) -> Result<Url, HttpError> {
    let host: &str = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");

    Url::parse(&format!("http://{host}{uri}")).map_err(|e| {
        error!(error = %e, "Failed to reconstruct request URL");
        HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, "Invalid request URL")
    })
}

/// Parses a request body as JSON.
fn parse_body(body: &Bytes) -> Result<Value, HttpError> {
    serde_json::from_slice(body).map_err(|e| {
        HttpError::new(
            StatusCode::BAD_REQUEST,
            &format!("Invalid JSON body: {e}"),
        )
    })
}

/// Handler for GET / - the filtered, paginated listing.
async fn handle_list(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<PaginatedTodos>, HttpError> {
    let base: Url = request_base_url(&headers, &uri)?;

    let mut store = app_state.store.lock().await;
    let page: PaginatedTodos = list_todos(
        &mut store,
        &app_state.registry,
        &base,
        app_state.default_limit,
    )?;

    Ok(Json(page))
}

/// Handler for POST / - creates a todo record.
async fn handle_create(
    AxumState(app_state): AxumState<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Todo>), HttpError> {
    let data: Value = parse_body(&body)?;

    let mut store = app_state.store.lock().await;
    let todo: Todo = create_todo(&mut store, &data)?;

    Ok((StatusCode::CREATED, Json(todo)))
}

/// Handler for GET /{id} - retrieves a todo record.
async fn handle_retrieve(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, HttpError> {
    let mut store = app_state.store.lock().await;
    let todo: Todo = retrieve_todo(&mut store, id)?;
    Ok(Json(todo))
}

/// Handler for PATCH /{id} - partially updates a todo record.
async fn handle_update(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<Json<Todo>, HttpError> {
    let data: Value = parse_body(&body)?;

    let mut store = app_state.store.lock().await;
    let todo: Todo = update_todo(&mut store, id, &data)?;
    Ok(Json(todo))
}

/// Handler for DELETE /{id} - deletes a todo record.
async fn handle_delete(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let mut store = app_state.store.lock().await;
    delete_todo(&mut store, id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_list).post(handle_create))
        .route(
            "/{id}",
            get(handle_retrieve)
                .patch(handle_update)
                .delete(handle_delete),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Todo Server");

    // Open the store (in-memory or file-based based on CLI argument)
    let store: SqliteTodoStore = match &args.database {
        Some(db_path) => SqliteTodoStore::new_with_file(db_path)?,
        None => SqliteTodoStore::new_in_memory()?,
    };

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(store)),
        registry: Arc::new(ParserRegistry::recognized()),
        default_limit: args.page_size,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
