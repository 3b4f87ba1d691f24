//! PDF text upload service
//!
//! Accepts a PDF over `POST /upload` (multipart field `file`), extracts the
//! text of every page with `pdf-extract`, and answers `{"text": ...}`.
//! Each upload lives in its own scratch file, removed once the request is
//! done.

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{middleware::Logger, web, App};

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;
pub mod storage;
pub mod upload;

pub use config::Args;
pub use error::UploadError;
pub use state::AppState;

/// Build the application with routes, CORS and access logging.
pub fn build_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Cors::permissive())
        .wrap(Logger::default())
        .configure(handlers::routes)
}
