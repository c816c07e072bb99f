//! Application factory
//!
//! Builds the actix-web `App` from shared state: request tracing, CORS,
//! JSON body limits with the JSON error shape, routes and the 404 fallback.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App,
};
use tracing_actix_web::TracingLogger;

use otp_core::repositories::OtpRepository;
use otp_core::services::verification::SmsServiceTrait;

use crate::handlers::{json_error_handler, not_found};
use crate::middleware::create_cors;
use crate::routes::{self, AppState};

/// JSON extractor configuration shared by every route
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error_handler)
}

/// Create and configure the application with all dependencies
pub fn create_app<R, S>(
    app_state: web::Data<AppState<R, S>>,
    json_limit: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: OtpRepository + ?Sized + 'static,
    S: SmsServiceTrait + ?Sized + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(json_config(json_limit))
        .wrap(create_cors())
        .wrap(TracingLogger::default())
        .configure(routes::configure::<R, S>)
        .default_service(web::route().to(not_found))
}
