use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use hideseek_backend::middleware::request_trace::RequestTrace;
use hideseek_backend::middleware::structured_logger::StructuredLogger;
use hideseek_backend::routes;
use hideseek_backend::state::app_state::AppState;

/// Builder for creating test Actix service instances.
///
/// Uses the production route table and tracing middleware. CORS is left out
/// so responses keep a plain `BoxBody`.
pub struct TestAppBuilder {
    state: AppState,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
        let data = web::Data::new(self.state);

        test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(routes::configure),
        )
        .await
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
