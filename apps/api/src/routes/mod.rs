pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::require_api_key;
use crate::candidates::handlers as candidates;
use crate::interviews::handlers as interviews;
use crate::jobs::handlers as jobs;
use crate::state::AppState;
use crate::telephony::webhooks;

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/v1/jd", post(jobs::handle_create_job))
        .route("/v1/resumes", post(candidates::handle_upload_resume))
        .route("/v1/candidates", post(candidates::handle_create_candidate))
        .route(
            "/v1/candidates/:candidate_id/resume",
            post(candidates::handle_attach_resume_meta),
        )
        .route("/v1/interviews", post(interviews::handle_trigger_interview))
        .route(
            "/v1/interviews/:interview_id",
            get(interviews::handle_get_interview),
        )
        .route(
            "/v1/dev/simulate-answers/:interview_id",
            post(interviews::handle_simulate_answers),
        )
        .route("/v1/dev/status", get(interviews::handle_dev_status))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    let mut router = Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .merge(protected);

    // The telephony provider drives these; they only exist in live mode.
    if !state.config.development_mode {
        router = router
            .route("/v1/voice/answer", get(webhooks::handle_answer))
            .route("/v1/voice/event", post(webhooks::handle_event))
            .route("/v1/voice/record", post(webhooks::handle_record));
    }

    router.with_state(state)
}
