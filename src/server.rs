use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::anyhow;
use log::{debug, error, info};

use crate::analysis::{analyze, AnalysisRequest};
use crate::config::Settings;
use crate::error::ApiError;
use crate::nlp::Pipeline;

async fn analyze_text(
    pipeline: web::Data<Pipeline>,
    request: web::Json<AnalysisRequest>,
) -> Result<HttpResponse, ApiError> {
    let text = request.into_inner().text;

    let response = web::block(move || analyze(&pipeline, &text))
        .await
        .map_err(|e| anyhow!("analysis task failed: {}", e))?
        .map_err(|e| {
            error!("Analysis failed: {:#}", e);
            ApiError::Analysis(e)
        })?;

    debug!(
        "Analyzed {} chars: {} entities, {} key phrases, {:?}",
        response.processed_text.chars().count(),
        response.entities.len(),
        response.key_phrases.len(),
        response.sentiment.label
    );
    Ok(HttpResponse::Ok().json(response))
}

/// JSON extractor settings: body size limit and client-error mapping.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| ApiError::from(err).into())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/analyze").route(web::post().to(analyze_text)));
}

pub async fn run_http_server(settings: Settings, pipeline: Pipeline) -> std::io::Result<()> {
    let pipeline = web::Data::new(pipeline);
    let limit = settings.server.max_body_bytes;

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(pipeline.clone())
            .app_data(json_config(limit))
            .configure(configure)
    });
    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    info!("Listening on {}", settings.bind_address());
    server
        .bind((settings.server.host.as_str(), settings.server.port))?
        .run()
        .await
}
