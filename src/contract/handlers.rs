//! HTTP handlers for contract generation and transfer.
//!
//! Two route shapes per document kind:
//! - a two-step flow: `POST /<kind>` registers an artifact and returns its
//!   id, `GET /<kind>/download` streams it and cleans it up;
//! - a one-shot flow: `POST /<kind>/generate` synthesizes, streams, and
//!   deletes the artifact within a single request.

use std::fs;
use std::path::Path;

use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::metrics::{CONTRACTS_DOWNLOADED, CONTRACTS_GENERATED};
use crate::state::AppState;
use crate::ErrorResponse;

use super::employment::{EmploymentContractGenerator, EmploymentContractRequest};
use super::leave::{LeaveContractGenerator, LeaveContractRequest};
use super::traits::{Generator, Validator};
use super::{DocumentKind, GeneratedArtifact};

/// RFC 5987 attachment names keep unreserved characters readable.
const ATTACHMENT_NAME_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.');

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeResponse {
    pub artifact_id: Uuid,
    pub file_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    Docx,
    Pdf,
}

impl DownloadFormat {
    fn as_str(self) -> &'static str {
        match self {
            DownloadFormat::Docx => "docx",
            DownloadFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadQuery {
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub format: Option<DownloadFormat>,
}

/// Configure contract routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/contracts").route(web::post().to(create_employment_contract)))
        .service(
            web::resource("/contracts/generate")
                .route(web::post().to(generate_employment_contract)),
        )
        .service(
            web::resource("/contracts/download")
                .route(web::get().to(download_employment_contract)),
        )
        .service(web::resource("/leave-contract").route(web::post().to(create_leave_contract)))
        .service(
            web::resource("/leave-contract/generate").route(web::post().to(generate_leave_contract)),
        )
        .service(
            web::resource("/leave-contract/download").route(web::get().to(download_leave_contract)),
        );
}

#[utoipa::path(
    context_path = "/api",
    tag = "Contract Service",
    post,
    path = "/contracts",
    request_body = EmploymentContractRequest,
    responses(
        (status = 201, description = "Artifact synthesized and registered", body = SynthesizeResponse),
        (status = 400, description = "Missing or empty mandatory fields", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn create_employment_contract(
    body: web::Json<EmploymentContractRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!("Executing create_employment_contract handler");
    let request = body.into_inner();
    if let Err(message) = request.validate() {
        error!("Employment contract request rejected: {}", message);
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
    }

    let generator = EmploymentContractGenerator::new(data.template_store());
    let artifact = match run_generator(DocumentKind::Employment, generator, request).await {
        Ok(artifact) => artifact,
        Err(response) => return response,
    };

    register_artifact(artifact, &data)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Contract Service",
    post,
    path = "/contracts/generate",
    request_body = EmploymentContractRequest,
    responses(
        (status = 200, description = "Binary DOCX attachment", body = Vec<u8>, content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        (status = 400, description = "Missing or empty mandatory fields", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_employment_contract(
    body: web::Json<EmploymentContractRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!("Executing generate_employment_contract handler");
    let request = body.into_inner();
    if let Err(message) = request.validate() {
        error!("Employment contract request rejected: {}", message);
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
    }

    let generator = EmploymentContractGenerator::new(data.template_store());
    let artifact = match run_generator(DocumentKind::Employment, generator, request).await {
        Ok(artifact) => artifact,
        Err(response) => return response,
    };

    transmit_once(artifact).await
}

#[utoipa::path(
    context_path = "/api",
    tag = "Contract Service",
    get,
    path = "/contracts/download",
    params(
        ("artifactId" = String, Query, description = "Artifact id returned at synthesis time"),
        ("format" = Option<DownloadFormat>, Query, description = "Download format, docx when omitted")
    ),
    responses(
        (status = 200, description = "Binary attachment"),
        (status = 400, description = "Missing or malformed artifactId", body = ErrorResponse),
        (status = 404, description = "Artifact not found", body = ErrorResponse),
        (status = 500, description = "Conversion or transfer failed", body = ErrorResponse)
    )
)]
pub async fn download_employment_contract(
    query: web::Query<DownloadQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    download(DocumentKind::Employment, query.into_inner(), &data).await
}

#[utoipa::path(
    context_path = "/api",
    tag = "Contract Service",
    post,
    path = "/leave-contract",
    request_body = LeaveContractRequest,
    responses(
        (status = 201, description = "Artifact synthesized and registered", body = SynthesizeResponse),
        (status = 400, description = "Missing or empty mandatory fields", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn create_leave_contract(
    body: web::Json<LeaveContractRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!("Executing create_leave_contract handler");
    let request = body.into_inner();
    if let Err(message) = request.validate() {
        error!("Leave contract request rejected: {}", message);
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
    }

    let generator = LeaveContractGenerator::new(data.template_store());
    let artifact = match run_generator(DocumentKind::Leave, generator, request).await {
        Ok(artifact) => artifact,
        Err(response) => return response,
    };

    register_artifact(artifact, &data)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Contract Service",
    post,
    path = "/leave-contract/generate",
    request_body = LeaveContractRequest,
    responses(
        (status = 200, description = "Binary DOCX attachment", body = Vec<u8>, content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        (status = 400, description = "Missing or empty mandatory fields", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_leave_contract(
    body: web::Json<LeaveContractRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!("Executing generate_leave_contract handler");
    let request = body.into_inner();
    if let Err(message) = request.validate() {
        error!("Leave contract request rejected: {}", message);
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
    }

    let generator = LeaveContractGenerator::new(data.template_store());
    let artifact = match run_generator(DocumentKind::Leave, generator, request).await {
        Ok(artifact) => artifact,
        Err(response) => return response,
    };

    transmit_once(artifact).await
}

#[utoipa::path(
    context_path = "/api",
    tag = "Contract Service",
    get,
    path = "/leave-contract/download",
    params(
        ("artifactId" = String, Query, description = "Artifact id returned at synthesis time"),
        ("format" = Option<DownloadFormat>, Query, description = "Download format, docx when omitted")
    ),
    responses(
        (status = 200, description = "Binary attachment"),
        (status = 400, description = "Missing or malformed artifactId", body = ErrorResponse),
        (status = 404, description = "Artifact not found", body = ErrorResponse),
        (status = 500, description = "Conversion or transfer failed", body = ErrorResponse)
    )
)]
pub async fn download_leave_contract(
    query: web::Query<DownloadQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    download(DocumentKind::Leave, query.into_inner(), &data).await
}

/// Run a generator on the blocking pool, collapsing every failure into the
/// generic generation error response.
async fn run_generator<G, R>(
    kind: DocumentKind,
    generator: G,
    request: R,
) -> Result<GeneratedArtifact, HttpResponse>
where
    G: Generator<R> + Send + 'static,
    R: Send + 'static,
{
    match web::block(move || generator.generate(request)).await {
        Ok(Ok(artifact)) => {
            let kind_label = kind.to_string();
            CONTRACTS_GENERATED
                .with_label_values(&[kind_label.as_str()])
                .inc();
            info!("Synthesized {} artifact {}", kind, artifact.file_name);
            Ok(artifact)
        }
        Ok(Err(e)) => {
            error!("Failed to generate {}: {}", kind, e);
            Err(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to generate contract.")))
        }
        Err(e) => {
            error!("Generation task for {} did not complete: {}", kind, e);
            Err(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to generate contract.")))
        }
    }
}

/// Two-step path, first stage: hand the artifact to the registry and return
/// its id. The on-disk path stays server-side.
fn register_artifact(artifact: GeneratedArtifact, data: &web::Data<AppState>) -> HttpResponse {
    let response = SynthesizeResponse {
        artifact_id: artifact.id,
        file_name: artifact.file_name.clone(),
    };
    data.registry.register(artifact);
    info!(
        "Registered artifact {} as {}",
        response.file_name, response.artifact_id
    );
    HttpResponse::Created().json(response)
}

/// One-shot path: read the artifact back, delete it unconditionally, and
/// return the bytes as an attachment. One-shot artifacts are never
/// registered, so a failed transfer leaves nothing to retry.
async fn transmit_once(artifact: GeneratedArtifact) -> HttpResponse {
    let path = artifact.path.clone();
    let read_result = web::block(move || {
        let bytes = fs::read(&path);
        if let Err(e) = fs::remove_file(&path) {
            error!(
                "Failed to delete one-shot artifact {}: {}",
                path.display(),
                e
            );
        }
        bytes
    })
    .await;

    match read_result {
        Ok(Ok(bytes)) => {
            info!("Transmitting one-shot artifact {}", artifact.file_name);
            attachment_response(&artifact.file_name, bytes)
        }
        Ok(Err(e)) => {
            error!(
                "Failed to read one-shot artifact {}: {}",
                artifact.path.display(),
                e
            );
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to generate contract."))
        }
        Err(e) => {
            error!("One-shot transfer task did not complete: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to generate contract."))
        }
    }
}

/// Two-step path, second stage: resolve the artifact by id, optionally
/// convert it, transfer the bytes, and clean up after a confirmed read.
async fn download(
    kind: DocumentKind,
    query: DownloadQuery,
    data: &web::Data<AppState>,
) -> HttpResponse {
    info!("Executing download handler for {}", kind);

    let raw_id = match query.artifact_id {
        Some(raw) => raw,
        None => {
            error!("Download request for {} without artifactId", kind);
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(
                "artifactId query parameter is required",
            ));
        }
    };
    let id = match Uuid::parse_str(&raw_id) {
        Ok(id) => id,
        Err(_) => {
            error!("Download request for {} with malformed id '{}'", kind, raw_id);
            return HttpResponse::BadRequest()
                .json(ErrorResponse::bad_request("artifactId is not a valid id"));
        }
    };

    let artifact = match data.registry.get(&id) {
        Some(artifact) if artifact.kind == kind => artifact,
        Some(_) | None => {
            error!("Artifact {} not found for {}", id, kind);
            return HttpResponse::NotFound().json(ErrorResponse::not_found("File not found."));
        }
    };

    if !artifact.path.is_file() {
        error!(
            "Artifact {} registered but missing on disk at {}",
            id,
            artifact.path.display()
        );
        data.registry.remove(&id);
        return HttpResponse::NotFound().json(ErrorResponse::not_found("File not found."));
    }

    let format = query.format.unwrap_or(DownloadFormat::Docx);
    let (send_path, send_name) = match format {
        DownloadFormat::Docx => (artifact.path.clone(), artifact.file_name.clone()),
        DownloadFormat::Pdf => {
            let converter = data.converter.clone();
            let input = artifact.path.clone();
            match web::block(move || converter.convert_to_pdf(&input)).await {
                Ok(Ok(pdf_path)) => {
                    let pdf_name = Path::new(&artifact.file_name)
                        .with_extension("pdf")
                        .to_string_lossy()
                        .into_owned();
                    (pdf_path, pdf_name)
                }
                Ok(Err(e)) => {
                    error!("PDF conversion failed for artifact {}: {}", id, e);
                    return HttpResponse::InternalServerError().json(
                        ErrorResponse::internal_error("Failed to convert contract to PDF."),
                    );
                }
                Err(e) => {
                    error!("Conversion task for artifact {} did not complete: {}", id, e);
                    return HttpResponse::InternalServerError().json(
                        ErrorResponse::internal_error("Failed to convert contract to PDF."),
                    );
                }
            }
        }
    };

    // Transfer: the full read is the last failure point observable here, so
    // cleanup strictly follows a successful read.
    let read_path = send_path.clone();
    let bytes = match web::block(move || fs::read(&read_path)).await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            error!(
                "Failed to read artifact {} for transfer: {}",
                send_path.display(),
                e
            );
            return transfer_failed_response();
        }
        Err(e) => {
            error!("Transfer task for artifact {} did not complete: {}", id, e);
            return transfer_failed_response();
        }
    };

    // Cleanup: the caller that wins the registry removal owns the deletes.
    if data.registry.remove(&id).is_some() {
        if let Err(e) = fs::remove_file(&artifact.path) {
            error!(
                "Failed to delete artifact {}: {}",
                artifact.path.display(),
                e
            );
        }
        if send_path != artifact.path {
            if let Err(e) = fs::remove_file(&send_path) {
                error!(
                    "Failed to delete converted artifact {}: {}",
                    send_path.display(),
                    e
                );
            }
        }
    }

    let kind_label = kind.to_string();
    CONTRACTS_DOWNLOADED
        .with_label_values(&[kind_label.as_str(), format.as_str()])
        .inc();
    info!("Transferred artifact {} as {}", id, send_name);
    attachment_response(&send_name, bytes)
}

fn transfer_failed_response() -> HttpResponse {
    HttpResponse::InternalServerError()
        .content_type("text/plain; charset=utf-8")
        .body("Failed to download contract.")
}

fn attachment_response(file_name: &str, bytes: Vec<u8>) -> HttpResponse {
    let mime = mime_guess::from_path(file_name).first_or_octet_stream();
    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, mime.as_ref()))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename*=UTF-8''{}",
                utf8_percent_encode(file_name, ATTACHMENT_NAME_SET)
            ),
        ))
        .body(bytes)
}
