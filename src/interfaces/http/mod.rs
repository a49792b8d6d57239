use crate::application::use_cases::column_mapping::suggest_mapping;
use crate::application::use_cases::row_normalizer::normalize_header;
use crate::application::SheetImportUseCase;
use crate::domain::error::AppError;
use crate::domain::import::{RawRow, CANONICAL_COLUMNS, REGION_PREFIXES};
use crate::infrastructure::config::{AppConfig, ServerConfig};
use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub type SharedLogs = Arc<Mutex<Vec<LogEntry>>>;

pub fn new_log_buffer() -> SharedLogs {
    Arc::new(Mutex::new(Vec::new()))
}

pub struct HttpState {
    pub config: AppConfig,
    pub import_use_case: SheetImportUseCase,
    pub logs: SharedLogs,
}

impl HttpState {
    pub fn new(config: AppConfig, logs: SharedLogs) -> Self {
        let import_use_case = SheetImportUseCase::new(config.import.clone(), logs.clone());
        Self {
            config,
            import_use_case,
            logs,
        }
    }
}

#[derive(Deserialize)]
pub struct NormalizeRequest {
    #[serde(default)]
    pub source: Option<String>,
    pub rows: Vec<RawRow>,
}

#[derive(Deserialize)]
pub struct ImportFileRequest {
    pub path: PathBuf,
}

#[derive(Deserialize)]
pub struct HeaderRequest {
    pub name: String,
}

#[derive(Serialize)]
pub struct HeaderResponse {
    pub canonical: String,
}

#[derive(Deserialize)]
pub struct MappingRequest {
    pub headers: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyResponse {
    pub canonical_columns: &'static [&'static str],
    pub region_prefixes: &'static [&'static str],
}

fn error_response(err: &AppError) -> HttpResponse {
    match err {
        AppError::ValidationError(_) | AppError::ParseError(_) => {
            HttpResponse::BadRequest().body(err.to_string())
        }
        AppError::NotFound(_) => HttpResponse::NotFound().body(err.to_string()),
        _ => HttpResponse::InternalServerError().body(err.to_string()),
    }
}

#[post("/import/normalize")]
async fn normalize_rows(
    data: web::Data<HttpState>,
    req: web::Json<NormalizeRequest>,
) -> impl Responder {
    let source = req.source.as_deref().unwrap_or("api");
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Normalizing {} rows (source={})", req.rows.len(), source),
    );

    let report = data.import_use_case.import_rows(source, &req.rows);
    HttpResponse::Ok().json(report)
}

#[post("/import/file")]
async fn import_file(
    data: web::Data<HttpState>,
    req: web::Json<ImportFileRequest>,
) -> impl Responder {
    let path = req.into_inner().path;
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Importing file {}", path.display()),
    );

    match data.import_use_case.import_file_within_root(path).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Import failed: {}", e),
            );
            error_response(&e)
        }
    }
}

#[post("/import/header")]
async fn normalize_header_name(req: web::Json<HeaderRequest>) -> impl Responder {
    HttpResponse::Ok().json(HeaderResponse {
        canonical: normalize_header(&req.name),
    })
}

#[post("/import/mapping")]
async fn column_mapping(req: web::Json<MappingRequest>) -> impl Responder {
    HttpResponse::Ok().json(suggest_mapping(&req.headers))
}

#[get("/import/vocabulary")]
async fn vocabulary() -> impl Responder {
    HttpResponse::Ok().json(VocabularyResponse {
        canonical_columns: CANONICAL_COLUMNS,
        region_prefixes: REGION_PREFIXES,
    })
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap_or_else(PoisonError::into_inner);
    HttpResponse::Ok().json(&*logs)
}

pub fn add_log_entry(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap_or_else(PoisonError::into_inner);
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

/// Registers every `/api` route. Shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(normalize_rows)
            .service(import_file)
            .service(normalize_header_name)
            .service(column_mapping)
            .service(vocabulary)
            .service(get_logs)
            .configure(crate::interfaces::shell::configure),
    );
}

/// Cross-origin access only for the configured origins.
pub fn cors(server: &ServerConfig) -> Cors {
    server
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

pub fn start_server(state: web::Data<HttpState>) -> std::io::Result<Server> {
    let host = state.config.server.host.clone();
    let port = state.config.server.port;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&state.config.server))
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host.as_str(), port))?
    .run();

    Ok(server)
}
