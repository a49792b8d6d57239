// Desktop shell stand-ins.
//
// The dashboard's desktop wrapper asks for file selection and exports over IPC.
// These handlers answer with fixed payloads and always report success.

use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::interfaces::http::{add_log, HttpState};

pub const SELECTED_FILE_PATH: &str = "/mock/path/assembly.prt";
pub const SELECTED_FILE_NAME: &str = "robot_assembly.prt";
pub const URDF_OUTPUT_PATH: &str = "/exports/myrobot.urdf";
pub const URDF_FILE_NAME: &str = "myrobot.urdf";
pub const PDF_OUTPUT_PATH: &str = "/exports/export_summary.pdf";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectFileResponse {
    pub success: bool,
    pub file_path: String,
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportUrdfResponse {
    pub success: bool,
    pub output_path: String,
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportPdfResponse {
    pub success: bool,
    pub file_path: String,
}

#[post("/shell/select-file")]
async fn select_file(data: web::Data<HttpState>) -> impl Responder {
    add_log(&data.logs, "INFO", "Shell", "select-file requested");
    HttpResponse::Ok().json(SelectFileResponse {
        success: true,
        file_path: SELECTED_FILE_PATH.to_string(),
        file_name: SELECTED_FILE_NAME.to_string(),
    })
}

// The export payload is accepted but not inspected.
#[post("/shell/export-urdf")]
async fn export_urdf(data: web::Data<HttpState>, _payload: web::Bytes) -> impl Responder {
    add_log(&data.logs, "INFO", "Shell", "export-urdf requested");
    HttpResponse::Ok().json(ExportUrdfResponse {
        success: true,
        output_path: URDF_OUTPUT_PATH.to_string(),
        file_name: URDF_FILE_NAME.to_string(),
    })
}

#[post("/shell/export-pdf")]
async fn export_pdf(data: web::Data<HttpState>) -> impl Responder {
    add_log(&data.logs, "INFO", "Shell", "export-pdf requested");
    HttpResponse::Ok().json(ExportPdfResponse {
        success: true,
        file_path: PDF_OUTPUT_PATH.to_string(),
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(select_file)
        .service(export_urdf)
        .service(export_pdf);
}
