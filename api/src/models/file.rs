use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UploadedFile {
    pub path: String,
    pub url: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
}
