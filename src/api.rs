use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{error_message_from_body, ClientError};
use crate::models::{
    AnalysisResult, EvaluateRequest, Evaluation, HistoryEntry, PredictResponse, Role,
};

// -- Upload payload --

/// A resume read into memory from the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// One multipart field of a `/predict` request.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart<'a> {
    File {
        file_name: &'a str,
        content_type: Option<&'a str>,
        bytes: &'a [u8],
    },
    Text(&'a str),
}

/// A validated `/predict` request: a file is present and a role is chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictRequest {
    pub upload: ResumeUpload,
    pub role: Role,
}

impl PredictRequest {
    /// Fails with [`ClientError::MissingFile`] when nothing has been selected.
    pub fn prepare(upload: Option<&ResumeUpload>, role: Role) -> Result<Self, ClientError> {
        let upload = upload.ok_or(ClientError::MissingFile)?;
        Ok(Self {
            upload: upload.clone(),
            role,
        })
    }

    /// Multipart layout, in the order it is sent.
    pub fn parts(&self) -> Vec<(&'static str, FormPart<'_>)> {
        vec![
            (
                "file",
                FormPart::File {
                    file_name: &self.upload.file_name,
                    content_type: self.upload.content_type.as_deref(),
                    bytes: &self.upload.bytes,
                },
            ),
            ("role", FormPart::Text(self.role.as_str())),
        ]
    }

    fn to_form(&self) -> Result<Form, ClientError> {
        let mut form = Form::new();
        for (field, part) in self.parts() {
            form = match part {
                FormPart::File {
                    file_name,
                    content_type,
                    bytes,
                } => {
                    let mut file_part = Part::bytes(bytes.to_vec()).file_name(file_name.to_string());
                    if let Some(ct) = content_type {
                        file_part = file_part
                            .mime_str(ct)
                            .map_err(|e| ClientError::FileRead(format!("bad content type '{}': {}", ct, e)))?;
                    }
                    form.part(field, file_part)
                }
                FormPart::Text(value) => form.text(field, value.to_string()),
            };
        }
        Ok(form)
    }
}

// -- Client --

/// Typed wrappers around the three service endpoints.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: AppConfig,
}

impl ApiClient {
    pub fn new(config: AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Score a resume against a role. `POST /predict`, multipart.
    pub async fn predict(&self, request: &PredictRequest) -> Result<AnalysisResult, ClientError> {
        let url = self.config.endpoint("predict")?;
        info!(
            "POST {} (file={}, {} bytes, role={})",
            url,
            request.upload.file_name,
            request.upload.bytes.len(),
            request.role
        );

        let response = self
            .http
            .post(url)
            .multipart(request.to_form()?)
            .send()
            .await?;

        read_json(response).await.and_then(analysis_outcome)
    }

    /// Grade an interview answer. `POST /evaluate`, JSON.
    pub async fn evaluate(&self, request: &EvaluateRequest) -> Result<Evaluation, ClientError> {
        let url = self.config.endpoint("evaluate")?;
        info!("POST {} (answer {} chars)", url, request.answer.chars().count());

        let response = self.http.post(url).json(request).send().await?;
        read_json(response).await
    }

    /// Past attempt scores, oldest first. `GET /history`.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        let url = self.config.endpoint("history")?;
        info!("GET {}", url);

        let response = self.http.get(url).send().await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    decode_body(status, &body)
}

/// Decode a JSON body, turning non-2xx statuses into [`ClientError::Server`].
/// The message comes from the body when it has one, else the reason phrase.
fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ClientError> {
    if !status.is_success() {
        let message = error_message_from_body(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
        warn!("Request failed with {}: {}", status.as_u16(), message);
        return Err(ClientError::Server {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(body).map_err(ClientError::from)
}

/// `/predict` answers 200 with `{"error": ...}` when it cannot read the resume.
fn analysis_outcome(response: PredictResponse) -> Result<AnalysisResult, ClientError> {
    match response {
        PredictResponse::Analysis(result) => Ok(result),
        PredictResponse::Failure { error } => {
            warn!("Analysis rejected by service: {}", error);
            Err(ClientError::Rejected(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> ResumeUpload {
        ResumeUpload {
            file_name: "cv.pdf".into(),
            content_type: Some("application/pdf".into()),
            bytes: b"%PDF-1.4".to_vec(),
        }
    }

    #[test]
    fn test_prepare_without_file_is_missing_file() {
        let err = PredictRequest::prepare(None, Role::Ml).unwrap_err();
        assert_eq!(err, ClientError::MissingFile);
    }

    #[test]
    fn test_predict_parts_carry_file_and_role() {
        let file = upload();
        let request = PredictRequest::prepare(Some(&file), Role::Ml).unwrap();
        let parts = request.parts();

        assert_eq!(parts.len(), 2, "exactly a file and a role field");
        assert_eq!(
            parts[0],
            (
                "file",
                FormPart::File {
                    file_name: "cv.pdf",
                    content_type: Some("application/pdf"),
                    bytes: &b"%PDF-1.4"[..],
                }
            )
        );
        assert_eq!(parts[1], ("role", FormPart::Text("ml")));
    }

    #[test]
    fn test_form_builds_for_every_role() {
        let file = upload();
        for role in Role::ALL {
            let request = PredictRequest::prepare(Some(&file), role).unwrap();
            assert!(request.to_form().is_ok(), "form for {} should build", role);
        }
    }

    #[test]
    fn test_form_without_content_type_builds() {
        let mut file = upload();
        file.content_type = None;
        let request = PredictRequest::prepare(Some(&file), Role::Backend).unwrap();
        assert!(request.to_form().is_ok());
    }

    #[test]
    fn test_invalid_content_type_is_reported() {
        let mut file = upload();
        file.content_type = Some("not a mime".into());
        let request = PredictRequest::prepare(Some(&file), Role::Backend).unwrap();
        assert!(matches!(request.to_form(), Err(ClientError::FileRead(_))));
    }

    #[test]
    fn test_empty_error_body_falls_back_to_reason_phrase() {
        let err = decode_body::<Evaluation>(StatusCode::NOT_FOUND, "").unwrap_err();
        assert_eq!(
            err,
            ClientError::Server {
                status: 404,
                message: "Not Found".into()
            }
        );
    }

    #[test]
    fn test_validation_error_lists_messages() {
        let body = r#"{"detail": [
            {"loc": ["body", "question"], "msg": "field required", "type": "value_error.missing"},
            {"loc": ["body", "answer"], "msg": "field required", "type": "value_error.missing"}
        ]}"#;
        let err = decode_body::<Evaluation>(StatusCode::UNPROCESSABLE_ENTITY, body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Server error (422): field required; field required"
        );
    }

    #[test]
    fn test_plain_text_server_error() {
        let err = decode_body::<Vec<HistoryEntry>>(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        )
        .unwrap_err();
        assert_eq!(
            err,
            ClientError::Server {
                status: 500,
                message: "Internal Server Error".into()
            }
        );
    }

    #[test]
    fn test_error_reply_with_ok_status_is_rejected() {
        let body = r#"{"error": "Could not extract text from PDF"}"#;
        let result = decode_body::<PredictResponse>(StatusCode::OK, body).and_then(analysis_outcome);
        assert_eq!(
            result,
            Err(ClientError::Rejected("Could not extract text from PDF".into())),
            "a 200 error reply must not read as an analysis"
        );
    }

    #[test]
    fn test_analysis_reply_is_decoded() {
        let body = r#"{"selected": false, "score": 41.5, "skills_found": ["sql"],
            "missing_skills": ["go"], "interview_questions": [],
            "resume_suggestions": ["Add metrics"]}"#;
        let result = decode_body::<PredictResponse>(StatusCode::OK, body)
            .and_then(analysis_outcome)
            .unwrap();
        assert_eq!(result.score, 41.5);
        assert_eq!(result.first_question(), None);
    }

    #[test]
    fn test_malformed_success_body_is_a_decode_error() {
        let err = decode_body::<Vec<HistoryEntry>>(StatusCode::OK, "<html>").unwrap_err();
        assert!(
            matches!(err, ClientError::Decode(_)),
            "expected a decode error, got {:?}",
            err
        );
    }
}
