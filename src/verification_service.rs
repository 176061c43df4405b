use crate::errors::ApiError;
use crate::models::{BirthDate, Email, PhoneNumber, Verification};
use crate::serializer::{date_to_wire, parse_verification};
use crate::transport::{Authorization, JsonTransport};
use serde_json::{json, Value};

const VERIFICATION_START_PATH: &str = "/v1/verifications/start";
const DOCUMENT_OCR_PATH: &str = "/v1/verifications/documentocr";

fn verification_finish_path(verification_id: &str) -> String {
    format!("/v1/verifications/{}/finish", verification_id)
}

fn verification_status_path(verification_id: &str) -> String {
    format!("/v1/verifications/{}/status", verification_id)
}

fn verification_restart_path(verification_id: &str) -> String {
    format!("/v1/verifications/{}/restart", verification_id)
}

fn document_status_path(verification_id: &str) -> String {
    format!("/v1/verifications/{}/document_status", verification_id)
}

/// Drives the start/status/complete/restart state machine for each
/// verifiable field, plus document/biometric verification.
///
/// Every call is stateless and maps to one network round trip. The caller
/// is responsible for attaching the returned `Verification` onto the
/// originating data point; when the backend exposes an out-of-band secret
/// it is returned as a field on the result.
pub struct VerificationService {
    transport: JsonTransport,
}

impl VerificationService {
    pub fn new(transport: JsonTransport) -> Self {
        Self { transport }
    }

    /// Starts an SMS verification of the given phone number.
    pub async fn start_phone_verification(
        &self,
        developer_key: &str,
        project_key: &str,
        phone: &PhoneNumber,
    ) -> Result<Verification, ApiError> {
        let body = json!({
            "datapoint_type": "phone",
            "show_verification_secret": true,
            "datapoint": {
                "country_code": phone.country_code(),
                "phone_number": phone.phone_number(),
            }
        });
        self.start(developer_key, project_key, body, "phone").await
    }

    /// Starts an email verification.
    pub async fn start_email_verification(
        &self,
        developer_key: &str,
        project_key: &str,
        email: &Email,
    ) -> Result<Verification, ApiError> {
        let body = json!({
            "datapoint_type": "email",
            "show_verification_secret": true,
            "datapoint": {
                "email": email.email(),
            }
        });
        self.start(developer_key, project_key, body, "email").await
    }

    /// Starts a birth date verification.
    pub async fn start_birth_date_verification(
        &self,
        developer_key: &str,
        project_key: &str,
        birth_date: &BirthDate,
    ) -> Result<Verification, ApiError> {
        let body = json!({
            "datapoint_type": "birthDate",
            "show_verification_secret": true,
            "datapoint": {
                "date": date_to_wire(birth_date.date()),
            }
        });
        self.start(developer_key, project_key, body, "birthDate")
            .await
    }

    /// Submits document images (and an optional selfie/liveness payload)
    /// for OCR and biometric verification. Images arrive already base64
    /// encoded; the SDK treats them as opaque strings. The returned
    /// verification must be polled via `document_verification_status`.
    #[allow(clippy::too_many_arguments)]
    pub async fn start_document_verification(
        &self,
        developer_key: &str,
        project_key: &str,
        user_token: &str,
        document_images: &[String],
        selfie: Option<&str>,
        liveness_data: Option<&Value>,
        workflow_object_id: Option<&str>,
    ) -> Result<Verification, ApiError> {
        let images: Vec<Value> = document_images
            .iter()
            .map(|image| json!({ "image_array": image }))
            .collect();
        let selfie_value = match selfie {
            Some(selfie) => json!({ "image_array": selfie }),
            None => Value::Null,
        };
        let mut body = json!({
            "datapoint_type": "AU10TIX",
            "datapoint": {
                "document_images": images,
                "selfie": selfie_value,
                "liveness_data": liveness_data.cloned().unwrap_or(Value::Null),
            }
        });
        // The workflow association rides at the top level, not inside the
        // datapoint envelope.
        if let Some(workflow_object_id) = workflow_object_id {
            body["workflow_object_id"] = json!(workflow_object_id);
        }
        let auth = Authorization::AccessAndUserToken {
            developer_key,
            project_key,
            user_token,
        };
        tracing::info!(
            "Starting document verification with {} images",
            document_images.len()
        );
        let response = self
            .transport
            .post(DOCUMENT_OCR_PATH, &auth, Some(&body), true)
            .await?;
        parse_verification(&response).ok_or_else(|| {
            ApiError::JsonError("Response missing verification payload".to_string())
        })
    }

    /// Read-only probe of a long-running document verification. Does not
    /// change state.
    pub async fn document_verification_status(
        &self,
        developer_key: &str,
        project_key: &str,
        verification_id: &str,
    ) -> Result<Verification, ApiError> {
        let auth = Authorization::AccessToken {
            developer_key,
            project_key,
        };
        let response = self
            .transport
            .get(&document_status_path(verification_id), &auth, true)
            .await?;
        parse_verification(&response).ok_or_else(|| {
            ApiError::JsonError("Response missing verification payload".to_string())
        })
    }

    /// Submits the out-of-band secret (e.g. the SMS code) to complete a
    /// verification.
    pub async fn complete_verification(
        &self,
        developer_key: &str,
        project_key: &str,
        verification_id: &str,
        secret: Option<&str>,
    ) -> Result<Verification, ApiError> {
        let auth = Authorization::AccessToken {
            developer_key,
            project_key,
        };
        let body = json!({ "secret": secret });
        tracing::info!("Completing verification {}", verification_id);
        let response = self
            .transport
            .post(&verification_finish_path(verification_id), &auth, Some(&body), true)
            .await?;
        parse_verification(&response).ok_or_else(|| {
            ApiError::JsonError("Response missing verification payload".to_string())
        })
    }

    /// General status probe, usable at any state.
    pub async fn verification_status(
        &self,
        developer_key: &str,
        project_key: &str,
        verification_id: &str,
    ) -> Result<Verification, ApiError> {
        let auth = Authorization::AccessToken {
            developer_key,
            project_key,
        };
        let response = self
            .transport
            .get(&verification_status_path(verification_id), &auth, true)
            .await?;
        parse_verification(&response).ok_or_else(|| {
            ApiError::JsonError("Response missing verification payload".to_string())
        })
    }

    /// Resets the server-side verification back to started. Safe to call on
    /// an already-started verification.
    pub async fn restart_verification(
        &self,
        developer_key: &str,
        project_key: &str,
        verification_id: &str,
    ) -> Result<Verification, ApiError> {
        let auth = Authorization::AccessToken {
            developer_key,
            project_key,
        };
        tracing::info!("Restarting verification {}", verification_id);
        let response = self
            .transport
            .post(&verification_restart_path(verification_id), &auth, None, true)
            .await?;
        parse_verification(&response).ok_or_else(|| {
            ApiError::JsonError("Response missing verification payload".to_string())
        })
    }

    async fn start(
        &self,
        developer_key: &str,
        project_key: &str,
        body: Value,
        datapoint_type: &str,
    ) -> Result<Verification, ApiError> {
        let auth = Authorization::AccessToken {
            developer_key,
            project_key,
        };
        tracing::info!("Starting {} verification", datapoint_type);
        let response = self
            .transport
            .post(VERIFICATION_START_PATH, &auth, Some(&body), true)
            .await?;
        parse_verification(&response).ok_or_else(|| {
            ApiError::JsonError("Response missing verification payload".to_string())
        })
    }
}
