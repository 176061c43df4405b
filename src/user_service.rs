use crate::datapoint_list::DataPointList;
use crate::errors::ApiError;
use crate::models::{
    DataPoint, DataPointKind, HousingType, IncomeType, SalaryFrequency, User, Verification,
};
use crate::serializer::{parse_user, serialize_data_point_list, serialize_verification};
use crate::transport::{Authorization, JsonTransport};
use crate::validation::UNKNOWN_VALID_SSN;
use serde_json::json;

const CREATE_USER_PATH: &str = "/v1/user";
const LOGIN_PATH: &str = "/v1/user/login";
const USER_INFO_PATH: &str = "/v1/user";

/// Orchestrates create/login/fetch/update of a user's full data point set
/// against the remote API. Stateless per call; one network round trip per
/// operation.
pub struct UserService {
    transport: JsonTransport,
}

impl UserService {
    pub fn new(transport: JsonTransport) -> Self {
        Self { transport }
    }

    /// POSTs the serialized data point list and parses the created user.
    pub async fn create_user(
        &self,
        developer_key: &str,
        project_key: &str,
        data_points: &DataPointList,
    ) -> Result<User, ApiError> {
        let auth = Authorization::AccessToken {
            developer_key,
            project_key,
        };
        let body = json!({ "data_points": serialize_data_point_list(data_points) });
        tracing::info!("Creating user with {} data points", data_points.len());

        let response = self
            .transport
            .post(CREATE_USER_PATH, &auth, Some(&body), true)
            .await?;
        parse_user(&response)
            .ok_or_else(|| ApiError::JsonError("Response missing user payload".to_string()))
    }

    /// Logs in with two completed verifications (the first and last of the
    /// supplied sequence). Fails with `IncorrectParameters` before issuing
    /// any network call when fewer than two are supplied.
    pub async fn login_with(
        &self,
        developer_key: &str,
        project_key: &str,
        verifications: &[Verification],
    ) -> Result<User, ApiError> {
        let (first, second) = match (verifications.first(), verifications.last()) {
            (Some(first), Some(second)) if verifications.len() >= 2 => (first, second),
            _ => {
                return Err(ApiError::IncorrectParameters(
                    "Login requires at least two completed verifications".to_string(),
                ))
            }
        };
        let auth = Authorization::AccessToken {
            developer_key,
            project_key,
        };
        let body = json!({
            "verifications": {
                "data": [
                    serialize_verification(first),
                    serialize_verification(second),
                ]
            }
        });
        tracing::info!("Logging in with verifications");

        let response = self
            .transport
            .post(LOGIN_PATH, &auth, Some(&body), true)
            .await?;
        parse_user(&response)
            .ok_or_else(|| ApiError::JsonError("Response missing user payload".to_string()))
    }

    /// Fetches the user record, then reconciles server-returned housing and
    /// income-source taxonomy references against the caller's canonical
    /// lists. The server may return taxonomy entries that are stale or
    /// partial relative to the locally loaded lists, and display strings
    /// must come from the local copy.
    ///
    /// `suppress_auth_failure_side_effects` stops an invalid-token response
    /// from firing the transport's invalid-token hook.
    #[allow(clippy::too_many_arguments)]
    pub async fn fetch_user_data(
        &self,
        developer_key: &str,
        project_key: &str,
        user_token: &str,
        known_housing_types: &[HousingType],
        known_income_types: &[IncomeType],
        known_salary_frequencies: &[SalaryFrequency],
        suppress_auth_failure_side_effects: bool,
    ) -> Result<User, ApiError> {
        let auth = Authorization::AccessAndUserToken {
            developer_key,
            project_key,
            user_token,
        };
        let response = self
            .transport
            .get(USER_INFO_PATH, &auth, !suppress_auth_failure_side_effects)
            .await?;
        let mut user = parse_user(&response)
            .ok_or_else(|| ApiError::JsonError("Response missing user payload".to_string()))?;
        reconcile_taxonomies(
            &mut user.user_data,
            known_housing_types,
            known_income_types,
            known_salary_frequencies,
        );
        Ok(user)
    }

    /// PUTs the updated data point set. The input list is flattened into a
    /// fresh list first, and a masked SSN (the reserved unknown-valid
    /// placeholder the UI shows for an already-verified SSN) is dropped from
    /// the payload entirely so it does not overwrite the stored value. The
    /// drop does not apply when the user explicitly declined to provide an
    /// SSN.
    pub async fn update_user_data(
        &self,
        developer_key: &str,
        project_key: &str,
        user_token: &str,
        data_points: &DataPointList,
    ) -> Result<User, ApiError> {
        let mut outgoing: DataPointList = data_points.iter().cloned().collect();
        let drop_ssn = match outgoing.first(DataPointKind::Ssn) {
            Some(DataPoint::Ssn(ssn)) => {
                ssn.ssn() == Some(UNKNOWN_VALID_SSN) && ssn.base.not_specified != Some(true)
            }
            _ => false,
        };
        if drop_ssn {
            tracing::debug!("Dropping masked SSN from the update payload");
            outgoing.remove_kind(DataPointKind::Ssn);
        }

        let auth = Authorization::AccessAndUserToken {
            developer_key,
            project_key,
            user_token,
        };
        let body = json!({ "data_points": serialize_data_point_list(&outgoing) });
        tracing::info!("Updating user with {} data points", outgoing.len());

        let response = self
            .transport
            .put(USER_INFO_PATH, &auth, Some(&body), true)
            .await?;
        parse_user(&response)
            .ok_or_else(|| ApiError::JsonError("Response missing user payload".to_string()))
    }
}

/// Replaces taxonomy references on fetched data points with the canonical
/// entries matching their ids. Housing and income source only; time at
/// address deliberately keeps the server-embedded entry.
fn reconcile_taxonomies(
    list: &mut DataPointList,
    known_housing_types: &[HousingType],
    known_income_types: &[IncomeType],
    known_salary_frequencies: &[SalaryFrequency],
) {
    for data_point in list.iter_mut() {
        match data_point {
            DataPoint::Housing(housing) => {
                let canonical = housing.housing_type().and_then(|current| {
                    known_housing_types
                        .iter()
                        .find(|h| h.housing_type_id == current.housing_type_id)
                        .cloned()
                });
                if let Some(canonical) = canonical {
                    tracing::debug!(
                        "Reconciled housing type {} with canonical entry",
                        canonical.housing_type_id
                    );
                    housing.set_housing_type(Some(canonical));
                }
            }
            DataPoint::IncomeSource(income_source) => {
                let canonical_income = income_source.income_type().and_then(|current| {
                    known_income_types
                        .iter()
                        .find(|i| i.income_type_id == current.income_type_id)
                        .cloned()
                });
                if let Some(canonical) = canonical_income {
                    income_source.set_income_type(Some(canonical));
                }
                let canonical_frequency = income_source.salary_frequency().and_then(|current| {
                    known_salary_frequencies
                        .iter()
                        .find(|s| s.salary_frequency_id == current.salary_frequency_id)
                        .cloned()
                });
                if let Some(canonical) = canonical_frequency {
                    income_source.set_salary_frequency(Some(canonical));
                }
            }
            _ => {}
        }
    }
}
