/// Integration tests for the user service against a mocked backend.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rust_kyc_sdk::datapoint_list::DataPointList;
use rust_kyc_sdk::errors::ApiError;
use rust_kyc_sdk::models::*;
use rust_kyc_sdk::transport::JsonTransport;
use rust_kyc_sdk::user_service::UserService;
use rust_kyc_sdk::validation::UNKNOWN_VALID_SSN;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEVELOPER_KEY: &str = "dev_key_123";
const PROJECT_KEY: &str = "project_key_456";
const USER_TOKEN: &str = "user_token_789";

fn service_for(mock_server: &MockServer) -> UserService {
    let transport = JsonTransport::new(mock_server.uri()).expect("transport");
    UserService::new(transport)
}

fn user_response(user_token: &str, data: Value) -> Value {
    json!({
        "user": {
            "user_token": user_token,
            "user_data": {"type": "list", "data": data},
        }
    })
}

fn sample_data_points() -> DataPointList {
    let mut list = DataPointList::new();
    list.add(
        PersonalName::new(Some("Ada".to_string()), Some("Lovelace".to_string()), Some(false))
            .into(),
    );
    list.add(Email::new(Some("ada@example.com".to_string()), Some(false), Some(false)).into());
    list
}

async fn body_of_last_request(mock_server: &MockServer) -> Value {
    let requests = mock_server
        .received_requests()
        .await
        .expect("request recording enabled");
    let last = requests.last().expect("at least one request");
    serde_json::from_slice(&last.body).expect("json body")
}

#[tokio::test]
async fn create_user_posts_the_serialized_list_and_parses_the_user() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/user"))
        .and(header("Authorization", format!("Bearer {}", DEVELOPER_KEY).as_str()))
        .and(header("Project-Key", PROJECT_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_response(
            USER_TOKEN,
            json!([{"data_type": "email", "email": "ada@example.com"}]),
        )))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let user = service
        .create_user(DEVELOPER_KEY, PROJECT_KEY, &sample_data_points())
        .await
        .expect("created user");

    assert_eq!(user.user_token, USER_TOKEN);
    assert_eq!(user.user_data.len(), 1);

    let body = body_of_last_request(&mock_server).await;
    assert_eq!(body["data_points"]["type"], json!("list"));
    let entries = body["data_points"]["data"].as_array().expect("data array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["data_type"], json!("name"));
    assert_eq!(entries[0]["first_name"], json!("Ada"));
    assert_eq!(entries[1]["data_type"], json!("email"));
}

#[tokio::test]
async fn create_user_without_user_payload_is_a_json_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let result = service
        .create_user(DEVELOPER_KEY, PROJECT_KEY, &DataPointList::new())
        .await;

    assert!(matches!(result, Err(ApiError::JsonError(_))));
}

#[tokio::test]
async fn login_with_fewer_than_two_verifications_never_hits_the_network() {
    let mock_server = MockServer::start().await;
    // Any request at all would violate the expectation.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_response(USER_TOKEN, json!([]))))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);

    let none = service.login_with(DEVELOPER_KEY, PROJECT_KEY, &[]).await;
    assert!(matches!(none, Err(ApiError::IncorrectParameters(_))));

    let one = service
        .login_with(
            DEVELOPER_KEY,
            PROJECT_KEY,
            &[Verification::new("v_1", VerificationStatus::Passed)],
        )
        .await;
    assert!(matches!(one, Err(ApiError::IncorrectParameters(_))));
}

#[tokio::test]
async fn login_with_two_verifications_sends_both_in_order() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_response(USER_TOKEN, json!([]))))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let verifications = [
        Verification::new("v_phone", VerificationStatus::Passed),
        Verification::new("v_email", VerificationStatus::Passed),
    ];
    let user = service
        .login_with(DEVELOPER_KEY, PROJECT_KEY, &verifications)
        .await
        .expect("logged in");
    assert_eq!(user.user_token, USER_TOKEN);

    let body = body_of_last_request(&mock_server).await;
    let data = body["verifications"]["data"].as_array().expect("data array");
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["verification_id"], json!("v_phone"));
    assert_eq!(data[1]["verification_id"], json!("v_email"));
}

#[tokio::test]
async fn fetch_reconciles_housing_and_income_source_but_not_time_at_address() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/user"))
        .and(header("User-Token", USER_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_response(
            USER_TOKEN,
            json!([
                {"data_type": "housing", "housing_type_id": 2},
                {"data_type": "income_source", "income_type_id": 1, "salary_frequency_id": 3},
                {"data_type": "time_at_address", "time_at_address_id": 1},
            ]),
        )))
        .mount(&mock_server)
        .await;

    let housing_types = [
        HousingType {
            housing_type_id: 1,
            description: Some("Own".to_string()),
        },
        HousingType {
            housing_type_id: 2,
            description: Some("Rent".to_string()),
        },
    ];
    let income_types = [IncomeType {
        income_type_id: 1,
        description: Some("Salaried".to_string()),
    }];
    let salary_frequencies = [SalaryFrequency {
        salary_frequency_id: 3,
        description: Some("Monthly".to_string()),
    }];

    let service = service_for(&mock_server);
    let user = service
        .fetch_user_data(
            DEVELOPER_KEY,
            PROJECT_KEY,
            USER_TOKEN,
            &housing_types,
            &income_types,
            &salary_frequencies,
            false,
        )
        .await
        .expect("fetched user");

    let housing = match user.user_data.first(DataPointKind::Housing) {
        Some(DataPoint::Housing(housing)) => housing,
        other => panic!("expected housing, got {other:?}"),
    };
    assert_eq!(
        housing.housing_type().and_then(|h| h.description.as_deref()),
        Some("Rent")
    );

    let income_source = match user.user_data.first(DataPointKind::IncomeSource) {
        Some(DataPoint::IncomeSource(source)) => source,
        other => panic!("expected income source, got {other:?}"),
    };
    assert_eq!(
        income_source
            .income_type()
            .and_then(|i| i.description.as_deref()),
        Some("Salaried")
    );
    assert_eq!(
        income_source
            .salary_frequency()
            .and_then(|s| s.description.as_deref()),
        Some("Monthly")
    );

    // Time-at-address keeps the server-embedded entry untouched.
    let time_at_address = match user.user_data.first(DataPointKind::TimeAtAddress) {
        Some(DataPoint::TimeAtAddress(dp)) => dp,
        other => panic!("expected time at address, got {other:?}"),
    };
    assert_eq!(
        time_at_address
            .time_at_address()
            .and_then(|t| t.description.as_deref()),
        None
    );
}

#[tokio::test]
async fn fetch_without_matching_taxonomy_entries_keeps_the_wire_values() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_response(
            USER_TOKEN,
            json!([{"data_type": "housing", "housing_type_id": 9}]),
        )))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let user = service
        .fetch_user_data(DEVELOPER_KEY, PROJECT_KEY, USER_TOKEN, &[], &[], &[], false)
        .await
        .expect("fetched user");

    let housing = match user.user_data.first(DataPointKind::Housing) {
        Some(DataPoint::Housing(housing)) => housing,
        other => panic!("expected housing, got {other:?}"),
    };
    assert_eq!(
        housing.housing_type().map(|h| h.housing_type_id),
        Some(9)
    );
    assert_eq!(housing.housing_type().and_then(|h| h.description.clone()), None);
}

#[tokio::test]
async fn update_drops_the_masked_ssn_placeholder() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_response(USER_TOKEN, json!([]))))
        .mount(&mock_server)
        .await;

    let mut list = sample_data_points();
    list.add(Ssn::new(Some(UNKNOWN_VALID_SSN.to_string()), Some(true), Some(false)).into());

    let service = service_for(&mock_server);
    service
        .update_user_data(DEVELOPER_KEY, PROJECT_KEY, USER_TOKEN, &list)
        .await
        .expect("updated user");

    let body = body_of_last_request(&mock_server).await;
    let entries = body["data_points"]["data"].as_array().expect("data array");
    assert!(
        entries.iter().all(|entry| entry["data_type"] != json!("ssn")),
        "masked SSN must not reach the wire: {entries:?}"
    );
    // The caller's list is untouched.
    assert_eq!(list.get(DataPointKind::Ssn).len(), 1);
}

#[tokio::test]
async fn update_keeps_an_explicitly_not_specified_ssn() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_response(USER_TOKEN, json!([]))))
        .mount(&mock_server)
        .await;

    let mut list = DataPointList::new();
    list.add(Ssn::new(Some(UNKNOWN_VALID_SSN.to_string()), Some(false), Some(true)).into());

    let service = service_for(&mock_server);
    service
        .update_user_data(DEVELOPER_KEY, PROJECT_KEY, USER_TOKEN, &list)
        .await
        .expect("updated user");

    let body = body_of_last_request(&mock_server).await;
    let entries = body["data_points"]["data"].as_array().expect("data array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["data_type"], json!("ssn"));
    assert_eq!(entries[0]["not_specified"], json!(true));
}

#[tokio::test]
async fn update_keeps_a_real_ssn() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_response(USER_TOKEN, json!([]))))
        .mount(&mock_server)
        .await;

    let mut list = DataPointList::new();
    list.add(Ssn::new(Some("123-45-6789".to_string()), Some(false), Some(false)).into());

    let service = service_for(&mock_server);
    service
        .update_user_data(DEVELOPER_KEY, PROJECT_KEY, USER_TOKEN, &list)
        .await
        .expect("updated user");

    let body = body_of_last_request(&mock_server).await;
    let entries = body["data_points"]["data"].as_array().expect("data array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["ssn"], json!("123-45-6789"));
}

#[tokio::test]
async fn unauthorized_maps_to_the_unauthorized_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let result = service
        .fetch_user_data(DEVELOPER_KEY, PROJECT_KEY, "stale_token", &[], &[], &[], false)
        .await;

    assert!(matches!(result, Err(ApiError::Unauthorized(_))));
}

#[tokio::test]
async fn backend_error_bodies_surface_code_and_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/user"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"code": 90222, "message": "Invalid data point"})),
        )
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let result = service
        .create_user(DEVELOPER_KEY, PROJECT_KEY, &sample_data_points())
        .await;

    match result {
        Err(ApiError::BackendError { code, reason }) => {
            assert_eq!(code, 90222);
            assert_eq!(reason.as_deref(), Some("Invalid data point"));
        }
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_token_hook_fires_unless_suppressed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let fired = Arc::new(AtomicBool::new(false));
    let hook_flag = fired.clone();
    let transport = JsonTransport::new(mock_server.uri())
        .expect("transport")
        .with_invalid_token_hook(Arc::new(move || {
            hook_flag.store(true, Ordering::SeqCst);
        }));
    let service = UserService::new(transport);

    // Suppressed: the hook stays silent.
    let result = service
        .fetch_user_data(DEVELOPER_KEY, PROJECT_KEY, USER_TOKEN, &[], &[], &[], true)
        .await;
    assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    assert!(!fired.load(Ordering::SeqCst));

    // Default path: the hook fires.
    let result = service
        .fetch_user_data(DEVELOPER_KEY, PROJECT_KEY, USER_TOKEN, &[], &[], &[], false)
        .await;
    assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    assert!(fired.load(Ordering::SeqCst));
}
