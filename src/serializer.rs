//! Bidirectional mapping between the data point model and the wire JSON
//! shape.
//!
//! Encoding rules, per field:
//! - value-bearing fields are always emitted, as an explicit `null` when
//!   absent (omission would mean "leave unchanged" on partial updates);
//! - `not_specified` is emitted only when true;
//! - `verified` is emitted only when true;
//! - `verification`, when attached, nests its own serialized form.
//!
//! Unknown `data_type` entries deserialize to nothing instead of failing.

use crate::datapoint_list::DataPointList;
use crate::models::{
    Address, BirthDate, Country, CreditScore, DataPoint, DataPointBase, DataPointKind, Email,
    Housing, HousingType, Income, IncomeSource, IncomeType, MemberOfArmedForces, PaydayLoan,
    PersonalName, PhoneNumber, SalaryFrequency, Ssn, TimeAtAddress, TimeAtAddressOption, User,
    Verification, VerificationStatus,
};
use chrono::NaiveDate;
use serde_json::{json, Map, Value};

/// Wire format for birth dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Renders an optional date in the wire format, explicit null when absent.
pub fn date_to_wire(date: Option<NaiveDate>) -> Value {
    match date {
        Some(date) => json!(date.format(DATE_FORMAT).to_string()),
        None => Value::Null,
    }
}

fn str_or_null(value: Option<&str>) -> Value {
    match value {
        Some(s) => json!(s),
        None => Value::Null,
    }
}

fn i64_or_null(value: Option<i64>) -> Value {
    match value {
        Some(n) => json!(n),
        None => Value::Null,
    }
}

fn bool_or_null(value: Option<bool>) -> Value {
    match value {
        Some(b) => json!(b),
        None => Value::Null,
    }
}

// ============ Serialization ============

pub fn serialize_verification(verification: &Verification) -> Value {
    let mut data = Map::new();
    data.insert(
        "verification_id".to_string(),
        json!(verification.verification_id),
    );
    data.insert("status".to_string(), json!(verification.status.wire_name()));
    if let Some(ref verification_type) = verification.verification_type {
        data.insert("verification_type".to_string(), json!(verification_type));
    }
    if let Some(ref secret) = verification.secret {
        data.insert("secret".to_string(), json!(secret));
    }
    Value::Object(data)
}

fn serialize_base(kind: DataPointKind, base: &DataPointBase) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("data_type".to_string(), json!(kind.wire_name()));
    if let Some(ref verification) = base.verification {
        data.insert(
            "verification".to_string(),
            serialize_verification(verification),
        );
    }
    if base.not_specified == Some(true) {
        data.insert("not_specified".to_string(), json!(true));
    }
    if base.verified == Some(true) {
        data.insert("verified".to_string(), json!(true));
    }
    data
}

/// Serializes one data point to its wire object.
pub fn serialize_data_point(data_point: &DataPoint) -> Value {
    let mut data = serialize_base(data_point.kind(), data_point.base());
    match data_point {
        DataPoint::PersonalName(dp) => {
            data.insert("first_name".to_string(), str_or_null(dp.first_name()));
            data.insert("last_name".to_string(), str_or_null(dp.last_name()));
        }
        DataPoint::PhoneNumber(dp) => {
            // The backend expects the country code as a string.
            data.insert(
                "country_code".to_string(),
                json!(dp.country_code().to_string()),
            );
            data.insert("phone_number".to_string(), str_or_null(dp.phone_number()));
        }
        DataPoint::Email(dp) => {
            data.insert("email".to_string(), str_or_null(dp.email()));
        }
        DataPoint::BirthDate(dp) => {
            data.insert("date".to_string(), date_to_wire(dp.date()));
        }
        DataPoint::Ssn(dp) => {
            data.insert("ssn".to_string(), str_or_null(dp.ssn()));
        }
        DataPoint::Address(dp) => {
            data.insert("address".to_string(), str_or_null(dp.address()));
            data.insert("apt".to_string(), str_or_null(dp.apt_unit()));
            data.insert(
                "country".to_string(),
                str_or_null(dp.country().map(|c| c.iso_code.as_str())),
            );
            data.insert("city".to_string(), str_or_null(dp.city()));
            data.insert("state".to_string(), str_or_null(dp.state_code()));
            data.insert("zip".to_string(), str_or_null(dp.zip()));
        }
        DataPoint::Housing(dp) => {
            data.insert(
                "housing_type_id".to_string(),
                i64_or_null(dp.housing_type().map(|h| h.housing_type_id as i64)),
            );
        }
        DataPoint::IncomeSource(dp) => {
            data.insert(
                "income_type_id".to_string(),
                i64_or_null(dp.income_type().map(|i| i.income_type_id as i64)),
            );
            data.insert(
                "salary_frequency_id".to_string(),
                i64_or_null(dp.salary_frequency().map(|s| s.salary_frequency_id as i64)),
            );
        }
        DataPoint::Income(dp) => {
            data.insert(
                "gross_annual_income".to_string(),
                i64_or_null(dp.gross_annual_income()),
            );
            data.insert(
                "net_monthly_income".to_string(),
                i64_or_null(dp.net_monthly_income()),
            );
        }
        DataPoint::CreditScore(dp) => {
            data.insert(
                "credit_range".to_string(),
                i64_or_null(dp.credit_range().map(|r| r as i64)),
            );
        }
        DataPoint::PaydayLoan(dp) => {
            data.insert("payday_loan".to_string(), bool_or_null(dp.used_payday_loan()));
        }
        DataPoint::MemberOfArmedForces(dp) => {
            data.insert(
                "member_of_armed_forces".to_string(),
                bool_or_null(dp.member_of_armed_forces()),
            );
        }
        DataPoint::TimeAtAddress(dp) => {
            data.insert(
                "time_at_address_id".to_string(),
                i64_or_null(dp.time_at_address().map(|t| t.time_at_address_id as i64)),
            );
        }
    }
    Value::Object(data)
}

/// Serializes the whole list under the `{"type": "list", "data": [...]}`
/// envelope, in the list's deterministic iteration order.
pub fn serialize_data_point_list(list: &DataPointList) -> Value {
    let data: Vec<Value> = list.iter().map(serialize_data_point).collect();
    json!({
        "type": "list",
        "data": data,
    })
}

// ============ Deserialization ============

fn opt_str(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

fn opt_i64(value: &Value, key: &str) -> Option<i64> {
    value.get(key).and_then(|v| v.as_i64())
}

fn opt_bool(value: &Value, key: &str) -> Option<bool> {
    value.get(key).and_then(|v| v.as_bool())
}

/// Parses a verification object. Returns `None` when the id or a
/// recognizable status is missing.
pub fn deserialize_verification(value: &Value) -> Option<Verification> {
    let verification_id = opt_str(value, "verification_id")?;
    let status = value
        .get("status")
        .and_then(|v| v.as_str())
        .and_then(VerificationStatus::from_wire_name)?;
    Some(Verification {
        verification_id,
        verification_type: opt_str(value, "verification_type"),
        status,
        secret: opt_str(value, "secret"),
    })
}

fn deserialize_base(value: &Value) -> DataPointBase {
    let mut base = DataPointBase::new(
        Some(opt_bool(value, "verified").unwrap_or(false)),
        Some(opt_bool(value, "not_specified").unwrap_or(false)),
    );
    base.verification = value.get("verification").and_then(deserialize_verification);
    base
}

/// Country codes historically arrive either as a string or a number.
fn parse_country_code(value: &Value) -> i32 {
    match value.get("country_code") {
        Some(Value::String(s)) => s.parse().unwrap_or(-1),
        Some(Value::Number(n)) => n.as_i64().map(|n| n as i32).unwrap_or(-1),
        _ => -1,
    }
}

/// Parses one wire object back into a data point. Entries with an unknown
/// `data_type` yield `None` and are skipped by the list deserializer.
pub fn deserialize_data_point(value: &Value) -> Option<DataPoint> {
    let kind = value
        .get("data_type")
        .and_then(|v| v.as_str())
        .map(DataPointKind::from_wire_name)?;
    let base = deserialize_base(value);

    let data_point: DataPoint = match kind {
        DataPointKind::PersonalName => {
            let mut dp = PersonalName::new(
                opt_str(value, "first_name"),
                opt_str(value, "last_name"),
                None,
            );
            dp.base = base;
            dp.into()
        }
        DataPointKind::PhoneNumber => {
            let mut dp = PhoneNumber::new(
                parse_country_code(value),
                opt_str(value, "phone_number"),
                None,
            );
            dp.base = base;
            dp.into()
        }
        DataPointKind::Email => {
            let mut dp = Email::new(opt_str(value, "email"), None, None);
            dp.base = base;
            dp.into()
        }
        DataPointKind::BirthDate => {
            let date = opt_str(value, "date")
                .and_then(|s| NaiveDate::parse_from_str(&s, DATE_FORMAT).ok());
            let mut dp = BirthDate::new(date, None);
            dp.base = base;
            dp.into()
        }
        DataPointKind::Ssn => {
            let mut dp = Ssn::new(opt_str(value, "ssn"), None, None);
            dp.base = base;
            dp.into()
        }
        DataPointKind::Address => {
            let country = opt_str(value, "country").map(|iso_code| Country {
                iso_code,
                name: None,
            });
            let mut dp = Address::new(
                opt_str(value, "address"),
                opt_str(value, "apt"),
                country,
                opt_str(value, "city"),
                opt_str(value, "state"),
                opt_str(value, "zip"),
                None,
            );
            dp.base = base;
            dp.into()
        }
        DataPointKind::Housing => {
            let housing_type = opt_i64(value, "housing_type_id").map(|id| HousingType {
                housing_type_id: id as i32,
                description: None,
            });
            let mut dp = Housing::new(housing_type, None);
            dp.base = base;
            dp.into()
        }
        DataPointKind::IncomeSource => {
            let income_type = opt_i64(value, "income_type_id").map(|id| IncomeType {
                income_type_id: id as i32,
                description: None,
            });
            let salary_frequency =
                opt_i64(value, "salary_frequency_id").map(|id| SalaryFrequency {
                    salary_frequency_id: id as i32,
                    description: None,
                });
            let mut dp = IncomeSource::new(salary_frequency, income_type, None);
            dp.base = base;
            dp.into()
        }
        DataPointKind::Income => {
            let mut dp = Income::new(
                opt_i64(value, "net_monthly_income"),
                opt_i64(value, "gross_annual_income"),
                None,
            );
            dp.base = base;
            dp.into()
        }
        DataPointKind::CreditScore => {
            let mut dp = CreditScore::new(opt_i64(value, "credit_range").map(|r| r as i32), None);
            dp.base = base;
            dp.into()
        }
        DataPointKind::PaydayLoan => {
            let mut dp = PaydayLoan::new(opt_bool(value, "payday_loan"), None);
            dp.base = base;
            dp.into()
        }
        DataPointKind::MemberOfArmedForces => {
            let mut dp =
                MemberOfArmedForces::new(opt_bool(value, "member_of_armed_forces"), None);
            dp.base = base;
            dp.into()
        }
        DataPointKind::TimeAtAddress => {
            let time_at_address =
                opt_i64(value, "time_at_address_id").map(|id| TimeAtAddressOption {
                    time_at_address_id: id as i32,
                    description: None,
                });
            let mut dp = TimeAtAddress::new(time_at_address, None);
            dp.base = base;
            dp.into()
        }
        DataPointKind::FinancialAccount | DataPointKind::Unknown => return None,
    };
    Some(data_point)
}

/// Parses a list envelope, skipping entries of unknown kind.
pub fn deserialize_data_point_list(value: &Value) -> DataPointList {
    value
        .get("data")
        .and_then(|v| v.as_array())
        .map(|entries| {
            entries
                .iter()
                .filter_map(deserialize_data_point)
                .collect::<DataPointList>()
        })
        .unwrap_or_default()
}

/// Extracts the user payload from a response body. Accepts both a nested
/// `user` object and a bare user at the top level.
pub fn parse_user(body: &Value) -> Option<User> {
    let user = match body.get("user") {
        Some(value) if value.is_object() => value,
        _ => body,
    };
    let user_token = opt_str(user, "user_token")?;
    let user_data = user
        .get("user_data")
        .map(deserialize_data_point_list)
        .unwrap_or_default();
    Some(User {
        user_token,
        user_data,
    })
}

/// Extracts the verification payload from a response body. Accepts both a
/// nested `verification` object and a bare verification at the top level.
pub fn parse_verification(body: &Value) -> Option<Verification> {
    let verification = match body.get("verification") {
        Some(value) if value.is_object() => value,
        _ => body,
    };
    deserialize_verification(verification)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_data_type_is_skipped() {
        let value = json!({"data_type": "shoe_size", "size": 42});
        assert!(deserialize_data_point(&value).is_none());
    }

    #[test]
    fn financial_account_entries_are_skipped() {
        let value = json!({"data_type": "financial_account"});
        assert!(deserialize_data_point(&value).is_none());
    }

    #[test]
    fn country_code_accepts_number_and_string() {
        let from_string = json!({"data_type": "phone", "country_code": "1", "phone_number": null});
        let from_number = json!({"data_type": "phone", "country_code": 1, "phone_number": null});
        let a = deserialize_data_point(&from_string).unwrap();
        let b = deserialize_data_point(&from_number).unwrap();
        assert_eq!(a, b);
    }
}
