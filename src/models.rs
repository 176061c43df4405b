use crate::datapoint_list::DataPointList;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============ Data Point Kinds ============

/// Closed enumeration of the verifiable field kinds.
///
/// Each kind has a stable wire name. Unrecognized wire names parse to
/// `Unknown` instead of failing, so payloads from newer servers do not
/// break older clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataPointKind {
    PersonalName,
    PhoneNumber,
    Email,
    BirthDate,
    Ssn,
    Address,
    Housing,
    IncomeSource,
    Income,
    CreditScore,
    PaydayLoan,
    MemberOfArmedForces,
    TimeAtAddress,
    FinancialAccount,
    Unknown,
}

impl DataPointKind {
    /// The stable wire name for this kind.
    pub fn wire_name(&self) -> &'static str {
        match self {
            DataPointKind::PersonalName => "name",
            DataPointKind::PhoneNumber => "phone",
            DataPointKind::Email => "email",
            DataPointKind::BirthDate => "birthdate",
            DataPointKind::Ssn => "ssn",
            DataPointKind::Address => "address",
            DataPointKind::Housing => "housing",
            DataPointKind::IncomeSource => "income_source",
            DataPointKind::Income => "income",
            DataPointKind::CreditScore => "credit_score",
            DataPointKind::PaydayLoan => "payday_loan",
            DataPointKind::MemberOfArmedForces => "member_of_armed_forces",
            DataPointKind::TimeAtAddress => "time_at_address",
            DataPointKind::FinancialAccount => "financial_account",
            DataPointKind::Unknown => "unknown",
        }
    }

    /// Parses a wire name. Financial accounts are emitted but never parsed,
    /// so `financial_account` also maps to `Unknown`.
    pub fn from_wire_name(name: &str) -> Self {
        match name {
            "name" => DataPointKind::PersonalName,
            "phone" => DataPointKind::PhoneNumber,
            "email" => DataPointKind::Email,
            "birthdate" => DataPointKind::BirthDate,
            "ssn" => DataPointKind::Ssn,
            "address" => DataPointKind::Address,
            "housing" => DataPointKind::Housing,
            "income_source" => DataPointKind::IncomeSource,
            "income" => DataPointKind::Income,
            "credit_score" => DataPointKind::CreditScore,
            "payday_loan" => DataPointKind::PaydayLoan,
            "member_of_armed_forces" => DataPointKind::MemberOfArmedForces,
            "time_at_address" => DataPointKind::TimeAtAddress,
            _ => DataPointKind::Unknown,
        }
    }
}

// ============ Taxonomy Reference Types ============

/// Canonical housing type option, referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingType {
    pub housing_type_id: i32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Canonical income type option, referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeType {
    pub income_type_id: i32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Canonical salary frequency option, referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryFrequency {
    pub salary_frequency_id: i32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Canonical time-at-address bucket, referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAtAddressOption {
    pub time_at_address_id: i32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Country reference used by the address data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub iso_code: String,
    #[serde(default)]
    pub name: Option<String>,
}

// ============ Verification ============

/// State of one verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Pending,
    Passed,
    Failed,
}

impl VerificationStatus {
    pub fn wire_name(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "pending" => Some(VerificationStatus::Pending),
            "passed" => Some(VerificationStatus::Passed),
            "failed" => Some(VerificationStatus::Failed),
            _ => None,
        }
    }
}

/// Record of an attempt to confirm a data point's value.
///
/// Once attached to a data point the verification is owned exclusively by
/// it; cloning a data point deep-copies the verification.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub verification_id: String,
    pub verification_type: Option<String>,
    pub status: VerificationStatus,
    /// Out-of-band secret (e.g. SMS code) when the server exposes it.
    pub secret: Option<String>,
}

impl Verification {
    pub fn new(verification_id: impl Into<String>, status: VerificationStatus) -> Self {
        Self {
            verification_id: verification_id.into(),
            verification_type: None,
            status,
            secret: None,
        }
    }
}

// ============ Data Point Base ============

/// Verification metadata shared by every data point variant.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPointBase {
    pub verification: Option<Verification>,
    pub verified: Option<bool>,
    /// `Some(true)` means the user explicitly declined to provide the value.
    pub not_specified: Option<bool>,
}

impl DataPointBase {
    pub fn new(verified: Option<bool>, not_specified: Option<bool>) -> Self {
        Self {
            verification: None,
            verified,
            not_specified,
        }
    }

    /// Invalidate-on-mutate: any value change clears the verification and
    /// marks the data point unverified. Runs unconditionally, even when a
    /// field is re-set to its current value.
    pub(crate) fn invalidate(&mut self) {
        self.verification = None;
        self.verified = Some(false);
    }
}

impl Default for DataPointBase {
    fn default() -> Self {
        Self::new(Some(false), Some(false))
    }
}

// ============ Data Point Variants ============

/// First and last name of the user.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonalName {
    pub base: DataPointBase,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl PersonalName {
    pub fn new(
        first_name: Option<String>,
        last_name: Option<String>,
        verified: Option<bool>,
    ) -> Self {
        Self {
            base: DataPointBase::new(verified, Some(false)),
            first_name,
            last_name,
        }
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn set_first_name(&mut self, first_name: Option<String>) {
        self.first_name = first_name;
        self.base.invalidate();
    }

    pub fn set_last_name(&mut self, last_name: Option<String>) {
        self.last_name = last_name;
        self.base.invalidate();
    }

    pub fn complete(&self) -> bool {
        self.first_name.is_some() && self.last_name.is_some()
    }

    /// Display name built from the present parts, joined with a space.
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }
}

/// Phone number with a numeric country code. `-1` means the country code
/// has not been set yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneNumber {
    pub base: DataPointBase,
    country_code: i32,
    phone_number: Option<String>,
}

impl PhoneNumber {
    pub fn new(country_code: i32, phone_number: Option<String>, verified: Option<bool>) -> Self {
        Self {
            base: DataPointBase::new(verified, Some(false)),
            country_code,
            phone_number,
        }
    }

    pub fn country_code(&self) -> i32 {
        self.country_code
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn set_country_code(&mut self, country_code: i32) {
        self.country_code = country_code;
        self.base.invalidate();
    }

    pub fn set_phone_number(&mut self, phone_number: Option<String>) {
        self.phone_number = phone_number;
        self.base.invalidate();
    }

    pub fn complete(&self) -> bool {
        self.country_code != -1 && self.phone_number.is_some()
    }
}

impl Default for PhoneNumber {
    fn default() -> Self {
        Self::new(-1, None, Some(false))
    }
}

/// Email address. Supports `not_specified`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Email {
    pub base: DataPointBase,
    email: Option<String>,
}

impl Email {
    pub fn new(email: Option<String>, verified: Option<bool>, not_specified: Option<bool>) -> Self {
        Self {
            base: DataPointBase::new(verified, not_specified),
            email,
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email;
        self.base.invalidate();
    }

    pub fn complete(&self) -> bool {
        if self.base.not_specified == Some(true) {
            return true;
        }
        self.email.is_some()
    }
}

/// Birth date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BirthDate {
    pub base: DataPointBase,
    date: Option<NaiveDate>,
}

impl BirthDate {
    pub fn new(date: Option<NaiveDate>, verified: Option<bool>) -> Self {
        Self {
            base: DataPointBase::new(verified, Some(false)),
            date,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
        self.base.invalidate();
    }

    pub fn complete(&self) -> bool {
        self.date.is_some()
    }
}

/// Social security number. Supports `not_specified`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ssn {
    pub base: DataPointBase,
    ssn: Option<String>,
}

impl Ssn {
    pub fn new(ssn: Option<String>, verified: Option<bool>, not_specified: Option<bool>) -> Self {
        Self {
            base: DataPointBase::new(verified, not_specified),
            ssn,
        }
    }

    pub fn ssn(&self) -> Option<&str> {
        self.ssn.as_deref()
    }

    pub fn set_ssn(&mut self, ssn: Option<String>) {
        self.ssn = ssn;
        self.base.invalidate();
    }

    pub fn complete(&self) -> bool {
        if self.base.not_specified == Some(true) {
            return true;
        }
        self.ssn.is_some()
    }
}

/// Postal address.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Address {
    pub base: DataPointBase,
    address: Option<String>,
    apt_unit: Option<String>,
    country: Option<Country>,
    city: Option<String>,
    state_code: Option<String>,
    zip: Option<String>,
}

impl Address {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        address: Option<String>,
        apt_unit: Option<String>,
        country: Option<Country>,
        city: Option<String>,
        state_code: Option<String>,
        zip: Option<String>,
        verified: Option<bool>,
    ) -> Self {
        Self {
            base: DataPointBase::new(verified, Some(false)),
            address,
            apt_unit,
            country,
            city,
            state_code,
            zip,
        }
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn apt_unit(&self) -> Option<&str> {
        self.apt_unit.as_deref()
    }

    pub fn country(&self) -> Option<&Country> {
        self.country.as_ref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn state_code(&self) -> Option<&str> {
        self.state_code.as_deref()
    }

    pub fn zip(&self) -> Option<&str> {
        self.zip.as_deref()
    }

    pub fn set_address(&mut self, address: Option<String>) {
        self.address = address;
        self.base.invalidate();
    }

    pub fn set_apt_unit(&mut self, apt_unit: Option<String>) {
        self.apt_unit = apt_unit;
        self.base.invalidate();
    }

    pub fn set_country(&mut self, country: Option<Country>) {
        self.country = country;
        self.base.invalidate();
    }

    pub fn set_city(&mut self, city: Option<String>) {
        self.city = city;
        self.base.invalidate();
    }

    pub fn set_state_code(&mut self, state_code: Option<String>) {
        self.state_code = state_code;
        self.base.invalidate();
    }

    pub fn set_zip(&mut self, zip: Option<String>) {
        self.zip = zip;
        self.base.invalidate();
    }

    pub fn complete(&self) -> bool {
        self.address.is_some()
            && self.city.is_some()
            && self.state_code.is_some()
            && self.zip.is_some()
    }

    /// Comma-joined single-line description for US addresses, in
    /// address/city/state/zip order. Missing components are simply
    /// omitted from the join.
    pub fn address_description(&self) -> Option<String> {
        let country = self.country.as_ref()?;
        if country.iso_code != "US" {
            return None;
        }
        let components: Vec<&str> = [
            self.address.as_deref(),
            self.city.as_deref(),
            self.state_code.as_deref(),
            self.zip.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        Some(components.join(", "))
    }
}

/// Housing situation, referencing a canonical housing type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Housing {
    pub base: DataPointBase,
    housing_type: Option<HousingType>,
}

impl Housing {
    pub fn new(housing_type: Option<HousingType>, verified: Option<bool>) -> Self {
        Self {
            base: DataPointBase::new(verified, Some(false)),
            housing_type,
        }
    }

    pub fn housing_type(&self) -> Option<&HousingType> {
        self.housing_type.as_ref()
    }

    pub fn set_housing_type(&mut self, housing_type: Option<HousingType>) {
        self.housing_type = housing_type;
        self.base.invalidate();
    }

    pub fn complete(&self) -> bool {
        self.housing_type.is_some()
    }
}

/// Income source, referencing canonical income type and salary frequency.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncomeSource {
    pub base: DataPointBase,
    salary_frequency: Option<SalaryFrequency>,
    income_type: Option<IncomeType>,
}

impl IncomeSource {
    pub fn new(
        salary_frequency: Option<SalaryFrequency>,
        income_type: Option<IncomeType>,
        verified: Option<bool>,
    ) -> Self {
        Self {
            base: DataPointBase::new(verified, Some(false)),
            salary_frequency,
            income_type,
        }
    }

    pub fn salary_frequency(&self) -> Option<&SalaryFrequency> {
        self.salary_frequency.as_ref()
    }

    pub fn income_type(&self) -> Option<&IncomeType> {
        self.income_type.as_ref()
    }

    pub fn set_salary_frequency(&mut self, salary_frequency: Option<SalaryFrequency>) {
        self.salary_frequency = salary_frequency;
        self.base.invalidate();
    }

    pub fn set_income_type(&mut self, income_type: Option<IncomeType>) {
        self.income_type = income_type;
        self.base.invalidate();
    }

    pub fn complete(&self) -> bool {
        self.salary_frequency.is_some() && self.income_type.is_some()
    }
}

/// Net monthly and gross annual income.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Income {
    pub base: DataPointBase,
    net_monthly_income: Option<i64>,
    gross_annual_income: Option<i64>,
}

impl Income {
    pub fn new(
        net_monthly_income: Option<i64>,
        gross_annual_income: Option<i64>,
        verified: Option<bool>,
    ) -> Self {
        Self {
            base: DataPointBase::new(verified, Some(false)),
            net_monthly_income,
            gross_annual_income,
        }
    }

    pub fn net_monthly_income(&self) -> Option<i64> {
        self.net_monthly_income
    }

    pub fn gross_annual_income(&self) -> Option<i64> {
        self.gross_annual_income
    }

    pub fn set_net_monthly_income(&mut self, net_monthly_income: Option<i64>) {
        self.net_monthly_income = net_monthly_income;
        self.base.invalidate();
    }

    pub fn set_gross_annual_income(&mut self, gross_annual_income: Option<i64>) {
        self.gross_annual_income = gross_annual_income;
        self.base.invalidate();
    }

    pub fn complete(&self) -> bool {
        self.net_monthly_income.is_some() && self.gross_annual_income.is_some()
    }
}

/// Localized display string lookup, keyed by fixed string identifiers.
pub trait Localize {
    fn localize(&self, key: &str) -> String;
}

/// Built-in English strings for the credit score buckets.
pub struct EnglishLocalizations;

impl Localize for EnglishLocalizations {
    fn localize(&self, key: &str) -> String {
        match key {
            "credit-score.excellent" => "Excellent".to_string(),
            "credit-score.good" => "Good".to_string(),
            "credit-score.fair" => "Fair".to_string(),
            "credit-score.poor" => "Poor".to_string(),
            other => other.to_string(),
        }
    }
}

/// Localization keys for the four credit score buckets, indexed by
/// `credit_range`.
pub const CREDIT_SCORE_RANGE_KEYS: [&str; 4] = [
    "credit-score.excellent",
    "credit-score.good",
    "credit-score.fair",
    "credit-score.poor",
];

/// Self-reported credit score bucket (index into the 4-bucket table).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreditScore {
    pub base: DataPointBase,
    credit_range: Option<i32>,
}

impl CreditScore {
    pub fn new(credit_range: Option<i32>, verified: Option<bool>) -> Self {
        Self {
            base: DataPointBase::new(verified, Some(false)),
            credit_range,
        }
    }

    pub fn credit_range(&self) -> Option<i32> {
        self.credit_range
    }

    pub fn set_credit_range(&mut self, credit_range: Option<i32>) {
        self.credit_range = credit_range;
        self.base.invalidate();
    }

    pub fn complete(&self) -> bool {
        self.credit_range.is_some()
    }

    /// Display label for the selected bucket. Out-of-range or unset
    /// indexes yield an empty string, not an error.
    pub fn credit_score_range_description(&self, strings: &dyn Localize) -> String {
        match self.credit_range {
            Some(index) if (0..CREDIT_SCORE_RANGE_KEYS.len() as i32).contains(&index) => {
                strings.localize(CREDIT_SCORE_RANGE_KEYS[index as usize])
            }
            _ => String::new(),
        }
    }
}

/// Whether the user has used a payday loan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaydayLoan {
    pub base: DataPointBase,
    used_payday_loan: Option<bool>,
}

impl PaydayLoan {
    pub fn new(used_payday_loan: Option<bool>, verified: Option<bool>) -> Self {
        Self {
            base: DataPointBase::new(verified, Some(false)),
            used_payday_loan,
        }
    }

    pub fn used_payday_loan(&self) -> Option<bool> {
        self.used_payday_loan
    }

    pub fn set_used_payday_loan(&mut self, used_payday_loan: Option<bool>) {
        self.used_payday_loan = used_payday_loan;
        self.base.invalidate();
    }

    pub fn complete(&self) -> bool {
        self.used_payday_loan.is_some()
    }
}

/// Whether the user is a member of the armed forces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemberOfArmedForces {
    pub base: DataPointBase,
    member_of_armed_forces: Option<bool>,
}

impl MemberOfArmedForces {
    pub fn new(member_of_armed_forces: Option<bool>, verified: Option<bool>) -> Self {
        Self {
            base: DataPointBase::new(verified, Some(false)),
            member_of_armed_forces,
        }
    }

    pub fn member_of_armed_forces(&self) -> Option<bool> {
        self.member_of_armed_forces
    }

    pub fn set_member_of_armed_forces(&mut self, member_of_armed_forces: Option<bool>) {
        self.member_of_armed_forces = member_of_armed_forces;
        self.base.invalidate();
    }

    pub fn complete(&self) -> bool {
        self.member_of_armed_forces.is_some()
    }
}

/// Time at the current address, referencing a canonical bucket.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeAtAddress {
    pub base: DataPointBase,
    time_at_address: Option<TimeAtAddressOption>,
}

impl TimeAtAddress {
    pub fn new(time_at_address: Option<TimeAtAddressOption>, verified: Option<bool>) -> Self {
        Self {
            base: DataPointBase::new(verified, Some(false)),
            time_at_address,
        }
    }

    pub fn time_at_address(&self) -> Option<&TimeAtAddressOption> {
        self.time_at_address.as_ref()
    }

    pub fn set_time_at_address(&mut self, time_at_address: Option<TimeAtAddressOption>) {
        self.time_at_address = time_at_address;
        self.base.invalidate();
    }

    pub fn complete(&self) -> bool {
        self.time_at_address.is_some()
    }
}

// ============ Data Point Union ============

/// One verifiable field of a user's profile.
///
/// A data point's kind is fixed by its variant for the object's lifetime.
/// Cloning produces a deep copy, including any attached verification.
/// Equality is structural over kind, verification metadata and all
/// variant-specific values.
#[derive(Debug, Clone, PartialEq)]
pub enum DataPoint {
    PersonalName(PersonalName),
    PhoneNumber(PhoneNumber),
    Email(Email),
    BirthDate(BirthDate),
    Ssn(Ssn),
    Address(Address),
    Housing(Housing),
    IncomeSource(IncomeSource),
    Income(Income),
    CreditScore(CreditScore),
    PaydayLoan(PaydayLoan),
    MemberOfArmedForces(MemberOfArmedForces),
    TimeAtAddress(TimeAtAddress),
}

impl DataPoint {
    pub fn kind(&self) -> DataPointKind {
        match self {
            DataPoint::PersonalName(_) => DataPointKind::PersonalName,
            DataPoint::PhoneNumber(_) => DataPointKind::PhoneNumber,
            DataPoint::Email(_) => DataPointKind::Email,
            DataPoint::BirthDate(_) => DataPointKind::BirthDate,
            DataPoint::Ssn(_) => DataPointKind::Ssn,
            DataPoint::Address(_) => DataPointKind::Address,
            DataPoint::Housing(_) => DataPointKind::Housing,
            DataPoint::IncomeSource(_) => DataPointKind::IncomeSource,
            DataPoint::Income(_) => DataPointKind::Income,
            DataPoint::CreditScore(_) => DataPointKind::CreditScore,
            DataPoint::PaydayLoan(_) => DataPointKind::PaydayLoan,
            DataPoint::MemberOfArmedForces(_) => DataPointKind::MemberOfArmedForces,
            DataPoint::TimeAtAddress(_) => DataPointKind::TimeAtAddress,
        }
    }

    pub fn base(&self) -> &DataPointBase {
        match self {
            DataPoint::PersonalName(dp) => &dp.base,
            DataPoint::PhoneNumber(dp) => &dp.base,
            DataPoint::Email(dp) => &dp.base,
            DataPoint::BirthDate(dp) => &dp.base,
            DataPoint::Ssn(dp) => &dp.base,
            DataPoint::Address(dp) => &dp.base,
            DataPoint::Housing(dp) => &dp.base,
            DataPoint::IncomeSource(dp) => &dp.base,
            DataPoint::Income(dp) => &dp.base,
            DataPoint::CreditScore(dp) => &dp.base,
            DataPoint::PaydayLoan(dp) => &dp.base,
            DataPoint::MemberOfArmedForces(dp) => &dp.base,
            DataPoint::TimeAtAddress(dp) => &dp.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut DataPointBase {
        match self {
            DataPoint::PersonalName(dp) => &mut dp.base,
            DataPoint::PhoneNumber(dp) => &mut dp.base,
            DataPoint::Email(dp) => &mut dp.base,
            DataPoint::BirthDate(dp) => &mut dp.base,
            DataPoint::Ssn(dp) => &mut dp.base,
            DataPoint::Address(dp) => &mut dp.base,
            DataPoint::Housing(dp) => &mut dp.base,
            DataPoint::IncomeSource(dp) => &mut dp.base,
            DataPoint::Income(dp) => &mut dp.base,
            DataPoint::CreditScore(dp) => &mut dp.base,
            DataPoint::PaydayLoan(dp) => &mut dp.base,
            DataPoint::MemberOfArmedForces(dp) => &mut dp.base,
            DataPoint::TimeAtAddress(dp) => &mut dp.base,
        }
    }

    /// True iff every required field of the variant is present.
    /// Email and SSN are also complete when the user declined to
    /// provide the value.
    pub fn complete(&self) -> bool {
        match self {
            DataPoint::PersonalName(dp) => dp.complete(),
            DataPoint::PhoneNumber(dp) => dp.complete(),
            DataPoint::Email(dp) => dp.complete(),
            DataPoint::BirthDate(dp) => dp.complete(),
            DataPoint::Ssn(dp) => dp.complete(),
            DataPoint::Address(dp) => dp.complete(),
            DataPoint::Housing(dp) => dp.complete(),
            DataPoint::IncomeSource(dp) => dp.complete(),
            DataPoint::Income(dp) => dp.complete(),
            DataPoint::CreditScore(dp) => dp.complete(),
            DataPoint::PaydayLoan(dp) => dp.complete(),
            DataPoint::MemberOfArmedForces(dp) => dp.complete(),
            DataPoint::TimeAtAddress(dp) => dp.complete(),
        }
    }

    pub fn verification(&self) -> Option<&Verification> {
        self.base().verification.as_ref()
    }

    /// Attaches a verification returned by the verification service and
    /// derives the `verified` flag from its status. Any later value
    /// mutation clears it again.
    pub fn attach_verification(&mut self, verification: Verification) {
        let passed = verification.status == VerificationStatus::Passed;
        let base = self.base_mut();
        base.verification = Some(verification);
        base.verified = Some(passed);
    }
}

impl From<PersonalName> for DataPoint {
    fn from(dp: PersonalName) -> Self {
        DataPoint::PersonalName(dp)
    }
}

impl From<PhoneNumber> for DataPoint {
    fn from(dp: PhoneNumber) -> Self {
        DataPoint::PhoneNumber(dp)
    }
}

impl From<Email> for DataPoint {
    fn from(dp: Email) -> Self {
        DataPoint::Email(dp)
    }
}

impl From<BirthDate> for DataPoint {
    fn from(dp: BirthDate) -> Self {
        DataPoint::BirthDate(dp)
    }
}

impl From<Ssn> for DataPoint {
    fn from(dp: Ssn) -> Self {
        DataPoint::Ssn(dp)
    }
}

impl From<Address> for DataPoint {
    fn from(dp: Address) -> Self {
        DataPoint::Address(dp)
    }
}

impl From<Housing> for DataPoint {
    fn from(dp: Housing) -> Self {
        DataPoint::Housing(dp)
    }
}

impl From<IncomeSource> for DataPoint {
    fn from(dp: IncomeSource) -> Self {
        DataPoint::IncomeSource(dp)
    }
}

impl From<Income> for DataPoint {
    fn from(dp: Income) -> Self {
        DataPoint::Income(dp)
    }
}

impl From<CreditScore> for DataPoint {
    fn from(dp: CreditScore) -> Self {
        DataPoint::CreditScore(dp)
    }
}

impl From<PaydayLoan> for DataPoint {
    fn from(dp: PaydayLoan) -> Self {
        DataPoint::PaydayLoan(dp)
    }
}

impl From<MemberOfArmedForces> for DataPoint {
    fn from(dp: MemberOfArmedForces) -> Self {
        DataPoint::MemberOfArmedForces(dp)
    }
}

impl From<TimeAtAddress> for DataPoint {
    fn from(dp: TimeAtAddress) -> Self {
        DataPoint::TimeAtAddress(dp)
    }
}

// ============ User ============

/// A user record as returned by the remote service: the session token and
/// the full set of data points.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_token: String,
    pub user_data: DataPointList,
}
