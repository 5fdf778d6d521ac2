//! Static form metadata served by the mock backend.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KycType {
    pub key: String,
    pub label: String,
    /// Onboarding fee in the smallest currency unit.
    pub fee: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Step {
    pub key: String,
    pub title: String,
    pub order: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Field {
    pub step: String,
    pub name: String,
    pub label: String,
    pub kind: String,
    pub required: bool,
}

/// A per-type change applied on top of the base field list.
struct Override {
    type_key: &'static str,
    name: &'static str,
    label: Option<&'static str>,
    required: Option<bool>,
    hidden: bool,
}

pub fn types() -> Vec<KycType> {
    [
        ("individual", "Individual", 49_900),
        ("huf", "Hindu Undivided Family", 99_900),
        ("partnership", "Partnership Firm", 149_900),
        ("corporate", "Corporate", 249_900),
    ]
    .into_iter()
    .map(|(key, label, fee)| KycType {
        key: key.to_string(),
        label: label.to_string(),
        fee,
    })
    .collect()
}

pub fn steps() -> Vec<Step> {
    [
        ("identity", "Identity"),
        ("address", "Address"),
        ("promoter", "Promoters & Directors"),
        ("bank", "Bank Account"),
        ("trading", "Trading Preferences"),
        ("additional", "Additional Details"),
        ("payment", "Payment"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((key, title), order)| Step {
        key: key.to_string(),
        title: title.to_string(),
        order,
    })
    .collect()
}

fn base_fields() -> Vec<Field> {
    [
        ("identity", "full_name", "Full name", "text", true),
        ("identity", "pan", "PAN", "text", true),
        ("identity", "date_of_birth", "Date of birth", "date", true),
        ("address", "line1", "Address line 1", "text", true),
        ("address", "line2", "Address line 2", "text", false),
        ("address", "city", "City", "text", true),
        ("address", "pincode", "PIN code", "text", true),
        ("promoter", "promoters", "Promoters", "list", true),
        ("bank", "account_no", "Account number", "text", true),
        ("bank", "ifsc", "IFSC", "text", true),
        ("trading", "segments", "Segments", "multiselect", true),
        ("additional", "occupation", "Occupation", "select", false),
        ("additional", "annual_income", "Annual income", "select", false),
    ]
    .into_iter()
    .map(|(step, name, label, kind, required)| Field {
        step: step.to_string(),
        name: name.to_string(),
        label: label.to_string(),
        kind: kind.to_string(),
        required,
    })
    .collect()
}

fn overrides() -> Vec<Override> {
    [
        ("individual", "promoters", None, None, true),
        ("huf", "full_name", Some("HUF name"), None, false),
        ("huf", "date_of_birth", Some("Date of formation"), None, false),
        ("huf", "promoters", Some("Karta and coparceners"), None, false),
        ("partnership", "full_name", Some("Firm name"), None, false),
        ("partnership", "date_of_birth", Some("Date of registration"), None, false),
        ("partnership", "promoters", Some("Partners"), None, false),
        ("corporate", "full_name", Some("Company name"), None, false),
        ("corporate", "date_of_birth", Some("Date of incorporation"), None, false),
        ("corporate", "promoters", Some("Directors"), None, false),
        ("corporate", "occupation", None, None, true),
        ("corporate", "annual_income", Some("Annual turnover"), Some(true), false),
    ]
    .into_iter()
    .map(|(type_key, name, label, required, hidden)| Override {
        type_key,
        name,
        label,
        required,
        hidden,
    })
    .collect()
}

/// Base fields merged with the overrides for `type_key`, or `None` for an
/// unknown type.
pub fn fields_for(type_key: &str) -> Option<Vec<Field>> {
    if !types().iter().any(|t| t.key == type_key) {
        return None;
    }
    let overrides: Vec<Override> = overrides()
        .into_iter()
        .filter(|o| o.type_key == type_key)
        .collect();

    let fields = base_fields()
        .into_iter()
        .filter_map(|mut field| {
            let Some(o) = overrides.iter().find(|o| o.name == field.name) else {
                return Some(field);
            };
            if o.hidden {
                return None;
            }
            if let Some(label) = o.label {
                field.label = label.to_string();
            }
            if let Some(required) = o.required {
                field.required = required;
            }
            Some(field)
        })
        .collect();
    Some(fields)
}
