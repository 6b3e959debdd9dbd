use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::consts::consts::RecordId;

use super::state::StateCode;

/// One registrant. The serde renames are the canonical column names, so the
/// struct field order IS the persisted column order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Person {
    #[serde(rename = "ID")]
    pub id: RecordId,
    #[serde(rename = "Full Name")]
    pub full_name: String,
    #[serde(rename = "CPF")]
    pub cpf: String,
    #[serde(rename = "RG")]
    pub rg: Option<String>,
    #[serde(rename = "Birth Date", with = "date_br")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: Option<String>,
    #[serde(rename = "Postal Code")]
    pub postal_code: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "State")]
    pub state: Option<StateCode>,
    #[serde(rename = "Profession")]
    pub profession: Option<String>,
    #[serde(rename = "Created At", with = "datetime_br")]
    pub created_at: NaiveDateTime,
}

impl Person {
    /// Applies the caller-editable fields from a draft. The identity fields
    /// `id` and `created_at` never change after creation.
    pub fn apply_draft(&mut self, draft: PersonDraft) {
        self.full_name = draft.full_name;
        self.cpf = draft.cpf;
        self.rg = draft.rg;
        self.birth_date = draft.birth_date;
        self.email = draft.email;
        self.phone = draft.phone;
        self.postal_code = draft.postal_code;
        self.address = draft.address;
        self.city = draft.city;
        self.state = draft.state;
        self.profession = draft.profession;
    }
}

/// Caller input for create and update: every field of a record except the
/// two the store assigns itself.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PersonDraft {
    pub full_name: String,
    pub cpf: String,
    pub rg: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub phone: Option<String>,
    pub postal_code: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<StateCode>,
    pub profession: Option<String>,
}

impl PersonDraft {
    pub fn into_person(self, id: RecordId, created_at: NaiveDateTime) -> Person {
        Person {
            id,
            full_name: self.full_name,
            cpf: self.cpf,
            rg: self.rg,
            birth_date: self.birth_date,
            email: self.email,
            phone: self.phone,
            postal_code: self.postal_code,
            address: self.address,
            city: self.city,
            state: self.state,
            profession: self.profession,
            created_at,
        }
    }

    pub fn new_test() -> Self {
        PersonDraft {
            full_name: "João da Silva".to_string(),
            cpf: "123.456.789-09".to_string(),
            email: "joao@email.com".to_string(),
            city: Some("São Paulo".to_string()),
            state: Some(StateCode::Sp),
            ..PersonDraft::default()
        }
    }
}

/// The subset of columns a query result exposes to the caller's listing:
/// id, name, cpf, email, phone, city, state.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PersonSummary {
    #[serde(rename = "ID")]
    pub id: RecordId,
    #[serde(rename = "Full Name")]
    pub full_name: String,
    #[serde(rename = "CPF")]
    pub cpf: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "State")]
    pub state: Option<StateCode>,
}

impl From<&Person> for PersonSummary {
    fn from(person: &Person) -> Self {
        PersonSummary {
            id: person.id,
            full_name: person.full_name.clone(),
            cpf: person.cpf.clone(),
            email: person.email.clone(),
            phone: person.phone.clone(),
            city: person.city.clone(),
            state: person.state,
        }
    }
}

/// Calendar dates are persisted as `DD/MM/YYYY`, an empty cell for `None`.
pub(crate) mod date_br {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d/%m/%Y";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;

        if raw.trim().is_empty() {
            return Ok(None);
        }

        NaiveDate::parse_from_str(raw.trim(), FORMAT)
            .map(Some)
            .map_err(de::Error::custom)
    }
}

/// Creation timestamps are persisted as `DD/MM/YYYY HH:MM`. Minute
/// precision, so a load/save round trip reproduces the cell byte-for-byte.
pub(crate) mod datetime_br {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d/%m/%Y %H:%M";

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;

        NaiveDateTime::parse_from_str(raw.trim(), FORMAT).map_err(de::Error::custom)
    }
}
