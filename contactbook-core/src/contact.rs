//! Contact entity and its input shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A persisted contact.
///
/// `id` never changes after creation; every other field is replaced as a
/// whole by an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated form values, exactly as submitted.
///
/// Deserializes like a form post: missing or `null` fields become empty
/// strings and numbers or booleans become their text, so type mistakes
/// surface as field validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContactInput {
    #[serde(default, deserialize_with = "form_value")]
    pub name: String,
    #[serde(default, deserialize_with = "form_value")]
    pub email: String,
    #[serde(default, deserialize_with = "form_value")]
    pub phone: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

fn form_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => String::new(),
        Some(Scalar::Text(text)) => text,
        Some(Scalar::Integer(n)) => n.to_string(),
        Some(Scalar::Float(n)) => n.to_string(),
        Some(Scalar::Flag(b)) => b.to_string(),
    })
}

impl RawContactInput {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// Validated and normalized contact fields.
///
/// Only produced by [`crate::validation::validate_contact_input`], so holding
/// one means the rules have already been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInput {
    name: String,
    email: String,
    phone: String,
}

impl ContactInput {
    pub(crate) fn new_unchecked(name: String, email: String, phone: String) -> Self {
        Self { name, email, phone }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Back to raw form values, e.g. to re-run validation.
    pub fn to_raw(&self) -> RawContactInput {
        RawContactInput::new(&self.name, &self.email, &self.phone)
    }
}

impl From<ContactInput> for RawContactInput {
    fn from(input: ContactInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            phone: input.phone,
        }
    }
}
