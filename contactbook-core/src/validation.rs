//! Field-level contact validation
//!
//! Every entry point (HTTP API, CLI) validates through these functions, so
//! the rules live in one table: field -> constraint -> message. The first
//! failing rule of a field produces that field's only error.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contact::{ContactInput, RawContactInput};

/// Maximum name length, in UTF-16 code units, after trimming
pub const MAX_NAME_LEN: usize = 120;

/// Maximum email length, in UTF-16 code units
pub const MAX_EMAIL_LEN: usize = 255;

/// Phone: digits and common punctuation, 7 to 20 characters after trimming
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9()+\-\s.]{7,20}$").expect("invalid phone regex"));

/// Email shape. Leading dots and `..` runs are rejected separately since the
/// regex crate has no lookahead.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("invalid email regex")
});

/// Canonical hyphenated UUID (RFC 9562 versions 1-8), plus the nil and max UUIDs
static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:[0-9a-f]{8}-[0-9a-f]{4}-[1-8][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}|00000000-0000-0000-0000-000000000000|ffffffff-ffff-ffff-ffff-ffffffffffff)$",
    )
    .expect("invalid uuid regex")
});

pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_TOO_LONG: &str = "Name is too long";
pub const EMAIL_INVALID: &str = "Email is invalid";
pub const EMAIL_TOO_LONG: &str = "Email is too long";
pub const PHONE_INVALID: &str = "Phone is invalid";
pub const ID_INVALID: &str = "Contact id is invalid";

/// A validated field, in the order errors are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Id,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Id => "id",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy)]
enum Constraint {
    NonEmpty,
    /// Length in UTF-16 code units, the way browsers count `maxlength`
    MaxLen(usize),
    Satisfies(fn(&str) -> bool),
}

impl Constraint {
    fn check(self, value: &str) -> bool {
        match self {
            Self::NonEmpty => !value.is_empty(),
            Self::MaxLen(max) => value.encode_utf16().count() <= max,
            Self::Satisfies(pred) => pred(value),
        }
    }
}

#[derive(Clone, Copy)]
struct Rule {
    constraint: Constraint,
    message: &'static str,
}

struct FieldSpec {
    field: Field,
    trim: bool,
    rules: &'static [Rule],
}

const NAME_SPEC: FieldSpec = FieldSpec {
    field: Field::Name,
    trim: true,
    rules: &[
        Rule {
            constraint: Constraint::NonEmpty,
            message: NAME_REQUIRED,
        },
        Rule {
            constraint: Constraint::MaxLen(MAX_NAME_LEN),
            message: NAME_TOO_LONG,
        },
    ],
};

const EMAIL_SPEC: FieldSpec = FieldSpec {
    field: Field::Email,
    trim: false,
    rules: &[
        Rule {
            constraint: Constraint::Satisfies(is_well_formed_email),
            message: EMAIL_INVALID,
        },
        Rule {
            constraint: Constraint::MaxLen(MAX_EMAIL_LEN),
            message: EMAIL_TOO_LONG,
        },
    ],
};

const PHONE_SPEC: FieldSpec = FieldSpec {
    field: Field::Phone,
    trim: true,
    rules: &[Rule {
        constraint: Constraint::Satisfies(is_phone_shaped),
        message: PHONE_INVALID,
    }],
};

impl FieldSpec {
    fn apply(&self, raw: &str) -> Result<String, &'static str> {
        let value = if self.trim { raw.trim() } else { raw };
        match self.rules.iter().find(|rule| !rule.constraint.check(value)) {
            Some(rule) => Err(rule.message),
            None => Ok(value.to_owned()),
        }
    }
}

fn is_well_formed_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}

fn is_phone_shaped(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Per-field error messages, at most one per field.
///
/// Serializes in the fixed order `name`, `email`, `phone`, `id`, omitting
/// fields without an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Phone => self.phone.as_deref(),
            Field::Id => self.id.as_deref(),
        }
    }

    /// Record an error unless the field already has one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Id => &mut self.id,
        };
        if slot.is_none() {
            *slot = Some(message.into());
        }
    }

    /// Errors in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        [Field::Name, Field::Email, Field::Phone, Field::Id]
            .into_iter()
            .filter_map(move |field| self.get(field).map(|msg| (field, msg)))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Validate a single name value, returning it trimmed.
pub fn validate_name(value: &str) -> Result<String, &'static str> {
    NAME_SPEC.apply(value)
}

/// Validate a single email value, returning it unchanged.
pub fn validate_email(value: &str) -> Result<String, &'static str> {
    EMAIL_SPEC.apply(value)
}

/// Validate a single phone value, returning it trimmed.
pub fn validate_phone(value: &str) -> Result<String, &'static str> {
    PHONE_SPEC.apply(value)
}

/// Validate all contact fields at once.
///
/// Never panics; malformed input always comes back as `FieldErrors`.
/// Re-validating the returned record yields the same record.
pub fn validate_contact_input(input: &RawContactInput) -> Result<ContactInput, FieldErrors> {
    let mut errors = FieldErrors::default();

    let mut run = |spec: &FieldSpec, raw: &str| match spec.apply(raw) {
        Ok(value) => Some(value),
        Err(message) => {
            errors.insert(spec.field, message);
            None
        }
    };

    let name = run(&NAME_SPEC, &input.name);
    let email = run(&EMAIL_SPEC, &input.email);
    let phone = run(&PHONE_SPEC, &input.phone);

    match (name, email, phone) {
        (Some(name), Some(email), Some(phone)) => {
            Ok(ContactInput::new_unchecked(name, email, phone))
        }
        _ => Err(errors),
    }
}

/// Validate a contact identifier in canonical hyphenated UUID form.
pub fn validate_contact_id(id: &str) -> Result<Uuid, FieldErrors> {
    let invalid = || {
        let mut errors = FieldErrors::default();
        errors.insert(Field::Id, ID_INVALID);
        errors
    };

    if !UUID_RE.is_match(id) {
        return Err(invalid());
    }
    Uuid::parse_str(id).map_err(|_| invalid())
}
