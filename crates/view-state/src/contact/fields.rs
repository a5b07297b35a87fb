use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Organization,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Organization, Field::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Organization => "organization",
            Field::Message => "message",
        }
    }

    /// Apply the field's rules, returning the inline error message on failure.
    pub fn check(self, value: &str) -> Option<&'static str> {
        if value.trim().is_empty() {
            return Some(match self {
                Field::Name => "Name is required",
                Field::Email => "Email is required",
                Field::Organization => "Organization is required",
                Field::Message => "Message is required",
            });
        }
        if self == Field::Email && !is_valid_email(value) {
            return Some("Enter a valid email address");
        }
        None
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot inside the
/// domain with at least one character on each side.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(idx, c)| c == '.' && idx > 0 && idx + 1 < domain.len())
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub organization: String,
    pub message: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Organization => &self.organization,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Organization => &mut self.organization,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn check(&self, field: Field) -> Option<&'static str> {
        field.check(self.get(field))
    }

    /// Validate every field; `Err` carries one message per failing field.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let errors: FieldErrors = Field::ALL
            .into_iter()
            .filter_map(|field| self.check(field).map(|message| (field, message)))
            .collect();
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
/// Inline error messages keyed by field.
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Store or clear the error for `field`.
    pub fn set(&mut self, field: Field, message: Option<&'static str>) {
        match message {
            Some(message) => {
                self.0.insert(field, message);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

impl FromIterator<(Field, &'static str)> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = (Field, &'static str)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
