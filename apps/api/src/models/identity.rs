use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Scalar identity fields shown in the resume header.
///
/// Every field is always defined and may be empty. No validation is applied:
/// a malformed email or phone number is stored exactly as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityField {
    Name,
    Email,
    Phone,
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdentityField::Name => "name",
            IdentityField::Email => "email",
            IdentityField::Phone => "phone",
        };
        f.write_str(name)
    }
}

impl FromStr for IdentityField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(IdentityField::Name),
            "email" => Ok(IdentityField::Email),
            "phone" => Ok(IdentityField::Phone),
            other => Err(format!("unknown identity field '{other}'")),
        }
    }
}
