use rcgen::string::PrintableString;
use rcgen::{DnType, DnValue};

use crate::error::{CsrError, Result};

/// Subject attributes a plan can set, in the order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectField {
    CommonName,
    CountryName,
    StateOrProvinceName,
    LocalityName,
    OrganizationName,
    OrganizationalUnitName,
}

impl SubjectField {
    pub const ALL: [SubjectField; 6] = [
        SubjectField::CommonName,
        SubjectField::CountryName,
        SubjectField::StateOrProvinceName,
        SubjectField::LocalityName,
        SubjectField::OrganizationName,
        SubjectField::OrganizationalUnitName,
    ];

    /// Config key naming this field.
    pub fn key(self) -> &'static str {
        match self {
            SubjectField::CommonName => "commonName",
            SubjectField::CountryName => "countryName",
            SubjectField::StateOrProvinceName => "stateOrProvinceName",
            SubjectField::LocalityName => "localityName",
            SubjectField::OrganizationName => "organizationName",
            SubjectField::OrganizationalUnitName => "organizationalUnitName",
        }
    }

    pub fn from_key(key: &str) -> Option<SubjectField> {
        SubjectField::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn dn_type(self) -> DnType {
        match self {
            SubjectField::CommonName => DnType::CommonName,
            SubjectField::CountryName => DnType::CountryName,
            SubjectField::StateOrProvinceName => DnType::StateOrProvinceName,
            SubjectField::LocalityName => DnType::LocalityName,
            SubjectField::OrganizationName => DnType::OrganizationName,
            SubjectField::OrganizationalUnitName => DnType::OrganizationalUnitName,
        }
    }

    /// Encode a value for this attribute. countryName must be a
    /// PrintableString (RFC 5280); everything else is UTF8String.
    pub fn dn_value(self, value: &str) -> Result<DnValue> {
        match self {
            SubjectField::CountryName => PrintableString::try_from(value)
                .map(DnValue::PrintableString)
                .map_err(|source| CsrError::Request { source }),
            _ => Ok(DnValue::Utf8String(value.to_string())),
        }
    }
}
