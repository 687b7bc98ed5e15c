use rcgen::string::Ia5String;
use rcgen::{CertificateParams, DistinguishedName, SanType};

use crate::error::{CsrError, Result};
use crate::key::RsaSigningKey;
use crate::plan::Plan;
use crate::subject::SubjectField;

/// Build the unsigned request: every subject field from the plan, empty or not,
/// and a DNS-only subjectAltName extension when alternative names are present.
pub fn generate_request(plan: &Plan) -> Result<CertificateParams> {
    let mut params = CertificateParams::default();

    let mut dn = DistinguishedName::new();
    for field in SubjectField::ALL {
        dn.push(field.dn_type(), field.dn_value(plan.subject_value(field))?);
    }
    params.distinguished_name = dn;

    params.subject_alt_names = plan
        .alternative_names
        .iter()
        .map(|name| Ia5String::try_from(name.as_str()).map(SanType::DnsName))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|source| CsrError::Request { source })?;

    Ok(params)
}

/// Attach the key's public half, sign with SHA-512 and return the PEM request.
pub fn sign_request(params: &CertificateParams, key: &RsaSigningKey) -> Result<String> {
    params
        .serialize_request(key.key_pair())
        .and_then(|csr| csr.pem())
        .map_err(|source| CsrError::Request { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcgen::string::PrintableString;
    use rcgen::{DnType, DnValue};

    fn plan(common_name: &str, alternative_names: &[&str]) -> Plan {
        Plan {
            common_name: common_name.to_string(),
            alternative_names: alternative_names.iter().map(|s| s.to_string()).collect(),
            country_name: "DE".to_string(),
            state_or_province_name: String::new(),
            locality_name: "Berlin".to_string(),
            organization_name: "Example e.V.".to_string(),
            organizational_unit_name: String::new(),
            key_size: 2048,
            target_folder: ".".to_string(),
            extra: Vec::new(),
        }
    }

    #[test]
    fn test_subject_fields() {
        let params = generate_request(&plan("X", &[])).unwrap();
        let dn = &params.distinguished_name;
        assert_eq!(
            dn.get(&DnType::CommonName),
            Some(&DnValue::Utf8String("X".to_string()))
        );
        assert_eq!(
            dn.get(&DnType::LocalityName),
            Some(&DnValue::Utf8String("Berlin".to_string()))
        );
        assert_eq!(
            dn.get(&DnType::CountryName),
            Some(&DnValue::PrintableString(
                PrintableString::try_from("DE").unwrap()
            ))
        );
        // empty values are kept
        assert_eq!(
            dn.get(&DnType::StateOrProvinceName),
            Some(&DnValue::Utf8String(String::new()))
        );
        assert_eq!(dn.iter().count(), SubjectField::ALL.len());
    }

    #[test]
    fn test_no_alternative_names() {
        let params = generate_request(&plan("example.org", &[])).unwrap();
        assert!(params.subject_alt_names.is_empty());
    }

    #[test]
    fn test_alternative_names_are_dns() {
        let params = generate_request(&plan("example.org", &["a.com", "b.com"])).unwrap();
        assert_eq!(
            params.subject_alt_names,
            vec![
                SanType::DnsName(Ia5String::try_from("a.com").unwrap()),
                SanType::DnsName(Ia5String::try_from("b.com").unwrap()),
            ]
        );
    }

    #[test]
    fn test_country_outside_printable_charset() {
        let mut plan = plan("example.org", &[]);
        plan.country_name = "Ö".to_string();
        let err = generate_request(&plan).unwrap_err();
        assert!(matches!(err, CsrError::Request { .. }));
    }

    #[test]
    fn test_non_ascii_alternative_name() {
        let err = generate_request(&plan("example.org", &["bücher.example"])).unwrap_err();
        assert!(matches!(err, CsrError::Request { .. }));
    }
}
