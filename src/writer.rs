//! Signing and writing the request/key pair.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::expand_home;
use crate::error::{CsrError, Result};
use crate::key::RsaSigningKey;
use crate::plan::Plan;
use crate::request::{generate_request, sign_request};

/// Paths of the files written for one plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outputs {
    pub request_path: PathBuf,
    pub key_path: PathBuf,
}

impl Outputs {
    /// `<target_folder>/<commonName>.csr.pem` and `<target_folder>/<commonName>.key`.
    pub fn for_plan(plan: &Plan) -> Self {
        let folder = expand_home(&plan.target_folder);
        Self {
            request_path: folder.join(format!("{}.csr.pem", plan.common_name)),
            key_path: folder.join(format!("{}.key", plan.common_name)),
        }
    }
}

/// Print the plan, build and sign the request, then write request and key.
///
/// Nothing is written until signing succeeded. The two writes are not atomic:
/// a failure on the key file leaves the request file behind.
pub fn process(plan: &Plan) -> Result<Outputs> {
    println!("Generating Certificate Signing Request and private key with these options:\n");
    print!("{plan}");
    println!();

    let params = generate_request(plan)?;
    let key = RsaSigningKey::generate(plan.key_size)?;
    let request_pem = sign_request(&params, &key)?;

    let outputs = Outputs::for_plan(plan);

    println!("Writing {}", outputs.request_path.display());
    write_file(&outputs.request_path, request_pem.as_bytes())?;

    println!("Writing {}", outputs.key_path.display());
    write_file(&outputs.key_path, key.private_key_pem().as_bytes())?;
    restrict_permissions(&outputs.key_path)?;

    info!(
        "Wrote {} and {}",
        outputs.request_path.display(),
        outputs.key_path.display()
    );
    Ok(outputs)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|source| CsrError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Owner read/write only on the private key.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|source| {
        CsrError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(target_folder: &str) -> Plan {
        Plan {
            common_name: "www.example.org".to_string(),
            alternative_names: Vec::new(),
            country_name: String::new(),
            state_or_province_name: String::new(),
            locality_name: String::new(),
            organization_name: String::new(),
            organizational_unit_name: String::new(),
            key_size: 2048,
            target_folder: target_folder.to_string(),
            extra: Vec::new(),
        }
    }

    #[test]
    fn test_output_paths() {
        let outputs = Outputs::for_plan(&plan("/srv/certs"));
        assert_eq!(
            outputs.request_path,
            PathBuf::from("/srv/certs/www.example.org.csr.pem")
        );
        assert_eq!(outputs.key_path, PathBuf::from("/srv/certs/www.example.org.key"));
    }

    #[test]
    fn test_invalid_key_size_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut plan = plan(dir.path().to_str().unwrap());
        plan.key_size = 0;
        let err = process(&plan).unwrap_err();
        assert!(matches!(err, CsrError::InvalidParameter { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_oversized_key_rejected_before_generation() {
        let dir = tempfile::tempdir().unwrap();
        let mut plan = plan(dir.path().to_str().unwrap());
        plan.key_size = 4160;
        let err = process(&plan).unwrap_err();
        assert!(matches!(err, CsrError::InvalidParameter { name: "key_size", .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_target_folder() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = process(&plan(missing.to_str().unwrap())).unwrap_err();
        match err {
            CsrError::Io { path, .. } => {
                assert_eq!(path, missing.join("www.example.org.csr.pem"))
            }
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
