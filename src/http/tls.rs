use std::path::Path;

use tokio_native_tls::native_tls::Identity;

use crate::error::HttpError;

/// PEM encoded client certificate and PKCS#8 private key.
#[derive(Debug, Clone)]
pub(crate) struct ClientIdentityPem {
    cert: Vec<u8>,
    key: Vec<u8>,
}

impl ClientIdentityPem {
    /// Reads the key pair and checks that it forms a usable identity.
    pub(crate) fn load(public_path: &Path, private_path: &Path) -> Result<Self, HttpError> {
        let cert = std::fs::read(public_path).map_err(|err| HttpError::ReadCert {
            path: public_path.to_path_buf(),
            source: err,
        })?;
        let key = std::fs::read(private_path).map_err(|err| HttpError::ReadKey {
            path: private_path.to_path_buf(),
            source: err,
        })?;
        let pem = Self { cert, key };
        pem.identity()?;
        Ok(pem)
    }

    pub(crate) fn identity(&self) -> Result<Identity, HttpError> {
        Identity::from_pkcs8(&self.cert, &self.key)
            .map_err(|err| HttpError::InvalidIdentity { source: err })
    }
}
