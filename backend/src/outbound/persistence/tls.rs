//! TLS for pooled PostgreSQL connections.
//!
//! Plain connections go through the stock `diesel-async` manager. Encrypted
//! ones install a `custom_setup` callback that connects with
//! `tokio-postgres` over rustls and hands the client to `AsyncPgConnection`.
//! `require` encrypts without verifying the certificate, as libpq's
//! `sslmode=require` does; `verify-full` checks the chain against the webpki
//! roots and the host name.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use diesel::ConnectionError;
use diesel::result::ConnectionResult;
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{CryptoProvider, verify_tls12_signature, verify_tls13_signature};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use tokio_postgres::config::SslMode;
use tokio_postgres_rustls::MakeRustlsConnect;
use tracing::warn;
use url::Url;

const SSLMODE_PARAM: &str = "sslmode";

/// How pooled connections negotiate TLS with the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DatabaseTls {
    /// Plain TCP.
    #[default]
    Disable,
    /// Encrypt without verifying the server certificate.
    Require,
    /// Encrypt and verify the certificate chain and host name.
    VerifyFull,
}

/// Raised when a TLS mode string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown database TLS mode {value:?}; expected disable, require or verify-full")]
pub struct ParseDatabaseTlsError {
    value: String,
}

impl ParseDatabaseTlsError {
    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for DatabaseTls {
    type Err = ParseDatabaseTlsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "disable" | "prefer" | "allow" => Ok(Self::Disable),
            "require" => Ok(Self::Require),
            "verify-ca" | "verify-full" => Ok(Self::VerifyFull),
            _ => Err(ParseDatabaseTlsError {
                value: raw.to_owned(),
            }),
        }
    }
}

impl fmt::Display for DatabaseTls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disable => "disable",
            Self::Require => "require",
            Self::VerifyFull => "verify-full",
        })
    }
}

impl DatabaseTls {
    /// Mode named by the URL's `sslmode` parameter, or `Disable` when the
    /// parameter is absent, unrecognised or the value is not a URL.
    ///
    /// # Examples
    /// ```
    /// use shopping_list::outbound::persistence::DatabaseTls;
    ///
    /// let tls = DatabaseTls::from_url("postgres://app@db.example.com/shop?sslmode=require");
    /// assert_eq!(tls, DatabaseTls::Require);
    /// ```
    pub fn from_url(raw: &str) -> Self {
        Url::parse(raw)
            .ok()
            .and_then(|url| {
                url.query_pairs()
                    .find(|(key, _)| key == SSLMODE_PARAM)
                    .and_then(|(_, value)| value.parse().ok())
            })
            .unwrap_or_default()
    }
}

/// Drop `sslmode` from a URL so `tokio-postgres` never sees libpq-only values
/// such as `verify-full`. Keyword DSNs are returned unchanged.
fn without_sslmode(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return raw.to_owned();
    };
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != SSLMODE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    String::from(url)
}

/// Build the pool manager for `database_url` under the given TLS mode.
pub(super) fn connection_manager(
    database_url: &str,
    tls: DatabaseTls,
) -> AsyncDieselConnectionManager<AsyncPgConnection> {
    let custom_setup: fn(&str) -> BoxFuture<'_, ConnectionResult<AsyncPgConnection>> = match tls {
        DatabaseTls::Disable => return AsyncDieselConnectionManager::new(database_url),
        DatabaseTls::Require => connect_unverified,
        DatabaseTls::VerifyFull => connect_verified,
    };
    let mut config = ManagerConfig::default();
    config.custom_setup = Box::new(custom_setup);
    AsyncDieselConnectionManager::new_with_config(database_url, config)
}

fn connect_unverified(url: &str) -> BoxFuture<'_, ConnectionResult<AsyncPgConnection>> {
    connect_tls(url, false).boxed()
}

fn connect_verified(url: &str) -> BoxFuture<'_, ConnectionResult<AsyncPgConnection>> {
    connect_tls(url, true).boxed()
}

async fn connect_tls(url: &str, verify: bool) -> ConnectionResult<AsyncPgConnection> {
    let tls =
        client_config(verify).map_err(|err| ConnectionError::BadConnection(err.to_string()))?;
    let mut pg_config: tokio_postgres::Config = without_sslmode(url)
        .parse()
        .map_err(|err: tokio_postgres::Error| ConnectionError::BadConnection(err.to_string()))?;
    pg_config.ssl_mode(SslMode::Require);

    let (client, connection) = pg_config
        .connect(MakeRustlsConnect::new(tls))
        .await
        .map_err(|err| ConnectionError::BadConnection(err.to_string()))?;
    tokio::spawn(async move {
        if let Err(error) = connection.await {
            warn!(%error, "database connection closed with an error");
        }
    });
    AsyncPgConnection::try_from(client).await
}

fn client_config(verify: bool) -> Result<ClientConfig, rustls::Error> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let builder =
        ClientConfig::builder_with_provider(provider.clone()).with_safe_default_protocol_versions()?;
    let config = if verify {
        let roots = RootCertStore {
            roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
        };
        builder.with_root_certificates(roots).with_no_client_auth()
    } else {
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert { provider }))
            .with_no_client_auth()
    };
    Ok(config)
}

/// Accepts any certificate chain but still checks handshake signatures, so
/// the session is encrypted to whoever holds the presented key.
#[derive(Debug)]
struct AcceptAnyServerCert {
    provider: Arc<CryptoProvider>,
}

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}
