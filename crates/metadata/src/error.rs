/// Errors from the external metadata services.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The service has no record for the requested identifier.
    ///
    /// OMDb reports this in-band with `{"Response": "False"}` rather
    /// than an HTTP error status.
    #[error("No metadata record found: {0}")]
    NotFound(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Metadata request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Metadata service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}
