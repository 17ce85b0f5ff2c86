use thiserror::Error;

/// A field assignment or constructor argument that failed validation.
///
/// Raised before any mutation happens, so the item keeps its previous value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors returned by the [`Server`](crate::client::Server) client and its endpoints
#[derive(Error, Debug)]
pub enum TscError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unpopulated property: {0}")]
    UnpopulatedProperty(&'static str),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Resource not found: code={code}, summary={summary}, detail={detail}")]
    NotFound {
        code: String,
        summary: String,
        detail: String,
    },

    #[error("Server error {status}: code={code}, summary={summary}, detail={detail}")]
    ServerResponse {
        status: u16,
        code: String,
        summary: String,
        detail: String,
    },

    #[error("Not signed in: call sign_in() or supply a session first")]
    NotSignedIn,

    #[error("Network request error: {0}")]
    Transport(String),
}

impl TscError {
    /// Builds the error for a non-2xx response from its status and the
    /// `<error code><summary/><detail/></error>` body the server embeds.
    ///
    /// Bodies that are not a parseable error document still produce an
    /// error; the raw text ends up in `detail`.
    pub fn from_response(status: u16, body: &[u8], ns: &str) -> Self {
        let text = String::from_utf8_lossy(body);
        let (code, summary, detail) = match roxmltree::Document::parse(&text) {
            Ok(doc) => doc
                .descendants()
                .find(|n| n.has_tag_name((ns, "error")))
                .map(|error| {
                    let child_text = |name: &str| {
                        error
                            .children()
                            .find(|c| c.has_tag_name((ns, name)))
                            .and_then(|c| c.text())
                            .unwrap_or_default()
                            .to_string()
                    };
                    (
                        error.attribute("code").unwrap_or_default().to_string(),
                        child_text("summary"),
                        child_text("detail"),
                    )
                })
                .unwrap_or_else(|| (String::new(), String::new(), text.to_string())),
            Err(_) => (String::new(), String::new(), text.to_string()),
        };

        if status == 404 {
            TscError::NotFound {
                code,
                summary,
                detail,
            }
        } else {
            TscError::ServerResponse {
                status,
                code,
                summary,
                detail,
            }
        }
    }
}

impl From<roxmltree::Error> for TscError {
    fn from(error: roxmltree::Error) -> Self {
        TscError::MalformedResponse(format!("invalid XML: {error}"))
    }
}

pub type Result<T> = std::result::Result<T, TscError>;
