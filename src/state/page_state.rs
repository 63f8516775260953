/// Page outcome definitions for a crawl
///
/// Every frontier entry that gets fetched ends in exactly one outcome: a page
/// in the corpus (complete or degraded), or a skip with a reason.
use crate::FetchError;
use std::fmt;

/// How a page's HTML was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchMode {
    /// Plain HTTP GET, body used verbatim
    Static,
    /// Headless browser navigation, serialized DOM
    Rendered,
}

impl FetchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Rendered => "rendered",
        }
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extraction quality of a page kept in the corpus
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageStatus {
    /// Main content was located by block scoring
    Complete,

    /// No content block qualified; main text is a whole-body fallback or empty
    Degraded {
        /// Why extraction fell back
        reason: String,
    },
}

impl PageStatus {
    /// Returns true if extraction fell back to the whole body
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Degraded { .. } => "degraded",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => f.write_str("complete"),
            Self::Degraded { reason } => write!(f, "degraded ({})", reason),
        }
    }
}

/// Why a fetched frontier entry produced no page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The fetch did not complete within the timeout
    Timeout,

    /// The server answered with a non-2xx status
    HttpError(u16),

    /// Connection, DNS, TLS, or body read failure
    Network,

    /// The browser failed to navigate or serialize the page
    Render,

    /// The response was not an HTML document
    NotHtml,

    /// The fetch redirected to a page that was already in the corpus
    DuplicateRedirect,
}

impl SkipReason {
    /// Returns a stable snake_case label for reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::HttpError(_) => "http_error",
            Self::Network => "network",
            Self::Render => "render",
            Self::NotHtml => "not_html",
            Self::DuplicateRedirect => "duplicate_redirect",
        }
    }
}

impl From<&FetchError> for SkipReason {
    fn from(error: &FetchError) -> Self {
        match error {
            FetchError::Timeout { .. } => Self::Timeout,
            FetchError::Http { status, .. } => Self::HttpError(*status),
            FetchError::Network { .. } => Self::Network,
            FetchError::Render { .. } => Self::Render,
            FetchError::NotHtml { .. } => Self::NotHtml,
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpError(status) => write!(f, "http_error({})", status),
            other => f.write_str(other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_reason_from_fetch_error() {
        let timeout = FetchError::Timeout {
            url: "https://a.com/".to_string(),
        };
        assert_eq!(SkipReason::from(&timeout), SkipReason::Timeout);

        let http = FetchError::Http {
            url: "https://a.com/".to_string(),
            status: 503,
        };
        assert_eq!(SkipReason::from(&http), SkipReason::HttpError(503));

        let not_html = FetchError::NotHtml {
            url: "https://a.com/x.pdf".to_string(),
            content_type: "application/pdf".to_string(),
        };
        assert_eq!(SkipReason::from(&not_html), SkipReason::NotHtml);
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::HttpError(404).to_string(), "http_error(404)");
        assert_eq!(SkipReason::Timeout.to_string(), "timeout");
        assert_eq!(
            SkipReason::DuplicateRedirect.to_string(),
            "duplicate_redirect"
        );
        assert_eq!(SkipReason::HttpError(500).as_str(), "http_error");
    }

    #[test]
    fn test_page_status() {
        assert!(!PageStatus::Complete.is_degraded());
        let degraded = PageStatus::Degraded {
            reason: "no qualifying content block".to_string(),
        };
        assert!(degraded.is_degraded());
        assert_eq!(degraded.as_str(), "degraded");
        assert_eq!(
            degraded.to_string(),
            "degraded (no qualifying content block)"
        );
    }

    #[test]
    fn test_fetch_mode_display() {
        assert_eq!(FetchMode::Static.to_string(), "static");
        assert_eq!(FetchMode::Rendered.to_string(), "rendered");
    }
}
