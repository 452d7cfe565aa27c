//! Content hashing of bootstrap runs.

use sha2::{Digest, Sha256};

use crate::request::BootstrapRequest;

/// Hex SHA-256 of the request and the template that was actually applied.
///
/// Stable across runs: the request serializes with a fixed field order and
/// its maps are ordered.
pub fn compute_fingerprint(request: &BootstrapRequest, template_used: &str) -> String {
    let mut hasher = Sha256::new();

    let request_json = serde_json::to_string(request).unwrap_or_default();
    hasher.update(request_json.as_bytes());

    hasher.update(template_used.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BootstrapRequest {
        BootstrapRequest::new("- tag: 200-P-001\n", "instruments: []\n", "Plant")
    }

    #[test]
    fn hash_stability() {
        let a = compute_fingerprint(&request(), "centralized");
        let b = compute_fingerprint(&request(), "centralized");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let base = compute_fingerprint(&request(), "centralized");
        let renamed = compute_fingerprint(
            &BootstrapRequest::new("- tag: 200-P-001\n", "instruments: []\n", "Other"),
            "centralized",
        );
        let versioned =
            compute_fingerprint(&request().with_template_version("1.1"), "centralized");
        let substituted = compute_fingerprint(&request(), "fully_distributed");
        assert_ne!(base, renamed);
        assert_ne!(base, versioned);
        assert_ne!(base, substituted);
    }
}
