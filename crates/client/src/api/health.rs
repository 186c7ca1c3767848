use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl Health {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("UP")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_backend_health() {
        let health: Health =
            serde_json::from_str(r#"{"status":"UP","message":"FinLedger backend is running"}"#).unwrap();
        assert!(health.is_up());

        let health: Health = serde_json::from_str(r#"{"status":"DOWN"}"#).unwrap();
        assert!(!health.is_up());
    }
}
