//! Show/hide toggle for the stored tracker token.

/// The `token-display` field paired with its `.btn-toggle` label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenField {
    pub masked: bool,
    pub toggle_label: String,
}

impl Default for TokenField {
    fn default() -> Self {
        Self {
            masked: true,
            toggle_label: "Show".to_string(),
        }
    }
}

impl TokenField {
    pub fn toggle_visibility(&mut self) {
        self.masked = !self.masked;
        self.toggle_label = if self.masked { "Show" } else { "Hide" }.to_string();
    }
}
