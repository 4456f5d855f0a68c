//! Yes/no gate in front of import requests.

/// Asks the user to confirm an action. Returning `false` aborts it silently.
pub trait ConfirmGate {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> ConfirmGate for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Gate that approves everything (non-interactive runs).
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl ConfirmGate for AutoConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!("Auto-confirming: {}", prompt);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn closures_are_gates() {
        let seen = RefCell::new(Vec::new());
        let gate = |prompt: &str| {
            seen.borrow_mut().push(prompt.to_string());
            false
        };
        assert!(!gate.confirm("Import 2 selected issues to YouTrack?"));
        assert_eq!(seen.borrow().len(), 1);
        assert!(AutoConfirm.confirm("anything"));
    }
}
