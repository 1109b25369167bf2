use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Shown inline after a wrong password.
pub const MISMATCH_MESSAGE: &str = "Incorrect password";

/// Lowercase hex SHA-256 of a password.
pub fn password_digest(password: &str) -> String {
    let result = Sha256::digest(password.as_bytes());
    format!("{:x}", result)
}

/// Result of one submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Correct password; the view switched to the private section.
    Unlocked,
    /// The gate was already open; nothing changed.
    AlreadyUnlocked,
    /// Wrong password; the error message is showing.
    Rejected,
}

/// Client-side password gate for the private galleries.
///
/// A casual-access deterrent, not a security boundary: the expected digest ships with
/// the site. No lockout; the user can always resubmit.
#[derive(Debug, Clone)]
pub struct Gate {
    expected: String,
    input: String,
    unlocked: bool,
    error: Option<&'static str>,
}

impl Gate {
    /// `expected` is a 64-character hex SHA-256 digest (either case).
    pub fn new(expected: &str) -> Result<Self> {
        let expected = expected.trim().to_ascii_lowercase();
        if expected.len() != 64 || !expected.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidDigest(expected));
        }
        Ok(Self {
            expected,
            input: String::new(),
            unlocked: false,
            error: None,
        })
    }

    pub fn for_password(password: &str) -> Self {
        Self {
            expected: password_digest(password),
            input: String::new(),
            unlocked: false,
            error: None,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Inline error from the last submit, if it failed.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Keystrokes only replace the draft; a showing error stays until the next submit.
    pub fn set_input(&mut self, text: &str) {
        self.input.clear();
        self.input.push_str(text);
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Submit the draft and clear it.
    pub fn submit_input(&mut self) -> GateOutcome {
        let password = std::mem::take(&mut self.input);
        self.submit(&password)
    }

    /// Hash and compare. The previous error is cleared here, not while typing.
    pub fn submit(&mut self, password: &str) -> GateOutcome {
        if self.unlocked {
            return GateOutcome::AlreadyUnlocked;
        }
        self.error = None;

        if digests_match(&password_digest(password), &self.expected) {
            self.unlocked = true;
            tracing::info!("private galleries unlocked");
            GateOutcome::Unlocked
        } else {
            self.error = Some(MISMATCH_MESSAGE);
            GateOutcome::Rejected
        }
    }

    /// Back to the locked view.
    pub fn lock(&mut self) {
        self.unlocked = false;
        self.input.clear();
        self.error = None;
    }
}

/// Compare two equal-length digests without stopping at the first difference.
fn digests_match(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .bytes()
            .zip(b.bytes())
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}
