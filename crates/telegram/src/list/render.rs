//! Transport-independent render payload of a list page

use sha1::{Digest, Sha1};

/// Separator between the header, the items and the footer
pub const RULE: &str = "\n<b>⸻⸻⸻</b>\n";

/// One button: visible label and the callback token it sends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: String,
    pub token: String,
}

impl Control {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// HTML text plus rows of buttons
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedPage {
    pub text: String,
    pub rows: Vec<Vec<Control>>,
}

impl RenderedPage {
    /// SHA-1 over the text and the full control layout
    ///
    /// Two pages with the same digest render identically, so the message
    /// edit can be skipped.
    pub fn digest(&self) -> String {
        let mut hasher = Sha1::new();
        hasher.update(self.text.as_bytes());
        for row in &self.rows {
            hasher.update(b"\x1e");
            for control in row {
                hasher.update(b"\x1f");
                hasher.update(control.label.as_bytes());
                hasher.update(b"\x00");
                hasher.update(control.token.as_bytes());
            }
        }
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(text: &str, rows: Vec<Vec<Control>>) -> RenderedPage {
        RenderedPage {
            text: text.to_string(),
            rows,
        }
    }

    #[test]
    fn test_digest_is_stable() {
        let a = page("hello", vec![vec![Control::new("1", "0")]]);
        let b = a.clone();
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.digest().len(), 40);
    }

    #[test]
    fn test_digest_sees_controls() {
        let a = page("hello", vec![vec![Control::new("1", "0")]]);
        let b = page("hello", vec![vec![Control::new("1", "1")]]);
        let c = page("hello", vec![vec![Control::new("1", "0")], vec![]]);
        assert_ne!(a.digest(), b.digest());
        assert_ne!(a.digest(), c.digest());
    }

    #[test]
    fn test_digest_row_boundaries_matter() {
        let split = page("", vec![vec![Control::new("a", "a")], vec![Control::new("b", "b")]]);
        let joined = page("", vec![vec![Control::new("a", "a"), Control::new("b", "b")]]);
        assert_ne!(split.digest(), joined.digest());
    }
}
