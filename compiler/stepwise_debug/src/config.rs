//! Debugger configuration.

use serde::Serialize;

/// Text wrapped around the editor contents on the reified run path, and the
/// class of the source markers the debugger owns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DebuggerConfig {
    pub wrap_prefix: String,
    pub wrap_suffix: String,
    pub marker_class: String,
}

impl Default for DebuggerConfig {
    fn default() -> Self {
        DebuggerConfig {
            wrap_prefix: "(function() {".to_owned(),
            wrap_suffix: "\n});".to_owned(),
            marker_class: "programCounter".to_owned(),
        }
    }
}

impl DebuggerConfig {
    /// Wrap `text` as the body of an anonymous function expression. A newline
    /// follows the prefix so a trailing line comment cannot swallow it.
    pub fn wrap(&self, text: &str) -> String {
        let mut wrapped =
            String::with_capacity(self.wrap_prefix.len() + text.len() + self.wrap_suffix.len() + 1);
        wrapped.push_str(&self.wrap_prefix);
        wrapped.push('\n');
        wrapped.push_str(text);
        wrapped.push_str(&self.wrap_suffix);
        wrapped
    }

    /// Length of the prefix, excluding the newline `wrap` inserts.
    #[inline]
    pub fn wrap_prefix_len(&self) -> usize {
        self.wrap_prefix.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_text_starts_after_prefix_and_newline() {
        let config = DebuggerConfig::default();
        let wrapped = config.wrap("var a;");
        assert_eq!(wrapped, "(function() {\nvar a;\n});");
        assert_eq!(wrapped.find("var"), Some(config.wrap_prefix_len() + 1));
    }
}
