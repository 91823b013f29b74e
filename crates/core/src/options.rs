use crate::error::ConfigError;

/// Parser configuration, supplied once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Accept entity names without a namespace prefix. Default false: a
    /// naked name fails its statement with a NakedName warning.
    pub allow_naked_names: bool,
    /// Accept `a rel (b rel c)` nested object statements. Default false.
    pub allow_nested: bool,
    /// A new citation clears evidence and annotations first. Default true.
    pub citation_clearing: bool,
    /// Placeholder namespace rewritten onto accepted naked names. Only
    /// meaningful together with `allow_naked_names`; identifiers under this
    /// namespace are exempt from resolver validation.
    pub naked_namespace: Option<String>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            allow_naked_names: false,
            allow_nested: false,
            citation_clearing: true,
            naked_namespace: None,
        }
    }
}

impl ParserOptions {
    /// Rejects contradictory configurations before any input is read.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.naked_namespace {
            Some(ns) if !self.allow_naked_names => {
                Err(ConfigError::NakedNamespaceDisabled(ns.clone()))
            }
            _ => Ok(()),
        }
    }
}
