/// Phase the bindings are declared for.
/// It only affects whether plain singletons are treated as eager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Bindings are inspected by tooling and never instantiated
    Tool,
    #[default]
    Development,
    Production,
}

/// Config for a binder
/// ## Fields
/// - `stage`:
///   Stage the recorded bindings are meant for. In [`Stage::Production`] every singleton is eager.
/// - `deduplicate_bindings`:
///   If `true`, binding the same key twice to equal bindings keeps the first one.
///
///   Bindings to the same key that aren't equal are always rejected.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub stage: Stage,
    pub deduplicate_bindings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stage: Stage::default(),
            deduplicate_bindings: true,
        }
    }
}
