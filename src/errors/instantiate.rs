/// Failure reported by a user-supplied provider.
/// Bindings and factories pass it through unchanged.
#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
