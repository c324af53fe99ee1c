use crate::{key::RawKey, source::Source};

#[derive(thiserror::Error, Debug)]
pub enum BinderErrorKind {
    #[error("A binding to {key} was already configured at {first}, duplicate at {second}")]
    AlreadyConfigured { key: RawKey, first: Source, second: Source },
}
