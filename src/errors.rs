mod binder;
mod instantiate;

pub use binder::BinderErrorKind;
pub use instantiate::InstantiateErrorKind;
