use core::{
    fmt::{self, Display, Formatter},
    panic::Location,
};

/// Where a binding was declared. Carried for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Source {
    #[default]
    Unknown,
    Location(&'static Location<'static>),
    Named(&'static str),
}

impl Source {
    /// Captures the location of the outermost `#[track_caller]` caller
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        Self::Location(Location::caller())
    }

    #[inline]
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self::Named(name)
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Source::Unknown => f.write_str("[unknown source]"),
            Source::Location(location) => Display::fmt(location, f),
            Source::Named(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Source;

    use alloc::string::ToString as _;

    #[test]
    fn test_caller() {
        let Source::Location(location) = Source::caller() else {
            panic!("expected location source");
        };
        assert_eq!(location.file(), file!());
    }

    #[test]
    fn test_display() {
        assert_eq!(Source::named("AppModule").to_string(), "AppModule");
        assert_eq!(Source::Unknown.to_string(), "[unknown source]");
    }
}
