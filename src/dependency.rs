use alloc::collections::BTreeSet;
use core::fmt::{self, Display, Formatter};

use crate::{
    injection_point::InjectionPoint,
    key::{Key, RawKey},
};

/// A key that something needs, and the injection point asking for it, if any
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dependency {
    key: RawKey,
    injection_point: Option<InjectionPoint>,
    nullable: bool,
}

impl Dependency {
    /// Dependency on `key` without an injection point, e.g. a direct lookup
    #[inline]
    #[must_use]
    pub fn get<T: ?Sized>(key: Key<T>) -> Self {
        Self::for_raw_key(key.into_raw())
    }

    #[inline]
    #[must_use]
    pub const fn for_raw_key(key: RawKey) -> Self {
        Self {
            key,
            injection_point: None,
            nullable: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn for_injection_point(injection_point: InjectionPoint) -> Self {
        Self {
            key: injection_point.key().clone(),
            nullable: injection_point.is_optional(),
            injection_point: Some(injection_point),
        }
    }

    /// One dependency per injection point
    #[must_use]
    pub fn for_injection_points<'a>(injection_points: impl IntoIterator<Item = &'a InjectionPoint>) -> BTreeSet<Self> {
        injection_points.into_iter().map(InjectionPoint::dependency).collect()
    }

    #[inline]
    #[must_use]
    pub const fn key(&self) -> &RawKey {
        &self.key
    }

    #[inline]
    #[must_use]
    pub const fn injection_point(&self) -> Option<&InjectionPoint> {
        self.injection_point.as_ref()
    }

    #[inline]
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }
}

impl Display for Dependency {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.key, f)?;
        if let Some(injection_point) = &self.injection_point {
            write!(f, "@{injection_point}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Dependency;
    use crate::{injection_point::InjectionPoint, key::Key};

    use alloc::collections::BTreeSet;

    struct Mailer;
    struct Transport;
    struct Clock;

    #[test]
    fn test_for_injection_points() {
        let transport = InjectionPoint::field::<Mailer, _>("transport", Key::<Transport>::new());
        let clock = InjectionPoint::constructor_parameter::<Mailer, _>(0, Key::<Clock>::new());

        let forward = Dependency::for_injection_points([&transport, &clock]);
        let backward = Dependency::for_injection_points([&clock, &transport]);

        assert_eq!(forward, backward);
        assert_eq!(
            forward,
            BTreeSet::from([
                Dependency::for_injection_point(transport),
                Dependency::for_injection_point(clock)
            ])
        );
    }

    #[test]
    fn test_for_no_injection_points() {
        assert!(Dependency::for_injection_points(&BTreeSet::<InjectionPoint>::new()).is_empty());
    }

    #[test]
    fn test_get() {
        let dependency = Dependency::get(Key::<Clock>::named("utc"));
        assert_eq!(dependency.key(), Key::<Clock>::named("utc").raw());
        assert!(dependency.injection_point().is_none());
        assert!(dependency.is_nullable());
    }
}
