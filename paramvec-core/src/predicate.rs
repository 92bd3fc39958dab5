//! Predicates: accept/reject capabilities for single values and whole tuples.

use std::fmt;
use std::sync::Arc;

/// Accept/reject test over a candidate.
///
/// Closures `Fn(&T) -> bool` implement this automatically; named types can
/// implement it directly when a predicate carries configuration.
pub trait Predicate<T: ?Sized>: Send + Sync {
    fn evaluate(&self, candidate: &T) -> bool;
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn evaluate(&self, candidate: &T) -> bool {
        self(candidate)
    }
}

/// Shared, cloneable handle to a predicate.
pub struct Pred<T: ?Sized>(Arc<dyn Predicate<T>>);

impl<T: ?Sized> Pred<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn from_shared(predicate: Arc<dyn Predicate<T>>) -> Self {
        Self(predicate)
    }

    pub fn evaluate(&self, candidate: &T) -> bool {
        self.0.evaluate(candidate)
    }
}

impl<T: ?Sized> Clone for Pred<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> fmt::Debug for Pred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pred(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AtLeast(i64);

    impl Predicate<i64> for AtLeast {
        fn evaluate(&self, candidate: &i64) -> bool {
            *candidate >= self.0
        }
    }

    #[test]
    fn closures_are_predicates() {
        let even = Pred::new(|x: &i64| x % 2 == 0);
        assert!(even.evaluate(&4));
        assert!(!even.evaluate(&3));
    }

    #[test]
    fn named_types_are_predicates() {
        let p: Pred<i64> = Pred::from_shared(Arc::new(AtLeast(10)));
        assert!(p.evaluate(&10));
        assert!(!p.clone().evaluate(&9));
    }

    #[test]
    fn unsized_candidates() {
        let ascending = Pred::new(|v: &[i64]| v.windows(2).all(|w| w[0] < w[1]));
        assert!(ascending.evaluate(&[1, 2, 3][..]));
        assert!(!ascending.evaluate(&[2, 1][..]));
    }
}
