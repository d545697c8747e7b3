use std::cmp::Ordering;
use std::fmt;

/// Float wrapper with the total order required by the `E: Ord` bound on edge
/// weights.
///
/// Standard floats are only [`PartialOrd`]. `OrderedFloat` compares with
/// [`f64::total_cmp`]/[`f32::total_cmp`] and derives all four comparison
/// traits from that single ordering, so `PartialOrd` and `Ord` can never
/// disagree.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderedFloat<T>(pub T);

macro_rules! impl_ordered_float {
    ($ty:ty) => {
        impl PartialEq for OrderedFloat<$ty> {
            fn eq(&self, other: &Self) -> bool {
                self.0.total_cmp(&other.0) == Ordering::Equal
            }
        }

        impl Eq for OrderedFloat<$ty> {}

        impl PartialOrd for OrderedFloat<$ty> {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for OrderedFloat<$ty> {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl From<$ty> for OrderedFloat<$ty> {
            fn from(value: $ty) -> Self {
                Self(value)
            }
        }

        impl From<OrderedFloat<$ty>> for $ty {
            fn from(value: OrderedFloat<$ty>) -> Self {
                value.0
            }
        }
    };
}

impl_ordered_float!(f32);
impl_ordered_float!(f64);

impl<T: fmt::Display> fmt::Display for OrderedFloat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_order() {
        let mut weights = [
            OrderedFloat(3.7),
            OrderedFloat(-3.4),
            OrderedFloat(1.1),
            OrderedFloat(1.8),
        ];
        weights.sort();

        assert_eq!(
            weights,
            [
                OrderedFloat(-3.4),
                OrderedFloat(1.1),
                OrderedFloat(1.8),
                OrderedFloat(3.7)
            ]
        );
    }

    #[test]
    fn nan_is_consistent() {
        let nan = OrderedFloat(f64::NAN);

        assert_eq!(nan, nan);
        assert_eq!(nan.partial_cmp(&nan), Some(Ordering::Equal));
        assert!(OrderedFloat(f64::INFINITY) < nan);
    }

    #[test]
    fn display_passthrough() {
        assert_eq!(OrderedFloat(-3.4).to_string(), "-3.4");
        assert_eq!(OrderedFloat(5.0).to_string(), "5");
    }
}
