/// Trait for defining the order policy shared by the monotonic queues and the heaps
///
/// # Type Parameters
///
/// * `T` - The type of the elements being ordered
///
/// # Methods
///
/// * `precedes(a: &T, b: &T) -> bool` - Returns true if `a` is strictly closer to the extreme than `b`
pub trait OrderPolicy<T> {
    fn precedes(a: &T, b: &T) -> bool;
}

/// Order policy for minimum
#[derive(Debug, Clone)]
pub struct Min;

/// Order policy for maximum
#[derive(Debug, Clone)]
pub struct Max;

impl<T: PartialOrd> OrderPolicy<T> for Min {
    #[inline]
    fn precedes(a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T: PartialOrd> OrderPolicy<T> for Max {
    #[inline]
    fn precedes(a: &T, b: &T) -> bool {
        a > b
    }
}
