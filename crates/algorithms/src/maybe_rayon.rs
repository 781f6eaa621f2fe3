/// Compatibility layer for rayon/sequential execution.
///
/// With the `parallel` feature, grid-heavy operations (interpolation,
/// contouring, point grids) fan out over rayon's parallel iterators.
/// Without it (e.g. WASM builds), `into_par_iter()` degrades to `into_iter()`
/// and the rest of the chain resolves to the standard `Iterator` methods.
#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

#[cfg(not(feature = "parallel"))]
mod sequential {
    /// Sequential stand-in for `rayon::prelude::IntoParallelIterator`.
    pub trait IntoParallelIterator {
        type Iter;
        type Item;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl<I: IntoIterator> IntoParallelIterator for I {
        type Iter = I::IntoIter;
        type Item = I::Item;
        fn into_par_iter(self) -> Self::Iter {
            self.into_iter()
        }
    }
}

#[cfg(not(feature = "parallel"))]
pub use sequential::*;
