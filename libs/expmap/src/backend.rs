// This file is part of Expmap.
//
// Expmap is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Expmap is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Expmap.  If not, see <http://www.gnu.org/licenses/>.
use num_traits::Zero;
use rayon::prelude::*;

/// Dispatches a per-row kernel across a flat, row-major batch.
///
/// `f` receives one input row of `in_width` scalars and writes one output row
/// of `out_width` scalars. Rows are independent, so any dispatch order must
/// produce identical results.
pub trait Backend {
    fn map_rows<T, F>(&self, input: &[T], in_width: usize, out_width: usize, f: F) -> Vec<T>
    where
        T: Copy + Zero + Send + Sync,
        F: Fn(&[T], &mut [T]) + Send + Sync;
}

/// Computes rows one after another on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sequential;

impl Backend for Sequential {
    fn map_rows<T, F>(&self, input: &[T], in_width: usize, out_width: usize, f: F) -> Vec<T>
    where
        T: Copy + Zero + Send + Sync,
        F: Fn(&[T], &mut [T]) + Send + Sync,
    {
        debug_assert_eq!(input.len() % in_width, 0);
        let mut out = vec![T::zero(); input.len() / in_width * out_width];
        for (src, dst) in input
            .chunks_exact(in_width)
            .zip(out.chunks_exact_mut(out_width))
        {
            f(src, dst);
        }
        out
    }
}

/// Splits rows across the global rayon thread pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct Parallel;

impl Backend for Parallel {
    fn map_rows<T, F>(&self, input: &[T], in_width: usize, out_width: usize, f: F) -> Vec<T>
    where
        T: Copy + Zero + Send + Sync,
        F: Fn(&[T], &mut [T]) + Send + Sync,
    {
        debug_assert_eq!(input.len() % in_width, 0);
        let mut out = vec![T::zero(); input.len() / in_width * out_width];
        input
            .par_chunks_exact(in_width)
            .zip(out.par_chunks_exact_mut(out_width))
            .for_each(|(src, dst)| f(src, dst));
        out
    }
}
