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
/// How a conversion treats a denominator that vanishes at zero rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Guard {
    /// Divide by the raw quantity; a zero rotation produces NaN.
    #[default]
    Unguarded,
    /// Add `EPS` to the denominator; a zero rotation maps to the identity.
    Epsilon,
}

/// What to do with rows that come out of a conversion as NaN or infinity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NonFinitePolicy {
    /// Return the rows as computed.
    #[default]
    Propagate,
    /// Fail the whole call, naming the first offending row.
    Reject,
}

/// Per-converter numeric behavior.
///
/// The defaults reproduce the classic formulas exactly: the axis-angle to
/// quaternion path is unguarded at zero rotation, and the matrix to
/// axis-angle path returns non-finite values at 0 and pi.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConverterOptions {
    pub quaternion_guard: Guard,
    pub non_finite: NonFinitePolicy,
}

impl ConverterOptions {
    pub fn with_quaternion_guard(mut self, guard: Guard) -> Self {
        self.quaternion_guard = guard;
        self
    }

    pub fn with_non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }
}
