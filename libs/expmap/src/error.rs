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
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("shape mismatch: expected {expected}, found {found:?}")]
    ShapeMismatch {
        expected: &'static str,
        found: Vec<usize>,
    },
    #[error("{conversion} produced a non-finite result at row {row}")]
    NonFinite {
        conversion: &'static str,
        row: usize,
    },
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
