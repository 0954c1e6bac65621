use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};
use num_traits::Zero;

/// Traversal cost of a cell or a path. Impassable cells and unreachable goals are
/// [Cost::Infinite], which orders above every finite cost and absorbs additions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cost {
    Finite(u32),
    #[default]
    Infinite,
}

impl Cost {
    /// Cost of standard terrain.
    pub const ONE: Cost = Cost::Finite(1);

    pub fn is_finite(&self) -> bool {
        matches!(self, Cost::Finite(_))
    }

    pub fn is_infinite(&self) -> bool {
        !self.is_finite()
    }

    pub fn value(&self) -> Option<u32> {
        match self {
            Cost::Finite(c) => Some(*c),
            Cost::Infinite => None,
        }
    }
}

impl From<u32> for Cost {
    fn from(c: u32) -> Cost {
        Cost::Finite(c)
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        match (self, rhs) {
            (Cost::Finite(a), Cost::Finite(b)) => {
                a.checked_add(b).map_or(Cost::Infinite, Cost::Finite)
            }
            _ => Cost::Infinite,
        }
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Cost) {
        *self = *self + rhs;
    }
}

impl Zero for Cost {
    fn zero() -> Cost {
        Cost::Finite(0)
    }

    fn is_zero(&self) -> bool {
        *self == Cost::Finite(0)
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Cost {
        iter.fold(Cost::zero(), Add::add)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cost::Finite(c) => write!(f, "{c}"),
            Cost::Infinite => write!(f, "inf"),
        }
    }
}
