//! Put/call flag for optionlets.

use crate::Real;
use std::fmt;

/// Whether an optionlet is a call (caplet) or a put (floorlet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PutCall {
    /// A call on the rate: pays when the rate is above the strike.
    Call,
    /// A put on the rate: pays when the rate is below the strike.
    Put,
}

impl PutCall {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            PutCall::Call => 1.0,
            PutCall::Put => -1.0,
        }
    }

    /// Whether this is a call.
    pub fn is_call(self) -> bool {
        self == PutCall::Call
    }

    /// The opposite flag.
    pub fn opposite(self) -> Self {
        match self {
            PutCall::Call => PutCall::Put,
            PutCall::Put => PutCall::Call,
        }
    }

    /// `max(φ(rate − strike), 0)` with `φ` the sign of this flag.
    pub fn intrinsic(self, rate: Real, strike: Real) -> Real {
        (self.sign() * (rate - strike)).max(0.0)
    }
}

impl fmt::Display for PutCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PutCall::Call => write!(f, "Call"),
            PutCall::Put => write!(f, "Put"),
        }
    }
}
