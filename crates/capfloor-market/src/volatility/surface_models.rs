//! Surface-backed caplet volatilities: Black, shifted Black and Normal.
//!
//! Each reads its volatility from an expiry × strike surface and ignores the
//! forward. The shifted-Black surface is indexed by the unshifted strike.

use crate::index::IborIndex;
use crate::surface::InterpolatedSurface;
use capfloor_core::{ensure, Real, Result};
use chrono::NaiveDate;

/// Log-normal (Black-76) caplet volatilities.
#[derive(Debug, Clone, PartialEq)]
pub struct BlackCapletVolatilities {
    pub(crate) index: IborIndex,
    pub(crate) valuation_date: NaiveDate,
    pub(crate) surface: InterpolatedSurface,
}

impl BlackCapletVolatilities {
    /// Volatilities for `index` as of `valuation_date`.
    pub fn new(index: IborIndex, valuation_date: NaiveDate, surface: InterpolatedSurface) -> Self {
        Self {
            index,
            valuation_date,
            surface,
        }
    }

    /// The volatility surface.
    pub fn surface(&self) -> &InterpolatedSurface {
        &self.surface
    }
}

/// Shifted log-normal caplet volatilities with a constant shift.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftedBlackCapletVolatilities {
    pub(crate) index: IborIndex,
    pub(crate) valuation_date: NaiveDate,
    pub(crate) surface: InterpolatedSurface,
    pub(crate) shift: Real,
}

impl ShiftedBlackCapletVolatilities {
    /// Volatilities for `index` as of `valuation_date`, applied to `F + shift`
    /// and `K + shift`.
    ///
    /// # Errors
    /// `Error::Configuration` if the shift is negative or not finite.
    pub fn new(
        index: IborIndex,
        valuation_date: NaiveDate,
        surface: InterpolatedSurface,
        shift: Real,
    ) -> Result<Self> {
        ensure!(
            shift.is_finite() && shift >= 0.0,
            "shifted Black volatilities: shift must be finite and non-negative, got {shift}"
        );
        Ok(Self {
            index,
            valuation_date,
            surface,
            shift,
        })
    }

    /// The volatility surface.
    pub fn surface(&self) -> &InterpolatedSurface {
        &self.surface
    }

    /// The constant shift.
    pub fn shift(&self) -> Real {
        self.shift
    }
}

/// Normal (Bachelier) caplet volatilities, in rate units.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalCapletVolatilities {
    pub(crate) index: IborIndex,
    pub(crate) valuation_date: NaiveDate,
    pub(crate) surface: InterpolatedSurface,
}

impl NormalCapletVolatilities {
    /// Volatilities for `index` as of `valuation_date`.
    pub fn new(index: IborIndex, valuation_date: NaiveDate, surface: InterpolatedSurface) -> Self {
        Self {
            index,
            valuation_date,
            surface,
        }
    }

    /// The volatility surface.
    pub fn surface(&self) -> &InterpolatedSurface {
        &self.surface
    }
}
