//! Where a period stands relative to the valuation date.

use capfloor_core::{Error, Rate, Result};
use capfloor_market::{IborIndexObservation, RatesProvider};
use chrono::NaiveDate;

/// The temporal state of an optionlet, resolved once per pricing call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixingState {
    /// The fixing is in the future: full optionality.
    BeforeFixing,
    /// Valuation on the fixing date, with the fixing if already published.
    OnFixing {
        /// The published fixing, if any.
        published: Option<Rate>,
    },
    /// Fixed in the past, payment still ahead (or today).
    AfterFixingBeforePayment {
        /// The published fixing.
        fixing: Rate,
    },
    /// Paid before the valuation date: worth nothing.
    AfterPayment,
}

impl FixingState {
    /// Resolve the state of an observation paid on `payment_date`.
    ///
    /// # Errors
    /// `Error::MissingMarketData` when the fixing date has passed, the
    /// payment has not, and no fixing is published.
    pub fn resolve(
        rates: &dyn RatesProvider,
        observation: &IborIndexObservation,
        payment_date: NaiveDate,
    ) -> Result<Self> {
        let valuation = rates.valuation_date();
        let fixing_date = observation.fixing_date();
        let state = if valuation > payment_date {
            FixingState::AfterPayment
        } else if valuation < fixing_date {
            FixingState::BeforeFixing
        } else if valuation == fixing_date {
            FixingState::OnFixing {
                published: rates.ibor_fixing(observation.index(), fixing_date),
            }
        } else {
            let fixing = rates
                .ibor_fixing(observation.index(), fixing_date)
                .ok_or_else(|| {
                    Error::MissingMarketData(format!(
                        "{}: no fixing published for {fixing_date}",
                        observation.index()
                    ))
                })?;
            FixingState::AfterFixingBeforePayment { fixing }
        };
        tracing::trace!(%valuation, %fixing_date, %payment_date, ?state, "resolved fixing state");
        Ok(state)
    }

    /// The fixing that determines the payoff, once known.
    pub fn fixed_rate(&self) -> Option<Rate> {
        match *self {
            FixingState::OnFixing { published } => published,
            FixingState::AfterFixingBeforePayment { fixing } => Some(fixing),
            FixingState::BeforeFixing | FixingState::AfterPayment => None,
        }
    }

    /// Whether the option still has optionality on the forward rate.
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            FixingState::BeforeFixing | FixingState::OnFixing { published: None }
        )
    }
}
