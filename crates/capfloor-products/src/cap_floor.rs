//! Cap/floor products and trades.

use crate::leg::IborCapFloorLeg;
use crate::payment::Payment;
use crate::swap::SwapLeg;
use capfloor_core::Currency;

/// A cap or floor: a caplet/floorlet leg and an optional funding leg.
#[derive(Debug, Clone, PartialEq)]
pub struct IborCapFloor {
    cap_floor_leg: IborCapFloorLeg,
    pay_leg: Option<SwapLeg>,
}

impl IborCapFloor {
    /// A cap/floor with no funding leg.
    pub fn of(cap_floor_leg: IborCapFloorLeg) -> Self {
        Self {
            cap_floor_leg,
            pay_leg: None,
        }
    }

    /// A cap/floor funded by `pay_leg`.
    pub fn with_pay_leg(cap_floor_leg: IborCapFloorLeg, pay_leg: SwapLeg) -> Self {
        Self {
            cap_floor_leg,
            pay_leg: Some(pay_leg),
        }
    }

    /// The caplet/floorlet leg.
    pub fn cap_floor_leg(&self) -> &IborCapFloorLeg {
        &self.cap_floor_leg
    }

    /// The funding leg, if any.
    pub fn pay_leg(&self) -> Option<&SwapLeg> {
        self.pay_leg.as_ref()
    }

    /// Every currency the product pays in, sorted.
    pub fn currencies(&self) -> Vec<Currency> {
        let mut out = vec![self.cap_floor_leg.currency()];
        if let Some(leg) = &self.pay_leg {
            out.push(leg.currency());
        }
        out.sort();
        out.dedup();
        out
    }
}

/// A cap/floor trade: the product and an optional premium.
#[derive(Debug, Clone, PartialEq)]
pub struct IborCapFloorTrade {
    product: IborCapFloor,
    premium: Option<Payment>,
}

impl IborCapFloorTrade {
    /// A trade with no premium.
    pub fn of(product: IborCapFloor) -> Self {
        Self {
            product,
            premium: None,
        }
    }

    /// A trade with an upfront premium. A premium paid is a negative amount.
    pub fn with_premium(product: IborCapFloor, premium: Payment) -> Self {
        Self {
            product,
            premium: Some(premium),
        }
    }

    /// The product.
    pub fn product(&self) -> &IborCapFloor {
        &self.product
    }

    /// The premium, if any.
    pub fn premium(&self) -> Option<&Payment> {
        self.premium.as_ref()
    }
}
