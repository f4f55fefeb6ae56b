//! Black-76 log-normal formula.
//!
//! `d1 = (ln(F/K) + σ²T/2) / (σ√T)`, `d2 = d1 − σ√T`
//!
//! * call = `F·Φ(d1) − K·Φ(d2)`
//! * put  = `K·Φ(−d2) − F·Φ(−d1)`
//!
//! Shifted-Black prices are obtained by calling these functions with
//! `(F + s, K + s)`.

use super::SMALL;
use crate::distributions::{normal_cdf, normal_pdf};
use capfloor_core::{PutCall, Real, Time, Volatility};

/// Degenerate cases shared by every Greek.
enum Regime {
    /// Strike at or below zero: the option is a forward (call) or worthless (put).
    ZeroStrike,
    /// Forward at or below zero: the call is worthless, the put is `K − F`.
    ZeroForward,
    /// No time value left.
    Intrinsic,
    /// Regular case with `d1` and `σ√T`.
    Regular { d1: Real, sigma_root_t: Real },
}

fn regime(forward: Real, strike: Real, expiry: Time, volatility: Volatility) -> Regime {
    if strike < SMALL {
        return Regime::ZeroStrike;
    }
    if forward < SMALL {
        return Regime::ZeroForward;
    }
    let sigma_root_t = volatility * expiry.max(0.0).sqrt();
    if sigma_root_t < SMALL {
        return Regime::Intrinsic;
    }
    let d1 = (forward / strike).ln() / sigma_root_t + 0.5 * sigma_root_t;
    Regime::Regular { d1, sigma_root_t }
}

/// Undiscounted Black-76 price.
pub fn price(
    forward: Real,
    strike: Real,
    expiry: Time,
    volatility: Volatility,
    put_call: PutCall,
) -> Real {
    match regime(forward, strike, expiry, volatility) {
        Regime::ZeroStrike => match put_call {
            PutCall::Call => forward - strike,
            PutCall::Put => 0.0,
        },
        Regime::ZeroForward => match put_call {
            PutCall::Call => 0.0,
            PutCall::Put => strike - forward,
        },
        Regime::Intrinsic => put_call.intrinsic(forward, strike),
        Regime::Regular { d1, sigma_root_t } => {
            let d2 = d1 - sigma_root_t;
            let w = put_call.sign();
            w * (forward * normal_cdf(w * d1) - strike * normal_cdf(w * d2))
        }
    }
}

/// Forward delta `∂price/∂F`.
pub fn delta(
    forward: Real,
    strike: Real,
    expiry: Time,
    volatility: Volatility,
    put_call: PutCall,
) -> Real {
    match regime(forward, strike, expiry, volatility) {
        Regime::ZeroStrike | Regime::ZeroForward | Regime::Intrinsic => {
            intrinsic_delta(forward, strike, put_call)
        }
        Regime::Regular { d1, .. } => {
            let w = put_call.sign();
            w * normal_cdf(w * d1)
        }
    }
}

/// Forward gamma `∂²price/∂F²`.
pub fn gamma(
    forward: Real,
    strike: Real,
    expiry: Time,
    volatility: Volatility,
    _put_call: PutCall,
) -> Real {
    match regime(forward, strike, expiry, volatility) {
        Regime::Regular { d1, sigma_root_t } => normal_pdf(d1) / (forward * sigma_root_t),
        _ => 0.0,
    }
}

/// Driftless theta `−F·φ(d1)·σ / (2√T)`.
pub fn theta(
    forward: Real,
    strike: Real,
    expiry: Time,
    volatility: Volatility,
    _put_call: PutCall,
) -> Real {
    match regime(forward, strike, expiry, volatility) {
        Regime::Regular { d1, .. } => {
            -forward * normal_pdf(d1) * volatility / (2.0 * expiry.sqrt())
        }
        _ => 0.0,
    }
}

/// Vega `∂price/∂σ = F·φ(d1)·√T`.
pub fn vega(
    forward: Real,
    strike: Real,
    expiry: Time,
    volatility: Volatility,
    _put_call: PutCall,
) -> Real {
    match regime(forward, strike, expiry, volatility) {
        Regime::Regular { d1, .. } => forward * normal_pdf(d1) * expiry.sqrt(),
        _ => 0.0,
    }
}

/// Delta of the payoff `max(±(F − K), 0)`; zero at the money.
pub(crate) fn intrinsic_delta(forward: Real, strike: Real, put_call: PutCall) -> Real {
    match put_call {
        PutCall::Call if forward > strike => 1.0,
        PutCall::Put if forward < strike => -1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const F: Real = 0.03;
    const K: Real = 0.025;
    const T: Time = 2.0;
    const VOL: Volatility = 0.25;

    #[test]
    fn known_price() {
        // F = 3%, K = 2.5%, σ√T = 0.25·√2
        let c = price(F, K, T, VOL, PutCall::Call);
        assert_relative_eq!(c, 0.006_853_773_604_888_699, epsilon = 1e-15);
    }

    #[test]
    fn put_call_parity() {
        let c = price(F, K, T, VOL, PutCall::Call);
        let p = price(F, K, T, VOL, PutCall::Put);
        assert_relative_eq!(c - p, F - K, epsilon = 1e-15);
        let dc = delta(F, K, T, VOL, PutCall::Call);
        let dp = delta(F, K, T, VOL, PutCall::Put);
        assert_relative_eq!(dc - dp, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn greeks_match_finite_differences() {
        let h = 1e-6;
        for pc in [PutCall::Call, PutCall::Put] {
            let up = price(F + h, K, T, VOL, pc);
            let dn = price(F - h, K, T, VOL, pc);
            let mid = price(F, K, T, VOL, pc);
            assert_relative_eq!(delta(F, K, T, VOL, pc), (up - dn) / (2.0 * h), epsilon = 1e-8);
            assert_relative_eq!(
                gamma(F, K, T, VOL, pc),
                (up - 2.0 * mid + dn) / (h * h),
                max_relative = 1e-4
            );
            let vu = price(F, K, T, VOL + h, pc);
            let vd = price(F, K, T, VOL - h, pc);
            assert_relative_eq!(vega(F, K, T, VOL, pc), (vu - vd) / (2.0 * h), epsilon = 1e-9);
            let tu = price(F, K, T + h, VOL, pc);
            let td = price(F, K, T - h, VOL, pc);
            assert_relative_eq!(theta(F, K, T, VOL, pc), -(tu - td) / (2.0 * h), epsilon = 1e-9);
        }
    }

    #[test]
    fn zero_expiry_is_intrinsic() {
        assert_eq!(price(F, K, 0.0, VOL, PutCall::Call), F - K);
        assert_eq!(price(F, K, 0.0, VOL, PutCall::Put), 0.0);
        assert_eq!(delta(F, K, 0.0, VOL, PutCall::Call), 1.0);
        assert_eq!(delta(F, K, 0.0, VOL, PutCall::Put), 0.0);
        assert_eq!(gamma(F, K, 0.0, VOL, PutCall::Call), 0.0);
        assert_eq!(theta(F, K, 0.0, VOL, PutCall::Call), 0.0);
        assert_eq!(vega(F, K, 0.0, VOL, PutCall::Call), 0.0);
    }

    #[test]
    fn zero_strike_and_zero_forward() {
        assert_eq!(price(F, 0.0, T, VOL, PutCall::Call), F);
        assert_eq!(price(F, 0.0, T, VOL, PutCall::Put), 0.0);
        assert_eq!(price(0.0, K, T, VOL, PutCall::Call), 0.0);
        assert_eq!(price(0.0, K, T, VOL, PutCall::Put), K);
    }

    proptest! {
        #[test]
        fn price_bounded_by_forward_and_intrinsic(
            f in 0.001f64..0.1,
            k in 0.001f64..0.1,
            t in 0.01f64..10.0,
            v in 0.01f64..1.0,
        ) {
            let c = price(f, k, t, v, PutCall::Call);
            prop_assert!(c >= (f - k).max(0.0) - 1e-15);
            prop_assert!(c <= f + 1e-15);
            let p = price(f, k, t, v, PutCall::Put);
            prop_assert!((c - p - (f - k)).abs() < 1e-14);
        }
    }
}
