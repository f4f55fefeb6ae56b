//! Bachelier (normal) formula.
//!
//! With `d = (F − K) / (σ√T)` and `w = ±1` for call/put,
//! price = `w·(F − K)·Φ(w·d) + σ√T·φ(d)`. Forwards and strikes may be
//! negative.

use super::black::intrinsic_delta;
use super::SMALL;
use crate::distributions::{normal_cdf, normal_pdf};
use capfloor_core::{PutCall, Real, Time, Volatility};

fn sigma_root_t(expiry: Time, volatility: Volatility) -> Option<Real> {
    let s = volatility * expiry.max(0.0).sqrt();
    (s >= SMALL).then_some(s)
}

/// Undiscounted Bachelier price.
pub fn price(
    forward: Real,
    strike: Real,
    expiry: Time,
    volatility: Volatility,
    put_call: PutCall,
) -> Real {
    let Some(s) = sigma_root_t(expiry, volatility) else {
        return put_call.intrinsic(forward, strike);
    };
    let w = put_call.sign();
    let d = (forward - strike) / s;
    w * (forward - strike) * normal_cdf(w * d) + s * normal_pdf(d)
}

/// Forward delta `w·Φ(w·d)`.
pub fn delta(
    forward: Real,
    strike: Real,
    expiry: Time,
    volatility: Volatility,
    put_call: PutCall,
) -> Real {
    let Some(s) = sigma_root_t(expiry, volatility) else {
        return intrinsic_delta(forward, strike, put_call);
    };
    let w = put_call.sign();
    w * normal_cdf(w * (forward - strike) / s)
}

/// Forward gamma `φ(d) / (σ√T)`.
pub fn gamma(
    forward: Real,
    strike: Real,
    expiry: Time,
    volatility: Volatility,
    _put_call: PutCall,
) -> Real {
    match sigma_root_t(expiry, volatility) {
        Some(s) => normal_pdf((forward - strike) / s) / s,
        None => 0.0,
    }
}

/// Driftless theta `−σ·φ(d) / (2√T)`.
pub fn theta(
    forward: Real,
    strike: Real,
    expiry: Time,
    volatility: Volatility,
    _put_call: PutCall,
) -> Real {
    match sigma_root_t(expiry, volatility) {
        Some(s) => -volatility * normal_pdf((forward - strike) / s) / (2.0 * expiry.sqrt()),
        None => 0.0,
    }
}

/// Vega `√T·φ(d)`.
pub fn vega(
    forward: Real,
    strike: Real,
    expiry: Time,
    volatility: Volatility,
    _put_call: PutCall,
) -> Real {
    match sigma_root_t(expiry, volatility) {
        Some(s) => expiry.sqrt() * normal_pdf((forward - strike) / s),
        None => 0.0,
    }
}
