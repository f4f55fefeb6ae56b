//! Shared market and trade fixtures: a EUR market as of 2008-08-18.
#![allow(dead_code)]

use capfloor_core::{Currency, FixingSeries, Rate, Real};
use capfloor_market::{
    BlackCapletVolatilities, CapletVolatilities, IborIndex, IborIndexObservation,
    ImmutableRatesProvider, InterpolatedCurve, InterpolatedSurface, NormalCapletVolatilities,
    SabrCapletVolatilities, SabrParameterCurves, ShiftedBlackCapletVolatilities,
};
use capfloor_products::{IborCapFloorLeg, IborCapletFloorletBinaryPeriod, IborCapletFloorletPeriod};
use chrono::{Months, NaiveDate};

pub const NOTIONAL: Real = 1.0e6;
pub const INDEX: IborIndex = IborIndex::EUR_EURIBOR_3M;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn valuation() -> NaiveDate {
    date(2008, 8, 18)
}

// ── Rates ─────────────────────────────────────────────────────────────────────

const CURVE_TIMES: [Real; 6] = [0.25, 0.5, 1.0, 2.0, 5.0, 10.0];
const DSC_ZEROS: [Real; 6] = [0.0420, 0.0430, 0.0440, 0.0450, 0.0465, 0.0480];
const FWD_ZEROS: [Real; 6] = [0.0450, 0.0460, 0.0465, 0.0470, 0.0480, 0.0490];

/// Discount and 3M Euribor curves at `valuation`, with `fixings` published.
pub fn rates_at(valuation: NaiveDate, fixings: FixingSeries) -> ImmutableRatesProvider {
    ImmutableRatesProvider::builder(valuation)
        .with_discount_curve(
            Currency::EUR,
            InterpolatedCurve::new("EUR-DSC", &CURVE_TIMES, &DSC_ZEROS).unwrap(),
        )
        .with_index_curve(
            INDEX,
            InterpolatedCurve::new("EUR-EURIBOR-3M", &CURVE_TIMES, &FWD_ZEROS).unwrap(),
        )
        .with_time_series(INDEX, fixings)
        .build()
        .unwrap()
}

pub fn rates() -> ImmutableRatesProvider {
    rates_at(valuation(), FixingSeries::new())
}

// ── Volatilities ──────────────────────────────────────────────────────────────

const EXPIRIES: [Real; 5] = [0.5, 1.0, 3.0, 5.0, 10.0];
const STRIKES: [Real; 5] = [0.005, 0.01, 0.02, 0.03, 0.05];

#[rustfmt::skip]
const BLACK_VOLS: [Real; 25] = [
    0.35, 0.30,  0.25,  0.22,  0.20,
    0.34, 0.29,  0.245, 0.215, 0.195,
    0.32, 0.28,  0.235, 0.21,  0.19,
    0.30, 0.27,  0.225, 0.205, 0.185,
    0.28, 0.25,  0.215, 0.195, 0.18,
];

#[rustfmt::skip]
const NORMAL_VOLS: [Real; 25] = [
    0.0095, 0.0092, 0.0090, 0.0088, 0.0086,
    0.0094, 0.0091, 0.0089, 0.0087, 0.0085,
    0.0092, 0.0089, 0.0087, 0.0085, 0.0083,
    0.0090, 0.0087, 0.0085, 0.0083, 0.0081,
    0.0088, 0.0085, 0.0083, 0.0081, 0.0079,
];

pub fn black_at(valuation: NaiveDate) -> CapletVolatilities {
    let surface =
        InterpolatedSurface::from_row_slice("EUR-BLACK", &EXPIRIES, &STRIKES, &BLACK_VOLS).unwrap();
    BlackCapletVolatilities::new(INDEX, valuation, surface).into()
}

pub fn black() -> CapletVolatilities {
    black_at(valuation())
}

pub fn shifted_black(shift: Real) -> CapletVolatilities {
    let surface =
        InterpolatedSurface::from_row_slice("EUR-SHIFTED-BLACK", &EXPIRIES, &STRIKES, &BLACK_VOLS)
            .unwrap();
    ShiftedBlackCapletVolatilities::new(INDEX, valuation(), surface, shift)
        .unwrap()
        .into()
}

pub fn normal_at(valuation: NaiveDate) -> CapletVolatilities {
    let surface =
        InterpolatedSurface::from_row_slice("EUR-NORMAL", &EXPIRIES, &STRIKES, &NORMAL_VOLS)
            .unwrap();
    NormalCapletVolatilities::new(INDEX, valuation, surface).into()
}

pub fn normal() -> CapletVolatilities {
    normal_at(valuation())
}

pub fn sabr_curves(alpha: &[Real]) -> SabrParameterCurves {
    SabrParameterCurves {
        alpha: InterpolatedCurve::new("EUR-SABR-ALPHA", &EXPIRIES, alpha).unwrap(),
        beta: InterpolatedCurve::constant("EUR-SABR-BETA", 0.5).unwrap(),
        rho: InterpolatedCurve::constant("EUR-SABR-RHO", -0.25).unwrap(),
        nu: InterpolatedCurve::new("EUR-SABR-NU", &[1.0, 10.0], &[0.55, 0.45]).unwrap(),
    }
}

pub fn sabr_at(valuation: NaiveDate) -> CapletVolatilities {
    let curves = sabr_curves(&[0.055, 0.057, 0.060, 0.062, 0.065]);
    SabrCapletVolatilities::new("EUR-SABR", INDEX, valuation, curves, 0.0)
        .unwrap()
        .into()
}

pub fn sabr() -> CapletVolatilities {
    sabr_at(valuation())
}

pub fn shifted_sabr() -> CapletVolatilities {
    let curves = sabr_curves(&[0.048, 0.049, 0.050, 0.052, 0.054]);
    SabrCapletVolatilities::new("EUR-SABR-SHIFTED", INDEX, valuation(), curves, 0.02)
        .unwrap()
        .into()
}

// ── Products ──────────────────────────────────────────────────────────────────

/// The 3M Euribor observation fixing on 2011-01-03.
pub fn observation() -> IborIndexObservation {
    IborIndexObservation::of(INDEX, date(2011, 1, 3)).unwrap()
}

pub fn caplet(strike: Rate, notional: Real) -> IborCapletFloorletPeriod {
    IborCapletFloorletPeriod::builder(observation())
        .with_notional(notional)
        .with_caplet(strike)
        .build()
        .unwrap()
}

pub fn floorlet(strike: Rate, notional: Real) -> IborCapletFloorletPeriod {
    IborCapletFloorletPeriod::builder(observation())
        .with_notional(notional)
        .with_floorlet(strike)
        .build()
        .unwrap()
}

pub fn binary_caplet(strike: Rate, amount: Real) -> IborCapletFloorletBinaryPeriod {
    IborCapletFloorletBinaryPeriod::builder(observation())
        .with_amount(amount)
        .with_caplet(strike)
        .build()
        .unwrap()
}

pub fn binary_floorlet(strike: Rate, amount: Real) -> IborCapletFloorletBinaryPeriod {
    IborCapletFloorletBinaryPeriod::builder(observation())
        .with_amount(amount)
        .with_floorlet(strike)
        .build()
        .unwrap()
}

/// Quarterly 3M Euribor fixings from `first_fixing`, each period running to
/// the next period's start.
pub fn quarterly_observations(first_fixing: NaiveDate, count: u32) -> Vec<IborIndexObservation> {
    let fixing = |i: u32| first_fixing.checked_add_months(Months::new(3 * i)).unwrap();
    (0..count)
        .map(|i| {
            let effective = INDEX.effective_from_fixing(fixing(i));
            let maturity = INDEX.effective_from_fixing(fixing(i + 1));
            IborIndexObservation::new(INDEX, fixing(i), effective, maturity).unwrap()
        })
        .collect()
}

/// A quarterly cap or floor leg on 3M Euribor.
pub fn cap_floor_leg(
    first_fixing: NaiveDate,
    count: u32,
    strike: Rate,
    notional: Real,
    is_cap: bool,
) -> IborCapFloorLeg {
    let periods = quarterly_observations(first_fixing, count)
        .into_iter()
        .map(|obs| {
            let builder = IborCapletFloorletPeriod::builder(obs).with_notional(notional);
            let builder = if is_cap {
                builder.with_caplet(strike)
            } else {
                builder.with_floorlet(strike)
            };
            builder.build().unwrap()
        })
        .collect();
    IborCapFloorLeg::new(periods).unwrap()
}
