//! Cap/floor legs, products and trades: aggregation of period values,
//! partially fixed legs, funding legs, premiums and configured pricers.

mod common;

use approx::assert_relative_eq;
use capfloor_core::{Currency, CurrencyAmount, FixingSeries, Result};
use capfloor_market::{
    CapletVolatilities, FiniteDifferenceCalculator, ImmutableRatesProvider, RatesProvider,
};
use capfloor_pricer::{
    DiscountingPaymentPricer, DiscountingSwapLegPricer, IborCapFloorLegPricer,
    IborCapFloorProductPricer, IborCapFloorTradePricer, IborCapletFloorletPeriodPricer,
    PricingConfig, SabrIborCapletFloorletPeriodPricer, VolatilityIborCapletFloorletPeriodPricer,
};
use capfloor_products::{
    FixedRatePaymentPeriod, IborCapFloor, IborCapFloorLeg, IborCapFloorTrade,
    IborCapletFloorletPeriod, Payment, SwapLeg,
};
use common::*;

const BLACK: VolatilityIborCapletFloorletPeriodPricer = VolatilityIborCapletFloorletPeriodPricer::BLACK;
const NORMAL: VolatilityIborCapletFloorletPeriodPricer = VolatilityIborCapletFloorletPeriodPricer::NORMAL;

/// A five-year quarterly cap, all periods still to fix.
fn five_year_cap() -> IborCapFloorLeg {
    cap_floor_leg(date(2008, 11, 17), 20, 0.045, NOTIONAL, true)
}

/// Quarterly fixed premium paid over the cap periods.
fn premium_leg(cap: &IborCapFloorLeg, rate: f64) -> SwapLeg {
    let periods = cap
        .periods()
        .iter()
        .map(|p| {
            FixedRatePaymentPeriod::new(
                Currency::EUR,
                -NOTIONAL,
                p.start_date(),
                p.end_date(),
                p.payment_date(),
                p.year_fraction(),
                rate,
            )
            .unwrap()
            .into()
        })
        .collect();
    SwapLeg::new(periods).unwrap()
}

fn upfront() -> Payment {
    Payment::of(Currency::EUR, -25_000.0, date(2008, 8, 20))
}

/// Fixings for the two periods of a leg starting 2008-05-16 that have fixed
/// by 2008-08-18.
fn past_fixings() -> FixingSeries {
    FixingSeries::new()
        .with_fixing(date(2008, 5, 16), 0.0486)
        .with_fixing(date(2008, 8, 16), 0.0496)
}

// ──── Leg ───────────────────────────────────────────────────────────────────

#[test]
fn leg_values_are_period_sums() {
    let (rates, vols) = (rates(), black());
    let leg = five_year_cap();
    let pricer = IborCapFloorLegPricer::new(BLACK);
    let pv = pricer.present_value(&leg, &rates, &vols).unwrap();
    let delta = pricer.present_value_delta(&leg, &rates, &vols).unwrap();
    let gamma = pricer.present_value_gamma(&leg, &rates, &vols).unwrap();
    let theta = pricer.present_value_theta(&leg, &rates, &vols).unwrap();
    let vega = pricer.present_value_vega(&leg, &rates, &vols).unwrap();
    type PeriodMeasure = fn(
        &VolatilityIborCapletFloorletPeriodPricer,
        &IborCapletFloorletPeriod,
        &dyn RatesProvider,
        &CapletVolatilities,
    ) -> Result<CurrencyAmount>;
    let sum = |f: PeriodMeasure| {
        leg.periods()
            .iter()
            .map(|p| f(&BLACK, p, &rates, &vols).unwrap().amount())
            .sum::<f64>()
    };
    assert_eq!(pv.currency(), Currency::EUR);
    assert_relative_eq!(
        pv.amount(),
        sum(IborCapletFloorletPeriodPricer::present_value),
        max_relative = 1e-13
    );
    assert_relative_eq!(
        delta.amount(),
        sum(IborCapletFloorletPeriodPricer::present_value_delta),
        max_relative = 1e-13
    );
    assert_relative_eq!(
        gamma.amount(),
        sum(IborCapletFloorletPeriodPricer::present_value_gamma),
        max_relative = 1e-13
    );
    assert_relative_eq!(
        theta.amount(),
        sum(IborCapletFloorletPeriodPricer::present_value_theta),
        max_relative = 1e-13
    );
    assert_relative_eq!(
        vega.amount(),
        sum(IborCapletFloorletPeriodPricer::present_value_vega),
        max_relative = 1e-13
    );

    let by_period = pricer.present_value_caplet_periods(&leg, &rates, &vols).unwrap();
    assert_eq!(by_period.len(), 20);
    let first = leg.periods()[0];
    assert_eq!(
        by_period.get(&first).copied(),
        Some(BLACK.present_value(&first, &rates, &vols).unwrap())
    );
}

#[test]
fn leg_spans_its_periods() {
    let leg = five_year_cap();
    assert_eq!(leg.len(), 20);
    assert_eq!(leg.start_date(), date(2008, 11, 19));
    assert_eq!(leg.end_date(), leg.periods()[19].end_date());
    for pair in leg.periods().windows(2) {
        assert_eq!(pair[0].end_date(), pair[1].start_date());
    }
}

#[test]
fn partially_fixed_leg() {
    let valuation = valuation();
    let rates = rates_at(valuation, past_fixings());
    let vols = normal();
    let leg = cap_floor_leg(date(2008, 5, 16), 8, 0.045, NOTIONAL, true);
    let pricer = IborCapFloorLegPricer::new(NORMAL);

    let forwards = pricer.forward_rates(&leg, &rates).unwrap();
    assert_eq!(forwards.len(), 6);
    assert!(forwards.iter().all(|(p, _)| p.fixing_date() > valuation));
    let vols_by_period = pricer.implied_volatilities(&leg, &rates, &vols).unwrap();
    assert_eq!(vols_by_period.len(), 6);
    for (p, v) in vols_by_period.iter() {
        assert_eq!(*v, NORMAL.implied_volatility(p, &rates, &vols).unwrap());
    }

    let fixed = leg.periods()[0];
    let df = rates.discount_factor(Currency::EUR, fixed.payment_date()).unwrap();
    let by_period = pricer.present_value_caplet_periods(&leg, &rates, &vols).unwrap();
    assert_relative_eq!(
        by_period.get(&fixed).unwrap().amount(),
        df * NOTIONAL * fixed.year_fraction() * (0.0486 - 0.045),
        max_relative = 1e-12
    );

    let missing = rates_at(valuation, FixingSeries::new());
    assert!(pricer.present_value(&leg, &missing, &vols).is_err());
}

#[test]
fn current_cash_on_a_payment_date() {
    let leg = cap_floor_leg(date(2008, 5, 16), 8, 0.045, NOTIONAL, true);
    let first = leg.periods()[0];
    let pay = first.payment_date();
    assert_eq!(pay, date(2008, 8, 19));
    let rates = rates_at(pay, past_fixings());
    let pricer = IborCapFloorLegPricer::new(BLACK);
    let cash = pricer.current_cash(&leg, &rates).unwrap();
    assert_relative_eq!(
        cash.amount(),
        NOTIONAL * (91.0 / 360.0) * (0.0486 - 0.045),
        max_relative = 1e-12
    );
    let none = pricer.current_cash(&leg, &rates_at(valuation(), past_fixings())).unwrap();
    assert_eq!(none.amount(), 0.0);
}

#[test]
fn floor_leg_under_normal() {
    let (rates, vols) = (rates(), normal());
    let floor = cap_floor_leg(date(2008, 11, 17), 20, 0.045, NOTIONAL, false);
    let cap = five_year_cap();
    let pricer = IborCapFloorLegPricer::new(NORMAL);
    let pv_floor = pricer.present_value(&floor, &rates, &vols).unwrap();
    let pv_cap = pricer.present_value(&cap, &rates, &vols).unwrap();
    assert!(pv_floor.amount() > 0.0);

    let swap = premium_leg(&cap, 0.045);
    let float_minus_fixed: f64 = cap
        .periods()
        .iter()
        .map(|p| {
            let df = rates.discount_factor(Currency::EUR, p.payment_date()).unwrap();
            let forward = rates.ibor_rate(p.observation()).unwrap();
            df * NOTIONAL * p.year_fraction() * forward
        })
        .sum::<f64>()
        + DiscountingSwapLegPricer::DEFAULT
            .present_value(&swap, &rates)
            .unwrap()
            .amount();
    assert_relative_eq!(
        pv_cap.amount() - pv_floor.amount(),
        float_minus_fixed,
        max_relative = 1e-10
    );
}

#[test]
fn leg_sensitivities_match_finite_difference() {
    let (rates, vols) = (rates(), black());
    let leg = five_year_cap();
    let pricer = IborCapFloorLegPricer::new(BLACK);
    let points = pricer
        .present_value_sensitivity_rates(&leg, &rates, &vols)
        .unwrap()
        .build();
    let analytic = rates.parameter_sensitivity(&points).unwrap();
    let fd = FiniteDifferenceCalculator::default()
        .sensitivity_rates(&rates, |r: &ImmutableRatesProvider| -> Result<_> {
            pricer.present_value(&leg, r, &vols)
        })
        .unwrap();
    assert!(analytic.equal_within_tolerance(&fd, 5e-2), "{analytic:?} vs {fd:?}");

    let points = pricer
        .present_value_sensitivity_model_params_volatility(&leg, &rates, &vols)
        .unwrap()
        .build();
    assert_eq!(points.len(), 20);
    let analytic = vols.parameter_sensitivity(&points).unwrap();
    let fd = FiniteDifferenceCalculator::default()
        .sensitivity_volatilities(&vols, |v: &CapletVolatilities| -> Result<_> {
            pricer.present_value(&leg, &rates, v)
        })
        .unwrap();
    assert!(analytic.equal_within_tolerance(&fd, 5e-2), "{analytic:?} vs {fd:?}");
}

// ──── Product and trade ─────────────────────────────────────────────────────

fn trade() -> IborCapFloorTrade {
    let cap = five_year_cap();
    let funding = premium_leg(&cap, 0.002);
    IborCapFloorTrade::with_premium(IborCapFloor::with_pay_leg(cap, funding), upfront())
}

#[test]
fn product_adds_the_pay_leg() {
    let (rates, vols) = (rates(), black());
    let cap = five_year_cap();
    let funding = premium_leg(&cap, 0.002);
    let product = IborCapFloor::with_pay_leg(cap.clone(), funding.clone());
    let pricer = IborCapFloorProductPricer::new(IborCapFloorLegPricer::new(BLACK));
    let pv = pricer.present_value(&product, &rates, &vols).unwrap();
    let expected = IborCapFloorLegPricer::new(BLACK)
        .present_value(&cap, &rates, &vols)
        .unwrap()
        .amount()
        + DiscountingSwapLegPricer::DEFAULT
            .present_value(&funding, &rates)
            .unwrap()
            .amount();
    assert_eq!(pv.len(), 1);
    assert_relative_eq!(pv.amount(Currency::EUR).amount(), expected, max_relative = 1e-13);
    assert_eq!(product.currencies(), vec![Currency::EUR]);

    let cap_only = IborCapFloor::of(cap);
    let model = pricer
        .present_value_sensitivity_model_params_volatility(&product, &rates, &vols)
        .unwrap()
        .build();
    let model_cap_only = pricer
        .present_value_sensitivity_model_params_volatility(&cap_only, &rates, &vols)
        .unwrap()
        .build();
    assert_eq!(model, model_cap_only);
}

#[test]
fn trade_adds_the_premium() {
    let (rates, vols) = (rates(), black());
    let trade = trade();
    let pricer = IborCapFloorTradePricer::new(IborCapFloorProductPricer::new(
        IborCapFloorLegPricer::new(BLACK),
    ));
    let pv = pricer.present_value(&trade, &rates, &vols).unwrap();
    let product = pricer
        .product_pricer()
        .present_value(trade.product(), &rates, &vols)
        .unwrap();
    let premium = DiscountingPaymentPricer
        .present_value(&upfront(), &rates)
        .unwrap();
    assert!(premium.amount() < 0.0 && premium.amount() > -25_000.0);
    assert_relative_eq!(
        pv.amount(Currency::EUR).amount(),
        product.amount(Currency::EUR).amount() + premium.amount(),
        max_relative = 1e-13
    );
}

#[test]
fn currency_exposure_is_present_value_for_single_currency() {
    let (rates, vols) = (rates(), black());
    let pricer = IborCapFloorTradePricer::new(IborCapFloorProductPricer::new(
        IborCapFloorLegPricer::new(BLACK),
    ));
    let trade = trade();
    let exposure = pricer.currency_exposure(&trade, &rates, &vols).unwrap();
    let pv = pricer.present_value(&trade, &rates, &vols).unwrap();
    assert_eq!(exposure, pv);
}

#[test]
fn trade_rate_sensitivity_matches_finite_difference() {
    let (rates, vols) = (rates(), normal());
    let pricer = IborCapFloorTradePricer::new(IborCapFloorProductPricer::new(
        IborCapFloorLegPricer::new(NORMAL),
    ));
    let trade = trade();
    let points = pricer
        .present_value_sensitivity_rates(&trade, &rates, &vols)
        .unwrap();
    let analytic = rates.parameter_sensitivity(&points).unwrap();
    let fd = FiniteDifferenceCalculator::default()
        .sensitivity_rates(&rates, |r: &ImmutableRatesProvider| -> Result<_> {
            Ok(pricer.present_value(&trade, r, &vols)?.amount(Currency::EUR))
        })
        .unwrap();
    assert!(analytic.equal_within_tolerance(&fd, 5e-2), "{analytic:?} vs {fd:?}");

    let model = pricer
        .present_value_sensitivity_model_params_volatility(&trade, &rates, &vols)
        .unwrap();
    assert_eq!(model.len(), 20);
    assert!(model.iter().all(|p| p.is_volatility()));
}

#[test]
fn trade_current_cash_includes_premium() {
    let pay = date(2008, 8, 20);
    let rates = rates_at(pay, FixingSeries::new());
    let pricer = IborCapFloorTradePricer::new(IborCapFloorProductPricer::new(
        IborCapFloorLegPricer::new(BLACK),
    ));
    let cash = pricer.current_cash(&trade(), &rates).unwrap();
    assert_eq!(cash.amount(Currency::EUR).amount(), -25_000.0);
    let later = pricer
        .current_cash(&trade(), &rates_at(valuation(), FixingSeries::new()))
        .unwrap();
    assert_eq!(later.amount(Currency::EUR).amount(), 0.0);
}

#[test]
fn trade_reports_forwards_and_volatilities() {
    let (rates, vols) = (rates(), black());
    let pricer = IborCapFloorTradePricer::new(IborCapFloorProductPricer::new(
        IborCapFloorLegPricer::new(BLACK),
    ));
    let trade = trade();
    let forwards = pricer.forward_rates(&trade, &rates).unwrap();
    let implied = pricer.implied_volatilities(&trade, &rates, &vols).unwrap();
    assert_eq!(forwards.len(), 20);
    assert_eq!(implied.len(), 20);
    for (p, f) in forwards.iter() {
        assert_eq!(*f, rates.ibor_rate(p.observation()).unwrap());
    }
}

#[test]
fn sabr_trade_sticky_model_matches_finite_difference() {
    let (rates, vols) = (rates(), sabr());
    let pricer = IborCapFloorTradePricer::new(IborCapFloorProductPricer::new(
        IborCapFloorLegPricer::new(SabrIborCapletFloorletPeriodPricer::DEFAULT),
    ));
    let trade = trade();
    let points = pricer
        .present_value_sensitivity_rates_sticky_model(&trade, &rates, &vols)
        .unwrap();
    let analytic = rates.parameter_sensitivity(&points).unwrap();
    let fd = FiniteDifferenceCalculator::default()
        .sensitivity_rates(&rates, |r: &ImmutableRatesProvider| -> Result<_> {
            Ok(pricer.present_value(&trade, r, &vols)?.amount(Currency::EUR))
        })
        .unwrap();
    assert!(analytic.equal_within_tolerance(&fd, 5e-2), "{analytic:?} vs {fd:?}");

    let model = pricer
        .present_value_sensitivity_model_params_volatility(&trade, &rates, &vols)
        .unwrap();
    assert_eq!(model.len(), 80);
    let analytic = vols.parameter_sensitivity(&model).unwrap();
    let fd = FiniteDifferenceCalculator::default()
        .sensitivity_volatilities(&vols, |v: &CapletVolatilities| -> Result<_> {
            Ok(pricer.present_value(&trade, &rates, v)?.amount(Currency::EUR))
        })
        .unwrap();
    assert!(analytic.equal_within_tolerance(&fd, 5e-2), "{analytic:?} vs {fd:?}");
}

// ──── Configuration ─────────────────────────────────────────────────────────

#[test]
fn configured_pricers_agree_with_defaults() {
    let config = PricingConfig::from_toml_str("parallel_threshold = 4\n").unwrap();
    let (rates, vols) = (rates(), black());
    let trade = trade();
    let configured = IborCapFloorTradePricer::with_config(BLACK, &config);
    let default = IborCapFloorTradePricer::with_config(BLACK, &PricingConfig::default());
    assert_eq!(
        configured.product_pricer().leg_pricer().period_pricer(),
        &BLACK
    );
    assert_eq!(
        configured.present_value(&trade, &rates, &vols).unwrap(),
        default.present_value(&trade, &rates, &vols).unwrap()
    );
    assert_eq!(
        configured
            .present_value_sensitivity_rates(&trade, &rates, &vols)
            .unwrap(),
        default
            .present_value_sensitivity_rates(&trade, &rates, &vols)
            .unwrap()
    );
}

#[test]
fn unknown_config_keys_are_rejected() {
    assert!(PricingConfig::from_toml_str("parallel = true").is_err());
}
