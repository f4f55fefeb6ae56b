//! SABR implied Black volatility (Hagan et al., 2002) and its adjoint.
//!
//! One formula covers every β in `[0, 1]` and remains exact at the money:
//! the `z / χ(z)` factor switches to its Taylor expansion for small `|z|`
//! rather than branching on `F = K`. Forwards and strikes passed here are
//! already shifted.

use capfloor_core::{ensure, Real, Result, Time, Volatility};

/// Strikes below `forward × CUTOFF_MONEYNESS` are floored to that level.
const CUTOFF_MONEYNESS: Real = 1.0e-12;

/// Below this `|z|` the expansion of `z / χ(z)` is used.
const SMALL_Z: Real = 1.0e-6;

/// SABR model parameters.
///
/// Domain checks (`alpha > 0`, `0 ≤ beta ≤ 1`, `−1 < rho < 1`, `nu ≥ 0`) are
/// made once, on the parameter curves these values are read from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SabrParameters {
    /// Alpha (volatility level)
    pub alpha: Real,
    /// Beta (CEV exponent: 0 = normal backbone, 1 = log-normal backbone)
    pub beta: Real,
    /// Rho (correlation between forward and volatility)
    pub rho: Real,
    /// Nu (vol-of-vol)
    pub nu: Real,
}

/// Volatility together with its derivatives with respect to every input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SabrVolatilityAdjoint {
    /// The implied Black volatility.
    pub volatility: Volatility,
    /// `∂σ/∂F`
    pub d_forward: Real,
    /// `∂σ/∂K`
    pub d_strike: Real,
    /// `∂σ/∂α`
    pub d_alpha: Real,
    /// `∂σ/∂β`
    pub d_beta: Real,
    /// `∂σ/∂ρ`
    pub d_rho: Real,
    /// `∂σ/∂ν`
    pub d_nu: Real,
}

/// Intermediate values of the forward sweep, kept for the adjoint.
struct Forward {
    k: Real,
    cutoff: bool,
    b1: Real,
    ln_fk: Real,
    lfk: Real,
    f1: Real,
    f1s: Real,
    lnb: Real,
    lnbsq: Real,
    first: Real,
    z: Real,
    zoc: Real,
    zoc_z: Real,
    zoc_rho: Real,
    a: Real,
    b: Real,
    corr: Real,
    vol: Real,
}

fn strike_cutoff(forward: Real, strike: Real) -> (Real, bool) {
    let floor = forward * CUTOFF_MONEYNESS;
    if strike < floor {
        tracing::info!(strike, floor, "SABR strike below cutoff, using cutoff strike");
        (floor, true)
    } else {
        (strike, false)
    }
}

/// `z / χ(z)` with its partial derivatives in `z` and `ρ`.
fn z_over_chi(z: Real, rho: Real) -> (Real, Real, Real) {
    if z.abs() < SMALL_Z {
        let c2 = (2.0 - 3.0 * rho * rho) / 12.0;
        let zoc = 1.0 - 0.5 * rho * z + c2 * z * z;
        let zoc_z = -0.5 * rho + 2.0 * c2 * z;
        let zoc_rho = -0.5 * z - 0.5 * rho * z * z;
        return (zoc, zoc_z, zoc_rho);
    }
    let s = (1.0 - 2.0 * rho * z + z * z).sqrt();
    // χ = ln((S + z − ρ) / (1 − ρ)), written with ln_1p for accuracy near z = 0.
    let chi = (((z * z - 2.0 * rho * z) / (s + 1.0) + z) / (1.0 - rho)).ln_1p();
    let chi_z = 1.0 / s;
    let chi_rho = (-z / s - 1.0) / (s + z - rho) + 1.0 / (1.0 - rho);
    let zoc = z / chi;
    let zoc_z = 1.0 / chi - z * chi_z / (chi * chi);
    let zoc_rho = -z * chi_rho / (chi * chi);
    (zoc, zoc_z, zoc_rho)
}

fn forward_sweep(forward: Real, strike: Real, expiry: Time, p: &SabrParameters) -> Result<Forward> {
    ensure!(
        forward.is_finite() && forward > 0.0,
        "SABR needs a positive (shifted) forward, got {forward}"
    );
    let (k, cutoff) = strike_cutoff(forward, strike);
    let b1 = 1.0 - p.beta;
    let ln_f = forward.ln();
    let ln_k = k.ln();
    let ln_fk = ln_f - ln_k;
    let lfk = ln_f + ln_k;
    let f1 = (b1 * lfk).exp();
    let f1s = (0.5 * b1 * lfk).exp();
    let lnb = b1 * ln_fk;
    let lnbsq = lnb * lnb;
    let first = f1s * (1.0 + lnbsq / 24.0 + lnbsq * lnbsq / 1920.0);
    let z = p.nu * f1s * ln_fk / p.alpha;
    let (zoc, zoc_z, zoc_rho) = z_over_chi(z, p.rho);
    let a = b1 * b1 * p.alpha * p.alpha / (24.0 * f1);
    let b = p.rho * p.alpha * p.nu * p.beta / (4.0 * f1s);
    let c = p.nu * p.nu * (2.0 - 3.0 * p.rho * p.rho) / 24.0;
    let corr = 1.0 + expiry * (a + b + c);
    let vol = p.alpha * zoc * corr / first;
    Ok(Forward {
        k,
        cutoff,
        b1,
        ln_fk,
        lfk,
        f1,
        f1s,
        lnb,
        lnbsq,
        first,
        z,
        zoc,
        zoc_z,
        zoc_rho,
        a,
        b,
        corr,
        vol,
    })
}

/// The SABR implied Black volatility for `(forward, strike, expiry)`.
///
/// # Errors
/// `Error::Configuration` if the forward is not positive.
pub fn sabr_volatility(
    forward: Real,
    strike: Real,
    expiry: Time,
    p: &SabrParameters,
) -> Result<Volatility> {
    Ok(forward_sweep(forward, strike, expiry, p)?.vol)
}

/// The SABR implied Black volatility and its derivatives, by reverse-mode
/// differentiation of the forward sweep.
///
/// # Errors
/// `Error::Configuration` if the forward is not positive.
pub fn sabr_volatility_adjoint(
    forward: Real,
    strike: Real,
    expiry: Time,
    p: &SabrParameters,
) -> Result<SabrVolatilityAdjoint> {
    let fw = forward_sweep(forward, strike, expiry, p)?;
    let (alpha, beta, rho, nu) = (p.alpha, p.beta, p.rho, p.nu);

    // vol = α · zoc · corr / first
    let mut alpha_bar = fw.zoc * fw.corr / fw.first;
    let zoc_bar = alpha * fw.corr / fw.first;
    let corr_bar = alpha * fw.zoc / fw.first;
    let first_bar = -fw.vol / fw.first;

    // corr = 1 + t·(A + B + C)
    let term_bar = corr_bar * expiry;
    // C
    let mut nu_bar = term_bar * 2.0 * nu * (2.0 - 3.0 * rho * rho) / 24.0;
    let mut rho_bar = term_bar * nu * nu * (-6.0 * rho) / 24.0;
    // B
    let b_scale = 4.0 * fw.f1s;
    rho_bar += term_bar * alpha * nu * beta / b_scale;
    alpha_bar += term_bar * rho * nu * beta / b_scale;
    nu_bar += term_bar * rho * alpha * beta / b_scale;
    let mut beta_bar = term_bar * rho * alpha * nu / b_scale;
    let mut f1s_bar = -term_bar * fw.b / fw.f1s;
    // A
    let mut b1_bar = term_bar * 2.0 * fw.b1 * alpha * alpha / (24.0 * fw.f1);
    alpha_bar += term_bar * fw.b1 * fw.b1 * 2.0 * alpha / (24.0 * fw.f1);
    let f1_bar = -term_bar * fw.a / fw.f1;

    // zoc(z, ρ)
    let z_bar = zoc_bar * fw.zoc_z;
    rho_bar += zoc_bar * fw.zoc_rho;

    // z = ν · f1s · ln(f/k) / α
    nu_bar += z_bar * fw.f1s * fw.ln_fk / alpha;
    f1s_bar += z_bar * nu * fw.ln_fk / alpha;
    let mut ln_fk_bar = z_bar * nu * fw.f1s / alpha;
    alpha_bar -= z_bar * fw.z / alpha;

    // first = f1s · (1 + lnb²/24 + lnb⁴/1920)
    f1s_bar += first_bar * (1.0 + fw.lnbsq / 24.0 + fw.lnbsq * fw.lnbsq / 1920.0);
    let lnbsq_bar = first_bar * fw.f1s * (1.0 / 24.0 + fw.lnbsq / 960.0);
    let lnb_bar = lnbsq_bar * 2.0 * fw.lnb;
    b1_bar += lnb_bar * fw.ln_fk;
    ln_fk_bar += lnb_bar * fw.b1;

    // f1s = exp(b1·lfk/2), f1 = exp(b1·lfk)
    b1_bar += f1s_bar * fw.f1s * 0.5 * fw.lfk + f1_bar * fw.f1 * fw.lfk;
    let lfk_bar = f1s_bar * fw.f1s * 0.5 * fw.b1 + f1_bar * fw.f1 * fw.b1;

    beta_bar -= b1_bar;

    // lfk = ln f + ln k, ln(f/k) = ln f − ln k
    let mut d_forward = (lfk_bar + ln_fk_bar) / forward;
    let mut d_strike = (lfk_bar - ln_fk_bar) / fw.k;
    if fw.cutoff {
        d_forward += d_strike * CUTOFF_MONEYNESS;
        d_strike = 0.0;
    }

    Ok(SabrVolatilityAdjoint {
        volatility: fw.vol,
        d_forward,
        d_strike,
        d_alpha: alpha_bar,
        d_beta: beta_bar,
        d_rho: rho_bar,
        d_nu: nu_bar,
    })
}
