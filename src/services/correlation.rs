//! Pearson correlation with a two-tailed significance test.
//!
//! The p-value comes from the Student t distribution with `n - 2` degrees of
//! freedom, evaluated through the regularized incomplete beta function:
//! `p = I_{df / (df + t^2)}(df / 2, 1 / 2)`.

use crate::constants::SIGNIFICANCE_LEVEL;
use crate::error::{AppError, Result};
use crate::models::{CorrelationResult, OceanVariable};

const BETACF_MAX_ITER: usize = 300;
const BETACF_EPS: f64 = 1e-14;
const BETACF_FPMIN: f64 = 1e-300;

/// Pearson coefficient and its significance for one pair of series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pearson {
    pub correlation: f64,
    pub p_value: f64,
    pub sample_size: usize,
}

impl Pearson {
    pub fn significant(&self) -> bool {
        self.p_value < SIGNIFICANCE_LEVEL
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|&v| v == values[0])
}

/// Pearson product-moment correlation of `x` and `y`.
///
/// Fails with `InsufficientSamples` below two pairs and with
/// `UndefinedCorrelation` when either series has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Pearson> {
    if x.len() != y.len() {
        return Err(AppError::InvalidRequest(format!(
            "Paired series differ in length: {} vs {}",
            x.len(),
            y.len()
        )));
    }
    let n = x.len();
    if n < 2 {
        return Err(AppError::InsufficientSamples {
            required: 2,
            actual: n,
        });
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(AppError::UndefinedCorrelation(
            "series contains non-finite values".to_string(),
        ));
    }
    if is_constant(x) || is_constant(y) {
        return Err(AppError::UndefinedCorrelation(
            "one series has zero variance".to_string(),
        ));
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    let denominator = (sxx * syy).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(AppError::UndefinedCorrelation(
            "one series has zero variance".to_string(),
        ));
    }

    let correlation = (sxy / denominator).clamp(-1.0, 1.0);

    Ok(Pearson {
        correlation,
        p_value: two_tailed_p_value(correlation, n),
        sample_size: n,
    })
}

/// `pearson` tagged with the environmental variable it was computed for.
pub fn correlate(
    variable: OceanVariable,
    environment: &[f64],
    abundance: &[f64],
) -> Result<CorrelationResult> {
    let result = pearson(environment, abundance)?;
    Ok(CorrelationResult {
        variable,
        correlation: result.correlation,
        p_value: result.p_value,
        significant: result.significant(),
        sample_size: result.sample_size,
    })
}

/// Two-tailed p-value of correlation `r` over `n` pairs under H0: rho = 0.
pub fn two_tailed_p_value(r: f64, n: usize) -> f64 {
    // Two points always lie on a line; the test has no degrees of freedom.
    if n <= 2 {
        return 1.0;
    }
    let r2 = r * r;
    if r2 >= 1.0 {
        return 0.0;
    }

    let df = (n - 2) as f64;
    let t2 = r2 * df / (1.0 - r2);
    regularized_incomplete_beta(df / 2.0, 0.5, df / (df + t2)).clamp(0.0, 1.0)
}

fn ln_gamma(x: f64) -> f64 {
    // Lanczos approximation, g = 7
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_93,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_13,
        -176.615_029_162_140_59,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_571_6e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        let pi = std::f64::consts::PI;
        return (pi / (pi * x).sin().abs()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let t = x + 7.5;
    let mut a = COEFFS[0];
    for (i, &c) in COEFFS.iter().enumerate().skip(1) {
        a += c / (x + i as f64);
    }

    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + a.ln()
}

/// Regularized incomplete beta `I_x(a, b)`.
fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let ln_front = ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();

    // Continued fraction converges fastest on this side of the mean
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let guard = |v: f64| if v.abs() < BETACF_FPMIN { BETACF_FPMIN } else { v };

    let mut c = 1.0;
    let mut d = 1.0 / guard(1.0 - qab * x / qap);
    let mut h = d;

    for m in 1..=BETACF_MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        // Even step
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / guard(1.0 + aa * d);
        c = guard(1.0 + aa / c);
        h *= d * c;

        // Odd step
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / guard(1.0 + aa * d);
        c = guard(1.0 + aa / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < BETACF_EPS {
            break;
        }
    }

    h
}
