//! Corruption-weighted portfolio model.
//!
//! Projects base-case return, crisis alpha and worst-case drawdown for an
//! allocation across the four instrument classes, with separate leverage for
//! stablecoins (the most predictable leg) and volatile assets.

use serde::{Deserialize, Serialize};

/// Instrument classes the allocation spreads over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Bitcoin,
    Ethereum,
    Stablecoins,
    Privacy,
}

impl AssetClass {
    pub const ALL: [AssetClass; 4] = [
        AssetClass::Bitcoin,
        AssetClass::Ethereum,
        AssetClass::Stablecoins,
        AssetClass::Privacy,
    ];

    /// Expected annual return profile per class.
    pub fn expected_returns(&self) -> ClassReturns {
        match self {
            AssetClass::Bitcoin => ClassReturns {
                base_case: 0.25,
                crisis_alpha: 2.0,
                max_drawdown: -0.60,
            },
            AssetClass::Ethereum => ClassReturns {
                base_case: 0.30,
                crisis_alpha: 2.5,
                max_drawdown: -0.65,
            },
            AssetClass::Stablecoins => ClassReturns {
                base_case: 0.08,
                crisis_alpha: 1.2,
                max_drawdown: -0.15,
            },
            AssetClass::Privacy => ClassReturns {
                base_case: 0.20,
                crisis_alpha: 1.5,
                max_drawdown: -0.55,
            },
        }
    }
}

/// Base-case annual return, crisis multiple and worst-case drawdown for one
/// instrument class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassReturns {
    pub base_case: f64,
    pub crisis_alpha: f64,
    pub max_drawdown: f64,
}

/// Allocation percentages per class; must total 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub bitcoin_pct: f64,
    pub ethereum_pct: f64,
    pub stablecoin_pct: f64,
    pub privacy_pct: f64,
}

impl Default for Allocation {
    fn default() -> Self {
        Self {
            bitcoin_pct: 30.0,
            ethereum_pct: 20.0,
            stablecoin_pct: 40.0,
            privacy_pct: 10.0,
        }
    }
}

impl Allocation {
    pub fn total_pct(&self) -> f64 {
        self.bitcoin_pct + self.ethereum_pct + self.stablecoin_pct + self.privacy_pct
    }

    fn weight(&self, class: AssetClass) -> f64 {
        let pct = match class {
            AssetClass::Bitcoin => self.bitcoin_pct,
            AssetClass::Ethereum => self.ethereum_pct,
            AssetClass::Stablecoins => self.stablecoin_pct,
            AssetClass::Privacy => self.privacy_pct,
        };
        pct / 100.0
    }
}

/// Leverage multipliers; stablecoins tolerate more than volatile assets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeverageSettings {
    pub stablecoin: f64,
    pub volatile: f64,
}

impl Default for LeverageSettings {
    fn default() -> Self {
        Self {
            stablecoin: 2.0,
            volatile: 1.0,
        }
    }
}

impl LeverageSettings {
    const STABLECOIN_MAX: f64 = 3.0;
    const VOLATILE_MAX: f64 = 2.0;

    fn clamped(&self) -> Self {
        Self {
            stablecoin: self.stablecoin.clamp(1.0, Self::STABLECOIN_MAX),
            volatile: self.volatile.clamp(1.0, Self::VOLATILE_MAX),
        }
    }

    fn for_class(&self, class: AssetClass) -> f64 {
        match class {
            AssetClass::Stablecoins => self.stablecoin,
            _ => self.volatile,
        }
    }
}

/// Leverage-weighted exposure for one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassExposure {
    pub class: AssetClass,
    pub weight_pct: f64,
    pub leverage: f64,
    pub effective_exposure_pct: f64,
}

/// Projected portfolio performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioProjection {
    /// Expected annual return in normal conditions (fraction, 0.25 = 25%)
    pub base_case_annual: f64,
    /// Expected multiple during policy friction events
    pub crisis_alpha_multiple: f64,
    /// Worst-case loss (negative fraction)
    pub max_drawdown: f64,
    pub exposures: Vec<ClassExposure>,
}

/// Project expected performance for an allocation.
///
/// Returns `None` when the allocation does not total 100% (mirroring the
/// dashboard's refusal to simulate an incomplete allocation). Leverage is
/// clamped to the per-class limits before weighting.
pub fn project(allocation: &Allocation, leverage: &LeverageSettings) -> Option<PortfolioProjection> {
    if (allocation.total_pct() - 100.0).abs() > 1e-9 {
        return None;
    }
    let leverage = leverage.clamped();

    let mut base_case_annual = 0.0;
    let mut crisis_alpha_multiple = 0.0;
    let mut max_drawdown = 0.0;
    let mut exposures = Vec::with_capacity(AssetClass::ALL.len());

    for class in AssetClass::ALL {
        let weight = allocation.weight(class);
        let lev = leverage.for_class(class);
        let returns = class.expected_returns();

        base_case_annual += weight * returns.base_case * lev;
        crisis_alpha_multiple += weight * returns.crisis_alpha * lev;
        max_drawdown += weight * returns.max_drawdown * lev;

        exposures.push(ClassExposure {
            class,
            weight_pct: weight * 100.0,
            leverage: lev,
            effective_exposure_pct: weight * 100.0 * lev,
        });
    }

    Some(PortfolioProjection {
        base_case_annual,
        crisis_alpha_multiple,
        max_drawdown,
        exposures,
    })
}
