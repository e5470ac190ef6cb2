/// Order of an Adams-Bashforth-Moulton pair.
///
/// An order-`k` pair keeps `k` past derivatives: the Adams-Bashforth
/// predictor uses all of them, the Adams-Moulton corrector uses the newest
/// `k - 1` plus the derivative at the predicted state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    Two,
    Three,
    #[default]
    Four,
    Five,
}

/// Coefficient tables for one order, oldest derivative first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    /// Adams-Bashforth weights applied to the history.
    pub predictor: &'static [f64],

    /// Adams-Moulton weights; the last entry multiplies the derivative at
    /// the predicted state.
    pub corrector: &'static [f64],

    /// Milne factor turning `corrected - predicted` into a local error
    /// estimate for the corrected state.
    pub error_factor: f64,
}

const TWO: Weights = Weights {
    predictor: &[-1.0 / 2.0, 3.0 / 2.0],
    corrector: &[1.0 / 2.0, 1.0 / 2.0],
    error_factor: 1.0 / 6.0,
};

const THREE: Weights = Weights {
    predictor: &[5.0 / 12.0, -16.0 / 12.0, 23.0 / 12.0],
    corrector: &[-1.0 / 12.0, 8.0 / 12.0, 5.0 / 12.0],
    error_factor: 1.0 / 10.0,
};

const FOUR: Weights = Weights {
    predictor: &[-9.0 / 24.0, 37.0 / 24.0, -59.0 / 24.0, 55.0 / 24.0],
    corrector: &[1.0 / 24.0, -5.0 / 24.0, 19.0 / 24.0, 9.0 / 24.0],
    error_factor: 19.0 / 270.0,
};

const FIVE: Weights = Weights {
    predictor: &[
        251.0 / 720.0,
        -1274.0 / 720.0,
        2616.0 / 720.0,
        -2774.0 / 720.0,
        1901.0 / 720.0,
    ],
    corrector: &[
        -19.0 / 720.0,
        106.0 / 720.0,
        -264.0 / 720.0,
        646.0 / 720.0,
        251.0 / 720.0,
    ],
    error_factor: 27.0 / 502.0,
};

impl Order {
    /// Number of past derivatives the method keeps.
    #[must_use]
    pub fn step_count(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }

    #[must_use]
    pub fn weights(self) -> &'static Weights {
        match self {
            Self::Two => &TWO,
            Self::Three => &THREE,
            Self::Four => &FOUR,
            Self::Five => &FIVE,
        }
    }

    /// Exponent used when rescaling the step from an error ratio.
    #[must_use]
    pub fn inv_order(self) -> f64 {
        1.0 / (self.step_count() + 1) as f64
    }
}

impl TryFrom<usize> for Order {
    type Error = usize;

    fn try_from(order: usize) -> Result<Self, usize> {
        match order {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            5 => Ok(Self::Five),
            other => Err(other),
        }
    }
}
