//! Payment settlement.
//!
//! No real processor is wired in. `SimulatedGateway` approves a configurable
//! share of charges at random; `FixedGateway` always answers the same way and
//! is what integration tests inject.

use std::sync::Mutex;

use rand::{Rng, SeedableRng, rngs::StdRng};
use uuid::Uuid;

use crate::models::PaymentMethod;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    pub order_id: Uuid,
    pub amount: f64,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Approved,
    Declined,
}

pub trait PaymentGateway: Send + Sync {
    fn settle(&self, charge: &Charge) -> Settlement;
}

pub struct SimulatedGateway {
    success_rate: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedGateway {
    /// A seed makes the sequence of outcomes reproducible.
    pub fn new(success_rate: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            success_rate: success_rate.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }
}

impl PaymentGateway for SimulatedGateway {
    fn settle(&self, charge: &Charge) -> Settlement {
        let approved = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            rng.gen_bool(self.success_rate)
        };
        let settlement = if approved {
            Settlement::Approved
        } else {
            Settlement::Declined
        };
        tracing::debug!(
            order_id = %charge.order_id,
            amount = charge.amount,
            ?settlement,
            "simulated settlement"
        );
        settlement
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedGateway(pub Settlement);

impl PaymentGateway for FixedGateway {
    fn settle(&self, _charge: &Charge) -> Settlement {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charge() -> Charge {
        Charge {
            order_id: Uuid::new_v4(),
            amount: 216.0,
            method: PaymentMethod::Card,
        }
    }

    #[test]
    fn certain_rates_are_deterministic() {
        let always = SimulatedGateway::new(1.0, None);
        let never = SimulatedGateway::new(0.0, None);
        for _ in 0..50 {
            assert_eq!(always.settle(&charge()), Settlement::Approved);
            assert_eq!(never.settle(&charge()), Settlement::Declined);
        }
    }

    #[test]
    fn seeded_gateways_agree() {
        let a = SimulatedGateway::new(0.9, Some(42));
        let b = SimulatedGateway::new(0.9, Some(42));
        let left: Vec<_> = (0..100).map(|_| a.settle(&charge())).collect();
        let right: Vec<_> = (0..100).map(|_| b.settle(&charge())).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn approval_rate_is_roughly_configured() {
        let gateway = SimulatedGateway::new(0.9, Some(7));
        let approved = (0..2000)
            .filter(|_| gateway.settle(&charge()) == Settlement::Approved)
            .count();
        assert!((1650..=1950).contains(&approved), "approved {approved} of 2000");
    }

    #[test]
    fn out_of_range_rate_is_clamped() {
        let gateway = SimulatedGateway::new(3.0, Some(1));
        assert_eq!(gateway.settle(&charge()), Settlement::Approved);
    }

    #[test]
    fn fixed_gateway_repeats_its_answer() {
        let gateway = FixedGateway(Settlement::Declined);
        assert_eq!(gateway.settle(&charge()), Settlement::Declined);
    }
}
