//! Client-side lifecycle simulator for distribution requests.
//!
//! Used by the demo page to show how a request moves through
//! `processing → confirmed | postponed → confirmed` without a backend.
//! One tick changes at most one record.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::aggregate::{DistributionStatus, MIN_ADDRESS_LEN};
use crate::shared::validation::ValidationErrors;

pub const REASON_SUBMITTED: &str = "Yêu cầu đã được tiếp nhận";
pub const REASON_POSTPONED: &str = "Tạm hoãn do kho chưa đủ hàng";
pub const REASON_CONFIRMED: &str = "Kho đã xác nhận xuất hàng";
pub const REASON_RESUMED: &str = "Đã bổ sung hàng, yêu cầu được xác nhận";
pub const REASON_CANCELLED: &str = "Người dùng đã hủy yêu cầu";

/// Source of probabilistic draws.
pub trait Chance {
    /// True with the given probability.
    fn fires(&mut self, probability: f64) -> bool;
}

impl<R: rand::Rng + ?Sized> Chance for R {
    fn fires(&mut self, probability: f64) -> bool {
        self.gen_bool(probability.clamp(0.0, 1.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    pub postpone_probability: f64,
    pub resume_probability: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            postpone_probability: 0.3,
            resume_probability: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    pub product_id: String,
    pub quantity: u32,
    pub unit: String,
}

/// Form input for a new simulated request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionDraft {
    pub products: Vec<ProductLine>,
    pub delivery_address: String,
}

impl DistributionDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            !self.products.is_empty(),
            "products",
            "Vui lòng chọn sản phẩm",
        );
        errors.check(
            self.products.iter().all(|p| p.quantity > 0),
            "quantity",
            "Số lượng phải lớn hơn 0",
        );
        let address = self.delivery_address.trim();
        if address.is_empty() {
            errors.push("delivery_address", "Vui lòng nhập địa chỉ giao hàng");
        } else {
            errors.check(
                address.chars().count() >= MIN_ADDRESS_LEN,
                "delivery_address",
                "Địa chỉ phải có ít nhất 10 ký tự",
            );
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalDistributionRequest {
    pub id: Uuid,
    pub products: Vec<ProductLine>,
    pub delivery_address: String,
    pub status: DistributionStatus,
    pub status_reason: String,
    pub submitted_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
    pub force_postponed: bool,
}

/// One status change produced by the simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub id: Uuid,
    pub from: DistributionStatus,
    pub to: DistributionStatus,
    pub reason: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct StatusSimulator {
    config: SimulatorConfig,
    records: Vec<LocalDistributionRequest>,
}

impl StatusSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
        }
    }

    pub fn config(&self) -> SimulatorConfig {
        self.config
    }

    /// Records in submission order
    pub fn records(&self) -> &[LocalDistributionRequest] {
        &self.records
    }

    pub fn get(&self, id: Uuid) -> Option<&LocalDistributionRequest> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn pending_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| !r.status.is_terminal())
            .count()
    }

    pub fn submit(
        &mut self,
        draft: DistributionDraft,
        now: DateTime<Utc>,
    ) -> Result<Uuid, ValidationErrors> {
        draft.validate()?;
        let id = Uuid::new_v4();
        self.records.push(LocalDistributionRequest {
            id,
            products: draft.products,
            delivery_address: draft.delivery_address.trim().to_string(),
            status: DistributionStatus::Processing,
            status_reason: REASON_SUBMITTED.to_string(),
            submitted_at: now,
            last_updated_at: now,
            force_postponed: false,
        });
        Ok(id)
    }

    /// Arms the one-shot flag; ignored for terminal records.
    pub fn set_force_postponed(&mut self, id: Uuid) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) if !record.status.is_terminal() => {
                record.force_postponed = true;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self, id: Uuid, now: DateTime<Utc>) -> Option<Transition> {
        let record = self.records.iter_mut().find(|r| r.id == id)?;
        if record.status.is_terminal() {
            return None;
        }
        Some(apply(
            record,
            DistributionStatus::Cancelled,
            REASON_CANCELLED,
            now,
        ))
    }

    /// Advances at most one non-terminal record.
    pub fn tick<C: Chance + ?Sized>(
        &mut self,
        chance: &mut C,
        now: DateTime<Utc>,
    ) -> Option<Transition> {
        let config = self.config;
        let index = self.records.iter().position(|r| match r.status {
            DistributionStatus::Processing => true,
            DistributionStatus::Postponed => chance.fires(config.resume_probability),
            _ => false,
        })?;
        let record = &mut self.records[index];

        let (to, reason) = match record.status {
            DistributionStatus::Processing => {
                let forced = std::mem::take(&mut record.force_postponed);
                if forced || chance.fires(config.postpone_probability) {
                    (DistributionStatus::Postponed, REASON_POSTPONED)
                } else {
                    (DistributionStatus::Confirmed, REASON_CONFIRMED)
                }
            }
            _ => {
                record.force_postponed = false;
                (DistributionStatus::Confirmed, REASON_RESUMED)
            }
        };
        Some(apply(record, to, reason, now))
    }
}

fn apply(
    record: &mut LocalDistributionRequest,
    to: DistributionStatus,
    reason: &str,
    now: DateTime<Utc>,
) -> Transition {
    let at = if now > record.last_updated_at {
        now
    } else {
        record.last_updated_at + Duration::milliseconds(1)
    };
    let from = record.status;
    record.status = to;
    record.status_reason = reason.to_string();
    record.last_updated_at = at;
    Transition {
        id: record.id,
        from,
        to,
        reason: reason.to_string(),
        at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    /// Replays a fixed sequence of draws; defaults to "not fired" once exhausted.
    struct Scripted(VecDeque<bool>);

    impl Scripted {
        fn new(draws: &[bool]) -> Self {
            Self(draws.iter().copied().collect())
        }
    }

    impl Chance for Scripted {
        fn fires(&mut self, _probability: f64) -> bool {
            self.0.pop_front().unwrap_or(false)
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap()
    }

    fn draft(address: &str) -> DistributionDraft {
        DistributionDraft {
            products: vec![ProductLine {
                product_id: "sp001".into(),
                quantity: 5,
                unit: "Thùng".into(),
            }],
            delivery_address: address.into(),
        }
    }

    fn sim_with(n: usize) -> (StatusSimulator, Vec<Uuid>) {
        let mut sim = StatusSimulator::new(SimulatorConfig::default());
        let ids = (0..n)
            .map(|_| sim.submit(draft("12 Nguyễn Huệ, Quận 1"), t0()).unwrap())
            .collect();
        (sim, ids)
    }

    #[test]
    fn test_submit_validates_draft() {
        let mut sim = StatusSimulator::default();
        let errors = sim.submit(draft("  ngắn "), t0()).unwrap_err();
        assert!(errors.for_field("delivery_address").is_some());
        let mut empty = draft("12 Nguyễn Huệ, Quận 1");
        empty.products.clear();
        assert!(sim.submit(empty, t0()).is_err());
        assert!(sim.records().is_empty());
    }

    #[test]
    fn test_forced_record_always_postpones_and_clears_flag() {
        let (mut sim, ids) = sim_with(1);
        assert!(sim.set_force_postponed(ids[0]));
        // A draw that would otherwise confirm.
        let t = sim.tick(&mut Scripted::new(&[false]), t0()).unwrap();
        assert_eq!(t.to, DistributionStatus::Postponed);
        assert_eq!(t.reason, REASON_POSTPONED);
        let record = sim.get(ids[0]).unwrap();
        assert!(!record.force_postponed);
        assert_eq!(record.status_reason, REASON_POSTPONED);
    }

    #[test]
    fn test_processing_confirms_when_draw_does_not_fire() {
        let (mut sim, ids) = sim_with(1);
        let t = sim.tick(&mut Scripted::new(&[false]), t0()).unwrap();
        assert_eq!((t.from, t.to), (DistributionStatus::Processing, DistributionStatus::Confirmed));
        assert_eq!(sim.get(ids[0]).unwrap().status_reason, REASON_CONFIRMED);
        assert_eq!(sim.pending_count(), 0);
    }

    #[test]
    fn test_postponed_is_skipped_unless_resume_draw_fires() {
        let (mut sim, ids) = sim_with(2);
        sim.set_force_postponed(ids[0]);
        sim.tick(&mut Scripted::new(&[]), t0());
        // First record postponed; resume draw misses so the second one is processed.
        let t = sim.tick(&mut Scripted::new(&[false, false]), t0()).unwrap();
        assert_eq!(t.id, ids[1]);
        // Resume draw fires: postponed goes straight to confirmed.
        let t = sim.tick(&mut Scripted::new(&[true]), t0()).unwrap();
        assert_eq!(t.id, ids[0]);
        assert_eq!((t.from, t.to), (DistributionStatus::Postponed, DistributionStatus::Confirmed));
        assert_eq!(t.reason, REASON_RESUMED);
    }

    #[test]
    fn test_terminal_records_never_change() {
        let (mut sim, ids) = sim_with(2);
        sim.cancel(ids[0], t0()).unwrap();
        sim.tick(&mut Scripted::new(&[false]), t0());
        let snapshot = sim.records().to_vec();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            assert!(sim.tick(&mut rng, t0()).is_none());
        }
        assert_eq!(sim.records(), snapshot.as_slice());
        assert!(sim.cancel(ids[1], t0()).is_none());
        assert!(!sim.set_force_postponed(ids[0]));
    }

    #[test]
    fn test_at_most_one_record_changes_per_tick() {
        let (mut sim, _) = sim_with(5);
        let mut rng = SmallRng::seed_from_u64(42);
        for step in 0..40 {
            let before = sim.records().to_vec();
            let transition = sim.tick(&mut rng, t0() + Duration::seconds(step));
            let changed = before
                .iter()
                .zip(sim.records())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(changed, usize::from(transition.is_some()));
        }
    }

    #[test]
    fn test_last_updated_strictly_increases_with_frozen_clock() {
        let (mut sim, ids) = sim_with(1);
        sim.set_force_postponed(ids[0]);
        let first = sim.tick(&mut Scripted::new(&[]), t0()).unwrap();
        assert_eq!(first.at, t0() + Duration::milliseconds(1));
        let second = sim.tick(&mut Scripted::new(&[true]), t0()).unwrap();
        assert!(second.at > first.at);
        assert_eq!(sim.get(ids[0]).unwrap().last_updated_at, second.at);
    }

    #[test]
    fn test_tick_on_empty_simulator() {
        let mut sim = StatusSimulator::default();
        assert!(sim.tick(&mut Scripted::new(&[true]), t0()).is_none());
    }
}
