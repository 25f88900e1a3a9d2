//! `fee_schedule` payloads
//!
//! Fee schedules are not coin-denominated, so none of these calls take a
//! type argument.

use super::address::Address;
use super::descriptor::{MoveValue, TransactionDescriptor};
use super::marketplace::MarketplacePayloads;
use serde::{Deserialize, Serialize};

const MODULE: &str = "fee_schedule";

/// Parameters for a new fee schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeScheduleTerms {
    pub fee_address: Address,
    pub commission_denominator: u64,
    pub commission_numerator: u64,
    pub bidding_fee: u64,
    pub listing_fee: u64,
}

impl MarketplacePayloads {
    pub fn init_fee_schedule(&self, terms: &FeeScheduleTerms) -> TransactionDescriptor {
        self.plain_call(
            MODULE,
            "init_entry",
            vec![
                MoveValue::from(&terms.fee_address),
                MoveValue::U64(terms.commission_denominator),
                MoveValue::U64(terms.commission_numerator),
                MoveValue::U64(terms.bidding_fee),
                MoveValue::U64(terms.listing_fee),
            ],
        )
    }

    pub fn set_fee_address(
        &self,
        fee_schedule: &Address,
        fee_address: &Address,
    ) -> TransactionDescriptor {
        self.plain_call(
            MODULE,
            "set_fee_address",
            vec![fee_schedule.into(), fee_address.into()],
        )
    }

    pub fn set_fixed_rate_listing_fee(
        &self,
        fee_schedule: &Address,
        fee: u64,
    ) -> TransactionDescriptor {
        self.plain_call(
            MODULE,
            "set_fixed_rate_listing_fee",
            vec![fee_schedule.into(), fee.into()],
        )
    }

    pub fn set_fixed_rate_bidding_fee(
        &self,
        fee_schedule: &Address,
        fee: u64,
    ) -> TransactionDescriptor {
        self.plain_call(
            MODULE,
            "set_fixed_rate_bidding_fee",
            vec![fee_schedule.into(), fee.into()],
        )
    }

    pub fn set_fixed_rate_commission(
        &self,
        fee_schedule: &Address,
        commission: u64,
    ) -> TransactionDescriptor {
        self.plain_call(
            MODULE,
            "set_fixed_rate_commission",
            vec![fee_schedule.into(), commission.into()],
        )
    }

    pub fn set_percentage_rate_commission(
        &self,
        fee_schedule: &Address,
        denominator: u64,
        numerator: u64,
    ) -> TransactionDescriptor {
        self.plain_call(
            MODULE,
            "set_percentage_rate_commission",
            vec![fee_schedule.into(), denominator.into(), numerator.into()],
        )
    }
}
