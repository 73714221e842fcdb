#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! AMI eligibility classification and Housing Connect lottery helpers.
//!
//! Everything in this crate is pure and synchronous: fixed lookup tables
//! plus small parsing/formatting helpers layered on the Socrata lottery
//! records. No I/O, no shared state.

pub mod ami;
pub mod helpers;

pub use ami::{ami_tier, income_limit};
pub use stabmap_lottery_models::{AmiTier, HousingConnectLottery};
