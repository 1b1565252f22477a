//! # tollgate-sms
//!
//! SMS delivery channel for Tollgate: the [`SmsGateway`] trait, a
//! Twilio-compatible REST client, and phone number normalization.

pub mod gateway;
pub mod phone;
pub mod twilio;

pub use gateway::{NoopSmsGateway, SmsGateway};
pub use twilio::TwilioSmsClient;
