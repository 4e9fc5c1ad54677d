//! Application layer orchestrating the payment workflow.
//!
//! This module defines [`workflow::PaymentWorkflow`], the single entry point
//! tying the loader, validator, submitter, and presenter together over a
//! [`crate::domain::ports::RegistrationGateway`].

pub mod workflow;
