//! Core logic for the business-registration platform front end: the scripted
//! chatbot responder and the multi-step registration wizard.

pub mod api;
pub mod chatbot;
pub mod config;
pub mod context;
pub mod error;
pub mod wizard;
