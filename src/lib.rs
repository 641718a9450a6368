//! CuraLoop - Conversational care assistant for dementia patients
//!
//! This crate runs two conversational engines over shared patient state:
//! a scripted intake questionnaire that fills a clinical record and raises
//! severity alerts, and treatment check-ins that walk a patient through the
//! activities of their care plan.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
