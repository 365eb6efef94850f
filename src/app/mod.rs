//! Core application logic: state management, event handling, and action dispatch.

pub mod action;
pub mod boundary;
pub mod confirm;
pub mod crash;
pub mod delete;
pub mod event;
pub mod handler;
pub mod query;
pub mod route;
pub mod state;
