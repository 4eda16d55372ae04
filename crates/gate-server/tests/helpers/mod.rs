//! Test helpers for gate-server.

#![allow(dead_code, unused_imports)]

pub mod assertions;
pub mod client;
pub mod providers;

pub use assertions::*;
pub use client::{TestClient, TestResponse, client, client_with};
pub use providers::{FakeAzure, FakeOpenStack};
