//! # Repository Module
//!
//! Database repository implementations for AccounTech.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Entry session                                                         │
//! │       │                                                                 │
//! │       │  db.vouchers().last_number(company_id, VoucherType::Sales)     │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  VoucherRepository                                                     │
//! │  ├── insert(&self, voucher)                                            │
//! │  ├── last_number(&self, company_id, voucher_type)                      │
//! │  ├── recent(&self, company_id, limit)                                  │
//! │  └── get_by_id(&self, id)                                              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test (in-memory pool per test)                              │
//! │  • SQL is isolated in one place                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ledger::LedgerRepository`] - Chart of accounts reads and seeding
//! - [`stock::StockRepository`] - Stock item catalog
//! - [`godown::GodownRepository`] - Storage locations
//! - [`voucher::VoucherRepository`] - Voucher persistence and numbering

pub mod godown;
pub mod ledger;
pub mod stock;
pub mod voucher;
