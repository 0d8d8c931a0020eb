//! Client-side glue for the Pengeluaran Harian page: amount fields with
//! `id-ID` grouping, submit guards for the expense and income forms, and the
//! four dashboard charts.

pub mod amount;
pub mod chart;
pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod guard;
pub mod locale;
