pub mod commands;
pub mod config;
pub mod models;
pub mod planner;
pub mod rewards;
pub mod schedule;
pub mod storage;
