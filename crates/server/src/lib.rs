pub mod config;

pub mod db;

pub mod api;

pub mod rest;

pub mod openapi;

pub mod error_convert;

pub mod telemetry;

pub mod health;

pub mod auth;

pub mod s3;

pub mod storage;

// Case data access
pub mod repo;

pub mod store;

pub mod memory;
