// src/utils/error.rs
#![allow(dead_code)]
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("WebDriver request failed: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError), // Automatically convert thirtyfour errors

    #[error("Timed out waiting for page readiness at {0}")]
    PageTimeout(String),

    #[error("Could not locate tab navigation control: {0}")]
    TabNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Unknown tab name: {0}")]
    UnknownTab(String),
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Browser session failed: {0}")]
    Session(#[from] SessionError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Report output failed: {0}")]
    Report(#[from] ReportError),
}
