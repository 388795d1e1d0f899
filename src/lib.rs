pub mod api;
pub mod completion;
pub mod config;
pub mod editor;
pub mod errors;
pub mod interests;
pub mod layout;
pub mod normalization;
pub mod notice;
pub mod profile;
pub mod theme;
pub mod urls;
pub mod validation;
