pub mod api;
pub mod prefs;
pub mod remediation;
pub mod session;
pub mod workflow;
