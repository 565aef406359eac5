//! Build-time placeholder injection.
//!
//! Rewrites a text file in place, replacing the first `%NAME%` token for
//! each configured variable with that variable's value. The default target
//! is the web app's `web/environment.js` with `GOOGLE_MAPS_API_KEY`.

pub mod error;
pub mod injector;
pub mod placeholder;
pub mod policy;
pub mod source;

pub use {
    error::{InjectError, Result},
    injector::{
        DEFAULT_TARGET, DEFAULT_VARIABLE, InjectReport, Injector, Target, UNDEFINED_TEXT, inject,
        render,
    },
    placeholder::{placeholder, substitute_first},
    policy::MissingPolicy,
    source::{Layered, ProcessEnv, VarSource},
};
