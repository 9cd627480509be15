//! Terminal output helpers
//!
//! Uses `cliclack` log lines when attached to an interactive terminal and
//! falls back to plain bracketed output in CI or when piped.

mod context;
mod output;

pub use context::UiContext;
pub use output::{
    intro, key_value, key_value_status, remark, section, step_error_detail, step_info, step_ok,
    step_ok_detail, step_warn_hint,
};
