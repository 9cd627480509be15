//! Status lines for human-facing commands
//!
//! Every helper has a cliclack rendering for terminals and a bracketed
//! plain rendering that stays greppable in logs and tests.

use super::context::UiContext;
use console::{style, Style};

/// Title line at the top of a report
pub fn intro(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        cliclack::intro(style(title).cyan().bold()).ok();
    } else {
        println!("{}", style(title).cyan().bold());
    }
}

/// Blank line followed by a bold header
pub fn section(ctx: &UiContext, title: &str) {
    println!();
    if ctx.use_fancy_output() {
        cliclack::log::info(style(title).bold()).ok();
    } else {
        println!("{}", style(title).bold());
    }
}

pub fn step_ok(ctx: &UiContext, message: &str) {
    tagged(ctx, Tag::Ok, message);
}

pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    tagged(ctx, Tag::Ok, &format!("{} ({})", message, style(detail).dim()));
}

pub fn step_info(ctx: &UiContext, message: &str) {
    tagged(ctx, Tag::Info, message);
}

pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    tagged(ctx, Tag::Warn, &format!("{} - {}", message, style(hint).dim()));
}

pub fn step_error_detail(ctx: &UiContext, message: &str, detail: &str) {
    tagged(ctx, Tag::Fail, &format!("{}: {}", message, style(detail).red()));
}

/// Dimmed aside
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("  {}", style(message).dim());
    }
}

/// Indented `key: value` line
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    let key = if ctx.use_fancy_output() {
        style(key).dim()
    } else {
        style(key)
    };
    println!("  {}: {}", key, value);
}

/// `key: value` line colored by whether the value is healthy
pub fn key_value_status(ctx: &UiContext, key: &str, value: &str, ok: bool) {
    let tone = if ok {
        Style::new().green()
    } else {
        Style::new().yellow()
    };

    if ctx.use_fancy_output() {
        println!("  {}: {}", style(key).dim(), tone.apply_to(value));
    } else {
        let tag = if ok { Tag::Ok } else { Tag::Warn };
        println!("  {} {}: {}", tag.plain(), key, value);
    }
}

#[derive(Clone, Copy)]
enum Tag {
    Ok,
    Info,
    Warn,
    Fail,
}

impl Tag {
    fn plain(self) -> console::StyledObject<&'static str> {
        match self {
            Tag::Ok => style("[OK]").green(),
            Tag::Info => style("[INFO]").cyan(),
            Tag::Warn => style("[WARN]").yellow(),
            Tag::Fail => style("[FAIL]").red(),
        }
    }
}

fn tagged(ctx: &UiContext, tag: Tag, message: &str) {
    if !ctx.use_fancy_output() {
        println!("  {} {}", tag.plain(), message);
        return;
    }
    let shown = match tag {
        Tag::Ok => cliclack::log::success(message),
        Tag::Info => cliclack::log::info(message),
        Tag::Warn => cliclack::log::warning(message),
        Tag::Fail => cliclack::log::error(message),
    };
    shown.ok();
}
