//! Status command - show the effective alternate root

use crate::config::{PrefixSource, Settings};
use crate::error::AltrootResult;
use crate::ui::{self, UiContext};
use std::path::Path;

/// Execute the status command
pub fn execute(settings: &Settings, config_path: &Path) -> AltrootResult<()> {
    let ctx = UiContext::detect();
    let resolver = settings.build_resolver()?;

    ui::intro(&ctx, "altroot status");
    ui::key_value(&ctx, "Config", &config_path.display().to_string());
    ui::key_value(&ctx, "Source", settings.source.describe());

    let Some(root) = resolver.root() else {
        if settings.source == PrefixSource::Unset {
            ui::step_warn_hint(
                &ctx,
                "No alternate root configured",
                "Use --prefix, ALTROOT_PREFIX or: altroot config set prefix.root <DIR>",
            );
        } else {
            ui::step_info(&ctx, "Remapping disabled; paths pass through unchanged");
        }
        return Ok(());
    };

    ui::key_value(&ctx, "Root", root.as_str());
    let exists = Path::new(root.as_str()).is_dir();
    ui::key_value_status(
        &ctx,
        "Directory",
        if exists { "present" } else { "missing" },
        exists,
    );
    if let Some(bound) = resolver.max_symlinks() {
        ui::key_value(&ctx, "Symlink bound", &bound.to_string());
    }

    if exists {
        ui::step_ok(&ctx, "Absolute paths will be remapped");
    } else {
        ui::step_warn_hint(
            &ctx,
            "Alternate root does not exist",
            "Every lookup will pass through unchanged",
        );
    }

    Ok(())
}
