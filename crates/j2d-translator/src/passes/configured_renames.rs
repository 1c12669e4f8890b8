//! Configured renames.
//!
//! Applies the rename table to every translated declaration except
//! constructors, whose names are settled by constructor disambiguation. A
//! renamed binding is pinned so later passes keep the configured name.

use super::RewritePass;
use crate::context::TranslationContext;
use crate::error::Result;
use j2d_java::BindingKind;
use tracing::debug;

pub struct ConfiguredRenames;

impl RewritePass for ConfiguredRenames {
    fn name(&self) -> &'static str {
        "configured-renames"
    }

    fn run(&mut self, ctx: &mut TranslationContext) -> Result<()> {
        if ctx.renames().is_empty() {
            return Ok(());
        }
        let targets: Vec<_> = ctx
            .bindings()
            .iter()
            .filter(|(id, info)| info.kind != BindingKind::Constructor && ctx.is_declared(*id))
            .filter_map(|(id, _)| ctx.configured_rename(id).map(|name| (id, name.to_string())))
            .collect();
        for (binding, name) in targets {
            ctx.rename(binding, &name);
            ctx.pin(binding);
        }
        debug!(count = ctx.renames().len(), "configured renames applied");
        Ok(())
    }
}
