//! Inner and local class names.
//!
//! Dart has no nested classes, so a member or local class `Inner` of `Outer`
//! becomes the top-level `Outer_Inner`, and every reference follows. Records
//! are visited in creation order, which puts an outer class before the classes
//! it encloses, so deeper nesting composes (`A_B_C`).

use super::RewritePass;
use crate::context::TranslationContext;
use crate::error::Result;
use j2d_java::TypeNesting;

pub struct InnerClassNames;

impl RewritePass for InnerClassNames {
    fn name(&self) -> &'static str {
        "inner-class-names"
    }

    fn run(&mut self, ctx: &mut TranslationContext) -> Result<()> {
        for index in 0..ctx.classes.len() {
            let record = &ctx.classes[index];
            if !matches!(record.nesting, TypeNesting::Member | TypeNesting::Local) {
                continue;
            }
            let (Some(binding), Some(outer)) = (record.binding, record.enclosing) else {
                continue;
            };
            if ctx.is_pinned(binding) {
                continue;
            }
            let Some(current) = ctx.current_name(binding).map(str::to_string) else {
                continue;
            };
            let outer_name = ctx.class_name(outer);
            let flat = ctx.generate_unique_name(&format!("{outer_name}_{current}"));
            ctx.rename(binding, &flat);
        }
        Ok(())
    }
}
