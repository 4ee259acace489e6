use tracing::trace;

use crate::error::RenderError;
use crate::parser::*;
use crate::renderer::builder::TaggedTextBuilder;
use crate::renderer::components::*;
use crate::renderer::traits::*;

/// Writes `[attrs] TYPE NAME[suffix]`, tagging the type reference and the
/// declared name.
fn render_declaration<'a>(
    builder: &mut TaggedTextBuilder<'a>,
    attributes: &str,
    ty: &'a NdrType,
    declared: &'a dyn NamedEntity,
) -> Result<(), RenderError> {
    let type_renderer = TypeRenderer;

    builder
        .append(attributes)
        .append(type_renderer.render_keyword(ty))
        .append_tagged_type(&type_renderer.render_type_name(ty), type_renderer.tag_target(ty))?
        .append(" ")
        .append_name(declared)?
        .append(&type_renderer.render_declarator_suffix(ty));
    Ok(())
}

impl Render for NdrStructure {
    fn render<'a>(
        &'a self,
        builder: &mut TaggedTextBuilder<'a>,
        context: &RenderContext,
    ) -> Result<(), RenderError> {
        trace!(structure = %self.name, members = self.members.len(), "rendering structure");
        let type_renderer = TypeRenderer;

        builder.append("struct ").append_name(self)?.append_line(" {");
        builder.push_indent(context.indent());
        for member in &self.members {
            if context.show_offsets {
                builder.append_fmt(format_args!("/* Offset: {} */ ", member.offset))?;
            }
            let attributes = type_renderer.render_field_attributes(&member.member_type);
            render_declaration(builder, &attributes, &member.member_type, member)?;
            builder.append_line(";");
        }
        builder.pop_indent()?.append_line("};");
        Ok(())
    }
}

impl Render for NdrUnion {
    fn render<'a>(
        &'a self,
        builder: &mut TaggedTextBuilder<'a>,
        context: &RenderContext,
    ) -> Result<(), RenderError> {
        trace!(union = %self.name, arms = self.arms.len(), "rendering union");
        let type_renderer = TypeRenderer;

        builder.append("union ").append_name(self)?.append_line(" {");
        builder.push_indent(context.indent());
        for arm in &self.arms {
            match arm.case {
                Some(case) => builder.append_fmt(format_args!("/* case {} */ ", case))?,
                None => builder.append("/* default */ "),
            };
            let attributes = type_renderer.render_field_attributes(&arm.arm_type);
            render_declaration(builder, &attributes, &arm.arm_type, arm)?;
            builder.append_line(";");
        }
        builder.pop_indent()?.append_line("};");
        Ok(())
    }
}

impl Render for NdrComplexType {
    fn render<'a>(
        &'a self,
        builder: &mut TaggedTextBuilder<'a>,
        context: &RenderContext,
    ) -> Result<(), RenderError> {
        match self {
            NdrComplexType::Struct(structure) => structure.render(builder, context),
            NdrComplexType::Union(union) => union.render(builder, context),
        }
    }
}

impl Render for NdrProcedure {
    fn render<'a>(
        &'a self,
        builder: &mut TaggedTextBuilder<'a>,
        context: &RenderContext,
    ) -> Result<(), RenderError> {
        trace!(procedure = %self.name, params = self.params.len(), "rendering procedure");
        let type_renderer = TypeRenderer;

        if context.show_proc_numbers {
            builder.append_fmt(format_args!("/* Proc {} */ ", self.proc_num))?;
        }

        match &self.return_type {
            Some(ret) => {
                builder
                    .append(type_renderer.render_keyword(ret))
                    .append_tagged_type(&type_renderer.render_type_name(ret), type_renderer.tag_target(ret))?;
            }
            None => {
                builder.append("void");
            }
        }

        builder.append(" ").append_name(self)?.append("(");
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                builder.append(", ");
            }
            let attributes = type_renderer.render_param_attributes(param);
            render_declaration(builder, &attributes, &param.param_type, param)?;
        }
        builder.append_line(");");
        Ok(())
    }
}

impl Render for NdrInterface {
    fn render<'a>(
        &'a self,
        builder: &mut TaggedTextBuilder<'a>,
        context: &RenderContext,
    ) -> Result<(), RenderError> {
        builder
            .append_fmt(format_args!("[uuid({}), version({})]", self.uuid, self.version))?
            .new_line()
            .append("interface ")
            .append_name(self)?
            .append_line(" {");
        builder.push_indent(context.indent());

        for (i, complex) in self.complex_types.iter().enumerate() {
            if i > 0 {
                builder.new_line();
            }
            complex.render(builder, context)?;
        }

        if !self.complex_types.is_empty() && !self.procedures.is_empty() {
            builder.new_line();
        }

        for procedure in &self.procedures {
            procedure.render(builder, context)?;
        }

        builder.pop_indent()?.append_line("}");
        Ok(())
    }
}
