//! `stencil inspect` — Describe the structure of a class.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use stencil_introspect::{
    Callable, Catalog, ClassRegistry, ClassTool, InspectContext, Member, TracingSink,
};

use crate::config::StencilConfig;
use crate::output::{resolve_color_choice, StyledOutput};

pub struct InspectArgs {
    pub class: Option<String>,
    pub catalogs: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub all: bool,
    pub json: bool,
    pub color: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FieldReport {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub modifiers: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_value: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct CallableReport {
    pub unique_name: String,
    pub modifiers: String,
    pub parameters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    pub varargs: bool,
}

#[derive(Debug, Serialize)]
pub struct ClassReport {
    pub name: String,
    pub package: String,
    pub full_name: String,
    pub modifiers: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    pub supports_new_instance: bool,
    pub safe_mode: bool,
    pub fields: Vec<FieldReport>,
    pub constructors: Vec<CallableReport>,
    pub methods: Vec<CallableReport>,
    pub referenced_types: Vec<String>,
}

fn callable_report<C: Callable>(callable: &C, returns: Option<String>) -> CallableReport {
    CallableReport {
        unique_name: callable.unique_name().to_string(),
        modifiers: callable.modifiers().to_string(),
        parameters: callable.parameters().iter().map(|p| p.name()).collect(),
        returns,
        varargs: callable.is_varargs(),
    }
}

pub fn build_report(tool: &ClassTool) -> ClassReport {
    let mut referenced_types: Vec<String> =
        tool.referenced_types().iter().map(|t| t.name()).collect();
    referenced_types.sort();

    ClassReport {
        name: tool.name().to_string(),
        package: tool.package().to_string(),
        full_name: tool.full_name().to_string(),
        modifiers: tool.modifiers().to_string(),
        superclass: tool.class().superclass_name().map(str::to_string),
        supports_new_instance: tool.supports_new_instance(),
        safe_mode: tool.context().safe_mode(),
        fields: tool
            .fields()
            .iter()
            .map(|f| FieldReport {
                name: f.unique_name().to_string(),
                ty: f.ty().name(),
                modifiers: f.modifiers().to_string(),
                static_value: f.static_value(),
            })
            .collect(),
        constructors: tool
            .constructors()
            .iter()
            .map(|c| callable_report(c, None))
            .collect(),
        methods: tool
            .methods()
            .iter()
            .map(|m| callable_report(m, Some(m.returns().name())))
            .collect(),
        referenced_types,
    }
}

/// Build the registry and context described by config and flags
pub fn load_tool(args: &InspectArgs) -> anyhow::Result<ClassTool> {
    let config = StencilConfig::discover(args.config.as_deref())?;

    let mut registry = ClassRegistry::new();
    for path in config.catalogs.iter().chain(args.catalogs.iter()) {
        let catalog = Catalog::from_file(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?;
        let count = registry.load(catalog)?;
        tracing::debug!(path = %path.display(), count, "loaded catalog");
    }

    let mut inspector = config.class;
    if args.all {
        inspector.safe_mode = false;
    }
    if let Some(class) = &args.class {
        inspector.inspect = Some(class.clone());
    }

    let ctx = InspectContext::new(Arc::new(registry), inspector).with_sink(Arc::new(TracingSink));
    Ok(ClassTool::from_config(ctx)?)
}

pub fn execute(args: InspectArgs) -> anyhow::Result<()> {
    let tool = load_tool(&args)?;
    let report = build_report(&tool);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut out = StyledOutput::new(resolve_color_choice(args.color.as_deref()));
    if !report.modifiers.is_empty() {
        out.dim(&format!("{} ", report.modifiers));
    }
    out.bold(&report.full_name);
    if let Some(sup) = &report.superclass {
        out.plain(" extends ");
        out.info(sup);
    }
    out.newline();
    out.plain(&format!(
        "new instance: {}   safe mode: {}\n",
        if report.supports_new_instance { "yes" } else { "no" },
        if report.safe_mode { "on" } else { "off" },
    ));

    out.newline();
    out.heading(&format!("Fields ({})", report.fields.len()));
    for field in &report.fields {
        out.plain(&format!("  {} ", field.name));
        out.info(&field.ty);
        out.dim(&format!("  {}", field.modifiers));
        if let Some(value) = &field.static_value {
            out.plain(&format!(" = {}", value));
        }
        out.newline();
    }

    out.newline();
    out.heading(&format!("Constructors ({})", report.constructors.len()));
    for ctor in &report.constructors {
        print_callable(&mut out, ctor);
    }

    out.newline();
    out.heading(&format!("Methods ({})", report.methods.len()));
    for method in &report.methods {
        print_callable(&mut out, method);
    }

    out.newline();
    out.heading(&format!("Referenced types ({})", report.referenced_types.len()));
    for ty in &report.referenced_types {
        out.plain(&format!("  {}\n", ty));
    }
    out.flush();
    Ok(())
}

fn print_callable(out: &mut StyledOutput, callable: &CallableReport) {
    out.plain(&format!("  {}", callable.unique_name));
    out.dim(&format!("({})", callable.parameters.join(", ")));
    if callable.varargs {
        out.dim(" varargs");
    }
    if let Some(returns) = &callable.returns {
        out.plain(" -> ");
        out.info(returns);
    }
    out.dim(&format!("  {}", callable.modifiers));
    out.newline();
}
