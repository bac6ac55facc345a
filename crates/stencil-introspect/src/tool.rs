//! Class Tool
//!
//! Template-facing view of one class: names, modifiers and sorted member
//! lists. Meant for generating documentation, demo code or test skeletons
//! from class structure; it offers no way to call into the class.
//!
//! Every tool derived from another one (`inspect_name`, `inspect_object`,
//! `inspect_super`) shares the parent's [`InspectContext`], so safe mode and
//! the diagnostic sink carry over without being resolved again.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use rustc_hash::FxHashSet;

use crate::class_metadata::ClassInfo;
use crate::config::InspectContext;
use crate::error::{IntrospectError, IntrospectResult};
use crate::members::{Callable, ConstructorDescriptor, FieldDescriptor, Member, MethodDescriptor};
use crate::modifiers::Modifiers;
use crate::types::TypeRef;

/// Values that know the qualified name of their runtime class
pub trait Reflected {
    fn runtime_class(&self) -> &str;
}

impl Reflected for str {
    fn runtime_class(&self) -> &str {
        "java.lang.String"
    }
}

impl Reflected for String {
    fn runtime_class(&self) -> &str {
        "java.lang.String"
    }
}

macro_rules! impl_reflected_boxed {
    ($($ty:ty => $class:literal),* $(,)?) => {
        $(
            impl Reflected for $ty {
                fn runtime_class(&self) -> &str {
                    $class
                }
            }
        )*
    };
}

// Scalars report the boxed class a template would see
impl_reflected_boxed! {
    bool => "java.lang.Boolean",
    char => "java.lang.Character",
    i8 => "java.lang.Byte",
    i16 => "java.lang.Short",
    i32 => "java.lang.Integer",
    i64 => "java.lang.Long",
    f32 => "java.lang.Float",
    f64 => "java.lang.Double",
}

/// Inspector for a single class
#[derive(Debug)]
pub struct ClassTool {
    context: InspectContext,
    class: Arc<ClassInfo>,
    fields: OnceCell<Vec<FieldDescriptor>>,
    methods: OnceCell<Vec<MethodDescriptor>>,
    constructors: OnceCell<Vec<ConstructorDescriptor>>,
}

impl ClassTool {
    /// Create a tool for `class`
    ///
    /// Fails if no class is given or its name is blank.
    pub fn new(context: InspectContext, class: Option<Arc<ClassInfo>>) -> IntrospectResult<Self> {
        let class = class.ok_or(IntrospectError::MissingTarget)?;
        if class.name.trim().is_empty() {
            return Err(IntrospectError::InvalidTarget("blank class name".to_string()));
        }
        Ok(Self::derived(context, class))
    }

    /// Create a tool for the class named by the context's configuration
    /// (`java.lang.Object` when none is configured)
    pub fn from_config(context: InspectContext) -> IntrospectResult<Self> {
        let name = context.config().target().to_string();
        let class = resolve(&context, &name)?;
        Self::new(context, Some(class))
    }

    fn derived(context: InspectContext, class: Arc<ClassInfo>) -> Self {
        Self {
            context,
            class,
            fields: OnceCell::new(),
            methods: OnceCell::new(),
            constructors: OnceCell::new(),
        }
    }

    // ===== Derived tools =====

    /// Tool for the class with the given qualified name
    ///
    /// Returns `None` (after reporting to the diagnostic sink) if the name
    /// does not resolve.
    pub fn inspect_name(&self, name: &str) -> Option<ClassTool> {
        resolve(&self.context, name)
            .ok()
            .map(|class| self.inspect_class(class))
    }

    /// Tool for the runtime class of `value`
    pub fn inspect_object(&self, value: Option<&dyn Reflected>) -> Option<ClassTool> {
        self.inspect_name(value?.runtime_class())
    }

    /// Tool for the superclass; `None` for root classes and interfaces
    pub fn inspect_super(&self) -> Option<ClassTool> {
        let name = self.class.superclass_name()?;
        self.inspect_name(name)
    }

    /// Tool for `class`, sharing this tool's configuration
    pub fn inspect_class(&self, class: Arc<ClassInfo>) -> ClassTool {
        Self::derived(self.context.clone(), class)
    }

    // ===== Class information =====

    /// The class being inspected
    pub fn class(&self) -> &Arc<ClassInfo> {
        &self.class
    }

    pub fn context(&self) -> &InspectContext {
        &self.context
    }

    /// Package of the inspected class
    pub fn package(&self) -> &str {
        self.class.package_name()
    }

    /// Simple name of the inspected class
    pub fn name(&self) -> &str {
        self.class.simple_name()
    }

    /// Qualified name of the inspected class
    pub fn full_name(&self) -> &str {
        &self.class.name
    }

    pub fn modifiers(&self) -> Modifiers {
        self.class.modifiers
    }

    /// True if a no-argument construction of the class succeeds
    ///
    /// Failures of any kind are reported as `false`.
    pub fn supports_new_instance(&self) -> bool {
        match self.context.provider().instantiate(&self.class) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(
                    class = %self.class.name,
                    %err,
                    "no-argument construction unsupported"
                );
                false
            }
        }
    }

    pub fn is_public(&self) -> bool {
        self.class.modifiers.is_public()
    }

    pub fn is_protected(&self) -> bool {
        self.class.modifiers.is_protected()
    }

    pub fn is_private(&self) -> bool {
        self.class.modifiers.is_private()
    }

    /// True for nested classes declared static and for top-level classes
    /// that carry the flag
    pub fn is_static(&self) -> bool {
        self.class.modifiers.is_static()
    }

    pub fn is_final(&self) -> bool {
        self.class.modifiers.is_final()
    }

    pub fn is_interface(&self) -> bool {
        self.class.modifiers.is_interface()
    }

    /// True if the class is declared `strictfp`
    pub fn is_strict(&self) -> bool {
        self.class.modifiers.is_strict()
    }

    pub fn is_abstract(&self) -> bool {
        self.class.modifiers.is_abstract()
    }

    // ===== Members =====

    fn keep(&self, member: &impl Member) -> bool {
        !self.context.safe_mode() || member.is_public()
    }

    fn sorted<T: Member + Ord>(&self, kind: &str, declared: impl Iterator<Item = T>) -> Vec<T> {
        let mut members: Vec<T> = declared.filter(|m| self.keep(m)).collect();
        members.sort();
        tracing::debug!(
            class = %self.class.name,
            kind,
            count = members.len(),
            safe_mode = self.context.safe_mode(),
            "built member list"
        );
        members
    }

    /// Declared fields, sorted by unique name
    ///
    /// In safe mode (the default) only public fields are listed.
    pub fn fields(&self) -> &[FieldDescriptor] {
        self.fields.get_or_init(|| {
            let declared = self.class.fields.iter().map(|field| {
                FieldDescriptor::new(
                    field.clone(),
                    Arc::clone(&self.class),
                    Arc::clone(self.context.provider()),
                )
            });
            self.sorted("fields", declared)
        })
    }

    /// Declared methods, sorted by unique name
    ///
    /// In safe mode (the default) only public methods are listed.
    pub fn methods(&self) -> &[MethodDescriptor] {
        self.methods.get_or_init(|| {
            let declared = self
                .class
                .methods
                .iter()
                .map(|method| MethodDescriptor::new(method.clone(), Arc::clone(&self.class)));
            self.sorted("methods", declared)
        })
    }

    /// Declared constructors, sorted by unique name
    ///
    /// In safe mode (the default) only public constructors are listed.
    pub fn constructors(&self) -> &[ConstructorDescriptor] {
        self.constructors.get_or_init(|| {
            let declared = self
                .class
                .constructors
                .iter()
                .map(|ctor| ConstructorDescriptor::new(ctor.clone(), Arc::clone(&self.class)));
            self.sorted("constructors", declared)
        })
    }

    /// Non-primitive types used by the listed fields, methods and
    /// constructors (field types, parameter types, return types)
    ///
    /// Array types are replaced by their innermost element type, so the
    /// set never holds an array or a primitive.
    pub fn referenced_types(&self) -> FxHashSet<TypeRef> {
        let mut types = FxHashSet::default();
        for method in self.methods() {
            if !method.is_void() {
                add_type(&mut types, method.returns());
            }
            for param in method.parameters() {
                add_type(&mut types, param);
            }
        }
        for ctor in self.constructors() {
            for param in ctor.parameters() {
                add_type(&mut types, param);
            }
        }
        for field in self.fields() {
            add_type(&mut types, field.ty());
        }
        types
    }
}

fn add_type(types: &mut FxHashSet<TypeRef>, ty: &TypeRef) {
    let ty = ty.innermost();
    if !ty.is_primitive() {
        types.insert(ty.clone());
    }
}

fn resolve(context: &InspectContext, name: &str) -> IntrospectResult<Arc<ClassInfo>> {
    context.provider().class_for_name(name).map_err(|err| {
        context.report(&format!("Could not load class for {}", name));
        err
    })
}
